// src/handlers/auth.rs

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde_json::json;
use validator::Validate;

use crate::{
    config::Config,
    error::AppError,
    models::user::{LoginRequest, OwnerStatus, Role, SignupRequest, User, UserResponse},
    store::{DynStore, next_id},
    utils::jwt::sign_jwt,
    validation::validate_signup,
};

/// Registers a new client account.
/// Returns 201 Created and the user object (excluding password).
pub async fn signup_client(
    State(store): State<DynStore>,
    Json(payload): Json<SignupRequest>,
) -> Result<impl IntoResponse, AppError> {
    signup(store, payload, Role::Client).await
}

/// Registers a new owner account. Owners start as "not validated" and cannot
/// log in until an admin approves them.
pub async fn signup_owner(
    State(store): State<DynStore>,
    Json(payload): Json<SignupRequest>,
) -> Result<impl IntoResponse, AppError> {
    signup(store, payload, Role::Owner).await
}

async fn signup(
    store: DynStore,
    payload: SignupRequest,
    role: Role,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    let mut users = store.load_users().await?;

    let errors = validate_signup(&payload, &users);
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    let user = User {
        id: next_id(&users),
        first_name: payload.first_name.trim().to_string(),
        last_name: payload.last_name.trim().to_string(),
        email: payload.email.trim().to_string(),
        password: payload.password,
        phone: payload.phone.trim().to_string(),
        address: payload.address.trim().to_string(),
        role,
        status: (role == Role::Owner).then_some(OwnerStatus::NotValidated),
    };

    let response = UserResponse::from(&user);
    users.push(user);
    store.save_users(&users).await?;

    Ok((StatusCode::CREATED, Json(response)))
}

/// Authenticates a user and returns a JWT token plus the view the frontend
/// should redirect to.
///
/// Credentials are compared exactly against the stored record (plaintext by
/// design). Owners pending validation are refused even with correct
/// credentials.
pub async fn login(
    State(store): State<DynStore>,
    State(config): State<Config>,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let users = store.load_users().await?;
    let email = payload.email.trim();
    let password = payload.password.trim();

    let user = users
        .iter()
        .find(|u| u.email == email && u.password == password)
        .ok_or(AppError::AuthError("Please check again!".to_string()))?;

    let redirect = match user.role {
        Role::Client => "houses",
        Role::Owner => {
            if user.status != Some(OwnerStatus::Validated) {
                return Err(AppError::AuthError(
                    "Your account is pending validation by the admin. Please wait for approval."
                        .to_string(),
                ));
            }
            "ownerDashboard"
        }
        Role::Admin => "adminDashboard",
    };

    let token = sign_jwt(user.id, user.role, &config.jwt_secret, config.jwt_expiration)?;

    Ok(Json(json!({
        "token": token,
        "type": "Bearer",
        "role": user.role.as_str(),
        "redirect": redirect,
    })))
}
