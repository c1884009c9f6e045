// src/handlers/profile.rs

use axum::{Extension, Json, extract::State, response::IntoResponse};

use crate::{
    error::AppError,
    models::user::{UpdateProfileRequest, UserResponse},
    store::DynStore,
    utils::jwt::Claims,
    validation::validate_profile_edit,
};

/// Get the connected user's profile.
pub async fn get_me(
    State(store): State<DynStore>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, AppError> {
    let users = store.load_users().await?;
    let user_id = claims.user_id();

    let user = users.iter().find(|u| u.id == user_id).ok_or_else(|| {
        // Stale token for a deleted account.
        tracing::warn!("No user found with this Id: {}", user_id);
        AppError::NotFound("User not found".to_string())
    })?;

    Ok(Json(UserResponse::from(user)))
}

/// Edit the connected user's profile.
///
/// Every field is re-validated. The email uniqueness check excludes the
/// user's own record, so keeping the same email succeeds. The password only
/// changes when one is provided (and then must be confirmed).
pub async fn update_me(
    State(store): State<DynStore>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<UpdateProfileRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut users = store.load_users().await?;
    let user_id = claims.user_id();

    if !users.iter().any(|u| u.id == user_id) {
        tracing::warn!("No user found with this Id: {}", user_id);
        return Err(AppError::NotFound("User not found".to_string()));
    }

    let errors = validate_profile_edit(&payload, &users, user_id);
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    let response = {
        let Some(user) = users.iter_mut().find(|u| u.id == user_id) else {
            return Err(AppError::NotFound("User not found".to_string()));
        };
        user.first_name = payload.first_name.trim().to_string();
        user.last_name = payload.last_name.trim().to_string();
        user.email = payload.email.trim().to_string();
        user.phone = payload.phone.trim().to_string();
        user.address = payload.address.trim().to_string();
        if let Some(password) = payload.password.filter(|p| !p.is_empty()) {
            user.password = password;
        }
        UserResponse::from(&*user)
    };

    store.save_users(&users).await?;

    Ok(Json(response))
}
