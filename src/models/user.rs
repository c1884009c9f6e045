// src/models/user.rs

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Account role. Owners additionally carry a moderation status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Client,
    Owner,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Client => "client",
            Role::Owner => "owner",
            Role::Admin => "admin",
        }
    }
}

/// Owner moderation status. New owners start as "not validated" and cannot
/// log in to their dashboard until an admin validates the account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OwnerStatus {
    #[serde(rename = "validated")]
    Validated,
    #[serde(rename = "not validated")]
    NotValidated,
}

/// A stored user record.
///
/// Serialized in full (password included) because serde is also the
/// persistence format of the collection store; API responses go through
/// [`UserResponse`] instead. Passwords are stored in plaintext by design,
/// credential hardening is out of scope for this application.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub phone: String,
    pub address: String,
    pub role: Role,
    /// Only meaningful for owners; absent for clients and admins.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<OwnerStatus>,
}

impl User {
    pub fn is_validated_owner(&self) -> bool {
        self.role == Role::Owner && self.status == Some(OwnerStatus::Validated)
    }
}

/// Public view of a user, without the password.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<OwnerStatus>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        UserResponse {
            id: user.id,
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone(),
            phone: user.phone.clone(),
            address: user.address.clone(),
            role: user.role,
            status: user.status,
        }
    }
}

/// DTO for client/owner signup. The role comes from the endpoint, not the
/// payload.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub phone: String,
    pub address: String,
}

/// DTO for user login.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Please enter your email"))]
    pub email: String,
    #[validate(length(min = 1, message = "Please enter your password"))]
    pub password: String,
}

/// DTO for editing the connected user's profile. Every field is re-validated;
/// the password only changes when one is provided.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub confirm_password: Option<String>,
}
