//! Wire DTOs for the `users/*` endpoints
//!
//! Field names follow the API's camelCase JSON.

use serde::{Deserialize, Serialize};

/// `POST users/login` request
#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// `POST users/login` response
#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    pub token: IssuedTokens,
}

/// Token bundle issued at login
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssuedTokens {
    pub access_token: String,
    pub refresh_token: String,
    pub user_id: String,
}

/// `POST users` request
#[derive(Debug, Serialize)]
pub struct SignUpRequest<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password: &'a str,
}

/// `POST users/forgot-password` request
#[derive(Debug, Serialize)]
pub struct ForgotPasswordRequest<'a> {
    pub email: &'a str,
}

/// `POST users/reset-password` request
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest<'a> {
    pub email: &'a str,
    pub token: &'a str,
    pub new_password: &'a str,
}

/// `POST users/refresh-token` request
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest<'a> {
    pub refresh_token: &'a str,
}

/// `POST users/refresh-token` response
///
/// The refresh token is only rotated when the server sends a new one.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
}
