/// Authentication endpoint
///
/// # Endpoints
///
/// - `POST /api/auth/login` - Authenticate and get a bearer token
///
/// Registration is deliberately absent: accounts are provisioned by
/// admins/managers through the users endpoints (or the first-run seed).

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tasktrack_shared::{
    auth::{jwt, password},
    models::user::{User, UserInfo},
};
use validator::Validate;

/// Login request
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// Email address
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Password
    pub password: String,
}

/// Login response
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    /// Bearer token (24h)
    pub token: String,

    /// The authenticated user, minus the credential
    pub user: UserInfo,
}

/// Login endpoint
///
/// Authenticates a user and returns a signed token carrying the user's
/// identity and role.
///
/// # Endpoint
///
/// ```text
/// POST /api/auth/login
/// Content-Type: application/json
///
/// {
///   "email": "user@example.com",
///   "password": "SecureP@ss123"
/// }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "token": "eyJ...",
///   "user": { "id": "uuid", "name": "...", "email": "...", "role": "member" }
/// }
/// ```
///
/// # Errors
///
/// - `404 Not Found`: No account with that email
/// - `401 Unauthorized`: Wrong password
/// - `422 Unprocessable Entity`: Validation failed
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    req.validate()?;

    // An unknown email is reported distinctly from a wrong password
    let user = User::find_by_email(&state.db, &req.email)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    let valid =
        password::verify_password_async(req.password, user.password_hash.clone()).await?;
    if !valid {
        return Err(ApiError::Unauthorized("Invalid credentials".to_string()));
    }

    let claims = jwt::Claims::new(user.id, user.role, user.name.clone(), user.email.clone());
    let token = jwt::create_token(&claims, state.jwt_secret())?;

    Ok(Json(LoginResponse {
        token,
        user: UserInfo {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
        },
    }))
}
