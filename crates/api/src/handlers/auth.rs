//! Handlers for the `/auth` resource (login, current admin).

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use watchstore_core::error::CoreError;
use watchstore_core::types::DbId;
use watchstore_db::models::admin::Admin;
use watchstore_db::repositories::AdminRepo;

use crate::auth::jwt::generate_token;
use crate::auth::password::verify_password;
use crate::error::{AppError, AppJson, AppResult};
use crate::middleware::auth::AuthAdmin;
use crate::state::AppState;

/// Returned for every credential mismatch, whether or not the account exists.
const INVALID_CREDENTIALS: &str = "Invalid email or password";

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Successful login response.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub admin: AdminInfo,
}

/// Response of `GET /auth/me`.
#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub admin: AdminInfo,
}

/// Public admin info; never includes the password hash.
#[derive(Debug, Serialize)]
pub struct AdminInfo {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub role: String,
}

impl From<Admin> for AdminInfo {
    fn from(admin: Admin) -> Self {
        Self {
            id: admin.id,
            name: admin.name,
            email: admin.email,
            role: admin.role,
        }
    }
}

fn invalid_credentials() -> AppError {
    AppError::Core(CoreError::Unauthorized(INVALID_CREDENTIALS.into()))
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/auth/login
///
/// Exchange email + password for a bearer token.
pub async fn login(
    State(state): State<AppState>,
    AppJson(input): AppJson<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let (Some(email), Some(password)) = (
        input.email.as_deref().map(str::trim).filter(|e| !e.is_empty()),
        input.password.as_deref().filter(|p| !p.is_empty()),
    ) else {
        return Err(AppError::Core(CoreError::Validation(
            "email and password are required".into(),
        )));
    };

    let Some(admin) = AdminRepo::find_by_email(&state.pool, email).await? else {
        tracing::warn!("Login attempt for unknown email");
        return Err(invalid_credentials());
    };

    let password_valid = verify_password(password, &admin.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        tracing::warn!(admin_id = admin.id, "Login attempt with wrong password");
        return Err(invalid_credentials());
    }

    let token = generate_token(admin.id, &admin.email, &admin.role, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    tracing::info!(admin_id = admin.id, "Admin logged in");
    Ok(Json(LoginResponse {
        token,
        admin: admin.into(),
    }))
}

/// GET /api/auth/me
///
/// Re-reads the admin row so a token for a deleted account stops working.
pub async fn me(admin: AuthAdmin, State(state): State<AppState>) -> AppResult<Json<MeResponse>> {
    let row = AdminRepo::find_by_id(&state.pool, admin.admin_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("Admin no longer exists".into())))?;
    Ok(Json(MeResponse { admin: row.into() }))
}
