//! Startup data: the bootstrap admin account and optional demo data.

use chrono::Utc;
use watchstore_db::models::admin::CreateAdmin;
use watchstore_db::repositories::AdminRepo;
use watchstore_db::DbPool;

use crate::auth::password::hash_password;
use crate::config::{AdminBootstrap, ServerConfig};
use crate::error::{AppError, AppResult};

/// Create the configured admin unless an account with that email exists.
///
/// Returns `true` if a row was inserted.
pub async fn ensure_admin(pool: &DbPool, admin: &AdminBootstrap) -> AppResult<bool> {
    if AdminRepo::find_by_email(pool, &admin.email).await?.is_some() {
        tracing::debug!("Bootstrap admin already exists");
        return Ok(false);
    }

    let password_hash = hash_password(&admin.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;
    let created = AdminRepo::create(
        pool,
        &CreateAdmin {
            name: admin.name.clone(),
            email: admin.email.clone(),
            password_hash,
            role: None,
        },
    )
    .await?;

    tracing::info!(admin_id = created.id, "Bootstrap admin created");
    Ok(true)
}

/// Run every startup step the configuration asks for.
pub async fn run(pool: &DbPool, config: &ServerConfig) -> AppResult<()> {
    if let Some(admin) = &config.admin_bootstrap {
        ensure_admin(pool, admin).await?;
    } else if AdminRepo::count(pool).await? == 0 {
        tracing::warn!("No admin accounts exist and ADMIN_EMAIL/ADMIN_PASSWORD are not set");
    }

    if config.seed_demo_data {
        watchstore_db::seed::seed_demo_data(pool, Utc::now()).await?;
    }
    Ok(())
}
