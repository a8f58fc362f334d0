use std::sync::Arc;
use backend::{
    auth::SessionVerifier,
    queries::PgStore,
    routes::{build_rocket, AppState},
};
use shuttle_runtime::CustomError;
use sqlx::PgPool;
use tracing::{info, warn};

fn session_verifier(secret_store: &shuttle_runtime::SecretStore) -> Result<SessionVerifier, CustomError> {
    match secret_store.get("SESSION_SECRET") {
        Some(secret) => Ok(SessionVerifier::new(secret)),
        None => {
            warn!("SESSION_SECRET not found - using a random key, sessions will not survive restarts");
            SessionVerifier::ephemeral()
                .map_err(|_| CustomError::msg("Failed to generate session key"))
        }
    }
}

#[shuttle_runtime::main]
async fn rocket(
    #[shuttle_shared_db::Postgres] pool: PgPool,
    #[shuttle_runtime::Secrets] secret_store: shuttle_runtime::SecretStore,
) -> shuttle_rocket::ShuttleRocket {
    info!("🚀 Starting poll server");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .map_err(CustomError::new)?;

    info!("📋 Migrations complete");

    let app_state = AppState::new(Arc::new(PgStore::new(pool)), session_verifier(&secret_store)?);

    Ok(build_rocket(app_state).into())
}
