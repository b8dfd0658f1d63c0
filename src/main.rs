mod app;
mod auth;
mod cart;
mod config;
mod error;
mod products;
mod state;
mod wishlist;

use crate::auth::repo::User;
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "shoply=debug,axum=info,tower_http=info".to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    let state = AppState::init().await?;

    if let Err(e) = sqlx::migrate!("./migrations").run(&state.db).await {
        tracing::warn!(error = %e, "migrations folder not found or migration failed; continuing");
    }

    // Explicit admin provisioning; registration never grants the flag.
    if let Some(email) = state.config.admin_email.clone() {
        match User::promote_admin(&state.db, &email).await {
            Ok(true) => tracing::info!(%email, "admin user provisioned"),
            Ok(false) => tracing::warn!(%email, "ADMIN_EMAIL set but no such user yet"),
            Err(e) => tracing::error!(error = %e, "admin provisioning failed"),
        }
    }

    let app = app::build_app(state);
    app::serve(app).await
}
