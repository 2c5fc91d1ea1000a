//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors; request errors are rendered by the
//! auth and recruitment crates.

mod config;

use std::sync::Arc;

use auth::PgAuthRepository;
use auth::application::SignUpUseCase;
use auth::presentation::views::home_page;
use axum::Router;
use axum::routing::get;
use platform::mail::Mailer;
use platform::media::UploadStore;
use recruitment::{PgRecruitmentRepository, RecruitmentState, recruitment_router, registration_router};
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "api=info,auth=info,recruitment=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env()?;

    // Database connection
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await?;

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    let auth_config = Arc::new(config.auth);
    let accounts = Arc::new(PgAuthRepository::new(pool.clone()));
    let store = Arc::new(PgRecruitmentRepository::new(pool.clone()));

    if let Some(admin) = &config.admin {
        let created = SignUpUseCase::new(accounts.clone(), auth_config.clone())
            .ensure_admin(&admin.email, &admin.password)
            .await?;
        tracing::info!(created, email = %admin.email, "Administrator bootstrap checked");
    }

    let mailer = Mailer::new(config.mail)?;

    tokio::fs::create_dir_all(&config.uploads.root).await?;
    let upload_root = config.uploads.root.clone();
    let upload_prefix = config.uploads.public_prefix.clone();
    let uploads = UploadStore::new(config.uploads);

    let state = RecruitmentState::new(store, auth_config.clone(), mailer.clone(), uploads);

    // Build router
    let app = Router::new()
        .route("/", get(|| async { home_page() }))
        .nest(
            "/auth",
            auth::auth_router(accounts, auth_config, mailer).merge(registration_router(state.clone())),
        )
        .merge(recruitment_router(state))
        .nest_service(&upload_prefix, ServeDir::new(upload_root))
        .layer(TraceLayer::new_for_http());

    // Start server
    tracing::info!("Listening on {}", config.bind_addr);

    let listener = TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
