/*
 * Responsibility
 * - tracing / panic hook 初期化
 * - Config読み込み → Database 接続 + migrate → 依存生成 → Router 組み立て
 * - axum::serve() で起動、Ctrl-C で graceful shutdown → pool を閉じる
 */
use std::{panic, process, sync::Arc};

use anyhow::{Context, Result};
use axum::{Router, routing::get};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::api;
use crate::api::v1::handlers::health::{health, ready};
use crate::config::{Config, HttpConfig};
use crate::db::Database;
use crate::middleware;
use crate::repos::user_repo::UserRepo;
use crate::services::auth::{build_auth_service, build_token_issuer};
use crate::state::AppState;

fn init_tracing() {
    // Prefer RUST_LOG if set; otherwise use a sensible default.
    // Ex:
    // RUST_LOG=info,bookmark_api=debug,tower_http=debug cargo run
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook(abort_on_panic: bool) {
    // Keep the default hook as a fallback (prints to stderr with location/payload).
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        tracing::error!(?info, "panic");

        // Development: crash the whole process so we notice immediately.
        // Production: default behavior, the server keeps running.
        if abort_on_panic {
            process::abort();
        } else {
            default_hook(info);
        }
    }))
}

pub async fn run() -> Result<()> {
    init_tracing();

    let config = Config::from_env().map_err(|err| {
        tracing::error!(error = %err, "invalid configuration");
        err
    })?;

    init_panic_hook(!config.app_env.is_production());

    tracing::info!(
        "starting API in {:?} mode on {}",
        config.app_env,
        config.addr
    );

    // The store must be reachable before we accept a single request.
    let db = Database::new(&config.database, config.app_env)
        .context("failed to create database handle")?;
    db.connect().await.context("failed to connect to database")?;
    db.migrate().await.context("failed to run migrations")?;

    let state = build_state(&config, db.clone());
    let app = build_router(state, &config.http);

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("failed to bind {}", config.addr))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.close().await;
    tracing::info!("shutdown complete");
    Ok(())
}

fn build_state(config: &Config, db: Database) -> AppState {
    // Build process-level services here and inject them into the shared application state.
    let directory = Arc::new(UserRepo::new(db.pool().clone()));
    let auth = build_auth_service(config, directory);
    let tokens = build_token_issuer(config);

    AppState::new(db, auth, tokens)
}

fn build_router(state: AppState, http: &HttpConfig) -> Router {
    let router = Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(ready))
        .nest("/api/v1", api::v1::routes(state.clone()))
        .with_state(state);

    middleware::http::apply(router, http)
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        return;
    }
    tracing::info!("received Ctrl+C, shutting down");
}
