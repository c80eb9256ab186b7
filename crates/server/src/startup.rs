use std::{env, net::SocketAddr, path::Path};

use axum::Router;
use common::utils::logging::init_logging;
use configs::{AppConfig, LogFormat};
use dotenvy::dotenv;
use migration::MigratorTrait;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::routes::{self, auth};
use service::auth::token::TokenConfig;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// `$CONFIG_PATH` (default `config.toml`) when present, otherwise env vars only.
fn load_config() -> anyhow::Result<(AppConfig, bool)> {
    let path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    if Path::new(&path).exists() {
        let mut cfg = configs::load_from_file(&path)?;
        cfg.normalize_and_validate()?;
        return Ok((cfg, true));
    }
    Ok((AppConfig::from_env()?, false))
}

/// Public entry: build the app and run the HTTP server until Ctrl-C
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    let loaded = load_config();
    init_logging(loaded.as_ref().map(|(c, _)| c.log.format).unwrap_or(LogFormat::Compact));
    let (cfg, from_file) = loaded?;
    if !from_file {
        warn!("no config file found, using environment variables");
    }
    if cfg.auth.uses_dev_secret() {
        warn!("auth.jwt_secret and JWT_SECRET are unset; signing tokens with the development secret");
    }

    // DB connection
    let db_cfg = models::db::DatabaseConfig::from(&cfg.database);
    let db = models::db::connect_with_config(&db_cfg).await?;
    if cfg.database.auto_migrate {
        migration::Migrator::up(&db, None).await?;
        info!("migrations applied");
    }

    let state = auth::ServerState { db, auth: TokenConfig::from(&cfg.auth) };
    let app: Router = routes::build_router(state, build_cors(), cfg.server.max_upload_bytes);

    // Bind and serve
    let addr: SocketAddr = format!("{}:{}", cfg.server.host, cfg.server.port).parse()?;
    info!(%addr, "starting marketplace server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(err = %e, "failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
    info!("received Ctrl-C, shutting down");
}
