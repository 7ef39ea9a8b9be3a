use std::{env, future::Future, net::SocketAddr, path::Path};

use axum::Router;
use common::utils::logging::init_logging_default;
use configs::{AppConfig, DatabaseConfig, ServerConfig};
use dotenvy::dotenv;
use migration::MigratorTrait;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::errors::StartupError;
use crate::routes;
use crate::state::ServerState;

/// Initialize logging via shared common utils; a no-op if the binary already did
fn init_logging() {
    init_logging_default();
}

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Config from the TOML file when present, else from `SERVER_HOST`,
/// `SERVER_PORT` and `DATABASE_URL`.
fn load_config() -> Result<AppConfig, StartupError> {
    let path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    if Path::new(&path).exists() {
        let mut cfg = configs::load_from_file(&path).map_err(|e| StartupError::InvalidConfig(format!("{}: {}", path, e)))?;
        cfg.normalize_and_validate().map_err(|e| StartupError::InvalidConfig(e.to_string()))?;
        return Ok(cfg);
    }
    let host = env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port = env::var("SERVER_PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(8081);
    Ok(AppConfig {
        server: ServerConfig { host, port, worker_threads: None },
        database: DatabaseConfig::from_env(),
    })
}

fn bind_addr(server: &ServerConfig) -> Result<SocketAddr, StartupError> {
    format!("{}:{}", server.host, server.port)
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("bind address {}:{}: {}", server.host, server.port, e)))
}

/// Public entry: build the app and serve until the process is killed
pub async fn run() -> anyhow::Result<()> {
    run_with_shutdown(std::future::pending()).await
}

/// Build the app and serve until `shutdown` resolves, then drain in-flight requests.
pub async fn run_with_shutdown<F>(shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    dotenv().ok();
    init_logging();

    let cfg = load_config()?;
    let addr = bind_addr(&cfg.server)?;

    let db = models::db::connect_with_config(&cfg.database).await?;
    if cfg.database.run_migrations {
        migration::Migrator::up(&db, None).await?;
        info!("database migrations applied");
    }

    let state = ServerState::new(db);
    let app: Router = routes::build_router(state, build_cors());

    info!(%addr, "starting booking server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).with_graceful_shutdown(shutdown).await?;
    info!("server drained");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bind_addr_rejects_garbage_host() {
        let s = ServerConfig { host: "not a host".into(), port: 8081, worker_threads: None };
        assert!(matches!(bind_addr(&s), Err(StartupError::InvalidConfig(_))));
        let ok = ServerConfig { host: "0.0.0.0".into(), port: 9000, worker_threads: None };
        assert_eq!(bind_addr(&ok).unwrap().port(), 9000);
    }
}
