use axum::Router;
use configs::{AppConfig, ServerConfig};
use migration::MigratorTrait;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::routes;
use crate::state::ServerState;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Connect to the database, apply migrations when configured, then serve the
/// route table on `server.host:server.port` until the listener fails.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let db = models::db::connect_with_config(&cfg.database).await?;
    if cfg.database.run_migrations {
        migration::Migrator::up(&db, None).await?;
        info!(event = "migrations_applied", "database schema up to date");
    }

    let listener = bind(&cfg.server).await?;
    info!(addr = %listener.local_addr()?, "starting fleet server");
    serve(listener, ServerState::with_database(db)).await
}

/// Bind `host:port`, resolving host names such as `localhost`.
pub async fn bind(server: &ServerConfig) -> anyhow::Result<TcpListener> {
    Ok(TcpListener::bind(server.bind_addr()).await?)
}

/// Serve the application on an already bound listener.
pub async fn serve(listener: TcpListener, state: ServerState) -> anyhow::Result<()> {
    let app: Router = routes::build_router(state, build_cors());
    axum::serve(listener, app).await?;
    Ok(())
}
