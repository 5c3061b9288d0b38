//! Server lifecycle: build the router, bind, serve in the background, shut down gracefully.

use crate::config::ServerConfig;
use crate::error::StartupError;
use crate::routes::{api_routes, common_routes};
use crate::state::AppState;
use crate::store;
use axum::{extract::DefaultBodyLimit, Router};
use sqlx::SqlitePool;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

/// Full application router: common routes at the root, project API under `/api`.
pub fn app(state: AppState, body_limit: usize) -> Router {
    Router::new()
        .merge(common_routes(state.clone()))
        .nest("/api", api_routes(state))
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

pub struct Server;

impl Server {
    /// Connect to the database, ensure the schema, then start serving.
    pub async fn start(config: &ServerConfig) -> Result<RunningServer, StartupError> {
        let pool = store::connect(&config.database).await?;
        store::ensure_schema(&pool).await?;
        Self::start_with_pool(config, pool).await
    }

    /// Start serving on an already prepared pool.
    pub async fn start_with_pool(
        config: &ServerConfig,
        pool: SqlitePool,
    ) -> Result<RunningServer, StartupError> {
        let app = app(AppState::new(pool.clone()), config.body_limit);
        let listener = TcpListener::bind(config.bind_addr()).await?;
        let addr = listener.local_addr()?;
        let (shutdown, signal) = oneshot::channel::<()>();
        let handle = tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    let _ = signal.await;
                })
                .await
        });
        tracing::info!("listening on {}", addr);
        Ok(RunningServer {
            addr,
            pool,
            shutdown,
            handle,
        })
    }
}

/// Handle to a server started with [`Server::start`]. Dropping it also triggers
/// shutdown, but nothing waits for in-flight requests or closes the pool.
pub struct RunningServer {
    addr: SocketAddr,
    pool: SqlitePool,
    shutdown: oneshot::Sender<()>,
    handle: JoinHandle<std::io::Result<()>>,
}

impl RunningServer {
    pub fn local_addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Stop accepting connections, let in-flight requests finish, then close the pool.
    pub async fn shutdown(self) -> Result<(), StartupError> {
        let _ = self.shutdown.send(());
        self.handle.await??;
        self.pool.close().await;
        tracing::info!(addr = %self.addr, "server stopped");
        Ok(())
    }
}
