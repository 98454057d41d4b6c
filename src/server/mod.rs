//! HTTP API over the task store.
//!
//! | Method & path                   | Handler                      |
//! |---------------------------------|------------------------------|
//! | `GET /api/tasks`                | [`handlers::list_tasks`]     |
//! | `POST /api/tasks`               | [`handlers::create_task`]    |
//! | `PUT /api/tasks/:id`            | [`handlers::update_task`]    |
//! | `PATCH /api/tasks/:id/complete` | [`handlers::toggle_task`]    |
//! | `DELETE /api/tasks/:id`         | [`handlers::delete_task`]    |
//!
//! The store is a single SQLite connection behind a mutex, so requests are
//! serialized at the store.

pub mod error;
pub mod handlers;
pub mod middleware;

use crate::db::tasks::Tasks;
use crate::libs::app_info;
use crate::libs::config::ServerConfig;
use crate::libs::messages::Message;
use anyhow::{Context, Result};
use axum::routing::{get, patch, put};
use axum::Router;
use parking_lot::Mutex;
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;

/// State shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub tasks: Arc<Mutex<Tasks>>,
}

impl AppState {
    pub fn new(tasks: Tasks) -> Self {
        AppState {
            tasks: Arc::new(Mutex::new(tasks)),
        }
    }

    /// Closes the store once every other handle to it has been dropped.
    pub fn close(self) -> Result<()> {
        match Arc::try_unwrap(self.tasks) {
            Ok(tasks) => tasks.into_inner().close(),
            Err(_) => {
                // Connections still draining hold a handle; the connection
                // closes when the last one drops.
                tracing::warn!("{}", Message::StoreCloseFailed("store still in use".to_string()));
                Ok(())
            }
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/tasks", get(handlers::list_tasks).post(handlers::create_task))
        .route("/api/tasks/:id", put(handlers::update_task).delete(handlers::delete_task))
        .route("/api/tasks/:id/complete", patch(handlers::toggle_task))
        .fallback(handlers::not_found)
        .layer(axum::middleware::from_fn(middleware::cors))
        .layer(axum::middleware::from_fn(middleware::access_log))
        .with_state(state)
}

/// Opens the store described by `config`, binds the listener and serves
/// until SIGINT or SIGTERM.
pub async fn serve(config: &ServerConfig) -> Result<()> {
    let location = config.database_location()?;
    let tasks = Tasks::open(&location, config.seed)?;
    tracing::info!("{}", Message::StoreOpened(location));

    let listener = TcpListener::bind(&config.bind)
        .await
        .with_context(|| Message::InvalidBindAddress(config.bind.clone()))?;

    run(listener, AppState::new(tasks), wait_for_shutdown_signal()).await
}

/// Serves on an already bound listener until `shutdown` resolves, then
/// closes the store.
pub async fn run<F>(listener: TcpListener, state: AppState, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = listener.local_addr()?;
    tracing::info!(version = app_info::version(), "{}", Message::ServerListening(addr.to_string()));

    axum::serve(listener, router(state.clone()))
        .with_graceful_shutdown(async move {
            shutdown.await;
            tracing::info!("{}", Message::ServerShuttingDown);
        })
        .await?;

    state.close()?;
    tracing::info!("{}", Message::ServerStopped);

    Ok(())
}

async fn wait_for_shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        let (mut sigterm, mut sigint) = match (signal(SignalKind::terminate()), signal(SignalKind::interrupt())) {
            (Ok(sigterm), Ok(sigint)) => (sigterm, sigint),
            (Err(e), _) | (_, Err(e)) => {
                tracing::error!("{}", Message::ServerSignalFailed(e.to_string()));
                let _ = tokio::signal::ctrl_c().await;
                return;
            }
        };

        tokio::select! {
            _ = sigterm.recv() => {}
            _ = sigint.recv() => {}
        }
    }
    #[cfg(not(unix))]
    {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("{}", Message::ServerSignalFailed(e.to_string()));
        }
    }
}
