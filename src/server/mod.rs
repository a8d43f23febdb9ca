//! HTTP JSON API over [`BudgetActions`].

mod routes;

use std::{io, sync::Arc};

use axum::{
    routing::{get, post, put},
    Router,
};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::BudgetActions;

/// Shared state for every handler.
pub struct AppState {
    pub actions: BudgetActions,
    /// Cancelled on shutdown. Insight requests run on child tokens.
    pub shutdown: CancellationToken,
}

impl AppState {
    pub fn new(actions: BudgetActions) -> Self {
        Self {
            actions,
            shutdown: CancellationToken::new(),
        }
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/health", get(routes::health))
        .route("/api/categories", get(routes::categories))
        .route(
            "/api/transactions",
            get(routes::list_transactions).post(routes::add_transaction),
        )
        .route(
            "/api/transactions/:id",
            put(routes::edit_transaction).delete(routes::delete_transaction),
        )
        .route(
            "/api/budget-goals",
            get(routes::list_budget_goals).post(routes::set_budget_goal),
        )
        .route("/api/budgets/progress", get(routes::budget_progress))
        .route("/api/dashboard", get(routes::dashboard))
        .route("/api/reports", get(routes::report))
        .route("/api/insights", post(routes::insights))
        .route("/api/insights/current", post(routes::current_insights))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serves until `state.shutdown` is cancelled.
pub async fn serve(listener: TcpListener, state: Arc<AppState>) -> io::Result<()> {
    let shutdown = state.shutdown.clone();
    if let Ok(addr) = listener.local_addr() {
        tracing::info!("Server listening on {}", addr);
    }
    axum::serve(listener, router(state))
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await
}

/// Binds `addr` and serves until Ctrl-C or SIGTERM.
pub async fn run(addr: &str, actions: BudgetActions) -> io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    let state = Arc::new(AppState::new(actions));

    let token = state.shutdown.clone();
    tokio::spawn(async move {
        shutdown_signal().await;
        tracing::info!("Shutdown signal received, cancelling in-flight requests");
        token.cancel();
    });

    serve(listener, state).await
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!("Failed to install SIGTERM handler: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
