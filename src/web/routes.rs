//! Axum router and handlers for the dashboard server.
//!
//! Store access goes through one shared `SqliteConnection` behind a mutex;
//! Diesel queries are blocking, so they run on the blocking thread pool.
//! Beyond that mutex the application adds no coordination: concurrent access
//! with the collector relies on SQLite's own locking.

use crate::services::dashboard;
use crate::web::views::{self, DashboardView};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Html;
use axum::routing::get;
use axum::Router;
use diesel::{QueryResult, SqliteConnection};
use log::{error, info};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub struct AppState {
    conn: Arc<Mutex<SqliteConnection>>,
}

impl AppState {
    pub fn new(conn: SqliteConnection) -> Self {
        AppState {
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    /// Run a blocking store query off the async runtime.
    async fn with_conn<T, F>(&self, query: F) -> Result<T, String>
    where
        F: FnOnce(&mut SqliteConnection) -> QueryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let mut guard = conn.lock().map_err(|_| "store connection poisoned".to_string())?;
            query(&mut guard).map_err(|e| e.to_string())
        })
        .await
        .map_err(|e| format!("store query task failed: {}", e))?
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .with_state(state)
}

pub async fn serve(addr: SocketAddr, state: AppState) -> Result<(), String> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| format!("binding {} failed: {}", addr, e))?;
    info!("Dashboard listening on http://{}", addr);
    axum::serve(listener, router(state))
        .await
        .map_err(|e| format!("server error: {}", e))
}

async fn index(State(state): State<AppState>) -> Result<Html<String>, (StatusCode, String)> {
    match state.with_conn(dashboard::load).await {
        Ok(data) => Ok(Html(DashboardView::from_data(&data).render())),
        Err(e) => {
            error!("index queries failed: {}", e);
            Err((StatusCode::INTERNAL_SERVER_ERROR, e))
        }
    }
}

async fn health(State(state): State<AppState>) -> (StatusCode, Html<String>) {
    match state.with_conn(dashboard::ping).await {
        Ok(()) => (StatusCode::OK, Html(views::render_health_ok())),
        Err(e) => {
            error!("health probe failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, Html(views::render_health_error(&e)))
        }
    }
}
