//! HTTP front of the CSV record store: serves the dataset and appends records.

pub mod config;
pub mod routes_records;
pub mod state;
pub mod store_exec;
pub mod types;

use axum::{routing::{get, post}, Router};
use tower_http::cors::CorsLayer;

pub use state::{AppState, SharedState};

pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/diabetes.csv", get(routes_records::get_csv))
        .route("/update-csv", post(routes_records::post_update_csv))
        .route("/health", get(routes_records::get_health))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
