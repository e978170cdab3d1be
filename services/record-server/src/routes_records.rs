use axum::{extract::State, http::{header, StatusCode}, response::IntoResponse, Json};
use recordstore::{append_record, Record, RecordStore, StoreError};
use tracing::{error, info};

use crate::state::SharedState;
use crate::store_exec::with_store_blocking;
use crate::types::{ApiMessage, MSG_UPDATED};

type ApiError = (StatusCode, Json<ApiMessage>);

fn store_error(e: &StoreError) -> ApiError {
    (StatusCode::INTERNAL_SERVER_ERROR, Json(ApiMessage::new(e.public_message())))
}

/// Current contents of the backing file, so a refresh sees appended rows.
pub async fn get_csv(State(state): State<SharedState>) -> Result<impl IntoResponse, ApiError> {
    let text = with_store_blocking(state.store.clone(), StoreError::Read, |store| {
        store.read_text().map_err(|e| StoreError::Read(e.to_string()))
    })
    .await
    .map_err(|e| {
        error!("serving csv failed: {e}");
        store_error(&e)
    })?;

    Ok(([(header::CONTENT_TYPE, "text/csv; charset=utf-8")], text))
}

pub async fn post_update_csv(
    State(state): State<SharedState>,
    Json(body): Json<serde_json::Map<String, serde_json::Value>>,
) -> Result<Json<ApiMessage>, ApiError> {
    let record = Record::from_json(body);

    let rows = with_store_blocking(state.store.clone(), StoreError::Write, move |store| {
        append_record(store, &record)
    })
    .await
    .map_err(|e| store_error(&e))?;

    info!(rows, "csv updated");
    Ok(Json(ApiMessage::new(MSG_UPDATED)))
}

pub async fn get_health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
