//! Request handlers for the API endpoints.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use trep_match::{MatchOrchestrator, SearchOptions};

use crate::error::ApiError;
use crate::response::{ListResponse, SearchResponse};
use crate::state::AppState;

/// GET /health
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// GET /stats
pub async fn stats(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let reverse_lookup_records = match &state.db {
        Some(db) => Some(db.list_nb()?),
        None => None,
    };
    Ok(Json(json!({
        "index_documents": state.index.len(),
        "reverse_lookup_records": reverse_lookup_records,
    })))
}

/// Query parameters for `GET /search`.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: String,
    pub top_k: Option<usize>,
}

/// GET /search?q=<free-form text>
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, ApiError> {
    if params.q.trim().is_empty() {
        return Err(ApiError::BadRequest("'q' must not be empty".to_string()));
    }

    let orchestrator = MatchOrchestrator::new(&state.index);
    let options = SearchOptions {
        top_k: params.top_k,
        ..Default::default()
    };
    let outcome = orchestrator.search(&params.q, &options)?;

    Ok(Json(SearchResponse {
        locations: outcome.locations,
        unmatched_words: outcome.unmatched_words,
        total_percent: outcome.total_percent,
    }))
}

/// GET /lookup/iata/:code
pub async fn lookup_iata(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let db = state.db.as_ref().ok_or(ApiError::NotConfigured)?;
    let records = db.by_iata(&code)?;
    respond_or_not_found(records, &format!("no record for IATA code '{code}'"))
}

/// GET /lookup/icao/:code
pub async fn lookup_icao(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let db = state.db.as_ref().ok_or(ApiError::NotConfigured)?;
    let records = db.by_icao(&code)?;
    respond_or_not_found(records, &format!("no record for ICAO code '{code}'"))
}

/// GET /lookup/faa/:code
pub async fn lookup_faa(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let db = state.db.as_ref().ok_or(ApiError::NotConfigured)?;
    let records = db.by_faa(&code)?;
    respond_or_not_found(records, &format!("no record for FAA code '{code}'"))
}

/// GET /lookup/unlocode/:code
pub async fn lookup_unlocode(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let db = state.db.as_ref().ok_or(ApiError::NotConfigured)?;
    let records = db.by_unlocode(&code)?;
    respond_or_not_found(records, &format!("no record for UN/LOCODE '{code}'"))
}

/// GET /lookup/uic/:code
pub async fn lookup_uic(
    State(state): State<AppState>,
    Path(code): Path<i64>,
) -> Result<Json<Value>, ApiError> {
    let db = state.db.as_ref().ok_or(ApiError::NotConfigured)?;
    let records = db.by_uic_code(code)?;
    respond_or_not_found(records, &format!("no record for UIC code '{code}'"))
}

/// GET /lookup/geonameid/:id
pub async fn lookup_geonameid(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<Value>, ApiError> {
    let db = state.db.as_ref().ok_or(ApiError::NotConfigured)?;
    let records = db.by_geoname_id(id)?;
    respond_or_not_found(records, &format!("no record for geonames id '{id}'"))
}

fn respond_or_not_found(
    records: Vec<trep_core::LocationRecord>,
    message: &str,
) -> Result<Json<Value>, ApiError> {
    if records.is_empty() {
        return Err(ApiError::NotFound(message.to_string()));
    }
    let response = ListResponse::new(records);
    Ok(Json(serde_json::to_value(response).map_err(|e| ApiError::Internal(e.to_string()))?))
}
