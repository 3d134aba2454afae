use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::str::FromStr;

use medq_core::{CategoryId, CounterId, PatientId, Priority, TokenId, TokenStatus};

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse<'a> {
    status: &'a str,
}

pub async fn root() -> impl IntoResponse {
    let body = json!({
        "service": "MedQ Server",
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    });
    (StatusCode::OK, Json(body))
}

pub async fn healthz() -> impl IntoResponse {
    (StatusCode::OK, Json(HealthResponse { status: "ok" }))
}

pub async fn readyz() -> impl IntoResponse {
    (StatusCode::OK, Json(HealthResponse { status: "ready" }))
}

// ---- Queue operations ----

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTokenRequest {
    pub patient_id: String,
    pub category_id: String,
    #[serde(default)]
    pub priority: Option<Priority>,
}

pub async fn create_token(
    State(state): State<AppState>,
    Json(payload): Json<CreateTokenRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let patient_id = parse_id::<PatientId>(&payload.patient_id, "patientId")?;
    let category_id = parse_id::<CategoryId>(&payload.category_id, "categoryId")?;
    let token = state
        .service
        .route_arrival(patient_id, category_id, payload.priority)
        .await?;
    Ok((StatusCode::CREATED, Json(token)))
}

pub async fn get_token(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let token_id = parse_id::<TokenId>(&id, "token id")?;
    let token = state.service.token(token_id).await?;
    Ok(Json(token))
}

#[derive(Debug, Deserialize)]
pub struct TransitionRequest {
    pub status: TokenStatus,
}

pub async fn transition_token(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<TransitionRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let token_id = parse_id::<TokenId>(&id, "token id")?;
    let token = state.service.transition(token_id, payload.status).await?;
    Ok(Json(token))
}

pub async fn call_next(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let counter_id = parse_id::<CounterId>(&id, "counter id")?;
    let token = state.service.call_next(counter_id).await?;
    Ok(Json(token))
}

pub async fn counter_queue(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let counter_id = parse_id::<CounterId>(&id, "counter id")?;
    let queue = state.service.counter_waiting_list(counter_id).await?;
    Ok(Json(queue))
}

pub async fn daily_stats(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let stats = state.service.daily_stats().await?;
    Ok(Json(stats))
}

fn parse_id<T: FromStr>(raw: &str, what: &str) -> Result<T, ApiError> {
    raw.parse::<T>()
        .map_err(|_| ApiError::bad_request(format!("{what} is not a valid id: {raw}")))
}
