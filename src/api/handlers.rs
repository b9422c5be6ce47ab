use super::responses::{
    summaries, HealthResponse, ImpactResponse, MapLocation, MapResponse, PoliciesResponse,
    PoliticianSummary, SummariesResponse, VotesResponse,
};
use super::AppState;
use crate::error::{parse_id_list, validate_query, AppError};
use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub name: Option<String>,
    pub zip_code: Option<String>,
    // signed so that negative values clamp instead of failing extraction
    pub limit: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct CompareParams {
    pub ids: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ImpactParams {
    // reserved for constituent-specific impact
    #[allow(dead_code)]
    pub zip_code: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct MapParams {
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub state: Option<String>,
}

fn parse_id(raw: &str) -> Result<u32, AppError> {
    raw.trim()
        .parse()
        .map_err(|_| AppError::InvalidInput(format!("Invalid politician id: {:?}", raw)))
}

pub async fn handle_root() -> Json<Value> {
    Json(json!({
        "message": "Welcome to Civic Lens API - Making Politics Personal",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "health": "/health",
            "search": "/search?name={name}&zip_code={zip}&limit={limit}",
            "all_politicians": "/politicians",
            "politician_profile": "/politicians/{id}",
            "compare": "/compare?ids=1,2,3",
            "votes": "/politicians/{id}/votes",
            "policies": "/politicians/{id}/policies",
            "impact": "/politicians/{id}/impact",
            "map_search": "/map/politicians?state={state}",
            "national_politicians": "/map/national"
        }
    }))
}

pub async fn handle_health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        politicians: state.engine.store().len(),
        cache: state.engine.cache().stats(),
    })
}

pub async fn handle_search(
    State(state): State<AppState>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<SummariesResponse>, AppError> {
    let Query(params) = params?;
    let name = params
        .name
        .ok_or_else(|| AppError::InvalidInput("Query parameter 'name' is required".to_string()))?;
    validate_query(&name)?;

    let zip_code = params.zip_code.as_deref().map(str::trim).filter(|z| !z.is_empty());
    let limit = state.config.clamp_limit(params.limit);

    let results = state.engine.search(&name, zip_code, limit);
    tracing::debug!("Search {:?} returned {} politicians", name, results.len());

    Ok(Json(SummariesResponse {
        politician_summaries: summaries(results),
    }))
}

pub async fn handle_all_politicians(State(state): State<AppState>) -> Json<Vec<PoliticianSummary>> {
    Json(summaries(state.engine.store().all()))
}

pub async fn handle_politician(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
) -> Result<Json<PoliticianSummary>, AppError> {
    let Path(raw) = id?;
    let record = state.engine.store().require(parse_id(&raw)?)?;
    Ok(Json(PoliticianSummary::from(record)))
}

pub async fn handle_votes(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
) -> Result<Json<VotesResponse>, AppError> {
    let Path(raw) = id?;
    let record = state.engine.store().require(parse_id(&raw)?)?;
    Ok(Json(VotesResponse::from(record)))
}

pub async fn handle_policies(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
) -> Result<Json<PoliciesResponse>, AppError> {
    let Path(raw) = id?;
    let record = state.engine.store().require(parse_id(&raw)?)?;
    Ok(Json(PoliciesResponse::from(record)))
}

pub async fn handle_impact(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
    params: Result<Query<ImpactParams>, QueryRejection>,
) -> Result<Json<ImpactResponse>, AppError> {
    let Path(raw) = id?;
    let Query(_params) = params?;
    let record = state.engine.store().require(parse_id(&raw)?)?;
    Ok(Json(ImpactResponse::from(record)))
}

pub async fn handle_compare(
    State(state): State<AppState>,
    params: Result<Query<CompareParams>, QueryRejection>,
) -> Result<Json<SummariesResponse>, AppError> {
    let Query(params) = params?;
    let raw = params
        .ids
        .ok_or_else(|| AppError::InvalidInput("Query parameter 'ids' is required".to_string()))?;
    let ids = parse_id_list(&raw)?;
    let records = state.engine.store().get_many(&ids)?;

    Ok(Json(SummariesResponse {
        politician_summaries: summaries(records),
    }))
}

pub async fn handle_map_politicians(
    State(state): State<AppState>,
    params: Result<Query<MapParams>, QueryRejection>,
) -> Result<Json<MapResponse>, AppError> {
    let Query(params) = params?;
    let records = state
        .engine
        .store()
        .by_location(params.lat, params.lng, params.state.as_deref());
    Ok(Json(MapResponse::build(records, MapLocation::unknown())))
}

pub async fn handle_national(State(state): State<AppState>) -> Json<MapResponse> {
    Json(MapResponse::build(
        state.engine.store().national(),
        MapLocation::national(),
    ))
}
