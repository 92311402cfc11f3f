use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};

use crate::catalog::{Catalog, SatelliteSummary};
use crate::orbit::{locate, GeodeticPosition, OrbitalState};
use crate::track::sample_ground_track;
use crate::web::api::error::{ApiError, ApiResult, ErrorResponse};
use crate::web::api::parse_timestamp;
use crate::web::config::parse_duration;
use crate::web::state::AppState;

#[derive(Debug, Serialize, ToSchema)]
pub struct SatelliteListResponse {
    pub satellites: Vec<SatelliteSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SatellitePositionResponse {
    pub id: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: f64,
    /// Inertial speed, km/s
    pub velocity: f64,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct PositionQuery {
    /// RFC3339 instant, defaults to now
    pub at: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct TrackQuery {
    /// RFC3339 start, defaults to now
    pub start: Option<String>,
    /// Human readable span such as "90m"
    pub span: Option<String>,
    pub points: Option<usize>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct GroundTrackResponse {
    pub id: String,
    pub name: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub points: Vec<GeodeticPosition>,
}

/// Mean elements of one satellite, angles in degrees.
#[derive(Debug, Serialize, ToSchema)]
pub struct SatelliteDetailResponse {
    pub id: String,
    pub name: String,
    pub catalog_number: u64,
    pub epoch: DateTime<Utc>,
    /// Revolutions per day
    pub mean_motion: f64,
    pub eccentricity: f64,
    pub inclination: f64,
    pub right_ascension: f64,
    pub argument_of_perigee: f64,
    pub mean_anomaly: f64,
    pub period_minutes: f64,
}

#[utoipa::path(
    get,
    path = "/api/satellites/list",
    tag = "satellites",
    responses(
        (status = 200, description = "Loaded satellites", body = SatelliteListResponse)
    )
)]
pub async fn list_satellites(State(state): State<AppState>) -> Json<SatelliteListResponse> {
    let catalog = state.catalog.snapshot();
    if catalog.is_empty() {
        return Json(SatelliteListResponse {
            satellites: Vec::new(),
            message: Some("Satellite data not loaded".into()),
        });
    }

    Json(SatelliteListResponse {
        satellites: catalog.summaries(state.config.catalog.list_limit),
        message: None,
    })
}

#[utoipa::path(
    get,
    path = "/api/satellites/{satellite_id}",
    tag = "satellites",
    params(
        ("satellite_id" = String, Path, description = "NORAD catalog number")
    ),
    responses(
        (status = 200, description = "Element set", body = SatelliteDetailResponse),
        (status = 400, description = "Invalid satellite id", body = ErrorResponse),
        (status = 404, description = "Satellite not found", body = ErrorResponse),
        (status = 503, description = "Satellite data not available", body = ErrorResponse)
    )
)]
pub async fn satellite_detail(
    State(state): State<AppState>,
    Path(satellite_id): Path<String>,
) -> ApiResult<Json<SatelliteDetailResponse>> {
    let catalog = state.catalog.snapshot();
    let satellite = find_satellite(&catalog, &satellite_id)?;

    Ok(Json(SatelliteDetailResponse {
        id: satellite.catalog_id().to_string(),
        name: satellite.name().to_string(),
        catalog_number: satellite.catalog_id(),
        epoch: satellite.epoch(),
        mean_motion: satellite.mean_motion(),
        eccentricity: satellite.eccentricity(),
        inclination: satellite.inclination_deg(),
        right_ascension: satellite.right_ascension_deg(),
        argument_of_perigee: satellite.argument_of_perigee_deg(),
        mean_anomaly: satellite.mean_anomaly_deg(),
        period_minutes: satellite.period_minutes(),
    }))
}

#[utoipa::path(
    get,
    path = "/api/satellites/{satellite_id}/position",
    tag = "satellites",
    params(
        ("satellite_id" = String, Path, description = "NORAD catalog number"),
        PositionQuery
    ),
    responses(
        (status = 200, description = "Sub-satellite point", body = SatellitePositionResponse),
        (status = 400, description = "Invalid parameters", body = ErrorResponse),
        (status = 404, description = "Satellite not found", body = ErrorResponse),
        (status = 422, description = "Orbit cannot be propagated", body = ErrorResponse),
        (status = 503, description = "Satellite data not available", body = ErrorResponse)
    )
)]
pub async fn satellite_position(
    State(state): State<AppState>,
    Path(satellite_id): Path<String>,
    Query(query): Query<PositionQuery>,
) -> ApiResult<Json<SatellitePositionResponse>> {
    let at = parse_timestamp("at", query.at.as_deref())?;
    let catalog = state.catalog.snapshot();
    let satellite = find_satellite(&catalog, &satellite_id)?;

    let position = locate(&satellite, at).map_err(|e| {
        log::warn!("Position of {} at {} failed: {}", satellite.name(), at, e);
        ApiError::from(e)
    })?;

    Ok(Json(SatellitePositionResponse {
        id: satellite.catalog_id().to_string(),
        name: satellite.name().to_string(),
        latitude: position.latitude,
        longitude: position.longitude,
        altitude: position.altitude,
        velocity: position.speed,
        timestamp: position.timestamp,
    }))
}

#[utoipa::path(
    get,
    path = "/api/satellites/{satellite_id}/track",
    tag = "satellites",
    params(
        ("satellite_id" = String, Path, description = "NORAD catalog number"),
        TrackQuery
    ),
    responses(
        (status = 200, description = "Ground track", body = GroundTrackResponse),
        (status = 400, description = "Invalid parameters", body = ErrorResponse),
        (status = 404, description = "Satellite not found", body = ErrorResponse),
        (status = 422, description = "Orbit cannot be propagated", body = ErrorResponse),
        (status = 503, description = "Satellite data not available", body = ErrorResponse)
    )
)]
pub async fn satellite_track(
    State(state): State<AppState>,
    Path(satellite_id): Path<String>,
    Query(query): Query<TrackQuery>,
) -> ApiResult<Json<GroundTrackResponse>> {
    let limits = &state.config.track;
    let start = parse_timestamp("start", query.start.as_deref())?;
    let span = match query.span.as_deref() {
        Some(s) => parse_duration(s).map_err(|e| ApiError::Validation(format!("span: {e}")))?,
        None => limits.default_span,
    };
    let points = query.points.unwrap_or(limits.default_points);
    if points > limits.max_points {
        return Err(ApiError::Validation(format!(
            "points: at most {} allowed",
            limits.max_points
        )));
    }

    let catalog = state.catalog.snapshot();
    let satellite = find_satellite(&catalog, &satellite_id)?;

    let track = sample_ground_track(&satellite, start, span, points)?;
    log::debug!(
        "Sampling {} ground track points of {}",
        track.len(),
        satellite.name()
    );
    let points = track.collect_points().map_err(|e| {
        log::warn!("Ground track of {} failed: {}", satellite.name(), e);
        ApiError::from(e)
    })?;

    Ok(Json(GroundTrackResponse {
        id: satellite.catalog_id().to_string(),
        name: satellite.name().to_string(),
        start: track.start(),
        end: track.end(),
        points,
    }))
}

pub(crate) fn find_satellite(catalog: &Catalog, satellite_id: &str) -> ApiResult<Arc<OrbitalState>> {
    if catalog.is_empty() {
        return Err(ApiError::Unavailable("satellite_data_unavailable"));
    }
    let id: u64 = satellite_id
        .trim()
        .parse()
        .map_err(|_| ApiError::Validation(format!("invalid satellite id {satellite_id:?}")))?;
    catalog
        .get(id)
        .cloned()
        .ok_or(ApiError::NotFound("satellite_not_found"))
}
