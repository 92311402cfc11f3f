use axum::{extract::State, Json};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::track::{find_passes, ObserverLocation, Pass};
use crate::web::api::error::{ApiError, ApiResult, ErrorResponse};
use crate::web::api::parse_timestamp;
use crate::web::config::parse_duration;
use crate::web::state::AppState;

#[derive(Debug, Deserialize, ToSchema)]
pub struct PassRequest {
    pub satellite_name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub days: Option<u32>,
    /// RFC3339 start of the search, defaults to now
    pub start: Option<String>,
    /// Sampling step such as "2h" or "30s"
    pub step: Option<String>,
    pub min_elevation: Option<f64>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PassResponse {
    pub satellite: String,
    pub catalog_number: u64,
    pub observer: ObserverLocation,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub passes: Vec<Pass>,
}

#[utoipa::path(
    post,
    path = "/api/satellites/passes",
    tag = "satellites",
    request_body = PassRequest,
    responses(
        (status = 200, description = "Visibility passes", body = PassResponse),
        (status = 400, description = "Invalid parameters", body = ErrorResponse),
        (status = 404, description = "Satellite not found", body = ErrorResponse),
        (status = 422, description = "Orbit cannot be propagated", body = ErrorResponse),
        (status = 503, description = "Satellite data not available", body = ErrorResponse),
        (status = 500, description = "Pass search failed", body = ErrorResponse)
    )
)]
pub async fn satellite_passes(
    State(state): State<AppState>,
    Json(request): Json<PassRequest>,
) -> ApiResult<Json<PassResponse>> {
    let defaults = &state.config.passes;

    let observer = ObserverLocation::new(request.latitude, request.longitude)?;
    let start = parse_timestamp("start", request.start.as_deref())?;
    let days = request.days.unwrap_or(defaults.default_days);
    if days == 0 || days > defaults.max_days {
        return Err(ApiError::Validation(format!(
            "days: must be between 1 and {}",
            defaults.max_days
        )));
    }
    let step = match request.step.as_deref() {
        Some(s) => parse_duration(s).map_err(|e| ApiError::Validation(format!("step: {e}")))?,
        None => defaults.default_step,
    };
    let min_elevation = request
        .min_elevation
        .unwrap_or(defaults.default_min_elevation);
    let horizon = Duration::days(days as i64);
    check_sample_budget(horizon, step, defaults.max_samples)?;

    let catalog = state.catalog.snapshot();
    if catalog.is_empty() {
        return Err(ApiError::Unavailable("satellite_data_unavailable"));
    }
    let satellite = catalog
        .find_by_name(&request.satellite_name)
        .cloned()
        .ok_or(ApiError::NotFound("satellite_not_found"))?;

    let search = satellite.clone();
    let passes = tokio::task::spawn_blocking(move || {
        find_passes(&search, &observer, start, horizon, step, min_elevation)
    })
    .await
    .map_err(|e| ApiError::Internal(format!("pass search task failed: {e}")))?
    .map_err(|e| {
        log::warn!("Pass search for {} failed: {}", satellite.name(), e);
        ApiError::from(e)
    })?;

    Ok(Json(PassResponse {
        satellite: satellite.name().to_string(),
        catalog_number: satellite.catalog_id(),
        observer,
        start,
        end: start + horizon,
        passes,
    }))
}

/// Non-positive steps are left for `find_passes` to reject.
fn check_sample_budget(horizon: Duration, step: Duration, max_samples: u64) -> ApiResult<()> {
    let (Some(horizon_ns), Some(step_ns)) = (horizon.num_nanoseconds(), step.num_nanoseconds())
    else {
        return Ok(());
    };
    if step_ns <= 0 {
        return Ok(());
    }
    let samples = (horizon_ns / step_ns) as u64 + 1;
    if samples > max_samples {
        return Err(ApiError::Validation(format!(
            "step: {step} over {horizon} needs {samples} samples, limit is {max_samples}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::web::api::test_support::*;
    use axum::http::StatusCode;

    fn request(name: &str) -> PassRequest {
        PassRequest {
            satellite_name: name.into(),
            latitude: 40.7128,
            longitude: -74.0060,
            days: Some(3),
            start: Some(iss_epoch()),
            step: None,
            min_elevation: None,
        }
    }

    #[tokio::test]
    async fn finds_passes_by_name() {
        let Json(body) = satellite_passes(State(state()), Json(request("iss (zarya)")))
            .await
            .unwrap();
        assert_eq!(body.catalog_number, 25544);
        assert_eq!(body.end - body.start, Duration::days(3));
        assert!(body.passes.iter().all(|p| p.peak_elevation >= 10.0));

        let json = serde_json::to_value(&body).unwrap();
        assert!(json["passes"].is_array());
    }

    #[tokio::test]
    async fn always_visible_threshold() {
        let mut req = request("ISS (ZARYA)");
        req.min_elevation = Some(-90.0);
        req.days = Some(1);
        let Json(body) = satellite_passes(State(state()), Json(req)).await.unwrap();
        assert_eq!(body.passes.len(), 1);
        assert_eq!(body.passes[0].start, body.start);
        assert_eq!(body.passes[0].end, body.end);
    }

    #[test]
    fn sample_budget() {
        let limit = 86_401;
        assert!(check_sample_budget(Duration::days(30), Duration::seconds(30), limit).is_ok());
        assert!(check_sample_budget(Duration::days(30), Duration::seconds(29), limit).is_err());
        assert!(check_sample_budget(Duration::days(30), Duration::milliseconds(1), limit).is_err());
        assert!(check_sample_budget(Duration::days(1), Duration::zero(), limit).is_ok());
    }

    #[tokio::test]
    async fn request_validation() {
        let cases: Vec<(PassRequest, StatusCode)> = vec![
            (request("HUBBLE"), StatusCode::NOT_FOUND),
            (
                PassRequest {
                    latitude: 123.0,
                    ..request("ISS (ZARYA)")
                },
                StatusCode::BAD_REQUEST,
            ),
            (
                PassRequest {
                    days: Some(0),
                    ..request("ISS (ZARYA)")
                },
                StatusCode::BAD_REQUEST,
            ),
            (
                PassRequest {
                    days: Some(365),
                    ..request("ISS (ZARYA)")
                },
                StatusCode::BAD_REQUEST,
            ),
            (
                PassRequest {
                    step: Some("0s".into()),
                    ..request("ISS (ZARYA)")
                },
                StatusCode::BAD_REQUEST,
            ),
            (
                PassRequest {
                    step: Some("1ms".into()),
                    days: Some(30),
                    min_elevation: Some(-90.0),
                    ..request("ISS (ZARYA)")
                },
                StatusCode::BAD_REQUEST,
            ),
            (
                PassRequest {
                    step: Some("29s".into()),
                    days: Some(30),
                    ..request("ISS (ZARYA)")
                },
                StatusCode::BAD_REQUEST,
            ),
            (
                PassRequest {
                    min_elevation: Some(120.0),
                    ..request("ISS (ZARYA)")
                },
                StatusCode::BAD_REQUEST,
            ),
        ];

        for (req, expected) in cases {
            let err = satellite_passes(State(state()), Json(req)).await.unwrap_err();
            assert_eq!(err.status(), expected);
        }

        let err = satellite_passes(State(empty_state()), Json(request("ISS (ZARYA)")))
            .await
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
