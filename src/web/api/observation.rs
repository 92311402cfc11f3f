//! Earth-observation endpoints. No imagery provider or NDVI pipeline is
//! wired in; responses are fabricated metadata with the shape clients expect.

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::web::api::error::{ApiError, ApiResult, ErrorResponse};
use crate::web::state::AppState;

const IMAGERY_WMS_BASE: &str = "https://services.sentinel-hub.com/ogc/wms";
const SAMPLE_NDVI: [f64; 5] = [0.7, 0.8, 0.6, 0.9, 0.75];
const NDVI_STRESS_THRESHOLD: f64 = 0.65;

#[derive(Debug, Deserialize, IntoParams)]
pub struct ImageryQuery {
    pub location: String,
    pub date: Option<String>,
    pub image_type: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ImageryMetadata {
    pub resolution: String,
    pub cloud_coverage: String,
    pub satellite: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ImageryResponse {
    pub request_id: String,
    pub location: String,
    pub date: String,
    pub image_type: String,
    pub image_url: String,
    pub metadata: ImageryMetadata,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct NdviRequest {
    pub location: String,
    #[serde(default)]
    pub analysis_type: Option<String>,
    #[serde(default)]
    pub date_range: Vec<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct NdviResponse {
    pub location: String,
    pub date_range: Vec<String>,
    pub ndvi_values: Vec<f64>,
    pub mean_ndvi: f64,
    pub analysis: String,
    pub recommendations: Vec<String>,
}

#[utoipa::path(
    get,
    path = "/api/earth-observation/imagery",
    tag = "earth-observation",
    params(ImageryQuery),
    responses(
        (status = 200, description = "Imagery metadata", body = ImageryResponse),
        (status = 400, description = "Invalid parameters", body = ErrorResponse),
        (status = 503, description = "Imagery provider not configured", body = ErrorResponse)
    )
)]
pub async fn imagery(
    State(state): State<AppState>,
    Query(query): Query<ImageryQuery>,
) -> ApiResult<Json<ImageryResponse>> {
    if state.config.observation.imagery_api_key.is_none() {
        return Err(ApiError::Unavailable("imagery_provider_not_configured"));
    }

    if query.location.trim().is_empty() {
        return Err(ApiError::Validation("location must not be empty".into()));
    }

    Ok(Json(ImageryResponse {
        request_id: uuid::Uuid::new_v4().to_string(),
        location: query.location,
        date: query.date.unwrap_or_else(|| Utc::now().to_rfc3339()),
        image_type: query.image_type.unwrap_or_else(|| "natural".into()),
        image_url: IMAGERY_WMS_BASE.into(),
        metadata: ImageryMetadata {
            resolution: "10m".into(),
            cloud_coverage: "5%".into(),
            satellite: "Sentinel-2".into(),
        },
    }))
}

#[utoipa::path(
    post,
    path = "/api/earth-observation/ndvi",
    tag = "earth-observation",
    request_body = NdviRequest,
    responses(
        (status = 200, description = "NDVI scores", body = NdviResponse),
        (status = 400, description = "Invalid parameters", body = ErrorResponse)
    )
)]
pub async fn ndvi(Json(request): Json<NdviRequest>) -> ApiResult<Json<NdviResponse>> {
    if request.location.trim().is_empty() {
        return Err(ApiError::Validation("location must not be empty".into()));
    }

    let values = SAMPLE_NDVI.to_vec();
    let mean_ndvi = values.iter().sum::<f64>() / values.len() as f64;

    Ok(Json(NdviResponse {
        location: request.location,
        date_range: request.date_range,
        ndvi_values: values,
        mean_ndvi,
        analysis: "Vegetation health is good with slight variations in the southern region"
            .into(),
        recommendations: vec![
            "Monitor southern region for potential stress".into(),
            format!("Irrigation may be needed in areas with NDVI < {NDVI_STRESS_THRESHOLD}"),
        ],
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::web::api::test_support::*;
    use crate::catalog::{Catalog, CatalogStore};
    use axum::http::StatusCode;
    use std::sync::Arc;

    fn query() -> ImageryQuery {
        ImageryQuery {
            location: "Lagos".into(),
            date: None,
            image_type: None,
        }
    }

    #[tokio::test]
    async fn imagery_requires_provider_key() {
        let err = imagery(State(state()), Query(query())).await.unwrap_err();
        assert_eq!(err.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn imagery_metadata() {
        let state = AppState {
            config: Arc::new(config(Some("instance-1"))),
            catalog: Arc::new(CatalogStore::new(Catalog::empty())),
        };
        let Json(body) = imagery(State(state), Query(query())).await.unwrap();
        assert_eq!(body.location, "Lagos");
        assert_eq!(body.image_type, "natural");
        assert_eq!(body.image_url, IMAGERY_WMS_BASE);
        assert!(!body.image_url.contains("instance-1"));
        let json = serde_json::to_string(&body).unwrap();
        assert!(!json.contains("instance-1"));
        assert_eq!(body.metadata.satellite, "Sentinel-2");
    }

    #[tokio::test]
    async fn ndvi_scores() {
        let Json(body) = ndvi(Json(NdviRequest {
            location: "Nile Delta".into(),
            analysis_type: Some("agriculture".into()),
            date_range: vec!["2024-01-01".into(), "2024-02-01".into()],
        }))
        .await
        .unwrap();
        assert_eq!(body.ndvi_values.len(), 5);
        assert!((body.mean_ndvi - 0.75).abs() < 1e-12);
        assert_eq!(body.date_range.len(), 2);
        assert!(body.recommendations[1].contains("0.65"));

        let err = ndvi(Json(NdviRequest {
            location: " ".into(),
            analysis_type: None,
            date_range: Vec::new(),
        }))
        .await
        .unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }
}
