use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::web::state::AppState;

/// External providers with credentials present. Imagery is the only one
/// this service calls.
#[derive(Debug, Serialize, ToSchema)]
pub struct ApisConfigured {
    pub imagery: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub satellites_loaded: usize,
    pub catalog_source: String,
    pub catalog_loaded_at: DateTime<Utc>,
    pub apis_configured: ApisConfigured,
}

#[utoipa::path(
    get,
    path = "/api/health",
    tag = "health",
    responses(
        (status = 200, description = "Service health", body = HealthResponse)
    )
)]
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let catalog = state.catalog.snapshot();
    Json(HealthResponse {
        status: "healthy".into(),
        timestamp: Utc::now(),
        satellites_loaded: catalog.len(),
        catalog_source: catalog.source().to_string(),
        catalog_loaded_at: catalog.loaded_at(),
        apis_configured: ApisConfigured {
            imagery: state.config.observation.imagery_api_key.is_some(),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::web::api::test_support::*;

    #[tokio::test]
    async fn reports_catalog_size() {
        let Json(body) = health(State(state())).await;
        assert_eq!(body.status, "healthy");
        assert_eq!(body.satellites_loaded, 3);
        assert_eq!(body.catalog_source, "test");
        assert!(!body.apis_configured.imagery);

        let json = serde_json::to_value(&body).unwrap();
        let providers = json["apis_configured"].as_object().unwrap();
        assert_eq!(providers.len(), 1);
        assert_eq!(providers["imagery"], false);
    }
}
