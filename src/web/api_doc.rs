use utoipa::OpenApi;

use super::api::error::ErrorResponse;
use super::api::health::{ApisConfigured, HealthResponse};
use super::api::observation::{ImageryMetadata, ImageryResponse, NdviRequest, NdviResponse};
use super::api::passes::{PassRequest, PassResponse};
use super::api::satellites::{
    GroundTrackResponse, SatelliteDetailResponse, SatelliteListResponse,
    SatellitePositionResponse,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        super::api::satellites::list_satellites,
        super::api::satellites::satellite_detail,
        super::api::satellites::satellite_position,
        super::api::satellites::satellite_track,
        super::api::passes::satellite_passes,
        super::api::observation::imagery,
        super::api::observation::ndvi,
        super::api::health::health,
    ),
    components(
        schemas(
            SatelliteListResponse,
            SatelliteDetailResponse,
            SatellitePositionResponse,
            GroundTrackResponse,
            PassRequest,
            PassResponse,
            ImageryResponse,
            ImageryMetadata,
            NdviRequest,
            NdviResponse,
            HealthResponse,
            ApisConfigured,
            ErrorResponse,
            crate::catalog::SatelliteSummary,
            crate::orbit::GeodeticPosition,
            crate::track::ObserverLocation,
            crate::track::Pass,
            crate::track::LookSample,
        )
    ),
    info(
        title = "ORBITA Satellite Intelligence API",
        description = "Satellite positions, ground tracks and visibility passes",
        version = "0.1.0"
    ),
    tags(
        (name = "satellites", description = "Orbit propagation and visibility"),
        (name = "earth-observation", description = "Imagery and vegetation metadata"),
        (name = "health", description = "Service status")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_route() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/satellites/list",
            "/api/satellites/{satellite_id}",
            "/api/satellites/{satellite_id}/position",
            "/api/satellites/{satellite_id}/track",
            "/api/satellites/passes",
            "/api/earth-observation/imagery",
            "/api/earth-observation/ndvi",
            "/api/health",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }
}
