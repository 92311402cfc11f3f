use axum::{routing::get, routing::post, Router};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::catalog::{spawn_refresh, Catalog, CatalogStore, TleLoader};

use super::api::health as health_handlers;
use super::api::observation as observation_handlers;
use super::api::passes as pass_handlers;
use super::api::satellites as satellite_handlers;
use super::api_doc::ApiDoc;
use super::config::Config;
use super::state::AppState;

pub async fn run_server(config: Config) -> std::io::Result<()> {
    let bind_addr = config.web.bind.clone();
    let loader = TleLoader::new(config.catalog.tle_folder.clone());

    let catalog = match loader.load() {
        Ok(catalog) => catalog,
        Err(e) => {
            log::warn!("Failed to load satellite catalog: {}", e);
            Catalog::empty()
        }
    };
    let store = Arc::new(CatalogStore::new(catalog));

    if let Some(interval) = config.catalog.refresh_interval {
        match interval.to_std() {
            Ok(interval) if !interval.is_zero() => {
                log::info!("Refreshing catalog every {}", humantime::format_duration(interval));
                spawn_refresh(store.clone(), loader, interval);
            }
            _ => log::warn!("Ignoring non-positive catalog refresh interval"),
        }
    }

    let state = AppState {
        config: Arc::new(config),
        catalog: store,
    };

    let app = build_router(state);

    log::info!("Starting server on {}", bind_addr);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    axum::serve(listener, app).await
}

pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Satellite tracking
        .route("/api/satellites/list", get(satellite_handlers::list_satellites))
        .route(
            "/api/satellites/{satellite_id}",
            get(satellite_handlers::satellite_detail),
        )
        .route(
            "/api/satellites/{satellite_id}/position",
            get(satellite_handlers::satellite_position),
        )
        .route(
            "/api/satellites/{satellite_id}/track",
            get(satellite_handlers::satellite_track),
        )
        .route("/api/satellites/passes", post(pass_handlers::satellite_passes))
        // Earth observation
        .route(
            "/api/earth-observation/imagery",
            get(observation_handlers::imagery),
        )
        .route("/api/earth-observation/ndvi", post(observation_handlers::ndvi))
        .route("/api/health", get(health_handlers::health))
        // OpenAPI / Swagger
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", ApiDoc::openapi()))
        // Middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
