pub mod api;
pub mod config;
pub mod models;
pub mod services;

use crate::config::ProxyConfig;
use crate::services::corpus::{CorpusError, HttpCorpusClient};
use crate::services::craft_service::CraftService;
use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::HeaderValue,
    middleware::from_fn,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

/// Room for multipart boundaries and text fields on top of the file itself.
const MULTIPART_OVERHEAD: usize = 10 * 1024 * 1024;

#[derive(OpenApi)]
#[openapi(
    paths(
        api::handlers::auth::login,
        api::handlers::crafts::list_crafts,
        api::handlers::crafts::gallery,
        api::handlers::crafts::upload_craft,
        api::handlers::health::health_check,
    ),
    components(
        schemas(
            models::LoginForm,
            models::TokenResponse,
            models::CraftUploadForm,
            models::GalleryItem,
            models::MediaKind,
            models::MediaType,
            api::handlers::health::HealthResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "Corpus API login proxy"),
        (name = "crafts", description = "Craft records and uploads"),
        (name = "system", description = "Service health")
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).build()),
            );
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub craft_service: Arc<CraftService>,
    pub config: ProxyConfig,
}

impl AppState {
    /// Wires the reqwest-backed Corpus client from configuration.
    pub fn from_config(config: ProxyConfig) -> Result<Self, CorpusError> {
        let corpus = Arc::new(HttpCorpusClient::new(&config)?);
        Ok(Self {
            craft_service: Arc::new(CraftService::new(corpus)),
            config,
        })
    }
}

pub fn create_app(state: AppState) -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/health", get(api::handlers::health::health_check))
        .route("/token", post(api::handlers::auth::login))
        .route("/crafts/gallery", get(api::handlers::crafts::gallery))
        .route(
            "/crafts",
            get(api::handlers::crafts::list_crafts).merge(
                post(api::handlers::crafts::upload_craft)
                    .layer(DefaultBodyLimit::max(
                        state.config.max_file_size + MULTIPART_OVERHEAD,
                    ))
                    .layer(from_fn(api::middleware::auth::auth_middleware)),
            ),
        )
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    let request_id = request
                        .headers()
                        .get(&api::middleware::request_id::REQUEST_ID_HEADER)
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or("unknown");
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = %request_id,
                    )
                })
                .on_request(|request: &axum::http::Request<_>, _span: &tracing::Span| {
                    info!("📥 {} {}", request.method(), request.uri());
                })
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     _span: &tracing::Span| {
                        info!(
                            "📤 Finished in {:?} with status {}",
                            latency,
                            response.status()
                        );
                    },
                ),
        )
        // Outside the trace layer so the span sees a generated id too
        .layer(from_fn(api::middleware::request_id::request_id_middleware))
        .layer(cors_layer(&state.config))
        .with_state(state)
}

fn cors_layer(config: &ProxyConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| HeaderValue::from_str(origin).ok())
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}
