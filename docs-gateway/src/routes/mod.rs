use std::sync::Arc;

use axum::{http::HeaderName, middleware, routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::config::{ConfigError, Settings};
use crate::handlers::*;
use crate::initializer::{render_page, render_script, AssetLocation, ScriptVariant};
use crate::middleware::{cors_layer, request_id_middleware};
use crate::models::DocsConfig;

/// Shared, read-only state. Everything is rendered once when the state is
/// built; handlers only clone `Arc`s.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<DocsConfig>,
    pub page: Arc<str>,
    pub initializer_js: Arc<str>,
    pub config_js: Arc<str>,
    pub request_id_header: HeaderName,
}

impl AppState {
    pub fn new(config: Arc<DocsConfig>, assets: &AssetLocation, request_id_header: HeaderName) -> Self {
        Self {
            page: render_page(&config, assets).into(),
            initializer_js: render_script(&config, ScriptVariant::Initializer).into(),
            config_js: render_script(&config, ScriptVariant::Config).into(),
            config,
            request_id_header,
        }
    }

    pub fn from_settings(config: Arc<DocsConfig>, settings: &Settings) -> Result<Self, ConfigError> {
        let header = HeaderName::from_bytes(settings.request_id_header.as_bytes()).map_err(|_| {
            ConfigError::InvalidValue {
                var: "REQUEST_ID_HEADER",
                value: settings.request_id_header.clone(),
            }
        })?;
        Ok(Self::new(config, &AssetLocation::new(&settings.asset_base), header))
    }
}

pub fn routes(state: AppState, cors_origins: &[String]) -> Router {
    // Bootstrap assets for the documentation UI
    let docs_routes = Router::new()
        .route("/docs", get(docs_page))
        .route("/swagger-ui/index.html", get(docs_page))
        .route("/swagger-initializer.js", get(initializer_script))
        .route("/swagger-config.js", get(config_script))
        .route("/docs/swagger-config.json", get(swagger_config));

    Router::new()
        .route("/health", get(health))
        .merge(docs_routes)
        .fallback(not_found)
        .layer(cors_layer(cors_origins))
        .layer(middleware::from_fn_with_state(state.clone(), request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
