use axum::{
    extract::State,
    http::{header::CONTENT_TYPE, HeaderMap, StatusCode, Uri},
    response::{Html, IntoResponse},
    Extension, Json,
};

use crate::middleware::RequestId;
use crate::models::{DocsConfig, ErrorResponse};
use crate::routes::AppState;

const JAVASCRIPT: &str = "application/javascript; charset=utf-8";

pub async fn health() -> &'static str {
    "OK"
}

// ============================
// Documentation UI
// ============================

pub async fn docs_page(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
) -> Html<String> {
    tracing::debug!(
        "Serving docs page with {} sources (request {})",
        state.config.sources().len(),
        request_id.as_str()
    );
    Html(state.page.to_string())
}

pub async fn initializer_script(State(state): State<AppState>) -> impl IntoResponse {
    ([(CONTENT_TYPE, JAVASCRIPT)], state.initializer_js.to_string())
}

pub async fn config_script(State(state): State<AppState>) -> impl IntoResponse {
    ([(CONTENT_TYPE, JAVASCRIPT)], state.config_js.to_string())
}

/// Option bag as JSON, for tooling that wants the source list without
/// evaluating the scripts. It describes `/swagger-initializer.js`;
/// `/swagger-config.js` differs only in always turning `deepLinking` on.
pub async fn swagger_config(State(state): State<AppState>) -> Json<DocsConfig> {
    Json(state.config.as_ref().clone())
}

// ============================
// Fallback
// ============================

pub async fn not_found(
    State(state): State<AppState>,
    uri: Uri,
    headers: HeaderMap,
) -> (StatusCode, Json<ErrorResponse>) {
    tracing::debug!(
        "No route for {} (request {})",
        uri.path(),
        headers
            .get(&state.request_id_header)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("-")
    );
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse::new(StatusCode::NOT_FOUND, "Resource not found", uri.path())),
    )
}
