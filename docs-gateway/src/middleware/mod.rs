use axum::{
    extract::{Request, State},
    http::{HeaderValue, Method},
    middleware::Next,
    response::Response,
};
use tower_http::cors::{AllowHeaders, AllowOrigin, CorsLayer};
use tracing::Instrument;
use uuid::Uuid;

use crate::routes::AppState;

/// Request id carried in request extensions for handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestId(pub String);

impl RequestId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Keeps a caller-supplied id when it is a UUID, otherwise mints a v4 one.
pub fn resolve_or_generate(incoming: Option<&str>) -> String {
    incoming
        .map(str::trim)
        .filter(|v| Uuid::parse_str(v).is_ok())
        .map(str::to_string)
        .unwrap_or_else(|| Uuid::new_v4().to_string())
}

pub async fn request_id_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let header = state.request_id_header.clone();
    let request_id = resolve_or_generate(
        request
            .headers()
            .get(&header)
            .and_then(|value| value.to_str().ok()),
    );

    // A UUID is always a valid header value
    let value = HeaderValue::from_str(&request_id).ok();
    if let Some(value) = &value {
        request.headers_mut().insert(header.clone(), value.clone());
    }
    request
        .extensions_mut()
        .insert(RequestId(request_id.clone()));

    let span = tracing::debug_span!(
        "request",
        request_id = %request_id,
        method = %request.method(),
        path = %request.uri().path(),
    );
    let mut response = next.run(request).instrument(span).await;

    if let Some(value) = value {
        response.headers_mut().insert(header, value);
    }
    response
}

/// CORS for the docs endpoints. Credentials are allowed, so origins are either
/// an explicit list or mirrored from the request, never `*`.
pub fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let allow_origin = if allowed_origins.is_empty() {
        AllowOrigin::mirror_request()
    } else {
        let origins: Vec<HeaderValue> = allowed_origins
            .iter()
            .filter_map(|origin| match HeaderValue::from_str(origin) {
                Ok(v) => Some(v),
                Err(_) => {
                    tracing::warn!("Ignoring invalid CORS origin {}", origin);
                    None
                }
            })
            .collect();
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::HEAD, Method::OPTIONS])
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_valid_uuid() {
        let id = "1b4e28ba-2fa1-11d2-883f-0016d3cca427";
        assert_eq!(resolve_or_generate(Some(id)), id);
    }

    #[test]
    fn replaces_missing_or_invalid_id() {
        for incoming in [None, Some(""), Some("   "), Some("not-a-uuid")] {
            let id = resolve_or_generate(incoming);
            assert!(Uuid::parse_str(&id).is_ok());
            assert_ne!(Some(id.as_str()), incoming);
        }
    }
}
