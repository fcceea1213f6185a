use std::env;
use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, HeaderName, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use tower::ServiceExt;

use docs_gateway::initializer::AssetLocation;
use docs_gateway::{build_config, routes, AppState, DocsConfig, Settings};

const REQUEST_ID: &str = "x-request-id";

fn app_with(config: DocsConfig, cors_origins: &[String]) -> Router {
    let state = AppState::new(
        Arc::new(config),
        &AssetLocation::new("/assets"),
        HeaderName::from_static(REQUEST_ID),
    );
    routes(state, cors_origins)
}

fn app() -> Router {
    app_with(build_config(), &[])
}

async fn get(app: Router, uri: &str) -> (StatusCode, axum::http::HeaderMap, String) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, headers, String::from_utf8(bytes.to_vec()).unwrap())
}

#[tokio::test]
async fn health_is_ok() {
    let (status, _, body) = get(app(), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "OK");
}

#[tokio::test]
async fn docs_page_bootstraps_both_services() {
    for path in ["/docs", "/swagger-ui/index.html"] {
        let (status, headers, body) = get(app(), path).await;
        assert_eq!(status, StatusCode::OK);
        assert!(headers[header::CONTENT_TYPE].to_str().unwrap().starts_with("text/html"));
        assert!(body.contains(r#"<div id="swagger-ui"></div>"#));
        assert!(body.contains("/assets/swagger-ui-bundle.js"));
        assert!(body.contains(r#"{ name: "Auth Service", url: "/v3/api-docs/auth" }"#));
        assert!(body.contains(r#"{ name: "User Service", url: "/v3/api-docs/user" }"#));
        assert!(body.contains(r#"req.credentials = "include";"#));
    }
}

#[tokio::test]
async fn both_scripts_are_served() {
    let (status, headers, initializer) = get(app(), "/swagger-initializer.js").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[header::CONTENT_TYPE], "application/javascript; charset=utf-8");
    assert!(initializer.contains("(req) => {"));

    let (status, _, config_js) = get(app(), "/swagger-config.js").await;
    assert_eq!(status, StatusCode::OK);
    assert!(config_js.contains("deepLinking: true,"));
    assert!(config_js.contains(r#"{ url: "/v3/api-docs/user", name: "User Service" }"#));
}

#[tokio::test]
async fn swagger_config_json_lists_sources_in_order() {
    let (status, _, body) = get(app(), "/docs/swagger-config.json").await;
    assert_eq!(status, StatusCode::OK);

    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["dom_id"], "#swagger-ui");
    assert_eq!(json["requestCredentials"], "include");
    assert_eq!(json["layout"], "StandaloneLayout");
    assert_eq!(json["presets"], serde_json::json!(["apis", "standalone"]));
    assert_eq!(
        json["urls"],
        serde_json::json!([
            {"name": "Auth Service", "url": "/v3/api-docs/auth"},
            {"name": "User Service", "url": "/v3/api-docs/user"}
        ])
    );
}

#[tokio::test]
async fn swagger_config_json_agrees_with_initializer_on_deep_linking() {
    for enabled in [false, true] {
        let config = DocsConfig::builder()
            .source("Auth Service", "/v3/api-docs/auth")
            .deep_linking(enabled)
            .build()
            .unwrap();

        let (_, _, body) = get(app_with(config.clone(), &[]), "/docs/swagger-config.json").await;
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["deepLinking"], enabled);

        let (_, _, script) = get(app_with(config, &[]), "/swagger-initializer.js").await;
        assert_eq!(script.contains("deepLinking: true,"), enabled);
    }
}

#[tokio::test]
async fn unknown_path_returns_error_body() {
    let (status, _, body) = get(app(), "/v3/api-docs/auth").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["status"], 404);
    assert_eq!(json["error"], "Not Found");
    assert_eq!(json["path"], "/v3/api-docs/auth");
}

#[tokio::test]
async fn request_id_is_echoed_or_generated() {
    let id = "6f1c2a9e-8d43-4b4f-9a57-2c1f0e3b7d10";
    let response = app()
        .oneshot(
            Request::builder()
                .uri("/health")
                .header(REQUEST_ID, id)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.headers()[REQUEST_ID], id);

    let (_, headers, _) = get(app(), "/health").await;
    let generated = headers[REQUEST_ID].to_str().unwrap();
    assert!(uuid::Uuid::parse_str(generated).is_ok());
}

#[tokio::test]
async fn cors_preflight_allows_credentials() {
    let response = app()
        .oneshot(
            Request::builder()
                .method(Method::OPTIONS)
                .uri("/swagger-initializer.js")
                .header(header::ORIGIN, "http://localhost:3000")
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let headers = response.headers();
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "http://localhost:3000");
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_CREDENTIALS], "true");
}

#[tokio::test]
async fn cors_respects_allow_list() {
    let allowed = vec!["https://docs.example.com".to_string()];
    let response = app_with(build_config(), &allowed)
        .oneshot(
            Request::builder()
                .uri("/health")
                .header(header::ORIGIN, "https://evil.example.com")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert!(response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
}

#[tokio::test]
async fn settings_drive_the_served_config() {
    let settings = Settings::from_lookup(|key| match key {
        "DOCS_SOURCES" => Some("Patient Service=/v3/api-docs/patient".to_string()),
        "DOCS_CREDENTIALS" => Some("same-origin".to_string()),
        _ => None,
    })
    .unwrap();
    let config = DocsConfig::from_settings(&settings).unwrap();
    let state = AppState::from_settings(Arc::new(config), &settings).unwrap();

    let (_, _, body) = get(routes(state, &[]), "/swagger-initializer.js").await;
    assert!(body.contains(r#"{ name: "Patient Service", url: "/v3/api-docs/patient" }"#));
    assert!(body.contains(r#"req.credentials = "same-origin";"#));
    assert!(!body.contains("Auth Service"));
}

// This test is ignored by default. To run it, start the gateway, set SERVER_URL and run:
// cargo test -- --ignored

#[tokio::test]
#[ignore]
async fn smoke_live_gateway() {
    let server = env::var("SERVER_URL").expect("SERVER_URL must be set for integration test");
    let client = reqwest::Client::new();

    let resp = client
        .get(format!("{}/docs", server))
        .send()
        .await
        .expect("request failed");
    assert!(resp.status().is_success());
    let page = resp.text().await.expect("invalid body");
    assert!(page.contains("SwaggerUIBundle"));

    let resp = client
        .get(format!("{}/docs/swagger-config.json", server))
        .send()
        .await
        .expect("request failed");
    assert!(resp.status().is_success());
    let config: serde_json::Value = resp.json().await.expect("invalid json");
    assert!(config["urls"].as_array().map(|u| !u.is_empty()).unwrap_or(false));
}
