//! Typed counterpart of the renderer's `requestInterceptor` hook.
//!
//! The renderer calls the hook for every documentation fetch. The hook only
//! stamps the credential policy on the request; retries, redirects and error
//! display stay inside the renderer.

use axum::http::{HeaderMap, Method};

use crate::models::{CredentialPolicy, DocsConfig};

/// The parts of a renderer request the hook can see.
#[derive(Debug, Clone, PartialEq)]
pub struct DocRequest {
    pub url: String,
    pub method: Method,
    pub headers: HeaderMap,
    pub credentials: Option<CredentialPolicy>,
}

impl DocRequest {
    pub fn get(url: &str) -> Self {
        Self {
            url: url.to_string(),
            method: Method::GET,
            headers: HeaderMap::new(),
            credentials: None,
        }
    }
}

pub trait RequestInterceptor: Send + Sync {
    /// Adjusts an outgoing documentation request. Must be idempotent.
    fn intercept(&self, request: DocRequest) -> DocRequest;

    /// Statements run inside the generated `(req) => { ... }` hook, before
    /// `return req;`.
    fn script_body(&self) -> String;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CredentialsInterceptor {
    policy: CredentialPolicy,
}

impl CredentialsInterceptor {
    pub fn new(policy: CredentialPolicy) -> Self {
        Self { policy }
    }
}

impl RequestInterceptor for CredentialsInterceptor {
    fn intercept(&self, mut request: DocRequest) -> DocRequest {
        request.credentials = Some(self.policy);
        request
    }

    fn script_body(&self) -> String {
        format!("req.credentials = \"{}\";", self.policy.as_str())
    }
}

impl DocsConfig {
    pub fn interceptor(&self) -> CredentialsInterceptor {
        CredentialsInterceptor::new(self.request_credentials)
    }
}
