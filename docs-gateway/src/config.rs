use std::collections::HashSet;
use std::env;

use thiserror::Error;

use crate::models::{CredentialPolicy, DocSource, DocsConfig, Layout, MountPoint, Preset};

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_MOUNT_POINT: &str = "#swagger-ui";
pub const DEFAULT_ASSET_BASE: &str = "https://unpkg.com/swagger-ui-dist@5";
pub const DEFAULT_REQUEST_ID_HEADER: &str = "x-request-id";

pub const DEFAULT_SOURCES: [(&str, &str); 2] = [
    ("Auth Service", "/v3/api-docs/auth"),
    ("User Service", "/v3/api-docs/user"),
];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("at least one documentation source is required")]
    NoSources,
    #[error("documentation source #{0} has a blank name")]
    BlankSourceName(usize),
    #[error("documentation source '{name}' has an invalid url '{url}'")]
    InvalidSourceUrl { name: String, url: String },
    #[error("malformed source entry '{0}', expected NAME=URL")]
    MalformedSourceEntry(String),
    #[error("mount point '{0}' is not an id selector like '#swagger-ui'")]
    InvalidMountPoint(String),
    #[error("unknown credential policy '{0}', expected omit, same-origin or include")]
    InvalidCredentialPolicy(String),
    #[error("unknown layout '{0}'")]
    InvalidLayout(String),
    #[error("unknown preset '{0}', expected apis or standalone")]
    InvalidPreset(String),
    #[error("at least one renderer preset is required")]
    NoPresets,
    #[error("layout {0} needs the standalone preset")]
    MissingStandalonePreset(&'static str),
    #[error("invalid value '{value}' for {var}")]
    InvalidValue { var: &'static str, value: String },
}

/// The stock aggregator configuration: both platform services, credentials
/// included, standalone layout.
pub fn build_config() -> DocsConfig {
    DocsConfig {
        mount_point: MountPoint(DEFAULT_MOUNT_POINT.to_string()),
        sources: DEFAULT_SOURCES
            .iter()
            .map(|(name, url)| DocSource::new(name, url))
            .collect(),
        request_credentials: CredentialPolicy::Include,
        presets: vec![Preset::Apis, Preset::Standalone],
        layout: Layout::StandaloneLayout,
        deep_linking: false,
    }
}

// ============================
// Builder
// ============================

#[derive(Debug, Clone)]
pub struct DocsConfigBuilder {
    sources: Vec<DocSource>,
    mount_point: String,
    request_credentials: CredentialPolicy,
    presets: Vec<Preset>,
    layout: Layout,
    deep_linking: bool,
}

impl Default for DocsConfigBuilder {
    fn default() -> Self {
        Self {
            sources: Vec::new(),
            mount_point: DEFAULT_MOUNT_POINT.to_string(),
            request_credentials: CredentialPolicy::Include,
            presets: vec![Preset::Apis, Preset::Standalone],
            layout: Layout::StandaloneLayout,
            deep_linking: false,
        }
    }
}

impl DocsConfigBuilder {
    pub fn source(mut self, name: &str, url: &str) -> Self {
        self.sources.push(DocSource::new(name, url));
        self
    }

    pub fn sources(mut self, sources: Vec<DocSource>) -> Self {
        self.sources = sources;
        self
    }

    pub fn mount_point(mut self, selector: &str) -> Self {
        self.mount_point = selector.to_string();
        self
    }

    pub fn request_credentials(mut self, policy: CredentialPolicy) -> Self {
        self.request_credentials = policy;
        self
    }

    pub fn presets(mut self, presets: Vec<Preset>) -> Self {
        self.presets = presets;
        self
    }

    pub fn layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    pub fn deep_linking(mut self, enabled: bool) -> Self {
        self.deep_linking = enabled;
        self
    }

    pub fn build(self) -> Result<DocsConfig, ConfigError> {
        if self.sources.is_empty() {
            return Err(ConfigError::NoSources);
        }

        let mut seen = HashSet::new();
        for (idx, source) in self.sources.iter().enumerate() {
            if source.name.trim().is_empty() {
                return Err(ConfigError::BlankSourceName(idx));
            }
            if !is_document_url(&source.url) {
                return Err(ConfigError::InvalidSourceUrl {
                    name: source.name.clone(),
                    url: source.url.clone(),
                });
            }
            if !seen.insert(source.url.as_str()) {
                // Kept: the renderer shows both entries, it just fetches twice.
                tracing::warn!("Documentation url {} is listed more than once", source.url);
            }
        }

        if self.presets.is_empty() {
            return Err(ConfigError::NoPresets);
        }
        if self.layout == Layout::StandaloneLayout && !self.presets.contains(&Preset::Standalone) {
            return Err(ConfigError::MissingStandalonePreset(self.layout.as_str()));
        }

        Ok(DocsConfig {
            mount_point: MountPoint::parse(&self.mount_point)?,
            sources: self.sources,
            request_credentials: self.request_credentials,
            presets: self.presets,
            layout: self.layout,
            deep_linking: self.deep_linking,
        })
    }
}

impl DocsConfig {
    pub fn builder() -> DocsConfigBuilder {
        DocsConfigBuilder::default()
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, ConfigError> {
        DocsConfig::builder()
            .sources(settings.sources.clone())
            .mount_point(&settings.mount_point)
            .request_credentials(settings.request_credentials)
            .presets(settings.presets.clone())
            .layout(settings.layout)
            .deep_linking(settings.deep_linking)
            .build()
    }
}

fn is_document_url(url: &str) -> bool {
    let url = url.trim();
    if url.is_empty() || url.chars().any(char::is_whitespace) {
        return false;
    }
    url.starts_with('/') || url.starts_with("http://") || url.starts_with("https://")
}

// ============================
// Settings
// ============================

/// Process settings read from the environment (after `.env` is loaded).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub port: u16,
    pub sources: Vec<DocSource>,
    pub mount_point: String,
    pub request_credentials: CredentialPolicy,
    pub presets: Vec<Preset>,
    pub layout: Layout,
    pub deep_linking: bool,
    pub asset_base: String,
    pub cors_allowed_origins: Vec<String>,
    pub request_id_header: String,
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = match var("PORT") {
            Some(v) => v.trim().parse().map_err(|_| ConfigError::InvalidValue {
                var: "PORT",
                value: v.clone(),
            })?,
            None => DEFAULT_PORT,
        };

        let sources = match var("DOCS_SOURCES") {
            Some(v) => parse_sources(&v)?,
            None => DEFAULT_SOURCES
                .iter()
                .map(|(name, url)| DocSource::new(name, url))
                .collect(),
        };

        let request_credentials = match var("DOCS_CREDENTIALS") {
            Some(v) => v.parse()?,
            None => CredentialPolicy::Include,
        };

        let presets = match var("DOCS_PRESETS") {
            Some(v) => v
                .split(',')
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(str::parse)
                .collect::<Result<Vec<Preset>, _>>()?,
            None => vec![Preset::Apis, Preset::Standalone],
        };

        let layout = match var("DOCS_LAYOUT") {
            Some(v) => v.parse()?,
            None => Layout::StandaloneLayout,
        };

        let deep_linking = match var("DOCS_DEEP_LINKING") {
            Some(v) => parse_bool(&v).ok_or(ConfigError::InvalidValue {
                var: "DOCS_DEEP_LINKING",
                value: v.clone(),
            })?,
            None => false,
        };

        let cors_allowed_origins = var("CORS_ALLOWED_ORIGINS")
            .map(|v| {
                v.split(',')
                    .map(|o| o.trim().to_string())
                    .filter(|o| !o.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            port,
            sources,
            mount_point: var("DOCS_DOM_ID").unwrap_or_else(|| DEFAULT_MOUNT_POINT.to_string()),
            request_credentials,
            presets,
            layout,
            deep_linking,
            asset_base: var("DOCS_ASSET_BASE")
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_ASSET_BASE.to_string()),
            cors_allowed_origins,
            request_id_header: var("REQUEST_ID_HEADER")
                .map(|v| v.trim().to_ascii_lowercase())
                .unwrap_or_else(|| DEFAULT_REQUEST_ID_HEADER.to_string()),
        })
    }
}

/// Parses `Name=/url,Other=/url2`. Only the first `=` splits, so urls may
/// carry query strings.
pub fn parse_sources(raw: &str) -> Result<Vec<DocSource>, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            let (name, url) = entry
                .split_once('=')
                .ok_or_else(|| ConfigError::MalformedSourceEntry(entry.to_string()))?;
            Ok(DocSource::new(name.trim(), url.trim()))
        })
        .collect()
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
