use std::fmt;
use std::str::FromStr;

use axum::http::StatusCode;
use serde::{ser::SerializeStruct, Serialize, Serializer};

use crate::config::ConfigError;

// ============================
// Documentation Sources
// ============================

/// One entry of the renderer's `urls` list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocSource {
    pub name: String,
    pub url: String,
}

impl DocSource {
    pub fn new(name: &str, url: &str) -> Self {
        Self {
            name: name.to_string(),
            url: url.to_string(),
        }
    }
}

/// CSS id selector of the element the renderer mounts into.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MountPoint(pub(crate) String);

impl MountPoint {
    pub fn parse(selector: &str) -> Result<Self, ConfigError> {
        let id = selector
            .strip_prefix('#')
            .ok_or_else(|| ConfigError::InvalidMountPoint(selector.to_string()))?;
        if !is_css_identifier(id) {
            return Err(ConfigError::InvalidMountPoint(selector.to_string()));
        }
        Ok(Self(selector.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Element id without the leading `#`.
    pub fn element_id(&self) -> &str {
        &self.0[1..]
    }
}

/// `[A-Za-z_-][A-Za-z0-9_-]*`, minus the forms CSS rejects: a lone `-` and
/// `-` followed by a digit.
fn is_css_identifier(id: &str) -> bool {
    let bytes = id.as_bytes();
    let Some(&first) = bytes.first() else {
        return false;
    };
    if !(first.is_ascii_alphabetic() || first == b'_' || first == b'-') {
        return false;
    }
    if first == b'-' && bytes.get(1).map_or(true, u8::is_ascii_digit) {
        return false;
    }
    bytes
        .iter()
        .all(|b| b.is_ascii_alphanumeric() || *b == b'_' || *b == b'-')
}

// ============================
// Renderer Options
// ============================

/// Value of the Fetch API `credentials` field on documentation requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CredentialPolicy {
    Omit,
    SameOrigin,
    Include,
}

impl CredentialPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            CredentialPolicy::Omit => "omit",
            CredentialPolicy::SameOrigin => "same-origin",
            CredentialPolicy::Include => "include",
        }
    }
}

impl fmt::Display for CredentialPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CredentialPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "omit" => Ok(CredentialPolicy::Omit),
            "same-origin" => Ok(CredentialPolicy::SameOrigin),
            "include" => Ok(CredentialPolicy::Include),
            other => Err(ConfigError::InvalidCredentialPolicy(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Preset {
    #[serde(rename = "apis")]
    Apis,
    #[serde(rename = "standalone")]
    Standalone,
}

impl Preset {
    /// Script expression resolving to the preset in the browser.
    pub fn js_expr(&self) -> &'static str {
        match self {
            Preset::Apis => "SwaggerUIBundle.presets.apis",
            Preset::Standalone => "SwaggerUIStandalonePreset",
        }
    }
}

impl FromStr for Preset {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "apis" => Ok(Preset::Apis),
            "standalone" => Ok(Preset::Standalone),
            other => Err(ConfigError::InvalidPreset(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Layout {
    StandaloneLayout,
    BaseLayout,
}

impl Layout {
    pub fn as_str(&self) -> &'static str {
        match self {
            Layout::StandaloneLayout => "StandaloneLayout",
            Layout::BaseLayout => "BaseLayout",
        }
    }
}

impl FromStr for Layout {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "StandaloneLayout" => Ok(Layout::StandaloneLayout),
            "BaseLayout" => Ok(Layout::BaseLayout),
            other => Err(ConfigError::InvalidLayout(other.to_string())),
        }
    }
}

// ============================
// Aggregator Configuration
// ============================

/// Option bag handed to `SwaggerUIBundle`, minus the functions.
///
/// Built through [`DocsConfig::builder`] or [`crate::config::build_config`];
/// both validate before returning, so every value of this type is usable by
/// the initializer renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocsConfig {
    #[serde(rename = "dom_id")]
    pub(crate) mount_point: MountPoint,
    #[serde(rename = "urls")]
    pub(crate) sources: Vec<DocSource>,
    #[serde(rename = "requestCredentials")]
    pub(crate) request_credentials: CredentialPolicy,
    pub(crate) presets: Vec<Preset>,
    pub(crate) layout: Layout,
    #[serde(rename = "deepLinking")]
    pub(crate) deep_linking: bool,
}

impl DocsConfig {
    pub fn sources(&self) -> &[DocSource] {
        &self.sources
    }

    pub fn mount_point(&self) -> &MountPoint {
        &self.mount_point
    }

    pub fn request_credentials(&self) -> CredentialPolicy {
        self.request_credentials
    }

    pub fn presets(&self) -> &[Preset] {
        &self.presets
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn deep_linking(&self) -> bool {
        self.deep_linking
    }
}

// ============================
// Error Types
// ============================

#[derive(Debug)]
pub struct ErrorResponse {
    pub status: StatusCode,
    pub message: String,
    pub path: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl ErrorResponse {
    pub fn new(status: StatusCode, message: &str, path: &str) -> Self {
        Self {
            status,
            message: message.to_string(),
            path: path.to_string(),
            timestamp: chrono::Utc::now(),
        }
    }
}

// Same body shape as the upstream services' errors.
impl Serialize for ErrorResponse {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut s = serializer.serialize_struct("ErrorResponse", 6)?;
        s.serialize_field("timestamp", &self.timestamp.to_rfc3339())?;
        s.serialize_field("status", &self.status.as_u16())?;
        s.serialize_field("error", self.status.canonical_reason().unwrap_or("Unknown"))?;
        s.serialize_field("message", &[&self.message])?;
        s.serialize_field("path", &self.path)?;
        s.serialize_field("validationErrors", &Option::<()>::None)?;
        s.end()
    }
}
