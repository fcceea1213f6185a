pub mod config;
pub mod handlers;
pub mod initializer;
pub mod interceptor;
pub mod middleware;
pub mod models;
pub mod registry;
pub mod routes;

pub use config::{build_config, ConfigError, Settings};
pub use models::{CredentialPolicy, DocSource, DocsConfig, Layout, MountPoint, Preset};
pub use routes::{routes, AppState};
