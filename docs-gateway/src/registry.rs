use std::sync::Arc;

use once_cell::sync::{Lazy, OnceCell};
use thiserror::Error;

use crate::models::DocsConfig;

static GLOBAL: Lazy<DocsRegistry> = Lazy::new(DocsRegistry::new);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("documentation config is already installed")]
    AlreadyInstalled,
}

/// Set-once slot for the process' documentation config.
#[derive(Debug, Default)]
pub struct DocsRegistry {
    slot: OnceCell<Arc<DocsConfig>>,
}

impl DocsRegistry {
    pub fn new() -> Self {
        Self {
            slot: OnceCell::new(),
        }
    }

    /// Stores `config`. Only the first call wins; later calls leave the
    /// installed value untouched.
    pub fn install(&self, config: DocsConfig) -> Result<Arc<DocsConfig>, RegistryError> {
        let config = Arc::new(config);
        self.slot
            .set(Arc::clone(&config))
            .map_err(|_| RegistryError::AlreadyInstalled)?;
        tracing::debug!("Installed documentation config with {} sources", config.sources().len());
        Ok(config)
    }

    pub fn get(&self) -> Option<Arc<DocsConfig>> {
        self.slot.get().cloned()
    }
}

pub fn global() -> &'static DocsRegistry {
    &GLOBAL
}
