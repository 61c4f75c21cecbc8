use anyhow::Result;
use std::sync::Arc;
use tracing::{info, warn};

use crate::{config::Config, ml::ModelRegistry, views::Views};

/// Read-only state shared by every request handler
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<ModelRegistry>,
    pub views: Arc<Views>,
}

impl AppState {
    pub fn new(registry: ModelRegistry) -> Result<Self> {
        let views = Views::new()?;
        Ok(Self {
            registry: Arc::new(registry),
            views: Arc::new(views),
        })
    }

    /// Load artifacts from the configured directory. Never fails on missing
    /// artifacts; only template registration can fail here.
    pub fn load(cfg: &Config) -> Result<Self> {
        let registry = ModelRegistry::load_all(&cfg.models.dir);

        let loaded = registry.loaded_models();
        if loaded.is_empty() {
            warn!(dir = %cfg.models.dir.display(), "no models loaded, every form will return 404");
        } else {
            info!(
                models = ?loaded.iter().map(|k| k.name()).collect::<Vec<_>>(),
                scaler = registry.scaler().is_some(),
                "artifact store ready"
            );
        }

        Self::new(registry)
    }
}
