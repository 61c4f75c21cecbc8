//! Startup artifact store
//!
//! One optional slot per `ModelKind` plus one for the scaler. Slots are filled
//! once by `load_all` and never change afterwards; an empty slot means the
//! artifact was missing or unusable when the process started.

use super::{
    artifact::{self, Artifact, ArtifactError},
    inference, BoostedTrees, FeatureVector, ModelKind, PowerModel, RandomForestModel,
    StandardScaler,
};
use anyhow::Result;
use std::path::Path;
use std::str::FromStr;
use strum::IntoEnumIterator;
use tracing::{info, warn};

/// File stem of the scaler artifact
pub const SCALER_STEM: &str = "scaler";

#[derive(Default)]
pub struct ModelRegistry {
    random_forest: Option<Box<dyn PowerModel>>,
    gradient_boosting: Option<Box<dyn PowerModel>>,
    xgboost: Option<Box<dyn PowerModel>>,
    scaler: Option<StandardScaler>,
}

impl ModelRegistry {
    /// Load every model artifact and the scaler from `dir`.
    ///
    /// Failures are logged and leave the slot empty; this never aborts.
    pub fn load_all(dir: &Path) -> Self {
        let mut registry = Self::default();

        for kind in ModelKind::iter() {
            let path = kind.artifact_path(dir);
            let loaded = match kind {
                ModelKind::RandomForest => load_boxed::<RandomForestModel>(&path),
                ModelKind::GradientBoosting | ModelKind::XGBoost => {
                    load_boxed::<BoostedTrees>(&path)
                }
            };

            match loaded {
                Ok(model) => {
                    info!(model = %kind, path = %path.display(), "model loaded");
                    *registry.slot_mut(kind) = Some(model);
                }
                Err(ArtifactError::NotFound(path)) => {
                    warn!(model = %kind, path = %path.display(), "model file not found");
                }
                Err(e) => {
                    warn!(model = %kind, error = %e, "error loading model");
                }
            }
        }

        let scaler_path = dir.join(format!("{}.{}", SCALER_STEM, artifact::EXTENSION));
        match artifact::load::<StandardScaler>(&scaler_path) {
            Ok(scaler) => {
                info!(path = %scaler_path.display(), "scaler loaded");
                registry.scaler = Some(scaler);
            }
            Err(ArtifactError::NotFound(path)) => {
                warn!(
                    path = %path.display(),
                    "scaler file not found, features will be passed to models unscaled"
                );
            }
            Err(e) => {
                warn!(
                    error = %e,
                    "error loading scaler, features will be passed to models unscaled"
                );
            }
        }

        registry
    }

    pub fn with_model(mut self, kind: ModelKind, model: Box<dyn PowerModel>) -> Self {
        *self.slot_mut(kind) = Some(model);
        self
    }

    pub fn with_scaler(mut self, scaler: StandardScaler) -> Self {
        self.scaler = Some(scaler);
        self
    }

    pub fn model(&self, kind: ModelKind) -> Option<&dyn PowerModel> {
        match kind {
            ModelKind::RandomForest => self.random_forest.as_deref(),
            ModelKind::GradientBoosting => self.gradient_boosting.as_deref(),
            ModelKind::XGBoost => self.xgboost.as_deref(),
        }
    }

    /// Resolve a display name to a model that is actually loaded
    pub fn resolve(&self, name: &str) -> Option<ModelKind> {
        ModelKind::from_str(name)
            .ok()
            .filter(|kind| self.model(*kind).is_some())
    }

    pub fn scaler(&self) -> Option<&StandardScaler> {
        self.scaler.as_ref()
    }

    pub fn loaded_models(&self) -> Vec<ModelKind> {
        ModelKind::iter()
            .filter(|kind| self.model(*kind).is_some())
            .collect()
    }

    /// Scale (when a scaler is loaded) and predict with the given model
    pub fn predict(&self, kind: ModelKind, features: &FeatureVector) -> Result<f64> {
        let model = self
            .model(kind)
            .ok_or_else(|| anyhow::anyhow!("model '{}' is not loaded", kind))?;
        inference::predict(model, self.scaler(), features)
    }

    fn slot_mut(&mut self, kind: ModelKind) -> &mut Option<Box<dyn PowerModel>> {
        match kind {
            ModelKind::RandomForest => &mut self.random_forest,
            ModelKind::GradientBoosting => &mut self.gradient_boosting,
            ModelKind::XGBoost => &mut self.xgboost,
        }
    }
}

fn load_boxed<M>(path: &Path) -> Result<Box<dyn PowerModel>, ArtifactError>
where
    M: Artifact + PowerModel + 'static,
{
    artifact::load::<M>(path).map(|m| Box::new(m) as Box<dyn PowerModel>)
}
