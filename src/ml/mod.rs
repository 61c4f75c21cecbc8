//! Inference-side machine learning
//!
//! Everything here consumes artifacts that were trained elsewhere:
//! - `artifact`: bincode persistence of models and the scaler
//! - `models`: the prediction capability and boosted tree ensembles
//! - `forest`: random forest backed by smartcore
//! - `scaler`: pre-fit feature standardization
//! - `registry`: the startup-populated set of loaded artifacts
//! - `inference`: scale-then-predict pipeline

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

pub mod artifact;
pub mod forest;
pub mod inference;
pub mod models;
pub mod registry;
pub mod scaler;

pub use artifact::{Artifact, ArtifactError};
pub use forest::RandomForestModel;
pub use models::{BoostedTrees, PowerModel, RegressionTree, SplitRule, TreeNode};
pub use registry::ModelRegistry;
pub use scaler::StandardScaler;

/// Number of weather features every model consumes
pub const FEATURE_COUNT: usize = 9;

/// Feature names in the order models were trained on
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "distance_to_solar_noon",
    "temperature",
    "wind_direction",
    "wind_speed",
    "sky_cover",
    "visibility",
    "humidity",
    "average_wind_speed",
    "average_pressure",
];

/// The models this service knows how to serve.
///
/// Display names double as the identifiers used in URLs and form posts.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, IntoStaticStr,
)]
pub enum ModelKind {
    #[strum(serialize = "Random Forest")]
    RandomForest,
    #[strum(serialize = "Gradient Boosting")]
    GradientBoosting,
    #[strum(serialize = "XGBoost")]
    XGBoost,
}

impl ModelKind {
    pub fn name(self) -> &'static str {
        self.into()
    }

    /// File name (without directory) of this model's artifact
    pub fn file_stem(self) -> &'static str {
        match self {
            ModelKind::RandomForest => "random_forest",
            ModelKind::GradientBoosting => "gradient_boosting",
            ModelKind::XGBoost => "xgboost",
        }
    }

    pub fn artifact_path(self, dir: &Path) -> PathBuf {
        dir.join(format!("{}.{}", self.file_stem(), artifact::EXTENSION))
    }
}

/// Nine weather features in `FEATURE_NAMES` order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector([f64; FEATURE_COUNT]);

impl FeatureVector {
    pub fn new(values: [f64; FEATURE_COUNT]) -> Self {
        Self(values)
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn values(&self) -> [f64; FEATURE_COUNT] {
        self.0
    }

    /// Value of a named feature
    pub fn get(&self, name: &str) -> Option<f64> {
        FEATURE_NAMES
            .iter()
            .position(|n| *n == name)
            .map(|idx| self.0[idx])
    }
}
