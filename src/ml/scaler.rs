use super::{artifact::Artifact, FeatureVector, FEATURE_COUNT};
use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Z-score standardization fitted offline: `(x - mean) / scale`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    mean: Vec<f64>,
    scale: Vec<f64>,
}

impl StandardScaler {
    pub fn new(mean: Vec<f64>, scale: Vec<f64>) -> Result<Self> {
        let scaler = Self { mean, scale };
        scaler.validate()?;
        Ok(scaler)
    }

    pub fn transform(&self, features: &FeatureVector) -> FeatureVector {
        let mut out = features.values();
        for (i, value) in out.iter_mut().enumerate() {
            let scale = self.scale[i];
            *value -= self.mean[i];
            // Constant features were fitted with zero variance; leave them centered only
            if scale.abs() > 1e-12 {
                *value /= scale;
            }
        }
        FeatureVector::new(out)
    }
}

impl Artifact for StandardScaler {
    fn validate(&self) -> Result<()> {
        if self.mean.len() != FEATURE_COUNT || self.scale.len() != FEATURE_COUNT {
            anyhow::bail!(
                "scaler expects {} features, got {} means and {} scales",
                FEATURE_COUNT,
                self.mean.len(),
                self.scale.len()
            );
        }
        if self.mean.iter().chain(self.scale.iter()).any(|v| !v.is_finite()) {
            anyhow::bail!("scaler statistics must be finite");
        }
        Ok(())
    }
}
