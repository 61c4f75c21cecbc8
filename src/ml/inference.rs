//! Scale-then-predict pipeline
//!
//! When no scaler was loaded the raw features go straight to the model. This
//! degraded mode is intentional: a missing scaler must not take every model
//! offline.

use super::{FeatureVector, PowerModel, StandardScaler};
use anyhow::Result;
use tracing::debug;

/// Predict power output for a single feature vector.
pub fn predict(
    model: &dyn PowerModel,
    scaler: Option<&StandardScaler>,
    features: &FeatureVector,
) -> Result<f64> {
    let input = match scaler {
        Some(scaler) => scaler.transform(features),
        None => *features,
    };

    let predictions = model.predict(std::slice::from_ref(&input))?;
    let value = predictions
        .first()
        .copied()
        .ok_or_else(|| anyhow::anyhow!("model returned no prediction"))?;

    debug!(scaled = scaler.is_some(), value, "prediction complete");
    Ok(value)
}
