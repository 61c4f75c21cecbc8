//! SmartCore RandomForest wrapper
//!
//! The artifact file is the bincode encoding of the smartcore regressor
//! itself, so anything produced with `bincode::serialize(&regressor)` loads
//! here unchanged.
//!
//! smartcore does not expose how many features a forest was fitted on, and a
//! forest fitted on more than `FEATURE_COUNT` panics when scoring a narrower
//! matrix. Validation therefore scores one zero row at load time and rejects
//! the artifact if that panics.

use super::{artifact::Artifact, models::PowerModel, FeatureVector, FEATURE_COUNT};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::panic::{self, AssertUnwindSafe};

use smartcore::ensemble::random_forest_regressor::RandomForestRegressor;
use smartcore::linalg::basic::matrix::DenseMatrix;

pub type ForestRegressor = RandomForestRegressor<f64, f64, DenseMatrix<f64>, Vec<f64>>;

#[derive(Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RandomForestModel {
    model: ForestRegressor,
}

impl RandomForestModel {
    pub fn new(model: ForestRegressor) -> Self {
        Self { model }
    }
}

impl Artifact for RandomForestModel {
    fn validate(&self) -> Result<()> {
        let row = [FeatureVector::new([0.0; FEATURE_COUNT])];
        match panic::catch_unwind(AssertUnwindSafe(|| self.predict(&row))) {
            Ok(Ok(preds)) if preds.len() == 1 => Ok(()),
            Ok(Ok(preds)) => anyhow::bail!(
                "forest returned {} predictions for a single row",
                preds.len()
            ),
            Ok(Err(e)) => Err(e),
            Err(_) => anyhow::bail!(
                "forest cannot score {} features, it was fitted on a different feature set",
                FEATURE_COUNT
            ),
        }
    }
}

impl PowerModel for RandomForestModel {
    fn predict(&self, rows: &[FeatureVector]) -> Result<Vec<f64>> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        // Row-major matrix, one row per feature vector
        let mut flat = Vec::with_capacity(rows.len() * FEATURE_COUNT);
        for row in rows {
            flat.extend_from_slice(row.as_slice());
        }
        let x = DenseMatrix::new(rows.len(), FEATURE_COUNT, flat, false);

        self.model
            .predict(&x)
            .map_err(|e| anyhow::anyhow!("RandomForest prediction failed: {:?}", e))
    }
}
