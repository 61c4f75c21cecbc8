//! Prediction capability and boosted tree ensembles
//!
//! Gradient Boosting and XGBoost artifacts share one representation: an
//! additive ensemble of flat regression trees. The two differ only in which
//! side of a split receives values equal to the threshold.

use super::{artifact::Artifact, FeatureVector, FEATURE_COUNT};
use anyhow::Result;
use serde::{Deserialize, Serialize};

/// A loaded model that maps feature rows to power output.
pub trait PowerModel: Send + Sync {
    /// One prediction per input row, in input order
    fn predict(&self, rows: &[FeatureVector]) -> Result<Vec<f64>>;
}

/// Which branch a value equal to the split threshold follows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SplitRule {
    /// `x <= threshold` goes left (scikit-learn trees)
    LessOrEqual,
    /// `x < threshold` goes left (XGBoost trees)
    Less,
}

impl SplitRule {
    fn goes_left(self, value: f64, threshold: f64) -> bool {
        match self {
            SplitRule::LessOrEqual => value <= threshold,
            SplitRule::Less => value < threshold,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TreeNode {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        value: f64,
    },
}

/// Regression tree stored as a node array rooted at index 0
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionTree {
    pub nodes: Vec<TreeNode>,
}

impl RegressionTree {
    pub fn new(nodes: Vec<TreeNode>) -> Self {
        Self { nodes }
    }

    /// Children must point strictly forward, so traversal always terminates.
    pub fn validate(&self) -> Result<()> {
        if self.nodes.is_empty() {
            anyhow::bail!("tree has no nodes");
        }

        for (idx, node) in self.nodes.iter().enumerate() {
            if let TreeNode::Split {
                feature,
                threshold,
                left,
                right,
            } = node
            {
                if *feature >= FEATURE_COUNT {
                    anyhow::bail!(
                        "node {} splits on feature {} but only {} features exist",
                        idx,
                        feature,
                        FEATURE_COUNT
                    );
                }
                if threshold.is_nan() {
                    anyhow::bail!("node {} has a NaN threshold", idx);
                }
                for child in [*left, *right] {
                    if child <= idx || child >= self.nodes.len() {
                        anyhow::bail!("node {} has invalid child index {}", idx, child);
                    }
                }
            }
        }

        Ok(())
    }

    pub fn evaluate(&self, features: &[f64], rule: SplitRule) -> Result<f64> {
        let mut idx = 0;
        loop {
            match self.nodes.get(idx) {
                Some(TreeNode::Leaf { value }) => return Ok(*value),
                Some(TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                }) => {
                    let value = features.get(*feature).copied().ok_or_else(|| {
                        anyhow::anyhow!("feature index {} out of range", feature)
                    })?;
                    idx = if rule.goes_left(value, *threshold) {
                        *left
                    } else {
                        *right
                    };
                }
                None => anyhow::bail!("node index {} out of range", idx),
            }
        }
    }
}

/// Additive ensemble: `base_score + learning_rate * sum(tree(x))`.
///
/// XGBoost bakes its learning rate into leaf values, so its artifacts carry
/// `learning_rate = 1.0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoostedTrees {
    pub base_score: f64,
    pub learning_rate: f64,
    pub split_rule: SplitRule,
    pub trees: Vec<RegressionTree>,
}

impl BoostedTrees {
    pub fn new(
        base_score: f64,
        learning_rate: f64,
        split_rule: SplitRule,
        trees: Vec<RegressionTree>,
    ) -> Self {
        Self {
            base_score,
            learning_rate,
            split_rule,
            trees,
        }
    }

    pub fn predict_one(&self, features: &FeatureVector) -> Result<f64> {
        let mut sum = 0.0;
        for tree in &self.trees {
            sum += tree.evaluate(features.as_slice(), self.split_rule)?;
        }
        Ok(self.base_score + self.learning_rate * sum)
    }
}

impl Artifact for BoostedTrees {
    fn validate(&self) -> Result<()> {
        if !self.base_score.is_finite() || !self.learning_rate.is_finite() {
            anyhow::bail!("base score and learning rate must be finite");
        }
        for (i, tree) in self.trees.iter().enumerate() {
            tree.validate()
                .map_err(|e| anyhow::anyhow!("tree {}: {}", i, e))?;
        }
        Ok(())
    }
}

impl PowerModel for BoostedTrees {
    fn predict(&self, rows: &[FeatureVector]) -> Result<Vec<f64>> {
        rows.iter().map(|row| self.predict_one(row)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// temperature <= 50 -> 1.0, otherwise humidity split
    fn stump_pair() -> RegressionTree {
        RegressionTree::new(vec![
            TreeNode::Split {
                feature: 1,
                threshold: 50.0,
                left: 1,
                right: 2,
            },
            TreeNode::Leaf { value: 1.0 },
            TreeNode::Split {
                feature: 6,
                threshold: 40.0,
                left: 3,
                right: 4,
            },
            TreeNode::Leaf { value: 4.0 },
            TreeNode::Leaf { value: -2.0 },
        ])
    }

    fn features(temperature: f64, humidity: f64) -> FeatureVector {
        FeatureVector::new([0.1, temperature, 180.0, 5.0, 2.0, 10.0, humidity, 4.5, 30.0])
    }

    #[test]
    fn test_tree_traversal() {
        let tree = stump_pair();
        let rule = SplitRule::LessOrEqual;
        assert_eq!(tree.evaluate(features(20.0, 0.0).as_slice(), rule).unwrap(), 1.0);
        assert_eq!(tree.evaluate(features(70.0, 30.0).as_slice(), rule).unwrap(), 4.0);
        assert_eq!(tree.evaluate(features(70.0, 90.0).as_slice(), rule).unwrap(), -2.0);
    }

    #[test]
    fn test_split_rule_on_threshold() {
        let tree = stump_pair();
        let at_threshold = features(50.0, 90.0);
        assert_eq!(
            tree.evaluate(at_threshold.as_slice(), SplitRule::LessOrEqual).unwrap(),
            1.0
        );
        assert_eq!(
            tree.evaluate(at_threshold.as_slice(), SplitRule::Less).unwrap(),
            -2.0
        );
    }

    #[test]
    fn test_ensemble_prediction() {
        let model = BoostedTrees::new(
            10.0,
            0.5,
            SplitRule::LessOrEqual,
            vec![stump_pair(), stump_pair()],
        );
        // 10 + 0.5 * (4 + 4)
        let preds = model.predict(&[features(70.0, 30.0)]).unwrap();
        assert_eq!(preds, vec![14.0]);
    }

    #[test]
    fn test_empty_ensemble_predicts_base_score() {
        let model = BoostedTrees::new(3.25, 0.1, SplitRule::Less, vec![]);
        assert!(model.validate().is_ok());
        assert_eq!(model.predict_one(&features(0.0, 0.0)).unwrap(), 3.25);
    }

    #[test]
    fn test_validation_rejects_backward_child() {
        let tree = RegressionTree::new(vec![
            TreeNode::Leaf { value: 0.0 },
            TreeNode::Split {
                feature: 0,
                threshold: 1.0,
                left: 0,
                right: 2,
            },
            TreeNode::Leaf { value: 1.0 },
        ]);
        let err = tree.validate().unwrap_err();
        assert!(err.to_string().contains("invalid child index 0"));
    }

    #[test]
    fn test_validation_rejects_out_of_range_child() {
        let tree = RegressionTree::new(vec![
            TreeNode::Split {
                feature: 0,
                threshold: 1.0,
                left: 1,
                right: 7,
            },
            TreeNode::Leaf { value: 1.0 },
        ]);
        assert!(tree.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_unknown_feature() {
        let model = BoostedTrees::new(
            0.0,
            1.0,
            SplitRule::Less,
            vec![RegressionTree::new(vec![
                TreeNode::Split {
                    feature: FEATURE_COUNT,
                    threshold: 1.0,
                    left: 1,
                    right: 2,
                },
                TreeNode::Leaf { value: 1.0 },
                TreeNode::Leaf { value: 2.0 },
            ])],
        );
        let err = model.validate().unwrap_err();
        assert!(err.to_string().starts_with("tree 0:"));
    }

    #[test]
    fn test_validation_rejects_empty_tree() {
        assert!(RegressionTree::new(vec![]).validate().is_err());
    }
}
