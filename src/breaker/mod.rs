//! Key-space search over the two supported cipher families.
//!
//! Score direction differs per metric: n-gram log probability is maximized,
//! chi-squared is minimized. The two paths keep separate comparisons and the
//! result records which metric produced its score.

pub mod permutation;
pub mod substitution;

use crate::key::{SubstitutionKey, TranspositionKey};
use serde::Serialize;

/// Which objective a result's score belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScoreMetric {
    /// Summed n-gram log10 probability; higher is better.
    NgramLogProb,
    /// Chi-squared distance from the reference distribution; lower is better.
    ChiSquared,
}

#[derive(Debug, Clone, Serialize)]
pub struct SubstitutionBreak {
    pub plaintext: String,
    pub key: SubstitutionKey,
    pub score: f64,
    pub metric: ScoreMetric,
}

#[derive(Debug, Clone, Serialize)]
pub struct TranspositionBreak {
    pub plaintext: String,
    pub key: TranspositionKey,
    pub score: f64,
    pub metric: ScoreMetric,
}
