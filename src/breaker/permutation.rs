//! Columnar transposition breaking: exhaustive search for small key
//! lengths, simulated annealing with independent runs otherwise.

use super::{ScoreMetric, TranspositionBreak};
use crate::alphabet;
use crate::config::PermutationParams;
use crate::error::{CbResult, CipherBreakError};
use crate::key::TranspositionKey;
use crate::scorer::NgramScorer;
use itertools::Itertools;
use rayon::prelude::*;
use std::sync::Arc;
use tracing::{debug, info};

/// Metropolis acceptance divides by the temperature; the cooling schedule
/// must never drive it to zero.
const MIN_TEMP: f64 = 1e-9;

pub struct PermutationBreaker {
    scorer: Arc<NgramScorer>,
    params: PermutationParams,
}

impl PermutationBreaker {
    pub fn new(scorer: Arc<NgramScorer>, params: PermutationParams) -> Self {
        Self { scorer, params }
    }

    /// Recovers column order for a known key length.
    ///
    /// Key lengths up to the exhaustive limit try all `k!` permutations;
    /// longer keys run independent simulated-annealing searches in parallel.
    /// Requesting a nonsensical key length is a caller error.
    pub fn break_cipher(
        &self,
        ciphertext: &str,
        key_length: usize,
        seed: Option<u64>,
    ) -> CbResult<TranspositionBreak> {
        let clean = alphabet::normalize(ciphertext);
        if key_length == 0 {
            return Err(CipherBreakError::Validation(
                "transposition key length must be positive".to_string(),
            ));
        }
        if key_length > clean.len() {
            return Err(CipherBreakError::Validation(format!(
                "key length {} exceeds ciphertext length {}",
                key_length,
                clean.len()
            )));
        }

        // A single column has only one order; annealing's pair swap needs
        // at least two positions.
        let result = if key_length == 1 || key_length <= self.params.exhaustive_limit {
            debug!("Exhaustive search over {}! permutations", key_length);
            self.exhaustive(&clean, key_length)
        } else {
            debug!(
                "Simulated annealing, {} runs of {} iterations",
                self.params.anneal_runs, self.params.anneal_iterations
            );
            self.annealed(&clean, key_length, seed)
        };

        info!(
            "Transposition search finished: key {} score {:.2}",
            result.key, result.score
        );
        Ok(result)
    }

    /// Tries every permutation of `0..k`; strict maximum wins, so the first
    /// permutation reaching the top score is kept on ties.
    fn exhaustive(&self, ciphertext: &str, k: usize) -> TranspositionBreak {
        let mut best: Option<TranspositionBreak> = None;
        for ranks in (0..k).permutations(k) {
            let key = TranspositionKey::from_permutation(ranks);
            let plaintext = key.decrypt(ciphertext);
            let score = self.scorer.score(&plaintext);
            if best.as_ref().map_or(true, |b| score > b.score) {
                best = Some(TranspositionBreak {
                    plaintext,
                    key,
                    score,
                    metric: ScoreMetric::NgramLogProb,
                });
            }
        }
        // k >= 1 guarantees at least one permutation.
        best.unwrap_or_else(|| unreachable!("empty permutation space"))
    }

    fn annealed(&self, ciphertext: &str, k: usize, seed: Option<u64>) -> TranspositionBreak {
        let runs = self.params.anneal_runs.max(1);
        (0..runs)
            .into_par_iter()
            .map(|i| {
                let mut rng = match seed {
                    Some(s) => fastrand::Rng::with_seed(s.wrapping_add(i as u64)),
                    None => fastrand::Rng::new(),
                };
                self.anneal_run(ciphertext, k, &mut rng)
            })
            .reduce_with(|a, b| if b.score > a.score { b } else { a })
            .unwrap_or_else(|| unreachable!("at least one annealing run"))
    }

    /// One annealing run: random start, random pair swaps, Metropolis
    /// acceptance `exp(delta / temp)`, geometric cooling per iteration.
    /// Best key/text/score are tracked independently of the wandering
    /// current state.
    fn anneal_run(
        &self,
        ciphertext: &str,
        k: usize,
        rng: &mut fastrand::Rng,
    ) -> TranspositionBreak {
        let mut key = TranspositionKey::random(k, rng);
        let mut best_key = key.clone();
        let mut best_text = key.decrypt(ciphertext);
        let mut best_score = self.scorer.score(&best_text);
        let mut current_score = best_score;
        let mut temp = self.params.anneal_temp.max(MIN_TEMP);

        for _ in 0..self.params.anneal_iterations {
            let i = rng.usize(0..k);
            let mut j = rng.usize(0..k - 1);
            if j >= i {
                j += 1;
            }

            key.swap(i, j);
            let text = key.decrypt(ciphertext);
            let score = self.scorer.score(&text);
            let delta = score - current_score;

            if delta > 0.0 || rng.f64() < (delta / temp).exp() {
                current_score = score;
                if score > best_score {
                    best_score = score;
                    best_key = key.clone();
                    best_text = text;
                }
            } else {
                key.swap(i, j);
            }

            temp = (temp * self.params.anneal_cooling).max(MIN_TEMP);
        }

        TranspositionBreak {
            plaintext: best_text,
            key: best_key,
            score: best_score,
            metric: ScoreMetric::NgramLogProb,
        }
    }
}
