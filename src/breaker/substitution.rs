//! Monoalphabetic substitution breaking: frequency-seeded soft hill
//! climbing with random restarts, plus a fast chi-squared-only mode.

use super::{ScoreMetric, SubstitutionBreak};
use crate::alphabet::ALPHABET_LEN;
use crate::analysis::FrequencyAnalyzer;
use crate::config::SubstitutionParams;
use crate::key::SubstitutionKey;
use crate::scorer::NgramScorer;
use rayon::prelude::*;
use std::sync::Arc;
use tracing::{debug, info};

/// Swaps eligible in the chi-squared-only mode: the most frequent cipher
/// letters carry nearly all of the distribution's weight.
const CHI_TOP_LETTERS: usize = 15;
const CHI_ITERATIONS: usize = 100;

pub struct SubstitutionBreaker {
    scorer: Arc<NgramScorer>,
    analyzer: FrequencyAnalyzer,
    params: SubstitutionParams,
}

impl SubstitutionBreaker {
    pub fn new(
        scorer: Arc<NgramScorer>,
        analyzer: FrequencyAnalyzer,
        params: SubstitutionParams,
    ) -> Self {
        Self {
            scorer,
            analyzer,
            params,
        }
    }

    /// Full search: one frequency-seeded start plus `restarts - 1` random
    /// starts, each soft hill climbed; the best n-gram score wins.
    ///
    /// Restarts are independent and share only the read-only scorer, so they
    /// run as a rayon fork-join. Ties keep the earlier restart's result.
    pub fn break_cipher(&self, ciphertext: &str, seed: Option<u64>) -> SubstitutionBreak {
        let distinct = Self::distinct_letters(ciphertext);
        if distinct == 0 {
            // No letters at all: uninformative, not an error.
            let key = SubstitutionKey::identity();
            let plaintext = key.decrypt(ciphertext);
            let score = self.scorer.score(&plaintext);
            return SubstitutionBreak {
                plaintext,
                key,
                score,
                metric: ScoreMetric::NgramLogProb,
            };
        }

        // A frequency seed needs at least two distinct letters to say
        // anything; below that, every start is random.
        let frequency_seed = if distinct >= 2 {
            Some(self.analyzer.initial_mapping(ciphertext))
        } else {
            debug!("Fewer than 2 distinct letters; random seeding only");
            None
        };

        let restarts = self.params.restarts.max(1);
        let best = (0..restarts)
            .into_par_iter()
            .map(|i| {
                let mut rng = match seed {
                    Some(s) => fastrand::Rng::with_seed(s.wrapping_add(i as u64)),
                    None => fastrand::Rng::new(),
                };
                let initial = match (&frequency_seed, i) {
                    (Some(key), 0) => key.clone(),
                    _ => SubstitutionKey::random(&mut rng),
                };
                self.hill_climb(ciphertext, initial, &mut rng)
            })
            .reduce_with(|a, b| if b.2 > a.2 { b } else { a })
            .map(|(key, plaintext, score)| SubstitutionBreak {
                plaintext,
                key,
                score,
                metric: ScoreMetric::NgramLogProb,
            })
            .unwrap_or_else(|| {
                let key = SubstitutionKey::identity();
                let plaintext = key.decrypt(ciphertext);
                let score = self.scorer.score(&plaintext);
                SubstitutionBreak {
                    plaintext,
                    key,
                    score,
                    metric: ScoreMetric::NgramLogProb,
                }
            });

        info!(
            "Substitution search finished: score {:.2} over {} restarts",
            best.score, restarts
        );
        best
    }

    /// Quick approximate mode: frequency seed, then a handful of swaps among
    /// the most frequent cipher letters, accepted only when they strictly
    /// lower chi-squared. Returns the chi-squared value as the score (lower
    /// is better, the opposite direction from the n-gram path).
    pub fn break_frequency_only(&self, ciphertext: &str, seed: Option<u64>) -> SubstitutionBreak {
        let mut rng = match seed {
            Some(s) => fastrand::Rng::with_seed(s),
            None => fastrand::Rng::new(),
        };

        let mut best_key = self.analyzer.initial_mapping(ciphertext);
        let mut best_text = best_key.decrypt(ciphertext);
        let mut best_chi = self.analyzer.chi_squared(&best_text);

        // Cipher ordinals by observed frequency, descending.
        let observed = self.analyzer.char_frequencies(ciphertext);
        let mut order: Vec<usize> = (0..ALPHABET_LEN).collect();
        order.sort_by(|&a, &b| {
            observed[b]
                .partial_cmp(&observed[a])
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        for _ in 0..CHI_ITERATIONS {
            let i = rng.usize(0..CHI_TOP_LETTERS);
            let j = rng.usize(0..CHI_TOP_LETTERS);
            if i == j {
                continue;
            }
            let mut candidate = best_key.clone();
            candidate.swap(order[i], order[j]);
            let text = candidate.decrypt(ciphertext);
            let chi = self.analyzer.chi_squared(&text);
            if chi < best_chi {
                best_chi = chi;
                best_key = candidate;
                best_text = text;
            }
        }

        SubstitutionBreak {
            plaintext: best_text,
            key: best_key,
            score: best_chi,
            metric: ScoreMetric::ChiSquared,
        }
    }

    /// Soft hill climbing from one starting key.
    ///
    /// Improving neighbors are always taken. Non-improving neighbors are
    /// taken with a probability that decays multiplicatively each time it
    /// fires (or never, when soft climbing is off). The best key seen is
    /// tracked separately from the current position: the current key may
    /// wander to worse states, the best never regresses. A plateau of
    /// `max_iterations / 10` stale iterations forces a random swap and
    /// resets the acceptance probability to half its initial value.
    fn hill_climb(
        &self,
        ciphertext: &str,
        initial: SubstitutionKey,
        rng: &mut fastrand::Rng,
    ) -> (SubstitutionKey, String, f64) {
        let soft = self.params.soft_climbing();

        let mut current_key = initial;
        let mut current_text = current_key.decrypt(ciphertext);
        let mut current_score = self.scorer.score(&current_text);

        let mut best_key = current_key.clone();
        let mut best_text = current_text.clone();
        let mut best_score = current_score;

        let max_stall = (self.params.max_iterations / 10).max(1);
        let mut stall = 0usize;
        let mut acceptance = if soft { self.params.acceptance_prob } else { 0.0 };

        for _ in 0..self.params.max_iterations {
            let (a, b) = random_pair(rng);
            let mut neighbor = current_key.clone();
            neighbor.swap(a, b);
            let text = neighbor.decrypt(ciphertext);
            let score = self.scorer.score(&text);

            if score > current_score {
                current_key = neighbor;
                current_text = text;
                current_score = score;
                stall = 0;
            } else if soft && acceptance > 0.0 && rng.f64() < acceptance {
                current_key = neighbor;
                current_text = text;
                current_score = score;
                stall = 0;
                acceptance *= self.params.cooling_rate;
            } else {
                stall += 1;
            }

            if current_score > best_score {
                best_key = current_key.clone();
                best_text = current_text.clone();
                best_score = current_score;
            }

            if stall > max_stall {
                // Plateau escape: jump regardless of score.
                let (a, b) = random_pair(rng);
                current_key.swap(a, b);
                current_text = current_key.decrypt(ciphertext);
                current_score = self.scorer.score(&current_text);
                stall = 0;
                if soft {
                    acceptance = self.params.acceptance_prob * 0.5;
                }
                if current_score > best_score {
                    best_key = current_key.clone();
                    best_text = current_text.clone();
                    best_score = current_score;
                }
            }
        }

        (best_key, best_text, best_score)
    }

    fn distinct_letters(text: &str) -> usize {
        let (counts, _) = FrequencyAnalyzer::letter_counts(text);
        counts.iter().filter(|&&c| c > 0).count()
    }
}

/// Two distinct letter ordinals, uniformly at random.
fn random_pair(rng: &mut fastrand::Rng) -> (usize, usize) {
    let a = rng.usize(0..ALPHABET_LEN);
    let mut b = rng.usize(0..ALPHABET_LEN - 1);
    if b >= a {
        b += 1;
    }
    (a, b)
}
