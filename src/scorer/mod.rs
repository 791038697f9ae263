//! N-gram log-probability scoring of candidate plaintexts.

pub mod loader;

use crate::alphabet;
use crate::error::{CbResult, CipherBreakError};
use fnv::FnvHashMap;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

/// Base-27 digit for a byte: letters map to 0..26, anything else to the
/// sentinel digit 26. Table entries only ever contain letter digits, so a
/// window holding punctuation can never match and falls to the floor.
#[inline]
fn digit(b: u8) -> u64 {
    alphabet::ordinal(b).map(|o| o as u64).unwrap_or(26)
}

#[inline]
fn pack(window: &[u8]) -> u64 {
    window.iter().fold(0u64, |acc, &b| acc * 27 + digit(b))
}

// 27^12 < 2^62, so windows up to 12 letters pack into a u64.
const MAX_NGRAM_LEN: usize = 12;

/// Scores text by summed log10 probabilities of its overlapping n-grams.
///
/// The table is built once from corpus counts and is read-only afterwards;
/// sharing it across search workers via `Arc` needs no locking. Higher
/// score means more English-like.
pub struct NgramScorer {
    n: usize,
    table: FnvHashMap<u64, f64>,
    floor: f64,
}

impl NgramScorer {
    /// Builds the scorer from `(sequence, count)` records.
    ///
    /// Sequences whose length differs from `n` or that contain non-letters
    /// are ignored. Fails when nothing usable remains: there is no default
    /// quadgram table to fall back to.
    pub fn new(records: &[(String, u64)], n: usize) -> CbResult<Self> {
        if n == 0 || n > MAX_NGRAM_LEN {
            return Err(CipherBreakError::Config(format!(
                "n-gram length must be in 1..={}, got {}",
                MAX_NGRAM_LEN, n
            )));
        }

        let mut counts: FnvHashMap<u64, u64> = FnvHashMap::default();
        let mut total: u64 = 0;
        let mut rejected = 0usize;

        for (seq, count) in records {
            let bytes = seq.as_bytes();
            if *count == 0
                || bytes.len() != n
                || !bytes.iter().all(|&b| alphabet::ordinal(b).is_some())
            {
                rejected += 1;
                continue;
            }
            let code = pack(&seq.to_ascii_uppercase().into_bytes());
            *counts.entry(code).or_default() += count;
            total += count;
        }

        if rejected > 0 {
            debug!("Ignored {} corpus sequences of the wrong shape", rejected);
        }

        if counts.is_empty() || total == 0 {
            return Err(CipherBreakError::Validation(format!(
                "n-gram corpus unavailable: no usable {}-grams with nonzero counts",
                n
            )));
        }

        let total_f = total as f64;
        let table: FnvHashMap<u64, f64> = counts
            .into_iter()
            .map(|(code, c)| (code, (c as f64 / total_f).log10()))
            .collect();
        let floor = (0.01 / total_f).log10();

        info!(
            "N-gram table ready: {} distinct {}-grams, {} total occurrences",
            table.len(),
            n,
            total
        );

        Ok(Self { n, table, floor })
    }

    /// Builds the scorer from a corpus stream of `NGRAM COUNT` lines.
    pub fn from_reader<R: Read>(reader: R, n: usize) -> CbResult<Self> {
        let records = loader::load_ngram_records(reader)?;
        Self::new(&records, n)
    }

    /// Builds the scorer from a corpus file on disk.
    pub fn from_path<P: AsRef<Path>>(path: P, n: usize) -> CbResult<Self> {
        let records = loader::load_ngram_file(path)?;
        Self::new(&records, n)
    }

    pub fn n(&self) -> usize {
        self.n
    }

    /// Log10 probability assigned to sequences absent from the table.
    pub fn floor(&self) -> f64 {
        self.floor
    }

    /// Sum of table log-probabilities (or the floor) over every overlapping
    /// window of length `n`, after uppercasing and stripping spaces/newlines.
    /// Texts shorter than `n` have no windows and score 0.0.
    pub fn score(&self, text: &str) -> f64 {
        let normalized = alphabet::normalize(text);
        let bytes = normalized.as_bytes();
        if bytes.len() < self.n {
            return 0.0;
        }
        bytes
            .windows(self.n)
            .map(|w| self.table.get(&pack(w)).copied().unwrap_or(self.floor))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scorer() -> NgramScorer {
        let records = vec![
            ("TION".to_string(), 90u64),
            ("HELL".to_string(), 10u64),
        ];
        NgramScorer::new(&records, 4).unwrap()
    }

    #[test]
    fn score_is_sum_of_window_lookups() {
        let s = scorer();
        // "HELLO": windows HELL, ELLO
        let expected = (10.0f64 / 100.0).log10() + s.floor();
        assert!((s.score("HELLO") - expected).abs() < 1e-12);
    }

    #[test]
    fn normalization_strips_spaces_and_newlines() {
        let s = scorer();
        assert_eq!(s.score("he l\nlo"), s.score("HELLO"));
    }

    #[test]
    fn punctuation_pollutes_windows() {
        let s = scorer();
        // "HE.LL" has no clean window, both windows hit the floor.
        assert!((s.score("HE.LL") - 2.0 * s.floor()).abs() < 1e-12);
    }

    #[test]
    fn short_text_scores_zero() {
        let s = scorer();
        assert_eq!(s.score(""), 0.0);
        assert_eq!(s.score("abc"), 0.0);
    }

    #[test]
    fn empty_corpus_is_rejected() {
        assert!(NgramScorer::new(&[], 4).is_err());
        let zero = vec![("TION".to_string(), 0u64)];
        assert!(NgramScorer::new(&zero, 4).is_err());
    }

    #[test]
    fn wrong_length_sequences_are_ignored() {
        let records = vec![
            ("TION".to_string(), 50u64),
            ("TH".to_string(), 50u64),
            ("T1ON".to_string(), 50u64),
        ];
        let s = NgramScorer::new(&records, 4).unwrap();
        // Only TION counts, so total is 50 and TION scores log10(1.0).
        assert!((s.score("TION") - 0.0).abs() < 1e-12);
    }
}
