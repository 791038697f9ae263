//! Single-letter frequency statistics and the frequency-seeded initial key.

use crate::alphabet::{self, ALPHABET_LEN};
use crate::error::CbResult;
use crate::key::SubstitutionKey;
use crate::scorer::loader;
use std::collections::HashMap;
use std::path::Path;
use tracing::{info, warn};

/// Expected English letter frequencies (percent), used when no
/// word-frequency corpus is supplied. Indexed by letter ordinal.
const ENGLISH_FREQUENCIES: [f64; ALPHABET_LEN] = [
    8.17,  // A
    1.29,  // B
    2.78,  // C
    4.25,  // D
    12.70, // E
    2.23,  // F
    2.02,  // G
    6.09,  // H
    6.97,  // I
    0.15,  // J
    0.77,  // K
    4.03,  // L
    2.41,  // M
    6.75,  // N
    7.51,  // O
    1.93,  // P
    0.10,  // Q
    5.99,  // R
    6.33,  // S
    9.06,  // T
    2.76,  // U
    0.98,  // V
    2.36,  // W
    0.15,  // X
    1.97,  // Y
    0.07,  // Z
];

/// Reference letter-frequency table, built once and read-only afterwards.
#[derive(Clone, Debug)]
pub struct ReferenceFrequencies {
    /// Percentage per letter ordinal.
    freqs: [f64; ALPHABET_LEN],
    /// Letter ordinals in descending frequency order.
    order: [usize; ALPHABET_LEN],
}

impl ReferenceFrequencies {
    fn from_table(freqs: [f64; ALPHABET_LEN]) -> Self {
        let mut order: [usize; ALPHABET_LEN] = std::array::from_fn(|i| i);
        order.sort_by(|&a, &b| freqs[b].partial_cmp(&freqs[a]).unwrap_or(std::cmp::Ordering::Equal));
        Self { freqs, order }
    }

    /// The built-in English table.
    pub fn english() -> Self {
        Self::from_table(ENGLISH_FREQUENCIES)
    }

    /// Builds the table from a word-frequency CSV (`word,count`).
    pub fn from_word_csv<P: AsRef<Path>>(path: P) -> CbResult<Self> {
        let freqs = loader::load_word_frequency_file(path)?;
        Ok(Self::from_table(freqs))
    }

    /// Loads from a corpus when one is given, otherwise (or on failure)
    /// degrades to the built-in English table. Never fatal.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        match path {
            Some(p) => match Self::from_word_csv(p) {
                Ok(table) => {
                    info!("Reference frequencies loaded from '{}'", p.display());
                    table
                }
                Err(e) => {
                    warn!("{}; falling back to built-in English table", e);
                    Self::english()
                }
            },
            None => Self::english(),
        }
    }

    pub fn frequency(&self, ord: usize) -> f64 {
        self.freqs[ord]
    }

    pub fn frequencies(&self) -> &[f64; ALPHABET_LEN] {
        &self.freqs
    }

    /// Letter ordinals, most frequent first.
    pub fn rank_order(&self) -> &[usize; ALPHABET_LEN] {
        &self.order
    }
}

/// Frequency statistics over raw text plus the greedy initial key guess.
#[derive(Clone, Debug)]
pub struct FrequencyAnalyzer {
    reference: ReferenceFrequencies,
}

impl FrequencyAnalyzer {
    pub fn new(reference: ReferenceFrequencies) -> Self {
        Self { reference }
    }

    pub fn with_english() -> Self {
        Self::new(ReferenceFrequencies::english())
    }

    pub fn reference(&self) -> &ReferenceFrequencies {
        &self.reference
    }

    /// Raw letter counts and the total number of letters.
    pub fn letter_counts(text: &str) -> ([u64; ALPHABET_LEN], u64) {
        let mut counts = [0u64; ALPHABET_LEN];
        let mut total = 0u64;
        for b in text.bytes() {
            if let Some(ord) = alphabet::ordinal(b) {
                counts[ord] += 1;
                total += 1;
            }
        }
        (counts, total)
    }

    /// Relative frequency (percent) of each letter among alphabetic
    /// characters. All zeros when the text has no letters.
    pub fn char_frequencies(&self, text: &str) -> [f64; ALPHABET_LEN] {
        let (counts, total) = Self::letter_counts(text);
        let mut freqs = [0.0f64; ALPHABET_LEN];
        if total == 0 {
            return freqs;
        }
        for (ord, &c) in counts.iter().enumerate() {
            freqs[ord] = c as f64 / total as f64 * 100.0;
        }
        freqs
    }

    /// Index of coincidence: probability that two randomly chosen letters
    /// are identical. ~0.0667 for English, ~0.0385 for uniform random text;
    /// 0.0 when fewer than two letters are present.
    pub fn index_of_coincidence(&self, text: &str) -> f64 {
        let (counts, total) = Self::letter_counts(text);
        if total < 2 {
            return 0.0;
        }
        let n = total as f64;
        let sum: f64 = counts.iter().map(|&c| c as f64 * (c as f64 - 1.0)).sum();
        sum / (n * (n - 1.0))
    }

    /// Chi-squared goodness of fit against the reference distribution,
    /// over letters with nonzero expected frequency. Lower is better.
    pub fn chi_squared(&self, text: &str) -> f64 {
        let observed = self.char_frequencies(text);
        let mut chi = 0.0;
        for ord in 0..ALPHABET_LEN {
            let expected = self.reference.frequency(ord);
            if expected > 0.0 {
                let d = observed[ord] - expected;
                chi += d * d / expected;
            }
        }
        chi
    }

    /// Counts of length-`n` letter sequences in the text (letters only,
    /// uppercased). Bigram/trigram tables for manual inspection.
    pub fn ngram_counts(&self, text: &str, n: usize) -> HashMap<String, u64> {
        let letters = alphabet::letters_only(text);
        let bytes = letters.as_bytes();
        let mut counts = HashMap::new();
        if n == 0 || bytes.len() < n {
            return counts;
        }
        for w in bytes.windows(n) {
            let s = String::from_utf8_lossy(w).into_owned();
            *counts.entry(s).or_insert(0) += 1;
        }
        counts
    }

    /// Greedy frequency-based initial key guess.
    ///
    /// Cipher letters in descending observed frequency are matched to unused
    /// plain letters minimizing `|observed - expected| + 0.5 * |rank_c -
    /// rank_p|`. The rank term keeps two near-identical frequencies from
    /// landing on wildly mismatched corpus ranks. Whatever remains is filled
    /// from the unused plain letters in order, self-mapping as a last
    /// resort, so the result is always a full bijection.
    pub fn initial_mapping(&self, ciphertext: &str) -> SubstitutionKey {
        let observed = self.char_frequencies(ciphertext);

        // Cipher ordinals, most frequent first (ordinal breaks ties).
        let mut cipher_order: Vec<usize> = (0..ALPHABET_LEN).collect();
        cipher_order.sort_by(|&a, &b| {
            observed[b]
                .partial_cmp(&observed[a])
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.cmp(&b))
        });
        let plain_order = self.reference.rank_order();

        let mut forward = [u8::MAX; ALPHABET_LEN];
        let mut plain_used = [false; ALPHABET_LEN];

        for (ci, &cipher) in cipher_order.iter().enumerate() {
            let mut best: Option<(f64, usize)> = None;
            for (pi, &plain) in plain_order.iter().enumerate() {
                if plain_used[plain] {
                    continue;
                }
                let freq_diff = (observed[cipher] - self.reference.frequency(plain)).abs();
                let rank_penalty = (ci as f64 - pi as f64).abs() * 0.5;
                let cost = freq_diff + rank_penalty;
                if best.map_or(true, |(b, _)| cost < b) {
                    best = Some((cost, plain));
                }
            }
            if let Some((_, plain)) = best {
                forward[cipher] = plain as u8;
                plain_used[plain] = true;
            }
        }

        // Leftover fill: unmapped cipher letters take unused plain letters
        // in order, then self-map.
        let mut unused_plain = (0..ALPHABET_LEN).filter(|&p| !plain_used[p]);
        for cipher in 0..ALPHABET_LEN {
            if forward[cipher] == u8::MAX {
                forward[cipher] = unused_plain.next().unwrap_or(cipher) as u8;
            }
        }

        // The greedy pass covers all 26 letters, so this cannot fail.
        SubstitutionKey::from_forward(forward).unwrap_or_else(|_| SubstitutionKey::identity())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frequencies_are_zero_without_letters() {
        let analyzer = FrequencyAnalyzer::with_english();
        let freqs = analyzer.char_frequencies("123 .-!");
        assert!(freqs.iter().all(|&f| f == 0.0));
    }

    #[test]
    fn frequencies_sum_to_hundred() {
        let analyzer = FrequencyAnalyzer::with_english();
        let freqs = analyzer.char_frequencies("The quick brown fox");
        let sum: f64 = freqs.iter().sum();
        assert!((sum - 100.0).abs() < 1e-9);
    }

    #[test]
    fn ic_degenerate_cases() {
        let analyzer = FrequencyAnalyzer::with_english();
        assert_eq!(analyzer.index_of_coincidence(""), 0.0);
        assert_eq!(analyzer.index_of_coincidence("A"), 0.0);
        // Single repeated letter: every pair matches.
        assert!((analyzer.index_of_coincidence("AAAA") - 1.0).abs() < 1e-12);
    }

    #[test]
    fn chi_squared_prefers_english_distribution() {
        let analyzer = FrequencyAnalyzer::with_english();
        let english = "the quick brown fox jumps over the lazy dog and then \
                       settles down beside the river to rest for the evening";
        let skewed = "zzzzqqqqxxxxjjjjzzzzqqqqxxxxjjjj";
        assert!(analyzer.chi_squared(english) < analyzer.chi_squared(skewed));
    }

    #[test]
    fn initial_mapping_is_always_a_bijection() {
        let analyzer = FrequencyAnalyzer::with_english();
        for text in ["", "A", "ABABABAB", "THEQUICKBROWNFOX", "ZZZZZZ"] {
            let key = analyzer.initial_mapping(text);
            let mut seen = [false; ALPHABET_LEN];
            for c in 0..ALPHABET_LEN {
                let p = key.plain_for(c);
                assert!(!seen[p], "duplicate target for text {:?}", text);
                seen[p] = true;
            }
        }
    }

    #[test]
    fn most_frequent_cipher_letter_maps_near_top() {
        let analyzer = FrequencyAnalyzer::with_english();
        // 'X' dominates; it should map to a high-frequency plain letter.
        let key = analyzer.initial_mapping("XXXXXXXXXXXXXXXXXXQWERTY");
        let plain = key.plain_for(23); // ordinal of 'X'
        let rank = analyzer
            .reference()
            .rank_order()
            .iter()
            .position(|&p| p == plain)
            .unwrap();
        assert!(rank < 5, "X mapped to rank {}", rank);
    }

    #[test]
    fn ngram_counts_ignores_non_letters() {
        let analyzer = FrequencyAnalyzer::with_english();
        let counts = analyzer.ngram_counts("th-th", 2);
        assert_eq!(counts.get("TH"), Some(&2));
        assert_eq!(counts.get("HT"), Some(&1));
    }
}
