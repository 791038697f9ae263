//! Corpus file loaders. Malformed records are skipped individually; a file
//! that cannot be opened or yields nothing usable is a hard error.

use crate::alphabet::{self, ALPHABET_LEN};
use crate::error::{CbResult, CipherBreakError};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Parses n-gram count records (`NGRAM COUNT`, whitespace separated).
///
/// Lines with the wrong token count or a non-integer count are skipped, not
/// fatal. No length or alphabet filtering happens here; the scorer decides
/// which sequences it can use.
pub fn load_ngram_records<R: Read>(reader: R) -> CbResult<Vec<(String, u64)>> {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(b' ')
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut records = Vec::new();
    let mut skipped = 0usize;

    for result in rdr.records() {
        let rec = match result {
            Ok(r) => r,
            Err(_) => {
                skipped += 1;
                continue;
            }
        };
        if rec.len() < 2 {
            skipped += 1;
            continue;
        }
        let ngram = rec[0].trim().to_string();
        let count: u64 = match rec[1].trim().parse() {
            Ok(v) => v,
            Err(_) => {
                skipped += 1;
                continue;
            }
        };
        if ngram.is_empty() {
            skipped += 1;
            continue;
        }
        records.push((ngram, count));
    }

    if skipped > 0 {
        debug!("Skipped {} malformed n-gram records", skipped);
    }
    Ok(records)
}

/// Path wrapper around [`load_ngram_records`].
pub fn load_ngram_file<P: AsRef<Path>>(path: P) -> CbResult<Vec<(String, u64)>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| {
        CipherBreakError::Validation(format!(
            "n-gram corpus unavailable at '{}': {}",
            path.display(),
            e
        ))
    })?;
    load_ngram_records(file)
}

/// Builds per-letter percentage frequencies from a word-frequency CSV
/// (`word,count` with a header row).
///
/// Each letter occurrence in a word is weighted by the word's count;
/// non-alphabetic characters inside words are ignored; malformed rows are
/// skipped.
pub fn load_word_frequencies<R: Read>(reader: R) -> CbResult<[f64; ALPHABET_LEN]> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let mut counts = [0u64; ALPHABET_LEN];
    let mut total = 0u64;
    let mut skipped = 0usize;

    for result in rdr.records() {
        let rec = match result {
            Ok(r) => r,
            Err(_) => {
                skipped += 1;
                continue;
            }
        };
        if rec.len() < 2 {
            skipped += 1;
            continue;
        }
        let word = rec[0].trim();
        let count: u64 = match rec[1].trim().parse() {
            Ok(v) => v,
            Err(_) => {
                skipped += 1;
                continue;
            }
        };
        for b in word.bytes() {
            if let Some(ord) = alphabet::ordinal(b) {
                counts[ord] += count;
                total += count;
            }
        }
    }

    if skipped > 0 {
        debug!("Skipped {} malformed word-frequency records", skipped);
    }

    if total == 0 {
        return Err(CipherBreakError::Validation(
            "word-frequency corpus contains no countable letters".to_string(),
        ));
    }

    let mut freqs = [0.0f64; ALPHABET_LEN];
    for (ord, &c) in counts.iter().enumerate() {
        freqs[ord] = c as f64 / total as f64 * 100.0;
    }
    Ok(freqs)
}

/// Path wrapper around [`load_word_frequencies`].
pub fn load_word_frequency_file<P: AsRef<Path>>(path: P) -> CbResult<[f64; ALPHABET_LEN]> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| {
        CipherBreakError::Validation(format!(
            "word-frequency corpus unavailable at '{}': {}",
            path.display(),
            e
        ))
    })?;
    load_word_frequencies(file)
}
