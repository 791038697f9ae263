use cipherbreak::alphabet::{letter, ALPHABET_LEN};
use cipherbreak::analysis::{FrequencyAnalyzer, ReferenceFrequencies};
use std::io::Write;
use tempfile::NamedTempFile;

mod common;

#[test]
fn english_reference_puts_e_first() {
    let reference = ReferenceFrequencies::english();
    assert_eq!(reference.rank_order()[0], (b'E' - b'A') as usize);
    assert!((reference.frequency((b'E' - b'A') as usize) - 12.70).abs() < 1e-9);
    assert!((reference.frequency((b'Z' - b'A') as usize) - 0.07).abs() < 1e-9);
}

#[test]
fn reference_from_word_csv() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "word,count").unwrap();
    writeln!(file, "eee,10").unwrap();
    writeln!(file, "t,5").unwrap();

    let reference = ReferenceFrequencies::from_word_csv(file.path()).unwrap();
    // 30 e's vs 5 t's.
    assert_eq!(reference.rank_order()[0], (b'E' - b'A') as usize);
    assert!((reference.frequency((b'E' - b'A') as usize) - 30.0 / 35.0 * 100.0).abs() < 1e-9);
}

#[test]
fn reference_falls_back_when_corpus_missing() {
    let reference = ReferenceFrequencies::load_or_default(Some(std::path::Path::new(
        "does/not/exist.csv",
    )));
    assert_eq!(reference.rank_order()[0], (b'E' - b'A') as usize);
}

#[test]
fn ic_of_uniform_random_text_is_near_one_over_26() {
    let mut rng = fastrand::Rng::with_seed(1234);
    let text: String = (0..10_000)
        .map(|_| letter(rng.usize(0..ALPHABET_LEN)) as char)
        .collect();

    let analyzer = FrequencyAnalyzer::with_english();
    let ic = analyzer.index_of_coincidence(&text);
    assert!(
        (ic - 1.0 / 26.0).abs() < 0.003,
        "uniform-random IC was {}",
        ic
    );
}

#[test]
fn ic_separates_english_from_random() {
    let analyzer = FrequencyAnalyzer::with_english();
    let english_ic = analyzer.index_of_coincidence(common::PASSAGE);
    assert!(
        english_ic > 0.055 && english_ic < 0.085,
        "English IC was {}",
        english_ic
    );

    let mut rng = fastrand::Rng::with_seed(99);
    let random_text: String = (0..common::PASSAGE.len())
        .map(|_| letter(rng.usize(0..ALPHABET_LEN)) as char)
        .collect();
    let random_ic = analyzer.index_of_coincidence(&random_text);
    assert!(
        english_ic - random_ic > 0.015,
        "IC failed to separate: english {} vs random {}",
        english_ic,
        random_ic
    );
}

#[test]
fn ic_is_scale_free() {
    let analyzer = FrequencyAnalyzer::with_english();
    // Case and punctuation must not matter.
    let a = analyzer.index_of_coincidence("Attack at dawn!");
    let b = analyzer.index_of_coincidence("ATTACKATDAWN");
    assert!((a - b).abs() < 1e-12);
}

#[test]
fn chi_squared_is_zero_for_exact_reference_match() {
    // A reference built from the text itself gives chi-squared ~0.
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "word,count").unwrap();
    writeln!(file, "aab,1").unwrap();
    let reference = ReferenceFrequencies::from_word_csv(file.path()).unwrap();
    let analyzer = FrequencyAnalyzer::new(reference);
    assert!(analyzer.chi_squared("AAB") < 1e-9);
}

#[test]
fn initial_mapping_full_bijection_on_narrow_ciphertext() {
    let analyzer = FrequencyAnalyzer::with_english();
    // Only three distinct letters, still must produce a full bijection.
    let key = analyzer.initial_mapping("XYZXYZXYZXXX");
    let mut seen = [false; ALPHABET_LEN];
    for c in 0..ALPHABET_LEN {
        let p = key.plain_for(c);
        assert!(!seen[p]);
        seen[p] = true;
    }
}
