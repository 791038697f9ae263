use cipherbreak::analysis::FrequencyAnalyzer;
use cipherbreak::breaker::{ScoreMetric, SubstitutionBreak, TranspositionBreak};
use cipherbreak::key::SubstitutionKey;
use comfy_table::presets::ASCII_FULL;
use comfy_table::{Cell, CellAlignment, Table};
use std::path::Path;

fn preview(text: &str) -> String {
    if text.chars().count() > 60 {
        format!("{}...", text.chars().take(60).collect::<String>())
    } else {
        text.to_string()
    }
}

fn metric_label(metric: ScoreMetric) -> &'static str {
    match metric {
        ScoreMetric::NgramLogProb => "n-gram log10 prob (higher is better)",
        ScoreMetric::ChiSquared => "chi-squared (lower is better)",
    }
}

/// Cipher -> plain correspondence, two pairs per row to stay narrow.
pub fn mapping_table(key: &SubstitutionKey) -> Table {
    let mut table = Table::new();
    table.load_preset(ASCII_FULL);
    table.set_header(vec!["Cipher", "Plain", "Cipher", "Plain"]);

    let pairs: Vec<(char, char)> = key.pairs().collect();
    for chunk in pairs.chunks(2) {
        let mut cells = Vec::with_capacity(4);
        for (cipher, plain) in chunk {
            cells.push(Cell::new(cipher).set_alignment(CellAlignment::Center));
            cells.push(Cell::new(plain).set_alignment(CellAlignment::Center));
        }
        table.add_row(cells);
    }
    table
}

pub fn print_substitution_result(
    path: &Path,
    ciphertext: &str,
    result: &SubstitutionBreak,
    analyzer: &FrequencyAnalyzer,
) {
    println!("\nFile: {}", path.display());
    println!("Ciphertext: {}", preview(ciphertext));
    println!("Plaintext:  {}", preview(&result.plaintext));
    println!("Score: {:.2}  [{}]", result.score, metric_label(result.metric));
    println!(
        "IC: {:.4}  Chi²: {:.2}",
        analyzer.index_of_coincidence(&result.plaintext),
        analyzer.chi_squared(&result.plaintext)
    );
    println!("{}", mapping_table(&result.key));
}

pub fn print_transposition_result(path: &Path, ciphertext: &str, result: &TranspositionBreak) {
    println!("\nFile: {}", path.display());
    println!("Ciphertext: {}", preview(ciphertext));
    println!("Plaintext:  {}", preview(&result.plaintext));
    println!("Key: {}", result.key);
    println!("Score: {:.2}  [{}]", result.score, metric_label(result.metric));
}
