pub mod generate;
pub mod substitution;
pub mod transposition;

use cipherbreak::error::{CbResult, CipherBreakError};
use std::fs;
use std::path::{Path, PathBuf};

/// Resolves an input argument to one or more ciphertext files: a file path
/// is taken as-is, a directory is scanned for files starting with `prefix`
/// (sorted), matching the sample generator's naming.
pub fn resolve_inputs(input: &str, prefix: &str) -> CbResult<Vec<PathBuf>> {
    let path = Path::new(input);
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }
    if path.is_dir() {
        let mut files: Vec<PathBuf> = fs::read_dir(path)?
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| {
                p.is_file()
                    && p.file_name()
                        .and_then(|n| n.to_str())
                        .is_some_and(|n| n.starts_with(prefix))
            })
            .collect();
        files.sort();
        if files.is_empty() {
            return Err(CipherBreakError::Validation(format!(
                "no '{}*' files found in {}",
                prefix, input
            )));
        }
        return Ok(files);
    }
    Err(CipherBreakError::Validation(format!(
        "input '{}' is neither a file nor a directory",
        input
    )))
}
