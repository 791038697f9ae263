use crate::reports;
use cipherbreak::breaker::permutation::PermutationBreaker;
use cipherbreak::config::Config;
use cipherbreak::error::CbResult;
use cipherbreak::scorer::NgramScorer;
use clap::Args;
use std::fs;
use std::sync::Arc;

#[derive(Args, Debug, Clone)]
pub struct TranspositionArgs {
    #[command(flatten)]
    pub config: Config,

    /// Ciphertext file, or a directory of `permutation_*` samples.
    #[arg(short, long)]
    pub input: String,

    /// Number of columns the cipher was written into.
    #[arg(short, long)]
    pub key_length: usize,

    #[arg(short = 'S', long)]
    pub seed: Option<u64>,

    /// Emit results as JSON instead of tables.
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

pub fn run(args: TranspositionArgs, scorer: Arc<NgramScorer>) -> CbResult<()> {
    let breaker = PermutationBreaker::new(scorer, args.config.permutation);

    for path in super::resolve_inputs(&args.input, "permutation_")? {
        let ciphertext = fs::read_to_string(&path)?;
        let ciphertext = ciphertext.trim();

        let result = breaker.break_cipher(ciphertext, args.key_length, args.seed)?;

        if args.json {
            println!("{}", serde_json::to_string_pretty(&result)?);
        } else {
            reports::print_transposition_result(&path, ciphertext, &result);
        }
    }
    Ok(())
}
