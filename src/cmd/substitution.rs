use crate::reports;
use cipherbreak::analysis::FrequencyAnalyzer;
use cipherbreak::breaker::substitution::SubstitutionBreaker;
use cipherbreak::config::Config;
use cipherbreak::error::CbResult;
use cipherbreak::scorer::NgramScorer;
use clap::Args;
use std::fs;
use std::sync::Arc;

#[derive(Args, Debug, Clone)]
pub struct SubstitutionArgs {
    #[command(flatten)]
    pub config: Config,

    /// Ciphertext file, or a directory of `substitution_*` samples.
    #[arg(short, long)]
    pub input: String,

    /// Skip hill climbing; chi-squared-guided frequency fit only.
    #[arg(long, default_value_t = false)]
    pub frequency_only: bool,

    #[arg(short = 'S', long)]
    pub seed: Option<u64>,

    /// Emit results as JSON instead of tables.
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

pub fn run(
    args: SubstitutionArgs,
    scorer: Arc<NgramScorer>,
    analyzer: FrequencyAnalyzer,
) -> CbResult<()> {
    let breaker = SubstitutionBreaker::new(scorer, analyzer.clone(), args.config.substitution);

    for path in super::resolve_inputs(&args.input, "substitution_")? {
        let ciphertext = fs::read_to_string(&path)?;
        let ciphertext = ciphertext.trim();

        let result = if args.frequency_only {
            breaker.break_frequency_only(ciphertext, args.seed)
        } else {
            breaker.break_cipher(ciphertext, args.seed)
        };

        if args.json {
            println!("{}", serde_json::to_string_pretty(&result)?);
        } else {
            reports::print_substitution_result(&path, ciphertext, &result, &analyzer);
        }
    }
    Ok(())
}
