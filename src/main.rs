use cipherbreak::analysis::{FrequencyAnalyzer, ReferenceFrequencies};
use cipherbreak::scorer::NgramScorer;
use clap::{Parser, Subcommand};
use std::path::Path;
use std::process;
use std::sync::Arc;
use tracing::{error, info};

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// N-gram corpus (whitespace-separated `NGRAM COUNT` lines).
    #[arg(global = true, short, long, default_value = "data/english_quadgrams.txt")]
    ngrams: String,

    /// Word-frequency CSV (`word,count`); built-in English table when absent.
    #[arg(global = true, short, long)]
    unigrams: Option<String>,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    Substitution(cmd::substitution::SubstitutionArgs),
    Transposition(cmd::transposition::TranspositionArgs),
    Generate(cmd::generate::GenerateArgs),
}

fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    // Sample generation needs no corpus.
    if let Commands::Generate(args) = &cli.command {
        if let Err(e) = cmd::generate::run(args.clone()) {
            error!("{}", e);
            process::exit(1);
        }
        return;
    }

    let ngram_len = match &cli.command {
        Commands::Substitution(args) => args.config.scorer.ngram_len,
        Commands::Transposition(args) => args.config.scorer.ngram_len,
        Commands::Generate(_) => unreachable!(),
    };

    info!("Loading n-gram corpus: {}", cli.ngrams);
    let scorer = match NgramScorer::from_path(&cli.ngrams, ngram_len) {
        Ok(s) => Arc::new(s),
        Err(e) => {
            error!("Failed to initialize scorer: {}", e);
            process::exit(1);
        }
    };

    let reference = ReferenceFrequencies::load_or_default(cli.unigrams.as_deref().map(Path::new));
    let analyzer = FrequencyAnalyzer::new(reference);

    let result = match cli.command {
        Commands::Substitution(args) => cmd::substitution::run(args, scorer, analyzer),
        Commands::Transposition(args) => cmd::transposition::run(args, scorer),
        Commands::Generate(_) => unreachable!(),
    };

    if let Err(e) = result {
        error!("{}", e);
        process::exit(1);
    }
}
