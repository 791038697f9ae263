use clap::Args;

#[derive(Args, Debug, Clone)]
pub struct Config {
    #[command(flatten)]
    pub scorer: ScorerParams,
    #[command(flatten)]
    pub substitution: SubstitutionParams,
    #[command(flatten)]
    pub permutation: PermutationParams,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scorer: ScorerParams::default(),
            substitution: SubstitutionParams::default(),
            permutation: PermutationParams::default(),
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct ScorerParams {
    /// Length of the statistical unit (4 = quadgrams).
    #[arg(long, default_value_t = 4)]
    pub ngram_len: usize,
}

impl Default for ScorerParams {
    fn default() -> Self {
        Self { ngram_len: 4 }
    }
}

#[derive(Args, Debug, Clone)]
pub struct SubstitutionParams {
    #[arg(long, default_value_t = 10_000)]
    pub max_iterations: usize,

    /// Independent hill-climbing starts (first one is frequency-seeded).
    #[arg(long, default_value_t = 5)]
    pub restarts: usize,

    /// Classic hill climbing: never accept a non-improving neighbor.
    #[arg(long, default_value_t = false)]
    pub no_soft_climbing: bool,

    /// Initial probability of accepting a worse neighbor (soft climbing).
    #[arg(long, default_value_t = 0.3)]
    pub acceptance_prob: f64,

    /// Multiplicative decay applied to the acceptance probability each time
    /// it is used.
    #[arg(long, default_value_t = 0.999)]
    pub cooling_rate: f64,
}

impl SubstitutionParams {
    pub fn soft_climbing(&self) -> bool {
        !self.no_soft_climbing
    }
}

impl Default for SubstitutionParams {
    fn default() -> Self {
        Self {
            max_iterations: 10_000,
            restarts: 5,
            no_soft_climbing: false,
            acceptance_prob: 0.3,
            cooling_rate: 0.999,
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct PermutationParams {
    #[arg(long, default_value_t = 20.0)]
    pub anneal_temp: f64,

    #[arg(long, default_value_t = 0.995)]
    pub anneal_cooling: f64,

    #[arg(long, default_value_t = 50_000)]
    pub anneal_iterations: usize,

    /// Independent annealing runs (best result wins).
    #[arg(long, default_value_t = 20)]
    pub anneal_runs: usize,

    /// Key lengths up to this are searched exhaustively (k! permutations).
    #[arg(long, default_value_t = 8)]
    pub exhaustive_limit: usize,
}

impl Default for PermutationParams {
    fn default() -> Self {
        Self {
            anneal_temp: 20.0,
            anneal_cooling: 0.995,
            anneal_iterations: 50_000,
            anneal_runs: 20,
            exhaustive_limit: 8,
        }
    }
}
