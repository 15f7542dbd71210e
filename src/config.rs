use clap::Parser;
use std::path::{Path, PathBuf};

/// Trait for reading configuration parameters
pub trait Config {
    fn input_path(&self) -> &Path;
    fn top_spenders(&self) -> usize;
}

/// CLI configuration
#[derive(Parser, Debug)]
#[command(
    name = "ledger-replay",
    about = "Replays a CSV script of ledger commands and prints the final accounts",
    version
)]
pub struct CliConfig {
    /// Path to the input CSV file containing ledger commands
    #[arg(value_name = "INPUT_FILE")]
    input_file: PathBuf,

    /// Number of top spenders to report once the script has run
    #[arg(long = "top", value_name = "N", default_value_t = 3)]
    top: usize,
}

impl Config for CliConfig {
    fn input_path(&self) -> &Path {
        &self.input_file
    }

    fn top_spenders(&self) -> usize {
        self.top
    }
}
