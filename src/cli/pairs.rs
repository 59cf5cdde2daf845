//! Pairs command implementation

use crate::history::PairRegistry;
use clap::Args;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct PairsArgs {
    /// Newline-delimited BASE/QUOTE list
    #[arg(short, long, default_value = "./pairs.txt")]
    pub file: PathBuf,
}

impl PairsArgs {
    pub async fn execute(&self) -> anyhow::Result<()> {
        let registry = PairRegistry::load_pairs_file(&self.file)?;
        tracing::info!(count = registry.len(), "Loaded pairs list");
        for pair in registry.iter() {
            println!("{}", pair);
        }
        Ok(())
    }
}
