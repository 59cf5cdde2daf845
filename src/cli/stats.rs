//! Stats command implementation

use crate::stats::{load_executions, parse_rates, to_samples, RateRange, SampleSink, WriterSink};
use clap::Args;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct StatsArgs {
    /// JSON array of public executions
    #[arg(short, long, default_value = "./polo.json")]
    pub file: PathBuf,

    /// Also write the rate series to stdout, one sample per line
    #[arg(long)]
    pub samples: bool,
}

impl StatsArgs {
    pub async fn execute(&self) -> anyhow::Result<()> {
        let executions = load_executions(&self.file)?;
        let rates = parse_rates(executions.iter().map(|e| e.rate.as_str()))?;
        let range = RateRange::from_rates(&rates)?;

        tracing::info!(count = range.count, "Computed rate range");
        println!("max: {}", range.max);
        println!("min: {}", range.min);

        if self.samples {
            let mut sink = WriterSink::new(std::io::stdout().lock());
            sink.accept(&to_samples(&rates))?;
        }

        Ok(())
    }
}
