//! History command implementation

use crate::api::PoloniexClient;
use crate::auth::Credentials;
use crate::config::Config;
use crate::history::TradeHistoryByPair;
use clap::{Args, ValueEnum};
use std::fmt::Write;

/// Output format for fetched history
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Table,
}

#[derive(Args, Debug)]
pub struct HistoryArgs {
    /// Range start, YYYY-MM-DDTHH:MM:SS (UTC)
    #[arg(long)]
    pub start: String,

    /// Range end, YYYY-MM-DDTHH:MM:SS (UTC)
    #[arg(long)]
    pub end: String,

    /// Output format
    #[arg(long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

impl HistoryArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let credentials = Credentials::from_env()?;
        let client = PoloniexClient::with_config(config.client_config()?, credentials)?;

        let history = client.get_my_trade_history(&self.start, &self.end).await?;

        match self.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&history)?),
            OutputFormat::Table => print!("{}", format_table(&history)),
        }

        for pair in history.skipped_pairs() {
            tracing::warn!(pair = %pair, "Pair not in known set; trades not shown");
        }

        Ok(())
    }
}

/// Render history as one block per pair
pub fn format_table(history: &TradeHistoryByPair) -> String {
    let mut out = String::new();

    if history.is_empty() {
        out.push_str("No trades in range\n");
        return out;
    }

    for (pair, trades) in history.iter() {
        let _ = writeln!(out, "{} ({} trades)", pair, trades.len());
        let _ = writeln!(
            out,
            "  {:<19}  {:<4}  {:>16}  {:>16}  {:>16}  {:>12}",
            "date", "side", "rate", "amount", "total", "fee"
        );
        for t in trades {
            let _ = writeln!(
                out,
                "  {:<19}  {:<4}  {:>16}  {:>16}  {:>16}  {:>12}",
                t.date,
                t.side.as_str(),
                t.rate,
                t.amount,
                t.total,
                t.fee
            );
        }
    }

    out
}
