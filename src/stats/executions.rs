//! Public trade dump (`returnTradeHistory` on the public API)

use crate::history::TradeSide;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One public execution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Execution {
    #[serde(rename = "globalTradeID")]
    pub global_trade_id: u64,
    #[serde(rename = "tradeID")]
    pub trade_id: u64,
    pub date: String,
    #[serde(rename = "type")]
    pub side: TradeSide,
    pub rate: String,
    pub amount: String,
    pub total: String,
}

/// Load a JSON array of executions from disk
pub fn load_executions(path: impl AsRef<Path>) -> anyhow::Result<Vec<Execution>> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))?;
    let executions: Vec<Execution> = serde_json::from_str(&content)
        .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", path.display(), e))?;

    tracing::debug!(path = %path.display(), count = executions.len(), "Loaded executions");
    Ok(executions)
}
