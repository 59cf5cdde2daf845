//! Known currency pairs

use serde::Deserialize;
use std::collections::BTreeSet;
use std::path::Path;
use thiserror::Error;

/// Pairs listed by the exchange when the history endpoint was mapped
pub const DEFAULT_PAIRS: &[&str] = &[
    "USDT_BTC",
    "BTC_ETH",
    "BTC_LTC",
    "USDT_ETH",
    "BTC_BCH",
    "USDT_LTC",
    "USDT_BCH",
    "BTC_XRP",
    "BTC_ETC",
    "BTC_XMR",
    "BTC_BTS",
    "BTC_LSK",
    "USDT_ETC",
    "USDT_XRP",
    "BTC_DASH",
    "BTC_ZEC",
    "BTC_XEM",
    "USDT_XMR",
    "USDT_ZEC",
    "BTC_MAID",
    "BTC_SYS",
    "BTC_GNT",
    "BTC_FCT",
    "BTC_STR",
    "BTC_DGB",
    "BTC_FLO",
    "BTC_DOGE",
    "USDT_NXT",
    "BTC_ZRX",
    "BTC_STRAT",
    "BTC_NXC",
    "BTC_GAME",
    "BTC_SC",
    "USDT_DASH",
    "BTC_NAV",
    "BTC_NXT",
    "BTC_CVC",
    "BTC_BURST",
    "BTC_DCR",
    "USDT_REP",
    "BTC_EMC2",
    "BTC_BCN",
    "BTC_ARDR",
    "USDT_STR",
    "BTC_STEEM",
    "ETH_ZRX",
    "BTC_REP",
    "BTC_XPM",
    "BTC_VTC",
    "BTC_BTCD",
    "BTC_EXP",
    "BTC_LBC",
    "ETH_BCH",
    "ETH_ETC",
    "ETH_ZEC",
    "BTC_CLAM",
    "ETH_LSK",
    "BTC_POT",
    "BTC_FLDC",
    "BTC_PINK",
    "ETH_GNT",
    "BTC_BLK",
    "BTC_XCP",
    "BTC_NOTE",
    "BTC_AMP",
    "BTC_VRC",
    "BTC_GNO",
    "BTC_RIC",
    "BTC_XBC",
    "BTC_BCY",
    "BTC_VIA",
    "BTC_OMNI",
    "XMR_BLK",
    "BTC_RADS",
    "BTC_SJCX",
    "XMR_DASH",
    "BTC_BELA",
    "BTC_PPC",
    "BTC_NEOS",
    "BTC_NMC",
    "BTC_SBD",
    "BTC_PASC",
    "ETH_REP",
    "ETH_CVC",
    "XMR_LTC",
    "BTC_GRC",
    "BTC_XVC",
    "BTC_BTM",
    "BTC_NAUT",
    "ETH_STEEM",
    "ETH_GNO",
    "BTC_HUC",
    "XMR_BTCD",
    "XMR_MAID",
    "XMR_ZEC",
    "XMR_NXT",
    "XMR_BCN",
];

/// What the decoder does with a pair key missing from the registry
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownPairPolicy {
    /// Drop the pair and report it in `skipped_pairs`
    #[default]
    Skip,
    /// Fail the whole decode
    Reject,
    /// Keep the pair as if it were known
    Accept,
}

/// Pairs list errors
#[derive(Debug, Error)]
pub enum PairsError {
    /// Line is not `BASE/QUOTE`
    #[error("Malformed pair on line {line}: {content:?}")]
    Malformed { line: usize, content: String },
    /// Pairs file could not be read
    #[error("Failed to read pairs file: {0}")]
    Io(#[from] std::io::Error),
}

/// Closed set of pair identifiers the decoder validates against
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairRegistry {
    pairs: BTreeSet<String>,
}

impl PairRegistry {
    /// Create a registry from pair identifiers such as `BTC_ETH`
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            pairs: pairs.into_iter().map(Into::into).collect(),
        }
    }

    /// Parse a newline-delimited `BASE/QUOTE` list
    ///
    /// Each line `ZEC/BTC` yields the identifier `BTC_ZEC`. Blank lines are ignored.
    pub fn from_pairs_list(text: &str) -> Result<Self, PairsError> {
        let mut pairs = BTreeSet::new();
        for (idx, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            pairs.insert(pair_id_from_listing(line).ok_or_else(|| PairsError::Malformed {
                line: idx + 1,
                content: line.to_string(),
            })?);
        }
        Ok(Self { pairs })
    }

    /// Load a `BASE/QUOTE` list from disk
    pub fn load_pairs_file(path: impl AsRef<Path>) -> Result<Self, PairsError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_pairs_list(&text)
    }

    /// Check if a pair identifier is known
    pub fn contains(&self, pair: &str) -> bool {
        self.pairs.contains(pair)
    }

    /// Add a pair identifier
    pub fn insert(&mut self, pair: impl Into<String>) -> bool {
        self.pairs.insert(pair.into())
    }

    /// Iterate pair identifiers in lexical order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.pairs.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl Default for PairRegistry {
    fn default() -> Self {
        Self::from_pairs(DEFAULT_PAIRS.iter().copied())
    }
}

/// `ZEC/BTC` -> `BTC_ZEC`
fn pair_id_from_listing(line: &str) -> Option<String> {
    let (base, quote) = line.split_once('/')?;
    let (base, quote) = (base.trim(), quote.trim());
    if base.is_empty() || quote.is_empty() || quote.contains('/') {
        return None;
    }
    Some(format!("{}_{}", quote, base))
}
