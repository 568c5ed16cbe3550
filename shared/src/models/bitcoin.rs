//! Bitcoin price widget model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Bitcoin market snapshot in USD
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BitcoinData {
    pub price: f64,
    /// Percentage change over the last 24 hours
    pub change24h: f64,
    pub market_cap: f64,
    pub volume: f64,
    pub last_updated: DateTime<Utc>,
}
