//! System health widget model

use serde::{Deserialize, Serialize};

use crate::types::MetricsSource;

/// Host resource usage shown on the dashboard
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SystemHealth {
    /// CPU usage percent
    pub cpu: u32,
    /// Memory usage percent
    pub memory: u32,
    /// Storage usage percent of the fullest filesystem
    pub storage: u32,
    pub network_status: String,
    /// Download rate in Mbps
    pub network_down: u32,
    /// Upload rate in Mbps
    pub network_up: u32,
    pub source: MetricsSource,
}

/// Clamp a reported percentage into 0..=100 and round it
pub fn clamp_percent(value: f64) -> u32 {
    if value.is_nan() {
        return 0;
    }
    value.round().clamp(0.0, 100.0) as u32
}

/// Convert a byte count observed over `seconds` into whole megabits per second
pub fn bytes_to_mbps(bytes: f64, seconds: f64) -> u32 {
    if seconds <= 0.0 || bytes <= 0.0 || !bytes.is_finite() {
        return 0;
    }
    (bytes * 8.0 / seconds / 1_000_000.0).round() as u32
}
