//! Common types used across the dashboard

use serde::{Deserialize, Serialize};

/// Reachability status shown on a service card
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum ServiceStatus {
    Online,
    Offline,
    Warning,
    #[default]
    Unknown,
}

impl ServiceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceStatus::Online => "online",
            ServiceStatus::Offline => "offline",
            ServiceStatus::Warning => "warning",
            ServiceStatus::Unknown => "unknown",
        }
    }

    /// Classify the outcome of a reachability probe.
    ///
    /// A 2xx answer is online, any other answer is a warning, and no
    /// answer at all (connection failure, timeout) is offline.
    pub fn from_probe(outcome: ProbeOutcome) -> Self {
        match outcome {
            ProbeOutcome::Responded(code) if (200..300).contains(&code) => ServiceStatus::Online,
            ProbeOutcome::Responded(_) => ServiceStatus::Warning,
            ProbeOutcome::Unreachable => ServiceStatus::Offline,
        }
    }
}

impl std::fmt::Display for ServiceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ServiceStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "online" => Ok(ServiceStatus::Online),
            "offline" => Ok(ServiceStatus::Offline),
            "warning" => Ok(ServiceStatus::Warning),
            "unknown" => Ok(ServiceStatus::Unknown),
            other => Err(format!("unknown service status '{}'", other)),
        }
    }
}

/// Result of probing a service URL
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// The server answered with this HTTP status code
    Responded(u16),
    /// Connection refused, DNS failure, TLS failure or timeout
    Unreachable,
}

/// Where system health figures came from
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MetricsSource {
    Glances,
    Simulated,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probe_classification() {
        assert_eq!(
            ServiceStatus::from_probe(ProbeOutcome::Responded(200)),
            ServiceStatus::Online
        );
        assert_eq!(
            ServiceStatus::from_probe(ProbeOutcome::Responded(204)),
            ServiceStatus::Online
        );
        assert_eq!(
            ServiceStatus::from_probe(ProbeOutcome::Responded(301)),
            ServiceStatus::Warning
        );
        assert_eq!(
            ServiceStatus::from_probe(ProbeOutcome::Responded(503)),
            ServiceStatus::Warning
        );
        assert_eq!(
            ServiceStatus::from_probe(ProbeOutcome::Unreachable),
            ServiceStatus::Offline
        );
    }

    #[test]
    fn test_status_round_trip_through_str() {
        for status in [
            ServiceStatus::Online,
            ServiceStatus::Offline,
            ServiceStatus::Warning,
            ServiceStatus::Unknown,
        ] {
            assert_eq!(status.as_str().parse::<ServiceStatus>(), Ok(status));
        }
        assert!("degraded".parse::<ServiceStatus>().is_err());
    }

    #[test]
    fn test_status_serializes_lowercase() {
        let json = serde_json::to_string(&ServiceStatus::Online).unwrap();
        assert_eq!(json, "\"online\"");
    }
}
