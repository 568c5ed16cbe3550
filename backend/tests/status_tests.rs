//! Tests for probe classification and status serialization

use proptest::prelude::*;
use shared::{ProbeOutcome, ServiceStatus};

#[test]
fn unreachable_is_offline() {
    assert_eq!(
        ServiceStatus::from_probe(ProbeOutcome::Unreachable),
        ServiceStatus::Offline
    );
}

#[test]
fn redirect_is_warning() {
    assert_eq!(
        ServiceStatus::from_probe(ProbeOutcome::Responded(301)),
        ServiceStatus::Warning
    );
}

#[test]
fn status_defaults_to_unknown() {
    assert_eq!(ServiceStatus::default(), ServiceStatus::Unknown);
}

#[test]
fn status_serializes_lowercase() {
    let json = serde_json::to_string(&ServiceStatus::Online).unwrap();
    assert_eq!(json, "\"online\"");
    let parsed: ServiceStatus = serde_json::from_str("\"warning\"").unwrap();
    assert_eq!(parsed, ServiceStatus::Warning);
}

proptest! {
    #[test]
    fn success_codes_are_online(code in 200u16..300) {
        prop_assert_eq!(
            ServiceStatus::from_probe(ProbeOutcome::Responded(code)),
            ServiceStatus::Online
        );
    }

    #[test]
    fn other_codes_are_warning(code in prop_oneof![100u16..200, 300u16..600]) {
        prop_assert_eq!(
            ServiceStatus::from_probe(ProbeOutcome::Responded(code)),
            ServiceStatus::Warning
        );
    }

    /// Stored status strings parse back to the same status
    #[test]
    fn status_text_parses_back(
        status in prop_oneof![
            Just(ServiceStatus::Online),
            Just(ServiceStatus::Offline),
            Just(ServiceStatus::Warning),
            Just(ServiceStatus::Unknown),
        ]
    ) {
        let parsed: ServiceStatus = status.as_str().parse().unwrap();
        prop_assert_eq!(parsed, status);
    }
}
