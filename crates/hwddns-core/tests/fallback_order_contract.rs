//! Contract Test: Fixed-Priority Fallback
//!
//! The resolver walks its provider list front to back, one provider at a
//! time, and stops at the first candidate that validates.
//!
//! Constraints verified:
//! - Every provider failing yields DiscoveryExhausted and no candidate
//! - The k-th provider's valid answer wins and providers after k are never contacted
//! - Invalid candidates (wrong family, out of range) fall through like failures
//! - Both families behave the same way

mod common;

use common::*;
use hwddns_core::{AddressFamily, Error, ProviderList, Resolver};

const A: &str = "http://a.lookup.test";
const B: &str = "http://b.lookup.test";
const C: &str = "http://c.lookup.test";
const D: &str = "http://d.lookup.test";

fn resolver(family: AddressFamily, probe: ScriptedProbe) -> Resolver {
    Resolver::new(Box::new(probe), ProviderList::new(family, [A, B, C, D]))
}

#[tokio::test]
async fn all_providers_failing_exhausts_discovery() {
    for family in [AddressFamily::V4, AddressFamily::V6] {
        let probe = ScriptedProbe::new(&[
            (A, Scripted::Unreachable),
            (B, Scripted::NoMatch),
            (C, Scripted::Status(503)),
            (D, Scripted::NoMatch),
        ]);
        let calls = probe.calls();

        let result = resolver(family, probe).resolve().await;

        match result {
            Err(Error::DiscoveryExhausted(f)) => assert_eq!(f, family),
            other => panic!("expected DiscoveryExhausted, got {:?}", other),
        }
        assert_eq!(*calls.lock().unwrap(), vec![A, B, C, D]);
    }
}

#[tokio::test]
async fn kth_provider_wins_and_later_ones_are_not_consulted() {
    let probe = ScriptedProbe::new(&[
        (A, Scripted::Unreachable),
        (B, Scripted::NoMatch),
        (C, Scripted::Answer("198.51.100.23")),
        (D, Scripted::Answer("203.0.113.99")),
    ]);
    let calls = probe.calls();

    let address = resolver(AddressFamily::V4, probe)
        .resolve()
        .await
        .expect("third provider answers");

    assert_eq!(address.as_str(), "198.51.100.23");
    assert_eq!(*calls.lock().unwrap(), vec![A, B, C]);
}

#[tokio::test]
async fn first_provider_answering_short_circuits() {
    let probe = ScriptedProbe::new(&[
        (A, Scripted::Answer("2001:db8::1")),
        (B, Scripted::Answer("2001:db8::2")),
    ]);
    let calls = probe.calls();

    let address = resolver(AddressFamily::V6, probe).resolve().await.unwrap();

    assert_eq!(address.as_str(), "2001:db8::1");
    assert_eq!(calls.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn out_of_range_candidate_falls_through() {
    // The v4 extraction pattern accepts 999.999.999.999; validation must not.
    let probe = ScriptedProbe::new(&[
        (A, Scripted::Answer("999.999.999.999")),
        (B, Scripted::Answer("192.0.2.55")),
    ]);
    let calls = probe.calls();

    let address = resolver(AddressFamily::V4, probe).resolve().await.unwrap();

    assert_eq!(address.as_str(), "192.0.2.55");
    assert_eq!(*calls.lock().unwrap(), vec![A, B]);
}

#[tokio::test]
async fn wrong_family_candidates_fall_through() {
    let probe = ScriptedProbe::new(&[
        (A, Scripted::Answer("192.0.2.1")),
        (B, Scripted::Answer("::ffff:192.0.2.1")),
        (C, Scripted::Answer("fe80::1%eth0")),
        (D, Scripted::Answer("2001:db8::7")),
    ]);

    let address = resolver(AddressFamily::V6, probe).resolve().await.unwrap();

    assert_eq!(address.as_str(), "2001:db8::7");
}

#[tokio::test]
async fn invalid_candidates_only_exhaust() {
    let probe = ScriptedProbe::new(&[
        (A, Scripted::Answer("999.1.1.1")),
        (B, Scripted::Answer("2001:db8::1")),
        (C, Scripted::Answer("not-an-ip")),
        (D, Scripted::Answer("1.2.3")),
    ]);

    let result = resolver(AddressFamily::V4, probe).resolve().await;

    assert!(matches!(result, Err(Error::DiscoveryExhausted(AddressFamily::V4))));
}
