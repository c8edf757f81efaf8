// # hwddns-core
//
// Core library for the hwddns dynamic DNS updater.
//
// ## Architecture Overview
//
// This library provides the address discovery side of a one-shot DDNS run:
// - **AddressProbe**: Trait for asking one lookup provider for the public address
// - **ProviderList**: Ordered per-family tables of lookup providers
// - **Validator**: Family-specific syntax check producing a `ResolvedAddress`
// - **Resolver**: Sequential fallback across providers until one validates
// - **RecordSetUpdater**: Trait for publishing the address into the DNS
//
// ## Design Principles
//
// 1. **Two-stage check**: extraction only looks at shape, validation decides
// 2. **Fixed priority**: providers are tried in list order, never raced
// 3. **Single pass**: one discovery and one update per process, no retries
// 4. **Library-First**: the binary is thin glue over this crate

pub mod traits;
pub mod resolver;
pub mod providers;
pub mod validator;
pub mod config;
pub mod error;

// Re-export core types for convenience
pub use traits::{AddressProbe, ProbeOutcome, RecordSetUpdater, UpdateOutcome};
pub use resolver::{Resolver, acquire, run_once};
pub use providers::ProviderList;
pub use validator::{ResolvedAddress, is_valid};
pub use config::{
    AddressFamily, DiscoveryConfig, HwddnsConfig, ProviderConfig, RecordSetConfig,
    TransportPolicy,
};
pub use error::{Error, Result};
