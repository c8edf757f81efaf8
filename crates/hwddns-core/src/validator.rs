//! Address validation
//!
//! Extraction only checks the shape of a candidate; this module decides
//! whether it is a real address of the requested family.

use crate::config::AddressFamily;
use crate::error::{Error, Result};
use std::fmt;
use std::net::IpAddr;

/// Whether `candidate` is a syntactically valid address of `family`
///
/// - IPv4: a dotted quad with every octet in 0..=255, or an IPv4-mapped
///   IPv6 literal (`::ffff:a.b.c.d`), since both have a 4-byte form.
/// - IPv6: an IPv6 literal with no 4-byte form.
///
/// Hostnames, zone ids and out-of-range octets never validate.
pub fn is_valid(candidate: &str, family: AddressFamily) -> bool {
    let Ok(ip) = candidate.parse::<IpAddr>() else {
        return false;
    };

    let has_v4_form = match ip {
        IpAddr::V4(_) => true,
        IpAddr::V6(v6) => v6.to_ipv4_mapped().is_some(),
    };

    match family {
        AddressFamily::V4 => has_v4_form,
        AddressFamily::V6 => !has_v4_form,
    }
}

/// An address confirmed valid for its family
///
/// The only way to build one is through the validator, so holders never
/// need to re-check it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResolvedAddress {
    address: String,
    family: AddressFamily,
}

impl ResolvedAddress {
    /// Validate `candidate` for `family`
    ///
    /// # Returns
    ///
    /// - `Ok(ResolvedAddress)`: the candidate, unchanged
    /// - `Err(Error::Validation)`: the candidate is not a valid `family` address
    pub fn parse(candidate: &str, family: AddressFamily) -> Result<Self> {
        if !is_valid(candidate, family) {
            return Err(Error::validation(candidate, family));
        }

        Ok(Self {
            address: candidate.to_string(),
            family,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.address
    }

    pub fn family(&self) -> AddressFamily {
        self.family
    }
}

impl fmt::Display for ResolvedAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.address)
    }
}
