//! Address extraction from free-form response bodies
//!
//! Lookup services answer with plain text, JSON or HTML and none of these
//! formats is stable, so bodies are never parsed structurally. Instead the
//! raw text is searched for the first substring shaped like an address of
//! the requested family. Shape only: `999.999.999.999` is extracted and left
//! for the validator to reject.

use hwddns_core::AddressFamily;
use regex::Regex;
use std::cmp::Reverse;
use std::sync::LazyLock;

/// Four dot-separated runs of 1-3 ASCII digits between word boundaries
const IPV4_PATTERN: &str = r"(?-u:\b)(?:[0-9]{1,3}\.){3}[0-9]{1,3}(?-u:\b)";

/// The textual IPv6 forms, one regex each: full, `::` compressed,
/// link-local with zone id, IPv4-mapped and IPv4-suffixed
const IPV6_ALTERNATIVES: &[&str] = &[
    r"([0-9a-fA-F]{1,4}:){7}[0-9a-fA-F]{1,4}",
    r"([0-9a-fA-F]{1,4}:){1,7}:",
    r"([0-9a-fA-F]{1,4}:){1,6}:[0-9a-fA-F]{1,4}",
    r"([0-9a-fA-F]{1,4}:){1,5}(:[0-9a-fA-F]{1,4}){1,2}",
    r"([0-9a-fA-F]{1,4}:){1,4}(:[0-9a-fA-F]{1,4}){1,3}",
    r"([0-9a-fA-F]{1,4}:){1,3}(:[0-9a-fA-F]{1,4}){1,4}",
    r"([0-9a-fA-F]{1,4}:){1,2}(:[0-9a-fA-F]{1,4}){1,5}",
    r"[0-9a-fA-F]{1,4}:((:[0-9a-fA-F]{1,4}){1,6})",
    r":((:[0-9a-fA-F]{1,4}){1,7}|:)",
    r"fe80:(:[0-9a-fA-F]{0,4}){0,4}%[0-9a-zA-Z]+",
    r"::(ffff(:0{1,4})?:)?((25[0-5]|(2[0-4]|1?[0-9])?[0-9])\.){3}(25[0-5]|(2[0-4]|1?[0-9])?[0-9])",
    r"([0-9a-fA-F]{1,4}:){1,4}:((25[0-5]|(2[0-4]|1?[0-9])?[0-9])\.){3}(25[0-5]|(2[0-4]|1?[0-9])?[0-9])",
];

static IPV4_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(IPV4_PATTERN).expect("IPv4 pattern is valid"));

static IPV6_REGEXES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    IPV6_ALTERNATIVES
        .iter()
        .map(|alternative| Regex::new(alternative).expect("IPv6 pattern is valid"))
        .collect()
});

/// Find the first `family` shaped substring of `text`
///
/// For IPv6 the earliest match wins; among alternatives matching at the same
/// position the longest wins, so `2001:db8::1` is not cut short at `2001:db8::`.
pub fn extract(text: &str, family: AddressFamily) -> Option<&str> {
    match family {
        AddressFamily::V4 => IPV4_REGEX.find(text).map(|m| m.as_str()),
        AddressFamily::V6 => IPV6_REGEXES
            .iter()
            .filter_map(|re| re.find(text))
            .min_by_key(|m| (m.start(), Reverse(m.end())))
            .map(|m| m.as_str()),
    }
}
