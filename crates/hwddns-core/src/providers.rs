//! Lookup provider tables
//!
//! Each address family has its own ordered list of "what is my IP" services.
//! Earlier entries are preferred; the resolver walks the list front to back.

use crate::config::AddressFamily;

/// Built-in IPv4 lookup services, highest priority first
pub const IPV4_LOOKUP_URLS: &[&str] = &[
    "http://cip.cc",
    "http://ip.3322.net",
    "http://4.ipw.cn",
    "http://v4.ip.zxinc.org/info.php?type=json",
];

/// Built-in IPv6 lookup services, highest priority first
pub const IPV6_LOOKUP_URLS: &[&str] = &[
    "http://6.ipw.cn",
    "http://v6.ident.me",
    "http://ipv6.icanhazip.com",
    "http://v6.ip.zxinc.org/info.php?type=json",
];

/// Ordered list of lookup providers serving one address family
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderList {
    family: AddressFamily,
    urls: Vec<String>,
}

impl ProviderList {
    /// Create a provider list from explicit URLs, keeping their order
    pub fn new<I, S>(family: AddressFamily, urls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            family,
            urls: urls.into_iter().map(Into::into).collect(),
        }
    }

    /// The built-in table for `family`
    pub fn builtin(family: AddressFamily) -> Self {
        let urls = match family {
            AddressFamily::V4 => IPV4_LOOKUP_URLS,
            AddressFamily::V6 => IPV6_LOOKUP_URLS,
        };
        Self::new(family, urls.iter().copied())
    }

    /// The family every entry serves
    pub fn family(&self) -> AddressFamily {
        self.family
    }

    /// Provider URLs in priority order
    pub fn urls(&self) -> impl Iterator<Item = &str> {
        self.urls.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }
}
