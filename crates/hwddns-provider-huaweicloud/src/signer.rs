//! AK/SK request signing (`SDK-HMAC-SHA256`)
//!
//! Huawei Cloud API gateways authenticate each request with an HMAC over a
//! canonical form of the request:
//!
//! ```text
//! CanonicalRequest =
//!     Method \n
//!     CanonicalURI \n          (percent-encoded segments, always ends in '/')
//!     CanonicalQueryString \n  (empty, no call here takes a query)
//!     CanonicalHeaders \n      (sorted "name:value\n" lines)
//!     SignedHeaders \n         (sorted names joined with ';')
//!     HexEncode(SHA256(body))
//!
//! StringToSign = "SDK-HMAC-SHA256" \n X-Sdk-Date \n HexEncode(SHA256(CanonicalRequest))
//! Signature    = HexEncode(HMAC-SHA256(SecretKey, StringToSign))
//! ```

use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use hwddns_core::{Error, Result};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::fmt;

type HmacSha256 = Hmac<Sha256>;

/// Signing algorithm name
pub const ALGORITHM: &str = "SDK-HMAC-SHA256";

/// Header carrying the signing timestamp
pub const HEADER_SDK_DATE: &str = "X-Sdk-Date";

/// `X-Sdk-Date` timestamp format
const SDK_DATE_FORMAT: &str = "%Y%m%dT%H%M%SZ";

/// The parts of an HTTP request that take part in the signature
#[derive(Debug, Clone)]
pub struct SigningRequest<'a> {
    /// HTTP method, upper case
    pub method: &'a str,
    /// Request path, not yet encoded
    pub path: &'a str,
    /// Headers to sign, keyed by lower-case name
    pub headers: BTreeMap<String, String>,
    /// Request body
    pub body: &'a [u8],
}

impl<'a> SigningRequest<'a> {
    /// Create a request with no headers
    pub fn new(method: &'a str, path: &'a str, body: &'a [u8]) -> Self {
        Self {
            method,
            path,
            headers: BTreeMap::new(),
            body,
        }
    }

    /// Add a header to be signed
    pub fn header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.insert(name.to_ascii_lowercase(), value.into());
        self
    }

    /// `Method\nURI\n\nHeaders\nSignedHeaders\nBodyHash`
    pub fn canonical_request(&self) -> String {
        let canonical_headers: String = self
            .headers
            .iter()
            .map(|(name, value)| format!("{}:{}\n", name, value.trim()))
            .collect();

        format!(
            "{}\n{}\n\n{}\n{}\n{}",
            self.method,
            canonical_uri(self.path),
            canonical_headers,
            self.signed_headers(),
            hex::encode(Sha256::digest(self.body))
        )
    }

    /// Lower-case header names joined with `;`
    pub fn signed_headers(&self) -> String {
        self.headers.keys().cloned().collect::<Vec<_>>().join(";")
    }
}

/// Signs requests with an access key / secret key pair
///
/// The Debug implementation never prints the secret key.
#[derive(Clone)]
pub struct Signer {
    access_key: String,
    secret_key: String,
}

impl fmt::Debug for Signer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signer")
            .field("access_key", &self.access_key)
            .field("secret_key", &"<REDACTED>")
            .finish()
    }
}

impl Signer {
    /// Create a signer, rejecting empty keys
    pub fn new(access_key: impl Into<String>, secret_key: impl Into<String>) -> Result<Self> {
        let access_key = access_key.into();
        let secret_key = secret_key.into();

        if access_key.is_empty() || secret_key.is_empty() {
            return Err(Error::config("Access key and secret key are required"));
        }

        Ok(Self {
            access_key,
            secret_key,
        })
    }

    /// Format `at` the way the `X-Sdk-Date` header expects
    pub fn sdk_date(at: DateTime<Utc>) -> String {
        at.format(SDK_DATE_FORMAT).to_string()
    }

    /// Compute the `Authorization` header value
    ///
    /// `request` must already carry the `x-sdk-date` header whose value is
    /// `sdk_date`.
    pub fn authorization(&self, request: &SigningRequest<'_>, sdk_date: &str) -> Result<String> {
        let string_to_sign = format!(
            "{}\n{}\n{}",
            ALGORITHM,
            sdk_date,
            hex::encode(Sha256::digest(request.canonical_request().as_bytes()))
        );

        let mut mac = HmacSha256::new_from_slice(self.secret_key.as_bytes())
            .map_err(|e| Error::config(format!("Invalid secret key: {}", e)))?;
        mac.update(string_to_sign.as_bytes());
        let signature = hex::encode(mac.finalize().into_bytes());

        Ok(format!(
            "{} Access={}, SignedHeaders={}, Signature={}",
            ALGORITHM,
            self.access_key,
            request.signed_headers(),
            signature
        ))
    }
}

/// Percent-encode each path segment (RFC 3986 unreserved characters pass
/// through) and make sure the result ends in `/`
fn canonical_uri(path: &str) -> String {
    let mut uri = path
        .split('/')
        .map(urlencoding::encode)
        .collect::<Vec<_>>()
        .join("/");

    if !uri.ends_with('/') {
        uri.push('/');
    }
    uri
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const EMPTY_SHA256: &str = "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";

    fn sample_request(body: &[u8]) -> SigningRequest<'_> {
        SigningRequest::new("PUT", "/v2/zones/zone-1/recordsets/rs-1", body)
            .header("Host", "dns.cn-east-3.myhuaweicloud.com")
            .header("Content-Type", "application/json")
            .header("X-Project-Id", "proj")
            .header(HEADER_SDK_DATE, "20240102T030405Z")
    }

    #[test]
    fn test_canonical_uri() {
        assert_eq!(canonical_uri("/v2/zones/z/recordsets/r"), "/v2/zones/z/recordsets/r/");
        assert_eq!(canonical_uri("/already/"), "/already/");
        assert_eq!(canonical_uri(""), "/");
        assert_eq!(canonical_uri("/a b/c"), "/a%20b/c/");
        assert_eq!(canonical_uri("/AZaz09-_.~/a=b&c"), "/AZaz09-_.~/a%3Db%26c/");
    }

    #[test]
    fn test_canonical_request_layout() {
        let request = sample_request(b"");

        let expected = format!(
            "PUT\n/v2/zones/zone-1/recordsets/rs-1/\n\n\
             content-type:application/json\n\
             host:dns.cn-east-3.myhuaweicloud.com\n\
             x-project-id:proj\n\
             x-sdk-date:20240102T030405Z\n\n\
             content-type;host;x-project-id;x-sdk-date\n{}",
            EMPTY_SHA256
        );
        assert_eq!(request.canonical_request(), expected);
    }

    #[test]
    fn test_sdk_date_format() {
        let at = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        assert_eq!(Signer::sdk_date(at), "20240102T030405Z");
    }

    #[test]
    fn test_authorization_header_shape() {
        let signer = Signer::new("AKEXAMPLE", "SKEXAMPLE").unwrap();
        let body = br#"{"records":["192.0.2.55"]}"#;

        let auth = signer
            .authorization(&sample_request(body), "20240102T030405Z")
            .unwrap();

        let prefix = "SDK-HMAC-SHA256 Access=AKEXAMPLE, \
                      SignedHeaders=content-type;host;x-project-id;x-sdk-date, Signature=";
        assert!(auth.starts_with(prefix), "{auth}");
        let signature = &auth[prefix.len()..];
        assert_eq!(signature.len(), 64);
        assert!(signature.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_signature_depends_on_secret_and_body() {
        let date = "20240102T030405Z";
        let a = Signer::new("AK", "secret-a").unwrap();
        let b = Signer::new("AK", "secret-b").unwrap();

        let first = a.authorization(&sample_request(b"one"), date).unwrap();
        assert_eq!(first, a.authorization(&sample_request(b"one"), date).unwrap());
        assert_ne!(first, b.authorization(&sample_request(b"one"), date).unwrap());
        assert_ne!(first, a.authorization(&sample_request(b"two"), date).unwrap());
    }

    #[test]
    fn test_empty_keys_rejected() {
        assert!(Signer::new("", "sk").is_err());
        assert!(Signer::new("ak", "").is_err());
    }

    #[test]
    fn test_secret_not_exposed_in_debug() {
        let signer = Signer::new("AKEXAMPLE", "super-secret-sk").unwrap();
        let debug_str = format!("{:?}", signer);
        assert!(!debug_str.contains("super-secret-sk"));
        assert!(debug_str.contains("AKEXAMPLE"));
    }
}
