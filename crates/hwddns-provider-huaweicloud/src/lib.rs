// # Huawei Cloud DNS Provider
//
// This crate publishes a resolved address into a Huawei Cloud DNS record set.
//
// ## Behaviour
//
// - One signed PUT per run, replacing the record set's value list with the
//   single resolved address
// - HTTP timeout of 30 seconds
// - No retry and no backoff; errors go back to the caller verbatim
// - Dry-run mode signs and logs the request without sending it
//
// ## Security Requirements
//
// - The secret key NEVER appears in logs or Debug output
// - Empty credentials are rejected at construction
//
// ## API Reference
//
// - Endpoint: `https://dns.{region}.myhuaweicloud.com`
// - Update Record Set: PUT `/v2/zones/{zone_id}/recordsets/{recordset_id}`
// - Authentication: AK/SK signing, see [`signer`]

pub mod signer;

use async_trait::async_trait;
use chrono::Utc;
use hwddns_core::config::{ProviderConfig, RecordSetConfig, TransportPolicy};
use hwddns_core::traits::{RecordSetUpdater, UpdateOutcome};
use hwddns_core::{Error, ResolvedAddress, Result};
use reqwest::Url;
use serde::{Deserialize, Serialize};
use signer::{HEADER_SDK_DATE, Signer, SigningRequest};
use std::time::Duration;

/// Default HTTP timeout for API requests (30 seconds)
const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

const PROVIDER_NAME: &str = "huaweicloud";

const CONTENT_TYPE_JSON: &str = "application/json";

/// Request body of the record set update call
#[derive(Debug, Serialize)]
struct UpdateRecordSetRequest<'a> {
    records: [&'a str; 1],
}

/// The fields of the update response worth logging
#[derive(Debug, Default, Deserialize)]
struct RecordSetResponse {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    status: Option<String>,
}

/// Huawei Cloud DNS record set updater
///
/// # Dry-Run Mode
///
/// When `dry_run` is true the provider builds and signs the request, logs the
/// intended PUT and returns [`UpdateOutcome::Skipped`] without any network
/// activity.
///
/// # Security
///
/// The Debug implementation does NOT expose the secret key.
pub struct HuaweiCloudProvider {
    /// AK/SK signer
    signer: Signer,

    /// Project the zone belongs to
    project_id: String,

    /// API endpoint, scheme and authority only
    endpoint: Url,

    /// HTTP client for API requests
    client: reqwest::Client,

    /// If true, sign and log the update but never send it
    dry_run: bool,
}

impl std::fmt::Debug for HuaweiCloudProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HuaweiCloudProvider")
            .field("signer", &self.signer)
            .field("project_id", &self.project_id)
            .field("endpoint", &self.endpoint.as_str())
            .field("dry_run", &self.dry_run)
            .finish()
    }
}

impl HuaweiCloudProvider {
    /// Create a provider for the region named in `config`
    ///
    /// # Parameters
    ///
    /// - `config`: credentials, project and region
    /// - `policy`: TLS policy, shared with address discovery
    /// - `dry_run`: if true, never send the update
    pub fn new(config: &ProviderConfig, policy: TransportPolicy, dry_run: bool) -> Result<Self> {
        config.validate()?;

        let signer = Signer::new(config.access_key.as_str(), config.secret_key.as_str())?;
        let endpoint = parse_endpoint(&format!("https://dns.{}.myhuaweicloud.com", config.region))?;

        if policy.skip_tls_verification {
            tracing::warn!("TLS certificate validation disabled for DNS API requests");
        }

        let client = reqwest::Client::builder()
            .timeout(DEFAULT_HTTP_TIMEOUT)
            .danger_accept_invalid_certs(policy.skip_tls_verification)
            .build()
            .map_err(|e| Error::config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            signer,
            project_id: config.project_id.clone(),
            endpoint,
            client,
            dry_run,
        })
    }

    /// Point the provider at a different API endpoint
    pub fn with_endpoint(mut self, endpoint: &str) -> Result<Self> {
        self.endpoint = parse_endpoint(endpoint)?;
        Ok(self)
    }

    /// Current API endpoint
    pub fn endpoint(&self) -> &str {
        self.endpoint.as_str()
    }

    /// `Host` header value: host plus any non-default port
    fn host(&self) -> Result<String> {
        let host = self
            .endpoint
            .host_str()
            .ok_or_else(|| Error::config(format!("endpoint has no host: {}", self.endpoint)))?;

        Ok(match self.endpoint.port() {
            Some(port) => format!("{}:{}", host, port),
            None => host.to_string(),
        })
    }
}

fn parse_endpoint(endpoint: &str) -> Result<Url> {
    let url = Url::parse(endpoint)
        .map_err(|e| Error::config(format!("Invalid endpoint {}: {}", endpoint, e)))?;

    if url.host_str().is_none() {
        return Err(Error::config(format!("endpoint has no host: {}", endpoint)));
    }
    Ok(url)
}

/// Reject IDs that would need escaping in the request path
fn check_id(name: &str, value: &str) -> Result<()> {
    if value.is_empty()
        || !value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(Error::invalid_input(format!("Invalid {}: {:?}", name, value)));
    }
    Ok(())
}

/// Map a non-success response to an error carrying the body verbatim
fn status_error(status: reqwest::StatusCode, body: &str) -> Error {
    match status.as_u16() {
        401 | 403 => Error::auth(format!(
            "Huawei Cloud rejected the credentials. Status: {} - {}",
            status, body
        )),
        404 => Error::not_found(format!("Zone or record set not found: {} - {}", status, body)),
        429 => Error::rate_limited(format!(
            "Rate limit exceeded. Please retry later. Status: {} - {}",
            status, body
        )),
        500..=599 => Error::provider(
            PROVIDER_NAME,
            format!("Huawei Cloud server error (transient): {} - {}", status, body),
        ),
        _ => Error::provider(
            PROVIDER_NAME,
            format!("Failed to update record set: {} - {}", status, body),
        ),
    }
}

#[async_trait]
impl RecordSetUpdater for HuaweiCloudProvider {
    /// Replace the record set's values with `[address]`
    ///
    /// # API Call
    ///
    /// ```http
    /// PUT /v2/zones/{zone_id}/recordsets/{recordset_id}
    /// X-Sdk-Date: 20240102T030405Z
    /// X-Project-Id: <project>
    /// Authorization: SDK-HMAC-SHA256 Access=..., SignedHeaders=..., Signature=...
    ///
    /// {"records": ["1.2.3.4"]}
    /// ```
    async fn update_record_set(
        &self,
        target: &RecordSetConfig,
        address: &ResolvedAddress,
    ) -> Result<UpdateOutcome> {
        check_id("zone ID", &target.zone_id)?;
        check_id("record set ID", &target.record_set_id)?;

        let path = format!(
            "/v2/zones/{}/recordsets/{}",
            target.zone_id, target.record_set_id
        );
        let url = self
            .endpoint
            .join(&path)
            .map_err(|e| Error::config(format!("Invalid request path {}: {}", path, e)))?;

        let body = serde_json::to_vec(&UpdateRecordSetRequest {
            records: [address.as_str()],
        })?;

        let sdk_date = Signer::sdk_date(Utc::now());
        let request = SigningRequest::new("PUT", &path, &body)
            .header("Content-Type", CONTENT_TYPE_JSON)
            .header("Host", self.host()?)
            .header("X-Project-Id", self.project_id.as_str())
            .header(HEADER_SDK_DATE, sdk_date.as_str());
        let authorization = self.signer.authorization(&request, &sdk_date)?;

        tracing::info!(
            "Updating Huawei Cloud record set {} in zone {} -> {} ({}) [mode: {}]",
            target.record_set_id,
            target.zone_id,
            address,
            address.family().record_type(),
            if self.dry_run { "DRY-RUN" } else { "LIVE" }
        );

        if self.dry_run {
            tracing::warn!(
                "[DRY-RUN] Would send PUT request to {} with payload: {}",
                url,
                String::from_utf8_lossy(&body)
            );
            return Ok(UpdateOutcome::Skipped {
                address: address.as_str().to_string(),
            });
        }

        let response = self
            .client
            .put(url)
            .header("Content-Type", CONTENT_TYPE_JSON)
            .header("X-Project-Id", self.project_id.as_str())
            .header(HEADER_SDK_DATE, sdk_date.as_str())
            .header("Authorization", authorization)
            .body(body)
            .send()
            .await
            .map_err(|e| Error::transport(format!("DNS API request failed: {}", e)))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unable to read response body".to_string());

        if !status.is_success() {
            return Err(status_error(status, &text));
        }

        let record: RecordSetResponse = serde_json::from_str(&text).unwrap_or_default();
        tracing::info!(
            "Record set updated successfully: {} -> {} (status: {})",
            record.name.as_deref().unwrap_or(&target.record_set_id),
            address,
            record.status.as_deref().unwrap_or("unknown")
        );

        Ok(UpdateOutcome::Updated {
            address: address.as_str().to_string(),
        })
    }

    fn provider_name(&self) -> &'static str {
        PROVIDER_NAME
    }
}
