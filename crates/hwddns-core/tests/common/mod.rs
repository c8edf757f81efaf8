//! Test doubles and common utilities for resolver contract tests
//!
//! This module provides scripted stand-ins for the lookup providers and the
//! DNS API so the contracts can be checked without any network access.

#![allow(dead_code)]

use hwddns_core::error::{Error, Result};
use hwddns_core::traits::{AddressProbe, ProbeOutcome, RecordSetUpdater, UpdateOutcome};
use hwddns_core::{AddressFamily, RecordSetConfig, ResolvedAddress};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// What a scripted provider does when probed
#[derive(Debug, Clone)]
pub enum Scripted {
    /// Provider answers with this candidate
    Answer(&'static str),
    /// Provider cannot be reached
    Unreachable,
    /// Provider answers with a non-success status
    Status(u16),
    /// Provider answers but the body holds no address
    NoMatch,
}

/// An AddressProbe that replays a fixed script per URL and records calls
pub struct ScriptedProbe {
    script: HashMap<String, Scripted>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl ScriptedProbe {
    pub fn new(script: &[(&str, Scripted)]) -> Self {
        Self {
            script: script
                .iter()
                .map(|(url, outcome)| (url.to_string(), outcome.clone()))
                .collect(),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Handle to the call log, usable after the probe moved into a resolver
    pub fn calls(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.calls)
    }
}

#[async_trait::async_trait]
impl AddressProbe for ScriptedProbe {
    async fn probe(&self, url: &str, _family: AddressFamily) -> ProbeOutcome {
        self.calls.lock().unwrap().push(url.to_string());

        match self.script.get(url) {
            Some(Scripted::Answer(candidate)) => Ok(candidate.to_string()),
            Some(Scripted::Unreachable) | None => {
                Err(Error::transport(format!("connection refused: {}", url)))
            }
            Some(Scripted::Status(code)) => Err(Error::http(format!("status {}", code))),
            Some(Scripted::NoMatch) => Err(Error::format("no address found in response")),
        }
    }
}

/// A RecordSetUpdater that records what it was asked to publish
pub struct RecordingUpdater {
    published: Arc<Mutex<Vec<(RecordSetConfig, String)>>>,
    fail_with: Option<String>,
}

impl RecordingUpdater {
    pub fn new() -> Self {
        Self {
            published: Arc::new(Mutex::new(Vec::new())),
            fail_with: None,
        }
    }

    /// An updater whose every call is rejected with `message`
    pub fn rejecting(message: &str) -> Self {
        Self {
            published: Arc::new(Mutex::new(Vec::new())),
            fail_with: Some(message.to_string()),
        }
    }

    pub fn published(&self) -> Vec<(RecordSetConfig, String)> {
        self.published.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl RecordSetUpdater for RecordingUpdater {
    async fn update_record_set(
        &self,
        target: &RecordSetConfig,
        address: &ResolvedAddress,
    ) -> Result<UpdateOutcome> {
        self.published
            .lock()
            .unwrap()
            .push((target.clone(), address.to_string()));

        match self.fail_with {
            Some(ref message) => Err(Error::provider("recording", message.clone())),
            None => Ok(UpdateOutcome::Updated {
                address: address.to_string(),
            }),
        }
    }

    fn provider_name(&self) -> &'static str {
        "recording"
    }
}

/// Record set used by every contract test
pub fn sample_target() -> RecordSetConfig {
    RecordSetConfig::new("zone-0001", "recordset-0001")
}
