//! In-memory registry shared by the lnfund-core integration tests

#![allow(dead_code)]

use lnfund_core::{ProgressSink, ResolveStats};
use lnfund_deps::PackageMetadata;
use lnfund_info::{Error, Registry, Result};
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

enum Entry {
    /// Response bodies served in order; the last one repeats.
    Bodies(VecDeque<String>),
    /// Lookup fails with the given HTTP status.
    Status(u16),
}

/// Registry double that serves canned `/latest` bodies and records lookups.
#[derive(Default)]
pub struct FakeRegistry {
    entries: Mutex<HashMap<String, Entry>>,
    calls: Mutex<Vec<String>>,
}

impl FakeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `body` for every lookup of `name`.
    pub fn package(self, name: &str, body: &str) -> Self {
        self.responses(name, &[body])
    }

    /// Serve `bodies` in turn for successive lookups of `name`.
    pub fn responses(self, name: &str, bodies: &[&str]) -> Self {
        let bodies = bodies.iter().map(|b| b.to_string()).collect();
        self.entries
            .lock()
            .unwrap()
            .insert(name.to_string(), Entry::Bodies(bodies));
        self
    }

    /// Answer lookups of `name` with an HTTP status error.
    pub fn failing(self, name: &str, status: u16) -> Self {
        self.entries
            .lock()
            .unwrap()
            .insert(name.to_string(), Entry::Status(status));
        self
    }

    /// Names looked up so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl Registry for FakeRegistry {
    async fn latest(&self, name: &str) -> Result<PackageMetadata> {
        self.calls.lock().unwrap().push(name.to_string());

        let body = {
            let mut entries = self.entries.lock().unwrap();
            match entries.get_mut(name) {
                Some(Entry::Bodies(bodies)) if bodies.len() > 1 => bodies.pop_front().unwrap(),
                Some(Entry::Bodies(bodies)) => bodies.front().cloned().unwrap_or_default(),
                Some(Entry::Status(status)) => {
                    return Err(Error::Status {
                        status: *status,
                        url: format!("fake://{}/latest", name),
                    })
                }
                None => {
                    return Err(Error::Status {
                        status: 404,
                        url: format!("fake://{}/latest", name),
                    })
                }
            }
        };

        Ok(PackageMetadata::from_json_str(&body)?)
    }
}

/// Progress sink that records what it was told.
#[derive(Default)]
pub struct RecordingProgress {
    pub events: Mutex<Vec<String>>,
}

impl ProgressSink for RecordingProgress {
    fn started(&self) {
        self.events.lock().unwrap().push("started".to_string());
    }

    fn analyzing(&self, package: &str) {
        self.events
            .lock()
            .unwrap()
            .push(format!("analyzing {}", package));
    }

    fn finished(&self, stats: &ResolveStats) {
        self.events
            .lock()
            .unwrap()
            .push(format!("finished {}", stats.lookups));
    }
}

/// `/latest` body declaring `deps` as runtime dependencies and a funding JSON fragment.
pub fn body(deps: &[&str], funding: &str) -> String {
    let deps = deps
        .iter()
        .map(|d| format!("\"{}\": \"*\"", d))
        .collect::<Vec<_>>()
        .join(", ");
    format!(r#"{{ "dependencies": {{ {} }}, "funding": {} }}"#, deps, funding)
}

/// Funding fragment for a single lightning record.
pub fn lightning(url: &str) -> String {
    format!(r#"{{ "type": "lightning", "url": "{}" }}"#, url)
}
