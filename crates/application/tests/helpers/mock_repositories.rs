#![allow(dead_code)]
#![allow(unused_imports)]

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};
use txtdirect_application::ports::{MetricsRecorder, ProxyForwarder, TxtResolver};
use txtdirect_application::ResponseSink;
use txtdirect_domain::{DomainError, FallbackMode, Record, RedirectRequest};

/// In-memory TXT zones keyed by absolute zone name. Every lookup is recorded.
#[derive(Clone, Default)]
pub struct MockTxtResolver {
    zones: Arc<RwLock<HashMap<String, Vec<String>>>>,
    failing: Arc<RwLock<HashMap<String, DomainError>>>,
    queried: Arc<Mutex<Vec<String>>>,
}

impl MockTxtResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_record(self, zone: &str, txt: &str) -> Self {
        self.set_records(zone, vec![txt]);
        self
    }

    pub fn set_records(&self, zone: &str, txts: Vec<&str>) {
        self.zones.write().unwrap().insert(
            zone.to_string(),
            txts.into_iter().map(str::to_string).collect(),
        );
    }

    pub fn set_error(&self, zone: &str, error: DomainError) {
        self.failing
            .write()
            .unwrap()
            .insert(zone.to_string(), error);
    }

    pub fn queried(&self) -> Vec<String> {
        self.queried.lock().unwrap().clone()
    }

    pub fn query_count(&self) -> usize {
        self.queried.lock().unwrap().len()
    }
}

#[async_trait]
impl TxtResolver for MockTxtResolver {
    async fn lookup_txt(&self, zone: &str) -> Result<Vec<String>, DomainError> {
        self.queried.lock().unwrap().push(zone.to_string());

        if let Some(error) = self.failing.read().unwrap().get(zone) {
            return Err(error.clone());
        }
        self.zones
            .read()
            .unwrap()
            .get(zone)
            .cloned()
            .ok_or_else(|| DomainError::DnsQuery {
                zone: zone.to_string(),
                reason: "NXDOMAIN".to_string(),
            })
    }
}

#[derive(Default)]
pub struct RecordingMetrics {
    pub types: Mutex<Vec<(String, String)>>,
    pub statuses: Mutex<Vec<(String, u16)>>,
    pub paths: Mutex<Vec<(String, String)>>,
    pub fallbacks: Mutex<Vec<(String, FallbackMode)>>,
}

impl RecordingMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn types(&self) -> Vec<String> {
        self.types
            .lock()
            .unwrap()
            .iter()
            .map(|(_, t)| t.clone())
            .collect()
    }

    pub fn statuses(&self) -> Vec<u16> {
        self.statuses.lock().unwrap().iter().map(|(_, s)| *s).collect()
    }

    pub fn paths(&self) -> Vec<String> {
        self.paths
            .lock()
            .unwrap()
            .iter()
            .map(|(_, p)| p.clone())
            .collect()
    }

    pub fn fallbacks(&self) -> Vec<FallbackMode> {
        self.fallbacks.lock().unwrap().iter().map(|(_, m)| *m).collect()
    }
}

impl MetricsRecorder for RecordingMetrics {
    fn count_type(&self, host: &str, redirect_type: &str) {
        self.types
            .lock()
            .unwrap()
            .push((host.to_string(), redirect_type.to_string()));
    }

    fn count_status(&self, host: &str, status: u16) {
        self.statuses.lock().unwrap().push((host.to_string(), status));
    }

    fn count_path(&self, host: &str, path: &str) {
        self.paths
            .lock()
            .unwrap()
            .push((host.to_string(), path.to_string()));
    }

    fn count_fallback(&self, host: &str, mode: FallbackMode) {
        self.fallbacks.lock().unwrap().push((host.to_string(), mode));
    }
}

/// Proxy that answers with a fixed body or fails.
pub struct MockProxyForwarder {
    fail: bool,
    pub forwarded: Mutex<Vec<String>>,
}

impl MockProxyForwarder {
    pub fn new(fail: bool) -> Self {
        Self {
            fail,
            forwarded: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl ProxyForwarder for MockProxyForwarder {
    async fn forward(
        &self,
        sink: &mut ResponseSink,
        request: &RedirectRequest,
        record: &Record,
    ) -> Result<(), DomainError> {
        self.forwarded
            .lock()
            .unwrap()
            .push(format!("{}{}", record.to, request.path));
        if self.fail {
            return Err(DomainError::TypeHandler("upstream unreachable".to_string()));
        }
        sink.write(http::StatusCode::OK, "proxied");
        Ok(())
    }
}
