#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use txtdirect_application::ports::TxtResolver;
use txtdirect_domain::DomainError;

/// Zones missing from the map answer like NXDOMAIN.
#[derive(Clone, Default)]
pub struct MockTxtResolver {
    zones: Arc<RwLock<HashMap<String, Vec<String>>>>,
}

impl MockTxtResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_record(self, zone: &str, txt: &str) -> Self {
        self.zones
            .write()
            .unwrap()
            .insert(zone.to_string(), vec![txt.to_string()]);
        self
    }
}

#[async_trait]
impl TxtResolver for MockTxtResolver {
    async fn lookup_txt(&self, zone: &str) -> Result<Vec<String>, DomainError> {
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
