use crate::record::Record;

/// Per-request accumulator of every record resolved so far.
///
/// Threaded explicitly through zone, upstream and path resolution; dropped
/// together with the request.
#[derive(Debug, Clone, Default)]
pub struct ResolutionContext {
    pub records: Vec<Record>,
    /// Upstream zone with its first label stripped, set only after `use=`
    /// indirection succeeded.
    pub upstream_zone: Option<String>,
}

impl ResolutionContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: Record) {
        self.records.push(record);
    }

    pub fn has_records(&self) -> bool {
        !self.records.is_empty()
    }

    pub fn last(&self) -> Option<&Record> {
        self.records.last()
    }

    /// Most recent non-empty `to=` target.
    pub fn last_to(&self) -> Option<&Record> {
        self.records.iter().rev().find(|r| !r.to.is_empty())
    }

    /// Most recent non-empty `website=` target.
    pub fn last_website(&self) -> Option<&Record> {
        self.records.iter().rev().find(|r| !r.website.is_empty())
    }
}
