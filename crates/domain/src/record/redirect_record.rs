use super::RedirectType;
use std::collections::HashMap;

/// Status used when a record carries no `code=` directive.
pub const DEFAULT_REDIRECT_CODE: u16 = 302;

/// The only directive language version understood by the parser.
pub const SUPPORTED_VERSION: &str = "txtv0";

/// A validated set of redirect directives read from one TXT answer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Record {
    pub version: String,
    pub to: String,
    pub root: String,
    pub website: String,
    pub code: u16,
    /// `None` only while a `use=` pointer record has no type of its own.
    pub redirect_type: Option<RedirectType>,
    /// Upstream zones, tried in declaration order.
    pub use_zones: Vec<String>,
    pub vcs: String,
    pub from: String,
    pub re: String,
    pub referrer: bool,
    pub headers: HashMap<String, String>,
}

impl Record {
    pub fn is_upstream_pointer(&self) -> bool {
        !self.use_zones.is_empty()
    }

    pub fn type_name(&self) -> &str {
        self.redirect_type
            .as_ref()
            .map(RedirectType::as_str)
            .unwrap_or("")
    }

    pub fn has_conflicting_aliases(&self) -> bool {
        !self.from.is_empty() && !self.re.is_empty()
    }
}
