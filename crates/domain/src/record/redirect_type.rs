use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Dispatch target selected by a record's `type=` directive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum RedirectType {
    Host,
    Path,
    Proxy,
    DockerV2,
    GoMeta,
    GoMods,
    Unsupported(String),
}

impl RedirectType {
    pub const KNOWN: [RedirectType; 6] = [
        RedirectType::Host,
        RedirectType::Path,
        RedirectType::Proxy,
        RedirectType::DockerV2,
        RedirectType::GoMeta,
        RedirectType::GoMods,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            RedirectType::Host => "host",
            RedirectType::Path => "path",
            RedirectType::Proxy => "proxy",
            RedirectType::DockerV2 => "dockerv2",
            RedirectType::GoMeta => "gometa",
            RedirectType::GoMods => "gomods",
            RedirectType::Unsupported(name) => name,
        }
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self, RedirectType::Unsupported(_))
    }

    /// Lenient conversion used by the parser: unknown names are kept.
    pub fn from_directive(value: &str) -> Self {
        match value {
            "host" => RedirectType::Host,
            "path" => RedirectType::Path,
            "proxy" => RedirectType::Proxy,
            "dockerv2" => RedirectType::DockerV2,
            "gometa" => RedirectType::GoMeta,
            "gomods" => RedirectType::GoMods,
            other => RedirectType::Unsupported(other.to_string()),
        }
    }
}

impl fmt::Display for RedirectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Strict conversion used for configuration: unknown names are rejected.
impl FromStr for RedirectType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match RedirectType::from_directive(s) {
            RedirectType::Unsupported(name) => Err(format!("Unknown redirect type: {}", name)),
            known => Ok(known),
        }
    }
}

impl TryFrom<String> for RedirectType {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<RedirectType> for String {
    fn from(value: RedirectType) -> Self {
        value.as_str().to_string()
    }
}
