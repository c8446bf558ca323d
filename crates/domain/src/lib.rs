//! TXTDirect Domain Layer
pub mod config;
pub mod errors;
pub mod fallback;
pub mod host;
pub mod path_split;
pub mod placeholder;
pub mod record;
pub mod redirect_request;
pub mod resolution_context;

pub use config::{CliOverrides, Config, ConfigError};
pub use errors::{DomainError, ErrorCategory};
pub use fallback::{FallbackDirective, FallbackMode};
pub use path_split::{split_path, PathSplit};
pub use placeholder::expand_placeholders;
pub use record::{parse_record, Record, RedirectType};
pub use redirect_request::RedirectRequest;
pub use resolution_context::ResolutionContext;
