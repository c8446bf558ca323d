pub mod parser;
mod redirect_record;
mod redirect_type;

pub use parser::{parse_record, MAX_DIRECTIVE_LEN, UPSTREAM_ZONE_PREFIX};
pub use redirect_record::{Record, DEFAULT_REDIRECT_CODE, SUPPORTED_VERSION};
pub use redirect_type::RedirectType;
