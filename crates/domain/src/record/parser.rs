//! TXT directive parser.
//!
//! Turns `v=txtv0;to=https://example.com;code=301;>X-Team=core` into a
//! [`Record`]. The parser never writes responses: conditions that must end in
//! a fallback are reported through [`DomainError::fallback`].

use super::redirect_record::{DEFAULT_REDIRECT_CODE, SUPPORTED_VERSION};
use super::{Record, RedirectType};
use crate::placeholder::expand_placeholders;
use crate::{DomainError, RedirectRequest};
use tracing::warn;
use url::Url;

/// DNS TXT character-strings are limited to 255 octets.
pub const MAX_DIRECTIVE_LEN: usize = 255;

/// Every `use=` target must live under this prefix.
pub const UPSTREAM_ZONE_PREFIX: &str = "_redirect.";

enum Directive<'a> {
    Code(&'a str),
    From(&'a str),
    Re(&'a str),
    Ref(&'a str),
    Root(&'a str),
    To(&'a str),
    Type(&'a str),
    Use(&'a str),
    Version(&'a str),
    Vcs(&'a str),
    Website(&'a str),
    Header(&'a str),
}

impl<'a> Directive<'a> {
    fn classify(segment: &'a str) -> Option<Self> {
        if let Some(header) = segment.strip_prefix('>') {
            return Some(Directive::Header(header));
        }

        let (key, value) = segment.split_once('=')?;
        let directive = match key {
            "code" => Directive::Code(value),
            "from" => Directive::From(value),
            "re" => Directive::Re(value),
            "ref" => Directive::Ref(value),
            "root" => Directive::Root(value),
            "to" => Directive::To(value),
            "type" => Directive::Type(value),
            "use" => Directive::Use(value),
            "v" => Directive::Version(value),
            "vcs" => Directive::Vcs(value),
            "website" => Directive::Website(value),
            _ => return None,
        };
        Some(directive)
    }
}

/// Parses one TXT answer into a validated record.
///
/// `enabled` is the set of redirect types allowed by configuration; it is not
/// consulted for records that point to upstream zones with `use=`.
pub fn parse_record(
    text: &str,
    request: &RedirectRequest,
    enabled: &[RedirectType],
) -> Result<Record, DomainError> {
    let mut record = Record::default();

    for segment in text.split(';').map(str::trim) {
        if segment.is_empty() {
            continue;
        }

        let Some(directive) = Directive::classify(segment) else {
            if segment.matches('=').count() != 1 {
                return Err(DomainError::ArbitraryData(segment.to_string()));
            }
            continue;
        };

        if segment.len() > MAX_DIRECTIVE_LEN {
            return Err(DomainError::DirectiveTooLong(segment.len()));
        }

        apply_directive(&mut record, directive, request)?;
    }

    finalize(record, enabled)
}

fn apply_directive(
    record: &mut Record,
    directive: Directive<'_>,
    request: &RedirectRequest,
) -> Result<(), DomainError> {
    match directive {
        Directive::Code(value) => {
            record.code = value
                .parse()
                .map_err(|_| DomainError::InvalidStatusCode(value.to_string()))?;
        }
        Directive::From(value) => {
            record.from = expand_placeholders(value, request, &[])?;
        }
        Directive::Re(value) => {
            record.re = value.to_string();
        }
        Directive::Ref(value) => {
            record.referrer = parse_bool(value)
                .ok_or_else(|| DomainError::InvalidReferrerFlag(value.to_string()))?;
        }
        Directive::Root(value) => {
            record.root = validate_uri(expand_placeholders(value, request, &[])?)?;
        }
        Directive::To(value) => {
            record.to = validate_uri(expand_placeholders(value, request, &[])?)?;
        }
        Directive::Type(value) => {
            record.redirect_type = Some(RedirectType::from_directive(value));
        }
        Directive::Use(value) => {
            if !value.starts_with(UPSTREAM_ZONE_PREFIX) {
                return Err(DomainError::InvalidUpstreamZone(value.to_string()));
            }
            record.use_zones.push(value.to_string());
        }
        Directive::Version(value) => {
            if value != SUPPORTED_VERSION {
                return Err(DomainError::UnsupportedVersion(value.to_string()));
            }
            record.version = value.to_string();
            warn!("{} is not suitable for production", SUPPORTED_VERSION);
        }
        Directive::Vcs(value) => {
            record.vcs = value.to_string();
        }
        Directive::Website(value) => {
            record.website = validate_uri(value.to_string())?;
        }
        Directive::Header(raw) => {
            let (name, value) = raw
                .split_once('=')
                .ok_or_else(|| DomainError::InvalidHeaderValue(raw.to_string()))?;
            if name.is_empty() {
                return Err(DomainError::InvalidHeaderValue(raw.to_string()));
            }
            record
                .headers
                .insert(name.to_string(), percent_decode(value)?);
        }
    }
    Ok(())
}

fn finalize(mut record: Record, enabled: &[RedirectType]) -> Result<Record, DomainError> {
    if record.redirect_type == Some(RedirectType::DockerV2) && record.to.is_empty() {
        return Err(DomainError::MissingTarget("dockerv2"));
    }

    if record.code == 0 {
        record.code = DEFAULT_REDIRECT_CODE;
    }

    // Pointer records are validated once the upstream record is known.
    if record.is_upstream_pointer() {
        return Ok(record);
    }

    let redirect_type = record
        .redirect_type
        .get_or_insert(RedirectType::Host)
        .clone();

    if redirect_type == RedirectType::Host && record.to.is_empty() {
        return Err(DomainError::MissingTarget("host"));
    }

    if !enabled.contains(&redirect_type) {
        return Err(DomainError::TypeDisabled(redirect_type.to_string()));
    }

    Ok(record)
}

fn parse_bool(value: &str) -> Option<bool> {
    match value {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

/// Accepts absolute URIs and relative references; the value is kept as written.
fn validate_uri(value: String) -> Result<String, DomainError> {
    if value.is_empty() {
        return Ok(value);
    }
    match Url::parse(&value) {
        Ok(_) => Ok(value),
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            let base = Url::parse("http://localhost/").map_err(|e| {
                DomainError::InvalidUri(format!("{}: {}", value, e))
            })?;
            base.join(&value)
                .map(|_| value.clone())
                .map_err(|e| DomainError::InvalidUri(format!("{}: {}", value, e)))
        }
        Err(e) => Err(DomainError::InvalidUri(format!("{}: {}", value, e))),
    }
}

/// Strict percent-decoding: every `%` must introduce two hex digits.
fn percent_decode(value: &str) -> Result<String, DomainError> {
    // urlencoding::decode passes malformed escapes through unchanged.
    let bytes = value.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let valid = bytes.len() > i + 2
                && bytes[i + 1].is_ascii_hexdigit()
                && bytes[i + 2].is_ascii_hexdigit();
            if !valid {
                return Err(DomainError::InvalidHeaderValue(value.to_string()));
            }
            i += 3;
        } else {
            i += 1;
        }
    }
    urlencoding::decode(value)
        .map(|s| s.into_owned())
        .map_err(|e| DomainError::InvalidHeaderValue(format!("{}: {}", value, e)))
}
