use crate::fallback::{FallbackDirective, FallbackMode};
use thiserror::Error;

/// Coarse classification used for logging and metrics labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    DnsResolutionExhausted,
    RecordSyntax,
    RecordPolicy,
    UpstreamExhausted,
    TypeHandler,
    UnsupportedType,
}

impl ErrorCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::DnsResolutionExhausted => "dns_resolution_exhausted",
            ErrorCategory::RecordSyntax => "record_syntax",
            ErrorCategory::RecordPolicy => "record_policy",
            ErrorCategory::UpstreamExhausted => "upstream_exhausted",
            ErrorCategory::TypeHandler => "type_handler",
            ErrorCategory::UnsupportedType => "unsupported_type",
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Could not parse status code: {0}")]
    InvalidStatusCode(String),

    #[error("Unhandled version '{0}'")]
    UnsupportedVersion(String),

    #[error("Arbitrary data not allowed: {0}")]
    ArbitraryData(String),

    #[error("TXT record cannot exceed the maximum of 255 characters ({0} given)")]
    DirectiveTooLong(usize),

    #[error("The given zone address is invalid: {0}")]
    InvalidUpstreamZone(String),

    #[error("Could not decode header directive: {0}")]
    InvalidHeaderValue(String),

    #[error("Invalid URI: {0}")]
    InvalidUri(String),

    #[error("Could not parse referrer flag: {0}")]
    InvalidReferrerFlag(String),

    #[error("Invalid placeholder: {0}")]
    InvalidPlaceholder(String),

    #[error("to= field is required in {0} type")]
    MissingTarget(&'static str),

    #[error("{0} type is not enabled in configuration")]
    TypeDisabled(String),

    #[error("It's not allowed to use both re= and from= in a record")]
    ConflictingAliases,

    #[error("Could not derive a zone from path {path}: {reason}")]
    InvalidPath { path: String, reason: String },

    #[error("Could not get TXT record for {zone}: {reason}")]
    DnsQuery { zone: String, reason: String },

    #[error("Could not parse TXT record with {count} records at {zone}")]
    AmbiguousRecord { zone: String, count: usize },

    #[error("Could not resolve a record for {0}")]
    ResolutionExhausted(String),

    #[error("Couldn't find any records from upstream")]
    UpstreamExhausted,

    #[error("Type handler failed: {0}")]
    TypeHandler(String),

    #[error("Record type {0} unsupported")]
    UnsupportedType(String),
}

impl DomainError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            DomainError::InvalidStatusCode(_)
            | DomainError::UnsupportedVersion(_)
            | DomainError::ArbitraryData(_)
            | DomainError::DirectiveTooLong(_)
            | DomainError::InvalidUpstreamZone(_)
            | DomainError::InvalidHeaderValue(_)
            | DomainError::InvalidUri(_)
            | DomainError::InvalidReferrerFlag(_)
            | DomainError::InvalidPlaceholder(_) => ErrorCategory::RecordSyntax,

            DomainError::MissingTarget(_)
            | DomainError::TypeDisabled(_)
            | DomainError::ConflictingAliases
            | DomainError::InvalidPath { .. } => ErrorCategory::RecordPolicy,

            DomainError::DnsQuery { .. }
            | DomainError::AmbiguousRecord { .. }
            | DomainError::ResolutionExhausted(_) => ErrorCategory::DnsResolutionExhausted,

            DomainError::UpstreamExhausted => ErrorCategory::UpstreamExhausted,
            DomainError::TypeHandler(_) => ErrorCategory::TypeHandler,
            DomainError::UnsupportedType(_) => ErrorCategory::UnsupportedType,
        }
    }

    /// Fallback to apply when this error aborts record resolution.
    ///
    /// Malformed `to=`/`root=`/`website=`/`ref=` values and a host record
    /// without a target answer with a permanent global fallback; every other
    /// resolution failure uses a temporary one.
    pub fn fallback(&self) -> FallbackDirective {
        if self.is_terminal() {
            FallbackDirective::new(FallbackMode::Global, 301)
        } else {
            FallbackDirective::new(FallbackMode::Global, 302)
        }
    }

    /// A record that parsed this far already decided the response: no other
    /// zone may be tried in its place.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            DomainError::InvalidUri(_)
                | DomainError::InvalidReferrerFlag(_)
                | DomainError::MissingTarget("host")
        )
    }
}
