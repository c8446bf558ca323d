use bytes::Bytes;
use http::header::{HeaderName, HeaderValue, LOCATION};
use http::{HeaderMap, StatusCode};
use tracing::warn;

/// Header carrying the emitted status, mirrored on every redirect.
pub const STATUS_CODE_HEADER: &str = "Status-Code";

/// Seconds a permanent redirect may be cached by clients.
pub const PERMANENT_REDIRECT_MAX_AGE: u32 = 604_800;

/// Transport-independent response under construction.
///
/// Headers may accumulate across resolution hops; the status and body are
/// written exactly once. Writes after the first commit are dropped and logged.
#[derive(Debug, Clone)]
pub struct ResponseSink {
    status: StatusCode,
    headers: HeaderMap,
    body: Bytes,
    committed: bool,
}

impl ResponseSink {
    pub fn new() -> Self {
        Self {
            status: StatusCode::OK,
            headers: HeaderMap::new(),
            body: Bytes::new(),
            committed: false,
        }
    }

    pub fn is_committed(&self) -> bool {
        self.committed
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// Sets (replaces) a header. Invalid names or values are skipped.
    pub fn set_header(&mut self, name: &str, value: &str) {
        if self.committed {
            warn!(header = %name, "Header set after response was committed, ignored");
            return;
        }
        match (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(value),
        ) {
            (Ok(name), Ok(value)) => {
                self.headers.insert(name, value);
            }
            _ => warn!(header = %name, "Skipping invalid response header"),
        }
    }

    /// Commits a response with the given status and body.
    ///
    /// Returns false when a response was already committed.
    pub fn write(&mut self, status: StatusCode, body: impl Into<Bytes>) -> bool {
        if self.committed {
            warn!(status = %status, "Response already committed, dropping second write");
            return false;
        }
        self.status = status;
        self.body = body.into();
        self.committed = true;
        true
    }

    /// Commits a redirect to `location`.
    ///
    /// Codes outside the valid HTTP range degrade to 302.
    pub fn redirect(&mut self, location: &str, code: u16) -> bool {
        if self.committed {
            warn!(location = %location, "Response already committed, dropping redirect");
            return false;
        }
        let status = StatusCode::from_u16(code).unwrap_or_else(|_| {
            warn!(code, "Invalid redirect status, using 302");
            StatusCode::FOUND
        });
        match HeaderValue::from_str(location) {
            Ok(value) => {
                self.headers.insert(LOCATION, value);
            }
            Err(_) => warn!(location = %location, "Location is not a valid header value"),
        }
        self.write(status, Bytes::new())
    }

    /// Commits the plain-text 404 used by the blacklist and global fallback.
    pub fn not_found(&mut self) -> bool {
        self.write(StatusCode::NOT_FOUND, Bytes::from_static(b"404 page not found\n"))
    }

    pub fn into_parts(self) -> (StatusCode, HeaderMap, Bytes) {
        (self.status, self.headers, self.body)
    }
}

impl Default for ResponseSink {
    fn default() -> Self {
        Self::new()
    }
}
