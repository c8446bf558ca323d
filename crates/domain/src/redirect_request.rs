use std::sync::Arc;

/// Transport-independent view of an inbound HTTP request.
#[derive(Debug, Clone)]
pub struct RedirectRequest {
    pub method: Arc<str>,
    pub scheme: Arc<str>,
    /// Host as sent by the client, possibly with a port.
    pub host: Arc<str>,
    pub path: String,
    /// Raw query string without the leading `?`.
    pub query: String,
    pub headers: Vec<(String, String)>,
    /// Request body, only consumed by the proxy type.
    pub body: Vec<u8>,
}

impl RedirectRequest {
    pub fn new(method: impl Into<Arc<str>>, host: impl Into<Arc<str>>, path: &str) -> Self {
        Self {
            method: method.into(),
            scheme: Arc::from("https"),
            host: host.into(),
            path: if path.is_empty() { "/".to_string() } else { path.to_string() },
            query: String::new(),
            headers: Vec::new(),
            body: Vec::new(),
        }
    }

    pub fn with_scheme(mut self, scheme: impl Into<Arc<str>>) -> Self {
        self.scheme = scheme.into();
        self
    }

    pub fn with_query(mut self, query: &str) -> Self {
        self.query = query.trim_start_matches('?').to_string();
        self
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    /// Case-insensitive header lookup, first value wins.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn user_agent(&self) -> &str {
        self.header("User-Agent").unwrap_or("")
    }

    /// First value of a query parameter, percent-decoded.
    pub fn query_param(&self, key: &str) -> Option<String> {
        self.query
            .split('&')
            .filter(|pair| !pair.is_empty())
            .map(|pair| pair.split_once('=').unwrap_or((pair, "")))
            .find(|(k, _)| decode_component(k) == key)
            .map(|(_, v)| decode_component(v))
    }

    /// Path plus `?query` when a query is present.
    pub fn uri(&self) -> String {
        if self.query.is_empty() {
            self.path.clone()
        } else {
            format!("{}?{}", self.path, self.query)
        }
    }
}

fn decode_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    urlencoding::decode(&spaced)
        .map(|s| s.into_owned())
        .unwrap_or(spaced)
}
