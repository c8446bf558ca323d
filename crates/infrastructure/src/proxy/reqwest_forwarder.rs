use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Method};
use std::time::Duration;
use tracing::{debug, instrument};
use txtdirect_application::ports::ProxyForwarder;
use txtdirect_application::ResponseSink;
use txtdirect_domain::{expand_placeholders, DomainError, Record, RedirectRequest};
use url::Url;

pub const PROXY_TIMEOUT: Duration = Duration::from_secs(30);

const PROXY_KEEPALIVE: Duration = Duration::from_secs(30);

/// Connection-scoped headers (RFC 7230 §6.1) that must not cross the proxy.
const HOP_BY_HOP: [&str; 9] = [
    "connection",
    "keep-alive",
    "proxy-authenticate",
    "proxy-authorization",
    "te",
    "trailer",
    "transfer-encoding",
    "upgrade",
    "host",
];

pub struct ReqwestProxyForwarder {
    client: Client,
}

impl ReqwestProxyForwarder {
    pub fn new() -> Result<Self, DomainError> {
        let client = Client::builder()
            .timeout(PROXY_TIMEOUT)
            .tcp_keepalive(PROXY_KEEPALIVE)
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| DomainError::TypeHandler(format!("Failed to build proxy client: {}", e)))?;
        Ok(Self { client })
    }

    /// The record target with the request path appended below its own path,
    /// and the request query when the target carries none.
    pub fn upstream_url(to: &str, request: &RedirectRequest) -> Result<Url, DomainError> {
        let mut url =
            Url::parse(to).map_err(|e| DomainError::InvalidUri(format!("{}: {}", to, e)))?;

        let base = url.path().trim_end_matches('/').to_string();
        url.set_path(&format!("{}{}", base, request.path));
        if url.query().is_none() && !request.query.is_empty() {
            url.set_query(Some(&request.query));
        }
        Ok(url)
    }

    fn forwarded_headers(request: &RedirectRequest) -> HeaderMap {
        let mut headers = HeaderMap::new();
        for (name, value) in &request.headers {
            if HOP_BY_HOP.iter().any(|h| name.eq_ignore_ascii_case(h)) {
                continue;
            }
            if let (Ok(name), Ok(value)) = (
                HeaderName::from_bytes(name.as_bytes()),
                HeaderValue::from_str(value),
            ) {
                headers.append(name, value);
            }
        }
        if let Ok(host) = HeaderValue::from_str(&request.host) {
            headers.insert("X-Forwarded-Host", host);
        }
        if let Ok(scheme) = HeaderValue::from_str(&request.scheme) {
            headers.insert("X-Forwarded-Proto", scheme);
        }
        headers
    }
}

#[async_trait]
impl ProxyForwarder for ReqwestProxyForwarder {
    #[instrument(skip_all, fields(host = %request.host, target = %record.to))]
    async fn forward(
        &self,
        sink: &mut ResponseSink,
        request: &RedirectRequest,
        record: &Record,
    ) -> Result<(), DomainError> {
        let to = expand_placeholders(&record.to, request, &[])?;
        let url = Self::upstream_url(&to, request)?;
        let method = Method::from_bytes(request.method.as_bytes())
            .map_err(|e| DomainError::TypeHandler(format!("Invalid method: {}", e)))?;

        debug!(url = %url, method = %method, "Proxying request");

        let response = self
            .client
            .request(method, url.clone())
            .headers(Self::forwarded_headers(request))
            .body(request.body.clone())
            .send()
            .await
            .map_err(|e| DomainError::TypeHandler(format!("Proxy request to {} failed: {}", url, e)))?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .bytes()
            .await
            .map_err(|e| DomainError::TypeHandler(format!("Reading proxy response failed: {}", e)))?;

        for (name, value) in &headers {
            if HOP_BY_HOP.contains(&name.as_str()) {
                continue;
            }
            if let Ok(value) = value.to_str() {
                sink.set_header(name.as_str(), value);
            }
        }
        sink.write(status, body);

        debug!(status = status.as_u16(), "Proxy response copied");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_url_appends_path_and_query() {
        let request = RedirectRequest::new("GET", "example.com", "/a/b").with_query("x=1");
        let url = ReqwestProxyForwarder::upstream_url("https://backend.test/base/", &request).unwrap();
        assert_eq!(url.as_str(), "https://backend.test/base/a/b?x=1");
    }

    #[test]
    fn test_upstream_url_keeps_target_query() {
        let request = RedirectRequest::new("GET", "example.com", "/").with_query("x=1");
        let url = ReqwestProxyForwarder::upstream_url("https://backend.test?y=2", &request).unwrap();
        assert_eq!(url.as_str(), "https://backend.test/?y=2");
    }

    #[test]
    fn test_hop_by_hop_headers_are_dropped() {
        let request = RedirectRequest::new("GET", "example.com", "/")
            .with_scheme("http")
            .with_header("Connection", "keep-alive")
            .with_header("Host", "example.com")
            .with_header("Accept", "text/html");
        let headers = ReqwestProxyForwarder::forwarded_headers(&request);

        assert!(headers.get("connection").is_none());
        assert!(headers.get("host").is_none());
        assert_eq!(headers.get("accept").unwrap(), "text/html");
        assert_eq!(headers.get("x-forwarded-host").unwrap(), "example.com");
        assert_eq!(headers.get("x-forwarded-proto").unwrap(), "http");
    }
}
