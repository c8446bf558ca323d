use crate::ports::GoModsHandler;
use crate::response_sink::{ResponseSink, STATUS_CODE_HEADER};
use async_trait::async_trait;
use tracing::debug;
use txtdirect_domain::config::GoModsConfig;
use txtdirect_domain::{DomainError, RedirectRequest};

/// Sends Go module proxy requests on to the configured module proxy.
pub struct GoProxyRedirector {
    enabled: bool,
    upstream: String,
}

impl GoProxyRedirector {
    pub fn new(enabled: bool, upstream: impl Into<String>) -> Self {
        Self {
            enabled,
            upstream: upstream.into(),
        }
    }

    pub fn from_config(config: &GoModsConfig) -> Self {
        Self::new(config.enable, config.upstream.clone())
    }
}

#[async_trait]
impl GoModsHandler for GoProxyRedirector {
    async fn handle(
        &self,
        sink: &mut ResponseSink,
        request: &RedirectRequest,
        path: &str,
    ) -> Result<(), DomainError> {
        if !self.enabled {
            return Err(DomainError::TypeHandler(
                "gomods is not enabled in configuration".to_string(),
            ));
        }
        if path.is_empty() || path == "/" {
            return Err(DomainError::TypeHandler(
                "gomods needs a module path".to_string(),
            ));
        }

        let location = format!("{}{}", self.upstream.trim_end_matches('/'), path);
        debug!(host = %request.host, target = %location, "Redirecting module request");
        sink.set_header(STATUS_CODE_HEADER, "302");
        sink.redirect(&location, 302);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::StatusCode;

    #[tokio::test]
    async fn test_redirects_to_module_proxy() {
        let path = "/github.com/okkur/reposeed-server/@v/list";
        let request = RedirectRequest::new("GET", "mods.example.com", path);
        let mut sink = ResponseSink::new();

        GoProxyRedirector::new(true, "https://proxy.golang.org/")
            .handle(&mut sink, &request, path)
            .await
            .unwrap();

        assert_eq!(sink.status(), StatusCode::FOUND);
        assert_eq!(
            sink.header("Location"),
            Some("https://proxy.golang.org/github.com/okkur/reposeed-server/@v/list")
        );
    }

    #[tokio::test]
    async fn test_disabled_fails() {
        let request = RedirectRequest::new("GET", "mods.example.com", "/x/@v/list");
        let mut sink = ResponseSink::new();
        let result = GoProxyRedirector::from_config(&GoModsConfig::default())
            .handle(&mut sink, &request, "/x/@v/list")
            .await;
        assert!(matches!(result, Err(DomainError::TypeHandler(_))));
        assert!(!sink.is_committed());
    }
}
