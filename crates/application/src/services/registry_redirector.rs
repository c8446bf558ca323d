use crate::ports::DockerV2Handler;
use crate::response_sink::{ResponseSink, STATUS_CODE_HEADER};
use async_trait::async_trait;
use http::StatusCode;
use tracing::debug;
use txtdirect_domain::host::strip_port;
use txtdirect_domain::{DomainError, Record, RedirectRequest};
use url::Url;

const API_VERSION_HEADER: &str = "Docker-Distribution-API-Version";
const API_VERSION: &str = "registry/2.0";
const OPERATIONS: [&str; 3] = ["manifests", "blobs", "tags"];

/// Answers the Docker registry v2 ping and redirects image operations to the
/// registry named by `to=`.
#[derive(Debug, Default, Clone, Copy)]
pub struct RegistryRedirector;

impl RegistryRedirector {
    pub fn new() -> Self {
        Self
    }

    /// Image namespace contributed by the host labels in front of the
    /// upstream suffix, most significant label first:
    /// `app.team.example.com` under `example.com` gives `team/app`.
    fn namespace(host: &str, upstream_zone: Option<&str>) -> Option<String> {
        let host = strip_port(host).trim_end_matches('.');
        let suffix = upstream_zone?.trim_end_matches('.');
        let front = host.strip_suffix(suffix)?.strip_suffix('.')?;
        if front.is_empty() {
            return None;
        }
        Some(front.rsplit('.').collect::<Vec<_>>().join("/"))
    }

    fn split_operation(rest: &str) -> Result<(String, String), DomainError> {
        let segments: Vec<&str> = rest.split('/').filter(|s| !s.is_empty()).collect();
        let index = segments
            .iter()
            .position(|s| OPERATIONS.contains(s))
            .filter(|&i| i > 0)
            .ok_or_else(|| {
                DomainError::TypeHandler(format!("Not a registry v2 image path: /v2/{}", rest))
            })?;
        Ok((segments[..index].join("/"), segments[index..].join("/")))
    }

    fn location(
        request: &RedirectRequest,
        record: &Record,
        upstream_zone: Option<&str>,
    ) -> Result<String, DomainError> {
        let rest = request
            .path
            .strip_prefix("/v2/")
            .ok_or_else(|| DomainError::TypeHandler(format!("Not a registry path: {}", request.path)))?;
        let (name, operation) = Self::split_operation(rest)?;

        let registry = Url::parse(&record.to)
            .map_err(|e| DomainError::InvalidUri(format!("{}: {}", record.to, e)))?;
        let registry_host = registry
            .host_str()
            .ok_or_else(|| DomainError::InvalidUri(record.to.clone()))?;
        let authority = match registry.port() {
            Some(port) => format!("{}:{}", registry_host, port),
            None => registry_host.to_string(),
        };

        let fixed_image = registry.path().trim_matches('/');
        let image = if !fixed_image.is_empty() {
            fixed_image.to_string()
        } else {
            match Self::namespace(&request.host, upstream_zone) {
                Some(namespace) => format!("{}/{}", namespace, name),
                None => name,
            }
        };

        Ok(format!(
            "{}://{}/v2/{}/{}",
            registry.scheme(),
            authority,
            image,
            operation
        ))
    }
}

#[async_trait]
impl DockerV2Handler for RegistryRedirector {
    async fn handle(
        &self,
        sink: &mut ResponseSink,
        request: &RedirectRequest,
        record: &Record,
        upstream_zone: Option<&str>,
    ) -> Result<(), DomainError> {
        if record.to.is_empty() {
            return Err(DomainError::MissingTarget("dockerv2"));
        }

        if request.path == "/v2" || request.path == "/v2/" {
            sink.set_header(API_VERSION_HEADER, API_VERSION);
            sink.write(StatusCode::OK, "{}");
            return Ok(());
        }

        let location = Self::location(request, record, upstream_zone)?;
        debug!(host = %request.host, target = %location, "Redirecting registry request");
        sink.set_header(API_VERSION_HEADER, API_VERSION);
        sink.set_header(STATUS_CODE_HEADER, "302");
        sink.redirect(&location, 302);
        Ok(())
    }
}
