use crate::state::AppState;
use axum::{
    body::{Body, Bytes},
    extract::State,
    http::{header, HeaderMap, Method, Uri},
    response::Response,
};
use tracing::{debug, instrument};
use txtdirect_domain::RedirectRequest;

const DEFAULT_SCHEME: &str = "http";

#[instrument(skip_all, name = "handle_redirect", fields(method = %method, uri = %uri))]
pub async fn handle_redirect(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let request = redirect_request(&method, &uri, &headers, body);
    let sink = state.redirect.execute(&request).await;

    let (status, response_headers, body) = sink.into_parts();
    debug!(host = %request.host, status = status.as_u16(), "Response ready");

    let mut response = Response::new(Body::from(body));
    *response.status_mut() = status;
    *response.headers_mut() = response_headers;
    response
}

/// Builds the transport-independent request view.
///
/// Host comes from the `Host` header, then the URI authority. Scheme comes
/// from `X-Forwarded-Proto`, then the URI, then plain http.
pub fn redirect_request(
    method: &Method,
    uri: &Uri,
    headers: &HeaderMap,
    body: Bytes,
) -> RedirectRequest {
    let host = headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .or_else(|| uri.authority().map(|a| a.to_string()))
        .unwrap_or_default();

    let scheme = headers
        .get("x-forwarded-proto")
        .and_then(|v| v.to_str().ok())
        .or_else(|| uri.scheme_str())
        .unwrap_or(DEFAULT_SCHEME)
        .to_string();

    let mut request = RedirectRequest::new(method.as_str(), host, uri.path())
        .with_scheme(scheme)
        .with_query(uri.query().unwrap_or(""))
        .with_body(body.to_vec());

    for (name, value) in headers {
        if let Ok(value) = value.to_str() {
            request = request.with_header(name.as_str(), value);
        }
    }
    request
}
