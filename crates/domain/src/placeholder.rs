//! `{token}` expansion for directive values.
//!
//! Supported tokens: `{host}`, `{hostonly}`, `{method}`, `{scheme}`, `{path}`,
//! `{query}`, `{uri}`, `{dir}`, `{file}`, `{labelN}`, `{?param}`, `{>Header}`.
//! Unknown tokens are kept verbatim.

use crate::host::strip_port;
use crate::{DomainError, RedirectRequest};

pub fn expand_placeholders(
    template: &str,
    request: &RedirectRequest,
    exclusions: &[&str],
) -> Result<String, DomainError> {
    if !template.contains('{') {
        return Ok(template.to_string());
    }

    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let close = after
            .find('}')
            .ok_or_else(|| DomainError::InvalidPlaceholder(template.to_string()))?;
        let token = &after[..close];

        if exclusions.contains(&token) {
            out.push('{');
            out.push_str(token);
            out.push('}');
        } else {
            match resolve_token(token, request) {
                Some(value) => out.push_str(&value),
                None => {
                    out.push('{');
                    out.push_str(token);
                    out.push('}');
                }
            }
        }
        rest = &after[close + 1..];
    }
    out.push_str(rest);

    Ok(out)
}

fn resolve_token(token: &str, request: &RedirectRequest) -> Option<String> {
    let path = request.path.as_str();
    let value = match token {
        "host" => request.host.to_string(),
        "hostonly" => strip_port(&request.host).to_string(),
        "method" => request.method.to_string(),
        "scheme" => request.scheme.to_string(),
        "path" => path.to_string(),
        "query" => request.query.clone(),
        "uri" => request.uri(),
        "dir" => match path.rfind('/') {
            Some(idx) => path[..=idx].to_string(),
            None => String::new(),
        },
        "file" => match path.rfind('/') {
            Some(idx) => path[idx + 1..].to_string(),
            None => path.to_string(),
        },
        _ => {
            if let Some(key) = token.strip_prefix('?') {
                request.query_param(key).unwrap_or_default()
            } else if let Some(name) = token.strip_prefix('>') {
                request.header(name).unwrap_or("").to_string()
            } else if let Some(n) = token.strip_prefix("label") {
                let index: usize = n.parse().ok()?;
                strip_port(&request.host)
                    .split('.')
                    .nth(index.checked_sub(1)?)
                    .unwrap_or("")
                    .to_string()
            } else {
                return None;
            }
        }
    };
    Some(value)
}
