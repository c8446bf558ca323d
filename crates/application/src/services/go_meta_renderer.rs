use crate::ports::GoMetaHandler;
use crate::response_sink::ResponseSink;
use http::StatusCode;
use txtdirect_domain::{DomainError, Record};

const DEFAULT_VCS: &str = "git";

/// Renders the `go-import` page `go get` asks for with `?go-get=1`.
#[derive(Debug, Default, Clone, Copy)]
pub struct GoMetaRenderer;

impl GoMetaRenderer {
    pub fn new() -> Self {
        Self
    }

    fn page(import_prefix: &str, vcs: &str, repo: &str) -> String {
        format!(
            "<!DOCTYPE html>\n<html>\n<head>\n\
             <meta name=\"go-import\" content=\"{} {} {}\">\n\
             </head>\n<body>\ngo get {}\n</body>\n</html>\n",
            escape(import_prefix),
            escape(vcs),
            escape(repo),
            escape(import_prefix)
        )
    }
}

impl GoMetaHandler for GoMetaRenderer {
    fn render(
        &self,
        sink: &mut ResponseSink,
        record: &Record,
        host: &str,
        path: &str,
    ) -> Result<(), DomainError> {
        if record.to.is_empty() {
            return Err(DomainError::MissingTarget("gometa"));
        }
        let vcs = if record.vcs.is_empty() {
            DEFAULT_VCS
        } else {
            record.vcs.as_str()
        };
        let import_prefix = format!("{}{}", host, path.trim_end_matches('/'));

        sink.set_header("Content-Type", "text/html; charset=utf-8");
        sink.write(StatusCode::OK, Self::page(&import_prefix, vcs, &record.to));
        Ok(())
    }
}

fn escape(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
