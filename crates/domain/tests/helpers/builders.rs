#![allow(dead_code)]
use txtdirect_domain::{RedirectRequest, RedirectType};

pub struct RequestBuilder {
    method: String,
    host: String,
    path: String,
    query: String,
    headers: Vec<(String, String)>,
}

impl RequestBuilder {
    pub fn new() -> Self {
        Self {
            method: "GET".to_string(),
            host: "example.com".to_string(),
            path: "/".to_string(),
            query: String::new(),
            headers: Vec::new(),
        }
    }

    pub fn host(mut self, host: &str) -> Self {
        self.host = host.to_string();
        self
    }

    pub fn path(mut self, path: &str) -> Self {
        self.path = path.to_string();
        self
    }

    pub fn query(mut self, query: &str) -> Self {
        self.query = query.to_string();
        self
    }

    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    pub fn build(self) -> RedirectRequest {
        let mut request = RedirectRequest::new(self.method.as_str(), self.host.as_str(), &self.path)
            .with_query(&self.query);
        for (name, value) in &self.headers {
            request = request.with_header(name, value);
        }
        request
    }
}

impl Default for RequestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn all_types() -> Vec<RedirectType> {
    RedirectType::KNOWN.to_vec()
}

pub fn default_types() -> Vec<RedirectType> {
    vec![RedirectType::Host, RedirectType::Path, RedirectType::GoMeta]
}
