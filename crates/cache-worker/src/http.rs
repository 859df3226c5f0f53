//! Request / Response Values
//!
//! Plain owned copies of what the fetch handler sees, so the cache policy
//! can run without a browser.

use serde::{Deserialize, Serialize};

/// `Request.destination`, reduced to what the policy cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Destination {
    Document,
    Script,
    Style,
    Image,
    Manifest,
    #[default]
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FetchRequest {
    pub url: String,
    pub method: String,
    pub destination: Destination,
    pub headers: Vec<(String, String)>,
    /// Only read for non-GET requests
    pub body: Option<Vec<u8>>,
}

impl FetchRequest {
    pub fn get(url: &str) -> Self {
        Self {
            url: url.to_string(),
            method: "GET".to_string(),
            destination: Destination::Other,
            headers: Vec::new(),
            body: None,
        }
    }

    /// GET for a top-level page load
    pub fn navigate(url: &str) -> Self {
        Self {
            destination: Destination::Document,
            ..Self::get(url)
        }
    }

    pub fn is_navigation(&self) -> bool {
        self.destination == Destination::Document
    }

    pub fn is_get(&self) -> bool {
        self.method.eq_ignore_ascii_case("GET")
    }
}

/// `Response.type`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseKind {
    /// Same-origin
    Basic,
    Cors,
    Opaque,
    Error,
    /// Built locally, e.g. the synthesized 503
    #[default]
    Default,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpResponse {
    pub status: u16,
    pub status_text: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
    pub kind: ResponseKind,
}

impl HttpResponse {
    /// Same-origin 200 with the given body
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        Self {
            status: 200,
            status_text: "OK".to_string(),
            headers: Vec::new(),
            body: body.into(),
            kind: ResponseKind::Basic,
        }
    }

    /// The response handed out when neither cache nor network can answer
    pub fn service_unavailable() -> Self {
        Self {
            status: 503,
            status_text: "Service Unavailable".to_string(),
            headers: vec![("Content-Type".to_string(), "text/plain".to_string())],
            body: b"Offline".to_vec(),
            kind: ResponseKind::Default,
        }
    }

    /// Only complete same-origin responses are worth keeping
    pub fn is_cacheable(&self) -> bool {
        self.status == 200 && self.kind == ResponseKind::Basic
    }

    pub fn with_kind(mut self, kind: ResponseKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cacheable_requires_basic_200() {
        assert!(HttpResponse::ok("x").is_cacheable());
        assert!(!HttpResponse::ok("x").with_status(404).is_cacheable());
        assert!(!HttpResponse::ok("x").with_kind(ResponseKind::Cors).is_cacheable());
        assert!(!HttpResponse::ok("x").with_kind(ResponseKind::Opaque).is_cacheable());
    }

    #[test]
    fn test_request_kinds() {
        assert!(FetchRequest::navigate("/").is_navigation());
        assert!(!FetchRequest::get("/app.js").is_navigation());
        let post = FetchRequest { method: "post".to_string(), ..FetchRequest::get("/api") };
        assert!(!post.is_get());
    }
}
