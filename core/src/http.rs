//! HTTP messages as plain data.
//!
//! # Design
//! `HttpRequest` and `HttpResponse` describe one HTTP exchange without any
//! I/O attached. The endpoint layer builds requests and interprets responses;
//! only `Transport::execute` ever touches the network. Keeping the boundary
//! as owned data makes every build/parse path testable without a server.

/// HTTP method for a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

/// One request, fully described: absolute URL, headers, optional body.
///
/// Built by `CompteEndpoint::build_*` methods and executed by
/// `Transport::execute`.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

/// One response: status and body, with whatever headers came back.
///
/// Produced by `Transport::execute` and consumed by `CompteEndpoint::parse_*`
/// methods for status interpretation and deserialization.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    /// Any 2xx counts as success; the client does not interpret status codes
    /// more finely than success/failure (404 excepted, see `ApiError`).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}
