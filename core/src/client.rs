//! Transport clients and the per-format client factory.
//!
//! # Design
//! A `Transport` binds one `reqwest::Client` to one wire format; it executes
//! `HttpRequest` values exactly as the endpoint built them, one attempt, no
//! retry. `ClientFactory` owns one lazily-built `Transport` per recognized
//! format and never evicts either, so switching formats back and forth costs
//! nothing and concurrent calls can never observe a half-replaced client.
//! There is no process-wide state; the factory is plain owned data shared by
//! reference (or `Arc`) among repositories.

use std::sync::{Arc, OnceLock};

use reqwest::Method;
use tracing::debug;

use crate::error::ApiError;
use crate::format::WireFormat;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// One configured connection endpoint: an HTTP client bound to a wire format.
#[derive(Debug)]
pub struct Transport {
    format: WireFormat,
    http: reqwest::Client,
}

impl Transport {
    fn new(format: WireFormat) -> Self {
        Self {
            format,
            http: reqwest::Client::new(),
        }
    }

    pub fn format(&self) -> WireFormat {
        self.format
    }

    /// Execute one request and return the raw response.
    ///
    /// Completes exactly once: either with the response (any status) or with
    /// `ApiError::Transport` when the exchange itself failed — connection
    /// refused, timeout, DNS. Whatever timeout reqwest applies by default is
    /// inherited as-is.
    pub async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        debug!(method = ?request.method, path = %request.path, format = %self.format, "executing request");

        let method = match request.method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Delete => Method::DELETE,
        };

        let mut builder = self.http.request(method, request.path.as_str());
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value.to_str().ok().map(|v| (name.to_string(), v.to_string()))
            })
            .collect();
        let body = response.text().await?;

        debug!(status, "response received");
        Ok(HttpResponse { status, headers, body })
    }
}

/// Builds and caches one `Transport` per wire format for a fixed base URL.
///
/// The first request for a format builds its client; every later request for
/// the same format returns the same instance. Requests for the other format
/// get their own client instead of replacing the first one.
#[derive(Debug)]
pub struct ClientFactory {
    base_url: String,
    json: OnceLock<Arc<Transport>>,
    xml: OnceLock<Arc<Transport>>,
}

impl ClientFactory {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            json: OnceLock::new(),
            xml: OnceLock::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The cached client for `format`, built on first demand.
    pub fn client(&self, format: WireFormat) -> Arc<Transport> {
        let slot = match format {
            WireFormat::Json => &self.json,
            WireFormat::Xml => &self.xml,
        };
        Arc::clone(slot.get_or_init(|| Arc::new(Transport::new(format))))
    }
}
