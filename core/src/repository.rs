//! Repository façade over the compte endpoints.
//!
//! # Design
//! The repository is the only surface callers use. It is single-format for
//! its lifetime: construction picks the format, obtains the cached transport
//! from the factory, and binds an endpoint to the factory's base URL. It is
//! cheap to construct — an `Arc` clone and two small strings — so building
//! one per operation, as the surrounding application does, is fine.
//!
//! Each operation is an `async fn` returning `Result`: it completes exactly
//! once with either the value or the failure cause. Failures are propagated
//! unchanged on every path, the XML list path included; nothing is retried
//! or recovered internally. No ordering holds between in-flight operations —
//! a caller wanting refresh-after-write awaits the write first.

use std::sync::Arc;

use crate::client::{ClientFactory, Transport};
use crate::endpoint::CompteEndpoint;
use crate::error::ApiError;
use crate::format::WireFormat;
use crate::types::Compte;

/// Format-negotiating data access for comptes.
#[derive(Debug, Clone)]
pub struct CompteRepository {
    transport: Arc<Transport>,
    endpoint: CompteEndpoint,
    format: WireFormat,
}

impl CompteRepository {
    pub fn new(factory: &ClientFactory, format: WireFormat) -> Self {
        Self {
            transport: factory.client(format),
            endpoint: CompteEndpoint::new(factory.base_url(), format),
            format,
        }
    }

    pub fn format(&self) -> WireFormat {
        self.format
    }

    /// Fetch every compte, normalized to one sequence regardless of format.
    ///
    /// JSON responses are already a bare sequence; XML responses arrive in
    /// the `List` envelope, which is unwrapped here and discarded. Callers
    /// see the same shape either way.
    pub async fn get_all_comptes(&self) -> Result<Vec<Compte>, ApiError> {
        let request = self.endpoint.build_list_comptes();
        let response = self.transport.execute(request).await?;
        match self.format {
            WireFormat::Json => self.endpoint.parse_list_comptes_json(response),
            WireFormat::Xml => Ok(self.endpoint.parse_list_comptes_xml(response)?.comptes),
        }
    }

    pub async fn get_compte_by_id(&self, id: i64) -> Result<Compte, ApiError> {
        let request = self.endpoint.build_get_compte(id);
        let response = self.transport.execute(request).await?;
        self.endpoint.parse_get_compte(response)
    }

    /// Create a compte. `compte.id` should be `None`; the returned record
    /// carries the server-assigned identifier.
    pub async fn add_compte(&self, compte: &Compte) -> Result<Compte, ApiError> {
        let request = self.endpoint.build_create_compte(compte)?;
        let response = self.transport.execute(request).await?;
        self.endpoint.parse_create_compte(response)
    }

    /// Replace the full record identified by `id`. The id travels in both
    /// the path and the body.
    pub async fn update_compte(&self, id: i64, compte: &Compte) -> Result<Compte, ApiError> {
        let request = self.endpoint.build_update_compte(id, compte)?;
        let response = self.transport.execute(request).await?;
        self.endpoint.parse_update_compte(response)
    }

    pub async fn delete_compte(&self, id: i64) -> Result<(), ApiError> {
        let request = self.endpoint.build_delete_compte(id);
        let response = self.transport.execute(request).await?;
        self.endpoint.parse_delete_compte(response)
    }
}
