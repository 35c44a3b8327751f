//! Domain DTOs for the compte API.
//!
//! # Design
//! These types mirror the backend's schema but are defined independently of
//! the mock-server crate; integration tests catch schema drift. Wire field
//! names (`solde`, `type`, `dateCreation`) and kind tokens (`COURANT`,
//! `EPARGNE`) are fixed by the backend and mapped through serde renames so
//! the same derives drive both the JSON and the XML codec.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single bank account as exposed by the API.
///
/// `id` is server-assigned: absent on create requests, present in every
/// response, immutable once set. `date_creation` is set when the account is
/// created and never altered by updates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Compte {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub solde: f64,
    #[serde(rename = "type")]
    pub kind: CompteKind,
    #[serde(rename = "dateCreation")]
    pub date_creation: NaiveDate,
}

/// Account kind. The wire tokens are case-sensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompteKind {
    #[serde(rename = "COURANT")]
    Courant,
    #[serde(rename = "EPARGNE")]
    Epargne,
}

/// XML-only list envelope: `<List><item>…</item>…</List>`.
///
/// The markup codec cannot deserialize a bare top-level sequence, so list
/// responses arrive wrapped. The repository unwraps `comptes` immediately;
/// the envelope has no life beyond one response cycle. Under JSON no
/// envelope exists and this type is never constructed.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CompteList {
    #[serde(rename = "item", default)]
    pub comptes: Vec<Compte>,
}
