//! Async REST client for the compte API, speaking JSON or XML behind one
//! surface.
//!
//! # Overview
//! The backend exposes one resource — bank accounts ("comptes") — in two
//! wire formats that disagree on the list shape: JSON returns a bare
//! sequence, XML wraps it in a `List` envelope. This crate hides that
//! divergence: callers pick a [`WireFormat`], build a [`CompteRepository`],
//! and get the same typed results either way.
//!
//! # Design
//! - [`CompteEndpoint`] is a pure contract — `build_*` produces requests,
//!   `parse_*` consumes responses, no I/O between them.
//! - [`Transport`] executes requests with reqwest; [`ClientFactory`] caches
//!   one transport per format and never evicts.
//! - [`CompteRepository`] composes the two and normalizes the XML list
//!   envelope away. Every operation completes exactly once with a value or
//!   a cause; no failure is swallowed.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod endpoint;
pub mod error;
pub mod format;
pub mod http;
pub mod repository;
pub mod types;

pub use client::{ClientFactory, Transport};
pub use endpoint::CompteEndpoint;
pub use error::ApiError;
pub use format::WireFormat;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use repository::CompteRepository;
pub use types::{Compte, CompteKind, CompteList};
