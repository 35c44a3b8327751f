//! Wire formats and their codecs.
//!
//! # Design
//! `WireFormat` is a closed enumeration: the two tokens the backend speaks,
//! nothing else. Parsing a token is fallible and case-sensitive, so a
//! misspelled format is a configuration error at construction time instead of
//! a client that silently has no codec installed. Encoding and decoding are
//! the only places the crate touches serde_json or quick-xml; everything
//! above works with typed values.

use std::fmt;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ApiError;

/// The serialization scheme negotiated per repository instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireFormat {
    Json,
    Xml,
}

impl WireFormat {
    /// MIME type sent in `accept` and `content-type` headers.
    pub fn mime(&self) -> &'static str {
        match self {
            WireFormat::Json => "application/json",
            WireFormat::Xml => "application/xml",
        }
    }

    /// Serialize `value` as a request body. `root` names the XML root
    /// element; JSON ignores it.
    pub fn encode<T: Serialize>(&self, root: &str, value: &T) -> Result<String, ApiError> {
        match self {
            WireFormat::Json => {
                serde_json::to_string(value).map_err(|e| ApiError::Serialization(e.to_string()))
            }
            WireFormat::Xml => quick_xml::se::to_string_with_root(root, value)
                .map_err(|e| ApiError::Serialization(e.to_string())),
        }
    }

    /// Deserialize a response body. XML parsing is lenient: unknown or
    /// missing elements do not fail the parse.
    pub fn decode<T: DeserializeOwned>(&self, body: &str) -> Result<T, ApiError> {
        match self {
            WireFormat::Json => {
                serde_json::from_str(body).map_err(|e| ApiError::Deserialization(e.to_string()))
            }
            WireFormat::Xml => {
                quick_xml::de::from_str(body).map_err(|e| ApiError::Deserialization(e.to_string()))
            }
        }
    }
}

impl FromStr for WireFormat {
    type Err = ApiError;

    /// Exact-match token parsing. `"JSON"` and `"XML"` are the only accepted
    /// spellings; anything else is rejected rather than defaulted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "JSON" => Ok(WireFormat::Json),
            "XML" => Ok(WireFormat::Xml),
            other => Err(ApiError::UnsupportedFormat(other.to_string())),
        }
    }
}

impl fmt::Display for WireFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WireFormat::Json => write!(f, "JSON"),
            WireFormat::Xml => write!(f, "XML"),
        }
    }
}
