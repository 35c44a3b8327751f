//! Pure request builder and response parser for the compte endpoints.
//!
//! # Design
//! `CompteEndpoint` declares the five CRUD operations as a contract: each
//! `build_*` method produces an `HttpRequest` and each `parse_*` method
//! consumes an `HttpResponse`, with no network I/O in between. Two list
//! parse operations exist because JSON and XML disagree on the top-level
//! shape — a bare sequence versus the `List` envelope; both target the same
//! path and differ only in the declared response shape and the `accept`
//! header. Normalizing the two shapes into one is the repository's job.

use crate::error::ApiError;
use crate::format::WireFormat;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{Compte, CompteList};

/// XML root element for a single compte record.
const ITEM_ROOT: &str = "item";

/// Declares the compte CRUD operations for one base URL and wire format.
///
/// Stateless apart from its configuration; builds requests and interprets
/// responses without touching the network.
#[derive(Debug, Clone)]
pub struct CompteEndpoint {
    base_url: String,
    format: WireFormat,
}

impl CompteEndpoint {
    pub fn new(base_url: &str, format: WireFormat) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            format,
        }
    }

    pub fn format(&self) -> WireFormat {
        self.format
    }

    fn accept_header(&self) -> (String, String) {
        ("accept".to_string(), self.format.mime().to_string())
    }

    fn content_type_header(&self) -> (String, String) {
        ("content-type".to_string(), self.format.mime().to_string())
    }

    pub fn build_list_comptes(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: format!("{}/api/comptes", self.base_url),
            headers: vec![self.accept_header()],
            body: None,
        }
    }

    pub fn build_get_compte(&self, id: i64) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: format!("{}/api/comptes/{id}", self.base_url),
            headers: vec![self.accept_header()],
            body: None,
        }
    }

    pub fn build_create_compte(&self, compte: &Compte) -> Result<HttpRequest, ApiError> {
        let body = self.format.encode(ITEM_ROOT, compte)?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: format!("{}/api/comptes", self.base_url),
            headers: vec![self.accept_header(), self.content_type_header()],
            body: Some(body),
        })
    }

    /// The id travels both in the path and inside the body, as the backend
    /// contract requires.
    pub fn build_update_compte(&self, id: i64, compte: &Compte) -> Result<HttpRequest, ApiError> {
        let body = self.format.encode(ITEM_ROOT, compte)?;
        Ok(HttpRequest {
            method: HttpMethod::Put,
            path: format!("{}/api/comptes/{id}", self.base_url),
            headers: vec![self.accept_header(), self.content_type_header()],
            body: Some(body),
        })
    }

    pub fn build_delete_compte(&self, id: i64) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            path: format!("{}/api/comptes/{id}", self.base_url),
            headers: vec![self.accept_header()],
            body: None,
        }
    }

    /// JSON list responses are a bare sequence of records.
    pub fn parse_list_comptes_json(&self, response: HttpResponse) -> Result<Vec<Compte>, ApiError> {
        check_status(&response)?;
        WireFormat::Json.decode(require_body(&response)?)
    }

    /// XML list responses arrive wrapped in the `List` envelope.
    pub fn parse_list_comptes_xml(&self, response: HttpResponse) -> Result<CompteList, ApiError> {
        check_status(&response)?;
        WireFormat::Xml.decode(require_body(&response)?)
    }

    pub fn parse_get_compte(&self, response: HttpResponse) -> Result<Compte, ApiError> {
        check_status(&response)?;
        self.format.decode(require_body(&response)?)
    }

    pub fn parse_create_compte(&self, response: HttpResponse) -> Result<Compte, ApiError> {
        check_status(&response)?;
        self.format.decode(require_body(&response)?)
    }

    pub fn parse_update_compte(&self, response: HttpResponse) -> Result<Compte, ApiError> {
        check_status(&response)?;
        self.format.decode(require_body(&response)?)
    }

    /// Delete expects an empty success body, so no body check applies.
    pub fn parse_delete_compte(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }
}

/// Map non-2xx status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    if response.status == 404 {
        return Err(ApiError::NotFound);
    }
    Err(ApiError::Http {
        status: response.status,
        body: response.body.clone(),
    })
}

/// A 2xx response whose operation expects a body but carries none is a
/// failure, never a success with phantom data.
fn require_body(response: &HttpResponse) -> Result<&str, ApiError> {
    let body = response.body.trim();
    if body.is_empty() {
        return Err(ApiError::MissingBody);
    }
    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CompteKind;
    use chrono::NaiveDate;

    fn endpoint(format: WireFormat) -> CompteEndpoint {
        CompteEndpoint::new("http://localhost:8082", format)
    }

    fn compte(id: Option<i64>) -> Compte {
        Compte {
            id,
            solde: 1500.0,
            kind: CompteKind::Courant,
            date_creation: NaiveDate::from_ymd_opt(2025, 1, 10).unwrap(),
        }
    }

    fn ok(body: &str) -> HttpResponse {
        HttpResponse {
            status: 200,
            headers: Vec::new(),
            body: body.to_string(),
        }
    }

    // --- request building ---

    #[test]
    fn list_request_negotiates_json() {
        let req = endpoint(WireFormat::Json).build_list_comptes();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "http://localhost:8082/api/comptes");
        assert_eq!(
            req.headers,
            vec![("accept".to_string(), "application/json".to_string())]
        );
        assert!(req.body.is_none());
    }

    #[test]
    fn list_request_negotiates_xml() {
        let req = endpoint(WireFormat::Xml).build_list_comptes();
        assert_eq!(req.path, "http://localhost:8082/api/comptes");
        assert_eq!(
            req.headers,
            vec![("accept".to_string(), "application/xml".to_string())]
        );
    }

    #[test]
    fn get_request_targets_id_path() {
        let req = endpoint(WireFormat::Json).build_get_compte(7);
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "http://localhost:8082/api/comptes/7");
        assert!(req.body.is_none());
    }

    #[test]
    fn create_request_omits_absent_id_in_json() {
        let req = endpoint(WireFormat::Json).build_create_compte(&compte(None)).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert!(body.get("id").is_none());
        assert_eq!(body["solde"], 1500.0);
        assert_eq!(body["type"], "COURANT");
        assert_eq!(body["dateCreation"], "2025-01-10");
    }

    #[test]
    fn create_request_omits_absent_id_in_xml() {
        let req = endpoint(WireFormat::Xml).build_create_compte(&compte(None)).unwrap();
        let body = req.body.unwrap();
        assert!(body.starts_with("<item>"));
        assert!(!body.contains("<id>"));
        assert!(body.contains("<type>COURANT</type>"));
        assert!(body.contains("<dateCreation>2025-01-10</dateCreation>"));
    }

    #[test]
    fn create_request_carries_both_negotiation_headers() {
        let req = endpoint(WireFormat::Xml).build_create_compte(&compte(None)).unwrap();
        assert_eq!(
            req.headers,
            vec![
                ("accept".to_string(), "application/xml".to_string()),
                ("content-type".to_string(), "application/xml".to_string()),
            ]
        );
    }

    #[test]
    fn update_request_repeats_id_in_path_and_body() {
        let req = endpoint(WireFormat::Json)
            .build_update_compte(7, &compte(Some(7)))
            .unwrap();
        assert_eq!(req.method, HttpMethod::Put);
        assert_eq!(req.path, "http://localhost:8082/api/comptes/7");
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["id"], 7);
    }

    #[test]
    fn delete_request_has_no_body() {
        let req = endpoint(WireFormat::Json).build_delete_compte(7);
        assert_eq!(req.method, HttpMethod::Delete);
        assert_eq!(req.path, "http://localhost:8082/api/comptes/7");
        assert!(req.body.is_none());
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let e = CompteEndpoint::new("http://localhost:8082/", WireFormat::Json);
        assert_eq!(e.build_list_comptes().path, "http://localhost:8082/api/comptes");
    }

    // --- response parsing ---

    #[test]
    fn parse_json_list_success() {
        let body = r#"[{"id":1,"solde":200.0,"type":"EPARGNE","dateCreation":"2025-02-01"}]"#;
        let comptes = endpoint(WireFormat::Json).parse_list_comptes_json(ok(body)).unwrap();
        assert_eq!(comptes.len(), 1);
        assert_eq!(comptes[0].id, Some(1));
        assert_eq!(comptes[0].solde, 200.0);
        assert_eq!(comptes[0].kind, CompteKind::Epargne);
    }

    #[test]
    fn parse_xml_list_envelope() {
        let body = "<List><item><id>1</id><solde>200.0</solde><type>EPARGNE</type>\
                    <dateCreation>2025-02-01</dateCreation></item></List>";
        let list = endpoint(WireFormat::Xml).parse_list_comptes_xml(ok(body)).unwrap();
        assert_eq!(list.comptes.len(), 1);
        let c = &list.comptes[0];
        assert_eq!(c.id, Some(1));
        assert_eq!(c.solde, 200.0);
        assert_eq!(c.kind, CompteKind::Epargne);
        assert_eq!(c.date_creation, NaiveDate::from_ymd_opt(2025, 2, 1).unwrap());
    }

    #[test]
    fn parse_xml_empty_envelope() {
        let list = endpoint(WireFormat::Xml).parse_list_comptes_xml(ok("<List/>")).unwrap();
        assert!(list.comptes.is_empty());
    }

    #[test]
    fn parse_list_missing_body_is_failure() {
        let err = endpoint(WireFormat::Json).parse_list_comptes_json(ok("")).unwrap_err();
        assert!(matches!(err, ApiError::MissingBody));

        let err = endpoint(WireFormat::Xml).parse_list_comptes_xml(ok("  ")).unwrap_err();
        assert!(matches!(err, ApiError::MissingBody));
    }

    #[test]
    fn parse_get_missing_body_is_failure() {
        let err = endpoint(WireFormat::Json).parse_get_compte(ok("")).unwrap_err();
        assert!(matches!(err, ApiError::MissingBody));
    }

    #[test]
    fn parse_get_not_found() {
        let response = HttpResponse {
            status: 404,
            headers: Vec::new(),
            body: String::new(),
        };
        let err = endpoint(WireFormat::Json).parse_get_compte(response).unwrap_err();
        assert!(matches!(err, ApiError::NotFound));
    }

    #[test]
    fn parse_create_populates_id() {
        let body = r#"{"id":42,"solde":1500.0,"type":"COURANT","dateCreation":"2025-01-10"}"#;
        let created = endpoint(WireFormat::Json).parse_create_compte(ok(body)).unwrap();
        assert_eq!(created.id, Some(42));
    }

    #[test]
    fn parse_create_wrong_status() {
        let response = HttpResponse {
            status: 500,
            headers: Vec::new(),
            body: "internal error".to_string(),
        };
        let err = endpoint(WireFormat::Json).parse_create_compte(response).unwrap_err();
        assert!(matches!(err, ApiError::Http { status: 500, .. }));
    }

    #[test]
    fn parse_single_xml_record() {
        let body = "<item><id>9</id><solde>75.5</solde><type>COURANT</type>\
                    <dateCreation>2025-04-01</dateCreation></item>";
        let fetched = endpoint(WireFormat::Xml).parse_get_compte(ok(body)).unwrap();
        assert_eq!(fetched.id, Some(9));
        assert_eq!(fetched.solde, 75.5);
    }

    #[test]
    fn parse_delete_accepts_empty_body() {
        let response = HttpResponse {
            status: 204,
            headers: Vec::new(),
            body: String::new(),
        };
        assert!(endpoint(WireFormat::Json).parse_delete_compte(response).is_ok());
    }

    #[test]
    fn parse_delete_not_found() {
        let response = HttpResponse {
            status: 404,
            headers: Vec::new(),
            body: String::new(),
        };
        let err = endpoint(WireFormat::Json).parse_delete_compte(response).unwrap_err();
        assert!(matches!(err, ApiError::NotFound));
    }

    #[test]
    fn parse_list_bad_json() {
        let err = endpoint(WireFormat::Json)
            .parse_list_comptes_json(ok("not json"))
            .unwrap_err();
        assert!(matches!(err, ApiError::Deserialization(_)));
    }
}
