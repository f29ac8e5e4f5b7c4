// ABOUTME: reqwest implementation of VendorApi talking JSON over HTTP to the vendor backend

use crate::api::error::ApiError;
use crate::api::types::{Contact, Deal, NewContact, NewDeal, NewNote, Note, RecordId, Vendor, VendorDraft};
use crate::api::VendorApi;
use crate::config::BackendConfig;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

#[derive(Debug, Clone)]
pub struct VendorApiClient {
    client: Client,
    base_url: String,
}

impl VendorApiClient {
    /// Build a client for the configured backend
    pub fn new(config: &BackendConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, collection: &str) -> String {
        format!("{}/{}", self.base_url, collection)
    }

    async fn post<B, T>(&self, collection: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let url = self.endpoint(collection);
        debug!("POST {}", url);

        let submitted = serde_json::to_value(body).map_err(|e| ApiError::Malformed(e.to_string()))?;
        let response = self.client.post(&url).json(&submitted).send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        decode_record(status, &bytes, &submitted)
    }

    async fn get_list<T>(&self, collection: &str, query: &[(&str, String)]) -> Result<Vec<T>, ApiError>
    where
        T: DeserializeOwned,
    {
        let url = self.endpoint(collection);
        debug!("GET {} {:?}", url, query);

        let response = self.client.get(&url).query(query).send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        decode_list(status, &bytes)
    }
}

#[async_trait]
impl VendorApi for VendorApiClient {
    async fn create_vendor(&self, draft: &VendorDraft) -> Result<Vendor, ApiError> {
        self.post("vendors", draft).await
    }

    async fn create_contact(&self, contact: &NewContact) -> Result<Contact, ApiError> {
        self.post("contacts", contact).await
    }

    async fn create_deal(&self, deal: &NewDeal) -> Result<Deal, ApiError> {
        self.post("deals", deal).await
    }

    async fn create_note(&self, note: &NewNote) -> Result<Note, ApiError> {
        self.post("notes", note).await
    }

    async fn list_vendors(&self, query: &str) -> Result<Vec<Vendor>, ApiError> {
        let query = query.trim();
        let params = if query.is_empty() {
            Vec::new()
        } else {
            vec![("q", query.to_string())]
        };
        self.get_list("vendors", &params).await
    }

    async fn list_contacts(&self, vendor_id: &RecordId) -> Result<Vec<Contact>, ApiError> {
        self.get_list("contacts", &[("vendor_id", vendor_id.to_string())]).await
    }

    async fn list_deals(&self, vendor_id: &RecordId) -> Result<Vec<Deal>, ApiError> {
        self.get_list("deals", &[("vendor_id", vendor_id.to_string())]).await
    }

    async fn list_notes(&self, vendor_id: &RecordId) -> Result<Vec<Note>, ApiError> {
        self.get_list("notes", &[("vendor_id", vendor_id.to_string())]).await
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    detail: Option<serde_json::Value>,
}

/// Map a non-success response to [`ApiError::Rejected`], keeping a string `detail`
fn rejection(status: StatusCode, body: &[u8]) -> ApiError {
    let detail = serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.detail)
        .and_then(|d| d.as_str().map(str::to_string));

    ApiError::Rejected {
        status: status.as_u16(),
        detail,
    }
}

/// Decode a create response into the persisted record.
///
/// A success only has to be a JSON object with an `id`. Fields the server
/// leaves out are taken from the submitted body.
pub(crate) fn decode_record<T: DeserializeOwned>(
    status: StatusCode,
    body: &[u8],
    submitted: &serde_json::Value,
) -> Result<T, ApiError> {
    if !status.is_success() {
        return Err(rejection(status, body));
    }

    let returned: serde_json::Value =
        serde_json::from_slice(body).map_err(|e| ApiError::Malformed(e.to_string()))?;
    let serde_json::Value::Object(returned) = returned else {
        return Err(ApiError::Malformed("expected a JSON object".to_string()));
    };
    if returned.get("id").map_or(true, serde_json::Value::is_null) {
        return Err(ApiError::Malformed("missing id".to_string()));
    }

    let mut record = match submitted {
        serde_json::Value::Object(fields) => fields.clone(),
        _ => serde_json::Map::new(),
    };
    record.extend(returned.into_iter().filter(|(_, value)| !value.is_null()));

    serde_json::from_value(serde_json::Value::Object(record)).map_err(|e| ApiError::Malformed(e.to_string()))
}

/// Decode a list response. Anything but a JSON array reads as empty; entries
/// that do not decode are skipped.
pub(crate) fn decode_list<T: DeserializeOwned>(status: StatusCode, body: &[u8]) -> Result<Vec<T>, ApiError> {
    if !status.is_success() {
        return Err(rejection(status, body));
    }

    let Ok(serde_json::Value::Array(items)) = serde_json::from_slice::<serde_json::Value>(body) else {
        warn!("List response was not a JSON array, treating as empty");
        return Ok(Vec::new());
    };

    Ok(items
        .into_iter()
        .filter_map(|item| match serde_json::from_value(item) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!("Skipping undecodable list entry: {}", e);
                None
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::RecordId;
    use serde_json::json;

    fn nothing_sent() -> serde_json::Value {
        json!({})
    }

    #[test]
    fn test_decode_record_success() {
        let vendor: Vendor = decode_record(
            StatusCode::CREATED,
            br#"{"id":42,"business_name":"Acme","name":"Jo","email":"jo@acme.com"}"#,
            &nothing_sent(),
        )
        .unwrap();
        assert_eq!(vendor.id, RecordId::Int(42));
    }

    #[test]
    fn test_decode_record_bare_id_uses_submitted_fields() {
        let sent = json!({ "vendor_id": 42, "name": "Sam", "email": "", "phone": "", "title": "" });
        let contact: Contact = decode_record(StatusCode::CREATED, br#"{"id":5,"name":"Sam"}"#, &sent).unwrap();
        assert_eq!(contact.id, RecordId::Int(5));
        assert_eq!(contact.vendor_id, RecordId::Int(42));
        assert_eq!(contact.fields.name, "Sam");

        let contact: Contact = decode_record(StatusCode::CREATED, br#"{"id":5}"#, &sent).unwrap();
        assert_eq!(contact.id, RecordId::Int(5));
    }

    #[test]
    fn test_decode_record_deal_with_decimal_string_value() {
        let sent = json!({ "vendor_id": 42, "title": "Pilot", "value": 500.0, "currency": "USD", "stage": "Prospect" });
        let deal: Deal = decode_record(
            StatusCode::CREATED,
            br#"{"id":9,"vendor_id":42,"title":"Pilot","value":"500.00","stage":"Prospect"}"#,
            &sent,
        )
        .unwrap();
        assert_eq!(deal.id, RecordId::Int(9));
        assert!((deal.value - 500.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_decode_record_rejected_with_detail() {
        let err = decode_record::<Vendor>(
            StatusCode::UNPROCESSABLE_ENTITY,
            br#"{"detail":"email required"}"#,
            &nothing_sent(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ApiError::Rejected { status: 422, detail: Some(ref d) } if d == "email required"
        ));
    }

    #[test]
    fn test_decode_record_rejected_with_structured_detail() {
        let err = decode_record::<Vendor>(
            StatusCode::UNPROCESSABLE_ENTITY,
            br#"{"detail":[{"loc":["body","email"],"msg":"field required"}]}"#,
            &nothing_sent(),
        )
        .unwrap_err();
        assert!(matches!(err, ApiError::Rejected { detail: None, .. }));
    }

    #[test]
    fn test_decode_record_rejected_non_json() {
        let err = decode_record::<Vendor>(StatusCode::BAD_GATEWAY, b"<html>502</html>", &nothing_sent()).unwrap_err();
        assert!(matches!(err, ApiError::Rejected { status: 502, detail: None }));
    }

    #[test]
    fn test_decode_record_missing_id_is_malformed() {
        let sent = json!({ "business_name": "Acme" });
        let err = decode_record::<Vendor>(StatusCode::OK, br#"{"business_name":"Acme"}"#, &sent).unwrap_err();
        assert!(matches!(err, ApiError::Malformed(_)));

        let err = decode_record::<Vendor>(StatusCode::OK, br#"{"id":null}"#, &sent).unwrap_err();
        assert!(matches!(err, ApiError::Malformed(_)));

        let err = decode_record::<Vendor>(StatusCode::OK, b"not json", &sent).unwrap_err();
        assert!(matches!(err, ApiError::Malformed(_)));
    }

    #[test]
    fn test_decode_list_non_array_is_empty() {
        let vendors: Vec<Vendor> = decode_list(StatusCode::OK, br#"{"items":[]}"#).unwrap();
        assert!(vendors.is_empty());
    }

    #[test]
    fn test_decode_list_skips_bad_entries() {
        let notes: Vec<Note> = decode_list(
            StatusCode::OK,
            br#"[{"id":1,"vendor_id":42,"content":"hi"},{"content":"no id"}]"#,
        )
        .unwrap();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].content, "hi");
    }

    #[test]
    fn test_client_trims_trailing_slash() {
        let config = BackendConfig {
            base_url: "http://localhost:8000/".to_string(),
            ..BackendConfig::default()
        };
        let client = VendorApiClient::new(&config).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000");
        assert_eq!(client.endpoint("vendors"), "http://localhost:8000/vendors");
    }
}
