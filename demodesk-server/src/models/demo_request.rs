//! Demo request payloads
//!
//! `DemoRequestPayload` is the raw JSON body; `DemoRequestIn` is the validated
//! form handed to the store; `DemoRequestOut` is what the caller gets back.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::{EmailAddress, ValidationError};
use crate::store::Document;

/// Raw submission body.
///
/// `email` is optional here so a missing address is reported as a field-level
/// validation error rather than a deserialization failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DemoRequestPayload {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Validated demo request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoRequestIn {
    pub email: EmailAddress,
    pub name: Option<String>,
    pub company: Option<String>,
    pub message: Option<String>,
}

impl DemoRequestIn {
    /// Document persisted for this request. `message` is stored even though it
    /// is never echoed back.
    pub fn to_document(&self) -> Document {
        let value = json!({
            "email": self.email.as_str(),
            "name": self.name,
            "company": self.company,
            "message": self.message,
        });

        match value {
            Value::Object(map) => map,
            _ => Document::new(),
        }
    }
}

impl TryFrom<DemoRequestPayload> for DemoRequestIn {
    type Error = ValidationError;

    fn try_from(payload: DemoRequestPayload) -> Result<Self, Self::Error> {
        let email = payload
            .email
            .ok_or(ValidationError::Empty { field: "email" })?;

        Ok(Self {
            email: EmailAddress::new(&email)?,
            name: payload.name,
            company: payload.company,
            message: payload.message,
        })
    }
}

/// Stored demo request as returned to the submitter
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DemoRequestOut {
    pub id: String,
    pub email: EmailAddress,
    pub name: Option<String>,
    pub company: Option<String>,
}

impl DemoRequestOut {
    /// Build the response for a request the store accepted under `id`.
    pub fn created(id: String, request: DemoRequestIn) -> Self {
        Self {
            id,
            email: request.email,
            name: request.name,
            company: request.company,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(email: Option<&str>) -> DemoRequestPayload {
        DemoRequestPayload {
            email: email.map(str::to_owned),
            name: Some("Ada".into()),
            ..Default::default()
        }
    }

    #[test]
    fn missing_email_is_empty_error() {
        let err = DemoRequestIn::try_from(payload(None)).unwrap_err();
        assert_eq!(err, ValidationError::Empty { field: "email" });
    }

    #[test]
    fn invalid_email_names_field() {
        let err = DemoRequestIn::try_from(payload(Some("not-an-email"))).unwrap_err();
        assert_eq!(err.field(), "email");
    }

    #[test]
    fn absent_and_empty_are_distinct() {
        let mut raw = payload(Some("a@b.com"));
        raw.company = Some(String::new());
        let request = DemoRequestIn::try_from(raw).unwrap();

        assert_eq!(request.company.as_deref(), Some(""));
        assert_eq!(request.message, None);
    }

    #[test]
    fn document_keeps_message_and_nulls() {
        let mut raw = payload(Some("a@b.com"));
        raw.message = Some("call me".into());
        let doc = DemoRequestIn::try_from(raw).unwrap().to_document();

        assert_eq!(doc["email"], "a@b.com");
        assert_eq!(doc["message"], "call me");
        assert_eq!(doc["company"], Value::Null);
        assert_eq!(doc.len(), 4);
    }

    #[test]
    fn output_omits_message() {
        let mut raw = payload(Some("a@b.com"));
        raw.message = Some("secret".into());
        let request = DemoRequestIn::try_from(raw).unwrap();
        let out = DemoRequestOut::created("abc123".into(), request);

        let value = serde_json::to_value(&out).unwrap();
        assert_eq!(
            value,
            json!({"id": "abc123", "email": "a@b.com", "name": "Ada", "company": null})
        );
    }

    #[test]
    fn payload_accepts_null_fields() {
        let raw: DemoRequestPayload =
            serde_json::from_str(r#"{"email": "a@b.com", "name": null}"#).unwrap();
        assert_eq!(raw.name, None);
        assert_eq!(raw.company, None);
    }
}
