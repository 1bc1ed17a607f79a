//! Research request data model and intake validation.
//!
//! Validation runs in a fixed order: JSON syntax, object shape, `request_id`,
//! `chronicles`, then each chronicle entry. The first failure wins.

pub mod error;
pub mod types;


pub use error::IntakeError;
pub use types::{
    ChronicleId, Identifier, ItemResult, ResearchItem, ResearchJob, ResearchRequest, ResultBatch,
};

use serde_json::Value;

impl ResearchRequest {
    /// Parses and validates a raw intake body.
    pub fn from_json_bytes(body: &[u8]) -> Result<Self, IntakeError> {
        let value: Value =
            serde_json::from_slice(body).map_err(|_| IntakeError::MalformedPayload)?;
        Self::from_value(value)
    }

    /// Validates an already-parsed intake body.
    pub fn from_value(value: Value) -> Result<Self, IntakeError> {
        let Value::Object(mut root) = value else {
            return Err(IntakeError::NotAnObject);
        };

        let request_id = root
            .remove("request_id")
            .and_then(|v| serde_json::from_value::<Identifier>(v).ok())
            .ok_or(IntakeError::MissingRequestId)?;

        let raw_items = match root.remove("chronicles") {
            Some(Value::Array(items)) if !items.is_empty() => items,
            _ => return Err(IntakeError::MissingItems),
        };

        let items = raw_items
            .into_iter()
            .enumerate()
            .map(|(index, raw)| {
                if !raw.is_object() {
                    return Err(IntakeError::InvalidItem {
                        index,
                        reason: "expected an object".to_string(),
                    });
                }
                serde_json::from_value::<ResearchItem>(raw).map_err(|e| {
                    IntakeError::InvalidItem {
                        index,
                        reason: e.to_string(),
                    }
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { request_id, items })
    }
}
