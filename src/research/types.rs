use std::fmt;
use std::time::Instant;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use uuid::Uuid;

/// Caller-supplied request identifier.
///
/// Integers (including `0`) and non-blank strings are accepted. Everything
/// else (null, booleans, floats, blank strings, arrays, objects) is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "RawIdentifier")]
pub enum Identifier {
    Int(i64),
    /// Only used for integers above `i64::MAX`.
    UInt(u64),
    Text(String),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawIdentifier {
    Int(i64),
    UInt(u64),
    Text(String),
}

impl TryFrom<RawIdentifier> for Identifier {
    type Error = String;

    fn try_from(raw: RawIdentifier) -> Result<Self, Self::Error> {
        match raw {
            RawIdentifier::Int(n) => Ok(Identifier::Int(n)),
            RawIdentifier::UInt(n) => Ok(Identifier::UInt(n)),
            RawIdentifier::Text(s) if s.trim().is_empty() => {
                Err("identifier must not be blank".to_string())
            }
            RawIdentifier::Text(s) => Ok(Identifier::Text(s)),
        }
    }
}

impl Serialize for Identifier {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Identifier::Int(n) => serializer.serialize_i64(*n),
            Identifier::UInt(n) => serializer.serialize_u64(*n),
            Identifier::Text(s) => serializer.serialize_str(s),
        }
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identifier::Int(n) => write!(f, "{}", n),
            Identifier::UInt(n) => write!(f, "{}", n),
            Identifier::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for Identifier {
    fn from(value: i64) -> Self {
        Identifier::Int(value)
    }
}

impl From<&str> for Identifier {
    fn from(value: &str) -> Self {
        Identifier::Text(value.to_string())
    }
}

/// Chronicle id exactly as the caller sent it.
///
/// Never validated: it is only echoed back as `chronicle_research_id`. An
/// absent id is carried as `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChronicleId(Value);

impl ChronicleId {
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn is_null(&self) -> bool {
        self.0.is_null()
    }
}

impl fmt::Display for ChronicleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Value::String(s) => f.write_str(s),
            other => write!(f, "{}", other),
        }
    }
}

impl From<Value> for ChronicleId {
    fn from(value: Value) -> Self {
        ChronicleId(value)
    }
}

impl From<i64> for ChronicleId {
    fn from(value: i64) -> Self {
        ChronicleId(Value::from(value))
    }
}

impl From<&str> for ChronicleId {
    fn from(value: &str) -> Self {
        ChronicleId(Value::from(value))
    }
}

/// One chronicle to score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResearchItem {
    #[serde(rename = "id", default)]
    pub item_id: ChronicleId,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub quote: String,

    /// Full chronicle text the quote is checked against.
    #[serde(rename = "chronicle_text", default, deserialize_with = "null_as_empty")]
    pub reference_text: String,
}

impl ResearchItem {
    pub fn new(
        item_id: impl Into<ChronicleId>,
        quote: impl Into<String>,
        reference_text: impl Into<String>,
    ) -> Self {
        Self {
            item_id: item_id.into(),
            quote: quote.into(),
            reference_text: reference_text.into(),
        }
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// A validated intake payload.
#[derive(Debug, Clone, PartialEq)]
pub struct ResearchRequest {
    pub request_id: Identifier,
    pub items: Vec<ResearchItem>,
}

impl ResearchRequest {
    /// Wraps the request into a job ready for the dispatcher.
    pub fn into_job(self) -> ResearchJob {
        ResearchJob {
            job_id: Uuid::new_v4(),
            request_id: self.request_id,
            items: self.items,
            accepted_at: Instant::now(),
        }
    }
}

/// One unit of background work. Owned by exactly one worker once dequeued.
#[derive(Debug)]
pub struct ResearchJob {
    /// Log correlation id, never sent downstream.
    pub job_id: Uuid,
    pub request_id: Identifier,
    pub items: Vec<ResearchItem>,
    pub accepted_at: Instant,
}

/// Score for one chronicle, as sent to the main service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemResult {
    #[serde(rename = "chronicle_research_id")]
    pub item_id: ChronicleId,
    pub accuracy: f64,
}

/// All results of one job.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultBatch {
    pub request_id: Identifier,
    pub results: Vec<ItemResult>,
}
