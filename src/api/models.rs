use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// PoetryDB sends linecount as a decimal string; accept numbers as well.
fn deserialize_linecount<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    match value {
        Value::Number(n) => Ok(n.as_u64().and_then(|v| u32::try_from(v).ok())),
        Value::String(s) => Ok(s.trim().parse::<u32>().ok()),
        _ => Ok(None),
    }
}

/// Envelope status codes arrive as numbers, occasionally as strings.
fn deserialize_status<'de, D>(deserializer: D) -> Result<u16, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let parsed = match &value {
        Value::Number(n) => n.as_u64().and_then(|v| u16::try_from(v).ok()),
        Value::String(s) => s.trim().parse::<u16>().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| serde::de::Error::custom(format!("invalid status: {}", value)))
}

/// A poem as returned by the search and random endpoints.
///
/// Every field defaults so that responses narrowed by an output limiter
/// (e.g. `/author/poe/title`) still decode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Poem {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub lines: Vec<String>,
    #[serde(deserialize_with = "deserialize_linecount", default)]
    pub linecount: Option<u32>,
}

/// Body of `GET /author`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct AuthorIndex {
    pub authors: Vec<String>,
}

/// Body of `GET /title`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct TitleIndex {
    pub titles: Vec<String>,
}

/// Status object the API answers with instead of an array, e.g. for no matches.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StatusEnvelope {
    #[serde(deserialize_with = "deserialize_status")]
    pub status: u16,
    #[serde(default)]
    pub reason: String,
}

impl StatusEnvelope {
    pub fn is_not_found(&self) -> bool {
        self.status == 404
    }

    /// Parse an error body, `None` when it is not a status envelope.
    pub fn from_body(body: &str) -> Option<Self> {
        serde_json::from_str(body).ok()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum PoemsResponse {
    Poems(Vec<Poem>),
    Status(StatusEnvelope),
}
