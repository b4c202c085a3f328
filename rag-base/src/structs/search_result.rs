use serde::Deserialize;
use serde_json::{Map, Value};

/// Field holding the document text in the index schema.
pub const CONTENT_FIELD: &str = "content";

/// Response body of `POST /indexes/{index}/docs/search`.
///
/// Hits are kept as raw JSON objects: the index schema is owned by whoever
/// populated the index, and only `content` is consumed here.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub value: Vec<Map<String, Value>>,
}

impl SearchResponse {
    /// Extracts the text of every hit that carries a string `content` field,
    /// preserving the service's relevance order.
    pub fn into_contents(self) -> Vec<String> {
        self.value
            .into_iter()
            .filter_map(|mut hit| match hit.remove(CONTENT_FIELD) {
                Some(Value::String(text)) => Some(text),
                _ => None,
            })
            .collect()
    }
}
