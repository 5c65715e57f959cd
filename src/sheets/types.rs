use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of a values API response, which is also the on-disk cache format.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ValuesEnvelope {
    #[serde(default)]
    pub range: Option<String>,
    #[serde(rename = "majorDimension", default)]
    pub major_dimension: Option<String>,
    /// Rows of cells; the first row holds the column headers. Absent when the
    /// tab is empty.
    #[serde(default)]
    pub values: Vec<Vec<Value>>,
}
