use serde::{Deserialize, Serialize};

use super::Usage;

/// Request body for `/v1/edits`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct EditRequest {
    /// Omitted on the engine-scoped endpoint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<String>,
    pub instruction: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub n: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f64>,
}

/// Response from `/v1/edits`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EditResult {
    #[serde(default)]
    pub object: Option<String>,
    #[serde(default)]
    pub created: Option<i64>,
    #[serde(default)]
    pub choices: Vec<EditChoice>,
    #[serde(default)]
    pub usage: Option<Usage>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EditChoice {
    pub text: String,
    #[serde(default)]
    pub index: u32,
}
