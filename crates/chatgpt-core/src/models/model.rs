use serde::{Deserialize, Serialize};

/// A model available to the account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Model {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owned_by: Option<String>,
    #[serde(default)]
    pub permission: Vec<Permission>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
}

/// Access grants attached to a model.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Permission {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub object: Option<String>,
    #[serde(default)]
    pub created: Option<i64>,
    #[serde(default)]
    pub allow_create_engine: bool,
    #[serde(default)]
    pub allow_sampling: bool,
    #[serde(default)]
    pub allow_logprobs: bool,
    #[serde(default)]
    pub allow_search_indices: bool,
    #[serde(default)]
    pub allow_view: bool,
    #[serde(default)]
    pub allow_fine_tuning: bool,
    #[serde(default)]
    pub organization: Option<String>,
    #[serde(default)]
    pub group: Option<String>,
    #[serde(default)]
    pub is_blocking: bool,
}
