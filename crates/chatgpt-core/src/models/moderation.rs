use serde::{Deserialize, Serialize};

/// Request body for `/v1/moderations`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ModerationRequest {
    pub input: String,
    /// "text-moderation-stable" or "text-moderation-latest".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModerationResult {
    pub id: String,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub results: Vec<Moderation>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Moderation {
    pub flagged: bool,
    #[serde(default)]
    pub categories: ModerationCategories,
    #[serde(default)]
    pub category_scores: ModerationCategoryScores,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ModerationCategories {
    #[serde(default)]
    pub hate: bool,
    #[serde(rename = "hate/threatening", default)]
    pub hate_threatening: bool,
    #[serde(rename = "self-harm", default)]
    pub self_harm: bool,
    #[serde(default)]
    pub sexual: bool,
    #[serde(rename = "sexual/minors", default)]
    pub sexual_minors: bool,
    #[serde(default)]
    pub violence: bool,
    #[serde(rename = "violence/graphic", default)]
    pub violence_graphic: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ModerationCategoryScores {
    #[serde(default)]
    pub hate: f64,
    #[serde(rename = "hate/threatening", default)]
    pub hate_threatening: f64,
    #[serde(rename = "self-harm", default)]
    pub self_harm: f64,
    #[serde(default)]
    pub sexual: f64,
    #[serde(rename = "sexual/minors", default)]
    pub sexual_minors: f64,
    #[serde(default)]
    pub violence: f64,
    #[serde(rename = "violence/graphic", default)]
    pub violence_graphic: f64,
}
