//! Fine-tune job records.

use serde::{Deserialize, Serialize};

use super::File;

/// Request body for `/v1/fine-tunes`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FineTuneRequest {
    /// ID of an uploaded file with purpose "fine-tune".
    pub training_file: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation_file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub n_epochs: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub batch_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub learning_rate_multiplier: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt_loss_weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compute_classification_metrics: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub classification_n_classes: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub classification_positive_class: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub classification_betas: Option<Vec<f64>>,
    /// Appended to the fine-tuned model name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>,
}

/// A fine-tune job as reported by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FineTuneResult {
    pub id: String,
    #[serde(default)]
    pub object: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub created_at: Option<i64>,
    #[serde(default)]
    pub events: Vec<FineTuneEvent>,
    #[serde(default)]
    pub fine_tuned_model: Option<String>,
    #[serde(default)]
    pub hyperparams: Option<HyperParameters>,
    #[serde(default)]
    pub organization_id: Option<String>,
    #[serde(default)]
    pub result_files: Vec<File>,
    /// "pending", "running", "succeeded", "failed" or "cancelled".
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub training_files: Vec<File>,
    #[serde(default)]
    pub validation_files: Vec<File>,
    #[serde(default)]
    pub updated_at: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FineTuneEvent {
    #[serde(default)]
    pub object: Option<String>,
    #[serde(default)]
    pub created_at: Option<i64>,
    #[serde(default)]
    pub level: Option<String>,
    pub message: String,
}

/// Hyperparameters the job ran with.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct HyperParameters {
    #[serde(default)]
    pub batch_size: Option<u32>,
    #[serde(default)]
    pub learning_rate_multiplier: Option<f64>,
    #[serde(default)]
    pub n_epochs: Option<u32>,
    #[serde(default)]
    pub prompt_loss_weight: Option<f64>,
}
