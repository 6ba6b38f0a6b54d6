use serde::{Deserialize, Serialize};

use super::Usage;

/// Request body for `/v1/embeddings`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct EmbeddingRequest {
    /// Omitted on the engine-scoped endpoint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    pub input: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
}

/// Response from `/v1/embeddings`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EmbeddingResult {
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub object: Option<String>,
    #[serde(default)]
    pub data: Vec<Embedding>,
    #[serde(default)]
    pub usage: Option<Usage>,
}

/// Single embedding vector; `index` refers to the position in the request input.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Embedding {
    #[serde(default)]
    pub object: Option<String>,
    pub embedding: Vec<f64>,
    #[serde(default)]
    pub index: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedding_request_without_user() {
        let request = EmbeddingRequest {
            model: Some("text-embedding-ada-002".to_string()),
            input: vec!["hello".to_string()],
            user: None,
        };

        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains("text-embedding-ada-002"));
        assert!(!json.contains("user"));
    }

    #[test]
    fn test_embedding_result_deserialization() {
        let json = r#"{
            "object": "list",
            "data": [{"object": "embedding", "embedding": [0.1, 0.2, 0.3], "index": 0}],
            "model": "text-embedding-ada-002",
            "usage": {"prompt_tokens": 2, "total_tokens": 2}
        }"#;

        let result: EmbeddingResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.data[0].embedding, vec![0.1, 0.2, 0.3]);
        assert_eq!(result.usage.unwrap().completion_tokens, 0);
    }
}
