//! Records shared by several API families.

use serde::{Deserialize, Deserializer, Serialize};

/// Read a JSON `null` as the type's default, for string fields the API may
/// send as `null` instead of omitting.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Collection wrapper returned by list endpoints: `{"object":"list","data":[...]}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ListEnvelope<T> {
    #[serde(default)]
    pub object: Option<String>,
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
}

impl<T> ListEnvelope<T> {
    /// Drop the envelope, keeping the server's ordering.
    pub fn into_data(self) -> Vec<T> {
        self.data
    }
}

/// Result of deleting a file or a fine-tuned model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeleteResult {
    pub id: String,
    #[serde(default)]
    pub object: Option<String>,
    #[serde(default)]
    pub deleted: bool,
}

/// Token accounting attached to generation results.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Usage {
    #[serde(default)]
    pub prompt_tokens: u64,
    #[serde(default)]
    pub completion_tokens: u64,
    #[serde(default)]
    pub total_tokens: u64,
}

/// Structured error payload from a non-2xx response.
///
/// Wire shape: `{"error": {"message", "type", "param", "code"}}`. This is the
/// inner object; [`RemoteErrorEnvelope`] is the outer one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RemoteError {
    #[serde(deserialize_with = "null_as_default")]
    pub message: String,
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub error_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub param: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

/// Outer wrapper of [`RemoteError`] as it appears on the wire.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RemoteErrorEnvelope {
    pub error: RemoteError,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_envelope_preserves_order() {
        let json = r#"{"object":"list","data":["b","a","c"]}"#;
        let envelope: ListEnvelope<String> = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.object.as_deref(), Some("list"));
        assert_eq!(envelope.into_data(), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_list_envelope_missing_data_is_empty() {
        let envelope: ListEnvelope<String> = serde_json::from_str(r#"{"object":"list"}"#).unwrap();
        assert!(envelope.data.is_empty());
    }

    #[test]
    fn test_remote_error_deserialization() {
        let json = r#"{
            "error": {
                "message": "Invalid API key",
                "type": "invalid_request_error",
                "param": null,
                "code": "invalid_api_key"
            }
        }"#;

        let envelope: RemoteErrorEnvelope = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.error.message, "Invalid API key");
        assert_eq!(envelope.error.error_type, "invalid_request_error");
        assert!(envelope.error.param.is_none());
        assert_eq!(envelope.error.code.as_deref(), Some("invalid_api_key"));
    }

    #[test]
    fn test_remote_error_requires_message() {
        let json = r#"{"error": {"type": "server_error"}}"#;
        assert!(serde_json::from_str::<RemoteErrorEnvelope>(json).is_err());
    }

    #[test]
    fn test_remote_error_null_type_is_empty() {
        let json = r#"{"error":{"message":"bad","type":null,"param":null,"code":null}}"#;
        let envelope: RemoteErrorEnvelope = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.error.message, "bad");
        assert_eq!(envelope.error.error_type, "");
        assert!(envelope.error.code.is_none());
    }

    #[test]
    fn test_remote_error_missing_type_is_empty() {
        let json = r#"{"error":{"message":"bad"}}"#;
        let envelope: RemoteErrorEnvelope = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.error.error_type, "");
    }

    #[test]
    fn test_delete_result_deserialization() {
        let json = r#"{"id":"file-abc","object":"file","deleted":true}"#;
        let result: DeleteResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.id, "file-abc");
        assert!(result.deleted);
    }
}
