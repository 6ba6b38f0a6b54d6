//! Shared JSON codec used for request bodies, success bodies and error bodies.
//!
//! The policy is the same everywhere so field naming cannot drift between the
//! transport and the error path:
//!
//! - unknown response fields are ignored (no record uses `deny_unknown_fields`)
//! - `null` members are dropped from encoded objects, at any depth
//! - wire names are snake_case, which is also how Rust fields are spelled;
//!   [`to_snake_case`] and [`to_camel_case`] cover names built at runtime

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::{Error, Result};

/// Encode a value as a JSON body, omitting null members.
pub fn encode<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>> {
    let mut tree = serde_json::to_value(value)?;
    strip_nulls(&mut tree);
    Ok(serde_json::to_vec(&tree)?)
}

/// Decode a JSON body, ignoring fields the target type does not know.
pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    serde_json::from_slice(bytes).map_err(|e| {
        debug!(
            target_type = std::any::type_name::<T>(),
            size = bytes.len(),
            error = %e,
            "JSON body did not decode"
        );
        Error::from(e)
    })
}

fn strip_nulls(value: &mut Value) {
    match value {
        Value::Object(map) => {
            map.retain(|_, v| !v.is_null());
            map.values_mut().for_each(strip_nulls);
        }
        Value::Array(items) => items.iter_mut().for_each(strip_nulls),
        _ => {}
    }
}

/// `finishReason` -> `finish_reason`
pub fn to_snake_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for (i, c) in name.chars().enumerate() {
        if c.is_ascii_uppercase() {
            if i > 0 {
                out.push('_');
            }
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// `finish_reason` -> `finishReason`
pub fn to_camel_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper = false;
    for c in name.chars() {
        if c == '_' {
            upper = !out.is_empty();
        } else if upper {
            out.push(c.to_ascii_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Serialize)]
    struct Outgoing {
        model: String,
        max_tokens: Option<u32>,
        finish_reason: Option<String>,
        logit_bias: Option<serde_json::Map<String, Value>>,
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct Incoming {
        model: String,
        finish_reason: Option<String>,
    }

    #[test]
    fn test_encode_omits_nulls() {
        let body = Outgoing {
            model: "gpt-3.5-turbo".to_string(),
            max_tokens: None,
            finish_reason: Some("stop".to_string()),
            logit_bias: None,
        };

        let json = String::from_utf8(encode(&body).unwrap()).unwrap();
        assert!(json.contains("\"finish_reason\":\"stop\""));
        assert!(!json.contains("max_tokens"));
        assert!(!json.contains("logit_bias"));
        assert!(!json.contains("null"));
    }

    #[test]
    fn test_encode_omits_nested_nulls() {
        let value = serde_json::json!({
            "outer": {"keep": 1, "drop": null},
            "list": [{"a": null, "b": 2}]
        });
        let json = String::from_utf8(encode(&value).unwrap()).unwrap();
        assert_eq!(json, r#"{"list":[{"b":2}],"outer":{"keep":1}}"#);
    }

    #[test]
    fn test_decode_ignores_unknown_fields() {
        let json = br#"{"model":"m","finish_reason":"length","surprise":{"x":1}}"#;
        let decoded: Incoming = decode(json).unwrap();
        assert_eq!(decoded.model, "m");
        assert_eq!(decoded.finish_reason.as_deref(), Some("length"));
    }

    #[test]
    fn test_encode_then_decode_preserves_values() {
        let body = Outgoing {
            model: "text-davinci-003".to_string(),
            max_tokens: Some(16),
            finish_reason: Some("stop".to_string()),
            logit_bias: None,
        };
        let decoded: Incoming = decode(&encode(&body).unwrap()).unwrap();
        assert_eq!(
            decoded,
            Incoming {
                model: "text-davinci-003".to_string(),
                finish_reason: Some("stop".to_string()),
            }
        );
    }

    #[test]
    fn test_decode_malformed_is_codec_error() {
        let err = decode::<Incoming>(b"not json").unwrap_err();
        assert!(matches!(err, crate::Error::Codec(_)));
    }

    #[test]
    fn test_case_mapping_is_bidirectional() {
        for (camel, snake) in [
            ("finishReason", "finish_reason"),
            ("responseFormat", "response_format"),
            ("n", "n"),
            ("promptLossWeight", "prompt_loss_weight"),
        ] {
            assert_eq!(to_snake_case(camel), snake);
            assert_eq!(to_camel_case(snake), camel);
            assert_eq!(to_camel_case(&to_snake_case(camel)), camel);
        }
    }
}
