use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("invalid JSON response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("expected a JSON object, got {kind}")]
    NotAnObject { kind: &'static str },
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    #[serde(default)]
    error: Option<Value>,
    #[serde(default)]
    code: Option<Value>,
}

/// Outcome carried by a well-formed response body.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiReply {
    Success(Value),
    Failure { message: String, code: i64 },
}

/// Classify a 2xx response body.
///
/// A non-null top-level `error` field makes the reply a failure; its `code` defaults to `0`
/// when absent or not an integer. Anything else is returned as-is.
pub fn decode_json_response(body: &str) -> Result<ApiReply, TransportError> {
    let parsed: Value = serde_json::from_str(body)?;
    if !parsed.is_object() {
        return Err(TransportError::NotAnObject {
            kind: json_kind(&parsed),
        });
    }

    let envelope = ErrorEnvelope::deserialize(&parsed)?;
    let message = match envelope.error {
        None => return Ok(ApiReply::Success(parsed)),
        Some(Value::String(message)) => message,
        Some(other) => other.to_string(),
    };
    let code = envelope.code.as_ref().and_then(error_code).unwrap_or(0);

    Ok(ApiReply::Failure { message, code })
}

fn error_code(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => number.as_i64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn success_payload_is_returned_unmodified() {
        let reply = decode_json_response(r#"{"result":"ok"}"#).unwrap();
        assert_eq!(reply, ApiReply::Success(json!({ "result": "ok" })));
    }

    #[test]
    fn nested_payload_is_preserved() {
        let body = r#"{"result":{"balance_currency":12.5,"currency":"USD"}}"#;
        let reply = decode_json_response(body).unwrap();
        assert_eq!(
            reply,
            ApiReply::Success(json!({
                "result": { "balance_currency": 12.5, "currency": "USD" }
            }))
        );
    }

    #[test]
    fn error_field_becomes_failure() {
        let reply = decode_json_response(r#"{"error":"bad sender","code":12}"#).unwrap();
        assert_eq!(
            reply,
            ApiReply::Failure {
                message: "bad sender".to_owned(),
                code: 12,
            }
        );
    }

    #[test]
    fn error_code_defaults_and_string_codes() {
        let reply = decode_json_response(r#"{"error":"oops"}"#).unwrap();
        assert_eq!(
            reply,
            ApiReply::Failure {
                message: "oops".to_owned(),
                code: 0,
            }
        );

        let reply = decode_json_response(r#"{"error":"oops","code":"-3"}"#).unwrap();
        assert!(matches!(reply, ApiReply::Failure { code: -3, .. }));
    }

    #[test]
    fn null_error_field_is_not_a_failure() {
        let reply = decode_json_response(r#"{"error":null,"result":1}"#).unwrap();
        assert!(matches!(reply, ApiReply::Success(_)));
    }

    #[test]
    fn unrelated_fields_do_not_affect_failures() {
        let body = r#"{"error":"sender not found","code":"17","result":[1,2],"extra":{"a":true}}"#;
        let reply = decode_json_response(body).unwrap();
        assert_eq!(
            reply,
            ApiReply::Failure {
                message: "sender not found".to_owned(),
                code: 17,
            }
        );

        let reply = decode_json_response(r#"{"error":"oops","code":null}"#).unwrap();
        assert!(matches!(reply, ApiReply::Failure { code: 0, .. }));
    }

    #[test]
    fn non_string_error_is_rendered_as_json() {
        let reply = decode_json_response(r#"{"error":{"text":"x"},"code":5}"#).unwrap();
        assert_eq!(
            reply,
            ApiReply::Failure {
                message: r#"{"text":"x"}"#.to_owned(),
                code: 5,
            }
        );
    }

    #[test]
    fn invalid_json_and_non_objects_are_rejected() {
        assert!(matches!(
            decode_json_response("{ not json }"),
            Err(TransportError::Json(_))
        ));
        assert!(matches!(
            decode_json_response("[1,2]"),
            Err(TransportError::NotAnObject { kind: "array" })
        ));
        assert!(matches!(
            decode_json_response("\"ok\""),
            Err(TransportError::NotAnObject { kind: "string" })
        ));
    }
}
