use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Registration state of a sender name, as returned by `registerSender` and `getSenderStatus`.
///
/// Unknown codes are preserved in [`SenderStatus::Other`].
pub enum SenderStatus {
    Moderation,
    Registered,
    Rejected,
    Other(i64),
}

impl SenderStatus {
    pub fn from_code(code: i64) -> Self {
        match code {
            0 => Self::Moderation,
            1 => Self::Registered,
            2 => Self::Rejected,
            other => Self::Other(other),
        }
    }

    /// Read the `status` field of a sender object. The API sends it either as a number or as
    /// a numeric string.
    pub fn from_payload(payload: &Value) -> Option<Self> {
        let status = payload.get("status")?;
        let code = match status {
            Value::Number(number) => number.as_i64()?,
            Value::String(text) => text.trim().parse().ok()?,
            _ => return None,
        };
        Some(Self::from_code(code))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn known_codes_are_mapped() {
        assert_eq!(SenderStatus::from_code(0), SenderStatus::Moderation);
        assert_eq!(SenderStatus::from_code(1), SenderStatus::Registered);
        assert_eq!(SenderStatus::from_code(2), SenderStatus::Rejected);
        assert_eq!(SenderStatus::from_code(9), SenderStatus::Other(9));
    }

    #[test]
    fn status_is_read_from_number_or_string() {
        assert_eq!(
            SenderStatus::from_payload(&json!({ "id": 5, "status": 1 })),
            Some(SenderStatus::Registered)
        );
        assert_eq!(
            SenderStatus::from_payload(&json!({ "status": "2" })),
            Some(SenderStatus::Rejected)
        );
        assert_eq!(SenderStatus::from_payload(&json!({ "id": 5 })), None);
        assert_eq!(SenderStatus::from_payload(&json!({ "status": [] })), None);
    }
}
