use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Empty {
        field: &'static str,
    },
    TooLong {
        field: &'static str,
        max: usize,
        actual: usize,
    },
    InvalidPhoneNumber {
        input: String,
    },
    InvalidMethodName {
        name: String,
    },
    InvalidBaseUrl {
        url: String,
    },
    MissingParam {
        method: &'static str,
        param: String,
    },
    UnknownParam {
        method: &'static str,
        param: String,
    },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{field} must not be empty"),
            Self::TooLong { field, max, actual } => {
                write!(f, "{field} is too long: {actual} characters (max {max})")
            }
            Self::InvalidPhoneNumber { input } => write!(f, "invalid phone number: {input}"),
            Self::InvalidMethodName { name } => write!(f, "invalid API method name: {name:?}"),
            Self::InvalidBaseUrl { url } => write!(f, "invalid API base URL: {url}"),
            Self::MissingParam { method, param } => {
                write!(f, "{method}: missing required parameter {param}")
            }
            Self::UnknownParam { method, param } => {
                write!(f, "{method}: unexpected parameter {param}")
            }
        }
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::ValidationError;

    #[test]
    fn display_messages_are_human_readable() {
        let err = ValidationError::Empty { field: "text" };
        assert_eq!(err.to_string(), "text must not be empty");

        let err = ValidationError::TooLong {
            field: "sender",
            max: 11,
            actual: 12,
        };
        assert_eq!(
            err.to_string(),
            "sender is too long: 12 characters (max 11)"
        );

        let err = ValidationError::InvalidMethodName {
            name: "a/b".to_owned(),
        };
        assert_eq!(err.to_string(), "invalid API method name: \"a/b\"");

        let err = ValidationError::MissingParam {
            method: "sendSMS",
            param: "phone".to_owned(),
        };
        assert_eq!(err.to_string(), "sendSMS: missing required parameter phone");

        let err = ValidationError::UnknownParam {
            method: "getUserBalance",
            param: "phone".to_owned(),
        };
        assert_eq!(
            err.to_string(),
            "getUserBalance: unexpected parameter phone"
        );
    }
}
