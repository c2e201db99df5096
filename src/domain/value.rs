use std::fmt;

use chrono::{DateTime, Utc};
use phonenumber::country;
use secrecy::{ExposeSecret, SecretString};

use crate::domain::validation::ValidationError;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Public API key identifying the account.
///
/// Sent with every request as the `key` form field.
///
/// Invariant: non-empty after trimming.
pub struct PublicKey(String);

impl PublicKey {
    /// Form field name used by the API (`key`).
    pub const FIELD: &'static str = "key";

    /// Create a validated [`PublicKey`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated key.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Clone)]
/// Private API key used only as signing material.
///
/// It is never transmitted and its `Debug` output is redacted.
///
/// Invariant: must not be empty (whitespace is preserved).
pub struct PrivateKey(SecretString);

impl PrivateKey {
    /// Name used in validation errors.
    pub const FIELD: &'static str = "private_key";

    /// Create a validated [`PrivateKey`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(SecretString::from(value)))
    }

    pub(crate) fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PrivateKey([REDACTED])")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Remote method name, appended to the API base URL and signed as `action`.
///
/// Invariant: non-empty, ASCII letters, digits and `_` only.
pub struct MethodName(String);

impl MethodName {
    /// Create a validated [`MethodName`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let valid = !value.is_empty()
            && value
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'_');
        if !valid {
            return Err(ValidationError::InvalidMethodName { name: value });
        }
        Ok(Self(value))
    }

    /// Borrow the method name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MethodName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Sender name shown to recipients (`sender`).
///
/// Invariant: non-empty after trimming; up to 14 characters for numeric senders and
/// up to 11 for alphanumeric ones.
pub struct SenderName(String);

impl SenderName {
    /// Form field name used by the API (`sender`).
    pub const FIELD: &'static str = "sender";

    /// Maximum length of a numeric sender.
    pub const MAX_NUMERIC_LEN: usize = 14;
    /// Maximum length of an alphanumeric sender.
    pub const MAX_ALPHANUMERIC_LEN: usize = 11;

    /// Create a validated [`SenderName`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }

        let len = trimmed.chars().count();
        let max = if trimmed.chars().all(|c| c.is_ascii_digit()) {
            Self::MAX_NUMERIC_LEN
        } else {
            Self::MAX_ALPHANUMERIC_LEN
        };
        if len > max {
            return Err(ValidationError::TooLong {
                field: Self::FIELD,
                max,
                actual: len,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated sender name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// SMS message text (`text`).
///
/// Invariant: non-empty after trimming. The original value (including whitespace) is preserved.
pub struct MessageText(String);

impl MessageText {
    /// Form field name used by the API (`text`).
    pub const FIELD: &'static str = "text";

    /// Create validated message text.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    /// Borrow the message text as provided.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Unvalidated phone number as sent to the API (`phone`).
///
/// Invariant: non-empty after trimming. This type does not normalize; parse into
/// [`PhoneNumber`] and convert it for normalization.
pub struct RawPhoneNumber(String);

impl RawPhoneNumber {
    /// Form field name used by the API (`phone`).
    pub const FIELD: &'static str = "phone";

    /// Create a validated (non-empty) raw phone number.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Raw (trimmed) value as sent to the API.
    pub fn raw(&self) -> &str {
        &self.0
    }
}

impl From<PhoneNumber> for RawPhoneNumber {
    /// The API takes international numbers as bare digits, so the E.164 `+` is dropped.
    fn from(value: PhoneNumber) -> Self {
        Self(value.digits().to_owned())
    }
}

#[derive(Debug, Clone)]
/// Phone number parsed for an ePochta recipient or address-book entry.
///
/// Two numbers are equal (and hash the same) when their E.164 forms match, so differently
/// formatted inputs for one subscriber collapse together. Convert into [`RawPhoneNumber`]
/// to get the bare-digit form the API expects.
pub struct PhoneNumber {
    raw: String,
    e164: String,
    parsed: phonenumber::PhoneNumber,
}

impl PhoneNumber {
    /// Form field name used by the API (`phone`).
    pub const FIELD: &'static str = "phone";

    /// Parse a recipient number.
    ///
    /// `default_region` resolves national numbers such as `0632345678`; inputs with a `+`
    /// prefix ignore it.
    pub fn parse(
        default_region: Option<country::Id>,
        input: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let input = input.into();
        let raw = input.trim().to_owned();
        if raw.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }

        let parsed = phonenumber::parse(default_region, &raw)
            .map_err(|_| ValidationError::InvalidPhoneNumber { input: raw.clone() })?;

        let e164 = phonenumber::format(&parsed)
            .mode(phonenumber::Mode::E164)
            .to_string();

        Ok(Self { raw, e164, parsed })
    }

    /// Raw input after trimming.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn e164(&self) -> &str {
        &self.e164
    }

    /// International number without the leading `+`, as sent in `phone` and `phones`.
    pub fn digits(&self) -> &str {
        self.e164.trim_start_matches('+')
    }

    /// The parsed phone number from the `phonenumber` crate.
    pub fn parsed(&self) -> &phonenumber::PhoneNumber {
        &self.parsed
    }
}

impl PartialEq for PhoneNumber {
    fn eq(&self, other: &Self) -> bool {
        self.e164 == other.e164
    }
}

impl Eq for PhoneNumber {}

impl std::hash::Hash for PhoneNumber {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.e164.hash(state);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Scheduled send time (`datetime`), always interpreted as GMT by the API.
pub struct SendDateTime(DateTime<Utc>);

impl SendDateTime {
    /// Form field name used by the API (`datetime`).
    pub const FIELD: &'static str = "datetime";

    /// Wire format expected by the API.
    pub const FORMAT: &'static str = "%Y-%m-%d %H:%M:%S";

    pub fn new(value: DateTime<Utc>) -> Self {
        Self(value)
    }

    pub fn value(self) -> DateTime<Utc> {
        self.0
    }

    /// Render as `YYYY-MM-DD HH:MM:SS`.
    pub fn to_wire(self) -> String {
        self.0.format(Self::FORMAT).to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
/// Delivery attempt window (`sms_lifetime`).
pub enum SmsLifetime {
    /// Longest window the operator allows.
    #[default]
    Max,
    Hours1,
    Hours6,
    Hours12,
    Hours24,
}

impl SmsLifetime {
    /// Form field name used by the API (`sms_lifetime`).
    pub const FIELD: &'static str = "sms_lifetime";

    /// Integer code sent on the wire.
    pub fn code(self) -> i64 {
        match self {
            Self::Max => 0,
            Self::Hours1 => 1,
            Self::Hours6 => 6,
            Self::Hours12 => 12,
            Self::Hours24 => 24,
        }
    }
}
