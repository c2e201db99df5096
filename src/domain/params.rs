use std::collections::BTreeMap;

use crate::domain::value::{MessageText, RawPhoneNumber, SenderName};

#[derive(Debug, Clone, PartialEq, Eq)]
/// A single request parameter value.
///
/// Every variant has exactly one string form, see [`ParamValue::render`]. The same
/// rendering feeds both the control sum and the form body.
pub enum ParamValue {
    Str(String),
    Int(i64),
    /// Rendered as a compact JSON array of strings.
    List(Vec<String>),
    /// Omitted from both the control sum and the transmitted body.
    Null,
}

impl ParamValue {
    /// Wire form of this value, `None` for [`ParamValue::Null`].
    pub fn render(&self) -> Option<String> {
        match self {
            Self::Str(value) => Some(value.clone()),
            Self::Int(value) => Some(value.to_string()),
            Self::List(items) => Some(serde_json::Value::from(items.as_slice()).to_string()),
            Self::Null => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_owned())
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for ParamValue {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<u32> for ParamValue {
    fn from(value: u32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<Vec<String>> for ParamValue {
    fn from(value: Vec<String>) -> Self {
        Self::List(value)
    }
}

impl From<&SenderName> for ParamValue {
    fn from(value: &SenderName) -> Self {
        Self::Str(value.as_str().to_owned())
    }
}

impl From<&MessageText> for ParamValue {
    fn from(value: &MessageText) -> Self {
        Self::Str(value.as_str().to_owned())
    }
}

impl From<&RawPhoneNumber> for ParamValue {
    fn from(value: &RawPhoneNumber) -> Self {
        Self::Str(value.raw().to_owned())
    }
}

impl<T: Into<ParamValue>> From<Option<T>> for ParamValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Named request parameters.
///
/// Keys are unique; inserting an existing key replaces its value.
pub struct RequestParams(BTreeMap<String, ParamValue>);

impl RequestParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Insert or replace a parameter.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<ParamValue>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.0.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.0.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Overlay `other` on top of `self`; values from `other` win on collision.
    pub fn merge(&mut self, other: Self) {
        self.0.extend(other.0);
    }
}

impl<K, V> FromIterator<(K, V)> for RequestParams
where
    K: Into<String>,
    V: Into<ParamValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        )
    }
}
