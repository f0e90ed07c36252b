//! Field value types and validation

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use uuid::Uuid;

/// A polymorphic field value that can hold different types
///
/// This is what [`Data::field_value`](crate::core::entity::Data::field_value)
/// hands to the filter, sort and search machinery, so none of them need to
/// know the concrete entity type.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum FieldValue {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Uuid(Uuid),
    DateTime(DateTime<Utc>),
    Null,
}

impl FieldValue {
    /// Get the value as a string if possible
    pub fn as_string(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get the value as an integer if possible
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            FieldValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Numeric view of the value (integers and floats only)
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Integer(i) => Some(*i as f64),
            FieldValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Get the value as a boolean if possible
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Get the value as a UUID if possible
    pub fn as_uuid(&self) -> Option<Uuid> {
        match self {
            FieldValue::Uuid(u) => Some(*u),
            _ => None,
        }
    }

    /// Textual rendering used for substring matching and lexical ordering.
    ///
    /// `Null` has no text.
    pub fn as_text(&self) -> Option<String> {
        match self {
            FieldValue::String(s) => Some(s.clone()),
            FieldValue::Integer(i) => Some(i.to_string()),
            FieldValue::Float(f) => Some(f.to_string()),
            FieldValue::Boolean(b) => Some(b.to_string()),
            FieldValue::Uuid(u) => Some(u.to_string()),
            FieldValue::DateTime(dt) => Some(dt.to_rfc3339()),
            FieldValue::Null => None,
        }
    }

    /// Check if the value holds a number
    pub fn is_numeric(&self) -> bool {
        matches!(self, FieldValue::Integer(_) | FieldValue::Float(_))
    }

    /// Check if the value is null
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Check whether this value equals the textual query `value`.
    ///
    /// Used by repository search, where the query always arrives as text.
    pub fn matches_text(&self, value: &str) -> bool {
        match self {
            FieldValue::String(s) => s == value,
            FieldValue::Integer(i) => value.trim().parse::<i64>().is_ok_and(|v| v == *i),
            FieldValue::Float(f) => value
                .trim()
                .parse::<f64>()
                .is_ok_and(|v| (v - f).abs() < f64::EPSILON),
            FieldValue::Boolean(b) => value.trim().parse::<bool>().is_ok_and(|v| v == *b),
            FieldValue::Uuid(u) => Uuid::parse_str(value.trim()).is_ok_and(|v| v == *u),
            FieldValue::DateTime(dt) => dt.to_rfc3339() == value,
            FieldValue::Null => false,
        }
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::String(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::String(value.to_string())
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Integer(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        FieldValue::Integer(value as i64)
    }
}

impl From<u32> for FieldValue {
    fn from(value: u32) -> Self {
        FieldValue::Integer(value as i64)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Float(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Boolean(value)
    }
}

impl From<Uuid> for FieldValue {
    fn from(value: Uuid) -> Self {
        FieldValue::Uuid(value)
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(value: DateTime<Utc>) -> Self {
        FieldValue::DateTime(value)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(FieldValue::Null)
    }
}

impl<T: Into<FieldValue>> From<Vec<T>> for FieldValue {
    /// Lists are flattened to a comma separated string so they stay searchable
    fn from(value: Vec<T>) -> Self {
        let parts: Vec<String> = value
            .into_iter()
            .filter_map(|v| {
                let value: FieldValue = v.into();
                value.as_text()
            })
            .collect();
        FieldValue::String(parts.join(", "))
    }
}

/// Field format validators
#[derive(Debug, Clone)]
pub enum FieldFormat {
    Email,
    Uuid,
    Phone,
    Custom(Regex),
}

impl FieldFormat {
    /// Validate a field value against this format
    pub fn validate(&self, value: &FieldValue) -> bool {
        let string_value = match value.as_string() {
            Some(s) => s,
            None => return false,
        };

        match self {
            FieldFormat::Email => Self::is_valid_email(string_value),
            FieldFormat::Uuid => Uuid::parse_str(string_value).is_ok(),
            FieldFormat::Phone => Self::is_valid_phone(string_value),
            FieldFormat::Custom(regex) => regex.is_match(string_value),
        }
    }

    fn is_valid_email(email: &str) -> bool {
        static EMAIL_REGEX: OnceLock<Option<Regex>> = OnceLock::new();
        EMAIL_REGEX
            .get_or_init(|| Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").ok())
            .as_ref()
            .is_some_and(|regex| regex.is_match(email))
    }

    fn is_valid_phone(phone: &str) -> bool {
        static PHONE_REGEX: OnceLock<Option<Regex>> = OnceLock::new();
        // Separators are stripped first; 7 to 15 digits, optional leading +
        let digits: String = phone
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '(' | ')' | '.'))
            .collect();
        PHONE_REGEX
            .get_or_init(|| Regex::new(r"^\+?\d{7,15}$").ok())
            .as_ref()
            .is_some_and(|regex| regex.is_match(&digits))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_value_string() {
        let value = FieldValue::String("test".to_string());
        assert_eq!(value.as_string(), Some("test"));
        assert_eq!(value.as_integer(), None);
        assert_eq!(value.as_f64(), None);
        assert!(!value.is_null());
    }

    #[test]
    fn test_field_value_numeric_view() {
        assert_eq!(FieldValue::Integer(42).as_f64(), Some(42.0));
        assert_eq!(FieldValue::Float(2.5).as_f64(), Some(2.5));
        assert!(FieldValue::Float(2.5).is_numeric());
        // numeric-looking text is still text
        assert_eq!(FieldValue::String("12".into()).as_f64(), None);
    }

    #[test]
    fn test_field_value_null() {
        let value = FieldValue::Null;
        assert!(value.is_null());
        assert_eq!(value.as_text(), None);
    }

    #[test]
    fn test_as_text_renders_scalars() {
        assert_eq!(FieldValue::Integer(7).as_text().as_deref(), Some("7"));
        assert_eq!(FieldValue::Boolean(true).as_text().as_deref(), Some("true"));
        assert_eq!(FieldValue::Float(1.5).as_text().as_deref(), Some("1.5"));
    }

    #[test]
    fn test_from_option_and_vec() {
        let none: Option<String> = None;
        assert_eq!(FieldValue::from(none), FieldValue::Null);
        assert_eq!(FieldValue::from(Some(3_i64)), FieldValue::Integer(3));
        assert_eq!(
            FieldValue::from(vec!["red".to_string(), "blue".to_string()]),
            FieldValue::String("red, blue".to_string())
        );
    }

    #[test]
    fn test_matches_text() {
        assert!(FieldValue::Integer(30).matches_text("30"));
        assert!(FieldValue::Float(4.5).matches_text("4.5"));
        assert!(FieldValue::Boolean(false).matches_text("false"));
        assert!(FieldValue::String("bolt".into()).matches_text("bolt"));
        assert!(!FieldValue::String("bolt".into()).matches_text("Bolt"));
        assert!(!FieldValue::Null.matches_text(""));
    }

    #[test]
    fn test_email_validation() {
        let format = FieldFormat::Email;

        assert!(format.validate(&FieldValue::String("sales@acme.com".to_string())));
        assert!(!format.validate(&FieldValue::String("invalid-email".to_string())));
        assert!(!format.validate(&FieldValue::String("@example.com".to_string())));
    }

    #[test]
    fn test_phone_validation() {
        let format = FieldFormat::Phone;

        assert!(format.validate(&FieldValue::String("+57 300 123 4567".to_string())));
        assert!(format.validate(&FieldValue::String("(601) 555-0199".to_string())));
        assert!(!format.validate(&FieldValue::String("123".to_string())));
    }

    #[test]
    fn test_custom_regex_validation() {
        let format = FieldFormat::Custom(Regex::new(r"^[A-Z]{3}-\d{3}$").unwrap());

        assert!(format.validate(&FieldValue::String("SKU-123".to_string())));
        assert!(!format.validate(&FieldValue::String("sku-123".to_string())));
    }

    #[test]
    fn test_format_validate_rejects_non_string() {
        let format = FieldFormat::Email;
        assert!(!format.validate(&FieldValue::Integer(42)));
        assert!(!format.validate(&FieldValue::Null));
    }

    #[test]
    fn test_serde_untagged() {
        let value: FieldValue = serde_json::from_str("12").unwrap();
        assert_eq!(value, FieldValue::Integer(12));
        let value: FieldValue = serde_json::from_str("null").unwrap();
        assert_eq!(value, FieldValue::Null);
    }
}
