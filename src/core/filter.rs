//! Record filtering
//!
//! A [`FilterSpec`] maps field names to [`FieldFilter`] predicates. A record
//! passes when every active predicate passes. Filter values arrive as raw user
//! input, so anything that cannot be interpreted (a non-numeric comparison
//! target, a half-filled range) disables that predicate instead of failing.

use crate::core::entity::Data;
use crate::core::field::FieldValue;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Comparison applied by a numeric field filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NumericOperator {
    Equal,
    Greater,
    GreaterEqual,
    Less,
    LessEqual,
}

impl NumericOperator {
    /// Parse an operator name or symbol. Empty or unknown input yields `None`.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "equal" | "eq" | "=" | "==" => Some(Self::Equal),
            "greater" | "gt" | ">" => Some(Self::Greater),
            "greaterEqual" | "gte" | ">=" => Some(Self::GreaterEqual),
            "less" | "lt" | "<" => Some(Self::Less),
            "lessEqual" | "lte" | "<=" => Some(Self::LessEqual),
            _ => None,
        }
    }

    pub fn apply(&self, value: f64, target: f64) -> bool {
        match self {
            Self::Equal => value == target,
            Self::Greater => value > target,
            Self::GreaterEqual => value >= target,
            Self::Less => value < target,
            Self::LessEqual => value <= target,
        }
    }
}

/// Active/inactive selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StatusFilter {
    #[default]
    Any,
    Active,
    Inactive,
}

impl StatusFilter {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "all" | "any" => Some(Self::Any),
            "active" | "true" => Some(Self::Active),
            "inactive" | "false" => Some(Self::Inactive),
            _ => None,
        }
    }
}

/// One per-field predicate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum FieldFilter {
    /// Case-insensitive substring match
    Text { value: String },

    /// Numeric comparison against a target typed by the user
    Numeric {
        #[serde(default)]
        operator: Option<NumericOperator>,
        value: String,
    },

    /// Inclusive range
    Between { min: String, max: String },

    /// Active/inactive flag or derived condition
    Status { status: StatusFilter },
}

impl FieldFilter {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text {
            value: value.into(),
        }
    }

    pub fn numeric(operator: NumericOperator, value: impl ToString) -> Self {
        Self::Numeric {
            operator: Some(operator),
            value: value.to_string(),
        }
    }

    pub fn between(min: impl ToString, max: impl ToString) -> Self {
        Self::Between {
            min: min.to_string(),
            max: max.to_string(),
        }
    }

    pub fn status(status: StatusFilter) -> Self {
        Self::Status { status }
    }

    /// Whether this predicate constrains anything at all
    pub fn is_active(&self) -> bool {
        match self {
            Self::Text { value } => !value.trim().is_empty(),
            Self::Numeric { operator, value } => {
                operator.is_some() && parse_number(value).is_some()
            }
            Self::Between { min, max } => parse_number(min).is_some() && parse_number(max).is_some(),
            Self::Status { status } => *status != StatusFilter::Any,
        }
    }

    /// Evaluate this predicate against a field value.
    ///
    /// `fallback_active` is the record-level active flag, used by status
    /// filters when the field does not exist on the record.
    pub fn matches(&self, value: Option<&FieldValue>, fallback_active: bool) -> bool {
        if !self.is_active() {
            return true;
        }

        match self {
            Self::Text { value: needle } => value
                .and_then(FieldValue::as_text)
                .is_some_and(|text| text.to_lowercase().contains(&needle.to_lowercase())),

            Self::Numeric { operator, value: target } => {
                let (Some(operator), Some(target)) = (operator, parse_number(target)) else {
                    return true;
                };
                value
                    .and_then(numeric_view)
                    .is_some_and(|v| operator.apply(v, target))
            }

            Self::Between { min, max } => {
                let (Some(min), Some(max)) = (parse_number(min), parse_number(max)) else {
                    return true;
                };
                value
                    .and_then(numeric_view)
                    .is_some_and(|v| min <= v && v <= max)
            }

            Self::Status { status } => {
                let active = match value {
                    Some(v) => is_active_value(v),
                    None => fallback_active,
                };
                match status {
                    StatusFilter::Any => true,
                    StatusFilter::Active => active,
                    StatusFilter::Inactive => !active,
                }
            }
        }
    }
}

/// Set of per-field predicates combined with logical AND
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterSpec {
    filters: IndexMap<String, FieldFilter>,
}

impl FilterSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, field: impl Into<String>, filter: FieldFilter) -> Self {
        self.insert(field, filter);
        self
    }

    /// Set the predicate for a field, replacing any previous one
    pub fn insert(&mut self, field: impl Into<String>, filter: FieldFilter) {
        self.filters.insert(field.into(), filter);
    }

    pub fn remove(&mut self, field: &str) -> Option<FieldFilter> {
        self.filters.shift_remove(field)
    }

    pub fn get(&self, field: &str) -> Option<&FieldFilter> {
        self.filters.get(field)
    }

    /// Number of predicates that actually constrain records
    pub fn active_len(&self) -> usize {
        self.filters.values().filter(|f| f.is_active()).count()
    }

    /// True when no predicate constrains anything
    pub fn is_empty(&self) -> bool {
        self.active_len() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldFilter)> {
        self.filters.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Check a single record against every predicate
    pub fn matches<T: Data>(&self, record: &T) -> bool {
        self.filters.iter().all(|(field, filter)| {
            let value = record.field_value(field);
            filter.matches(value.as_ref(), record.is_active())
        })
    }

    /// Build a spec from the JSON object used in query strings.
    ///
    /// Recognised shapes:
    /// - `{"name": "bolt"}`: text match
    /// - `{"stock": 5}`: numeric equality
    /// - `{"stock>=": 5}` (also `>`, `<`, `<=`, `=`): numeric comparison
    /// - `{"price": {"between": [1, 9]}}` or `{"price": {"min": 1, "max": 9}}`
    /// - `{"price": {"operator": "greater", "value": 10}}`
    /// - `{"status": "active"}` or `{"active": true}`: status
    ///
    /// Anything else is skipped.
    pub fn from_json(value: &Value) -> Self {
        let mut spec = Self::new();
        let Some(obj) = value.as_object() else {
            tracing::debug!("filter is not a JSON object, ignoring");
            return spec;
        };

        for (key, value) in obj {
            match parse_json_entry(key, value) {
                Some((field, filter)) => spec.insert(field, filter),
                None => tracing::debug!(key = %key, "unrecognised filter entry skipped"),
            }
        }

        spec
    }
}

/// Keep the records that satisfy every predicate of `spec`, in input order
pub fn filter_records<T: Data>(records: &[T], spec: &FilterSpec) -> Vec<T> {
    if spec.is_empty() {
        return records.to_vec();
    }

    let result: Vec<T> = records
        .iter()
        .filter(|record| spec.matches(*record))
        .cloned()
        .collect();

    tracing::debug!(
        resource = T::resource_name(),
        predicates = spec.active_len(),
        before = records.len(),
        after = result.len(),
        "records filtered"
    );

    result
}

/// Parse user-typed numeric input; blanks and non-finite values are rejected
pub fn parse_number(s: &str) -> Option<f64> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    s.parse::<f64>().ok().filter(|n| n.is_finite())
}

fn numeric_view(value: &FieldValue) -> Option<f64> {
    value
        .as_f64()
        .or_else(|| value.as_string().and_then(parse_number))
}

fn is_active_value(value: &FieldValue) -> bool {
    match value {
        FieldValue::Boolean(b) => *b,
        FieldValue::Integer(i) => *i > 0,
        FieldValue::Float(f) => *f > 0.0,
        FieldValue::String(s) => s.trim().eq_ignore_ascii_case("active"),
        _ => false,
    }
}

fn json_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn parse_json_entry(key: &str, value: &Value) -> Option<(String, FieldFilter)> {
    for (suffix, operator) in [
        (">=", NumericOperator::GreaterEqual),
        ("<=", NumericOperator::LessEqual),
        (">", NumericOperator::Greater),
        ("<", NumericOperator::Less),
        ("=", NumericOperator::Equal),
    ] {
        if let Some(field) = key.strip_suffix(suffix) {
            let target = json_text(value)?;
            return Some((field.to_string(), FieldFilter::numeric(operator, target)));
        }
    }

    let filter = match value {
        Value::String(s) if key == "status" => FieldFilter::status(StatusFilter::parse(s)?),
        Value::String(s) => FieldFilter::text(s.clone()),
        Value::Number(n) => FieldFilter::numeric(NumericOperator::Equal, n),
        Value::Bool(true) => FieldFilter::status(StatusFilter::Active),
        Value::Bool(false) => FieldFilter::status(StatusFilter::Inactive),
        Value::Object(obj) => {
            if let Some(bounds) = obj.get("between").and_then(Value::as_array) {
                let min = bounds.first().and_then(json_text).unwrap_or_default();
                let max = bounds.get(1).and_then(json_text).unwrap_or_default();
                FieldFilter::between(min, max)
            } else if obj.contains_key("min") || obj.contains_key("max") {
                let min = obj.get("min").and_then(json_text).unwrap_or_default();
                let max = obj.get("max").and_then(json_text).unwrap_or_default();
                FieldFilter::between(min, max)
            } else {
                let operator = obj
                    .get("operator")
                    .and_then(Value::as_str)
                    .and_then(NumericOperator::parse);
                let value = obj.get("value").and_then(json_text).unwrap_or_default();
                FieldFilter::Numeric { operator, value }
            }
        }
        _ => return None,
    };

    Some((key.to_string(), filter))
}
