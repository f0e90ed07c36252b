//! Record sorting
//!
//! Sorting is stable: records with equal keys keep their input order in both
//! directions.

use crate::core::entity::Data;
use crate::core::field::FieldValue;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// Flip the direction (a second click on the same column header)
    pub fn toggle(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

/// Selected sort field and direction
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    /// Field to sort by; `None` keeps input order
    #[serde(default)]
    pub field: Option<String>,

    #[serde(default)]
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: Some(field.into()),
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: Some(field.into()),
            direction: SortDirection::Desc,
        }
    }

    /// Parse the query-string form
    ///
    /// # Format
    /// - `field:asc` or `field` (ascending)
    /// - `field:desc` (descending)
    /// - empty string: no sort
    pub fn parse(s: &str) -> Self {
        let s = s.trim();
        if s.is_empty() {
            return Self::none();
        }

        match s.rsplit_once(':') {
            Some((field, dir)) if dir.eq_ignore_ascii_case("desc") => Self::desc(field.trim()),
            Some((field, dir)) if dir.eq_ignore_ascii_case("asc") => Self::asc(field.trim()),
            _ => Self::asc(s),
        }
    }

    /// Column-header click: same field toggles direction, a new field starts ascending
    pub fn toggled(&self, field: &str) -> Self {
        match &self.field {
            Some(current) if current == field => Self {
                field: Some(field.to_string()),
                direction: self.direction.toggle(),
            },
            _ => Self::asc(field),
        }
    }
}

/// Compare two field values for ordering.
///
/// Numbers compare numerically; everything else compares as lowercase text.
/// Missing and null values order before any present value.
pub fn compare_field_values(a: Option<&FieldValue>, b: Option<&FieldValue>) -> Ordering {
    let a = a.filter(|v| !v.is_null());
    let b = b.filter(|v| !v.is_null());

    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => match (a.as_f64(), b.as_f64()) {
            (Some(x), Some(y)) => x.total_cmp(&y),
            _ => match (a, b) {
                (FieldValue::DateTime(x), FieldValue::DateTime(y)) => x.cmp(y),
                _ => {
                    let x = a.as_text().unwrap_or_default().to_lowercase();
                    let y = b.as_text().unwrap_or_default().to_lowercase();
                    x.cmp(&y)
                }
            },
        },
    }
}

/// Return a new, stably ordered copy of `records`
pub fn sort_records<T: Data>(records: &[T], spec: &SortSpec) -> Vec<T> {
    let mut sorted = records.to_vec();

    let Some(field) = spec.field.as_deref().filter(|f| !f.is_empty()) else {
        return sorted;
    };

    // slice::sort_by is stable
    sorted.sort_by(|a, b| {
        let ord = compare_field_values(a.field_value(field).as_ref(), b.field_value(field).as_ref());
        match spec.direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    });

    tracing::debug!(
        resource = T::resource_name(),
        field = field,
        direction = ?spec.direction,
        count = sorted.len(),
        "records sorted"
    );

    sorted
}
