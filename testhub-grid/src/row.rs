//! Row records and the values read out of them.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Identity of a row, used as the key in a [`SelectionMap`](crate::SelectionMap).
pub type RowKey = String;

/// A value extracted from a row by a column accessor.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    #[default]
    Empty,
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
}

impl CellValue {
    /// Returns `true` for [`CellValue::Empty`].
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Returns the text if this is a [`CellValue::Text`].
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => Ok(()),
            Self::Bool(b) => write!(f, "{}", b),
            Self::Integer(i) => write!(f, "{}", i),
            Self::Float(x) => write!(f, "{}", x),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<u32> for CellValue {
    fn from(value: u32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<usize> for CellValue {
    fn from(value: usize) -> Self {
        Self::Integer(i64::try_from(value).unwrap_or(i64::MAX))
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or_default()
    }
}

impl From<&Value> for CellValue {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => Self::Empty,
            Value::Bool(b) => Self::Bool(*b),
            Value::Number(n) => n
                .as_i64()
                .map(Self::Integer)
                .or_else(|| n.as_f64().map(Self::Float))
                .unwrap_or_else(|| Self::Text(n.to_string())),
            Value::String(s) => Self::Text(s.clone()),
            Value::Array(_) | Value::Object(_) => Self::Text(value.to_string()),
        }
    }
}

/// A record that can be shown as a table row.
///
/// Rows are opaque to the table apart from an optional identity and a
/// lookup from column key to value.
///
/// # Example
///
/// ```
/// use testhub_grid::{CellValue, Row, RowKey};
///
/// struct User {
///     id: u32,
///     name: String,
/// }
///
/// impl Row for User {
///     fn key(&self) -> Option<RowKey> {
///         Some(self.id.to_string())
///     }
///
///     fn value(&self, accessor: &str) -> CellValue {
///         match accessor {
///             "id" => self.id.into(),
///             "name" => self.name.as_str().into(),
///             _ => CellValue::Empty,
///         }
///     }
/// }
/// ```
pub trait Row {
    /// Identity used for selection. Rows without one are keyed by position.
    fn key(&self) -> Option<RowKey> {
        None
    }

    /// Value for the given column key.
    fn value(&self, accessor: &str) -> CellValue;
}

impl Row for Map<String, Value> {
    fn key(&self) -> Option<RowKey> {
        json_key(self.get("id")?)
    }

    fn value(&self, accessor: &str) -> CellValue {
        self.get(accessor).map(CellValue::from).unwrap_or_default()
    }
}

impl Row for Value {
    fn key(&self) -> Option<RowKey> {
        self.as_object().and_then(Row::key)
    }

    fn value(&self, accessor: &str) -> CellValue {
        self.get(accessor).map(CellValue::from).unwrap_or_default()
    }
}

fn json_key(id: &Value) -> Option<RowKey> {
    match id {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Selection key for a row at an absolute position in the dataset.
pub(crate) fn key_or_index<R: Row>(row: &R, index: usize) -> RowKey {
    row.key().unwrap_or_else(|| index.to_string())
}
