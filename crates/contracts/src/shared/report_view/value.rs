use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// One field value of a report row.
///
/// Providers only ever emit strings, numbers and nulls. Anything else that
/// shows up in a payload (booleans, nested values) is kept as its text form
/// so sorting and export still have something to work with.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub enum CellValue {
    #[default]
    Null,
    Number(f64),
    Text(String),
}

static NULL_CELL: CellValue = CellValue::Null;

impl CellValue {
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) if !n.is_nan() => Some(*n),
            _ => None,
        }
    }

    /// Numeric value, also accepting numeric text (decimal columns are
    /// sometimes serialized as strings by the database driver).
    pub fn as_f64_lenient(&self) -> Option<f64> {
        match self {
            CellValue::Text(s) => s.trim().parse::<f64>().ok().filter(|n| !n.is_nan()),
            other => other.as_f64(),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// String coercion used for collation and CSV output.
    /// Null coerces to the empty string; callers substitute their own label.
    pub fn to_plain_string(&self) -> String {
        match self {
            CellValue::Null => String::new(),
            CellValue::Number(n) => number_to_string(*n),
            CellValue::Text(s) => s.clone(),
        }
    }
}

/// Renders a number the way a browser prints it: integral values without a
/// fractional part, everything else in shortest round-trip form.
pub fn number_to_string(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if n.fract() == 0.0 && n.abs() < 1e21 {
        return format!("{}", n as i128);
    }
    format!("{}", n)
}

impl From<Value> for CellValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => CellValue::Null,
            Value::Number(n) => n.as_f64().map_or(CellValue::Null, CellValue::Number),
            Value::String(s) => CellValue::Text(s),
            Value::Bool(b) => CellValue::Text(b.to_string()),
            other => CellValue::Text(other.to_string()),
        }
    }
}

impl From<CellValue> for Value {
    fn from(cell: CellValue) -> Self {
        match cell {
            CellValue::Null => Value::Null,
            CellValue::Number(n) if n.fract() == 0.0 && n.abs() < 9.0e15 => Value::from(n as i64),
            CellValue::Number(n) => serde_json::Number::from_f64(n)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            CellValue::Text(s) => Value::String(s),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<i64> for CellValue {
    fn from(n: i64) -> Self {
        CellValue::Number(n as f64)
    }
}

impl From<i32> for CellValue {
    fn from(n: i32) -> Self {
        CellValue::Number(n as f64)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(CellValue::Null, Into::into)
    }
}

/// A flat record of named fields, as returned by a report provider.
///
/// Rows are never validated against a schema: looking up a field the row
/// does not carry yields [`CellValue::Null`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row(BTreeMap<String, CellValue>);

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<CellValue>,
        I: IntoIterator<Item = (K, V)>,
    {
        pairs.into_iter().collect()
    }

    pub fn get(&self, key: &str) -> &CellValue {
        self.0.get(key).unwrap_or(&NULL_CELL)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<CellValue>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<CellValue>> FromIterator<(K, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Row(iter
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect())
    }
}
