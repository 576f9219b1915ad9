#![forbid(unsafe_code)]

use std::fmt;
use std::sync::Arc;

/// Schema-level element type of a [`crate::Column`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarType {
    Int,
    Float,
    Str,
}

impl fmt::Display for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ScalarType::Int => "int",
            ScalarType::Float => "float",
            ScalarType::Str => "str",
        })
    }
}

/// A dynamically typed cell value used at API seams (row construction,
/// generic per-row access).
///
/// `Null` is the undefined sentinel: it reads as `0` / `NaN` / `""` through
/// the typed accessors and as `false` through `Column::is_defined`.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Int(i64),
    Float(f64),
    Str(Arc<str>),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Read this value as an integer, coercing across representations.
    ///
    /// Strings use best-effort decimal parsing: non-numeric text yields `0`
    /// (a fractional string is truncated toward zero).
    pub fn as_int(&self) -> i64 {
        match self {
            Value::Null => 0,
            Value::Int(v) => *v,
            Value::Float(v) => *v as i64,
            Value::Str(s) => parse_int_lossy(s),
        }
    }

    /// Read this value as a float, coercing across representations.
    ///
    /// Non-numeric strings yield `NaN` rather than an error; consumers that
    /// need strict validation should inspect the raw string column instead.
    pub fn as_float(&self) -> f64 {
        match self {
            Value::Null => f64::NAN,
            Value::Int(v) => *v as f64,
            Value::Float(v) => *v,
            Value::Str(s) => s.trim().parse::<f64>().unwrap_or(f64::NAN),
        }
    }

    /// Read this value as a string, rendering numbers with their default
    /// display formatting.
    pub fn as_str(&self) -> Arc<str> {
        match self {
            Value::Null => Arc::from(""),
            Value::Int(v) => Arc::from(v.to_string().as_str()),
            Value::Float(v) => Arc::from(v.to_string().as_str()),
            Value::Str(s) => s.clone(),
        }
    }

    /// Coerce to the given target type, preserving `Null`.
    pub fn coerce(&self, ty: ScalarType) -> Value {
        if self.is_null() {
            return Value::Null;
        }
        match ty {
            ScalarType::Int => Value::Int(self.as_int()),
            ScalarType::Float => Value::Float(self.as_float()),
            ScalarType::Str => Value::Str(self.as_str()),
        }
    }
}

fn parse_int_lossy(s: &str) -> i64 {
    let t = s.trim();
    if let Ok(v) = t.parse::<i64>() {
        return v;
    }
    // Fractional or exponent-form text read through an int column truncates.
    t.parse::<f64>().map(|v| v as i64).unwrap_or(0)
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(Arc::from(value))
    }
}

impl From<Arc<str>> for Value {
    fn from(value: Arc<str>) -> Self {
        Value::Str(value)
    }
}

/// Shared, immutable backing storage for array-backed columns.
///
/// Numeric variants are packed buffers; the string variant is an indirection
/// array of shared slices. The storage kind is independent of the owning
/// column's [`ScalarType`]: a mismatch triggers lazy per-read coercion.
#[derive(Debug, Clone, PartialEq)]
pub enum ArrayData {
    Int(Arc<Vec<i64>>),
    Float(Arc<Vec<f64>>),
    Str(Arc<Vec<Arc<str>>>),
}

impl ArrayData {
    pub fn len(&self) -> usize {
        match self {
            ArrayData::Int(v) => v.len(),
            ArrayData::Float(v) => v.len(),
            ArrayData::Str(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The storage kind, i.e. the type values have before any coercion.
    pub fn kind(&self) -> ScalarType {
        match self {
            ArrayData::Int(_) => ScalarType::Int,
            ArrayData::Float(_) => ScalarType::Float,
            ArrayData::Str(_) => ScalarType::Str,
        }
    }

    /// Raw (uncoerced) value at `index`.
    pub fn get(&self, index: usize) -> Value {
        match self {
            ArrayData::Int(v) => Value::Int(v[index]),
            ArrayData::Float(v) => Value::Float(v[index]),
            ArrayData::Str(v) => Value::Str(v[index].clone()),
        }
    }
}

impl From<Vec<i64>> for ArrayData {
    fn from(values: Vec<i64>) -> Self {
        ArrayData::Int(Arc::new(values))
    }
}

impl From<Vec<f64>> for ArrayData {
    fn from(values: Vec<f64>) -> Self {
        ArrayData::Float(Arc::new(values))
    }
}

impl From<Vec<Arc<str>>> for ArrayData {
    fn from(values: Vec<Arc<str>>) -> Self {
        ArrayData::Str(Arc::new(values))
    }
}

impl From<Vec<String>> for ArrayData {
    fn from(values: Vec<String>) -> Self {
        ArrayData::Str(Arc::new(
            values.into_iter().map(|s| Arc::from(s.as_str())).collect(),
        ))
    }
}

impl From<Vec<&str>> for ArrayData {
    fn from(values: Vec<&str>) -> Self {
        ArrayData::Str(Arc::new(values.into_iter().map(Arc::from).collect()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn int_coercion_is_best_effort() {
        assert_eq!(Value::from("42").as_int(), 42);
        assert_eq!(Value::from(" -7 ").as_int(), -7);
        assert_eq!(Value::from("1.9").as_int(), 1);
        assert_eq!(Value::from("abc").as_int(), 0);
        assert_eq!(Value::Null.as_int(), 0);
    }

    #[test]
    fn float_coercion_yields_nan_for_garbage() {
        assert_eq!(Value::from("1.25").as_float(), 1.25);
        assert!(Value::from("abc").as_float().is_nan());
        assert!(Value::Null.as_float().is_nan());
    }

    #[test]
    fn numbers_render_with_default_formatting() {
        assert_eq!(&*Value::Int(10).as_str(), "10");
        assert_eq!(&*Value::Float(1.5).as_str(), "1.5");
        assert_eq!(&*Value::Null.as_str(), "");
    }
}
