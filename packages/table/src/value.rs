//! Dynamic cell values.

use serde::ser::{Serialize, Serializer};

/// A single table cell.
///
/// The raw CSV carries untyped text; numeric-looking fields are parsed
/// at load time, everything else stays text. `Null` marks missing or
/// undefined values (empty cells, failed derivations) and is what the
/// missing-value filter removes.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Missing or undefined.
    Null,
    /// Numeric cell. All numbers are carried as `f64`.
    Number(f64),
    /// Free-form text cell.
    Text(String),
}

impl Value {
    /// Builds a text cell from anything string-like.
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    /// Whether this cell is null.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// The numeric value of this cell, if it is a number.
    ///
    /// Text cells are not coerced; the rooms-coercion stage does its
    /// own parsing so that failures can drop the row.
    #[must_use]
    pub const fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Null | Self::Text(_) => None,
        }
    }

    /// The text value of this cell, if it is text.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Null | Self::Number(_) => None,
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Number(n) => {
                // Whole numbers serialize without a fractional part so
                // counts and ids come out as JSON integers.
                #[allow(clippy::cast_possible_truncation)]
                if n.fract() == 0.0 && n.abs() < 9_007_199_254_740_992.0 {
                    serializer.serialize_i64(*n as i64)
                } else {
                    serializer.serialize_f64(*n)
                }
            }
            Self::Text(s) => serializer.serialize_str(s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn number_accessor() {
        assert_eq!(Value::Number(3.5).as_number(), Some(3.5));
        assert_eq!(Value::text("3.5").as_number(), None);
        assert_eq!(Value::Null.as_number(), None);
    }

    #[test]
    fn text_accessor() {
        assert_eq!(Value::text("Lisboa").as_text(), Some("Lisboa"));
        assert_eq!(Value::Number(1.0).as_text(), None);
    }

    #[test]
    fn serializes_whole_numbers_as_integers() {
        let json = serde_json::to_string(&Value::Number(12.0)).unwrap();
        assert_eq!(json, "12");
    }

    #[test]
    fn serializes_fractions_as_floats() {
        let json = serde_json::to_string(&Value::Number(1200.5)).unwrap();
        assert_eq!(json, "1200.5");
    }

    #[test]
    fn serializes_null() {
        let json = serde_json::to_string(&Value::Null).unwrap();
        assert_eq!(json, "null");
    }
}
