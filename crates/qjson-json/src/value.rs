//! The JSON value tree produced by [`crate::parser::Parser`].

use rustc_hash::FxHashMap;

/// A JSON object: an unordered, string-keyed map. Insertion order is not
/// preserved; during parsing, a duplicate key silently overwrites the
/// earlier value (last write wins).
pub type JsonObject = FxHashMap<String, JsonValue>;

/// A JSON array: an ordered sequence of values.
pub type JsonArray = Vec<JsonValue>;

/// A parsed JSON value.
///
/// `Integer` and `Double` are disjoint variants: a lexed `1` parses to
/// `Integer(1)`, while `1.0` and `1e0` both parse to `Double`. Nothing in
/// this crate ever collapses the two, since the evaluator's subscript rule
/// (an array index must be an `Integer`, never a widened `Double`) depends
/// on the distinction surviving into the value tree.
#[derive(Debug, Clone, PartialEq)]
pub enum JsonValue {
    Null,
    Bool(bool),
    Integer(i64),
    Double(f64),
    String(String),
    Array(JsonArray),
    Object(JsonObject),
}

impl JsonValue {
    pub fn is_numeric(&self) -> bool {
        matches!(self, JsonValue::Integer(_) | JsonValue::Double(_))
    }

    pub fn is_object(&self) -> bool {
        matches!(self, JsonValue::Object(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, JsonValue::Array(_))
    }

    /// Widen to `f64`. Only valid when [`Self::is_numeric`] (callers must
    /// not invoke this on a non-numeric value).
    pub fn to_double(&self) -> f64 {
        match self {
            JsonValue::Integer(i) => *i as f64,
            JsonValue::Double(d) => *d,
            other => panic!("to_double called on non-numeric JsonValue: {other:?}"),
        }
    }

    pub fn as_object(&self) -> Option<&JsonObject> {
        match self {
            JsonValue::Object(obj) => Some(obj),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&JsonArray> {
        match self {
            JsonValue::Array(arr) => Some(arr),
            _ => None,
        }
    }

    /// A short type name for use in error messages (e.g. "Unsupported
    /// unary operation on type: String").
    pub fn type_name(&self) -> &'static str {
        match self {
            JsonValue::Null => "Null",
            JsonValue::Bool(_) => "Bool",
            JsonValue::Integer(_) => "Integer",
            JsonValue::Double(_) => "Double",
            JsonValue::String(_) => "String",
            JsonValue::Array(_) => "Array",
            JsonValue::Object(_) => "Object",
        }
    }

    /// Renders the value per the output format: integers as plain decimal,
    /// doubles with at least six significant digits, strings wrapped in
    /// quotes without re-encoding, arrays/objects recursively with `, `
    /// separators. Object key order is unspecified.
    pub fn render(&self) -> String {
        match self {
            JsonValue::Null => "null".to_string(),
            JsonValue::Bool(b) => b.to_string(),
            JsonValue::Integer(i) => i.to_string(),
            JsonValue::Double(d) => format!("{d:.6}"),
            JsonValue::String(s) => format!("\"{s}\""),
            JsonValue::Array(items) => {
                if items.is_empty() {
                    return "[]".to_string();
                }
                let rendered: Vec<String> = items.iter().map(JsonValue::render).collect();
                format!("[ {} ]", rendered.join(", "))
            }
            JsonValue::Object(obj) => {
                if obj.is_empty() {
                    return "{}".to_string();
                }
                let rendered: Vec<String> = obj
                    .iter()
                    .map(|(k, v)| format!("\"{}\": {}", k, v.render()))
                    .collect();
                format!("{{ {} }}", rendered.join(", "))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_and_double_are_disjoint() {
        assert_ne!(JsonValue::Integer(1), JsonValue::Double(1.0));
    }

    #[test]
    fn to_double_widens_integer() {
        assert_eq!(JsonValue::Integer(4).to_double(), 4.0);
    }

    #[test]
    fn render_empty_containers() {
        assert_eq!(JsonValue::Array(vec![]).render(), "[]");
        assert_eq!(JsonValue::Object(JsonObject::default()).render(), "{}");
    }

    #[test]
    fn render_array_joins_with_comma_space() {
        let arr = JsonValue::Array(vec![JsonValue::Integer(1), JsonValue::Integer(2)]);
        assert_eq!(arr.render(), "[ 1, 2 ]");
    }

    #[test]
    fn render_double_keeps_six_significant_digits() {
        assert_eq!(JsonValue::Double(5.0).render(), "5.000000");
    }
}
