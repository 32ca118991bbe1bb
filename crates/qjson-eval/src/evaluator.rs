//! Tree-walking evaluator. Walks an [`Expression`] against an immutably
//! borrowed [`JsonValue`] root, cloning sub-values on extraction rather than
//! trying to hand back borrowed views. This keeps the interface simple at
//! the cost of copying.

use qjson_json::{JsonObject, JsonValue};
use qjson_query::{ArithOp, Binary, Expression, Function, Path, Unary, Value};
use qjson_util::Error;

use crate::registry::FunctionRegistry;

const SOURCE: &str = "Evaluator";

fn err(message: impl Into<String>) -> Error {
    Error::new(SOURCE, message, 0, 0)
}

/// Evaluates expressions against a fixed JSON root, dispatching `Function`
/// nodes through a caller-supplied [`FunctionRegistry`]. Registration must
/// happen before evaluation; the registry is not observed to change during
/// a single `evaluate_expression` call.
pub struct Evaluator<'a> {
    input: &'a JsonValue,
    registry: &'a FunctionRegistry,
}

impl<'a> Evaluator<'a> {
    pub fn new(input: &'a JsonValue, registry: &'a FunctionRegistry) -> Self {
        Self { input, registry }
    }

    /// Evaluates the root expression. If the input root is not an object,
    /// this is a deliberate shortcut: the expression is never inspected and
    /// the root value is returned unchanged.
    pub fn evaluate_expression(&self, expression: &Expression) -> Result<JsonValue, Error> {
        if !self.input.is_object() {
            return Ok(self.input.clone());
        }
        self.evaluate_value(expression)
    }

    pub(crate) fn evaluate_value(&self, value: &Value) -> Result<JsonValue, Error> {
        match value {
            Value::Integer(n) => Ok(JsonValue::Integer(*n)),
            Value::Double(d) => Ok(JsonValue::Double(*d)),
            Value::Path(path) => {
                let object = self.input.as_object().expect("evaluate_value entered with a non-object root");
                self.evaluate_path(object, path)
            }
            Value::Unary(unary) => self.evaluate_unary(unary),
            Value::Binary(binary) => self.evaluate_binary(binary),
            Value::Function(function) => self.evaluate_function(function),
        }
    }

    fn evaluate_path(&self, object: &JsonObject, path: &Path) -> Result<JsonValue, Error> {
        let Some(found) = object.get(&path.id) else {
            return Err(err(format!("Key '{}' not found", path.id)));
        };

        let mut resolved = found.clone();

        if let Some(subscript) = &path.subscript {
            let Some(array) = found.as_array() else {
                return Err(err(format!("Attempt to index into key '{}' which is not an array", path.id)));
            };

            let index_value = self.evaluate_value(subscript)?;
            let JsonValue::Integer(index) = index_value else {
                return Err(err(format!(
                    "Index must be an integer, instead found {}: {}[{}]",
                    index_value.type_name(),
                    path.id,
                    index_value.render()
                )));
            };

            let index = usize::try_from(index).map_err(|_| err("Index out of bounds"))?;
            resolved = array.get(index).cloned().ok_or_else(|| err("Index out of bounds"))?;
        }

        if let Some(next) = &path.next {
            let Some(next_object) = resolved.as_object() else {
                return Err(err(format!("Key '{}' is not an object", path.id)));
            };
            return self.evaluate_path(next_object, next);
        }

        Ok(resolved)
    }

    fn evaluate_unary(&self, unary: &Unary) -> Result<JsonValue, Error> {
        let value = self.evaluate_value(&unary.value)?;
        if !value.is_numeric() {
            return Err(err(format!("Unsupported unary operation on type: {}", value.type_name())));
        }
        Ok(JsonValue::Double(-value.to_double()))
    }

    fn evaluate_binary(&self, binary: &Binary) -> Result<JsonValue, Error> {
        let lhs = self.evaluate_value(&binary.lhs)?;
        let rhs = self.evaluate_value(&binary.rhs)?;

        if !lhs.is_numeric() {
            return Err(err(format!("Unsupported binary operation on type: {}", lhs.type_name())));
        }
        if !rhs.is_numeric() {
            return Err(err(format!("Unsupported binary operation on type: {}", rhs.type_name())));
        }

        let (l, r) = (lhs.to_double(), rhs.to_double());
        match binary.op {
            ArithOp::Add => Ok(JsonValue::Double(l + r)),
            ArithOp::Sub => Ok(JsonValue::Double(l - r)),
            ArithOp::Mul => Ok(JsonValue::Double(l * r)),
            ArithOp::Div => {
                if r == 0.0 {
                    Err(err("Division by zero"))
                } else {
                    Ok(JsonValue::Double(l / r))
                }
            }
        }
    }

    fn evaluate_function(&self, function: &Function) -> Result<JsonValue, Error> {
        let Some(callback) = self.registry.get(&function.name) else {
            return Err(err(format!("Function '{}' not found", function.name)));
        };
        callback(self, &function.arguments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::standard_registry;
    use qjson_json::parse_document;
    use qjson_query::parse_expression;

    fn eval(json: &str, query: &str) -> Result<JsonValue, Error> {
        let root = parse_document(json).expect("test json should parse");
        let expr = parse_expression(query).expect("test query should parse");
        let registry = standard_registry();
        Evaluator::new(&root, &registry).evaluate_expression(&expr)
    }

    #[test]
    fn scenario_1_flat_key_lookup() {
        assert_eq!(eval(r#"{"a": 1}"#, "a").unwrap(), JsonValue::Integer(1));
    }

    #[test]
    fn scenario_2_nested_subscript() {
        assert_eq!(eval(r#"{"a": {"b": [10,20,30]}}"#, "a.b[1]").unwrap(), JsonValue::Integer(20));
    }

    #[test]
    fn scenario_3_subscript_driven_by_another_lookup() {
        let json = r#"{"a":{"b":[1,2,{"c":"test"},[11,12]]}}"#;
        assert_eq!(eval(json, "a.b[a.b[1]].c").unwrap(), JsonValue::String("test".to_string()));
    }

    #[test]
    fn scenario_4_max_over_array_widens_to_double() {
        assert_eq!(eval(r#"{"array":[1,2,3,4,5]}"#, "max(array)").unwrap(), JsonValue::Double(5.0));
    }

    #[test]
    fn scenario_5_arithmetic_with_grouping() {
        assert_eq!(eval(r#"{"x":10,"y":3}"#, "(x + y) * 2").unwrap(), JsonValue::Double(26.0));
    }

    #[test]
    fn scenario_6_division_by_zero_is_an_error() {
        let err = eval(r#"{"x":1}"#, "x / 0").unwrap_err();
        assert_eq!(err.message, "Division by zero");
        assert_eq!(err.source, "Evaluator");
    }

    #[test]
    fn missing_key_is_an_error() {
        let err = eval(r#"{"a": 1}"#, "missing").unwrap_err();
        assert_eq!(err.message, "Key 'missing' not found");
    }

    #[test]
    fn unknown_function_is_an_error() {
        let err = eval(r#"{"a": 1}"#, "nope(a)").unwrap_err();
        assert_eq!(err.message, "Function 'nope' not found");
    }

    #[test]
    fn non_object_root_short_circuits_and_ignores_the_expression() {
        assert_eq!(eval("42", "whatever").unwrap(), JsonValue::Integer(42));
    }

    #[test]
    fn unary_minus_on_integer_widens_to_double() {
        assert_eq!(eval(r#"{"x": 4}"#, "-x").unwrap(), JsonValue::Double(-4.0));
    }

    #[test]
    fn unary_minus_on_non_numeric_is_an_error() {
        let err = eval(r#"{"x": "s"}"#, "-x").unwrap_err();
        assert_eq!(err.message, "Unsupported unary operation on type: String");
    }

    #[test]
    fn indexing_a_non_array_is_an_error() {
        let err = eval(r#"{"x": 1}"#, "x[0]").unwrap_err();
        assert_eq!(err.message, "Attempt to index into key 'x' which is not an array");
    }

    #[test]
    fn out_of_range_subscript_is_an_error_not_a_panic() {
        let err = eval(r#"{"x": [1,2]}"#, "x[5]").unwrap_err();
        assert_eq!(err.message, "Index out of bounds");
    }

    #[test]
    fn dotted_tail_into_non_object_is_an_error() {
        let err = eval(r#"{"x": 1}"#, "x.y").unwrap_err();
        assert_eq!(err.message, "Key 'x' is not an object");
    }

    #[test]
    fn subscript_must_be_an_integer_not_a_widened_double() {
        let err = eval(r#"{"x": [1,2,3], "i": 1.0}"#, "x[i]").unwrap_err();
        assert!(err.message.starts_with("Index must be an integer"));
    }
}
