//! The intrinsic function registry: a name table the evaluator consults
//! when it hits a `Function` node. Hosts register callbacks before
//! evaluation begins; [`standard_registry`] preloads the host's own
//! `size`/`max`/`min`/`sum`/`product` intrinsics.

use qjson_json::JsonValue;
use qjson_query::Expression;
use qjson_util::Error;
use rustc_hash::FxHashMap;

use crate::evaluator::Evaluator;

const SOURCE: &str = "Evaluator";

fn err(message: impl Into<String>) -> Error {
    Error::new(SOURCE, message, 0, 0)
}

/// A callback is responsible for evaluating its own arguments (typically
/// via [`Evaluator::evaluate_expression`]) and returning a result.
pub type Intrinsic = Box<dyn Fn(&Evaluator<'_>, &[Expression]) -> Result<JsonValue, Error>>;

#[derive(Default)]
pub struct FunctionRegistry {
    functions: FxHashMap<String, Intrinsic>,
}

impl FunctionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(
        &mut self,
        name: impl Into<String>,
        callback: impl Fn(&Evaluator<'_>, &[Expression]) -> Result<JsonValue, Error> + 'static,
    ) {
        self.functions.insert(name.into(), Box::new(callback));
    }

    pub fn get(&self, name: &str) -> Option<&Intrinsic> {
        self.functions.get(name)
    }
}

/// Builds a registry preloaded with the standard intrinsics: `size`,
/// `max`, `min`, `sum`, `product`.
pub fn standard_registry() -> FunctionRegistry {
    let mut registry = FunctionRegistry::new();
    registry.register("size", size);
    registry.register("max", |e, args| reduce(e, args, "max", f64::NEG_INFINITY, f64::max));
    registry.register("min", |e, args| reduce(e, args, "min", f64::INFINITY, f64::min));
    registry.register("sum", |e, args| reduce(e, args, "sum", 0.0, |a, b| a + b));
    registry.register("product", |e, args| reduce(e, args, "product", 1.0, |a, b| a * b));
    registry
}

/// `size(x)`: `x` must be an array or object; returns its length.
fn size(evaluator: &Evaluator<'_>, args: &[Expression]) -> Result<JsonValue, Error> {
    if args.len() != 1 {
        return Err(err(format!("Function 'size' expects 1 argument, found {}", args.len())));
    }

    let value = evaluator.evaluate_expression(&args[0])?;
    let len = match &value {
        JsonValue::Array(items) => items.len(),
        JsonValue::Object(obj) => obj.len(),
        other => {
            return Err(err(format!("Function 'size' expects an array or object, found {}", other.type_name())));
        }
    };

    Ok(JsonValue::Integer(len as i64))
}

/// Shared implementation of the variadic numeric reducers. A single
/// array-valued argument reduces over the array's elements (an empty
/// array is an error); a single non-array argument is treated as a
/// one-element list; otherwise every argument is reduced directly.
fn reduce(
    evaluator: &Evaluator<'_>,
    args: &[Expression],
    name: &str,
    identity: f64,
    op: impl Fn(f64, f64) -> f64,
) -> Result<JsonValue, Error> {
    let values = if args.len() == 1 {
        match evaluator.evaluate_expression(&args[0])? {
            JsonValue::Array(items) => items,
            other => vec![other],
        }
    } else {
        args.iter().map(|arg| evaluator.evaluate_expression(arg)).collect::<Result<Vec<_>, _>>()?
    };

    if values.is_empty() {
        return Err(err(format!("Function '{name}' has no values to reduce")));
    }

    let mut acc = identity;
    for value in &values {
        if !value.is_numeric() {
            return Err(err(format!("Function '{name}' expects numeric arguments, found {}", value.type_name())));
        }
        acc = op(acc, value.to_double());
    }

    Ok(JsonValue::Double(acc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use qjson_json::parse_document;
    use qjson_query::parse_expression;

    fn eval(json: &str, query: &str) -> Result<JsonValue, Error> {
        let root = parse_document(json).unwrap();
        let expr = parse_expression(query).unwrap();
        let registry = standard_registry();
        Evaluator::new(&root, &registry).evaluate_expression(&expr)
    }

    #[test]
    fn size_of_array() {
        assert_eq!(eval(r#"{"a": [1,2,3]}"#, "size(a)").unwrap(), JsonValue::Integer(3));
    }

    #[test]
    fn size_of_object() {
        assert_eq!(eval(r#"{"a": {"x": 1, "y": 2}}"#, "size(a)").unwrap(), JsonValue::Integer(2));
    }

    #[test]
    fn size_of_string_is_rejected() {
        let err = eval(r#"{"a": "hi"}"#, "size(a)").unwrap_err();
        assert!(err.message.contains("expects an array or object"));
    }

    #[test]
    fn max_over_empty_array_is_an_error() {
        let err = eval(r#"{"a": []}"#, "max(a)").unwrap_err();
        assert!(err.message.contains("no values to reduce"));
    }

    #[test]
    fn max_variadic_call() {
        assert_eq!(eval(r#"{"a": 1}"#, "max(1, 5, 3)").unwrap(), JsonValue::Double(5.0));
    }

    #[test]
    fn min_single_non_array_arg_is_a_one_element_list() {
        assert_eq!(eval(r#"{"a": 7}"#, "min(a)").unwrap(), JsonValue::Double(7.0));
    }

    #[test]
    fn sum_over_array() {
        assert_eq!(eval(r#"{"a": [1,2,3]}"#, "sum(a)").unwrap(), JsonValue::Double(6.0));
    }

    #[test]
    fn product_zero_args_has_nothing_to_reduce() {
        let err = eval(r#"{"a": 1}"#, "product()").unwrap_err();
        assert!(err.message.contains("no values to reduce"));
    }

    #[test]
    fn reducer_rejects_non_numeric_elements() {
        let err = eval(r#"{"a": [1, "x"]}"#, "sum(a)").unwrap_err();
        assert!(err.message.contains("expects numeric arguments"));
    }
}
