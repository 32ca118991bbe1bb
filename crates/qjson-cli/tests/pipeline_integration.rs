//! End-to-end integration tests across the JSON, query, and evaluator
//! crates, exercising the pipeline a CLI invocation drives internally
//! without spawning a process.

use qjson_eval::{standard_registry, Evaluator};
use qjson_json::{parse_document, JsonValue};
use qjson_query::parse_expression;

fn evaluate(json: &str, query: &str) -> Result<JsonValue, Vec<qjson_util::Error>> {
    let document = parse_document(json)?;
    let expression = parse_expression(query)?;
    let registry = standard_registry();
    Evaluator::new(&document, &registry)
        .evaluate_expression(&expression)
        .map_err(|e| vec![e])
}

#[test]
fn scenario_flat_key_lookup() {
    assert_eq!(evaluate(r#"{"a": 1}"#, "a").unwrap(), JsonValue::Integer(1));
}

#[test]
fn scenario_nested_subscript() {
    assert_eq!(evaluate(r#"{"a": {"b": [10,20,30]}}"#, "a.b[1]").unwrap(), JsonValue::Integer(20));
}

#[test]
fn scenario_subscript_via_nested_lookup() {
    let json = r#"{"a":{"b":[1,2,{"c":"test"},[11,12]]}}"#;
    assert_eq!(evaluate(json, "a.b[a.b[1]].c").unwrap(), JsonValue::String("test".to_string()));
}

#[test]
fn scenario_max_over_array() {
    assert_eq!(evaluate(r#"{"array":[1,2,3,4,5]}"#, "max(array)").unwrap(), JsonValue::Double(5.0));
}

#[test]
fn scenario_arithmetic_with_grouping() {
    assert_eq!(evaluate(r#"{"x":10,"y":3}"#, "(x + y) * 2").unwrap(), JsonValue::Double(26.0));
}

#[test]
fn scenario_division_by_zero() {
    let errors = evaluate(r#"{"x":1}"#, "x / 0").unwrap_err();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].message, "Division by zero");
}

#[test]
fn malformed_json_surfaces_parser_errors_before_query_parsing() {
    let errors = evaluate("{\"a\": }", "a").unwrap_err();
    assert!(!errors.is_empty());
    assert_eq!(errors[0].source, "Parser");
}

#[test]
fn malformed_query_surfaces_query_errors() {
    let errors = evaluate(r#"{"a": 1}"#, "a +").unwrap_err();
    assert!(!errors.is_empty());
}

#[test]
fn function_call_with_zero_arguments_parses_and_evaluates() {
    // size() itself requires exactly one argument, so the zero-arg call
    // exercises the "function with zero args" boundary case through the
    // evaluator's own argument-count check rather than the parser.
    let errors = evaluate(r#"{"a": 1}"#, "size()").unwrap_err();
    assert!(errors[0].message.contains("expects 1 argument"));
}

#[test]
fn max_of_empty_array_is_an_error() {
    let errors = evaluate(r#"{"a": []}"#, "max(a)").unwrap_err();
    assert!(errors[0].message.contains("no values to reduce"));
}

#[test]
fn deeply_nested_paths_resolve() {
    let json = r#"{"a":{"b":{"c":{"d":{"e":42}}}}}"#;
    assert_eq!(evaluate(json, "a.b.c.d.e").unwrap(), JsonValue::Integer(42));
}
