//! The query evaluator: a tree-walker that resolves an [`qjson_query::Expression`]
//! against a [`qjson_json::JsonValue`] root, dispatching `Function` nodes
//! through an extensible [`FunctionRegistry`].

mod evaluator;
mod registry;

pub use evaluator::Evaluator;
pub use registry::{standard_registry, FunctionRegistry, Intrinsic};
