pub mod cache;
pub mod error;
pub mod evaluator;
pub mod formula;
pub mod lexer;
pub mod postfix;
pub mod stack;
pub mod token;

pub use cache::{FormulaCache, DEFAULT_CACHE_CAPACITY};
pub use error::{FormulaError, Result};
pub use formula::Formula;
pub use token::{Function, Lexeme, Operator, Token};

use std::collections::HashMap;

/// Builds `expression` and evaluates it once.
pub fn evaluate_expression(expression: &str, bindings: &HashMap<char, f64>) -> Result<f64> {
    Formula::new(expression)?.evaluate(bindings)
}
