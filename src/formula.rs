use crate::error::{FormulaError, Result};
use crate::evaluator;
use crate::lexer::Lexer;
use crate::postfix::{to_postfix, Postfix};
use crate::token::Token;
use log::debug;
use rayon::prelude::*;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// An infix formula over single-character variables, converted to postfix
/// form once at construction.
///
/// ```
/// use formula_rs::Formula;
/// use std::collections::HashMap;
///
/// let formula = Formula::new("(a+b)*c").unwrap();
/// assert_eq!(formula.postfix(), "ab+c*");
///
/// let bindings = HashMap::from([('a', 1.0), ('b', 2.0), ('c', 4.0)]);
/// assert_eq!(formula.evaluate(&bindings).unwrap(), 12.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Formula {
    infix: String,
    postfix: Postfix,
}

impl Formula {
    /// Lexes and converts `infix`.
    ///
    /// Fails with [`FormulaError::DisallowedSymbol`] or
    /// [`FormulaError::UnbalancedParentheses`]; no formula is built then.
    pub fn new(infix: impl Into<String>) -> Result<Self> {
        let infix = infix.into();
        debug!("Building formula: {}", infix);
        let lexemes = Lexer::new(&infix).tokenize()?;
        let postfix = to_postfix(&lexemes)?;
        Ok(Self { infix, postfix })
    }

    /// The text the formula was built from, verbatim.
    pub fn infix(&self) -> &str {
        &self.infix
    }

    /// Postfix rendering, with functions spelled out as `cos` and `sin`.
    pub fn postfix(&self) -> String {
        self.postfix.to_string()
    }

    pub fn tokens(&self) -> &[Token] {
        self.postfix.tokens()
    }

    /// Distinct variables in the formula, sorted.
    pub fn variables(&self) -> Vec<char> {
        self.postfix.variables().iter().copied().collect()
    }

    /// Every variable bound to its default of `0.0`.
    pub fn bindings(&self) -> HashMap<char, f64> {
        self.postfix
            .variables()
            .iter()
            .map(|&name| (name, 0.0))
            .collect()
    }

    /// Evaluates the formula. Unbound variables count as `0.0` and bindings
    /// for variables the formula does not use are ignored.
    pub fn evaluate(&self, bindings: &HashMap<char, f64>) -> Result<f64> {
        evaluator::evaluate(&self.postfix, bindings)
    }

    /// Evaluates every binding set in parallel. Results keep the input order.
    pub fn evaluate_batch(&self, binding_sets: &[HashMap<char, f64>]) -> Vec<Result<f64>> {
        debug!(
            "Batch evaluating {} with {} binding sets",
            self.infix,
            binding_sets.len()
        );
        binding_sets
            .par_iter()
            .map(|bindings| self.evaluate(bindings))
            .collect()
    }
}

impl FromStr for Formula {
    type Err = FormulaError;

    fn from_str(s: &str) -> Result<Self> {
        Formula::new(s)
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.infix)
    }
}
