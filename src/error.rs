/// Errors raised while building or evaluating a [`Formula`](crate::Formula).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormulaError {
    #[error("Disallowed symbol '{symbol}' at position {position}")]
    DisallowedSymbol { symbol: char, position: usize },

    #[error("Unbalanced parentheses at position {position}")]
    UnbalancedParentheses { position: usize },

    /// Too few operands for an operator, an empty formula, or more than one
    /// value left once every token is consumed.
    #[error("Stack underflow: formula does not reduce to a single value")]
    StackUnderflow,
}

impl FormulaError {
    /// Construction-time failure; no formula was produced.
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self,
            FormulaError::DisallowedSymbol { .. } | FormulaError::UnbalancedParentheses { .. }
        )
    }

    /// Failure of a single evaluate call; the formula stays usable.
    pub fn is_evaluation_error(&self) -> bool {
        matches!(self, FormulaError::StackUnderflow)
    }
}

pub type Result<T> = std::result::Result<T, FormulaError>;
