use crate::error::{FormulaError, Result};
use crate::stack::Stack;
use crate::token::{Lexeme, Token};
use log::debug;
use std::collections::BTreeSet;
use std::fmt;

/// Tokens in Reverse Polish order together with every variable they mention.
#[derive(Debug, Clone, PartialEq)]
pub struct Postfix {
    tokens: Vec<Token>,
    variables: BTreeSet<char>,
}

impl Postfix {
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn variables(&self) -> &BTreeSet<char> {
        &self.variables
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    #[cfg(test)]
    pub(crate) fn from_tokens(tokens: Vec<Token>) -> Self {
        let variables = tokens
            .iter()
            .filter_map(|token| match token {
                Token::Variable(name) => Some(*name),
                _ => None,
            })
            .collect();
        Self { tokens, variables }
    }
}

impl fmt::Display for Postfix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for token in &self.tokens {
            write!(f, "{}", token)?;
        }
        Ok(())
    }
}

/// Shunting-yard conversion from infix tokens to [`Postfix`].
pub struct Converter {
    output: Vec<Token>,
    variables: BTreeSet<char>,
    // Pending operators, tagged with their character offset in the input.
    operators: Stack<(usize, Token)>,
}

impl Converter {
    pub fn new() -> Self {
        Self {
            output: Vec::new(),
            variables: BTreeSet::new(),
            operators: Stack::new(),
        }
    }

    pub fn convert(mut self, lexemes: &[Lexeme]) -> Result<Postfix> {
        self.output.reserve(lexemes.len());

        for &Lexeme { token, position } in lexemes {
            match token {
                Token::LeftParen => self.operators.push((position, token)),
                Token::RightParen => self.close_group(position)?,
                Token::Operator(op) => self.push_operator(position, token, op.priority()),
                Token::Function(func) => self.push_operator(position, token, func.priority()),
                Token::Variable(name) => {
                    self.variables.insert(name);
                    self.output.push(token);
                }
            }
        }

        while let Some((position, token)) = self.operators.pop() {
            if token == Token::LeftParen {
                return Err(FormulaError::UnbalancedParentheses { position });
            }
            self.output.push(token);
        }

        let postfix = Postfix {
            tokens: self.output,
            variables: self.variables,
        };
        debug!("Postfix form: {}", postfix);
        Ok(postfix)
    }

    fn close_group(&mut self, position: usize) -> Result<()> {
        loop {
            match self.operators.pop() {
                Some((_, Token::LeftParen)) => return Ok(()),
                Some((_, token)) => self.output.push(token),
                None => return Err(FormulaError::UnbalancedParentheses { position }),
            }
        }
    }

    /// Pops while the stack top binds at least as tightly, so equal
    /// priorities evaluate left to right (`^` included).
    fn push_operator(&mut self, position: usize, token: Token, priority: u8) {
        while let Some((_, top)) = self.operators.peek().copied() {
            match top.priority() {
                Some(top_priority) if priority <= top_priority => {
                    self.operators.pop();
                    self.output.push(top);
                }
                _ => break,
            }
        }
        self.operators.push((position, token));
    }
}

impl Default for Converter {
    fn default() -> Self {
        Self::new()
    }
}

/// Converts already-lexed tokens to postfix form.
pub fn to_postfix(lexemes: &[Lexeme]) -> Result<Postfix> {
    Converter::new().convert(lexemes)
}
