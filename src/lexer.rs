use crate::error::{FormulaError, Result};
use crate::token::{Function, Lexeme, Token};
use log::{debug, trace};

/// Characters that are never accepted in a formula.
pub const DISALLOWED_SYMBOLS: [char; 13] = [
    '@', '#', '&', '$', '!', '%', '|', '~', '?', '>', '<', ':', ';',
];

pub struct Lexer {
    input: Vec<char>,
    pos: usize,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            pos: 0,
        }
    }

    /// Splits the whole input into tokens, each tagged with its character
    /// offset.
    pub fn tokenize(mut self) -> Result<Vec<Lexeme>> {
        let mut lexemes = Vec::with_capacity(self.input.len());

        while let Some(ch) = self.input.get(self.pos).copied() {
            if DISALLOWED_SYMBOLS.contains(&ch) {
                return Err(FormulaError::DisallowedSymbol {
                    symbol: ch,
                    position: self.pos,
                });
            }

            let token = match ch {
                'c' if self.matches_function("cos") => Token::Function(Function::Cos),
                's' if self.matches_function("sin") => Token::Function(Function::Sin),
                other => Token::from(other),
            };

            trace!("Lexed token {:?} at {}", token, self.pos);
            lexemes.push(Lexeme {
                token,
                position: self.pos,
            });
            self.pos += match token {
                Token::Function(func) => func.name().len(),
                _ => 1,
            };
        }

        debug!("Lexed {} tokens", lexemes.len());
        Ok(lexemes)
    }

    /// A function name is only recognised when more input follows it, so a
    /// formula ending in "cos" or "sin" lexes those letters as variables.
    fn matches_function(&self, name: &str) -> bool {
        let len = name.chars().count();
        if self.pos + len >= self.input.len() {
            return false;
        }
        self.input[self.pos..self.pos + len]
            .iter()
            .copied()
            .eq(name.chars())
    }
}
