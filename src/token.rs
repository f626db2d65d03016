use std::fmt;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Power,
}

impl Operator {
    pub const fn priority(&self) -> u8 {
        match self {
            Operator::Add | Operator::Subtract => 1,
            Operator::Multiply | Operator::Divide => 2,
            Operator::Power => 3,
        }
    }

    /// Plain IEEE arithmetic, so `1 / 0` is infinity rather than an error.
    pub fn apply(&self, left: f64, right: f64) -> f64 {
        match self {
            Operator::Add => left + right,
            Operator::Subtract => left - right,
            Operator::Multiply => left * right,
            Operator::Divide => left / right,
            Operator::Power => left.powf(right),
        }
    }

    pub const fn symbol(&self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Subtract => '-',
            Operator::Multiply => '*',
            Operator::Divide => '/',
            Operator::Power => '^',
        }
    }
}

impl TryFrom<char> for Operator {
    type Error = char;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        match value {
            '+' => Ok(Operator::Add),
            '-' => Ok(Operator::Subtract),
            '*' => Ok(Operator::Multiply),
            '/' => Ok(Operator::Divide),
            '^' => Ok(Operator::Power),
            other => Err(other),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Function {
    Cos,
    Sin,
}

impl Function {
    pub const fn priority(&self) -> u8 {
        3
    }

    /// Argument is in radians.
    pub fn apply(&self, value: f64) -> f64 {
        match self {
            Function::Cos => value.cos(),
            Function::Sin => value.sin(),
        }
    }

    pub const fn name(&self) -> &'static str {
        match self {
            Function::Cos => "cos",
            Function::Sin => "sin",
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Token {
    Operator(Operator),
    Function(Function),
    Variable(char),
    LeftParen,
    RightParen,
}

impl Token {
    /// Precedence rank for tokens that live on the operator stack.
    /// Parentheses and variables have none.
    pub const fn priority(&self) -> Option<u8> {
        match self {
            Token::Operator(op) => Some(op.priority()),
            Token::Function(func) => Some(func.priority()),
            Token::Variable(_) | Token::LeftParen | Token::RightParen => None,
        }
    }
}

/// A token and the zero-based character offset where it starts in the input.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Lexeme {
    pub token: Token,
    pub position: usize,
}

impl From<char> for Token {
    fn from(value: char) -> Self {
        match value {
            '(' => Token::LeftParen,
            ')' => Token::RightParen,
            other => Operator::try_from(other)
                .map(Token::Operator)
                .unwrap_or(Token::Variable(other)),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Operator(op) => write!(f, "{}", op.symbol()),
            Token::Function(func) => f.write_str(func.name()),
            Token::Variable(name) => write!(f, "{}", name),
            Token::LeftParen => f.write_str("("),
            Token::RightParen => f.write_str(")"),
        }
    }
}
