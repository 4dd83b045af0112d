/// Calculator Kernel: Input Tokens
///
/// Tokens are pure data: one key of user intent each.
/// They carry no transition logic.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Rejected token text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("unknown token {0:?}")]
    Unknown(String),
    #[error("digit out of range: {0}")]
    DigitOutOfRange(u8),
}

/// Binary arithmetic operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl BinaryOp {
    pub const ALL: [BinaryOp; 4] = [
        BinaryOp::Add,
        BinaryOp::Subtract,
        BinaryOp::Multiply,
        BinaryOp::Divide,
    ];

    /// Canonical keypad symbol, as written into history entries.
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Subtract => "-",
            BinaryOp::Multiply => "×",
            BinaryOp::Divide => "÷",
        }
    }

    /// Accepts the canonical symbol plus the ASCII and typographic aliases.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "+" => Some(BinaryOp::Add),
            "-" | "−" => Some(BinaryOp::Subtract),
            "×" | "*" => Some(BinaryOp::Multiply),
            "÷" | "/" => Some(BinaryOp::Divide),
            _ => None,
        }
    }
}

/// Single-operand functions applied immediately to the display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnaryOp {
    SquareRoot,
    Square,
    Reciprocal,
}

impl UnaryOp {
    pub const ALL: [UnaryOp; 3] = [UnaryOp::SquareRoot, UnaryOp::Square, UnaryOp::Reciprocal];

    pub fn symbol(self) -> &'static str {
        match self {
            UnaryOp::SquareRoot => "√",
            UnaryOp::Square => "x²",
            UnaryOp::Reciprocal => "1/x",
        }
    }

    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "√" => Some(UnaryOp::SquareRoot),
            "x²" => Some(UnaryOp::Square),
            "1/x" => Some(UnaryOp::Reciprocal),
            _ => None,
        }
    }
}

/// A decimal digit, always in `0..=9`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Digit(u8);

impl Digit {
    pub fn new(value: u8) -> Result<Self, TokenError> {
        if value <= 9 {
            Ok(Digit(value))
        } else {
            Err(TokenError::DigitOutOfRange(value))
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// The digit's keypad character.
    pub fn as_char(self) -> char {
        char::from(b'0' + self.0)
    }
}

impl fmt::Display for Digit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One unit of user input.
///
/// Serialized as its keypad symbol, so token streams stay human-readable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Token {
    Digit(Digit),
    Point,
    Binary(BinaryOp),
    Equals,
    Clear,
    Delete,
    Negate,
    Percent,
    Special(UnaryOp),
}

impl Token {
    /// Digit token; values above 9 are rejected.
    pub fn digit(value: u8) -> Result<Self, TokenError> {
        Digit::new(value).map(Token::Digit)
    }

    /// The full keypad vocabulary, in a stable order.
    pub fn vocabulary() -> Vec<Token> {
        let mut all: Vec<Token> = (0..=9).map(|d| Token::Digit(Digit(d))).collect();
        all.push(Token::Point);
        all.extend(BinaryOp::ALL.into_iter().map(Token::Binary));
        all.extend([
            Token::Equals,
            Token::Clear,
            Token::Delete,
            Token::Negate,
            Token::Percent,
        ]);
        all.extend(UnaryOp::ALL.into_iter().map(Token::Special));
        all
    }

    /// Parse a whitespace-separated token script, e.g. `"1 2 + 3 ="`.
    pub fn parse_script(script: &str) -> Result<Vec<Token>, TokenError> {
        script.split_whitespace().map(str::parse).collect()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Digit(d) => write!(f, "{}", d),
            Token::Point => f.write_str("."),
            Token::Binary(op) => f.write_str(op.symbol()),
            Token::Equals => f.write_str("="),
            Token::Clear => f.write_str("C"),
            Token::Delete => f.write_str("DEL"),
            Token::Negate => f.write_str("±"),
            Token::Percent => f.write_str("%"),
            Token::Special(op) => f.write_str(op.symbol()),
        }
    }
}

impl FromStr for Token {
    type Err = TokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = match s {
            "." => Token::Point,
            "=" => Token::Equals,
            "C" => Token::Clear,
            "DEL" => Token::Delete,
            "±" => Token::Negate,
            "%" => Token::Percent,
            _ => {
                if let [b @ b'0'..=b'9'] = s.as_bytes() {
                    return Ok(Token::Digit(Digit(b - b'0')));
                }
                if let Some(op) = BinaryOp::from_symbol(s) {
                    return Ok(Token::Binary(op));
                }
                if let Some(op) = UnaryOp::from_symbol(s) {
                    return Ok(Token::Special(op));
                }
                return Err(TokenError::Unknown(s.to_string()));
            }
        };
        Ok(token)
    }
}

impl TryFrom<String> for Token {
    type Error = TokenError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Token> for String {
    fn from(token: Token) -> Self {
        token.to_string()
    }
}
