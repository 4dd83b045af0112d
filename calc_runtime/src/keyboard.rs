//! Physical key to keypad token mapping.
//!
//! Digits and `.` map directly, `+` and `-` are operators, `*` and `/`
//! become `×` and `÷`. Enter evaluates. Backspace and Escape both clear.
//! Anything else is not a calculator key.

use calc_engine::tokens::{BinaryOp, Token};

/// A key event as delivered by the input source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Enter,
    Backspace,
    Escape,
}

/// `None` for keys the calculator does not handle.
pub fn map_key(key: Key) -> Option<Token> {
    match key {
        Key::Char(c @ '0'..='9') => c
            .to_digit(10)
            .and_then(|d| Token::digit(d as u8).ok()),
        Key::Char('.') => Some(Token::Point),
        Key::Char('+') => Some(Token::Binary(BinaryOp::Add)),
        Key::Char('-') => Some(Token::Binary(BinaryOp::Subtract)),
        Key::Char('*') => Some(Token::Binary(BinaryOp::Multiply)),
        Key::Char('/') => Some(Token::Binary(BinaryOp::Divide)),
        Key::Char(_) => None,
        Key::Enter => Some(Token::Equals),
        Key::Backspace | Key::Escape => Some(Token::Clear),
    }
}
