#![forbid(unsafe_code)]

//! Keypad calculator kernel.
//!
//! Pure, deterministic core: tokens in, display and history out.
//! All state changes go through `transitions::apply_token`.

/// Kernel revision. Part of the canonical hash identity.
pub const ENGINE_VERSION: u32 = 1;

/// Longest numeric text the display may hold.
pub const MAX_DISPLAY_LENGTH: usize = 16;

/// Number of completed computations kept in the history log.
pub const HISTORY_CAPACITY: usize = 5;

pub mod number;
pub mod format;
pub mod evaluator;
pub mod tokens;
pub mod history;
pub mod domain;
pub mod state;
pub mod transitions;
pub mod invariants;
pub mod view;
pub mod hashing;
pub mod engine;

pub use domain::{CalcState, TransitionResult};
pub use engine::Calculator;
pub use tokens::{BinaryOp, Digit, Token, TokenError, UnaryOp};
pub use view::CalcView;
