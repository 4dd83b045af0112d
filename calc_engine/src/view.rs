//! Renderable projection of the calculator state.
//!
//! Renderers receive a `CalcView` and nothing else; they never see the
//! pending fields or the wait flag directly.

use serde::Serialize;

use crate::domain::CalcState;
use crate::format::is_error_display;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalcView {
    pub display: String,
    /// Newest first.
    pub history: Vec<String>,
    /// `"<operand> <op>"` while a binary operation waits for its operand.
    pub pending: Option<String>,
    pub is_error: bool,
}

/// Side-effect-free projection `State -> View`.
pub fn project(state: &CalcState) -> CalcView {
    let pending = match (&state.pending_operand, state.pending_operator) {
        (Some(operand), Some(op)) => Some(format!("{} {}", operand, op.symbol())),
        _ => None,
    };
    CalcView {
        display: state.display.clone(),
        history: state.history.to_vec(),
        pending,
        is_error: is_error_display(&state.display),
    }
}
