/// Calculator Kernel: Invariant Checks
///
/// Non-panicking validation run by the engine after every transition.
/// Error displays are exempt from the numeric checks.

use thiserror::Error;

use crate::domain::CalcState;
use crate::format::is_error_display;
use crate::{HISTORY_CAPACITY, MAX_DISPLAY_LENGTH};

/// First invariant a state fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("[INVARIANT:display_empty] display is empty")]
    EmptyDisplay,
    #[error("[INVARIANT:display_length] display {display:?} exceeds {max} characters")]
    DisplayTooLong { display: String, max: usize },
    #[error("[INVARIANT:decimal_points] display {0:?} has more than one decimal point")]
    MultipleDecimalPoints(String),
    #[error("[INVARIANT:history_capacity] history holds {len} entries, capacity is {max}")]
    HistoryOverflow { len: usize, max: usize },
    #[error("[INVARIANT:orphan_operator] operator pending without an operand")]
    OperatorWithoutOperand,
}

/// Run all checks. Returns the first failure.
pub fn try_validate_invariants(state: &CalcState) -> Result<(), InvariantViolation> {
    check_display(&state.display)?;
    check_history(state)?;
    check_pending(state)?;
    Ok(())
}

fn check_display(display: &str) -> Result<(), InvariantViolation> {
    if display.is_empty() {
        return Err(InvariantViolation::EmptyDisplay);
    }
    if is_error_display(display) {
        return Ok(());
    }
    if display.len() > MAX_DISPLAY_LENGTH {
        return Err(InvariantViolation::DisplayTooLong {
            display: display.to_string(),
            max: MAX_DISPLAY_LENGTH,
        });
    }
    if display.matches('.').count() > 1 {
        return Err(InvariantViolation::MultipleDecimalPoints(display.to_string()));
    }
    Ok(())
}

fn check_history(state: &CalcState) -> Result<(), InvariantViolation> {
    if state.history.len() > HISTORY_CAPACITY {
        return Err(InvariantViolation::HistoryOverflow {
            len: state.history.len(),
            max: HISTORY_CAPACITY,
        });
    }
    Ok(())
}

fn check_pending(state: &CalcState) -> Result<(), InvariantViolation> {
    if state.pending_operator.is_some() && state.pending_operand.is_none() {
        return Err(InvariantViolation::OperatorWithoutOperand);
    }
    Ok(())
}
