/// Calculator Kernel: Centralized Transition Logic
///
/// ALL state-mutation logic lives here.
/// `apply_token` is pure: the input state is never mutated, a clone is
/// modified and returned together with a `TransitionResult`.

use crate::domain::{CalcState, TransitionResult};
use crate::evaluator::{apply_binary, apply_special};
use crate::format::format_number;
use crate::history::{binary_entry, special_entry};
use crate::number::parse_float;
use crate::state::cleared_state;
use crate::tokens::{BinaryOp, Token, UnaryOp};
use crate::MAX_DISPLAY_LENGTH;

// ---------------------------------------------------------------------------
// Public dispatcher
// ---------------------------------------------------------------------------

/// Apply `token` to `state` and return `(new_state, result)`.
pub fn apply_token(state: &CalcState, token: Token) -> (CalcState, TransitionResult) {
    let mut new_state = state.clone();

    let mut result = match token {
        Token::Digit(d) => apply_numeral(&mut new_state, d.as_char()),
        Token::Point => apply_numeral(&mut new_state, '.'),
        Token::Clear => apply_clear(&mut new_state),
        Token::Delete => apply_delete(&mut new_state),
        Token::Negate => apply_negate(&mut new_state),
        Token::Percent => apply_percent(&mut new_state),
        Token::Binary(op) => apply_operator(&mut new_state, op),
        Token::Equals => apply_equals(&mut new_state),
        Token::Special(op) => apply_special_fn(&mut new_state, op),
    };
    result.token = token.to_string();

    (new_state, result)
}

// ---------------------------------------------------------------------------
// Individual transition handlers (private)
// ---------------------------------------------------------------------------

fn apply_numeral(state: &mut CalcState, numeral: char) -> TransitionResult {
    if state.waiting_for_operand {
        state.display = if numeral == '.' {
            "0.".to_string()
        } else {
            numeral.to_string()
        };
        state.waiting_for_operand = false;
        return TransitionResult::default();
    }

    if state.display == "0" && numeral != '.' {
        state.display = numeral.to_string();
        return TransitionResult::default();
    }

    if numeral == '.' && state.display.contains('.') {
        return ignored("display already has a decimal point".to_string());
    }

    if state.display.len() >= MAX_DISPLAY_LENGTH {
        return ignored(format!(
            "display is full ({} characters)",
            MAX_DISPLAY_LENGTH
        ));
    }

    state.display.push(numeral);
    TransitionResult::default()
}

fn apply_clear(state: &mut CalcState) -> TransitionResult {
    let history = std::mem::take(&mut state.history);
    *state = cleared_state(history);
    TransitionResult::default()
}

fn apply_delete(state: &mut CalcState) -> TransitionResult {
    let len = state.display.chars().count();
    if len == 1 || (len == 2 && state.display.starts_with('-')) {
        state.display = "0".to_string();
    } else {
        state.display.pop();
    }
    TransitionResult::default()
}

fn apply_negate(state: &mut CalcState) -> TransitionResult {
    state.display = format_number(-parse_float(&state.display));
    TransitionResult::default()
}

/// Divides by ten, not a hundred.
fn apply_percent(state: &mut CalcState) -> TransitionResult {
    state.display = format_number(parse_float(&state.display) / 10.0);
    TransitionResult::default()
}

fn apply_operator(state: &mut CalcState, op: BinaryOp) -> TransitionResult {
    let mut result = TransitionResult::default();

    if state.pending_operand.is_none() {
        state.pending_operand = Some(state.display.clone());
    } else if let (Some(operand), Some(pending)) =
        (state.pending_operand.as_deref(), state.pending_operator)
    {
        let folded = apply_binary(operand, &state.display, pending);
        state.display = folded.clone();
        state.pending_operand = Some(folded);
        result.evaluated = true;
        result.chained = true;
    }

    state.pending_operator = Some(op);
    state.waiting_for_operand = true;
    result
}

fn apply_equals(state: &mut CalcState) -> TransitionResult {
    let (operand, op) = match (state.pending_operand.take(), state.pending_operator.take()) {
        (Some(operand), Some(op)) => (operand, op),
        (operand, op) => {
            state.pending_operand = operand;
            state.pending_operator = op;
            return ignored("no pending operation".to_string());
        }
    };

    let value = apply_binary(&operand, &state.display, op);
    let entry = binary_entry(&operand, op, &state.display, &value);
    state.history.record(entry.clone());
    state.display = value;

    TransitionResult {
        evaluated: true,
        history_entry: Some(entry),
        ..Default::default()
    }
}

fn apply_special_fn(state: &mut CalcState, op: UnaryOp) -> TransitionResult {
    let value = apply_special(op, &state.display);
    let entry = special_entry(op, &state.display, &value);
    state.history.record(entry.clone());
    state.display = value;

    TransitionResult {
        evaluated: true,
        history_entry: Some(entry),
        ..Default::default()
    }
}

fn ignored(reason: String) -> TransitionResult {
    TransitionResult {
        accepted: false,
        reason,
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluator::{ERROR_DIVISION_BY_ZERO, ERROR_NEGATIVE_ROOT};
    use crate::format::ERROR_GENERIC;
    use crate::state::create_initial_state;

    fn run(script: &str) -> CalcState {
        Token::parse_script(script)
            .unwrap()
            .into_iter()
            .fold(create_initial_state(), |state, token| apply_token(&state, token).0)
    }

    fn with_display(display: &str) -> CalcState {
        CalcState {
            display: display.to_string(),
            ..create_initial_state()
        }
    }

    #[test]
    fn test_input_state_is_not_mutated() {
        let state = run("1 2");
        let before = state.clone();
        let _ = apply_token(&state, Token::Clear);
        assert_eq!(state, before);
    }

    #[test]
    fn test_leading_zero_replaced() {
        assert_eq!(run("0 0 7").display, "7");
        assert_eq!(run("0 .").display, "0.");
    }

    #[test]
    fn test_double_point_ignored() {
        assert_eq!(run(". .").display, "0.");
        assert_eq!(run("1 . 5 .").display, "1.5");
        let (_, result) = apply_token(&with_display("1.5"), Token::Point);
        assert!(!result.accepted);
    }

    #[test]
    fn test_append_rejected_when_full() {
        let full = "1234567890123456";
        let (state, result) = apply_token(&with_display(full), Token::digit(7).unwrap());
        assert_eq!(state.display, full);
        assert!(!result.accepted);
    }

    #[test]
    fn test_waiting_starts_fresh_number() {
        let state = run("5 + .");
        assert_eq!(state.display, "0.");
        assert!(!state.waiting_for_operand);
        assert_eq!(run("5 + 3").display, "3");
    }

    #[test]
    fn test_delete() {
        assert_eq!(apply_token(&with_display("-5"), Token::Delete).0.display, "0");
        assert_eq!(apply_token(&with_display("7"), Token::Delete).0.display, "0");
        assert_eq!(apply_token(&with_display("123"), Token::Delete).0.display, "12");
        assert_eq!(apply_token(&with_display("-12"), Token::Delete).0.display, "-1");
    }

    #[test]
    fn test_negate_and_percent() {
        assert_eq!(run("5 ±").display, "-5");
        assert_eq!(run("5 ± ±").display, "5");
        assert_eq!(run("0 ±").display, "0");
        assert_eq!(run("5 0 %").display, "5");
        assert_eq!(run("5 %").display, "0.5");
    }

    #[test]
    fn test_clear_keeps_history() {
        let state = run("7 + 3 = C");
        assert_eq!(state.display, "0");
        assert_eq!(state.pending_operand, None);
        assert_eq!(state.pending_operator, None);
        assert!(!state.waiting_for_operand);
        assert_eq!(state.history.latest(), Some("7 + 3 = 10"));
    }

    #[test]
    fn test_equals() {
        let state = run("7 + 3 =");
        assert_eq!(state.display, "10");
        assert_eq!(state.history.latest(), Some("7 + 3 = 10"));
        assert_eq!(state.pending_operand, None);
        assert_eq!(state.pending_operator, None);
    }

    #[test]
    fn test_equals_without_pending_is_ignored() {
        let (state, result) = apply_token(&with_display("42"), Token::Equals);
        assert_eq!(state.display, "42");
        assert!(!result.accepted);
        assert!(state.history.is_empty());
    }

    #[test]
    fn test_chained_operator_folds() {
        let state = run("1 2 3 + 4 +");
        assert_eq!(state.display, "127");
        assert_eq!(state.pending_operand.as_deref(), Some("127"));
        assert_eq!(state.pending_operator, Some(BinaryOp::Add));
        assert!(state.waiting_for_operand);
        assert!(state.history.is_empty());
    }

    #[test]
    fn test_repeated_operator_applies_display_twice() {
        let state = run("5 + +");
        assert_eq!(state.display, "10");
    }

    #[test]
    fn test_special_functions_record_history() {
        let state = run("9 x²");
        assert_eq!(state.display, "81");
        assert_eq!(state.history.latest(), Some("x²(9) = 81"));

        let state = run("4 ± √");
        assert_eq!(state.display, ERROR_NEGATIVE_ROOT);
        assert_eq!(state.history.latest(), Some("√(-4) = Error: square root of negative number"));
    }

    #[test]
    fn test_special_leaves_pending_untouched() {
        let state = run("2 + 9 √");
        assert_eq!(state.display, "3");
        assert_eq!(state.pending_operand.as_deref(), Some("2"));
        assert_eq!(state.pending_operator, Some(BinaryOp::Add));
        assert_eq!(run("2 + 9 √ =").display, "5");
    }

    #[test]
    fn test_errors_cascade() {
        let state = run("5 ÷ 0 =");
        assert_eq!(state.display, ERROR_DIVISION_BY_ZERO);
        let state = run("5 ÷ 0 = + 1 =");
        assert_eq!(state.display, ERROR_GENERIC);
        let state = run("0 1/x ±");
        assert_eq!(state.display, ERROR_GENERIC);
    }
}
