/// Calculator Kernel: Engine
///
/// Top-level orchestrator. Owns the single state value, delegates
/// mutation to transitions, validates via invariants.
///
/// A transition that breaks an invariant is refused: the previous
/// state is kept and the result is flagged, nothing panics.

use crate::domain::{CalcState, TransitionResult};
use crate::invariants::try_validate_invariants;
use crate::state::create_initial_state;
use crate::tokens::{Token, TokenError};
use crate::transitions::apply_token as transition_apply;
use crate::view::{project, CalcView};

/// Stateful engine wrapping the pure functional transition layer.
#[derive(Debug, Clone)]
pub struct Calculator {
    state: CalcState,
    tokens_applied: u64,
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new()
    }
}

impl Calculator {
    /// Engine in the initial state.
    pub fn new() -> Self {
        Self {
            state: create_initial_state(),
            tokens_applied: 0,
        }
    }

    pub fn state(&self) -> &CalcState {
        &self.state
    }

    /// Renderable projection of the current state.
    pub fn view(&self) -> CalcView {
        project(&self.state)
    }

    /// Tokens committed since construction or the last `replay`.
    pub fn tokens_applied(&self) -> u64 {
        self.tokens_applied
    }

    /// Apply one token:
    ///   1. Delegate to transitions::apply_token
    ///   2. Validate invariants on the new state
    ///   3. Commit, or keep the old state on violation
    pub fn apply_token(&mut self, token: Token) -> TransitionResult {
        let (new_state, mut result) = transition_apply(&self.state, token);

        if let Err(violation) = try_validate_invariants(&new_state) {
            tracing::error!(token = %token, %violation, "transition refused");
            result.accepted = false;
            result.evaluated = false;
            result.chained = false;
            result.history_entry = None;
            result.reason = violation.to_string();
            return result;
        }

        if !result.accepted {
            tracing::debug!(token = %token, reason = %result.reason, "token ignored");
        }
        tracing::trace!(
            token = %token,
            display = %new_state.display,
            waiting = new_state.waiting_for_operand,
            "transition"
        );

        self.state = new_state;
        self.tokens_applied += 1;
        result
    }

    /// Apply a token given by its keypad symbol.
    pub fn press(&mut self, symbol: &str) -> Result<TransitionResult, TokenError> {
        let token: Token = symbol.parse()?;
        Ok(self.apply_token(token))
    }

    /// Apply an ordered sequence of tokens.
    pub fn apply_sequence(&mut self, tokens: &[Token]) -> &CalcState {
        for &token in tokens {
            self.apply_token(token);
        }
        &self.state
    }

    /// Reset to the initial state (history included) and replay.
    pub fn replay(&mut self, tokens: &[Token]) -> &CalcState {
        self.clear_all();
        self.apply_sequence(tokens)
    }

    /// Back to session start: initial state and empty history.
    pub fn clear_all(&mut self) {
        self.state = create_initial_state();
        self.tokens_applied = 0;
    }
}
