//! Replay orchestrator: rebuild state from a token stream.
//!
//! Delegates all calculator logic to the kernel.
//! No shortcuts, no cached state.

use std::path::Path;

use calc_engine::domain::CalcState;
use calc_engine::engine::Calculator;
use calc_engine::hashing::canonical_hash;
use calc_engine::tokens::Token;
use calc_engine::view::CalcView;

use crate::error::{Result, RuntimeError};
use crate::tape::read_tape;

/// Rebuild the calculator state from a sequence of tokens.
///
/// 1. Create a fresh engine
/// 2. Pass each token sequentially to the kernel
/// 3. Return (final_state, canonical_hash)
pub fn rebuild_state(tokens: &[Token]) -> (CalcState, String) {
    let mut calc = Calculator::new();
    let state = calc.apply_sequence(tokens).clone();
    let hash = canonical_hash(&state);
    (state, hash)
}

/// Rebuild state and return only the canonical hash.
pub fn rebuild_hash(tokens: &[Token]) -> String {
    rebuild_state(tokens).1
}

/// Rebuild state and project it for rendering.
pub fn rebuild_view(tokens: &[Token]) -> CalcView {
    let mut calc = Calculator::new();
    calc.apply_sequence(tokens);
    calc.view()
}

/// Replay twice on independent engines and compare hashes.
/// Returns the agreed hash.
pub fn verify_determinism(tokens: &[Token]) -> Result<String> {
    let first = rebuild_hash(tokens);
    let second = rebuild_hash(tokens);
    if first != second {
        tracing::error!(%first, %second, "replay diverged");
        return Err(RuntimeError::NonDeterministic { first, second });
    }
    Ok(first)
}

/// Read a tape and rebuild its final state.
pub fn replay_tape(path: &Path) -> Result<(CalcState, String)> {
    let tokens = read_tape(path)?;
    tracing::debug!(path = %path.display(), tokens = tokens.len(), "replaying tape");
    Ok(rebuild_state(&tokens))
}
