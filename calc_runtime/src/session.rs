//! Session: one calculator, its optional tape, and its keyboard.
//!
//! Record-before-commit order when a tape is attached:
//!   1. apply the token to a copy of the calculator
//!   2. tape.append(token)
//!   3. commit the copy, only if step 2 succeeded
//!
//! Keyboard input is a scoped registration: `attach_keyboard` hands out
//! a `KeyboardListener` guard, and dropping the guard detaches it on
//! every exit path. Concurrency: `SharedSession` serializes access with
//! a Mutex, so observers only ever see between-token states.

use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};

use calc_engine::domain::{CalcState, TransitionResult};
use calc_engine::engine::Calculator;
use calc_engine::hashing::canonical_hash;
use calc_engine::tokens::Token;
use calc_engine::view::CalcView;

use crate::error::Result;
use crate::keyboard::{map_key, Key};
use crate::tape::Tape;

/// A calculator session owning the single state value.
#[derive(Debug, Default)]
pub struct Session {
    calculator: Calculator,
    tape: Option<Tape>,
    keyboard_attached: bool,
}

impl Session {
    /// Session without recording.
    pub fn new() -> Self {
        Self::default()
    }

    /// Session that records every applied token to a fresh tape at `path`.
    pub fn recording(path: &Path) -> Result<Self> {
        let tape = Tape::create(path)?;
        tracing::info!(tape = %path.display(), "recording session");
        Ok(Self {
            tape: Some(tape),
            ..Self::default()
        })
    }

    /// Apply one token and record it. When recording fails the session
    /// stays where it was, so the tape always replays to the live state.
    pub fn apply(&mut self, token: Token) -> Result<TransitionResult> {
        let Some(tape) = self.tape.as_mut() else {
            return Ok(self.calculator.apply_token(token));
        };

        let mut next = self.calculator.clone();
        let result = next.apply_token(token);
        tape.append(token)?;
        self.calculator = next;
        Ok(result)
    }

    /// Apply a token given by its keypad symbol. Unknown symbols are
    /// reported and leave the session untouched.
    pub fn press(&mut self, symbol: &str) -> Result<TransitionResult> {
        let token = symbol.parse::<Token>().map_err(|e| {
            tracing::warn!(symbol, "unknown keypad symbol");
            e
        })?;
        self.apply(token)
    }

    /// Register the keyboard for the lifetime of the returned guard.
    pub fn attach_keyboard(&mut self) -> KeyboardListener<'_> {
        self.keyboard_attached = true;
        tracing::debug!("keyboard attached");
        KeyboardListener { session: self }
    }

    pub fn keyboard_attached(&self) -> bool {
        self.keyboard_attached
    }

    pub fn view(&self) -> CalcView {
        self.calculator.view()
    }

    pub fn state(&self) -> &CalcState {
        self.calculator.state()
    }

    pub fn current_hash(&self) -> String {
        canonical_hash(self.calculator.state())
    }

    pub fn tokens_applied(&self) -> u64 {
        self.calculator.tokens_applied()
    }

    /// The recording tape, if any.
    pub fn tape(&self) -> Option<&Tape> {
        self.tape.as_ref()
    }
}

/// Keyboard registration guard. Routes key events into the session
/// until dropped.
#[derive(Debug)]
pub struct KeyboardListener<'a> {
    session: &'a mut Session,
}

impl KeyboardListener<'_> {
    /// Route one key event. `Ok(None)` for keys with no keypad meaning.
    pub fn key(&mut self, key: Key) -> Result<Option<TransitionResult>> {
        match map_key(key) {
            Some(token) => self.session.apply(token).map(Some),
            None => {
                tracing::trace!(?key, "unmapped key");
                Ok(None)
            }
        }
    }

    pub fn session(&self) -> &Session {
        self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        self.session
    }
}

impl Drop for KeyboardListener<'_> {
    fn drop(&mut self) {
        self.session.keyboard_attached = false;
        tracing::debug!("keyboard detached");
    }
}

/// Thread-safe session handle using Mutex.
#[derive(Debug)]
pub struct SharedSession {
    inner: Mutex<Session>,
}

impl SharedSession {
    pub fn new(session: Session) -> Self {
        Self {
            inner: Mutex::new(session),
        }
    }

    // The calculator commits whole states, so a poisoned lock still
    // guards a consistent session.
    fn lock(&self) -> MutexGuard<'_, Session> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Apply a token under lock.
    pub fn apply(&self, token: Token) -> Result<TransitionResult> {
        self.lock().apply(token)
    }

    pub fn press(&self, symbol: &str) -> Result<TransitionResult> {
        self.lock().press(symbol)
    }

    /// Snapshot of the view between transitions.
    pub fn view(&self) -> CalcView {
        self.lock().view()
    }

    pub fn current_hash(&self) -> String {
        self.lock().current_hash()
    }

    pub fn into_inner(self) -> Session {
        self.inner.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}
