#![forbid(unsafe_code)]

//! Calculator Runtime
//!
//! Wraps the calculator kernel with sessions, keyboard routing, token
//! tapes, replay, configuration and the interactive loop.
//!
//! No calculator logic lives here. All transitions and invariants are
//! delegated to the kernel.

pub mod config;
pub mod error;
pub mod keyboard;
pub mod logging;
pub mod proto_types;
pub mod render;
pub mod repl;
pub mod replay;
pub mod session;
pub mod tape;

pub use error::{Result, RuntimeError};
pub use session::{KeyboardListener, Session, SharedSession};
