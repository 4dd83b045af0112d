//! Runtime error type.

use std::io;
use std::path::PathBuf;

use calc_engine::tokens::TokenError;

#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error("tape sequence violation: expected {expected}, got {got}")]
    SequenceViolation { expected: u64, got: u64 },

    #[error("corrupt tape at frame {frame}: {reason}")]
    CorruptTape { frame: usize, reason: String },

    #[error("protobuf decode error at frame {frame}: {source}")]
    Decode {
        frame: usize,
        #[source]
        source: prost::DecodeError,
    },

    #[error("invalid config {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("replay is not deterministic: {first} != {second}")]
    NonDeterministic { first: String, second: String },
}

pub type Result<T> = std::result::Result<T, RuntimeError>;
