//! Hand-written protobuf types for the token tape.
//!
//! Uses prost derive macros for encode/decode without prost-build.
//!
//! ```proto
//! message TokenRecord {
//!   uint64 sequence = 1;
//!   string symbol = 2;
//! }
//! ```

use prost::Message;

/// One recorded key press. `symbol` is the canonical keypad symbol.
#[derive(Clone, PartialEq, Message)]
pub struct ProtoTokenRecord {
    #[prost(uint64, tag = "1")]
    pub sequence: u64,
    #[prost(string, tag = "2")]
    pub symbol: String,
}

impl ProtoTokenRecord {
    pub fn new(sequence: u64, symbol: impl Into<String>) -> Self {
        Self {
            sequence,
            symbol: symbol.into(),
        }
    }
}
