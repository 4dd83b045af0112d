/// Calculator Kernel: Canonical Hashing
///
/// Deterministic canonical serialization + SHA-256 hashing.
///
/// Rules:
///   - Field order fixed: engine_version, display, pending_operand,
///     pending_operator, waiting_for_operand, history
///   - Operator written as its keypad symbol, null when absent
///   - History newest first
///   - UTF-8 JSON, no whitespace

use serde_json::{Map, Value};
use sha2::{Digest, Sha256};

use crate::domain::CalcState;
use crate::ENGINE_VERSION;

/// Canonical serialization of CalcState to UTF-8 JSON bytes.
pub fn canonical_serialize(state: &CalcState) -> Vec<u8> {
    build_canonical_value(state).to_string().into_bytes()
}

/// SHA-256 of canonical serialization. Lowercase hex string.
pub fn canonical_hash(state: &CalcState) -> String {
    let digest = Sha256::digest(canonical_serialize(state));
    digest.iter().map(|b| format!("{:02x}", b)).collect()
}

fn build_canonical_value(state: &CalcState) -> Value {
    let mut root = Map::new();
    // engine_version MUST be first: it is part of the state identity.
    root.insert(
        "engine_version".to_string(),
        Value::Number(u64::from(ENGINE_VERSION).into()),
    );
    root.insert("display".to_string(), Value::String(state.display.clone()));
    root.insert(
        "pending_operand".to_string(),
        state
            .pending_operand
            .as_ref()
            .map_or(Value::Null, |s| Value::String(s.clone())),
    );
    root.insert(
        "pending_operator".to_string(),
        state
            .pending_operator
            .map_or(Value::Null, |op| Value::String(op.symbol().to_string())),
    );
    root.insert(
        "waiting_for_operand".to_string(),
        Value::Bool(state.waiting_for_operand),
    );
    root.insert(
        "history".to_string(),
        Value::Array(state.history.iter().map(|e| Value::String(e.to_string())).collect()),
    );
    Value::Object(root)
}
