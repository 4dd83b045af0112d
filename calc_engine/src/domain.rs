/// Calculator Kernel: Core Domain Types
///
/// Pure data. No behaviour, no transition logic.

use serde::{Deserialize, Serialize};

use crate::history::HistoryLog;
use crate::tokens::BinaryOp;

/// Complete calculator state. Transitions replace it as a whole.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CalcState {
    /// Text on the display; doubles as the next operand.
    pub display: String,
    /// First operand, captured when a binary operator is first chosen.
    pub pending_operand: Option<String>,
    pub pending_operator: Option<BinaryOp>,
    /// Next numeral starts a fresh number instead of extending the display.
    pub waiting_for_operand: bool,
    pub history: HistoryLog,
}

impl Default for CalcState {
    fn default() -> Self {
        Self {
            display: "0".to_string(),
            pending_operand: None,
            pending_operator: None,
            waiting_for_operand: false,
            history: HistoryLog::new(),
        }
    }
}

/// Structured, immutable outcome of a single transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TransitionResult {
    /// Symbol of the token that was applied.
    pub token: String,
    /// False when the token was ignored and the state left as it was.
    pub accepted: bool,
    /// An operator was evaluated.
    pub evaluated: bool,
    /// A pending operation was folded by a following operator.
    pub chained: bool,
    /// Entry pushed to the history log, if any.
    pub history_entry: Option<String>,
    pub reason: String,
}

impl Default for TransitionResult {
    fn default() -> Self {
        Self {
            token: String::new(),
            accepted: true,
            evaluated: false,
            chained: false,
            history_entry: None,
            reason: String::new(),
        }
    }
}
