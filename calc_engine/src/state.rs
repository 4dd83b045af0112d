/// Calculator Kernel: State Construction

use crate::domain::CalcState;
use crate::history::HistoryLog;

/// Fresh session state: display "0", nothing pending, empty history.
pub fn create_initial_state() -> CalcState {
    CalcState::default()
}

/// State after "C": everything reset except the history log.
pub fn cleared_state(history: HistoryLog) -> CalcState {
    CalcState {
        history,
        ..CalcState::default()
    }
}
