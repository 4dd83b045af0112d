//! Text and JSON renderers over `CalcView`.

use serde::Serialize;

use calc_engine::view::CalcView;

/// Plain text: pending expression (if any), the display, then history
/// entries indented, newest first.
pub fn render_text(view: &CalcView, show_history: bool) -> String {
    let mut out = String::new();
    if let Some(pending) = &view.pending {
        out.push_str(pending);
        out.push('\n');
    }
    out.push_str(&view.display);
    out.push('\n');
    if show_history {
        for entry in &view.history {
            out.push_str("  ");
            out.push_str(entry);
            out.push('\n');
        }
    }
    out
}

pub fn render_json(view: &CalcView) -> serde_json::Result<String> {
    serde_json::to_string(view)
}

/// Outcome of replaying a tape.
#[derive(Debug, Clone, Serialize)]
pub struct ReplayReport {
    pub tokens: usize,
    pub hash: String,
    pub verified: bool,
    pub view: CalcView,
}

impl ReplayReport {
    pub fn render_text(&self, show_history: bool) -> String {
        let mut out = render_text(&self.view, show_history);
        out.push_str(&format!("tokens: {}\nhash: {}\n", self.tokens, self.hash));
        if self.verified {
            out.push_str("deterministic: yes\n");
        }
        out
    }

    pub fn render_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
