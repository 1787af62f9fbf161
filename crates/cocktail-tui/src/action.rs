//! All possible UI actions. Actions are the sole mechanism for state mutation.

use std::sync::Arc;

use cocktail_core::{FetchOutcome, SearchTicket};

/// Which pane owns the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Input,
    Results,
}

/// Every state transition in the TUI is expressed as an Action.
#[derive(Debug, Clone)]
pub enum Action {
    // ── Lifecycle ──────────────────────────────────────────────────
    Quit,
    Tick,
    Render,
    Resize(u16, u16),

    // ── Focus ─────────────────────────────────────────────────────
    SetFocus(Focus),
    ToggleHelp,

    // ── Search ────────────────────────────────────────────────────
    /// The search button: submit whatever is in the input field.
    SearchSubmit,
    /// A background fetch finished.
    SearchCompleted {
        ticket: SearchTicket,
        outcome: Arc<FetchOutcome>,
    },

    // ── Results list ──────────────────────────────────────────────
    SelectResult(usize),
    ScrollUp,
    ScrollDown,
    ScrollToTop,
    ScrollToBottom,
}
