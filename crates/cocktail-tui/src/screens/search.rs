//! Search screen: query input, results list and detail pane.
//!
//! The screen is the [`Presenter`] for a [`SearchFlow`]: the flow decides
//! what the list and detail show, the screen only draws it. Fetches run on
//! a background task; their outcome comes back as
//! [`Action::SearchCompleted`] and is discarded if a newer search started.

use std::cell::Cell;
use std::sync::Arc;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Position, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, List, ListItem, ListState, Paragraph, Wrap};
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tracing::debug;

use cocktail_core::{
    CocktailService, CocktailSource, FlowState, INVALID_QUERY_MESSAGE, NO_RESULTS_MESSAGE,
    Presenter, SearchFlow, SearchTicket,
};

use crate::action::{Action, Focus};
use crate::component::Component;
use crate::theme;

/// What the window currently shows. Written only by the flow.
#[derive(Debug, Default)]
pub struct ResultsPane {
    items: Vec<String>,
    detail: String,
}

impl ResultsPane {
    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn detail(&self) -> &str {
        &self.detail
    }
}

impl Presenter for ResultsPane {
    fn render_results(&mut self, labels: &[String]) {
        self.items = labels.to_vec();
    }

    fn render_detail(&mut self, text: &str) {
        text.clone_into(&mut self.detail);
    }
}

/// Longest input we bother keeping; anything past one letter is invalid
/// anyway, this only bounds what gets echoed back.
const MAX_INPUT_LEN: usize = 32;

pub struct SearchScreen {
    action_tx: Option<UnboundedSender<Action>>,
    service: Option<CocktailService>,
    flow: SearchFlow<ResultsPane>,
    input: String,
    focus: Focus,
    in_flight: Option<JoinHandle<()>>,
    throbber_state: throbber_widgets_tui::ThrobberState,
    // Last rendered list geometry, for mouse hit-testing
    list_inner: Cell<Rect>,
    list_offset: Cell<usize>,
}

impl SearchScreen {
    /// `service` is `None` only in tests, where outcomes are injected as
    /// actions instead of fetched.
    pub fn new(service: Option<CocktailService>) -> Self {
        Self {
            action_tx: None,
            service,
            flow: SearchFlow::new(ResultsPane::default()),
            input: String::new(),
            focus: Focus::Input,
            in_flight: None,
            throbber_state: throbber_widgets_tui::ThrobberState::default(),
            list_inner: Cell::new(Rect::default()),
            list_offset: Cell::new(0),
        }
    }

    pub fn flow(&self) -> &SearchFlow<ResultsPane> {
        &self.flow
    }

    // ── Search ───────────────────────────────────────────────────────

    fn submit(&mut self) {
        if let Some(previous) = self.in_flight.take() {
            previous.abort();
        }

        let Some(ticket) = self.flow.submit(&self.input) else {
            return;
        };
        self.spawn_fetch(ticket);
    }

    fn spawn_fetch(&mut self, ticket: SearchTicket) {
        let (Some(service), Some(tx)) = (self.service.clone(), self.action_tx.clone()) else {
            return;
        };

        debug!(query = %ticket.query(), "spawning fetch");
        self.in_flight = Some(tokio::spawn(async move {
            let outcome = service.fetch(ticket.query()).await;
            let _ = tx.send(Action::SearchCompleted {
                ticket,
                outcome: Arc::new(outcome),
            });
        }));
    }

    // ── Selection ────────────────────────────────────────────────────

    fn move_selection(&self, delta: isize) -> Option<Action> {
        let len = self.flow.results().len();
        if len == 0 {
            return None;
        }
        let next = self
            .flow
            .selected()
            .map_or(0, |current| current.saturating_add_signed(delta).min(len - 1));
        Some(Action::SelectResult(next))
    }

    fn select_edge(&self, last: bool) -> Option<Action> {
        let len = self.flow.results().len();
        (len > 0).then(|| Action::SelectResult(if last { len - 1 } else { 0 }))
    }

    fn row_at(&self, column: u16, row: u16) -> Option<usize> {
        let inner = self.list_inner.get();
        if !inner.contains(Position::new(column, row)) {
            return None;
        }
        let index = self.list_offset.get() + usize::from(row - inner.y);
        (index < self.flow.results().len()).then_some(index)
    }

    // ── Rendering ────────────────────────────────────────────────────

    fn panel(title: &str, focused: bool) -> Block<'static> {
        Block::default()
            .title(format!(" {title} "))
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(if focused {
                theme::border_focused()
            } else {
                theme::border_default()
            })
    }

    fn render_input(&self, frame: &mut Frame, area: Rect) {
        let focused = self.focus == Focus::Input;
        let block = Self::panel("Enter a letter", focused);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let cursor = if focused { "\u{2588}" } else { "" };
        let line = Line::from(vec![
            Span::styled(self.input.clone(), theme::input_text()),
            Span::styled(cursor, theme::input_text()),
            Span::raw("   "),
            Span::styled("Enter", theme::key_hint_key()),
            Span::styled(" search", theme::key_hint()),
        ]);
        frame.render_widget(Paragraph::new(line), inner);
    }

    fn render_results(&self, frame: &mut Frame, area: Rect) {
        let focused = self.focus == Focus::Results;
        let block = Self::panel("Results", focused);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        self.list_inner.set(inner);

        if self.flow.state() == FlowState::Searching {
            let throbber = throbber_widgets_tui::Throbber::default()
                .label(" Searching...")
                .style(Style::default().fg(theme::CURACAO))
                .throbber_style(Style::default().fg(theme::LIME));
            frame.render_stateful_widget(throbber, inner, &mut self.throbber_state.clone());
            return;
        }

        let items: Vec<ListItem> = self
            .flow
            .presenter()
            .items()
            .iter()
            .map(|label| {
                let style = match label.as_str() {
                    INVALID_QUERY_MESSAGE => theme::warning(),
                    NO_RESULTS_MESSAGE => theme::muted(),
                    _ => theme::body(),
                };
                ListItem::new(Span::styled(label.clone(), style))
            })
            .collect();

        let list = List::new(items)
            .highlight_style(theme::selected())
            .highlight_symbol("\u{25B8} ");

        let mut state = ListState::default().with_selected(self.flow.selected());
        *state.offset_mut() = self.list_offset.get();
        frame.render_stateful_widget(list, inner, &mut state);
        self.list_offset.set(state.offset());
    }

    fn render_detail(&self, frame: &mut Frame, area: Rect) {
        let block = Self::panel("Details", false);
        let detail = Paragraph::new(self.flow.presenter().detail().to_owned())
            .style(theme::body())
            .wrap(Wrap { trim: false })
            .block(block);
        frame.render_widget(detail, area);
    }
}

impl Component for SearchScreen {
    fn init(&mut self, action_tx: UnboundedSender<Action>) -> Result<()> {
        self.action_tx = Some(action_tx);
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match self.focus {
            Focus::Input => match key.code {
                KeyCode::Enter => Some(Action::SearchSubmit),
                KeyCode::Tab | KeyCode::Down => Some(Action::SetFocus(Focus::Results)),
                KeyCode::Backspace => {
                    self.input.pop();
                    None
                }
                KeyCode::Esc => {
                    self.input.clear();
                    None
                }
                KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    self.input.clear();
                    None
                }
                KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                    if self.input.chars().count() < MAX_INPUT_LEN {
                        self.input.push(c);
                    }
                    None
                }
                _ => None,
            },
            Focus::Results => match key.code {
                KeyCode::Char('j') | KeyCode::Down => Some(Action::ScrollDown),
                KeyCode::Char('k') | KeyCode::Up => Some(Action::ScrollUp),
                KeyCode::Char('g') | KeyCode::Home => Some(Action::ScrollToTop),
                KeyCode::Char('G') | KeyCode::End => Some(Action::ScrollToBottom),
                KeyCode::Enter => self.flow.selected().map(Action::SelectResult),
                KeyCode::Tab | KeyCode::BackTab | KeyCode::Esc | KeyCode::Char('/') => {
                    Some(Action::SetFocus(Focus::Input))
                }
                _ => None,
            },
        };
        Ok(action)
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        let action = match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.row_at(mouse.column, mouse.row).map(Action::SelectResult)
            }
            MouseEventKind::ScrollDown => Some(Action::ScrollDown),
            MouseEventKind::ScrollUp => Some(Action::ScrollUp),
            _ => None,
        };
        Ok(action)
    }

    fn handle_paste(&mut self, text: &str) -> Result<Option<Action>> {
        if self.focus == Focus::Input {
            let room = MAX_INPUT_LEN.saturating_sub(self.input.chars().count());
            self.input
                .extend(text.chars().filter(|c| !c.is_control()).take(room));
        }
        Ok(None)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::SearchSubmit => {
                self.list_offset.set(0);
                self.submit();
            }
            Action::SearchCompleted { ticket, outcome } => {
                if self.flow.complete(*ticket, outcome) {
                    self.in_flight = None;
                    self.list_offset.set(0);
                }
            }
            Action::SetFocus(focus) => self.focus = *focus,
            Action::SelectResult(index) => {
                if self.flow.select(*index).is_some() {
                    self.focus = Focus::Results;
                }
            }
            Action::ScrollDown => return Ok(self.move_selection(1)),
            Action::ScrollUp => return Ok(self.move_selection(-1)),
            Action::ScrollToTop => return Ok(self.select_edge(false)),
            Action::ScrollToBottom => return Ok(self.select_edge(true)),
            Action::Tick => {
                if self.flow.state() == FlowState::Searching {
                    self.throbber_state.calc_next();
                }
            }
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let [input_area, body] =
            Layout::vertical([Constraint::Length(3), Constraint::Min(3)]).areas(area);
        let [list_area, detail_area] =
            Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
                .areas(body);

        self.render_input(frame, input_area);
        self.render_results(frame, list_area);
        self.render_detail(frame, detail_area);
    }

    fn captures_text(&self) -> bool {
        self.focus == Focus::Input
    }

    fn id(&self) -> &'static str {
        "search"
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use crossterm::event::{KeyEventKind, KeyEventState};
    use pretty_assertions::assert_eq;
    use ratatui::{Terminal, backend::TestBackend};
    use serde_json::json;

    use cocktail_core::{CoreError, FetchOutcome, SearchResponse};

    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    /// Feed a key and route any resulting action back, like the app loop.
    fn press(screen: &mut SearchScreen, code: KeyCode) {
        let mut next = screen.handle_key_event(key(code)).unwrap();
        while let Some(action) = next {
            next = screen.update(&action).unwrap();
        }
    }

    fn type_str(screen: &mut SearchScreen, text: &str) {
        for c in text.chars() {
            press(screen, KeyCode::Char(c));
        }
    }

    fn complete(screen: &mut SearchScreen, outcome: FetchOutcome) {
        let ticket = screen.flow().pending().unwrap();
        screen
            .update(&Action::SearchCompleted {
                ticket,
                outcome: Arc::new(outcome),
            })
            .unwrap();
    }

    fn drinks(names: &[&str]) -> FetchOutcome {
        let drinks: Vec<_> = names.iter().map(|n| json!({ "strDrink": n })).collect();
        let resp: SearchResponse = serde_json::from_value(json!({ "drinks": drinks })).unwrap();
        Ok(Some(resp))
    }

    fn screen_text(screen: &SearchScreen) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 16)).unwrap();
        terminal.draw(|f| screen.render(f, f.area())).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(ratatui::buffer::Cell::symbol)
            .collect()
    }

    #[test]
    fn invalid_input_shows_message_without_pending_fetch() {
        let mut screen = SearchScreen::new(None);
        type_str(&mut screen, "ab");
        press(&mut screen, KeyCode::Enter);

        assert_eq!(screen.flow().pending(), None);
        assert_eq!(
            screen.flow().presenter().items(),
            &[INVALID_QUERY_MESSAGE.to_string()]
        );
        assert!(screen_text(&screen).contains(INVALID_QUERY_MESSAGE));
    }

    #[test]
    fn valid_input_completes_into_list() {
        let mut screen = SearchScreen::new(None);
        type_str(&mut screen, "M");
        press(&mut screen, KeyCode::Enter);

        let ticket = screen.flow().pending().unwrap();
        assert_eq!(ticket.query().letter(), 'm');
        assert!(screen_text(&screen).contains("Searching"));

        complete(&mut screen, drinks(&["Margarita", "Mojito"]));

        let text = screen_text(&screen);
        assert!(text.contains("Margarita"));
        assert!(text.contains("Mojito"));
    }

    #[test]
    fn fetch_failure_renders_no_results() {
        let mut screen = SearchScreen::new(None);
        type_str(&mut screen, "z");
        press(&mut screen, KeyCode::Enter);
        complete(&mut screen, Err(CoreError::Timeout));

        assert_eq!(
            screen.flow().presenter().items(),
            &[NO_RESULTS_MESSAGE.to_string()]
        );
    }

    #[test]
    fn arrow_navigation_echoes_selection_into_detail() {
        let mut screen = SearchScreen::new(None);
        type_str(&mut screen, "m");
        press(&mut screen, KeyCode::Enter);
        complete(&mut screen, drinks(&["Margarita", "Mojito", "Mai Tai"]));

        press(&mut screen, KeyCode::Tab);
        press(&mut screen, KeyCode::Down);
        assert_eq!(screen.flow().presenter().detail(), "Margarita");

        press(&mut screen, KeyCode::Char('j'));
        assert_eq!(screen.flow().presenter().detail(), "Mojito");

        press(&mut screen, KeyCode::Char('G'));
        assert_eq!(screen.flow().presenter().detail(), "Mai Tai");

        press(&mut screen, KeyCode::Char('g'));
        assert_eq!(screen.flow().selected(), Some(0));
    }

    #[test]
    fn results_focus_does_not_edit_input() {
        let mut screen = SearchScreen::new(None);
        type_str(&mut screen, "m");
        press(&mut screen, KeyCode::Tab);
        assert!(!screen.captures_text());

        type_str(&mut screen, "xyz");
        press(&mut screen, KeyCode::Char('/'));
        assert!(screen.captures_text());
        assert_eq!(screen.input, "m");
    }

    #[test]
    fn resubmit_clears_detail_and_drops_stale_outcome() {
        let mut screen = SearchScreen::new(None);
        type_str(&mut screen, "m");
        press(&mut screen, KeyCode::Enter);
        let stale = screen.flow().pending().unwrap();
        complete(&mut screen, drinks(&["Margarita"]));
        screen.update(&Action::SelectResult(0)).unwrap();
        assert_eq!(screen.flow().presenter().detail(), "Margarita");

        press(&mut screen, KeyCode::Char('/'));
        press(&mut screen, KeyCode::Backspace);
        type_str(&mut screen, "n");
        press(&mut screen, KeyCode::Enter);
        assert_eq!(screen.flow().presenter().detail(), "");
        assert!(screen.flow().presenter().items().is_empty());

        screen
            .update(&Action::SearchCompleted {
                ticket: stale,
                outcome: Arc::new(drinks(&["Stale"])),
            })
            .unwrap();
        assert!(screen.flow().presenter().items().is_empty());

        complete(&mut screen, drinks(&["Negroni"]));
        assert_eq!(screen.flow().presenter().items(), &["Negroni".to_string()]);
    }

    #[test]
    fn paste_is_bounded_and_strips_control_chars() {
        let mut screen = SearchScreen::new(None);
        screen.handle_paste("a\n").unwrap();
        assert_eq!(screen.input, "a");

        screen.handle_paste(&"x".repeat(100)).unwrap();
        assert_eq!(screen.input.chars().count(), MAX_INPUT_LEN);
    }

    #[test]
    fn click_selects_row_under_cursor() {
        let mut screen = SearchScreen::new(None);
        type_str(&mut screen, "m");
        press(&mut screen, KeyCode::Enter);
        complete(&mut screen, drinks(&["Margarita", "Mojito"]));
        let _ = screen_text(&screen);

        let inner = screen.list_inner.get();
        let click = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: inner.x + 2,
            row: inner.y + 1,
            modifiers: KeyModifiers::NONE,
        };
        let action = screen.handle_mouse_event(click).unwrap();
        assert!(matches!(action, Some(Action::SelectResult(1))));

        let outside = MouseEvent {
            column: 0,
            row: 0,
            ..click
        };
        assert!(screen.handle_mouse_event(outside).unwrap().is_none());
    }
}
