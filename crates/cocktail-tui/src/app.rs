//! Application core: the event loop, global keys and action dispatch.

use std::time::Duration;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::action::Action;
use crate::component::Component;
use crate::event::{Event, EventReader};
use crate::theme;
use crate::tui::Tui;

/// Event loop pacing.
#[derive(Debug, Clone, Copy)]
pub struct Pacing {
    pub tick_rate: Duration,
    pub render_rate: Duration,
}

/// Top-level application state and event loop.
pub struct App {
    screen: Box<dyn Component>,
    /// Host shown in the status bar.
    service_label: String,
    pacing: Pacing,
    running: bool,
    help_visible: bool,
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,
}

impl App {
    pub fn new(screen: Box<dyn Component>, service_label: String, pacing: Pacing) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();

        Self {
            screen,
            service_label,
            pacing,
            running: true,
            help_visible: false,
            action_tx,
            action_rx,
        }
    }

    /// Run the main event loop until the user quits.
    pub async fn run(&mut self) -> Result<()> {
        let mut tui = Tui::enter()?;
        let (width, height) = tui.size()?;
        debug!(width, height, "terminal entered");
        self.screen.init(self.action_tx.clone())?;

        let mut events = EventReader::new(self.pacing.tick_rate, self.pacing.render_rate);

        info!("event loop started");

        while self.running {
            let Some(event) = events.next().await else {
                break;
            };

            let action = match event {
                Event::Key(key) => self.handle_key_event(key)?,
                Event::Mouse(mouse) => self.screen.handle_mouse_event(mouse)?,
                Event::Paste(text) => self.screen.handle_paste(&text)?,
                Event::Resize(w, h) => Some(Action::Resize(w, h)),
                Event::Tick => Some(Action::Tick),
                Event::Render => Some(Action::Render),
            };
            if let Some(action) = action {
                self.action_tx.send(action)?;
            }

            // Drain everything queued, including fetch results from
            // background tasks.
            while let Ok(action) = self.action_rx.try_recv() {
                self.process_action(&action)?;

                if let Action::Render = action {
                    tui.draw(|frame| self.render(frame))?;
                }
            }
        }

        events.stop();
        info!("event loop ended");
        Ok(())
    }

    /// Map a key event to an action. Global keys are handled here;
    /// everything else goes to the screen.
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if key.modifiers == KeyModifiers::CONTROL && key.code == KeyCode::Char('c') {
            return Ok(Some(Action::Quit));
        }

        if self.help_visible {
            return match key.code {
                KeyCode::Esc | KeyCode::Char('?') => Ok(Some(Action::ToggleHelp)),
                _ => Ok(None),
            };
        }

        // Printable shortcuts only apply when no text field has focus
        if !self.screen.captures_text() {
            match key.code {
                KeyCode::Char('q') => return Ok(Some(Action::Quit)),
                KeyCode::Char('?') => return Ok(Some(Action::ToggleHelp)),
                _ => {}
            }
        }

        self.screen.handle_key_event(key)
    }

    fn process_action(&mut self, action: &Action) -> Result<()> {
        match action {
            Action::Quit => {
                self.running = false;
            }

            Action::Resize(w, h) => {
                debug!(width = w, height = h, "terminal resized");
            }

            Action::ToggleHelp => {
                self.help_visible = !self.help_visible;
            }

            // Drawn by the main loop
            Action::Render => {}

            other => {
                if let Some(follow_up) = self.screen.update(other)? {
                    self.action_tx.send(follow_up)?;
                }
            }
        }

        Ok(())
    }

    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        let [content_area, status_area] =
            Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(area);

        self.screen.render(frame, content_area);
        self.render_status_bar(frame, status_area);

        if self.help_visible {
            Self::render_help_overlay(frame, area);
        }
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let line = Line::from(vec![
            Span::raw(" "),
            Span::styled(
                format!("\u{25CF} {}", self.service_label),
                Style::default().fg(theme::LIME),
            ),
            Span::styled(" \u{2502} ", theme::key_hint()),
            Span::styled("Tab", theme::key_hint_key()),
            Span::styled(" switch pane  ", theme::key_hint()),
            Span::styled("?", theme::key_hint_key()),
            Span::styled(" help  ", theme::key_hint()),
            Span::styled("Ctrl+C", theme::key_hint_key()),
            Span::styled(" quit", theme::key_hint()),
        ]);

        frame.render_widget(Paragraph::new(line), area);
    }

    fn render_help_overlay(frame: &mut Frame, area: Rect) {
        let help_width = 48u16.min(area.width.saturating_sub(4));
        let help_height = 16u16.min(area.height.saturating_sub(2));
        let x = area.x + area.width.saturating_sub(help_width) / 2;
        let y = area.y + area.height.saturating_sub(help_height) / 2;
        let help_area = Rect::new(x, y, help_width, help_height);

        frame.render_widget(Clear, help_area);

        let block = Block::default()
            .title(" Keyboard Shortcuts ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_focused())
            .style(Style::default().bg(theme::BG_DARK));

        let row = |key: &'static str, what: &'static str| {
            Line::from(vec![
                Span::styled(format!("  {key:<10}"), theme::key_hint_key()),
                Span::styled(what, theme::key_hint()),
            ])
        };
        let heading = |title: &'static str| {
            Line::from(Span::styled(format!("  {title}"), Style::default().fg(theme::CURACAO)))
        };

        let help_text = vec![
            Line::from(""),
            heading("Search"),
            row("a-z", "Type the first letter"),
            row("Enter", "Search"),
            row("Esc", "Clear input"),
            Line::from(""),
            heading("Results"),
            row("j/k \u{2191}/\u{2193}", "Select previous / next"),
            row("g/G", "First / last"),
            row("click", "Select entry"),
            row("/ Tab", "Back to input"),
            Line::from(""),
            row("q Ctrl+C", "Quit"),
        ];

        frame.render_widget(Paragraph::new(help_text).block(block), help_area);
    }
}
