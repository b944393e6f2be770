//! Pure view/render functions for the TUI.
//!
//! Functions here take `&AppState` by immutable reference, draw to a ratatui
//! frame, and never mutate state or return effects. Screen-specific drawing
//! lives with each screen; this module owns the frame layout (screen area +
//! one-line hint bar) and overlay stacking.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::screens::Screen;
use crate::state::AppState;

/// Height of the hint bar at the bottom.
const HINT_BAR_HEIGHT: u16 = 1;

/// Renders the entire TUI to the frame.
pub fn render(app: &AppState, frame: &mut Frame) {
    let area = frame.area();
    let spinner = app.tui.spinner();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(HINT_BAR_HEIGHT)])
        .split(area);

    match &app.tui.screen {
        Screen::Login(screen) => screen.render(frame, chunks[0], spinner),
        Screen::Dashboard(screen) => {
            let who = app.tui.auth.user().map(|user| user.email.as_str());
            screen.render(frame, chunks[0], who, spinner);
        }
        Screen::Deck(screen) => screen.render(frame, chunks[0], spinner),
        Screen::Study(screen) => screen.render(frame, chunks[0], spinner),
    }

    render_hint_bar(app, frame, chunks[1]);

    // Overlays draw on top of everything.
    if let Some(overlay) = &app.overlay {
        overlay.render(frame, area, spinner);
    }
}

fn render_hint_bar(app: &AppState, frame: &mut Frame, area: Rect) {
    let hints = match &app.tui.screen {
        Screen::Login(screen) => screen.hints(),
        Screen::Dashboard(screen) => screen.hints(),
        Screen::Deck(screen) => screen.hints(),
        Screen::Study(screen) => screen.hints(),
    };

    let mut spans = Vec::new();
    for (i, (key, action)) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("  ", Style::default()));
        }
        spans.push(Span::styled(*key, Style::default().fg(Color::Cyan)));
        spans.push(Span::styled(
            format!(" {action}"),
            Style::default().fg(Color::DarkGray),
        ));
    }

    frame.render_widget(
        Paragraph::new(Line::from(spans)).alignment(Alignment::Center),
        area,
    );
}
