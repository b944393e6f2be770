//! Study session screen.
//!
//! Thin shell over [`StudySession`]: every key dispatches to the state
//! machine through the reducer against the *current* session, so handlers can
//! never observe a stale index or length. Grading keys are only offered (and
//! accepted) while the answer is revealed — the machine itself does not
//! enforce that, this screen does.

use crossterm::event::{KeyCode, KeyEvent};
use flashify_core::api::{Card, Deck};
use flashify_core::study::{SessionPhase, StudySession};
use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use super::ScreenAction;
use crate::effects::UiEffect;

/// Study screen state.
#[derive(Debug)]
pub struct StudyScreen {
    pub deck: Deck,
    pub session: StudySession,
    /// Card fetch failure, shown on the `Empty` screen.
    pub error: Option<String>,
}

impl StudyScreen {
    /// A study screen whose card fetch is in flight (session `Loading`).
    pub fn loading(deck: Deck) -> Self {
        Self {
            deck,
            session: StudySession::new(),
            error: None,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> (Vec<UiEffect>, Option<ScreenAction>) {
        // Terminal phases: the only available action is leaving the session.
        if self.session.is_over() {
            return match key.code {
                KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => {
                    (vec![], Some(ScreenAction::ToDashboard))
                }
                _ => (vec![], None),
            };
        }

        match key.code {
            KeyCode::Esc => return (vec![], Some(ScreenAction::ToDashboard)),
            KeyCode::Char(' ') => self.session.flip(),
            KeyCode::Right => self.session.advance(),
            KeyCode::Left => self.session.retreat(),
            KeyCode::Char('y') if self.session.revealed() => self.session.grade(true),
            KeyCode::Char('n') if self.session.revealed() => self.session.grade(false),
            KeyCode::Char('e') => self.session.end(),
            _ => {}
        }
        (vec![], None)
    }

    /// Applies the card fetch result.
    ///
    /// A failed fetch enters `Empty` (no further transitions) with the error
    /// kept for display.
    pub fn on_cards_loaded(&mut self, result: Result<Vec<Card>, String>) {
        match result {
            Ok(cards) => self.session.load(cards),
            Err(message) => {
                self.error = Some(message);
                self.session.load(Vec::new());
            }
        }
    }

    pub fn hints(&self) -> &'static [(&'static str, &'static str)] {
        match self.session.phase() {
            SessionPhase::Loading => &[("Esc", "back")],
            SessionPhase::Empty | SessionPhase::Ended => &[("Esc", "back to decks")],
            SessionPhase::Active => {
                if self.session.revealed() {
                    &[
                        ("y", "correct"),
                        ("n", "incorrect"),
                        ("Space", "hide"),
                        ("→", "next"),
                        ("←", "previous"),
                        ("e", "end"),
                        ("Esc", "back"),
                    ]
                } else {
                    &[
                        ("Space", "show answer"),
                        ("→", "next"),
                        ("←", "previous"),
                        ("e", "end"),
                        ("Esc", "back"),
                    ]
                }
            }
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, spinner: &str) {
        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled("Study Mode", Style::default().add_modifier(Modifier::BOLD)),
                Span::styled(
                    format!("  {}", self.deck.name),
                    Style::default().fg(Color::DarkGray),
                ),
            ])),
            Rect::new(area.x + 1, area.y, area.width.saturating_sub(2), 1),
        );

        let body = Rect::new(
            area.x + 1,
            area.y + 2,
            area.width.saturating_sub(2),
            area.height.saturating_sub(3),
        );

        match self.session.phase() {
            SessionPhase::Loading => {
                frame.render_widget(
                    Paragraph::new(Line::from(Span::styled(
                        format!("{spinner} Loading..."),
                        Style::default().fg(Color::DarkGray),
                    ))),
                    body,
                );
            }
            SessionPhase::Empty => self.render_empty(frame, body),
            SessionPhase::Active => self.render_card(frame, body),
            SessionPhase::Ended => self.render_summary(frame, body),
        }
    }

    fn render_empty(&self, frame: &mut Frame, body: Rect) {
        let mut lines = vec![Line::from(Span::styled(
            "No cards to study.",
            Style::default().fg(Color::DarkGray),
        ))];
        if let Some(error) = &self.error {
            lines.push(Line::default());
            lines.push(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            )));
        }
        frame.render_widget(
            Paragraph::new(lines).alignment(Alignment::Center),
            centered_band(body, 3),
        );
    }

    fn render_card(&self, frame: &mut Frame, body: Rect) {
        let Some(card) = self.session.current_card() else {
            return;
        };

        let card_width = body.width.min(60);
        let card_height = body.height.min(9);
        let card_area = Rect::new(
            body.x + (body.width.saturating_sub(card_width)) / 2,
            body.y + (body.height.saturating_sub(card_height + 3)) / 2,
            card_width,
            card_height,
        );

        let (title, border_color) = if self.session.revealed() {
            (" Answer ", Color::Green)
        } else {
            (" Question ", Color::Cyan)
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color))
            .title(title);
        let text = if self.session.revealed() {
            card.answer.clone()
        } else {
            card.question.clone()
        };
        frame.render_widget(
            Paragraph::new(text)
                .block(block)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true }),
            card_area,
        );

        // Progress and running tally below the card.
        let footer_y = card_area.y + card_area.height + 1;
        if footer_y < body.y + body.height {
            let progress = format!(
                "Card {} of {}",
                self.session.index() + 1,
                self.session.len()
            );
            frame.render_widget(
                Paragraph::new(Line::from(vec![
                    Span::styled(progress, Style::default().fg(Color::DarkGray)),
                    Span::raw("   "),
                    Span::styled(
                        format!("✓ {}", self.session.correct()),
                        Style::default().fg(Color::Green),
                    ),
                    Span::raw("  "),
                    Span::styled(
                        format!("✗ {}", self.session.incorrect()),
                        Style::default().fg(Color::Red),
                    ),
                ]))
                .alignment(Alignment::Center),
                Rect::new(body.x, footer_y, body.width, 1),
            );
        }
    }

    fn render_summary(&self, frame: &mut Frame, body: Rect) {
        let lines = vec![
            Line::from(Span::styled(
                "Study Session Ended",
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::default(),
            Line::from(Span::styled(
                format!("✓ Correct: {}", self.session.correct()),
                Style::default().fg(Color::Green),
            )),
            Line::from(Span::styled(
                format!("✗ Incorrect: {}", self.session.incorrect()),
                Style::default().fg(Color::Red),
            )),
        ];
        frame.render_widget(
            Paragraph::new(lines).alignment(Alignment::Center),
            centered_band(body, 5),
        );
    }
}

/// A horizontal band of `height` rows, vertically centered in `area`.
fn centered_band(area: Rect, height: u16) -> Rect {
    let height = height.min(area.height);
    Rect::new(
        area.x,
        area.y + (area.height.saturating_sub(height)) / 2,
        area.width,
        height,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_deck() -> Deck {
        Deck {
            id: "9".to_string(),
            name: "Spanish".to_string(),
        }
    }

    fn card(question: &str, answer: &str) -> Card {
        Card {
            id: question.to_string(),
            deck_id: "9".to_string(),
            question: question.to_string(),
            answer: answer.to_string(),
        }
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::from(code)
    }

    fn active_screen() -> StudyScreen {
        let mut screen = StudyScreen::loading(sample_deck());
        screen.on_cards_loaded(Ok(vec![
            card("hola", "hello"),
            card("gracias", "thanks"),
        ]));
        screen
    }

    #[test]
    fn test_space_flips_and_arrows_move() {
        let mut screen = active_screen();
        screen.handle_key(press(KeyCode::Char(' ')));
        assert!(screen.session.revealed());

        screen.handle_key(press(KeyCode::Right));
        assert_eq!(screen.session.index(), 1);
        assert!(!screen.session.revealed());

        screen.handle_key(press(KeyCode::Left));
        assert_eq!(screen.session.index(), 0);
    }

    #[test]
    fn test_grading_keys_require_reveal() {
        let mut screen = active_screen();

        // Hidden answer: grading keys are inert.
        screen.handle_key(press(KeyCode::Char('y')));
        assert_eq!(screen.session.correct(), 0);
        assert_eq!(screen.session.index(), 0);

        screen.handle_key(press(KeyCode::Char(' ')));
        screen.handle_key(press(KeyCode::Char('y')));
        assert_eq!(screen.session.correct(), 1);
        assert_eq!(screen.session.index(), 1);
    }

    #[test]
    fn test_keys_ignored_while_loading() {
        let mut screen = StudyScreen::loading(sample_deck());
        screen.handle_key(press(KeyCode::Char(' ')));
        screen.handle_key(press(KeyCode::Right));
        assert_eq!(screen.session.phase(), SessionPhase::Loading);
    }

    #[test]
    fn test_fetch_failure_enters_empty_with_error() {
        let mut screen = StudyScreen::loading(sample_deck());
        screen.on_cards_loaded(Err("Invalid token".to_string()));
        assert_eq!(screen.session.phase(), SessionPhase::Empty);
        assert_eq!(screen.error.as_deref(), Some("Invalid token"));

        // Only exit remains.
        let (_, action) = screen.handle_key(press(KeyCode::Esc));
        assert!(matches!(action, Some(ScreenAction::ToDashboard)));
    }

    #[test]
    fn test_end_key_shows_summary_and_exit_works() {
        let mut screen = active_screen();
        screen.handle_key(press(KeyCode::Char(' ')));
        screen.handle_key(press(KeyCode::Char('y')));
        screen.handle_key(press(KeyCode::Char('e')));
        assert_eq!(screen.session.phase(), SessionPhase::Ended);
        assert_eq!(screen.session.correct(), 1);

        let (_, action) = screen.handle_key(press(KeyCode::Enter));
        assert!(matches!(action, Some(ScreenAction::ToDashboard)));
    }
}
