//! New-deck name prompt.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Color;

use super::{OverlayUpdate, render_utils};
use crate::effects::UiEffect;

/// State for the new-deck overlay.
#[derive(Debug)]
pub struct NewDeckState {
    pub name: String,
    pub error: Option<String>,
    pub busy: bool,
}

impl Default for NewDeckState {
    fn default() -> Self {
        Self::new()
    }
}

impl NewDeckState {
    pub fn new() -> Self {
        Self {
            name: String::new(),
            error: None,
            busy: false,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent, token: &str) -> OverlayUpdate {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Esc => OverlayUpdate::close(),
            KeyCode::Enter => {
                let name = self.name.trim();
                if name.is_empty() {
                    self.error = Some("Deck name is required".to_string());
                    OverlayUpdate::stay()
                } else if self.busy {
                    OverlayUpdate::stay()
                } else {
                    self.busy = true;
                    self.error = None;
                    OverlayUpdate::stay().with_effects(vec![UiEffect::CreateDeck {
                        token: token.to_string(),
                        name: name.to_string(),
                    }])
                }
            }
            KeyCode::Backspace => {
                self.name.pop();
                self.error = None;
                OverlayUpdate::stay()
            }
            KeyCode::Char(c) if !ctrl && !self.busy => {
                self.name.push(c);
                self.error = None;
                OverlayUpdate::stay()
            }
            _ => OverlayUpdate::stay(),
        }
    }

    /// Applies a failed create; success closes the overlay from the reducer.
    pub fn on_create_failed(&mut self, message: String) {
        self.busy = false;
        self.error = Some(message);
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, spinner: &str) {
        let hints = [
            render_utils::InputHint::new("Enter", "create"),
            render_utils::InputHint::new("Esc", "cancel"),
        ];
        let layout = render_utils::render_overlay(
            frame,
            area,
            &render_utils::OverlayConfig {
                title: "New Deck",
                border_color: Color::Cyan,
                width: 44,
                height: 7,
                hints: &hints,
            },
        );

        render_utils::render_labelled_input(
            frame,
            Rect::new(layout.body.x, layout.body.y, layout.body.width, 1),
            "Name",
            &self.name,
            !self.busy,
        );
        render_utils::render_message_line(
            frame,
            Rect::new(layout.body.x, layout.body.y + 2, layout.body.width, 1),
            self.busy,
            spinner,
            self.error.as_deref(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::super::OverlayTransition;
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::from(code)
    }

    #[test]
    fn test_empty_name_is_rejected_client_side() {
        let mut overlay = NewDeckState::new();
        let update = overlay.handle_key(press(KeyCode::Enter), "tok");
        assert!(matches!(update.transition, OverlayTransition::Stay));
        assert!(update.effects.is_empty());
        assert_eq!(overlay.error.as_deref(), Some("Deck name is required"));
    }

    #[test]
    fn test_submit_emits_create_and_goes_busy() {
        let mut overlay = NewDeckState::new();
        for c in "Spanish".chars() {
            overlay.handle_key(press(KeyCode::Char(c)), "tok");
        }
        let update = overlay.handle_key(press(KeyCode::Enter), "tok");
        assert_eq!(
            update.effects,
            vec![UiEffect::CreateDeck {
                token: "tok".to_string(),
                name: "Spanish".to_string()
            }]
        );
        assert!(overlay.busy);

        // Resubmit while in flight is dropped.
        let update = overlay.handle_key(press(KeyCode::Enter), "tok");
        assert!(update.effects.is_empty());
    }
}
