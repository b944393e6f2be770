//! Delete confirmation overlay for decks and cards.

use crossterm::event::{KeyCode, KeyEvent};
use flashify_core::api::{Card, Deck};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::{OverlayUpdate, render_utils};
use crate::effects::UiEffect;
use crate::text::truncate_with_ellipsis;

/// What is being deleted.
#[derive(Debug)]
pub enum DeleteTarget {
    Deck(Deck),
    Card(Card),
}

/// State for the delete confirmation overlay.
#[derive(Debug)]
pub struct ConfirmDeleteState {
    pub target: DeleteTarget,
    pub error: Option<String>,
    pub busy: bool,
}

impl ConfirmDeleteState {
    pub fn deck(deck: Deck) -> Self {
        Self {
            target: DeleteTarget::Deck(deck),
            error: None,
            busy: false,
        }
    }

    pub fn card(card: Card) -> Self {
        Self {
            target: DeleteTarget::Card(card),
            error: None,
            busy: false,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent, token: &str) -> OverlayUpdate {
        match key.code {
            KeyCode::Esc | KeyCode::Char('n') => OverlayUpdate::close(),
            KeyCode::Enter | KeyCode::Char('y') if !self.busy => {
                self.busy = true;
                self.error = None;
                let effect = match &self.target {
                    DeleteTarget::Deck(deck) => UiEffect::DeleteDeck {
                        token: token.to_string(),
                        deck_id: deck.id.clone(),
                    },
                    DeleteTarget::Card(card) => UiEffect::DeleteCard {
                        token: token.to_string(),
                        card_id: card.id.clone(),
                        deck_id: card.deck_id.clone(),
                    },
                };
                OverlayUpdate::stay().with_effects(vec![effect])
            }
            _ => OverlayUpdate::stay(),
        }
    }

    /// Applies a failed delete; success closes the overlay from the reducer.
    pub fn on_delete_failed(&mut self, message: String) {
        self.busy = false;
        self.error = Some(message);
    }

    fn label(&self) -> String {
        match &self.target {
            DeleteTarget::Deck(deck) => {
                format!("Delete deck \"{}\" and its cards?", deck.name)
            }
            DeleteTarget::Card(card) => {
                format!(
                    "Delete card \"{}\"?",
                    truncate_with_ellipsis(&card.question, 30)
                )
            }
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, spinner: &str) {
        let hints = [
            render_utils::InputHint::new("y", "delete"),
            render_utils::InputHint::new("n", "cancel"),
        ];
        let layout = render_utils::render_overlay(
            frame,
            area,
            &render_utils::OverlayConfig {
                title: "Confirm Delete",
                border_color: Color::Red,
                width: 50,
                height: 7,
                hints: &hints,
            },
        );

        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                self.label(),
                Style::default().fg(Color::White),
            ))),
            Rect::new(layout.body.x, layout.body.y, layout.body.width, 1),
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
    fn test_confirm_deck_emits_delete() {
        let mut overlay = ConfirmDeleteState::deck(Deck {
            id: "7".to_string(),
            name: "Old".to_string(),
        });
        let update = overlay.handle_key(press(KeyCode::Char('y')), "tok");
        assert_eq!(
            update.effects,
            vec![UiEffect::DeleteDeck {
                token: "tok".to_string(),
                deck_id: "7".to_string()
            }]
        );
        assert!(overlay.busy);
    }

    #[test]
    fn test_cancel_closes_without_effects() {
        let mut overlay = ConfirmDeleteState::card(Card {
            id: "41".to_string(),
            deck_id: "9".to_string(),
            question: "q".to_string(),
            answer: "a".to_string(),
        });
        let update = overlay.handle_key(press(KeyCode::Char('n')), "tok");
        assert!(matches!(update.transition, OverlayTransition::Close));
        assert!(update.effects.is_empty());
    }
}
