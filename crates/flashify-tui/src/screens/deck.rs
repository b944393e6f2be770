//! Card manager for a single deck.
//!
//! Lists the deck's cards and drives the card CRUD overlays. Like the
//! dashboard, successful mutations re-fetch the card list instead of
//! splicing local state from assumed reply shapes.

use crossterm::event::{KeyCode, KeyEvent};
use flashify_core::api::{Card, Deck};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{List, ListItem, ListState, Paragraph};

use super::{OverlayRequest, ScreenAction};
use crate::effects::UiEffect;
use crate::text::truncate_with_ellipsis;

/// Deck screen state.
#[derive(Debug)]
pub struct DeckScreen {
    pub deck: Deck,
    pub cards: Vec<Card>,
    pub selected: usize,
    pub loading: bool,
    pub error: Option<String>,
}

impl DeckScreen {
    /// A deck screen waiting for its card list.
    pub fn loading(deck: Deck) -> Self {
        Self {
            deck,
            cards: Vec::new(),
            selected: 0,
            loading: true,
            error: None,
        }
    }

    pub fn selected_card(&self) -> Option<&Card> {
        self.cards.get(self.selected)
    }

    pub fn handle_key(
        &mut self,
        key: KeyEvent,
        token: &str,
    ) -> (Vec<UiEffect>, Option<ScreenAction>) {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => return (vec![], Some(ScreenAction::ToDashboard)),
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = self.selected.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.selected + 1 < self.cards.len() {
                    self.selected += 1;
                }
            }
            KeyCode::Char('n') => {
                return (
                    vec![],
                    Some(ScreenAction::OpenOverlay(OverlayRequest::NewCard {
                        deck_id: self.deck.id.clone(),
                    })),
                );
            }
            KeyCode::Char('e') => {
                if let Some(card) = self.selected_card() {
                    return (
                        vec![],
                        Some(ScreenAction::OpenOverlay(OverlayRequest::EditCard {
                            card: card.clone(),
                        })),
                    );
                }
            }
            KeyCode::Char('d') => {
                if let Some(card) = self.selected_card() {
                    return (
                        vec![],
                        Some(ScreenAction::OpenOverlay(OverlayRequest::ConfirmDeleteCard {
                            card: card.clone(),
                        })),
                    );
                }
            }
            KeyCode::Char('s') => {
                return (vec![], Some(ScreenAction::StudyDeck(self.deck.clone())));
            }
            KeyCode::Char('r') => {
                self.loading = true;
                self.error = None;
                return (
                    vec![UiEffect::LoadCards {
                        token: token.to_string(),
                        deck_id: self.deck.id.clone(),
                    }],
                    None,
                );
            }
            _ => {}
        }
        (vec![], None)
    }

    /// Applies a card-list fetch result.
    pub fn on_cards_loaded(&mut self, result: Result<Vec<Card>, String>) {
        self.loading = false;
        match result {
            Ok(cards) => {
                self.cards = cards;
                self.selected = self.selected.min(self.cards.len().saturating_sub(1));
                self.error = None;
            }
            Err(message) => {
                self.error = Some(message);
            }
        }
    }

    pub fn hints(&self) -> &'static [(&'static str, &'static str)] {
        &[
            ("n", "add card"),
            ("e", "edit"),
            ("d", "delete"),
            ("s", "study"),
            ("r", "refresh"),
            ("Esc", "back"),
        ]
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, spinner: &str) {
        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled(
                    self.deck.name.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("  {} cards", self.cards.len()),
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

        if self.loading {
            frame.render_widget(
                Paragraph::new(Line::from(Span::styled(
                    format!("{spinner} Loading..."),
                    Style::default().fg(Color::DarkGray),
                ))),
                body,
            );
            return;
        }

        if let Some(error) = &self.error {
            frame.render_widget(
                Paragraph::new(Line::from(Span::styled(
                    error.clone(),
                    Style::default().fg(Color::Red),
                ))),
                body,
            );
            return;
        }

        if self.cards.is_empty() {
            frame.render_widget(
                Paragraph::new(Line::from(Span::styled(
                    "No cards in this deck. Add one with n.",
                    Style::default().fg(Color::DarkGray),
                ))),
                body,
            );
            return;
        }

        let question_width = (body.width as usize / 2).saturating_sub(3);
        let answer_width = (body.width as usize).saturating_sub(question_width + 6);
        let items: Vec<ListItem> = self
            .cards
            .iter()
            .map(|card| {
                ListItem::new(Line::from(vec![
                    Span::raw(truncate_with_ellipsis(&card.question, question_width)),
                    Span::styled("  →  ", Style::default().fg(Color::DarkGray)),
                    Span::styled(
                        truncate_with_ellipsis(&card.answer, answer_width),
                        Style::default().fg(Color::DarkGray),
                    ),
                ]))
            })
            .collect();
        let list = List::new(items)
            .highlight_style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("> ");
        let mut list_state = ListState::default().with_selected(Some(self.selected));
        frame.render_stateful_widget(list, body, &mut list_state);
    }
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

    fn card(id: &str) -> Card {
        Card {
            id: id.to_string(),
            deck_id: "9".to_string(),
            question: format!("q{id}"),
            answer: format!("a{id}"),
        }
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::from(code)
    }

    #[test]
    fn test_edit_requests_overlay_for_selected_card() {
        let mut screen = DeckScreen::loading(sample_deck());
        screen.on_cards_loaded(Ok(vec![card("1"), card("2")]));
        screen.handle_key(press(KeyCode::Down), "tok");

        let (_, action) = screen.handle_key(press(KeyCode::Char('e')), "tok");
        assert!(matches!(
            action,
            Some(ScreenAction::OpenOverlay(OverlayRequest::EditCard { card })) if card.id == "2"
        ));
    }

    #[test]
    fn test_escape_returns_to_dashboard() {
        let mut screen = DeckScreen::loading(sample_deck());
        let (_, action) = screen.handle_key(press(KeyCode::Esc), "tok");
        assert!(matches!(action, Some(ScreenAction::ToDashboard)));
    }

    #[test]
    fn test_refresh_reloads_this_deck() {
        let mut screen = DeckScreen::loading(sample_deck());
        screen.on_cards_loaded(Ok(vec![card("1")]));
        let (effects, _) = screen.handle_key(press(KeyCode::Char('r')), "tok");
        assert_eq!(
            effects,
            vec![UiEffect::LoadCards {
                token: "tok".to_string(),
                deck_id: "9".to_string()
            }]
        );
    }
}
