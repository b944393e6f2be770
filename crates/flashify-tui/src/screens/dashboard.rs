//! Deck dashboard.
//!
//! Lists the user's decks and is the hub for everything else: open a deck's
//! card manager, start a study session, create or delete decks, log out.
//! Mutations never splice the local list — the server is the source of truth,
//! so every successful create/delete triggers a re-fetch.

use crossterm::event::{KeyCode, KeyEvent};
use flashify_core::api::Deck;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{List, ListItem, ListState, Paragraph};

use super::{OverlayRequest, ScreenAction};
use crate::effects::UiEffect;
use crate::text::truncate_with_ellipsis;

/// Dashboard state.
#[derive(Debug)]
pub struct DashboardScreen {
    pub decks: Vec<Deck>,
    pub selected: usize,
    pub loading: bool,
    pub error: Option<String>,
}

impl DashboardScreen {
    /// A dashboard waiting for its first deck list.
    pub fn loading() -> Self {
        Self {
            decks: Vec::new(),
            selected: 0,
            loading: true,
            error: None,
        }
    }

    pub fn selected_deck(&self) -> Option<&Deck> {
        self.decks.get(self.selected)
    }

    pub fn handle_key(
        &mut self,
        key: KeyEvent,
        token: &str,
    ) -> (Vec<UiEffect>, Option<ScreenAction>) {
        match key.code {
            KeyCode::Char('q') => return (vec![], Some(ScreenAction::Quit)),
            KeyCode::Char('L') => return (vec![], Some(ScreenAction::Logout)),
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = self.selected.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.selected + 1 < self.decks.len() {
                    self.selected += 1;
                }
            }
            KeyCode::Enter => {
                if let Some(deck) = self.selected_deck() {
                    return (vec![], Some(ScreenAction::OpenDeck(deck.clone())));
                }
            }
            KeyCode::Char('s') => {
                if let Some(deck) = self.selected_deck() {
                    return (vec![], Some(ScreenAction::StudyDeck(deck.clone())));
                }
            }
            KeyCode::Char('n') => {
                return (
                    vec![],
                    Some(ScreenAction::OpenOverlay(OverlayRequest::NewDeck)),
                );
            }
            KeyCode::Char('d') => {
                if let Some(deck) = self.selected_deck() {
                    return (
                        vec![],
                        Some(ScreenAction::OpenOverlay(OverlayRequest::ConfirmDeleteDeck {
                            deck: deck.clone(),
                        })),
                    );
                }
            }
            KeyCode::Char('r') => {
                self.loading = true;
                self.error = None;
                return (
                    vec![UiEffect::LoadDecks {
                        token: token.to_string(),
                    }],
                    None,
                );
            }
            _ => {}
        }
        (vec![], None)
    }

    /// Applies a deck-list fetch result.
    pub fn on_decks_loaded(&mut self, result: Result<Vec<Deck>, String>) {
        self.loading = false;
        match result {
            Ok(decks) => {
                self.decks = decks;
                self.selected = self.selected.min(self.decks.len().saturating_sub(1));
                self.error = None;
            }
            Err(message) => {
                self.error = Some(message);
            }
        }
    }

    pub fn hints(&self) -> &'static [(&'static str, &'static str)] {
        &[
            ("Enter", "open"),
            ("s", "study"),
            ("n", "new deck"),
            ("d", "delete"),
            ("r", "refresh"),
            ("L", "log out"),
            ("q", "quit"),
        ]
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, who: Option<&str>, spinner: &str) {
        let header = match who {
            Some(email) => format!("Decks — {email}"),
            None => "Decks".to_string(),
        };
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                header,
                Style::default().add_modifier(Modifier::BOLD),
            ))),
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

        if self.decks.is_empty() {
            frame.render_widget(
                Paragraph::new(Line::from(Span::styled(
                    "No decks yet. Create one with n.",
                    Style::default().fg(Color::DarkGray),
                ))),
                body,
            );
            return;
        }

        let items: Vec<ListItem> = self
            .decks
            .iter()
            .map(|deck| {
                ListItem::new(Line::from(truncate_with_ellipsis(
                    &deck.name,
                    body.width.saturating_sub(3) as usize,
                )))
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

    fn deck(id: &str, name: &str) -> Deck {
        Deck {
            id: id.to_string(),
            name: name.to_string(),
        }
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::from(code)
    }

    #[test]
    fn test_decks_loaded_clamps_selection() {
        let mut screen = DashboardScreen::loading();
        screen.on_decks_loaded(Ok(vec![deck("1", "a"), deck("2", "b"), deck("3", "c")]));
        screen.selected = 2;

        // List shrank underneath the cursor (e.g. after a delete + reload).
        screen.on_decks_loaded(Ok(vec![deck("1", "a")]));
        assert_eq!(screen.selected, 0);
        assert!(!screen.loading);
    }

    #[test]
    fn test_refresh_emits_load_with_token() {
        let mut screen = DashboardScreen::loading();
        screen.loading = false;
        let (effects, action) = screen.handle_key(press(KeyCode::Char('r')), "tok-1");
        assert!(action.is_none());
        assert_eq!(
            effects,
            vec![UiEffect::LoadDecks {
                token: "tok-1".to_string()
            }]
        );
        assert!(screen.loading);
    }

    #[test]
    fn test_actions_need_a_selected_deck() {
        let mut screen = DashboardScreen::loading();
        screen.loading = false;

        let (_, action) = screen.handle_key(press(KeyCode::Enter), "tok-1");
        assert!(action.is_none());
        let (_, action) = screen.handle_key(press(KeyCode::Char('s')), "tok-1");
        assert!(action.is_none());

        screen.on_decks_loaded(Ok(vec![deck("1", "Spanish")]));
        let (_, action) = screen.handle_key(press(KeyCode::Char('s')), "tok-1");
        assert!(matches!(action, Some(ScreenAction::StudyDeck(d)) if d.name == "Spanish"));
    }

    #[test]
    fn test_fetch_error_is_surfaced_inline() {
        let mut screen = DashboardScreen::loading();
        screen.on_decks_loaded(Err("Invalid token".to_string()));
        assert_eq!(screen.error.as_deref(), Some("Invalid token"));
    }
}
