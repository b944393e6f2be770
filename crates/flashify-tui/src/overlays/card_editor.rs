//! Card editor overlay, shared by create and edit.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use flashify_core::api::Card;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Color;

use super::{OverlayUpdate, render_utils};
use crate::effects::UiEffect;

/// Focused editor field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorField {
    Question,
    Answer,
}

/// State for the card editor overlay.
#[derive(Debug)]
pub struct CardEditorState {
    pub deck_id: String,
    /// `Some` when editing an existing card, `None` when creating.
    pub card_id: Option<String>,
    pub question: String,
    pub answer: String,
    pub focus: EditorField,
    pub error: Option<String>,
    pub busy: bool,
}

impl CardEditorState {
    /// Editor in create mode for a deck.
    pub fn create(deck_id: String) -> Self {
        Self {
            deck_id,
            card_id: None,
            question: String::new(),
            answer: String::new(),
            focus: EditorField::Question,
            error: None,
            busy: false,
        }
    }

    /// Editor pre-filled from an existing card.
    pub fn edit(card: &Card) -> Self {
        Self {
            deck_id: card.deck_id.clone(),
            card_id: Some(card.id.clone()),
            question: card.question.clone(),
            answer: card.answer.clone(),
            focus: EditorField::Question,
            error: None,
            busy: false,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent, token: &str) -> OverlayUpdate {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Esc => OverlayUpdate::close(),
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Down | KeyCode::Up => {
                self.focus = match self.focus {
                    EditorField::Question => EditorField::Answer,
                    EditorField::Answer => EditorField::Question,
                };
                OverlayUpdate::stay()
            }
            KeyCode::Enter => self.submit(token),
            KeyCode::Backspace => {
                self.field_mut().pop();
                self.error = None;
                OverlayUpdate::stay()
            }
            KeyCode::Char(c) if !ctrl && !self.busy => {
                self.field_mut().push(c);
                self.error = None;
                OverlayUpdate::stay()
            }
            _ => OverlayUpdate::stay(),
        }
    }

    fn submit(&mut self, token: &str) -> OverlayUpdate {
        let question = self.question.trim().to_string();
        let answer = self.answer.trim().to_string();
        if question.is_empty() || answer.is_empty() {
            self.error = Some("Question and answer are required".to_string());
            return OverlayUpdate::stay();
        }
        if self.busy {
            return OverlayUpdate::stay();
        }
        self.busy = true;
        self.error = None;

        let effect = match &self.card_id {
            Some(card_id) => UiEffect::UpdateCard {
                token: token.to_string(),
                card_id: card_id.clone(),
                deck_id: self.deck_id.clone(),
                question,
                answer,
            },
            None => UiEffect::CreateCard {
                token: token.to_string(),
                deck_id: self.deck_id.clone(),
                question,
                answer,
            },
        };
        OverlayUpdate::stay().with_effects(vec![effect])
    }

    /// Applies a failed save; success closes the overlay from the reducer.
    pub fn on_save_failed(&mut self, message: String) {
        self.busy = false;
        self.error = Some(message);
    }

    fn field_mut(&mut self) -> &mut String {
        match self.focus {
            EditorField::Question => &mut self.question,
            EditorField::Answer => &mut self.answer,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, spinner: &str) {
        let title = if self.card_id.is_some() {
            "Edit Card"
        } else {
            "Add Card"
        };
        let hints = [
            render_utils::InputHint::new("Enter", "save"),
            render_utils::InputHint::new("Tab", "switch field"),
            render_utils::InputHint::new("Esc", "cancel"),
        ];
        let layout = render_utils::render_overlay(
            frame,
            area,
            &render_utils::OverlayConfig {
                title,
                border_color: Color::Cyan,
                width: 56,
                height: 9,
                hints: &hints,
            },
        );

        render_utils::render_labelled_input(
            frame,
            Rect::new(layout.body.x, layout.body.y, layout.body.width, 1),
            "Question",
            &self.question,
            !self.busy && self.focus == EditorField::Question,
        );
        render_utils::render_labelled_input(
            frame,
            Rect::new(layout.body.x, layout.body.y + 2, layout.body.width, 1),
            "Answer",
            &self.answer,
            !self.busy && self.focus == EditorField::Answer,
        );
        render_utils::render_message_line(
            frame,
            Rect::new(layout.body.x, layout.body.y + 4, layout.body.width, 1),
            self.busy,
            spinner,
            self.error.as_deref(),
        );
    }
}
