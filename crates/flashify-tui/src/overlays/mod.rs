//! Overlay modules for the TUI.
//!
//! Overlays are modal UI components that temporarily take over keyboard
//! input. Each overlay is self-contained: it owns its state, key handler,
//! and render function.
//!
//! - `deck_new.rs`: new-deck name prompt
//! - `card_editor.rs`: card create/edit form
//! - `confirm.rs`: delete confirmation
//! - `render_utils.rs`: shared rendering utilities

pub mod card_editor;
pub mod confirm;
pub mod deck_new;
pub mod render_utils;

pub use card_editor::CardEditorState;
pub use confirm::ConfirmDeleteState;
use crossterm::event::KeyEvent;
pub use deck_new::NewDeckState;
use ratatui::Frame;
use ratatui::layout::Rect;

use crate::effects::UiEffect;

/// Transition returned by overlay key handlers.
#[derive(Debug)]
pub enum OverlayTransition {
    Stay,
    Close,
}

/// Update returned by overlay key handlers.
#[derive(Debug)]
pub struct OverlayUpdate {
    pub transition: OverlayTransition,
    pub effects: Vec<UiEffect>,
}

impl OverlayUpdate {
    pub fn stay() -> Self {
        Self {
            transition: OverlayTransition::Stay,
            effects: Vec::new(),
        }
    }

    pub fn close() -> Self {
        Self {
            transition: OverlayTransition::Close,
            effects: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_effects(mut self, effects: Vec<UiEffect>) -> Self {
        self.effects = effects;
        self
    }
}

/// The active overlay, if any.
#[derive(Debug)]
pub enum Overlay {
    NewDeck(NewDeckState),
    CardEditor(CardEditorState),
    ConfirmDelete(ConfirmDeleteState),
}

impl Overlay {
    pub fn handle_key(&mut self, key: KeyEvent, token: &str) -> OverlayUpdate {
        match self {
            Overlay::NewDeck(o) => o.handle_key(key, token),
            Overlay::CardEditor(o) => o.handle_key(key, token),
            Overlay::ConfirmDelete(o) => o.handle_key(key, token),
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, spinner: &str) {
        match self {
            Overlay::NewDeck(o) => o.render(frame, area, spinner),
            Overlay::CardEditor(o) => o.render(frame, area, spinner),
            Overlay::ConfirmDelete(o) => o.render(frame, area, spinner),
        }
    }
}
