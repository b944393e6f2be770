//! Screen modules for the TUI.
//!
//! Each screen is self-contained: it owns its state, key handler, API-result
//! handlers, and render function. Key handlers return effects plus an
//! optional [`ScreenAction`] — navigation and overlay opening are applied by
//! the reducer, which is the only place screens are swapped.

pub mod dashboard;
pub mod deck;
pub mod login;
pub mod study;

pub use dashboard::DashboardScreen;
pub use deck::DeckScreen;
use flashify_core::api::{Card, Deck};
pub use login::LoginScreen;
pub use study::StudyScreen;

/// The active screen.
#[derive(Debug)]
pub enum Screen {
    Login(LoginScreen),
    Dashboard(DashboardScreen),
    Deck(DeckScreen),
    Study(StudyScreen),
}

/// Cross-screen actions requested by a key handler.
#[derive(Debug)]
pub enum ScreenAction {
    /// Quit the application.
    Quit,
    /// Clear the session and return to the login screen.
    Logout,
    /// Return to the deck dashboard (re-fetches the list).
    ToDashboard,
    /// Open a deck's card manager.
    OpenDeck(Deck),
    /// Start a study session over a deck.
    StudyDeck(Deck),
    /// Open a modal overlay.
    OpenOverlay(OverlayRequest),
}

/// Requests to open a modal overlay.
#[derive(Debug)]
pub enum OverlayRequest {
    /// Prompt for a new deck name.
    NewDeck,
    /// Card editor in create mode.
    NewCard { deck_id: String },
    /// Card editor pre-filled from an existing card.
    EditCard { card: Card },
    /// Confirmation before deleting a deck.
    ConfirmDeleteDeck { deck: Deck },
    /// Confirmation before deleting a card.
    ConfirmDeleteCard { card: Card },
}
