//! UI event types.
//!
//! Everything the reducer consumes arrives as a `UiEvent`: terminal input,
//! the tick heartbeat, and the results of async API work posted to the
//! runtime inbox by effect handlers. Events are applied strictly in delivery
//! order; transitions never interleave.

use crossterm::event::Event;
use flashify_core::api::{AuthResponse, Card, Deck, UserResponse};

/// Events consumed by the reducer.
#[derive(Debug)]
pub enum UiEvent {
    /// Periodic heartbeat (drives the busy spinner).
    Tick,
    /// Raw terminal input.
    Terminal(Event),
    /// Completed async API work.
    Api(ApiUiEvent),
}

/// Results of async API calls.
///
/// Each carries a `Result<_, String>`: transport errors arrive as the
/// rendered message, API-level failures either as the server's `error` field
/// (deck/card calls) or inside the raw reply (auth calls). Deck-scoped
/// results carry the deck id so replies for screens the user already left
/// can be dropped.
#[derive(Debug)]
pub enum ApiUiEvent {
    /// `GET /auth/user` during startup rehydration finished.
    IdentityResolved { result: Result<UserResponse, String> },
    /// Login exchange finished (the reply may still be a failed login).
    LoginFinished { result: Result<AuthResponse, String> },
    /// Signup request finished.
    SignupFinished { result: Result<AuthResponse, String> },
    /// Deck list fetch finished.
    DecksLoaded { result: Result<Vec<Deck>, String> },
    /// Deck creation finished; success triggers a list re-fetch.
    DeckCreated { result: Result<(), String> },
    /// Deck deletion finished; success triggers a list re-fetch.
    DeckDeleted { result: Result<(), String> },
    /// Card list fetch for the deck manager finished.
    CardsLoaded {
        deck_id: String,
        result: Result<Vec<Card>, String>,
    },
    /// Card create/update finished; success triggers a card re-fetch.
    CardSaved {
        deck_id: String,
        result: Result<(), String>,
    },
    /// Card deletion finished; success triggers a card re-fetch.
    CardDeleted {
        deck_id: String,
        result: Result<(), String>,
    },
    /// Card list fetch for a study session finished.
    StudyCardsLoaded {
        deck_id: String,
        result: Result<Vec<Card>, String>,
    },
}
