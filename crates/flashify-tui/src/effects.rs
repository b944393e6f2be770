//! UI effect types.
//!
//! Effects are commands returned by the reducer that the runtime executes.
//! They represent I/O only — every network call the TUI makes starts life as
//! one of these. The reducer never performs a request itself; it embeds the
//! bearer token in the effect (the token is caller-supplied on protected
//! calls, per the API contract) and the runtime spawns the work, posting the
//! result back to the inbox as an [`crate::events::ApiUiEvent`].

/// Effects returned by the reducer for the runtime to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEffect {
    /// Quit the application.
    Quit,

    /// Resolve the identity behind a rehydrated token (`GET /auth/user`).
    ResolveIdentity { token: String },

    /// Exchange credentials for a session.
    Login { email: String, password: String },

    /// Register a new account.
    Signup { email: String, password: String },

    /// Fetch the deck list.
    LoadDecks { token: String },

    /// Create a deck.
    CreateDeck { token: String, name: String },

    /// Delete a deck.
    DeleteDeck { token: String, deck_id: String },

    /// Fetch a deck's cards for the deck manager.
    LoadCards { token: String, deck_id: String },

    /// Create a card in a deck.
    CreateCard {
        token: String,
        deck_id: String,
        question: String,
        answer: String,
    },

    /// Update an existing card.
    UpdateCard {
        token: String,
        card_id: String,
        deck_id: String,
        question: String,
        answer: String,
    },

    /// Delete a card.
    DeleteCard {
        token: String,
        card_id: String,
        deck_id: String,
    },

    /// Fetch a deck's cards to start a study session.
    LoadStudyCards { token: String, deck_id: String },
}
