//! TUI reducer (update function).
//!
//! All state mutations happen here. The runtime calls `update(app, event)`
//! and executes the returned effects. Keyboard input is routed through this
//! reducer against the *current* screen state on every press, so a handler
//! can never observe a stale index, length, or token — there is no captured
//! snapshot to go stale.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tracing::warn;

use crate::effects::UiEffect;
use crate::events::{ApiUiEvent, UiEvent};
use crate::overlays::{
    CardEditorState, ConfirmDeleteState, NewDeckState, Overlay, OverlayTransition,
};
use crate::screens::{
    DashboardScreen, DeckScreen, LoginScreen, OverlayRequest, Screen, ScreenAction, StudyScreen,
};
use crate::state::AppState;

/// The main reducer function.
pub fn update(app: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    let effects = match event {
        UiEvent::Tick => {
            app.tui.spinner_frame = app.tui.spinner_frame.wrapping_add(1);
            vec![]
        }
        UiEvent::Terminal(Event::Key(key)) if key.kind == KeyEventKind::Press => {
            handle_key(app, key)
        }
        UiEvent::Terminal(_) => vec![],
        UiEvent::Api(api_event) => handle_api_event(app, api_event),
    };

    enforce_login_guard(app);
    effects
}

/// Route guard: a known-unauthenticated session always lands on the login
/// screen. While auth status is still unknown (token rehydrating) nothing is
/// redirected.
fn enforce_login_guard(app: &mut AppState) {
    if app.tui.auth.status() == flashify_core::auth::AuthStatus::Unauthenticated
        && !matches!(app.tui.screen, Screen::Login(_))
    {
        app.overlay = None;
        app.tui.screen = Screen::Login(LoginScreen::new());
    }
}

// ============================================================================
// Key handling
// ============================================================================

fn handle_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    // Ctrl+C always quits.
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return vec![UiEffect::Quit];
    }

    // An active overlay takes over keyboard input.
    if let Some(overlay) = app.overlay.as_mut() {
        let token = app.tui.auth.token().unwrap_or_default().to_string();
        let overlay_update = overlay.handle_key(key, &token);
        if matches!(overlay_update.transition, OverlayTransition::Close) {
            app.overlay = None;
        }
        return overlay_update.effects;
    }

    let token = app.tui.auth.token().map(str::to_string);
    let (mut effects, action) = match &mut app.tui.screen {
        Screen::Login(screen) => screen.handle_key(key),
        Screen::Dashboard(screen) => screen.handle_key(key, token.as_deref().unwrap_or_default()),
        Screen::Deck(screen) => screen.handle_key(key, token.as_deref().unwrap_or_default()),
        Screen::Study(screen) => screen.handle_key(key),
    };
    if let Some(action) = action {
        effects.extend(apply_action(app, action));
    }
    effects
}

fn apply_action(app: &mut AppState, action: ScreenAction) -> Vec<UiEffect> {
    match action {
        ScreenAction::Quit => vec![UiEffect::Quit],
        ScreenAction::Logout => {
            if let Err(e) = app.tui.auth.logout() {
                warn!("failed to clear credential slot: {e:#}");
            }
            app.tui.screen = Screen::Login(LoginScreen::with_notice("Logged out."));
            vec![]
        }
        ScreenAction::ToDashboard => {
            app.tui.screen = Screen::Dashboard(DashboardScreen::loading());
            load_decks_effect(app)
        }
        ScreenAction::OpenDeck(deck) => {
            let effects = match app.tui.auth.token() {
                Some(token) => vec![UiEffect::LoadCards {
                    token: token.to_string(),
                    deck_id: deck.id.clone(),
                }],
                None => vec![],
            };
            app.tui.screen = Screen::Deck(DeckScreen::loading(deck));
            effects
        }
        ScreenAction::StudyDeck(deck) => {
            let effects = match app.tui.auth.token() {
                Some(token) => vec![UiEffect::LoadStudyCards {
                    token: token.to_string(),
                    deck_id: deck.id.clone(),
                }],
                None => vec![],
            };
            app.tui.screen = Screen::Study(StudyScreen::loading(deck));
            effects
        }
        ScreenAction::OpenOverlay(request) => {
            app.overlay = Some(build_overlay(request));
            vec![]
        }
    }
}

fn build_overlay(request: OverlayRequest) -> Overlay {
    match request {
        OverlayRequest::NewDeck => Overlay::NewDeck(NewDeckState::new()),
        OverlayRequest::NewCard { deck_id } => {
            Overlay::CardEditor(CardEditorState::create(deck_id))
        }
        OverlayRequest::EditCard { card } => Overlay::CardEditor(CardEditorState::edit(&card)),
        OverlayRequest::ConfirmDeleteDeck { deck } => {
            Overlay::ConfirmDelete(ConfirmDeleteState::deck(deck))
        }
        OverlayRequest::ConfirmDeleteCard { card } => {
            Overlay::ConfirmDelete(ConfirmDeleteState::card(card))
        }
    }
}

fn load_decks_effect(app: &AppState) -> Vec<UiEffect> {
    match app.tui.auth.token() {
        Some(token) => vec![UiEffect::LoadDecks {
            token: token.to_string(),
        }],
        None => vec![],
    }
}

// ============================================================================
// API result handling
// ============================================================================

fn handle_api_event(app: &mut AppState, event: ApiUiEvent) -> Vec<UiEffect> {
    match event {
        ApiUiEvent::IdentityResolved { result } => {
            match result {
                Ok(reply) => app.tui.auth.resolve_identity(reply.user),
                Err(message) => {
                    // Token presence still gates access; the identity just
                    // stays unresolved.
                    warn!("identity resolution failed: {message}");
                    app.tui.auth.resolve_identity(None);
                }
            }
            vec![]
        }

        ApiUiEvent::LoginFinished { result } => match result {
            Ok(response) if response.access_token().is_some() => {
                if let Err(e) = app.tui.auth.install_session(&response) {
                    if let Screen::Login(screen) = &mut app.tui.screen {
                        screen.on_login_failed(format!("{e:#}"));
                    }
                    return vec![];
                }
                app.tui.screen = Screen::Dashboard(DashboardScreen::loading());
                load_decks_effect(app)
            }
            Ok(response) => {
                if let Screen::Login(screen) = &mut app.tui.screen {
                    screen.on_login_failed(
                        response
                            .error
                            .unwrap_or_else(|| "Something went wrong.".to_string()),
                    );
                }
                vec![]
            }
            Err(message) => {
                if let Screen::Login(screen) = &mut app.tui.screen {
                    screen.on_login_failed(message);
                }
                vec![]
            }
        },

        ApiUiEvent::SignupFinished { result } => {
            if let Screen::Login(screen) = &mut app.tui.screen {
                screen.on_signup_finished(result.map(|reply| reply.error));
            }
            vec![]
        }

        ApiUiEvent::DecksLoaded { result } => {
            if let Screen::Dashboard(screen) = &mut app.tui.screen {
                screen.on_decks_loaded(result);
            }
            vec![]
        }

        ApiUiEvent::DeckCreated { result } => match result {
            Ok(()) => {
                if matches!(app.overlay, Some(Overlay::NewDeck(_))) {
                    app.overlay = None;
                }
                reload_dashboard(app)
            }
            Err(message) => {
                if let Some(Overlay::NewDeck(overlay)) = &mut app.overlay {
                    overlay.on_create_failed(message);
                }
                vec![]
            }
        },

        ApiUiEvent::DeckDeleted { result } => match result {
            Ok(()) => {
                if matches!(app.overlay, Some(Overlay::ConfirmDelete(_))) {
                    app.overlay = None;
                }
                reload_dashboard(app)
            }
            Err(message) => {
                if let Some(Overlay::ConfirmDelete(overlay)) = &mut app.overlay {
                    overlay.on_delete_failed(message);
                }
                vec![]
            }
        },

        ApiUiEvent::CardsLoaded { deck_id, result } => {
            // Replies for a deck the user already navigated away from are
            // dropped.
            if let Screen::Deck(screen) = &mut app.tui.screen
                && screen.deck.id == deck_id
            {
                screen.on_cards_loaded(result);
            }
            vec![]
        }

        ApiUiEvent::CardSaved { deck_id, result } => match result {
            Ok(()) => {
                if matches!(app.overlay, Some(Overlay::CardEditor(_))) {
                    app.overlay = None;
                }
                reload_deck(app, &deck_id)
            }
            Err(message) => {
                if let Some(Overlay::CardEditor(overlay)) = &mut app.overlay {
                    overlay.on_save_failed(message);
                }
                vec![]
            }
        },

        ApiUiEvent::CardDeleted { deck_id, result } => match result {
            Ok(()) => {
                if matches!(app.overlay, Some(Overlay::ConfirmDelete(_))) {
                    app.overlay = None;
                }
                reload_deck(app, &deck_id)
            }
            Err(message) => {
                if let Some(Overlay::ConfirmDelete(overlay)) = &mut app.overlay {
                    overlay.on_delete_failed(message);
                }
                vec![]
            }
        },

        ApiUiEvent::StudyCardsLoaded { deck_id, result } => {
            if let Screen::Study(screen) = &mut app.tui.screen
                && screen.deck.id == deck_id
            {
                screen.on_cards_loaded(result);
            }
            vec![]
        }
    }
}

/// The server is the source of truth for mutations: re-fetch the deck list
/// rather than splicing the local one.
fn reload_dashboard(app: &mut AppState) -> Vec<UiEffect> {
    if let Screen::Dashboard(screen) = &mut app.tui.screen {
        screen.loading = true;
    }
    load_decks_effect(app)
}

/// Same policy for a deck's card list.
fn reload_deck(app: &mut AppState, deck_id: &str) -> Vec<UiEffect> {
    let Screen::Deck(screen) = &mut app.tui.screen else {
        return vec![];
    };
    if screen.deck.id != deck_id {
        return vec![];
    }
    screen.loading = true;
    match app.tui.auth.token() {
        Some(token) => vec![UiEffect::LoadCards {
            token: token.to_string(),
            deck_id: deck_id.to_string(),
        }],
        None => vec![],
    }
}
