//! Application state composition.
//!
//! `AppState` combines the non-overlay state (`TuiState`) with the active
//! modal overlay, so overlay handlers can take `&mut self` and still read the
//! rest of the app without borrow conflicts.
//!
//! The auth session is process-wide shared state: every screen reads it, but
//! only the reducer mutates it, and always as a complete replace-or-clear of
//! the (token, identity) pair.

use flashify_core::auth::{AuthSession, AuthStatus};
use flashify_core::config::Config;

use crate::effects::UiEffect;
use crate::overlays::Overlay;
use crate::screens::{DashboardScreen, LoginScreen, Screen};

/// Spinner frames for busy indicators.
pub const SPINNER_FRAMES: &[&str] = &["◐", "◓", "◑", "◒"];

/// Combined application state for the TUI.
pub struct AppState {
    pub tui: TuiState,
    pub overlay: Option<Overlay>,
}

/// TUI application state (non-overlay).
pub struct TuiState {
    /// Flag indicating the app should quit.
    pub should_quit: bool,
    /// Loaded configuration.
    pub config: Config,
    /// Process-wide authentication state.
    pub auth: AuthSession,
    /// The active screen.
    pub screen: Screen,
    /// Spinner animation frame counter.
    pub spinner_frame: usize,
}

impl AppState {
    /// Creates the initial state from a rehydrated auth session.
    ///
    /// A stored token (resolved or still `Unknown`) lands on the dashboard —
    /// redirecting while auth status is not yet known would be premature.
    /// Only a known-unauthenticated session starts at the login screen.
    pub fn new(config: Config, auth: AuthSession) -> Self {
        let screen = if auth.status() == AuthStatus::Unauthenticated {
            Screen::Login(LoginScreen::new())
        } else {
            Screen::Dashboard(DashboardScreen::loading())
        };
        Self {
            tui: TuiState {
                should_quit: false,
                config,
                auth,
                screen,
                spinner_frame: 0,
            },
            overlay: None,
        }
    }

    /// Effects to run once at startup: resolve the identity behind a stored
    /// token and fetch the deck list the dashboard is waiting for.
    pub fn startup_effects(&self) -> Vec<UiEffect> {
        let mut effects = Vec::new();
        if let Some(token) = self.tui.auth.token() {
            if self.tui.auth.needs_identity_resolution() {
                effects.push(UiEffect::ResolveIdentity {
                    token: token.to_string(),
                });
            }
            effects.push(UiEffect::LoadDecks {
                token: token.to_string(),
            });
        }
        effects
    }
}

impl TuiState {
    /// Current spinner glyph.
    pub fn spinner(&self) -> &'static str {
        SPINNER_FRAMES[self.spinner_frame % SPINNER_FRAMES.len()]
    }
}
