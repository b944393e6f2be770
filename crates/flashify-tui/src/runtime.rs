//! TUI runtime - owns terminal, runs event loop, executes effects.
//!
//! This is the "Elm runtime" boundary: all I/O happens here. The reducer
//! stays pure and produces effects; this module executes them.
//!
//! ## Inbox Pattern
//!
//! Async API handlers send `UiEvent`s directly to `inbox_tx`; the runtime
//! drains `inbox_rx` each frame. Events are therefore applied strictly in the
//! order they are delivered, one at a time — no two transitions are ever in
//! flight against the same state.

use std::future::Future;
use std::io::Stdout;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event;
use flashify_core::api::ApiClient;
use flashify_core::auth::AuthSession;
use flashify_core::config::Config;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio::sync::mpsc;

use crate::effects::UiEffect;
use crate::events::{ApiUiEvent, UiEvent};
use crate::state::AppState;
use crate::{render, terminal, update};

/// Tick cadence (drives spinners and caps the render rate).
pub const TICK_INTERVAL: Duration = Duration::from_millis(100);

/// Full-screen TUI runtime.
///
/// Owns the terminal and state. Terminal state is restored on drop.
pub struct TuiRuntime {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    pub state: AppState,
    api: ApiClient,
    inbox_tx: mpsc::UnboundedSender<UiEvent>,
    inbox_rx: mpsc::UnboundedReceiver<UiEvent>,
    last_tick: Instant,
}

impl TuiRuntime {
    /// Creates a new TUI runtime from loaded config and rehydrated auth.
    pub fn new(config: Config, auth: AuthSession) -> Result<Self> {
        // Set up panic hook BEFORE entering alternate screen.
        terminal::install_panic_hook();
        let terminal = terminal::setup_terminal().context("Failed to setup terminal")?;

        let api = ApiClient::new(&config)?;
        let state = AppState::new(config, auth);
        let (inbox_tx, inbox_rx) = mpsc::unbounded_channel();

        Ok(Self {
            terminal,
            state,
            api,
            inbox_tx,
            inbox_rx,
            last_tick: Instant::now(),
        })
    }

    /// Runs the main event loop until the app quits.
    pub fn run(&mut self) -> Result<()> {
        let startup = self.state.startup_effects();
        self.execute_effects(startup);

        let mut dirty = true; // Start dirty to ensure initial render
        while !self.state.tui.should_quit {
            let events = self.collect_events()?;

            for event in events {
                let effects = update::update(&mut self.state, event);
                dirty = true;
                self.execute_effects(effects);
            }

            if dirty {
                self.terminal.draw(|frame| {
                    render::render(&self.state, frame);
                })?;
                dirty = false;
            }
        }

        Ok(())
    }

    // ========================================================================
    // Event Collection
    // ========================================================================

    /// Collects events from the inbox and the terminal, then emits a Tick
    /// when one is due. Blocks at most until the next tick.
    fn collect_events(&mut self) -> Result<Vec<UiEvent>> {
        let mut events = Vec::new();

        // Drain inbox - all async API results arrive here.
        while let Ok(ev) = self.inbox_rx.try_recv() {
            events.push(ev);
        }

        // Poll terminal events:
        // - If we already have events to process, do a non-blocking poll.
        // - Otherwise, block until the next tick is due.
        let time_until_tick = TICK_INTERVAL.saturating_sub(self.last_tick.elapsed());
        let poll_duration = if events.is_empty() {
            time_until_tick
        } else {
            Duration::ZERO
        };

        if event::poll(poll_duration)? {
            events.push(UiEvent::Terminal(event::read()?));
            // Drain any remaining buffered events (non-blocking).
            while event::poll(Duration::ZERO)? {
                events.push(UiEvent::Terminal(event::read()?));
            }
        }

        if self.last_tick.elapsed() >= TICK_INTERVAL {
            events.push(UiEvent::Tick);
            self.last_tick = Instant::now();
        }

        Ok(events)
    }

    // ========================================================================
    // Effect Dispatch
    // ========================================================================

    fn execute_effects(&mut self, effects: Vec<UiEffect>) {
        for effect in effects {
            self.execute_effect(effect);
        }
    }

    /// Spawns an async API call, posting its result event to the inbox.
    fn spawn_api<F, Fut>(&self, f: F)
    where
        F: FnOnce(ApiClient) -> Fut + Send + 'static,
        Fut: Future<Output = UiEvent> + Send + 'static,
    {
        let tx = self.inbox_tx.clone();
        let api = self.api.clone();
        tokio::spawn(async move {
            let _ = tx.send(f(api).await);
        });
    }

    fn execute_effect(&mut self, effect: UiEffect) {
        match effect {
            UiEffect::Quit => {
                self.state.tui.should_quit = true;
            }

            UiEffect::ResolveIdentity { token } => self.spawn_api(|api| async move {
                let result = api.get_user(&token).await.map_err(|e| format!("{e:#}"));
                UiEvent::Api(ApiUiEvent::IdentityResolved { result })
            }),

            UiEffect::Login { email, password } => self.spawn_api(|api| async move {
                let result = api
                    .login(&email, &password)
                    .await
                    .map_err(|e| format!("{e:#}"));
                UiEvent::Api(ApiUiEvent::LoginFinished { result })
            }),

            UiEffect::Signup { email, password } => self.spawn_api(|api| async move {
                let result = api
                    .signup(&email, &password)
                    .await
                    .map_err(|e| format!("{e:#}"));
                UiEvent::Api(ApiUiEvent::SignupFinished { result })
            }),

            UiEffect::LoadDecks { token } => self.spawn_api(|api| async move {
                let result = api.list_decks(&token).await.map_err(|e| format!("{e:#}"));
                UiEvent::Api(ApiUiEvent::DecksLoaded { result })
            }),

            UiEffect::CreateDeck { token, name } => self.spawn_api(|api| async move {
                let result = api
                    .create_deck(&token, &name)
                    .await
                    .map(|_| ())
                    .map_err(|e| format!("{e:#}"));
                UiEvent::Api(ApiUiEvent::DeckCreated { result })
            }),

            UiEffect::DeleteDeck { token, deck_id } => self.spawn_api(|api| async move {
                let result = api
                    .delete_deck(&token, &deck_id)
                    .await
                    .map_err(|e| format!("{e:#}"));
                UiEvent::Api(ApiUiEvent::DeckDeleted { result })
            }),

            UiEffect::LoadCards { token, deck_id } => self.spawn_api(|api| async move {
                let result = api
                    .list_cards(&token, &deck_id)
                    .await
                    .map_err(|e| format!("{e:#}"));
                UiEvent::Api(ApiUiEvent::CardsLoaded { deck_id, result })
            }),

            UiEffect::CreateCard {
                token,
                deck_id,
                question,
                answer,
            } => self.spawn_api(|api| async move {
                let result = api
                    .create_card(&token, &deck_id, &question, &answer)
                    .await
                    .map(|_| ())
                    .map_err(|e| format!("{e:#}"));
                UiEvent::Api(ApiUiEvent::CardSaved { deck_id, result })
            }),

            UiEffect::UpdateCard {
                token,
                card_id,
                deck_id,
                question,
                answer,
            } => self.spawn_api(|api| async move {
                let result = api
                    .update_card(&token, &card_id, &question, &answer)
                    .await
                    .map(|_| ())
                    .map_err(|e| format!("{e:#}"));
                UiEvent::Api(ApiUiEvent::CardSaved { deck_id, result })
            }),

            UiEffect::DeleteCard {
                token,
                card_id,
                deck_id,
            } => self.spawn_api(|api| async move {
                let result = api
                    .delete_card(&token, &card_id)
                    .await
                    .map_err(|e| format!("{e:#}"));
                UiEvent::Api(ApiUiEvent::CardDeleted { deck_id, result })
            }),

            UiEffect::LoadStudyCards { token, deck_id } => self.spawn_api(|api| async move {
                let result = api
                    .list_cards(&token, &deck_id)
                    .await
                    .map_err(|e| format!("{e:#}"));
                UiEvent::Api(ApiUiEvent::StudyCardsLoaded { deck_id, result })
            }),
        }
    }
}

impl Drop for TuiRuntime {
    fn drop(&mut self) {
        let _ = terminal::restore_terminal();
    }
}
