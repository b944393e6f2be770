//! Study-session state machine.
//!
//! Drives one linear pass over a fixed, order-preserving card list: current
//! position, answer-reveal state, running score, and termination. The machine
//! is purely local — it is fed the deck's cards once (fetched by the caller)
//! and thereafter evolves only from discrete user events.
//!
//! Phases: `Loading → Active → Ended`, with `Empty` as a terminal
//! short-circuit when the fetched list has no cards. Reveal is an orthogonal
//! sub-flag of `Active`, not a phase of its own.
//!
//! Grading does not require the answer to be revealed at this level; the UI
//! layer is the one that only offers grading keys once the answer is shown.

use crate::api::Card;

/// Top-level phase of a study session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Card list not yet fetched.
    Loading,
    /// The fetched deck had no cards. Terminal.
    Empty,
    /// Walking the card list.
    Active,
    /// The pass is over (ran off the end, or ended explicitly). Terminal.
    Ended,
}

/// One study pass over a deck's cards.
///
/// Invariants:
/// - `index < cards.len()` whenever the phase is `Active`;
/// - reveal resets to false on every index change;
/// - counters only increase, and only while `Active`;
/// - `Empty` and `Ended` are never left.
#[derive(Debug)]
pub struct StudySession {
    cards: Vec<Card>,
    index: usize,
    revealed: bool,
    correct: u32,
    incorrect: u32,
    phase: SessionPhase,
}

impl Default for StudySession {
    fn default() -> Self {
        Self::new()
    }
}

impl StudySession {
    /// A session awaiting its card list.
    pub fn new() -> Self {
        Self {
            cards: Vec::new(),
            index: 0,
            revealed: false,
            correct: 0,
            incorrect: 0,
            phase: SessionPhase::Loading,
        }
    }

    /// Feeds the fetched card list, leaving `Loading`.
    ///
    /// Non-empty lists start the pass at index 0 with the answer hidden and
    /// counters at zero; an empty list short-circuits to `Empty`. Only the
    /// first call does anything — one session instance per pass.
    pub fn load(&mut self, cards: Vec<Card>) {
        if self.phase != SessionPhase::Loading {
            return;
        }
        self.phase = if cards.is_empty() {
            SessionPhase::Empty
        } else {
            SessionPhase::Active
        };
        self.cards = cards;
        self.index = 0;
        self.revealed = false;
        self.correct = 0;
        self.incorrect = 0;
    }

    /// Toggles the answer reveal. No-op outside `Active`.
    pub fn flip(&mut self) {
        if self.phase == SessionPhase::Active {
            self.revealed = !self.revealed;
        }
    }

    /// Steps to the next card, hiding the answer.
    ///
    /// Advancing past the last card always ends the session — it never wraps
    /// and never errors. No-op outside `Active`.
    pub fn advance(&mut self) {
        if self.phase != SessionPhase::Active {
            return;
        }
        if self.index + 1 < self.cards.len() {
            self.index += 1;
            self.revealed = false;
        } else {
            self.phase = SessionPhase::Ended;
        }
    }

    /// Steps back one card, hiding the answer.
    ///
    /// Clamped at the first card (asymmetric with [`StudySession::advance`]:
    /// retreating past the start does not end the session). No-op outside
    /// `Active`.
    pub fn retreat(&mut self) {
        if self.phase != SessionPhase::Active {
            return;
        }
        if self.index > 0 {
            self.index -= 1;
            self.revealed = false;
        }
    }

    /// Records a grade for the current card, then advances.
    ///
    /// Grade-and-advance is one transition so a card can never be graded
    /// twice. No-op outside `Active`.
    pub fn grade(&mut self, is_correct: bool) {
        if self.phase != SessionPhase::Active {
            return;
        }
        if is_correct {
            self.correct += 1;
        } else {
            self.incorrect += 1;
        }
        self.advance();
    }

    /// Ends the session from wherever it is, preserving the tally.
    pub fn end(&mut self) {
        if self.phase == SessionPhase::Active {
            self.phase = SessionPhase::Ended;
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// The card currently shown. `None` outside `Active`.
    pub fn current_card(&self) -> Option<&Card> {
        match self.phase {
            SessionPhase::Active => self.cards.get(self.index),
            _ => None,
        }
    }

    /// 0-based position within the pass.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Whether the current card's answer is shown.
    pub fn revealed(&self) -> bool {
        self.revealed
    }

    pub fn correct(&self) -> u32 {
        self.correct
    }

    pub fn incorrect(&self) -> u32 {
        self.incorrect
    }

    /// True in the terminal phases (`Empty` or `Ended`).
    pub fn is_over(&self) -> bool {
        matches!(self.phase, SessionPhase::Empty | SessionPhase::Ended)
    }
}
