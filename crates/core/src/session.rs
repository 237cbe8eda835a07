//! Game session - deals boards, routes intents and persists progress
//!
//! The session ties the layout catalog, deck dealing, the match engine and
//! the snapshot store together. Every score-affecting transition (match,
//! mismatch, new deal) is written through to the store immediately, so at
//! most one operation of progress can be lost.

use std::collections::BTreeSet;

use tracing::{debug, info, warn};

use crate::config::GameConfig;
use crate::deck::generate_deck;
use crate::engine::{MatchEngine, Resolution, TickOutcome};
use crate::layout::LayoutCatalog;
use crate::persist::SnapshotStore;
use crate::rng::SimpleRng;
use crate::scoring::Scoreboard;
use crate::snapshot::ProgressSnapshot;
use crate::types::{BootMode, Card, CardId, GameEvent, Intent, LayoutSpec, PairKey, Phase};

/// Upper bound (exclusive) for the replay token stored with each deal.
const SEED_RANGE: u32 = 1_000_000;

/// How [`GameSession::boot`] came up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootOutcome {
    /// A saved game was restored.
    Loaded,
    /// A new game was dealt.
    Fresh,
}

pub struct GameSession {
    catalog: LayoutCatalog,
    rng: SimpleRng,
    seed: u32,
    deck: Vec<PairKey>,
    engine: MatchEngine,
    store: Box<dyn SnapshotStore>,
}

impl GameSession {
    /// Create an idle session. Nothing is dealt until [`boot`](Self::boot)
    /// or [`start_new_game`](Self::start_new_game).
    pub fn new(config: GameConfig, store: Box<dyn SnapshotStore>, rng_seed: u32) -> Self {
        Self {
            catalog: config.catalog(),
            rng: SimpleRng::new(rng_seed),
            seed: 0,
            deck: Vec::new(),
            engine: MatchEngine::new(&config),
            store,
        }
    }

    pub fn engine(&self) -> &MatchEngine {
        &self.engine
    }

    pub fn catalog(&self) -> &LayoutCatalog {
        &self.catalog
    }

    pub fn layout(&self) -> LayoutSpec {
        self.engine.layout()
    }

    pub fn cards(&self) -> &[Card] {
        self.engine.cards()
    }

    pub fn phase(&self) -> Phase {
        self.engine.phase()
    }

    pub fn score(&self) -> u32 {
        self.engine.score()
    }

    pub fn combo(&self) -> u32 {
        self.engine.combo()
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn deck(&self) -> &[PairKey] {
        &self.deck
    }

    pub fn store_name(&self) -> &str {
        self.store.name()
    }

    /// Take every event emitted since the last call.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        self.engine.take_events()
    }

    /// Bring the session up according to `mode`.
    ///
    /// Load requests that fail for any reason fall back to a new game and
    /// emit [`GameEvent::LoadFailed`].
    pub fn boot(&mut self, mode: BootMode) -> BootOutcome {
        match mode {
            BootMode::NewGame => {
                self.start_new_game(false);
                BootOutcome::Fresh
            }
            BootMode::LoadGame | BootMode::AutoLoad => {
                if self.request_load() {
                    BootOutcome::Loaded
                } else {
                    self.engine.emit(GameEvent::LoadFailed);
                    self.start_new_game(false);
                    BootOutcome::Fresh
                }
            }
        }
    }

    /// Deal a fresh board for the current layout and start the preview.
    ///
    /// Combo and matched pairs always reset; score is kept only when
    /// `preserve_score` is set.
    pub fn start_new_game(&mut self, preserve_score: bool) {
        let score = if preserve_score { self.engine.score() } else { 0 };
        let layout = self.catalog.current();

        self.deck = generate_deck(layout, &mut self.rng);
        self.seed = self.rng.next_range(SEED_RANGE);

        self.engine.rebuild(
            layout,
            &self.deck,
            &BTreeSet::new(),
            Scoreboard::new(score, 0),
        );
        self.engine.begin_preview();

        info!(
            layout_index = self.catalog.index(),
            rows = layout.rows,
            cols = layout.cols,
            score,
            seed = self.seed,
            "dealt new board"
        );
        self.save();
    }

    /// Advance to the next layout preset and deal a new game (score reset).
    pub fn change_layout(&mut self) {
        self.catalog.next();
        self.start_new_game(false);
    }

    /// Step back to the previous layout preset and deal a new game.
    pub fn previous_layout(&mut self) {
        self.catalog.prev();
        self.start_new_game(false);
    }

    /// Restore a saved game verbatim (no reshuffle, no preview).
    ///
    /// Returns `false` and leaves the session untouched when the snapshot's
    /// deck is missing, unplayable or does not fill its layout; the caller
    /// should deal a new game.
    pub fn load_from_snapshot(&mut self, snapshot: &ProgressSnapshot) -> bool {
        if let Err(e) = snapshot.validate() {
            warn!(error = %e, "rejecting malformed snapshot");
            return false;
        }

        let mut catalog = self.catalog.clone();
        catalog.set_index(snapshot.layout_index);
        let layout = catalog.current();
        if snapshot.deck_ids.len() != 2 * layout.pair_count() {
            warn!(
                layout_index = catalog.index(),
                rows = layout.rows,
                cols = layout.cols,
                deck = snapshot.deck_ids.len(),
                "rejecting snapshot whose deck does not fit its layout"
            );
            return false;
        }

        self.catalog = catalog;
        self.seed = snapshot.seed;
        self.deck = snapshot.deck_ids.clone();
        let matched: BTreeSet<PairKey> = snapshot.matched_ids.iter().copied().collect();

        self.engine.rebuild(
            self.catalog.current(),
            &self.deck,
            &matched,
            Scoreboard::new(snapshot.score, snapshot.combo),
        );
        self.engine.begin_play();

        info!(
            layout_index = self.catalog.index(),
            score = snapshot.score,
            combo = snapshot.combo,
            matched = self.engine.matched().len(),
            "restored saved game"
        );
        true
    }

    /// Read the store and restore from it. `false` when there is nothing
    /// usable to restore.
    pub fn request_load(&mut self) -> bool {
        match self.store.load() {
            Ok(Some(snapshot)) => self.load_from_snapshot(&snapshot),
            Ok(None) => {
                debug!(store = self.store.name(), "no saved game");
                false
            }
            Err(e) => {
                warn!(store = self.store.name(), error = %e, "failed to load saved game");
                false
            }
        }
    }

    /// Current progress in persisted form.
    pub fn snapshot(&self) -> ProgressSnapshot {
        ProgressSnapshot {
            layout_index: self.catalog.index() as i64,
            score: self.engine.score(),
            combo: self.engine.combo(),
            seed: self.seed,
            deck_ids: self.deck.clone(),
            matched_ids: self.engine.matched().iter().copied().collect(),
        }
    }

    /// Write the current snapshot. Failures are logged and reported as
    /// [`GameEvent::SaveFailed`].
    pub fn save(&mut self) -> bool {
        match self.store.save(&self.snapshot()) {
            Ok(()) => true,
            Err(e) => {
                warn!(store = self.store.name(), error = %e, "failed to save progress");
                self.engine.emit(GameEvent::SaveFailed);
                false
            }
        }
    }

    /// Remove the stored snapshot.
    pub fn delete_save(&mut self) -> bool {
        match self.store.clear() {
            Ok(()) => true,
            Err(e) => {
                warn!(store = self.store.name(), error = %e, "failed to delete save");
                false
            }
        }
    }

    /// Player selects a card. Score-affecting outcomes are persisted.
    pub fn select_card(&mut self, id: CardId) -> Option<Resolution> {
        let resolution = self.engine.select(id)?;
        match resolution {
            Resolution::Matched { won: true, .. } => {
                info!(final_score = self.engine.score(), "board cleared");
                self.save();
            }
            r if r.affects_score() => {
                self.save();
            }
            _ => {}
        }
        Some(resolution)
    }

    /// Advance time. Deals the next layout (keeping the score) once the
    /// post-win delay has elapsed.
    pub fn tick(&mut self, elapsed_ms: u32) -> TickOutcome {
        let outcome = self.engine.tick(elapsed_ms);
        if outcome.advance_layout {
            self.catalog.next();
            self.start_new_game(true);
        }
        outcome
    }

    /// Route an intent from the input layer.
    pub fn apply(&mut self, intent: Intent) {
        match intent {
            Intent::SelectCard(id) => {
                self.select_card(id);
            }
            Intent::NewGame => self.start_new_game(false),
            Intent::ChangeLayout => self.change_layout(),
            Intent::PreviousLayout => self.previous_layout(),
            Intent::Load => {
                if !self.request_load() {
                    self.engine.emit(GameEvent::LoadFailed);
                    self.start_new_game(false);
                }
            }
        }
    }
}

impl std::fmt::Debug for GameSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameSession")
            .field("layout_index", &self.catalog.index())
            .field("phase", &self.engine.phase())
            .field("score", &self.engine.score())
            .field("combo", &self.engine.combo())
            .field("seed", &self.seed)
            .field("store", &self.store.name())
            .finish()
    }
}
