//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains every rule of the pairs game: layout presets, deck
//! dealing, the flip/match state machine, scoring, timed transitions and the
//! persisted snapshot shape. It performs no I/O itself; storage is reached
//! through the [`SnapshotStore`] trait and time only advances when the
//! caller invokes `tick`.
//!
//! # Module Structure
//!
//! - [`layout`]: ordered board presets with a wrapping cursor
//! - [`rng`]: seeded LCG with forward Fisher-Yates shuffling
//! - [`deck`]: paired deck generation and validation
//! - [`scoring`]: match rewards with combo tiers, mismatch penalty
//! - [`timers`]: generation-stamped delayed transitions
//! - [`engine`]: the card flip / pair resolution state machine
//! - [`session`]: orchestration, boot modes and persistence
//! - [`snapshot`] / [`persist`]: saved progress and its storage gateway
//!
//! # Example
//!
//! ```
//! use tui_pairs_core::{GameConfig, GameSession, MemoryStore};
//! use tui_pairs_core::types::{BootMode, Phase};
//!
//! let mut session = GameSession::new(GameConfig::default(), Box::new(MemoryStore::new()), 42);
//! session.boot(BootMode::NewGame);
//! assert_eq!(session.phase(), Phase::Previewing);
//!
//! // Preview ends after 5 seconds of ticks.
//! session.tick(5000);
//! assert_eq!(session.phase(), Phase::Playing);
//! ```

pub mod config;
pub mod deck;
pub mod engine;
pub mod layout;
pub mod persist;
pub mod rng;
pub mod scoring;
pub mod session;
pub mod snapshot;
pub mod timers;

pub use tui_pairs_types as types;

// Re-export commonly used types for convenience
pub use config::{GameConfig, Timings};
pub use deck::{generate_deck, validate_deck, DeckError};
pub use engine::{MatchEngine, Resolution, TickOutcome};
pub use layout::{LayoutCatalog, DEFAULT_LAYOUTS};
pub use persist::{MemoryStore, SnapshotStore, StoreError, StoreResult};
pub use rng::SimpleRng;
pub use scoring::{ScoreRules, Scoreboard};
pub use session::{BootOutcome, GameSession};
pub use snapshot::ProgressSnapshot;
pub use timers::{TimerKind, TimerQueue};
