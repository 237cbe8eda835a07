//! Game configuration - timings, scoring table and layout presets

use crate::layout::{LayoutCatalog, DEFAULT_LAYOUTS};
use crate::scoring::ScoreRules;
use crate::types::{
    LayoutSpec, MATCH_REMOVE_MS, MISMATCH_FLIP_BACK_MS, PREVIEW_MS, WIN_ADVANCE_MS,
};

/// Delays for every timed transition, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timings {
    pub preview_ms: u32,
    pub mismatch_flip_back_ms: u32,
    pub match_remove_ms: u32,
    pub win_advance_ms: u32,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            preview_ms: PREVIEW_MS,
            mismatch_flip_back_ms: MISMATCH_FLIP_BACK_MS,
            match_remove_ms: MATCH_REMOVE_MS,
            win_advance_ms: WIN_ADVANCE_MS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub timings: Timings,
    pub rules: ScoreRules,
    pub layouts: Vec<LayoutSpec>,
    pub wraparound: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            timings: Timings::default(),
            rules: ScoreRules::default(),
            layouts: DEFAULT_LAYOUTS.to_vec(),
            wraparound: true,
        }
    }
}

impl GameConfig {
    pub fn catalog(&self) -> LayoutCatalog {
        LayoutCatalog::new(self.layouts.clone(), self.wraparound)
    }
}
