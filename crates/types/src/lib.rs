//! Shared types and constants for the pairs game.
//!
//! This crate is dependency-free and is the common vocabulary of every other
//! crate in the workspace: board ids, layouts, phases, presentation events and
//! the default timing/scoring tables.

/// Fixed timestep interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// How long every card stays face up when a new board is dealt.
pub const PREVIEW_MS: u32 = 5000;

/// Delay before a mismatched pair flips back face down.
pub const MISMATCH_FLIP_BACK_MS: u32 = 2000;

/// Delay before a matched pair is cleared from the board.
pub const MATCH_REMOVE_MS: u32 = 2000;

/// Delay between the win and dealing the next layout.
pub const WIN_ADVANCE_MS: u32 = 1500;

/// Points for a match at combo tier 0.
pub const MATCH_BASE_SCORE: u32 = 100;

/// Consecutive matches needed to raise the multiplier by one.
pub const COMBO_TIER_SIZE: u32 = 3;

/// Flat deduction for a mismatch (score never drops below zero).
pub const MISMATCH_PENALTY: u32 = 10;

/// Index of a card slot on the current board.
pub type CardId = usize;

/// Identifier shared by exactly two cards that match.
pub type PairKey = u32;

/// A rows × cols board dimension preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct LayoutSpec {
    pub rows: u16,
    pub cols: u16,
}

impl LayoutSpec {
    /// Sentinel returned by an empty catalog.
    pub const ZERO: LayoutSpec = LayoutSpec { rows: 0, cols: 0 };

    pub const fn new(rows: u16, cols: u16) -> Self {
        Self { rows, cols }
    }

    pub fn cell_count(&self) -> usize {
        self.rows as usize * self.cols as usize
    }

    /// Number of pairs dealt for this layout (an odd cell is left empty).
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_pairs_types::LayoutSpec;
    ///
    /// assert_eq!(LayoutSpec::new(2, 2).pair_count(), 2);
    /// assert_eq!(LayoutSpec::new(3, 3).pair_count(), 4);
    /// ```
    pub fn pair_count(&self) -> usize {
        self.cell_count() / 2
    }
}

/// Face letter drawn for a pair key.
pub fn glyph_for(key: PairKey) -> char {
    (b'A' + (key % 26) as u8) as char
}

/// Visible state of a single card.
///
/// `FaceDown → FaceUp → {Matched | FaceDown}`; a matched card becomes
/// `Removed` once its removal delay elapses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CardFace {
    FaceDown,
    FaceUp,
    Matched,
    Removed,
}

/// A card on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Card {
    pub id: CardId,
    pub pair_key: PairKey,
    pub revealed: bool,
    pub matched: bool,
    pub removed: bool,
}

impl Card {
    pub fn new(id: CardId, pair_key: PairKey) -> Self {
        Self {
            id,
            pair_key,
            revealed: false,
            matched: false,
            removed: false,
        }
    }

    pub fn face(&self) -> CardFace {
        if self.removed {
            CardFace::Removed
        } else if self.matched {
            CardFace::Matched
        } else if self.revealed {
            CardFace::FaceUp
        } else {
            CardFace::FaceDown
        }
    }
}

/// Session-wide phase.
///
/// `Building → Previewing → Playing → Resolving → (Won | Playing)`.
/// Player selections are only accepted while `Playing`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Building,
    Previewing,
    Playing,
    Resolving,
    Won,
}

impl Phase {
    pub fn accepts_input(&self) -> bool {
        matches!(self, Phase::Playing)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Building => "building",
            Phase::Previewing => "previewing",
            Phase::Playing => "playing",
            Phase::Resolving => "resolving",
            Phase::Won => "won",
        }
    }
}

/// How a session should come up.
///
/// Passed explicitly into the session instead of living in a process-wide flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BootMode {
    /// Resume a save if one exists, otherwise deal a new game.
    #[default]
    AutoLoad,
    NewGame,
    LoadGame,
}

impl BootMode {
    /// Parse a boot mode from a CLI word (case-insensitive).
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "auto" => Some(BootMode::AutoLoad),
            "new" => Some(BootMode::NewGame),
            "load" => Some(BootMode::LoadGame),
            _ => None,
        }
    }
}

/// Player and shell intents consumed by the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    SelectCard(CardId),
    NewGame,
    ChangeLayout,
    PreviousLayout,
    Load,
}

/// State-change notifications for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    CardRevealed(CardId),
    CardHidden(CardId),
    CardMatched(PairKey),
    CardRemoved(CardId),
    PairMismatched(CardId, CardId),
    ScoreChanged { score: u32, combo: u32 },
    GameWon { final_score: u32 },
    BoardRebuilt { layout: LayoutSpec, cards: Vec<Card> },
    PhaseChanged(Phase),
    LoadFailed,
    SaveFailed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_rule_table() {
        assert_eq!(PREVIEW_MS, 5000);
        assert_eq!(MISMATCH_FLIP_BACK_MS, 2000);
        assert_eq!(MATCH_REMOVE_MS, 2000);
        assert_eq!(WIN_ADVANCE_MS, 1500);

        assert_eq!(MATCH_BASE_SCORE, 100);
        assert_eq!(COMBO_TIER_SIZE, 3);
        assert_eq!(MISMATCH_PENALTY, 10);
    }

    #[test]
    fn layout_pair_count_discards_odd_slot() {
        assert_eq!(LayoutSpec::new(3, 3).pair_count(), 4);
        assert_eq!(LayoutSpec::new(5, 6).pair_count(), 15);
        assert_eq!(LayoutSpec::ZERO.pair_count(), 0);
    }

    #[test]
    fn glyphs_wrap_after_z() {
        assert_eq!(glyph_for(0), 'A');
        assert_eq!(glyph_for(25), 'Z');
        assert_eq!(glyph_for(26), 'A');
    }

    #[test]
    fn boot_mode_parse() {
        assert_eq!(BootMode::from_str("LOAD"), Some(BootMode::LoadGame));
        assert_eq!(BootMode::from_str("new"), Some(BootMode::NewGame));
        assert_eq!(BootMode::from_str("auto"), Some(BootMode::AutoLoad));
        assert_eq!(BootMode::from_str("resume"), None);
    }
}
