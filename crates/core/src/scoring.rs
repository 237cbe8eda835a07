//! Scoring module - match rewards, combo tiers and the mismatch penalty
//!
//! Rules:
//! - A match increments the combo and awards `match_base * multiplier`, where
//!   the multiplier grows by one for every full tier of matches already
//!   chained before this one (combo 1..=3 pay x1, 4..=6 pay x2, ...).
//! - A mismatch resets the combo and deducts a flat penalty, floored at 0.

use crate::types::{COMBO_TIER_SIZE, MATCH_BASE_SCORE, MISMATCH_PENALTY};

/// Tunable scoring table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreRules {
    pub match_base: u32,
    /// Consecutive matches per multiplier step. Zero disables the bonus.
    pub combo_tier: u32,
    pub mismatch_penalty: u32,
}

impl Default for ScoreRules {
    fn default() -> Self {
        Self {
            match_base: MATCH_BASE_SCORE,
            combo_tier: COMBO_TIER_SIZE,
            mismatch_penalty: MISMATCH_PENALTY,
        }
    }
}

impl ScoreRules {
    /// Multiplier for a match that brought the combo to `combo`.
    pub fn multiplier(&self, combo: u32) -> u32 {
        if self.combo_tier == 0 {
            return 1;
        }
        1 + combo.saturating_sub(1) / self.combo_tier
    }

    /// Points for a match that brought the combo to `combo`.
    pub fn match_reward(&self, combo: u32) -> u32 {
        self.match_base.saturating_mul(self.multiplier(combo))
    }
}

/// Running score and combo counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Scoreboard {
    pub score: u32,
    pub combo: u32,
}

impl Scoreboard {
    pub fn new(score: u32, combo: u32) -> Self {
        Self { score, combo }
    }

    /// Apply a match. Returns the points awarded.
    pub fn record_match(&mut self, rules: &ScoreRules) -> u32 {
        self.combo = self.combo.saturating_add(1);
        let reward = rules.match_reward(self.combo);
        self.score = self.score.saturating_add(reward);
        reward
    }

    /// Apply a mismatch. Returns the points actually deducted.
    pub fn record_mismatch(&mut self, rules: &ScoreRules) -> u32 {
        self.combo = 0;
        let before = self.score;
        self.score = self.score.saturating_sub(rules.mismatch_penalty);
        before - self.score
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multiplier_tiers() {
        let rules = ScoreRules::default();
        assert_eq!(rules.multiplier(1), 1);
        assert_eq!(rules.multiplier(3), 1);
        assert_eq!(rules.multiplier(4), 2);
        assert_eq!(rules.multiplier(6), 2);
        assert_eq!(rules.multiplier(7), 3);
    }

    #[test]
    fn test_combo_sequence_rewards() {
        let rules = ScoreRules::default();
        let mut board = Scoreboard::default();

        let rewards: Vec<u32> = (0..7).map(|_| board.record_match(&rules)).collect();
        assert_eq!(rewards, vec![100, 100, 100, 200, 200, 200, 300]);
        assert_eq!(board.combo, 7);
        assert_eq!(board.score, 1200);
    }

    #[test]
    fn test_mismatch_floors_at_zero() {
        let rules = ScoreRules::default();
        let mut board = Scoreboard::new(5, 2);
        assert_eq!(board.record_mismatch(&rules), 5);
        assert_eq!(board, Scoreboard::new(0, 0));

        let mut board = Scoreboard::new(250, 4);
        assert_eq!(board.record_mismatch(&rules), 10);
        assert_eq!(board.score, 240);
    }

    #[test]
    fn test_zero_tier_disables_bonus() {
        let rules = ScoreRules {
            combo_tier: 0,
            ..ScoreRules::default()
        };
        assert_eq!(rules.match_reward(30), 100);
    }

    proptest::proptest! {
        #[test]
        fn prop_score_tracks_rewards_and_penalties(outcomes in proptest::collection::vec(proptest::bool::ANY, 0..64)) {
            let rules = ScoreRules::default();
            let mut board = Scoreboard::default();
            let mut expected: u32 = 0;
            let mut streak: u32 = 0;

            for matched in outcomes {
                if matched {
                    streak += 1;
                    expected += 100 * (1 + (streak - 1) / 3);
                    board.record_match(&rules);
                } else {
                    streak = 0;
                    expected = expected.saturating_sub(10);
                    board.record_mismatch(&rules);
                }
                proptest::prop_assert_eq!(board.score, expected);
                proptest::prop_assert_eq!(board.combo, streak);
            }
        }
    }
}
