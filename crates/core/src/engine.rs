//! Match engine - card flip state machine and pair resolution
//!
//! The engine owns one board at a time. It accepts card selections, resolves
//! pairs once two cards are face up, keeps score/combo, detects the win and
//! drives every delayed transition through a [`TimerQueue`].
//!
//! Time only moves through [`MatchEngine::tick`]. Each board gets a fresh
//! generation number on [`MatchEngine::rebuild`]/[`MatchEngine::dispose`];
//! timers issued for an older generation are dropped when they fire, so a
//! flip-back scheduled before a new deal can never touch the new cards.

use std::collections::BTreeSet;

use arrayvec::ArrayVec;
use tracing::trace;

use crate::config::{GameConfig, Timings};
use crate::scoring::{ScoreRules, Scoreboard};
use crate::timers::{FiredTimer, TimerKind, TimerQueue};
use crate::types::{Card, CardId, GameEvent, LayoutSpec, PairKey, Phase};

/// What a selection did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// The card turned face up and waits for a partner.
    Revealed(CardId),
    /// A face-up card was selected again and turned back down.
    Hidden(CardId),
    Matched {
        pair_key: PairKey,
        reward: u32,
        won: bool,
    },
    Mismatched {
        first: CardId,
        second: CardId,
        penalty: u32,
    },
}

impl Resolution {
    /// Whether score or combo changed.
    pub fn affects_score(&self) -> bool {
        matches!(
            self,
            Resolution::Matched { .. } | Resolution::Mismatched { .. }
        )
    }
}

/// Result of advancing the clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickOutcome {
    /// At least one live timer mutated the board.
    pub changed: bool,
    /// The post-win delay elapsed; the owner should deal the next layout.
    pub advance_layout: bool,
}

#[derive(Debug, Clone)]
pub struct MatchEngine {
    layout: LayoutSpec,
    cards: Vec<Card>,
    selection: ArrayVec<CardId, 2>,
    matched: BTreeSet<PairKey>,
    pair_count: usize,
    phase: Phase,
    generation: u32,
    scoreboard: Scoreboard,
    rules: ScoreRules,
    timings: Timings,
    timers: TimerQueue,
    fired: Vec<FiredTimer>,
    events: Vec<GameEvent>,
}

impl MatchEngine {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            layout: LayoutSpec::ZERO,
            cards: Vec::new(),
            selection: ArrayVec::new(),
            matched: BTreeSet::new(),
            pair_count: 0,
            phase: Phase::Building,
            generation: 0,
            scoreboard: Scoreboard::default(),
            rules: config.rules,
            timings: config.timings,
            timers: TimerQueue::new(),
            fired: Vec::new(),
            events: Vec::new(),
        }
    }

    pub fn layout(&self) -> LayoutSpec {
        self.layout
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn card(&self, id: CardId) -> Option<&Card> {
        self.cards.get(id)
    }

    /// Face-up, unmatched cards awaiting resolution (at most two).
    pub fn selection(&self) -> &[CardId] {
        &self.selection
    }

    pub fn matched(&self) -> &BTreeSet<PairKey> {
        &self.matched
    }

    pub fn pair_count(&self) -> usize {
        self.pair_count
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    pub fn scoreboard(&self) -> Scoreboard {
        self.scoreboard
    }

    pub fn score(&self) -> u32 {
        self.scoreboard.score
    }

    pub fn combo(&self) -> u32 {
        self.scoreboard.combo
    }

    pub fn timings(&self) -> Timings {
        self.timings
    }

    /// Number of timers not yet fired (stale ones included).
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Milliseconds until the next timer fires.
    pub fn next_timer_in(&self) -> Option<u64> {
        self.timers.next_due_in()
    }

    pub fn is_won(&self) -> bool {
        self.pair_count > 0 && self.matched.len() >= self.pair_count
    }

    /// Take every event emitted since the last call.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Tear the current board down. Every outstanding timer becomes stale.
    pub fn dispose(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.cards.clear();
        self.selection.clear();
        self.matched.clear();
        self.pair_count = 0;
        self.set_phase(Phase::Building);
    }

    /// Lay out a board from `deck`.
    ///
    /// Cards whose key is in `matched` come back matched and face up; the
    /// rest start face down. Keys in `matched` that are not in the deck are
    /// ignored. The engine is left in `Building`; call
    /// [`begin_preview`](Self::begin_preview) or [`begin_play`](Self::begin_play).
    pub fn rebuild(
        &mut self,
        layout: LayoutSpec,
        deck: &[PairKey],
        matched: &BTreeSet<PairKey>,
        scoreboard: Scoreboard,
    ) {
        self.dispose();

        self.layout = layout;
        self.scoreboard = scoreboard;
        self.pair_count = deck.len() / 2;
        self.cards = deck
            .iter()
            .enumerate()
            .map(|(id, &key)| {
                let mut card = Card::new(id, key);
                if matched.contains(&key) {
                    card.revealed = true;
                    card.matched = true;
                }
                card
            })
            .collect();
        self.matched = self
            .cards
            .iter()
            .filter(|c| c.matched)
            .map(|c| c.pair_key)
            .collect();

        self.emit(GameEvent::BoardRebuilt {
            layout,
            cards: self.cards.clone(),
        });
        self.emit(GameEvent::ScoreChanged {
            score: self.scoreboard.score,
            combo: self.scoreboard.combo,
        });
    }

    /// Reveal every unmatched card and schedule the hide.
    pub fn begin_preview(&mut self) {
        for i in 0..self.cards.len() {
            let card = &mut self.cards[i];
            if !card.matched && !card.revealed {
                card.revealed = true;
                self.events.push(GameEvent::CardRevealed(i));
            }
        }
        self.set_phase(Phase::Previewing);
        self.timers
            .schedule(self.timings.preview_ms, self.generation, TimerKind::PreviewEnd);
    }

    /// Enable play without a preview (restored boards).
    pub fn begin_play(&mut self) {
        if self.is_won() {
            self.enter_won();
        } else {
            self.set_phase(Phase::Playing);
        }
    }

    /// Handle a player selecting `id`.
    ///
    /// Returns `None` when the selection is ignored: unknown or matched
    /// card, or the engine is not accepting input.
    pub fn select(&mut self, id: CardId) -> Option<Resolution> {
        if !self.phase.accepts_input() {
            return None;
        }
        let card = self.cards.get_mut(id)?;
        if card.matched || card.removed {
            return None;
        }

        if card.revealed {
            card.revealed = false;
            self.selection.retain(|c| *c != id);
            self.emit(GameEvent::CardHidden(id));
            return Some(Resolution::Hidden(id));
        }

        if self.selection.is_full() {
            // Unreachable through play: a full selection resolves immediately.
            return None;
        }
        card.revealed = true;
        if !self.selection.contains(&id) {
            self.selection.push(id);
        }
        self.emit(GameEvent::CardRevealed(id));

        if self.selection.len() == 2 {
            return Some(self.resolve_pair());
        }
        Some(Resolution::Revealed(id))
    }

    fn resolve_pair(&mut self) -> Resolution {
        let first = self.selection[0];
        let second = self.selection[1];
        self.selection.clear();

        let key = self.cards[first].pair_key;
        if first != second && key == self.cards[second].pair_key {
            for id in [first, second] {
                self.cards[id].matched = true;
            }
            self.matched.insert(key);
            let reward = self.scoreboard.record_match(&self.rules);

            self.emit(GameEvent::CardMatched(key));
            self.emit_score();
            self.timers.schedule(
                self.timings.match_remove_ms,
                self.generation,
                TimerKind::Remove(first, second),
            );

            let won = self.is_won();
            if won {
                self.enter_won();
            }
            Resolution::Matched {
                pair_key: key,
                reward,
                won,
            }
        } else {
            let penalty = self.scoreboard.record_mismatch(&self.rules);

            self.emit(GameEvent::PairMismatched(first, second));
            self.emit_score();
            self.set_phase(Phase::Resolving);
            self.timers.schedule(
                self.timings.mismatch_flip_back_ms,
                self.generation,
                TimerKind::FlipBack(first, second),
            );
            Resolution::Mismatched {
                first,
                second,
                penalty,
            }
        }
    }

    fn enter_won(&mut self) {
        self.set_phase(Phase::Won);
        self.emit(GameEvent::GameWon {
            final_score: self.scoreboard.score,
        });
        self.timers
            .schedule(self.timings.win_advance_ms, self.generation, TimerKind::WinAdvance);
    }

    /// Advance the clock by `elapsed_ms` and apply every live timer that
    /// came due.
    pub fn tick(&mut self, elapsed_ms: u32) -> TickOutcome {
        let mut fired = std::mem::take(&mut self.fired);
        self.timers.advance(elapsed_ms, &mut fired);

        let mut outcome = TickOutcome::default();
        for timer in fired.drain(..) {
            if timer.generation != self.generation {
                trace!(
                    kind = ?timer.kind,
                    stamp = timer.generation,
                    current = self.generation,
                    "dropping stale timer"
                );
                continue;
            }
            match timer.kind {
                TimerKind::PreviewEnd => outcome.changed |= self.end_preview(),
                TimerKind::FlipBack(a, b) => outcome.changed |= self.flip_back(a, b),
                TimerKind::Remove(a, b) => outcome.changed |= self.remove_pair(a, b),
                TimerKind::WinAdvance => {
                    if self.phase == Phase::Won {
                        outcome.advance_layout = true;
                    }
                }
            }
        }
        self.fired = fired;
        outcome
    }

    fn end_preview(&mut self) -> bool {
        if self.phase != Phase::Previewing {
            return false;
        }
        for i in 0..self.cards.len() {
            let card = &mut self.cards[i];
            if !card.matched && card.revealed {
                card.revealed = false;
                self.events.push(GameEvent::CardHidden(i));
            }
        }
        self.selection.clear();
        self.set_phase(Phase::Playing);
        true
    }

    fn flip_back(&mut self, a: CardId, b: CardId) -> bool {
        let mut changed = false;
        for id in [a, b] {
            let Some(card) = self.cards.get_mut(id) else {
                continue;
            };
            if card.matched || !card.revealed {
                continue;
            }
            card.revealed = false;
            self.selection.retain(|c| *c != id);
            self.emit(GameEvent::CardHidden(id));
            changed = true;
        }
        if self.phase == Phase::Resolving {
            self.set_phase(Phase::Playing);
            changed = true;
        }
        changed
    }

    fn remove_pair(&mut self, a: CardId, b: CardId) -> bool {
        let mut changed = false;
        for id in [a, b] {
            let Some(card) = self.cards.get_mut(id) else {
                continue;
            };
            if !card.matched || card.removed {
                continue;
            }
            card.removed = true;
            self.emit(GameEvent::CardRemoved(id));
            changed = true;
        }
        changed
    }

    fn set_phase(&mut self, phase: Phase) {
        if self.phase != phase {
            self.phase = phase;
            self.emit(GameEvent::PhaseChanged(phase));
        }
    }

    fn emit_score(&mut self) {
        self.emit(GameEvent::ScoreChanged {
            score: self.scoreboard.score,
            combo: self.scoreboard.combo,
        });
    }
}

impl Default for MatchEngine {
    fn default() -> Self {
        Self::new(&GameConfig::default())
    }
}
