//! Timer queue - delayed transitions stamped with a board generation
//!
//! Every scheduled transition records the board generation it was issued
//! for. The queue itself never cancels anything; the engine compares the
//! stamp with its current generation when a timer fires and drops stale
//! ones.

use crate::types::CardId;

/// A delayed transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    /// End of the reveal-all window.
    PreviewEnd,
    /// Turn a mismatched pair face down again.
    FlipBack(CardId, CardId),
    /// Clear a matched pair from the board.
    Remove(CardId, CardId),
    /// Deal the next layout after a win.
    WinAdvance,
}

/// A timer that came due.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FiredTimer {
    pub generation: u32,
    pub kind: TimerKind,
}

#[derive(Debug, Clone, Copy)]
struct Scheduled {
    due_ms: u64,
    seq: u64,
    generation: u32,
    kind: TimerKind,
}

#[derive(Debug, Clone, Default)]
pub struct TimerQueue {
    now_ms: u64,
    next_seq: u64,
    pending: Vec<Scheduled>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Milliseconds elapsed since the queue was created.
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn schedule(&mut self, delay_ms: u32, generation: u32, kind: TimerKind) {
        let seq = self.next_seq;
        self.next_seq = self.next_seq.wrapping_add(1);
        self.pending.push(Scheduled {
            due_ms: self.now_ms + delay_ms as u64,
            seq,
            generation,
            kind,
        });
    }

    /// Milliseconds until the earliest pending timer, if any.
    pub fn next_due_in(&self) -> Option<u64> {
        self.pending
            .iter()
            .map(|s| s.due_ms.saturating_sub(self.now_ms))
            .min()
    }

    /// Advance the clock and move every due timer into `out`.
    ///
    /// Timers come out ordered by due time, then by scheduling order.
    pub fn advance(&mut self, elapsed_ms: u32, out: &mut Vec<FiredTimer>) {
        self.now_ms += elapsed_ms as u64;
        let now = self.now_ms;

        let mut due: Vec<Scheduled> = Vec::new();
        self.pending.retain(|s| {
            if s.due_ms <= now {
                due.push(*s);
                false
            } else {
                true
            }
        });
        due.sort_by_key(|s| (s.due_ms, s.seq));

        out.extend(due.into_iter().map(|s| FiredTimer {
            generation: s.generation,
            kind: s.kind,
        }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_due_yet() {
        let mut q = TimerQueue::new();
        q.schedule(100, 1, TimerKind::PreviewEnd);

        let mut out = Vec::new();
        q.advance(99, &mut out);
        assert!(out.is_empty());
        assert_eq!(q.next_due_in(), Some(1));

        q.advance(1, &mut out);
        assert_eq!(
            out,
            vec![FiredTimer {
                generation: 1,
                kind: TimerKind::PreviewEnd
            }]
        );
        assert!(q.is_empty());
    }

    #[test]
    fn test_fire_order() {
        let mut q = TimerQueue::new();
        q.schedule(50, 1, TimerKind::Remove(0, 1));
        q.schedule(20, 1, TimerKind::FlipBack(2, 3));
        q.schedule(50, 2, TimerKind::WinAdvance);

        let mut out = Vec::new();
        q.advance(1000, &mut out);
        let kinds: Vec<TimerKind> = out.iter().map(|f| f.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TimerKind::FlipBack(2, 3),
                TimerKind::Remove(0, 1),
                TimerKind::WinAdvance
            ]
        );
    }

    #[test]
    fn test_zero_delay_fires_on_next_advance() {
        let mut q = TimerQueue::new();
        q.schedule(0, 7, TimerKind::PreviewEnd);

        let mut out = Vec::new();
        q.advance(0, &mut out);
        assert_eq!(out.len(), 1);
    }
}
