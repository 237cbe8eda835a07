//! Grid cursor - turns key actions into session intents.

use crate::map::{Direction, KeyAction};
use crate::types::{CardId, Intent, LayoutSpec};

/// Highlighted cell on the board, row-major.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GridCursor {
    row: u16,
    col: u16,
}

impl GridCursor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn row(&self) -> u16 {
        self.row
    }

    pub fn col(&self) -> u16 {
        self.col
    }

    /// Card slot under the cursor.
    pub fn card_id(&self, layout: LayoutSpec) -> CardId {
        self.row as usize * layout.cols as usize + self.col as usize
    }

    /// Pull the cursor back inside `layout` after a board change.
    pub fn clamp_to(&mut self, layout: LayoutSpec) {
        self.row = self.row.min(layout.rows.saturating_sub(1));
        self.col = self.col.min(layout.cols.saturating_sub(1));
    }

    /// Move one cell, wrapping around the edges.
    pub fn step(&mut self, dir: Direction, layout: LayoutSpec) {
        if layout.rows == 0 || layout.cols == 0 {
            return;
        }
        match dir {
            Direction::Left => self.col = (self.col + layout.cols - 1) % layout.cols,
            Direction::Right => self.col = (self.col + 1) % layout.cols,
            Direction::Up => self.row = (self.row + layout.rows - 1) % layout.rows,
            Direction::Down => self.row = (self.row + 1) % layout.rows,
        }
    }

    /// Apply a key action. Movement stays local; everything else becomes an
    /// intent for the session.
    pub fn apply(&mut self, action: KeyAction, layout: LayoutSpec) -> Option<Intent> {
        match action {
            KeyAction::Move(dir) => {
                self.step(dir, layout);
                None
            }
            KeyAction::Select => Some(Intent::SelectCard(self.card_id(layout))),
            KeyAction::NewGame => Some(Intent::NewGame),
            KeyAction::NextLayout => Some(Intent::ChangeLayout),
            KeyAction::PreviousLayout => Some(Intent::PreviousLayout),
            KeyAction::Load => Some(Intent::Load),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_wraps() {
        let layout = LayoutSpec::new(3, 4);
        let mut cursor = GridCursor::new();

        cursor.step(Direction::Left, layout);
        assert_eq!((cursor.row(), cursor.col()), (0, 3));
        cursor.step(Direction::Up, layout);
        assert_eq!((cursor.row(), cursor.col()), (2, 3));
        cursor.step(Direction::Right, layout);
        cursor.step(Direction::Down, layout);
        assert_eq!((cursor.row(), cursor.col()), (0, 0));
    }

    #[test]
    fn test_select_maps_to_card_id() {
        let layout = LayoutSpec::new(3, 4);
        let mut cursor = GridCursor::new();
        cursor.step(Direction::Down, layout);
        cursor.step(Direction::Right, layout);
        cursor.step(Direction::Right, layout);

        assert_eq!(
            cursor.apply(KeyAction::Select, layout),
            Some(Intent::SelectCard(6))
        );
        assert_eq!(cursor.apply(KeyAction::Move(Direction::Up), layout), None);
        assert_eq!(
            cursor.apply(KeyAction::NextLayout, layout),
            Some(Intent::ChangeLayout)
        );
    }

    #[test]
    fn test_clamp_after_shrink() {
        let mut cursor = GridCursor::new();
        let big = LayoutSpec::new(5, 6);
        for _ in 0..4 {
            cursor.step(Direction::Down, big);
            cursor.step(Direction::Right, big);
        }
        cursor.clamp_to(LayoutSpec::new(2, 2));
        assert_eq!((cursor.row(), cursor.col()), (1, 1));
    }

    #[test]
    fn test_zero_layout_is_inert() {
        let mut cursor = GridCursor::new();
        cursor.step(Direction::Right, LayoutSpec::ZERO);
        cursor.clamp_to(LayoutSpec::ZERO);
        assert_eq!((cursor.row(), cursor.col()), (0, 0));
    }
}
