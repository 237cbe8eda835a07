//! GameView: maps a `GameSession` into text lines.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::GameSession;
use crate::types::{glyph_for, Card, CardFace, LayoutSpec, Phase};

/// Where the cursor sits, in board coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CursorView {
    pub row: u16,
    pub col: u16,
}

/// Text board renderer.
#[derive(Debug, Clone)]
pub struct GameView {
    /// Columns of padding between cards.
    gap: usize,
}

impl Default for GameView {
    fn default() -> Self {
        Self { gap: 1 }
    }
}

impl GameView {
    pub fn new(gap: usize) -> Self {
        Self { gap }
    }

    /// Render header, board and footer.
    pub fn render(&self, session: &GameSession, cursor: CursorView, status: &str) -> Vec<String> {
        let layout = session.layout();
        let mut lines = Vec::with_capacity(layout.rows as usize + 6);

        lines.push(format!(
            "Score : {}   Combo : {}   Layout {}x{} ({}/{})",
            session.score(),
            session.combo(),
            layout.rows,
            layout.cols,
            session.catalog().index() + 1,
            session.catalog().len().max(1),
        ));
        lines.push(phase_banner(session.phase()).to_string());
        lines.push(String::new());

        lines.extend(self.board_lines(layout, session.cards(), cursor));

        lines.push(String::new());
        lines.push(status.to_string());
        lines.push(
            "arrows/hjkl move  enter flip  n new  tab/[ layout  L load  q quit".to_string(),
        );
        lines
    }

    /// Board rows only.
    pub fn board_lines(&self, layout: LayoutSpec, cards: &[Card], cursor: CursorView) -> Vec<String> {
        let sep = " ".repeat(self.gap);
        (0..layout.rows)
            .map(|row| {
                (0..layout.cols)
                    .map(|col| {
                        let id = row as usize * layout.cols as usize + col as usize;
                        let face = cards.get(id).map(cell_text).unwrap_or_else(|| "   ".into());
                        if cursor.row == row && cursor.col == col {
                            format!(">{}<", &face[1..2])
                        } else {
                            face
                        }
                    })
                    .collect::<Vec<_>>()
                    .join(&sep)
            })
            .collect()
    }
}

/// Three-column cell text for a card.
fn cell_text(card: &Card) -> String {
    match card.face() {
        CardFace::FaceDown => "[#]".to_string(),
        CardFace::FaceUp => format!("[{}]", glyph_for(card.pair_key)),
        CardFace::Matched => format!("({})", glyph_for(card.pair_key)),
        CardFace::Removed => " . ".to_string(),
    }
}

fn phase_banner(phase: Phase) -> &'static str {
    match phase {
        Phase::Building => "Dealing...",
        Phase::Previewing => "Memorize the cards!",
        Phase::Playing => "Find the pairs",
        Phase::Resolving => "No match",
        Phase::Won => "You Win!",
    }
}
