//! Persisted progress snapshot
//!
//! The on-disk field names are camelCase:
//!
//! ```json
//! {"layoutIndex":1,"score":300,"combo":2,"seed":48213,"deckIds":[0,1,0,1],"matchedIds":[1]}
//! ```

use serde::{Deserialize, Serialize};

use crate::deck::{validate_deck, DeckError};
use crate::types::PairKey;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressSnapshot {
    /// Cursor into the layout catalog; clamped on restore.
    pub layout_index: i64,
    pub score: u32,
    pub combo: u32,
    /// Opaque replay token. The deck is stored verbatim and never re-derived
    /// from it.
    pub seed: u32,
    #[serde(default)]
    pub deck_ids: Vec<PairKey>,
    #[serde(default)]
    pub matched_ids: Vec<PairKey>,
}

impl ProgressSnapshot {
    /// Check the deck can be rebuilt into a playable board.
    pub fn validate(&self) -> Result<(), DeckError> {
        validate_deck(&self.deck_ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_requires_deck() {
        let snapshot = ProgressSnapshot::default();
        assert_eq!(snapshot.validate(), Err(DeckError::Empty));

        let snapshot = ProgressSnapshot {
            deck_ids: vec![1, 0, 0, 1],
            ..ProgressSnapshot::default()
        };
        assert_eq!(snapshot.validate(), Ok(()));
    }

    #[test]
    fn test_json_field_names() {
        let snapshot = ProgressSnapshot {
            layout_index: 1,
            score: 300,
            combo: 2,
            seed: 48213,
            deck_ids: vec![0, 1, 0, 1],
            matched_ids: vec![1],
        };
        let json = serde_json::to_string(&snapshot).unwrap();
        assert_eq!(
            json,
            r#"{"layoutIndex":1,"score":300,"combo":2,"seed":48213,"deckIds":[0,1,0,1],"matchedIds":[1]}"#
        );
        let back: ProgressSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snapshot);
    }

    #[test]
    fn test_missing_lists_default_to_empty() {
        let snapshot: ProgressSnapshot =
            serde_json::from_str(r#"{"layoutIndex":0,"score":10,"combo":0,"seed":3}"#).unwrap();
        assert!(snapshot.deck_ids.is_empty());
        assert!(snapshot.matched_ids.is_empty());
        assert_eq!(snapshot.validate(), Err(DeckError::Empty));
    }
}
