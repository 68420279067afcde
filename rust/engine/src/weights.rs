use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::hand_class::HandClass;

/// Game mode selecting which starting-hand whitelist and weights apply.
/// `SuperDense` is the tighter table: fewer classes, heavier weights on
/// premium hands.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum GameMode {
    #[serde(rename = "dense")]
    Dense,
    #[serde(rename = "superDense")]
    SuperDense,
}

/// Per-mode weights for one starting-hand class. A weight of zero means the
/// class is never dealt in that mode.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ModeWeights {
    pub dense: u32,
    pub super_dense: u32,
}

/// Mapping from starting-hand class to per-mode weight. Classes absent from
/// the table are treated as weight zero everywhere.
#[derive(Debug, Clone)]
pub struct WeightTable {
    entries: HashMap<HandClass, ModeWeights>,
}

impl WeightTable {
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (HandClass, ModeWeights)>,
    {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    /// An empty table: nothing is ever allowed. Useful for exercising the
    /// dealer's zero-weight failure path.
    pub fn empty() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    pub fn weight(&self, class: &HandClass, mode: GameMode) -> u32 {
        match self.entries.get(class) {
            Some(w) => match mode {
                GameMode::Dense => w.dense,
                GameMode::SuperDense => w.super_dense,
            },
            None => 0,
        }
    }

    pub fn is_allowed(&self, class: &HandClass, mode: GameMode) -> bool {
        self.weight(class, mode) > 0
    }

    /// The built-in Dense Deck whitelist: pocket pairs, broadway combos,
    /// suited connectors, and wheel-ace suited hands. The super-dense column
    /// prunes the bottom of the range and boosts premium classes.
    pub fn dense_deck_default() -> Self {
        const TABLE: &[(&str, u32, u32)] = &[
            // pairs
            ("AA", 4, 6),
            ("KK", 4, 6),
            ("QQ", 4, 5),
            ("JJ", 3, 4),
            ("TT", 3, 4),
            ("99", 3, 3),
            ("88", 3, 3),
            ("77", 2, 2),
            ("66", 2, 2),
            ("55", 2, 2),
            ("44", 2, 0),
            ("33", 2, 0),
            ("22", 2, 0),
            // broadway suited
            ("AKs", 4, 6),
            ("AQs", 3, 5),
            ("AJs", 3, 4),
            ("ATs", 3, 3),
            ("KQs", 3, 4),
            ("KJs", 2, 3),
            ("KTs", 2, 2),
            ("QJs", 2, 3),
            ("QTs", 2, 2),
            ("JTs", 2, 3),
            // broadway offsuit
            ("AKo", 3, 4),
            ("AQo", 2, 3),
            ("AJo", 2, 2),
            ("ATo", 1, 0),
            ("KQo", 2, 2),
            ("KJo", 1, 0),
            ("KTo", 1, 0),
            ("QJo", 1, 0),
            ("QTo", 1, 0),
            ("JTo", 1, 0),
            // suited connectors
            ("T9s", 2, 2),
            ("98s", 2, 2),
            ("87s", 1, 2),
            ("76s", 1, 2),
            ("65s", 1, 0),
            ("54s", 1, 0),
            // wheel-ace suited
            ("A5s", 1, 2),
            ("A4s", 1, 2),
            ("A3s", 1, 0),
            ("A2s", 1, 0),
        ];

        Self::from_entries(TABLE.iter().map(|&(key, dense, super_dense)| {
            (
                HandClass::from(key),
                ModeWeights {
                    dense,
                    super_dense,
                },
            )
        }))
    }
}

impl Default for WeightTable {
    fn default() -> Self {
        Self::dense_deck_default()
    }
}
