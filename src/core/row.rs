//! Board row identifiers.

use serde::{Deserialize, Serialize};

/// One of the three rows ("streets") of a board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Row {
    Front,
    Middle,
    Back,
}

impl Row {
    /// All rows, front to back.
    pub const ALL: [Row; 3] = [Row::Front, Row::Middle, Row::Back];

    /// Number of cards that fill this row.
    #[must_use]
    pub const fn capacity(self) -> usize {
        match self {
            Row::Front => 3,
            Row::Middle | Row::Back => 5,
        }
    }

    /// Position in [`Row::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Row::Front => "front",
            Row::Middle => "middle",
            Row::Back => "back",
        }
    }
}

impl std::fmt::Display for Row {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
