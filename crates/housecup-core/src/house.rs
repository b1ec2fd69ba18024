// Known categories (houses)

use serde::{Deserialize, Serialize};

/// A house the points API reports on.
///
/// Storage tolerates any category string; only these four are aggregated
/// into API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum House {
    Gryff,
    Slyth,
    Raven,
    Huff,
}

impl House {
    /// All known houses, in response order
    pub const ALL: [House; 4] = [House::Gryff, House::Slyth, House::Raven, House::Huff];

    pub fn as_str(&self) -> &'static str {
        match self {
            House::Gryff => "Gryff",
            House::Slyth => "Slyth",
            House::Raven => "Raven",
            House::Huff => "Huff",
        }
    }

    /// Look up a house by its stored category name (case-sensitive).
    pub fn from_category(category: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|h| h.as_str() == category)
    }
}
