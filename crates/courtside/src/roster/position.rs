// Basketball positions used for roster slot assignment.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The five roster slots a team must fill, in display order.
///
/// The serialized form is the label the backend stores in its `posicion`
/// column, which is also the path segment of the per-position endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    #[serde(rename = "Base")]
    PointGuard,
    #[serde(rename = "Escolta")]
    ShootingGuard,
    #[serde(rename = "Alero")]
    SmallForward,
    #[serde(rename = "Ala-pívot")]
    PowerForward,
    #[serde(rename = "Pívot")]
    Center,
}

/// Number of roster slots in a team.
pub const SLOT_COUNT: usize = 5;

impl Position {
    /// All positions in slot order. The index of a position in this array is
    /// its index into a team's pick list.
    pub const ALL: [Position; SLOT_COUNT] = [
        Position::PointGuard,
        Position::ShootingGuard,
        Position::SmallForward,
        Position::PowerForward,
        Position::Center,
    ];

    /// Parse a backend label into a Position.
    ///
    /// Also accepts the short English abbreviations shown in the TUI
    /// ("PG", "SG", "SF", "PF", "C"), case-insensitively.
    pub fn from_label(s: &str) -> Option<Self> {
        match s {
            "Base" => return Some(Position::PointGuard),
            "Escolta" => return Some(Position::ShootingGuard),
            "Alero" => return Some(Position::SmallForward),
            "Ala-pívot" => return Some(Position::PowerForward),
            "Pívot" => return Some(Position::Center),
            _ => {}
        }
        match s.to_uppercase().as_str() {
            "PG" => Some(Position::PointGuard),
            "SG" => Some(Position::ShootingGuard),
            "SF" => Some(Position::SmallForward),
            "PF" => Some(Position::PowerForward),
            "C" => Some(Position::Center),
            _ => None,
        }
    }

    /// The label the backend uses for this position.
    pub fn label(&self) -> &'static str {
        match self {
            Position::PointGuard => "Base",
            Position::ShootingGuard => "Escolta",
            Position::SmallForward => "Alero",
            Position::PowerForward => "Ala-pívot",
            Position::Center => "Pívot",
        }
    }

    /// Short abbreviation for compact display.
    pub fn abbrev(&self) -> &'static str {
        match self {
            Position::PointGuard => "PG",
            Position::ShootingGuard => "SG",
            Position::SmallForward => "SF",
            Position::PowerForward => "PF",
            Position::Center => "C",
        }
    }

    /// Slot index of this position within a team.
    pub fn index(&self) -> usize {
        match self {
            Position::PointGuard => 0,
            Position::ShootingGuard => 1,
            Position::SmallForward => 2,
            Position::PowerForward => 3,
            Position::Center => 4,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_matches_slot_order() {
        for (i, pos) in Position::ALL.iter().enumerate() {
            assert_eq!(pos.index(), i);
        }
    }

    #[test]
    fn labels_parse_back() {
        for pos in Position::ALL {
            assert_eq!(Position::from_label(pos.label()), Some(pos));
            assert_eq!(Position::from_label(pos.abbrev()), Some(pos));
        }
    }

    #[test]
    fn abbreviations_are_case_insensitive() {
        assert_eq!(Position::from_label("pf"), Some(Position::PowerForward));
        assert_eq!(Position::from_label("c"), Some(Position::Center));
    }

    #[test]
    fn unknown_label_is_none() {
        assert_eq!(Position::from_label("Pitcher"), None);
        assert_eq!(Position::from_label(""), None);
    }

    #[test]
    fn serializes_as_backend_label() {
        let json = serde_json::to_string(&Position::PowerForward).unwrap();
        assert_eq!(json, "\"Ala-pívot\"");
        let back: Position = serde_json::from_str("\"Escolta\"").unwrap();
        assert_eq!(back, Position::ShootingGuard);
    }
}
