// Draft team: the in-progress, unsaved team selection.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::player::PlayerId;
use super::position::{Position, SLOT_COUNT};

/// Team type label sent to the backend as `tipo` (e.g. "ofensivo").
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TeamType(String);

impl TeamType {
    /// Create a team type from a label. Returns `None` for a blank label.
    pub fn new(label: impl Into<String>) -> Option<Self> {
        let label = label.into();
        if label.trim().is_empty() {
            None
        } else {
            Some(TeamType(label))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TeamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Body of `POST /api/crear_equipo`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamSubmission {
    #[serde(rename = "tipo")]
    pub team_type: TeamType,
    #[serde(rename = "jugadores")]
    pub players: Vec<PlayerId>,
}

/// A team being assembled: one team type and one pick per position.
///
/// `picks[i]` holds the player chosen for `Position::ALL[i]`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DraftTeam {
    team_type: Option<TeamType>,
    picks: [Option<PlayerId>; SLOT_COUNT],
}

impl DraftTeam {
    /// An empty draft: no type, no picks.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn team_type(&self) -> Option<&TeamType> {
        self.team_type.as_ref()
    }

    pub fn set_team_type(&mut self, team_type: TeamType) {
        self.team_type = Some(team_type);
    }

    /// Record (or clear, with `None`) the pick for a position.
    pub fn set_pick(&mut self, position: Position, player: Option<PlayerId>) {
        self.picks[position.index()] = player;
    }

    pub fn pick(&self, position: Position) -> Option<PlayerId> {
        self.picks[position.index()]
    }

    pub fn picks(&self) -> &[Option<PlayerId>; SLOT_COUNT] {
        &self.picks
    }

    /// Number of positions with a pick.
    pub fn filled_count(&self) -> usize {
        self.picks.iter().filter(|p| p.is_some()).count()
    }

    /// A draft is complete when a type is chosen and every position is filled.
    pub fn is_complete(&self) -> bool {
        self.team_type.is_some() && self.filled_count() == SLOT_COUNT
    }

    /// Build the submission payload, or `None` if the draft is incomplete.
    /// Picks keep position order.
    pub fn submission(&self) -> Option<TeamSubmission> {
        if !self.is_complete() {
            return None;
        }
        let team_type = self.team_type.clone()?;
        Some(TeamSubmission {
            team_type,
            players: self.picks.iter().flatten().copied().collect(),
        })
    }
}
