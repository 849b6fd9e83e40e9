// Messages exchanged between the TUI, the app event loop, and spawned API
// tasks.

use crate::api::client::{ApiError, TeamCreated};
use crate::roster::draft::TeamType;
use crate::roster::player::{DetailPanel, PlayerDetail, PlayerId, PlayerSummary, PositionPlayer};
use crate::roster::position::Position;

// ---------------------------------------------------------------------------
// Tabs
// ---------------------------------------------------------------------------

/// Top-level views of the TUI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TabId {
    /// Team builder: type buttons, position selectors, submit.
    Builder,
    /// Roster table with the player detail modal.
    Roster,
}

// ---------------------------------------------------------------------------
// TUI -> app
// ---------------------------------------------------------------------------

/// Commands sent from the TUI to the app event loop.
#[derive(Debug, Clone, PartialEq)]
pub enum UserCommand {
    /// A team type button was pressed.
    SelectTeamType(TeamType),
    /// A position selector changed; `None` clears it.
    SelectPlayer {
        position: Position,
        player_id: Option<PlayerId>,
    },
    /// The submit control was pressed.
    SubmitTeam,
    /// A row's "view details" action was triggered.
    ViewPlayer(PlayerId),
    /// A tab became visible.
    ActivateTab(TabId),
    Quit,
}

// ---------------------------------------------------------------------------
// app -> TUI
// ---------------------------------------------------------------------------

/// Severity of a blocking notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// A blocking notification the user must dismiss.
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Notice {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Notice {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }
}

/// Updates pushed from the app event loop to the TUI.
#[derive(Debug, Clone, PartialEq)]
pub enum UiUpdate {
    /// Exactly this team type is now active.
    TeamTypeActivated(TeamType),
    /// All position selectors were re-rendered empty (no options yet).
    SelectorsReset,
    /// Options for one position selector, with the pick to show selected.
    SelectorOptions {
        position: Position,
        options: Vec<PositionPlayer>,
        selected: Option<PlayerId>,
    },
    /// The pick recorded for one position (after validation).
    PickRecorded {
        position: Position,
        player_id: Option<PlayerId>,
    },
    /// Whether the submit control is enabled.
    SubmitEnabled(bool),
    /// Show a blocking notice.
    Alert(Notice),
    /// The session was reset to its startup state.
    PageReloaded,
    /// The roster table was bound to its data source and is loading.
    RosterLoading,
    /// Fresh roster rows.
    RosterRows(Vec<PlayerSummary>),
    /// A roster load failed; rows already shown stay on screen.
    RosterLoadFailed,
    /// Open the player detail modal.
    ShowDetail(Box<DetailPanel>),
}

// ---------------------------------------------------------------------------
// API tasks -> app
// ---------------------------------------------------------------------------

/// Completions of spawned API requests, routed back to the event loop.
#[derive(Debug)]
pub enum ApiEvent {
    /// Player list for one position selector. `generation` identifies the
    /// selector population that requested it.
    PositionPlayers {
        generation: u64,
        position: Position,
        result: Result<Vec<PositionPlayer>, ApiError>,
    },
    /// Outcome of a team submission.
    TeamCreated(Result<TeamCreated, ApiError>),
    /// Roster rows for the remote table. `sequence` identifies the load.
    RosterLoaded {
        sequence: u64,
        result: Result<Vec<PlayerSummary>, ApiError>,
    },
    /// One player's full record. `request` numbers the detail request.
    PlayerDetail {
        request: u64,
        player_id: PlayerId,
        result: Result<PlayerDetail, ApiError>,
    },
}
