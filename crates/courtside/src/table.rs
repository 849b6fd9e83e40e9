// Roster table controller.
//
// Binds a remote-backed table to the roster list endpoint, opens a detail
// modal for one player on request, and reloads the table when its tab is
// shown again. Also provides `RemoteTable`, the `TableWidget` that performs
// the list loads.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::api::client::{ApiError, PlayerDirectory, ROSTER_PATH};
use crate::config::Language;
use crate::protocol::{ApiEvent, Notice, TabId};
use crate::roster::player::{format_stat, DetailPanel, PlayerDetail, PlayerId, PlayerSummary, PLACEHOLDER};
use crate::view::{ModalSurface, Shell, TableWidget};

/// Text of the notice shown when a player's detail cannot be loaded.
pub const DETAIL_FAILED_MESSAGE: &str = "Error loading the player details";

// ---------------------------------------------------------------------------
// Columns
// ---------------------------------------------------------------------------

/// Fixed columns of the roster table, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Name,
    Team,
    Position,
    Age,
    Height,
    PointsPerGame,
    /// Trailing action column: "view details" keyed by player id.
    Actions,
}

pub const COLUMNS: [Column; 7] = [
    Column::Name,
    Column::Team,
    Column::Position,
    Column::Age,
    Column::Height,
    Column::PointsPerGame,
    Column::Actions,
];

impl Column {
    /// Header text in the configured language.
    pub fn title(&self, language: Language) -> &'static str {
        match (self, language) {
            (Column::Name, Language::Es) => "Nombre",
            (Column::Name, Language::En) => "Name",
            (Column::Team, Language::Es) => "Equipo",
            (Column::Team, Language::En) => "Team",
            (Column::Position, Language::Es) => "Posición",
            (Column::Position, Language::En) => "Position",
            (Column::Age, Language::Es) => "Edad",
            (Column::Age, Language::En) => "Age",
            (Column::Height, Language::Es) => "Altura",
            (Column::Height, Language::En) => "Height",
            (Column::PointsPerGame, Language::Es) => "PPP",
            (Column::PointsPerGame, Language::En) => "PPG",
            (Column::Actions, Language::Es) => "",
            (Column::Actions, Language::En) => "",
        }
    }

    /// Cell text for a row.
    pub fn cell(&self, row: &PlayerSummary, language: Language) -> String {
        match self {
            Column::Name => row.display_name().to_string(),
            Column::Team => row.team.clone().unwrap_or_else(|| PLACEHOLDER.to_string()),
            Column::Position => row
                .position
                .clone()
                .unwrap_or_else(|| PLACEHOLDER.to_string()),
            Column::Age => format_stat(row.age),
            Column::Height => format_stat(row.height),
            Column::PointsPerGame => format_stat(row.points_per_game),
            Column::Actions => match language {
                Language::Es => "Ver Detalles".to_string(),
                Language::En => "View Details".to_string(),
            },
        }
    }

    /// Whether rows can be ordered by this column.
    pub fn sortable(&self) -> bool {
        !matches!(self, Column::Actions)
    }
}

// ---------------------------------------------------------------------------
// RosterTable
// ---------------------------------------------------------------------------

/// Lifecycle of the table. Initialization is one-way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableState {
    Uninitialized,
    Initialized,
}

pub struct RosterTable {
    directory: Arc<dyn PlayerDirectory>,
    events: mpsc::Sender<ApiEvent>,
    state: TableState,
    /// Number of the last detail request issued.
    detail_request: u64,
    /// Request whose response may open the modal; earlier ones are dropped.
    pending_detail: Option<u64>,
}

impl RosterTable {
    pub fn new(directory: Arc<dyn PlayerDirectory>, events: mpsc::Sender<ApiEvent>) -> Self {
        RosterTable {
            directory,
            events,
            state: TableState::Uninitialized,
            detail_request: 0,
            pending_detail: None,
        }
    }

    pub fn state(&self) -> TableState {
        self.state
    }

    /// Bind the table to the roster endpoint, if the table is mounted in this
    /// session. Returns whether the table is initialized afterwards.
    pub fn initialize(&mut self, mount_present: bool, widget: &mut impl TableWidget) -> bool {
        if !mount_present {
            debug!("Roster table not mounted, skipping initialization");
            return false;
        }
        if self.state == TableState::Initialized {
            return true;
        }
        info!("Initializing roster table from {}", ROSTER_PATH);
        widget.bind_remote_source(ROSTER_PATH);
        self.state = TableState::Initialized;
        true
    }

    /// Request one player's full record for the detail modal.
    pub fn on_view_details(&mut self, player_id: PlayerId) {
        self.detail_request += 1;
        let request = self.detail_request;
        self.pending_detail = Some(request);
        let directory = Arc::clone(&self.directory);
        let tx = self.events.clone();
        tokio::spawn(async move {
            let result = directory.player_detail(player_id).await;
            let _ = tx
                .send(ApiEvent::PlayerDetail {
                    request,
                    player_id,
                    result,
                })
                .await;
        });
        debug!("Requested detail for player {} (req: {})", player_id, request);
    }

    /// Handle a detail response: open the modal, or alert and leave the UI
    /// as it was.
    pub fn on_player_detail(
        &mut self,
        request: u64,
        player_id: PlayerId,
        result: Result<PlayerDetail, ApiError>,
        ui: &mut (impl ModalSurface + Shell),
    ) {
        if self.pending_detail != Some(request) {
            debug!(
                "Discarding superseded detail for player {} (req: {})",
                player_id, request
            );
            return;
        }
        self.pending_detail = None;

        match result {
            Ok(detail) => ui.show_modal(DetailPanel::from_detail(&detail)),
            Err(e) => {
                warn!("Failed to load detail for player {}: {}", player_id, e);
                ui.alert(Notice::error(format!("{DETAIL_FAILED_MESSAGE}: {e}")));
            }
        }
    }

    /// Reload the table when the roster tab becomes visible again.
    /// Returns whether a reload was triggered.
    pub fn on_tab_activated(&mut self, tab: TabId, widget: &mut impl TableWidget) -> bool {
        if tab != TabId::Roster || self.state != TableState::Initialized {
            return false;
        }
        debug!("Roster tab activated, reloading table");
        widget.reload();
        true
    }

    /// Forget initialization so the next `initialize` binds again.
    pub fn reset(&mut self) {
        self.state = TableState::Uninitialized;
        self.pending_detail = None;
    }
}

// ---------------------------------------------------------------------------
// RemoteTable
// ---------------------------------------------------------------------------

/// Outcome of a current roster load.
#[derive(Debug, Clone, PartialEq)]
pub enum RosterLoad {
    Rows(Vec<PlayerSummary>),
    /// The load failed; whatever is on screen stays.
    Failed,
}

/// `TableWidget` that loads rows through the `PlayerDirectory`.
///
/// Each load is numbered; only the newest load's rows are applied.
pub struct RemoteTable {
    directory: Arc<dyn PlayerDirectory>,
    events: mpsc::Sender<ApiEvent>,
    source: Option<String>,
    sequence: u64,
}

impl RemoteTable {
    pub fn new(directory: Arc<dyn PlayerDirectory>, events: mpsc::Sender<ApiEvent>) -> Self {
        RemoteTable {
            directory,
            events,
            source: None,
            sequence: 0,
        }
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    fn load(&mut self) {
        let Some(source) = self.source.clone() else {
            warn!("Table reload requested before a source was bound");
            return;
        };
        self.sequence += 1;
        let sequence = self.sequence;
        let directory = Arc::clone(&self.directory);
        let tx = self.events.clone();
        tokio::spawn(async move {
            let result = directory.roster(&source).await;
            let _ = tx.send(ApiEvent::RosterLoaded { sequence, result }).await;
        });
    }

    /// Handle a finished load. Returns `None` if a newer load has
    /// superseded this one.
    pub fn on_loaded(
        &mut self,
        sequence: u64,
        result: Result<Vec<PlayerSummary>, ApiError>,
    ) -> Option<RosterLoad> {
        if sequence != self.sequence {
            debug!(
                "Discarding stale roster load (event seq: {}, current seq: {})",
                sequence, self.sequence
            );
            return None;
        }
        match result {
            Ok(rows) => {
                info!("Roster table loaded {} players", rows.len());
                Some(RosterLoad::Rows(rows))
            }
            Err(e) => {
                warn!("Failed to load roster table: {}", e);
                Some(RosterLoad::Failed)
            }
        }
    }
}

impl TableWidget for RemoteTable {
    fn bind_remote_source(&mut self, source: &str) {
        self.source = Some(source.to_string());
        self.load();
    }

    fn reload(&mut self) {
        self.load();
    }
}
