// Shared test fakes: an in-memory `PlayerDirectory` and a recorder that
// implements every UI capability.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::api::client::{ApiError, PlayerDirectory, TeamCreated};
use crate::protocol::Notice;
use crate::roster::draft::{TeamSubmission, TeamType};
use crate::roster::player::{DetailPanel, PlayerDetail, PlayerId, PlayerSummary, PositionPlayer};
use crate::roster::position::Position;
use crate::view::{BuilderView, ModalSurface, Shell, TableWidget};

pub fn player(id: PlayerId, name: &str) -> PositionPlayer {
    PositionPlayer {
        id,
        name: Some(name.to_string()),
        team: Some("TST".to_string()),
        points_per_game: Some(10.0 + id as f64),
        rebounds_per_game: None,
        assists_per_game: None,
    }
}

pub fn summary(id: PlayerId, name: &str) -> PlayerSummary {
    PlayerSummary {
        id,
        name: Some(name.to_string()),
        team: Some("TST".to_string()),
        position: Some("Base".to_string()),
        age: Some(25.0),
        height: Some(190.0),
        points_per_game: Some(12.5),
    }
}

pub fn detail(id: PlayerId, name: &str) -> PlayerDetail {
    PlayerDetail {
        id,
        name: Some(name.to_string()),
        team: Some("TST".to_string()),
        position: Some("Base".to_string()),
        age: Some(25.0),
        height: Some(190.0),
        university: None,
        country: Some("Spain".to_string()),
        games_played: Some(70),
        points_per_game: Some(12.5),
        rebounds_per_game: Some(4.0),
        assists_per_game: Some(6.2),
    }
}

// ---------------------------------------------------------------------------
// FakeDirectory
// ---------------------------------------------------------------------------

pub struct FakeDirectory {
    lists: Mutex<HashMap<Position, Result<Vec<PositionPlayer>, ApiError>>>,
    create_result: Result<TeamCreated, ApiError>,
    roster_result: Result<Vec<PlayerSummary>, ApiError>,
    details: HashMap<PlayerId, PlayerDetail>,
    position_requests: Mutex<Vec<Position>>,
    submissions: Mutex<Vec<TeamSubmission>>,
    roster_requests: Mutex<Vec<String>>,
    detail_requests: Mutex<Vec<PlayerId>>,
}

impl FakeDirectory {
    /// Two players per position with ids 1..=10 in position order
    /// (point guards 1 and 2, ..., centers 9 and 10).
    pub fn with_standard_lists() -> Self {
        let lists = Position::ALL
            .iter()
            .enumerate()
            .map(|(i, pos)| {
                let a = (i as PlayerId) * 2 + 1;
                let list = vec![
                    player(a, &format!("{} One", pos.abbrev())),
                    player(a + 1, &format!("{} Two", pos.abbrev())),
                ];
                (*pos, Ok(list))
            })
            .collect();

        FakeDirectory {
            lists: Mutex::new(lists),
            create_result: Ok(TeamCreated { team_id: Some(1) }),
            roster_result: Ok(vec![summary(1, "PG One"), summary(2, "PG Two")]),
            details: HashMap::new(),
            position_requests: Mutex::new(Vec::new()),
            submissions: Mutex::new(Vec::new()),
            roster_requests: Mutex::new(Vec::new()),
            detail_requests: Mutex::new(Vec::new()),
        }
    }

    /// Make later requests for `position` fail. Usable after the directory
    /// is shared.
    pub fn fail_position(&self, position: Position, error: ApiError) {
        self.lists.lock().unwrap().insert(position, Err(error));
    }

    pub fn set_roster(&mut self, result: Result<Vec<PlayerSummary>, ApiError>) {
        self.roster_result = result;
    }

    pub fn add_detail(&mut self, detail: PlayerDetail) {
        self.details.insert(detail.id, detail);
    }

    pub fn position_requests(&self) -> Vec<Position> {
        self.position_requests.lock().unwrap().clone()
    }

    pub fn submissions(&self) -> Vec<TeamSubmission> {
        self.submissions.lock().unwrap().clone()
    }

    pub fn roster_requests(&self) -> Vec<String> {
        self.roster_requests.lock().unwrap().clone()
    }

    pub fn detail_requests(&self) -> Vec<PlayerId> {
        self.detail_requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl PlayerDirectory for FakeDirectory {
    async fn players_for_position(
        &self,
        position: Position,
    ) -> Result<Vec<PositionPlayer>, ApiError> {
        self.position_requests.lock().unwrap().push(position);
        self.lists
            .lock()
            .unwrap()
            .get(&position)
            .cloned()
            .unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn create_team(&self, submission: &TeamSubmission) -> Result<TeamCreated, ApiError> {
        self.submissions.lock().unwrap().push(submission.clone());
        self.create_result.clone()
    }

    async fn roster(&self, source: &str) -> Result<Vec<PlayerSummary>, ApiError> {
        self.roster_requests.lock().unwrap().push(source.to_string());
        self.roster_result.clone()
    }

    async fn player_detail(&self, id: PlayerId) -> Result<PlayerDetail, ApiError> {
        self.detail_requests.lock().unwrap().push(id);
        self.details.get(&id).cloned().ok_or(ApiError::Status {
            status: 404,
            path: format!("/api/jugadores/{id}"),
        })
    }
}

// ---------------------------------------------------------------------------
// Recorder
// ---------------------------------------------------------------------------

/// Records every call made on the UI capabilities.
#[derive(Debug, Default)]
pub struct Recorder {
    pub active_type: Option<TeamType>,
    pub resets: usize,
    /// Option ids and selected id per filled selector.
    pub selectors: HashMap<Position, (Vec<PlayerId>, Option<PlayerId>)>,
    pub picks: HashMap<Position, Option<PlayerId>>,
    pub submit_enabled: Option<bool>,
    pub notices: Vec<Notice>,
    pub reloads: usize,
    pub bound_sources: Vec<String>,
    pub table_reloads: usize,
    pub modals: Vec<DetailPanel>,
}

impl BuilderView for Recorder {
    fn activate_type(&mut self, team_type: &TeamType) {
        self.active_type = Some(team_type.clone());
    }

    fn reset_selectors(&mut self) {
        self.resets += 1;
        self.selectors.clear();
    }

    fn fill_selector(
        &mut self,
        position: Position,
        options: &[PositionPlayer],
        selected: Option<PlayerId>,
    ) {
        let ids = options.iter().map(|p| p.id).collect();
        self.selectors.insert(position, (ids, selected));
    }

    fn show_pick(&mut self, position: Position, player: Option<PlayerId>) {
        self.picks.insert(position, player);
    }

    fn set_submit_enabled(&mut self, enabled: bool) {
        self.submit_enabled = Some(enabled);
    }
}

impl Shell for Recorder {
    fn alert(&mut self, notice: Notice) {
        self.notices.push(notice);
    }

    fn reload_page(&mut self) {
        self.reloads += 1;
    }
}

impl TableWidget for Recorder {
    fn bind_remote_source(&mut self, source: &str) {
        self.bound_sources.push(source.to_string());
    }

    fn reload(&mut self) {
        self.table_reloads += 1;
    }
}

impl ModalSurface for Recorder {
    fn show_modal(&mut self, panel: DetailPanel) {
        self.modals.push(panel);
    }
}
