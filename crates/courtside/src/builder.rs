// Team builder controller.
//
// Drives the state machine for assembling one team submission: a team type,
// five positional picks, completeness, and submission. Network requests run in
// spawned tasks that report back as `ApiEvent`s; the app loop routes those
// completions to the `on_*` handlers, so all state here is touched from the
// event loop only.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::api::client::{ApiError, PlayerDirectory, TeamCreated};
use crate::protocol::{ApiEvent, Notice};
use crate::roster::draft::{DraftTeam, TeamType};
use crate::roster::player::{PlayerId, PositionPlayer};
use crate::roster::position::{Position, SLOT_COUNT};
use crate::view::{BuilderView, Shell};

/// Text of the notice shown after a successful submission.
pub const TEAM_CREATED_MESSAGE: &str = "Team created successfully";

/// Prefix of the notice shown when a submission fails.
pub const TEAM_FAILED_PREFIX: &str = "Error creating the team";

pub struct TeamBuilder {
    directory: Arc<dyn PlayerDirectory>,
    events: mpsc::Sender<ApiEvent>,
    draft: DraftTeam,
    /// Loaded option list per position; `None` until its request completes.
    options: [Option<Vec<PositionPlayer>>; SLOT_COUNT],
    /// Identifies the current selector population. Incremented each time
    /// the selectors are re-rendered; completions carrying an older value
    /// belong to replaced selectors and are discarded.
    generation: u64,
    submit_enabled: bool,
    /// A submission is in flight.
    submitting: bool,
}

impl TeamBuilder {
    pub fn new(directory: Arc<dyn PlayerDirectory>, events: mpsc::Sender<ApiEvent>) -> Self {
        TeamBuilder {
            directory,
            events,
            draft: DraftTeam::new(),
            options: Default::default(),
            generation: 0,
            submit_enabled: false,
            submitting: false,
        }
    }

    pub fn draft(&self) -> &DraftTeam {
        &self.draft
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn submit_enabled(&self) -> bool {
        self.submit_enabled
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Loaded options for a position, if its list has arrived.
    pub fn options(&self, position: Position) -> Option<&[PositionPlayer]> {
        self.options[position.index()].as_deref()
    }

    /// Choose the team type and re-populate the position selectors.
    ///
    /// Picks already made are kept; each one is shown again once its
    /// position's list arrives, or dropped if that list no longer has it.
    pub fn select_type(&mut self, team_type: TeamType, view: &mut impl BuilderView) {
        info!("Team type selected: {}", team_type);
        view.activate_type(&team_type);
        self.draft.set_team_type(team_type);
        self.populate_position_selectors(view);
        self.refresh_submit(view);
    }

    /// Render five empty selectors and request each position's player list.
    ///
    /// The five requests run concurrently and complete in any order.
    pub fn populate_position_selectors(&mut self, view: &mut impl BuilderView) {
        self.generation += 1;
        let generation = self.generation;
        self.options = Default::default();
        view.reset_selectors();

        for position in Position::ALL {
            let directory = Arc::clone(&self.directory);
            let tx = self.events.clone();
            tokio::spawn(async move {
                let result = directory.players_for_position(position).await;
                let _ = tx
                    .send(ApiEvent::PositionPlayers {
                        generation,
                        position,
                        result,
                    })
                    .await;
            });
        }
        debug!("Requested player lists for all positions (gen: {})", generation);
    }

    /// Handle one position's player list.
    ///
    /// Fills only that position's selector. Lists from a replaced selector
    /// population are ignored; failures leave the selector empty.
    pub fn on_position_players(
        &mut self,
        generation: u64,
        position: Position,
        result: Result<Vec<PositionPlayer>, ApiError>,
        view: &mut impl BuilderView,
    ) {
        if generation != self.generation {
            debug!(
                "Discarding stale {} list (event gen: {}, current gen: {})",
                position, generation, self.generation
            );
            return;
        }

        let players = match result {
            Ok(players) => players,
            Err(e) => {
                warn!("Failed to load players for {}: {}", position, e);
                return;
            }
        };

        // A kept pick must still be eligible for its position.
        if let Some(id) = self.draft.pick(position) {
            if !players.iter().any(|p| p.id == id) {
                info!("Player {} no longer listed for {}, clearing pick", id, position);
                self.draft.set_pick(position, None);
                view.show_pick(position, None);
                self.refresh_submit(view);
            }
        }

        view.fill_selector(position, &players, self.draft.pick(position));
        self.options[position.index()] = Some(players);
    }

    /// Record the selection (or clearing) of a position's selector and
    /// re-evaluate the submit control.
    ///
    /// A player missing from that position's loaded list is refused.
    /// Returns whether submission is now enabled.
    pub fn on_player_selected(
        &mut self,
        position: Position,
        player: Option<PlayerId>,
        view: &mut impl BuilderView,
    ) -> bool {
        if let Some(id) = player {
            let eligible = self
                .options(position)
                .is_some_and(|opts| opts.iter().any(|p| p.id == id));
            if !eligible {
                warn!("Ignoring selection of player {} for {}: not eligible", id, position);
                return self.refresh_submit(view);
            }
        }

        self.draft.set_pick(position, player);
        view.show_pick(position, player);
        self.refresh_submit(view)
    }

    /// Recompute completeness and push it to the submit control.
    /// Safe to call any number of times.
    pub fn refresh_submit(&mut self, view: &mut impl BuilderView) -> bool {
        self.submit_enabled = self.draft.is_complete();
        view.set_submit_enabled(self.submit_enabled);
        self.submit_enabled
    }

    /// Send the draft to the backend.
    ///
    /// Does nothing unless the draft is complete and no submission is in
    /// flight. Returns whether a request was sent.
    pub fn submit(&mut self) -> bool {
        if self.submitting {
            debug!("Submit ignored: a submission is already in flight");
            return false;
        }
        let Some(submission) = self.draft.submission() else {
            debug!("Submit ignored: draft incomplete");
            return false;
        };

        info!(
            "Submitting team: type={}, players={:?}",
            submission.team_type, submission.players
        );
        self.submitting = true;
        let directory = Arc::clone(&self.directory);
        let tx = self.events.clone();
        tokio::spawn(async move {
            let result = directory.create_team(&submission).await;
            let _ = tx.send(ApiEvent::TeamCreated(result)).await;
        });
        true
    }

    /// Handle the submission outcome.
    ///
    /// Success shows a notice and reloads the page exactly once. Any failure
    /// shows the cause and leaves the draft as it was for a retry.
    pub fn on_team_created(
        &mut self,
        result: Result<TeamCreated, ApiError>,
        shell: &mut impl Shell,
    ) {
        self.submitting = false;
        match result {
            Ok(created) => {
                match created.team_id {
                    Some(id) => info!("Team created with id {}", id),
                    None => info!("Team created"),
                }
                shell.alert(Notice::success(TEAM_CREATED_MESSAGE));
                shell.reload_page();
            }
            Err(ApiError::Rejected(reason)) => {
                warn!("Team rejected by server: {}", reason);
                shell.alert(Notice::error(format!("{TEAM_FAILED_PREFIX}: {reason}")));
            }
            Err(e) => {
                warn!("Failed to submit team: {}", e);
                shell.alert(Notice::error(format!("{TEAM_FAILED_PREFIX}: {e}")));
            }
        }
    }

    /// Return to the startup state: no type, no picks, empty selectors.
    ///
    /// The generation keeps counting so requests from before the reset are
    /// still recognized as stale.
    pub fn reset(&mut self, view: &mut impl BuilderView) {
        self.generation += 1;
        self.draft = DraftTeam::new();
        self.options = Default::default();
        self.submitting = false;
        view.reset_selectors();
        self.refresh_submit(view);
    }
}
