// Application state and main event loop.
//
// `AppState` owns both controllers and the remote table. `run` receives user
// commands from the TUI and API completions from spawned tasks, dispatches
// them to the controllers, and forwards the resulting `UiUpdate`s.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::api::client::PlayerDirectory;
use crate::builder::TeamBuilder;
use crate::protocol::{ApiEvent, Notice, UiUpdate, UserCommand};
use crate::roster::draft::TeamType;
use crate::roster::player::{DetailPanel, PlayerId, PositionPlayer};
use crate::roster::position::Position;
use crate::table::{RemoteTable, RosterLoad, RosterTable};
use crate::view::{BuilderView, ModalSurface, Shell};

// ---------------------------------------------------------------------------
// UiBridge
// ---------------------------------------------------------------------------

/// Implements the UI capabilities by queuing `UiUpdate`s for the TUI.
///
/// Updates are queued while a command or event is dispatched and flushed
/// afterwards, in order. A page reload is recorded as a flag and carried out
/// by the loop once the dispatch is finished.
#[derive(Debug, Default)]
pub struct UiBridge {
    pending: Vec<UiUpdate>,
    reload_requested: bool,
}

impl UiBridge {
    pub fn push(&mut self, update: UiUpdate) {
        self.pending.push(update);
    }

    /// Take every queued update.
    pub fn drain(&mut self) -> Vec<UiUpdate> {
        std::mem::take(&mut self.pending)
    }

    /// Take the reload flag, clearing it.
    pub fn take_reload(&mut self) -> bool {
        std::mem::take(&mut self.reload_requested)
    }
}

impl BuilderView for UiBridge {
    fn activate_type(&mut self, team_type: &TeamType) {
        self.push(UiUpdate::TeamTypeActivated(team_type.clone()));
    }

    fn reset_selectors(&mut self) {
        self.push(UiUpdate::SelectorsReset);
    }

    fn fill_selector(
        &mut self,
        position: Position,
        options: &[PositionPlayer],
        selected: Option<PlayerId>,
    ) {
        self.push(UiUpdate::SelectorOptions {
            position,
            options: options.to_vec(),
            selected,
        });
    }

    fn show_pick(&mut self, position: Position, player: Option<PlayerId>) {
        self.push(UiUpdate::PickRecorded {
            position,
            player_id: player,
        });
    }

    fn set_submit_enabled(&mut self, enabled: bool) {
        self.push(UiUpdate::SubmitEnabled(enabled));
    }
}

impl Shell for UiBridge {
    fn alert(&mut self, notice: Notice) {
        self.push(UiUpdate::Alert(notice));
    }

    fn reload_page(&mut self) {
        self.reload_requested = true;
    }
}

impl ModalSurface for UiBridge {
    fn show_modal(&mut self, panel: DetailPanel) {
        self.push(UiUpdate::ShowDetail(Box::new(panel)));
    }
}

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

/// Central application state, owned by the event loop.
pub struct AppState {
    pub builder: TeamBuilder,
    pub table: RosterTable,
    pub remote: RemoteTable,
    pub bridge: UiBridge,
    /// Whether the roster view exists in this session.
    pub roster_mounted: bool,
}

impl AppState {
    /// Build the state. `events` is the sender half of the channel `run`
    /// receives API completions on.
    pub fn new(
        directory: Arc<dyn PlayerDirectory>,
        events: mpsc::Sender<ApiEvent>,
        roster_mounted: bool,
    ) -> Self {
        AppState {
            builder: TeamBuilder::new(Arc::clone(&directory), events.clone()),
            table: RosterTable::new(Arc::clone(&directory), events.clone()),
            remote: RemoteTable::new(directory, events),
            bridge: UiBridge::default(),
            roster_mounted,
        }
    }

    /// Attach the controllers, as on page load.
    pub fn start(&mut self) {
        if self.table.initialize(self.roster_mounted, &mut self.remote) {
            self.bridge.push(UiUpdate::RosterLoading);
        }
    }

    /// Discard the session and start over.
    fn reload_page(&mut self) {
        info!("Reloading session");
        self.bridge.push(UiUpdate::PageReloaded);
        self.builder.reset(&mut self.bridge);
        self.table.reset();
        self.start();
    }

    pub fn handle_command(&mut self, cmd: UserCommand) {
        match cmd {
            UserCommand::SelectTeamType(team_type) => {
                self.builder.select_type(team_type, &mut self.bridge);
            }
            UserCommand::SelectPlayer {
                position,
                player_id,
            } => {
                self.builder
                    .on_player_selected(position, player_id, &mut self.bridge);
            }
            UserCommand::SubmitTeam => {
                self.builder.submit();
            }
            UserCommand::ViewPlayer(player_id) => {
                self.table.on_view_details(player_id);
            }
            UserCommand::ActivateTab(tab) => {
                debug!("Tab activated: {:?}", tab);
                if self.table.on_tab_activated(tab, &mut self.remote) {
                    self.bridge.push(UiUpdate::RosterLoading);
                }
            }
            UserCommand::Quit => {
                // Handled in the main loop
            }
        }
    }

    pub fn handle_api_event(&mut self, event: ApiEvent) {
        match event {
            ApiEvent::PositionPlayers {
                generation,
                position,
                result,
            } => {
                self.builder
                    .on_position_players(generation, position, result, &mut self.bridge);
            }
            ApiEvent::TeamCreated(result) => {
                self.builder.on_team_created(result, &mut self.bridge);
            }
            ApiEvent::RosterLoaded { sequence, result } => {
                match self.remote.on_loaded(sequence, result) {
                    Some(RosterLoad::Rows(rows)) => self.bridge.push(UiUpdate::RosterRows(rows)),
                    Some(RosterLoad::Failed) => self.bridge.push(UiUpdate::RosterLoadFailed),
                    None => {}
                }
            }
            ApiEvent::PlayerDetail {
                request,
                player_id,
                result,
            } => {
                self.table
                    .on_player_detail(request, player_id, result, &mut self.bridge);
            }
        }
    }

    /// Queued updates, after finishing any requested reload.
    pub fn take_updates(&mut self) -> Vec<UiUpdate> {
        if self.bridge.take_reload() {
            self.reload_page();
        }
        self.bridge.drain()
    }
}

// ---------------------------------------------------------------------------
// Main event loop
// ---------------------------------------------------------------------------

/// Run the main application event loop.
///
/// Listens on two channels using `tokio::select!`:
/// 1. User commands from the TUI
/// 2. Completions of spawned API requests
///
/// Pushes UI updates through `ui_tx` for the TUI render loop.
pub async fn run(
    mut cmd_rx: mpsc::Receiver<UserCommand>,
    mut event_rx: mpsc::Receiver<ApiEvent>,
    ui_tx: mpsc::Sender<UiUpdate>,
    mut state: AppState,
) -> anyhow::Result<()> {
    info!("Application event loop started");

    state.start();
    flush(&mut state, &ui_tx).await;

    loop {
        tokio::select! {
            // --- User commands ---
            cmd = cmd_rx.recv() => {
                match cmd {
                    Some(UserCommand::Quit) => {
                        info!("Quit command received, shutting down");
                        break;
                    }
                    Some(cmd) => state.handle_command(cmd),
                    None => {
                        info!("Command channel closed, shutting down");
                        break;
                    }
                }
            }

            // --- API completions ---
            event = event_rx.recv() => {
                match event {
                    Some(event) => state.handle_api_event(event),
                    None => {
                        info!("API event channel closed, shutting down");
                        break;
                    }
                }
            }
        }

        flush(&mut state, &ui_tx).await;
    }

    info!("Application event loop exiting");
    Ok(())
}

async fn flush(state: &mut AppState, ui_tx: &mpsc::Sender<UiUpdate>) {
    for update in state.take_updates() {
        let _ = ui_tx.send(update).await;
    }
}
