// Terminal UI: layout, input handling, and widget rendering.
//
// The TUI owns a `ViewState` that mirrors what the controllers have told it.
// The app event loop pushes `UiUpdate` messages over an mpsc channel; the TUI
// applies them to `ViewState` and re-renders at ~30 fps. Key presses become
// `UserCommand`s or local `ViewState` changes (focus, filter, paging).

pub mod input;
pub mod layout;
pub mod widgets;

use std::time::Duration;

use crossterm::event::{Event, EventStream};
use futures_util::StreamExt;
use ratatui::Frame;
use tokio::sync::mpsc;

use crate::config::{Config, Language};
use crate::protocol::{Notice, TabId, UiUpdate, UserCommand};
use crate::roster::draft::TeamType;
use crate::roster::player::{DetailPanel, PlayerId, PlayerSummary, PositionPlayer};
use crate::roster::position::{Position, SLOT_COUNT};

use layout::build_layout;
use widgets::roster_table::SortState;

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// Startup settings the TUI needs from configuration.
#[derive(Debug, Clone)]
pub struct TuiOptions {
    pub team_types: Vec<TeamType>,
    pub roster_mounted: bool,
    pub page_size: usize,
    pub language: Language,
}

impl TuiOptions {
    pub fn from_config(config: &Config) -> Self {
        TuiOptions {
            team_types: config.team_types(),
            roster_mounted: config.ui.roster_tab,
            page_size: config.table.page_size,
            language: config.table.language,
        }
    }
}

impl Default for TuiOptions {
    fn default() -> Self {
        TuiOptions {
            team_types: Vec::new(),
            roster_mounted: true,
            page_size: 10,
            language: Language::Es,
        }
    }
}

// ---------------------------------------------------------------------------
// ViewState
// ---------------------------------------------------------------------------

/// Which builder control has keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuilderFocus {
    Types,
    Selector(Position),
    Submit,
}

impl BuilderFocus {
    pub fn next(self) -> Self {
        match self {
            BuilderFocus::Types => BuilderFocus::Selector(Position::ALL[0]),
            BuilderFocus::Selector(p) if p.index() + 1 < SLOT_COUNT => {
                BuilderFocus::Selector(Position::ALL[p.index() + 1])
            }
            BuilderFocus::Selector(_) | BuilderFocus::Submit => BuilderFocus::Submit,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            BuilderFocus::Types => BuilderFocus::Types,
            BuilderFocus::Selector(p) if p.index() > 0 => {
                BuilderFocus::Selector(Position::ALL[p.index() - 1])
            }
            BuilderFocus::Selector(_) => BuilderFocus::Types,
            BuilderFocus::Submit => BuilderFocus::Selector(Position::ALL[SLOT_COUNT - 1]),
        }
    }
}

/// One position selector as last reported by the builder.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectorView {
    /// `None` while the position's list has not arrived (or failed).
    pub options: Option<Vec<PositionPlayer>>,
    pub selected: Option<PlayerId>,
}

impl SelectorView {
    /// Index of the selected player within the options.
    pub fn selected_index(&self) -> Option<usize> {
        let id = self.selected?;
        self.options.as_ref()?.iter().position(|p| p.id == id)
    }
}

/// Roster tab state: server rows plus local search, sort and paging.
#[derive(Debug, Clone, Default)]
pub struct RosterView {
    pub rows: Vec<PlayerSummary>,
    pub loading: bool,
    pub filter_text: String,
    pub filter_mode: bool,
    pub sort: Option<SortState>,
    /// Zero-based page of the filtered rows.
    pub page: usize,
    /// Highlighted row within the current page.
    pub cursor: usize,
}

/// TUI-local state that mirrors the controllers for rendering.
pub struct ViewState {
    pub active_tab: TabId,
    pub roster_mounted: bool,
    pub team_types: Vec<TeamType>,
    /// Highlighted type button.
    pub type_cursor: usize,
    /// Type the builder has activated.
    pub active_type: Option<TeamType>,
    pub focus: BuilderFocus,
    pub selectors: [SelectorView; SLOT_COUNT],
    pub submit_enabled: bool,
    /// Blocking notice; swallows input until dismissed.
    pub alert: Option<Notice>,
    /// Open player detail modal.
    pub detail: Option<DetailPanel>,
    pub roster: RosterView,
    pub page_size: usize,
    pub language: Language,
}

impl ViewState {
    pub fn new(options: TuiOptions) -> Self {
        ViewState {
            active_tab: TabId::Builder,
            roster_mounted: options.roster_mounted,
            team_types: options.team_types,
            type_cursor: 0,
            active_type: None,
            focus: BuilderFocus::Types,
            selectors: Default::default(),
            submit_enabled: false,
            alert: None,
            detail: None,
            roster: RosterView::default(),
            page_size: options.page_size.max(1),
            language: options.language,
        }
    }

    pub fn selector(&self, position: Position) -> &SelectorView {
        &self.selectors[position.index()]
    }

    /// Number of positions with a recorded pick.
    pub fn pick_count(&self) -> usize {
        self.selectors.iter().filter(|s| s.selected.is_some()).count()
    }

    /// Return to the startup view, keeping any alert on screen.
    fn reset_session(&mut self) {
        self.active_tab = TabId::Builder;
        self.type_cursor = 0;
        self.active_type = None;
        self.focus = BuilderFocus::Types;
        self.selectors = Default::default();
        self.submit_enabled = false;
        self.detail = None;
        self.roster = RosterView::default();
    }
}

impl Default for ViewState {
    fn default() -> Self {
        ViewState::new(TuiOptions::default())
    }
}

// ---------------------------------------------------------------------------
// UiUpdate processing
// ---------------------------------------------------------------------------

/// Apply a single UiUpdate to the ViewState.
pub fn apply_ui_update(state: &mut ViewState, update: UiUpdate) {
    match update {
        UiUpdate::TeamTypeActivated(team_type) => {
            if let Some(i) = state.team_types.iter().position(|t| *t == team_type) {
                state.type_cursor = i;
            }
            state.active_type = Some(team_type);
        }
        UiUpdate::SelectorsReset => {
            // Picks survive a re-population; the builder re-sends them with
            // each list, or clears them through `PickRecorded`.
            for selector in state.selectors.iter_mut() {
                selector.options = None;
            }
        }
        UiUpdate::SelectorOptions {
            position,
            options,
            selected,
        } => {
            state.selectors[position.index()] = SelectorView {
                options: Some(options),
                selected,
            };
        }
        UiUpdate::PickRecorded {
            position,
            player_id,
        } => {
            state.selectors[position.index()].selected = player_id;
        }
        UiUpdate::SubmitEnabled(enabled) => {
            state.submit_enabled = enabled;
        }
        UiUpdate::Alert(notice) => {
            state.alert = Some(notice);
        }
        UiUpdate::PageReloaded => {
            state.reset_session();
        }
        UiUpdate::RosterLoading => {
            state.roster.loading = true;
        }
        UiUpdate::RosterRows(rows) => {
            state.roster.rows = rows;
            state.roster.loading = false;
            widgets::roster_table::clamp_paging(state);
        }
        UiUpdate::RosterLoadFailed => {
            state.roster.loading = false;
        }
        UiUpdate::ShowDetail(panel) => {
            state.detail = Some(*panel);
        }
    }
}

// ---------------------------------------------------------------------------
// Render frame
// ---------------------------------------------------------------------------

/// Render the complete frame, overlays last.
fn render_frame(frame: &mut Frame, state: &ViewState) {
    let area = frame.area();
    let layout = build_layout(area);

    widgets::status_bar::render(frame, layout.status_bar, state);
    match state.active_tab {
        TabId::Builder => widgets::team_builder::render(frame, layout.main_panel, state),
        TabId::Roster => widgets::roster_table::render(frame, layout.main_panel, state),
    }
    widgets::status_bar::render_help(frame, layout.help_bar, state);

    if let Some(ref panel) = state.detail {
        widgets::detail_modal::render(frame, area, panel);
    }
    if let Some(ref notice) = state.alert {
        widgets::alert::render(frame, area, notice);
    }
}

// ---------------------------------------------------------------------------
// Main TUI loop
// ---------------------------------------------------------------------------

/// Run the TUI event loop.
///
/// 1. Initializes the terminal (raw mode, alternate screen).
/// 2. Installs a panic hook to restore the terminal on crash.
/// 3. Runs an async select loop: UI updates, keyboard input, render ticks.
/// 4. Restores the terminal on exit.
pub async fn run(
    mut ui_rx: mpsc::Receiver<UiUpdate>,
    cmd_tx: mpsc::Sender<UserCommand>,
    options: TuiOptions,
) -> anyhow::Result<()> {
    let mut terminal = ratatui::init();

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = ratatui::restore();
        original_hook(panic_info);
    }));

    let mut view_state = ViewState::new(options);
    let mut event_stream = EventStream::new();

    let mut render_tick = tokio::time::interval(Duration::from_millis(33));
    render_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    let result = loop {
        tokio::select! {
            update = ui_rx.recv() => {
                match update {
                    Some(ui_update) => apply_ui_update(&mut view_state, ui_update),
                    // App loop has shut down
                    None => break Ok(()),
                }
            }

            maybe_event = event_stream.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key_event))) => {
                        if let Some(cmd) = input::handle_key(key_event, &mut view_state) {
                            let quit = cmd == UserCommand::Quit;
                            let _ = cmd_tx.send(cmd).await;
                            if quit {
                                break Ok(());
                            }
                        }
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => break Err(anyhow::Error::from(e)),
                    None => break Ok(()),
                }
            }

            _ = render_tick.tick() => {
                if let Err(e) = terminal.draw(|frame| render_frame(frame, &view_state)) {
                    break Err(e.into());
                }
            }
        }
    };

    ratatui::restore();
    result
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::NoticeKind;
    use crate::testing::{player, summary};

    fn types() -> Vec<TeamType> {
        ["ofensivo", "defensivo", "equilibrado"]
            .into_iter()
            .filter_map(TeamType::new)
            .collect()
    }

    fn test_state() -> ViewState {
        ViewState::new(TuiOptions {
            team_types: types(),
            ..TuiOptions::default()
        })
    }

    #[test]
    fn view_state_default_is_sensible() {
        let state = ViewState::default();
        assert_eq!(state.active_tab, TabId::Builder);
        assert_eq!(state.focus, BuilderFocus::Types);
        assert!(state.active_type.is_none());
        assert!(!state.submit_enabled);
        assert!(state.alert.is_none());
        assert!(state.detail.is_none());
        assert_eq!(state.pick_count(), 0);
        assert!(state.selectors.iter().all(|s| s.options.is_none()));
    }

    #[test]
    fn focus_walks_through_every_control() {
        let mut focus = BuilderFocus::Types;
        let mut seen = vec![focus];
        for _ in 0..10 {
            focus = focus.next();
            seen.push(focus);
        }
        assert_eq!(seen[1], BuilderFocus::Selector(Position::PointGuard));
        assert_eq!(seen[5], BuilderFocus::Selector(Position::Center));
        assert_eq!(seen[6], BuilderFocus::Submit);
        assert_eq!(*seen.last().unwrap(), BuilderFocus::Submit);

        assert_eq!(
            BuilderFocus::Submit.prev(),
            BuilderFocus::Selector(Position::Center)
        );
        assert_eq!(BuilderFocus::Selector(Position::PointGuard).prev(), BuilderFocus::Types);
        assert_eq!(BuilderFocus::Types.prev(), BuilderFocus::Types);
    }

    #[test]
    fn type_activation_moves_cursor() {
        let mut state = test_state();
        let defensive = TeamType::new("defensivo").unwrap();
        apply_ui_update(&mut state, UiUpdate::TeamTypeActivated(defensive.clone()));
        assert_eq!(state.active_type, Some(defensive));
        assert_eq!(state.type_cursor, 1);
    }

    #[test]
    fn selector_options_fill_one_position() {
        let mut state = test_state();
        apply_ui_update(
            &mut state,
            UiUpdate::SelectorOptions {
                position: Position::Center,
                options: vec![player(9, "Big"), player(10, "Bigger")],
                selected: Some(10),
            },
        );
        let sel = state.selector(Position::Center);
        assert_eq!(sel.options.as_ref().map(|o| o.len()), Some(2));
        assert_eq!(sel.selected_index(), Some(1));
        assert!(state.selector(Position::PointGuard).options.is_none());
        assert_eq!(state.pick_count(), 1);
    }

    #[test]
    fn selectors_reset_drops_options_but_keeps_picks() {
        let mut state = test_state();
        apply_ui_update(
            &mut state,
            UiUpdate::SelectorOptions {
                position: Position::PointGuard,
                options: vec![player(1, "A")],
                selected: None,
            },
        );
        apply_ui_update(
            &mut state,
            UiUpdate::PickRecorded {
                position: Position::PointGuard,
                player_id: Some(1),
            },
        );
        assert_eq!(state.pick_count(), 1);

        apply_ui_update(&mut state, UiUpdate::SelectorsReset);
        assert_eq!(state.pick_count(), 1);
        assert!(state.selector(Position::PointGuard).options.is_none());

        apply_ui_update(&mut state, UiUpdate::PageReloaded);
        assert_eq!(state.pick_count(), 0);
    }

    #[test]
    fn page_reload_keeps_alert_and_resets_session() {
        let mut state = test_state();
        state.active_tab = TabId::Roster;
        state.submit_enabled = true;
        state.active_type = TeamType::new("ofensivo");
        apply_ui_update(&mut state, UiUpdate::Alert(Notice::success("done")));
        apply_ui_update(&mut state, UiUpdate::PageReloaded);

        assert_eq!(state.active_tab, TabId::Builder);
        assert!(!state.submit_enabled);
        assert!(state.active_type.is_none());
        assert_eq!(state.alert.as_ref().map(|n| n.kind), Some(NoticeKind::Success));
        assert_eq!(state.team_types.len(), 3, "configured types survive");
    }

    #[test]
    fn roster_rows_end_loading() {
        let mut state = test_state();
        apply_ui_update(&mut state, UiUpdate::RosterLoading);
        assert!(state.roster.loading);

        apply_ui_update(&mut state, UiUpdate::RosterRows(vec![summary(1, "A")]));
        assert!(!state.roster.loading);
        assert_eq!(state.roster.rows.len(), 1);
    }

    #[test]
    fn failed_roster_load_keeps_rows() {
        let mut state = test_state();
        apply_ui_update(&mut state, UiUpdate::RosterRows(vec![summary(1, "A")]));
        apply_ui_update(&mut state, UiUpdate::RosterLoading);

        apply_ui_update(&mut state, UiUpdate::RosterLoadFailed);
        assert!(!state.roster.loading);
        assert_eq!(state.roster.rows.len(), 1);
    }

    #[test]
    fn show_detail_opens_modal() {
        let mut state = test_state();
        let panel = DetailPanel::from_detail(&crate::testing::detail(3, "Jalen"));
        apply_ui_update(&mut state, UiUpdate::ShowDetail(Box::new(panel)));
        assert_eq!(state.detail.as_ref().map(|p| p.player_id), Some(3));
    }

    #[test]
    fn render_frame_does_not_panic_on_either_tab() {
        let backend = ratatui::backend::TestBackend::new(100, 40);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let mut state = test_state();
        state.roster.rows = vec![summary(1, "A"), summary(2, "B")];
        state.alert = Some(Notice::error("boom"));

        terminal.draw(|f| render_frame(f, &state)).unwrap();
        state.active_tab = TabId::Roster;
        state.detail = Some(DetailPanel::from_detail(&crate::testing::detail(1, "A")));
        terminal.draw(|f| render_frame(f, &state)).unwrap();
    }
}
