// Keyboard input handling and command dispatch.
//
// Translates crossterm key events into UserCommand messages sent to the
// app event loop, or into local ViewState mutations (focus, search, paging).
// Selections are never applied locally: the builder confirms them with
// `UiUpdate::PickRecorded`.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::widgets::roster_table::{clamp_paging, cycle_sort, page_count, selected_row, visible_rows};
use super::{BuilderFocus, ViewState};
use crate::protocol::{TabId, UserCommand};
use crate::roster::position::Position;

/// Handle a keyboard event.
///
/// Returns `Some(UserCommand)` when the key press should be forwarded to the
/// app event loop. Returns `None` when it was handled locally or ignored.
pub fn handle_key(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    // Crossterm reports Release too on some platforms.
    if key_event.kind != KeyEventKind::Press {
        return None;
    }

    if key_event.modifiers.contains(KeyModifiers::CONTROL) && key_event.code == KeyCode::Char('c')
    {
        return Some(UserCommand::Quit);
    }

    // Overlays capture all input until dismissed.
    if view_state.alert.is_some() {
        if matches!(key_event.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
            view_state.alert = None;
        }
        return None;
    }
    if view_state.detail.is_some() {
        if matches!(
            key_event.code,
            KeyCode::Enter | KeyCode::Esc | KeyCode::Char('q')
        ) {
            view_state.detail = None;
        }
        return None;
    }

    if view_state.active_tab == TabId::Roster && view_state.roster.filter_mode {
        handle_filter_mode(key_event, view_state);
        return None;
    }

    match key_event.code {
        KeyCode::Char('q') => return Some(UserCommand::Quit),
        KeyCode::Tab | KeyCode::BackTab => {
            let next = match view_state.active_tab {
                TabId::Builder => TabId::Roster,
                TabId::Roster => TabId::Builder,
            };
            return switch_tab(view_state, next);
        }
        KeyCode::Char('1') => return switch_tab(view_state, TabId::Builder),
        KeyCode::Char('2') => return switch_tab(view_state, TabId::Roster),
        _ => {}
    }

    match view_state.active_tab {
        TabId::Builder => handle_builder_key(key_event, view_state),
        TabId::Roster => handle_roster_key(key_event, view_state),
    }
}

/// Make `tab` visible. Reports the activation to the app only on a change.
fn switch_tab(view_state: &mut ViewState, tab: TabId) -> Option<UserCommand> {
    if tab == TabId::Roster && !view_state.roster_mounted {
        return None;
    }
    if view_state.active_tab == tab {
        return None;
    }
    view_state.active_tab = tab;
    Some(UserCommand::ActivateTab(tab))
}

// ---------------------------------------------------------------------------
// Builder tab
// ---------------------------------------------------------------------------

fn handle_builder_key(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    match (key_event.code, view_state.focus) {
        (KeyCode::Up | KeyCode::Char('k'), focus) => {
            view_state.focus = focus.prev();
            None
        }
        (KeyCode::Down | KeyCode::Char('j'), focus) => {
            view_state.focus = focus.next();
            None
        }

        (KeyCode::Left | KeyCode::Char('h'), BuilderFocus::Types) => {
            view_state.type_cursor = view_state.type_cursor.saturating_sub(1);
            None
        }
        (KeyCode::Right | KeyCode::Char('l'), BuilderFocus::Types) => {
            if view_state.type_cursor + 1 < view_state.team_types.len() {
                view_state.type_cursor += 1;
            }
            None
        }
        (KeyCode::Enter, BuilderFocus::Types) => view_state
            .team_types
            .get(view_state.type_cursor)
            .cloned()
            .map(UserCommand::SelectTeamType),

        (KeyCode::Left | KeyCode::Char('h'), BuilderFocus::Selector(position)) => {
            step_selector(view_state, position, false)
        }
        (KeyCode::Right | KeyCode::Char('l'), BuilderFocus::Selector(position)) => {
            step_selector(view_state, position, true)
        }
        (KeyCode::Delete | KeyCode::Backspace, BuilderFocus::Selector(position)) => {
            view_state
                .selector(position)
                .selected
                .map(|_| UserCommand::SelectPlayer {
                    position,
                    player_id: None,
                })
        }
        (KeyCode::Enter, BuilderFocus::Selector(_)) => {
            view_state.focus = view_state.focus.next();
            None
        }

        (KeyCode::Enter, BuilderFocus::Submit) | (KeyCode::Char('s'), _) => {
            if view_state.submit_enabled {
                Some(UserCommand::SubmitTeam)
            } else {
                None
            }
        }

        _ => None,
    }
}

/// Move a selector to its next or previous option. Stepping back past the
/// first option clears the selector.
fn step_selector(
    view_state: &ViewState,
    position: Position,
    forward: bool,
) -> Option<UserCommand> {
    let selector = view_state.selector(position);
    let options = selector.options.as_ref().filter(|o| !o.is_empty())?;
    let current = selector.selected_index();

    let target = match (current, forward) {
        (None, true) => Some(0),
        (Some(i), true) => Some((i + 1).min(options.len() - 1)),
        (None, false) => return None,
        (Some(0), false) => None,
        (Some(i), false) => Some(i - 1),
    };
    if target == current {
        return None;
    }

    Some(UserCommand::SelectPlayer {
        position,
        player_id: target.map(|i| options[i].id),
    })
}

// ---------------------------------------------------------------------------
// Roster tab
// ---------------------------------------------------------------------------

fn handle_roster_key(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Up | KeyCode::Char('k') => {
            view_state.roster.cursor = view_state.roster.cursor.saturating_sub(1);
            None
        }
        KeyCode::Down | KeyCode::Char('j') => {
            view_state.roster.cursor += 1;
            clamp_paging(view_state);
            None
        }
        KeyCode::Left | KeyCode::PageUp | KeyCode::Char('h') => {
            view_state.roster.page = view_state.roster.page.saturating_sub(1);
            view_state.roster.cursor = 0;
            None
        }
        KeyCode::Right | KeyCode::PageDown | KeyCode::Char('l') => {
            let pages = page_count(visible_rows(view_state).len(), view_state.page_size);
            if view_state.roster.page + 1 < pages {
                view_state.roster.page += 1;
                view_state.roster.cursor = 0;
            }
            None
        }
        KeyCode::Char('/') => {
            view_state.roster.filter_mode = true;
            None
        }
        KeyCode::Esc => {
            view_state.roster.filter_text.clear();
            view_state.roster.page = 0;
            view_state.roster.cursor = 0;
            None
        }
        KeyCode::Char('s') => {
            view_state.roster.sort = cycle_sort(view_state.roster.sort);
            view_state.roster.page = 0;
            view_state.roster.cursor = 0;
            None
        }
        KeyCode::Enter => selected_row(view_state).map(|row| UserCommand::ViewPlayer(row.id)),
        _ => None,
    }
}

/// Search input. Printable characters edit the text, Enter keeps it, Esc
/// clears it. Each edit returns to the first page.
fn handle_filter_mode(key_event: KeyEvent, view_state: &mut ViewState) {
    match key_event.code {
        KeyCode::Esc => {
            view_state.roster.filter_mode = false;
            view_state.roster.filter_text.clear();
        }
        KeyCode::Enter => {
            view_state.roster.filter_mode = false;
        }
        KeyCode::Backspace => {
            view_state.roster.filter_text.pop();
        }
        KeyCode::Char(c) => {
            view_state.roster.filter_text.push(c);
        }
        _ => return,
    }
    view_state.roster.page = 0;
    view_state.roster.cursor = 0;
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::Notice;
    use crate::roster::draft::TeamType;
    use crate::roster::player::DetailPanel;
    use crate::testing::{detail, player, summary};
    use crate::tui::{SelectorView, TuiOptions};
    use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn ctrl_key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::CONTROL,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn test_state() -> ViewState {
        ViewState::new(TuiOptions {
            team_types: ["ofensivo", "defensivo", "equilibrado"]
                .into_iter()
                .filter_map(TeamType::new)
                .collect(),
            ..TuiOptions::default()
        })
    }

    fn with_center_options(state: &mut ViewState, selected: Option<i64>) {
        state.selectors[Position::Center.index()] = SelectorView {
            options: Some(vec![player(9, "A"), player(10, "B")]),
            selected,
        };
        state.focus = BuilderFocus::Selector(Position::Center);
    }

    // -- Global --

    #[test]
    fn ctrl_c_quits_even_with_alert() {
        let mut state = test_state();
        state.alert = Some(Notice::error("x"));
        assert_eq!(
            handle_key(ctrl_key(KeyCode::Char('c')), &mut state),
            Some(UserCommand::Quit)
        );
    }

    #[test]
    fn release_events_are_ignored() {
        let mut state = test_state();
        let mut ev = key(KeyCode::Char('q'));
        ev.kind = KeyEventKind::Release;
        assert_eq!(handle_key(ev, &mut state), None);
    }

    #[test]
    fn alert_swallows_input_until_dismissed() {
        let mut state = test_state();
        state.alert = Some(Notice::error("x"));
        assert_eq!(handle_key(key(KeyCode::Char('q')), &mut state), None);
        assert!(state.alert.is_some());
        handle_key(key(KeyCode::Enter), &mut state);
        assert!(state.alert.is_none());
    }

    #[test]
    fn detail_modal_closes_on_esc() {
        let mut state = test_state();
        state.detail = Some(DetailPanel::from_detail(&detail(1, "A")));
        assert_eq!(handle_key(key(KeyCode::Tab), &mut state), None);
        handle_key(key(KeyCode::Esc), &mut state);
        assert!(state.detail.is_none());
    }

    #[test]
    fn switching_tab_reports_activation_once() {
        let mut state = test_state();
        assert_eq!(
            handle_key(key(KeyCode::Char('2')), &mut state),
            Some(UserCommand::ActivateTab(TabId::Roster))
        );
        assert_eq!(handle_key(key(KeyCode::Char('2')), &mut state), None);
        assert_eq!(
            handle_key(key(KeyCode::Tab), &mut state),
            Some(UserCommand::ActivateTab(TabId::Builder))
        );
    }

    #[test]
    fn roster_tab_unavailable_when_unmounted() {
        let mut state = ViewState::new(TuiOptions {
            roster_mounted: false,
            ..TuiOptions::default()
        });
        assert_eq!(handle_key(key(KeyCode::Tab), &mut state), None);
        assert_eq!(state.active_tab, TabId::Builder);
    }

    // -- Builder --

    #[test]
    fn enter_on_types_selects_highlighted_type() {
        let mut state = test_state();
        handle_key(key(KeyCode::Right), &mut state);
        handle_key(key(KeyCode::Right), &mut state);
        handle_key(key(KeyCode::Right), &mut state);
        assert_eq!(state.type_cursor, 2, "cursor stops at the last type");

        assert_eq!(
            handle_key(key(KeyCode::Enter), &mut state),
            Some(UserCommand::SelectTeamType(TeamType::new("equilibrado").unwrap()))
        );
    }

    #[test]
    fn right_on_selector_selects_next_option() {
        let mut state = test_state();
        with_center_options(&mut state, None);
        assert_eq!(
            handle_key(key(KeyCode::Right), &mut state),
            Some(UserCommand::SelectPlayer {
                position: Position::Center,
                player_id: Some(9)
            })
        );

        with_center_options(&mut state, Some(9));
        assert_eq!(
            handle_key(key(KeyCode::Right), &mut state),
            Some(UserCommand::SelectPlayer {
                position: Position::Center,
                player_id: Some(10)
            })
        );

        with_center_options(&mut state, Some(10));
        assert_eq!(handle_key(key(KeyCode::Right), &mut state), None, "already last");
    }

    #[test]
    fn left_past_first_option_clears() {
        let mut state = test_state();
        with_center_options(&mut state, Some(9));
        assert_eq!(
            handle_key(key(KeyCode::Left), &mut state),
            Some(UserCommand::SelectPlayer {
                position: Position::Center,
                player_id: None
            })
        );
        with_center_options(&mut state, None);
        assert_eq!(handle_key(key(KeyCode::Left), &mut state), None);
    }

    #[test]
    fn unloaded_selector_ignores_arrows() {
        let mut state = test_state();
        state.focus = BuilderFocus::Selector(Position::PointGuard);
        assert_eq!(handle_key(key(KeyCode::Right), &mut state), None);
    }

    #[test]
    fn delete_clears_selected_pick() {
        let mut state = test_state();
        with_center_options(&mut state, Some(10));
        assert_eq!(
            handle_key(key(KeyCode::Delete), &mut state),
            Some(UserCommand::SelectPlayer {
                position: Position::Center,
                player_id: None
            })
        );
    }

    #[test]
    fn submit_only_when_enabled() {
        let mut state = test_state();
        state.focus = BuilderFocus::Submit;
        assert_eq!(handle_key(key(KeyCode::Enter), &mut state), None);

        state.submit_enabled = true;
        assert_eq!(
            handle_key(key(KeyCode::Enter), &mut state),
            Some(UserCommand::SubmitTeam)
        );
    }

    #[test]
    fn arrows_move_focus() {
        let mut state = test_state();
        handle_key(key(KeyCode::Down), &mut state);
        assert_eq!(state.focus, BuilderFocus::Selector(Position::PointGuard));
        handle_key(key(KeyCode::Up), &mut state);
        assert_eq!(state.focus, BuilderFocus::Types);
    }

    // -- Roster --

    fn roster_state() -> ViewState {
        let mut state = test_state();
        state.active_tab = TabId::Roster;
        state.page_size = 2;
        state.roster.rows = vec![summary(1, "Ana"), summary(2, "Ben"), summary(3, "Cid")];
        state
    }

    #[test]
    fn enter_on_row_requests_details() {
        let mut state = roster_state();
        handle_key(key(KeyCode::Down), &mut state);
        assert_eq!(
            handle_key(key(KeyCode::Enter), &mut state),
            Some(UserCommand::ViewPlayer(2))
        );
    }

    #[test]
    fn paging_moves_between_pages() {
        let mut state = roster_state();
        handle_key(key(KeyCode::Right), &mut state);
        assert_eq!(state.roster.page, 1);
        handle_key(key(KeyCode::Right), &mut state);
        assert_eq!(state.roster.page, 1, "no page past the last");
        handle_key(key(KeyCode::Down), &mut state);
        assert_eq!(state.roster.cursor, 0, "one row on the last page");
        assert_eq!(
            handle_key(key(KeyCode::Enter), &mut state),
            Some(UserCommand::ViewPlayer(3))
        );
    }

    #[test]
    fn search_mode_captures_text() {
        let mut state = roster_state();
        handle_key(key(KeyCode::Char('/')), &mut state);
        assert!(state.roster.filter_mode);
        for c in "ben".chars() {
            handle_key(key(KeyCode::Char(c)), &mut state);
        }
        assert_eq!(
            handle_key(key(KeyCode::Char('q')), &mut state),
            None,
            "q is text while searching"
        );
        handle_key(key(KeyCode::Backspace), &mut state);
        handle_key(key(KeyCode::Enter), &mut state);
        assert!(!state.roster.filter_mode);
        assert_eq!(state.roster.filter_text, "ben");
        assert_eq!(
            handle_key(key(KeyCode::Enter), &mut state),
            Some(UserCommand::ViewPlayer(2))
        );
    }

    #[test]
    fn sort_key_cycles_sort() {
        let mut state = roster_state();
        handle_key(key(KeyCode::Char('s')), &mut state);
        assert!(state.roster.sort.is_some());
    }
}
