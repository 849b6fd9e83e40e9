// UI capabilities the controllers drive.
//
// The controllers never talk to the terminal directly. They call these traits,
// which the app implements by forwarding `UiUpdate`s to the TUI and which tests
// implement with recording fakes.

use crate::protocol::Notice;
use crate::roster::draft::TeamType;
use crate::roster::player::{DetailPanel, PlayerId, PositionPlayer};
use crate::roster::position::Position;

/// The team builder's widgets: type buttons, five selectors, submit control.
pub trait BuilderView {
    /// Mark `team_type` as the only active type button.
    fn activate_type(&mut self, team_type: &TeamType);

    /// Re-render every position selector empty.
    fn reset_selectors(&mut self);

    /// Fill one selector's option list, showing `selected` as chosen.
    fn fill_selector(
        &mut self,
        position: Position,
        options: &[PositionPlayer],
        selected: Option<PlayerId>,
    );

    /// Reflect the recorded pick for one position.
    fn show_pick(&mut self, position: Position, player: Option<PlayerId>);

    fn set_submit_enabled(&mut self, enabled: bool);
}

/// Application-wide surfaces: blocking alerts and full reload.
pub trait Shell {
    fn alert(&mut self, notice: Notice);

    /// Discard all session state and start over as on startup.
    fn reload_page(&mut self);
}

/// A paginated table fed from a remote list endpoint.
pub trait TableWidget {
    /// Attach the table to a list endpoint and load it.
    fn bind_remote_source(&mut self, source: &str);

    /// Re-fetch from the bound endpoint.
    fn reload(&mut self);
}

/// An overlay that shows one player's record.
pub trait ModalSurface {
    fn show_modal(&mut self, panel: DetailPanel);
}
