// Screen layout: panel arrangement and sizing.
//
// +--------------------------------------------------+
// | Status Bar (1 row): tabs, team type, picks        |
// +--------------------------------------------------+
// |                                                  |
// | Main Panel (fill): team builder or roster table  |
// |                                                  |
// +--------------------------------------------------+
// | Help Bar (1 row)                                  |
// +--------------------------------------------------+
//
// The builder tab further splits the main panel into the type buttons, the
// five position selectors, and the submit control.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Resolved screen areas for each zone.
#[derive(Debug, Clone)]
pub struct AppLayout {
    pub status_bar: Rect,
    pub main_panel: Rect,
    pub help_bar: Rect,
}

/// Areas of the team builder inside the main panel.
#[derive(Debug, Clone)]
pub struct BuilderLayout {
    /// Row of team type buttons.
    pub types: Rect,
    /// One area per position selector, in position order.
    pub selectors: Vec<Rect>,
    pub submit: Rect,
}

pub fn build_layout(area: Rect) -> AppLayout {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // status bar
            Constraint::Min(8),    // main panel
            Constraint::Length(1), // help bar
        ])
        .split(area);

    AppLayout {
        status_bar: vertical[0],
        main_panel: vertical[1],
        help_bar: vertical[2],
    }
}

/// Split the main panel for the builder tab: types(3) | 5 x selector(3) | submit(3).
pub fn build_builder_layout(area: Rect) -> BuilderLayout {
    let mut constraints = vec![Constraint::Length(3)];
    constraints.extend(std::iter::repeat(Constraint::Length(3)).take(5));
    constraints.push(Constraint::Length(3));
    constraints.push(Constraint::Min(0));

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    BuilderLayout {
        types: rows[0],
        selectors: rows[1..6].to_vec(),
        submit: rows[6],
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
