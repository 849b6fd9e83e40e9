// Status bar and help bar.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::protocol::TabId;
use crate::roster::position::SLOT_COUNT;
use crate::tui::ViewState;

/// Render the status bar.
///
/// Layout: [tab bar] | Type: <type> | Picks n/5
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let mut spans = tab_spans(state.active_tab, state.roster_mounted);

    spans.push(Span::styled(" | ", Style::default().fg(Color::Gray)));
    let team_type = state
        .active_type
        .as_ref()
        .map(|t| t.to_string())
        .unwrap_or_else(|| "--".to_string());
    spans.push(Span::styled(
        format!("Type: {}", team_type),
        Style::default().fg(Color::White),
    ));

    spans.push(Span::styled(" | ", Style::default().fg(Color::Gray)));
    let picks = state.pick_count();
    let picks_color = if picks == SLOT_COUNT {
        Color::Green
    } else {
        Color::White
    };
    spans.push(Span::styled(
        format!("Picks {}/{}", picks, SLOT_COUNT),
        Style::default().fg(picks_color),
    ));

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::Black));
    frame.render_widget(paragraph, area);
}

/// Tab indicator spans, active tab highlighted. The roster tab is listed only
/// when it is mounted.
pub fn tab_spans(active: TabId, roster_mounted: bool) -> Vec<Span<'static>> {
    let mut tabs = vec![(TabId::Builder, "1:Builder")];
    if roster_mounted {
        tabs.push((TabId::Roster, "2:Roster"));
    }

    let mut spans = vec![Span::raw(" ")];
    for (tab_id, label) in tabs {
        let style = if tab_id == active {
            Style::default()
                .fg(Color::Black)
                .bg(Color::White)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        spans.push(Span::styled(format!("[{}]", label), style));
        spans.push(Span::raw(" "));
    }
    spans
}

/// Key hints for the current context.
pub fn help_text(state: &ViewState) -> &'static str {
    if state.alert.is_some() {
        return " Enter:Dismiss";
    }
    if state.detail.is_some() {
        return " Esc:Close";
    }
    match state.active_tab {
        TabId::Builder => {
            " q:Quit | Tab:Switch | ↑↓:Focus | ←→:Choose | Del:Clear | Enter:Select/Submit"
        }
        TabId::Roster if state.roster.filter_mode => " Enter:Apply | Esc:Clear search",
        TabId::Roster => {
            " q:Quit | Tab:Switch | ↑↓:Row | ←→:Page | /:Search | s:Sort | Enter:Details"
        }
    }
}

pub fn render_help(frame: &mut Frame, area: Rect, state: &ViewState) {
    let paragraph = Paragraph::new(Line::from(Span::styled(
        help_text(state),
        Style::default().fg(Color::White).add_modifier(Modifier::DIM),
    )))
    .style(Style::default().bg(Color::DarkGray));
    frame.render_widget(paragraph, area);
}
