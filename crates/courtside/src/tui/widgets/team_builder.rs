// Team builder widget: type buttons, five position selectors, submit control.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::roster::position::Position;
use crate::tui::layout::build_builder_layout;
use crate::tui::{BuilderFocus, SelectorView, ViewState};

/// Text of an empty selector.
pub const SELECT_PROMPT: &str = "-- Select a player --";

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let layout = build_builder_layout(area);

    render_types(frame, layout.types, state);
    for (position, rect) in Position::ALL.iter().zip(layout.selectors.iter()) {
        render_selector(frame, *rect, state, *position);
    }
    render_submit(frame, layout.submit, state);
}

fn focus_border(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    }
}

fn render_types(frame: &mut Frame, area: Rect, state: &ViewState) {
    let focused = state.focus == BuilderFocus::Types;
    let mut spans = Vec::new();
    for (i, team_type) in state.team_types.iter().enumerate() {
        let active = state.active_type.as_ref() == Some(team_type);
        let mut style = if active {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Green)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        if focused && i == state.type_cursor {
            style = style.add_modifier(Modifier::UNDERLINED);
        }
        spans.push(Span::styled(format!(" {} ", team_type), style));
        spans.push(Span::raw(" "));
    }

    let paragraph = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(focus_border(focused))
            .title("Team Type"),
    );
    frame.render_widget(paragraph, area);
}

/// Text shown inside a position selector.
pub fn selector_text(selector: &SelectorView) -> String {
    let Some(options) = selector.options.as_ref() else {
        return SELECT_PROMPT.to_string();
    };
    match selector.selected_index() {
        Some(i) => format!("◀ {} ▶  ({}/{})", options[i].option_label(), i + 1, options.len()),
        None if options.is_empty() => SELECT_PROMPT.to_string(),
        None => format!("◀ {} ▶  ({} players)", SELECT_PROMPT, options.len()),
    }
}

fn render_selector(frame: &mut Frame, area: Rect, state: &ViewState, position: Position) {
    let focused = state.focus == BuilderFocus::Selector(position);
    let selector = state.selector(position);
    let style = if selector.selected.is_some() {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::Gray)
    };

    let paragraph = Paragraph::new(Span::styled(selector_text(selector), style)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(focus_border(focused))
            .title(format!("{} ({})", position.label(), position.abbrev())),
    );
    frame.render_widget(paragraph, area);
}

fn render_submit(frame: &mut Frame, area: Rect, state: &ViewState) {
    let focused = state.focus == BuilderFocus::Submit;
    let (label, style) = if state.submit_enabled {
        (
            " Create Team ",
            Style::default()
                .fg(Color::Black)
                .bg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        (
            " Create Team ",
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM),
        )
    };

    let paragraph = Paragraph::new(Span::styled(label, style))
        .block(Block::default().borders(Borders::ALL).border_style(focus_border(focused)));
    frame.render_widget(paragraph, area);
}
