// Player detail modal: one player's full record as label/value rows.

use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;
use ratatui::widgets::{Block, Borders, Cell, Clear, Row, Table};
use ratatui::Frame;

use super::centered_rect;
use crate::roster::player::DetailPanel;

const DIALOG_WIDTH: u16 = 56;
const LABEL_WIDTH: u16 = 20;

pub fn render(frame: &mut Frame, area: Rect, panel: &DetailPanel) {
    // Borders plus one row per field.
    let height = panel.rows.len() as u16 + 2;
    let dialog_area = centered_rect(DIALOG_WIDTH, height, area);
    frame.render_widget(Clear, dialog_area);

    let rows: Vec<Row> = panel
        .rows
        .iter()
        .map(|(label, value)| {
            Row::new(vec![
                Cell::from(Span::styled(
                    *label,
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Cell::from(value.clone()),
            ])
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(format!(" {} ", panel.title))
        .title_bottom(" Esc to close ");

    let table = Table::new(rows, [Constraint::Length(LABEL_WIDTH), Constraint::Min(10)])
        .block(block)
        .style(Style::default().bg(Color::Black));
    frame.render_widget(table, dialog_area);
}
