// Blocking notice overlay.
//
// Shown on top of everything while `ViewState::alert` is set; any of
// Enter/Esc/Space dismisses it.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use super::centered_rect;
use crate::protocol::{Notice, NoticeKind};

const DIALOG_WIDTH: u16 = 60;
const DIALOG_HEIGHT: u16 = 7;

pub fn render(frame: &mut Frame, area: Rect, notice: &Notice) {
    let dialog_area = centered_rect(DIALOG_WIDTH, DIALOG_HEIGHT, area);
    frame.render_widget(Clear, dialog_area);

    let (title, color) = title_and_color(notice.kind);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
        .title(Span::styled(
            title,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ));

    let lines = vec![
        Line::from(notice.message.clone()),
        Line::from(""),
        Line::from(Span::styled(
            "Enter to dismiss",
            Style::default().add_modifier(Modifier::DIM),
        )),
    ];

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: true })
        .style(Style::default().bg(Color::Black));
    frame.render_widget(paragraph, dialog_area);
}

fn title_and_color(kind: NoticeKind) -> (&'static str, Color) {
    match kind {
        NoticeKind::Success => (" Success ", Color::Green),
        NoticeKind::Error => (" Error ", Color::Red),
    }
}
