// Roster table widget: searchable, sortable, paginated list of all players.
//
// Rows come from the remote table load; search, sort and paging are local,
// over the loaded rows. Chrome text follows the configured language.

use std::cmp::Ordering;

use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState};
use ratatui::Frame;

use crate::config::Language;
use crate::roster::player::PlayerSummary;
use crate::table::{Column, COLUMNS};
use crate::tui::ViewState;

/// Active sort column and direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState {
    pub column: Column,
    pub descending: bool,
}

/// Localized table chrome.
struct Chrome {
    title: &'static str,
    search: &'static str,
    loading: &'static str,
    empty: &'static str,
    no_matches: &'static str,
}

fn chrome(language: Language) -> Chrome {
    match language {
        Language::Es => Chrome {
            title: "Jugadores",
            search: "Buscar",
            loading: "Cargando...",
            empty: "Ningún dato disponible en esta tabla",
            no_matches: "No se encontraron resultados",
        },
        Language::En => Chrome {
            title: "Players",
            search: "Search",
            loading: "Loading...",
            empty: "No data available in table",
            no_matches: "No matching records found",
        },
    }
}

/// "Page x of y (n players)" in the configured language.
pub fn page_info(language: Language, page: usize, pages: usize, total: usize) -> String {
    match language {
        Language::Es => format!("Página {} de {} ({} jugadores)", page + 1, pages.max(1), total),
        Language::En => format!("Page {} of {} ({} players)", page + 1, pages.max(1), total),
    }
}

// ---------------------------------------------------------------------------
// Search / sort / paging
// ---------------------------------------------------------------------------

/// Rows whose text columns contain `filter` (case-insensitive).
pub fn filter_rows<'a>(rows: &'a [PlayerSummary], filter: &str) -> Vec<&'a PlayerSummary> {
    let needle = filter.trim().to_lowercase();
    rows.iter()
        .filter(|r| {
            needle.is_empty()
                || r.name
                    .as_deref()
                    .is_some_and(|n| n.to_lowercase().contains(&needle))
                || r.team
                    .as_deref()
                    .is_some_and(|t| t.to_lowercase().contains(&needle))
                || r.position
                    .as_deref()
                    .is_some_and(|p| p.to_lowercase().contains(&needle))
        })
        .collect()
}

/// Order rows by a column. Absent values sort last in either direction.
pub fn sort_rows(rows: &mut [&PlayerSummary], sort: SortState) {
    rows.sort_by(|a, b| {
        let ord = match sort.column {
            Column::Name => cmp_text(a.name.as_ref(), b.name.as_ref()),
            Column::Team => cmp_text(a.team.as_ref(), b.team.as_ref()),
            Column::Position => cmp_text(a.position.as_ref(), b.position.as_ref()),
            Column::Age => cmp_num(a.age, b.age),
            Column::Height => cmp_num(a.height, b.height),
            Column::PointsPerGame => cmp_num(a.points_per_game, b.points_per_game),
            Column::Actions => SortKey::Present(Ordering::Equal),
        };
        match ord {
            SortKey::Present(o) if sort.descending => o.reverse(),
            SortKey::Present(o) => o,
            SortKey::Missing(o) => o,
        }
    });
}

enum SortKey {
    /// Both values present; direction applies.
    Present(Ordering),
    /// At least one value absent; fixed order.
    Missing(Ordering),
}

fn cmp_text(a: Option<&String>, b: Option<&String>) -> SortKey {
    match (a, b) {
        (Some(a), Some(b)) => SortKey::Present(a.to_lowercase().cmp(&b.to_lowercase())),
        (a, b) => SortKey::Missing(a.is_none().cmp(&b.is_none())),
    }
}

fn cmp_num(a: Option<f64>, b: Option<f64>) -> SortKey {
    match (a, b) {
        (Some(a), Some(b)) => SortKey::Present(a.total_cmp(&b)),
        (a, b) => SortKey::Missing(a.is_none().cmp(&b.is_none())),
    }
}

/// Filtered and sorted rows, in display order.
pub fn visible_rows(state: &ViewState) -> Vec<&PlayerSummary> {
    let mut rows = filter_rows(&state.roster.rows, &state.roster.filter_text);
    if let Some(sort) = state.roster.sort {
        sort_rows(&mut rows, sort);
    }
    rows
}

pub fn page_count(total: usize, page_size: usize) -> usize {
    total.div_ceil(page_size.max(1))
}

/// The slice of `rows` on `page`.
pub fn page_slice<T>(rows: &[T], page: usize, page_size: usize) -> &[T] {
    let size = page_size.max(1);
    let start = (page * size).min(rows.len());
    let end = (start + size).min(rows.len());
    &rows[start..end]
}

/// Keep page and cursor inside the current rows.
pub fn clamp_paging(state: &mut ViewState) {
    let total = visible_rows(state).len();
    let pages = page_count(total, state.page_size);
    if state.roster.page >= pages {
        state.roster.page = pages.saturating_sub(1);
    }
    let size = state.page_size.max(1);
    let on_page = total.saturating_sub(state.roster.page * size).min(size);
    if state.roster.cursor >= on_page {
        state.roster.cursor = on_page.saturating_sub(1);
    }
}

/// Row under the cursor, if any.
pub fn selected_row(state: &ViewState) -> Option<&PlayerSummary> {
    let rows = visible_rows(state);
    page_slice(&rows, state.roster.page, state.page_size)
        .get(state.roster.cursor)
        .copied()
}

/// Advance the sort: next sortable column ascending, then descending, then off.
pub fn cycle_sort(current: Option<SortState>) -> Option<SortState> {
    let sortable: Vec<Column> = COLUMNS.iter().copied().filter(|c| c.sortable()).collect();
    match current {
        None => Some(SortState {
            column: sortable[0],
            descending: false,
        }),
        Some(SortState {
            column,
            descending: false,
        }) => Some(SortState {
            column,
            descending: true,
        }),
        Some(SortState {
            column,
            descending: true,
        }) => {
            let i = sortable.iter().position(|c| *c == column).unwrap_or(0);
            sortable.get(i + 1).map(|&column| SortState {
                column,
                descending: false,
            })
        }
    }
}

// ---------------------------------------------------------------------------
// Render
// ---------------------------------------------------------------------------

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let text = chrome(state.language);

    if !state.roster_mounted {
        frame.render_widget(
            Paragraph::new(text.empty).block(Block::default().borders(Borders::ALL)),
            area,
        );
        return;
    }

    let rows = visible_rows(state);
    let total = rows.len();
    let pages = page_count(total, state.page_size);
    let page = page_slice(&rows, state.roster.page, state.page_size);

    let header = Row::new(COLUMNS.iter().map(|c| {
        let mut title = c.title(state.language).to_string();
        if let Some(sort) = state.roster.sort.filter(|s| s.column == *c) {
            title.push_str(if sort.descending { " ▼" } else { " ▲" });
        }
        Cell::from(title)
    }))
    .style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD));

    let body: Vec<Row> = if state.roster.loading && state.roster.rows.is_empty() {
        vec![Row::new(vec![Cell::from(text.loading)])]
    } else if page.is_empty() {
        let message = if state.roster.rows.is_empty() {
            text.empty
        } else {
            text.no_matches
        };
        vec![Row::new(vec![Cell::from(message)])]
    } else {
        page.iter()
            .map(|r| {
                Row::new(
                    COLUMNS
                        .iter()
                        .map(|c| Cell::from(c.cell(r, state.language))),
                )
            })
            .collect()
    };

    let search = if state.roster.filter_mode {
        format!(" {}: {}_ ", text.search, state.roster.filter_text)
    } else if state.roster.filter_text.is_empty() {
        format!(" {} ", text.title)
    } else {
        format!(" {} [{}: {}] ", text.title, text.search, state.roster.filter_text)
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title(Line::from(search))
        .title_bottom(Line::from(format!(
            " {} ",
            page_info(state.language, state.roster.page, pages, total)
        )));

    let widths = [
        Constraint::Min(18),
        Constraint::Length(8),
        Constraint::Length(11),
        Constraint::Length(6),
        Constraint::Length(8),
        Constraint::Length(6),
        Constraint::Length(14),
    ];

    let table = Table::new(body, widths)
        .header(header)
        .block(block)
        .row_highlight_style(Style::default().bg(Color::DarkGray))
        .highlight_symbol(">> ");

    let mut table_state = TableState::default();
    if !page.is_empty() {
        table_state.select(Some(state.roster.cursor));
    }
    frame.render_stateful_widget(table, area, &mut table_state);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
