use alloy_primitives::U256;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState};
use ratatui::Frame;

pub mod layout;

use crate::app::{App, InputMode, Section, StatusLevel};
use crate::domain::fields::FieldRow;
use crate::domain::units::{format_ether, format_gwei, format_wei};

pub fn draw(f: &mut Frame, app: &mut App) {
    let areas = layout::areas(f.size());

    draw_header(f, areas.header, app);
    draw_table(f, areas.table, app);
    draw_details(f, areas.details, app);
    draw_status_line(f, areas.status_line, app);
    draw_command_line(f, areas.command_line, app);
}

fn draw_header(f: &mut Frame, area: Rect, app: &App) {
    let mut spans: Vec<Span> = Vec::new();
    for section in Section::ALL {
        let style = if section == app.active_section {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        spans.push(Span::styled(
            format!(" {}:{} ", section.shortcut(), section.title()),
            style,
        ));
    }
    let source = if app.loading {
        "loading…".to_string()
    } else {
        app.source.clone()
    };
    spans.push(Span::styled(
        format!("  [{source}]"),
        Style::default().fg(Color::DarkGray),
    ));

    let header = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL).title(" scry "));
    f.render_widget(header, area);
}

/// Header cell text: label plus direction arrow, plus a priority badge when
/// more than one field is active.
fn header_cell(app: &App, section: Section, field: &str, label: &str) -> String {
    let info = app.sort_info_for(section, field);
    if !info.active {
        return label.to_string();
    }
    let arrow = match info.direction {
        Some(d) if d.is_ascending() => "▲",
        Some(_) => "▼",
        None => "",
    };
    if app.sort_for(section).is_multi_field_sort() {
        format!("{label} {arrow}{}", info.priority)
    } else {
        format!("{label} {arrow}")
    }
}

fn draw_table(f: &mut Frame, area: Rect, app: &mut App) {
    let section = app.active_section;
    let columns = section.columns();
    let cursor = app.cursor(section);

    let header_cells: Vec<Cell> = columns
        .iter()
        .enumerate()
        .map(|(idx, column)| {
            let text = header_cell(app, section, column.field, column.label);
            let mut style = Style::default().add_modifier(Modifier::BOLD);
            if app.sort_info_for(section, column.field).active {
                style = style.fg(Color::Cyan);
            }
            if idx == cursor.column {
                style = style.add_modifier(Modifier::REVERSED);
            }
            Cell::from(text).style(style)
        })
        .collect();
    let header = Row::new(header_cells).height(1);

    let rows = table_rows(app, section);
    let widths: Vec<ratatui::layout::Constraint> = columns
        .iter()
        .map(|c| ratatui::layout::Constraint::Length(c.width))
        .collect();

    let title = format!(" {} ({}) ", section.title(), app.row_count(section));
    let table = Table::new(rows, widths)
        .header(header)
        .column_spacing(1)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));

    let mut state = TableState::default();
    if app.row_count(section) > 0 {
        state.select(Some(cursor.row));
    }
    f.render_stateful_widget(table, area, &mut state);
}

fn table_rows(app: &mut App, section: Section) -> Vec<Row<'static>> {
    match section {
        Section::Blocks => {
            let blocks = app.blocks.clone();
            blocks
                .iter()
                .map(|b| {
                    Row::new(vec![
                        b.number.to_string(),
                        b.timestamp.format("%H:%M:%S").to_string(),
                        b.tx_count.to_string(),
                        format_wei(U256::from(b.gas_used)),
                        format_gwei(b.base_fee_wei),
                        app.short_display(&b.miner),
                    ])
                })
                .collect()
        }
        Section::Transactions => {
            let txs = app.txs.clone();
            txs.iter()
                .map(|t| {
                    let to = match &t.to {
                        Some(to) => app.short_display(to),
                        None => "(create)".to_string(),
                    };
                    Row::new(vec![
                        app.short_display(&t.hash),
                        t.block_number.to_string(),
                        app.short_display(&t.from),
                        to,
                        format_ether(t.value_wei),
                        format_wei(U256::from(t.gas_used)),
                        t.status.label().to_string(),
                    ])
                })
                .collect()
        }
        Section::Contracts => {
            let contracts = app.contracts.clone();
            contracts
                .iter()
                .map(|c| {
                    Row::new(vec![
                        c.name.clone(),
                        app.short_display(&c.address),
                        c.deployed_block.to_string(),
                        format_wei(U256::from(c.tx_count)),
                        format_ether(c.balance_wei),
                        if c.verified { "yes" } else { "no" }.to_string(),
                    ])
                })
                .collect()
        }
        Section::Monitors => {
            let monitors = app.monitors.clone();
            monitors
                .iter()
                .map(|m| {
                    Row::new(vec![
                        m.name.clone(),
                        app.short_display(&m.address),
                        m.last_seen.format("%Y-%m-%d %H:%M").to_string(),
                        m.event_count.to_string(),
                        if m.enabled { "yes" } else { "no" }.to_string(),
                    ])
                })
                .collect()
        }
        Section::Names => {
            let names = app.names.clone();
            names
                .iter()
                .map(|n| {
                    Row::new(vec![
                        n.name.clone(),
                        app.short_display(&n.address),
                        n.registered.format("%Y-%m-%d").to_string(),
                        n.expires
                            .map(|t| t.format("%Y-%m-%d").to_string())
                            .unwrap_or_else(|| "—".to_string()),
                    ])
                })
                .collect()
        }
    }
}

fn draw_details(f: &mut Frame, area: Rect, app: &mut App) {
    let rows = app.detail_rows();
    let mut lines: Vec<Line> = Vec::new();
    for row in rows {
        match row {
            FieldRow::Heading(label) => {
                lines.push(Line::from(Span::styled(
                    label,
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                )));
            }
            FieldRow::Value { label, value } => {
                lines.push(Line::from(vec![
                    Span::styled(format!("{label:>12}  "), Style::default().fg(Color::DarkGray)),
                    Span::raw(value),
                ]));
            }
        }
    }
    if lines.is_empty() {
        lines.push(Line::from(Span::styled(
            "no selection",
            Style::default().fg(Color::DarkGray),
        )));
    }

    let details = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Details "));
    f.render_widget(details, area);
}

fn draw_status_line(f: &mut Frame, area: Rect, app: &App) {
    let line = if let Some((text, level)) = app
        .status
        .as_ref()
        .map(|s| (s.text.as_str(), s.level))
    {
        let color = match level {
            StatusLevel::Info => Color::Green,
            StatusLevel::Warn => Color::Yellow,
            StatusLevel::Error => Color::Red,
        };
        Line::from(Span::styled(text.to_string(), Style::default().fg(color)))
    } else if let Some(summary) = app.sort_summary() {
        Line::from(Span::styled(
            format!("sort: {summary}"),
            Style::default().fg(Color::Cyan),
        ))
    } else {
        Line::from(Span::styled(
            "s sort column  c clear  h/l column  j/k row  e export  : command  q quit",
            Style::default().fg(Color::DarkGray),
        ))
    };
    f.render_widget(Paragraph::new(line), area);
}

fn draw_command_line(f: &mut Frame, area: Rect, app: &App) {
    let line = match app.input_mode {
        InputMode::Command => Line::from(vec![
            Span::styled(":", Style::default().fg(Color::Yellow)),
            Span::raw(app.command_buffer.clone()),
            Span::styled("▏", Style::default().fg(Color::Yellow)),
        ]),
        InputMode::Normal => Line::from(""),
    };
    f.render_widget(Paragraph::new(line).alignment(Alignment::Left), area);
}

/// Map an x coordinate inside the table area to a column index. Mirrors the
/// table's fixed widths, 1-cell spacing, and 1-cell border offset. Columns
/// clipped by a narrow terminal are not clickable past the table's edge.
pub fn column_at(section: Section, table_area: Rect, x: u16) -> Option<usize> {
    let limit = table_area.right().saturating_sub(1);
    if x >= limit {
        return None;
    }
    let mut start = table_area.x + 1;
    for (idx, column) in section.columns().iter().enumerate() {
        let end = start + column.width;
        if x >= start && x < end {
            return Some(idx);
        }
        start = end + 1;
    }
    None
}

/// Y coordinate of the header row inside the table area.
pub fn header_row_y(table_area: Rect) -> u16 {
    table_area.y + 1
}
