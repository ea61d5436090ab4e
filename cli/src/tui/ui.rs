use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Row, Table, Wrap},
    Frame,
};
use taskboard_core::{NoticeKind, Status, Urgency};

use crate::tui::app::{App, InputMode};

pub fn draw(f: &mut Frame, app: &mut App) {
    let size = f.area();

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(0)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(1),    // Content
            Constraint::Length(3), // Input / notice
            Constraint::Length(1), // Help
        ])
        .split(size);

    draw_header(f, app, main_chunks[0]);

    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(60),
            Constraint::Percentage(40),
        ])
        .split(main_chunks[1]);

    draw_task_list(f, app, content_chunks[0]);
    draw_detail_view(f, app, content_chunks[1]);
    draw_status_line(f, app, main_chunks[2]);

    let help = match app.input_mode {
        InputMode::Normal => "j/k: Navigate | space: Toggle | a: Add | d: Delete | /: Search | f: Filter | r: Reload | q: Quit",
        InputMode::Adding => "Enter: Save | Esc: Cancel | e.g. Buy milk due:tomorrow",
        InputMode::Searching => "Enter: Keep search | Esc: Clear search",
        InputMode::ConfirmDelete => "y: Delete | any other key: Cancel",
    };
    let footer = Paragraph::new(help)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    f.render_widget(footer, main_chunks[3]);

    app.confirm_area = None;
    if matches!(app.input_mode, InputMode::ConfirmDelete) {
        let popup = confirm_dialog_area(size);
        draw_confirm_dialog(f, app, popup);
        app.confirm_area = Some(popup);
    }
}

fn draw_header(f: &mut Frame, app: &App, area: Rect) {
    let state = app.session.state();
    let mut spans = vec![
        Span::styled("TASKBOARD", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
        Span::raw(format!("  {} tasks", state.task_count())),
        Span::raw("  filter: "),
        Span::styled(app.filter().as_str(), Style::default().fg(Color::Yellow)),
    ];
    if !state.search().is_empty() {
        spans.push(Span::raw("  search: "));
        spans.push(Span::styled(format!("\"{}\"", state.search()), Style::default().fg(Color::Yellow)));
    }

    let header = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_type(BorderType::Rounded));
    f.render_widget(header, area);
}

fn urgency_style(urgency: Urgency) -> Style {
    match urgency {
        Urgency::Completed => Style::default().fg(Color::DarkGray).add_modifier(Modifier::CROSSED_OUT),
        Urgency::Overdue => Style::default().fg(Color::Red),
        Urgency::DueSoon => Style::default().fg(Color::Yellow),
        Urgency::Pending => Style::default(),
    }
}

fn draw_task_list(f: &mut Frame, app: &mut App, area: Rect) {
    let rows: Vec<Row> = app.rows().into_iter().map(|row| {
        let status_icon = match row.task.status {
            Status::Completed => "✔",
            Status::Pending => "☐",
        };
        let style = urgency_style(row.urgency);

        Row::new(vec![
            Span::raw(status_icon),
            Span::raw(row.task.due_date.format("%b %-d, %Y").to_string()),
            Span::raw(row.urgency.label().unwrap_or("")),
            Span::raw(row.task.title.clone()),
        ])
        .style(style)
    }).collect();

    let empty = rows.is_empty();
    let table = Table::new(
        rows,
        [
            Constraint::Length(3),  // Status
            Constraint::Length(13), // Due
            Constraint::Length(9),  // Flag
            Constraint::Min(10),    // Title
        ]
    )
    .header(Row::new(vec!["St", "Due", "", "Task"]).style(Style::default().fg(Color::Yellow)))
    .block(Block::default().title(" Tasks ").borders(Borders::ALL).border_type(BorderType::Rounded))
    .row_highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
    .highlight_symbol(">> ");

    f.render_stateful_widget(table, area, &mut app.state);

    if empty {
        let inner = Rect {
            x: area.x + 2,
            y: area.y + 2,
            width: area.width.saturating_sub(4),
            height: 1.min(area.height.saturating_sub(3)),
        };
        let hint = Paragraph::new("No tasks to show")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center);
        f.render_widget(hint, inner);
    }
}

fn draw_detail_view(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default().title(" Detail ").borders(Borders::ALL).border_type(BorderType::Rounded);

    let rows = app.rows();
    let Some(row) = app.state.selected().and_then(|i| rows.get(i)) else {
        f.render_widget(block, area);
        return;
    };
    let task = row.task;

    let mut detail_text = vec![
        Line::from(vec![
            Span::styled("Title: ", Style::default().fg(Color::Blue)),
            Span::styled(task.title.as_str(), Style::default().add_modifier(Modifier::BOLD)),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("ID: ", Style::default().fg(Color::DarkGray)),
            Span::raw(task.id.to_string()),
        ]),
        Line::from(vec![
            Span::styled("Status: ", Style::default().fg(Color::Blue)),
            Span::raw(task.status.to_string()),
        ]),
        Line::from(vec![
            Span::styled("Due: ", Style::default().fg(Color::Blue)),
            Span::raw(task.due_date.format("%Y-%m-%d").to_string()),
        ]),
        Line::from(vec![
            Span::styled("Created: ", Style::default().fg(Color::Blue)),
            Span::raw(task.created_at.format("%Y-%m-%d %H:%M").to_string()),
        ]),
        Line::from(vec![
            Span::styled("Updated: ", Style::default().fg(Color::Blue)),
            Span::raw(task.updated_at.format("%Y-%m-%d %H:%M").to_string()),
        ]),
    ];

    if let Some(label) = row.urgency.label() {
        detail_text.push(Line::from(""));
        detail_text.push(Line::from(Span::styled(label, urgency_style(row.urgency).add_modifier(Modifier::BOLD))));
    }

    let detail = Paragraph::new(detail_text)
        .block(block)
        .wrap(Wrap { trim: true });
    f.render_widget(detail, area);
}

fn draw_status_line(f: &mut Frame, app: &App, area: Rect) {
    let state = app.session.state();

    let (title, text, style) = match app.input_mode {
        InputMode::Adding => {
            let text = match state.form_error() {
                Some(err) => format!("{}   ({})", app.input, err),
                None => app.input.clone(),
            };
            (" New task ", text, Style::default().fg(Color::Yellow))
        }
        InputMode::Searching => (" Search ", app.input.clone(), Style::default().fg(Color::Yellow)),
        InputMode::Normal | InputMode::ConfirmDelete => match state.notice() {
            Some(notice) => {
                let color = match notice.kind {
                    NoticeKind::Success => Color::Green,
                    NoticeKind::Error => Color::Red,
                };
                ("", notice.message.clone(), Style::default().fg(color))
            }
            None => ("", String::new(), Style::default()),
        },
    };

    let paragraph = Paragraph::new(text)
        .style(style)
        .block(Block::default().title(title).borders(Borders::ALL).border_type(BorderType::Rounded));
    f.render_widget(paragraph, area);

    if matches!(app.input_mode, InputMode::Adding | InputMode::Searching) {
        let x = area.x + 1 + app.cursor_position as u16;
        f.set_cursor_position((x.min(area.right().saturating_sub(2)), area.y + 1));
    }
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

pub fn confirm_dialog_area(area: Rect) -> Rect {
    centered_rect(50, 6, area)
}

/// Only a click outside the dialog dismisses it.
pub fn click_dismisses_dialog(dialog: Rect, column: u16, row: u16) -> bool {
    !dialog.contains(Position::new(column, row))
}

fn draw_confirm_dialog(f: &mut Frame, app: &App, popup: Rect) {
    let title = app
        .session
        .state()
        .pending_delete()
        .and_then(|id| app.session.state().find(&id))
        .map(|t| t.title.clone())
        .unwrap_or_default();

    let text = vec![
        Line::from("Are you sure you want to delete this task?"),
        Line::from(Span::styled(title, Style::default().add_modifier(Modifier::BOLD))),
        Line::from(""),
        Line::from(Span::styled("y: Delete   n: Cancel", Style::default().fg(Color::DarkGray))),
    ];
    let dialog = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .title(" Delete ")
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(Color::Red)),
        );

    f.render_widget(Clear, popup);
    f.render_widget(dialog, popup);
}
