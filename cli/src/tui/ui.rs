use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;
use securetask_core::api::TaskStatus;
use securetask_core::controller::EditSession;

use super::app::{FormField, Mode, TuiApp};

pub fn draw(f: &mut Frame<'_>, app: &TuiApp) {
    let size = f.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(0),
            Constraint::Length(2),
        ])
        .split(size);

    draw_header(f, chunks[0], app);
    draw_list(f, chunks[1], app);
    draw_footer(f, chunks[2], app);

    match app.mode {
        Mode::Editor => draw_editor(f, size, app),
        Mode::ConfirmDelete => draw_confirm(f, size),
        _ => {}
    }
}

fn draw_header(f: &mut Frame<'_>, area: Rect, app: &TuiApp) {
    let filter = match app.ctrl.filters.status {
        None => "all".to_string(),
        Some(status) => status.to_string(),
    };
    let mut parts = vec![
        Span::styled("SecureTask", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("  Tasks: "),
        Span::styled(
            app.ctrl.tasks.len().to_string(),
            Style::default().fg(Color::Gray),
        ),
        Span::raw("  Filter: "),
        Span::styled(filter, Style::default().fg(Color::Gray)),
        Span::raw("  Search: "),
    ];
    let search_style = if app.mode == Mode::Search {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::Gray)
    };
    let search_text = if app.search_input.is_empty() && app.mode != Mode::Search {
        "-".to_string()
    } else {
        format!("{}▏", app.search_input)
    };
    parts.push(Span::styled(search_text, search_style));
    if app.ctrl.loading {
        parts.push(Span::raw("  "));
        parts.push(Span::styled("Loading...", Style::default().fg(Color::Yellow)));
    }

    let header = Paragraph::new(Line::from(parts)).block(Block::default().borders(Borders::BOTTOM));
    f.render_widget(header, area);
}

fn draw_list(f: &mut Frame<'_>, area: Rect, app: &TuiApp) {
    if app.ctrl.tasks.is_empty() && !app.ctrl.loading {
        let empty = Paragraph::new("No tasks found. Create your first task!")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center);
        f.render_widget(empty, area);
        return;
    }

    let mut lines = Vec::with_capacity(app.ctrl.tasks.len());
    for (idx, task) in app.ctrl.tasks.iter().enumerate() {
        let selected = idx == app.selected;
        let mark = match task.status {
            TaskStatus::Completed => "[x] ",
            TaskStatus::Pending => "[ ] ",
        };
        let mut title_style = if task.status == TaskStatus::Completed {
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::CROSSED_OUT)
        } else {
            Style::default()
        };
        let badge_style = match task.status {
            TaskStatus::Completed => Style::default().fg(Color::Green),
            TaskStatus::Pending => Style::default().fg(Color::Yellow),
        };
        let mut row_style = Style::default();
        if selected {
            row_style = row_style.bg(Color::Blue);
            title_style = title_style.add_modifier(Modifier::BOLD);
        }

        let mut spans = vec![
            Span::styled(mark, row_style),
            Span::styled(task.title.clone(), title_style.patch(row_style)),
            Span::styled(format!("  {}", task.status), badge_style.patch(row_style)),
        ];
        if !task.description.is_empty() {
            spans.push(Span::styled(
                format!("  — {}", task.description),
                Style::default().fg(Color::DarkGray).patch(row_style),
            ));
        }
        lines.push(Line::from(spans));
    }

    let offset = scroll_offset(app.selected, area.height);
    let list = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((offset, 0));
    f.render_widget(list, area);
}

fn scroll_offset(selected: usize, height: u16) -> u16 {
    let visible = height.max(1) as usize;
    selected.saturating_sub(visible.saturating_sub(1)) as u16
}

fn draw_footer(f: &mut Frame<'_>, area: Rect, app: &TuiApp) {
    let message = if let Some(error) = &app.ctrl.error {
        Line::from(Span::styled(
            error.clone(),
            Style::default().fg(Color::Red),
        ))
    } else if let Some(success) = &app.ctrl.success_message {
        Line::from(Span::styled(
            success.clone(),
            Style::default().fg(Color::Green),
        ))
    } else {
        Line::from(Span::styled(
            help_text(app.mode),
            Style::default().fg(Color::DarkGray),
        ))
    };
    let footer = Paragraph::new(message).block(Block::default().borders(Borders::TOP));
    f.render_widget(footer, area);
}

fn help_text(mode: Mode) -> &'static str {
    match mode {
        Mode::Normal => "n new  e edit  d delete  space toggle  / search  f filter  r reload  q quit",
        Mode::Search => "type to search  enter/esc done",
        Mode::Editor => "tab next field  enter save  esc cancel",
        Mode::ConfirmDelete => "y confirm  n cancel",
    }
}

fn draw_editor(f: &mut Frame<'_>, size: Rect, app: &TuiApp) {
    let title = match app.ctrl.edit_session() {
        Some(EditSession::Editing { .. }) => "Edit Task",
        _ => "Create Task",
    };
    let area = centered_rect(size, 50, 8);
    f.render_widget(Clear, area);

    let field_line = |label: &str, value: String, field: FormField| {
        let active = app.form_field == field;
        let label_style = if active {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        let value = if active {
            format!("{value}▏")
        } else {
            value
        };
        Line::from(vec![
            Span::styled(format!("{label:<12}"), label_style),
            Span::raw(value),
        ])
    };

    let lines = vec![
        field_line("Title", app.ctrl.draft.title.clone(), FormField::Title),
        field_line(
            "Description",
            app.ctrl.draft.description.clone(),
            FormField::Description,
        ),
        field_line(
            "Status",
            app.ctrl.draft.status.to_string(),
            FormField::Status,
        ),
    ];

    let form = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(form, area);
}

fn draw_confirm(f: &mut Frame<'_>, size: Rect) {
    let area = centered_rect(size, 50, 5);
    f.render_widget(Clear, area);
    let dialog = Paragraph::new("Are you sure you want to delete this task? (y/n)")
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Delete Task"));
    f.render_widget(dialog, area);
}

fn centered_rect(size: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(size.width);
    let height = height.min(size.height);
    Rect {
        x: size.x + (size.width.saturating_sub(width)) / 2,
        y: size.y + (size.height.saturating_sub(height)) / 2,
        width,
        height,
    }
}
