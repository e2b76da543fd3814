use crate::application::{App, AppMode, Focus};
use crate::domain::{display_date, exercise_summary, DraftField, ExerciseField};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, Wrap},
    Frame,
};

pub fn render_ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.area());

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(chunks[1]);

    render_header(f, chunks[0]);
    render_form(f, app, body[0]);
    render_workouts(f, app, body[1]);
    render_status_bar(f, app, chunks[2]);

    if app.mode == AppMode::Help {
        render_help_popup(f, app.help_scroll);
    }
}

fn render_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new("Fitness Tracker | Log workouts and track progress")
        .style(Style::default().fg(Color::Cyan));
    f.render_widget(header, area);
}

fn focus_style(focused: bool) -> Style {
    if focused {
        Style::default().bg(Color::Blue).fg(Color::White)
    } else {
        Style::default()
    }
}

/// Text shown for a field: the live edit buffer while it is being edited.
fn shown_value(app: &App, focus: Focus, stored: String) -> String {
    if app.mode == AppMode::Editing && app.focus == focus {
        app.input.value().to_string()
    } else {
        stored
    }
}

fn render_form(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title("New Workout");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(DraftField::ALL.len() as u16),
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(2),
        ])
        .split(inner);

    let lines: Vec<Line> = DraftField::ALL
        .iter()
        .map(|&field| {
            let focus = Focus::Field(field);
            let value = shown_value(app, focus, app.draft.field(field).to_string());
            Line::from(vec![
                Span::styled(format!("{:<6} ", field.label()), Style::default().fg(Color::Gray)),
                Span::styled(value, focus_style(app.focus == focus)),
            ])
        })
        .collect();
    f.render_widget(Paragraph::new(lines), chunks[0]);

    let exercises_title = Line::from(vec![
        Span::styled("Exercises", Style::default().add_modifier(Modifier::BOLD)),
        Span::styled("  (a: add)", Style::default().fg(Color::DarkGray)),
    ]);
    f.render_widget(Paragraph::new(exercises_title), chunks[1]);

    render_exercise_table(f, app, chunks[2]);
    render_save_area(f, app, chunks[3]);
}

fn render_exercise_table(f: &mut Frame, app: &App, area: Rect) {
    let header = Row::new(
        ExerciseField::ALL
            .iter()
            .map(|field| Cell::from(field.label()).style(Style::default().fg(Color::Yellow))),
    );

    let rows = app.draft.exercises.iter().enumerate().map(|(row, entry)| {
        Row::new(ExerciseField::ALL.iter().map(|&field| {
            let focus = Focus::Exercise { row, field };
            let text = shown_value(app, focus, entry.field_text(field));
            Cell::from(text).style(focus_style(app.focus == focus))
        }))
    });

    let widths = [
        Constraint::Percentage(40),
        Constraint::Percentage(20),
        Constraint::Percentage(20),
        Constraint::Percentage(20),
    ];
    let table = Table::new(rows, widths).header(header).column_spacing(1);
    f.render_widget(table, area);
}

fn render_save_area(f: &mut Frame, app: &App, area: Rect) {
    let (label, style) = if app.is_saving() {
        ("[ Saving... ]", Style::default().fg(Color::DarkGray))
    } else if app.focus == Focus::Save {
        ("[ Save Workout ]", Style::default().bg(Color::Blue).fg(Color::White))
    } else {
        ("[ Save Workout ]", Style::default().fg(Color::Green))
    };

    let mut lines = vec![Line::from(Span::styled(label, style))];
    if let Some(message) = &app.message {
        lines.push(Line::from(message.as_str()));
    }
    f.render_widget(Paragraph::new(lines), area);
}

fn render_workouts(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!("Recent Workouts ({})", app.workouts.len()));

    if app.workouts.is_empty() {
        let empty = Paragraph::new("No workouts yet.")
            .style(Style::default().fg(Color::Gray))
            .block(block);
        f.render_widget(empty, area);
        return;
    }

    let mut lines = Vec::new();
    for workout in app.workouts.iter().skip(app.workouts_scroll) {
        lines.push(Line::from(vec![
            Span::styled(workout.title.clone(), Style::default().add_modifier(Modifier::BOLD)),
            Span::raw("  "),
            Span::styled(
                format!("[{}]", workout.user_id),
                Style::default().fg(Color::Green),
            ),
        ]));
        lines.push(Line::from(Span::styled(
            display_date(&workout.workout_date),
            Style::default().fg(Color::DarkGray),
        )));
        if let Some(notes) = workout.notes.as_deref().filter(|n| !n.is_empty()) {
            lines.push(Line::from(notes.to_string()));
        }
        for exercise in &workout.exercises {
            lines.push(Line::from(format!("  • {}", exercise_summary(exercise))));
        }
        lines.push(Line::from(""));
    }

    let list = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    f.render_widget(list, area);
}

fn render_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let text = match app.mode {
        AppMode::Normal => {
            "↑↓←→/Tab: move | Enter: edit | a: add exercise | Ctrl+S: save | r: refresh | Ctrl+N: new draft | Ctrl+E: export | ?: help | q: quit".to_string()
        }
        AppMode::Editing => format!("Editing: {} (Enter to save, Esc to cancel)", app.input.value()),
        AppMode::Help => "↑↓/jk: scroll | PgUp/PgDn: fast scroll | Home: top | Esc/q: close help".to_string(),
        AppMode::ExportCsv => format!(
            "Export CSV as: {} (Enter to export, Esc to cancel)",
            app.filename_input.value()
        ),
    };

    let status = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).title("Status"))
        .style(match app.mode {
            AppMode::Normal => Style::default(),
            AppMode::Editing => Style::default().fg(Color::Green),
            AppMode::Help => Style::default().fg(Color::Cyan),
            AppMode::ExportCsv => Style::default().fg(Color::Magenta),
        });
    f.render_widget(status, area);
}

fn render_help_popup(f: &mut Frame, scroll: usize) {
    let area = f.area();
    let popup_area = Rect {
        x: area.width / 10,
        y: area.height / 10,
        width: area.width * 4 / 5,
        height: area.height * 4 / 5,
    };

    f.render_widget(Clear, popup_area);

    let help_lines: Vec<&str> = HELP_TEXT.lines().collect();
    let visible_height = popup_area.height.saturating_sub(2) as usize;

    let start_line = scroll.min(help_lines.len().saturating_sub(visible_height));
    let end_line = (start_line + visible_height).min(help_lines.len());

    let visible_text = help_lines[start_line..end_line].join("\n");

    let help_widget = Paragraph::new(visible_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("Help (Line {}/{})", start_line + 1, help_lines.len()))
                .style(Style::default().fg(Color::Cyan)),
        )
        .style(Style::default().fg(Color::White));

    f.render_widget(help_widget, popup_area);
}

const HELP_TEXT: &str = r#"WORKOUT LOGGER

=== THE FORM ===
User            Whose workouts are listed on the right. Changing it
                reloads the list.
Date            Workout date, YYYY-MM-DD
Title / Notes   Free text. Empty notes are sent as no notes.
Exercises       Name, sets, reps and weight per row

=== NAVIGATION ===
↑↓ or j/k       Move between rows
←→ or h/l       Move between exercise columns
Tab / Shift+Tab Move through every field in order
Enter/F2        Edit the focused field, or save on the Save button

=== EDITING ===
Enter           Keep the new value
Esc             Discard the change
Sets and reps take whole numbers, weight takes decimals.
An empty box counts as 0. Anything else is refused.

=== ACTIONS ===
a               Add an exercise row
Ctrl+S          Save the workout
r               Reload recent workouts
Ctrl+N          Start a fresh draft (keeps the user)
Ctrl+E          Export recent workouts to CSV
PgUp/PgDn       Scroll recent workouts
F1 or ?         Show this help
q               Quit

=== HELP NAVIGATION ===
↑↓ or j/k       Scroll help text up/down one line
Page Up/Down    Scroll help text up/down 5 lines
Home            Jump to top of help text
Esc/F1/?/q      Close this help window

The draft is kept after saving so it can be adjusted and saved again."#;
