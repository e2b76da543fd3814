use crate::application::{App, AppMode, Focus, Request, TextInput};
use crate::domain::ExerciseField;
use crate::infrastructure::CsvExporter;
use crossterm::event::{KeyCode, KeyModifiers};

/// Rows scrolled by PageUp/PageDown in the recent workouts pane.
const PAGE: usize = 3;

pub struct InputHandler;

impl InputHandler {
    /// Routes a key press to the handler for the current mode.
    ///
    /// Returns the gateway request the key triggered, if any; the caller is
    /// responsible for dispatching it.
    pub fn handle_key_event(app: &mut App, key: KeyCode, modifiers: KeyModifiers) -> Option<Request> {
        match app.mode {
            AppMode::Normal => Self::handle_normal_mode(app, key, modifiers),
            AppMode::Editing => Self::handle_editing_mode(app, key, modifiers),
            AppMode::Help => {
                Self::handle_help_mode(app, key);
                None
            }
            AppMode::ExportCsv => {
                Self::handle_filename_input_mode(app, key, modifiers);
                None
            }
        }
    }

    fn handle_normal_mode(app: &mut App, key: KeyCode, modifiers: KeyModifiers) -> Option<Request> {
        if modifiers.contains(KeyModifiers::CONTROL) {
            match key {
                KeyCode::Char('s') => return app.submit(),
                KeyCode::Char('e') => {
                    app.start_export();
                    return None;
                }
                KeyCode::Char('n') => {
                    app.reset_draft();
                    return None;
                }
                _ => {}
            }
        }

        match key {
            KeyCode::Up | KeyCode::Char('k') => app.focus_up(),
            KeyCode::Down | KeyCode::Char('j') => app.focus_down(),
            KeyCode::Left | KeyCode::Char('h') => app.focus_left(),
            KeyCode::Right | KeyCode::Char('l') => app.focus_right(),
            KeyCode::Tab => app.focus_next(),
            KeyCode::BackTab => app.focus_prev(),
            KeyCode::Enter | KeyCode::F(2) => {
                if app.focus == Focus::Save {
                    return app.submit();
                }
                app.start_editing();
            }
            KeyCode::Char('a') => {
                let row = app.append_exercise();
                app.focus = Focus::Exercise {
                    row,
                    field: ExerciseField::Name,
                };
            }
            KeyCode::Char('r') => return Some(app.refresh_list()),
            KeyCode::PageDown => app.scroll_workouts_down(PAGE),
            KeyCode::PageUp => app.scroll_workouts_up(PAGE),
            KeyCode::F(1) | KeyCode::Char('?') => app.open_help(),
            KeyCode::Char('q') => {
                // Will be handled by main loop
            }
            _ => {}
        }
        None
    }

    fn handle_editing_mode(app: &mut App, key: KeyCode, modifiers: KeyModifiers) -> Option<Request> {
        match key {
            KeyCode::Enter => return app.finish_editing(),
            KeyCode::Esc => app.cancel_editing(),
            _ => Self::edit_text(&mut app.input, key, modifiers),
        }
        None
    }

    fn handle_help_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Esc | KeyCode::F(1) | KeyCode::Char('?') | KeyCode::Char('q') => {
                app.close_help();
            }
            KeyCode::Up | KeyCode::Char('k') => {
                app.help_scroll = app.help_scroll.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                app.help_scroll += 1;
            }
            KeyCode::PageUp => {
                app.help_scroll = app.help_scroll.saturating_sub(5);
            }
            KeyCode::PageDown => {
                app.help_scroll += 5;
            }
            KeyCode::Home => {
                app.help_scroll = 0;
            }
            _ => {}
        }
    }

    fn handle_filename_input_mode(app: &mut App, key: KeyCode, modifiers: KeyModifiers) {
        match key {
            KeyCode::Enter => {
                let filename = app.export_filename();
                let result = CsvExporter::export_workouts(&app.workouts, &filename);
                app.set_export_result(result);
            }
            KeyCode::Esc => app.cancel_filename_input(),
            _ => Self::edit_text(&mut app.filename_input, key, modifiers),
        }
    }

    fn edit_text(input: &mut TextInput, key: KeyCode, modifiers: KeyModifiers) {
        match key {
            // Control chords are commands, never text.
            KeyCode::Char(_) if modifiers.contains(KeyModifiers::CONTROL) => {}
            KeyCode::Backspace => input.backspace(),
            KeyCode::Delete => input.delete(),
            KeyCode::Left => input.move_left(),
            KeyCode::Right => input.move_right(),
            KeyCode::Home => input.home(),
            KeyCode::End => input.end(),
            KeyCode::Char(c) => input.insert(c),
            _ => {}
        }
    }
}
