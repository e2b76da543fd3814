//! Application state management for the workout logger.
//!
//! [`App`] is the single owner of the draft being composed, the list of
//! fetched workouts and all UI state. Its methods are the only writers.

use super::requests::{Completion, Request};
use crate::domain::{
    apply_exercise_input, DraftField, ExerciseEntry, ExerciseField, FieldError, WorkoutDraft,
    WorkoutRecord,
};
use chrono::Utc;
use tracing::{debug, info, warn};

/// User id the form starts with.
pub const DEFAULT_USER_ID: &str = "demo-user";
/// Message shown after the backend accepts a workout.
pub const SAVED_MESSAGE: &str = "Workout saved!";
/// Filename suggested when exporting workouts.
pub const DEFAULT_EXPORT_FILENAME: &str = "workouts.csv";

/// Represents the current mode of the application.
///
/// The mode decides how key presses are interpreted and which prompt the
/// status bar shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    /// Moving between form fields
    Normal,
    /// Typing into the focused field
    Editing,
    /// Help screen is displayed
    Help,
    /// CSV export dialog is open
    ExportCsv,
}

/// Whether a create request is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitState {
    Idle,
    Saving,
}

/// The form element that receives Enter and edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Field(DraftField),
    Exercise { row: usize, field: ExerciseField },
    Save,
}

/// A single-line text buffer with a cursor.
///
/// The cursor counts characters, not bytes, so multi-byte input edits
/// cleanly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    value: String,
    cursor: usize,
}

impl TextInput {
    /// Creates a buffer holding `value` with the cursor at the end.
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        let cursor = value.chars().count();
        Self { value, cursor }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    pub fn insert(&mut self, c: char) {
        let at = self.byte_index(self.cursor);
        self.value.insert(at, c);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let at = self.byte_index(self.cursor);
            self.value.remove(at);
        }
    }

    pub fn delete(&mut self) {
        if self.cursor < self.len() {
            let at = self.byte_index(self.cursor);
            self.value.remove(at);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.len() {
            self.cursor += 1;
        }
    }

    pub fn home(&mut self) {
        self.cursor = 0;
    }

    pub fn end(&mut self) {
        self.cursor = self.len();
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    fn len(&self) -> usize {
        self.value.chars().count()
    }

    fn byte_index(&self, chars: usize) -> usize {
        self.value
            .char_indices()
            .nth(chars)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }
}

/// Main application state: the draft, the fetched workouts and UI state.
///
/// Backend calls are never made from here. Operations that need the
/// backend return a [`Request`]; its [`Completion`] is fed back through
/// [`App::apply`].
///
/// # Examples
///
/// ```
/// use workout_logger::application::{App, Request};
///
/// let mut app = App::new("2024-01-01");
/// app.append_exercise();
/// assert_eq!(app.draft.exercises.len(), 2);
///
/// let request = app.submit();
/// assert!(matches!(request, Some(Request::Create(_))));
/// assert!(app.is_saving());
/// ```
#[derive(Debug)]
pub struct App {
    /// The workout being composed
    pub draft: WorkoutDraft,
    /// Workouts from the most recent accepted fetch, in server order
    pub workouts: Vec<WorkoutRecord>,
    /// Current application mode
    pub mode: AppMode,
    /// Focused form element
    pub focus: Focus,
    /// Edit buffer for the focused field
    pub input: TextInput,
    /// Edit buffer for the export filename prompt
    pub filename_input: TextInput,
    /// Whether a save is in flight
    pub submit_state: SubmitState,
    /// Latest success or failure message
    pub message: Option<String>,
    /// Scroll position in help text
    pub help_scroll: usize,
    /// Index of the first workout shown in the recent workouts pane
    pub workouts_scroll: usize,
    today: String,
    latest_fetch: u64,
}

impl Default for App {
    fn default() -> Self {
        Self::new(Utc::now().date_naive().format("%Y-%m-%d").to_string())
    }
}

impl App {
    /// Creates the initial state with `today` as the draft date.
    pub fn new(today: impl Into<String>) -> Self {
        let today = today.into();
        Self {
            draft: WorkoutDraft::starter(DEFAULT_USER_ID, today.clone()),
            workouts: Vec::new(),
            mode: AppMode::Normal,
            focus: Focus::Field(DraftField::UserId),
            input: TextInput::default(),
            filename_input: TextInput::default(),
            submit_state: SubmitState::Idle,
            message: None,
            help_scroll: 0,
            workouts_scroll: 0,
            today,
            latest_fetch: 0,
        }
    }

    pub fn is_saving(&self) -> bool {
        self.submit_state == SubmitState::Saving
    }

    /// Replaces a header field of the draft.
    ///
    /// No validation is applied. When the user id actually changes, the
    /// workout list for the new user is requested.
    pub fn set_field(&mut self, field: DraftField, value: impl Into<String>) -> Option<Request> {
        let value = value.into();
        let user_changed = field == DraftField::UserId && self.draft.user_id != value;
        *self.draft.field_mut(field) = value;

        if user_changed {
            info!(user_id = %self.draft.user_id, "active user changed");
            Some(self.refresh_list())
        } else {
            None
        }
    }

    /// Appends a placeholder exercise and returns its row index.
    pub fn append_exercise(&mut self) -> usize {
        self.draft.exercises.push(ExerciseEntry::blank());
        self.draft.exercises.len() - 1
    }

    /// Replaces one field of the exercise at `index`.
    ///
    /// Numeric fields are parsed first; on failure the draft is left as it
    /// was and the parse error is returned.
    pub fn update_exercise(
        &mut self,
        index: usize,
        field: ExerciseField,
        raw: &str,
    ) -> Result<(), FieldError> {
        let entry = self
            .draft
            .exercises
            .get_mut(index)
            .ok_or(FieldError::NoSuchExercise(index))?;
        apply_exercise_input(entry, field, raw)
    }

    /// Starts saving the draft.
    ///
    /// Returns `None` while a previous save is still in flight. The draft is
    /// kept as is; it is not cleared once the save succeeds.
    pub fn submit(&mut self) -> Option<Request> {
        if self.is_saving() {
            debug!("submit ignored, save already in flight");
            return None;
        }
        self.submit_state = SubmitState::Saving;
        self.message = None;
        info!(
            user_id = %self.draft.user_id,
            exercises = self.draft.exercises.len(),
            "saving workout"
        );
        Some(Request::Create(self.draft.to_payload()))
    }

    /// Requests the workout list for the current user.
    ///
    /// Every call supersedes the fetches issued before it.
    pub fn refresh_list(&mut self) -> Request {
        self.latest_fetch += 1;
        debug!(seq = self.latest_fetch, user_id = %self.draft.user_id, "fetching workouts");
        Request::List {
            seq: self.latest_fetch,
            user_id: self.draft.user_id.clone(),
        }
    }

    /// Applies the outcome of a request, returning the follow-up request if
    /// one is needed.
    pub fn apply(&mut self, completion: Completion) -> Option<Request> {
        match completion {
            Completion::Created(result) => {
                self.submit_state = SubmitState::Idle;
                match result {
                    Ok(()) => {
                        info!("workout saved");
                        self.message = Some(SAVED_MESSAGE.to_string());
                        Some(self.refresh_list())
                    }
                    Err(err) => {
                        warn!(error = %err, "save failed");
                        self.message = Some(err.to_string());
                        None
                    }
                }
            }
            Completion::Listed {
                seq,
                user_id,
                result,
            } => {
                if seq != self.latest_fetch {
                    debug!(seq, latest = self.latest_fetch, %user_id, "discarding stale workout list");
                    return None;
                }
                match result {
                    Ok(workouts) => {
                        debug!(count = workouts.len(), %user_id, "workout list replaced");
                        self.workouts = workouts;
                        self.clamp_workouts_scroll();
                    }
                    Err(err) => {
                        warn!(error = %err, %user_id, "fetch failed");
                        self.message = Some(err.to_string());
                    }
                }
                None
            }
        }
    }

    /// Restores the starter draft, keeping the current user id.
    ///
    /// Only ever triggered by the user; saving does not reset the draft.
    pub fn reset_draft(&mut self) {
        self.draft = WorkoutDraft::starter(self.draft.user_id.clone(), self.today.clone());
        self.clamp_focus();
    }

    /// Moves focus to the next form row, keeping the exercise column.
    pub fn focus_down(&mut self) {
        let rows = self.draft.exercises.len();
        self.focus = match self.focus {
            Focus::Field(field) => match field_position(field) {
                i if i + 1 < DraftField::ALL.len() => Focus::Field(DraftField::ALL[i + 1]),
                _ if rows > 0 => Focus::Exercise {
                    row: 0,
                    field: ExerciseField::Name,
                },
                _ => Focus::Save,
            },
            Focus::Exercise { row, field } if row + 1 < rows => Focus::Exercise { row: row + 1, field },
            Focus::Exercise { .. } | Focus::Save => Focus::Save,
        };
    }

    /// Moves focus to the previous form row, keeping the exercise column.
    pub fn focus_up(&mut self) {
        let rows = self.draft.exercises.len();
        self.focus = match self.focus {
            Focus::Field(field) => {
                let i = field_position(field);
                Focus::Field(DraftField::ALL[i.saturating_sub(1)])
            }
            Focus::Exercise { row, field } if row > 0 => Focus::Exercise { row: row - 1, field },
            Focus::Exercise { .. } => Focus::Field(DraftField::Notes),
            Focus::Save if rows > 0 => Focus::Exercise {
                row: rows - 1,
                field: ExerciseField::Name,
            },
            Focus::Save => Focus::Field(DraftField::Notes),
        };
    }

    pub fn focus_left(&mut self) {
        if let Focus::Exercise { row, field } = self.focus {
            if let Some(prev) = field.prev() {
                self.focus = Focus::Exercise { row, field: prev };
            }
        }
    }

    pub fn focus_right(&mut self) {
        if let Focus::Exercise { row, field } = self.focus {
            if let Some(next) = field.next() {
                self.focus = Focus::Exercise { row, field: next };
            }
        }
    }

    /// Moves focus one element forward in reading order, wrapping around.
    pub fn focus_next(&mut self) {
        match self.focus {
            Focus::Exercise { field, .. } if field.next().is_some() => self.focus_right(),
            Focus::Exercise { row, .. } if row + 1 < self.draft.exercises.len() => {
                self.focus = Focus::Exercise {
                    row: row + 1,
                    field: ExerciseField::Name,
                };
            }
            Focus::Save => self.focus = Focus::Field(DraftField::UserId),
            _ => self.focus_down(),
        }
    }

    /// Moves focus one element backward in reading order, wrapping around.
    pub fn focus_prev(&mut self) {
        match self.focus {
            Focus::Field(DraftField::UserId) => self.focus = Focus::Save,
            Focus::Exercise { field, .. } if field.prev().is_some() => self.focus_left(),
            Focus::Exercise { row, .. } if row > 0 => {
                self.focus = Focus::Exercise {
                    row: row - 1,
                    field: ExerciseField::Weight,
                };
            }
            Focus::Save if !self.draft.exercises.is_empty() => {
                self.focus = Focus::Exercise {
                    row: self.draft.exercises.len() - 1,
                    field: ExerciseField::Weight,
                };
            }
            _ => self.focus_up(),
        }
    }

    /// Switches to editing mode for the focused field.
    ///
    /// Loads the field's current value into the input buffer with the
    /// cursor at the end. Does nothing when the Save button is focused.
    pub fn start_editing(&mut self) {
        let text = match self.focus {
            Focus::Field(field) => self.draft.field(field).to_string(),
            Focus::Exercise { row, field } => match self.draft.exercises.get(row) {
                Some(entry) => entry.field_text(field),
                None => return,
            },
            Focus::Save => return,
        };
        self.input = TextInput::new(text);
        self.mode = AppMode::Editing;
    }

    /// Commits the input buffer into the focused field.
    ///
    /// A rejected number keeps editing mode open and shows why. Returns the
    /// list request triggered by a user id change, if any.
    pub fn finish_editing(&mut self) -> Option<Request> {
        let value = self.input.value().to_string();
        let request = match self.focus {
            Focus::Field(field) => self.set_field(field, value),
            Focus::Exercise { row, field } => {
                if let Err(err) = self.update_exercise(row, field, &value) {
                    self.message = Some(err.to_string());
                    return None;
                }
                None
            }
            Focus::Save => None,
        };

        self.mode = AppMode::Normal;
        self.input.clear();
        request
    }

    /// Cancels editing and returns to normal mode without saving changes.
    pub fn cancel_editing(&mut self) {
        self.mode = AppMode::Normal;
        self.input.clear();
    }

    /// Switches to CSV export mode with the default filename.
    pub fn start_export(&mut self) {
        self.mode = AppMode::ExportCsv;
        self.filename_input = TextInput::new(DEFAULT_EXPORT_FILENAME);
    }

    /// Filename for the export, falling back to the default when empty.
    pub fn export_filename(&self) -> String {
        if self.filename_input.is_empty() {
            DEFAULT_EXPORT_FILENAME.to_string()
        } else {
            self.filename_input.value().to_string()
        }
    }

    /// Processes the result of a CSV export and returns to normal mode.
    pub fn set_export_result(&mut self, result: Result<String, String>) {
        self.message = Some(match result {
            Ok(filename) => format!("Exported to {}", filename),
            Err(error) => format!("Export failed: {}", error),
        });
        self.cancel_filename_input();
    }

    pub fn cancel_filename_input(&mut self) {
        self.mode = AppMode::Normal;
        self.filename_input.clear();
    }

    pub fn open_help(&mut self) {
        self.mode = AppMode::Help;
        self.help_scroll = 0;
    }

    pub fn close_help(&mut self) {
        self.mode = AppMode::Normal;
    }

    pub fn scroll_workouts_down(&mut self, by: usize) {
        self.workouts_scroll += by;
        self.clamp_workouts_scroll();
    }

    pub fn scroll_workouts_up(&mut self, by: usize) {
        self.workouts_scroll = self.workouts_scroll.saturating_sub(by);
    }

    fn clamp_workouts_scroll(&mut self) {
        self.workouts_scroll = self
            .workouts_scroll
            .min(self.workouts.len().saturating_sub(1));
    }

    fn clamp_focus(&mut self) {
        let rows = self.draft.exercises.len();
        if let Focus::Exercise { row, field } = self.focus {
            if rows == 0 {
                self.focus = Focus::Field(DraftField::Notes);
            } else if row >= rows {
                self.focus = Focus::Exercise { row: rows - 1, field };
            }
        }
    }
}

fn field_position(field: DraftField) -> usize {
    DraftField::ALL
        .iter()
        .position(|f| *f == field)
        .unwrap_or_default()
}
