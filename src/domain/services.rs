//! Domain services: the backend port, numeric input parsing and display
//! formatting for saved workouts.

use super::errors::{FieldError, GatewayResult};
use super::models::{ExerciseEntry, ExerciseField, NewWorkout, WorkoutRecord};
use chrono::{DateTime, NaiveDate};

/// Port to the remote workout store.
///
/// Implementations collapse every failure into the fixed [`GatewayError`]
/// kinds; callers never see transport detail.
///
/// [`GatewayError`]: super::errors::GatewayError
pub trait WorkoutGateway: Send + Sync {
    /// Stores a new workout. Succeeds only on an HTTP success status.
    fn create_workout(&self, payload: &NewWorkout) -> GatewayResult<()>;

    /// Returns every saved workout for `user_id`, in server order.
    fn list_workouts(&self, user_id: &str) -> GatewayResult<Vec<WorkoutRecord>>;
}

/// Parses the text typed into a sets or reps box.
///
/// Surrounding whitespace is ignored and an empty box counts as zero.
///
/// # Examples
///
/// ```
/// use workout_logger::domain::{parse_count, ExerciseField};
///
/// assert_eq!(parse_count(ExerciseField::Sets, " 4 "), Ok(4));
/// assert_eq!(parse_count(ExerciseField::Reps, ""), Ok(0));
/// assert!(parse_count(ExerciseField::Reps, "-1").is_err());
/// ```
pub fn parse_count(field: ExerciseField, raw: &str) -> Result<u32, FieldError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(0);
    }
    trimmed.parse::<u32>().map_err(|_| FieldError::InvalidNumber {
        field,
        input: raw.to_string(),
    })
}

/// Parses the text typed into a weight box. Accepts any finite,
/// non-negative decimal; an empty box counts as zero.
pub fn parse_weight(raw: &str) -> Result<f64, FieldError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(0.0);
    }
    match trimmed.parse::<f64>() {
        Ok(weight) if weight.is_finite() && weight >= 0.0 => Ok(weight),
        _ => Err(FieldError::InvalidNumber {
            field: ExerciseField::Weight,
            input: raw.to_string(),
        }),
    }
}

/// Writes `raw` into `field` of `entry`, leaving the entry untouched when
/// the text does not parse.
pub fn apply_exercise_input(
    entry: &mut ExerciseEntry,
    field: ExerciseField,
    raw: &str,
) -> Result<(), FieldError> {
    match field {
        ExerciseField::Name => entry.name = raw.to_string(),
        ExerciseField::Sets => entry.sets = parse_count(field, raw)?,
        ExerciseField::Reps => entry.reps = parse_count(field, raw)?,
        ExerciseField::Weight => entry.weight = parse_weight(raw)?,
    }
    Ok(())
}

/// Formats a record's `workout_date` for display.
///
/// The backend may send a bare date or a full RFC 3339 timestamp; both are
/// shown as the calendar date they carry. Anything else is shown verbatim.
pub fn display_date(raw: &str) -> String {
    const FORMAT: &str = "%b %-d, %Y";

    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return timestamp.date_naive().format(FORMAT).to_string();
    }
    raw.get(..10)
        .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
        .map(|date| date.format(FORMAT).to_string())
        .unwrap_or_else(|| raw.to_string())
}

/// One-line summary of an exercise, e.g. `Bench Press: 3 x 8 @ 60`.
pub fn exercise_summary(entry: &ExerciseEntry) -> String {
    format!(
        "{}: {} x {} @ {}",
        entry.name, entry.sets, entry.reps, entry.weight
    )
}
