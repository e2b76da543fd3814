use super::models::ExerciseField;

/// Failure of a backend call. Server-provided detail is never carried here;
/// the message is what the user sees.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GatewayError {
    #[error("Failed to save workout")]
    SaveFailed,
    #[error("Failed to fetch workouts")]
    FetchFailed,
}

/// Rejected edit of an exercise row.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    #[error("Invalid {} value: {input:?}", .field.label().to_lowercase())]
    InvalidNumber { field: ExerciseField, input: String },
    #[error("No exercise at row {0}")]
    NoSuchExercise(usize),
}

pub type GatewayResult<T> = Result<T, GatewayError>;
