use serde::{Deserialize, Deserializer, Serialize};

/// One exercise line of a workout.
///
/// Entries have no identity beyond their position in the containing list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExerciseEntry {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "rounded_count")]
    pub sets: u32,
    #[serde(deserialize_with = "rounded_count")]
    pub reps: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub weight: f64,
}

impl ExerciseEntry {
    pub fn new(name: impl Into<String>, sets: u32, reps: u32, weight: f64) -> Self {
        Self {
            name: name.into(),
            sets,
            reps,
            weight,
        }
    }

    /// The placeholder row appended when the user adds an exercise.
    pub fn blank() -> Self {
        Self::new("", 3, 10, 0.0)
    }

    /// Current value of `field` as the text shown in an input box.
    pub fn field_text(&self, field: ExerciseField) -> String {
        match field {
            ExerciseField::Name => self.name.clone(),
            ExerciseField::Sets => self.sets.to_string(),
            ExerciseField::Reps => self.reps.to_string(),
            ExerciseField::Weight => self.weight.to_string(),
        }
    }
}

/// Editable columns of an exercise row, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExerciseField {
    Name,
    Sets,
    Reps,
    Weight,
}

impl ExerciseField {
    pub const ALL: [ExerciseField; 4] = [
        ExerciseField::Name,
        ExerciseField::Sets,
        ExerciseField::Reps,
        ExerciseField::Weight,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ExerciseField::Name => "Name",
            ExerciseField::Sets => "Sets",
            ExerciseField::Reps => "Reps",
            ExerciseField::Weight => "Weight",
        }
    }

    pub fn next(self) -> Option<Self> {
        match self {
            ExerciseField::Name => Some(ExerciseField::Sets),
            ExerciseField::Sets => Some(ExerciseField::Reps),
            ExerciseField::Reps => Some(ExerciseField::Weight),
            ExerciseField::Weight => None,
        }
    }

    pub fn prev(self) -> Option<Self> {
        match self {
            ExerciseField::Name => None,
            ExerciseField::Sets => Some(ExerciseField::Name),
            ExerciseField::Reps => Some(ExerciseField::Sets),
            ExerciseField::Weight => Some(ExerciseField::Reps),
        }
    }
}

/// Free-text fields of the draft header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    UserId,
    Date,
    Title,
    Notes,
}

impl DraftField {
    /// Form order, top to bottom.
    pub const ALL: [DraftField; 4] = [
        DraftField::UserId,
        DraftField::Date,
        DraftField::Title,
        DraftField::Notes,
    ];

    pub fn label(self) -> &'static str {
        match self {
            DraftField::UserId => "User",
            DraftField::Date => "Date",
            DraftField::Title => "Title",
            DraftField::Notes => "Notes",
        }
    }
}

/// The workout being composed in the form. Never persisted locally.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutDraft {
    pub user_id: String,
    pub title: String,
    /// ISO-8601 calendar date, kept as typed.
    pub date: String,
    /// Empty means "no notes".
    pub notes: String,
    pub exercises: Vec<ExerciseEntry>,
}

impl WorkoutDraft {
    /// The draft shown when the application starts.
    pub fn starter(user_id: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            title: "Push Day".to_string(),
            date: date.into(),
            notes: String::new(),
            exercises: vec![ExerciseEntry::new("Bench Press", 3, 8, 60.0)],
        }
    }

    pub fn field(&self, field: DraftField) -> &str {
        match field {
            DraftField::UserId => &self.user_id,
            DraftField::Date => &self.date,
            DraftField::Title => &self.title,
            DraftField::Notes => &self.notes,
        }
    }

    pub fn field_mut(&mut self, field: DraftField) -> &mut String {
        match field {
            DraftField::UserId => &mut self.user_id,
            DraftField::Date => &mut self.date,
            DraftField::Title => &mut self.title,
            DraftField::Notes => &mut self.notes,
        }
    }

    /// Builds the body sent to the create endpoint. Empty notes become `null`.
    pub fn to_payload(&self) -> NewWorkout {
        NewWorkout {
            user_id: self.user_id.clone(),
            workout_date: self.date.clone(),
            title: self.title.clone(),
            notes: if self.notes.is_empty() {
                None
            } else {
                Some(self.notes.clone())
            },
            exercises: self.exercises.clone(),
        }
    }
}

/// Wire body of `POST /api/workouts`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewWorkout {
    pub user_id: String,
    pub workout_date: String,
    pub title: String,
    pub notes: Option<String>,
    pub exercises: Vec<ExerciseEntry>,
}

/// A saved workout as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutRecord {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub user_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub workout_date: String,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub exercises: Vec<ExerciseEntry>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Stored counts may be fractional or null; they are rounded to the
/// nearest whole number, with null and negatives read as 0.
fn rounded_count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<f64>::deserialize(deserializer)?.unwrap_or_default();
    Ok(value.round().clamp(0.0, u32::MAX as f64) as u32)
}
