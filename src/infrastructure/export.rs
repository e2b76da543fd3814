use crate::domain::WorkoutRecord;
use serde::Serialize;

pub struct CsvExporter;

#[derive(Serialize)]
struct ExportRow<'a> {
    id: &'a str,
    user_id: &'a str,
    workout_date: &'a str,
    title: &'a str,
    notes: &'a str,
    exercise: Option<&'a str>,
    sets: Option<u32>,
    reps: Option<u32>,
    weight: Option<f64>,
}

impl CsvExporter {
    /// Writes one row per exercise of each workout to `filename`.
    ///
    /// A workout without exercises still gets a single row with the
    /// exercise columns left empty. Returns the filename written.
    pub fn export_workouts(workouts: &[WorkoutRecord], filename: &str) -> Result<String, String> {
        let mut writer = csv::Writer::from_path(filename).map_err(|e| e.to_string())?;

        for workout in workouts {
            let base = ExportRow {
                id: &workout.id,
                user_id: &workout.user_id,
                workout_date: &workout.workout_date,
                title: &workout.title,
                notes: workout.notes.as_deref().unwrap_or_default(),
                exercise: None,
                sets: None,
                reps: None,
                weight: None,
            };

            if workout.exercises.is_empty() {
                writer.serialize(&base).map_err(|e| e.to_string())?;
                continue;
            }
            for exercise in &workout.exercises {
                writer
                    .serialize(ExportRow {
                        exercise: Some(&exercise.name),
                        sets: Some(exercise.sets),
                        reps: Some(exercise.reps),
                        weight: Some(exercise.weight),
                        ..base
                    })
                    .map_err(|e| e.to_string())?;
            }
        }

        writer.flush().map_err(|e| e.to_string())?;
        Ok(filename.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ExerciseEntry;
    use std::fs;

    fn record(id: &str, notes: Option<&str>, exercises: Vec<ExerciseEntry>) -> WorkoutRecord {
        WorkoutRecord {
            id: id.to_string(),
            user_id: "demo-user".to_string(),
            title: "Push Day".to_string(),
            workout_date: "2024-01-01".to_string(),
            notes: notes.map(str::to_string),
            exercises,
        }
    }

    #[test]
    fn test_export_one_row_per_exercise() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let path = path.to_str().unwrap();

        let workouts = vec![
            record(
                "w1",
                Some("good, strong"),
                vec![
                    ExerciseEntry::new("Bench Press", 3, 8, 60.0),
                    ExerciseEntry::new("Dips", 3, 10, 0.0),
                ],
            ),
            record("w2", None, Vec::new()),
        ];

        let result = CsvExporter::export_workouts(&workouts, path);
        assert_eq!(result, Ok(path.to_string()));

        let content = fs::read_to_string(path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(
            lines,
            vec![
                "id,user_id,workout_date,title,notes,exercise,sets,reps,weight",
                "w1,demo-user,2024-01-01,Push Day,\"good, strong\",Bench Press,3,8,60.0",
                "w1,demo-user,2024-01-01,Push Day,\"good, strong\",Dips,3,10,0.0",
                "w2,demo-user,2024-01-01,Push Day,,,,,",
            ]
        );
    }

    #[test]
    fn test_export_to_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.csv");

        let result = CsvExporter::export_workouts(&[], path.to_str().unwrap());
        assert!(result.is_err());
    }
}
