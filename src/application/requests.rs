//! Messages exchanged between the state manager and the gateway.
//!
//! [`App`](super::App) never calls the backend itself. It hands out
//! [`Request`]s and later receives the matching [`Completion`]s, which keeps
//! every state transition on the UI thread.

use crate::domain::{GatewayResult, NewWorkout, WorkoutGateway, WorkoutRecord};

/// A gateway call the state manager wants performed.
#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    /// Store a new workout.
    Create(NewWorkout),
    /// Fetch the workouts of `user_id`. `seq` identifies the fetch so that
    /// only the most recently issued one is applied.
    List { seq: u64, user_id: String },
}

/// The outcome of a [`Request`].
#[derive(Debug, Clone, PartialEq)]
pub enum Completion {
    Created(GatewayResult<()>),
    Listed {
        seq: u64,
        user_id: String,
        result: GatewayResult<Vec<WorkoutRecord>>,
    },
}

impl Request {
    /// Runs the request against `gateway`, blocking until it answers.
    pub fn execute(self, gateway: &dyn WorkoutGateway) -> Completion {
        match self {
            Request::Create(payload) => Completion::Created(gateway.create_workout(&payload)),
            Request::List { seq, user_id } => {
                let result = gateway.list_workouts(&user_id);
                Completion::Listed {
                    seq,
                    user_id,
                    result,
                }
            }
        }
    }
}
