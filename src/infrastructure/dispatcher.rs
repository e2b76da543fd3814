//! Runs gateway requests off the UI thread.

use crate::application::{Completion, Request};
use crate::domain::WorkoutGateway;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tracing::debug;

/// Executes each [`Request`] on its own thread and queues the resulting
/// [`Completion`]s for the event loop.
///
/// Requests are neither deduplicated nor cancelled, so completions may
/// arrive in any order.
pub struct RequestDispatcher {
    gateway: Arc<dyn WorkoutGateway>,
    sender: Sender<Completion>,
    receiver: Receiver<Completion>,
}

impl RequestDispatcher {
    pub fn new(gateway: Arc<dyn WorkoutGateway>) -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            gateway,
            sender,
            receiver,
        }
    }

    pub fn dispatch(&self, request: Request) {
        let gateway = Arc::clone(&self.gateway);
        let sender = self.sender.clone();
        thread::spawn(move || {
            let completion = request.execute(gateway.as_ref());
            // The receiver only goes away when the application is exiting.
            if sender.send(completion).is_err() {
                debug!("completion dropped, dispatcher gone");
            }
        });
    }

    /// Drains every completion that has arrived so far without blocking.
    pub fn completions(&self) -> Vec<Completion> {
        self.receiver.try_iter().collect()
    }

    /// Waits up to `timeout` for the next completion.
    pub fn next_completion(&self, timeout: Duration) -> Option<Completion> {
        match self.receiver.recv_timeout(timeout) {
            Ok(completion) => Some(completion),
            Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{GatewayError, GatewayResult, NewWorkout, WorkoutDraft, WorkoutRecord};
    use std::sync::Mutex;

    #[derive(Default)]
    struct CountingGateway {
        lists: Mutex<Vec<String>>,
    }

    impl WorkoutGateway for CountingGateway {
        fn create_workout(&self, _payload: &NewWorkout) -> GatewayResult<()> {
            Err(GatewayError::SaveFailed)
        }

        fn list_workouts(&self, user_id: &str) -> GatewayResult<Vec<WorkoutRecord>> {
            self.lists.lock().unwrap().push(user_id.to_string());
            Ok(Vec::new())
        }
    }

    #[test]
    fn test_dispatch_delivers_completions() {
        let gateway = Arc::new(CountingGateway::default());
        let dispatcher = RequestDispatcher::new(gateway.clone());

        dispatcher.dispatch(Request::List {
            seq: 7,
            user_id: "frank".to_string(),
        });
        dispatcher.dispatch(Request::Create(
            WorkoutDraft::starter("frank", "2024-01-01").to_payload(),
        ));

        let mut received = Vec::new();
        for _ in 0..2 {
            received.push(
                dispatcher
                    .next_completion(Duration::from_secs(5))
                    .expect("completion"),
            );
        }

        assert!(received.contains(&Completion::Created(Err(GatewayError::SaveFailed))));
        assert!(received.contains(&Completion::Listed {
            seq: 7,
            user_id: "frank".to_string(),
            result: Ok(Vec::new()),
        }));
        assert_eq!(*gateway.lists.lock().unwrap(), vec!["frank".to_string()]);
        assert!(dispatcher.completions().is_empty());
    }
}
