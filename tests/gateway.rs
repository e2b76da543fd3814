//! HTTP gateway against a stub backend served by axum on a background
//! tokio runtime.

use std::collections::HashMap;
use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use serde_json::{json, Value};

use workout_logger::application::App;
use workout_logger::domain::{
    ExerciseEntry, GatewayError, WorkoutDraft, WorkoutGateway, WorkoutRecord,
};
use workout_logger::infrastructure::{HttpGateway, RequestDispatcher};

#[derive(Debug, Clone, PartialEq)]
enum Received {
    Create(Value),
    List(String),
}

#[derive(Clone)]
struct Stub {
    create_status: StatusCode,
    list_status: StatusCode,
    list_body: String,
    received: Arc<Mutex<Vec<Received>>>,
}

impl Stub {
    fn new() -> Self {
        Self {
            create_status: StatusCode::CREATED,
            list_status: StatusCode::OK,
            list_body: "[]".to_string(),
            received: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn received(&self) -> Vec<Received> {
        self.received.lock().unwrap().clone()
    }
}

async fn create_workout(State(stub): State<Stub>, Json(body): Json<Value>) -> StatusCode {
    stub.received.lock().unwrap().push(Received::Create(body));
    stub.create_status
}

async fn list_workouts(
    State(stub): State<Stub>,
    Query(params): Query<HashMap<String, String>>,
) -> (StatusCode, String) {
    let user_id = params.get("user_id").cloned().unwrap_or_default();
    stub.received.lock().unwrap().push(Received::List(user_id));
    (stub.list_status, stub.list_body.clone())
}

/// Serves `stub` on a random local port and returns its base URL.
fn spawn_backend(stub: Stub) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind random port");
    let addr = listener.local_addr().expect("local addr");
    listener.set_nonblocking(true).expect("nonblocking listener");

    let app = Router::new()
        .route("/api/workouts", post(create_workout).get(list_workouts))
        .with_state(stub);

    thread::spawn(move || {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("tokio runtime");
        runtime.block_on(async move {
            let listener = tokio::net::TcpListener::from_std(listener).expect("tokio listener");
            axum::serve(listener, app).await.expect("serve stub backend");
        });
    });

    format!("http://{addr}")
}

fn unreachable_backend() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind random port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{port}")
}

#[test]
fn create_posts_draft_as_json() {
    let stub = Stub::new();
    let gateway = HttpGateway::new(spawn_backend(stub.clone())).unwrap();
    let draft = WorkoutDraft::starter("demo-user", "2024-01-01");

    assert_eq!(gateway.create_workout(&draft.to_payload()), Ok(()));

    assert_eq!(
        stub.received(),
        vec![Received::Create(json!({
            "user_id": "demo-user",
            "workout_date": "2024-01-01",
            "title": "Push Day",
            "notes": null,
            "exercises": [{"name": "Bench Press", "sets": 3, "reps": 8, "weight": 60.0}],
        }))]
    );
}

#[test]
fn create_server_error_is_save_failed() {
    let stub = Stub {
        create_status: StatusCode::INTERNAL_SERVER_ERROR,
        ..Stub::new()
    };
    let gateway = HttpGateway::new(spawn_backend(stub)).unwrap();
    let draft = WorkoutDraft::starter("demo-user", "2024-01-01");

    let err = gateway.create_workout(&draft.to_payload()).unwrap_err();
    assert_eq!(err, GatewayError::SaveFailed);
    assert_eq!(err.to_string(), "Failed to save workout");
}

#[test]
fn list_encodes_user_and_parses_records() {
    let stub = Stub {
        list_body: json!([
            {
                "_id": "65a1",
                "user_id": "ivy & co/1",
                "title": "Push Day",
                "workout_date": "2024-01-01T00:00:00.000Z",
                "notes": null,
                "exercises": [{"name": "Bench Press", "sets": 3, "reps": 8, "weight": 60}],
            },
            {"_id": "65a2", "user_id": "ivy & co/1", "title": "Rest", "workout_date": "2024-01-02"},
        ])
        .to_string(),
        ..Stub::new()
    };
    let gateway = HttpGateway::new(spawn_backend(stub.clone())).unwrap();

    let records = gateway.list_workouts("ivy & co/1").unwrap();

    assert_eq!(stub.received(), vec![Received::List("ivy & co/1".to_string())]);
    assert_eq!(
        records,
        vec![
            WorkoutRecord {
                id: "65a1".to_string(),
                user_id: "ivy & co/1".to_string(),
                title: "Push Day".to_string(),
                workout_date: "2024-01-01T00:00:00.000Z".to_string(),
                notes: None,
                exercises: vec![ExerciseEntry::new("Bench Press", 3, 8, 60.0)],
            },
            WorkoutRecord {
                id: "65a2".to_string(),
                user_id: "ivy & co/1".to_string(),
                title: "Rest".to_string(),
                workout_date: "2024-01-02".to_string(),
                notes: None,
                exercises: Vec::new(),
            },
        ]
    );
}

#[test]
fn list_keeps_records_with_null_and_fractional_values() {
    let stub = Stub {
        list_body: json!([
            {"_id": "1", "user_id": "demo-user", "title": "Push Day", "workout_date": "2024-01-01"},
            {"_id": "2", "user_id": "demo-user", "title": null, "workout_date": "2024-01-02",
             "exercises": [{"name": "Dips", "sets": 2.5, "reps": 10, "weight": null}]},
        ])
        .to_string(),
        ..Stub::new()
    };
    let gateway = HttpGateway::new(spawn_backend(stub)).unwrap();

    let records = gateway.list_workouts("demo-user").unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].title, "Push Day");
    assert_eq!(records[1].title, "");
    assert_eq!(records[1].exercises, vec![ExerciseEntry::new("Dips", 3, 10, 0.0)]);
}

#[test]
fn list_error_status_is_fetch_failed() {
    let stub = Stub {
        list_status: StatusCode::NOT_FOUND,
        ..Stub::new()
    };
    let gateway = HttpGateway::new(spawn_backend(stub)).unwrap();

    assert_eq!(gateway.list_workouts("demo-user"), Err(GatewayError::FetchFailed));
}

#[test]
fn list_malformed_body_is_fetch_failed() {
    let stub = Stub {
        list_body: "{\"not\": \"a list\"}".to_string(),
        ..Stub::new()
    };
    let gateway = HttpGateway::new(spawn_backend(stub)).unwrap();

    assert_eq!(gateway.list_workouts("demo-user"), Err(GatewayError::FetchFailed));
}

#[test]
fn unreachable_backend_collapses_to_fixed_errors() {
    let gateway = HttpGateway::new(unreachable_backend()).unwrap();
    let draft = WorkoutDraft::starter("demo-user", "2024-01-01");

    assert_eq!(
        gateway.create_workout(&draft.to_payload()),
        Err(GatewayError::SaveFailed)
    );
    assert_eq!(gateway.list_workouts("demo-user"), Err(GatewayError::FetchFailed));
}

#[test]
fn saved_workout_round_trip_through_dispatcher() {
    let stub = Stub {
        list_body: json!([
            {"_id": "1", "user_id": "demo-user", "title": "Push Day", "workout_date": "2024-01-01"},
        ])
        .to_string(),
        ..Stub::new()
    };
    let gateway = HttpGateway::new(spawn_backend(stub.clone())).unwrap();
    let dispatcher = RequestDispatcher::new(Arc::new(gateway));
    let mut app = App::new("2024-01-01");

    dispatcher.dispatch(app.submit().expect("submit"));
    let saved = dispatcher
        .next_completion(Duration::from_secs(10))
        .expect("create completion");
    let follow_up = app.apply(saved).expect("refresh after save");
    assert_eq!(app.message.as_deref(), Some("Workout saved!"));

    dispatcher.dispatch(follow_up);
    let listed = dispatcher
        .next_completion(Duration::from_secs(10))
        .expect("list completion");
    assert!(app.apply(listed).is_none());

    assert_eq!(app.workouts.len(), 1);
    assert_eq!(app.workouts[0].title, "Push Day");
    let received = stub.received();
    assert_eq!(received.len(), 2);
    assert!(matches!(received[0], Received::Create(_)));
    assert_eq!(received[1], Received::List("demo-user".to_string()));
}
