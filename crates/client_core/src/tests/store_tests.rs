use super::*;

use std::{collections::HashMap, sync::Arc, time::Duration};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, patch},
    Json, Router,
};
use serde_json::{json, Value};
use shared::{
    domain::{TaskId, NO_DESCRIPTION},
    protocol::NewTask,
};
use tokio::{net::TcpListener, sync::Mutex};

#[derive(Clone, Default)]
struct MockStore {
    tasks: Arc<Mutex<Vec<Value>>>,
    created: Arc<Mutex<Vec<NewTask>>>,
    deleted: Arc<Mutex<Vec<String>>>,
    status_updates: Arc<Mutex<Vec<(String, String)>>>,
}

async fn list_tasks(State(store): State<MockStore>) -> Json<Vec<Value>> {
    Json(store.tasks.lock().await.clone())
}

async fn create_task(State(store): State<MockStore>, Json(task): Json<NewTask>) -> StatusCode {
    store.created.lock().await.push(task);
    StatusCode::CREATED
}

async fn delete_task(State(store): State<MockStore>, Path(id): Path<String>) -> StatusCode {
    store.deleted.lock().await.push(id);
    StatusCode::OK
}

async fn update_status(
    State(store): State<MockStore>,
    Path(id): Path<String>,
    Query(query): Query<HashMap<String, String>>,
) -> StatusCode {
    let status = query.get("status").cloned().unwrap_or_default();
    store.status_updates.lock().await.push((id, status));
    StatusCode::OK
}

async fn serve(app: Router) -> String {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    format!("http://{addr}")
}

async fn spawn_mock_store(tasks: Vec<Value>) -> (String, MockStore) {
    let state = MockStore::default();
    *state.tasks.lock().await = tasks;
    let app = Router::new()
        .route("/tasks", get(list_tasks).post(create_task))
        .route("/tasks/:id", delete(delete_task))
        .route("/tasks/:id/status", patch(update_status))
        .with_state(state.clone());
    let base = serve(app).await;
    (format!("{base}/tasks"), state)
}

fn client(tasks_url: &str) -> HttpTaskStore {
    HttpTaskStore::new(tasks_url, Duration::from_secs(5)).expect("client")
}

#[tokio::test]
async fn fetch_all_decodes_task_list() {
    let (url, _) = spawn_mock_store(vec![
        json!({"id": 1, "title": "Write spec", "description": "draft", "assignee": "sam", "status": "To Do"}),
        json!({"id": "abc", "title": "Ship", "description": null, "assignee": null, "status": "Done"}),
    ])
    .await;

    let tasks = client(&url).fetch_all().await.expect("fetch");
    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks[0].id, TaskId::from(1));
    assert_eq!(tasks[0].assignee.as_deref(), Some("sam"));
    assert_eq!(tasks[1].id, TaskId::from("abc"));
    assert_eq!(tasks[1].description, None);
    assert_eq!(tasks[1].status.as_deref(), Some("Done"));
}

#[tokio::test]
async fn create_posts_title_description_and_assignee() {
    let (url, state) = spawn_mock_store(Vec::new()).await;
    let task = NewTask {
        title: "Write spec".into(),
        description: NO_DESCRIPTION.into(),
        assignee: "sam".into(),
    };

    client(&url).create(&task).await.expect("create");
    assert_eq!(*state.created.lock().await, vec![task]);
}

#[tokio::test]
async fn set_status_escapes_id_and_status() {
    let (url, state) = spawn_mock_store(Vec::new()).await;

    client(&url)
        .set_status(&TaskId::from("a b/c"), "In Progress")
        .await
        .expect("set status");

    assert_eq!(
        *state.status_updates.lock().await,
        vec![("a b/c".to_string(), "In Progress".to_string())]
    );
}

#[tokio::test]
async fn remove_targets_task_path() {
    let (url, state) = spawn_mock_store(Vec::new()).await;

    client(&url).remove(&TaskId::from(42)).await.expect("remove");
    assert_eq!(*state.deleted.lock().await, vec!["42".to_string()]);
}

#[tokio::test]
async fn trailing_slash_in_base_url_is_tolerated() {
    let (url, state) = spawn_mock_store(Vec::new()).await;

    client(&format!("{url}/"))
        .remove(&TaskId::from(7))
        .await
        .expect("remove");
    assert_eq!(*state.deleted.lock().await, vec!["7".to_string()]);
}

#[tokio::test]
async fn non_success_status_is_http_failure() {
    let app = Router::new().route(
        "/tasks/:id",
        delete(|| async {
            (
                StatusCode::NOT_FOUND,
                Json(json!({"detail": "Task not found"})),
            )
        }),
    );
    let base = serve(app).await;

    let err = client(&format!("{base}/tasks"))
        .remove(&TaskId::from(9))
        .await
        .expect_err("404");
    assert_eq!(err.status(), Some(404));
    match err {
        StoreError::Http { body, .. } => assert_eq!(body, "Task not found"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn malformed_body_is_decode_failure() {
    let app = Router::new().route("/tasks", get(|| async { "definitely not json" }));
    let base = serve(app).await;

    let err = client(&format!("{base}/tasks"))
        .fetch_all()
        .await
        .expect_err("decode");
    assert!(matches!(err, StoreError::Decode(_)), "{err:?}");
}

#[tokio::test]
async fn task_without_title_is_decode_failure() {
    let (url, _) = spawn_mock_store(vec![json!({"id": 1, "status": "To Do"})]).await;

    let err = client(&url).fetch_all().await.expect_err("decode");
    assert!(matches!(err, StoreError::Decode(_)), "{err:?}");
}

#[tokio::test]
async fn unreachable_store_is_network_failure() {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let err = client(&format!("http://{addr}/tasks"))
        .fetch_all()
        .await
        .expect_err("network");
    assert!(err.is_network(), "{err:?}");
}

#[test]
fn rejects_non_http_urls() {
    assert!(HttpTaskStore::new("not a url", Duration::from_secs(1)).is_err());
    assert!(HttpTaskStore::new("mailto:someone@example.com", Duration::from_secs(1)).is_err());
    assert!(HttpTaskStore::new("ftp://example.com/tasks", Duration::from_secs(1)).is_err());
}
