use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::{debug, info};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: u64,
    pub content: String,
    pub completed_flg: bool,
    pub delete_flg: bool,
    #[serde(default)]
    pub sort_order: i64,
}

#[derive(Deserialize)]
pub struct CreateTask {
    pub content: String,
    #[serde(default)]
    pub completed_flg: bool,
    #[serde(default)]
    pub delete_flg: bool,
    #[serde(default)]
    pub sort_order: i64,
}

/// Full replacement body. An `id` in the body is ignored; the path wins.
#[derive(Deserialize)]
pub struct ReplaceTask {
    pub content: String,
    pub completed_flg: bool,
    pub delete_flg: bool,
    #[serde(default)]
    pub sort_order: i64,
}

#[derive(Debug, Default)]
pub struct Store {
    tasks: Vec<Task>,
    last_id: u64,
}

pub type Db = Arc<RwLock<Store>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    Router::new()
        .route("/todos", get(list_tasks).post(create_task))
        .route("/todos/{id}", put(replace_task).delete(delete_task))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "mock task store listening");
    }
    axum::serve(listener, app()).await
}

/// Ascending `sort_order`, newest first among ties.
async fn list_tasks(State(db): State<Db>) -> Json<Vec<Task>> {
    let store = db.read().await;
    let mut tasks = store.tasks.clone();
    tasks.sort_by(|a, b| a.sort_order.cmp(&b.sort_order).then(b.id.cmp(&a.id)));
    Json(tasks)
}

async fn create_task(
    State(db): State<Db>,
    Json(input): Json<CreateTask>,
) -> (StatusCode, Json<Task>) {
    let mut store = db.write().await;
    store.last_id += 1;
    let task = Task {
        id: store.last_id,
        content: input.content,
        completed_flg: input.completed_flg,
        delete_flg: input.delete_flg,
        sort_order: input.sort_order,
    };
    store.tasks.push(task.clone());
    debug!(id = task.id, "created task");
    (StatusCode::CREATED, Json(task))
}

async fn replace_task(
    State(db): State<Db>,
    Path(id): Path<u64>,
    Json(input): Json<ReplaceTask>,
) -> Result<Json<Task>, StatusCode> {
    let mut store = db.write().await;
    let task = store
        .tasks
        .iter_mut()
        .find(|t| t.id == id)
        .ok_or(StatusCode::NOT_FOUND)?;
    *task = Task {
        id,
        content: input.content,
        completed_flg: input.completed_flg,
        delete_flg: input.delete_flg,
        sort_order: input.sort_order,
    };
    debug!(id, "replaced task");
    Ok(Json(task.clone()))
}

async fn delete_task(State(db): State<Db>, Path(id): Path<u64>) -> StatusCode {
    let mut store = db.write().await;
    let before = store.tasks.len();
    store.tasks.retain(|t| t.id != id);
    if store.tasks.len() == before {
        return StatusCode::NOT_FOUND;
    }
    debug!(id, "deleted task");
    StatusCode::NO_CONTENT
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_serializes_with_flag_names() {
        let task = Task {
            id: 1,
            content: "Test".to_string(),
            completed_flg: false,
            delete_flg: true,
            sort_order: 3,
        };
        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["content"], "Test");
        assert_eq!(json["completed_flg"], false);
        assert_eq!(json["delete_flg"], true);
        assert_eq!(json["sort_order"], 3);
    }

    #[test]
    fn create_task_defaults_flags_to_false() {
        let input: CreateTask = serde_json::from_str(r#"{"content":"No flags"}"#).unwrap();
        assert_eq!(input.content, "No flags");
        assert!(!input.completed_flg);
        assert!(!input.delete_flg);
        assert_eq!(input.sort_order, 0);
    }

    #[test]
    fn create_task_rejects_missing_content() {
        let result: Result<CreateTask, _> = serde_json::from_str(r#"{"completed_flg":true}"#);
        assert!(result.is_err());
    }

    #[test]
    fn replace_task_requires_every_flag() {
        let result: Result<ReplaceTask, _> = serde_json::from_str(r#"{"content":"x"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn replace_task_ignores_body_id() {
        let input: ReplaceTask = serde_json::from_str(
            r#"{"id":99,"content":"x","completed_flg":true,"delete_flg":false,"sort_order":2}"#,
        )
        .unwrap();
        assert!(input.completed_flg);
        assert_eq!(input.sort_order, 2);
    }
}
