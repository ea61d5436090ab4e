//! JSON endpoints under `/api/tasks`. Every body, success or failure, is an
//! [`ApiResponse`] envelope.

use std::sync::{Arc, Mutex, MutexGuard};

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, put},
    Router,
};
use taskboard_core::{ApiResponse, NewTask, StatusUpdate, Task, TaskError, TaskRepository, TaskService};

/// One service per process. The mutex makes each request's
/// read-modify-write of the data file finish before the next one starts.
pub type SharedTaskService<R> = Arc<Mutex<TaskService<R>>>;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Task(#[from] TaskError),

    #[error("invalid request body: {0}")]
    InvalidBody(#[from] JsonRejection),

    #[error("task service lock poisoned")]
    LockPoisoned,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::Task(err @ TaskError::Validation(_)) => {
                (StatusCode::BAD_REQUEST, err.public_message())
            }
            ApiError::Task(err @ TaskError::NotFound { id }) => {
                tracing::debug!(%id, "task not found");
                (StatusCode::NOT_FOUND, err.public_message())
            }
            ApiError::Task(err @ TaskError::Storage(source)) => {
                tracing::error!("Task storage failure: {:#}", source);
                (StatusCode::INTERNAL_SERVER_ERROR, err.public_message())
            }
            ApiError::InvalidBody(rejection) => {
                tracing::debug!("Rejected request body: {}", rejection.body_text());
                (StatusCode::BAD_REQUEST, "Invalid request body".to_string())
            }
            ApiError::LockPoisoned => {
                tracing::error!("{}", self);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Error accessing task storage".to_string(),
                )
            }
        };

        (status, Json(ApiResponse::<()>::failure(message))).into_response()
    }
}

fn lock<R: TaskRepository>(
    service: &SharedTaskService<R>,
) -> Result<MutexGuard<'_, TaskService<R>>, ApiError> {
    service.lock().map_err(|_| ApiError::LockPoisoned)
}

/// Handler for GET /api/tasks - every task in stored order.
#[tracing::instrument(skip(service))]
pub async fn list_tasks_handler<R>(
    State(service): State<SharedTaskService<R>>,
) -> Result<Json<ApiResponse<Vec<Task>>>, ApiError>
where
    R: TaskRepository + Send + 'static,
{
    let tasks = lock(&service)?.list_tasks()?;
    Ok(Json(ApiResponse::ok(tasks)))
}

/// Handler for POST /api/tasks.
#[tracing::instrument(skip(service))]
pub async fn create_task_handler<R>(
    State(service): State<SharedTaskService<R>>,
    payload: Result<Json<NewTask>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<Task>>), ApiError>
where
    R: TaskRepository + Send + 'static,
{
    let Json(input) = payload?;
    let task = lock(&service)?.create_task(input)?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok_with_message(task, "Task created successfully")),
    ))
}

/// Handler for PUT /api/tasks/{id} - changes only the status.
#[tracing::instrument(skip(service))]
pub async fn update_task_handler<R>(
    State(service): State<SharedTaskService<R>>,
    Path(id): Path<String>,
    payload: Result<Json<StatusUpdate>, JsonRejection>,
) -> Result<Json<ApiResponse<Task>>, ApiError>
where
    R: TaskRepository + Send + 'static,
{
    let Json(update) = payload?;
    let task = lock(&service)?.update_status(&id, update.status.as_deref())?;
    Ok(Json(ApiResponse::ok_with_message(task, "Task updated successfully")))
}

/// Handler for DELETE /api/tasks/{id} - responds with the removed task.
#[tracing::instrument(skip(service))]
pub async fn delete_task_handler<R>(
    State(service): State<SharedTaskService<R>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Task>>, ApiError>
where
    R: TaskRepository + Send + 'static,
{
    let task = lock(&service)?.delete_task(&id)?;
    Ok(Json(ApiResponse::ok_with_message(task, "Task deleted successfully")))
}

/// Creates the task API router around `service`.
pub fn create_api_router<R>(service: TaskService<R>) -> Router
where
    R: TaskRepository + Send + 'static,
{
    let state: SharedTaskService<R> = Arc::new(Mutex::new(service));
    Router::new()
        .route(
            "/api/tasks",
            get(list_tasks_handler::<R>).post(create_task_handler::<R>),
        )
        .route(
            "/api/tasks/{id}",
            put(update_task_handler::<R>).delete(delete_task_handler::<R>),
        )
        .with_state(state)
}
