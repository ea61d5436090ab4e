use taskboard_core::{ApiFailure, FileTaskRepository, NewTask, Status, Task, TaskApi, TaskService};
use uuid::Uuid;

use crate::http::HttpTaskApi;

/// Where the view sends its store calls.
pub enum Backend {
    /// A running task board server.
    Remote(HttpTaskApi),
    /// A data file opened in-process.
    Local(TaskService<FileTaskRepository>),
}

impl TaskApi for Backend {
    fn list(&self) -> Result<Vec<Task>, ApiFailure> {
        match self {
            Backend::Remote(api) => api.list(),
            Backend::Local(service) => TaskApi::list(service),
        }
    }

    fn create(&self, input: &NewTask) -> Result<Task, ApiFailure> {
        match self {
            Backend::Remote(api) => api.create(input),
            Backend::Local(service) => TaskApi::create(service, input),
        }
    }

    fn update_status(&self, id: &Uuid, status: Status) -> Result<Task, ApiFailure> {
        match self {
            Backend::Remote(api) => api.update_status(id, status),
            Backend::Local(service) => TaskApi::update_status(service, id, status),
        }
    }

    fn delete(&self, id: &Uuid) -> Result<Task, ApiFailure> {
        match self {
            Backend::Remote(api) => api.delete(id),
            Backend::Local(service) => TaskApi::delete(service, id),
        }
    }
}
