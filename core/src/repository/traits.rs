use crate::model::task::Task;
use anyhow::Result;
use uuid::Uuid;

/// Persistence seam for the task collection. Errors are storage failures
/// only; a missing id is reported as `None`.
pub trait TaskRepository {
    fn list(&self) -> Result<Vec<Task>>;
    fn get(&self, id: &Uuid) -> Result<Option<Task>>;
    fn create(&self, task: Task) -> Result<Task>;
    fn update(&self, task: &Task) -> Result<Option<Task>>;
    fn delete(&self, id: &Uuid) -> Result<Option<Task>>;
}
