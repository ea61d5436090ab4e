use crate::error::{TaskError, TaskResult};
use crate::model::task::{Status, Task};
use crate::repository::TaskRepository;
use crate::service::dto::NewTask;
use crate::time::{Clock, SystemClock};
use crate::validation::{validate_due_date, validate_title, STATUS_INVALID};
use uuid::Uuid;

/// Validation authority in front of a [`TaskRepository`].
pub struct TaskService<R: TaskRepository> {
    repo: R,
    clock: Box<dyn Clock>,
    reject_past_due_dates: bool,
}

impl<R: TaskRepository> TaskService<R> {
    pub fn new(repo: R) -> Self {
        Self::with_clock(repo, SystemClock)
    }

    pub fn with_clock(repo: R, clock: impl Clock + 'static) -> Self {
        Self {
            repo,
            clock: Box::new(clock),
            reject_past_due_dates: true,
        }
    }

    /// Whether create refuses due dates before today. On by default.
    pub fn reject_past_due_dates(mut self, enabled: bool) -> Self {
        self.reject_past_due_dates = enabled;
        self
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    #[tracing::instrument(skip(self))]
    pub fn list_tasks(&self) -> TaskResult<Vec<Task>> {
        Ok(self.repo.list()?)
    }

    #[tracing::instrument(skip(self))]
    pub fn create_task(&self, input: NewTask) -> TaskResult<Task> {
        let title = validate_title(input.title.as_deref())
            .map_err(|e| TaskError::validation(e.message))?;
        let not_before = self.reject_past_due_dates.then(|| self.clock.today());
        let due_date = validate_due_date(input.due_date.as_deref(), not_before)
            .map_err(|e| TaskError::validation(e.message))?;

        let created = self.repo.create(Task::new(title, due_date, self.clock.now()))?;
        tracing::info!(id = %created.id, "task created");
        Ok(created)
    }

    /// Status is checked before the id is looked up, so a bad status on an
    /// unknown id is a validation error.
    #[tracing::instrument(skip(self))]
    pub fn update_status(&self, id: &str, status: Option<&str>) -> TaskResult<Task> {
        let status: Status = status
            .and_then(|s| s.parse().ok())
            .ok_or_else(|| TaskError::validation(STATUS_INVALID))?;
        let id = parse_task_id(id)?;

        let mut task = self.repo.get(&id)?.ok_or_else(|| TaskError::not_found(id))?;
        task.set_status(status, self.clock.now());

        let updated = self.repo.update(&task)?.ok_or_else(|| TaskError::not_found(id))?;
        tracing::info!(id = %updated.id, status = %updated.status, "task status updated");
        Ok(updated)
    }

    #[tracing::instrument(skip(self))]
    pub fn delete_task(&self, id: &str) -> TaskResult<Task> {
        let id = parse_task_id(id)?;
        let removed = self.repo.delete(&id)?.ok_or_else(|| TaskError::not_found(id))?;
        tracing::info!(id = %removed.id, "task deleted");
        Ok(removed)
    }
}

// Ids are always v4 UUIDs, so anything else cannot name a stored task.
fn parse_task_id(raw: &str) -> TaskResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| TaskError::not_found(raw))
}
