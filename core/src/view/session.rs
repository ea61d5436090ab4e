use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

use crate::error::TaskError;
use crate::model::task::{Status, Task};
use crate::repository::TaskRepository;
use crate::service::dto::NewTask;
use crate::service::task_service::TaskService;
use crate::view::form::NewTaskForm;
use crate::view::state::{Notice, ViewState};

/// A failed store call as the view sees it: just an optional message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
#[error("{}", .message.as_deref().unwrap_or("request failed"))]
pub struct ApiFailure {
    pub message: Option<String>,
}

impl ApiFailure {
    pub fn new(message: Option<String>) -> Self {
        Self { message }
    }

    pub fn message_or(&self, fallback: &str) -> String {
        self.message.clone().unwrap_or_else(|| fallback.to_string())
    }
}

impl From<TaskError> for ApiFailure {
    fn from(err: TaskError) -> Self {
        if let TaskError::Storage(source) = &err {
            tracing::error!("task storage failed: {:#}", source);
        }
        ApiFailure::new(Some(err.public_message()))
    }
}

/// The store operations the view calls.
pub trait TaskApi {
    fn list(&self) -> Result<Vec<Task>, ApiFailure>;
    fn create(&self, input: &NewTask) -> Result<Task, ApiFailure>;
    fn update_status(&self, id: &Uuid, status: Status) -> Result<Task, ApiFailure>;
    fn delete(&self, id: &Uuid) -> Result<Task, ApiFailure>;
}

/// Talks to a store in the same process, bypassing HTTP.
impl<R: TaskRepository> TaskApi for TaskService<R> {
    fn list(&self) -> Result<Vec<Task>, ApiFailure> {
        Ok(self.list_tasks()?)
    }

    fn create(&self, input: &NewTask) -> Result<Task, ApiFailure> {
        Ok(self.create_task(input.clone())?)
    }

    fn update_status(&self, id: &Uuid, status: Status) -> Result<Task, ApiFailure> {
        Ok(TaskService::update_status(self, &id.to_string(), Some(status.as_str()))?)
    }

    fn delete(&self, id: &Uuid) -> Result<Task, ApiFailure> {
        Ok(self.delete_task(&id.to_string())?)
    }
}

/// Drives a [`ViewState`] against a [`TaskApi`]. The cache is patched only
/// after the store confirms; every outcome leaves a notice behind.
pub struct ViewSession<A: TaskApi> {
    api: A,
    state: ViewState,
}

impl<A: TaskApi> ViewSession<A> {
    pub fn new(api: A) -> Self {
        Self { api, state: ViewState::new() }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut ViewState {
        &mut self.state
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn load(&mut self) -> bool {
        match self.api.list() {
            Ok(tasks) => {
                self.state.replace_tasks(tasks);
                true
            }
            Err(_) => {
                self.state.set_notice(Notice::error("Error loading tasks"));
                false
            }
        }
    }

    /// Runs the local pre-check first; a field error is recorded on the
    /// state and the store is not contacted.
    pub fn add_task(&mut self, form: &NewTaskForm, today: NaiveDate) -> bool {
        self.state.set_form_error(None);
        let input = match form.validate(today) {
            Ok(input) => input,
            Err(err) => {
                self.state.set_form_error(Some(err));
                return false;
            }
        };

        match self.api.create(&input) {
            Ok(task) => {
                self.state.apply_created(task);
                self.state.set_notice(Notice::success("Task added successfully!"));
                true
            }
            Err(failure) => {
                self.state.set_notice(Notice::error(failure.message_or("Error adding task")));
                false
            }
        }
    }

    pub fn set_status(&mut self, id: &Uuid, status: Status) -> bool {
        match self.api.update_status(id, status) {
            Ok(task) => {
                // Tasks missing from the cache change silently
                if !self.state.apply_updated(task) {
                    return true;
                }
                let message = match status {
                    Status::Completed => "Task marked as completed!",
                    Status::Pending => "Task marked as pending!",
                };
                self.state.set_notice(Notice::success(message));
                true
            }
            Err(failure) => {
                self.state.set_notice(Notice::error(failure.message_or("Error updating task")));
                false
            }
        }
    }

    pub fn toggle_status(&mut self, id: &Uuid) -> bool {
        let Some(current) = self.state.find(id).map(|t| t.status) else {
            return false;
        };
        self.set_status(id, current.toggled())
    }

    pub fn request_delete(&mut self, id: Uuid) {
        self.state.request_delete(id);
    }

    pub fn cancel_delete(&mut self) {
        self.state.cancel_delete();
    }

    /// Deletes the marked task, if any. The mark is cleared whatever the
    /// outcome.
    pub fn confirm_delete(&mut self) -> bool {
        let Some(id) = self.state.confirm_delete() else {
            return false;
        };

        match self.api.delete(&id) {
            Ok(_) => {
                self.state.apply_deleted(&id);
                self.state.set_notice(Notice::success("Task deleted successfully!"));
                true
            }
            Err(failure) => {
                self.state.set_notice(Notice::error(failure.message_or("Error deleting task")));
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::{Field, DUE_DATE_IN_PAST};
    use crate::view::state::NoticeKind;
    use chrono::{TimeZone, Utc};
    use std::cell::{Cell, RefCell};

    #[derive(Default)]
    struct MockApi {
        tasks: RefCell<Vec<Task>>,
        offline: Cell<bool>,
        calls: Cell<usize>,
    }

    impl MockApi {
        fn guard(&self) -> Result<(), ApiFailure> {
            self.calls.set(self.calls.get() + 1);
            if self.offline.get() {
                Err(ApiFailure::default())
            } else {
                Ok(())
            }
        }

        fn missing() -> ApiFailure {
            ApiFailure::new(Some("Task not found".to_string()))
        }
    }

    impl TaskApi for MockApi {
        fn list(&self) -> Result<Vec<Task>, ApiFailure> {
            self.guard()?;
            Ok(self.tasks.borrow().clone())
        }

        fn create(&self, input: &NewTask) -> Result<Task, ApiFailure> {
            self.guard()?;
            let due = NaiveDate::parse_from_str(input.due_date.as_deref().unwrap_or(""), "%Y-%m-%d")
                .map_err(|_| ApiFailure::new(Some("Due date is required".into())))?;
            let task = Task::new(input.title.clone().unwrap_or_default(), due, Utc::now());
            self.tasks.borrow_mut().push(task.clone());
            Ok(task)
        }

        fn update_status(&self, id: &Uuid, status: Status) -> Result<Task, ApiFailure> {
            self.guard()?;
            let mut tasks = self.tasks.borrow_mut();
            let task = tasks.iter_mut().find(|t| t.id == *id).ok_or_else(Self::missing)?;
            task.set_status(status, Utc::now());
            Ok(task.clone())
        }

        fn delete(&self, id: &Uuid) -> Result<Task, ApiFailure> {
            self.guard()?;
            let mut tasks = self.tasks.borrow_mut();
            let pos = tasks.iter().position(|t| t.id == *id).ok_or_else(Self::missing)?;
            Ok(tasks.remove(pos))
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 15).unwrap()
    }

    fn seeded_session() -> (ViewSession<MockApi>, Uuid) {
        let api = MockApi::default();
        let created = Utc.with_ymd_and_hms(2025, 1, 1, 9, 0, 0).unwrap();
        let task = Task::new("Buy milk", NaiveDate::from_ymd_opt(2025, 1, 20).unwrap(), created);
        let id = task.id;
        api.tasks.borrow_mut().push(task);

        let mut session = ViewSession::new(api);
        assert!(session.load());
        (session, id)
    }

    #[test]
    fn add_task_pre_check_never_reaches_the_store() {
        let mut session = ViewSession::new(MockApi::default());

        let added = session.add_task(&NewTaskForm::new("Late", "2025-01-14"), today());

        assert!(!added);
        assert_eq!(session.api().calls.get(), 0);
        let err = session.state().form_error().unwrap();
        assert_eq!((err.field, err.message), (Field::DueDate, DUE_DATE_IN_PAST));
    }

    #[test]
    fn add_task_patches_cache_after_success() {
        let mut session = ViewSession::new(MockApi::default());

        assert!(session.add_task(&NewTaskForm::new("Buy milk", "2025-01-15"), today()));

        assert_eq!(session.state().task_count(), 1);
        assert!(session.state().form_error().is_none());
        assert_eq!(
            session.state().notice(),
            Some(&Notice::success("Task added successfully!"))
        );
    }

    #[test]
    fn failures_leave_cache_unchanged_and_fall_back_to_generic_message() {
        let (mut session, id) = seeded_session();
        session.api().offline.set(true);

        assert!(!session.toggle_status(&id));
        assert_eq!(session.state().find(&id).unwrap().status, Status::Pending);
        assert_eq!(session.state().notice(), Some(&Notice::error("Error updating task")));

        assert!(!session.add_task(&NewTaskForm::new("Walk dog", "2025-01-16"), today()));
        assert_eq!(session.state().task_count(), 1);
        assert_eq!(session.state().notice(), Some(&Notice::error("Error adding task")));

        assert!(!session.load());
        assert_eq!(session.state().notice(), Some(&Notice::error("Error loading tasks")));
    }

    #[test]
    fn toggle_flips_status_through_the_store() {
        let (mut session, id) = seeded_session();

        assert!(session.toggle_status(&id));
        assert_eq!(session.state().find(&id).unwrap().status, Status::Completed);
        assert_eq!(
            session.state().notice().map(|n| n.message.as_str()),
            Some("Task marked as completed!")
        );

        assert!(session.toggle_status(&id));
        assert_eq!(session.state().find(&id).unwrap().status, Status::Pending);
        assert!(!session.toggle_status(&Uuid::new_v4()));
    }

    #[test]
    fn status_change_outside_the_cache_leaves_no_notice() {
        let (mut session, _) = seeded_session();
        let created = Utc.with_ymd_and_hms(2025, 1, 2, 9, 0, 0).unwrap();
        let other = Task::new("Walk dog", NaiveDate::from_ymd_opt(2025, 1, 21).unwrap(), created);
        let other_id = other.id;
        session.api().tasks.borrow_mut().push(other);
        session.state_mut().clear_notice();

        assert!(session.set_status(&other_id, Status::Completed));
        assert!(session.state().notice().is_none());
        assert!(session.state().find(&other_id).is_none());
        assert_eq!(session.state().task_count(), 1);
    }

    #[test]
    fn delete_requires_confirmation() {
        let (mut session, id) = seeded_session();

        session.request_delete(id);
        session.cancel_delete();
        assert!(!session.confirm_delete());
        assert_eq!(session.state().task_count(), 1);

        session.request_delete(id);
        assert!(session.confirm_delete());
        assert_eq!(session.state().task_count(), 0);
        assert_eq!(session.state().pending_delete(), None);
        assert_eq!(
            session.state().notice(),
            Some(&Notice::success("Task deleted successfully!"))
        );
    }

    #[test]
    fn delete_failure_shows_store_message_and_clears_mark() {
        let (mut session, _) = seeded_session();

        session.request_delete(Uuid::new_v4());
        assert!(!session.confirm_delete());

        let notice = session.state().notice().unwrap();
        assert_eq!(notice.kind, NoticeKind::Error);
        assert_eq!(notice.message, "Task not found");
        assert_eq!(session.state().pending_delete(), None);
        assert_eq!(session.state().task_count(), 1);
    }
}
