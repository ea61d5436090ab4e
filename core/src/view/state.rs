use chrono::NaiveDate;
use uuid::Uuid;

use crate::model::task::Task;
use crate::validation::FieldError;
use crate::view::filter::{derive_rows, StatusFilter};
use crate::view::row::TaskRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// A transient message shown after a user action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Success, message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Error, message: message.into() }
    }
}

/// Everything a front end needs to draw the task list. The cache mirrors the
/// store after each confirmed success and is never the source of truth.
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    tasks: Vec<Task>,
    filter: StatusFilter,
    search: String,
    pending_delete: Option<Uuid>,
    notice: Option<Notice>,
    form_error: Option<FieldError>,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn find(&self, id: &Uuid) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == *id)
    }

    /// Size of the whole cache, regardless of filter or search.
    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    pub fn filter(&self) -> StatusFilter {
        self.filter
    }

    pub fn set_filter(&mut self, filter: StatusFilter) {
        self.filter = filter;
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
    }

    pub fn visible(&self, today: NaiveDate) -> Vec<TaskRow<'_>> {
        derive_rows(&self.tasks, self.filter, &self.search, today)
    }

    pub fn replace_tasks(&mut self, tasks: Vec<Task>) {
        self.tasks = tasks;
    }

    pub fn apply_created(&mut self, task: Task) {
        self.tasks.push(task);
    }

    /// Swaps in the store's copy of a task. Unknown ids are ignored and
    /// reported as `false`.
    pub fn apply_updated(&mut self, task: Task) -> bool {
        match self.tasks.iter_mut().find(|t| t.id == task.id) {
            Some(slot) => {
                *slot = task;
                true
            }
            None => false,
        }
    }

    pub fn apply_deleted(&mut self, id: &Uuid) {
        self.tasks.retain(|t| t.id != *id);
    }

    pub fn pending_delete(&self) -> Option<Uuid> {
        self.pending_delete
    }

    /// First step of a delete: mark the task and wait for confirmation.
    pub fn request_delete(&mut self, id: Uuid) {
        self.pending_delete = Some(id);
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Clears the mark and hands back the id that should now be deleted.
    pub fn confirm_delete(&mut self) -> Option<Uuid> {
        self.pending_delete.take()
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn set_notice(&mut self, notice: Notice) {
        self.notice = Some(notice);
    }

    pub fn clear_notice(&mut self) {
        self.notice = None;
    }

    pub fn form_error(&self) -> Option<&FieldError> {
        self.form_error.as_ref()
    }

    pub fn set_form_error(&mut self, error: Option<FieldError>) {
        self.form_error = error;
    }
}
