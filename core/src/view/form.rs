use chrono::NaiveDate;

use crate::service::dto::NewTask;
use crate::validation::{validate_due_date, validate_title, FieldError};

/// Raw text of the add-task form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewTaskForm {
    pub title: String,
    pub due_date: String,
}

impl NewTaskForm {
    pub fn new(title: impl Into<String>, due_date: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            due_date: due_date.into(),
        }
    }

    /// Local pre-check run before the store is contacted: both fields
    /// required, and the due date may not be before `today`.
    pub fn validate(&self, today: NaiveDate) -> Result<NewTask, FieldError> {
        let title = validate_title(Some(self.title.as_str()))?;
        let due_date = validate_due_date(Some(self.due_date.as_str()), Some(today))?;
        Ok(NewTask::new(title, due_date.format("%Y-%m-%d").to_string()))
    }
}
