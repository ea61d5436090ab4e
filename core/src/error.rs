use thiserror::Error;

/// Failures surfaced by the task store.
#[derive(Debug, Error)]
pub enum TaskError {
    /// A missing or malformed field the user can correct.
    #[error("{0}")]
    Validation(String),

    #[error("Task not found")]
    NotFound { id: String },

    /// The backing file could not be read or written.
    #[error("task storage failed")]
    Storage(#[from] anyhow::Error),
}

impl TaskError {
    pub fn validation(message: impl Into<String>) -> Self {
        TaskError::Validation(message.into())
    }

    pub fn not_found(id: impl ToString) -> Self {
        TaskError::NotFound { id: id.to_string() }
    }

    /// Message safe to show a user. Storage details stay server-side.
    pub fn public_message(&self) -> String {
        match self {
            TaskError::Validation(message) => message.clone(),
            TaskError::NotFound { .. } => "Task not found".to_string(),
            TaskError::Storage(_) => "Error accessing task storage".to_string(),
        }
    }
}

pub type TaskResult<T> = Result<T, TaskError>;
