pub mod error;
pub mod input;
pub mod model;
pub mod repository;
pub mod service;
pub mod time;
pub mod validation;
pub mod view;

pub use error::{TaskError, TaskResult};
pub use input::{parse_args, parse_new_task, expand_key, ParsedInput};
pub use model::task::{Task, Status};
pub use repository::{TaskRepository, FileTaskRepository};
pub use service::dto::{ApiResponse, NewTask, StatusUpdate};
pub use service::task_service::TaskService;
pub use time::{parse_due_date, parse_human_date, Clock, FixedClock, SystemClock};
pub use view::{
    ApiFailure, NewTaskForm, Notice, NoticeKind, StatusFilter, TaskApi, TaskRow, Urgency,
    ViewSession, ViewState,
};
