//! Client-side view model: a task cache plus the pure rules that turn it into
//! the rows a front end draws. Nothing here knows about a particular UI
//! toolkit or transport.

pub mod filter;
pub mod form;
pub mod row;
pub mod session;
pub mod state;

pub use filter::{derive_rows, StatusFilter};
pub use form::NewTaskForm;
pub use row::{is_due_soon, is_overdue, TaskRow, Urgency};
pub use session::{ApiFailure, TaskApi, ViewSession};
pub use state::{Notice, NoticeKind, ViewState};
