use chrono::NaiveDate;

use crate::model::task::Task;
use crate::time::days_until;

/// How many days ahead a pending task counts as due soon.
pub const DUE_SOON_DAYS: i64 = 3;

/// Visual class of a row, in precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Urgency {
    Completed,
    Overdue,
    DueSoon,
    Pending,
}

impl Urgency {
    pub fn label(&self) -> Option<&'static str> {
        match self {
            Urgency::Overdue => Some("Overdue"),
            Urgency::DueSoon => Some("Due Soon"),
            Urgency::Completed | Urgency::Pending => None,
        }
    }
}

/// An incomplete task whose due date is strictly before today.
pub fn is_overdue(task: &Task, today: NaiveDate) -> bool {
    !task.is_completed() && task.due_date < today
}

/// An incomplete task due today or within the next three days.
pub fn is_due_soon(task: &Task, today: NaiveDate) -> bool {
    !task.is_completed() && (0..=DUE_SOON_DAYS).contains(&days_until(today, task.due_date))
}

/// A task plus the display attributes derived for a given day.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskRow<'a> {
    pub task: &'a Task,
    pub is_overdue: bool,
    pub is_due_soon: bool,
    pub urgency: Urgency,
}

impl<'a> TaskRow<'a> {
    pub fn new(task: &'a Task, today: NaiveDate) -> Self {
        let is_overdue = is_overdue(task, today);
        let is_due_soon = is_due_soon(task, today);
        let urgency = if task.is_completed() {
            Urgency::Completed
        } else if is_overdue {
            Urgency::Overdue
        } else if is_due_soon {
            Urgency::DueSoon
        } else {
            Urgency::Pending
        };

        Self {
            task,
            is_overdue,
            is_due_soon,
            urgency,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::task::Status;
    use chrono::{Duration, TimeZone, Utc};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 15).unwrap()
    }

    fn task_due(offset_days: i64, status: Status) -> Task {
        let created = Utc.with_ymd_and_hms(2025, 1, 1, 9, 0, 0).unwrap();
        let mut task = Task::new("Task", today() + Duration::days(offset_days), created);
        task.status = status;
        task
    }

    #[test]
    fn overdue_only_when_pending_and_past() {
        assert!(is_overdue(&task_due(-1, Status::Pending), today()));
        assert!(!is_overdue(&task_due(-1, Status::Completed), today()));
        assert!(!is_overdue(&task_due(0, Status::Pending), today()));
    }

    #[test]
    fn due_soon_window_is_zero_to_three_days() {
        assert!(is_due_soon(&task_due(0, Status::Pending), today()));
        assert!(is_due_soon(&task_due(3, Status::Pending), today()));
        assert!(!is_due_soon(&task_due(4, Status::Pending), today()));
        assert!(!is_due_soon(&task_due(-1, Status::Pending), today()));
        assert!(!is_due_soon(&task_due(1, Status::Completed), today()));
    }

    #[test]
    fn urgency_precedence() {
        let cases = [
            (task_due(-2, Status::Completed), Urgency::Completed),
            (task_due(-2, Status::Pending), Urgency::Overdue),
            (task_due(2, Status::Pending), Urgency::DueSoon),
            (task_due(10, Status::Pending), Urgency::Pending),
        ];

        for (task, expected) in &cases {
            assert_eq!(TaskRow::new(task, today()).urgency, *expected);
        }
        assert_eq!(Urgency::DueSoon.label(), Some("Due Soon"));
        assert_eq!(Urgency::Pending.label(), None);
    }
}
