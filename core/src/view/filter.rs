use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use anyhow::{anyhow, Error};
use chrono::NaiveDate;

use crate::model::task::{Status, Task};
use crate::view::row::TaskRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFilter {
    All,
    Pending,
    Completed,
}

impl Default for StatusFilter {
    fn default() -> Self {
        StatusFilter::All
    }
}

impl StatusFilter {
    pub fn matches(&self, task: &Task) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Pending => task.status == Status::Pending,
            StatusFilter::Completed => task.status == Status::Completed,
        }
    }

    /// Cycles all -> pending -> completed -> all.
    pub fn next(self) -> Self {
        match self {
            StatusFilter::All => StatusFilter::Pending,
            StatusFilter::Pending => StatusFilter::Completed,
            StatusFilter::Completed => StatusFilter::All,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StatusFilter::All => "all",
            StatusFilter::Pending => "pending",
            StatusFilter::Completed => "completed",
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StatusFilter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" => Ok(StatusFilter::All),
            "pending" => Ok(StatusFilter::Pending),
            "completed" => Ok(StatusFilter::Completed),
            other => Err(anyhow!("Unknown filter: '{}'", other)),
        }
    }
}

/// Pending before completed, then earliest due date first.
pub fn compare_for_display(a: &Task, b: &Task) -> Ordering {
    a.status.cmp(&b.status).then_with(|| a.due_date.cmp(&b.due_date))
}

/// Filters by status, then by case-insensitive title substring, then sorts.
/// The sort is stable, so ties keep their cache order.
pub fn derive_rows<'a>(
    tasks: &'a [Task],
    filter: StatusFilter,
    search: &str,
    today: NaiveDate,
) -> Vec<TaskRow<'a>> {
    let needle = search.to_lowercase();

    let mut visible: Vec<&Task> = tasks
        .iter()
        .filter(|task| filter.matches(task))
        .filter(|task| needle.is_empty() || task.title.to_lowercase().contains(&needle))
        .collect();
    visible.sort_by(|a, b| compare_for_display(a, b));

    visible.into_iter().map(|task| TaskRow::new(task, today)).collect()
}
