use tabled::settings::object::Rows;
use tabled::settings::{Color, Modify, Style};
use tabled::{Table, Tabled};
use taskboard_core::TaskRow;

// Helper struct for Table Row
#[derive(Tabled)]
struct ListRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Due")]
    due: String,
    #[tabled(rename = "")]
    flag: String,
    #[tabled(rename = "Title")]
    title: String,
}

impl ListRow {
    fn from_row(row: &TaskRow<'_>) -> Self {
        Self {
            id: short_id(&row.task.id.to_string()).to_string(),
            status: row.task.status.to_string(),
            due: row.task.due_date.format("%b %-d, %Y").to_string(),
            flag: row.urgency.label().unwrap_or("").to_string(),
            title: row.task.title.clone(),
        }
    }
}

pub fn short_id(id: &str) -> &str {
    if id.len() > 8 { &id[..8] } else { id }
}

pub fn show_tasks(rows: &[TaskRow<'_>], total: usize) {
    if rows.is_empty() {
        println!("No tasks found.");
        return;
    }

    let table_rows: Vec<ListRow> = rows.iter().map(ListRow::from_row).collect();
    let mut table = Table::new(table_rows);
    table
        .with(Style::modern())
        .with(Modify::new(Rows::first()).with(Color::FG_CYAN)); // Header color

    println!("{}", table);
    println!("{} of {} tasks", rows.len(), total);
}
