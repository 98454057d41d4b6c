use super::formatter::{format_date, is_due_soon, is_past_due, priority_label, today};
use super::task::Task;
use anyhow::Result;
use prettytable::{row, Table};

pub struct View {}

impl View {
    /// Prints tasks as a table, in the order given.
    pub fn tasks(tasks: &[Task]) -> Result<()> {
        let today = today();
        let mut table = Table::new();

        table.add_row(row!["ID", "DONE", "TITLE", "DESCRIPTION", "PRIORITY", "DUE"]);
        for task in tasks {
            table.add_row(row![
                task.id,
                if task.completed { "[x]" } else { "[ ]" },
                task.title,
                task.description.as_deref().unwrap_or(""),
                priority_label(task.priority),
                Self::due_cell(task, today)
            ]);
        }
        table.printstd();

        Ok(())
    }

    fn due_cell(task: &Task, today: chrono::NaiveDate) -> String {
        let date = format_date(task.due_date);
        if task.completed {
            date
        } else if is_past_due(task.due_date, today) {
            format!("{} (overdue)", date)
        } else if is_due_soon(task.due_date, today) {
            format!("{} (soon)", date)
        } else {
            date
        }
    }
}
