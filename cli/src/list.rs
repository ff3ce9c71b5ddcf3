use tabled::settings::Style;
use tabled::{Table, Tabled};
use termitask_core::view::DONE_FORMAT;
use termitask_core::Task;

#[derive(Tabled)]
struct TaskRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "Status")]
    status: &'static str,
    #[tabled(rename = "Task")]
    text: String,
    #[tabled(rename = "Done")]
    done: String,
}

pub fn show_tasks(name: &str, tasks: &[Task]) {
    if tasks.is_empty() {
        println!("No tasks in '{}'.", name);
        return;
    }

    let rows: Vec<TaskRow> = tasks
        .iter()
        .enumerate()
        .map(|(index, task)| TaskRow {
            index,
            status: if task.is_done() { "[✓]" } else { "[ ]" },
            text: task.text.clone(),
            done: task
                .completed_at
                .map(|at| at.format(DONE_FORMAT).to_string())
                .unwrap_or_else(|| "-".to_string()),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}", name);
    println!("{}", table);
}
