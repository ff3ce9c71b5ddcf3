use crate::model::task::Task;

pub const DONE_FORMAT: &str = "%d/%m/%Y %H:%M";

/// Display line for one task, e.g. `[ ] buy milk` or
/// `[✓] buy milk - done 02/01/2024 15:04`.
pub fn render(task: &Task) -> String {
    match &task.completed_at {
        Some(at) => format!("[✓] {} - done {}", task.text, at.format(DONE_FORMAT)),
        None => format!("[ ] {}", task.text),
    }
}

pub fn render_all(tasks: &[Task]) -> Vec<String> {
    tasks.iter().map(render).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, TimeZone};

    #[test]
    fn test_render_pending() {
        assert_eq!(render(&Task::new("X")), "[ ] X");
    }

    #[test]
    fn test_render_done() {
        let at = FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2024, 1, 2, 15, 4, 0)
            .unwrap();
        let task = Task {
            text: "X".to_string(),
            completed_at: Some(at),
        };
        assert_eq!(render(&task), "[✓] X - done 02/01/2024 15:04");
        assert_eq!(render(&task), render(&task));
    }

    #[test]
    fn test_render_uses_recorded_offset() {
        let at = FixedOffset::west_opt(5 * 3600)
            .unwrap()
            .with_ymd_and_hms(2023, 12, 31, 23, 59, 0)
            .unwrap();
        let task = Task {
            text: "late".to_string(),
            completed_at: Some(at),
        };
        assert_eq!(render(&task), "[✓] late - done 31/12/2023 23:59");
    }
}
