use serde::{Deserialize, Serialize};
use chrono::{DateTime, FixedOffset};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Task {
    pub text: String,

    // None means pending. The offset is kept so that the
    // "done" line shows the wall clock time of the toggle.
    #[serde(default)]
    pub completed_at: Option<DateTime<FixedOffset>>,
}

impl Task {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            completed_at: None,
        }
    }

    pub fn is_done(&self) -> bool {
        self.completed_at.is_some()
    }

    pub fn toggle(&mut self, now: DateTime<FixedOffset>) {
        self.completed_at = match self.completed_at {
            Some(_) => None,
            None => Some(now),
        };
    }
}
