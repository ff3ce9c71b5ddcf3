use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::widgets::ListState;
use termitask_core::git::RepoPanel;
use termitask_core::{BucketStore, TaskListService};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Focus {
    Repos,
    List,
    Entry,
}

/// Everything the dashboard needs: the task list, the repository panels
/// loaded at startup, and widget state.
pub struct App<S: BucketStore> {
    pub tasks: TaskListService<S>,
    pub panels: Vec<RepoPanel>,
    pub state: ListState,
    pub repo_index: usize,
    pub input: String,
    pub cursor_position: usize,
    pub focus: Focus,
    pub should_quit: bool,
}

impl<S: BucketStore> App<S> {
    pub fn new(tasks: TaskListService<S>, panels: Vec<RepoPanel>) -> App<S> {
        App {
            tasks,
            panels,
            state: ListState::default(),
            repo_index: 0,
            input: String::new(),
            cursor_position: 0,
            focus: Focus::Entry,
            should_quit: false,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('r') => self.focus = Focus::List,
                KeyCode::Char('f') => self.focus = Focus::Entry,
                KeyCode::Char('g') => self.focus = Focus::Repos,
                KeyCode::Char('c') => self.clear_completed()?,
                _ => {}
            }
            return Ok(());
        }

        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Tab => self.focus_next(),
            code => match self.focus {
                Focus::List => match code {
                    KeyCode::Down | KeyCode::Char('j') => self.next(),
                    KeyCode::Up | KeyCode::Char('k') => self.previous(),
                    KeyCode::Enter | KeyCode::Char(' ') => self.activate()?,
                    _ => {}
                },
                Focus::Entry => match code {
                    KeyCode::Enter => self.submit()?,
                    KeyCode::Char(c) => self.input_char(c),
                    KeyCode::Backspace => self.delete_char(),
                    KeyCode::Left => self.move_cursor_left(),
                    KeyCode::Right => self.move_cursor_right(),
                    _ => {}
                },
                Focus::Repos => match code {
                    KeyCode::Down | KeyCode::Char('j') => self.next_repo(),
                    KeyCode::Up | KeyCode::Char('k') => self.previous_repo(),
                    _ => {}
                },
            },
        }
        Ok(())
    }

    pub fn focus_next(&mut self) {
        self.focus = match self.focus {
            Focus::Repos => Focus::List,
            Focus::List => Focus::Entry,
            Focus::Entry if self.panels.is_empty() => Focus::List,
            Focus::Entry => Focus::Repos,
        };
    }

    pub fn next(&mut self) {
        let len = self.tasks.tasks().len();
        if len == 0 { return; }

        let i = match self.tasks.selected() {
            Some(i) if i + 1 < len => i + 1,
            _ => 0,
        };
        self.select(Some(i));
    }

    pub fn previous(&mut self) {
        let len = self.tasks.tasks().len();
        if len == 0 { return; }

        let i = match self.tasks.selected() {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        self.select(Some(i));
    }

    fn select(&mut self, index: Option<usize>) {
        self.tasks.select(index);
        self.sync_selection();
    }

    fn sync_selection(&mut self) {
        self.state.select(self.tasks.selected());
    }

    pub fn activate(&mut self) -> Result<()> {
        self.tasks.toggle_at(self.tasks.selected())?;
        self.sync_selection();
        Ok(())
    }

    pub fn submit(&mut self) -> Result<()> {
        if self.tasks.add(&self.input)? {
            self.input.clear();
            self.cursor_position = 0;
        }
        self.sync_selection();
        Ok(())
    }

    pub fn clear_completed(&mut self) -> Result<()> {
        self.tasks.clear_completed()?;
        self.sync_selection();
        Ok(())
    }

    pub fn next_repo(&mut self) {
        if !self.panels.is_empty() {
            self.repo_index = (self.repo_index + 1) % self.panels.len();
        }
    }

    pub fn previous_repo(&mut self) {
        if !self.panels.is_empty() {
            self.repo_index = (self.repo_index + self.panels.len() - 1) % self.panels.len();
        }
    }

    pub fn input_char(&mut self, c: char) {
        let byte_index = self.input.chars().take(self.cursor_position).map(|c| c.len_utf8()).sum();
        self.input.insert(byte_index, c);
        self.cursor_position += 1;
    }

    pub fn delete_char(&mut self) {
        if self.cursor_position > 0 {
            let byte_index: usize = self.input.chars().take(self.cursor_position - 1).map(|c| c.len_utf8()).sum();
            self.input.remove(byte_index);
            self.cursor_position -= 1;
        }
    }

    pub fn move_cursor_left(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position -= 1;
        }
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor_position < self.input.chars().count() {
            self.cursor_position += 1;
        }
    }
}
