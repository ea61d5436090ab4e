use chrono::NaiveDate;
use ratatui::layout::Rect;
use ratatui::widgets::TableState;
use taskboard_core::{parse_new_task, Clock, StatusFilter, SystemClock, TaskRow, ViewSession};
use uuid::Uuid;

use crate::backend::Backend;

pub enum InputMode {
    Normal,
    Adding,
    Searching,
    ConfirmDelete,
}

pub struct App {
    pub session: ViewSession<Backend>,
    pub state: TableState,
    pub input: String,
    pub input_mode: InputMode,
    pub cursor_position: usize,
    pub today: NaiveDate,
    /// Where the delete dialog was last drawn.
    pub confirm_area: Option<Rect>,
}

impl App {
    pub fn new(session: ViewSession<Backend>) -> App {
        let mut app = App {
            session,
            state: TableState::default(),
            input: String::new(),
            input_mode: InputMode::Normal,
            cursor_position: 0,
            today: SystemClock.today(),
            confirm_area: None,
        };
        app.reload();
        app
    }

    /// Rows currently on screen, in display order.
    pub fn rows(&self) -> Vec<TaskRow<'_>> {
        self.session.state().visible(self.today)
    }

    fn visible_len(&self) -> usize {
        self.rows().len()
    }

    pub fn selected_id(&self) -> Option<Uuid> {
        let i = self.state.selected()?;
        self.rows().get(i).map(|row| row.task.id)
    }

    /// Keeps the cursor on a real row after the list changes.
    fn clamp_selection(&mut self) {
        let len = self.visible_len();
        if len == 0 {
            self.state.select(None);
        } else {
            let i = self.state.selected().unwrap_or(0).min(len - 1);
            self.state.select(Some(i));
        }
    }

    fn select_id(&mut self, id: Uuid) {
        let position = self.rows().iter().position(|row| row.task.id == id);
        if position.is_some() {
            self.state.select(position);
        } else {
            self.clamp_selection();
        }
    }

    pub fn next(&mut self) {
        let len = self.visible_len();
        if len == 0 { return; }

        let i = match self.state.selected() {
            Some(i) => {
                if i >= len - 1 {
                    0
                } else {
                    i + 1
                }
            }
            None => 0,
        };
        self.state.select(Some(i));
    }

    pub fn previous(&mut self) {
        let len = self.visible_len();
        if len == 0 { return; }

        let i = match self.state.selected() {
            Some(i) => {
                if i == 0 {
                    len - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        self.state.select(Some(i));
    }

    pub fn reload(&mut self) {
        self.today = SystemClock.today();
        self.session.load();
        self.clamp_selection();
    }

    pub fn toggle_status(&mut self) {
        if let Some(id) = self.selected_id() {
            self.session.toggle_status(&id);
            // Completing a task moves it below the pending ones
            self.select_id(id);
        }
    }

    pub fn cycle_filter(&mut self) {
        let next = self.session.state().filter().next();
        self.session.state_mut().set_filter(next);
        self.clamp_selection();
    }

    pub fn filter(&self) -> StatusFilter {
        self.session.state().filter()
    }

    pub fn request_delete(&mut self) {
        if let Some(id) = self.selected_id() {
            self.session.request_delete(id);
            self.input_mode = InputMode::ConfirmDelete;
        }
    }

    pub fn confirm_delete(&mut self) {
        self.session.confirm_delete();
        self.input_mode = InputMode::Normal;
        self.clamp_selection();
    }

    pub fn cancel_delete(&mut self) {
        self.session.cancel_delete();
        self.input_mode = InputMode::Normal;
    }

    pub fn enter_add_mode(&mut self) {
        self.input_mode = InputMode::Adding;
        self.input.clear();
        self.cursor_position = 0;
        self.session.state_mut().set_form_error(None);
    }

    pub fn enter_search_mode(&mut self) {
        self.input_mode = InputMode::Searching;
        self.input = self.session.state().search().to_string();
        self.cursor_position = self.input.chars().count();
    }

    pub fn exit_input_mode(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    /// Leaves search mode and drops the search text.
    pub fn clear_search(&mut self) {
        self.input.clear();
        self.cursor_position = 0;
        self.apply_search();
        self.exit_input_mode();
    }

    fn apply_search(&mut self) {
        if matches!(self.input_mode, InputMode::Searching) {
            self.session.state_mut().set_search(self.input.clone());
            self.clamp_selection();
        }
    }

    pub fn input_char(&mut self, c: char) {
        let byte_index = self.input.chars().take(self.cursor_position).map(|c| c.len_utf8()).sum();
        self.input.insert(byte_index, c);
        self.cursor_position += 1;
        self.apply_search();
    }

    pub fn delete_char(&mut self) {
        if self.cursor_position > 0 {
            let byte_index: usize = self.input.chars().take(self.cursor_position - 1).map(|c| c.len_utf8()).sum();
            self.input.remove(byte_index);
            self.cursor_position -= 1;
            self.apply_search();
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

    pub fn submit_command(&mut self) {
        match self.input_mode {
            InputMode::Adding => {
                if self.input.trim().is_empty() {
                    self.exit_input_mode();
                    return;
                }
                // A rejected form stays open so the user can fix it
                if !self.submit_add() {
                    return;
                }
                self.input.clear();
                self.cursor_position = 0;
            }
            InputMode::Searching => {}
            InputMode::Normal | InputMode::ConfirmDelete => return,
        }

        self.exit_input_mode();
    }

    fn submit_add(&mut self) -> bool {
        let args: Vec<String> = self.input.split_whitespace().map(|s| s.to_string()).collect();
        let form = parse_new_task(&args, self.today);

        if !self.session.add_task(&form, self.today) {
            return self.session.state().form_error().is_none();
        }

        if let Some(created) = self.session.state().tasks().last().map(|t| t.id) {
            self.select_id(created);
        }
        true
    }
}
