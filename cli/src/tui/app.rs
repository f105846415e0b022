//! TUI state and key handling. Key handlers never touch the network: they
//! mutate controller/editor state and hand an [`Action`] back to the event
//! loop, which runs the async part.

use crossterm::event::{KeyCode, KeyEvent};
use securetask_core::api as core_api;
use securetask_core::controller::TaskListController;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Normal,
    Search,
    Editor,
    ConfirmDelete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Title,
    Description,
    Status,
}

impl FormField {
    fn next(self) -> Self {
        match self {
            Self::Title => Self::Description,
            Self::Description => Self::Status,
            Self::Status => Self::Title,
        }
    }

    fn prev(self) -> Self {
        match self {
            Self::Title => Self::Status,
            Self::Description => Self::Title,
            Self::Status => Self::Description,
        }
    }
}

/// Async work requested by a key press, executed by the event loop.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    None,
    Fetch,
    Submit,
    Delete(String),
    Toggle(core_api::Task),
    Quit,
}

pub struct TuiApp {
    pub ctrl: TaskListController,
    pub mode: Mode,
    pub selected: usize,
    pub search_input: String,
    pub form_field: FormField,
    pub confirm_id: Option<String>,
}

impl TuiApp {
    pub fn new(ctrl: TaskListController) -> Self {
        let search_input = ctrl.filters.search.clone().unwrap_or_default();
        Self {
            ctrl,
            mode: Mode::Normal,
            selected: 0,
            search_input,
            form_field: FormField::Title,
            confirm_id: None,
        }
    }

    pub fn selected_task(&self) -> Option<&core_api::Task> {
        self.ctrl.tasks.get(self.selected)
    }

    /// Keep the selection on a valid row after the list changed underneath.
    pub fn clamp_selection(&mut self) {
        if self.ctrl.tasks.is_empty() {
            self.selected = 0;
        } else if self.selected >= self.ctrl.tasks.len() {
            self.selected = self.ctrl.tasks.len() - 1;
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Action {
        match self.mode {
            Mode::Normal => self.handle_normal_key(key),
            Mode::Search => self.handle_search_key(key),
            Mode::Editor => self.handle_editor_key(key),
            Mode::ConfirmDelete => self.handle_confirm_key(key),
        }
    }

    fn handle_normal_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = self.selected.saturating_sub(1);
                Action::None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.selected + 1 < self.ctrl.tasks.len() {
                    self.selected += 1;
                }
                Action::None
            }
            KeyCode::Char('/') => {
                self.mode = Mode::Search;
                Action::None
            }
            KeyCode::Char('n') => {
                self.ctrl.open_create();
                self.form_field = FormField::Title;
                self.mode = Mode::Editor;
                Action::None
            }
            KeyCode::Char('e') => {
                if let Some(task) = self.selected_task().cloned() {
                    self.ctrl.open_edit(&task);
                    self.form_field = FormField::Title;
                    self.mode = Mode::Editor;
                }
                Action::None
            }
            KeyCode::Char('d') => {
                if let Some(task) = self.selected_task() {
                    self.confirm_id = Some(task.id.clone());
                    self.mode = Mode::ConfirmDelete;
                }
                Action::None
            }
            KeyCode::Char(' ') | KeyCode::Enter => match self.selected_task().cloned() {
                Some(task) => Action::Toggle(task),
                None => Action::None,
            },
            KeyCode::Char('f') => {
                let next = match self.ctrl.filters.status {
                    None => Some(core_api::TaskStatus::Pending),
                    Some(core_api::TaskStatus::Pending) => Some(core_api::TaskStatus::Completed),
                    Some(core_api::TaskStatus::Completed) => None,
                };
                if self.ctrl.set_status_filter(next) {
                    Action::Fetch
                } else {
                    Action::None
                }
            }
            KeyCode::Char('r') => Action::Fetch,
            _ => Action::None,
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Esc | KeyCode::Enter => {
                self.mode = Mode::Normal;
                Action::None
            }
            KeyCode::Backspace => {
                self.search_input.pop();
                self.search_changed()
            }
            KeyCode::Char(c) => {
                self.search_input.push(c);
                self.search_changed()
            }
            _ => Action::None,
        }
    }

    fn search_changed(&mut self) -> Action {
        if self.ctrl.set_search(&self.search_input) {
            Action::Fetch
        } else {
            Action::None
        }
    }

    fn handle_editor_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Esc => {
                self.ctrl.close_editor();
                self.mode = Mode::Normal;
                Action::None
            }
            KeyCode::Enter => Action::Submit,
            KeyCode::Tab | KeyCode::Down => {
                self.form_field = self.form_field.next();
                Action::None
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.form_field = self.form_field.prev();
                Action::None
            }
            KeyCode::Backspace => {
                match self.form_field {
                    FormField::Title => {
                        self.ctrl.draft.title.pop();
                    }
                    FormField::Description => {
                        self.ctrl.draft.description.pop();
                    }
                    FormField::Status => {}
                }
                Action::None
            }
            KeyCode::Left | KeyCode::Right => {
                if self.form_field == FormField::Status {
                    self.ctrl.draft.status = self.ctrl.draft.status.opposite();
                }
                Action::None
            }
            KeyCode::Char(c) => {
                match self.form_field {
                    FormField::Title => self.ctrl.draft.title.push(c),
                    FormField::Description => self.ctrl.draft.description.push(c),
                    FormField::Status => {
                        if c == ' ' {
                            self.ctrl.draft.status = self.ctrl.draft.status.opposite();
                        }
                    }
                }
                Action::None
            }
            _ => Action::None,
        }
    }

    fn handle_confirm_key(&mut self, key: KeyEvent) -> Action {
        let id = self.confirm_id.take();
        self.mode = Mode::Normal;
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => match id {
                Some(id) => Action::Delete(id),
                None => Action::None,
            },
            // Declined: silent no-op.
            _ => Action::None,
        }
    }
}
