//! Task list controller: the single owner of the client-side view of the
//! task collection and of the transient editor state.
//!
//! All remote failures are absorbed here and turned into the `error` field;
//! nothing propagates past the controller and nothing is retried. After every
//! successful mutation the whole list is re-fetched (last-write-wins, no
//! local merge).

use std::sync::Arc;

use crate::error::RemoteError;
use crate::gateway::TaskGateway;
use crate::model::{Task, TaskFilters, TaskInput, TaskStatus};

pub const MSG_TITLE_REQUIRED: &str = "Title is required";
pub const MSG_CREATED: &str = "Task created successfully";
pub const MSG_UPDATED: &str = "Task updated successfully";
pub const MSG_DELETED: &str = "Task deleted successfully";
pub const MSG_LOAD_FAILED: &str = "Failed to load tasks";
pub const MSG_SAVE_FAILED: &str = "Failed to save task";
pub const MSG_DELETE_FAILED: &str = "Failed to delete task";
pub const MSG_TOGGLE_FAILED: &str = "Failed to update task status";

/// Editor lifecycle: absent, creating a new task, or editing an existing
/// one. Opening a session while one is active replaces it (the editor is a
/// modal, exclusive interaction).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditSession {
    Creating,
    Editing { id: String },
}

/// Form contents backing the editor modal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormDraft {
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
}

impl FormDraft {
    fn from_task(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            description: task.description.clone(),
            status: task.status,
        }
    }

    fn to_input(&self) -> TaskInput {
        TaskInput {
            title: self.title.clone(),
            description: self.description.clone(),
            status: self.status,
        }
    }
}

/// Handle for one in-flight list fetch: the filter snapshot at issue time
/// plus a generation tag. A response is applied only while its generation is
/// still the newest one issued, so an early fetch resolving late can never
/// clobber the result of a newer one.
#[derive(Debug, Clone)]
pub struct FetchTicket {
    gen: u64,
    pub filters: TaskFilters,
}

pub struct TaskListController {
    gateway: Arc<dyn TaskGateway>,
    pub tasks: Vec<Task>,
    pub filters: TaskFilters,
    pub loading: bool,
    pub error: Option<String>,
    pub success_message: Option<String>,
    pub draft: FormDraft,
    edit_session: Option<EditSession>,
    fetch_gen: u64,
}

impl TaskListController {
    pub fn new(gateway: Arc<dyn TaskGateway>) -> Self {
        Self {
            gateway,
            tasks: Vec::new(),
            filters: TaskFilters::default(),
            loading: false,
            error: None,
            success_message: None,
            draft: FormDraft::default(),
            edit_session: None,
            fetch_gen: 0,
        }
    }

    pub fn edit_session(&self) -> Option<&EditSession> {
        self.edit_session.as_ref()
    }

    pub fn editor_open(&self) -> bool {
        self.edit_session.is_some()
    }

    fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
        self.success_message = None;
    }

    fn set_success(&mut self, message: impl Into<String>) {
        self.success_message = Some(message.into());
        self.error = None;
    }

    /// Message for a failed mutation: the backend's own words when it
    /// rejected the request, otherwise a generic fallback.
    fn remote_message(err: &RemoteError, fallback: &str) -> String {
        err.server_message()
            .map(str::to_string)
            .unwrap_or_else(|| fallback.to_string())
    }

    /// Update the search filter. Returns true when it actually changed and
    /// the caller should issue a fresh fetch.
    pub fn set_search(&mut self, search: &str) -> bool {
        let next = if search.trim().is_empty() {
            None
        } else {
            Some(search.to_string())
        };
        if self.filters.search == next {
            return false;
        }
        self.filters.search = next;
        true
    }

    pub fn set_status_filter(&mut self, status: Option<TaskStatus>) -> bool {
        if self.filters.status == status {
            return false;
        }
        self.filters.status = status;
        true
    }

    /// Issue a new list fetch: bumps the generation, snapshots the filters
    /// and flips `loading`. The caller runs the gateway call and hands the
    /// outcome back to [`apply_fetch`](Self::apply_fetch).
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.fetch_gen += 1;
        self.loading = true;
        FetchTicket {
            gen: self.fetch_gen,
            filters: self.filters.clone(),
        }
    }

    /// Apply the outcome of a fetch. Stale tickets (superseded by a newer
    /// `begin_fetch`) are discarded wholesale: neither tasks nor `loading`
    /// nor messages change.
    pub fn apply_fetch(&mut self, ticket: FetchTicket, result: Result<Vec<Task>, RemoteError>) {
        if ticket.gen != self.fetch_gen {
            tracing::debug!(
                target: "securetask.ctrl",
                stale = ticket.gen,
                current = self.fetch_gen,
                "discarding stale list response"
            );
            return;
        }
        self.loading = false;
        match result {
            Ok(tasks) => {
                tracing::debug!(target: "securetask.ctrl", count = tasks.len(), "list refreshed");
                self.tasks = tasks;
            }
            Err(err) => {
                tracing::warn!(target: "securetask.ctrl", error = %err, "list fetch failed");
                self.set_error(MSG_LOAD_FAILED);
            }
        }
    }

    /// Fetch the list with the current filters and apply it inline.
    pub async fn refresh(&mut self) {
        let ticket = self.begin_fetch();
        let result = self.gateway.list(&ticket.filters).await;
        self.apply_fetch(ticket, result);
    }

    pub fn gateway(&self) -> Arc<dyn TaskGateway> {
        Arc::clone(&self.gateway)
    }

    pub fn open_create(&mut self) {
        self.edit_session = Some(EditSession::Creating);
        self.draft = FormDraft::default();
    }

    pub fn open_edit(&mut self, task: &Task) {
        self.edit_session = Some(EditSession::Editing {
            id: task.id.clone(),
        });
        self.draft = FormDraft::from_task(task);
    }

    pub fn close_editor(&mut self) {
        self.edit_session = None;
        self.draft = FormDraft::default();
    }

    /// Submit the current draft: create when no edit session is bound, full
    /// update otherwise. A blank title aborts before any network call. On
    /// failure the editor and draft are left as they are so the user can
    /// correct and retry.
    pub async fn submit(&mut self) {
        if self.draft.title.trim().is_empty() {
            self.set_error(MSG_TITLE_REQUIRED);
            return;
        }

        let result = match &self.edit_session {
            Some(EditSession::Editing { id }) => {
                let id = id.clone();
                self.gateway
                    .update(&id, &self.draft.to_input().into())
                    .await
                    .map(|_| MSG_UPDATED)
            }
            _ => self
                .gateway
                .create(&self.draft.to_input())
                .await
                .map(|_| MSG_CREATED),
        };

        match result {
            Ok(message) => {
                self.set_success(message);
                self.close_editor();
                self.refresh().await;
            }
            Err(err) => {
                self.set_error(Self::remote_message(&err, MSG_SAVE_FAILED));
            }
        }
    }

    /// Delete a task. The confirmation gate lives with the caller; a
    /// declined confirmation never reaches this method.
    pub async fn remove(&mut self, id: &str) {
        match self.gateway.delete(id).await {
            Ok(()) => {
                self.set_success(MSG_DELETED);
                self.refresh().await;
            }
            Err(err) => {
                self.set_error(Self::remote_message(&err, MSG_DELETE_FAILED));
            }
        }
    }

    /// Flip a task between pending and completed via a partial update.
    pub async fn toggle_status(&mut self, task: &Task) {
        let patch = crate::model::TaskPatch::status(task.status.opposite());
        match self.gateway.update(&task.id, &patch).await {
            Ok(_) => {
                self.refresh().await;
            }
            Err(err) => {
                self.set_error(Self::remote_message(&err, MSG_TOGGLE_FAILED));
            }
        }
    }
}
