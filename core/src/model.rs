//! Task wire model shared by the gateway and the controller.

use serde::{Deserialize, Serialize};

/// Task completion state. The backend only knows these two values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    #[default]
    Pending,
    Completed,
}

impl TaskStatus {
    pub fn opposite(self) -> Self {
        match self {
            Self::Pending => Self::Completed,
            Self::Completed => Self::Pending,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
        }
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A task as returned by the backend. The id is server-assigned and opaque;
/// the Mongo-backed service emits it as `_id`, so both spellings are accepted.
/// Unknown extra fields (timestamps, owner) are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    #[serde(alias = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: TaskStatus,
}

/// Payload for task creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskInput {
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
}

/// Partial update payload; absent fields are left untouched server-side.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
}

impl TaskPatch {
    pub fn status(status: TaskStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }
}

impl From<TaskInput> for TaskPatch {
    fn from(input: TaskInput) -> Self {
        Self {
            title: Some(input.title),
            description: Some(input.description),
            status: Some(input.status),
        }
    }
}

/// List query filters. Matching semantics for `search` are owned by the
/// backend; the client never filters or re-sorts locally.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilters {
    pub search: Option<String>,
    pub status: Option<TaskStatus>,
}

impl TaskFilters {
    /// Query pairs for `GET /tasks`. Absent keys are omitted entirely,
    /// never sent as empty strings; whitespace-only search counts as absent.
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(search) = self.search.as_deref().map(str::trim) {
            if !search.is_empty() {
                pairs.push(("search", search.to_string()));
            }
        }
        if let Some(status) = self.status {
            pairs.push(("status", status.as_str().to_string()));
        }
        pairs
    }

    pub fn is_empty(&self) -> bool {
        self.to_query().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn status_opposite_round_trips() {
        assert_eq!(TaskStatus::Pending.opposite(), TaskStatus::Completed);
        assert_eq!(TaskStatus::Completed.opposite(), TaskStatus::Pending);
    }

    #[test]
    fn task_accepts_mongo_id_alias() {
        let task: Task = serde_json::from_str(
            r#"{"_id":"t1","title":"Buy milk","status":"pending","owner":"u1","createdAt":"x"}"#,
        )
        .unwrap();
        assert_eq!(task.id, "t1");
        assert_eq!(task.description, "");
        assert_eq!(task.status, TaskStatus::Pending);
    }

    #[test]
    fn task_accepts_plain_id() {
        let task: Task =
            serde_json::from_str(r#"{"id":"t2","title":"Ship","status":"completed"}"#).unwrap();
        assert_eq!(task.id, "t2");
        assert_eq!(task.status, TaskStatus::Completed);
    }

    #[test]
    fn patch_skips_absent_fields() {
        let body = serde_json::to_string(&TaskPatch::status(TaskStatus::Completed)).unwrap();
        assert_eq!(body, r#"{"status":"completed"}"#);
    }

    #[test]
    fn filters_omit_absent_keys() {
        assert_eq!(TaskFilters::default().to_query(), vec![]);

        let filters = TaskFilters {
            search: Some("milk".to_string()),
            status: None,
        };
        assert_eq!(filters.to_query(), vec![("search", "milk".to_string())]);

        let filters = TaskFilters {
            search: Some("   ".to_string()),
            status: Some(TaskStatus::Completed),
        };
        assert_eq!(filters.to_query(), vec![("status", "completed".to_string())]);
    }
}
