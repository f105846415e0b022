//! Typed task operations over the `/tasks` REST resource.
//!
//! Each call is exactly one network round trip: no retries, no caching, no
//! batching. Ordering of list results is whatever the server sent.

use async_trait::async_trait;

use super::http::HttpAdapter;
use crate::error::RemoteError;
use crate::model::{Task, TaskFilters, TaskInput, TaskPatch};

#[async_trait]
pub trait TaskGateway: Send + Sync {
    async fn list(&self, filters: &TaskFilters) -> Result<Vec<Task>, RemoteError>;
    async fn create(&self, input: &TaskInput) -> Result<Task, RemoteError>;
    async fn update(&self, id: &str, patch: &TaskPatch) -> Result<Task, RemoteError>;
    async fn delete(&self, id: &str) -> Result<(), RemoteError>;
}

#[derive(Clone)]
pub struct HttpTaskGateway {
    adapter: HttpAdapter,
}

impl HttpTaskGateway {
    pub fn new(adapter: HttpAdapter) -> Self {
        Self { adapter }
    }
}

#[async_trait]
impl TaskGateway for HttpTaskGateway {
    async fn list(&self, filters: &TaskFilters) -> Result<Vec<Task>, RemoteError> {
        let query = filters.to_query();
        let tasks: Vec<Task> = self
            .adapter
            .get_json("/tasks", &query)
            .await?;
        tracing::debug!(target: "securetask.gateway", op = "list", count = tasks.len());
        Ok(tasks)
    }

    async fn create(&self, input: &TaskInput) -> Result<Task, RemoteError> {
        let task: Task = self.adapter.post_json("/tasks", input).await?;
        tracing::debug!(target: "securetask.gateway", op = "create", id = %task.id);
        Ok(task)
    }

    async fn update(&self, id: &str, patch: &TaskPatch) -> Result<Task, RemoteError> {
        let task: Task = self
            .adapter
            .put_json(&format!("/tasks/{id}"), patch)
            .await?;
        tracing::debug!(target: "securetask.gateway", op = "update", id = %task.id);
        Ok(task)
    }

    async fn delete(&self, id: &str) -> Result<(), RemoteError> {
        self.adapter.delete(&format!("/tasks/{id}")).await?;
        tracing::debug!(target: "securetask.gateway", op = "delete", id = %id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::StaticToken;
    use crate::model::TaskStatus;
    use mockito::{Matcher, Server};
    use std::sync::Arc;

    fn gateway(server: &Server) -> HttpTaskGateway {
        let adapter = HttpAdapter::new(
            &server.url(),
            1_000,
            Arc::new(StaticToken::new("secret-token")),
        )
        .unwrap();
        HttpTaskGateway::new(adapter)
    }

    #[tokio::test]
    async fn list_sends_only_present_filter_keys() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/tasks")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("search".into(), "milk".into()),
                Matcher::UrlEncoded("status".into(), "pending".into()),
            ]))
            .with_status(200)
            .with_body(r#"[{"_id":"t1","title":"Buy milk","status":"pending"}]"#)
            .create_async()
            .await;

        let filters = TaskFilters {
            search: Some("milk".to_string()),
            status: Some(TaskStatus::Pending),
        };
        let tasks = gateway(&server).list(&filters).await.unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].id, "t1");
    }

    #[tokio::test]
    async fn list_without_filters_sends_no_query() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/tasks")
            .match_query(Matcher::Exact(String::new()))
            .with_status(200)
            .with_body("[]")
            .create_async()
            .await;

        let tasks = gateway(&server).list(&TaskFilters::default()).await.unwrap();
        assert!(tasks.is_empty());
    }

    #[tokio::test]
    async fn list_preserves_server_order() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/tasks")
            .with_status(200)
            .with_body(
                r#"[{"_id":"b","title":"B","status":"completed"},
                    {"_id":"a","title":"A","status":"pending"}]"#,
            )
            .create_async()
            .await;

        let tasks = gateway(&server).list(&TaskFilters::default()).await.unwrap();
        let ids: Vec<&str> = tasks.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[tokio::test]
    async fn create_posts_input_and_returns_task() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("POST", "/tasks")
            .match_header("authorization", "Bearer secret-token")
            .match_body(Matcher::Json(serde_json::json!({
                "title": "Buy milk",
                "description": "",
                "status": "pending"
            })))
            .with_status(201)
            .with_body(r#"{"_id":"t1","title":"Buy milk","description":"","status":"pending"}"#)
            .create_async()
            .await;

        let input = TaskInput {
            title: "Buy milk".to_string(),
            description: String::new(),
            status: TaskStatus::Pending,
        };
        let task = gateway(&server).create(&input).await.unwrap();
        assert_eq!(task.id, "t1");
    }

    #[tokio::test]
    async fn update_puts_partial_body() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("PUT", "/tasks/t1")
            .match_body(Matcher::Json(serde_json::json!({"status": "completed"})))
            .with_status(200)
            .with_body(r#"{"_id":"t1","title":"Buy milk","status":"completed"}"#)
            .create_async()
            .await;

        let task = gateway(&server)
            .update("t1", &TaskPatch::status(TaskStatus::Completed))
            .await
            .unwrap();
        assert_eq!(task.status, TaskStatus::Completed);
    }

    #[tokio::test]
    async fn update_missing_task_is_not_found() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("PUT", "/tasks/gone")
            .with_status(404)
            .with_body(r#"{"message":"Task not found"}"#)
            .create_async()
            .await;

        let err = gateway(&server)
            .update("gone", &TaskPatch::status(TaskStatus::Completed))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.server_message(), Some("Task not found"));
    }

    #[tokio::test]
    async fn delete_hits_task_resource() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("DELETE", "/tasks/t1")
            .with_status(200)
            .with_body(r#"{"message":"Task removed"}"#)
            .create_async()
            .await;

        gateway(&server).delete("t1").await.unwrap();
    }

    #[tokio::test]
    async fn create_validation_rejection_surfaces_message() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("POST", "/tasks")
            .with_status(400)
            .with_body(r#"{"message":"Title is required"}"#)
            .create_async()
            .await;

        let input = TaskInput {
            title: String::new(),
            description: String::new(),
            status: TaskStatus::Pending,
        };
        let err = gateway(&server).create(&input).await.unwrap_err();
        assert_eq!(err.status(), Some(400));
        assert_eq!(err.server_message(), Some("Title is required"));
    }
}
