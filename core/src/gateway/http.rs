//! HTTP adapter underneath the gateways: one reqwest client, bearer
//! injection from the [`TokenProvider`], response decoding and error
//! normalization into [`RemoteError`].

use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::auth::TokenProvider;
use crate::error::RemoteError;

const BODY_PREVIEW_LIMIT: usize = 512;

#[derive(Clone)]
pub struct HttpAdapter {
    http: reqwest::Client,
    base_url: String,
    tokens: Arc<dyn TokenProvider>,
}

impl HttpAdapter {
    pub fn new(
        base_url: &str,
        timeout_ms: u64,
        tokens: Arc<dyn TokenProvider>,
    ) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            tokens,
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Attach `Authorization: Bearer <token>` when a token is present;
    /// otherwise the request goes out unauthenticated as-is.
    fn auth(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.tokens.token() {
            Some(token) if !token.trim().is_empty() => req.bearer_auth(token),
            _ => req,
        }
    }

    async fn send(&self, req: reqwest::RequestBuilder, url: &str) -> Result<reqwest::Response, RemoteError> {
        self.auth(req)
            .send()
            .await
            .map_err(|err| transport_error(err, url))
    }

    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, RemoteError> {
        let url = self.url(path);
        tracing::debug!(target: "securetask.http", method = "GET", url = %url, params = query.len());
        let mut req = self.http.get(&url);
        if !query.is_empty() {
            req = req.query(query);
        }
        let resp = self.send(req, &url).await?;
        parse_json(resp).await
    }

    pub async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, RemoteError> {
        let url = self.url(path);
        tracing::debug!(target: "securetask.http", method = "POST", url = %url);
        let req = self.http.post(&url).json(body);
        let resp = self.send(req, &url).await?;
        parse_json(resp).await
    }

    pub async fn put_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, RemoteError> {
        let url = self.url(path);
        tracing::debug!(target: "securetask.http", method = "PUT", url = %url);
        let req = self.http.put(&url).json(body);
        let resp = self.send(req, &url).await?;
        parse_json(resp).await
    }

    pub async fn delete(&self, path: &str) -> Result<(), RemoteError> {
        let url = self.url(path);
        tracing::debug!(target: "securetask.http", method = "DELETE", url = %url);
        let req = self.http.delete(&url);
        let resp = self.send(req, &url).await?;
        ensure_success(resp).await
    }
}

fn transport_error(err: reqwest::Error, url: &str) -> RemoteError {
    RemoteError::Transport {
        url: url.to_string(),
        message: err.to_string(),
        source: err,
    }
}

/// Error message for a non-2xx body: the backend's JSON `message` field when
/// the body parses, else a truncated preview of the raw body.
fn status_message(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(message) = value.get("message").and_then(|m| m.as_str()) {
            return message.to_string();
        }
    }
    preview_body(body)
}

fn preview_body(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "<empty body>".to_string();
    }

    let mut out = String::new();
    let mut truncated = false;
    for (idx, ch) in trimmed.chars().enumerate() {
        if idx >= BODY_PREVIEW_LIMIT {
            truncated = true;
            break;
        }
        out.push(ch);
    }

    if truncated {
        out.push_str("...");
    }

    out
}

async fn read_body(resp: reqwest::Response) -> Result<(u16, String, String), RemoteError> {
    let status = resp.status().as_u16();
    let url = resp.url().to_string();
    let body = resp
        .text()
        .await
        .map_err(|err| transport_error(err, &url))?;
    Ok((status, url, body))
}

async fn parse_json<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, RemoteError> {
    let (status, url, body) = read_body(resp).await?;

    if !(200..300).contains(&status) {
        return Err(RemoteError::Status {
            status,
            url,
            message: status_message(&body),
        });
    }

    serde_json::from_str::<T>(&body).map_err(|err| RemoteError::Decode {
        url,
        message: format!("{} | body={}", err, preview_body(&body)),
        source: err,
    })
}

async fn ensure_success(resp: reqwest::Response) -> Result<(), RemoteError> {
    let (status, url, body) = read_body(resp).await?;

    if (200..300).contains(&status) {
        return Ok(());
    }

    Err(RemoteError::Status {
        status,
        url,
        message: status_message(&body),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::StaticToken;
    use mockito::{Matcher, Server};

    fn adapter(server: &Server, token: &str) -> HttpAdapter {
        HttpAdapter::new(&server.url(), 1_000, Arc::new(StaticToken::new(token))).unwrap()
    }

    #[test]
    fn preview_body_empty() {
        assert_eq!(preview_body("   "), "<empty body>");
    }

    #[test]
    fn preview_body_truncates() {
        let body = "a".repeat(BODY_PREVIEW_LIMIT + 10);
        let preview = preview_body(&body);
        assert!(preview.ends_with("..."));
        assert!(preview.len() <= BODY_PREVIEW_LIMIT + 3);
    }

    #[test]
    fn status_message_prefers_json_message_field() {
        assert_eq!(status_message(r#"{"message":"Task not found"}"#), "Task not found");
        assert_eq!(status_message("bad gateway"), "bad gateway");
    }

    #[tokio::test]
    async fn auth_header_included_when_token_present() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/ping")
            .match_header("authorization", "Bearer secret-token")
            .with_status(200)
            .with_body("{}")
            .create_async()
            .await;

        let adapter = adapter(&server, "secret-token");
        let _: serde_json::Value = adapter.get_json("/ping", &[]).await.unwrap();
    }

    #[tokio::test]
    async fn auth_header_absent_when_no_token() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/ping")
            .match_header("authorization", Matcher::Missing)
            .with_status(200)
            .with_body("{}")
            .create_async()
            .await;

        let adapter = adapter(&server, "");
        let _: serde_json::Value = adapter.get_json("/ping", &[]).await.unwrap();
    }

    #[tokio::test]
    async fn non_2xx_surfaces_status_and_message() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/ping")
            .with_status(401)
            .with_body(r#"{"message":"Not authorized"}"#)
            .create_async()
            .await;

        let adapter = adapter(&server, "");
        let err = adapter
            .get_json::<serde_json::Value>("/ping", &[])
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(401));
        assert_eq!(err.server_message(), Some("Not authorized"));
    }

    #[tokio::test]
    async fn undecodable_body_is_a_decode_error() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/ping")
            .with_status(200)
            .with_body("not json")
            .create_async()
            .await;

        let adapter = adapter(&server, "");
        let err = adapter
            .get_json::<serde_json::Value>("/ping", &[])
            .await
            .unwrap_err();
        assert!(matches!(err, RemoteError::Decode { .. }));
        assert!(err.to_string().contains("not json"));
    }

    #[tokio::test]
    async fn delete_accepts_any_2xx_body() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("DELETE", "/tasks/t1")
            .with_status(200)
            .with_body(r#"{"message":"Task removed"}"#)
            .create_async()
            .await;

        let adapter = adapter(&server, "");
        adapter.delete("/tasks/t1").await.unwrap();
    }
}
