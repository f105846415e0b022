//! Thin pass-through auth and profile calls. No protocol logic lives here:
//! the backend owns validation, hashing and token issuance.

use super::http::HttpAdapter;
use crate::auth::{AuthResponse, LoginPayload, ProfilePatch, RegisterPayload, User};
use crate::error::RemoteError;

#[derive(Clone)]
pub struct AuthGateway {
    adapter: HttpAdapter,
}

impl AuthGateway {
    pub fn new(adapter: HttpAdapter) -> Self {
        Self { adapter }
    }

    pub async fn register(&self, payload: &RegisterPayload) -> Result<AuthResponse, RemoteError> {
        let resp: AuthResponse = self.adapter.post_json("/auth/register", payload).await?;
        tracing::info!(target: "securetask.auth", user = %resp.user.email, "registered");
        Ok(resp)
    }

    pub async fn login(&self, payload: &LoginPayload) -> Result<AuthResponse, RemoteError> {
        let resp: AuthResponse = self.adapter.post_json("/auth/login", payload).await?;
        tracing::info!(target: "securetask.auth", user = %resp.user.email, "logged in");
        Ok(resp)
    }

    pub async fn me(&self) -> Result<User, RemoteError> {
        self.adapter.get_json("/users/me", &[]).await
    }

    pub async fn update_me(&self, patch: &ProfilePatch) -> Result<User, RemoteError> {
        self.adapter.put_json("/users/me", patch).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::StaticToken;
    use mockito::{Matcher, Server};
    use std::sync::Arc;

    fn gateway(server: &Server, token: &str) -> AuthGateway {
        let adapter =
            HttpAdapter::new(&server.url(), 1_000, Arc::new(StaticToken::new(token))).unwrap();
        AuthGateway::new(adapter)
    }

    #[tokio::test]
    async fn login_returns_token_and_user() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("POST", "/auth/login")
            .match_body(Matcher::Json(serde_json::json!({
                "email": "a@example.com",
                "password": "pw"
            })))
            .with_status(200)
            .with_body(
                r#"{"token":"jwt-token","user":{"_id":"u1","name":"Ada","email":"a@example.com"}}"#,
            )
            .create_async()
            .await;

        let resp = gateway(&server, "")
            .login(&LoginPayload {
                email: "a@example.com".to_string(),
                password: "pw".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(resp.token, "jwt-token");
        assert_eq!(resp.user.name, "Ada");
    }

    #[tokio::test]
    async fn me_sends_bearer_token() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/users/me")
            .match_header("authorization", "Bearer jwt-token")
            .with_status(200)
            .with_body(r#"{"_id":"u1","name":"Ada","email":"a@example.com"}"#)
            .create_async()
            .await;

        let user = gateway(&server, "jwt-token").me().await.unwrap();
        assert_eq!(user.id, "u1");
    }

    #[tokio::test]
    async fn bad_credentials_surface_server_message() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("POST", "/auth/login")
            .with_status(401)
            .with_body(r#"{"message":"Invalid credentials"}"#)
            .create_async()
            .await;

        let err = gateway(&server, "")
            .login(&LoginPayload {
                email: "a@example.com".to_string(),
                password: "nope".to_string(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.server_message(), Some("Invalid credentials"));
    }
}
