//! Session-based authentication against the backend's auth endpoint.
//!
//! The client holds the active session in a `watch` channel so interested
//! parts of the application can react to sign-in/sign-out transitions.

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use ts_rs::TS;

use crate::{
    client::GatewayClient,
    error::{GatewayError, map_reqwest_error},
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
pub struct Session {
    pub access_token: String,
    pub email: String,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    user: TokenUser,
}

#[derive(Debug, Deserialize)]
struct TokenUser {
    email: String,
}

impl GatewayClient {
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Session, GatewayError> {
        let url = self.join("auth/v1/token?grant_type=password")?;
        let res = self
            .http
            .post(url)
            .header("apikey", &self.anon_key)
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .map_err(map_reqwest_error)?;

        match res.status() {
            s if s.is_success() => {
                let token: TokenResponse = res
                    .json()
                    .await
                    .map_err(|e| GatewayError::Serde(e.to_string()))?;
                let session = Session {
                    access_token: token.access_token,
                    email: token.user.email,
                };
                self.session.send_replace(Some(session.clone()));
                tracing::info!(email = %session.email, "signed in");
                Ok(session)
            }
            StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED => {
                Err(GatewayError::InvalidCredentials)
            }
            s => {
                let status = s.as_u16();
                let body = res.text().await.unwrap_or_default();
                Err(GatewayError::Http { status, body })
            }
        }
    }

    /// Signs out remotely and clears the local session. The local session is
    /// cleared even when the remote call fails; a dangling server-side token
    /// expires on its own.
    pub async fn sign_out(&self) -> Result<(), GatewayError> {
        if self.current_session().is_none() {
            return Ok(());
        }

        let url = self.join("auth/v1/logout")?;
        let result = self
            .authed(self.http.post(url))
            .send()
            .await
            .map_err(map_reqwest_error);

        self.session.send_replace(None);

        match result {
            Ok(res) if res.status().is_success() => Ok(()),
            Ok(res) => {
                tracing::warn!(status = %res.status(), "remote sign-out failed");
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "remote sign-out failed");
                Ok(())
            }
        }
    }

    pub fn current_session(&self) -> Option<Session> {
        self.session.borrow().clone()
    }

    /// Receiver that yields on every sign-in/sign-out transition.
    pub fn on_session_change(&self) -> watch::Receiver<Option<Session>> {
        self.session.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_starts_absent() {
        let client = GatewayClient::new("https://backend.example.co", "k", "b").unwrap();
        assert!(client.current_session().is_none());
    }

    #[tokio::test]
    async fn test_sign_out_without_session_is_noop() {
        let client = GatewayClient::new("https://backend.example.co", "k", "b").unwrap();
        client.sign_out().await.unwrap();
        assert!(client.current_session().is_none());
    }

    #[tokio::test]
    async fn test_session_change_notifies_subscribers() {
        let client = GatewayClient::new("https://backend.example.co", "k", "b").unwrap();
        let mut rx = client.on_session_change();
        client.session.send_replace(Some(Session {
            access_token: "t".into(),
            email: "admin@sekolah.sch.id".into(),
        }));
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow().as_ref().unwrap().email, "admin@sekolah.sch.id");
    }
}
