use async_trait::async_trait;
use movie_discovery_models::{Session, User};
use reqwest::Client;
use serde::Deserialize;
use tokio::sync::watch;
use tracing::{debug, info};

use crate::error::AuthError;
use crate::traits::AuthService;

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    user: AuthUser,
}

#[derive(Debug, Deserialize)]
struct AuthUser {
    id: String,
    #[serde(default)]
    email: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
struct AuthErrorBody {
    #[serde(default)]
    error_description: Option<String>,
    #[serde(default)]
    msg: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// GoTrue-style authentication client over the store's `/auth/v1`
/// endpoints. Owns the session-change channel: every transition the
/// service reports (restored session at startup, sign-in, sign-out) is
/// published to subscribers.
pub struct RestAuth {
    client: Client,
    base_url: String,
    anon_key: String,
    session_tx: watch::Sender<Option<Session>>,
}

impl RestAuth {
    /// `restored` is the session recovered from persisted credentials, if
    /// any; it becomes the channel's startup value.
    pub fn new(base_url: String, anon_key: String, restored: Option<Session>) -> Self {
        let (session_tx, _) = watch::channel(restored);
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            anon_key,
            session_tx,
        }
    }

    pub fn current_session(&self) -> Option<Session> {
        self.session_tx.borrow().clone()
    }

    async fn classify_failure(response: reqwest::Response) -> AuthError {
        let status = response.status().as_u16();
        let body: AuthErrorBody = response.json().await.unwrap_or_default();
        let message = body
            .error_description
            .or(body.msg)
            .or(body.message)
            .unwrap_or_else(|| "unknown error".to_string());
        classify(status, message)
    }
}

/// Map a GoTrue error body onto the error taxonomy. The service reports
/// the interesting cases by message text, not by status code.
fn classify(status: u16, message: String) -> AuthError {
    let lowered = message.to_lowercase();
    if lowered.contains("invalid login credentials") {
        AuthError::InvalidCredentials
    } else if lowered.contains("email not confirmed") {
        AuthError::EmailNotConfirmed
    } else {
        AuthError::Service { status, message }
    }
}

#[async_trait]
impl AuthService for RestAuth {
    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Session, AuthError> {
        if self.base_url.is_empty() {
            return Err(AuthError::NotConfigured);
        }
        let url = format!("{}/auth/v1/token?grant_type=password", self.base_url);
        let response = self
            .client
            .post(&url)
            .header("apikey", &self.anon_key)
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::classify_failure(response).await);
        }

        let token: TokenResponse = response.json().await?;
        let session = Session {
            user: User {
                id: token.user.id,
                email: token.user.email.unwrap_or_else(|| email.to_string()),
            },
            access_token: token.access_token,
        };

        info!(operation = "sign_in", user_id = %session.user.id, "Signed in");
        self.session_tx.send_replace(Some(session.clone()));
        Ok(session)
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<(), AuthError> {
        if self.base_url.is_empty() {
            return Err(AuthError::NotConfigured);
        }
        let url = format!("{}/auth/v1/signup", self.base_url);
        let response = self
            .client
            .post(&url)
            .header("apikey", &self.anon_key)
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::classify_failure(response).await);
        }

        // No session is established here: the backend sends a
        // confirmation email first.
        info!(operation = "sign_up", "Signup requested");
        Ok(())
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        if let Some(session) = self.current_session() {
            let url = format!("{}/auth/v1/logout", self.base_url);
            let response = self
                .client
                .post(&url)
                .header("apikey", &self.anon_key)
                .bearer_auth(&session.access_token)
                .send()
                .await?;
            if !response.status().is_success() {
                debug!(
                    operation = "sign_out",
                    status = response.status().as_u16(),
                    "Remote logout rejected; clearing local session anyway"
                );
            }
        }
        self.session_tx.send_replace(None);
        info!(operation = "sign_out", "Signed out");
        Ok(())
    }

    fn subscribe(&self) -> watch::Receiver<Option<Session>> {
        self.session_tx.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_invalid_credentials_by_message() {
        let err = classify(400, "Invalid login credentials".to_string());
        assert!(matches!(err, AuthError::InvalidCredentials));
    }

    #[test]
    fn test_classify_unconfirmed_email_by_message() {
        let err = classify(400, "Email not confirmed".to_string());
        assert!(matches!(err, AuthError::EmailNotConfirmed));
    }

    #[test]
    fn test_classify_other_failures_keep_status_and_message() {
        let err = classify(503, "upstream unavailable".to_string());
        match err {
            AuthError::Service { status, message } => {
                assert_eq!(status, 503);
                assert_eq!(message, "upstream unavailable");
            }
            other => panic!("unexpected variant: {:?}", other),
        }
    }

    #[test]
    fn test_error_body_accepts_any_known_field() {
        let body: AuthErrorBody =
            serde_json::from_str(r#"{"error_description": "Invalid login credentials"}"#).unwrap();
        assert_eq!(body.error_description.as_deref(), Some("Invalid login credentials"));

        let body: AuthErrorBody = serde_json::from_str(r#"{"msg": "Email not confirmed"}"#).unwrap();
        assert_eq!(body.msg.as_deref(), Some("Email not confirmed"));
    }

    #[test]
    fn test_restored_session_is_channel_startup_value() {
        let session = Session {
            user: User {
                id: "user-1".to_string(),
                email: "a@b.c".to_string(),
            },
            access_token: "tok".to_string(),
        };
        let auth = RestAuth::new(
            "https://proj.supabase.co".to_string(),
            "anon".to_string(),
            Some(session),
        );
        let rx = auth.subscribe();
        assert_eq!(rx.borrow().as_ref().map(|s| s.user.id.as_str()), Some("user-1"));

        let empty = RestAuth::new("https://proj.supabase.co".to_string(), "anon".to_string(), None);
        assert!(empty.subscribe().borrow().is_none());
    }
}
