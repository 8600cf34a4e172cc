//! API client for the chat backend

use gloo_net::http::{Request, RequestBuilder, Response};
use leptos::prelude::*;
use leptos::task::spawn_local;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::state::AppState;
use crate::types::*;

/// Errors from backend calls
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("{detail}")]
    Http { status: u16, detail: String },

    #[error("Failed to parse response: {0}")]
    Decode(String),

    #[error("Failed to encode request: {0}")]
    Encode(String),
}

impl ApiError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Http { status: 401, .. })
    }
}

fn with_auth(req: RequestBuilder, token: Option<&str>) -> RequestBuilder {
    match token {
        Some(t) => req.header("Authorization", &format!("Bearer {}", t)),
        None => req,
    }
}

async fn read_json<T: DeserializeOwned>(resp: Response) -> Result<T, ApiError> {
    if !resp.ok() {
        let status = resp.status();
        let detail = match resp.json::<ErrorBody>().await {
            Ok(body) => body.message(),
            Err(_) => format!("Request failed with status {}", status),
        };
        return Err(ApiError::Http { status, detail });
    }

    resp.json::<T>()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}

/// GET request, optionally authenticated
pub async fn fetch_with_auth<T: DeserializeOwned>(
    url: &str,
    token: Option<&str>,
) -> Result<T, ApiError> {
    let resp = with_auth(Request::get(url), token)
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;
    read_json(resp).await
}

/// Request with a JSON body, optionally authenticated
pub async fn send_json<B, R>(
    req: RequestBuilder,
    body: &B,
    token: Option<&str>,
) -> Result<R, ApiError>
where
    B: Serialize,
    R: DeserializeOwned,
{
    let req = with_auth(req, token)
        .json(body)
        .map_err(|e| ApiError::Encode(e.to_string()))?;
    let resp = req
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;
    read_json(resp).await
}

/// Form body for the OAuth2 password login endpoint
pub fn login_form_body(username: &str, password: &str) -> String {
    format!(
        "username={}&password={}",
        urlencoding::encode(username),
        urlencoding::encode(password)
    )
}

/// Exchange credentials for an access token
pub async fn login(base_url: &str, username: &str, password: &str) -> Result<LoginResponse, ApiError> {
    let url = format!("{}/api/v1/auth/login", base_url);
    let req = Request::post(&url)
        .header("Content-Type", "application/x-www-form-urlencoded")
        .body(login_form_body(username, password))
        .map_err(|e| ApiError::Encode(e.to_string()))?;
    let resp = req
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;
    read_json(resp).await
}

/// Tell the backend we are leaving. The token is dropped client-side either way.
pub async fn logout(base_url: &str, token: &str) -> Result<MessageResponse, ApiError> {
    let url = format!("{}/api/v1/auth/logout", base_url);
    let resp = with_auth(Request::post(&url), Some(token))
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;
    read_json(resp).await
}

pub async fn fetch_me(base_url: &str, token: &str) -> Result<User, ApiError> {
    let url = format!("{}/api/v1/auth/me", base_url);
    fetch_with_auth(&url, Some(token)).await
}

pub async fn change_password(
    base_url: &str,
    token: &str,
    change: &PasswordChange,
) -> Result<MessageResponse, ApiError> {
    let url = format!("{}/api/v1/auth/password", base_url);
    send_json(Request::put(&url), change, Some(token)).await
}

pub async fn fetch_health(base_url: &str) -> Result<HealthStatus, ApiError> {
    let url = format!("{}/health", base_url);
    fetch_with_auth(&url, None).await
}

pub async fn fetch_conversations(
    base_url: &str,
    token: &str,
) -> Result<Vec<ConversationSummary>, ApiError> {
    let url = format!("{}/api/v1/conversations", base_url);
    fetch_with_auth(&url, Some(token)).await
}

pub async fn fetch_conversation(
    base_url: &str,
    token: &str,
    id: &str,
) -> Result<Conversation, ApiError> {
    let url = format!(
        "{}/api/v1/conversations/{}",
        base_url,
        urlencoding::encode(id)
    );
    fetch_with_auth(&url, Some(token)).await
}

/// Refresh the signed-in user's profile in app state
pub fn load_profile(state: AppState) {
    spawn_local(async move {
        let Some(token) = state.token.get_untracked() else {
            return;
        };
        let base = state.config.api_base.clone();
        match fetch_me(&base, &token).await {
            Ok(user) => state.set_user(user),
            Err(e) if e.is_unauthorized() => {
                tracing::warn!("stored token rejected by backend");
                state.set_error(e.to_string());
            }
            Err(e) => tracing::error!("Failed to load profile: {}", e),
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_form_body_is_encoded() {
        assert_eq!(
            login_form_body("alice", "p&ss word=1"),
            "username=alice&password=p%26ss%20word%3D1"
        );
    }

    #[test]
    fn test_error_display() {
        let err = ApiError::Http {
            status: 401,
            detail: "Incorrect username or password".to_string(),
        };
        assert!(err.is_unauthorized());
        assert_eq!(err.to_string(), "Incorrect username or password");
        assert!(!ApiError::Network("offline".to_string()).is_unauthorized());
        assert_eq!(
            ApiError::Decode("eof".to_string()).to_string(),
            "Failed to parse response: eof"
        );
    }
}
