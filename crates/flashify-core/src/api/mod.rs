//! HTTP client for the Flashify API.
//!
//! All persistent state lives behind this API; the client is a thin wrapper
//! over `reqwest` that attaches the bearer token and normalizes the server's
//! two reply conventions:
//!
//! - auth endpoints always reply with a JSON object whose `user` / `session` /
//!   `error` fields the caller branches on (returned raw, never turned into
//!   `Err` — see [`crate::auth`]);
//! - deck/card endpoints reply with the payload on success or an
//!   `{"error": ...}` envelope on failure, which is surfaced verbatim as the
//!   error message.
//!
//! Transport failures (connection refused, timeouts, non-JSON bodies) are
//! `anyhow` errors with context. Nothing is retried.

mod types;

use anyhow::{Context, Result, bail};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

pub use types::{AuthResponse, Card, Deck, Session, User, UserResponse};

use crate::config::Config;

/// Flashify API client.
///
/// Cheap to clone; the underlying `reqwest::Client` is reference-counted.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
}

#[derive(Serialize)]
struct CredentialsBody<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct CreateDeckBody<'a> {
    name: &'a str,
}

#[derive(Serialize)]
struct CreateCardBody<'a> {
    deck_id: &'a str,
    question: &'a str,
    answer: &'a str,
}

#[derive(Serialize)]
struct UpdateCardBody<'a> {
    question: &'a str,
    answer: &'a str,
}

impl ApiClient {
    /// Creates a client from configuration.
    pub fn new(config: &Config) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            base_url: config.api_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    /// The base URL this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    // ========================================================================
    // Auth
    // ========================================================================

    /// `POST /auth/login`. The reply is returned raw for caller branching.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse> {
        self.post_raw("/auth/login", &CredentialsBody { email, password })
            .await
    }

    /// `POST /auth/signup`. Never issues a session; confirmation is
    /// out-of-band.
    pub async fn signup(&self, email: &str, password: &str) -> Result<AuthResponse> {
        self.post_raw("/auth/signup", &CredentialsBody { email, password })
            .await
    }

    /// `GET /auth/user` — resolves the identity behind a bearer token.
    pub async fn get_user(&self, token: &str) -> Result<UserResponse> {
        debug!("resolving identity");
        let response = self
            .http
            .get(self.url("/auth/user"))
            .bearer_auth(token)
            .send()
            .await
            .context("Failed to reach API server")?;
        response
            .json()
            .await
            .context("Unexpected reply from /auth/user")
    }

    // ========================================================================
    // Decks
    // ========================================================================

    /// `GET /decks/` — all decks owned by the token's user.
    pub async fn list_decks(&self, token: &str) -> Result<Vec<Deck>> {
        self.get_checked("/decks/", token).await
    }

    /// `GET /decks/{id}` — a single deck.
    pub async fn get_deck(&self, token: &str, deck_id: &str) -> Result<Deck> {
        self.get_checked(&format!("/decks/{deck_id}"), token).await
    }

    /// `POST /decks/` — creates a deck, returning the inserted row(s).
    pub async fn create_deck(&self, token: &str, name: &str) -> Result<Vec<Deck>> {
        self.post_checked("/decks/", token, &CreateDeckBody { name })
            .await
    }

    /// `DELETE /decks/{id}`.
    pub async fn delete_deck(&self, token: &str, deck_id: &str) -> Result<()> {
        self.delete_checked(&format!("/decks/{deck_id}"), token)
            .await
    }

    // ========================================================================
    // Cards
    // ========================================================================

    /// `GET /cards/{deck_id}` — the deck's cards, in server order.
    pub async fn list_cards(&self, token: &str, deck_id: &str) -> Result<Vec<Card>> {
        self.get_checked(&format!("/cards/{deck_id}"), token).await
    }

    /// `POST /cards/` — creates a card, returning the inserted row(s).
    pub async fn create_card(
        &self,
        token: &str,
        deck_id: &str,
        question: &str,
        answer: &str,
    ) -> Result<Vec<Card>> {
        self.post_checked(
            "/cards/",
            token,
            &CreateCardBody {
                deck_id,
                question,
                answer,
            },
        )
        .await
    }

    /// `PUT /cards/{id}` — updates question/answer, returning the updated
    /// row(s).
    pub async fn update_card(
        &self,
        token: &str,
        card_id: &str,
        question: &str,
        answer: &str,
    ) -> Result<Vec<Card>> {
        let response = self
            .http
            .put(self.url(&format!("/cards/{card_id}")))
            .bearer_auth(token)
            .json(&UpdateCardBody { question, answer })
            .send()
            .await
            .context("Failed to reach API server")?;
        Self::decode_checked(response).await
    }

    /// `DELETE /cards/{id}`.
    pub async fn delete_card(&self, token: &str, card_id: &str) -> Result<()> {
        self.delete_checked(&format!("/cards/{card_id}"), token)
            .await
    }

    // ========================================================================
    // Request helpers
    // ========================================================================

    /// POST without error-envelope checking: auth replies are data even when
    /// they carry an `error` field.
    async fn post_raw<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        debug!(path, "api post");
        let response = self
            .http
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .context("Failed to reach API server")?;
        response
            .json()
            .await
            .with_context(|| format!("Unexpected reply from {path}"))
    }

    async fn get_checked<T: DeserializeOwned>(&self, path: &str, token: &str) -> Result<T> {
        debug!(path, "api get");
        let response = self
            .http
            .get(self.url(path))
            .bearer_auth(token)
            .send()
            .await
            .context("Failed to reach API server")?;
        Self::decode_checked(response).await
    }

    async fn post_checked<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        token: &str,
        body: &B,
    ) -> Result<T> {
        debug!(path, "api post");
        let response = self
            .http
            .post(self.url(path))
            .bearer_auth(token)
            .json(body)
            .send()
            .await
            .context("Failed to reach API server")?;
        Self::decode_checked(response).await
    }

    async fn delete_checked(&self, path: &str, token: &str) -> Result<()> {
        debug!(path, "api delete");
        let response = self
            .http
            .delete(self.url(path))
            .bearer_auth(token)
            .send()
            .await
            .context("Failed to reach API server")?;
        // Success replies are `{"message": ...}`; only the envelope matters.
        let _: Value = Self::decode_checked(response).await?;
        Ok(())
    }

    /// Decodes a deck/card reply, surfacing the server's `error` field
    /// verbatim when present.
    async fn decode_checked<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let status = response.status();
        let body: Value = response
            .json()
            .await
            .context("API reply was not valid JSON")?;

        if let Some(message) = body.get("error").and_then(Value::as_str) {
            bail!("{message}");
        }
        if !status.is_success() {
            bail!("API request failed with status {status}");
        }

        serde_json::from_value(body).context("Unexpected API reply shape")
    }
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    async fn client_for(server: &MockServer) -> ApiClient {
        let config = Config {
            api_url: server.uri(),
            ..Config::default()
        };
        ApiClient::new(&config).unwrap()
    }

    #[tokio::test]
    async fn test_login_returns_raw_reply_on_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .and(body_json(serde_json::json!({
                "email": "a@b.c",
                "password": "nope"
            })))
            .respond_with(
                ResponseTemplate::new(500)
                    .set_body_json(serde_json::json!({"error": "Invalid login credentials"})),
            )
            .mount(&server)
            .await;

        let res = client_for(&server).await.login("a@b.c", "nope").await.unwrap();
        assert_eq!(res.error.as_deref(), Some("Invalid login credentials"));
        assert!(res.access_token().is_none());
    }

    #[tokio::test]
    async fn test_list_decks_parses_array() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/decks/"))
            .and(header("authorization", "Bearer tok-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"id": 1, "name": "Spanish"},
                {"id": 2, "name": "Capitals"}
            ])))
            .mount(&server)
            .await;

        let decks = client_for(&server).await.list_decks("tok-1").await.unwrap();
        assert_eq!(decks.len(), 2);
        assert_eq!(decks[0].name, "Spanish");
        assert_eq!(decks[1].id, "2");
    }

    #[tokio::test]
    async fn test_error_envelope_becomes_error_message() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/decks/"))
            .respond_with(
                ResponseTemplate::new(401)
                    .set_body_json(serde_json::json!({"error": "Missing Token"})),
            )
            .mount(&server)
            .await;

        let err = client_for(&server)
            .await
            .list_decks("stale")
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Missing Token");
    }

    #[tokio::test]
    async fn test_get_deck_parses_single_object() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/decks/7"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"id": 7, "name": "Capitals"})),
            )
            .mount(&server)
            .await;

        let deck = client_for(&server)
            .await
            .get_deck("tok-1", "7")
            .await
            .unwrap();
        assert_eq!(deck.id, "7");
        assert_eq!(deck.name, "Capitals");
    }

    #[tokio::test]
    async fn test_update_card_puts_new_fields() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/cards/41"))
            .and(body_json(serde_json::json!({
                "question": "hola",
                "answer": "hello"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"id": 41, "deck_id": 9, "question": "hola", "answer": "hello"}
            ])))
            .mount(&server)
            .await;

        let cards = client_for(&server)
            .await
            .update_card("tok-1", "41", "hola", "hello")
            .await
            .unwrap();
        assert_eq!(cards[0].answer, "hello");
    }

    #[tokio::test]
    async fn test_create_card_posts_deck_id_and_fields() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/cards/"))
            .and(body_json(serde_json::json!({
                "deck_id": "9",
                "question": "hola",
                "answer": "hello"
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!([
                {"id": 41, "deck_id": 9, "question": "hola", "answer": "hello"}
            ])))
            .mount(&server)
            .await;

        let cards = client_for(&server)
            .await
            .create_card("tok-1", "9", "hola", "hello")
            .await
            .unwrap();
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].id, "41");
    }

    #[tokio::test]
    async fn test_delete_deck_accepts_message_reply() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/decks/7"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"message": "Deck deleted"})),
            )
            .mount(&server)
            .await;

        client_for(&server)
            .await
            .delete_deck("tok-1", "7")
            .await
            .unwrap();
    }
}
