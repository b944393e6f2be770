//! Wire types for the Flashify API.
//!
//! Ids are strings on the wire for auth users (UUIDs) but may be numeric for
//! decks/cards depending on the server's schema, so id fields accept either.

use serde::de::{Deserializer, Error as _};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Accepts a JSON string or number and yields its string form.
fn id_from_any<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(D::Error::custom(format!(
            "expected string or number id, got {other}"
        ))),
    }
}

/// An authenticated user identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(deserialize_with = "id_from_any")]
    pub id: String,
    pub email: String,
}

/// Session issued on login. Only the access token matters to this client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
}

/// Reply shape of `POST /auth/login` and `POST /auth/signup`.
///
/// `user` and `session` are independently nullable: signup issues no session
/// (email confirmation is out-of-band), and error replies carry neither.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub session: Option<Session>,
    #[serde(default)]
    pub error: Option<String>,
}

impl AuthResponse {
    /// The issued access token, when the reply carries a session.
    pub fn access_token(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.access_token.as_str())
    }
}

/// Reply shape of `GET /auth/user`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserResponse {
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub error: Option<String>,
}

/// A named collection of cards owned by a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    #[serde(deserialize_with = "id_from_any")]
    pub id: String,
    pub name: String,
}

/// A question/answer pair belonging to a deck.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    #[serde(deserialize_with = "id_from_any")]
    pub id: String,
    #[serde(deserialize_with = "id_from_any")]
    pub deck_id: String,
    pub question: String,
    pub answer: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_and_string_ids_both_parse() {
        let card: Card = serde_json::from_str(
            r#"{"id": 7, "deck_id": "d9f1", "question": "q", "answer": "a"}"#,
        )
        .unwrap();
        assert_eq!(card.id, "7");
        assert_eq!(card.deck_id, "d9f1");
    }

    #[test]
    fn test_auth_response_without_session() {
        let res: AuthResponse =
            serde_json::from_str(r#"{"user": {"id": "u1", "email": "a@b.c"}, "session": null}"#)
                .unwrap();
        assert!(res.access_token().is_none());
        assert_eq!(res.user.unwrap().email, "a@b.c");
        assert!(res.error.is_none());
    }

    #[test]
    fn test_auth_response_error_envelope() {
        let res: AuthResponse =
            serde_json::from_str(r#"{"error": "Invalid login credentials"}"#).unwrap();
        assert_eq!(res.error.as_deref(), Some("Invalid login credentials"));
        assert!(res.user.is_none());
    }
}
