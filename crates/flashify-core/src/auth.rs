//! Session-scoped authentication state.
//!
//! Single source of truth for "is the caller authenticated", shared across
//! the whole process. Holds the bearer token and the (independently nullable)
//! user identity, mirrors the token to the persisted credential store, and
//! exposes an explicit three-state status so dependent views can distinguish
//! "not yet known" from "known unauthenticated" and avoid premature
//! redirects during startup rehydration.
//!
//! Network calls are delegated to [`ApiClient`]; this component's only side
//! effects are credential-store writes on login and removals on logout.

use anyhow::Result;
use tracing::info;

use crate::api::{ApiClient, AuthResponse, User};
use crate::credentials::CredentialStore;

/// Authentication status.
///
/// `Unknown` covers the startup window where a persisted token was found but
/// the identity behind it has not been resolved yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthStatus {
    Unknown,
    Unauthenticated,
    Authenticated,
}

/// Process-wide authentication state.
///
/// Token and identity are only ever replaced or cleared as a pair (identity
/// may lag behind the token during resolution, but never outlives it).
#[derive(Debug)]
pub struct AuthSession {
    store: CredentialStore,
    token: Option<String>,
    user: Option<User>,
    status: AuthStatus,
}

impl AuthSession {
    /// Initializes auth state from the persisted credential slot.
    ///
    /// A stored token puts the session in `Unknown` until the caller resolves
    /// the identity (see [`AuthSession::resolve_identity`]); an empty slot
    /// reports `Unauthenticated` immediately.
    pub fn initialize(store: CredentialStore) -> Result<Self> {
        let token = store.load()?;
        let status = if token.is_some() {
            AuthStatus::Unknown
        } else {
            AuthStatus::Unauthenticated
        };
        Ok(Self {
            store,
            token,
            user: None,
            status,
        })
    }

    pub fn status(&self) -> AuthStatus {
        self.status
    }

    /// True only once a token is present and rehydration (if any) finished.
    pub fn is_authenticated(&self) -> bool {
        self.status == AuthStatus::Authenticated
    }

    /// True while a stored token awaits identity resolution.
    pub fn needs_identity_resolution(&self) -> bool {
        self.status == AuthStatus::Unknown
    }

    /// The current bearer token, if any.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// The resolved identity. May be `None` even when a token exists.
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// Exchanges credentials for a session via the API.
    ///
    /// On a reply carrying an access token: persists it, then installs
    /// (token, identity) and flips to `Authenticated`. Any other reply leaves
    /// state untouched. The raw reply is always returned so the caller can
    /// render success or the server's error message.
    pub async fn login(
        &mut self,
        api: &ApiClient,
        email: &str,
        password: &str,
    ) -> Result<AuthResponse> {
        let response = api.login(email, password).await?;
        self.install_session(&response)?;
        Ok(response)
    }

    /// Installs a login reply that carries an access token.
    ///
    /// Persists the token first, then replaces (token, identity) as a pair
    /// and flips to `Authenticated`. Replies without a session (failed
    /// logins, signups) leave state untouched. Split out of
    /// [`AuthSession::login`] so callers that ran the exchange elsewhere
    /// (the TUI effect runtime) can apply the result synchronously.
    pub fn install_session(&mut self, response: &AuthResponse) -> Result<()> {
        let Some(token) = response.access_token() else {
            return Ok(());
        };
        self.store.save(token)?;
        self.token = Some(token.to_string());
        self.user = response.user.clone();
        self.status = AuthStatus::Authenticated;
        info!("logged in");
        Ok(())
    }

    /// Registers a new account via the API.
    ///
    /// Never mutates local state: registration does not imply an
    /// authenticated session (email confirmation happens out-of-band).
    pub async fn signup(&self, api: &ApiClient, email: &str, password: &str) -> Result<AuthResponse> {
        api.signup(email, password).await
    }

    /// Completes startup rehydration with the result of the identity fetch.
    ///
    /// Token presence gates access, so the session becomes `Authenticated`
    /// even when the fetch failed; the identity simply stays unresolved.
    /// No-op unless the session is in the `Unknown` window.
    pub fn resolve_identity(&mut self, user: Option<User>) {
        if self.status != AuthStatus::Unknown {
            return;
        }
        self.user = user;
        self.status = AuthStatus::Authenticated;
    }

    /// Clears the persisted slot and the in-memory (token, identity) pair.
    ///
    /// Purely local; in-memory state is cleared even if removing the
    /// persisted slot fails.
    pub fn logout(&mut self) -> Result<()> {
        self.token = None;
        self.user = None;
        self.status = AuthStatus::Unauthenticated;
        info!("logged out");
        self.store.clear()
    }
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::config::Config;

    fn temp_store() -> (tempfile::TempDir, CredentialStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = CredentialStore::at(dir.path().join("credentials.json"));
        (dir, store)
    }

    async fn api_for(server: &MockServer) -> ApiClient {
        let config = Config {
            api_url: server.uri(),
            ..Config::default()
        };
        ApiClient::new(&config).unwrap()
    }

    fn login_reply() -> serde_json::Value {
        serde_json::json!({
            "user": {"id": "u1", "email": "ana@example.com"},
            "session": {"access_token": "tok-abc"}
        })
    }

    #[test]
    fn test_initialize_without_token_is_unauthenticated() {
        let (_dir, store) = temp_store();
        let auth = AuthSession::initialize(store).unwrap();
        assert_eq!(auth.status(), AuthStatus::Unauthenticated);
        assert!(auth.token().is_none());
        assert!(!auth.is_authenticated());
    }

    #[test]
    fn test_initialize_with_token_awaits_resolution() {
        let (_dir, store) = temp_store();
        store.save("tok-abc").unwrap();

        let mut auth = AuthSession::initialize(store).unwrap();
        assert_eq!(auth.status(), AuthStatus::Unknown);
        assert!(auth.needs_identity_resolution());
        // Not authenticated yet, but also not known-unauthenticated.
        assert!(!auth.is_authenticated());

        auth.resolve_identity(Some(User {
            id: "u1".to_string(),
            email: "ana@example.com".to_string(),
        }));
        assert!(auth.is_authenticated());
        assert_eq!(auth.user().unwrap().email, "ana@example.com");
    }

    #[test]
    fn test_failed_identity_fetch_keeps_token() {
        let (_dir, store) = temp_store();
        store.save("tok-abc").unwrap();

        let mut auth = AuthSession::initialize(store).unwrap();
        auth.resolve_identity(None);
        assert!(auth.is_authenticated());
        assert_eq!(auth.token(), Some("tok-abc"));
        assert!(auth.user().is_none());
    }

    #[tokio::test]
    async fn test_login_persists_token_and_sets_identity() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .respond_with(ResponseTemplate::new(200).set_body_json(login_reply()))
            .mount(&server)
            .await;

        let (_dir, store) = temp_store();
        let mut auth = AuthSession::initialize(store.clone()).unwrap();
        let res = auth
            .login(&api_for(&server).await, "ana@example.com", "secret")
            .await
            .unwrap();

        assert!(res.error.is_none());
        assert!(auth.is_authenticated());
        assert_eq!(auth.token(), Some("tok-abc"));
        assert_eq!(auth.user().unwrap().id, "u1");
        assert_eq!(store.load().unwrap().as_deref(), Some("tok-abc"));
    }

    #[tokio::test]
    async fn test_failed_login_leaves_state_untouched() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .respond_with(
                ResponseTemplate::new(500)
                    .set_body_json(serde_json::json!({"error": "Invalid login credentials"})),
            )
            .mount(&server)
            .await;

        let (_dir, store) = temp_store();
        let mut auth = AuthSession::initialize(store.clone()).unwrap();
        let res = auth
            .login(&api_for(&server).await, "ana@example.com", "wrong")
            .await
            .unwrap();

        assert_eq!(res.error.as_deref(), Some("Invalid login credentials"));
        assert_eq!(auth.status(), AuthStatus::Unauthenticated);
        assert!(auth.token().is_none());
        assert_eq!(store.load().unwrap(), None);
    }

    #[tokio::test]
    async fn test_signup_never_mutates_state() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/signup"))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
                "user": {"id": "u2", "email": "new@example.com"},
                "session": null
            })))
            .mount(&server)
            .await;

        let (_dir, store) = temp_store();
        let auth = AuthSession::initialize(store.clone()).unwrap();
        let res = auth
            .signup(&api_for(&server).await, "new@example.com", "secret")
            .await
            .unwrap();

        assert!(res.error.is_none());
        assert_eq!(auth.status(), AuthStatus::Unauthenticated);
        assert_eq!(store.load().unwrap(), None);
    }

    #[tokio::test]
    async fn test_logout_after_login_clears_everything() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .respond_with(ResponseTemplate::new(200).set_body_json(login_reply()))
            .mount(&server)
            .await;

        let (_dir, store) = temp_store();
        let mut auth = AuthSession::initialize(store.clone()).unwrap();
        auth.login(&api_for(&server).await, "ana@example.com", "secret")
            .await
            .unwrap();
        assert!(auth.is_authenticated());

        auth.logout().unwrap();
        assert!(!auth.is_authenticated());
        assert_eq!(auth.status(), AuthStatus::Unauthenticated);
        assert!(auth.token().is_none());
        assert!(auth.user().is_none());
        assert_eq!(store.load().unwrap(), None);
    }
}
