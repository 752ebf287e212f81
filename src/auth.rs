//! Login, registration, and logout.
//!
//! On a successful login the bearer token and the returned profile are
//! persisted together through the [`SessionStore`]; logout drops both.
//! Registration mirrors the backend's username and password rules as a
//! pre-flight check so obviously bad input never leaves the client.

use crate::api::types::{Credentials, RegisterUser, UserProfile};
use crate::api::StorefrontApi;
use crate::error::{Result, TokokuError};
use crate::session::{Session, SessionStore};

/// Auth flow controller.
pub struct AuthFlow<A, S> {
    api: A,
    store: S,
}

impl<A: StorefrontApi, S: SessionStore> AuthFlow<A, S> {
    /// Create an auth controller.
    #[must_use]
    pub fn new(api: A, store: S) -> Self {
        Self { api, store }
    }

    /// The current session, if one is persisted. Used for login-state
    /// rendering; never refreshes anything.
    pub async fn current(&self) -> Result<Option<Session>> {
        self.store.load_session().await
    }

    /// Log in and persist the session.
    pub async fn login(&self, username: &str, password: &str) -> Result<Session> {
        let token = self
            .api
            .login(&Credentials {
                username: username.to_string(),
                password: password.to_string(),
            })
            .await?;

        let session = Session::new(token.access_token, token.user);
        self.store.save_session(&session).await?;
        tracing::info!(
            target: "tokoku::auth",
            username = %session.user().username,
            is_seller = session.is_seller(),
            "logged in"
        );
        Ok(session)
    }

    /// Register a new account. Does not log in; the caller navigates to the
    /// login flow afterwards.
    pub async fn register(&self, user: RegisterUser) -> Result<UserProfile> {
        validate_registration(&user)?;
        let profile = self.api.register(&user).await?;
        tracing::info!(
            target: "tokoku::auth",
            username = %profile.username,
            "registered"
        );
        Ok(profile)
    }

    /// Drop the persisted session.
    pub async fn logout(&self) -> Result<()> {
        self.store.clear_session().await?;
        tracing::info!(target: "tokoku::auth", "logged out");
        Ok(())
    }
}

/// Pre-flight mirror of the backend's registration rules.
fn validate_registration(user: &RegisterUser) -> Result<()> {
    if user.username.chars().count() < 3 {
        return Err(TokokuError::validation("Username minimal 3 karakter"));
    }
    if !user
        .username
        .chars()
        .all(|c| c.is_alphanumeric() || c == '_')
    {
        return Err(TokokuError::validation(
            "Username hanya boleh huruf, angka, dan underscore",
        ));
    }
    if user.password.chars().count() < 6 {
        return Err(TokokuError::validation("Password minimal 6 karakter"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::MemoryStore;
    use crate::testing::{fake, MockApi};

    fn new_user(username: &str, password: &str) -> RegisterUser {
        RegisterUser {
            email: "buyer@example.com".to_string(),
            username: username.to_string(),
            password: password.to_string(),
            full_name: None,
            phone: None,
            is_seller: false,
        }
    }

    #[tokio::test]
    async fn login_persists_session() {
        let api = MockApi::new().with_login("tok-abc", fake::buyer());
        let store = MemoryStore::new();
        let flow = AuthFlow::new(api, store.clone());

        assert!(flow.current().await.unwrap().is_none());
        let session = flow.login("budi", "rahasia").await.unwrap();
        assert_eq!(session.user().username, "budi");

        let persisted = store.load_session().await.unwrap().unwrap();
        assert_eq!(persisted.user().username, "budi");
    }

    #[tokio::test]
    async fn logout_clears_session() {
        let api = MockApi::new().with_login("tok-abc", fake::buyer());
        let store = MemoryStore::new();
        let flow = AuthFlow::new(api, store.clone());

        flow.login("budi", "rahasia").await.unwrap();
        flow.logout().await.unwrap();
        assert!(store.load_session().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn registration_preflight_blocks_bad_input() {
        let api = MockApi::new();
        let flow = AuthFlow::new(api.clone(), MemoryStore::new());

        for user in [
            new_user("ab", "rahasia"),
            new_user("budi!", "rahasia"),
            new_user("budi", "12345"),
        ] {
            let err = flow.register(user).await.unwrap_err();
            assert!(matches!(err, TokokuError::Validation(_)));
        }
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn registration_passes_valid_input_through() {
        let api = MockApi::new();
        let flow = AuthFlow::new(api, MemoryStore::new());
        let profile = flow.register(new_user("budi_03", "rahasia")).await.unwrap();
        assert_eq!(profile.username, "budi_03");
    }

    #[tokio::test]
    async fn failed_login_persists_nothing() {
        let api = MockApi::new().reject_next("Username atau password salah");
        let store = MemoryStore::new();
        let flow = AuthFlow::new(api, store.clone());

        let err = flow.login("budi", "salah").await.unwrap_err();
        assert_eq!(err.rejection_detail(), Some("Username atau password salah"));
        assert!(store.load_session().await.unwrap().is_none());
    }
}
