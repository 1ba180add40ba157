//! Session store - in-memory authentication state with a persistent mirror
//!
//! Holds the bearer token and user record, mirrors both to a
//! `CredentialStore`, and exposes the advisory token-validity check.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use intervue_core::{decode_claims, IntervueResult, Role, User};
use tracing::{debug, warn};

use crate::storage::{CredentialStore, TOKEN_KEY, USER_KEY};

#[derive(Default)]
struct SessionState {
    token: Option<String>,
    user: Option<User>,
}

/// Client-side session: token + user, mirrored to persistent storage.
///
/// Authenticated ⇔ both token and user are present. Expiry checking here is
/// advisory bookkeeping, not a security boundary; the server enforces for
/// real.
pub struct SessionStore {
    state: RwLock<SessionState>,
    storage: Arc<dyn CredentialStore>,
}

impl SessionStore {
    /// Create an empty session backed by the given credential store
    pub fn new(storage: Arc<dyn CredentialStore>) -> Self {
        Self {
            state: RwLock::new(SessionState::default()),
            storage,
        }
    }

    fn read_state(&self) -> RwLockReadGuard<'_, SessionState> {
        self.state.read().unwrap_or_else(|p| p.into_inner())
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, SessionState> {
        self.state.write().unwrap_or_else(|p| p.into_inner())
    }

    /// Set the bearer token and mirror it to storage
    pub fn set_token(&self, token: &str) -> IntervueResult<()> {
        self.write_state().token = Some(token.to_string());
        self.storage.write(TOKEN_KEY, token)
    }

    /// Set the user record and mirror it to storage
    pub fn set_user(&self, user: &User) -> IntervueResult<()> {
        let serialized = serde_json::to_string(user)?;
        self.write_state().user = Some(user.clone());
        self.storage.write(USER_KEY, &serialized)
    }

    /// Repopulate in-memory state from persistent storage.
    ///
    /// Idempotent; entries absent from storage leave the in-memory value
    /// untouched. A user entry that no longer parses is ignored.
    pub fn load_from_storage(&self) -> IntervueResult<()> {
        let token = self.storage.read(TOKEN_KEY)?;
        let user = self.storage.read(USER_KEY)?;

        let mut state = self.write_state();
        if let Some(token) = token {
            state.token = Some(token);
        }
        if let Some(raw) = user {
            match serde_json::from_str::<User>(&raw) {
                Ok(user) => state.user = Some(user),
                Err(e) => warn!("Ignoring unparseable stored user record: {}", e),
            }
        }

        Ok(())
    }

    /// Clear in-memory state and persistent storage
    pub fn logout(&self) {
        {
            let mut state = self.write_state();
            state.token = None;
            state.user = None;
        }

        for key in [TOKEN_KEY, USER_KEY] {
            if let Err(e) = self.storage.remove(key) {
                warn!("Failed to clear stored credential '{}': {}", key, e);
            }
        }

        debug!("Session cleared");
    }

    /// Advisory validity check on the stored token.
    ///
    /// Returns false, logging the session out as a side effect, when no
    /// token is present, the token cannot be decoded, or its expiry claim is
    /// in the past. Returns true otherwise, leaving the session unchanged.
    pub fn check_token_validity(&self) -> bool {
        let token = match self.token() {
            Some(token) => token,
            None => {
                self.logout();
                return false;
            }
        };

        match decode_claims(&token) {
            Ok(claims) if claims.is_expired() => {
                debug!("Stored token is past its expiry claim");
                self.logout();
                false
            }
            Ok(_) => true,
            Err(e) => {
                debug!("Stored token failed to decode: {}", e);
                self.logout();
                false
            }
        }
    }

    /// The current bearer token, if any
    pub fn token(&self) -> Option<String> {
        self.read_state().token.clone()
    }

    /// The current user record, if any
    pub fn user(&self) -> Option<User> {
        self.read_state().user.clone()
    }

    /// Authenticated ⇔ both token and user are present
    pub fn is_authenticated(&self) -> bool {
        let state = self.read_state();
        state.token.is_some() && state.user.is_some()
    }

    /// The current user's role, if a user is present
    pub fn role(&self) -> Option<Role> {
        self.read_state().user.as_ref().map(|u| u.role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryCredentialStore;
    use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
    use intervue_core::Role;

    fn token_with_exp(exp: Option<i64>) -> String {
        let payload = match exp {
            Some(exp) => format!(r#"{{"sub":"1","exp":{}}}"#, exp),
            None => r#"{"sub":"1"}"#.to_string(),
        };
        format!("header.{}.sig", URL_SAFE_NO_PAD.encode(payload.as_bytes()))
    }

    fn future_exp() -> i64 {
        chrono::Utc::now().timestamp() + 3600
    }

    fn past_exp() -> i64 {
        chrono::Utc::now().timestamp() - 3600
    }

    fn store() -> SessionStore {
        SessionStore::new(Arc::new(MemoryCredentialStore::new()))
    }

    fn sample_user(role: Role) -> User {
        User::new(1, "ada", "ada@example.com", role)
    }

    #[test]
    fn test_authenticated_requires_token_and_user() {
        let session = store();
        assert!(!session.is_authenticated());

        session.set_token(&token_with_exp(Some(future_exp()))).unwrap();
        assert!(!session.is_authenticated());

        session.set_user(&sample_user(Role::Admin)).unwrap();
        assert!(session.is_authenticated());

        session.logout();
        assert!(!session.is_authenticated());
        assert_eq!(session.token(), None);
        assert_eq!(session.user(), None);
    }

    #[test]
    fn test_valid_token_leaves_session_unchanged() {
        let session = store();
        let token = token_with_exp(Some(future_exp()));
        session.set_token(&token).unwrap();
        session.set_user(&sample_user(Role::Interviewer)).unwrap();

        assert!(session.check_token_validity());
        assert_eq!(session.token(), Some(token));
        assert!(session.is_authenticated());
    }

    #[test]
    fn test_token_without_expiry_claim_is_valid() {
        let session = store();
        session.set_token(&token_with_exp(None)).unwrap();
        assert!(session.check_token_validity());
        assert!(session.token().is_some());
    }

    #[test]
    fn test_expired_token_clears_session() {
        let session = store();
        session.set_token(&token_with_exp(Some(past_exp()))).unwrap();
        session.set_user(&sample_user(Role::Interviewee)).unwrap();

        assert!(!session.check_token_validity());
        assert_eq!(session.token(), None);
        assert_eq!(session.user(), None);
    }

    #[test]
    fn test_malformed_token_clears_session() {
        let session = store();
        session.set_token("garbage").unwrap();
        session.set_user(&sample_user(Role::Interviewee)).unwrap();

        assert!(!session.check_token_validity());
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_missing_token_is_invalid() {
        let session = store();
        session.set_user(&sample_user(Role::Admin)).unwrap();

        assert!(!session.check_token_validity());
        // Stray user record is cleared along with the missing token
        assert_eq!(session.user(), None);
    }

    #[test]
    fn test_load_from_storage_restores_session() {
        let storage = Arc::new(MemoryCredentialStore::new());
        let token = token_with_exp(Some(future_exp()));

        {
            let session = SessionStore::new(storage.clone());
            session.set_token(&token).unwrap();
            session.set_user(&sample_user(Role::Interviewer)).unwrap();
        }

        let restored = SessionStore::new(storage);
        assert!(!restored.is_authenticated());
        restored.load_from_storage().unwrap();
        assert!(restored.is_authenticated());
        assert_eq!(restored.role(), Some(Role::Interviewer));
        assert_eq!(restored.token(), Some(token));
    }

    #[test]
    fn test_load_from_storage_is_idempotent() {
        let session = store();
        session.set_token(&token_with_exp(Some(future_exp()))).unwrap();
        session.set_user(&sample_user(Role::Admin)).unwrap();

        session.load_from_storage().unwrap();
        session.load_from_storage().unwrap();
        assert!(session.is_authenticated());
    }

    #[test]
    fn test_load_from_storage_skips_corrupt_user() {
        let storage = Arc::new(MemoryCredentialStore::new());
        storage.write(USER_KEY, "not json").unwrap();
        storage.write(TOKEN_KEY, "t.t.t").unwrap();

        let session = SessionStore::new(storage);
        session.load_from_storage().unwrap();
        assert!(session.token().is_some());
        assert_eq!(session.user(), None);
    }

    #[test]
    fn test_logout_clears_persistent_storage() {
        let storage = Arc::new(MemoryCredentialStore::new());
        let session = SessionStore::new(storage.clone());
        session.set_token(&token_with_exp(Some(future_exp()))).unwrap();
        session.set_user(&sample_user(Role::Admin)).unwrap();

        session.logout();
        assert_eq!(storage.read(TOKEN_KEY).unwrap(), None);
        assert_eq!(storage.read(USER_KEY).unwrap(), None);
    }
}
