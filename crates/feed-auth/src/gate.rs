//! Demo login gate.

use crate::store::SessionStore;
use crate::AuthError;

/// Accepted username.
pub const DEMO_USERNAME: &str = "demo";

/// Accepted password.
pub const DEMO_PASSWORD: &str = "tacticalreport";

/// Storage key of the session flag.
pub const SESSION_KEY: &str = "tr_session";

/// Stored flag value for a logged-in session.
pub const SESSION_VALUE: &str = "authenticated";

/// Login gate over a [`SessionStore`].
pub struct AuthGate<S> {
    store: S,
}

impl<S: SessionStore> AuthGate<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Check the credential pair and set the session flag on success.
    ///
    /// Surrounding whitespace is ignored. Wrong credentials return `Ok(false)`
    /// and leave the flag untouched.
    pub fn login(&self, username: &str, password: &str) -> Result<bool, AuthError> {
        let valid = username.trim() == DEMO_USERNAME && password.trim() == DEMO_PASSWORD;
        if !valid {
            tracing::info!(username = username.trim(), "login rejected");
            return Ok(false);
        }

        self.store.set(SESSION_KEY, SESSION_VALUE)?;
        tracing::info!(username = DEMO_USERNAME, "logged in");
        Ok(true)
    }

    /// Clear the session flag.
    pub fn logout(&self) -> Result<(), AuthError> {
        self.store.remove(SESSION_KEY)?;
        tracing::info!("logged out");
        Ok(())
    }

    /// Whether the stored flag equals [`SESSION_VALUE`].
    pub fn is_authenticated(&self) -> Result<bool, AuthError> {
        Ok(self.store.get(SESSION_KEY)?.as_deref() == Some(SESSION_VALUE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{FileStore, MemoryStore};

    #[test]
    fn test_login_with_demo_credentials() {
        let gate = AuthGate::new(MemoryStore::new());
        assert!(!gate.is_authenticated().unwrap());

        assert!(gate.login("demo", "tacticalreport").unwrap());
        assert!(gate.is_authenticated().unwrap());
        assert_eq!(
            gate.store().get(SESSION_KEY).unwrap().as_deref(),
            Some("authenticated")
        );
    }

    #[test]
    fn test_login_rejects_other_credentials() {
        let gate = AuthGate::new(MemoryStore::new());
        assert!(!gate.login("demo", "wrong").unwrap());
        assert!(!gate.login("admin", "tacticalreport").unwrap());
        assert!(!gate.login("", "").unwrap());
        assert!(!gate.is_authenticated().unwrap());
        assert_eq!(gate.store().get(SESSION_KEY).unwrap(), None);
    }

    #[test]
    fn test_login_trims_input() {
        let gate = AuthGate::new(MemoryStore::new());
        assert!(gate.login("  demo ", "tacticalreport\n").unwrap());
    }

    #[test]
    fn test_logout_clears_flag() {
        let gate = AuthGate::new(MemoryStore::new());
        gate.login("demo", "tacticalreport").unwrap();
        gate.logout().unwrap();
        assert!(!gate.is_authenticated().unwrap());
    }

    #[test]
    fn test_unexpected_flag_value_is_not_authenticated() {
        let gate = AuthGate::new(MemoryStore::new());
        gate.store().set(SESSION_KEY, "yes").unwrap();
        assert!(!gate.is_authenticated().unwrap());
    }

    #[test]
    fn test_flag_persists_across_gates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        AuthGate::new(FileStore::open(&path))
            .login("demo", "tacticalreport")
            .unwrap();
        assert!(AuthGate::new(FileStore::open(&path))
            .is_authenticated()
            .unwrap());
    }
}
