/// SessionStore holds the authenticated session, if any.
/// The session is an explicit value passed to whoever needs it, never a
/// module-level singleton.
use crate::actions::Action;
use craftmeal_core::session::Session;
use std::sync::{Arc, RwLock};

/// Store that holds the current session
#[derive(Clone)]
pub struct SessionStore {
    state: Arc<RwLock<Option<Session>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(None)),
        }
    }

    /// Get a snapshot of the current session
    pub fn get_state(&self) -> Option<Session> {
        self.state.read().unwrap().clone()
    }

    pub fn token(&self) -> Option<String> {
        self.state
            .read()
            .unwrap()
            .as_ref()
            .map(|s| s.token().to_string())
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.read().unwrap().is_some()
    }

    /// Reducer: handle an action and update state accordingly
    pub fn reduce(&self, action: &Action) {
        let mut state = self.state.write().unwrap();

        match action {
            Action::LoginSucceeded(session) => {
                *state = Some(session.clone());
            }

            // Logout and expiry both drop the session entirely
            Action::Logout | Action::SessionExpired => {
                *state = None;
            }

            _ => {
                // Ignore actions not relevant to this store
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use craftmeal_core::models::{Role, UserProfile};

    fn session() -> Session {
        Session::new(
            "tok-1".to_string(),
            UserProfile {
                id: 1,
                username: "jdoe".to_string(),
                name: "J. Doe".to_string(),
                email: "jdoe@example.com".to_string(),
                role: Role::Employee,
                team_id: Some(2),
            },
        )
    }

    #[test]
    fn test_initial_state_is_logged_out() {
        let store = SessionStore::new();
        assert!(!store.is_authenticated());
        assert_eq!(store.token(), None);
    }

    #[test]
    fn test_login_stores_session() {
        let store = SessionStore::new();
        store.reduce(&Action::LoginSucceeded(session()));

        assert!(store.is_authenticated());
        assert_eq!(store.token(), Some("tok-1".to_string()));
        assert_eq!(store.get_state().unwrap().user().username, "jdoe");
    }

    #[test]
    fn test_session_expired_clears_session() {
        let store = SessionStore::new();
        store.reduce(&Action::LoginSucceeded(session()));
        store.reduce(&Action::SessionExpired);

        assert!(!store.is_authenticated());
    }

    #[test]
    fn test_logout_clears_session() {
        let store = SessionStore::new();
        store.reduce(&Action::LoginSucceeded(session()));
        store.reduce(&Action::Logout);

        assert!(!store.is_authenticated());
    }
}
