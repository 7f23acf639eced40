/// UsersStore manages the admin user-management page: pending approvals
/// and the full user roster.
use crate::actions::Action;
use craftmeal_core::models::{PendingUser, Role, UserProfile};
use std::sync::{Arc, RwLock};

/// Which list of the users page has keyboard focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UsersTab {
    Pending,
    All,
}

/// Internal state for the users page
#[derive(Debug, Clone)]
pub struct UsersState {
    pub pending: Vec<PendingUser>,
    pub users: Vec<UserProfile>,

    pub tab: UsersTab,
    pub pending_index: usize,
    pub users_index: usize,

    pub is_loading: bool,
    pub error: Option<String>,
}

impl Default for UsersState {
    fn default() -> Self {
        Self {
            pending: Vec::new(),
            users: Vec::new(),
            tab: UsersTab::Pending,
            pending_index: 0,
            users_index: 0,
            is_loading: false,
            error: None,
        }
    }
}

/// Store that holds user administration state
#[derive(Clone)]
pub struct UsersStore {
    state: Arc<RwLock<UsersState>>,
}

impl UsersStore {
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(UsersState::default())),
        }
    }

    /// Get a read-only snapshot of the current state
    pub fn get_state(&self) -> UsersState {
        self.state.read().unwrap().clone()
    }

    /// Reducer: handle an action and update state accordingly
    pub fn reduce(&self, action: &Action) {
        let mut state = self.state.write().unwrap();

        match action {
            Action::LoadUsers => {
                state.is_loading = true;
                state.error = None;
            }

            Action::PendingUsersLoaded(pending) => {
                state.pending = pending.clone();
                state.pending_index = state
                    .pending_index
                    .min(state.pending.len().saturating_sub(1));
                state.is_loading = false;
            }

            Action::UsersLoaded(users) => {
                state.users = users.clone();
                state.users_index = state.users_index.min(state.users.len().saturating_sub(1));
                state.is_loading = false;
            }

            Action::UsersLoadFailed(error) => {
                state.is_loading = false;
                state.error = Some(error.clone());
            }

            Action::Logout | Action::SessionExpired => {
                *state = UsersState::default();
            }

            _ => {
                // Ignore actions not relevant to this store; the lists are
                // reloaded after every admin mutation
            }
        }
    }

    pub fn switch_tab(&self) {
        let mut state = self.state.write().unwrap();
        state.tab = match state.tab {
            UsersTab::Pending => UsersTab::All,
            UsersTab::All => UsersTab::Pending,
        };
    }

    pub fn cursor_up(&self) {
        let mut state = self.state.write().unwrap();
        match state.tab {
            UsersTab::Pending => state.pending_index = state.pending_index.saturating_sub(1),
            UsersTab::All => state.users_index = state.users_index.saturating_sub(1),
        }
    }

    pub fn cursor_down(&self) {
        let mut state = self.state.write().unwrap();
        match state.tab {
            UsersTab::Pending => {
                if state.pending_index + 1 < state.pending.len() {
                    state.pending_index += 1;
                }
            }
            UsersTab::All => {
                if state.users_index + 1 < state.users.len() {
                    state.users_index += 1;
                }
            }
        }
    }

    /// Id of the pending user under the cursor
    pub fn selected_pending_id(&self) -> Option<i64> {
        let state = self.state.read().unwrap();
        if state.tab != UsersTab::Pending {
            return None;
        }
        state.pending.get(state.pending_index).map(|u| u.id)
    }

    /// The user under the cursor on the all-users tab
    pub fn selected_user(&self) -> Option<UserProfile> {
        let state = self.state.read().unwrap();
        if state.tab != UsersTab::All {
            return None;
        }
        state.users.get(state.users_index).cloned()
    }

    /// Next role in the cycle used by the role-change key
    pub fn next_role(role: Role) -> Role {
        match role {
            Role::Employee => Role::TeamLead,
            Role::TeamLead => Role::Admin,
            Role::Admin => Role::Logistics,
            Role::Logistics => Role::Employee,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pending(id: i64, name: &str) -> PendingUser {
        PendingUser {
            id,
            username: name.to_lowercase(),
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            role: Role::Employee,
            team_id: None,
        }
    }

    fn user(id: i64, name: &str, role: Role) -> UserProfile {
        UserProfile {
            id,
            username: name.to_lowercase(),
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            role,
            team_id: Some(1),
        }
    }

    #[test]
    fn test_selection_respects_active_tab() {
        let store = UsersStore::new();
        store.reduce(&Action::PendingUsersLoaded(vec![pending(5, "Eve")]));
        store.reduce(&Action::UsersLoaded(vec![user(1, "Alice", Role::Admin)]));

        assert_eq!(store.selected_pending_id(), Some(5));
        assert!(store.selected_user().is_none());

        store.switch_tab();
        assert!(store.selected_pending_id().is_none());
        assert_eq!(store.selected_user().map(|u| u.id), Some(1));
    }

    #[test]
    fn test_approval_shrinking_list_clamps_cursor() {
        let store = UsersStore::new();
        store.reduce(&Action::PendingUsersLoaded(vec![
            pending(5, "Eve"),
            pending(6, "Frank"),
        ]));
        store.cursor_down();
        assert_eq!(store.selected_pending_id(), Some(6));

        // Reload after an approval removed the second entry
        store.reduce(&Action::PendingUsersLoaded(vec![pending(5, "Eve")]));
        assert_eq!(store.selected_pending_id(), Some(5));
    }

    #[test]
    fn test_role_cycle_covers_all_roles() {
        let mut role = Role::Employee;
        let mut seen = vec![role];
        for _ in 0..3 {
            role = UsersStore::next_role(role);
            seen.push(role);
        }
        assert_eq!(UsersStore::next_role(role), Role::Employee);
        seen.dedup();
        assert_eq!(seen.len(), 4);
    }
}
