/// AuthStore manages the sign-in and registration forms.
/// Keystrokes mutate the store directly; only the network round-trips go
/// through Actions.
use crate::actions::Action;
use crate::common::input::InputBox;
use craftmeal_core::models::{LoginRequest, RegisterRequest};
use craftmeal_core::validation::{self, FieldError, RegistrationForm};
use std::sync::{Arc, RwLock};

/// Fields of the login form, in focus order
pub const LOGIN_FIELDS: usize = 2;

/// Fields of the registration form, in focus order
pub const REGISTER_FIELDS: usize = 6;

/// Internal state for the auth forms
#[derive(Debug, Clone)]
pub struct AuthState {
    pub username: InputBox,
    pub password: InputBox,

    pub reg_username: InputBox,
    pub reg_email: InputBox,
    pub reg_name: InputBox,
    pub reg_password: InputBox,
    pub reg_confirm: InputBox,
    pub reg_team_id: InputBox,

    /// Index of the focused field on the active form
    pub focus: usize,

    /// Request in flight; submits are ignored until it settles
    pub busy: bool,

    /// Server-side rejection shown above the form
    pub server_error: Option<String>,

    /// Confirmation shown on the login page after a registration
    pub info_message: Option<String>,
}

impl Default for AuthState {
    fn default() -> Self {
        Self {
            username: InputBox::new("Username"),
            password: InputBox::new("Password").masked(),
            reg_username: InputBox::new("Username"),
            reg_email: InputBox::new("Email"),
            reg_name: InputBox::new("Full name"),
            reg_password: InputBox::new("Password").masked(),
            reg_confirm: InputBox::new("Confirm password").masked(),
            reg_team_id: InputBox::new("Team id"),
            focus: 0,
            busy: false,
            server_error: None,
            info_message: None,
        }
    }
}

/// Store that holds auth form state
#[derive(Clone)]
pub struct AuthStore {
    state: Arc<RwLock<AuthState>>,
}

impl AuthStore {
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(AuthState::default())),
        }
    }

    /// Get a read-only snapshot of the current state
    pub fn get_state(&self) -> AuthState {
        self.state.read().unwrap().clone()
    }

    /// Reducer: handle an action and update state accordingly
    pub fn reduce(&self, action: &Action) {
        let mut state = self.state.write().unwrap();

        match action {
            Action::LoginSucceeded(_) => {
                *state = AuthState::default();
            }

            Action::LoginFailed(message) => {
                state.busy = false;
                state.server_error = Some(message.clone());
            }

            Action::RegistrationSucceeded(message) => {
                // Back to a clean login form with the confirmation shown
                *state = AuthState::default();
                state.info_message = Some(message.clone());
            }

            Action::RegistrationFailed(message) => {
                state.busy = false;
                state.server_error = Some(message.clone());
            }

            Action::Navigate(_) => {
                state.focus = 0;
                state.server_error = None;
            }

            _ => {
                // Ignore actions not relevant to this store
            }
        }
    }

    pub fn focus_next(&self, field_count: usize) {
        let mut state = self.state.write().unwrap();
        state.focus = (state.focus + 1) % field_count;
    }

    pub fn focus_prev(&self, field_count: usize) {
        let mut state = self.state.write().unwrap();
        state.focus = (state.focus + field_count - 1) % field_count;
    }

    /// Apply an edit to the focused login field
    pub fn edit_login_field(&self, edit: impl FnOnce(&mut InputBox)) {
        let mut state = self.state.write().unwrap();
        let focus = state.focus;
        let field = match focus {
            0 => &mut state.username,
            _ => &mut state.password,
        };
        edit(field);
    }

    /// Apply an edit to the focused registration field
    pub fn edit_register_field(&self, edit: impl FnOnce(&mut InputBox)) {
        let mut state = self.state.write().unwrap();
        let focus = state.focus;
        let field = match focus {
            0 => &mut state.reg_username,
            1 => &mut state.reg_email,
            2 => &mut state.reg_name,
            3 => &mut state.reg_password,
            4 => &mut state.reg_confirm,
            _ => &mut state.reg_team_id,
        };
        edit(field);
    }

    /// Validate the login form. On success marks the store busy and
    /// returns the request to send; on failure pins errors to the fields.
    pub fn submit_login(&self) -> Option<LoginRequest> {
        let mut state = self.state.write().unwrap();
        if state.busy {
            return None;
        }
        state.server_error = None;
        state.info_message = None;

        let errors =
            validation::validate_login(state.username.value(), state.password.value());
        let username = state.username.value().to_string();
        let password = state.password.value().to_string();
        state.username.set_error(message_for(&errors, "username"));
        state.password.set_error(message_for(&errors, "password"));
        if !errors.is_empty() {
            return None;
        }
        state.busy = true;
        Some(LoginRequest { username, password })
    }

    /// Validate the registration form, same contract as submit_login
    pub fn submit_registration(&self) -> Option<RegisterRequest> {
        let mut state = self.state.write().unwrap();
        if state.busy {
            return None;
        }
        state.server_error = None;

        let team_id_raw = state.reg_team_id.value().trim().to_string();
        let team_id = team_id_raw.parse::<i64>().ok();
        let form = RegistrationForm {
            username: state.reg_username.value().to_string(),
            email: state.reg_email.value().to_string(),
            name: state.reg_name.value().to_string(),
            password: state.reg_password.value().to_string(),
            confirm_password: state.reg_confirm.value().to_string(),
            team_id,
        };
        let mut errors = validation::validate_registration(&form);
        if !team_id_raw.is_empty() && team_id.is_none() {
            errors.push(FieldError {
                field: "team_id",
                message: "Team ID must be a number".to_string(),
            });
        }
        state.reg_username.set_error(message_for(&errors, "username"));
        state.reg_email.set_error(message_for(&errors, "email"));
        state.reg_name.set_error(message_for(&errors, "name"));
        state.reg_password.set_error(message_for(&errors, "password"));
        state
            .reg_confirm
            .set_error(message_for(&errors, "confirm_password"));
        state.reg_team_id.set_error(message_for(&errors, "team_id"));
        if !errors.is_empty() {
            return None;
        }

        state.busy = true;
        Some(RegisterRequest {
            username: form.username,
            password: form.password,
            name: form.name,
            email: form.email,
            role: None,
            team_id,
        })
    }
}

fn message_for(errors: &[FieldError], field: &str) -> Option<String> {
    errors
        .iter()
        .find(|e| e.field == field)
        .map(|e| e.message.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_into(store: &AuthStore, login: bool, text: &str) {
        for c in text.chars() {
            if login {
                store.edit_login_field(|f| f.enter_char(c));
            } else {
                store.edit_register_field(|f| f.enter_char(c));
            }
        }
    }

    #[test]
    fn test_empty_login_pins_field_errors() {
        let store = AuthStore::new();
        assert!(store.submit_login().is_none());

        let state = store.get_state();
        assert!(state.username.error().is_some());
        assert!(state.password.error().is_some());
        assert!(!state.busy);
    }

    #[test]
    fn test_valid_login_marks_busy() {
        let store = AuthStore::new();
        type_into(&store, true, "jdoe");
        store.focus_next(LOGIN_FIELDS);
        type_into(&store, true, "Hunter22");

        let request = store.submit_login().unwrap();
        assert_eq!(request.username, "jdoe");
        assert!(store.get_state().busy);

        // Second submit while busy is swallowed
        assert!(store.submit_login().is_none());
    }

    #[test]
    fn test_login_failure_reopens_form() {
        let store = AuthStore::new();
        type_into(&store, true, "jdoe");
        store.focus_next(LOGIN_FIELDS);
        type_into(&store, true, "Hunter22");
        store.submit_login().unwrap();

        store.reduce(&Action::LoginFailed("Invalid credentials".to_string()));
        let state = store.get_state();
        assert!(!state.busy);
        assert_eq!(state.server_error.as_deref(), Some("Invalid credentials"));
    }

    #[test]
    fn test_registration_success_resets_to_login_with_message() {
        let store = AuthStore::new();
        store.reduce(&Action::RegistrationSucceeded(
            "Registration submitted. An admin will approve your account.".to_string(),
        ));
        let state = store.get_state();
        assert!(state.info_message.is_some());
        assert_eq!(state.reg_username.value(), "");
    }

    #[test]
    fn test_registration_validation_rejects_weak_password() {
        let store = AuthStore::new();
        type_into(&store, false, "jdoe");
        store.focus_next(REGISTER_FIELDS);
        type_into(&store, false, "jdoe@example.com");
        store.focus_next(REGISTER_FIELDS);
        type_into(&store, false, "J. Doe");
        store.focus_next(REGISTER_FIELDS);
        type_into(&store, false, "weakpass");
        store.focus_next(REGISTER_FIELDS);
        type_into(&store, false, "weakpass");

        assert!(store.submit_registration().is_none());
        assert!(store.get_state().reg_password.error().is_some());
    }

    #[test]
    fn test_focus_wraps() {
        let store = AuthStore::new();
        store.focus_prev(LOGIN_FIELDS);
        assert_eq!(store.get_state().focus, 1);
        store.focus_next(LOGIN_FIELDS);
        assert_eq!(store.get_state().focus, 0);
    }
}
