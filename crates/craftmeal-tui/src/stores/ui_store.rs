/// UIStore manages UI-specific state (current route, toasts, help overlay)
use crate::actions::{Action, Route, ToastLevel};
use craftmeal_core::get_craftmeal_setting;
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

/// A transient notification shown in the corner of the screen
#[derive(Debug, Clone)]
pub struct Toast {
    pub level: ToastLevel,
    pub message: String,
    pub created_at: Instant,
}

/// Internal state for UI
#[derive(Debug, Clone)]
pub struct UIState {
    /// Currently displayed page
    pub route: Route,

    /// Whether help overlay is visible
    pub show_help: bool,

    /// Toasts not yet expired, oldest first
    pub toasts: Vec<Toast>,

    /// Whether the application should exit
    pub should_exit: bool,
}

impl Default for UIState {
    fn default() -> Self {
        Self {
            route: Route::Login,
            show_help: false,
            toasts: Vec::new(),
            should_exit: false,
        }
    }
}

/// Store that holds UI-related state
#[derive(Clone)]
pub struct UIStore {
    state: Arc<RwLock<UIState>>,
    toast_ttl: Duration,
}

impl UIStore {
    pub fn new() -> Self {
        let ttl_ms = get_craftmeal_setting!(CRAFTMEAL_TOAST_TTL_MS, usize);
        Self {
            state: Arc::new(RwLock::new(UIState::default())),
            toast_ttl: Duration::from_millis(ttl_ms as u64),
        }
    }

    /// Get a read-only snapshot of the current state
    pub fn get_state(&self) -> UIState {
        self.state.read().unwrap().clone()
    }

    /// Reducer: handle an action and update state accordingly
    pub fn reduce(&self, action: &Action) {
        let mut state = self.state.write().unwrap();

        match action {
            Action::Navigate(route) => {
                state.route = *route;
                state.show_help = false;
            }

            Action::ToggleHelp => {
                state.show_help = !state.show_help;
            }

            Action::LoginSucceeded(_) => {
                state.route = Route::Meals;
            }

            Action::ShowToast(level, message) => {
                state.toasts.push(Toast {
                    level: *level,
                    message: message.clone(),
                    created_at: Instant::now(),
                });
            }

            // Expiry wins over whatever page was showing
            Action::SessionExpired | Action::Logout => {
                state.route = Route::Login;
                state.show_help = false;
            }

            Action::Quit => {
                state.should_exit = true;
            }

            _ => {
                // Ignore actions not relevant to this store
            }
        }
    }

    /// Drop toasts older than the TTL; called once per render tick
    pub fn expire_toasts(&self) {
        let mut state = self.state.write().unwrap();
        let ttl = self.toast_ttl;
        state.toasts.retain(|t| t.created_at.elapsed() < ttl);
    }

    /// Check if the application should exit
    pub fn should_exit(&self) -> bool {
        self.state.read().unwrap().should_exit
    }
}
