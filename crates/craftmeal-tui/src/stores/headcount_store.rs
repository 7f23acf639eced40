/// HeadcountStore manages the aggregate meal counts and the expandable
/// per-meal user lists.
use crate::actions::Action;
use craftmeal_core::models::{HeadcountSummary, MealUserList};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Internal state for the headcount page
#[derive(Debug, Clone, Default)]
pub struct HeadcountState {
    pub summary: Option<HeadcountSummary>,

    /// Cursor over the summary rows
    pub cursor: usize,

    /// Meal type whose user list is expanded, if any
    pub expanded: Option<String>,

    /// Fetched user lists, keyed by meal type
    pub user_lists: HashMap<String, MealUserList>,

    pub is_loading: bool,
    pub error: Option<String>,
}

/// Store that holds headcount state
#[derive(Clone)]
pub struct HeadcountStore {
    state: Arc<RwLock<HeadcountState>>,
}

impl HeadcountStore {
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(HeadcountState::default())),
        }
    }

    /// Get a read-only snapshot of the current state
    pub fn get_state(&self) -> HeadcountState {
        self.state.read().unwrap().clone()
    }

    /// Reducer: handle an action and update state accordingly
    pub fn reduce(&self, action: &Action) {
        let mut state = self.state.write().unwrap();

        match action {
            Action::LoadHeadcount => {
                state.is_loading = true;
                state.error = None;
                state.expanded = None;
                state.user_lists.clear();
            }

            Action::HeadcountLoaded(summary) => {
                state.summary = Some(summary.clone());
                state.is_loading = false;
                state.cursor = 0;
            }

            Action::HeadcountLoadFailed(error) => {
                state.is_loading = false;
                state.error = Some(error.clone());
            }

            // Selecting the expanded meal again collapses it
            Action::SelectHeadcountMeal(meal_type) => {
                if state.expanded.as_deref() == Some(meal_type.as_str()) {
                    state.expanded = None;
                } else {
                    state.expanded = Some(meal_type.clone());
                }
            }

            Action::MealUsersLoaded(list) => {
                state.user_lists.insert(list.meal_type.clone(), list.clone());
            }

            Action::MealUsersLoadFailed(error) => {
                state.error = Some(error.clone());
            }

            Action::Logout | Action::SessionExpired => {
                *state = HeadcountState::default();
            }

            _ => {
                // Ignore actions not relevant to this store
            }
        }
    }

    pub fn cursor_up(&self) {
        let mut state = self.state.write().unwrap();
        state.cursor = state.cursor.saturating_sub(1);
    }

    pub fn cursor_down(&self) {
        let mut state = self.state.write().unwrap();
        let rows = state
            .summary
            .as_ref()
            .map(|s| s.meal_counts.len())
            .unwrap_or(0);
        if state.cursor + 1 < rows {
            state.cursor += 1;
        }
    }

    /// Meal type under the cursor
    pub fn selected_meal(&self) -> Option<String> {
        let state = self.state.read().unwrap();
        state
            .summary
            .as_ref()
            .and_then(|s| s.meal_counts.get(state.cursor))
            .map(|c| c.meal_type.clone())
    }

    /// Whether the user list for this meal still needs fetching
    pub fn needs_user_list(&self, meal_type: &str) -> bool {
        let state = self.state.read().unwrap();
        state.expanded.as_deref() == Some(meal_type) && !state.user_lists.contains_key(meal_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use craftmeal_core::models::MealCountSummary;

    fn summary() -> HeadcountSummary {
        HeadcountSummary {
            date: "2026-02-10".to_string(),
            total_employees: 40,
            meal_counts: vec![
                MealCountSummary {
                    meal_type: "Lunch".to_string(),
                    total_employees: 40,
                    opted_in: 30,
                    opted_out: 10,
                    opted_in_percentage: 75.0,
                    opted_out_percentage: 25.0,
                },
                MealCountSummary {
                    meal_type: "Snacks".to_string(),
                    total_employees: 40,
                    opted_in: 12,
                    opted_out: 28,
                    opted_in_percentage: 30.0,
                    opted_out_percentage: 70.0,
                },
            ],
        }
    }

    #[test]
    fn test_select_expands_then_collapses() {
        let store = HeadcountStore::new();
        store.reduce(&Action::HeadcountLoaded(summary()));

        store.reduce(&Action::SelectHeadcountMeal("Lunch".to_string()));
        assert_eq!(store.get_state().expanded.as_deref(), Some("Lunch"));
        assert!(store.needs_user_list("Lunch"));

        store.reduce(&Action::SelectHeadcountMeal("Lunch".to_string()));
        assert_eq!(store.get_state().expanded, None);
    }

    #[test]
    fn test_user_list_is_cached() {
        let store = HeadcountStore::new();
        store.reduce(&Action::SelectHeadcountMeal("Lunch".to_string()));
        store.reduce(&Action::MealUsersLoaded(MealUserList {
            meal_type: "Lunch".to_string(),
            date: "2026-02-10".to_string(),
            opted_in_count: 30,
            users: vec![],
        }));
        assert!(!store.needs_user_list("Lunch"));
    }

    #[test]
    fn test_reload_drops_expanded_lists() {
        let store = HeadcountStore::new();
        store.reduce(&Action::HeadcountLoaded(summary()));
        store.reduce(&Action::SelectHeadcountMeal("Lunch".to_string()));
        store.reduce(&Action::LoadHeadcount);

        let state = store.get_state();
        assert_eq!(state.expanded, None);
        assert!(state.user_lists.is_empty());
        assert!(state.is_loading);
    }

    #[test]
    fn test_cursor_follows_rows() {
        let store = HeadcountStore::new();
        store.reduce(&Action::HeadcountLoaded(summary()));
        store.cursor_down();
        assert_eq!(store.selected_meal().as_deref(), Some("Snacks"));
        store.cursor_down();
        assert_eq!(store.selected_meal().as_deref(), Some("Snacks"));
    }
}
