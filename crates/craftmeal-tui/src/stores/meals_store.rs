/// MealsStore manages today's meal participation and the user's unsaved
/// edits to it.
use crate::actions::Action;
use craftmeal_core::models::{MealRecord, MealSet, MealType, ParticipationUpdate, empty_meal_set};
use std::sync::{Arc, RwLock};

/// Internal state for the meals page
#[derive(Debug, Clone)]
pub struct MealsState {
    /// Last record confirmed by the backend
    pub record: Option<MealRecord>,

    /// Local working copy the user toggles before saving
    pub edits: MealSet,

    /// Cursor over the meal list, indexes MealType::ALL
    pub cursor: usize,

    pub is_loading: bool,
    pub is_saving: bool,

    /// Error message if loading failed
    pub error: Option<String>,
}

impl Default for MealsState {
    fn default() -> Self {
        Self {
            record: None,
            edits: empty_meal_set(),
            cursor: 0,
            is_loading: false,
            is_saving: false,
            error: None,
        }
    }
}

impl MealsState {
    /// Whether the working copy differs from the confirmed record
    pub fn is_dirty(&self) -> bool {
        match &self.record {
            Some(record) => record.meals != self.edits,
            None => false,
        }
    }
}

/// Store that holds meal participation state
#[derive(Clone)]
pub struct MealsStore {
    state: Arc<RwLock<MealsState>>,
}

impl MealsStore {
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(MealsState::default())),
        }
    }

    /// Get a read-only snapshot of the current state
    pub fn get_state(&self) -> MealsState {
        self.state.read().unwrap().clone()
    }

    /// Reducer: handle an action and update state accordingly
    pub fn reduce(&self, action: &Action) {
        let mut state = self.state.write().unwrap();

        match action {
            Action::LoadTodaysMeals => {
                state.is_loading = true;
                state.error = None;
            }

            Action::TodaysMealsLoaded(record) => {
                state.edits = record.meals.clone();
                state.record = Some(record.clone());
                state.is_loading = false;
                state.error = None;
            }

            Action::TodaysMealsLoadFailed(error) => {
                state.is_loading = false;
                state.error = Some(error.clone());
            }

            Action::SaveMeals(_) => {
                state.is_saving = true;
            }

            Action::MealsSaved(record) => {
                state.edits = record.meals.clone();
                state.record = Some(record.clone());
                state.is_saving = false;
            }

            // Cutoff rejection: show it and discard the local edits, the
            // backend will not accept them today
            Action::MealsSaveRejected(_) => {
                if let Some(record) = &state.record {
                    state.edits = record.meals.clone();
                }
                state.is_saving = false;
            }

            // Transient failure: keep the edits so the user can retry
            Action::MealsSaveFailed(_) => {
                state.is_saving = false;
            }

            Action::Logout | Action::SessionExpired => {
                *state = MealsState::default();
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
        if state.cursor + 1 < MealType::ALL.len() {
            state.cursor += 1;
        }
    }

    /// Flip the meal under the cursor in the working copy
    pub fn toggle_selected(&self) {
        let mut state = self.state.write().unwrap();
        if state.record.is_none() {
            return;
        }
        let meal = MealType::ALL[state.cursor];
        let flipped = !state.edits.get(&meal).copied().unwrap_or(false);
        state.edits.insert(meal, flipped);
    }

    /// Payload for the save round-trip, None when there is nothing to
    /// save. Marks the store saving so a repeated submit is swallowed.
    pub fn save_payload(&self) -> Option<ParticipationUpdate> {
        let mut state = self.state.write().unwrap();
        if state.is_saving || !state.is_dirty() {
            return None;
        }
        let date = state.record.as_ref()?.date.clone();
        state.is_saving = true;
        Some(ParticipationUpdate {
            date,
            meals: state.edits.clone(),
        })
    }
}
