/// ParticipationStore manages the cross-user participation table and the
/// inline editor admins use to change another user's meals.
use crate::actions::Action;
use craftmeal_core::models::{MealSet, MealType, ParticipationAdminUpdate, UserParticipation};
use std::sync::{Arc, RwLock};

/// Internal state for the participation admin page
#[derive(Debug, Clone)]
pub struct ParticipationState {
    pub rows: Vec<UserParticipation>,

    /// Cursor over the table rows
    pub cursor: usize,

    /// Open editor: target user id and the meal set being edited
    pub editor: Option<EditorState>,

    pub is_loading: bool,
    pub is_saving: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone)]
pub struct EditorState {
    pub user_id: i64,
    pub name: String,
    pub meals: MealSet,
    pub meal_cursor: usize,
}

impl Default for ParticipationState {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            cursor: 0,
            editor: None,
            is_loading: false,
            is_saving: false,
            error: None,
        }
    }
}

/// Store that holds cross-user participation state
#[derive(Clone)]
pub struct ParticipationStore {
    state: Arc<RwLock<ParticipationState>>,
}

impl ParticipationStore {
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(ParticipationState::default())),
        }
    }

    /// Get a read-only snapshot of the current state
    pub fn get_state(&self) -> ParticipationState {
        self.state.read().unwrap().clone()
    }

    /// Reducer: handle an action and update state accordingly
    pub fn reduce(&self, action: &Action) {
        let mut state = self.state.write().unwrap();

        match action {
            Action::LoadParticipation => {
                state.is_loading = true;
                state.error = None;
            }

            Action::ParticipationLoaded(rows) => {
                state.rows = rows.clone();
                state.is_loading = false;
                state.cursor = state.cursor.min(state.rows.len().saturating_sub(1));
            }

            Action::ParticipationLoadFailed(error) => {
                state.is_loading = false;
                state.error = Some(error.clone());
            }

            Action::SaveParticipationEdit(_) => {
                state.is_saving = true;
            }

            Action::ParticipationUpdated(updated) => {
                if let Some(row) = state.rows.iter_mut().find(|r| r.user_id == updated.user_id)
                {
                    row.meals = updated.meals.clone();
                }
                state.editor = None;
                state.is_saving = false;
            }

            Action::ParticipationUpdateFailed(error) => {
                state.is_saving = false;
                state.error = Some(error.clone());
            }

            Action::Logout | Action::SessionExpired => {
                *state = ParticipationState::default();
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
        if state.cursor + 1 < state.rows.len() {
            state.cursor += 1;
        }
    }

    /// Open the editor for the row under the cursor
    pub fn open_editor(&self) {
        let mut state = self.state.write().unwrap();
        let Some(row) = state.rows.get(state.cursor) else {
            return;
        };
        state.editor = Some(EditorState {
            user_id: row.user_id,
            name: row.name.clone(),
            meals: row.meals.clone(),
            meal_cursor: 0,
        });
    }

    pub fn close_editor(&self) {
        self.state.write().unwrap().editor = None;
    }

    pub fn editor_is_open(&self) -> bool {
        self.state.read().unwrap().editor.is_some()
    }

    pub fn editor_cursor_up(&self) {
        let mut state = self.state.write().unwrap();
        if let Some(editor) = &mut state.editor {
            editor.meal_cursor = editor.meal_cursor.saturating_sub(1);
        }
    }

    pub fn editor_cursor_down(&self) {
        let mut state = self.state.write().unwrap();
        if let Some(editor) = &mut state.editor {
            if editor.meal_cursor + 1 < MealType::ALL.len() {
                editor.meal_cursor += 1;
            }
        }
    }

    /// Flip the meal under the editor cursor
    pub fn editor_toggle(&self) {
        let mut state = self.state.write().unwrap();
        if let Some(editor) = &mut state.editor {
            let meal = MealType::ALL[editor.meal_cursor];
            let flipped = !editor.meals.get(&meal).copied().unwrap_or(false);
            editor.meals.insert(meal, flipped);
        }
    }

    /// Payload for the admin update round-trip. Marks the store saving so
    /// a repeated submit is swallowed.
    pub fn save_payload(&self) -> Option<ParticipationAdminUpdate> {
        let mut state = self.state.write().unwrap();
        if state.is_saving {
            return None;
        }
        let payload = state.editor.as_ref().map(|editor| ParticipationAdminUpdate {
            target_user_id: editor.user_id,
            meals: editor.meals.clone(),
        })?;
        state.is_saving = true;
        Some(payload)
    }
}
