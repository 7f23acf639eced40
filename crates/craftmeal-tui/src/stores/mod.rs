pub mod auth_store;
pub mod calendar_admin_store;
pub mod headcount_store;
pub mod location_store;
pub mod meals_store;
pub mod participation_store;
pub mod session_store;
pub mod ui_store;
pub mod users_store;

use crate::actions::Action;

pub use auth_store::AuthStore;
pub use calendar_admin_store::CalendarAdminStore;
pub use headcount_store::HeadcountStore;
pub use location_store::LocationStore;
pub use meals_store::MealsStore;
pub use participation_store::ParticipationStore;
pub use session_store::SessionStore;
pub use ui_store::UIStore;
pub use users_store::UsersStore;

/// All stores of the application, cloned freely since each one is a
/// handle over shared state
#[derive(Clone)]
pub struct Stores {
    pub session: SessionStore,
    pub ui: UIStore,
    pub auth: AuthStore,
    pub meals: MealsStore,
    pub location: LocationStore,
    pub calendar_admin: CalendarAdminStore,
    pub headcount: HeadcountStore,
    pub participation: ParticipationStore,
    pub users: UsersStore,
}

impl Stores {
    pub fn new() -> Self {
        Self {
            session: SessionStore::new(),
            ui: UIStore::new(),
            auth: AuthStore::new(),
            meals: MealsStore::new(),
            location: LocationStore::new(),
            calendar_admin: CalendarAdminStore::new(),
            headcount: HeadcountStore::new(),
            participation: ParticipationStore::new(),
            users: UsersStore::new(),
        }
    }

    /// Route an action through every reducer
    pub fn reduce_all(&self, action: &Action) {
        self.session.reduce(action);
        self.ui.reduce(action);
        self.auth.reduce(action);
        self.meals.reduce(action);
        self.location.reduce(action);
        self.calendar_admin.reduce(action);
        self.headcount.reduce(action);
        self.participation.reduce(action);
        self.users.reduce(action);
    }
}
