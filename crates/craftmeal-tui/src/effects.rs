/// Effects module handles side effects (network calls against the REST
/// backend). Effects are triggered by Actions and dispatch new Actions
/// with results.
///
/// Every authenticated call funnels its error through `settle`, which
/// turns a 401 into SessionExpired no matter which endpoint produced it.
use crate::actions::{Action, Route};
use crate::dispatcher::Dispatcher;
use crate::stores::{HeadcountStore, LocationStore, SessionStore};
use craftmeal_api::{ApiClient, ApiError};
use craftmeal_core::models::{ApproveUserRequest, UserAdminUpdate, date_key};
use craftmeal_core::session::Session;
use tokio::task;

/// Effects handler that executes side effects based on actions
pub struct Effects {
    dispatcher: Dispatcher,
    client: ApiClient,
    session_store: SessionStore,
    location_store: Option<LocationStore>,
    headcount_store: Option<HeadcountStore>,
}

impl Effects {
    pub fn new(dispatcher: Dispatcher, client: ApiClient, session_store: SessionStore) -> Self {
        Self {
            dispatcher,
            client,
            session_store,
            location_store: None,
            headcount_store: None,
        }
    }

    pub fn set_location_store(&mut self, store: LocationStore) {
        self.location_store = Some(store);
    }

    pub fn set_headcount_store(&mut self, store: HeadcountStore) {
        self.headcount_store = Some(store);
    }

    /// Client carrying the current session's bearer token
    fn authed(&self) -> ApiClient {
        self.client.with_token(self.session_store.token())
    }

    /// Handle an action and execute any necessary side effects
    pub fn handle(&self, action: &Action) {
        match action {
            Action::SubmitLogin(request) => self.login(request.clone()),
            Action::SubmitRegistration(request) => self.register(request.clone()),

            // Entering a page kicks off its data loads
            Action::Navigate(route) => self.load_route(*route),
            Action::LoginSucceeded(_) => self.load_route(Route::Meals),

            Action::LoadTodaysMeals => self.fetch_todays_meals(),
            Action::SaveMeals(update) => self.save_meals(update.clone()),

            Action::LoadVisibleMonth => self.fetch_visible_month(),
            Action::ChooseLocation { date, location } => {
                self.update_location(date.clone(), *location)
            }

            Action::LoadCalendarAdmin => self.fetch_calendar_admin(),
            Action::CreateWfhPeriod(create) => self.create_wfh_period(create.clone()),
            Action::DeleteWfhPeriod(id) => self.delete_wfh_period(*id),
            Action::SubmitSpecialDay(create) => self.create_special_day(create.clone()),
            Action::DeleteSpecialDay(id) => self.delete_special_day(*id),

            Action::LoadHeadcount => self.fetch_headcount(),
            Action::SelectHeadcountMeal(meal_type) => self.fetch_meal_users(meal_type.clone()),

            Action::LoadParticipation => self.fetch_participation(),
            Action::SaveParticipationEdit(update) => self.save_participation(update.clone()),

            Action::LoadUsers => self.fetch_users(),
            Action::ApproveUser(id) => self.approve_user(*id),
            Action::RejectUser(id) => self.reject_user(*id),
            Action::DeleteUser(id) => self.delete_user(*id),
            Action::SetUserRole(id, role) => self.set_user_role(*id, *role),

            // Admin user mutations settle here; reload both lists
            Action::UserActionCompleted(_) => {
                self.dispatcher.dispatch(Action::LoadUsers);
            }

            _ => {
                // Most actions don't require side effects
            }
        }
    }

    fn load_route(&self, route: Route) {
        let action = match route {
            Route::Meals => Some(Action::LoadTodaysMeals),
            Route::MyLocation => Some(Action::LoadVisibleMonth),
            Route::CalendarAdmin => Some(Action::LoadCalendarAdmin),
            Route::Headcount => Some(Action::LoadHeadcount),
            Route::Participation => Some(Action::LoadParticipation),
            Route::Users => Some(Action::LoadUsers),
            Route::Login | Route::Register => None,
        };
        if let Some(action) = action {
            self.dispatcher.dispatch(action);
        }
    }

    fn login(&self, request: craftmeal_core::models::LoginRequest) {
        let dispatcher = self.dispatcher.clone();
        let client = self.client.clone();

        task::spawn(async move {
            log::info!("Logging in as {}", request.username);
            match client.login(&request).await {
                Ok(response) => {
                    let session = Session::new(response.access_token, response.user);
                    dispatcher.dispatch(Action::LoginSucceeded(session));
                }
                // A 401 here is just wrong credentials, not an expired
                // session
                Err(ApiError::Unauthorized) => {
                    dispatcher.dispatch(Action::LoginFailed(
                        "Invalid username or password".to_string(),
                    ));
                }
                Err(e) => {
                    log::error!("Login failed: {}", e);
                    dispatcher.dispatch(Action::LoginFailed(e.user_message()));
                }
            }
        });
    }

    fn register(&self, request: craftmeal_core::models::RegisterRequest) {
        let dispatcher = self.dispatcher.clone();
        let client = self.client.clone();

        task::spawn(async move {
            match client.register(&request).await {
                Ok(response) => {
                    dispatcher.dispatch(Action::RegistrationSucceeded(response.message));
                    dispatcher.dispatch(Action::Navigate(Route::Login));
                }
                Err(e) => {
                    log::error!("Registration failed: {}", e);
                    dispatcher.dispatch(Action::RegistrationFailed(e.user_message()));
                }
            }
        });
    }

    fn fetch_todays_meals(&self) {
        let dispatcher = self.dispatcher.clone();
        let client = self.authed();

        task::spawn(async move {
            match client.todays_participation().await {
                Ok(record) => dispatcher.dispatch(Action::TodaysMealsLoaded(record)),
                Err(e) => settle(&dispatcher, e, Action::TodaysMealsLoadFailed),
            }
        });
    }

    fn save_meals(&self, update: craftmeal_core::models::ParticipationUpdate) {
        let dispatcher = self.dispatcher.clone();
        let client = self.authed();

        task::spawn(async move {
            match client.update_participation(&update).await {
                Ok(record) => {
                    dispatcher.dispatch(Action::MealsSaved(record));
                    dispatcher.dispatch(Action::success_toast("Meal choices saved"));
                }
                // Cutoff rejection: worth a warning, not an error, and
                // never retried
                Err(ApiError::Forbidden(detail)) => {
                    dispatcher.dispatch(Action::warning_toast(detail.clone()));
                    dispatcher.dispatch(Action::MealsSaveRejected(detail));
                }
                Err(e) => settle(&dispatcher, e, Action::MealsSaveFailed),
            }
        });
    }

    /// Fetch location and special-day status for every day of the visible
    /// month. Each response carries the generation the fetch started with,
    /// so the store can drop results for a month the user already left.
    fn fetch_visible_month(&self) {
        let Some(store) = &self.location_store else {
            return;
        };
        let (grid, generation) = store.fetch_target();
        let dispatcher = self.dispatcher.clone();
        let client = self.authed();

        task::spawn(async move {
            log::debug!("Fetching month {} (generation {})", grid.name(), generation);
            for day in 1..=grid.days_in_month() {
                let Some(date) = grid.date(day) else { continue };
                let key = date_key(date);
                let location = client.my_location(&key);
                let check = client.check_special_day(&key);
                match tokio::join!(location, check) {
                    (Ok(record), Ok(check)) => {
                        dispatcher.dispatch(Action::MonthDayLoaded {
                            generation,
                            date: key,
                            location: record.location,
                            check,
                        });
                    }
                    (Err(e), _) | (_, Err(e)) => {
                        settle(&dispatcher, e, Action::MonthLoadFailed);
                        // The rest of the month would fail the same way
                        return;
                    }
                }
            }
        });

        let dispatcher = self.dispatcher.clone();
        let client = self.authed();
        task::spawn(async move {
            match client.wfh_periods().await {
                Ok(periods) => dispatcher.dispatch(Action::WfhPeriodsLoaded(periods)),
                Err(e) => settle(&dispatcher, e, Action::WfhPeriodsLoadFailed),
            }
        });
    }

    fn update_location(&self, date: String, location: craftmeal_core::models::WorkLocation) {
        let dispatcher = self.dispatcher.clone();
        let client = self.authed();

        task::spawn(async move {
            let update = craftmeal_core::models::LocationUpdate { date, location };
            match client.update_my_location(&update).await {
                Ok(record) => {
                    dispatcher.dispatch(Action::LocationUpdated(record));
                    dispatcher.dispatch(Action::success_toast("Location updated"));
                }
                Err(e) => settle(&dispatcher, e, Action::LocationUpdateFailed),
            }
        });
    }

    fn fetch_calendar_admin(&self) {
        let dispatcher = self.dispatcher.clone();
        let client = self.authed();

        task::spawn(async move {
            match tokio::join!(client.special_days(), client.wfh_periods()) {
                (Ok(days), Ok(periods)) => {
                    dispatcher.dispatch(Action::SpecialDaysLoaded(days));
                    dispatcher.dispatch(Action::WfhPeriodsLoaded(periods));
                }
                (Err(e), _) | (_, Err(e)) => {
                    settle(&dispatcher, e, Action::SpecialDaysLoadFailed)
                }
            }
        });
    }

    fn create_wfh_period(&self, create: craftmeal_core::models::WfhPeriodCreate) {
        let dispatcher = self.dispatcher.clone();
        let client = self.authed();

        task::spawn(async move {
            match client.create_wfh_period(&create).await {
                Ok(period) => {
                    dispatcher.dispatch(Action::WfhPeriodCreated(period));
                    dispatcher.dispatch(Action::success_toast("WFH period created"));
                }
                Err(e) => settle(&dispatcher, e, Action::WfhPeriodCreateFailed),
            }
        });
    }

    fn delete_wfh_period(&self, id: i64) {
        let dispatcher = self.dispatcher.clone();
        let client = self.authed();

        task::spawn(async move {
            match client.delete_wfh_period(id).await {
                Ok(()) => {
                    dispatcher.dispatch(Action::WfhPeriodDeleted(id));
                    dispatcher.dispatch(Action::success_toast("WFH period deleted"));
                }
                Err(e) => settle(&dispatcher, e, Action::WfhPeriodDeleteFailed),
            }
        });
    }

    fn create_special_day(&self, create: craftmeal_core::models::SpecialDayCreate) {
        let dispatcher = self.dispatcher.clone();
        let client = self.authed();

        task::spawn(async move {
            match client.create_special_day(&create).await {
                Ok(day) => {
                    dispatcher.dispatch(Action::SpecialDayCreated(day));
                    dispatcher.dispatch(Action::success_toast("Special day added"));
                }
                Err(e) => settle(&dispatcher, e, Action::SpecialDayCreateFailed),
            }
        });
    }

    fn delete_special_day(&self, id: i64) {
        let dispatcher = self.dispatcher.clone();
        let client = self.authed();

        task::spawn(async move {
            match client.delete_special_day(id).await {
                Ok(()) => {
                    dispatcher.dispatch(Action::SpecialDayDeleted(id));
                    dispatcher.dispatch(Action::success_toast("Special day removed"));
                }
                Err(e) => settle(&dispatcher, e, Action::SpecialDayDeleteFailed),
            }
        });
    }

    fn fetch_headcount(&self) {
        let dispatcher = self.dispatcher.clone();
        let client = self.authed();

        task::spawn(async move {
            match client.headcount_summary().await {
                Ok(summary) => dispatcher.dispatch(Action::HeadcountLoaded(summary)),
                Err(e) => settle(&dispatcher, e, Action::HeadcountLoadFailed),
            }
        });
    }

    fn fetch_meal_users(&self, meal_type: String) {
        // Collapsing, or a list that was already fetched: nothing to do
        let needs_fetch = self
            .headcount_store
            .as_ref()
            .map(|s| s.needs_user_list(&meal_type))
            .unwrap_or(false);
        if !needs_fetch {
            return;
        }

        let dispatcher = self.dispatcher.clone();
        let client = self.authed();

        task::spawn(async move {
            match client.meal_users(&meal_type).await {
                Ok(list) => dispatcher.dispatch(Action::MealUsersLoaded(list)),
                Err(e) => settle(&dispatcher, e, Action::MealUsersLoadFailed),
            }
        });
    }

    fn fetch_participation(&self) {
        let dispatcher = self.dispatcher.clone();
        let client = self.authed();

        task::spawn(async move {
            match client.all_participation().await {
                Ok(rows) => dispatcher.dispatch(Action::ParticipationLoaded(rows)),
                Err(e) => settle(&dispatcher, e, Action::ParticipationLoadFailed),
            }
        });
    }

    fn save_participation(&self, update: craftmeal_core::models::ParticipationAdminUpdate) {
        let dispatcher = self.dispatcher.clone();
        let client = self.authed();

        task::spawn(async move {
            match client.update_user_participation(&update).await {
                Ok(row) => {
                    dispatcher.dispatch(Action::ParticipationUpdated(row));
                    dispatcher.dispatch(Action::success_toast("Participation updated"));
                }
                Err(e) => settle(&dispatcher, e, Action::ParticipationUpdateFailed),
            }
        });
    }

    fn fetch_users(&self) {
        let dispatcher = self.dispatcher.clone();
        let client = self.authed();

        task::spawn(async move {
            match tokio::join!(client.pending_users(), client.all_users()) {
                (Ok(pending), Ok(users)) => {
                    dispatcher.dispatch(Action::PendingUsersLoaded(pending));
                    dispatcher.dispatch(Action::UsersLoaded(users));
                }
                (Err(e), _) | (_, Err(e)) => settle(&dispatcher, e, Action::UsersLoadFailed),
            }
        });
    }

    fn approve_user(&self, user_id: i64) {
        let dispatcher = self.dispatcher.clone();
        let client = self.authed();

        task::spawn(async move {
            match client.approve_user(&ApproveUserRequest { user_id }).await {
                Ok(response) => {
                    dispatcher.dispatch(Action::success_toast(response.message.clone()));
                    dispatcher.dispatch(Action::UserActionCompleted(response.message));
                }
                Err(e) => settle(&dispatcher, e, Action::UserActionFailed),
            }
        });
    }

    fn reject_user(&self, user_id: i64) {
        let dispatcher = self.dispatcher.clone();
        let client = self.authed();

        task::spawn(async move {
            match client.reject_user(user_id).await {
                Ok(response) => {
                    dispatcher.dispatch(Action::success_toast(response.message.clone()));
                    dispatcher.dispatch(Action::UserActionCompleted(response.message));
                }
                Err(e) => settle(&dispatcher, e, Action::UserActionFailed),
            }
        });
    }

    fn delete_user(&self, user_id: i64) {
        let dispatcher = self.dispatcher.clone();
        let client = self.authed();

        task::spawn(async move {
            match client.delete_user(user_id).await {
                Ok(response) => {
                    dispatcher.dispatch(Action::success_toast(response.message.clone()));
                    dispatcher.dispatch(Action::UserActionCompleted(response.message));
                }
                Err(e) => settle(&dispatcher, e, Action::UserActionFailed),
            }
        });
    }

    fn set_user_role(&self, user_id: i64, role: craftmeal_core::models::Role) {
        let dispatcher = self.dispatcher.clone();
        let client = self.authed();

        task::spawn(async move {
            let update = UserAdminUpdate {
                role: Some(role),
                team_id: None,
            };
            match client.update_user(user_id, &update).await {
                Ok(response) => {
                    dispatcher.dispatch(Action::success_toast(response.message.clone()));
                    dispatcher.dispatch(Action::UserActionCompleted(response.message));
                }
                Err(e) => settle(&dispatcher, e, Action::UserActionFailed),
            }
        });
    }
}

/// Common error path for authenticated calls. A 401 tears down the
/// session regardless of which endpoint it came from; everything else is
/// routed to the page-specific failure action plus an error toast.
fn settle(dispatcher: &Dispatcher, error: ApiError, failure: fn(String) -> Action) {
    log::error!("API call failed: {}", error);
    if error.is_unauthorized() {
        dispatcher.dispatch(Action::error_toast(error.user_message()));
        dispatcher.dispatch(Action::SessionExpired);
    } else {
        let message = error.user_message();
        dispatcher.dispatch(Action::error_toast(message.clone()));
        dispatcher.dispatch(failure(message));
    }
}
