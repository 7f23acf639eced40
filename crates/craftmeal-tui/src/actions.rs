/// Core Action types for the flux architecture.
/// All state mutations that cross store boundaries or require I/O flow
/// through Actions dispatched to the Dispatcher.
use craftmeal_core::models::{
    HeadcountSummary, LoginRequest, MealRecord, MealUserList, ParticipationAdminUpdate,
    ParticipationUpdate, PendingUser, RegisterRequest, SpecialDay, SpecialDayCheck,
    SpecialDayCreate, UserParticipation, UserProfile, WfhPeriod, WfhPeriodCreate, WorkLocation,
    WorkLocationRecord,
};
use craftmeal_core::session::Session;

/// Represents all user intents and system events in the application
#[derive(Debug, Clone)]
pub enum Action {
    // ===== Navigation =====
    /// User asked for a different page (guards already resolved)
    Navigate(Route),

    /// User toggled the help overlay
    ToggleHelp,

    /// Application should exit
    Quit,

    // ===== Session =====
    /// Validated login form ready to send
    SubmitLogin(LoginRequest),

    /// Validated registration form ready to send
    SubmitRegistration(RegisterRequest),

    /// Login round-trip finished successfully
    LoginSucceeded(Session),

    /// Login rejected or failed
    LoginFailed(String),

    /// Registration accepted by the backend (message shown to user)
    RegistrationSucceeded(String),

    RegistrationFailed(String),

    /// User chose to log out
    Logout,

    /// A 401 came back from any endpoint: clear the session, go to login
    SessionExpired,

    // ===== Toasts =====
    ShowToast(ToastLevel, String),

    // ===== Meal participation =====
    LoadTodaysMeals,
    TodaysMealsLoaded(MealRecord),
    TodaysMealsLoadFailed(String),
    SaveMeals(ParticipationUpdate),
    MealsSaved(MealRecord),
    /// 403: business-rule rejection (cutoff passed), shown but not retried
    MealsSaveRejected(String),
    MealsSaveFailed(String),

    // ===== My-location calendar =====
    /// (Re)fetch annotations for the month currently shown
    LoadVisibleMonth,
    /// One day's annotation arrived; generation guards out stale months
    MonthDayLoaded {
        generation: u64,
        date: String,
        location: WorkLocation,
        check: SpecialDayCheck,
    },
    /// The per-day fetch aborted; remaining days of the month won't arrive
    MonthLoadFailed(String),
    WfhPeriodsLoaded(Vec<WfhPeriod>),
    WfhPeriodsLoadFailed(String),
    /// User picked a location in the modal for the selected date
    ChooseLocation { date: String, location: WorkLocation },
    LocationUpdated(WorkLocationRecord),
    LocationUpdateFailed(String),

    // ===== Calendar administration =====
    LoadCalendarAdmin,
    SpecialDaysLoaded(Vec<SpecialDay>),
    SpecialDaysLoadFailed(String),
    CreateWfhPeriod(WfhPeriodCreate),
    WfhPeriodCreated(WfhPeriod),
    WfhPeriodCreateFailed(String),
    DeleteWfhPeriod(i64),
    WfhPeriodDeleted(i64),
    WfhPeriodDeleteFailed(String),
    SubmitSpecialDay(SpecialDayCreate),
    SpecialDayCreated(SpecialDay),
    SpecialDayCreateFailed(String),
    DeleteSpecialDay(i64),
    SpecialDayDeleted(i64),
    SpecialDayDeleteFailed(String),

    // ===== Headcount =====
    LoadHeadcount,
    HeadcountLoaded(HeadcountSummary),
    HeadcountLoadFailed(String),
    /// Expand the user list of one meal type (collapses when re-selected)
    SelectHeadcountMeal(String),
    MealUsersLoaded(MealUserList),
    MealUsersLoadFailed(String),

    // ===== Cross-user participation =====
    LoadParticipation,
    ParticipationLoaded(Vec<UserParticipation>),
    ParticipationLoadFailed(String),
    SaveParticipationEdit(ParticipationAdminUpdate),
    ParticipationUpdated(UserParticipation),
    ParticipationUpdateFailed(String),

    // ===== User administration =====
    LoadUsers,
    PendingUsersLoaded(Vec<PendingUser>),
    UsersLoaded(Vec<UserProfile>),
    UsersLoadFailed(String),
    ApproveUser(i64),
    RejectUser(i64),
    DeleteUser(i64),
    SetUserRole(i64, craftmeal_core::models::Role),
    /// Any admin user mutation finished; message shown, lists reloaded
    UserActionCompleted(String),
    UserActionFailed(String),
}

/// Identifies the pages of the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Register,
    Meals,
    MyLocation,
    CalendarAdmin,
    Headcount,
    Participation,
    Users,
}

impl Route {
    pub fn title(&self) -> &'static str {
        match self {
            Self::Login => "Sign In",
            Self::Register => "Register",
            Self::Meals => "My Meals",
            Self::MyLocation => "My Location",
            Self::CalendarAdmin => "Calendar Admin",
            Self::Headcount => "Headcount",
            Self::Participation => "Participation",
            Self::Users => "Users",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Success,
    Warning,
    Error,
}

/// Convenience constructors used all over the effects layer
impl Action {
    pub fn success_toast(message: impl Into<String>) -> Self {
        Self::ShowToast(ToastLevel::Success, message.into())
    }

    pub fn warning_toast(message: impl Into<String>) -> Self {
        Self::ShowToast(ToastLevel::Warning, message.into())
    }

    pub fn error_toast(message: impl Into<String>) -> Self {
        Self::ShowToast(ToastLevel::Error, message.into())
    }
}
