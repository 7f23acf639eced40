/// Keyboard and mouse input handling and key mapping.
///
/// Local edits (cursor moves, text input, toggles) mutate the stores
/// directly and return None; anything needing I/O or crossing store
/// boundaries becomes an Action.
use crate::actions::{Action, Route};
use crate::common::calendar::hit_test;
use crate::stores::{Stores, calendar_admin_store::AdminPane, users_store::UsersTab};
use craftmeal_core::models::{WorkLocation, date_key};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::crossterm;

/// Handle keyboard input and return the appropriate Action
pub fn handle_key_event(key_event: KeyEvent, stores: &Stores) -> Option<Action> {
    let ui_state = stores.ui.get_state();

    // Any key dismisses the help overlay
    if ui_state.show_help {
        return Some(Action::ToggleHelp);
    }

    // Ctrl+C arrives as a plain Char('c') under raw mode; catch it before
    // the form handlers type it into a field
    if key_event.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(key_event.code, KeyCode::Char('c'))
    {
        return Some(Action::Quit);
    }

    match ui_state.route {
        Route::Login => handle_login_keys(key_event, stores),
        Route::Register => handle_register_keys(key_event, stores),
        Route::Meals => global_keys(key_event, stores)
            .or_else(|| handle_meals_keys(key_event, stores)),
        Route::MyLocation => {
            if stores.location.modal_date().is_some() {
                return handle_location_modal_keys(key_event, stores);
            }
            global_keys(key_event, stores).or_else(|| handle_location_keys(key_event, stores))
        }
        Route::CalendarAdmin => {
            if stores.calendar_admin.form_is_open() {
                return handle_special_day_form_keys(key_event, stores);
            }
            global_keys(key_event, stores)
                .or_else(|| handle_calendar_admin_keys(key_event, stores))
        }
        Route::Headcount => global_keys(key_event, stores)
            .or_else(|| handle_headcount_keys(key_event, stores)),
        Route::Participation => {
            if stores.participation.editor_is_open() {
                return handle_participation_editor_keys(key_event, stores);
            }
            global_keys(key_event, stores)
                .or_else(|| handle_participation_keys(key_event, stores))
        }
        Route::Users => global_keys(key_event, stores)
            .or_else(|| handle_users_keys(key_event, stores)),
    }
}

/// Keys available on every authenticated page
fn global_keys(key_event: KeyEvent, stores: &Stores) -> Option<Action> {
    let session = stores.session.get_state()?;
    match key_event.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => Some(Action::Quit),
        KeyCode::Char('?') => Some(Action::ToggleHelp),
        KeyCode::Char('L') => Some(Action::Logout),

        // Page switching, gated on the session's role
        KeyCode::Char('1') => Some(Action::Navigate(Route::Meals)),
        KeyCode::Char('2') => Some(Action::Navigate(Route::MyLocation)),
        KeyCode::Char('3') if session.can_view_roster() => {
            Some(Action::Navigate(Route::Headcount))
        }
        KeyCode::Char('4') if session.can_manage_calendar() => {
            Some(Action::Navigate(Route::CalendarAdmin))
        }
        KeyCode::Char('5') if session.can_view_roster() => {
            Some(Action::Navigate(Route::Participation))
        }
        KeyCode::Char('6') if session.is_admin() => Some(Action::Navigate(Route::Users)),

        _ => None,
    }
}

fn handle_login_keys(key_event: KeyEvent, stores: &Stores) -> Option<Action> {
    use crate::stores::auth_store::LOGIN_FIELDS;
    match key_event.code {
        KeyCode::Enter => stores.auth.submit_login().map(Action::SubmitLogin),
        // 'q' types into the form, so Esc is the pre-login exit
        KeyCode::Esc => Some(Action::Quit),
        KeyCode::F(2) => Some(Action::Navigate(Route::Register)),
        KeyCode::Tab | KeyCode::Down => {
            stores.auth.focus_next(LOGIN_FIELDS);
            None
        }
        KeyCode::BackTab | KeyCode::Up => {
            stores.auth.focus_prev(LOGIN_FIELDS);
            None
        }
        KeyCode::Backspace => {
            stores.auth.edit_login_field(|f| f.delete_char());
            None
        }
        KeyCode::Left => {
            stores.auth.edit_login_field(|f| f.move_cursor_left());
            None
        }
        KeyCode::Right => {
            stores.auth.edit_login_field(|f| f.move_cursor_right());
            None
        }
        KeyCode::Char(c) if !c.is_control() => {
            stores.auth.edit_login_field(|f| f.enter_char(c));
            None
        }
        _ => None,
    }
}

fn handle_register_keys(key_event: KeyEvent, stores: &Stores) -> Option<Action> {
    use crate::stores::auth_store::REGISTER_FIELDS;
    match key_event.code {
        KeyCode::Enter => stores
            .auth
            .submit_registration()
            .map(Action::SubmitRegistration),
        KeyCode::Esc => Some(Action::Navigate(Route::Login)),
        KeyCode::Tab | KeyCode::Down => {
            stores.auth.focus_next(REGISTER_FIELDS);
            None
        }
        KeyCode::BackTab | KeyCode::Up => {
            stores.auth.focus_prev(REGISTER_FIELDS);
            None
        }
        KeyCode::Backspace => {
            stores.auth.edit_register_field(|f| f.delete_char());
            None
        }
        KeyCode::Left => {
            stores.auth.edit_register_field(|f| f.move_cursor_left());
            None
        }
        KeyCode::Right => {
            stores.auth.edit_register_field(|f| f.move_cursor_right());
            None
        }
        KeyCode::Char(c) if !c.is_control() => {
            stores.auth.edit_register_field(|f| f.enter_char(c));
            None
        }
        _ => None,
    }
}

fn handle_meals_keys(key_event: KeyEvent, stores: &Stores) -> Option<Action> {
    match key_event.code {
        KeyCode::Char('j') | KeyCode::Down => {
            stores.meals.cursor_down();
            None
        }
        KeyCode::Char('k') | KeyCode::Up => {
            stores.meals.cursor_up();
            None
        }
        KeyCode::Char(' ') => {
            stores.meals.toggle_selected();
            None
        }
        KeyCode::Char('s') | KeyCode::Enter => {
            stores.meals.save_payload().map(Action::SaveMeals)
        }
        KeyCode::Char('r') => Some(Action::LoadTodaysMeals),
        _ => None,
    }
}

fn handle_location_keys(key_event: KeyEvent, stores: &Stores) -> Option<Action> {
    match key_event.code {
        KeyCode::Char('h') | KeyCode::Left => month_aware_move(stores, -1),
        KeyCode::Char('l') | KeyCode::Right => month_aware_move(stores, 1),
        KeyCode::Char('k') | KeyCode::Up => month_aware_move(stores, -7),
        KeyCode::Char('j') | KeyCode::Down => month_aware_move(stores, 7),
        KeyCode::PageUp => stores
            .location
            .prev_month()
            .then_some(Action::LoadVisibleMonth),
        KeyCode::PageDown => stores
            .location
            .next_month()
            .then_some(Action::LoadVisibleMonth),
        KeyCode::Enter => match stores.location.open_modal() {
            Some(_) => None,
            None => Some(Action::warning_toast(
                "No location choice on weekends or closed days",
            )),
        },
        KeyCode::Char('r') => Some(Action::LoadVisibleMonth),
        _ => None,
    }
}

/// Cursor movement that refetches when it crosses into another month
fn month_aware_move(stores: &Stores, days: i64) -> Option<Action> {
    stores
        .location
        .move_cursor(days)
        .then_some(Action::LoadVisibleMonth)
}

fn handle_location_modal_keys(key_event: KeyEvent, stores: &Stores) -> Option<Action> {
    let date = stores.location.modal_date()?;
    match key_event.code {
        KeyCode::Esc => {
            stores.location.close_modal();
            None
        }
        KeyCode::Char('o') | KeyCode::Char('O') => Some(Action::ChooseLocation {
            date: date_key(date),
            location: WorkLocation::Office,
        }),
        KeyCode::Char('w') | KeyCode::Char('W') => Some(Action::ChooseLocation {
            date: date_key(date),
            location: WorkLocation::Wfh,
        }),
        _ => None,
    }
}

fn handle_calendar_admin_keys(key_event: KeyEvent, stores: &Stores) -> Option<Action> {
    let pane = stores.calendar_admin.get_state().pane;
    match key_event.code {
        KeyCode::Tab => {
            stores.calendar_admin.next_pane();
            None
        }
        KeyCode::Esc => {
            stores.calendar_admin.clear_selection();
            None
        }
        KeyCode::PageUp => {
            stores.calendar_admin.prev_month();
            None
        }
        KeyCode::PageDown => {
            stores.calendar_admin.next_month();
            None
        }

        KeyCode::Char('h') | KeyCode::Left if pane == AdminPane::Calendar => {
            stores.calendar_admin.move_cursor(-1);
            None
        }
        KeyCode::Char('l') | KeyCode::Right if pane == AdminPane::Calendar => {
            stores.calendar_admin.move_cursor(1);
            None
        }
        KeyCode::Char('k') | KeyCode::Up if pane == AdminPane::Calendar => {
            stores.calendar_admin.move_cursor(-7);
            None
        }
        KeyCode::Char('j') | KeyCode::Down if pane == AdminPane::Calendar => {
            stores.calendar_admin.move_cursor(7);
            None
        }
        // Enter anchors, extends and finishes the range selection
        KeyCode::Enter if pane == AdminPane::Calendar => {
            stores.calendar_admin.press();
            None
        }
        KeyCode::Char('p') => stores
            .calendar_admin
            .period_payload()
            .map(Action::CreateWfhPeriod),
        KeyCode::Char('n') if pane == AdminPane::Calendar => {
            stores.calendar_admin.open_form();
            None
        }

        KeyCode::Char('k') | KeyCode::Up => {
            stores.calendar_admin.list_up();
            None
        }
        KeyCode::Char('j') | KeyCode::Down => {
            stores.calendar_admin.list_down();
            None
        }
        KeyCode::Char('d') if pane == AdminPane::Periods => stores
            .calendar_admin
            .selected_period_id()
            .map(Action::DeleteWfhPeriod),
        KeyCode::Char('d') if pane == AdminPane::SpecialDays => stores
            .calendar_admin
            .selected_special_id()
            .map(Action::DeleteSpecialDay),

        KeyCode::Char('r') => Some(Action::LoadCalendarAdmin),
        _ => None,
    }
}

fn handle_special_day_form_keys(key_event: KeyEvent, stores: &Stores) -> Option<Action> {
    match key_event.code {
        KeyCode::Esc => {
            stores.calendar_admin.close_form();
            None
        }
        KeyCode::Tab => {
            stores.calendar_admin.cycle_form_kind();
            None
        }
        KeyCode::Enter => stores
            .calendar_admin
            .special_day_payload()
            .map(Action::SubmitSpecialDay),
        KeyCode::Backspace => {
            stores.calendar_admin.edit_form_note(|f| f.delete_char());
            None
        }
        KeyCode::Left => {
            stores
                .calendar_admin
                .edit_form_note(|f| f.move_cursor_left());
            None
        }
        KeyCode::Right => {
            stores
                .calendar_admin
                .edit_form_note(|f| f.move_cursor_right());
            None
        }
        KeyCode::Char(c) if !c.is_control() => {
            stores.calendar_admin.edit_form_note(|f| f.enter_char(c));
            None
        }
        _ => None,
    }
}

fn handle_headcount_keys(key_event: KeyEvent, stores: &Stores) -> Option<Action> {
    match key_event.code {
        KeyCode::Char('j') | KeyCode::Down => {
            stores.headcount.cursor_down();
            None
        }
        KeyCode::Char('k') | KeyCode::Up => {
            stores.headcount.cursor_up();
            None
        }
        KeyCode::Enter => stores
            .headcount
            .selected_meal()
            .map(Action::SelectHeadcountMeal),
        KeyCode::Char('r') => Some(Action::LoadHeadcount),
        _ => None,
    }
}

fn handle_participation_keys(key_event: KeyEvent, stores: &Stores) -> Option<Action> {
    match key_event.code {
        KeyCode::Char('j') | KeyCode::Down => {
            stores.participation.cursor_down();
            None
        }
        KeyCode::Char('k') | KeyCode::Up => {
            stores.participation.cursor_up();
            None
        }
        KeyCode::Enter => {
            stores.participation.open_editor();
            None
        }
        KeyCode::Char('r') => Some(Action::LoadParticipation),
        _ => None,
    }
}

fn handle_participation_editor_keys(key_event: KeyEvent, stores: &Stores) -> Option<Action> {
    match key_event.code {
        KeyCode::Esc => {
            stores.participation.close_editor();
            None
        }
        KeyCode::Char('j') | KeyCode::Down => {
            stores.participation.editor_cursor_down();
            None
        }
        KeyCode::Char('k') | KeyCode::Up => {
            stores.participation.editor_cursor_up();
            None
        }
        KeyCode::Char(' ') => {
            stores.participation.editor_toggle();
            None
        }
        KeyCode::Enter => stores
            .participation
            .save_payload()
            .map(Action::SaveParticipationEdit),
        _ => None,
    }
}

fn handle_users_keys(key_event: KeyEvent, stores: &Stores) -> Option<Action> {
    let tab = stores.users.get_state().tab;
    match key_event.code {
        KeyCode::Tab => {
            stores.users.switch_tab();
            None
        }
        KeyCode::Char('j') | KeyCode::Down => {
            stores.users.cursor_down();
            None
        }
        KeyCode::Char('k') | KeyCode::Up => {
            stores.users.cursor_up();
            None
        }
        KeyCode::Char('a') if tab == UsersTab::Pending => {
            stores.users.selected_pending_id().map(Action::ApproveUser)
        }
        KeyCode::Char('x') if tab == UsersTab::Pending => {
            stores.users.selected_pending_id().map(Action::RejectUser)
        }
        KeyCode::Char('d') if tab == UsersTab::All => stores
            .users
            .selected_user()
            .map(|user| Action::DeleteUser(user.id)),
        KeyCode::Char('c') if tab == UsersTab::All => stores.users.selected_user().map(|user| {
            Action::SetUserRole(user.id, crate::stores::UsersStore::next_role(user.role))
        }),
        KeyCode::Char('r') => Some(Action::LoadUsers),
        _ => None,
    }
}

/// Handle mouse gestures over the calendar grids
pub fn handle_mouse_event(mouse_event: MouseEvent, stores: &Stores) -> Option<Action> {
    match stores.ui.get_state().route {
        Route::MyLocation => handle_location_mouse(mouse_event, stores),
        Route::CalendarAdmin => handle_calendar_admin_mouse(mouse_event, stores),
        _ => None,
    }
}

fn handle_location_mouse(mouse_event: MouseEvent, stores: &Stores) -> Option<Action> {
    if mouse_event.kind != MouseEventKind::Down(MouseButton::Left) {
        return None;
    }
    let state = stores.location.get_state();
    let area = state.calendar_area?;
    let date = hit_test(area, state.grid, mouse_event.column, mouse_event.row)?;
    stores.location.set_cursor(date);
    // Same semantics as Enter: open the picker, warn on disabled dates
    match stores.location.open_modal() {
        Some(_) => None,
        None => Some(Action::warning_toast(
            "No location choice on weekends or closed days",
        )),
    }
}

fn handle_calendar_admin_mouse(mouse_event: MouseEvent, stores: &Stores) -> Option<Action> {
    let state = stores.calendar_admin.get_state();
    let area = state.calendar_area?;
    match mouse_event.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            let date = hit_test(area, state.grid, mouse_event.column, mouse_event.row)?;
            stores.calendar_admin.set_cursor(date);
            stores.calendar_admin.press();
            None
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            let date = hit_test(area, state.grid, mouse_event.column, mouse_event.row)?;
            stores.calendar_admin.set_cursor(date);
            None
        }
        MouseEventKind::Up(MouseButton::Left) => {
            stores.calendar_admin.release();
            None
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use craftmeal_core::models::{Role, UserProfile};
    use craftmeal_core::session::Session;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::from(code)
    }

    fn stores_with_role(role: Role) -> Stores {
        let stores = Stores::new();
        let session = Session::new(
            "tok".to_string(),
            UserProfile {
                id: 1,
                username: "jdoe".to_string(),
                name: "J. Doe".to_string(),
                email: "jdoe@example.com".to_string(),
                role,
                team_id: None,
            },
        );
        stores.reduce_all(&Action::LoginSucceeded(session));
        stores
    }

    #[test]
    fn test_typing_on_login_is_local() {
        let stores = Stores::new();
        assert!(handle_key_event(key(KeyCode::Char('j')), &stores).is_none());
        assert_eq!(stores.auth.get_state().username.value(), "j");
    }

    #[test]
    fn test_quit_is_reachable_before_login() {
        let stores = Stores::new();
        assert!(matches!(
            handle_key_event(key(KeyCode::Esc), &stores),
            Some(Action::Quit)
        ));
        assert!(matches!(
            handle_key_event(
                KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
                &stores
            ),
            Some(Action::Quit)
        ));
        // Plain 'q' still types into the focused field
        assert!(handle_key_event(key(KeyCode::Char('q')), &stores).is_none());
        assert_eq!(stores.auth.get_state().username.value(), "q");

        // Ctrl+C also works from the registration form
        stores.reduce_all(&Action::Navigate(Route::Register));
        assert!(matches!(
            handle_key_event(
                KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
                &stores
            ),
            Some(Action::Quit)
        ));
    }

    #[test]
    fn test_login_submit_emits_action() {
        let stores = Stores::new();
        for c in "jdoe".chars() {
            handle_key_event(key(KeyCode::Char(c)), &stores);
        }
        handle_key_event(key(KeyCode::Tab), &stores);
        for c in "Hunter22".chars() {
            handle_key_event(key(KeyCode::Char(c)), &stores);
        }
        match handle_key_event(key(KeyCode::Enter), &stores) {
            Some(Action::SubmitLogin(request)) => assert_eq!(request.username, "jdoe"),
            other => panic!("expected SubmitLogin, got {other:?}"),
        }
    }

    #[test]
    fn test_role_gated_navigation() {
        let employee = stores_with_role(Role::Employee);
        assert!(handle_key_event(key(KeyCode::Char('6')), &employee).is_none());
        assert!(handle_key_event(key(KeyCode::Char('4')), &employee).is_none());

        let admin = stores_with_role(Role::Admin);
        assert!(matches!(
            handle_key_event(key(KeyCode::Char('6')), &admin),
            Some(Action::Navigate(Route::Users))
        ));

        let logistics = stores_with_role(Role::Logistics);
        assert!(matches!(
            handle_key_event(key(KeyCode::Char('4')), &logistics),
            Some(Action::Navigate(Route::CalendarAdmin))
        ));
        assert!(handle_key_event(key(KeyCode::Char('6')), &logistics).is_none());

        let lead = stores_with_role(Role::TeamLead);
        assert!(matches!(
            handle_key_event(key(KeyCode::Char('5')), &lead),
            Some(Action::Navigate(Route::Participation))
        ));
        assert!(handle_key_event(key(KeyCode::Char('4')), &lead).is_none());
    }

    #[test]
    fn test_meal_toggle_is_local_save_is_action() {
        let stores = stores_with_role(Role::Employee);
        stores.reduce_all(&Action::TodaysMealsLoaded(
            craftmeal_core::models::MealRecord {
                user_id: 1,
                date: "2026-02-10".to_string(),
                meals: craftmeal_core::models::empty_meal_set(),
            },
        ));

        assert!(handle_key_event(key(KeyCode::Char(' ')), &stores).is_none());
        match handle_key_event(key(KeyCode::Char('s')), &stores) {
            Some(Action::SaveMeals(update)) => assert_eq!(update.date, "2026-02-10"),
            other => panic!("expected SaveMeals, got {other:?}"),
        }
    }

    #[test]
    fn test_help_overlay_swallows_keys() {
        let stores = stores_with_role(Role::Employee);
        stores.reduce_all(&Action::ToggleHelp);
        assert!(matches!(
            handle_key_event(key(KeyCode::Char('j')), &stores),
            Some(Action::ToggleHelp)
        ));
    }
}
