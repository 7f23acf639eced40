/// UI module - panels and rendering components
pub mod auth_panel;
pub mod calendar_admin_panel;
pub mod headcount_panel;
pub mod layout;
pub mod location_panel;
pub mod meals_panel;
pub mod participation_panel;
pub mod users_panel;

pub use layout::render_layout;
