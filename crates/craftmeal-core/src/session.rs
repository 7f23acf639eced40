/// Explicit session object holding the bearer token and the signed-in user.
/// Deliberately not a module-level singleton: the session is created on
/// login, handed to whoever needs it and dropped on logout or a 401.
use crate::models::{Role, UserProfile};

#[derive(Clone, PartialEq, Debug)]
pub struct Session {
    token: String,
    user: UserProfile,
}

impl Session {
    pub fn new(token: String, user: UserProfile) -> Self {
        Self { token, user }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn user(&self) -> &UserProfile {
        &self.user
    }

    pub fn role(&self) -> Role {
        self.user.role
    }

    pub fn is_admin(&self) -> bool {
        self.user.role == Role::Admin
    }

    /// Logistics and admins share the calendar-management surface
    pub fn can_manage_calendar(&self) -> bool {
        matches!(self.user.role, Role::Admin | Role::Logistics)
    }

    /// Admins, logistics and team leads may see aggregates and other
    /// people's participation
    pub fn can_view_roster(&self) -> bool {
        matches!(
            self.user.role,
            Role::Admin | Role::Logistics | Role::TeamLead
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_with_role(role: Role) -> UserProfile {
        UserProfile {
            id: 7,
            username: "jdoe".to_string(),
            name: "J. Doe".to_string(),
            email: "jdoe@example.com".to_string(),
            role,
            team_id: Some(2),
        }
    }

    #[test]
    fn test_role_capabilities() {
        let admin = Session::new("t".into(), user_with_role(Role::Admin));
        assert!(admin.is_admin());
        assert!(admin.can_manage_calendar());
        assert!(admin.can_view_roster());

        let logistics = Session::new("t".into(), user_with_role(Role::Logistics));
        assert!(!logistics.is_admin());
        assert!(logistics.can_manage_calendar());
        assert!(logistics.can_view_roster());

        let lead = Session::new("t".into(), user_with_role(Role::TeamLead));
        assert!(!lead.can_manage_calendar());
        assert!(lead.can_view_roster());

        let employee = Session::new("t".into(), user_with_role(Role::Employee));
        assert!(!employee.can_manage_calendar());
        assert!(!employee.can_view_roster());
    }
}
