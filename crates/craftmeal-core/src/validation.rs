/// Client-side form validation. Mirrors the rules the backend enforces so
/// users get field-level feedback before a request is made.
use crate::models::parse_date_key;
use regex::Regex;
use std::sync::OnceLock;

/// A single failed field with a user-facing message
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

fn username_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z0-9_]+$").unwrap())
}

fn email_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap())
}

fn check_username(errors: &mut Vec<FieldError>, username: &str) {
    let trimmed = username.trim();
    if trimmed.is_empty() {
        errors.push(FieldError::new("username", "Username is required"));
    } else if trimmed.len() < 3 {
        errors.push(FieldError::new(
            "username",
            "Username must be at least 3 characters",
        ));
    } else if trimmed.len() > 50 {
        errors.push(FieldError::new(
            "username",
            "Username must be less than 50 characters",
        ));
    }
}

fn check_password(errors: &mut Vec<FieldError>, password: &str) {
    if password.is_empty() {
        errors.push(FieldError::new("password", "Password is required"));
    } else if password.len() < 6 {
        errors.push(FieldError::new(
            "password",
            "Password must be at least 6 characters",
        ));
    } else if password.len() > 100 {
        errors.push(FieldError::new(
            "password",
            "Password must be less than 100 characters",
        ));
    }
}

/// Validate the login form
pub fn validate_login(username: &str, password: &str) -> Vec<FieldError> {
    let mut errors = Vec::new();
    check_username(&mut errors, username);
    check_password(&mut errors, password);
    errors
}

/// Fields of the registration form
#[derive(Clone, Default, Debug)]
pub struct RegistrationForm {
    pub username: String,
    pub password: String,
    pub confirm_password: String,
    pub name: String,
    pub email: String,
    pub team_id: Option<i64>,
}

/// Validate the registration form. Returns every failing field so the UI
/// can annotate them all at once.
pub fn validate_registration(form: &RegistrationForm) -> Vec<FieldError> {
    let mut errors = Vec::new();

    check_username(&mut errors, &form.username);
    if !form.username.trim().is_empty() && !username_re().is_match(form.username.trim()) {
        errors.push(FieldError::new(
            "username",
            "Username can only contain letters, numbers, and underscores",
        ));
    }

    check_password(&mut errors, &form.password);
    if !form.password.is_empty() {
        if !form.password.chars().any(|c| c.is_ascii_uppercase()) {
            errors.push(FieldError::new(
                "password",
                "Password must contain at least one uppercase letter",
            ));
        }
        if !form.password.chars().any(|c| c.is_ascii_lowercase()) {
            errors.push(FieldError::new(
                "password",
                "Password must contain at least one lowercase letter",
            ));
        }
        if !form.password.chars().any(|c| c.is_ascii_digit()) {
            errors.push(FieldError::new(
                "password",
                "Password must contain at least one number",
            ));
        }
    }

    if form.confirm_password.is_empty() {
        errors.push(FieldError::new(
            "confirm_password",
            "Please confirm your password",
        ));
    } else if form.confirm_password != form.password {
        errors.push(FieldError::new("confirm_password", "Passwords don't match"));
    }

    let name = form.name.trim();
    if name.is_empty() {
        errors.push(FieldError::new("name", "Full name is required"));
    } else if name.len() < 2 {
        errors.push(FieldError::new(
            "name",
            "Name must be at least 2 characters",
        ));
    } else if name.len() > 100 {
        errors.push(FieldError::new(
            "name",
            "Name must be less than 100 characters",
        ));
    }

    let email = form.email.trim();
    if email.is_empty() {
        errors.push(FieldError::new("email", "Email is required"));
    } else if !email_re().is_match(email) {
        errors.push(FieldError::new("email", "Invalid email address"));
    }

    if let Some(team_id) = form.team_id {
        if team_id <= 0 {
            errors.push(FieldError::new("team_id", "Team ID must be positive"));
        }
    }

    errors
}

/// Validate a meal participation date field
pub fn validate_meal_date(date: &str) -> Vec<FieldError> {
    let mut errors = Vec::new();
    if date.is_empty() {
        errors.push(FieldError::new("date", "Date is required"));
    } else if parse_date_key(date).is_none() {
        errors.push(FieldError::new(
            "date",
            "Invalid date format. Expected YYYY-MM-DD",
        ));
    }
    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    fn messages_for<'a>(errors: &'a [FieldError], field: &str) -> Vec<&'a str> {
        errors
            .iter()
            .filter(|e| e.field == field)
            .map(|e| e.message.as_str())
            .collect()
    }

    #[test]
    fn test_login_accepts_valid_credentials() {
        assert!(validate_login("jdoe", "hunter22").is_empty());
    }

    #[test]
    fn test_login_rejects_short_fields() {
        let errors = validate_login("jo", "abc");
        assert_eq!(
            messages_for(&errors, "username"),
            vec!["Username must be at least 3 characters"]
        );
        assert_eq!(
            messages_for(&errors, "password"),
            vec!["Password must be at least 6 characters"]
        );
    }

    #[test]
    fn test_login_trims_username() {
        assert!(validate_login("  jdoe  ", "hunter22").is_empty());
        let errors = validate_login("   ", "hunter22");
        assert_eq!(messages_for(&errors, "username"), vec!["Username is required"]);
    }

    fn valid_registration() -> RegistrationForm {
        RegistrationForm {
            username: "jdoe_1".to_string(),
            password: "Hunter22".to_string(),
            confirm_password: "Hunter22".to_string(),
            name: "J. Doe".to_string(),
            email: "jdoe@example.com".to_string(),
            team_id: Some(3),
        }
    }

    #[test]
    fn test_registration_accepts_valid_form() {
        assert!(validate_registration(&valid_registration()).is_empty());
    }

    #[test]
    fn test_registration_password_strength() {
        let mut form = valid_registration();
        form.password = "weakpass".to_string();
        form.confirm_password = form.password.clone();
        let errors = validate_registration(&form);
        let msgs = messages_for(&errors, "password");
        assert!(msgs.contains(&"Password must contain at least one uppercase letter"));
        assert!(msgs.contains(&"Password must contain at least one number"));
    }

    #[test]
    fn test_registration_confirm_mismatch() {
        let mut form = valid_registration();
        form.confirm_password = "Hunter23".to_string();
        let errors = validate_registration(&form);
        assert_eq!(
            messages_for(&errors, "confirm_password"),
            vec!["Passwords don't match"]
        );
    }

    #[test]
    fn test_registration_username_charset() {
        let mut form = valid_registration();
        form.username = "j doe!".to_string();
        let errors = validate_registration(&form);
        assert_eq!(
            messages_for(&errors, "username"),
            vec!["Username can only contain letters, numbers, and underscores"]
        );
    }

    #[test]
    fn test_registration_email_shape() {
        let mut form = valid_registration();
        form.email = "not-an-email".to_string();
        let errors = validate_registration(&form);
        assert_eq!(messages_for(&errors, "email"), vec!["Invalid email address"]);
    }

    #[test]
    fn test_registration_team_id_positive() {
        let mut form = valid_registration();
        form.team_id = Some(0);
        let errors = validate_registration(&form);
        assert_eq!(
            messages_for(&errors, "team_id"),
            vec!["Team ID must be positive"]
        );
    }

    #[test]
    fn test_meal_date_format() {
        assert!(validate_meal_date("2026-02-10").is_empty());
        let errors = validate_meal_date("10/02/2026");
        assert_eq!(
            messages_for(&errors, "date"),
            vec!["Invalid date format. Expected YYYY-MM-DD"]
        );
        let errors = validate_meal_date("");
        assert_eq!(messages_for(&errors, "date"), vec!["Date is required"]);
    }
}
