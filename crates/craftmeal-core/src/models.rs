/// Wire-level record types exchanged with the CraftMeal REST backend.
/// The backend owns these shapes - this crate only consumes them.
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Format used for every date key on the wire
pub const DATE_KEY_FORMAT: &str = "%Y-%m-%d";

/// Parse an ISO `YYYY-MM-DD` date key
pub fn parse_date_key(key: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(key, DATE_KEY_FORMAT).ok()
}

/// Render a date as its wire key
pub fn date_key(date: NaiveDate) -> String {
    date.format(DATE_KEY_FORMAT).to_string()
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum Role {
    Employee,
    TeamLead,
    Admin,
    Logistics,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Employee => "Employee",
            Self::TeamLead => "TeamLead",
            Self::Admin => "Admin",
            Self::Logistics => "Logistics",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum MealType {
    Lunch,
    Snacks,
    Iftar,
    EventDinner,
    OptionalDinner,
}

impl MealType {
    /// Display order used by every meal listing in the UI
    pub const ALL: [MealType; 5] = [
        Self::Lunch,
        Self::Snacks,
        Self::Iftar,
        Self::EventDinner,
        Self::OptionalDinner,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Lunch => "Lunch",
            Self::Snacks => "Snacks",
            Self::Iftar => "Iftar",
            Self::EventDinner => "EventDinner",
            Self::OptionalDinner => "OptionalDinner",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Lunch => "Lunch",
            Self::Snacks => "Snacks",
            Self::Iftar => "Iftar",
            Self::EventDinner => "Event Dinner",
            Self::OptionalDinner => "Optional Dinner",
        }
    }
}

impl fmt::Display for MealType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-day meal opt-in flags, keyed by meal type
pub type MealSet = HashMap<MealType, bool>;

/// A meal set with every flag cleared
pub fn empty_meal_set() -> MealSet {
    MealType::ALL.iter().map(|m| (*m, false)).collect()
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: i64,
    pub username: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(default)]
    pub team_id: Option<i64>,
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct MealRecord {
    pub user_id: i64,
    pub date: String,
    pub meals: MealSet,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum WorkLocation {
    Office,
    #[serde(rename = "WFH")]
    Wfh,
}

impl WorkLocation {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Office => "Office",
            Self::Wfh => "WFH",
        }
    }
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct WorkLocationRecord {
    pub user_id: i64,
    pub date: String,
    pub location: WorkLocation,
}

/// Inclusive date range during which the default location is WFH
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct WfhPeriod {
    pub id: i64,
    pub start_date: String,
    pub end_date: String,
}

impl WfhPeriod {
    /// Whether the given date key falls inside this period.
    /// Keys are ISO dates so the lexicographic comparison matches
    /// the calendar ordering.
    pub fn contains(&self, date: &str) -> bool {
        self.start_date.as_str() <= date && date <= self.end_date.as_str()
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum SpecialDayKind {
    Closed,
    Holiday,
    Celebration,
}

impl SpecialDayKind {
    pub const ALL: [SpecialDayKind; 3] = [Self::Closed, Self::Holiday, Self::Celebration];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Closed => "Closed",
            Self::Holiday => "Holiday",
            Self::Celebration => "Celebration",
        }
    }
}

impl fmt::Display for SpecialDayKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Organisation-wide calendar override that supersedes individual choices
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct SpecialDay {
    pub id: i64,
    pub date: String,
    #[serde(rename = "type")]
    pub kind: SpecialDayKind,
    #[serde(default)]
    pub note: Option<String>,
}

/// Response of `GET /special-days/check`
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct SpecialDayCheck {
    pub date: String,
    pub is_closed: bool,
    #[serde(rename = "type", default)]
    pub kind: Option<SpecialDayKind>,
    #[serde(default)]
    pub note: Option<String>,
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct MealCountSummary {
    pub meal_type: String,
    pub total_employees: u32,
    pub opted_in: u32,
    pub opted_out: u32,
    pub opted_in_percentage: f64,
    pub opted_out_percentage: f64,
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct HeadcountSummary {
    pub date: String,
    pub total_employees: u32,
    pub meal_counts: Vec<MealCountSummary>,
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct MealUserDetail {
    pub user_id: i64,
    pub name: String,
    #[serde(default)]
    pub team_id: Option<i64>,
    #[serde(default)]
    pub team_name: Option<String>,
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct MealUserList {
    pub meal_type: String,
    pub date: String,
    pub opted_in_count: u32,
    pub users: Vec<MealUserDetail>,
}

/// One row of the cross-user participation table
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct UserParticipation {
    pub user_id: i64,
    pub username: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(default)]
    pub team_id: Option<i64>,
    pub date: String,
    pub meals: MealSet,
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct PendingUser {
    pub id: i64,
    pub username: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(default)]
    pub team_id: Option<i64>,
}

// Request payloads

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: String,
    pub user: UserProfile,
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_id: Option<i64>,
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct LocationUpdate {
    pub date: String,
    pub location: WorkLocation,
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct WfhPeriodCreate {
    pub start_date: String,
    pub end_date: String,
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct SpecialDayCreate {
    pub date: String,
    #[serde(rename = "type")]
    pub kind: SpecialDayKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct ParticipationUpdate {
    pub date: String,
    pub meals: MealSet,
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct ParticipationAdminUpdate {
    pub target_user_id: i64,
    pub meals: MealSet,
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct UserAdminUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_id: Option<i64>,
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct ApproveUserRequest {
    pub user_id: i64,
}

/// Generic `{ "message": ... }` acknowledgement some endpoints return
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_key_round_trip() {
        let d = NaiveDate::from_ymd_opt(2026, 2, 10).unwrap();
        assert_eq!(date_key(d), "2026-02-10");
        assert_eq!(parse_date_key("2026-02-10"), Some(d));
        assert_eq!(parse_date_key("2026-02-30"), None);
    }

    #[test]
    fn test_wfh_period_contains_is_inclusive() {
        let period = WfhPeriod {
            id: 1,
            start_date: "2026-01-05".to_string(),
            end_date: "2026-01-10".to_string(),
        };
        assert!(period.contains("2026-01-05"));
        assert!(period.contains("2026-01-07"));
        assert!(period.contains("2026-01-10"));
        assert!(!period.contains("2026-01-04"));
        assert!(!period.contains("2026-01-11"));
    }

    #[test]
    fn test_meal_record_deserializes_backend_shape() {
        let raw = r#"{
            "user_id": 1,
            "date": "2026-02-10",
            "meals": {
                "Lunch": true,
                "Snacks": false,
                "Iftar": true,
                "EventDinner": false,
                "OptionalDinner": false
            }
        }"#;
        let record: MealRecord = serde_json::from_str(raw).unwrap();
        assert_eq!(record.meals[&MealType::Lunch], true);
        assert_eq!(record.meals[&MealType::Snacks], false);
        assert_eq!(record.meals.len(), 5);
    }

    #[test]
    fn test_special_day_check_handles_absent_kind() {
        let raw = r#"{"date": "2026-02-10", "is_closed": false, "type": null, "note": null}"#;
        let check: SpecialDayCheck = serde_json::from_str(raw).unwrap();
        assert!(!check.is_closed);
        assert_eq!(check.kind, None);
    }

    #[test]
    fn test_work_location_wire_names() {
        assert_eq!(
            serde_json::to_string(&WorkLocation::Wfh).unwrap(),
            "\"WFH\""
        );
        assert_eq!(
            serde_json::to_string(&WorkLocation::Office).unwrap(),
            "\"Office\""
        );
    }
}
