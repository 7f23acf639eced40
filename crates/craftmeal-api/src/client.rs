/// Thin typed wrapper over the CraftMeal REST backend. One method per
/// endpoint; every method maps the response through the same status
/// handling so 401/403 semantics are uniform across the app.
use crate::error::{ApiError, ErrorBody};
use craftmeal_core::get_craftmeal_setting;
use craftmeal_core::models::{
    ApproveUserRequest, AuthResponse, HeadcountSummary, LocationUpdate, LoginRequest, MealRecord,
    MealUserList, MessageResponse, ParticipationAdminUpdate, ParticipationUpdate, PendingUser,
    RegisterRequest, SpecialDay, SpecialDayCheck, SpecialDayCreate, UserAdminUpdate,
    UserParticipation, UserProfile, WfhPeriod, WfhPeriodCreate, WorkLocationRecord,
};
use log::debug;
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;

#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    /// Client pointed at the configured backend, without credentials
    pub fn from_env() -> Self {
        Self::new(get_craftmeal_setting!(CRAFTMEAL_API_BASE_URL))
    }

    pub fn new(base_url: impl Into<String>) -> Self {
        let timeout_ms = get_craftmeal_setting!(CRAFTMEAL_HTTP_TIMEOUT_MS, usize) as u64;
        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
        }
    }

    /// Same client carrying a bearer token. The underlying connection pool
    /// is shared, so this is cheap to call per request batch.
    pub fn with_token(&self, token: Option<String>) -> Self {
        Self {
            http: self.http.clone(),
            base_url: self.base_url.clone(),
            token,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.authorize(self.http.get(self.url(path))).send().await?;
        decode(response).await
    }

    async fn get_with_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ApiError> {
        let response = self
            .authorize(self.http.get(self.url(path)).query(query))
            .send()
            .await?;
        decode(response).await
    }

    async fn post<B: serde::Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self
            .authorize(self.http.post(self.url(path)).json(body))
            .send()
            .await?;
        decode(response).await
    }

    async fn put<B: serde::Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self
            .authorize(self.http.put(self.url(path)).json(body))
            .send()
            .await?;
        decode(response).await
    }

    async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let response = self
            .authorize(self.http.delete(self.url(path)))
            .send()
            .await?;
        check_status(response).await?;
        Ok(())
    }

    // Auth

    pub async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, ApiError> {
        self.post("/auth/login", request).await
    }

    pub async fn register(&self, request: &RegisterRequest) -> Result<MessageResponse, ApiError> {
        self.post("/auth/register", request).await
    }

    pub async fn current_user(&self) -> Result<UserProfile, ApiError> {
        self.get("/me").await
    }

    // Work location

    pub async fn my_location(&self, date: &str) -> Result<WorkLocationRecord, ApiError> {
        self.get_with_query("/me/location", &[("date", date)]).await
    }

    pub async fn update_my_location(
        &self,
        update: &LocationUpdate,
    ) -> Result<WorkLocationRecord, ApiError> {
        self.put("/me/location", update).await
    }

    // WFH periods

    pub async fn wfh_periods(&self) -> Result<Vec<WfhPeriod>, ApiError> {
        self.get("/wfh-periods").await
    }

    pub async fn create_wfh_period(
        &self,
        create: &WfhPeriodCreate,
    ) -> Result<WfhPeriod, ApiError> {
        self.post("/wfh-periods", create).await
    }

    pub async fn delete_wfh_period(&self, period_id: i64) -> Result<(), ApiError> {
        self.delete(&format!("/wfh-periods/{period_id}")).await
    }

    // Special days

    pub async fn special_days(&self) -> Result<Vec<SpecialDay>, ApiError> {
        self.get("/special-days").await
    }

    pub async fn create_special_day(
        &self,
        create: &SpecialDayCreate,
    ) -> Result<SpecialDay, ApiError> {
        self.post("/special-days", create).await
    }

    pub async fn delete_special_day(&self, day_id: i64) -> Result<(), ApiError> {
        self.delete(&format!("/special-days/{day_id}")).await
    }

    pub async fn check_special_day(&self, date: &str) -> Result<SpecialDayCheck, ApiError> {
        self.get_with_query("/special-days/check", &[("date", date)])
            .await
    }

    // Meals

    pub async fn todays_participation(&self) -> Result<MealRecord, ApiError> {
        self.get("/meals/today").await
    }

    pub async fn update_participation(
        &self,
        update: &ParticipationUpdate,
    ) -> Result<MealRecord, ApiError> {
        self.put("/meals/participation", update).await
    }

    // Headcount

    pub async fn headcount_summary(&self) -> Result<HeadcountSummary, ApiError> {
        self.get("/headcount").await
    }

    pub async fn meal_users(&self, meal_type: &str) -> Result<MealUserList, ApiError> {
        self.get(&format!("/headcount/{meal_type}")).await
    }

    // Cross-user participation

    pub async fn all_participation(&self) -> Result<Vec<UserParticipation>, ApiError> {
        self.get("/participation").await
    }

    pub async fn update_user_participation(
        &self,
        update: &ParticipationAdminUpdate,
    ) -> Result<UserParticipation, ApiError> {
        self.put("/participation", update).await
    }

    // User administration

    pub async fn pending_users(&self) -> Result<Vec<PendingUser>, ApiError> {
        self.get("/admin/pending-users").await
    }

    pub async fn all_users(&self) -> Result<Vec<UserProfile>, ApiError> {
        self.get("/admin/users").await
    }

    pub async fn approve_user(
        &self,
        request: &ApproveUserRequest,
    ) -> Result<MessageResponse, ApiError> {
        self.put("/admin/approve-user", request).await
    }

    pub async fn reject_user(&self, user_id: i64) -> Result<MessageResponse, ApiError> {
        self.put("/admin/reject-user", &ApproveUserRequest { user_id })
            .await
    }

    pub async fn update_user(
        &self,
        user_id: i64,
        update: &UserAdminUpdate,
    ) -> Result<MessageResponse, ApiError> {
        self.put(&format!("/admin/users/{user_id}"), update).await
    }

    pub async fn delete_user(&self, user_id: i64) -> Result<MessageResponse, ApiError> {
        let response = self
            .authorize(self.http.delete(self.url(&format!("/admin/users/{user_id}"))))
            .send()
            .await?;
        decode(response).await
    }
}

/// Map a non-success status to the matching ApiError, passing through the
/// backend `detail` message when the body carries one.
async fn check_status(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    if status == StatusCode::UNAUTHORIZED {
        return Err(ApiError::Unauthorized);
    }

    let detail = match response.json::<ErrorBody>().await {
        Ok(body) => body.detail,
        Err(_) => status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string(),
    };
    debug!("backend rejected request with {}: {}", status, detail);

    if status == StatusCode::FORBIDDEN {
        Err(ApiError::Forbidden(detail))
    } else {
        Err(ApiError::Status {
            status: status.as_u16(),
            detail,
        })
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let response = check_status(response).await?;
    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode(e.to_string()))
}
