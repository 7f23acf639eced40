use craftmeal_api::{ApiClient, ApiError};
use craftmeal_core::models::{
    LocationUpdate, LoginRequest, MealType, ParticipationUpdate, WfhPeriodCreate, WorkLocation,
    empty_meal_set,
};
use httpmock::prelude::*;

fn client_for(server: &MockServer) -> ApiClient {
    ApiClient::new(server.base_url())
}

#[tokio::test]
async fn test_login_returns_session_material() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/auth/login")
            .json_body(serde_json::json!({"username": "jdoe", "password": "Hunter22"}));
        then.status(200).json_body(serde_json::json!({
            "access_token": "tok-123",
            "token_type": "bearer",
            "user": {
                "id": 1,
                "username": "jdoe",
                "name": "J. Doe",
                "email": "jdoe@example.com",
                "role": "Employee",
                "team_id": 2
            }
        }));
    });

    let response = client_for(&server)
        .login(&LoginRequest {
            username: "jdoe".to_string(),
            password: "Hunter22".to_string(),
        })
        .await
        .unwrap();

    mock.assert();
    assert_eq!(response.access_token, "tok-123");
    assert_eq!(response.user.username, "jdoe");
}

#[tokio::test]
async fn test_bearer_token_is_attached() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/meals/today")
            .header("authorization", "Bearer tok-123");
        then.status(200).json_body(serde_json::json!({
            "user_id": 1,
            "date": "2026-02-10",
            "meals": {
                "Lunch": true,
                "Snacks": false,
                "Iftar": false,
                "EventDinner": false,
                "OptionalDinner": false
            }
        }));
    });

    let record = client_for(&server)
        .with_token(Some("tok-123".to_string()))
        .todays_participation()
        .await
        .unwrap();

    mock.assert();
    assert_eq!(record.meals[&MealType::Lunch], true);
}

#[tokio::test]
async fn test_current_user_round_trip() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/me")
            .header("authorization", "Bearer tok-123");
        then.status(200).json_body(serde_json::json!({
            "id": 1,
            "username": "jdoe",
            "name": "J. Doe",
            "email": "jdoe@example.com",
            "role": "TeamLead",
            "team_id": null
        }));
    });

    let user = client_for(&server)
        .with_token(Some("tok-123".to_string()))
        .current_user()
        .await
        .unwrap();

    mock.assert();
    assert_eq!(user.name, "J. Doe");
    assert_eq!(user.team_id, None);
}

#[tokio::test]
async fn test_401_maps_to_unauthorized() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/headcount");
        then.status(401)
            .json_body(serde_json::json!({"detail": "Not authenticated"}));
    });

    let err = client_for(&server).headcount_summary().await.unwrap_err();
    assert!(err.is_unauthorized());
}

#[tokio::test]
async fn test_403_on_meal_update_carries_cutoff_detail() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(PUT).path("/meals/participation");
        then.status(403).json_body(serde_json::json!({
            "detail": "Cutoff time passed. Updates locked for tomorrow's meals."
        }));
    });

    let err = client_for(&server)
        .update_participation(&ParticipationUpdate {
            date: "2026-02-10".to_string(),
            meals: empty_meal_set(),
        })
        .await
        .unwrap_err();

    match err {
        ApiError::Forbidden(detail) => {
            assert!(detail.contains("Cutoff time passed"));
        }
        other => panic!("expected Forbidden, got {other:?}"),
    }
}

#[tokio::test]
async fn test_location_query_uses_date_param() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/me/location")
            .query_param("date", "2026-02-10");
        then.status(200).json_body(serde_json::json!({
            "user_id": 1,
            "date": "2026-02-10",
            "location": "WFH"
        }));
    });

    let record = client_for(&server).my_location("2026-02-10").await.unwrap();
    mock.assert();
    assert_eq!(record.location, WorkLocation::Wfh);
}

#[tokio::test]
async fn test_update_location_serializes_wire_names() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(PUT)
            .path("/me/location")
            .json_body(serde_json::json!({"date": "2026-02-10", "location": "Office"}));
        then.status(200).json_body(serde_json::json!({
            "user_id": 1,
            "date": "2026-02-10",
            "location": "Office"
        }));
    });

    client_for(&server)
        .update_my_location(&LocationUpdate {
            date: "2026-02-10".to_string(),
            location: WorkLocation::Office,
        })
        .await
        .unwrap();
    mock.assert();
}

#[tokio::test]
async fn test_create_and_delete_wfh_period() {
    let server = MockServer::start();
    let create = server.mock(|when, then| {
        when.method(POST)
            .path("/wfh-periods")
            .json_body(serde_json::json!({"start_date": "2026-01-05", "end_date": "2026-01-10"}));
        then.status(201).json_body(serde_json::json!({
            "id": 9,
            "start_date": "2026-01-05",
            "end_date": "2026-01-10"
        }));
    });
    let delete = server.mock(|when, then| {
        when.method(DELETE).path("/wfh-periods/9");
        then.status(204);
    });

    let client = client_for(&server);
    let period = client
        .create_wfh_period(&WfhPeriodCreate {
            start_date: "2026-01-05".to_string(),
            end_date: "2026-01-10".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(period.id, 9);

    client.delete_wfh_period(9).await.unwrap();
    create.assert();
    delete.assert();
}

#[tokio::test]
async fn test_error_detail_passthrough_on_other_statuses() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(PUT).path("/me/location");
        then.status(400).json_body(serde_json::json!({
            "detail": "Cannot update location for a closed office date"
        }));
    });

    let err = client_for(&server)
        .update_my_location(&LocationUpdate {
            date: "2026-02-10".to_string(),
            location: WorkLocation::Wfh,
        })
        .await
        .unwrap_err();

    match err {
        ApiError::Status { status, detail } => {
            assert_eq!(status, 400);
            assert_eq!(detail, "Cannot update location for a closed office date");
        }
        other => panic!("expected Status, got {other:?}"),
    }
}
