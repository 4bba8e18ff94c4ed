use axum::http::{header, HeaderValue, StatusCode};
use axum_test::TestServer;
use chrono::{Duration, NaiveDate, NaiveTime, Utc};
use cutandgo_api::build_router;
use cutandgo_core::models::{appointment::CreateAppointmentRequest, service::CreateServiceRequest};
use pretty_assertions::assert_eq;
use serde_json::Value;
use uuid::Uuid;

use crate::test_utils::{build_state, token_for};

fn server() -> TestServer {
    TestServer::new(build_router(build_state())).unwrap()
}

fn bearer(token: &str) -> HeaderValue {
    HeaderValue::from_str(&format!("Bearer {}", token)).unwrap()
}

#[tokio::test]
async fn test_health_is_public() {
    let response = server().get("/health").await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["status"], "ok");
}

#[tokio::test]
async fn test_version_reports_the_package() {
    let response = server().get("/version").await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["name"], "cutandgo-api");
}

#[tokio::test]
async fn test_protected_route_requires_a_token() {
    let response = server().get("/api/auth/me").await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(response.json::<Value>()["code"], "NOT_AUTHENTICATED");
}

#[tokio::test]
async fn test_protected_route_rejects_a_malformed_header() {
    let response = server()
        .get("/api/auth/me")
        .add_header(header::AUTHORIZATION, HeaderValue::from_static("Token abc"))
        .await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_protected_route_rejects_an_expired_token() {
    let token = token_for(Uuid::new_v4(), Utc::now() - Duration::hours(3));

    let response = server()
        .delete(&format!("/api/schedule-rows/{}", Uuid::new_v4()))
        .add_header(header::AUTHORIZATION, bearer(&token))
        .await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(response.json::<Value>()["error"], "Authentication error: Token has expired");
}

#[tokio::test]
async fn test_booking_for_someone_else_is_forbidden() {
    let token = token_for(Uuid::new_v4(), Utc::now());
    let request = CreateAppointmentRequest {
        user_id: Uuid::new_v4(),
        hairdresser_id: Uuid::new_v4(),
        date: NaiveDate::from_ymd_opt(2026, 3, 14).unwrap(),
        time: NaiveTime::from_hms_opt(10, 30, 0).unwrap(),
    };

    let response = server()
        .post("/api/appointments")
        .add_header(header::AUTHORIZATION, bearer(&token))
        .json(&request)
        .await;

    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
    assert_eq!(response.json::<Value>()["code"], "NOT_AUTHORIZED");
}

#[tokio::test]
async fn test_invalid_service_is_refused_before_storage() {
    let token = token_for(Uuid::new_v4(), Utc::now());
    let request = CreateServiceRequest {
        hairdresser_id: Uuid::new_v4(),
        name: "   ".to_string(),
        price_cents: 1500,
        duration_minutes: 30,
    };

    let response = server()
        .post("/api/services")
        .add_header(header::AUTHORIZATION, bearer(&token))
        .json(&request)
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["code"], "VALIDATION");
}

#[tokio::test]
async fn test_row_writes_need_a_token() {
    let server = server();
    let schedule_id = Uuid::new_v4();
    let body = serde_json::json!({ "start": "09:00:00", "end": "13:00:00", "monday": true });

    let create = server
        .post(&format!("/api/schedules/{}/rows", schedule_id))
        .json(&body)
        .await;
    let validate = server
        .post(&format!("/api/schedules/{}/rows/validate", schedule_id))
        .json(&body)
        .await;

    assert_eq!(create.status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(validate.status_code(), StatusCode::UNAUTHORIZED);
}
