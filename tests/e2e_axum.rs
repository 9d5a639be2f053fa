//! End-to-end tests for the Axum HTTP API layer.
//!
//! These tests use mock repositories - no database required.
//! Run with: `cargo test --features "axum_api mocks" --test e2e_axum`

#![cfg(all(feature = "axum_api", feature = "mocks"))]
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing)]

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use chrono::{DateTime, Duration, Utc};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;
use waypoint::api::{app, AppState};
use waypoint::{
    MockDirectoryRepository, MockNotifier, MockTicketRepository, MockTokenRepository,
    WaypointConfig,
};

fn create_app() -> (Router, MockNotifier) {
    create_app_with_config(WaypointConfig::default())
}

fn create_app_with_config(config: WaypointConfig) -> (Router, MockNotifier) {
    let notifier = MockNotifier::new();
    let state = AppState {
        directory: MockDirectoryRepository::new(),
        tickets: MockTicketRepository::new(),
        tokens: MockTokenRepository::new().with_token_length(config.token_length),
        notifier: notifier.clone(),
        config,
    };

    let router = app::<
        MockDirectoryRepository,
        MockTicketRepository,
        MockTokenRepository,
        MockNotifier,
    >()
    .with_state(state);

    (router, notifier)
}

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = builder
        .body(Body::from(
            body.map(|b| b.to_string()).unwrap_or_default(),
        ))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

/// Bearer tokens for one provisioned admin, manager, and employee.
struct Accounts {
    admin: String,
    manager: String,
    employee: String,
}

/// Provisions admin -> manager -> employee entirely over HTTP and logs
/// each one in.
async fn provision(app: &Router) -> Accounts {
    let (status, _) = send(
        app,
        "POST",
        "/travel_app/add_admin",
        None,
        Some(json!({"username": "root", "password": "rootpassword"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(
        app,
        "POST",
        "/admin/login",
        None,
        Some(json!({"username": "root", "password": "rootpassword"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let admin = body["token"].as_str().unwrap().to_owned();

    let (status, _) = send(
        app,
        "POST",
        "/admin/manage-manager",
        Some(&admin),
        Some(json!({
            "username": "marta",
            "password": "managerpass",
            "email": "marta@example.com"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = send(
        app,
        "POST",
        "/admin/manage-employee",
        Some(&admin),
        Some(json!({
            "username": "erik",
            "password": "employeepass",
            "email": "erik@example.com",
            "manager_id": 1
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(
        app,
        "POST",
        "/manager/login",
        None,
        Some(json!({"username": "marta", "password": "managerpass"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let manager = body["token"].as_str().unwrap().to_owned();

    let (status, body) = send(
        app,
        "POST",
        "/employee/login",
        None,
        Some(json!({"username": "erik", "password": "employeepass"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let employee = body["token"].as_str().unwrap().to_owned();

    Accounts {
        admin,
        manager,
        employee,
    }
}

fn trip_body() -> Value {
    json!({
        "from_location": "Berlin",
        "to_location": "Munich",
        "start_date": "2026-03-10",
        "end_date": "2026-03-12",
        "preferred_travel_mode": "Train",
        "purpose_of_travel": "Client onboarding"
    })
}

async fn submit_ticket(app: &Router, employee_token: &str) -> i64 {
    let (status, body) = send(
        app,
        "POST",
        "/employee/tickets",
        Some(employee_token),
        Some(trip_body()),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["ticket"]["id"].as_i64().unwrap()
}

#[tokio::test]
async fn test_created_ticket_starts_unresponded() {
    let (app, _) = create_app();
    let accounts = provision(&app).await;

    let (status, body) = send(
        &app,
        "POST",
        "/employee/tickets",
        Some(&accounts.employee),
        Some(trip_body()),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    let ticket = &body["ticket"];
    assert_eq!(ticket["manager_ticket_status"], "Not Responded");
    assert_eq!(ticket["admin_ticket_status"], "Not Responded");
    assert_eq!(ticket["no_of_submission"], 1);
    // reviewer derived from the employee record, not the request body
    assert_eq!(ticket["manager_id"], 1);
}

#[tokio::test]
async fn test_manager_reject_sets_status_and_notifies() {
    let (app, notifier) = create_app();
    let accounts = provision(&app).await;
    let ticket_id = submit_ticket(&app, &accounts.employee).await;
    let sent_before = notifier.sent_count();

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/manager/reject-ticket/{ticket_id}"),
        Some(&accounts.manager),
        Some(json!({"feedback": "dates conflict"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ticket"]["manager_ticket_status"], "Rejected");
    assert_eq!(body["ticket"]["additional_request_admin"], "dates conflict");

    let sent = notifier.sent.lock().unwrap();
    assert_eq!(sent.len(), sent_before + 1);
    let mail = sent.last().unwrap();
    assert_eq!(mail.to, "erik@example.com");
    assert_eq!(mail.subject, "Ticket Rejected");
}

#[tokio::test]
async fn test_manager_reject_succeeds_when_notifier_fails() {
    let (app, notifier) = create_app();
    let accounts = provision(&app).await;
    let ticket_id = submit_ticket(&app, &accounts.employee).await;
    notifier.fail_deliveries();

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/manager/reject-ticket/{ticket_id}"),
        Some(&accounts.manager),
        Some(json!({"feedback": "dates conflict"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ticket"]["manager_ticket_status"], "Rejected");
}

#[tokio::test]
async fn test_delete_blocked_after_manager_response() {
    let (app, _) = create_app();
    let accounts = provision(&app).await;
    let ticket_id = submit_ticket(&app, &accounts.employee).await;

    let (status, _) = send(
        &app,
        "PUT",
        &format!("/manager/approve-ticket/{ticket_id}"),
        Some(&accounts.manager),
        Some(json!({"feedback": "have a good trip"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(
        &app,
        "DELETE",
        &format!("/employee/tickets/{ticket_id}"),
        Some(&accounts.employee),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "failed");

    // ticket persists
    let (status, body) = send(
        &app,
        "GET",
        "/employee/tickets",
        Some(&accounts.employee),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["tickets"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_delete_allowed_while_unresponded() {
    let (app, _) = create_app();
    let accounts = provision(&app).await;
    let ticket_id = submit_ticket(&app, &accounts.employee).await;

    let (status, body) = send(
        &app,
        "DELETE",
        &format!("/employee/tickets/{ticket_id}"),
        Some(&accounts.employee),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
}

#[tokio::test]
async fn test_login_wrong_password() {
    let (app, _) = create_app();
    provision(&app).await;

    let (status, body) = send(
        &app,
        "POST",
        "/employee/login",
        None,
        Some(json!({"username": "erik", "password": "wrongpassword"})),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["status"], "failed");
    assert!(body.get("token").is_none());
}

#[tokio::test]
async fn test_login_token_follows_configuration() {
    let (app, _) = create_app_with_config(WaypointConfig {
        token_expiry: Duration::hours(1),
        token_length: 40,
        ..WaypointConfig::default()
    });

    let (status, _) = send(
        &app,
        "POST",
        "/travel_app/add_admin",
        None,
        Some(json!({"username": "root", "password": "rootpassword"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(
        &app,
        "POST",
        "/admin/login",
        None,
        Some(json!({"username": "root", "password": "rootpassword"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(body["token"].as_str().unwrap().len(), 40);
    let expires_at: DateTime<Utc> = body["expires_at"].as_str().unwrap().parse().unwrap();
    assert!(expires_at <= Utc::now() + Duration::hours(1));
    assert!(expires_at > Utc::now() + Duration::minutes(55));
}

#[tokio::test]
async fn test_login_wrong_role_namespace() {
    let (app, _) = create_app();
    provision(&app).await;

    // employee credentials at the manager login fail like a bad password
    let (status, _) = send(
        &app,
        "POST",
        "/manager/login",
        None,
        Some(json!({"username": "erik", "password": "employeepass"})),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_employee_token_rejected_on_admin_endpoint() {
    let (app, _) = create_app();
    let accounts = provision(&app).await;

    let (status, body) = send(
        &app,
        "GET",
        "/admin/dashboard",
        Some(&accounts.employee),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "Permission denied");

    // and no mutation path either
    let (status, _) = send(
        &app,
        "PUT",
        "/admin/close-ticket",
        Some(&accounts.employee),
        Some(json!({"ticket_id": 1})),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_missing_token_unauthorized() {
    let (app, _) = create_app();

    let (status, _) = send(&app, "GET", "/admin/dashboard", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_revokes_token() {
    let (app, _) = create_app();
    let accounts = provision(&app).await;

    let (status, _) = send(
        &app,
        "POST",
        "/travel_app/logout",
        Some(&accounts.employee),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(
        &app,
        "GET",
        "/employee/tickets",
        Some(&accounts.employee),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_edit_increments_submission_counter() {
    let (app, _) = create_app();
    let accounts = provision(&app).await;
    let ticket_id = submit_ticket(&app, &accounts.employee).await;

    let (status, body) = send(
        &app,
        "PATCH",
        &format!("/employee/tickets/{ticket_id}"),
        Some(&accounts.employee),
        Some(json!({"to_location": "Hamburg"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ticket"]["to_location"], "Hamburg");
    assert_eq!(body["ticket"]["from_location"], "Berlin");
    assert_eq!(body["ticket"]["no_of_submission"], 2);
}

#[tokio::test]
async fn test_admin_approve_writes_manager_track() {
    let (app, _) = create_app();
    let accounts = provision(&app).await;
    let ticket_id = submit_ticket(&app, &accounts.employee).await;

    let (status, body) = send(
        &app,
        "PUT",
        "/admin/approve-ticket",
        Some(&accounts.admin),
        Some(json!({"ticket_id": ticket_id, "feedback": "looks fine"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ticket"]["manager_ticket_status"], "Approved");
    assert_eq!(body["ticket"]["admin_ticket_status"], "Not Responded");
    assert_eq!(body["ticket"]["additional_request_admin"], "looks fine");
}

#[tokio::test]
async fn test_process_requires_dual_approval() {
    let (app, _) = create_app();
    let accounts = provision(&app).await;
    let ticket_id = submit_ticket(&app, &accounts.employee).await;

    let (status, _) = send(
        &app,
        "PUT",
        &format!("/manager/approve-ticket/{ticket_id}"),
        Some(&accounts.manager),
        Some(json!({"feedback": ""})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // admin-approve also lands on the manager track, so the admin track
    // never reaches Approved and processing is refused
    let (status, body) = send(
        &app,
        "POST",
        "/travel_app/process_approved_request",
        Some(&accounts.admin),
        Some(json!({"ticket_id": ticket_id})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        "Request not approved by both manager and admin"
    );
}

#[tokio::test]
async fn test_close_ticket_is_idempotent() {
    let (app, _) = create_app();
    let accounts = provision(&app).await;
    let ticket_id = submit_ticket(&app, &accounts.employee).await;

    for _ in 0..2 {
        let (status, body) = send(
            &app,
            "PUT",
            "/admin/close-ticket",
            Some(&accounts.admin),
            Some(json!({"ticket_id": ticket_id})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["ticket"]["admin_ticket_status"], "Close");
    }
}

#[tokio::test]
async fn test_request_edit_reviewer_only() {
    let (app, _) = create_app();
    let accounts = provision(&app).await;
    let ticket_id = submit_ticket(&app, &accounts.employee).await;

    let (status, _) = send(
        &app,
        "POST",
        "/travel_app/request_edit",
        Some(&accounts.employee),
        Some(json!({"ticket_id": ticket_id, "feedback": "wrong dates"})),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = send(
        &app,
        "POST",
        "/travel_app/request_edit",
        Some(&accounts.manager),
        Some(json!({"ticket_id": ticket_id, "feedback": "wrong dates"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Ticket waiting for edit");
}

#[tokio::test]
async fn test_manager_dashboard_scoped_to_assignments() {
    let (app, _) = create_app();
    let accounts = provision(&app).await;
    submit_ticket(&app, &accounts.employee).await;

    let (status, body) = send(
        &app,
        "GET",
        "/manager/dashboard",
        Some(&accounts.manager),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let tickets = body["tickets"].as_array().unwrap();
    assert_eq!(tickets.len(), 1);
    assert_eq!(tickets[0]["manager_id"], 1);
}

#[tokio::test]
async fn test_filter_by_place_and_status() {
    let (app, _) = create_app();
    let accounts = provision(&app).await;
    submit_ticket(&app, &accounts.employee).await;

    let (status, body) = send(
        &app,
        "GET",
        "/manager/filter?place=mun&status=Not%20Responded",
        Some(&accounts.manager),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["tickets"].as_array().unwrap().len(), 1);

    let (status, body) = send(
        &app,
        "GET",
        "/manager/filter?place=paris",
        Some(&accounts.manager),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["tickets"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_sort_requests_rejects_unknown_column() {
    let (app, _) = create_app();
    let accounts = provision(&app).await;

    let (status, body) = send(
        &app,
        "GET",
        "/travel_app/sort_requests?sort_by=hashed_password",
        Some(&accounts.manager),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "failed");
}

#[tokio::test]
async fn test_search_by_person() {
    let (app, _) = create_app();
    let accounts = provision(&app).await;
    submit_ticket(&app, &accounts.employee).await;

    let (status, body) = send(
        &app,
        "GET",
        "/travel_app/search_by_person?person_name=eri",
        Some(&accounts.manager),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["tickets"].as_array().unwrap().len(), 1);

    let (status, body) = send(
        &app,
        "GET",
        "/travel_app/search_by_person?person_name=nobody",
        Some(&accounts.manager),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["tickets"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_duplicate_username_rejected() {
    let (app, _) = create_app();
    let accounts = provision(&app).await;

    let (status, body) = send(
        &app,
        "POST",
        "/admin/manage-manager",
        Some(&accounts.admin),
        Some(json!({
            "username": "marta",
            "password": "anotherpass",
            "email": "marta2@example.com"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Username already exists");
}

#[tokio::test]
async fn test_create_employee_under_missing_manager() {
    let (app, _) = create_app();
    let accounts = provision(&app).await;

    let (status, _) = send(
        &app,
        "POST",
        "/admin/manage-employee",
        Some(&accounts.admin),
        Some(json!({
            "username": "ghost",
            "password": "ghostpass1",
            "email": "ghost@example.com",
            "manager_id": 404
        })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_ticket_validation() {
    let (app, _) = create_app();
    let accounts = provision(&app).await;

    let (status, body) = send(
        &app,
        "POST",
        "/employee/tickets",
        Some(&accounts.employee),
        Some(json!({
            "from_location": "",
            "to_location": "Munich",
            "start_date": "2026-03-10",
            "end_date": "2026-03-12",
            "purpose_of_travel": "Client onboarding"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "failed");
}
