//! Router tests against the in-memory store.

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use bizdesk_core::movement::{Movement, MovementStatus, MovementType};
use bizdesk_core::records::{Account, AccountKind, Party, PartyKind, RecordStatus};
use bizdesk_core::store::InMemoryStore;
use bizdesk_shared::FinanceConfig;
use bizdesk_shared::types::{AccountId, MovementId, PartyId};
use chrono::{Duration, NaiveDate, Utc};
use http_body_util::BodyExt;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::{Value, json};
use tower::ServiceExt;

use crate::{AppState, create_router};

struct Harness {
    store: Arc<InMemoryStore>,
    router: Router,
    today: NaiveDate,
}

fn account(status: RecordStatus) -> Account {
    Account {
        id: AccountId::new(),
        name: "Main checking".to_string(),
        kind: AccountKind::Bank,
        current_balance: dec!(1000),
        initial_balance: dec!(1000),
        status,
        bank_name: None,
        branch: None,
        account_number: None,
    }
}

fn party(name: &str) -> Party {
    Party {
        id: PartyId::new(),
        name: name.to_string(),
        kind: PartyKind::Customer,
        status: RecordStatus::Active,
        email: None,
        phone: None,
        tax_id: None,
        address: None,
        city: None,
        state: None,
        postal_code: None,
        notes: None,
    }
}

fn movement(account_id: AccountId, status: MovementStatus, due_date: NaiveDate) -> Movement {
    let now = Utc::now();
    Movement {
        id: MovementId::new(),
        movement_type: MovementType::Income,
        description: "Invoice 42".to_string(),
        value: dec!(150),
        due_date,
        payment_date: None,
        status,
        account_id,
        destination_account_id: None,
        category_id: None,
        party_id: None,
        installment: None,
        parent_movement_id: None,
        notes: None,
        payment_method: None,
        document: None,
        created_at: now,
        updated_at: now,
    }
}

fn harness() -> Harness {
    let store = Arc::new(InMemoryStore::new());
    let state = AppState::new(Arc::clone(&store), FinanceConfig::default()).unwrap();
    let today = state.today();
    Harness {
        store,
        router: create_router(state),
        today,
    }
}

async fn send(router: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .unwrap();

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

fn decimal(value: &Value) -> Decimal {
    value.as_str().unwrap().parse().unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let h = harness();
    let (status, body) = send(&h.router, "GET", "/api/v1/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_create_movement_expands_installments() {
    let h = harness();
    let acc = account(RecordStatus::Active);
    h.store.put_account(acc.clone());

    let (status, body) = send(
        &h.router,
        "POST",
        "/api/v1/movements",
        Some(json!({
            "type": "expense",
            "description": "Laptop",
            "value": 100,
            "due_date": "2024-01-31",
            "account_id": acc.id,
            "installments": 3,
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0]["description"], "Laptop (1/3)");
    assert_eq!(rows[1]["due_date"], "2024-02-29");
    assert_eq!(decimal(&rows[0]["value"]), dec!(33.34));
    assert_eq!(rows[2]["parent_movement_id"], rows[0]["id"]);
    assert_eq!(h.store.movement_count(), 3);
}

#[tokio::test]
async fn test_create_movement_reports_field_errors() {
    let h = harness();
    let (status, body) = send(
        &h.router,
        "POST",
        "/api/v1/movements",
        Some(json!({ "type": "expense", "description": "", "value": "0", "due_date": "2024-01-31" })),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "VALIDATION_ERROR");
    let fields: Vec<_> = body["fields"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["field"].as_str().unwrap().to_string())
        .collect();
    assert!(fields.contains(&"description".to_string()));
    assert!(fields.contains(&"value".to_string()));
    assert!(fields.contains(&"account_id".to_string()));
    assert_eq!(h.store.movement_count(), 0);
}

fn field_names(body: &Value) -> Vec<String> {
    body["fields"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["field"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_create_movement_without_type_reports_field() {
    let h = harness();
    let acc = account(RecordStatus::Active);
    h.store.put_account(acc.clone());

    let (status, body) = send(
        &h.router,
        "POST",
        "/api/v1/movements",
        Some(json!({
            "description": "Consulting",
            "value": "500.00",
            "due_date": "2024-03-10",
            "account_id": acc.id,
        })),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "VALIDATION_ERROR");
    assert_eq!(field_names(&body), vec!["type"]);
    assert_eq!(h.store.movement_count(), 0);
}

#[tokio::test]
async fn test_create_movement_rejects_oversized_fields() {
    let h = harness();
    let acc = account(RecordStatus::Active);
    h.store.put_account(acc.clone());

    let (status, body) = send(
        &h.router,
        "POST",
        "/api/v1/movements",
        Some(json!({
            "type": "expense",
            "description": "Equipment",
            "value": "100000000000000",
            "due_date": "2024-03-10",
            "account_id": acc.id,
            "payment_method": "x".repeat(51),
            "document": "d".repeat(101),
        })),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "VALIDATION_ERROR");
    assert_eq!(field_names(&body), vec!["value", "payment_method", "document"]);
    assert_eq!(h.store.movement_count(), 0);
}

#[tokio::test]
async fn test_create_movement_rejects_inactive_account() {
    let h = harness();
    let acc = account(RecordStatus::Inactive);
    h.store.put_account(acc.clone());

    let (status, body) = send(
        &h.router,
        "POST",
        "/api/v1/movements",
        Some(json!({
            "type": "income",
            "description": "Consulting",
            "value": "500.00",
            "due_date": "2024-03-10",
            "account_id": acc.id,
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "ACCOUNT_INACTIVE");
}

#[tokio::test]
async fn test_partial_insert_reports_persisted_ids() {
    let h = harness();
    let acc = account(RecordStatus::Active);
    h.store.put_account(acc.clone());
    h.store.fail_inserts_after(2);

    let (status, body) = send(
        &h.router,
        "POST",
        "/api/v1/movements",
        Some(json!({
            "type": "expense",
            "description": "Equipment",
            "value": "500",
            "due_date": "2024-01-15",
            "account_id": acc.id,
            "installments": 5,
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"], "PARTIAL_INSERT");
    assert_eq!(body["inserted"].as_array().unwrap().len(), 2);
    assert_eq!(body["total"], 5);
    assert_eq!(body["failed_installment"], 3);
    assert_eq!(h.store.movement_count(), 2);
}

#[tokio::test]
async fn test_pay_defaults_to_today_then_rejects_second_payment() {
    let h = harness();
    let acc = account(RecordStatus::Active);
    let m = movement(acc.id, MovementStatus::Pending, h.today);
    h.store.put_movement(m.clone());
    let uri = format!("/api/v1/movements/{}/pay", m.id);

    let (status, body) = send(&h.router, "POST", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "paid");
    assert_eq!(body["payment_date"], h.today.to_string());

    let (status, body) = send(&h.router, "POST", &uri, None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "INVALID_TRANSITION");
}

#[tokio::test]
async fn test_pay_with_explicit_date() {
    let h = harness();
    let m = movement(AccountId::new(), MovementStatus::Pending, h.today);
    h.store.put_movement(m.clone());

    let (status, body) = send(
        &h.router,
        "POST",
        &format!("/api/v1/movements/{}/pay", m.id),
        Some(json!({ "payment_date": "2024-03-15" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["payment_date"], "2024-03-15");
}

#[tokio::test]
async fn test_cancel_unknown_movement_is_not_found() {
    let h = harness();
    let (status, body) = send(
        &h.router,
        "POST",
        &format!("/api/v1/movements/{}/cancel", MovementId::new()),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "MOVEMENT_NOT_FOUND");
}

#[tokio::test]
async fn test_list_filters_on_effective_status() {
    let h = harness();
    let acc = AccountId::new();
    let late = movement(acc, MovementStatus::Pending, h.today - Duration::days(3));
    let upcoming = movement(acc, MovementStatus::Pending, h.today + Duration::days(3));
    h.store.put_movement(late.clone());
    h.store.put_movement(upcoming);

    let (status, body) = send(&h.router, "GET", "/api/v1/movements?status=overdue", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["meta"]["total"], 1);
    assert_eq!(body["data"][0]["id"], late.id.to_string());
    assert_eq!(body["data"][0]["status"], "pending");
    assert_eq!(body["data"][0]["effective_status"], "overdue");
}

#[tokio::test]
async fn test_list_rejects_unknown_status() {
    let h = harness();
    let (status, body) = send(&h.router, "GET", "/api/v1/movements?status=late", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_delete_party_twice() {
    let h = harness();
    let p = party("Acme Ltd");
    h.store.put_party(p.clone());
    let uri = format!("/api/v1/parties/{}", p.id);

    let (status, _) = send(&h.router, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(&h.router, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "NOT_FOUND");
}

#[tokio::test]
async fn test_list_parties_by_search() {
    let h = harness();
    h.store.put_party(party("Acme Ltd"));
    h.store.put_party(party("Globex"));

    let (status, body) = send(&h.router, "GET", "/api/v1/parties?search=acme", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["name"], "Acme Ltd");
}

#[tokio::test]
async fn test_list_parties_by_contact_email() {
    let h = harness();
    let mut acme = party("Acme Ltd");
    acme.email = Some("finance@acme.example".to_string());
    h.store.put_party(acme);
    h.store.put_party(party("Globex"));

    let (status, body) = send(&h.router, "GET", "/api/v1/parties?search=finance%40acme", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["name"], "Acme Ltd");
}

#[tokio::test]
async fn test_update_party_status() {
    let h = harness();
    let p = party("Acme Ltd");
    h.store.put_party(p.clone());
    let uri = format!("/api/v1/parties/{}", p.id);

    let (status, body) = send(&h.router, "PATCH", &uri, Some(json!({ "status": "inativo" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "inactive");

    let (status, body) = send(&h.router, "GET", "/api/v1/parties?status=active", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.as_array().unwrap().is_empty());

    let (status, _) = send(&h.router, "PATCH", &uri, Some(json!({ "status": "archived" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (status, _) = send(&h.router, "PATCH", &uri, Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let missing = format!("/api/v1/parties/{}", PartyId::new());
    let (status, body) = send(&h.router, "PATCH", &missing, Some(json!({ "status": "active" }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "NOT_FOUND");
}

#[tokio::test]
async fn test_monthly_report_rejects_zero_months() {
    let h = harness();
    let (status, body) = send(&h.router, "GET", "/api/v1/finance/reports/monthly?months=0", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "INVALID_MONTHS");
}

#[tokio::test]
async fn test_monthly_report_defaults_to_configured_length() {
    let h = harness();
    let (status, body) = send(&h.router, "GET", "/api/v1/finance/reports/monthly", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["months"].as_array().unwrap().len(), 6);
}

#[tokio::test]
async fn test_category_report_rejects_inverted_period() {
    let h = harness();
    let (status, body) = send(
        &h.router,
        "GET",
        "/api/v1/finance/reports/categories?from=2024-04-01&to=2024-03-01",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "INVALID_PERIOD");
}

#[tokio::test]
async fn test_overview_on_empty_store() {
    let h = harness();
    let (status, body) = send(&h.router, "GET", "/api/v1/finance/overview", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.is_object());
}
