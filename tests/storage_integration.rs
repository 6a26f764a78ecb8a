/// Storage tests against a real Postgres.
/// Marked ignored so the default test run needs no database; run with
/// `DATABASE_URL=postgres://... cargo test --test storage_integration -- --ignored`.
/// CI runs them against a Postgres service (`.github/workflows/ci.yml`).
mod common;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use common::{body_json, build_test_app, post_json};
use cowork_leads_api::db_storage::LeadStorage;
use cowork_leads_api::errors::AppError;
use cowork_leads_api::models::NewLead;
use serde_json::json;
use sqlx::PgPool;

fn jane() -> NewLead {
    NewLead {
        name: "Jane Doe".to_string(),
        email: "jane@x.com".to_string(),
        phone: Some("9876543210".to_string()),
        company: Some("Acme".to_string()),
        location: None,
        message: None,
    }
}

async fn row_count(pool: &PgPool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM leads")
        .fetch_one(pool)
        .await
        .unwrap()
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn create_lead_returns_generated_fields(pool: PgPool) {
    let storage = LeadStorage::new(pool.clone());
    // Tolerates clock skew between this host and the database
    let before = Utc::now() - Duration::seconds(30);

    let lead = storage.create_lead(&jane()).await.unwrap();

    assert!(lead.id > 0);
    assert_eq!(lead.name, "Jane Doe");
    assert_eq!(lead.email, "jane@x.com");
    assert_eq!(lead.phone.as_deref(), Some("9876543210"));
    assert_eq!(lead.company.as_deref(), Some("Acme"));
    assert_eq!(lead.location, "General");
    assert!(lead.created_at >= before);
    assert_eq!(row_count(&pool).await, 1);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn ids_increase_and_duplicates_create_new_rows(pool: PgPool) {
    let storage = LeadStorage::new(pool.clone());

    let first = storage.create_lead(&jane()).await.unwrap();
    let second = storage.create_lead(&jane()).await.unwrap();

    assert!(second.id > first.id);
    assert_eq!(row_count(&pool).await, 2);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn supplied_location_wins_over_default(pool: PgPool) {
    let storage = LeadStorage::with_default_location(pool, "Head Office");

    let mut lead = jane();
    let defaulted = storage.create_lead(&lead).await.unwrap();
    lead.location = Some("Malviya Nagar".to_string());
    let supplied = storage.create_lead(&lead).await.unwrap();

    assert_eq!(defaulted.location, "Head Office");
    assert_eq!(supplied.location, "Malviya Nagar");
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn null_name_is_constraint_violation(pool: PgPool) {
    // Bypasses the validator to hit the column constraint directly
    let err = sqlx::query("INSERT INTO leads (name, email) VALUES (NULL, 'jane@x.com')")
        .execute(&pool)
        .await
        .map_err(AppError::from)
        .unwrap_err();

    assert!(matches!(err, AppError::ConstraintViolation(_)));
    assert_eq!(row_count(&pool).await, 0);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn submit_inquiry_end_to_end(pool: PgPool) {
    let app = build_test_app(pool.clone(), None);
    let response = post_json(
        app,
        "/api/v1/leads?variant=inquiry",
        json!({
            "firstName": "Jane",
            "lastName": "Doe",
            "email": "jane@x.com",
            "phone": "9876543210",
            "company": "Acme"
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert!(json["id"].as_i64().unwrap() > 0);
    assert_eq!(json["name"], "Jane Doe");
    assert_eq!(json["location"], "General Inquiry");
    assert!(json["createdAt"].is_string());
    assert_eq!(row_count(&pool).await, 1);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn rejected_submission_leaves_no_row(pool: PgPool) {
    let app = build_test_app(pool.clone(), None);
    let response = post_json(
        app,
        "/api/v1/leads",
        json!({ "name": "Jane Doe", "email": "not-an-email" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(row_count(&pool).await, 0);
}
