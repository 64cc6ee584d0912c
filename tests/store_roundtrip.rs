//! End-to-end tests against a real PostgreSQL.
//!
//! These tests require `DATABASE_URL` to point at a database the user may create schemas in.
//! Each test works in its own throwaway schema, dropped at the end.
//!
//! Run with: `DATABASE_URL=postgres://localhost/crm cargo test -- --ignored`

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use crm_service::{app, ensure_tables, AppState, Settings};
use serde_json::{json, Value};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tower::ServiceExt;

struct TestDb {
    router: Router,
    pool: PgPool,
    schema: String,
}

impl TestDb {
    async fn new() -> Self {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for store tests");
        let pool = PgPoolOptions::new()
            .max_connections(2)
            .connect(&url)
            .await
            .expect("connect to DATABASE_URL");
        let schema = format!("crm_test_{}", uuid::Uuid::new_v4().simple());
        let state = AppState::new(pool.clone(), &schema);
        ensure_tables(&pool, &state.tables).await.expect("create tables");
        let settings = Settings::from_lookup(|_| None).expect("default settings");
        TestDb {
            router: app(state, &settings),
            pool,
            schema,
        }
    }

    async fn call(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let req = match body {
            Some(b) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(b.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("request");
        let resp = self.router.clone().oneshot(req).await.expect("infallible");
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.expect("body");
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("json body")
        };
        (status, body)
    }

    async fn create_customer(&self, first: &str, last: &str, phone: &str) -> i64 {
        let (status, body) = self
            .call(
                Method::POST,
                "/customers",
                Some(json!({"first_name": first, "last_name": last, "phone_number": phone})),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["id"].as_i64().expect("id")
    }

    async fn add_address(&self, customer_id: i64, city: &str) -> i64 {
        let (status, body) = self
            .call(
                Method::POST,
                &format!("/customers/{}/addresses", customer_id),
                Some(address(city)),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["id"].as_i64().expect("id")
    }

    async fn teardown(self) {
        let _ = sqlx::query(&format!("DROP SCHEMA \"{}\" CASCADE", self.schema))
            .execute(&self.pool)
            .await;
        self.pool.close().await;
    }
}

fn address(city: &str) -> Value {
    json!({"address_details": "12 Marine Drive", "city": city, "state": "MH", "pin_code": "400001"})
}

#[tokio::test]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn created_customer_reads_back_unchanged() {
    let db = TestDb::new().await;
    let id = db.create_customer("Alice", "Smith", "111").await;

    let (status, body) = db.call(Method::GET, &format!("/customers/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], id);
    assert_eq!(body["first_name"], "Alice");
    assert_eq!(body["last_name"], "Smith");
    assert_eq!(body["phone_number"], "111");
    db.teardown().await;
}

#[tokio::test]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn update_then_read_returns_new_values() {
    let db = TestDb::new().await;
    let id = db.create_customer("Alice", "Smith", "111").await;

    let new_fields = json!({"first_name": "Alicia", "last_name": "Smyth", "phone_number": "999"});
    let (status, body) = db
        .call(Method::PUT, &format!("/customers/{}", id), Some(new_fields.clone()))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Customer updated successfully");
    assert_eq!(body["first_name"], "Alicia");

    let (_, body) = db.call(Method::GET, &format!("/customers/{}", id), None).await;
    assert_eq!(body["first_name"], "Alicia");
    assert_eq!(body["last_name"], "Smyth");
    assert_eq!(body["phone_number"], "999");

    let (status, _) = db.call(Method::PUT, "/customers/987654", Some(new_fields)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    db.teardown().await;
}

#[tokio::test]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn deleted_customer_is_not_found() {
    let db = TestDb::new().await;
    let id = db.create_customer("Alice", "Smith", "111").await;

    let (status, body) = db.call(Method::DELETE, &format!("/customers/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Customer deleted successfully", "id": id}));

    let (status, body) = db.call(Method::GET, &format!("/customers/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Customer not found");

    let (status, _) = db.call(Method::DELETE, &format!("/customers/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    db.teardown().await;
}

#[tokio::test]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn fifteen_customers_paginate_into_two_pages() {
    let db = TestDb::new().await;
    for i in 0..15 {
        db.create_customer(&format!("First{}", i), "Last", &format!("555-{:04}", i)).await;
    }

    let (status, body) = db.call(Method::GET, "/customers?page=1&limit=10", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "success");
    assert_eq!(body["data"].as_array().map(Vec::len), Some(10));
    assert_eq!(body["total"], 15);
    assert_eq!(body["page"], 1);
    assert_eq!(body["totalPages"], 2);

    let (_, body) = db.call(Method::GET, "/customers?page=2&limit=10", None).await;
    assert_eq!(body["data"].as_array().map(Vec::len), Some(5));
    assert_eq!(body["page"], 2);

    let (_, body) = db.call(Method::GET, "/customers?page=3&limit=10", None).await;
    assert_eq!(body["data"], json!([]));
    assert_eq!(body["total"], 15);
    db.teardown().await;
}

#[tokio::test]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn out_of_range_paging_is_clamped() {
    let db = TestDb::new().await;
    db.create_customer("Alice", "Smith", "111").await;

    let (status, body) = db.call(Method::GET, "/customers?page=0&limit=0", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["page"], 1);
    assert_eq!(body["data"].as_array().map(Vec::len), Some(1));
    assert_eq!(body["totalPages"], 1);
    db.teardown().await;
}

#[tokio::test]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn search_matches_case_insensitive_substring() {
    let db = TestDb::new().await;
    let alice = db.create_customer("Alice", "Smith", "111").await;
    db.create_customer("Bob", "Jones", "222").await;

    let (status, body) = db.call(Method::GET, "/customers?search=ali", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 1);
    assert_eq!(body["data"][0]["id"], alice);

    let (_, body) = db.call(Method::GET, "/customers?search=22", None).await;
    assert_eq!(body["total"], 1);
    assert_eq!(body["data"][0]["first_name"], "Bob");

    let (_, body) = db.call(Method::GET, "/customers?search=%25", None).await;
    assert_eq!(body["total"], 0);
    db.teardown().await;
}

#[tokio::test]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn city_filter_matches_any_address() {
    let db = TestDb::new().await;
    let x = db.create_customer("Xavier", "Rao", "333").await;
    let y = db.create_customer("Yara", "Iyer", "444").await;
    db.add_address(x, "Mumbai").await;
    db.add_address(x, "Pune").await;
    db.add_address(y, "Chennai").await;

    let (status, body) = db.call(Method::GET, "/customers?city=mum", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 1);
    assert_eq!(body["data"][0]["id"], x);

    let (_, body) = db.call(Method::GET, "/customers?city=chen&search=xav", None).await;
    assert_eq!(body["total"], 0);
    db.teardown().await;
}

#[tokio::test]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn deleting_customer_leaves_its_addresses() {
    let db = TestDb::new().await;
    let id = db.create_customer("Alice", "Smith", "111").await;
    let address_id = db.add_address(id, "Mumbai").await;

    let (status, _) = db.call(Method::DELETE, &format!("/customers/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = db.call(Method::GET, &format!("/addresses/{}", address_id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["customer_id"], id);
    assert_eq!(body["city"], "Mumbai");
    db.teardown().await;
}

#[tokio::test]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn address_without_pin_code_creates_nothing() {
    let db = TestDb::new().await;
    let id = db.create_customer("Alice", "Smith", "111").await;

    let (status, _) = db
        .call(
            Method::POST,
            &format!("/customers/{}/addresses", id),
            Some(json!({"address_details": "1 Main St", "city": "Mumbai", "state": "MH"})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = db.call(Method::GET, &format!("/customers/{}/addresses", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"data": []}));
    db.teardown().await;
}

#[tokio::test]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn address_lifecycle() {
    let db = TestDb::new().await;
    let id = db.create_customer("Alice", "Smith", "111").await;
    let address_id = db.add_address(id, "Mumbai").await;

    let (status, body) = db
        .call(Method::PUT, &format!("/addresses/{}", address_id), Some(address("Nagpur")))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Address updated successfully");
    assert_eq!(body["city"], "Nagpur");
    assert_eq!(body["customer_id"], id);

    let (_, body) = db.call(Method::GET, &format!("/customers/{}/addresses", id), None).await;
    assert_eq!(body["data"][0]["city"], "Nagpur");

    let (status, body) = db.call(Method::DELETE, &format!("/addresses/{}", address_id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Address deleted successfully", "id": address_id}));

    let (status, _) = db.call(Method::DELETE, &format!("/addresses/{}", address_id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = db
        .call(Method::PUT, &format!("/addresses/{}", address_id), Some(address("Goa")))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    db.teardown().await;
}

#[tokio::test]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn address_for_missing_customer_is_404() {
    let db = TestDb::new().await;

    let (status, body) = db.call(Method::POST, "/customers/424242/addresses", Some(address("Pune"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Customer not found");

    let (status, _) = db.call(Method::GET, "/customers/424242/addresses", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    db.teardown().await;
}

#[tokio::test]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn create_with_addresses_returns_them() {
    let db = TestDb::new().await;
    let (status, body) = db
        .call(
            Method::POST,
            "/customers",
            Some(json!({
                "first_name": "Alice",
                "last_name": "Smith",
                "phone_number": "111",
                "addresses": [address("Mumbai"), address("Pune")]
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = body["id"].as_i64().expect("id");
    assert_eq!(body["addresses"].as_array().map(Vec::len), Some(2));
    assert_eq!(body["addresses"][1]["customer_id"], id);

    let (_, body) = db.call(Method::GET, &format!("/customers/{}/addresses", id), None).await;
    assert_eq!(body["data"].as_array().map(Vec::len), Some(2));
    db.teardown().await;
}

#[tokio::test]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn invalid_nested_address_creates_no_customer() {
    let db = TestDb::new().await;
    let (status, _) = db
        .call(
            Method::POST,
            "/customers",
            Some(json!({
                "first_name": "Alice",
                "last_name": "Smith",
                "phone_number": "111",
                "addresses": [address("Mumbai"), {"city": "Pune"}]
            })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, body) = db.call(Method::GET, "/customers", None).await;
    assert_eq!(body["total"], 0);
    db.teardown().await;
}

#[tokio::test]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn delete_all_keeps_addresses_and_never_reuses_ids() {
    let db = TestDb::new().await;
    let a = db.create_customer("Alice", "Smith", "111").await;
    db.create_customer("Bob", "Jones", "222").await;
    let address_id = db.add_address(a, "Mumbai").await;

    let (status, body) = db.call(Method::DELETE, "/customers", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "All customers deleted successfully", "deletedCount": 2}));

    let (_, body) = db.call(Method::GET, "/customers", None).await;
    assert_eq!(body["total"], 0);
    assert_eq!(body["totalPages"], 0);

    let (status, _) = db.call(Method::GET, &format!("/addresses/{}", address_id), None).await;
    assert_eq!(status, StatusCode::OK);

    let c = db.create_customer("Carol", "White", "333").await;
    assert!(c > a);
    db.teardown().await;
}

#[tokio::test]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn ready_reports_database_ok() {
    let db = TestDb::new().await;
    let (status, body) = db.call(Method::GET, "/ready", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok", "database": "ok"}));
    db.teardown().await;
}
