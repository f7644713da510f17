//! Integration tests for the PostgreSQL invoice store.
//!
//! # Requirements
//!
//! - Docker must be running (testcontainers launches a PostgreSQL container)
//! - Feature flag `postgres` must be enabled
//!
//! # Running
//!
//! ```sh
//! cargo test --features postgres --test postgres_tests -- --test-threads=1
//! ```
//!
//! All tests share a single PostgreSQL container (via `OnceLock`). Each test
//! creates a fresh `PgPool` and truncates the tables before running.

#![cfg(feature = "postgres")]

use chrono::NaiveDate;
use dashboard::prelude::*;
use dashboard::storage::postgres;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::sync::OnceLock;
use testcontainers::runners::AsyncRunner;
use testcontainers_modules::postgres::Postgres;

const LEE: &str = "3958dc9e-742f-4377-85e9-fec4b6a6442a";
const AMY: &str = "cc27c14a-0acf-4f4a-a6c9-d45682c144b9";

// ---------------------------------------------------------------------------
// Shared test environment (single container, fresh pool per test)
// ---------------------------------------------------------------------------

/// Keeps the container alive for the whole test binary.
///
/// Stored in a std `OnceLock` so it outlives the runtime of each
/// `#[tokio::test]`; every test opens its own pool from the URL.
struct PgTestEnv {
    _container: testcontainers::ContainerAsync<Postgres>,
    connection_url: String,
}

static TEST_ENV: OnceLock<PgTestEnv> = OnceLock::new();

async fn init_pg_env() -> &'static PgTestEnv {
    if let Some(env) = TEST_ENV.get() {
        return env;
    }

    let container = Postgres::default()
        .start()
        .await
        .expect("Failed to start PostgreSQL container, is Docker running?");

    let host = container.get_host().await.unwrap();
    let port = container.get_host_port_ipv4(5432).await.unwrap();
    let url = format!("postgres://postgres:postgres@{}:{}/postgres", host, port);

    let pool = PgPool::connect(&url)
        .await
        .expect("Failed to connect to PostgreSQL");
    postgres::migrate(&pool)
        .await
        .expect("Failed to run migrations");
    pool.close().await;

    let _ = TEST_ENV.set(PgTestEnv {
        _container: container,
        connection_url: url,
    });
    TEST_ENV.get().unwrap()
}

async fn pg_pool() -> PgPool {
    let env = init_pg_env().await;
    PgPoolOptions::new()
        .max_connections(2)
        .acquire_timeout(std::time::Duration::from_secs(30))
        .connect(&env.connection_url)
        .await
        .expect("Failed to connect to PostgreSQL")
}

/// Fresh store with two customers and no invoices
async fn clean_store() -> PostgresInvoiceService {
    let pool = pg_pool().await;
    sqlx::query("TRUNCATE invoices, customers")
        .execute(&pool)
        .await
        .expect("Failed to truncate tables");

    for (id, name, email) in [
        (LEE, "Lee Robinson", "lee@robinson.com"),
        (AMY, "Amy Burns", "amy@burns.com"),
    ] {
        sqlx::query(
            "INSERT INTO customers (id, name, email, image_url) VALUES ($1::uuid, $2, $3, $4)",
        )
        .bind(id)
        .bind(name)
        .bind(email)
        .bind(format!("/customers/{}.png", name.to_lowercase().replace(' ', "-")))
        .execute(&pool)
        .await
        .expect("Failed to insert customer");
    }

    PostgresInvoiceService::new(pool)
}

fn write(customer_id: &str, cents: i64, status: InvoiceStatus, date: (i32, u32, u32)) -> InvoiceWrite {
    InvoiceWrite {
        customer_id: customer_id.to_string(),
        amount: Cents(cents),
        status,
        date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_insert_and_get() {
    let store = clean_store().await;
    let id = store
        .insert(write(LEE, 4500, InvoiceStatus::Pending, (2024, 5, 1)))
        .await
        .unwrap();

    let invoice = store.get(&id).await.unwrap().unwrap();
    assert_eq!(invoice.customer_id, LEE);
    assert_eq!(invoice.amount, Cents(4500));
    assert_eq!(invoice.status, InvoiceStatus::Pending);
}

#[tokio::test]
async fn test_update_and_delete_by_id() {
    let store = clean_store().await;
    let id = store
        .insert(write(LEE, 100, InvoiceStatus::Pending, (2024, 1, 1)))
        .await
        .unwrap();
    let other = store
        .insert(write(AMY, 200, InvoiceStatus::Paid, (2024, 1, 2)))
        .await
        .unwrap();

    let affected = store
        .update(&id, write(AMY, 1250, InvoiceStatus::Paid, (2024, 5, 1)))
        .await
        .unwrap();
    assert_eq!(affected, 1);
    let updated = store.get(&id).await.unwrap().unwrap();
    assert_eq!(updated.customer_id, AMY);
    assert_eq!(updated.amount, Cents(1250));

    assert_eq!(store.delete(&id).await.unwrap(), 1);
    assert!(store.get(&id).await.unwrap().is_none());
    assert!(store.get(&other).await.unwrap().is_some());
}

#[tokio::test]
async fn test_malformed_id_matches_nothing() {
    let store = clean_store().await;
    store
        .insert(write(LEE, 100, InvoiceStatus::Pending, (2024, 1, 1)))
        .await
        .unwrap();

    let bogus = InvoiceId::new("not-a-uuid");
    assert!(store.get(&bogus).await.unwrap().is_none());
    assert_eq!(store.delete(&bogus).await.unwrap(), 0);
    assert_eq!(
        store
            .update(&bogus, write(LEE, 1, InvoiceStatus::Paid, (2024, 1, 1)))
            .await
            .unwrap(),
        0
    );
    assert_eq!(store.count_matching("").await.unwrap(), 1);
}

#[tokio::test]
async fn test_search_orders_and_filters() {
    let store = clean_store().await;
    store
        .insert(write(LEE, 15795, InvoiceStatus::Pending, (2023, 1, 10)))
        .await
        .unwrap();
    store
        .insert(write(AMY, 3040, InvoiceStatus::Paid, (2023, 3, 10)))
        .await
        .unwrap();
    store
        .insert(write(LEE, 44800, InvoiceStatus::Paid, (2023, 2, 10)))
        .await
        .unwrap();

    let all = store.search("", 10, 0).await.unwrap();
    let amounts: Vec<i64> = all.iter().map(|i| i.amount.value()).collect();
    assert_eq!(amounts, vec![3040, 44800, 15795]);
    assert_eq!(all[0].name, "Amy Burns");

    assert_eq!(store.count_matching("ROBINSON").await.unwrap(), 2);
    assert_eq!(store.count_matching("pending").await.unwrap(), 1);
    assert_eq!(store.count_matching("2023-03").await.unwrap(), 1);
    assert_eq!(store.count_matching("100%").await.unwrap(), 0);

    let page = store.search("", 2, 2).await.unwrap();
    assert_eq!(page.len(), 1);
    assert_eq!(page[0].amount, Cents(15795));
}

#[tokio::test]
async fn test_customers_ordered_by_name() {
    let store = clean_store().await;
    let names: Vec<String> = store
        .customers()
        .await
        .unwrap()
        .into_iter()
        .map(|c| c.name)
        .collect();
    assert_eq!(names, vec!["Amy Burns", "Lee Robinson"]);
}
