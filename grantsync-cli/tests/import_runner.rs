//! End-to-end import runs against an in-memory database

use std::path::PathBuf;

use rust_xlsxwriter::Workbook;
use sqlx::AnyPool;
use sqlx::any::{AnyPoolOptions, install_default_drivers};
use tempfile::TempDir;

use grantsync_cli::import::{FailurePolicy, ImportError, run_import};

async fn memory_pool() -> AnyPool {
    install_default_drivers();
    AnyPoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap()
}

/// Reference tables plus the junction table, seeded with known ids
async fn setup_schema(pool: &AnyPool) {
    for sql in [
        "CREATE TABLE users (id INTEGER PRIMARY KEY, email TEXT NOT NULL)",
        "CREATE TABLE roles (id INTEGER PRIMARY KEY, name TEXT NOT NULL)",
        "CREATE TABLE customers (id INTEGER PRIMARY KEY, name TEXT NOT NULL)",
        "CREATE TABLE customer_permissions (
             user_id INTEGER NOT NULL,
             role_id INTEGER NOT NULL,
             customer_id INTEGER NOT NULL,
             created_at TEXT NOT NULL
         )",
        "INSERT INTO users (id, email) VALUES
             (1, 'ann@example.com'), (2, 'bob@example.com'), (3, 'cat@example.com')",
        "INSERT INTO roles (id, name) VALUES (10, 'Admin'), (11, 'Viewer')",
        "INSERT INTO customers (id, name) VALUES (100, 'Acme'), (101, 'Globex')",
    ] {
        sqlx::query(sql).execute(pool).await.unwrap();
    }
}

/// Write a workbook with the three key sheets, one header row each
fn write_workbook(
    dir: &TempDir,
    users: &[&str],
    roles: &[&str],
    customers: &[&str],
) -> PathBuf {
    let path = dir.path().join("grants.xlsx");
    let mut workbook = Workbook::new();

    for (name, header, values) in [
        ("Users", "email", users),
        ("Roles", "role_name", roles),
        ("Customers", "customer_name", customers),
    ] {
        let sheet = workbook.add_worksheet().set_name(name).unwrap();
        sheet.write_string(0, 0, header).unwrap();
        for (i, value) in values.iter().enumerate() {
            sheet.write_string(i as u32 + 1, 0, *value).unwrap();
        }
    }

    workbook.save(&path).unwrap();
    path
}

async fn count_grants(pool: &AnyPool) -> i64 {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM customer_permissions")
        .fetch_one(pool)
        .await
        .unwrap();
    count
}

#[tokio::test]
async fn test_idempotent_rerun() {
    let pool = memory_pool().await;
    setup_schema(&pool).await;
    let dir = TempDir::new().unwrap();
    let path = write_workbook(
        &dir,
        &["ann@example.com", "bob@example.com"],
        &["Admin", "Viewer"],
        &["Acme", "Globex"],
    );

    let first = run_import(&pool, &path, FailurePolicy::Tolerant).await.unwrap();
    assert_eq!(first.inserted, 2);
    assert_eq!(first.skipped, 0);

    let second = run_import(&pool, &path, FailurePolicy::Tolerant).await.unwrap();
    assert_eq!(second.inserted, 0);
    assert_eq!(second.skipped, 2);

    assert_eq!(count_grants(&pool).await, 2);
}

#[tokio::test]
async fn test_strict_unresolved_row_writes_nothing() {
    let pool = memory_pool().await;
    setup_schema(&pool).await;
    let dir = TempDir::new().unwrap();
    let path = write_workbook(
        &dir,
        &["ann@example.com", "ghost@example.com", "bob@example.com"],
        &["Admin", "Admin", "Viewer"],
        &["Acme", "Acme", "Globex"],
    );

    let err = run_import(&pool, &path, FailurePolicy::Strict).await.unwrap_err();

    match err.downcast_ref::<ImportError>() {
        Some(ImportError::UnresolvedReferences(rows)) => {
            assert_eq!(rows.len(), 1);
            assert_eq!(rows[0].row, 2);
            assert_eq!(rows[0].value, "ghost@example.com");
        }
        other => panic!("expected UnresolvedReferences, got {:?}", other),
    }

    assert_eq!(count_grants(&pool).await, 0);
}

#[tokio::test]
async fn test_tolerant_partial_success() {
    let pool = memory_pool().await;
    setup_schema(&pool).await;
    let dir = TempDir::new().unwrap();
    let path = write_workbook(
        &dir,
        &[
            "ann@example.com",
            "bob@example.com",
            "ghost@example.com",
            "cat@example.com",
            "ann@example.com",
        ],
        &["Admin", "Admin", "Admin", "Viewer", "Viewer"],
        &["Acme", "Globex", "Acme", "Acme", "Globex"],
    );

    let report = run_import(&pool, &path, FailurePolicy::Tolerant).await.unwrap();

    assert_eq!(report.total_rows, 5);
    assert_eq!(report.resolved, 4);
    assert_eq!(report.unresolved, 1);
    assert_eq!(report.inserted, 4);
    assert_eq!(count_grants(&pool).await, 4);
}

#[tokio::test]
async fn test_written_ids_match_reference_tables() {
    let pool = memory_pool().await;
    setup_schema(&pool).await;
    let dir = TempDir::new().unwrap();
    let path = write_workbook(&dir, &["bob@example.com"], &["Viewer"], &["Globex"]);

    run_import(&pool, &path, FailurePolicy::Strict).await.unwrap();

    let (user_id, role_id, customer_id): (i64, i64, i64) = sqlx::query_as(
        "SELECT user_id, role_id, customer_id FROM customer_permissions",
    )
    .fetch_one(&pool)
    .await
    .unwrap();

    assert_eq!((user_id, role_id, customer_id), (2, 11, 101));

    // Read back through the reference tables as well
    let (email, role, customer): (String, String, String) = sqlx::query_as(
        "SELECT u.email, r.name, c.name
         FROM customer_permissions p
         JOIN users u ON u.id = p.user_id
         JOIN roles r ON r.id = p.role_id
         JOIN customers c ON c.id = p.customer_id",
    )
    .fetch_one(&pool)
    .await
    .unwrap();

    assert_eq!(email, "bob@example.com");
    assert_eq!(role, "Viewer");
    assert_eq!(customer, "Globex");
}

#[tokio::test]
async fn test_midbatch_write_failure_rolls_back_everything() {
    let pool = memory_pool().await;
    setup_schema(&pool).await;

    // Rebuild the junction table with a constraint the last row violates,
    // so the failure lands after two rows are already staged.
    sqlx::query("DROP TABLE customer_permissions")
        .execute(&pool)
        .await
        .unwrap();
    sqlx::query(
        "CREATE TABLE customer_permissions (
             user_id INTEGER NOT NULL CHECK (user_id < 900),
             role_id INTEGER NOT NULL,
             customer_id INTEGER NOT NULL,
             created_at TEXT NOT NULL
         )",
    )
    .execute(&pool)
    .await
    .unwrap();
    sqlx::query("INSERT INTO users (id, email) VALUES (999, 'zed@example.com')")
        .execute(&pool)
        .await
        .unwrap();

    let dir = TempDir::new().unwrap();
    let path = write_workbook(
        &dir,
        &["ann@example.com", "bob@example.com", "zed@example.com"],
        &["Admin", "Admin", "Admin"],
        &["Acme", "Globex", "Acme"],
    );

    let err = run_import(&pool, &path, FailurePolicy::Strict).await.unwrap_err();

    assert!(matches!(
        err.downcast_ref::<ImportError>(),
        Some(ImportError::Write(_))
    ));
    assert_eq!(count_grants(&pool).await, 0);
}

#[tokio::test]
async fn test_empty_workbook_imports_nothing() {
    let pool = memory_pool().await;
    setup_schema(&pool).await;
    let dir = TempDir::new().unwrap();
    let path = write_workbook(&dir, &[], &[], &[]);

    let report = run_import(&pool, &path, FailurePolicy::Strict).await.unwrap();

    assert_eq!(report.total_rows, 0);
    assert_eq!(report.inserted, 0);
    assert_eq!(count_grants(&pool).await, 0);
}

#[tokio::test]
async fn test_row_count_mismatch_uses_minimum() {
    let pool = memory_pool().await;
    setup_schema(&pool).await;
    let dir = TempDir::new().unwrap();
    let path = write_workbook(
        &dir,
        &["ann@example.com", "bob@example.com", "cat@example.com"],
        &["Admin", "Viewer"],
        &["Acme", "Globex", "Acme"],
    );

    let report = run_import(&pool, &path, FailurePolicy::Strict).await.unwrap();

    assert_eq!(report.total_rows, 2);
    assert_eq!(report.inserted, 2);
}
