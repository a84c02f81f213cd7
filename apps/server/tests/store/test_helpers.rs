//! Shared helpers for store tests.

use fmcp_lib::config::DatabaseConfig;
use fmcp_lib::db::DbPool;
use fmcp_lib::models::{
    CpRow, Document, FmeaRow, Item, ItemRows, RegisterDocumentRequest,
};

pub const UPLOADER: &str = "alice";

/// Fresh in-memory database with migrations applied. Each call is isolated.
pub async fn create_test_pool() -> DbPool {
    let config = DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        max_connections: 1,
        min_connections: 1,
    };

    let pool = DbPool::new(&config)
        .await
        .expect("Failed to open in-memory database");
    pool.run_migrations()
        .await
        .expect("Failed to run migrations");
    pool
}

pub fn fmea_row(failure_mode: &str, severity: i32, occurrence: i32, detection: i32) -> FmeaRow {
    FmeaRow {
        failure_mode: Some(failure_mode.to_string()),
        failure_cause: Some(format!("{} cause", failure_mode)),
        severity: Some(severity),
        occurrence: Some(occurrence),
        detection: Some(detection),
        ..Default::default()
    }
}

pub fn cp_row(characteristic: &str, method: &str) -> CpRow {
    CpRow {
        product_characteristic: Some(characteristic.to_string()),
        control_method: Some(method.to_string()),
        ..Default::default()
    }
}

pub fn register_request(file_name: &str, kind: &str, rows: Option<ItemRows>) -> RegisterDocumentRequest {
    RegisterDocumentRequest {
        file_name: file_name.to_string(),
        document_type: kind.to_string(),
        version: None,
        rows,
        failure_effects: None,
    }
}

/// Register an FMEA document with the given rows.
pub async fn seed_fmea(pool: &DbPool, rows: Vec<FmeaRow>) -> (Document, Vec<Item>) {
    pool.register_document(
        register_request("pfmea.xlsx", "FMEA", Some(ItemRows::Fmea(rows))),
        UPLOADER,
    )
    .await
    .expect("Failed to seed FMEA document")
}

/// Register a CP document with the given rows.
pub async fn seed_cp(pool: &DbPool, rows: Vec<CpRow>) -> (Document, Vec<Item>) {
    pool.register_document(
        register_request("control-plan.xlsx", "CP", Some(ItemRows::Cp(rows))),
        UPLOADER,
    )
    .await
    .expect("Failed to seed CP document")
}

pub fn ids(items: &[Item]) -> Vec<i32> {
    items.iter().map(Item::id).collect()
}
