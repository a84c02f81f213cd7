//! Item store tests.

use fmcp_lib::error::AppError;
use fmcp_lib::models::{ActionPriority, CpRow, FmeaRow, Item, ItemKind, ItemRows, UpdateItemRequest};

use super::test_helpers::*;

#[actix_rt::test]
async fn test_bulk_insert_into_existing_document() {
    let pool = create_test_pool().await;
    let (document, _) = seed_fmea(&pool, vec![]).await;

    let items = pool
        .bulk_insert_items(
            document.id,
            ItemRows::Fmea(vec![fmea_row("Crack", 9, 8, 7), fmea_row("Burr", 2, 2, 2)]),
            UPLOADER,
        )
        .await
        .unwrap();

    assert_eq!(items.len(), 2);
    assert!(items.iter().all(|i| i.kind() == ItemKind::Fmea));
    assert!(items.iter().all(|i| i.document_id() == document.id));
    assert_eq!(items[0].row_index(), 0);
    assert_eq!(items[1].row_index(), 1);
}

#[actix_rt::test]
async fn test_bulk_insert_into_missing_document_is_not_found() {
    let pool = create_test_pool().await;

    let result = pool
        .bulk_insert_items(99, ItemRows::Cp(vec![cp_row("A", "B")]), UPLOADER)
        .await;

    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[actix_rt::test]
async fn test_bulk_insert_rejects_kind_mismatch() {
    let pool = create_test_pool().await;
    let (document, _) = seed_cp(&pool, vec![]).await;

    let result = pool
        .bulk_insert_items(
            document.id,
            ItemRows::Fmea(vec![fmea_row("Crack", 5, 5, 5)]),
            UPLOADER,
        )
        .await;

    assert!(matches!(result, Err(AppError::Validation(_))));
}

#[actix_rt::test]
async fn test_oi_document_accepts_no_rows() {
    let pool = create_test_pool().await;
    let (document, _) = pool
        .register_document(register_request("oi.pdf", "OI", None), UPLOADER)
        .await
        .unwrap();

    let result = pool
        .bulk_insert_items(document.id, ItemRows::Cp(vec![cp_row("A", "B")]), UPLOADER)
        .await;

    assert!(matches!(result, Err(AppError::Validation(_))));
    assert!(pool.get_items_for_document(document.id).await.unwrap().is_empty());
}

#[actix_rt::test]
async fn test_out_of_range_severity_writes_nothing() {
    let pool = create_test_pool().await;
    let (document, _) = seed_fmea(&pool, vec![]).await;

    let result = pool
        .bulk_insert_items(
            document.id,
            ItemRows::Fmea(vec![fmea_row("Crack", 5, 5, 5), fmea_row("Burr", 11, 5, 5)]),
            UPLOADER,
        )
        .await;

    assert!(matches!(result, Err(AppError::Validation(_))));
    assert_eq!(pool.count_items(document.id).await.unwrap(), 0);
}

#[actix_rt::test]
async fn test_items_come_back_in_row_index_order() {
    let pool = create_test_pool().await;

    let rows = [5, 1, 3]
        .into_iter()
        .map(|row_index| CpRow {
            row_index: Some(row_index),
            ..cp_row(&format!("Row {}", row_index), "Gauge")
        })
        .collect();
    let (document, _) = seed_cp(&pool, rows).await;

    let order: Vec<i32> = pool
        .get_items_for_document(document.id)
        .await
        .unwrap()
        .iter()
        .map(Item::row_index)
        .collect();

    assert_eq!(order, vec![1, 3, 5]);
}

#[actix_rt::test]
async fn test_items_for_missing_document_is_not_found() {
    let pool = create_test_pool().await;
    assert!(matches!(
        pool.get_items_for_document(3).await,
        Err(AppError::NotFound(_))
    ));
}

#[actix_rt::test]
async fn test_action_priority_is_derived_or_kept() {
    let pool = create_test_pool().await;

    let explicit = FmeaRow {
        action_priority: Some(ActionPriority::Low),
        ..fmea_row("Explicit", 10, 10, 10)
    };
    let (_, items) = seed_fmea(&pool, vec![fmea_row("Derived", 10, 10, 10), explicit]).await;

    let Item::Fmea(derived) = pool.get_item(items[0].id()).await.unwrap() else {
        panic!("expected FMEA item");
    };
    assert_eq!(derived.action_priority, Some(ActionPriority::High));

    let Item::Fmea(kept) = pool.get_item(items[1].id()).await.unwrap() else {
        panic!("expected FMEA item");
    };
    assert_eq!(kept.action_priority, Some(ActionPriority::Low));
}

#[actix_rt::test]
async fn test_item_ids_are_unique_across_kinds() {
    let pool = create_test_pool().await;

    let (_, fmea_items) = seed_fmea(&pool, vec![fmea_row("Crack", 5, 5, 5)]).await;
    let (_, cp_items) = seed_cp(&pool, vec![cp_row("A", "B")]).await;

    assert_ne!(fmea_items[0].id(), cp_items[0].id());
    assert_eq!(
        pool.get_item(cp_items[0].id()).await.unwrap().kind(),
        ItemKind::Cp
    );
}

#[actix_rt::test]
async fn test_update_item_records_editor() {
    let pool = create_test_pool().await;
    let (_, items) = seed_cp(&pool, vec![CpRow {
        row_index: Some(7),
        ..cp_row("Length", "Caliper")
    }])
    .await;
    let id = items[0].id();

    let updated = pool
        .update_item(
            id,
            UpdateItemRequest::Cp(cp_row("Length", "CMM")),
            "bob",
        )
        .await
        .unwrap();

    let Item::Cp(cp) = updated else {
        panic!("expected CP item");
    };
    assert_eq!(cp.control_method.as_deref(), Some("CMM"));
    assert_eq!(cp.edited_by.as_deref(), Some("bob"));
    assert_eq!(cp.row_index, 7);
    assert!(cp.updated_at >= cp.created_at);
}

#[actix_rt::test]
async fn test_update_item_validates_ratings_and_kind() {
    let pool = create_test_pool().await;
    let (_, items) = seed_fmea(&pool, vec![fmea_row("Crack", 5, 5, 5)]).await;
    let id = items[0].id();

    let bad_rating = pool
        .update_item(id, UpdateItemRequest::Fmea(fmea_row("Crack", 5, 0, 5)), "bob")
        .await;
    assert!(matches!(bad_rating, Err(AppError::Validation(_))));

    let wrong_kind = pool
        .update_item(id, UpdateItemRequest::Cp(cp_row("A", "B")), "bob")
        .await;
    assert!(matches!(wrong_kind, Err(AppError::Validation(_))));

    let missing = pool
        .update_item(id + 100, UpdateItemRequest::Fmea(fmea_row("X", 1, 1, 1)), "bob")
        .await;
    assert!(matches!(missing, Err(AppError::NotFound(_))));

    // Rejected updates leave the stored row untouched.
    let Item::Fmea(stored) = pool.get_item(id).await.unwrap() else {
        panic!("expected FMEA item");
    };
    assert_eq!(stored.failure_mode.as_deref(), Some("Crack"));
    assert_eq!(stored.occurrence, Some(5));
    assert_eq!(stored.edited_by, None);
    assert_eq!(stored.updated_at, stored.created_at);
    assert_eq!(pool.get_item_history(id).await.unwrap().len(), 1);
}
