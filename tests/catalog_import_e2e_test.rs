// ==========================================
// 目录批量导入 端到端测试
// ==========================================
// 测试目标: 真实 SQLite 上验证导入管道的对外行为
// ==========================================


use catalog_import::config::config_keys;
use catalog_import::config::ConfigManager;
use catalog_import::repository::CatalogRepository;
use catalog_import::{EntityKind, RawRow, UploadResult, ValidationError};
use serde_json::json;
use std::io::Write;
use test_helpers::*;

// ==========================================
// 示例场景
// ==========================================

#[tokio::test]
async fn test_scenario_single_valid_product() {
    let (_tmp, db_path, api) = create_test_api();
    let rows = vec![RawRow::from_pairs([
        ("name", "Infusion Pump"),
        ("price", "250.5"),
        ("stock_quantity", "10"),
        ("category", "Medical Devices"),
    ])];

    assert!(api.validate_products(owner("mfr-1"), &rows).is_empty());

    let result = api.upload_products(owner("mfr-1"), &rows).await;
    assert_eq!(
        result,
        UploadResult {
            success_count: 1,
            failed_count: 0,
            errors: vec![],
        }
    );

    let repo = open_repo(&db_path);
    let prices = stored_values(repo.as_ref(), EntityKind::Product, "mfr-1", "price").await;
    assert_eq!(prices, vec![Some("250.5".to_string())]);
}

#[tokio::test]
async fn test_scenario_invalid_product_blocks_batch() {
    let (_tmp, _db_path, api) = create_test_api();
    let rows = vec![RawRow::from_pairs([
        ("name", ""),
        ("price", "abc"),
        ("stock_quantity", "-1"),
    ])];

    let errors = api.validate_products(owner("mfr-1"), &rows);
    assert_eq!(
        errors,
        vec![
            ValidationError::field_error(2, "name", "name is required"),
            ValidationError::field_error(2, "price", "price must be a valid number"),
            ValidationError::field_error(
                2,
                "stock_quantity",
                "stock_quantity must be greater than or equal to 0"
            ),
        ]
    );

    let result = api.upload_products(owner("mfr-1"), &rows).await;
    assert_eq!(result, UploadResult::rejected(1, errors));
    assert_eq!(api.count(EntityKind::Product, "mfr-1").await.unwrap(), 0);
}

// ==========================================
// 闸门与计数
// ==========================================

#[tokio::test]
async fn test_one_bad_row_means_nothing_written() {
    let (_tmp, _db_path, api) = create_test_api();
    let mut rows: Vec<RawRow> = (0..20)
        .map(|i| product_row(&format!("Item {}", i), &format!("SKU-{}", i), "5", "1"))
        .collect();
    rows.push(product_row("Broken", "B-1", "5", "lots"));

    let result = api.upload_products(owner("mfr-1"), &rows).await;

    assert_eq!(result.success_count, 0);
    assert_eq!(result.failed_count, 21);
    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[0].row, 22);
    assert_eq!(api.count(EntityKind::Product, "mfr-1").await.unwrap(), 0);
}

#[tokio::test]
async fn test_clean_batch_imports_every_row() {
    let (_tmp, _db_path, api) = create_test_api();
    let rows: Vec<RawRow> = (0..5)
        .map(|i| equipment_row("Ventilator", "V-2", &format!("SN-{}", i)))
        .collect();

    let result = api.upload_equipment(owner("mfr-1"), &rows).await;

    assert!(result.is_clean());
    assert_eq!(result.success_count, 5);
    assert_eq!(api.count(EntityKind::Equipment, "mfr-1").await.unwrap(), 5);
}

#[tokio::test]
async fn test_row_number_is_index_plus_two() {
    let (_tmp, _db_path, api) = create_test_api();
    let mut rows: Vec<RawRow> = (0..7)
        .map(|i| equipment_row(&format!("Unit {}", i), "M", "S"))
        .collect();
    rows[6].insert("quantity", json!("-4"));

    let errors = api.validate_equipment(owner("mfr-1"), &rows);

    assert_eq!(errors.len(), 1);
    assert_eq!((errors[0].row, errors[0].field.as_str()), (8, "quantity"));
}

// ==========================================
// 查重
// ==========================================

#[tokio::test]
async fn test_batch_duplicate_names_first_row() {
    let (_tmp, _db_path, api) = create_test_api();
    let rows = vec![
        product_row("Gauze", "G-1", "1", "10"),
        product_row("Mask", "M-1", "1", "10"),
        product_row("  GAUZE", "g-1 ", "9.99", "500"),
    ];

    let errors = api.validate_products(owner("mfr-1"), &rows);

    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].row, 4);
    assert_eq!(errors[0].field, "name");
    assert!(errors[0].message.contains("row 2"), "{}", errors[0].message);
}

#[tokio::test]
async fn test_retry_is_idempotent() {
    let (_tmp, _db_path, api) = create_test_api();
    let rows = vec![
        product_row("Gauze", "G-1", "1", "10"),
        product_row("Mask", "M-1", "1", "10"),
    ];

    let first = api.upload_products(owner("mfr-1"), &rows).await;
    assert_eq!(first.success_count, 2);

    let second = api.upload_products(owner("mfr-1"), &rows).await;
    assert_eq!((second.success_count, second.failed_count), (0, 2));
    assert!(second.errors.iter().all(|e| e.field == "name"));
    assert_eq!(
        second.errors.iter().map(|e| e.row).collect::<Vec<_>>(),
        vec![2, 3]
    );
    assert_eq!(api.count(EntityKind::Product, "mfr-1").await.unwrap(), 2);
}

#[tokio::test]
async fn test_existing_key_is_scoped_per_owner() {
    let (_tmp, _db_path, api) = create_test_api();
    let row = vec![equipment_row("MRI Scanner", "X1", "001")];

    assert_eq!(api.upload_equipment(owner("owner-a"), &row).await.success_count, 1);

    let again_a = api.upload_equipment(owner("owner-a"), &row).await;
    assert_eq!((again_a.success_count, again_a.failed_count), (0, 1));

    let for_b = api.upload_equipment(owner("owner-b"), &row).await;
    assert!(for_b.is_clean());
    assert_eq!(for_b.success_count, 1);

    assert_eq!(api.count(EntityKind::Equipment, "owner-a").await.unwrap(), 1);
    assert_eq!(api.count(EntityKind::Equipment, "owner-b").await.unwrap(), 1);
}

#[tokio::test]
async fn test_mixed_batch_skips_only_existing_rows() {
    let (_tmp, _db_path, api) = create_test_api();
    api.upload_products(owner("mfr-1"), &[product_row("Gauze", "G-1", "1", "1")])
        .await;

    let rows = vec![
        product_row("Mask", "M-1", "1", "1"),
        product_row("gauze", "G-1", "1", "1"),
        product_row("Gown", "GW-1", "1", "1"),
    ];
    let result = api.upload_products(owner("mfr-1"), &rows).await;

    assert_eq!((result.success_count, result.failed_count), (2, 1));
    assert_eq!(result.errors[0].row, 3);
    assert_eq!(result.attempted(), rows.len());
}

// ==========================================
// 默认值与归属
// ==========================================

#[tokio::test]
async fn test_equipment_defaults_persisted() {
    let (_tmp, db_path, api) = create_test_api();
    let rows = vec![RawRow::from_pairs([
        ("name", "Patient Monitor"),
        ("category", "patient monitoring"),
    ])];

    assert!(api.upload_equipment(owner("mfr-1"), &rows).await.is_clean());

    let repo = open_repo(&db_path);
    let stored = repo
        .as_ref()
        .query(
            EntityKind::Equipment,
            "mfr-1",
            &["condition", "status", "quantity", "sales_option", "category"],
        )
        .await
        .unwrap();

    assert_eq!(stored.len(), 1);
    let row = &stored[0];
    assert_eq!(row["condition"].as_deref(), Some("New"));
    assert_eq!(row["status"].as_deref(), Some("Available"));
    assert_eq!(row["quantity"].as_deref(), Some("1"));
    assert_eq!(row["sales_option"].as_deref(), Some("Both"));
    assert_eq!(row["category"].as_deref(), Some("Patient Monitoring"));
}

#[tokio::test]
async fn test_owner_comes_from_identity_not_row() {
    let (_tmp, _db_path, api) = create_test_api();
    let mut row = product_row("Gauze", "G-1", "1", "1");
    row.insert("owner_id", json!("intruder"));

    assert!(api.upload_products(owner("mfr-1"), &[row]).await.is_clean());

    assert_eq!(api.count(EntityKind::Product, "mfr-1").await.unwrap(), 1);
    assert_eq!(api.count(EntityKind::Product, "intruder").await.unwrap(), 0);
}

#[tokio::test]
async fn test_unauthenticated_upload_rejected() {
    let (_tmp, _db_path, api) = create_test_api();
    let rows = vec![
        product_row("Gauze", "G-1", "1", "1"),
        product_row("", "", "x", "y"),
    ];

    let result = api.upload_products(anonymous(), &rows).await;

    assert_eq!(
        result,
        UploadResult::rejected(2, vec![ValidationError::row_error(0, "not authenticated")])
    );
}

// ==========================================
// 配置覆写
// ==========================================

#[tokio::test]
async fn test_configured_categories_take_effect() {
    let (_tmp, db_path, api) = create_test_api();
    let config = ConfigManager::new(&db_path).unwrap();
    config
        .set_global_config_value(config_keys::PRODUCT_CATEGORIES, r#"["Wound Care"]"#)
        .unwrap();

    let mut accepted = product_row("Gauze", "G-1", "1", "1");
    accepted.insert("category", json!("Wound Care"));
    let mut rejected = product_row("Pump", "P-1", "1", "1");
    rejected.insert("category", json!("Medical Devices"));

    let errors = api.validate_products(owner("mfr-1"), &[accepted, rejected]);

    assert_eq!(errors.len(), 1);
    assert_eq!((errors[0].row, errors[0].field.as_str()), (3, "category"));
}

// ==========================================
// 文件导入
// ==========================================

#[tokio::test]
async fn test_csv_file_import() {
    let (_tmp, _db_path, api) = create_test_api();
    let mut csv = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    writeln!(csv, "name,model,serial_number,condition,price,lease_rate").unwrap();
    writeln!(csv, "CT Scanner,CT-9,A1,Refurbished,120000,2500").unwrap();
    writeln!(csv, "Ultrasound,US-3,B7,,45000,").unwrap();
    csv.flush().unwrap();

    let result = api
        .import_file(owner("mfr-1"), EntityKind::Equipment, csv.path())
        .await
        .unwrap();

    assert!(result.is_clean(), "{:?}", result.errors);
    assert_eq!(result.success_count, 2);
}

#[tokio::test]
async fn test_missing_file_is_api_error() {
    let (_tmp, _db_path, api) = create_test_api();

    let err = api
        .import_file(
            owner("mfr-1"),
            EntityKind::Product,
            std::path::Path::new("/nonexistent/catalog.csv"),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, catalog_import::ApiError::NotFound(_)));
}
