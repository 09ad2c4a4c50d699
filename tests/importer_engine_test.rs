// ==========================================
// AggregateImporter 导入器集成测试
// ==========================================
// 测试目标: 验证 CSV -> AggregateStore 的解析与容错
// 覆盖范围: 列名别名、坏行收集、键重复、文件级错误
// ==========================================

use epiwatch_engine::importer::{AggregateImporter, ImportError};
use epiwatch_engine::logging;
use std::io::Write;
use tempfile::TempDir;

// ==========================================
// 测试辅助函数
// ==========================================

/// 写入临时 CSV 文件并返回 (目录句柄, 路径)
fn write_csv(content: &str) -> (TempDir, std::path::PathBuf) {
    // 初始化日志系统
    logging::init_test();
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("aggregates.csv");
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(content.as_bytes()).unwrap();
    (dir, path)
}

#[test]
fn test_import_basic() {
    let (_dir, path) = write_csv(
        "disease,location,year,count\n\
         Influenza,Global,2009,17\n\
         Influenza,Global,2010,53\n\
         Cholera,Kenya,2020,12\n",
    );

    let outcome = AggregateImporter::read_csv(&path).unwrap();
    assert!(outcome.row_errors.is_empty());
    assert_eq!(outcome.store.len(), 3);
    assert_eq!(outcome.store.get("Influenza", "Global", 2010).unwrap().count, 53);

    let history = outcome.store.history("Influenza", "Global");
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].year, 2009);
}

#[test]
fn test_import_header_aliases() {
    // 原始数据导出常用列名: Country/outbreak_count,大小写不敏感
    let (_dir, path) = write_csv(
        "Disease,Country,Year,outbreak_count\n\
         Dengue,Brazil,2019,742\n",
    );

    let outcome = AggregateImporter::read_csv(&path).unwrap();
    assert!(outcome.row_errors.is_empty());
    assert_eq!(outcome.store.get("Dengue", "Brazil", 2019).unwrap().count, 742);
}

#[test]
fn test_import_collects_bad_rows_without_aborting() {
    let (_dir, path) = write_csv(
        "disease,location,year,count\n\
         Influenza,Global,2009,17\n\
         ,Global,2010,5\n\
         Cholera,Kenya,notayear,12\n\
         Measles,India,2015,-4\n\
         Ebola,DRC,2014,66\n",
    );

    let outcome = AggregateImporter::read_csv(&path).unwrap();
    // 好行全部入库,坏行逐条收集
    assert_eq!(outcome.store.len(), 2);
    assert_eq!(outcome.row_errors.len(), 3);
    assert!(outcome.store.get("Ebola", "DRC", 2014).is_some());
    assert!(matches!(outcome.row_errors[0], ImportError::FieldMissing { row: 2, .. }));
    assert!(matches!(outcome.row_errors[1], ImportError::TypeConversion { row: 3, .. }));
}

#[test]
fn test_import_duplicate_key_first_wins() {
    let (_dir, path) = write_csv(
        "disease,location,year,count\n\
         Cholera,Kenya,2020,12\n\
         Cholera,Kenya,2020,99\n",
    );

    let outcome = AggregateImporter::read_csv(&path).unwrap();
    assert_eq!(outcome.store.len(), 1);
    assert_eq!(outcome.store.get("Cholera", "Kenya", 2020).unwrap().count, 12);
    assert!(matches!(outcome.row_errors[0], ImportError::DuplicateKey { row: 2, .. }));
}

#[test]
fn test_import_skips_blank_rows() {
    let (_dir, path) = write_csv(
        "disease,location,year,count\n\
         Cholera,Kenya,2020,12\n\
         ,,,\n\
         Cholera,Kenya,2021,8\n",
    );

    let outcome = AggregateImporter::read_csv(&path).unwrap();
    assert!(outcome.row_errors.is_empty());
    assert_eq!(outcome.store.len(), 2);
}

#[test]
fn test_import_float_count_tolerated() {
    let (_dir, path) = write_csv(
        "disease,location,year,count\n\
         Influenza,Global,2010,53.0\n",
    );

    let outcome = AggregateImporter::read_csv(&path).unwrap();
    assert_eq!(outcome.store.get("Influenza", "Global", 2010).unwrap().count, 53);
}

#[test]
fn test_import_missing_column_is_file_error() {
    let (_dir, path) = write_csv("disease,year,count\nCholera,2020,12\n");
    assert!(matches!(
        AggregateImporter::read_csv(&path),
        Err(ImportError::MissingColumn(_))
    ));
}

#[test]
fn test_import_missing_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nope.csv");
    assert!(matches!(
        AggregateImporter::read_csv(&path),
        Err(ImportError::FileNotFound(_))
    ));
}

#[test]
fn test_import_unsupported_extension() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("data.xlsx");
    std::fs::File::create(&path).unwrap();
    assert!(matches!(
        AggregateImporter::read_csv(&path),
        Err(ImportError::UnsupportedFormat(_))
    ));
}
