// ==========================================
// 疫情暴发信号引擎 - 年度聚合导入器
// ==========================================
// 职责: CSV 文件 -> AggregateStore
// 支持列名别名: location|country, count|outbreak_count|cases
// 红线: 行级错误逐条收集返回,单坏行绝不中止整批导入
// ==========================================

pub mod error;

pub use error::ImportError;

use crate::domain::YearlyAggregate;
use crate::repository::AggregateStore;
use csv::ReaderBuilder;
use std::fs::File;
use std::path::Path;
use tracing::{info, warn};

// ==========================================
// 导入结果
// ==========================================

/// 导入结果 - 存储 + 逐行错误清单
#[derive(Debug)]
pub struct ImportOutcome {
    pub store: AggregateStore,
    pub row_errors: Vec<ImportError>,
}

// ==========================================
// AggregateImporter - 年度聚合导入器
// ==========================================
pub struct AggregateImporter;

impl AggregateImporter {
    /// 从 CSV 文件读入年度聚合
    ///
    /// # 参数
    /// - `path`: CSV 文件路径 (首行为表头)
    ///
    /// # 返回
    /// - `Ok(ImportOutcome)`: 存储 + 行级错误 (坏行被跳过)
    /// - `Err(ImportError)`: 文件级错误 (不存在/无表头/缺列)
    pub fn read_csv(path: &Path) -> Result<ImportOutcome, ImportError> {
        // 检查文件存在
        if !path.exists() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }

        // 检查扩展名
        if let Some(ext) = path.extension() {
            if ext != "csv" {
                return Err(ImportError::UnsupportedFormat(
                    ext.to_string_lossy().to_string(),
                ));
            }
        }

        let file = File::open(path).map_err(|e| ImportError::FileNotFound(format!("{}: {}", path.display(), e)))?;
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // 允许行长度不一致
            .from_reader(file);

        // 解析表头,定位必需列 (大小写不敏感,支持别名)
        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_lowercase())
            .collect();
        let disease_idx = find_column(&headers, &["disease"])
            .ok_or_else(|| ImportError::MissingColumn("disease".to_string()))?;
        let location_idx = find_column(&headers, &["location", "country"])
            .ok_or_else(|| ImportError::MissingColumn("location".to_string()))?;
        let year_idx = find_column(&headers, &["year"])
            .ok_or_else(|| ImportError::MissingColumn("year".to_string()))?;
        let count_idx = find_column(&headers, &["count", "outbreak_count", "cases"])
            .ok_or_else(|| ImportError::MissingColumn("count".to_string()))?;

        let mut store = AggregateStore::new();
        let mut row_errors = Vec::new();

        for (row_idx, result) in reader.records().enumerate() {
            // 行号从 1 起 (不含表头)
            let row = row_idx + 1;
            let record = match result {
                Ok(r) => r,
                Err(e) => {
                    row_errors.push(ImportError::CsvParseError(e));
                    continue;
                }
            };

            // 跳过完全空白的行
            if record.iter().all(|v| v.trim().is_empty()) {
                continue;
            }

            match parse_row(&record, row, disease_idx, location_idx, year_idx, count_idx) {
                Ok(aggregate) => {
                    if !store.insert(aggregate.clone()) {
                        row_errors.push(ImportError::DuplicateKey {
                            row,
                            disease: aggregate.disease,
                            location: aggregate.location,
                            year: aggregate.year,
                        });
                    }
                }
                Err(e) => row_errors.push(e),
            }
        }

        if row_errors.is_empty() {
            info!(records = store.len(), path = %path.display(), "聚合导入完成");
        } else {
            warn!(
                records = store.len(),
                bad_rows = row_errors.len(),
                path = %path.display(),
                "聚合导入完成 (部分行被跳过)"
            );
        }

        Ok(ImportOutcome { store, row_errors })
    }
}

/// 在表头中定位首个匹配的列名
fn find_column(headers: &[String], names: &[&str]) -> Option<usize> {
    headers
        .iter()
        .position(|h| names.iter().any(|n| h == n))
}

/// 解析单行记录
fn parse_row(
    record: &csv::StringRecord,
    row: usize,
    disease_idx: usize,
    location_idx: usize,
    year_idx: usize,
    count_idx: usize,
) -> Result<YearlyAggregate, ImportError> {
    let field = |idx: usize, name: &str| -> Result<String, ImportError> {
        let value = record.get(idx).unwrap_or("").trim().to_string();
        if value.is_empty() {
            Err(ImportError::FieldMissing {
                row,
                field: name.to_string(),
            })
        } else {
            Ok(value)
        }
    };

    let disease = field(disease_idx, "disease")?;
    let location = field(location_idx, "location")?;

    let year_raw = field(year_idx, "year")?;
    let year: i32 = year_raw.parse().map_err(|_| ImportError::TypeConversion {
        row,
        field: "year".to_string(),
        message: format!("期望整数年份,实际 '{}'", year_raw),
    })?;

    let count_raw = field(count_idx, "count")?;
    // 容忍 "53.0" 形态的浮点计数 (上游导出常见)
    let count: u32 = count_raw.parse().or_else(|_| {
        count_raw
            .parse::<f64>()
            .ok()
            .filter(|f| *f >= 0.0 && f.fract() == 0.0)
            .map(|f| f as u32)
            .ok_or(())
    })
    .map_err(|_| ImportError::TypeConversion {
        row,
        field: "count".to_string(),
        message: format!("期望非负整数计数,实际 '{}'", count_raw),
    })?;

    Ok(YearlyAggregate {
        disease,
        location,
        year,
        count,
    })
}
