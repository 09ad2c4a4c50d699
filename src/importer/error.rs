// ==========================================
// 疫情暴发信号引擎 - 导入模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// 行级错误逐条收集,不中止整个文件的导入
// ==========================================

use thiserror::Error;

/// 导入模块错误类型
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 文件相关错误 =====
    #[error("文件不存在: {0}")]
    FileNotFound(String),

    #[error("文件格式不支持: {0}（仅支持 .csv）")]
    UnsupportedFormat(String),

    #[error("CSV 解析失败: {0}")]
    CsvParseError(#[from] csv::Error),

    #[error("缺少必需列: {0}（需要 disease/location/year/count）")]
    MissingColumn(String),

    // ===== 行级错误 =====
    #[error("字段缺失 (行 {row}): {field} 为空")]
    FieldMissing { row: usize, field: String },

    #[error("类型转换失败 (行 {row}, 字段 {field}): {message}")]
    TypeConversion {
        row: usize,
        field: String,
        message: String,
    },

    #[error("键重复 (行 {row}): ({disease}, {location}, {year}) 已存在,保留首条")]
    DuplicateKey {
        row: usize,
        disease: String,
        location: String,
        year: i32,
    },
}
