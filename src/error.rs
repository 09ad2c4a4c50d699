// ==========================================
// 疫情暴发信号引擎 - 引擎错误类型
// ==========================================
// 工具: thiserror 派生宏
// 红线: 单个坏输入只令该条计算失败,绝不中止整批;
//       目录查找缺失与空历史不是错误,由兜底值消化
// ==========================================

use thiserror::Error;

/// 引擎错误类型
#[derive(Error, Debug)]
pub enum EngineError {
    // ===== 数据错误 (仅该条计算致命) =====
    #[error("数据错误 (disease={disease}, location={location}): {message}")]
    Data {
        disease: String,
        location: String,
        message: String,
    },

    // ===== 配置错误 =====
    #[error("配置错误: {0}")]
    Config(String),

    // ===== 导入错误 =====
    #[error(transparent)]
    Import(#[from] crate::importer::ImportError),

    // ===== 通用错误 =====
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl EngineError {
    /// 构造数据错误
    pub fn data(disease: &str, location: &str, message: impl Into<String>) -> Self {
        EngineError::Data {
            disease: disease.to_string(),
            location: location.to_string(),
            message: message.into(),
        }
    }
}

/// Result 类型别名
pub type EngineResult<T> = Result<T, EngineError>;
