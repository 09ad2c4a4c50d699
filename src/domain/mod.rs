// ==========================================
// 疫情暴发信号引擎 - 领域模型层
// ==========================================
// 职责: 定义领域实体与类型
// 红线: 不含数据访问逻辑,不含引擎逻辑
// 所有实体均为值对象,归属单次计算流程,不跨并发共享
// ==========================================

pub mod aggregate;
pub mod alert;
pub mod baseline;
pub mod series;
pub mod types;

// 重导出核心类型
pub use aggregate::YearlyAggregate;
pub use alert::Alert;
pub use baseline::BaselineEstimate;
pub use series::{DailyPoint, DailySeries, WeeklyTrend};
pub use types::{AnomalyType, DiseaseCategory, SeverityLevel, TrendDirection, TrendSeverity};
