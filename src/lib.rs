// ==========================================
// 疫情暴发信号引擎 - 核心库
// ==========================================
// 技术栈: Rust + Tokio
// 系统定位: 信号派生引擎 (纯函数,无 I/O)
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 目录层 - 静态查找表 (季节曲线/疾病分类/城市)
pub mod catalog;

// 数据仓储层 - 年度聚合只读存取
pub mod repository;

// 引擎层 - 信号派生规则
pub mod engine;

// 导入层 - 外部数据
pub mod importer;

// 配置层 - 阈值与系数
pub mod config;

// 确定性种子派生
pub mod seed;

// 错误类型
pub mod error;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{
    AnomalyType, DiseaseCategory, SeverityLevel, TrendDirection, TrendSeverity,
};

// 领域实体
pub use domain::{Alert, BaselineEstimate, DailyPoint, DailySeries, WeeklyTrend, YearlyAggregate};

// 目录
pub use catalog::{CityCatalog, SeasonalCatalog, SeasonalProfile, SignalCatalogs};

// 引擎
pub use engine::{
    AnomalyScorer, BaselineEstimator, BatchReport, ContextComposer, DiseaseReport, ScoredAnomaly,
    SignalPipeline, TemporalSimulator, TrendAggregator,
};

// 仓储
pub use repository::AggregateStore;

// 配置
pub use config::{
    BaselineConfig, EngineConfig, ScorerConfig, SimulatorConfig, TrendConfig,
};

// 错误
pub use error::{EngineError, EngineResult};

// 导入
pub use importer::{AggregateImporter, ImportError, ImportOutcome};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "疫情暴发信号引擎";

// ==========================================
// 预编译检查
// ==========================================
