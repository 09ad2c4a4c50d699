// ==========================================
// 疫情暴发信号引擎 - 引擎层
// ==========================================
// 职责: 信号派生规则,全部为纯函数引擎
// 红线: 引擎不做 I/O,所有输出必须可由输入精确重现
// ==========================================

pub mod baseline;
pub mod context;
pub mod pipeline;
pub mod scorer;
pub mod simulator;
pub mod trend;

// 重导出核心引擎
pub use baseline::BaselineEstimator;
pub use context::ContextComposer;
pub use pipeline::{BatchReport, DiseaseReport, PairFailure, SignalPipeline};
pub use scorer::{AnomalyScorer, ScoredAnomaly};
pub use simulator::TemporalSimulator;
pub use trend::TrendAggregator;
