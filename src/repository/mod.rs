// ==========================================
// 疫情暴发信号引擎 - 数据仓储层
// ==========================================
// 职责: 年度聚合的只读存取
// 红线: 引擎内无磁盘/网络 I/O,仓储为纯内存结构
// ==========================================

pub mod aggregate_store;

pub use aggregate_store::AggregateStore;
