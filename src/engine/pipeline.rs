// ==========================================
// 疫情暴发信号引擎 - 信号管线编排
// ==========================================
// 职责: 串联 模拟/趋势/基线/评分/上下文 五个引擎
// 并发: 各 (disease, location) 组合完全独立,JoinSet 扇出
// 红线: 单个坏组合只记入 failures,绝不中止整批
// ==========================================

use crate::catalog::SignalCatalogs;
use crate::config::EngineConfig;
use crate::domain::{Alert, DailySeries, WeeklyTrend};
use crate::engine::baseline::BaselineEstimator;
use crate::engine::context::ContextComposer;
use crate::engine::scorer::AnomalyScorer;
use crate::engine::simulator::TemporalSimulator;
use crate::engine::trend::TrendAggregator;
use crate::error::{EngineError, EngineResult};
use crate::repository::AggregateStore;
use chrono::{Datelike, NaiveDate};
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{info, warn};

// ==========================================
// 报告结构
// ==========================================

/// 单组合分析报告
#[derive(Debug, Clone)]
pub struct DiseaseReport {
    pub disease: String,
    pub location: String,
    /// 最新年份的日级序列
    pub series: DailySeries,
    /// 最新序列的周趋势
    pub trend: WeeklyTrend,
    /// 按日期升序的告警流 (id 确定,跨运行可去重)
    pub alerts: Vec<Alert>,
}

/// 单组合失败记录
#[derive(Debug)]
pub struct PairFailure {
    pub disease: String,
    pub location: String,
    pub error: EngineError,
}

/// 整批分析报告
#[derive(Debug, Default)]
pub struct BatchReport {
    pub reports: Vec<DiseaseReport>,
    pub failures: Vec<PairFailure>,
}

impl BatchReport {
    /// 整批告警,按严重度降序 (同分按 id 稳定排序)
    pub fn all_alerts(&self) -> Vec<&Alert> {
        let mut alerts: Vec<&Alert> = self
            .reports
            .iter()
            .flat_map(|r| r.alerts.iter())
            .collect();
        alerts.sort_by(|a, b| {
            b.severity
                .partial_cmp(&a.severity)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.id.cmp(&b.id))
        });
        alerts
    }
}

// ==========================================
// SignalPipeline - 信号管线
// ==========================================
#[derive(Clone)]
pub struct SignalPipeline {
    store: Arc<AggregateStore>,
    simulator: TemporalSimulator,
    trend: TrendAggregator,
    baseline: BaselineEstimator,
    scorer: AnomalyScorer,
    composer: ContextComposer,
}

impl SignalPipeline {
    /// 构造函数
    ///
    /// # 参数
    /// - `store`: 年度聚合只读存储
    /// - `catalogs`: 只读目录集合
    /// - `config`: 引擎配置
    pub fn new(store: Arc<AggregateStore>, catalogs: Arc<SignalCatalogs>, config: EngineConfig) -> Self {
        Self {
            store,
            simulator: TemporalSimulator::new(catalogs.clone(), config.simulator),
            trend: TrendAggregator::new(config.trend),
            baseline: BaselineEstimator::new(config.baseline),
            scorer: AnomalyScorer::new(config.scorer),
            composer: ContextComposer::new(catalogs),
        }
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 分析单个 (disease, location) 组合
    ///
    /// 逐年留一基线: 每个年份与其余年份构成的基线比较,
    /// 与原始残差分析等价且对输入顺序不敏感
    pub fn analyze(&self, disease: &str, location: &str) -> EngineResult<DiseaseReport> {
        let history = self.store.history(disease, location);
        if history.is_empty() {
            return Err(EngineError::data(disease, location, "没有年度聚合记录"));
        }

        // 1. 逐年评分 (history 已按年份升序,告警流即日期升序)
        let mut scored = Vec::new();
        for (idx, aggregate) in history.iter().enumerate() {
            let others: Vec<u32> = history
                .iter()
                .enumerate()
                .filter(|(j, _)| *j != idx)
                .map(|(_, a)| a.count)
                .collect();
            let baseline = self.baseline.estimate(disease, location, &others);

            let date = NaiveDate::from_ymd_opt(aggregate.year, 1, 1).ok_or_else(|| {
                EngineError::data(disease, location, format!("非法年份 {}", aggregate.year))
            })?;

            if let Some(anomaly) = self.scorer.score(date, aggregate.count, &baseline) {
                scored.push(anomaly);
            }
        }

        // 2. 补齐确定性 id 与展示字段
        let mut alerts = Vec::with_capacity(scored.len());
        for (seq, anomaly) in scored.into_iter().enumerate() {
            let mut alert = Alert {
                id: Alert::make_id(disease, location, anomaly.date.year(), seq),
                disease: disease.to_string(),
                location: location.to_string(),
                city_location: String::new(),
                context_description: String::new(),
                date: anomaly.date,
                actual_count: anomaly.actual_count,
                expected_count: anomaly.expected_count,
                deviation: anomaly.deviation,
                deviation_pct: anomaly.deviation_pct,
                severity: anomaly.severity,
                severity_level: anomaly.severity_level,
                anomaly_type: anomaly.anomaly_type,
                z_score: anomaly.z_score,
                message: anomaly.message,
            };
            self.composer.compose(&mut alert);
            alerts.push(alert);
        }

        // 3. 最新年份展开日级序列 + 周趋势
        let latest = history
            .last()
            .ok_or_else(|| EngineError::data(disease, location, "没有年度聚合记录"))?;
        let series = self.simulator.simulate(latest);
        let reference_date = series
            .last_date()
            .ok_or_else(|| EngineError::data(disease, location, "日级序列为空"))?;
        let trend = self.trend.aggregate_week(&series, reference_date);

        info!(
            disease = %disease,
            location = %location,
            years = history.len(),
            alerts = alerts.len(),
            "组合分析完成"
        );

        Ok(DiseaseReport {
            disease: disease.to_string(),
            location: location.to_string(),
            series,
            trend,
            alerts,
        })
    }

    /// 分析存储内全部组合 (每组合一个任务扇出)
    pub async fn analyze_all(&self) -> BatchReport {
        let mut set = JoinSet::new();
        for (disease, location) in self.store.pairs() {
            let pipeline = self.clone();
            set.spawn(async move {
                let result = pipeline.analyze(&disease, &location);
                (disease, location, result)
            });
        }

        let mut report = BatchReport::default();
        while let Some(joined) = set.join_next().await {
            match joined {
                Ok((_, _, Ok(pair_report))) => report.reports.push(pair_report),
                Ok((disease, location, Err(error))) => {
                    warn!(disease = %disease, location = %location, error = %error, "组合分析失败");
                    report.failures.push(PairFailure {
                        disease,
                        location,
                        error,
                    });
                }
                Err(join_error) => {
                    warn!(error = %join_error, "分析任务异常退出");
                    report.failures.push(PairFailure {
                        disease: String::new(),
                        location: String::new(),
                        error: EngineError::Other(join_error.into()),
                    });
                }
            }
        }

        // 任务完成顺序不确定,统一按键排序保证输出确定性
        report
            .reports
            .sort_by(|a, b| (&a.disease, &a.location).cmp(&(&b.disease, &b.location)));
        report
            .failures
            .sort_by(|a, b| (&a.disease, &a.location).cmp(&(&b.disease, &b.location)));
        report
    }
}
