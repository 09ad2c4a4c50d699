// ==========================================
// 疫情暴发信号引擎 - 异常评分引擎
// ==========================================
// 职责: 观测计数 + 基线 -> 已分类异常
// 输出门控: 仅 severity_level > Low 的偏离才物化为告警,
//           常规观测不产出任何记录
// ==========================================

use crate::config::ScorerConfig;
use crate::domain::types::{AnomalyType, SeverityLevel};
use crate::domain::BaselineEstimate;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

// ==========================================
// 已评分异常 (Alert 的计算部分,不含 id/城市/上下文)
// ==========================================

/// 已评分异常 - 管线在此之上补齐 id 与展示字段
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredAnomaly {
    pub date: NaiveDate,
    pub actual_count: u32,
    pub expected_count: f64,
    pub deviation: f64,
    pub deviation_pct: f64,
    pub severity: f64,
    pub severity_level: SeverityLevel,
    pub anomaly_type: AnomalyType,
    pub z_score: f64,
    pub message: String,
}

// ==========================================
// AnomalyScorer - 异常评分引擎
// ==========================================
#[derive(Clone)]
pub struct AnomalyScorer {
    config: ScorerConfig,
}

impl AnomalyScorer {
    /// 构造函数
    pub fn new(config: ScorerConfig) -> Self {
        Self { config }
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 评分并分类一次观测
    ///
    /// # 参数
    /// - `date`: 观测日期
    /// - `actual_count`: 观测计数
    /// - `baseline`: 基线估计 (stddev 已有下限保护)
    ///
    /// # 返回
    /// - `Some(ScoredAnomaly)`: 等级高于 Low 的异常
    /// - `None`: 常规观测,不物化
    pub fn score(
        &self,
        date: NaiveDate,
        actual_count: u32,
        baseline: &BaselineEstimate,
    ) -> Option<ScoredAnomaly> {
        let deviation = actual_count as f64 - baseline.expected_count;

        // +1 平滑分母: 零基线时退化为 deviation * 100 的哨兵分支
        let deviation_pct = deviation / (baseline.expected_count + 1.0) * 100.0;

        // stddev 由估计器下限保护,除法恒有定义
        let z_score = deviation / baseline.stddev;

        let severity = self.severity_score(z_score, deviation_pct);
        let severity_level = self.severity_level(severity);

        if severity_level == SeverityLevel::Low {
            debug!(
                disease = %baseline.disease,
                location = %baseline.location,
                severity = severity,
                "偏离未达告警门槛"
            );
            return None;
        }

        let anomaly_type = self.classify(severity_level, z_score);
        let message = self.compose_message(baseline, actual_count, deviation, deviation_pct, severity_level);

        Some(ScoredAnomaly {
            date,
            actual_count,
            expected_count: baseline.expected_count,
            deviation,
            deviation_pct,
            severity,
            severity_level,
            anomaly_type,
            z_score,
            message,
        })
    }

    // ==========================================
    // 评分与分类
    // ==========================================

    /// 连续严重度分值 [0, 100]
    ///
    /// 对 |z_score| 与 deviation_pct 单调非降,在 100 饱和
    fn severity_score(&self, z_score: f64, deviation_pct: f64) -> f64 {
        let z_part = z_score.abs() * self.config.z_weight;
        let pct_part = deviation_pct.clamp(0.0, self.config.pct_cap) * self.config.pct_weight;
        (z_part + pct_part).min(100.0)
    }

    /// 分值 -> 等级
    fn severity_level(&self, severity: f64) -> SeverityLevel {
        if severity >= self.config.critical_cutoff {
            SeverityLevel::Critical
        } else if severity >= self.config.high_cutoff {
            SeverityLevel::High
        } else if severity >= self.config.medium_cutoff {
            SeverityLevel::Medium
        } else {
            SeverityLevel::Low
        }
    }

    /// 异常类型判定
    fn classify(&self, severity_level: SeverityLevel, z_score: f64) -> AnomalyType {
        if severity_level == SeverityLevel::Critical && z_score >= self.config.severe_outbreak_z {
            AnomalyType::SevereOutbreak
        } else {
            AnomalyType::Spike
        }
    }

    /// 分级告警文案
    fn compose_message(
        &self,
        baseline: &BaselineEstimate,
        actual_count: u32,
        deviation: f64,
        deviation_pct: f64,
        severity_level: SeverityLevel,
    ) -> String {
        let pct = deviation_pct.abs();

        if deviation < 0.0 {
            return format!(
                "Unexpected decrease in {} cases in {}: {} vs expected {:.0}.",
                baseline.disease, baseline.location, actual_count, baseline.expected_count
            );
        }

        match severity_level {
            SeverityLevel::Critical => format!(
                "SEVERE OUTBREAK DETECTED: {} cases in {} have reached {}, \
                 which is {:.0}% above expected levels. Immediate attention required.",
                baseline.disease, baseline.location, actual_count, pct
            ),
            SeverityLevel::High => format!(
                "MODERATE OUTBREAK: {} in {} shows {} cases, {:.0}% higher than expected. \
                 Monitor closely.",
                baseline.disease, baseline.location, actual_count, pct
            ),
            _ => format!(
                "Elevated levels: {} in {} at {} cases, {:.0}% above expected.",
                baseline.disease, baseline.location, actual_count, pct
            ),
        }
    }
}
