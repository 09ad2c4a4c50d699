// ==========================================
// 疫情暴发信号引擎 - 周趋势聚合引擎
// ==========================================
// 职责: 日级序列 -> 近 7 天 vs 前 7 天对比
// 输入: DailySeries + 参考日期
// 输出: WeeklyTrend (方向/严重度/描述)
// ==========================================

use crate::config::TrendConfig;
use crate::domain::types::{TrendDirection, TrendSeverity};
use crate::domain::{DailyPoint, DailySeries, WeeklyTrend};
use chrono::{Days, NaiveDate};

// ==========================================
// TrendAggregator - 周趋势聚合引擎
// ==========================================
#[derive(Clone)]
pub struct TrendAggregator {
    config: TrendConfig,
}

impl TrendAggregator {
    /// 构造函数
    pub fn new(config: TrendConfig) -> Self {
        Self { config }
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 聚合周趋势
    ///
    /// # 参数
    /// - `series`: 日级序列
    /// - `reference_date`: 近 7 天窗口的末日
    ///
    /// 窗口越出序列边界的日按 0 计
    pub fn aggregate_week(&self, series: &DailySeries, reference_date: NaiveDate) -> WeeklyTrend {
        let recent_points = window_points(series, reference_date, 7);
        let recent: u32 = recent_points.iter().map(|p| p.count).sum();

        let prior_end = reference_date - Days::new(7);
        let prior: u32 = window_points(series, prior_end, 7)
            .iter()
            .map(|p| p.count)
            .sum();

        let change_pct = self.change_pct(recent, prior);
        let trend_direction = self.classify_direction(change_pct, recent, prior);
        let severity = self.classify_severity(change_pct);
        let description = self.compose_description(change_pct, recent, prior);

        WeeklyTrend {
            disease: series.disease.clone(),
            total_count: recent,
            trend_data: recent_points,
            change_pct,
            trend_direction,
            severity,
            description,
        }
    }

    // ==========================================
    // 指标计算
    // ==========================================

    /// 周环比变化率 (保留一位小数)
    ///
    /// prior=0 且 recent>0 时报哨兵值,表示 "新增活动"
    fn change_pct(&self, recent: u32, prior: u32) -> f64 {
        if prior == 0 {
            if recent > 0 {
                self.config.new_activity_sentinel_pct
            } else {
                0.0
            }
        } else {
            let raw = (recent as f64 - prior as f64) / prior as f64 * 100.0;
            (raw * 10.0).round() / 10.0
        }
    }

    /// 趋势方向 (±死区内判 Stable)
    fn classify_direction(&self, change_pct: f64, recent: u32, prior: u32) -> TrendDirection {
        if recent == 0 && prior == 0 {
            return TrendDirection::Stable;
        }
        if change_pct > self.config.direction_dead_zone_pct {
            TrendDirection::Up
        } else if change_pct < -self.config.direction_dead_zone_pct {
            TrendDirection::Down
        } else {
            TrendDirection::Stable
        }
    }

    /// 趋势严重度 (阈值含边界: 恰为 20 判 Moderate)
    fn classify_severity(&self, change_pct: f64) -> TrendSeverity {
        let magnitude = change_pct.abs();
        if magnitude >= self.config.significant_threshold_pct {
            TrendSeverity::Significant
        } else if magnitude >= self.config.moderate_threshold_pct {
            TrendSeverity::Moderate
        } else {
            TrendSeverity::Minor
        }
    }

    /// 确定性描述文本
    fn compose_description(&self, change_pct: f64, recent: u32, prior: u32) -> String {
        let magnitude = change_pct.abs();
        let abs_change = (recent as i64 - prior as i64).unsigned_abs();
        let direction = if change_pct > 0.0 { "increase" } else { "decrease" };

        // 与方向判定同界: 死区内 (含边界) 视为平稳
        if magnitude <= self.config.direction_dead_zone_pct {
            format!("Stable at {} cases (no significant change)", recent)
        } else if magnitude < self.config.moderate_threshold_pct {
            format!(
                "Slight {} of {} cases ({:.1}%) this week",
                direction, abs_change, magnitude
            )
        } else if magnitude < self.config.significant_threshold_pct {
            format!(
                "Moderate {} of {} cases ({:.1}%) this week",
                direction, abs_change, magnitude
            )
        } else {
            format!(
                "Significant {} of {} cases ({:.1}%) this week - requires attention",
                direction, abs_change, magnitude
            )
        }
    }
}

/// 以 `end` 为末日的 `days` 天窗口内的数据点,按日期升序
fn window_points(series: &DailySeries, end: NaiveDate, days: u64) -> Vec<DailyPoint> {
    let start = end - Days::new(days - 1);
    series
        .points
        .iter()
        .filter(|p| p.date >= start && p.date <= end)
        .copied()
        .collect()
}
