// ==========================================
// 疫情暴发信号引擎 - 日级序列与周趋势
// ==========================================
// 职责: 派生实体定义,不含引擎逻辑
// 红线: DailySeries 按需重算,不作为持久化真相源
// ==========================================

use crate::domain::types::{TrendDirection, TrendSeverity};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// 日级数据点
// ==========================================

/// 单日数据点 (ISO-8601 日期 + 非负计数)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyPoint {
    pub date: NaiveDate,
    pub count: u32,
}

// ==========================================
// 日级序列
// ==========================================

/// 日级序列 - 年度总量展开后的逐日计数
///
/// 不变量:
/// - `points.len()` 等于该年天数 (闰年 366, 平年 365)
/// - `sum(points.count)` 与来源年度总量精确相等
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailySeries {
    pub disease: String,
    pub location: String,
    pub year: i32,
    pub points: Vec<DailyPoint>,
}

impl DailySeries {
    /// 序列总计数
    pub fn total(&self) -> u32 {
        self.points.iter().map(|p| p.count).sum()
    }

    /// 序列最后一天 (空序列返回 None)
    pub fn last_date(&self) -> Option<NaiveDate> {
        self.points.last().map(|p| p.date)
    }
}

// ==========================================
// 周趋势
// ==========================================

/// 周趋势 - 近 7 天窗口与前 7 天窗口的对比
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyTrend {
    pub disease: String,
    /// 近 7 天总计数
    pub total_count: u32,
    /// 近 7 天逐日数据 (按日期升序)
    pub trend_data: Vec<DailyPoint>,
    pub change_pct: f64,
    pub trend_direction: TrendDirection,
    pub severity: TrendSeverity,
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_series(counts: &[u32]) -> DailySeries {
        let points = counts
            .iter()
            .enumerate()
            .map(|(i, &count)| DailyPoint {
                date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + chrono::Days::new(i as u64),
                count,
            })
            .collect();
        DailySeries {
            disease: "Cholera".to_string(),
            location: "Kenya".to_string(),
            year: 2024,
            points,
        }
    }

    #[test]
    fn test_total() {
        let series = make_series(&[1, 2, 3, 0, 4]);
        assert_eq!(series.total(), 10);
    }

    #[test]
    fn test_last_date() {
        let series = make_series(&[1, 2, 3]);
        assert_eq!(
            series.last_date(),
            Some(NaiveDate::from_ymd_opt(2024, 1, 3).unwrap())
        );

        let empty = make_series(&[]);
        assert_eq!(empty.last_date(), None);
    }
}
