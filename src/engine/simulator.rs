// ==========================================
// 疫情暴发信号引擎 - 时序模拟引擎
// ==========================================
// 职责: 年度总量 -> 带季节形态的日级序列
// 输入: 年度聚合 + 季节曲线
// 输出: DailySeries (逐日计数,总和与年度总量精确相等)
// 红线: 扰动由输入键纯函数派生,重复调用输出逐位相同
// ==========================================

use crate::catalog::{SeasonalProfile, SignalCatalogs};
use crate::config::SimulatorConfig;
use crate::domain::{DailyPoint, DailySeries, YearlyAggregate};
use crate::seed::{derive_seed, unit_interval};
use chrono::{Datelike, NaiveDate};
use std::sync::Arc;
use tracing::debug;

// ==========================================
// TemporalSimulator - 时序模拟引擎
// ==========================================
#[derive(Clone)]
pub struct TemporalSimulator {
    catalogs: Arc<SignalCatalogs>,
    config: SimulatorConfig,
}

impl TemporalSimulator {
    /// 构造函数
    ///
    /// # 参数
    /// - `catalogs`: 只读目录集合 (季节曲线)
    /// - `config`: 模拟器配置
    pub fn new(catalogs: Arc<SignalCatalogs>, config: SimulatorConfig) -> Self {
        Self { catalogs, config }
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 展开年度聚合为日级序列
    ///
    /// 算法:
    /// 1. 逐日权重 w(d) = 月度乘数 * (1 + 有界扰动)
    /// 2. 归一化取整 count(d) = round(total * w(d) / Σw)
    /// 3. 余量调和: 按最大小数余量逐一分配 ±1,使总和精确相等
    /// 4. total = 0 时直接输出全零序列
    pub fn simulate(&self, aggregate: &YearlyAggregate) -> DailySeries {
        let profile = self.catalogs.seasonal.profile(&aggregate.disease);
        let dates = year_dates(aggregate.year);

        // 边界: 零总量跳过权重与调和
        if aggregate.count == 0 {
            let points = dates
                .into_iter()
                .map(|date| DailyPoint { date, count: 0 })
                .collect();
            return DailySeries {
                disease: aggregate.disease.clone(),
                location: aggregate.location.clone(),
                year: aggregate.year,
                points,
            };
        }

        // 1. 逐日权重
        let weights: Vec<f64> = dates
            .iter()
            .map(|date| self.day_weight(aggregate, &profile, *date))
            .collect();
        let weight_sum: f64 = weights.iter().sum();

        // 2. 归一化取整
        let total = aggregate.count as f64;
        let ideals: Vec<f64> = weights.iter().map(|w| total * w / weight_sum).collect();
        let mut counts: Vec<i64> = ideals.iter().map(|x| x.round() as i64).collect();

        // 3. 余量调和
        reconcile(&mut counts, &ideals, aggregate.count as i64);

        debug!(
            disease = %aggregate.disease,
            location = %aggregate.location,
            year = aggregate.year,
            total = aggregate.count,
            "日级序列展开完成"
        );

        let points = dates
            .into_iter()
            .zip(counts)
            .map(|(date, count)| DailyPoint {
                date,
                count: count as u32,
            })
            .collect();

        DailySeries {
            disease: aggregate.disease.clone(),
            location: aggregate.location.clone(),
            year: aggregate.year,
            points,
        }
    }

    // ==========================================
    // 权重计算
    // ==========================================

    /// 单日原始权重
    ///
    /// month(d) 使用该日的真实月份,不用 ISO 周
    fn day_weight(
        &self,
        aggregate: &YearlyAggregate,
        profile: &SeasonalProfile,
        date: NaiveDate,
    ) -> f64 {
        let multiplier = profile.multiplier(date.month());
        let noise = self.bounded_noise(aggregate, date.ordinal());
        multiplier * (1.0 + noise)
    }

    /// 有界确定性扰动,取值 [-amplitude, +amplitude]
    ///
    /// 种子仅由 (disease, location, year, day_of_year) 派生,
    /// 并发模拟之间无任何共享状态
    fn bounded_noise(&self, aggregate: &YearlyAggregate, day_of_year: u32) -> f64 {
        let seed = derive_seed(
            &aggregate.disease,
            &aggregate.location,
            aggregate.year,
            day_of_year,
        );
        (unit_interval(seed) * 2.0 - 1.0) * self.config.noise_amplitude
    }
}

// ==========================================
// 辅助函数
// ==========================================

/// 某年的全部日历日,按日期升序
fn year_dates(year: i32) -> Vec<NaiveDate> {
    let days = days_in_year(year);
    // days_in_year 已保证序数在年内
    (1..=days)
        .filter_map(|doy| NaiveDate::from_yo_opt(year, doy))
        .collect()
}

/// 某年天数 (闰年 366, 平年 365)
fn days_in_year(year: i32) -> u32 {
    if NaiveDate::from_ymd_opt(year, 2, 29).is_some() {
        366
    } else {
        365
    }
}

/// 取整余量调和
///
/// 正余量分配给小数余量最大 (最被低估) 的日;
/// 负余量从计数最大且被高估的日扣减,绝不把计数减到负数
fn reconcile(counts: &mut [i64], ideals: &[f64], target: i64) {
    let mut residue = target - counts.iter().sum::<i64>();

    if residue > 0 {
        // 按低估程度降序 (ideal - count 最大者优先),日序号稳定兜底
        let mut order: Vec<usize> = (0..counts.len()).collect();
        order.sort_by(|&a, &b| {
            let da = ideals[a] - counts[a] as f64;
            let db = ideals[b] - counts[b] as f64;
            db.partial_cmp(&da).unwrap_or(std::cmp::Ordering::Equal)
                .then(a.cmp(&b))
        });
        let mut i = 0;
        while residue > 0 {
            counts[order[i % order.len()]] += 1;
            residue -= 1;
            i += 1;
        }
    } else if residue < 0 {
        // 按高估程度降序 (count - ideal 最大者优先)
        let mut order: Vec<usize> = (0..counts.len()).collect();
        order.sort_by(|&a, &b| {
            let da = counts[a] as f64 - ideals[a];
            let db = counts[b] as f64 - ideals[b];
            db.partial_cmp(&da).unwrap_or(std::cmp::Ordering::Equal)
                .then(a.cmp(&b))
        });
        let mut i = 0;
        while residue < 0 && i < order.len() * 2 {
            let idx = order[i % order.len()];
            if counts[idx] > 0 {
                counts[idx] -= 1;
                residue += 1;
            }
            i += 1;
        }
    }
}

// ==========================================
// 单元测试
// ==========================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::SignalCatalogs;

    fn simulator() -> TemporalSimulator {
        TemporalSimulator::new(Arc::new(SignalCatalogs::load()), SimulatorConfig::default())
    }

    fn aggregate(disease: &str, count: u32, year: i32) -> YearlyAggregate {
        YearlyAggregate {
            disease: disease.to_string(),
            location: "Global".to_string(),
            year,
            count,
        }
    }

    #[test]
    fn test_sum_invariant_exact() {
        let sim = simulator();
        for count in [0u32, 1, 7, 53, 365, 1000, 99999] {
            let series = sim.simulate(&aggregate("Influenza", count, 2010));
            assert_eq!(series.total(), count, "count={} 总和不守恒", count);
        }
    }

    #[test]
    fn test_deterministic() {
        let sim = simulator();
        let agg = aggregate("Dengue", 812, 2019);
        let a = sim.simulate(&agg);
        let b = sim.simulate(&agg);
        assert_eq!(a, b);
    }

    #[test]
    fn test_series_length_leap_vs_common() {
        let sim = simulator();
        assert_eq!(sim.simulate(&aggregate("Cholera", 100, 2020)).points.len(), 366);
        assert_eq!(sim.simulate(&aggregate("Cholera", 100, 2021)).points.len(), 365);
    }

    #[test]
    fn test_zero_total_all_zero() {
        let sim = simulator();
        let series = sim.simulate(&aggregate("Ebola", 0, 2015));
        assert!(series.points.iter().all(|p| p.count == 0));
        assert_eq!(series.points.len(), 365);
    }

    #[test]
    fn test_seasonal_shape_winter_heavier() {
        let sim = simulator();
        let series = sim.simulate(&aggregate("Influenza", 36500, 2021));

        let january: u32 = series
            .points
            .iter()
            .filter(|p| p.date.month() == 1)
            .map(|p| p.count)
            .sum();
        let july: u32 = series
            .points
            .iter()
            .filter(|p| p.date.month() == 7)
            .map(|p| p.count)
            .sum();
        // 冬季乘数 1.5 vs 夏季 0.5, ±15% 扰动不足以逆转
        assert!(january > july, "january={} july={}", january, july);
    }

    #[test]
    fn test_unknown_disease_still_valid_series() {
        let sim = simulator();
        let series = sim.simulate(&aggregate("Totally Unknown Syndrome", 400, 2018));
        assert_eq!(series.total(), 400);
        assert_eq!(series.points.len(), 365);
    }

    #[test]
    fn test_reconcile_positive_residue() {
        let ideals = [1.4, 1.4, 1.2];
        let mut counts = [1i64, 1, 1];
        reconcile(&mut counts, &ideals, 4);
        assert_eq!(counts.iter().sum::<i64>(), 4);
        // 低估最多的日先补
        assert_eq!(counts[0], 2);
    }

    #[test]
    fn test_reconcile_negative_residue_never_below_zero() {
        let ideals = [0.4, 0.4, 2.2];
        let mut counts = [0i64, 1, 2];
        reconcile(&mut counts, &ideals, 2);
        assert_eq!(counts.iter().sum::<i64>(), 2);
        assert!(counts.iter().all(|&c| c >= 0));
    }

    #[test]
    fn test_noise_bounded() {
        let sim = simulator();
        let agg = aggregate("Measles", 1, 2020);
        for doy in 1..=366 {
            let noise = sim.bounded_noise(&agg, doy);
            assert!(noise.abs() <= 0.15 + f64::EPSILON, "doy={} noise={}", doy, noise);
        }
    }
}
