// ==========================================
// BaselineEstimator + AnomalyScorer 集成测试
// ==========================================
// 测试目标: 验证基线估计与异常评分的端到端一致性
// 覆盖范围: 金标准场景、单调性、门控、退化基线
// ==========================================

use chrono::NaiveDate;
use epiwatch_engine::config::{BaselineConfig, ScorerConfig};
use epiwatch_engine::domain::types::{AnomalyType, SeverityLevel};
use epiwatch_engine::domain::BaselineEstimate;
use epiwatch_engine::engine::{AnomalyScorer, BaselineEstimator};
use epiwatch_engine::logging;

// ==========================================
// 测试辅助函数
// ==========================================

fn create_estimator() -> BaselineEstimator {
    // 初始化日志系统
    logging::init_test();
    BaselineEstimator::new(BaselineConfig::default())
}

fn create_scorer() -> AnomalyScorer {
    // 初始化日志系统
    logging::init_test();
    AnomalyScorer::new(ScorerConfig::default())
}

fn create_baseline(expected: f64, stddev: f64) -> BaselineEstimate {
    BaselineEstimate {
        disease: "Influenza".to_string(),
        location: "Global".to_string(),
        expected_count: expected,
        stddev,
    }
}

fn date(year: i32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, 1, 1).unwrap()
}

#[test]
fn test_golden_scenario_end_to_end() {
    // 金标准场景: Influenza/Global/2010 count=53,基线 expected=16.0 stddev=12.8
    let anomaly = create_scorer()
        .score(date(2010), 53, &create_baseline(16.0, 12.8))
        .expect("金标准场景必须产出告警");

    assert_eq!(anomaly.deviation, 37.0);
    assert!((anomaly.deviation_pct - 217.6).abs() < 0.1, "pct={}", anomaly.deviation_pct);
    assert!((anomaly.z_score - 2.890_625).abs() < 1e-6);
    assert!((anomaly.severity - 87.8125).abs() < 1e-6);
    assert_eq!(anomaly.severity_level, SeverityLevel::Critical);
    assert_eq!(anomaly.anomaly_type, AnomalyType::Spike); // z < 3
}

#[test]
fn test_estimator_order_invariance_feeds_scorer() {
    let estimator = create_estimator();
    let scorer = create_scorer();

    let forward = estimator.estimate("Cholera", "Kenya", &[4, 8, 15, 16, 23, 42]);
    let shuffled = estimator.estimate("Cholera", "Kenya", &[42, 15, 4, 23, 8, 16]);
    assert_eq!(forward, shuffled);

    let a = scorer.score(date(2022), 90, &forward);
    let b = scorer.score(date(2022), 90, &shuffled);
    assert_eq!(a, b);
}

#[test]
fn test_empty_history_soft_path_still_scores() {
    // 空历史 -> 兜底基线,评分链路不抛错
    let baseline = create_estimator().estimate("Rare Disease", "Global", &[]);
    assert_eq!(baseline.expected_count, 1.0);
    assert_eq!(baseline.stddev, 1.0);

    let anomaly = create_scorer().score(date(2020), 10, &baseline);
    assert!(anomaly.is_some()); // z=9 足以告警
}

#[test]
fn test_identical_history_floored_stddev() {
    let baseline = create_estimator().estimate("Measles", "India", &[5, 5, 5]);
    assert_eq!(baseline.stddev, 1.0);

    // z 有定义且有限
    let anomaly = create_scorer().score(date(2021), 50, &baseline).unwrap();
    assert!(anomaly.z_score.is_finite());
}

#[test]
fn test_no_alert_below_medium() {
    let scorer = create_scorer();
    // 贴近基线的观测不物化
    assert!(scorer.score(date(2020), 16, &create_baseline(16.0, 12.8)).is_none());
    assert!(scorer.score(date(2020), 20, &create_baseline(16.0, 12.8)).is_none());
}

#[test]
fn test_severity_monotonic_in_actual_count() {
    let scorer = create_scorer();
    let baseline = create_baseline(10.0, 4.0);

    let mut last = 0.0;
    for actual in [20u32, 25, 30, 40, 60, 100] {
        let anomaly = scorer
            .score(date(2020), actual, &baseline)
            .unwrap_or_else(|| panic!("actual={} 应产出告警", actual));
        assert!(anomaly.severity >= last, "actual={} 严重度回落", actual);
        assert!((0.0..=100.0).contains(&anomaly.severity));
        last = anomaly.severity;
    }
}

#[test]
fn test_severe_outbreak_classification() {
    let scorer = create_scorer();

    // z = (70-10)/4 = 15 >= 3 且 Critical
    let severe = scorer.score(date(2020), 70, &create_baseline(10.0, 4.0)).unwrap();
    assert_eq!(severe.severity_level, SeverityLevel::Critical);
    assert_eq!(severe.anomaly_type, AnomalyType::SevereOutbreak);
    assert!(severe.message.contains("SEVERE OUTBREAK DETECTED"));
}

#[test]
fn test_level_cutoffs() {
    let scorer = create_scorer();
    let baseline = create_baseline(100.0, 50.0);

    // dev=55, pct=54.5, z=1.1 => severity = 22 + 16.3 = 38.3 < 40 => 无告警
    assert!(scorer.score(date(2020), 155, &baseline).is_none());

    // dev=70, pct=69.3, z=1.4 => severity = 28 + 20.8 = 48.8 => Medium
    let medium = scorer.score(date(2020), 170, &baseline).unwrap();
    assert_eq!(medium.severity_level, SeverityLevel::Medium);
    assert!(medium.message.starts_with("Elevated levels"));

    // dev=110, pct=100(截断), z=2.2 => severity = 44 + 30 = 74 => High
    let high = scorer.score(date(2020), 210, &baseline).unwrap();
    assert_eq!(high.severity_level, SeverityLevel::High);
    assert!(high.message.starts_with("MODERATE OUTBREAK"));
}

#[test]
fn test_zero_baseline_sentinel() {
    // expected=0 时 deviation_pct 退化为 deviation * 100
    let baseline = create_baseline(0.0, 1.0);
    let anomaly = create_scorer().score(date(2020), 5, &baseline).unwrap();
    assert_eq!(anomaly.deviation_pct, 500.0);
    assert!(anomaly.severity <= 100.0);
}
