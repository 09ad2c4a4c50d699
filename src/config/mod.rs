// ==========================================
// 疫情暴发信号引擎 - 配置层
// ==========================================
// 职责: 全部阈值与系数的集中定义
// 红线: 默认值即发布基准值,回归测试以其为金标准
// 加载: JSON 文件 (缺省字段回落默认值),按值注入各引擎
// ==========================================

use crate::error::{EngineError, EngineResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

// ==========================================
// 模拟器配置
// ==========================================

/// 时序模拟器配置
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorConfig {
    /// 日级扰动幅度 (±amplitude,默认 ±15%)
    pub noise_amplitude: f64,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            noise_amplitude: 0.15,
        }
    }
}

// ==========================================
// 趋势配置
// ==========================================

/// 周趋势聚合配置
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrendConfig {
    /// 方向死区 (±5% 内判 Stable)
    pub direction_dead_zone_pct: f64,
    /// Moderate 阈值 (|change_pct| >= 20)
    pub moderate_threshold_pct: f64,
    /// Significant 阈值 (|change_pct| >= 50)
    pub significant_threshold_pct: f64,
    /// prior=0 且 recent>0 时的 "新增活动" 哨兵值
    pub new_activity_sentinel_pct: f64,
}

impl Default for TrendConfig {
    fn default() -> Self {
        Self {
            direction_dead_zone_pct: 5.0,
            moderate_threshold_pct: 20.0,
            significant_threshold_pct: 50.0,
            new_activity_sentinel_pct: 100.0,
        }
    }
}

// ==========================================
// 基线配置
// ==========================================

/// 基线估计器配置
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BaselineConfig {
    /// 历史为空时的期望计数兜底值 (罕见疾病常见情形,软失败)
    pub fallback_expected: f64,
    /// 标准差下限 (防止下游除零)
    pub min_stddev: f64,
}

impl Default for BaselineConfig {
    fn default() -> Self {
        Self {
            fallback_expected: 1.0,
            min_stddev: 1.0,
        }
    }
}

// ==========================================
// 评分配置
// ==========================================

/// 异常评分器配置
///
/// severity = min(100, |z| * z_weight + clamp(deviation_pct, 0, pct_cap) * pct_weight)
/// 对两个输入单调非降,在 100 饱和
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScorerConfig {
    pub z_weight: f64,
    pub pct_weight: f64,
    pub pct_cap: f64,
    /// Medium 等级下限 (低于此不落地告警)
    pub medium_cutoff: f64,
    /// High 等级下限
    pub high_cutoff: f64,
    /// Critical 等级下限
    pub critical_cutoff: f64,
    /// SevereOutbreak 判定所需 z_score 下限
    pub severe_outbreak_z: f64,
}

impl Default for ScorerConfig {
    fn default() -> Self {
        Self {
            z_weight: 20.0,
            pct_weight: 0.3,
            pct_cap: 100.0,
            medium_cutoff: 40.0,
            high_cutoff: 60.0,
            critical_cutoff: 80.0,
            severe_outbreak_z: 3.0,
        }
    }
}

// ==========================================
// EngineConfig - 引擎配置总成
// ==========================================

/// 引擎配置 - 所有可调策略的唯一入口
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub simulator: SimulatorConfig,
    pub trend: TrendConfig,
    pub baseline: BaselineConfig,
    pub scorer: ScorerConfig,
}

impl EngineConfig {
    /// 从 JSON 文件加载配置 (缺省字段回落默认值)
    pub fn from_json_file(path: &Path) -> EngineResult<Self> {
        let raw = fs::read_to_string(path)
            .map_err(|e| EngineError::Config(format!("读取配置文件失败 {}: {}", path.display(), e)))?;
        let config: EngineConfig = serde_json::from_str(&raw)
            .map_err(|e| EngineError::Config(format!("解析配置文件失败 {}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    /// 校验配置自洽性
    pub fn validate(&self) -> EngineResult<()> {
        if !(0.0..1.0).contains(&self.simulator.noise_amplitude) {
            return Err(EngineError::Config(format!(
                "noise_amplitude 必须在 [0, 1) 内,实际 {}",
                self.simulator.noise_amplitude
            )));
        }
        if self.baseline.min_stddev <= 0.0 {
            return Err(EngineError::Config(format!(
                "min_stddev 必须为正,实际 {}",
                self.baseline.min_stddev
            )));
        }
        if self.baseline.fallback_expected < 0.0 {
            return Err(EngineError::Config(format!(
                "fallback_expected 不能为负,实际 {}",
                self.baseline.fallback_expected
            )));
        }
        if self.trend.moderate_threshold_pct > self.trend.significant_threshold_pct {
            return Err(EngineError::Config(
                "moderate_threshold_pct 不能大于 significant_threshold_pct".to_string(),
            ));
        }
        let s = &self.scorer;
        if !(s.medium_cutoff <= s.high_cutoff && s.high_cutoff <= s.critical_cutoff) {
            return Err(EngineError::Config(
                "等级阈值必须满足 medium <= high <= critical".to_string(),
            ));
        }
        Ok(())
    }
}
