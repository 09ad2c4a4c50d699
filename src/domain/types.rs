// ==========================================
// 疫情暴发信号引擎 - 领域类型定义
// ==========================================
// 红线: 等级制枚举,不在领域层做任何计算
// 序列化格式: snake_case (与前端/告警 JSON 一致)
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 疾病类别 (Disease Category)
// ==========================================
// 决定年度总量展开为日级序列时使用的季节曲线
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiseaseCategory {
    Seasonal, // 季节性 (流感/登革热/麻疹)
    Sporadic, // 偶发性 (埃博拉/霍乱)
    Steady,   // 平稳性 (默认兜底类别)
}

impl fmt::Display for DiseaseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiseaseCategory::Seasonal => write!(f, "seasonal"),
            DiseaseCategory::Sporadic => write!(f, "sporadic"),
            DiseaseCategory::Steady => write!(f, "steady"),
        }
    }
}

// ==========================================
// 趋势方向 (Trend Direction)
// ==========================================
// ±5% 死区内判定为 Stable,避免把噪声当趋势
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    Up,     // 上升
    Down,   // 下降
    Stable, // 平稳
}

impl fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrendDirection::Up => write!(f, "up"),
            TrendDirection::Down => write!(f, "down"),
            TrendDirection::Stable => write!(f, "stable"),
        }
    }
}

// ==========================================
// 趋势严重度 (Trend Severity)
// ==========================================
// 顺序: Minor < Moderate < Significant
// 边界: |change_pct| 恰为 20 判 Moderate, 恰为 50 判 Significant
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendSeverity {
    Minor,       // 轻微
    Moderate,    // 中等
    Significant, // 显著
}

impl fmt::Display for TrendSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrendSeverity::Minor => write!(f, "minor"),
            TrendSeverity::Moderate => write!(f, "moderate"),
            TrendSeverity::Significant => write!(f, "significant"),
        }
    }
}

// ==========================================
// 告警严重等级 (Severity Level)
// ==========================================
// 由 0-100 连续分值分桶: >=80 Critical, >=60 High, >=40 Medium, 其余 Low
// 顺序: Low < Medium < High < Critical
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeverityLevel {
    Low,      // 低 (不落地告警)
    Medium,   // 中
    High,     // 高
    Critical, // 危急
}

impl fmt::Display for SeverityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeverityLevel::Low => write!(f, "low"),
            SeverityLevel::Medium => write!(f, "medium"),
            SeverityLevel::High => write!(f, "high"),
            SeverityLevel::Critical => write!(f, "critical"),
        }
    }
}

// ==========================================
// 异常类型 (Anomaly Type)
// ==========================================
// SevereOutbreak 仅在 Critical 且 z_score >= 3 时判定
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnomalyType {
    Spike,          // 尖峰
    SevereOutbreak, // 重大暴发
}

impl fmt::Display for AnomalyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnomalyType::Spike => write!(f, "spike"),
            AnomalyType::SevereOutbreak => write!(f, "severe_outbreak"),
        }
    }
}
