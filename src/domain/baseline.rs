// ==========================================
// 疫情暴发信号引擎 - 基线估计实体
// ==========================================
// 职责: 承载期望计数与离散度,供异常评分使用
// ==========================================

use serde::{Deserialize, Serialize};

/// 基线估计 - 同 (disease, location) 历史计数的期望与离散度
///
/// `stddev` 已由估计器下限保护 (>= 配置下限),下游除法恒有定义
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaselineEstimate {
    pub disease: String,
    pub location: String,
    /// 期望计数 (>= 0)
    pub expected_count: f64,
    /// 样本标准差 (>= 配置下限)
    pub stddev: f64,
}
