// ==========================================
// 疫情暴发信号引擎 - 告警实体
// ==========================================
// 职责: 异常检测结果的最终载体
// 红线: 创建后不可变,只能由全新输入重新生成
// id 必须是确定性字符串,保证跨运行去重
// ==========================================

use crate::domain::types::{AnomalyType, SeverityLevel};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// 告警 - 观测计数相对基线的已分类偏离
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    /// 确定性 ID: `{disease}_{location}_{year}_{seq}` (空白/斜杠转下划线)
    pub id: String,
    pub disease: String,
    pub location: String,
    /// 城市级展示位置 (无城市映射时回退为 location 本身)
    pub city_location: String,
    /// 按严重等级与疾病类别拼装的上下文描述
    pub context_description: String,
    pub date: NaiveDate,
    pub actual_count: u32,
    pub expected_count: f64,
    pub deviation: f64,
    pub deviation_pct: f64,
    /// 连续严重度分值 [0, 100]
    pub severity: f64,
    pub severity_level: SeverityLevel,
    pub anomaly_type: AnomalyType,
    pub z_score: f64,
    pub message: String,
}

impl Alert {
    /// 构造确定性告警 ID
    ///
    /// # 参数
    /// - `disease` / `location`: 原始名称 (空白与斜杠替换为下划线)
    /// - `year`: 告警所在年份
    /// - `seq`: 该 (disease, location) 告警流内按日期排序的序号
    pub fn make_id(disease: &str, location: &str, year: i32, seq: usize) -> String {
        format!(
            "{}_{}_{}_{}",
            sanitize(disease),
            sanitize(location),
            year,
            seq
        )
    }
}

/// 名称净化: 空白与 '/' 转下划线
fn sanitize(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_whitespace() || c == '/' { '_' } else { c })
        .collect()
}
