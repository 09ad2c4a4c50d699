// ==========================================
// 疫情暴发信号引擎 - 年度聚合实体
// ==========================================
// 职责: 不可变输入事实
// 唯一性: (disease, location, year) 一条
// ==========================================

use serde::{Deserialize, Serialize};

/// 年度聚合 - 某疾病某地区某年的暴发总数
///
/// 引擎的唯一输入形态,导入后不再修改
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearlyAggregate {
    pub disease: String,
    pub location: String,
    pub year: i32,
    pub count: u32,
}

impl YearlyAggregate {
    /// 唯一键 (disease, location, year)
    pub fn key(&self) -> (String, String, i32) {
        (self.disease.clone(), self.location.clone(), self.year)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key() {
        let agg = YearlyAggregate {
            disease: "Influenza".to_string(),
            location: "Global".to_string(),
            year: 2010,
            count: 53,
        };
        assert_eq!(
            agg.key(),
            ("Influenza".to_string(), "Global".to_string(), 2010)
        );
    }
}
