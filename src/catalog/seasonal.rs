// ==========================================
// 疫情暴发信号引擎 - 季节曲线目录
// ==========================================
// 职责: 疾病 -> 类别 -> 月度强度曲线
// 匹配规则: 疾病名小写后做子串匹配 (与分类表一致)
// 兜底策略: 未知疾病降级为 Steady, 全月乘数 1.0,
//           未知疾病仍产出有效且无偏的日级序列
// ==========================================

use crate::domain::types::DiseaseCategory;
use serde::{Deserialize, Serialize};

// ==========================================
// 月度曲线常量
// ==========================================

/// 中性曲线 - 全月 1.0
const CURVE_FLAT: [f64; 12] = [1.0; 12];

/// 流感曲线 - 北半球冬季峰 (11月-3月 x1.5, 6-8月 x0.5)
const CURVE_INFLUENZA: [f64; 12] = [
    1.5, 1.5, 1.5, 1.0, 1.0, 0.5, 0.5, 0.5, 1.0, 1.0, 1.5, 1.5,
];

/// 登革热曲线 - 雨季峰 (6-10月 x1.6, 其余 x0.7)
const CURVE_DENGUE: [f64; 12] = [
    0.7, 0.7, 0.7, 0.7, 0.7, 1.6, 1.6, 1.6, 1.6, 1.6, 0.7, 0.7,
];

/// 麻疹曲线 - 春季略高 (3-5月 x1.3, 其余 x0.9)
const CURVE_MEASLES: [f64; 12] = [
    0.9, 0.9, 1.3, 1.3, 1.3, 0.9, 0.9, 0.9, 0.9, 0.9, 0.9, 0.9,
];

// ==========================================
// 季节曲线 (Seasonal Profile)
// ==========================================

/// 季节曲线 - 类别 + 12 个月度正乘数
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonalProfile {
    pub category: DiseaseCategory,
    pub monthly_multiplier: [f64; 12],
}

impl SeasonalProfile {
    /// 指定月份 (1-12) 的乘数
    pub fn multiplier(&self, month: u32) -> f64 {
        debug_assert!((1..=12).contains(&month));
        self.monthly_multiplier[(month as usize - 1).min(11)]
    }
}

// ==========================================
// SeasonalCatalog - 季节曲线目录
// ==========================================
#[derive(Debug, Default)]
pub struct SeasonalCatalog {}

impl SeasonalCatalog {
    /// 构造函数 (表为内置常量,无需外部加载)
    pub fn new() -> Self {
        Self {}
    }

    /// 疾病名 -> 类别 (子串匹配,缺失降级 Steady)
    pub fn category_of(&self, disease: &str) -> DiseaseCategory {
        let name = disease.to_lowercase();

        // 季节性疾病
        if ["influenza", "flu", "dengue", "measles"]
            .iter()
            .any(|p| name.contains(p))
        {
            return DiseaseCategory::Seasonal;
        }

        // 偶发性暴发疾病
        if ["ebola", "cholera", "yellow fever", "mers"]
            .iter()
            .any(|p| name.contains(p))
        {
            return DiseaseCategory::Sporadic;
        }

        // 平稳/地方性疾病 (兜底)
        DiseaseCategory::Steady
    }

    /// 疾病名 -> 季节曲线
    ///
    /// 先查疾病级曲线覆写,再回退类别默认曲线
    pub fn profile(&self, disease: &str) -> SeasonalProfile {
        let category = self.category_of(disease);
        let name = disease.to_lowercase();

        let curve = if name.contains("influenza") || name.contains("flu") {
            CURVE_INFLUENZA
        } else if name.contains("dengue") {
            CURVE_DENGUE
        } else if name.contains("measles") {
            CURVE_MEASLES
        } else {
            self.category_curve(category)
        };

        SeasonalProfile {
            category,
            monthly_multiplier: curve,
        }
    }

    /// 类别 -> 月度乘数 (month 取 1-12)
    pub fn multiplier(&self, category: DiseaseCategory, month: u32) -> f64 {
        let curve = self.category_curve(category);
        curve[(month as usize).clamp(1, 12) - 1]
    }

    /// 类别默认曲线
    fn category_curve(&self, category: DiseaseCategory) -> [f64; 12] {
        match category {
            // 无疾病级覆写的季节性疾病沿用冬季峰形态
            DiseaseCategory::Seasonal => CURVE_INFLUENZA,
            // 偶发类的尖峰来自日级扰动,曲线本身保持中性
            DiseaseCategory::Sporadic => CURVE_FLAT,
            DiseaseCategory::Steady => CURVE_FLAT,
        }
    }
}
