// ==========================================
// 疫情暴发信号引擎 - 上下文拼装引擎
// ==========================================
// 职责: 告警 -> 城市级位置 + 上下文描述
// 红线: 未知疾病/未知地区一律走兜底,绝不报错;
//       每个严重等级一条固定规范句,无随机性
// ==========================================

use crate::catalog::SignalCatalogs;
use crate::domain::types::SeverityLevel;
use crate::domain::Alert;
use std::sync::Arc;

// ==========================================
// 疾病专属补充子句 (以 " - " 分隔符拼接)
// ==========================================
const DISEASE_CLAUSES: &[(&str, &str)] = &[
    ("Influenza", "seasonal peak activity"),
    ("Dengue", "vector-borne transmission surge"),
    ("Measles", "vaccination gap identified"),
    ("Polio", "immunization campaign underway"),
    ("Cholera", "water supply contamination suspected"),
    ("Malaria", "mosquito control measures deployed"),
    ("Tuberculosis", "contact tracing initiated"),
    ("COVID-19", "variant surveillance active"),
    ("Ebola", "quarantine protocols enforced"),
    ("Yellow Fever", "vector control intensified"),
];

// ==========================================
// ContextComposer - 上下文拼装引擎
// ==========================================
#[derive(Clone)]
pub struct ContextComposer {
    catalogs: Arc<SignalCatalogs>,
}

impl ContextComposer {
    /// 构造函数
    pub fn new(catalogs: Arc<SignalCatalogs>) -> Self {
        Self { catalogs }
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 为告警补齐城市位置与上下文描述 (就地写入)
    pub fn compose(&self, alert: &mut Alert) {
        let (city_location, context_description) =
            self.compose_parts(&alert.disease, &alert.location, alert.severity_level);
        alert.city_location = city_location;
        alert.context_description = context_description;
    }

    /// 计算 (city_location, context_description)
    ///
    /// # 参数
    /// - `disease` / `location`: 告警归属
    /// - `severity_level`: 已分级严重等级
    ///
    /// 未知地区回退为 location 本身;未知疾病仅保留严重度子句
    pub fn compose_parts(
        &self,
        disease: &str,
        location: &str,
        severity_level: SeverityLevel,
    ) -> (String, String) {
        let city_location = self.catalogs.city.resolve(location, disease);

        let base = severity_clause(severity_level);
        let context_description = match disease_clause(disease) {
            Some(clause) => format!("{} - {}", base, clause),
            None => base.to_string(),
        };

        (city_location, context_description)
    }
}

/// 严重等级规范句 (固定,每级一句)
fn severity_clause(level: SeverityLevel) -> &'static str {
    match level {
        SeverityLevel::Critical => {
            "Rapid spread in downtown area schools and residential neighborhoods"
        }
        SeverityLevel::High => "Elevated transmission rates in community settings",
        SeverityLevel::Medium => "Localized outbreak in residential area",
        SeverityLevel::Low => "Isolated cases under investigation",
    }
}

/// 疾病专属子句 (精确匹配表,缺失返回 None)
fn disease_clause(disease: &str) -> Option<&'static str> {
    DISEASE_CLAUSES
        .iter()
        .find(|(name, _)| *name == disease)
        .map(|(_, clause)| *clause)
}
