// ==========================================
// 疫情暴发信号引擎 - 城市查找目录
// ==========================================
// 职责: location -> 城市级展示位置
// 红线: 无随机性,同一输入恒得同一城市 (跨运行告警去重依赖此点)
// 兜底策略: 无城市映射时原样返回 location
// ==========================================

use crate::seed::fnv1a64;
use std::collections::HashMap;

/// 国家 -> 主要城市表
///
/// 多个候选城市时用疾病名的稳定哈希选取下标,
/// 不同疾病落到不同城市但每个组合跨运行稳定
#[derive(Debug, Default)]
pub struct CityCatalog {
    cities: HashMap<&'static str, &'static [&'static str]>,
}

impl CityCatalog {
    /// 构造内置城市表
    pub fn new() -> Self {
        let mut cities: HashMap<&'static str, &'static [&'static str]> = HashMap::new();
        cities.insert(
            "United States",
            &["New York, NY", "Los Angeles, CA", "Chicago, IL", "Houston, TX", "Phoenix, AZ"][..],
        );
        cities.insert(
            "China",
            &["Beijing", "Shanghai", "Guangzhou", "Shenzhen", "Chengdu"][..],
        );
        cities.insert(
            "India",
            &["Mumbai", "Delhi", "Bangalore", "Hyderabad", "Chennai"][..],
        );
        cities.insert(
            "Brazil",
            &["São Paulo", "Rio de Janeiro", "Brasília", "Salvador", "Fortaleza"][..],
        );
        cities.insert(
            "Nigeria",
            &["Lagos", "Kano", "Ibadan", "Abuja", "Port Harcourt"][..],
        );
        cities.insert(
            "Democratic Republic of the Congo",
            &["Kinshasa", "Lubumbashi", "Mbuji-Mayi", "Kananga", "Kisangani"][..],
        );
        cities.insert(
            "Saudi Arabia",
            &["Riyadh", "Jeddah", "Mecca", "Medina", "Dammam"][..],
        );
        cities.insert(
            "France",
            &["Paris", "Marseille", "Lyon", "Toulouse", "Nice"][..],
        );
        cities.insert(
            "United Kingdom",
            &["London", "Manchester", "Birmingham", "Leeds", "Glasgow"][..],
        );
        cities.insert(
            "Kenya",
            &["Nairobi", "Mombasa", "Kisumu", "Nakuru", "Eldoret"][..],
        );
        Self { cities }
    }

    /// 解析城市级位置
    ///
    /// # 参数
    /// - `location`: 国家/地区名
    /// - `disease`: 疾病名 (用于在候选城市中稳定选取)
    ///
    /// # 返回
    /// 城市名;无映射时返回 `location` 本身
    pub fn resolve(&self, location: &str, disease: &str) -> String {
        match self.cities.get(location) {
            Some(candidates) if !candidates.is_empty() => {
                let idx = (fnv1a64(disease.as_bytes()) % candidates.len() as u64) as usize;
                candidates[idx].to_string()
            }
            _ => location.to_string(),
        }
    }
}
