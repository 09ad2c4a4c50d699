// ==========================================
// 疫情暴发信号引擎 - 年度聚合存储
// ==========================================
// 职责: 按 (disease, location, year) 精确查询 + 按 (disease, location) 历史查询
// 唯一性: 每个键至多一条记录,重复插入被拒绝
// 结构: BTreeMap,保证 pairs() 遍历顺序确定
// ==========================================

use crate::domain::YearlyAggregate;
use std::collections::BTreeMap;

/// 年度聚合只读存储
#[derive(Debug, Default, Clone)]
pub struct AggregateStore {
    records: BTreeMap<(String, String, i32), YearlyAggregate>,
}

impl AggregateStore {
    /// 构造空存储
    pub fn new() -> Self {
        Self {
            records: BTreeMap::new(),
        }
    }

    /// 插入一条聚合记录
    ///
    /// # 返回
    /// - `true`: 插入成功
    /// - `false`: 键已存在 (首条记录保留,本条被拒绝)
    pub fn insert(&mut self, aggregate: YearlyAggregate) -> bool {
        let key = aggregate.key();
        if self.records.contains_key(&key) {
            return false;
        }
        self.records.insert(key, aggregate);
        true
    }

    /// 按精确键查询
    pub fn get(&self, disease: &str, location: &str, year: i32) -> Option<&YearlyAggregate> {
        self.records
            .get(&(disease.to_string(), location.to_string(), year))
    }

    /// 按 (disease, location) 查询全部历史,按年份升序
    pub fn history(&self, disease: &str, location: &str) -> Vec<&YearlyAggregate> {
        // BTreeMap 键序即 (disease, location, year) 升序
        self.records
            .range(
                (disease.to_string(), location.to_string(), i32::MIN)
                    ..=(disease.to_string(), location.to_string(), i32::MAX),
            )
            .map(|(_, v)| v)
            .collect()
    }

    /// 全部 (disease, location) 组合,去重且顺序确定
    pub fn pairs(&self) -> Vec<(String, String)> {
        let mut pairs: Vec<(String, String)> = Vec::new();
        for (disease, location, _) in self.records.keys() {
            match pairs.last() {
                Some((d, l)) if d == disease && l == location => {}
                _ => pairs.push((disease.clone(), location.clone())),
            }
        }
        pairs
    }

    /// 记录条数
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
