// ==========================================
// 疫情暴发信号引擎 - 静态目录层
// ==========================================
// 职责: 季节曲线/疾病分类/城市查找表
// 红线: 进程启动时加载一次,之后只读,不需要任何锁
// 查找缺失一律降级为文档化的兜底值,绝不抛错
// ==========================================

pub mod city;
pub mod seasonal;

pub use city::CityCatalog;
pub use seasonal::{SeasonalCatalog, SeasonalProfile};

/// 信号目录集合 - 注入各引擎的只读配置对象
#[derive(Debug, Default)]
pub struct SignalCatalogs {
    pub seasonal: SeasonalCatalog,
    pub city: CityCatalog,
}

impl SignalCatalogs {
    /// 加载内置目录 (进程启动时调用一次)
    pub fn load() -> Self {
        Self {
            seasonal: SeasonalCatalog::new(),
            city: CityCatalog::new(),
        }
    }
}
