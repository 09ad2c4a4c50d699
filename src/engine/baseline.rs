// ==========================================
// 疫情暴发信号引擎 - 基线估计引擎
// ==========================================
// 职责: 历史计数 -> 期望计数 + 离散度
// 红线: 软失败 - 空历史回落兜底常量,绝不抛错;
//       均值/标准差与历史顺序无关,调用方可任意排序
// ==========================================

use crate::config::BaselineConfig;
use crate::domain::BaselineEstimate;

// ==========================================
// BaselineEstimator - 基线估计引擎
// ==========================================
#[derive(Clone)]
pub struct BaselineEstimator {
    config: BaselineConfig,
}

impl BaselineEstimator {
    /// 构造函数
    pub fn new(config: BaselineConfig) -> Self {
        Self { config }
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 估计基线
    ///
    /// # 参数
    /// - `disease` / `location`: 基线归属键
    /// - `history`: 历史观测计数 (顺序无关)
    ///
    /// # 返回
    /// - 期望计数: 算术均值;历史为空时取配置兜底值
    /// - 标准差: 样本标准差;不足 2 点或退化时取配置下限
    pub fn estimate(&self, disease: &str, location: &str, history: &[u32]) -> BaselineEstimate {
        let expected_count = if history.is_empty() {
            self.config.fallback_expected
        } else {
            history.iter().map(|&c| c as f64).sum::<f64>() / history.len() as f64
        };

        let stddev = self.sample_stddev(history, expected_count);

        BaselineEstimate {
            disease: disease.to_string(),
            location: location.to_string(),
            expected_count,
            stddev,
        }
    }

    /// 样本标准差 (n-1 分母),下限保护防止下游除零
    fn sample_stddev(&self, history: &[u32], mean: f64) -> f64 {
        if history.len() < 2 {
            return self.config.min_stddev;
        }
        let variance = history
            .iter()
            .map(|&c| {
                let d = c as f64 - mean;
                d * d
            })
            .sum::<f64>()
            / (history.len() - 1) as f64;
        variance.sqrt().max(self.config.min_stddev)
    }
}

// ==========================================
// 单元测试
// ==========================================
#[cfg(test)]
mod tests {
    use super::*;

    fn estimator() -> BaselineEstimator {
        BaselineEstimator::new(BaselineConfig::default())
    }

    #[test]
    fn test_mean_and_stddev() {
        let baseline = estimator().estimate("Influenza", "Global", &[10, 20, 30]);
        assert_eq!(baseline.expected_count, 20.0);
        assert!((baseline.stddev - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_order_invariant() {
        let est = estimator();
        let a = est.estimate("Cholera", "Kenya", &[3, 9, 27, 81]);
        let b = est.estimate("Cholera", "Kenya", &[81, 3, 27, 9]);
        assert_eq!(a, b);
    }

    #[test]
    fn test_empty_history_soft_fallback() {
        let baseline = estimator().estimate("Rare Disease", "Global", &[]);
        assert_eq!(baseline.expected_count, 1.0);
        assert_eq!(baseline.stddev, 1.0);
    }

    #[test]
    fn test_single_point_uses_stddev_floor() {
        let baseline = estimator().estimate("Ebola", "DRC", &[42]);
        assert_eq!(baseline.expected_count, 42.0);
        assert_eq!(baseline.stddev, 1.0);
    }

    #[test]
    fn test_degenerate_spread_floored() {
        // 所有点相同 => 样本标准差为 0,取下限
        let baseline = estimator().estimate("Measles", "India", &[7, 7, 7, 7]);
        assert_eq!(baseline.expected_count, 7.0);
        assert_eq!(baseline.stddev, 1.0);
    }

    #[test]
    fn test_outputs_nonnegative() {
        let baseline = estimator().estimate("Cholera", "Kenya", &[0, 0, 0]);
        assert!(baseline.expected_count >= 0.0);
        assert!(baseline.stddev > 0.0);
    }
}
