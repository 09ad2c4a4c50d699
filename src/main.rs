// ==========================================
// 疫情暴发信号引擎 - CLI 主入口
// ==========================================
// 用法: epiwatch-engine <aggregates.csv> [--config cfg.json] [--alerts-out alerts.json]
// 流程: 导入年度聚合 -> 全量组合分析 -> 打印/落盘告警
// ==========================================

use anyhow::{bail, Context};
use clap::Parser;
use epiwatch_engine::{
    catalog::SignalCatalogs, config::EngineConfig, importer::AggregateImporter, logging,
    AggregateStore, EngineError, SignalPipeline,
};
use std::path::PathBuf;
use std::sync::Arc;

/// 命令行参数
#[derive(Parser)]
#[command(
    name = "epiwatch-engine",
    about = "疫情暴发信号引擎 - 日级时序模拟与异常告警",
    version
)]
struct CliArgs {
    /// 年度聚合 CSV 文件路径
    aggregates_csv: PathBuf,

    /// 引擎配置 JSON 文件 (缺省走内置默认值)
    #[arg(long)]
    config: Option<PathBuf>,

    /// 告警 JSON 输出路径
    #[arg(long)]
    alerts_out: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 初始化日志系统
    logging::init();

    tracing::info!("==================================================");
    tracing::info!("{}", epiwatch_engine::APP_NAME);
    tracing::info!("系统版本: {}", epiwatch_engine::VERSION);
    tracing::info!("==================================================");

    let args = CliArgs::parse();

    // 加载配置 (缺省走内置默认值)
    let config = match &args.config {
        Some(path) => {
            tracing::info!("加载配置: {}", path.display());
            EngineConfig::from_json_file(path)?
        }
        None => EngineConfig::default(),
    };

    // 导入年度聚合
    tracing::info!("导入聚合文件: {}", args.aggregates_csv.display());
    let outcome = AggregateImporter::read_csv(&args.aggregates_csv).map_err(EngineError::Import)?;
    for error in &outcome.row_errors {
        tracing::warn!("{}", error);
    }
    if outcome.store.is_empty() {
        bail!("没有可用的年度聚合记录");
    }

    // 装配管线
    let store: Arc<AggregateStore> = Arc::new(outcome.store);
    let catalogs = Arc::new(SignalCatalogs::load());
    let pipeline = SignalPipeline::new(store.clone(), catalogs, config);

    // 全量分析
    let report = pipeline.analyze_all().await;
    let alerts = report.all_alerts();

    let mut by_level: std::collections::BTreeMap<String, usize> = std::collections::BTreeMap::new();
    for alert in &alerts {
        *by_level.entry(alert.severity_level.to_string()).or_default() += 1;
    }
    tracing::info!(
        pairs = report.reports.len(),
        failures = report.failures.len(),
        alerts = alerts.len(),
        by_level = ?by_level,
        "整批分析完成"
    );

    // 打印告警 (严重度降序)
    for alert in &alerts {
        println!(
            "[{}] {} {}",
            alert.severity_level.to_string().to_uppercase(),
            alert.date,
            alert.message
        );
    }

    // 落盘告警 JSON
    if let Some(path) = &args.alerts_out {
        let file = std::fs::File::create(path)
            .with_context(|| format!("创建告警输出文件失败: {}", path.display()))?;
        serde_json::to_writer_pretty(file, &alerts)?;
        tracing::info!("告警已写入: {}", path.display());
    }

    Ok(())
}
