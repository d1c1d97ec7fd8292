//! 日志工具模块
//!
//! 初始化 tracing 输出，并提供批次开始 / 结束横幅

use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::models::BatchReport;

/// 初始化日志
///
/// 设置了 `RUST_LOG` 时以其为准，否则为 `info`（verbose 时为 `debug`）。
/// 重复调用不会报错。
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// 记录程序启动信息
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 HTML → PDF 转换开始");
    info!("📁 工作目录: {}", config.work_dir.display());
    info!("📋 候选文件: {}", config.html_files.join(", "));
    info!("{}", "=".repeat(60));
}

/// 打印最终统计信息
pub fn print_final_stats(report: &BatchReport) {
    info!("\n{}", "=".repeat(60));
    info!("📊 转换处理完成");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 成功: {}/{}", report.converted(), report.total());
    info!("⏭️ 未找到: {}", report.not_found());
    info!("❌ 失败: {}", report.failed());
    info!("{}", "=".repeat(60));
}
