//! 应用入口 - 负责资源生命周期
//!
//! 1. 启动浏览器（失败即整体失败）
//! 2. 交给 `BatchConverter` 顺序处理候选文件
//! 3. 关闭浏览器，输出统计

use anyhow::{Context, Result};

use crate::browser::ChromeEngine;
use crate::config::Config;
use crate::models::BatchReport;
use crate::orchestrator::BatchConverter;
use crate::utils::logging;

/// 应用主结构
pub struct App {
    config: Config,
    engine: ChromeEngine,
}

impl App {
    /// 初始化应用：启动浏览器
    pub async fn initialize(config: Config) -> Result<Self> {
        logging::log_startup(&config);

        let engine = ChromeEngine::launch(
            config.chrome_executable.as_deref(),
            config.idle_quiet(),
        )
        .await
        .context("无法启动渲染引擎")?;

        Ok(Self { config, engine })
    }

    /// 运行批量转换。单个文件的失败只体现在报告中
    pub async fn run(self) -> Result<BatchReport> {
        let converter = BatchConverter::new(
            self.config.candidate_paths(),
            self.config.layout.clone(),
            self.config.idle_timeout(),
        );

        let report = converter.run(&self.engine).await;
        self.engine.shutdown().await;

        logging::print_final_stats(&report);
        Ok(report)
    }
}
