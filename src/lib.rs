//! # HTML to PDF
//!
//! 用无头浏览器把本地 HTML 文件批量导出为带页眉页脚的 PDF
//!
//! ## 架构设计
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - `RenderingEngine` / `RenderSession` 能力抽象
//! - `browser/` - 基于 chromiumoxide 的实现：启动浏览器、网络空闲检测、printToPDF
//!
//! ### ② 数据模型（Models）
//! - `ConversionJob` - 输入路径 + 推导出的输出路径
//! - `PdfLayoutOptions` - A4、20mm 边距、页眉页脚模板
//! - `JobState` - Pending → Loading → Ready → Exported / Failed
//!
//! ### ③ 编排层（Orchestration）
//! - `orchestrator/job_converter` - 单个文件：加载 → 等待空闲 → 导出 → 写入
//! - `orchestrator/batch_converter` - 候选列表：存在性检查、错误隔离、结果汇总
//!
//! ### ④ 应用层
//! - `App` - 启动浏览器、运行批次、关闭浏览器、输出统计

pub mod app;
pub mod browser;
pub mod config;
pub mod error;
pub mod infrastructure;
pub mod models;
pub mod orchestrator;
pub mod utils;

// 重新导出常用类型
pub use app::App;
pub use browser::ChromeEngine;
pub use config::Config;
pub use error::{ConfigError, ConvertError, ConvertResult};
pub use infrastructure::{RenderSession, RenderingEngine};
pub use models::{BatchReport, ConversionJob, JobOutcome, JobState, PdfLayoutOptions};
pub use orchestrator::{BatchConverter, JobConverter};
