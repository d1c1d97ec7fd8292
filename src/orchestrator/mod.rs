//! 编排层（Orchestration Layer）
//!
//! ```text
//! batch_converter (处理候选文件列表)
//!     ↓
//! job_converter (处理单个 ConversionJob)
//!     ↓
//! infrastructure::RenderingEngine (渲染 / 导出能力)
//! ```
//!
//! 编排层只做调度和统计，不直接接触浏览器。

pub mod batch_converter;
pub mod job_converter;

pub use batch_converter::BatchConverter;
pub use job_converter::{write_atomically, JobConverter};
