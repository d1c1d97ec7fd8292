//! 批量转换器 - 编排层
//!
//! 按顺序遍历候选文件：不存在则跳过，存在则转换；单个文件失败只记录，
//! 不影响后续文件。一次只有一个渲染会话。

use std::path::{Path, PathBuf};
use std::time::Duration;

use tokio::fs;
use tracing::{error, info};

use crate::infrastructure::RenderingEngine;
use crate::models::{BatchReport, ConversionJob, JobOutcome, PdfLayoutOptions};
use crate::orchestrator::job_converter::JobConverter;

/// 批量转换器
pub struct BatchConverter {
    candidates: Vec<PathBuf>,
    layout: PdfLayoutOptions,
    idle_timeout: Duration,
}

impl BatchConverter {
    pub fn new(
        candidates: Vec<PathBuf>,
        layout: PdfLayoutOptions,
        idle_timeout: Duration,
    ) -> Self {
        Self {
            candidates,
            layout,
            idle_timeout,
        }
    }

    /// 依次处理所有候选文件
    pub async fn run<E: RenderingEngine>(&self, engine: &E) -> BatchReport {
        let converter = JobConverter::new(engine, &self.layout, self.idle_timeout);
        let mut report = BatchReport::default();

        for input in &self.candidates {
            let outcome = self.process_one(&converter, input).await;
            report.push(outcome);
        }

        report
    }

    async fn process_one<E: RenderingEngine>(
        &self,
        converter: &JobConverter<'_, E>,
        input: &Path,
    ) -> JobOutcome {
        if !file_exists(input).await {
            info!("✗ HTML 文件不存在: {}", input.display());
            return JobOutcome::NotFound {
                input: input.to_path_buf(),
            };
        }

        let job = ConversionJob::new(input);
        info!("📄 正在转换: {}", job);

        match converter.convert(&job).await {
            Ok(()) => {
                info!("✓ PDF 文件已生成: {}", job.output_path().display());
                JobOutcome::Converted {
                    input: job.input_path().to_path_buf(),
                    output: job.output_path().to_path_buf(),
                }
            }
            Err(e) => {
                error!("✗ 错误: {} 转换失败 - {}", input.display(), e);
                JobOutcome::Failed {
                    input: job.input_path().to_path_buf(),
                    message: e.to_string(),
                }
            }
        }
    }
}

/// 只有"确认不存在"才跳过；无法判断时（如权限问题）交给读取步骤报错
async fn file_exists(path: &Path) -> bool {
    !matches!(fs::try_exists(path).await, Ok(false))
}
