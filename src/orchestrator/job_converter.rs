//! 单个文件转换 - 编排层
//!
//! 读取 HTML → 打开会话 → 加载 → 等待网络空闲 → 导出 → 原子写入 → 关闭会话

use std::path::{Path, PathBuf};
use std::time::Duration;

use tokio::fs;
use tracing::{debug, warn};

use crate::error::{ConvertError, ConvertResult};
use crate::infrastructure::{RenderSession, RenderingEngine};
use crate::models::{ConversionJob, JobState, PdfLayoutOptions};

/// 写入中的临时文件后缀
const PART_SUFFIX: &str = "part";

/// 单个文件转换器
///
/// 不持有引擎，只借用；一次 `convert` 对应一个会话。
pub struct JobConverter<'a, E: RenderingEngine> {
    engine: &'a E,
    layout: &'a PdfLayoutOptions,
    idle_timeout: Duration,
}

impl<'a, E: RenderingEngine> JobConverter<'a, E> {
    pub fn new(engine: &'a E, layout: &'a PdfLayoutOptions, idle_timeout: Duration) -> Self {
        Self {
            engine,
            layout,
            idle_timeout,
        }
    }

    /// 转换一个任务
    ///
    /// 会话一旦创建，无论后续成功失败都只关闭一次；关闭失败只记录日志，
    /// 不会覆盖原始错误。
    pub async fn convert(&self, job: &ConversionJob) -> ConvertResult<()> {
        let html = fs::read_to_string(job.input_path())
            .await
            .map_err(|source| ConvertError::SourceRead {
                path: job.input_path().to_path_buf(),
                source,
            })?;

        let mut session = self.engine.open_session().await?;
        let result = self.render(&mut session, &html, job).await;

        if let Err(e) = session.close().await {
            warn!("{} {}", job, e);
        }

        result
    }

    async fn render(
        &self,
        session: &mut E::Session,
        html: &str,
        job: &ConversionJob,
    ) -> ConvertResult<()> {
        let mut state = JobState::Pending.advance(JobState::Loading)?;
        debug!("{} 状态: {}", job, state);

        let outcome = async {
            session.load_html(html).await?;
            session.wait_for_network_idle(self.idle_timeout).await?;
            state = state.advance(JobState::Ready)?;
            debug!("{} 状态: {}", job, state);

            let pdf = session.export_pdf(self.layout).await?;
            write_atomically(job.output_path(), &pdf).await
        }
        .await;

        let next = if outcome.is_ok() {
            JobState::Exported
        } else {
            JobState::Failed
        };
        state = state.advance(next)?;
        debug!("{} 状态: {}", job, state);

        outcome
    }
}

/// 先写临时文件再重命名，目标文件要么完整，要么保持原样
pub async fn write_atomically(path: &Path, bytes: &[u8]) -> ConvertResult<()> {
    let part = part_path(path);

    let written = async {
        fs::write(&part, bytes).await?;
        fs::rename(&part, path).await
    }
    .await;

    if let Err(source) = written {
        if let Err(e) = fs::remove_file(&part).await {
            debug!("清理临时文件 {} 失败: {}", part.display(), e);
        }
        return Err(ConvertError::OutputWrite {
            path: path.to_path_buf(),
            source,
        });
    }

    Ok(())
}

fn part_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".");
    name.push(PART_SUFFIX);
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_part_path() {
        assert_eq!(
            part_path(Path::new("out/README.pdf")),
            PathBuf::from("out/README.pdf.part")
        );
    }

    #[tokio::test]
    async fn test_write_atomically_replaces_existing() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("a.pdf");
        std::fs::write(&target, b"old").unwrap();

        write_atomically(&target, b"%PDF-1.4 new").await.unwrap();

        assert_eq!(std::fs::read(&target).unwrap(), b"%PDF-1.4 new");
        assert!(!dir.path().join("a.pdf.part").exists());
    }

    #[tokio::test]
    async fn test_write_atomically_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("missing").join("a.pdf");

        let err = write_atomically(&target, b"%PDF").await.unwrap_err();

        assert!(matches!(err, ConvertError::OutputWrite { .. }));
        assert!(!target.exists());
    }
}
