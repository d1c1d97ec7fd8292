//! 任务状态机
//!
//! ```text
//! Pending → Loading → Ready → Exported
//!              ↓        ↓
//!            Failed   Failed
//! ```

use std::fmt::Display;

use crate::error::{ConvertError, ConvertResult};

/// 单个任务的生命周期状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobState {
    /// 等待处理
    Pending,
    /// 正在加载 HTML，等待网络空闲
    Loading,
    /// 网络已空闲，可以导出
    Ready,
    /// PDF 已写入磁盘（终态）
    Exported,
    /// 处理失败（终态）
    Failed,
}

impl JobState {
    /// 是否允许从当前状态转换到 `next`
    pub fn can_advance_to(self, next: JobState) -> bool {
        matches!(
            (self, next),
            (JobState::Pending, JobState::Loading)
                | (JobState::Loading, JobState::Ready)
                | (JobState::Ready, JobState::Exported)
                | (JobState::Loading, JobState::Failed)
                | (JobState::Ready, JobState::Failed)
        )
    }

    /// 转换到下一个状态，非法转换返回错误
    pub fn advance(self, next: JobState) -> ConvertResult<JobState> {
        if self.can_advance_to(next) {
            Ok(next)
        } else {
            Err(ConvertError::InvalidTransition {
                from: self,
                to: next,
            })
        }
    }
}

impl Display for JobState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            JobState::Pending => "Pending",
            JobState::Loading => "Loading",
            JobState::Ready => "Ready",
            JobState::Exported => "Exported",
            JobState::Failed => "Failed",
        };
        f.write_str(name)
    }
}
