//! 批次结果统计

use std::path::PathBuf;

/// 单个候选文件的处理结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobOutcome {
    /// 转换成功
    Converted { input: PathBuf, output: PathBuf },
    /// 文件不存在，已跳过
    NotFound { input: PathBuf },
    /// 转换失败
    Failed { input: PathBuf, message: String },
}

/// 整个批次的处理结果，顺序与候选列表一致
#[derive(Debug, Default)]
pub struct BatchReport {
    pub outcomes: Vec<JobOutcome>,
}

impl BatchReport {
    pub fn push(&mut self, outcome: JobOutcome) {
        self.outcomes.push(outcome);
    }

    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    pub fn converted(&self) -> usize {
        self.count(|o| matches!(o, JobOutcome::Converted { .. }))
    }

    pub fn not_found(&self) -> usize {
        self.count(|o| matches!(o, JobOutcome::NotFound { .. }))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, JobOutcome::Failed { .. }))
    }

    fn count(&self, pred: impl Fn(&JobOutcome) -> bool) -> usize {
        self.outcomes.iter().filter(|o| pred(o)).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_counters() {
        let mut report = BatchReport::default();
        report.push(JobOutcome::Converted {
            input: "a.html".into(),
            output: "a.pdf".into(),
        });
        report.push(JobOutcome::NotFound {
            input: "b.html".into(),
        });
        report.push(JobOutcome::Failed {
            input: "c.html".into(),
            message: "boom".to_string(),
        });

        assert_eq!(report.total(), 3);
        assert_eq!(report.converted(), 1);
        assert_eq!(report.not_found(), 1);
        assert_eq!(report.failed(), 1);
    }
}
