//! 转换任务
//!
//! 一个候选 HTML 文件对应一个任务，输出路径由输入路径推导

use std::fmt::Display;
use std::path::{Path, PathBuf};

/// 输出文件扩展名
pub const PDF_EXTENSION: &str = "pdf";

/// 单个 HTML → PDF 转换任务
///
/// 创建后不可变，任务结束即丢弃
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionJob {
    input_path: PathBuf,
    output_path: PathBuf,
}

impl ConversionJob {
    /// 根据输入路径创建任务，输出路径为同目录下同名的 `.pdf` 文件
    pub fn new(input_path: impl Into<PathBuf>) -> Self {
        let input_path = input_path.into();
        let output_path = derive_output_path(&input_path);
        Self {
            input_path,
            output_path,
        }
    }

    pub fn input_path(&self) -> &Path {
        &self.input_path
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }
}

impl Display for ConversionJob {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{} → {}]",
            self.input_path.display(),
            self.output_path.display()
        )
    }
}

/// 替换扩展名得到 PDF 路径
///
/// `README.html` → `README.pdf`；没有扩展名时直接追加 `.pdf`
pub fn derive_output_path(input_path: &Path) -> PathBuf {
    input_path.with_extension(PDF_EXTENSION)
}
