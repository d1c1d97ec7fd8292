use std::path::PathBuf;

use thiserror::Error;

use crate::models::JobState;

/// 单个转换任务的错误
///
/// 除 `BrowserLaunch` 外，所有错误都在任务边界被捕获，不会中断整个批次。
#[derive(Debug, Error)]
pub enum ConvertError {
    /// 启动浏览器失败（批次级致命错误）
    #[error("启动无头浏览器失败: {0}")]
    BrowserLaunch(String),

    /// 读取 HTML 源文件失败
    #[error("读取 HTML 文件失败 {}: {source}", path.display())]
    SourceRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// 创建渲染会话失败
    #[error("创建页面失败: {0}")]
    SessionCreate(String),

    /// 关闭渲染会话失败
    #[error("关闭页面失败: {0}")]
    SessionClose(String),

    /// 加载 HTML 内容失败
    #[error("加载页面内容失败: {0}")]
    Load(String),

    /// 等待网络空闲超时
    #[error("等待网络空闲超时 ({timeout_ms}ms, 仍有 {inflight} 个请求未完成)")]
    IdleTimeout { timeout_ms: u64, inflight: usize },

    /// 导出 PDF 失败
    #[error("导出 PDF 失败: {0}")]
    Export(String),

    /// 写入 PDF 文件失败
    #[error("写入 PDF 文件失败 {}: {source}", path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// 非法的任务状态转换
    #[error("非法的状态转换: {from} -> {to}")]
    InvalidTransition { from: JobState, to: JobState },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 环境变量解析失败
    #[error("环境变量 {var_name} 解析失败: 值 '{value}' 无法转换为 {expected_type}")]
    EnvVarParseFailed {
        var_name: String,
        value: String,
        expected_type: &'static str,
    },

    /// 配置文件读取失败
    #[error("无法读取配置文件 {}: {source}", path.display())]
    FileReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// 配置文件解析失败
    #[error("无法解析配置文件 {}: {source}", path.display())]
    TomlParseFailed {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// 单个任务的结果类型
pub type ConvertResult<T> = Result<T, ConvertError>;
