use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::models::PdfLayoutOptions;

/// 配置文件名（位于当前工作目录）
pub const CONFIG_FILE: &str = "html_to_pdf.toml";

/// 等待网络空闲的默认超时（毫秒）
pub const DEFAULT_IDLE_TIMEOUT_MS: u64 = 30_000;

/// 判定网络空闲的默认静默时长（毫秒）
pub const DEFAULT_IDLE_QUIET_MS: u64 = 500;

/// 默认的候选 HTML 文件，按顺序处理
pub const DEFAULT_HTML_FILES: [&str; 2] = ["HM_スキルシート.html", "README.html"];

/// 程序配置
#[derive(Clone, Debug)]
pub struct Config {
    /// 候选 HTML 文件列表（相对 `work_dir`）
    pub html_files: Vec<String>,
    /// 输入 / 输出所在目录
    pub work_dir: PathBuf,
    /// 浏览器可执行文件路径，为空时自动查找
    pub chrome_executable: Option<PathBuf>,
    /// 等待网络空闲的超时时间（毫秒）
    pub idle_timeout_ms: u64,
    /// 判定网络空闲所需的静默时长（毫秒）
    pub idle_quiet_ms: u64,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// PDF 版式
    pub layout: PdfLayoutOptions,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            html_files: DEFAULT_HTML_FILES.iter().map(|s| s.to_string()).collect(),
            work_dir: PathBuf::from("."),
            chrome_executable: None,
            idle_timeout_ms: DEFAULT_IDLE_TIMEOUT_MS,
            idle_quiet_ms: DEFAULT_IDLE_QUIET_MS,
            verbose_logging: false,
            layout: PdfLayoutOptions::default(),
        }
    }
}

/// 配置文件结构，所有字段可省略
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    html_files: Option<Vec<String>>,
    work_dir: Option<PathBuf>,
    chrome_executable: Option<PathBuf>,
    idle_timeout_ms: Option<u64>,
    idle_quiet_ms: Option<u64>,
    verbose_logging: Option<bool>,
    layout: Option<PdfLayoutOptions>,
}

impl Config {
    /// 默认值 → 配置文件（存在时）→ 环境变量
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        let path = Path::new(CONFIG_FILE);
        if path.exists() {
            config = config.merge_file(path)?;
        }
        config.apply_env(|name| std::env::var(name).ok())
    }

    /// 默认值 + 环境变量
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().apply_env(|name| std::env::var(name).ok())
    }

    pub fn idle_timeout(&self) -> Duration {
        Duration::from_millis(self.idle_timeout_ms)
    }

    pub fn idle_quiet(&self) -> Duration {
        Duration::from_millis(self.idle_quiet_ms)
    }

    /// 候选文件在磁盘上的完整路径
    pub fn candidate_paths(&self) -> Vec<PathBuf> {
        self.html_files
            .iter()
            .map(|name| self.work_dir.join(name))
            .collect()
    }

    fn merge_file(self, path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::FileReadFailed {
            path: path.to_path_buf(),
            source,
        })?;
        self.merge_toml(&content).map_err(|source| ConfigError::TomlParseFailed {
            path: path.to_path_buf(),
            source,
        })
    }

    fn merge_toml(self, content: &str) -> Result<Self, toml::de::Error> {
        let file: FileConfig = toml::from_str(content)?;
        Ok(Self {
            html_files: file.html_files.unwrap_or(self.html_files),
            work_dir: file.work_dir.unwrap_or(self.work_dir),
            chrome_executable: file.chrome_executable.or(self.chrome_executable),
            idle_timeout_ms: file.idle_timeout_ms.unwrap_or(self.idle_timeout_ms),
            idle_quiet_ms: file.idle_quiet_ms.unwrap_or(self.idle_quiet_ms),
            verbose_logging: file.verbose_logging.unwrap_or(self.verbose_logging),
            layout: file.layout.unwrap_or(self.layout),
        })
    }

    fn apply_env(self, var: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        Ok(Self {
            html_files: var("HTML_FILES")
                .map(|v| split_list(&v))
                .unwrap_or(self.html_files),
            work_dir: var("WORK_DIR").map(PathBuf::from).unwrap_or(self.work_dir),
            chrome_executable: var("CHROME_EXECUTABLE")
                .map(PathBuf::from)
                .or(self.chrome_executable),
            idle_timeout_ms: parse_env(&var, "IDLE_TIMEOUT_MS", "u64")?
                .unwrap_or(self.idle_timeout_ms),
            idle_quiet_ms: parse_env(&var, "IDLE_QUIET_MS", "u64")?.unwrap_or(self.idle_quiet_ms),
            verbose_logging: parse_env(&var, "VERBOSE_LOGGING", "bool")?
                .unwrap_or(self.verbose_logging),
            layout: self.layout,
        })
    }
}

fn parse_env<T: FromStr>(
    var: &impl Fn(&str) -> Option<String>,
    var_name: &str,
    expected_type: &'static str,
) -> Result<Option<T>, ConfigError> {
    match var(var_name) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::EnvVarParseFailed {
                var_name: var_name.to_string(),
                value,
                expected_type,
            }),
    }
}

/// 逗号分隔的文件列表，忽略空项
fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
