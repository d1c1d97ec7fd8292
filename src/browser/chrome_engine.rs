//! 基于 chromiumoxide 的渲染引擎实现
//!
//! 一个进程只启动一个浏览器；每个任务打开一个独立的标签页作为会话，
//! 任务结束即关闭该标签页。

use std::path::Path;
use std::time::Duration;

use chromiumoxide::{Browser, Page};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::browser::headless::launch_headless_browser;
use crate::browser::network_idle::NetworkIdleWatcher;
use crate::browser::pdf_params::to_print_params;
use crate::error::{ConvertError, ConvertResult};
use crate::infrastructure::{RenderSession, RenderingEngine};
use crate::models::PdfLayoutOptions;

/// Chrome 渲染引擎
pub struct ChromeEngine {
    browser: Browser,
    handler_task: JoinHandle<()>,
    idle_quiet: Duration,
}

impl ChromeEngine {
    /// 启动浏览器。失败属于批次级致命错误
    pub async fn launch(
        chrome_executable: Option<&Path>,
        idle_quiet: Duration,
    ) -> ConvertResult<Self> {
        let (browser, handler_task) = launch_headless_browser(chrome_executable).await?;
        Ok(Self {
            browser,
            handler_task,
            idle_quiet,
        })
    }

    /// 关闭浏览器进程，错误只记录不返回
    pub async fn shutdown(mut self) {
        if let Err(e) = self.browser.close().await {
            warn!("关闭浏览器失败: {}", e);
        }
        if let Err(e) = self.browser.wait().await {
            warn!("等待浏览器进程退出失败: {}", e);
        }
        self.handler_task.abort();
        debug!("浏览器已关闭");
    }
}

impl RenderingEngine for ChromeEngine {
    type Session = ChromeSession;

    async fn open_session(&self) -> ConvertResult<ChromeSession> {
        let page = self
            .browser
            .new_page("about:blank")
            .await
            .map_err(|e| ConvertError::SessionCreate(e.to_string()))?;

        // 监听器挂载失败时，标签页已经创建，需要先关掉再返回错误
        let watcher = match NetworkIdleWatcher::attach(&page, self.idle_quiet).await {
            Ok(watcher) => watcher,
            Err(e) => {
                if let Err(close_err) = page.close().await {
                    warn!("关闭页面失败: {}", close_err);
                }
                return Err(e);
            }
        };

        debug!("已创建新页面");
        Ok(ChromeSession { page, watcher })
    }
}

/// 一个标签页
pub struct ChromeSession {
    page: Page,
    watcher: NetworkIdleWatcher,
}

impl RenderSession for ChromeSession {
    async fn load_html(&mut self, html: &str) -> ConvertResult<()> {
        self.page
            .set_content(html)
            .await
            .map_err(|e| ConvertError::Load(e.to_string()))?;
        Ok(())
    }

    async fn wait_for_network_idle(&mut self, timeout: Duration) -> ConvertResult<()> {
        self.watcher.wait(timeout).await
    }

    async fn export_pdf(&mut self, layout: &PdfLayoutOptions) -> ConvertResult<Vec<u8>> {
        self.page
            .pdf(to_print_params(layout))
            .await
            .map_err(|e| ConvertError::Export(e.to_string()))
    }

    async fn close(self) -> ConvertResult<()> {
        self.page
            .close()
            .await
            .map_err(|e| ConvertError::SessionClose(e.to_string()))
    }
}
