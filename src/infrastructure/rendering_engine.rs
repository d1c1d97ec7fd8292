//! 渲染引擎抽象 - 基础设施层
//!
//! 渲染、排版、PDF 序列化全部交给外部引擎完成，这里只描述需要的能力：
//! - 会话生命周期（创建 / 关闭）
//! - 加载 HTML 字符串
//! - 等待网络空闲
//! - 按版式导出 PDF

use std::time::Duration;

use crate::error::ConvertResult;
use crate::models::PdfLayoutOptions;

/// 渲染引擎：每个任务从这里获取一个独立的会话
#[allow(async_fn_in_trait)]
pub trait RenderingEngine {
    type Session: RenderSession;

    /// 创建新的渲染会话
    async fn open_session(&self) -> ConvertResult<Self::Session>;
}

/// 一次渲染会话
///
/// 调用顺序固定为 `load_html` → `wait_for_network_idle` → `export_pdf`，
/// 最后无论成功与否都必须调用一次 `close`。
#[allow(async_fn_in_trait)]
pub trait RenderSession {
    /// 把 HTML 内容加载到会话中
    async fn load_html(&mut self, html: &str) -> ConvertResult<()>;

    /// 等待网络空闲，超过 `timeout` 返回 `ConvertError::IdleTimeout`
    async fn wait_for_network_idle(&mut self, timeout: Duration) -> ConvertResult<()>;

    /// 导出当前页面为 PDF 字节
    async fn export_pdf(&mut self, layout: &PdfLayoutOptions) -> ConvertResult<Vec<u8>>;

    /// 释放会话
    async fn close(self) -> ConvertResult<()>;
}
