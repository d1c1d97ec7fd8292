//! PDF 版式选项
//!
//! 所有导出共用同一份版式，进程内不会被修改

use serde::Deserialize;

/// 毫米 / 英寸
const MM_PER_INCH: f64 = 25.4;

/// 页眉中显示的固定标题
pub const HEADER_TITLE: &str = "HM スキルシート";

/// 页眉 / 页脚共用的样式
const TEMPLATE_STYLE: &str = "font-size: 10px; width: 100%; text-align: center; color: #666;";

/// 页脚模板，`pageNumber` / `totalPages` 由浏览器在打印时填充
pub fn footer_template() -> String {
    format!(
        concat!(
            r#"<div style="{}">Page <span class="pageNumber"></span>"#,
            r#" of <span class="totalPages"></span></div>"#,
        ),
        TEMPLATE_STYLE
    )
}

/// 显示固定标题的页眉模板
pub fn header_template(title: &str) -> String {
    format!(r#"<div style="{}">{}</div>"#, TEMPLATE_STYLE, title)
}

/// 纸张尺寸（毫米）
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct PaperSize {
    pub width_mm: f64,
    pub height_mm: f64,
}

impl PaperSize {
    pub const A4: PaperSize = PaperSize {
        width_mm: 210.0,
        height_mm: 297.0,
    };
}

/// 四边页边距（毫米）
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Margins {
    pub top_mm: f64,
    pub right_mm: f64,
    pub bottom_mm: f64,
    pub left_mm: f64,
}

impl Margins {
    /// 四边相同的页边距
    pub const fn uniform(mm: f64) -> Self {
        Self {
            top_mm: mm,
            right_mm: mm,
            bottom_mm: mm,
            left_mm: mm,
        }
    }
}

/// PDF 导出版式
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PdfLayoutOptions {
    /// 默认纸张，文档中的 CSS `@page size` 优先
    pub paper: PaperSize,
    pub margins: Margins,
    /// 打印背景色和背景图
    pub print_background: bool,
    pub display_header_footer: bool,
    pub header_template: String,
    pub footer_template: String,
    /// 优先使用文档 CSS 声明的纸张尺寸
    pub prefer_css_page_size: bool,
}

impl Default for PdfLayoutOptions {
    fn default() -> Self {
        Self {
            paper: PaperSize::A4,
            margins: Margins::uniform(20.0),
            print_background: true,
            display_header_footer: true,
            header_template: header_template(HEADER_TITLE),
            footer_template: footer_template(),
            prefer_css_page_size: true,
        }
    }
}

/// 毫米转英寸（CDP 的 printToPDF 以英寸为单位）
pub fn mm_to_inches(mm: f64) -> f64 {
    mm / MM_PER_INCH
}
