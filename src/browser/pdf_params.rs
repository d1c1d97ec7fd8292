//! 版式选项 → CDP `Page.printToPDF` 参数

use chromiumoxide::cdp::browser_protocol::page::PrintToPdfParams;

use crate::models::layout::mm_to_inches;
use crate::models::PdfLayoutOptions;

/// 把毫米单位的版式转换为 printToPDF 参数（英寸）
pub fn to_print_params(layout: &PdfLayoutOptions) -> PrintToPdfParams {
    PrintToPdfParams {
        landscape: Some(false),
        display_header_footer: Some(layout.display_header_footer),
        print_background: Some(layout.print_background),
        paper_width: Some(mm_to_inches(layout.paper.width_mm)),
        paper_height: Some(mm_to_inches(layout.paper.height_mm)),
        margin_top: Some(mm_to_inches(layout.margins.top_mm)),
        margin_right: Some(mm_to_inches(layout.margins.right_mm)),
        margin_bottom: Some(mm_to_inches(layout.margins.bottom_mm)),
        margin_left: Some(mm_to_inches(layout.margins.left_mm)),
        header_template: Some(layout.header_template.clone()),
        footer_template: Some(layout.footer_template.clone()),
        prefer_css_page_size: Some(layout.prefer_css_page_size),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(value: Option<f64>, expected: f64) -> bool {
        value.map(|v| (v - expected).abs() < 1e-3).unwrap_or(false)
    }

    #[test]
    fn test_default_layout_is_a4_with_20mm_margins() {
        let params = to_print_params(&PdfLayoutOptions::default());

        assert!(approx(params.paper_width, 8.268));
        assert!(approx(params.paper_height, 11.693));
        assert!(approx(params.margin_top, 0.787));
        assert!(approx(params.margin_right, 0.787));
        assert!(approx(params.margin_bottom, 0.787));
        assert!(approx(params.margin_left, 0.787));
        assert_eq!(params.print_background, Some(true));
        assert_eq!(params.display_header_footer, Some(true));
        assert_eq!(params.prefer_css_page_size, Some(true));
    }

    #[test]
    fn test_templates_are_passed_through() {
        let params = to_print_params(&PdfLayoutOptions::default());

        let header = params.header_template.unwrap();
        let footer = params.footer_template.unwrap();
        assert!(header.contains("HM スキルシート"));
        assert!(footer.contains("pageNumber"));
        assert!(footer.contains("totalPages"));
    }
}
