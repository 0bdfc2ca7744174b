//! SVG output for draw plans

use crate::layout::DrawPlan;

/// Text and background styling for the SVG document
#[derive(Debug, Clone, PartialEq)]
pub struct SvgStyle {
    pub font_size: f64,
    pub font_family: String,
    pub text_color: String,
    /// `None` leaves the canvas transparent
    pub background: Option<String>,
}

impl Default for SvgStyle {
    fn default() -> Self {
        Self {
            font_size: 30.0,
            font_family: "sans-serif".to_string(),
            text_color: "#FFFFFF".to_string(),
            background: Some("#000000".to_string()),
        }
    }
}

/// Paint a draw plan as a standalone SVG document.
///
/// Rectangles are drawn in plan order, labels on top of them.
pub fn to_svg(plan: &DrawPlan, style: &SvgStyle) -> String {
    let mut svg = String::new();

    svg.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    svg.push('\n');
    svg.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = fmt_num(plan.canvas_width),
        h = fmt_num(plan.canvas_height),
    ));
    svg.push('\n');

    if let Some(background) = &style.background {
        svg.push_str(&format!(
            "  <rect width=\"100%\" height=\"100%\" fill=\"{}\"/>\n",
            escape_xml(background)
        ));
    }

    for rect in &plan.rectangles {
        svg.push_str(&format!(
            "  <rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\"/>\n",
            fmt_num(rect.x),
            fmt_num(rect.y),
            fmt_num(rect.width),
            fmt_num(rect.height),
            rect.color(),
        ));
    }

    for label in &plan.labels {
        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" font-family=\"{}\" font-size=\"{}\" fill=\"{}\">{}</text>\n",
            fmt_num(label.x),
            fmt_num(label.y),
            escape_xml(&style.font_family),
            fmt_num(style.font_size),
            escape_xml(&style.text_color),
            escape_xml(&label.text),
        ));
    }

    svg.push_str("</svg>\n");
    svg
}

/// Whole numbers without a trailing `.0`, others to two decimals
fn fmt_num(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{:.2}", value)
    }
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
