//! SVG renderer: converts `RenderCommand` lists into standalone SVG strings.

use std::fmt::Write as _;

use water_trace_protocol::{Border, RenderCommand, TextAlign, ThemeToken};

/// Render a list of commands as an SVG document string.
///
/// `width` and `height` define the SVG viewBox dimensions.
/// `dark` selects the color palette.
pub fn render_svg(commands: &[RenderCommand], width: f64, height: f64, dark: bool) -> String {
    let mut svg = String::with_capacity(commands.len() * 160);
    let _ = write!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {width} {height}" width="{width}" height="{height}" style="font-family:system-ui,-apple-system,sans-serif">"#,
    );
    let _ = write!(
        svg,
        r#"<rect width="{width}" height="{height}" fill="{}"/>"#,
        resolve_color(ThemeToken::Background, dark),
    );

    for cmd in commands {
        match cmd {
            RenderCommand::DrawRect {
                rect,
                color,
                border,
                label,
                ..
            } => {
                let fill = resolve_color(*color, dark);
                let opacity = if is_water(*color) { 0.5 } else { 1.0 };
                let _ = write!(
                    svg,
                    r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{fill}" fill-opacity="{opacity}"{}>"#,
                    rect.x,
                    rect.y,
                    rect.w,
                    rect.h,
                    stroke_attrs(border.as_ref(), dark),
                );
                if let Some(label) = label {
                    let _ = write!(svg, "<title>{}</title>", escape_xml(label));
                }
                svg.push_str("</rect>");
            }
            RenderCommand::DrawLine {
                from,
                to,
                color,
                width: line_width,
            } => {
                let stroke = resolve_color(*color, dark);
                let _ = write!(
                    svg,
                    r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{stroke}" stroke-width="{line_width}"/>"#,
                    from.x, from.y, to.x, to.y,
                );
            }
            RenderCommand::DrawText {
                text,
                position,
                color,
                font_size,
                align,
                bold,
            } => {
                let fill = resolve_color(*color, dark);
                let anchor = match align {
                    TextAlign::Left => "start",
                    TextAlign::Center => "middle",
                    TextAlign::Right => "end",
                };
                let weight = if *bold { r#" font-weight="bold""# } else { "" };
                let _ = write!(
                    svg,
                    r#"<text x="{}" y="{}" fill="{fill}" font-size="{font_size}" text-anchor="{anchor}"{weight}>{}</text>"#,
                    position.x,
                    position.y,
                    escape_xml(text),
                );
            }
            RenderCommand::BeginGroup { id, .. } => {
                let _ = write!(svg, r#"<g id="{}">"#, escape_xml(id));
            }
            RenderCommand::EndGroup => svg.push_str("</g>"),
        }
    }

    svg.push_str("</svg>");
    svg
}

fn stroke_attrs(border: Option<&Border>, dark: bool) -> String {
    match border {
        Some(b) => {
            let dash = if b.dashed {
                r#" stroke-dasharray="5,5""#
            } else {
                ""
            };
            format!(
                r#" stroke="{}" stroke-width="{}"{dash}"#,
                resolve_color(b.color, dark),
                b.width
            )
        }
        None => String::new(),
    }
}

fn is_water(token: ThemeToken) -> bool {
    matches!(token, ThemeToken::Water | ThemeToken::WaterMax)
}

fn resolve_color(token: ThemeToken, dark: bool) -> &'static str {
    if dark {
        match token {
            ThemeToken::Background => "#181818",
            ThemeToken::Axis => "#303030",
            ThemeToken::BarIdle => "#757575",
            ThemeToken::BarLeft => "#42a5f5",
            ThemeToken::BarRight => "#ef5350",
            ThemeToken::PointerOutline => "#ececec",
            ThemeToken::Water => "#3498db",
            ThemeToken::WaterBorder => "#2980b9",
            ThemeToken::WaterMax => "#2ecc71",
            ThemeToken::WaterMaxBorder => "#27ae60",
            ThemeToken::TextPrimary => "#ececec",
            ThemeToken::TextMuted => "#9e9e9e",
            ThemeToken::TextWater => "#64b5f6",
            ThemeToken::TextWaterMax => "#66bb6a",
        }
    } else {
        match token {
            ThemeToken::Background => "#ffffff",
            ThemeToken::Axis => "#dee2e6",
            ThemeToken::BarIdle => "#aaaaaa",
            ThemeToken::BarLeft => "#3498db",
            ThemeToken::BarRight => "#e74c3c",
            ThemeToken::PointerOutline => "#000000",
            ThemeToken::Water => "#3498db",
            ThemeToken::WaterBorder => "#2980b9",
            ThemeToken::WaterMax => "#2ecc71",
            ThemeToken::WaterMaxBorder => "#27ae60",
            ThemeToken::TextPrimary => "#1a1a2e",
            ThemeToken::TextMuted => "#666677",
            ThemeToken::TextWater => "#2980b9",
            ThemeToken::TextWaterMax => "#27ae60",
        }
    }
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
