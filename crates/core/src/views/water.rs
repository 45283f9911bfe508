use water_trace_protocol::{Border, Point, Rect, RenderCommand, TextAlign, ThemeToken, Viewport};

use super::{BarLayout, FONT_SIZE};
use crate::trace::Frame;

const BORDER_WIDTH: f64 = 2.0;
const AREA_LABEL_OFFSET: f64 = 10.0;
const HEIGHT_LABEL_OFFSET: f64 = 10.0;
const WIDTH_LABEL_OFFSET: f64 = 15.0;

/// Render the water held between the frame's pointers.
///
/// The container spans from the left bar's slot to the right bar's slot at
/// the height of the shorter bar. It is drawn as the max container when its
/// area equals the running maximum. Nothing is filled once the pointers
/// meet.
pub fn render_water(heights: &[u32], frame: &Frame, viewport: &Viewport) -> Vec<RenderCommand> {
    if heights.is_empty() {
        return Vec::new();
    }

    let tallest = heights.iter().copied().max().unwrap_or(0);
    let layout = BarLayout::new(viewport, heights.len(), tallest);
    let mut commands = Vec::with_capacity(8);

    commands.push(RenderCommand::BeginGroup {
        id: "water".to_string(),
        label: Some("Container".to_string()),
    });

    let (left, right) = (frame.left_pointer, frame.right_pointer);
    if left < right && right < heights.len() {
        let level = heights[left].min(heights[right]);
        let width = frame.width();
        let area = u64::from(level) * width as u64;
        let is_max = frame.max_area > 0 && area == frame.max_area;

        let x = layout.slot_x(left);
        let w = width as f64 * layout.slot_width();
        let y = layout.y_for(level);
        let (fill, border, text_color) = if is_max {
            (
                ThemeToken::WaterMax,
                Border::dashed(ThemeToken::WaterMaxBorder, BORDER_WIDTH),
                ThemeToken::TextWaterMax,
            )
        } else {
            (
                ThemeToken::Water,
                Border::solid(ThemeToken::WaterBorder, BORDER_WIDTH),
                ThemeToken::TextWater,
            )
        };

        commands.push(RenderCommand::DrawRect {
            rect: Rect::new(x, y, w, layout.baseline() - y),
            color: fill,
            border: Some(border),
            label: Some(format!("area {area}")),
            bar: None,
        });

        let area_text = if is_max {
            format!("Area: {area} (max)")
        } else {
            format!("Area: {area}")
        };
        commands.push(RenderCommand::DrawText {
            position: Point::new(x + w / 2.0, y - AREA_LABEL_OFFSET),
            text: area_text,
            color: text_color,
            font_size: FONT_SIZE,
            align: TextAlign::Center,
            bold: true,
        });
        commands.push(RenderCommand::DrawText {
            position: Point::new(x - HEIGHT_LABEL_OFFSET, y + (layout.baseline() - y) / 2.0),
            text: format!("Height: {level}"),
            color: ThemeToken::TextPrimary,
            font_size: FONT_SIZE,
            align: TextAlign::Right,
            bold: false,
        });
        commands.push(RenderCommand::DrawText {
            position: Point::new(x + w / 2.0, layout.baseline() + WIDTH_LABEL_OFFSET),
            text: format!("Width: {width}"),
            color: ThemeToken::TextPrimary,
            font_size: FONT_SIZE,
            align: TextAlign::Center,
            bold: false,
        });
    }

    if frame.max_area > 0 {
        commands.push(RenderCommand::DrawText {
            position: Point::new(layout.plot_center_x(), layout.top()),
            text: format!("Current max area: {}", frame.max_area),
            color: ThemeToken::TextPrimary,
            font_size: FONT_SIZE,
            align: TextAlign::Center,
            bold: true,
        });
    }

    commands.push(RenderCommand::EndGroup);
    commands
}
