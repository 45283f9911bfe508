use water_trace_protocol::{Border, Point, RenderCommand, TextAlign, ThemeToken, Viewport};

use super::{BarLayout, FONT_SIZE};
use crate::trace::Frame;

const INDEX_LABEL_OFFSET: f64 = 20.0;
const HEIGHT_LABEL_OFFSET: f64 = 5.0;
const POINTER_LABEL_OFFSET: f64 = 20.0;
const OUTLINE_WIDTH: f64 = 2.0;

/// Render the height array as vertical bars, highlighting the bars under
/// the left (`i`) and right (`j`) pointers.
pub fn render_bars(heights: &[u32], frame: &Frame, viewport: &Viewport) -> Vec<RenderCommand> {
    if heights.is_empty() {
        return Vec::new();
    }

    let tallest = heights.iter().copied().max().unwrap_or(0);
    let layout = BarLayout::new(viewport, heights.len(), tallest);
    let mut commands = Vec::with_capacity(heights.len() * 3 + 4);

    commands.push(RenderCommand::BeginGroup {
        id: "bars".to_string(),
        label: Some("Heights".to_string()),
    });
    commands.push(RenderCommand::DrawLine {
        from: Point::new(layout.slot_x(0), layout.baseline()),
        to: Point::new(layout.slot_x(heights.len()), layout.baseline()),
        color: ThemeToken::Axis,
        width: 1.0,
    });

    for (index, &height) in heights.iter().enumerate() {
        let pointer = if index == frame.left_pointer {
            Some(("i", ThemeToken::BarLeft))
        } else if index == frame.right_pointer {
            Some(("j", ThemeToken::BarRight))
        } else {
            None
        };

        commands.push(RenderCommand::DrawRect {
            rect: layout.bar_rect(index, height),
            color: pointer.map_or(ThemeToken::BarIdle, |(_, color)| color),
            border: pointer.map(|_| Border::solid(ThemeToken::PointerOutline, OUTLINE_WIDTH)),
            label: None,
            bar: Some(index),
        });

        let cx = layout.bar_center(index);
        let top = layout.y_for(height);

        commands.push(RenderCommand::DrawText {
            position: Point::new(cx, layout.baseline() + INDEX_LABEL_OFFSET),
            text: index.to_string(),
            color: ThemeToken::TextMuted,
            font_size: FONT_SIZE,
            align: TextAlign::Center,
            bold: false,
        });
        commands.push(RenderCommand::DrawText {
            position: Point::new(cx, top - HEIGHT_LABEL_OFFSET),
            text: height.to_string(),
            color: ThemeToken::TextPrimary,
            font_size: FONT_SIZE,
            align: TextAlign::Center,
            bold: false,
        });

        if let Some((name, _)) = pointer {
            commands.push(RenderCommand::DrawText {
                position: Point::new(cx, top - POINTER_LABEL_OFFSET),
                text: name.to_string(),
                color: ThemeToken::TextPrimary,
                font_size: FONT_SIZE,
                align: TextAlign::Center,
                bold: true,
            });
        }
    }

    commands.push(RenderCommand::EndGroup);
    commands
}
