//! View transforms: `(heights, frame, viewport) -> Vec<RenderCommand>`.

pub mod bars;
pub mod water;

use water_trace_protocol::{Rect, RenderCommand, Viewport};

use crate::trace::Frame;

pub use bars::render_bars;
pub use water::render_water;

pub(crate) const MARGIN_TOP: f64 = 20.0;
pub(crate) const MARGIN_RIGHT: f64 = 20.0;
pub(crate) const MARGIN_BOTTOM: f64 = 30.0;
pub(crate) const MARGIN_LEFT: f64 = 30.0;
pub(crate) const FONT_SIZE: f64 = 12.0;

/// Share of a bar's slot taken by the bar; the rest is the gap.
const BAR_FILL: f64 = 0.7;

/// Linear mapping from bar index / height to pixels inside a viewport's
/// margins. Shared by both views so bars and water line up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarLayout {
    left: f64,
    top: f64,
    plot_width: f64,
    plot_height: f64,
    slot: f64,
    unit: f64,
}

impl BarLayout {
    pub fn new(viewport: &Viewport, count: usize, tallest: u32) -> Self {
        let plot_width = (viewport.width - MARGIN_LEFT - MARGIN_RIGHT).max(0.0);
        let plot_height = (viewport.height - MARGIN_TOP - MARGIN_BOTTOM).max(0.0);
        let slot = if count == 0 {
            0.0
        } else {
            plot_width / count as f64
        };
        let unit = if tallest == 0 {
            0.0
        } else {
            plot_height / f64::from(tallest)
        };
        Self {
            left: viewport.x + MARGIN_LEFT,
            top: viewport.y + MARGIN_TOP,
            plot_width,
            plot_height,
            slot,
            unit,
        }
    }

    /// Left edge of bar `index`'s slot.
    pub fn slot_x(&self, index: usize) -> f64 {
        self.left + index as f64 * self.slot
    }

    pub fn slot_width(&self) -> f64 {
        self.slot
    }

    pub fn bar_width(&self) -> f64 {
        self.slot * BAR_FILL
    }

    pub fn bar_center(&self, index: usize) -> f64 {
        self.slot_x(index) + self.bar_width() / 2.0
    }

    /// Y coordinate of the top of something `height` tall.
    pub fn y_for(&self, height: u32) -> f64 {
        self.baseline() - f64::from(height) * self.unit
    }

    /// Y coordinate of the plot floor.
    pub fn baseline(&self) -> f64 {
        self.top + self.plot_height
    }

    pub fn top(&self) -> f64 {
        self.top
    }

    pub fn plot_center_x(&self) -> f64 {
        self.left + self.plot_width / 2.0
    }

    pub fn bar_rect(&self, index: usize, height: u32) -> Rect {
        let y = self.y_for(height);
        Rect::new(
            self.slot_x(index),
            y,
            self.bar_width(),
            self.baseline() - y,
        )
    }
}

/// Bars in the top half, water container in the bottom half.
pub fn render_scene(heights: &[u32], frame: &Frame, viewport: &Viewport) -> Vec<RenderCommand> {
    let (top, bottom) = viewport.split_vertical(20.0);
    let mut commands = render_bars(heights, frame, &top);
    commands.extend(render_water(heights, frame, &bottom));
    commands
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_scales_against_tallest() {
        let vp = Viewport::new(250.0, 150.0);
        let layout = BarLayout::new(&vp, 4, 10);
        // plot 200 x 100, slot 50
        assert_eq!(layout.slot_width(), 50.0);
        assert_eq!(layout.bar_width(), 35.0);
        assert_eq!(layout.slot_x(2), 130.0);
        assert_eq!(layout.baseline(), 120.0);
        assert_eq!(layout.y_for(10), 20.0);
        assert_eq!(layout.y_for(5), 70.0);

        let r = layout.bar_rect(1, 5);
        assert_eq!(r, Rect::new(80.0, 70.0, 35.0, 50.0));
    }

    #[test]
    fn all_zero_heights_sit_on_baseline() {
        let layout = BarLayout::new(&Viewport::new(250.0, 150.0), 3, 0);
        assert_eq!(layout.y_for(0), layout.baseline());
    }

    #[test]
    fn tiny_viewport_does_not_go_negative() {
        let layout = BarLayout::new(&Viewport::new(10.0, 10.0), 3, 5);
        assert_eq!(layout.slot_width(), 0.0);
        assert_eq!(layout.bar_rect(0, 5).h, 0.0);
    }

    #[test]
    fn scene_stacks_both_views() {
        let trace = crate::trace::generate(&[1, 8, 6, 2, 5, 4, 8, 3, 7])
            .unwrap_or_else(|e| panic!("{e}"));
        let frame = &trace.frames()[1];
        let cmds = render_scene(&[1, 8, 6, 2, 5, 4, 8, 3, 7], frame, &Viewport::new(800.0, 500.0));
        let groups: Vec<&str> = cmds
            .iter()
            .filter_map(|c| match c {
                RenderCommand::BeginGroup { id, .. } => Some(id.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(groups, vec!["bars", "water"]);
    }
}
