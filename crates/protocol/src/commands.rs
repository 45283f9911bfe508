use serde::{Deserialize, Serialize};

use crate::theme::ThemeToken;
use crate::types::{Point, Rect};

/// A single, stateless render instruction.
///
/// The core emits a `Vec<RenderCommand>` for each view. Renderers consume
/// this list sequentially; each command carries all the data it needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RenderCommand {
    /// Draw a filled rectangle, optionally outlined and labelled. `bar` is
    /// the height-array index the rect stands for, if any.
    DrawRect {
        rect: Rect,
        color: ThemeToken,
        border: Option<Border>,
        label: Option<String>,
        bar: Option<usize>,
    },

    /// Draw a text string at a position.
    DrawText {
        position: Point,
        text: String,
        color: ThemeToken,
        font_size: f64,
        align: TextAlign,
        bold: bool,
    },

    /// Draw a line segment.
    DrawLine {
        from: Point,
        to: Point,
        color: ThemeToken,
        width: f64,
    },

    /// Begin a logical group (e.g. a view). Renderers may use this for
    /// layer separation or accessibility.
    BeginGroup { id: String, label: Option<String> },

    /// End the current group.
    EndGroup,
}

impl RenderCommand {
    /// The bar index a `DrawRect` is tagged with.
    pub fn bar(&self) -> Option<usize> {
        match self {
            RenderCommand::DrawRect { bar, .. } => *bar,
            _ => None,
        }
    }
}

/// Outline around a rect.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Border {
    pub color: ThemeToken,
    pub width: f64,
    pub dashed: bool,
}

impl Border {
    pub fn solid(color: ThemeToken, width: f64) -> Self {
        Self {
            color,
            width,
            dashed: false,
        }
    }

    pub fn dashed(color: ThemeToken, width: f64) -> Self {
        Self {
            color,
            width,
            dashed: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}
