use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    pub fn right(&self) -> f64 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.h
    }
}

/// The region a view lays itself out in, in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    /// A viewport anchored at the origin.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width,
            height,
        }
    }

    /// Split into top and bottom halves separated by `gap`.
    pub fn split_vertical(&self, gap: f64) -> (Viewport, Viewport) {
        let half = ((self.height - gap) / 2.0).max(0.0);
        let top = Viewport { height: half, ..*self };
        let bottom = Viewport {
            y: self.y + half + gap,
            height: half,
            ..*self
        };
        (top, bottom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_leaves_gap() {
        let (top, bottom) = Viewport::new(100.0, 220.0).split_vertical(20.0);
        assert_eq!(top.height, 100.0);
        assert_eq!(bottom.y, 120.0);
        assert_eq!(bottom.height, 100.0);
        assert_eq!(bottom.width, 100.0);
    }
}
