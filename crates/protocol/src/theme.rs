use serde::{Deserialize, Serialize};

/// Semantic color tokens resolved by the renderer's active theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ThemeToken {
    Background,
    Axis,

    // Bars
    BarIdle,
    BarLeft,
    BarRight,
    PointerOutline,

    // Water
    Water,
    WaterBorder,
    WaterMax,
    WaterMaxBorder,

    TextPrimary,
    TextMuted,
    TextWater,
    TextWaterMax,
}
