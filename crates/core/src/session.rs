use serde::Serialize;

use crate::trace::{Frame, HeightArray, Trace};

/// Default playback interval in milliseconds per step.
pub const DEFAULT_SPEED_MS: u64 = 800;

/// A playback operation on a [`Session`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Op {
    TogglePlay,
    Reset,
    NextStep,
    PrevStep,
    /// Jump to a frame, clamped to the trace. Stops playback.
    SeekTo(usize),
    SetSpeed(u64),
    SetHeights(HeightArray),
    /// Autoplay advance, issued by the tick scheduler.
    Tick,
}

/// Snapshot of one visualization: the heights, their trace, and where
/// playback stands.
///
/// Transitions never mutate in place; [`Session::apply`] returns the next
/// snapshot. Heights and frames are shared, so cloning is cheap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    heights: HeightArray,
    #[serde(skip)]
    trace: Trace,
    index: usize,
    is_playing: bool,
    speed_ms: u64,
    generation: u64,
}

impl Session {
    pub fn new(heights: HeightArray) -> Self {
        let trace = Trace::generate(&heights);
        Self {
            heights,
            trace,
            index: 0,
            is_playing: false,
            speed_ms: DEFAULT_SPEED_MS,
            generation: 0,
        }
    }

    pub fn with_speed(mut self, speed_ms: u64) -> Self {
        self.speed_ms = speed_ms;
        self
    }

    /// Compute the state after `op`.
    pub fn apply(&self, op: Op) -> Session {
        let mut next = self.clone();
        let last = self.trace.last_index();

        match op {
            Op::TogglePlay => next.is_playing = !self.is_playing,
            Op::Reset => {
                next.is_playing = false;
                next.index = 0;
            }
            Op::NextStep => {
                if self.index < last {
                    next.index = self.index + 1;
                    next.is_playing = false;
                }
            }
            Op::PrevStep => {
                if self.index > 0 {
                    next.index = self.index - 1;
                    next.is_playing = false;
                }
            }
            Op::SeekTo(index) => {
                next.index = index.min(last);
                next.is_playing = false;
            }
            Op::SetSpeed(speed_ms) => next.speed_ms = speed_ms,
            Op::SetHeights(heights) => {
                log::info!("replacing heights ({} bars)", heights.len());
                next.trace = Trace::generate(&heights);
                next.heights = heights;
                next.index = 0;
                next.is_playing = false;
                next.generation = self.generation + 1;
            }
            Op::Tick => {
                if self.is_playing {
                    if self.index < last {
                        next.index = self.index + 1;
                    }
                    if next.index >= last {
                        log::info!("playback reached the final frame");
                        next.is_playing = false;
                    }
                }
            }
        }

        log::trace!(
            "session: frame {}/{} playing={} speed={}ms",
            next.index,
            next.trace.len(),
            next.is_playing,
            next.speed_ms
        );
        next
    }

    #[inline]
    pub fn heights(&self) -> &HeightArray {
        &self.heights
    }

    #[inline]
    pub fn trace(&self) -> &Trace {
        &self.trace
    }

    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    #[inline]
    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    #[inline]
    pub fn speed_ms(&self) -> u64 {
        self.speed_ms
    }

    /// Incremented whenever the heights are replaced.
    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn current_frame(&self) -> Option<&Frame> {
        self.trace.get(self.index)
    }

    pub fn frame_count(&self) -> usize {
        self.trace.len()
    }

    pub fn is_at_start(&self) -> bool {
        self.index == 0
    }

    pub fn is_at_end(&self) -> bool {
        self.index >= self.trace.last_index()
    }

    /// Playback position in `0.0..=1.0`.
    pub fn progress(&self) -> f64 {
        let last = self.trace.last_index();
        if last == 0 {
            return 0.0;
        }
        self.index as f64 / last as f64
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(HeightArray::default())
    }
}
