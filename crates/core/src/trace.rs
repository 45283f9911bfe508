//! Two-pointer trace generation.
//!
//! [`Trace::generate`] runs the "container with most water" scan and records
//! one [`Frame`] per event:
//!
//! ```text
//!   init ─▶ (compute ─▶ move) × k ─▶ done        len = 2 + 2k
//! ```
//!
//! The scan keeps `left < right`, discards the shorter boundary each
//! iteration (the right one on ties), and stops when the pointers meet.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize, Serializer};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TraceError {
    #[error("need at least 2 heights to form a container, got {len}")]
    TooFewHeights { len: usize },
}

/// Bar heights with at least two elements.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<u32>", into = "Vec<u32>")]
pub struct HeightArray(Arc<[u32]>);

impl HeightArray {
    pub fn new(heights: Vec<u32>) -> Result<Self, TraceError> {
        if heights.len() < 2 {
            return Err(TraceError::TooFewHeights { len: heights.len() });
        }
        Ok(Self(heights.into()))
    }

    #[inline]
    pub fn as_slice(&self) -> &[u32] {
        &self.0
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; kept for API symmetry with slices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Water held between bars `left` and `right`.
    pub fn area(&self, left: usize, right: usize) -> u64 {
        let h = self.0[left].min(self.0[right]);
        u64::from(h) * right.abs_diff(left) as u64
    }
}

impl Default for HeightArray {
    fn default() -> Self {
        Self(Arc::from([1, 8, 6, 2, 5, 4, 8, 3, 7]))
    }
}

impl TryFrom<Vec<u32>> for HeightArray {
    type Error = TraceError;

    fn try_from(heights: Vec<u32>) -> Result<Self, Self::Error> {
        Self::new(heights)
    }
}

impl From<HeightArray> for Vec<u32> {
    fn from(heights: HeightArray) -> Self {
        heights.0.to_vec()
    }
}

impl std::ops::Deref for HeightArray {
    type Target = [u32];

    fn deref(&self) -> &[u32] {
        &self.0
    }
}

/// What a frame records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Step {
    /// Pointers placed at both ends.
    Init,
    /// Area between the pointers computed; `new_max` if it beat the record.
    Compute { new_max: bool },
    /// Left bar was shorter, left pointer moved right.
    MoveLeft,
    /// Right bar was shorter or equal, right pointer moved left.
    MoveRight,
    /// Pointers met.
    Done,
}

impl Step {
    pub fn is_key(self) -> bool {
        matches!(
            self,
            Step::Init | Step::Compute { new_max: true } | Step::Done
        )
    }
}

/// One recorded state of the scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Frame {
    pub left_pointer: usize,
    pub right_pointer: usize,
    pub max_area: u64,
    pub current_area: u64,
    pub is_key_frame: bool,
    pub description: String,
    pub step: Step,
}

impl Frame {
    fn new(step: Step, left: usize, right: usize, max_area: u64, current_area: u64) -> Self {
        let description = describe(step, current_area, max_area);
        Self {
            left_pointer: left,
            right_pointer: right,
            max_area,
            current_area,
            is_key_frame: step.is_key(),
            description,
            step,
        }
    }

    /// Width between the pointers.
    #[inline]
    pub fn width(&self) -> usize {
        self.right_pointer.saturating_sub(self.left_pointer)
    }
}

fn describe(step: Step, current_area: u64, max_area: u64) -> String {
    match step {
        Step::Init => "Initialize left and right pointers at both ends of the array".to_string(),
        Step::Compute { new_max: true } => {
            format!("Compute area: {current_area} > current max area, update max area")
        }
        Step::Compute { new_max: false } => format!("Compute area: {current_area}"),
        Step::MoveLeft => {
            "Left bar is shorter than right bar, move left pointer right".to_string()
        }
        Step::MoveRight => {
            "Right bar is shorter than or equal to left bar, move right pointer left".to_string()
        }
        Step::Done => format!("Algorithm finished, max area is {max_area}"),
    }
}

/// The ordered, immutable frame sequence of one scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trace {
    frames: Arc<[Frame]>,
}

impl Trace {
    /// Run the two-pointer scan over `heights`.
    pub fn generate(heights: &HeightArray) -> Self {
        let h = heights.as_slice();
        let mut left = 0;
        let mut right = h.len() - 1;
        let mut max_area = 0;

        let mut frames = Vec::with_capacity(2 * h.len());
        frames.push(Frame::new(Step::Init, left, right, 0, 0));

        while left < right {
            let area = heights.area(left, right);
            let new_max = area > max_area;
            if new_max {
                max_area = area;
            }
            frames.push(Frame::new(
                Step::Compute { new_max },
                left,
                right,
                max_area,
                area,
            ));

            let step = if h[left] < h[right] {
                left += 1;
                Step::MoveLeft
            } else {
                right -= 1;
                Step::MoveRight
            };
            frames.push(Frame::new(step, left, right, max_area, area));
        }

        frames.push(Frame::new(Step::Done, left, right, max_area, 0));

        log::debug!(
            "generated {} frames for {} heights, max area {}",
            frames.len(),
            h.len(),
            max_area
        );

        Self {
            frames: frames.into(),
        }
    }

    #[inline]
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Always false: a trace holds at least the init and done frames.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Frame> {
        self.frames.get(index)
    }

    pub fn last(&self) -> Option<&Frame> {
        self.frames.last()
    }

    /// Index of the terminal frame.
    pub fn last_index(&self) -> usize {
        self.frames.len().saturating_sub(1)
    }

    /// Final maximum area.
    pub fn max_area(&self) -> u64 {
        self.last().map_or(0, |f| f.max_area)
    }

    /// Number of loop iterations the scan ran.
    pub fn iterations(&self) -> usize {
        self.frames.len().saturating_sub(2) / 2
    }

    pub fn key_frame_indices(&self) -> Vec<usize> {
        self.frames
            .iter()
            .enumerate()
            .filter(|(_, f)| f.is_key_frame)
            .map(|(i, _)| i)
            .collect()
    }

    /// Pointers of the computation that set the final maximum, if any area
    /// was positive.
    pub fn best_pair(&self) -> Option<(usize, usize)> {
        let max = self.max_area();
        if max == 0 {
            return None;
        }
        self.frames
            .iter()
            .find(|f| f.step == (Step::Compute { new_max: true }) && f.current_area == max)
            .map(|f| (f.left_pointer, f.right_pointer))
    }
}

// Serializes as the plain frame list; hand-rolled to avoid serde's `rc` feature.
impl Serialize for Trace {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.frames.iter())
    }
}

impl fmt::Display for Trace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, frame) in self.frames.iter().enumerate() {
            let marker = if frame.is_key_frame { '*' } else { ' ' };
            writeln!(
                f,
                "{marker}{i:>4}  i={:<3} j={:<3} area={:<6} max={:<6} {}",
                frame.left_pointer,
                frame.right_pointer,
                frame.current_area,
                frame.max_area,
                frame.description
            )?;
        }
        Ok(())
    }
}

/// Validate `heights` and run the scan.
pub fn generate(heights: &[u32]) -> Result<Trace, TraceError> {
    let heights = HeightArray::new(heights.to_vec())?;
    Ok(Trace::generate(&heights))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trace(h: &[u32]) -> Trace {
        generate(h).unwrap_or_else(|e| panic!("{e}"))
    }

    #[test]
    fn classic_example() {
        let t = trace(&[1, 8, 6, 2, 5, 4, 8, 3, 7]);
        assert_eq!(t.max_area(), 49);
        assert_eq!(t.best_pair(), Some((1, 8)));
    }

    #[test]
    fn two_equal_bars() {
        let t = trace(&[1, 1]);
        assert_eq!(t.len(), 4);
        assert_eq!(t.iterations(), 1);
        assert_eq!(t.max_area(), 1);

        let steps: Vec<Step> = t.frames().iter().map(|f| f.step).collect();
        assert_eq!(
            steps,
            vec![
                Step::Init,
                Step::Compute { new_max: true },
                Step::MoveRight,
                Step::Done
            ]
        );
    }

    #[test]
    fn symmetric_ends() {
        assert_eq!(trace(&[4, 3, 2, 1, 4]).max_area(), 16);
        assert_eq!(trace(&[1, 2, 1]).max_area(), 2);
    }

    #[test]
    fn rejects_short_input() {
        assert_eq!(generate(&[]), Err(TraceError::TooFewHeights { len: 0 }));
        assert_eq!(generate(&[7]), Err(TraceError::TooFewHeights { len: 1 }));
    }

    #[test]
    fn move_frames_carry_previous_area() {
        let t = trace(&[3, 9, 2]);
        let frames = t.frames();
        // init, compute(0,2), move right, compute(0,1), move left, done
        assert_eq!(frames.len(), 6);
        assert_eq!(frames[1].current_area, 4);
        assert_eq!(frames[2].step, Step::MoveRight);
        assert_eq!(frames[2].current_area, 4);
        assert_eq!(frames[2].right_pointer, 1);
        assert!(!frames[2].is_key_frame);
        assert_eq!(frames[3].current_area, 3);
        assert!(!frames[3].is_key_frame);
        assert_eq!(frames[4].step, Step::MoveLeft);
        assert_eq!(frames[5].current_area, 0);
        assert_eq!(frames[5].left_pointer, 1);
        assert_eq!(frames[5].right_pointer, 1);
    }

    #[test]
    fn zero_heights_never_set_a_max() {
        let t = trace(&[0, 0, 0]);
        assert_eq!(t.max_area(), 0);
        assert_eq!(t.best_pair(), None);
        assert_eq!(t.key_frame_indices(), vec![0, t.last_index()]);
    }

    #[test]
    fn descriptions_name_the_event() {
        let t = trace(&[1, 8, 6, 2, 5, 4, 8, 3, 7]);
        assert!(t.frames()[0].description.starts_with("Initialize"));
        assert!(t.frames()[1].description.contains("update max area"));
        assert!(t.frames()[2].description.contains("move left pointer"));
        assert_eq!(
            t.last().map(|f| f.description.as_str()),
            Some("Algorithm finished, max area is 49")
        );
    }

    #[test]
    fn frame_json_uses_camel_case() {
        let t = trace(&[1, 1]);
        let json = serde_json::to_string(&t.frames()[1]).unwrap_or_default();
        assert!(json.contains("\"leftPointer\":0"));
        assert!(json.contains("\"isKeyFrame\":true"));
        assert!(json.contains("\"kind\":\"compute\""));
        assert!(json.contains("\"newMax\":true"));
        assert!(!json.contains("new_max"));
    }

    #[test]
    fn trace_serializes_as_frame_list() {
        let value = serde_json::to_value(trace(&[1, 1])).unwrap_or_default();
        assert_eq!(value.as_array().map(Vec::len), Some(4));
    }

    #[test]
    fn height_array_deserialize_validates() {
        let ok: Result<HeightArray, _> = serde_json::from_str("[2, 5]");
        assert!(ok.is_ok());
        let short: Result<HeightArray, _> = serde_json::from_str("[2]");
        assert!(short.is_err());
    }

    #[test]
    fn display_marks_key_frames() {
        let text = trace(&[1, 1]).to_string();
        assert_eq!(text.lines().count(), 4);
        assert!(text.lines().next().is_some_and(|l| l.starts_with('*')));
    }
}
