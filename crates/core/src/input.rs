use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::trace::HeightArray;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("at least two height values are required, got {count}")]
    TooFewValues { count: usize },
    #[error("all values must be integers, `{token}` is not")]
    NotAnInteger { token: String },
    #[error("heights cannot be negative, got {value}")]
    Negative { value: i64 },
    #[error("height {value} is too large (max {})", u32::MAX)]
    TooLarge { value: i64 },
}

/// Parse a comma-separated list of heights, e.g. `"1,8,6,2,5,4,8,3,7"`.
///
/// Tokens are trimmed and empty tokens are skipped, so `"1, 2,"` is two
/// values. The value count is checked before any token is parsed.
pub fn parse_heights(text: &str) -> Result<HeightArray, InputError> {
    let tokens: Vec<&str> = text
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect();
    if tokens.len() < 2 {
        return Err(InputError::TooFewValues {
            count: tokens.len(),
        });
    }

    let mut heights = Vec::with_capacity(tokens.len());
    for token in tokens {
        let value: i64 = token.parse().map_err(|_| InputError::NotAnInteger {
            token: token.to_string(),
        })?;
        if value < 0 {
            return Err(InputError::Negative { value });
        }
        let height = u32::try_from(value).map_err(|_| InputError::TooLarge { value })?;
        heights.push(height);
    }

    let count = heights.len();
    HeightArray::new(heights).map_err(|_| InputError::TooFewValues { count })
}

/// Render heights the way the input field shows them.
pub fn format_heights(heights: &[u32]) -> String {
    heights
        .iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Bounds for randomly generated arrays (both inclusive).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RandomSpec {
    pub min_len: usize,
    pub max_len: usize,
    pub min_height: u32,
    pub max_height: u32,
}

impl Default for RandomSpec {
    fn default() -> Self {
        Self {
            min_len: 5,
            max_len: 15,
            min_height: 1,
            max_height: 15,
        }
    }
}

impl RandomSpec {
    /// Draw a height array. Bounds are normalized so misconfigured ranges
    /// still yield a valid array.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> HeightArray {
        let min_len = self.min_len.max(2);
        let max_len = self.max_len.max(min_len);
        let min_h = self.min_height.min(self.max_height);
        let max_h = self.max_height.max(self.min_height);

        let len = rng.gen_range(min_len..=max_len);
        let heights: Vec<u32> = (0..len).map(|_| rng.gen_range(min_h..=max_h)).collect();
        HeightArray::new(heights).unwrap_or_default()
    }
}

/// A random array with the default bounds: length in `[5, 15]`, heights in
/// `[1, 15]`.
pub fn random_heights<R: Rng + ?Sized>(rng: &mut R) -> HeightArray {
    RandomSpec::default().sample(rng)
}

/// The speed slider: milliseconds per step, `[100, 2000]` in steps of 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Speed;

impl Speed {
    pub const MIN_MS: u64 = 100;
    pub const MAX_MS: u64 = 2000;
    pub const STEP_MS: u64 = 100;

    /// Snap an arbitrary value onto the slider.
    pub fn snap(ms: u64) -> u64 {
        let clamped = ms.clamp(Self::MIN_MS, Self::MAX_MS);
        let steps = (clamped + Self::STEP_MS / 2) / Self::STEP_MS;
        (steps * Self::STEP_MS).clamp(Self::MIN_MS, Self::MAX_MS)
    }

    /// One notch faster (shorter interval).
    pub fn faster(ms: u64) -> u64 {
        Self::snap(Self::snap(ms).saturating_sub(Self::STEP_MS))
    }

    /// One notch slower (longer interval).
    pub fn slower(ms: u64) -> u64 {
        Self::snap(Self::snap(ms) + Self::STEP_MS)
    }

    /// `"0.8s/step"`
    pub fn label(ms: u64) -> String {
        format!("{:.1}s/step", ms as f64 / 1000.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn parses_trimmed_values() {
        let h = parse_heights(" 1,8 ,6,2, 5,4,8,3,7 ");
        assert_eq!(
            h.map(|h| h.to_vec()),
            Ok(vec![1, 8, 6, 2, 5, 4, 8, 3, 7])
        );
    }

    #[test]
    fn skips_empty_tokens() {
        assert_eq!(parse_heights("3,,4,").map(|h| h.to_vec()), Ok(vec![3, 4]));
    }

    #[test]
    fn rejects_too_few() {
        assert_eq!(parse_heights(""), Err(InputError::TooFewValues { count: 0 }));
        assert_eq!(parse_heights("5"), Err(InputError::TooFewValues { count: 1 }));
    }

    #[test]
    fn count_is_checked_before_tokens() {
        assert_eq!(parse_heights("abc"), Err(InputError::TooFewValues { count: 1 }));
        assert_eq!(parse_heights("-3"), Err(InputError::TooFewValues { count: 1 }));
    }

    #[test]
    fn rejects_non_integers() {
        assert_eq!(
            parse_heights("1,two,3"),
            Err(InputError::NotAnInteger {
                token: "two".to_string()
            })
        );
        assert!(matches!(
            parse_heights("1,2.5"),
            Err(InputError::NotAnInteger { .. })
        ));
    }

    #[test]
    fn rejects_negative() {
        assert_eq!(
            parse_heights("1,-4,3"),
            Err(InputError::Negative { value: -4 })
        );
    }

    #[test]
    fn rejects_oversized() {
        assert!(matches!(
            parse_heights("1,99999999999"),
            Err(InputError::TooLarge { .. })
        ));
    }

    #[test]
    fn error_messages_name_the_rule() {
        let msg = parse_heights("x,1").err().map(|e| e.to_string());
        assert_eq!(
            msg.as_deref(),
            Some("all values must be integers, `x` is not")
        );
    }

    #[test]
    fn random_respects_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let h = random_heights(&mut rng);
            assert!((5..=15).contains(&h.len()));
            assert!(h.iter().all(|v| (1..=15).contains(v)));
        }
    }

    #[test]
    fn random_is_reproducible_with_seed() {
        let a = random_heights(&mut StdRng::seed_from_u64(42));
        let b = random_heights(&mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn degenerate_bounds_still_valid() {
        let spec = RandomSpec {
            min_len: 0,
            max_len: 0,
            min_height: 9,
            max_height: 3,
        };
        let h = spec.sample(&mut StdRng::seed_from_u64(1));
        assert_eq!(h.len(), 2);
        assert!(h.iter().all(|v| (3..=9).contains(v)));
    }

    #[test]
    fn format_round_trips_through_parse() {
        let text = format_heights(&[4, 0, 12]);
        assert_eq!(text, "4, 0, 12");
        assert_eq!(parse_heights(&text).map(|h| h.to_vec()), Ok(vec![4, 0, 12]));
    }

    #[test]
    fn speed_slider() {
        assert_eq!(Speed::snap(0), 100);
        assert_eq!(Speed::snap(849), 800);
        assert_eq!(Speed::snap(5000), 2000);
        assert_eq!(Speed::faster(800), 700);
        assert_eq!(Speed::faster(100), 100);
        assert_eq!(Speed::slower(2000), 2000);
        assert_eq!(Speed::slower(800), 900);
        assert_eq!(Speed::label(800), "0.8s/step");
    }
}
