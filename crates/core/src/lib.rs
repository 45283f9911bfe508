//! Step-by-step trace of the two-pointer "container with most water" scan.
//!
//! ```text
//!   "1,8,6,2" ──▶ HeightArray ──▶ Trace ──▶ Session ──▶ Player (autoplay ticks)
//!    (input)                      (trace)   (session)   (playback)
//!                                    │
//!                                    └──▶ views ──▶ RenderCommand[] ──▶ SVG / terminal / canvas
//! ```

pub mod config;
pub mod input;
pub mod playback;
pub mod session;
pub mod svg;
pub mod trace;
pub mod views;

pub use config::{Config, ConfigError};
pub use input::{InputError, RandomSpec, Speed, format_heights, parse_heights, random_heights};
pub use playback::{PendingTick, Player};
pub use session::{Op, Session};
pub use trace::{Frame, HeightArray, Step, Trace, TraceError, generate};
