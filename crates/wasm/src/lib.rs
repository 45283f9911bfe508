use std::sync::{Mutex, MutexGuard};

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use wasm_bindgen::prelude::*;
use water_trace_core::views::{render_bars, render_scene, render_water};
use water_trace_core::{Frame, HeightArray, Op, Player, RandomSpec, Session, parse_heights};
use water_trace_protocol::Viewport;

/// The one live session. Creating a session replaces it, so handles from
/// earlier sessions stop resolving.
struct Slot {
    next_handle: u32,
    live: Option<(u32, Player)>,
}

impl Slot {
    fn player(&self, handle: u32) -> Result<&Player, JsError> {
        match &self.live {
            Some((h, player)) if *h == handle => Ok(player),
            _ => Err(JsError::new("invalid session handle")),
        }
    }

    fn player_mut(&mut self, handle: u32) -> Result<&mut Player, JsError> {
        match &mut self.live {
            Some((h, player)) if *h == handle => Ok(player),
            _ => Err(JsError::new("invalid session handle")),
        }
    }
}

static SESSION: Mutex<Slot> = Mutex::new(Slot {
    next_handle: 0,
    live: None,
});

fn slot() -> Result<MutexGuard<'static, Slot>, JsError> {
    SESSION
        .lock()
        .map_err(|_| JsError::new("session store poisoned"))
}

fn js_err(e: impl std::fmt::Display) -> JsError {
    JsError::new(&e.to_string())
}

/// JS timestamps arrive as `f64` milliseconds.
fn to_ms(now_ms: f64) -> u64 {
    if now_ms.is_finite() && now_ms > 0.0 {
        now_ms as u64
    } else {
        0
    }
}

/// Parse comma-separated heights and return the full frame trace as JSON.
#[wasm_bindgen]
pub fn generate_frames(heights: &str) -> Result<String, JsError> {
    let heights = parse_heights(heights).map_err(js_err)?;
    let trace = water_trace_core::Trace::generate(&heights);
    serde_json::to_string(&trace).map_err(js_err)
}

/// Create a playback session, replacing any previous one. Returns a handle
/// for later calls. Uses the default array when `heights` is absent.
#[wasm_bindgen]
pub fn create_session(heights: Option<String>) -> Result<u32, JsError> {
    let heights = match heights {
        Some(text) => parse_heights(&text).map_err(js_err)?,
        None => HeightArray::default(),
    };
    let mut slot = slot()?;
    let handle = slot.next_handle;
    slot.next_handle = handle.wrapping_add(1);
    slot.live = Some((handle, Player::new(Session::new(heights))));
    Ok(handle)
}

/// Drop the session behind `handle`. Unknown handles are ignored.
#[wasm_bindgen]
pub fn destroy_session(handle: u32) -> Result<(), JsError> {
    let mut slot = slot()?;
    if slot.live.as_ref().is_some_and(|(h, _)| *h == handle) {
        slot.live = None;
    }
    Ok(())
}

/// Apply a playback command.
///
/// `command` is one of `toggle`, `reset`, `next`, `prev`, `seek` (arg:
/// frame), `speed` (arg: ms), `heights` (text: CSV), `random` (arg: seed).
/// Invalid heights are rejected without touching the session.
#[wasm_bindgen]
pub fn session_command(
    handle: u32,
    command: &str,
    arg: Option<f64>,
    text: Option<String>,
    now_ms: f64,
) -> Result<(), JsError> {
    let op = match command {
        "toggle" => Op::TogglePlay,
        "reset" => Op::Reset,
        "next" => Op::NextStep,
        "prev" => Op::PrevStep,
        "seek" => Op::SeekTo(arg.map_or(0, |v| v.max(0.0) as usize)),
        "speed" => Op::SetSpeed(
            arg.ok_or_else(|| JsError::new("speed requires a value"))?
                .max(0.0) as u64,
        ),
        "heights" => {
            let text = text.ok_or_else(|| JsError::new("heights requires text"))?;
            Op::SetHeights(parse_heights(&text).map_err(js_err)?)
        }
        "random" => {
            let mut rng = match arg {
                Some(seed) => StdRng::seed_from_u64(seed.max(0.0) as u64),
                None => StdRng::from_entropy(),
            };
            Op::SetHeights(RandomSpec::default().sample(&mut rng))
        }
        _ => return Err(JsError::new(&format!("unknown command: {command}"))),
    };

    slot()?.player_mut(handle)?.dispatch(op, to_ms(now_ms));
    Ok(())
}

/// Fire the autoplay tick if due. Returns true when the frame changed.
#[wasm_bindgen]
pub fn poll_session(handle: u32, now_ms: f64) -> Result<bool, JsError> {
    Ok(slot()?.player_mut(handle)?.poll(to_ms(now_ms)))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SessionState<'a> {
    #[serde(flatten)]
    session: &'a Session,
    total_frames: usize,
    current_frame: Option<&'a Frame>,
    next_deadline: Option<u64>,
}

/// Session snapshot as JSON, including the current frame.
#[wasm_bindgen]
pub fn session_state(handle: u32) -> Result<String, JsError> {
    let slot = slot()?;
    let player = slot.player(handle)?;
    let session = player.session();
    let state = SessionState {
        session,
        total_frames: session.frame_count(),
        current_frame: session.current_frame(),
        next_deadline: player.next_deadline(),
    };
    serde_json::to_string(&state).map_err(js_err)
}

/// Render the current frame, returning render commands as JSON.
///
/// `view` is `bars`, `water`, or `scene` (both stacked).
#[wasm_bindgen]
pub fn render_frame(handle: u32, view: &str, width: f64, height: f64) -> Result<String, JsError> {
    let slot = slot()?;
    let player = slot.player(handle)?;
    let session = player.session();
    let frame = session
        .current_frame()
        .ok_or_else(|| JsError::new("session has no frames"))?;
    let viewport = Viewport::new(width, height);

    let commands = match view {
        "bars" => render_bars(session.heights(), frame, &viewport),
        "water" => render_water(session.heights(), frame, &viewport),
        "scene" => render_scene(session.heights(), frame, &viewport),
        _ => return Err(JsError::new(&format!("unknown view: {view}"))),
    };
    serde_json::to_string(&commands).map_err(js_err)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frames_json_for_valid_input() {
        let json = generate_frames("1, 1").ok().unwrap_or_default();
        let frames: serde_json::Value = serde_json::from_str(&json).unwrap_or_default();
        assert_eq!(frames.as_array().map(Vec::len), Some(4));
        assert_eq!(frames[1]["currentArea"], 1);
    }

    #[test]
    fn session_round_trip() {
        let Some(handle) = create_session(Some("4,3,2,1,4".to_string())).ok() else {
            panic!("create_session failed");
        };
        assert!(session_command(handle, "next", None, None, 0.0).is_ok());
        assert!(session_command(handle, "speed", Some(200.0), None, 0.0).is_ok());
        assert!(session_command(handle, "toggle", None, None, 0.0).is_ok());
        assert_eq!(poll_session(handle, 200.0).ok(), Some(true));

        let state: serde_json::Value = session_state(handle)
            .ok()
            .and_then(|s| serde_json::from_str(&s).ok())
            .unwrap_or_default();
        assert_eq!(state["index"], 2);
        assert_eq!(state["isPlaying"], true);
        assert_eq!(state["speedMs"], 200);
        assert_eq!(state["heights"], serde_json::json!([4, 3, 2, 1, 4]));
        assert_eq!(state["nextDeadline"], 400);

        let commands = render_frame(handle, "scene", 800.0, 500.0).ok().unwrap_or_default();
        assert!(commands.contains("BeginGroup"));

        // A new session replaces the old one; destroying a stale handle is a no-op.
        let Some(next) = create_session(None).ok() else {
            panic!("create_session failed");
        };
        assert_ne!(next, handle);
        assert!(destroy_session(handle).is_ok());
        let live = |slot: &Slot| slot.live.as_ref().map(|(h, p)| (*h, p.session().index()));
        assert_eq!(slot().ok().and_then(|s| live(&*s)), Some((next, 0)));

        assert!(destroy_session(next).is_ok());
        assert_eq!(slot().ok().map(|s| s.live.is_none()), Some(true));
    }
}
