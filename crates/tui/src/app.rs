use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use rand::rngs::StdRng;
use water_trace_core::{Op, Player, RandomSpec, Speed, format_heights, parse_heights};

/// Milliseconds since the app started; the time base fed to the player.
#[derive(Debug, Clone, Copy)]
pub struct Clock {
    start: Instant,
}

impl Clock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    pub fn now_ms(&self) -> u64 {
        u64::try_from(self.start.elapsed().as_millis()).unwrap_or(u64::MAX)
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Normal,
    /// Typing a custom heights list.
    Editing(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Info(String),
    Error(String),
}

/// Interactive state: the player plus what the control surface shows.
pub struct App {
    pub player: Player,
    pub mode: Mode,
    pub status: Option<Status>,
    random: RandomSpec,
    rng: StdRng,
    quit: bool,
}

impl App {
    pub fn new(player: Player, random: RandomSpec, rng: StdRng) -> Self {
        Self {
            player,
            mode: Mode::Normal,
            status: None,
            random,
            rng,
            quit: false,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn handle_key(&mut self, key: KeyEvent, now_ms: u64) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.quit = true;
            return;
        }
        match self.mode {
            Mode::Normal => self.handle_normal(key.code, now_ms),
            Mode::Editing(_) => self.handle_editing(key.code, now_ms),
        }
    }

    fn handle_editing(&mut self, code: KeyCode, now_ms: u64) {
        match code {
            KeyCode::Esc => {
                self.mode = Mode::Normal;
                self.status = None;
            }
            KeyCode::Backspace => {
                if let Mode::Editing(buffer) = &mut self.mode {
                    buffer.pop();
                }
            }
            KeyCode::Char(c) => {
                if let Mode::Editing(buffer) = &mut self.mode {
                    buffer.push(c);
                }
            }
            KeyCode::Enter => {
                let text = match &self.mode {
                    Mode::Editing(buffer) => buffer.clone(),
                    Mode::Normal => return,
                };
                self.apply_heights(&text, now_ms);
            }
            _ => {}
        }
    }

    fn handle_normal(&mut self, code: KeyCode, now_ms: u64) {
        let op = match code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.quit = true;
                return;
            }
            KeyCode::Char(' ') => Op::TogglePlay,
            KeyCode::Right | KeyCode::Char('l') => Op::NextStep,
            KeyCode::Left | KeyCode::Char('h') => Op::PrevStep,
            KeyCode::Home => Op::SeekTo(0),
            KeyCode::End => Op::SeekTo(usize::MAX),
            KeyCode::Char('r') => Op::Reset,
            KeyCode::Char('+') | KeyCode::Char('=') => {
                Op::SetSpeed(Speed::faster(self.player.session().speed_ms()))
            }
            KeyCode::Char('-') => Op::SetSpeed(Speed::slower(self.player.session().speed_ms())),
            KeyCode::Char('n') => {
                let heights = self.random.sample(&mut self.rng);
                self.status = Some(Status::Info(format!(
                    "random heights: {}",
                    format_heights(&heights)
                )));
                Op::SetHeights(heights)
            }
            KeyCode::Char('e') => {
                let current = format_heights(self.player.session().heights());
                self.mode = Mode::Editing(current);
                self.status = Some(Status::Info(
                    "enter comma-separated heights, Enter to apply, Esc to cancel".to_string(),
                ));
                return;
            }
            _ => return,
        };
        self.player.dispatch(op, now_ms);
    }

    fn apply_heights(&mut self, text: &str, now_ms: u64) {
        match parse_heights(text) {
            Ok(heights) => {
                self.status = Some(Status::Info(format!("applied {} heights", heights.len())));
                self.player.dispatch(Op::SetHeights(heights), now_ms);
                self.mode = Mode::Normal;
            }
            Err(e) => {
                log::debug!("rejected heights input `{text}`: {e}");
                self.status = Some(Status::Error(e.to_string()));
            }
        }
    }
}
