use std::io::stdout;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
};
use water_trace_core::Speed;
use water_trace_core::views::render_scene;
use water_trace_protocol::{RenderCommand, TextAlign, ThemeToken, Viewport};

use crate::app::{App, Clock, Mode, Status};

/// Logical pixels per terminal cell. Views lay out in pixels; the terminal
/// maps them back onto cells.
const CELL_WIDTH: f64 = 8.0;
const CELL_HEIGHT: f64 = 16.0;

const POLL_INTERVAL: Duration = Duration::from_millis(50);

fn theme_to_color(token: ThemeToken) -> Color {
    match token {
        ThemeToken::Background => Color::Black,
        ThemeToken::Axis => Color::DarkGray,
        ThemeToken::BarIdle => Color::Gray,
        ThemeToken::BarLeft => Color::Blue,
        ThemeToken::BarRight => Color::Red,
        ThemeToken::PointerOutline => Color::White,
        ThemeToken::Water => Color::Rgb(52, 152, 219),
        ThemeToken::WaterBorder => Color::Rgb(41, 128, 185),
        ThemeToken::WaterMax => Color::Rgb(46, 204, 113),
        ThemeToken::WaterMaxBorder => Color::Rgb(39, 174, 96),
        ThemeToken::TextPrimary => Color::White,
        ThemeToken::TextMuted => Color::DarkGray,
        ThemeToken::TextWater => Color::LightBlue,
        ThemeToken::TextWaterMax => Color::LightGreen,
    }
}

fn fill_char(token: ThemeToken) -> char {
    match token {
        ThemeToken::Water => '░',
        ThemeToken::WaterMax => '▒',
        _ => '█',
    }
}

/// Run the interactive loop until the user quits.
pub fn run_tui(app: &mut App) -> Result<()> {
    enable_raw_mode().context("enabling raw mode")?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen).context("entering alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    app.player.cancel();

    result
}

fn event_loop<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    let clock = Clock::new();

    while !app.should_quit() {
        terminal.draw(|frame| draw(frame, app))?;

        let now = clock.now_ms();
        let timeout = app
            .player
            .next_deadline()
            .map_or(POLL_INTERVAL, |due| {
                Duration::from_millis(due.saturating_sub(now)).min(POLL_INTERVAL)
            });

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    app.handle_key(key, clock.now_ms());
                }
                // Resize just redraws on the next pass.
                _ => {}
            }
        }

        app.player.poll(clock.now_ms());
    }
    Ok(())
}

fn draw(frame: &mut Frame, app: &App) {
    let [header, scene, controls] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(8),
        Constraint::Length(7),
    ])
    .areas(frame.area());

    let session = app.player.session();
    let title = Block::default()
        .title(format!(
            " water-trace | {} bars | max area {} ",
            session.heights().len(),
            session.trace().max_area()
        ))
        .style(Style::default().fg(Color::White).bg(Color::DarkGray));
    frame.render_widget(title, header);

    frame.render_widget(
        Block::default()
            .borders(Borders::NONE)
            .style(Style::default().bg(Color::Black)),
        scene,
    );
    if let Some(current) = session.current_frame() {
        let viewport = Viewport::new(
            f64::from(scene.width) * CELL_WIDTH,
            f64::from(scene.height) * CELL_HEIGHT,
        );
        let commands = render_scene(session.heights(), current, &viewport);
        paint_commands(frame.buffer_mut(), scene, &commands);
    }

    draw_controls(frame, controls, app);
}

/// Rasterize render commands into terminal cells inside `area`.
fn paint_commands(buf: &mut Buffer, area: Rect, commands: &[RenderCommand]) {
    let right = area.x + area.width;
    let bottom = area.y + area.height;
    let to_col = |x: f64| area.x as f64 + (x / CELL_WIDTH).round();
    let to_row = |y: f64| area.y as f64 + (y / CELL_HEIGHT).round();
    let in_bounds = |c: f64, r: f64| {
        c >= area.x as f64 && r >= area.y as f64 && c < right as f64 && r < bottom as f64
    };

    for cmd in commands {
        match cmd {
            RenderCommand::DrawRect { rect, color, .. } => {
                let fg = theme_to_color(*color);
                let ch = fill_char(*color);
                let c0 = to_col(rect.x);
                let c1 = to_col(rect.right()).max(c0 + 1.0);
                let r0 = to_row(rect.y);
                let r1 = to_row(rect.bottom());
                let mut r = r0;
                while r < r1 {
                    let mut c = c0;
                    while c < c1 {
                        if in_bounds(c, r) {
                            buf[(c as u16, r as u16)]
                                .set_char(ch)
                                .set_fg(fg)
                                .set_bg(Color::Black);
                        }
                        c += 1.0;
                    }
                    r += 1.0;
                }
            }
            RenderCommand::DrawText {
                position,
                text,
                color,
                align,
                bold,
                ..
            } => {
                let len = text.chars().count() as f64;
                let anchor = to_col(position.x);
                let start = match align {
                    TextAlign::Left => anchor,
                    TextAlign::Center => anchor - (len / 2.0).floor(),
                    TextAlign::Right => anchor - len,
                };
                // Baseline sits at the bottom of the text row.
                let row = to_row(position.y) - 1.0;
                let mut style = Style::default().fg(theme_to_color(*color));
                if *bold {
                    style = style.add_modifier(Modifier::BOLD);
                }
                for (i, ch) in text.chars().enumerate() {
                    let c = start + i as f64;
                    if in_bounds(c, row) {
                        buf[(c as u16, row as u16)].set_char(ch).set_style(style);
                    }
                }
            }
            RenderCommand::DrawLine { .. }
            | RenderCommand::BeginGroup { .. }
            | RenderCommand::EndGroup => {}
        }
    }
}

fn draw_controls(frame: &mut Frame, area: Rect, app: &App) {
    let session = app.player.session();
    let [progress, description, speed, input, help] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(2),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .margin(1)
    .areas(area);

    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(Color::Blue).bg(Color::DarkGray))
        .ratio(session.progress().clamp(0.0, 1.0))
        .label(format!("{} / {}", session.index() + 1, session.frame_count()));
    frame.render_widget(gauge, progress);

    let text = session
        .current_frame()
        .map(|f| {
            let marker = if f.is_key_frame { "* " } else { "  " };
            format!(
                "{marker}{}  (i={}, j={}, area={}, max={})",
                f.description, f.left_pointer, f.right_pointer, f.current_area, f.max_area
            )
        })
        .unwrap_or_default();
    frame.render_widget(Paragraph::new(text), description);

    let state = if session.is_playing() { "playing" } else { "paused" };
    frame.render_widget(
        Paragraph::new(format!(
            "{state}  speed {}",
            Speed::label(session.speed_ms())
        )),
        speed,
    );

    let input_line = match (&app.mode, &app.status) {
        (Mode::Editing(buffer), status) => {
            let mut spans = vec![
                Span::styled("heights> ", Style::default().fg(Color::Yellow)),
                Span::raw(buffer.clone()),
                Span::styled("_", Style::default().add_modifier(Modifier::SLOW_BLINK)),
            ];
            if let Some(Status::Error(msg)) = status {
                spans.push(Span::styled(
                    format!("   {msg}"),
                    Style::default().fg(Color::Red),
                ));
            }
            Line::from(spans)
        }
        (Mode::Normal, Some(Status::Info(msg))) => {
            Line::from(Span::styled(msg.clone(), Style::default().fg(Color::Gray)))
        }
        (Mode::Normal, Some(Status::Error(msg))) => {
            Line::from(Span::styled(msg.clone(), Style::default().fg(Color::Red)))
        }
        (Mode::Normal, None) => Line::default(),
    };
    frame.render_widget(Paragraph::new(input_line), input);

    frame.render_widget(
        Paragraph::new(
            "space play/pause | ←→ step | home/end | r reset | +/- speed | n random | e edit | q quit",
        )
        .style(Style::default().fg(Color::DarkGray)),
        help,
    );
}
