mod app;
mod cli;
mod renderer;

use std::io::Write;

use anyhow::{Context, Result};
use rand::SeedableRng;
use rand::rngs::StdRng;
use water_trace_core::svg::render_svg;
use water_trace_core::views::render_scene;
use water_trace_core::{Config, HeightArray, Player, Session, parse_heights};
use water_trace_protocol::Viewport;

use crate::app::App;
use crate::cli::{Args, USAGE};

const SVG_WIDTH: f64 = 1200.0;
const SVG_HEIGHT: f64 = 500.0;

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse(std::env::args().skip(1))?;
    if args.help {
        eprintln!("{USAGE}");
        return Ok(());
    }

    let config = match &args.config {
        Some(path) => {
            Config::load(path).with_context(|| format!("loading {}", path.display()))?
        }
        None => Config::default(),
    };

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let heights = initial_heights(&args, &config, &mut rng)?;
    let speed_ms = args.speed_ms.unwrap_or(config.speed_ms);
    let session = Session::new(heights).with_speed(speed_ms);
    log::info!(
        "starting with {} heights, {} frames, {speed_ms}ms/step",
        session.heights().len(),
        session.frame_count()
    );

    if args.dump {
        let mut out = std::io::stdout().lock();
        serde_json::to_writer_pretty(&mut out, session.trace()).context("writing trace")?;
        writeln!(out)?;
        return Ok(());
    }

    if let Some(path) = &args.svg {
        let index = args.frame.unwrap_or(session.trace().last_index());
        let frame = session
            .trace()
            .get(index)
            .with_context(|| format!("frame {index} out of range (0..{})", session.frame_count()))?;
        let commands = render_scene(
            session.heights(),
            frame,
            &Viewport::new(SVG_WIDTH, SVG_HEIGHT),
        );
        let svg = render_svg(&commands, SVG_WIDTH, SVG_HEIGHT, config.dark);
        std::fs::write(path, svg).with_context(|| format!("writing {}", path.display()))?;
        return Ok(());
    }

    let mut app = App::new(Player::new(session), config.random, rng);
    renderer::run_tui(&mut app)
}

fn initial_heights(args: &Args, config: &Config, rng: &mut StdRng) -> Result<HeightArray> {
    if let Some(text) = &args.heights {
        return parse_heights(text).with_context(|| format!("invalid heights `{text}`"));
    }
    if args.random {
        return Ok(config.random.sample(rng));
    }
    Ok(config.initial_heights()?)
}
