use std::path::PathBuf;

use anyhow::{Context, Result, bail};

pub const USAGE: &str = "\
Usage: water-trace [OPTIONS] [HEIGHTS]

Step through the two-pointer scan for \"container with most water\".

Arguments:
  HEIGHTS              Comma-separated bar heights, e.g. 1,8,6,2,5,4,8,3,7

Options:
  --speed <MS>         Milliseconds per autoplay step (default 800)
  --random             Start with a random array
  --seed <N>           Seed for the randomizer
  --config <FILE>      Load settings from a JSON file
  --dump               Print the frame trace as JSON and exit
  --svg <FILE>         Write one frame as SVG and exit
  --frame <N>          Frame to export with --svg (default: last)
  -h, --help           Show this help

Keys:
  space play/pause   <-/-> step   home/end jump   r reset
  +/- speed          n random     e edit heights  q quit";

#[derive(Debug, Default, PartialEq, Eq)]
pub struct Args {
    pub heights: Option<String>,
    pub speed_ms: Option<u64>,
    pub random: bool,
    pub seed: Option<u64>,
    pub config: Option<PathBuf>,
    pub dump: bool,
    pub svg: Option<PathBuf>,
    pub frame: Option<usize>,
    pub help: bool,
}

impl Args {
    /// Parse arguments, excluding the program name.
    pub fn parse<I>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let mut out = Args::default();
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "-h" | "--help" => out.help = true,
                "--random" => out.random = true,
                "--dump" => out.dump = true,
                "--speed" => {
                    let v = value(&mut args, "--speed")?;
                    out.speed_ms = Some(v.parse().with_context(|| format!("invalid --speed `{v}`"))?);
                }
                "--seed" => {
                    let v = value(&mut args, "--seed")?;
                    out.seed = Some(v.parse().with_context(|| format!("invalid --seed `{v}`"))?);
                }
                "--frame" => {
                    let v = value(&mut args, "--frame")?;
                    out.frame = Some(v.parse().with_context(|| format!("invalid --frame `{v}`"))?);
                }
                "--config" => out.config = Some(PathBuf::from(value(&mut args, "--config")?)),
                "--svg" => out.svg = Some(PathBuf::from(value(&mut args, "--svg")?)),
                flag if flag.starts_with("--") => bail!("unknown option `{flag}`"),
                _ => {
                    if out.heights.is_some() {
                        bail!("unexpected argument `{arg}`");
                    }
                    out.heights = Some(arg);
                }
            }
        }

        if out.random && out.heights.is_some() {
            bail!("--random cannot be combined with explicit heights");
        }
        Ok(out)
    }
}

fn value(args: &mut impl Iterator<Item = String>, flag: &str) -> Result<String> {
    args.next()
        .with_context(|| format!("{flag} requires a value"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Args> {
        Args::parse(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn empty_is_default() {
        assert_eq!(parse(&[]).ok(), Some(Args::default()));
    }

    #[test]
    fn heights_and_flags() {
        let args = parse(&["--speed", "300", "4,3,2,1,4", "--svg", "out.svg", "--frame", "2"])
            .unwrap_or_default();
        assert_eq!(args.heights.as_deref(), Some("4,3,2,1,4"));
        assert_eq!(args.speed_ms, Some(300));
        assert_eq!(args.svg, Some(PathBuf::from("out.svg")));
        assert_eq!(args.frame, Some(2));
    }

    #[test]
    fn missing_value() {
        let err = parse(&["--speed"]).err().map(|e| e.to_string());
        assert_eq!(err.as_deref(), Some("--speed requires a value"));
    }

    #[test]
    fn rejects_unknown_and_conflicts() {
        assert!(parse(&["--fast"]).is_err());
        assert!(parse(&["--random", "1,2"]).is_err());
        assert!(parse(&["1,2", "3,4"]).is_err());
        assert!(parse(&["--seed", "abc"]).is_err());
    }
}
