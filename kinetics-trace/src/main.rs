use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tessera_kinetics::{
    DEFAULT_OVERFLING_DISTANCE, DEFAULT_SCROLL_FRICTION, ManualClock, OverScroller, ScrollConfig,
    Scroller,
};
use tracing::debug;

mod output;
mod trace;

use trace::Trace;

#[derive(Parser)]
#[command(name = "kinetics-trace")]
#[command(version, about = "Replay scroll gestures through the tessera kinetics engine", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fling from a start position with a release velocity
    Fling(FlingArgs),
    /// Spring back into bounds from an overscrolled position
    SpringBack(SpringBackArgs),
    /// Scripted scroll by a fixed distance
    Scroll(ScrollArgs),
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

#[derive(Args)]
struct EngineArgs {
    /// Screen density scale factor (1.0 = 160 dpi)
    #[arg(long, default_value_t = 1.0)]
    density: f32,
    /// Default overscroll allowance, in density-independent pixels
    #[arg(long, default_value_t = DEFAULT_OVERFLING_DISTANCE)]
    overfling: f32,
    /// Fling friction coefficient
    #[arg(long, default_value_t = DEFAULT_SCROLL_FRICTION)]
    friction: f32,
    /// Disable flywheel continuation
    #[arg(long)]
    no_flywheel: bool,
    /// Use the scroller without overscroll
    #[arg(long)]
    simple: bool,
    /// Milliseconds between sampled frames
    #[arg(long, default_value_t = 16, value_parser = clap::value_parser!(i64).range(1..))]
    step_ms: i64,
    /// Stop after this many frames
    #[arg(long, default_value_t = 2_000)]
    max_frames: usize,
    /// Output format
    #[arg(long, value_enum, default_value = "table")]
    format: OutputFormat,
}

impl EngineArgs {
    fn config(&self) -> ScrollConfig {
        ScrollConfig::default()
            .density(self.density)
            .friction(self.friction)
            .overfling_distance(self.overfling)
            .flywheel(!self.no_flywheel)
    }
}

/// Content bounds, in px.
#[derive(Args)]
struct Bounds {
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    min_x: i32,
    #[arg(long, default_value_t = 10_000, allow_hyphen_values = true)]
    max_x: i32,
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    min_y: i32,
    #[arg(long, default_value_t = 10_000, allow_hyphen_values = true)]
    max_y: i32,
}

#[derive(Args)]
struct FlingArgs {
    /// Start x offset
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    x: i32,
    /// Start y offset
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    y: i32,
    /// Release velocity along x, in px/s
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    velocity_x: f32,
    /// Release velocity along y, in px/s
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    velocity_y: f32,
    #[command(flatten)]
    bounds: Bounds,
    /// Allowed overscroll along x, in px (defaults to the overfling distance)
    #[arg(long)]
    over_x: Option<i32>,
    /// Allowed overscroll along y, in px (defaults to the overfling distance)
    #[arg(long)]
    over_y: Option<i32>,
    #[command(flatten)]
    engine: EngineArgs,
}

#[derive(Args)]
struct SpringBackArgs {
    /// Start x offset
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    x: i32,
    /// Start y offset
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    y: i32,
    #[command(flatten)]
    bounds: Bounds,
    #[command(flatten)]
    engine: EngineArgs,
}

#[derive(Args)]
struct ScrollArgs {
    /// Start x offset
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    x: i32,
    /// Start y offset
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    y: i32,
    /// Distance to scroll along x
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    dx: i32,
    /// Distance to scroll along y
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    dy: i32,
    /// Duration in milliseconds (defaults to the configured scroll duration)
    #[arg(long)]
    duration: Option<i32>,
    #[command(flatten)]
    engine: EngineArgs,
}

fn init_tracing() {
    let filter = match tracing_subscriber::EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => match tracing_subscriber::EnvFilter::try_new("warn,tessera_kinetics=info") {
            Ok(filter) => filter,
            Err(_) => tracing_subscriber::EnvFilter::new("warn"),
        },
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn overscroller(engine: &EngineArgs, clock: &ManualClock) -> Result<OverScroller<ManualClock>> {
    OverScroller::with_config(engine.config(), clock.clone())
        .context("invalid scroll configuration")
}

fn scroller(engine: &EngineArgs, clock: &ManualClock) -> Result<Scroller<ManualClock>> {
    Scroller::with_config(engine.config(), clock.clone()).context("invalid scroll configuration")
}

/// Explicit allowance in px, or the configured overfling distance.
fn overscroll_allowance(requested: Option<i32>, config: &ScrollConfig) -> i32 {
    requested.unwrap_or_else(|| config.overfling_px())
}

fn fling(args: &FlingArgs, clock: &ManualClock) -> Result<Trace> {
    let FlingArgs {
        x,
        y,
        velocity_x,
        velocity_y,
        ref bounds,
        over_x,
        over_y,
        ref engine,
    } = *args;

    if engine.simple {
        if over_x.is_some() || over_y.is_some() {
            output::warn("overscroll is ignored by the simple scroller");
        }
        let mut scroller = scroller(engine, clock)?;
        scroller.fling(
            x,
            y,
            velocity_x,
            velocity_y,
            bounds.min_x,
            bounds.max_x,
            bounds.min_y,
            bounds.max_y,
        );
        return Ok(trace::record(
            &mut scroller,
            clock,
            engine.step_ms,
            engine.max_frames,
        ));
    }

    let config = engine.config();
    let (over_x, over_y) = (
        overscroll_allowance(over_x, &config),
        overscroll_allowance(over_y, &config),
    );
    debug!(over_x, over_y, "overscroll allowance");

    let mut scroller = overscroller(engine, clock)?;
    scroller.fling_with_overscroll(
        x,
        y,
        velocity_x,
        velocity_y,
        bounds.min_x,
        bounds.max_x,
        bounds.min_y,
        bounds.max_y,
        over_x,
        over_y,
    );
    Ok(trace::record(
        &mut scroller,
        clock,
        engine.step_ms,
        engine.max_frames,
    ))
}

fn spring_back(args: &SpringBackArgs, clock: &ManualClock) -> Result<Trace> {
    let SpringBackArgs {
        x,
        y,
        ref bounds,
        ref engine,
    } = *args;

    if engine.simple {
        bail!("the simple scroller cannot spring back; drop --simple");
    }

    let mut scroller = overscroller(engine, clock)?;
    if !scroller.spring_back(x, y, bounds.min_x, bounds.max_x, bounds.min_y, bounds.max_y) {
        output::status("Skipped", "start position is already within bounds");
    }
    Ok(trace::record(
        &mut scroller,
        clock,
        engine.step_ms,
        engine.max_frames,
    ))
}

fn scroll(args: &ScrollArgs, clock: &ManualClock) -> Result<Trace> {
    let engine = &args.engine;
    if let Some(duration) = args.duration
        && duration <= 0
    {
        bail!("--duration must be positive, got {duration}");
    }

    if engine.simple {
        let mut scroller = scroller(engine, clock)?;
        match args.duration {
            Some(duration) => {
                scroller.start_scroll_with_duration(args.x, args.y, args.dx, args.dy, duration)
            }
            None => scroller.start_scroll(args.x, args.y, args.dx, args.dy),
        }
        return Ok(trace::record(
            &mut scroller,
            clock,
            engine.step_ms,
            engine.max_frames,
        ));
    }

    let mut scroller = overscroller(engine, clock)?;
    match args.duration {
        Some(duration) => {
            scroller.start_scroll_with_duration(args.x, args.y, args.dx, args.dy, duration)
        }
        None => scroller.start_scroll(args.x, args.y, args.dx, args.dy),
    }
    Ok(trace::record(
        &mut scroller,
        clock,
        engine.step_ms,
        engine.max_frames,
    ))
}

fn main() -> Result<()> {
    init_tracing();
    let Cli { command } = Cli::parse();

    let clock = ManualClock::new();
    let (trace, format) = match &command {
        Commands::Fling(args) => (fling(args, &clock)?, args.engine.format),
        Commands::SpringBack(args) => (spring_back(args, &clock)?, args.engine.format),
        Commands::Scroll(args) => (scroll(args, &clock)?, args.engine.format),
    };
    debug!(frames = trace.frames.len(), "trace recorded");

    match format {
        OutputFormat::Table => output::print_table(&trace),
        OutputFormat::Json => output::print_json(&trace)?,
    }
    output::summarize(&trace);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        let mut argv = vec!["kinetics-trace"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).expect("valid arguments")
    }

    #[test]
    fn test_overscroll_defaults_to_overfling_distance() {
        let config = ScrollConfig::default().density(2.0);
        assert_eq!(overscroll_allowance(None, &config), 12);
        assert_eq!(overscroll_allowance(Some(40), &config), 40);
        assert_eq!(overscroll_allowance(Some(0), &config), 0);

        let config = config.overfling_distance(20.0);
        assert_eq!(overscroll_allowance(None, &config), 40);
    }

    #[test]
    fn test_fling_past_edge_overshoots_by_default() {
        let Commands::Fling(args) = parse(&[
            "fling",
            "--x",
            "90",
            "--velocity-x",
            "4000",
            "--max-x",
            "100",
            "--max-y",
            "0",
        ])
        .command
        else {
            panic!("expected the fling command");
        };

        let clock = ManualClock::new();
        let trace = fling(&args, &clock).expect("fling trace");
        let peak = trace.frames.iter().map(|frame| frame.x).max();
        assert!(trace.frames.iter().any(|frame| frame.over_scrolled));
        assert!(peak.is_some_and(|x| x > 100 && x <= 106));
        assert_eq!(trace.frames.last().map(|frame| frame.x), Some(100));
    }

    #[test]
    fn test_zero_overscroll_stays_within_bounds() {
        let Commands::Fling(args) = parse(&[
            "fling",
            "--x",
            "90",
            "--velocity-x",
            "4000",
            "--max-x",
            "100",
            "--max-y",
            "0",
            "--over-x",
            "0",
        ])
        .command
        else {
            panic!("expected the fling command");
        };

        let clock = ManualClock::new();
        let trace = fling(&args, &clock).expect("fling trace");
        assert!(trace.frames.iter().all(|frame| frame.x <= 100));
    }
}
