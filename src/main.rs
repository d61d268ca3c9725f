//! Plinko Sim entry point
//!
//! Builds a scenario, runs it to its loop threshold and prints the state of
//! every ball after every tick.

use std::io::{BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use glam::Vec2;
use serde::Serialize;

use plinko_sim::consts::MAX_ACTIVE_BALLS;
use plinko_sim::sim::{BallSnapshot, ContactEvent, TickReport};
use plinko_sim::{Scenario, Scoreboard, ScreenTransform};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Preset {
    /// Single ball in a narrow box, no pins
    Classic,
    /// Tall board with a staggered pin grid and seeded drops
    Board,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// One human-readable line per ball per tick
    Text,
    /// One JSON object per tick
    Json,
    /// Only the final summary
    Summary,
}

#[derive(Parser, Debug)]
#[command(name = "plinko-sim")]
#[command(about = "Run a plinko board simulation and print per-tick ball state", long_about = None)]
struct Cli {
    /// Scenario JSON file (overrides --preset)
    #[arg(long)]
    scenario: Option<PathBuf>,

    /// Built-in scenario
    #[arg(long, value_enum, default_value = "classic")]
    preset: Preset,

    /// Number of dropped balls (board preset)
    #[arg(long, default_value_t = MAX_ACTIVE_BALLS)]
    balls: usize,

    /// RNG seed for ball drops (board preset)
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Override the scenario's tick count
    #[arg(long)]
    ticks: Option<u64>,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    format: Format,

    /// Also report screen coordinates for a window of this height
    #[arg(long)]
    window_height: Option<f32>,

    /// Print the resolved scenario as JSON and exit
    #[arg(long)]
    dump_scenario: bool,
}

/// One ball's line in JSON output
#[derive(Serialize)]
struct BallLine {
    #[serde(flatten)]
    snapshot: BallSnapshot,
    #[serde(skip_serializing_if = "Option::is_none")]
    screen: Option<Vec2>,
}

/// One tick in JSON output
#[derive(Serialize)]
struct TickLine<'a> {
    tick: u64,
    balls: Vec<BallLine>,
    contacts: &'a [ContactEvent],
}

fn load_scenario(cli: &Cli) -> Result<Scenario> {
    let mut scenario = match &cli.scenario {
        Some(path) => Scenario::load(path)
            .with_context(|| format!("failed to load scenario {}", path.display()))?,
        None => match cli.preset {
            Preset::Classic => Scenario::classic(),
            Preset::Board => Scenario::board(cli.seed, cli.balls),
        },
    };
    if let Some(ticks) = cli.ticks {
        scenario.config.loop_threshold = ticks;
    }
    Ok(scenario)
}

fn write_text(
    out: &mut impl Write,
    report: &TickReport,
    screen: Option<&ScreenTransform>,
) -> Result<()> {
    for ball in &report.balls {
        write!(
            out,
            "{}\t | \tBall {}: Position: ({:.5}, {:.5}) Velocity: ({:.5}, {:.5})",
            report.tick, ball.index, ball.pos.x, ball.pos.y, ball.vel.x, ball.vel.y
        )?;
        if let Some(t) = screen {
            let p = t.to_screen(ball.pos);
            write!(out, " Screen: ({:.1}, {:.1})", p.x, p.y)?;
        }
        writeln!(out)?;
    }
    Ok(())
}

fn write_json(
    out: &mut impl Write,
    report: &TickReport,
    screen: Option<&ScreenTransform>,
) -> Result<()> {
    let line = TickLine {
        tick: report.tick,
        balls: report
            .balls
            .iter()
            .map(|&snapshot| BallLine {
                snapshot,
                screen: screen.map(|t| t.to_screen(snapshot.pos)),
            })
            .collect(),
        contacts: &report.contacts,
    };
    serde_json::to_writer(&mut *out, &line)?;
    writeln!(out)?;
    Ok(())
}

fn run(cli: &Cli) -> Result<()> {
    let scenario = load_scenario(cli)?;

    if cli.dump_scenario {
        println!("{}", scenario.to_json_string()?);
        return Ok(());
    }

    let mut sim = scenario.build().context("invalid scenario")?;
    let screen = cli
        .window_height
        .map(|h| ScreenTransform::fit_height(scenario.config.arena, h))
        .transpose()
        .context("invalid window size")?;
    let slots = scenario.goal_slots();
    let mut scoreboard = Scoreboard::new();

    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let mut write_result: Result<()> = Ok(());

    sim.run(|report| {
        scoreboard.record(&slots, report);
        if write_result.is_err() {
            return;
        }
        write_result = match cli.format {
            Format::Text => write_text(&mut out, report, screen.as_ref()),
            Format::Json => write_json(&mut out, report, screen.as_ref()),
            Format::Summary => Ok(()),
        };
    });
    write_result.context("failed to write output")?;

    let summary = format!(
        "Finished {} ticks: {} of {} balls landed, score {}",
        sim.ticks(),
        scoreboard.landings.len(),
        sim.store().balls().len(),
        scoreboard.total
    );
    match cli.format {
        // Keep stdout machine-readable
        Format::Json => log::info!("{}", summary),
        Format::Text | Format::Summary => writeln!(out, "{}", summary)?,
    }
    out.flush()?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    run(&cli)
}
