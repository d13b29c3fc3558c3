use std::{
    io::{self, IsTerminal, Stdout},
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use playback::{run_to_completion, Playback, PlaybackError, StepEvent, StepObserver};
use radix_engine::RadixEngine;
use rand::{rngs::StdRng, SeedableRng};
use shared::domain::SortKind;
use tokio::sync::mpsc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod config;
mod input;
mod numbers;
mod render;

use config::{load_settings, Settings};
use input::SessionCommand;
use numbers::{generate_numbers, parse_numbers};
use render::{JsonRenderer, Renderer, TerminalRenderer};

const KEY_HELP: &str =
    "Keys: p pause/resume, c cancel, +/- speed, l LSD, m MSD, g generate, q quit (then Enter)";

#[derive(Debug, Clone, Copy, ValueEnum)]
enum KindArg {
    Lsd,
    Msd,
}

impl From<KindArg> for SortKind {
    fn from(value: KindArg) -> Self {
        match value {
            KindArg::Lsd => SortKind::Lsd,
            KindArg::Msd => SortKind::Msd,
        }
    }
}

#[derive(Parser, Debug)]
#[command(about = "Animate LSD and MSD radix sort in the terminal")]
struct Args {
    /// Radix sort variant for the first run.
    #[arg(long, value_enum, default_value_t = KindArg::Lsd)]
    kind: KindArg,
    /// Explicit input, e.g. "170,45,75,90"; random numbers are generated otherwise.
    #[arg(long)]
    numbers: Option<String>,
    #[arg(long)]
    count: Option<usize>,
    #[arg(long)]
    min: Option<u64>,
    #[arg(long)]
    max: Option<u64>,
    /// Seed for reproducible generated input.
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long)]
    delay_ms: Option<u64>,
    /// Print events as JSON lines instead of bars.
    #[arg(long)]
    json: bool,
    /// Sort once without delays or keyboard input.
    #[arg(long)]
    instant: bool,
    #[arg(long, default_value = config::DEFAULT_CONFIG_PATH)]
    config: PathBuf,
}

fn resolve_settings(args: &Args) -> Result<Settings> {
    let mut settings = load_settings(&args.config)?;
    if let Some(count) = args.count {
        settings.number_count = count;
    }
    if let Some(min) = args.min {
        settings.min_value = min;
    }
    if let Some(max) = args.max {
        settings.max_value = max;
    }
    if let Some(delay) = args.delay_ms {
        settings.sort_delay_ms = delay;
    }
    settings.validate().context("invalid visualizer settings")?;
    Ok(settings)
}

fn build_renderer(json: bool, settings: &Settings) -> Renderer<Stdout> {
    if json {
        return Renderer::Json(JsonRenderer::new(io::stdout()));
    }
    let tty = io::stdout().is_terminal();
    Renderer::Terminal(
        TerminalRenderer::new(io::stdout(), settings.bar_width)
            .with_color(tty)
            .with_clear(tty),
    )
}

fn check_output(renderer: &mut Renderer<Stdout>) -> Result<()> {
    match renderer.take_error() {
        Some(err) => Err(err).context("failed to write to stdout"),
        None => Ok(()),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();
    let args = Args::parse();
    let settings = resolve_settings(&args)?;

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let numbers = match &args.numbers {
        Some(raw) => parse_numbers(raw).context("invalid --numbers")?,
        None => generate_numbers(
            &mut rng,
            settings.number_count,
            settings.min_value,
            settings.max_value,
        ),
    };
    info!(len = numbers.len(), kind = ?args.kind, "visualizer starting");

    let engine = RadixEngine::with_options(numbers, settings.engine_options());
    let mut renderer = build_renderer(args.json, &settings);
    let kind = SortKind::from(args.kind);

    if args.instant {
        return run_instant(engine, kind, &mut renderer);
    }

    let playback = Playback::new(engine, settings.playback_options());
    run_session(playback, kind, &settings, &mut rng, &mut renderer).await
}

fn run_instant(mut engine: RadixEngine, kind: SortKind, renderer: &mut Renderer<Stdout>) -> Result<()> {
    let results = match run_to_completion(&mut engine, kind) {
        Ok(results) => results,
        Err(err) => {
            renderer.report_error(&err);
            return Err(err).context("radix sort failed");
        }
    };
    for (step, result) in results.iter().enumerate() {
        renderer.on_step(&StepEvent::new(kind, step, result));
    }
    renderer.on_status(&format!("{kind} Radix Sort completed."));
    check_output(renderer)
}

async fn run_session(
    mut playback: Playback,
    first: SortKind,
    settings: &Settings,
    rng: &mut StdRng,
    renderer: &mut Renderer<Stdout>,
) -> Result<()> {
    let (playback_tx, mut playback_rx) = mpsc::channel(16);
    let (session_tx, mut session_rx) = mpsc::channel(16);
    let reader = input::spawn_stdin_reader(
        playback_tx,
        session_tx,
        playback.options().sort_delay,
    );

    renderer.on_status(KEY_HELP);
    let mut next = Some(SessionCommand::Start(first));
    loop {
        let command = match next.take() {
            Some(command) => command,
            None => {
                renderer.on_status("Choose l (LSD), m (MSD), g (generate) or q (quit).");
                match session_rx.recv().await {
                    Some(command) => command,
                    None => break,
                }
            }
        };

        match command {
            SessionCommand::Start(kind) => {
                // Drop controls typed while no sort was running.
                while playback_rx.try_recv().is_ok() {}
                match playback.run(kind, renderer, &mut playback_rx).await {
                    Ok(outcome) => info!(?outcome, "run finished"),
                    Err(PlaybackError::Engine(err)) => {
                        warn!(%err, "run rejected");
                        renderer.report_error(&err);
                    }
                }
            }
            SessionCommand::Generate => {
                let numbers = generate_numbers(
                    rng,
                    settings.number_count,
                    settings.min_value,
                    settings.max_value,
                );
                match playback.engine_mut().load(numbers) {
                    Ok(()) => renderer.on_status(&format!(
                        "Ready to sort! {:?}",
                        playback.engine().input()
                    )),
                    Err(err) => renderer.report_error(&err),
                }
            }
            SessionCommand::Quit => break,
        }
        check_output(renderer)?;
    }

    reader.abort();
    check_output(renderer)
}
