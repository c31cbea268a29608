use std::{
    collections::BTreeMap,
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use scene_player::{
    FixedStepScheduler, InMemoryMarkerSource, Marker, PreviewOpts, PreviewSession, Scene,
    SilentTrack, SurfaceSize, format_timecode,
};

#[derive(Parser, Debug)]
#[command(name = "scene-player", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the render description of one scene at one time as JSON.
    Eval(EvalArgs),
    /// Simulate playback and print the visible elements once per second.
    Play(PlayArgs),
}

#[derive(Parser, Debug)]
struct SurfaceArgs {
    /// Input project JSON (`{ "scenes": [...], "markers": { "<scene id>": [...] } }`).
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Scene index to open (the first playable scene at or after it is used).
    #[arg(long, default_value_t = 0)]
    scene: usize,

    /// Surface width in pixels.
    #[arg(long, default_value_t = 960.0)]
    width: f64,

    /// Surface height in pixels.
    #[arg(long, default_value_t = 540.0)]
    height: f64,

    /// Optional preview options JSON (partial documents are fine).
    #[arg(long)]
    opts: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct EvalArgs {
    #[command(flatten)]
    surface: SurfaceArgs,

    /// Play-head time in seconds.
    #[arg(long, default_value_t = 0.0)]
    time: f64,
}

#[derive(Parser, Debug)]
struct PlayArgs {
    #[command(flatten)]
    surface: SurfaceArgs,

    /// Simulated frame step in milliseconds.
    #[arg(long, default_value_t = 1000.0 / 60.0)]
    step_ms: f64,

    /// Continue with the next playable scene when one ends.
    #[arg(long, default_value_t = false)]
    through: bool,
}

#[derive(serde::Deserialize)]
struct Project {
    scenes: Vec<Scene>,
    #[serde(default)]
    markers: BTreeMap<String, Vec<Marker>>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Eval(args) => cmd_eval(args),
        Command::Play(args) => cmd_play(args),
    }
}

fn cmd_eval(args: EvalArgs) -> anyhow::Result<()> {
    let mut sess = open_session(&args.surface, 1000.0 / 60.0)?;
    let duration = sess.playhead().duration;
    if duration > 0.0 {
        sess.seek(args.time / duration);
    }
    let desc = sess.render();
    println!("{}", serde_json::to_string_pretty(&desc)?);
    Ok(())
}

fn cmd_play(args: PlayArgs) -> anyhow::Result<()> {
    anyhow::ensure!(
        args.step_ms.is_finite() && args.step_ms > 0.0,
        "--step-ms must be finite and > 0"
    );
    let mut sess = open_session(&args.surface, args.step_ms)?;

    loop {
        let scene_id = sess
            .active_scene()
            .map(|s| s.id.clone())
            .unwrap_or_default();
        println!("scene {scene_id} ({})", format_timecode(sess.playhead().duration));

        sess.toggle_play();
        let mut last_second = None;
        while let Some(desc) = sess.pump() {
            let second = desc.playhead.current_time.floor() as u64;
            if last_second == Some(second) {
                continue;
            }
            last_second = Some(second);
            let ids: Vec<&str> = desc
                .elements
                .iter()
                .map(|e| e.element_id.as_str())
                .collect();
            println!(
                "  {}  {}",
                format_timecode(desc.playhead.current_time),
                ids.join(" ")
            );
        }

        if !args.through || sess.next().is_err() {
            break;
        }
    }

    for notice in sess.notices() {
        eprintln!("notice: {}", notice.message);
    }
    sess.close();
    Ok(())
}

fn open_session(args: &SurfaceArgs, step_ms: f64) -> anyhow::Result<PreviewSession> {
    let project = read_project(&args.in_path)?;
    let opts = match &args.opts {
        Some(path) => {
            let s = std::fs::read_to_string(path)
                .with_context(|| format!("read opts '{}'", path.display()))?;
            PreviewOpts::from_json_str(&s)?
        }
        None => PreviewOpts::default(),
    };

    let mut sess = PreviewSession::new(
        opts,
        Box::new(InMemoryMarkerSource::new(project.markers)),
        Box::new(SilentTrack::default()),
        Box::new(FixedStepScheduler::new(step_ms)),
    )?;
    sess.resize(SurfaceSize::new(args.width, args.height));
    sess.open(project.scenes, args.scene)?;
    Ok(sess)
}

fn read_project(path: &Path) -> anyhow::Result<Project> {
    let f = File::open(path).with_context(|| format!("open project '{}'", path.display()))?;
    let project = serde_json::from_reader(BufReader::new(f))
        .with_context(|| format!("parse project '{}'", path.display()))?;
    Ok(project)
}
