use std::{
    fs::File,
    io::{BufWriter, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "codecast", version)]
struct Cli {
    /// Log debug events to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the timeline built from a script as JSON.
    Timeline(TimelineArgs),
    /// Print one resolved frame as JSON.
    Frame(FrameArgs),
    /// Resolve every frame of the video into a JSON-lines file.
    Resolve(ResolveArgs),
    /// Write the built-in demo script.
    Sample(SampleArgs),
}

#[derive(Parser, Debug)]
struct TimelineArgs {
    /// Input script JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Frames per second.
    #[arg(long, default_value_t = 30)]
    fps: i64,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Input script JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Frame index (0-based).
    #[arg(long, allow_negative_numbers = true)]
    frame: i64,

    /// Frames per second.
    #[arg(long, default_value_t = 30)]
    fps: i64,

    /// Panel options JSON (clock periods, terminal log).
    #[arg(long)]
    opts: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct ResolveArgs {
    /// Input script JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output JSON-lines path.
    #[arg(long)]
    out: PathBuf,

    /// Frames per second.
    #[arg(long, default_value_t = 30)]
    fps: i64,

    /// Panel options JSON (clock periods, terminal log).
    #[arg(long)]
    opts: Option<PathBuf>,

    /// Narration audio URL; prints the narration track placement.
    #[arg(long)]
    audio: Option<String>,

    /// Enable frame-level parallelism.
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Override rayon worker threads (parallel mode only).
    #[arg(long)]
    threads: Option<usize>,

    /// Resolve chunk size (parallel mode only).
    #[arg(long, default_value_t = 64)]
    chunk_size: usize,
}

#[derive(Parser, Debug)]
struct SampleArgs {
    /// Output script JSON path.
    #[arg(long)]
    out: PathBuf,

    /// Tutorial title woven into the narration.
    #[arg(long, default_value = "React Components")]
    title: String,

    /// Tutorial topic woven into the narration.
    #[arg(long, default_value = "building a loading button")]
    topic: String,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Timeline(args) => cmd_timeline(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Resolve(args) => cmd_resolve(args),
        Command::Sample(args) => cmd_sample(args),
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn load_timeline(path: &Path, fps: i64) -> anyhow::Result<codecast::Timeline> {
    let script = codecast::Script::from_path(path)?;
    let fps = codecast::Fps::from_signed(fps)?;
    let timeline = codecast::Timeline::from_script(&script, fps)
        .with_context(|| format!("build timeline from '{}'", path.display()))?;
    Ok(timeline)
}

fn load_opts(path: Option<&Path>) -> anyhow::Result<codecast::PanelOpts> {
    let Some(path) = path else {
        return Ok(codecast::PanelOpts::default());
    };
    let f = File::open(path).with_context(|| format!("open options '{}'", path.display()))?;
    Ok(codecast::PanelOpts::from_reader(std::io::BufReader::new(f))?)
}

fn cmd_timeline(args: TimelineArgs) -> anyhow::Result<()> {
    let timeline = load_timeline(&args.in_path, args.fps)?;
    println!("{}", serde_json::to_string_pretty(&timeline)?);
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let timeline = load_timeline(&args.in_path, args.fps)?;
    let opts = load_opts(args.opts.as_deref())?;
    let query = codecast::FrameQuery::new(args.frame, args.fps)?;
    let state = codecast::FrameResolver::resolve(&timeline, query, &opts)?;
    println!("{}", serde_json::to_string_pretty(&state)?);
    Ok(())
}

fn cmd_resolve(args: ResolveArgs) -> anyhow::Result<()> {
    let timeline = load_timeline(&args.in_path, args.fps)?;
    let opts = load_opts(args.opts.as_deref())?;
    let threading = codecast::ResolveThreading {
        parallel: args.parallel,
        chunk_size: args.chunk_size,
        threads: args.threads,
    };

    if let Some(url) = args.audio.as_deref() {
        match codecast::SyncCoordinator::narration_track(&timeline, url) {
            Some(track) => eprintln!("narration: {}", serde_json::to_string(&track)?),
            None => tracing::warn!("empty audio URL; rendering without narration"),
        }
    }

    let (frames, stats) = codecast::resolve_render_range(&timeline, &opts, &threading)?;

    if let Some(parent) = args.out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    let f = File::create(&args.out)
        .with_context(|| format!("create output '{}'", args.out.display()))?;
    let mut w = BufWriter::new(f);
    for state in &frames {
        serde_json::to_writer(&mut w, state)?;
        w.write_all(b"\n")?;
    }
    w.flush()
        .with_context(|| format!("write output '{}'", args.out.display()))?;

    tracing::info!(
        frames = stats.frames_total,
        active = stats.frames_active,
        digest = %stats.digest,
        "resolved"
    );
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_sample(args: SampleArgs) -> anyhow::Result<()> {
    let script = codecast::sample_script(&args.title, &args.topic);
    if let Some(parent) = args.out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(&args.out, script.to_json_pretty()?)
        .with_context(|| format!("write script '{}'", args.out.display()))?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}
