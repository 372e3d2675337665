use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "tickdown", version)]
struct Cli {
    /// Extra directory of `ttf`/`otf`/`ttc` fonts for the rasterizer.
    #[arg(long, global = true)]
    fonts: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a still PNG.
    Still(OutArgs),
    /// Render a looping GIF.
    Animate(AnimateArgs),
    /// Print the JSON scene of one tick.
    Scene(SceneArgs),
}

#[derive(Args, Debug)]
struct ParamArgs {
    /// Request query string, e.g. `to=2026-12-31&tz=Europe/Berlin&w=600`.
    #[arg(long, short = 'q')]
    query: Option<String>,

    /// Single `key=value` parameter; repeatable, applied after `--query`.
    #[arg(long = "param", short = 'p', value_parser = parse_param)]
    params: Vec<(String, String)>,
}

#[derive(Args, Debug)]
struct OutArgs {
    #[command(flatten)]
    params: ParamArgs,

    /// Output path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct AnimateArgs {
    #[command(flatten)]
    out: OutArgs,

    /// Rasterize frames in parallel.
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Override rayon worker threads (parallel mode only).
    #[arg(long)]
    threads: Option<usize>,
}

#[derive(Args, Debug)]
struct SceneArgs {
    #[command(flatten)]
    params: ParamArgs,

    /// Resolve against the animated profile.
    #[arg(long, default_value_t = false)]
    animated: bool,

    /// Tick to print (animated only).
    #[arg(long, default_value_t = 0)]
    tick: u64,
}

fn parse_param(s: &str) -> Result<(String, String), String> {
    tickdown::RawParams::parse_pair(s).ok_or_else(|| format!("expected key=value, got '{s}'"))
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Still(args) => cmd_still(args, cli.fonts.as_deref()),
        Command::Animate(args) => cmd_animate(args, cli.fonts.as_deref()),
        Command::Scene(args) => cmd_scene(args),
    }
}

fn raw_params(args: &ParamArgs) -> tickdown::RawParams {
    let mut raw = args
        .query
        .as_deref()
        .map(tickdown::RawParams::from_query)
        .unwrap_or_default();
    raw.extend(tickdown::RawParams::from_pairs(args.params.iter().cloned()));
    raw
}

fn make_rasterizer(fonts: Option<&Path>) -> tickdown::SvgRasterizer {
    tickdown::SvgRasterizer::with_font_dirs(fonts)
}

fn cmd_still(args: OutArgs, fonts: Option<&Path>) -> anyhow::Result<()> {
    let now = chrono::Utc::now();
    let cfg = tickdown::resolve(
        &raw_params(&args.params),
        &tickdown::ProfileLimits::still(),
        now,
    );
    let out = tickdown::render_still(
        &cfg,
        now,
        &make_rasterizer(fonts),
        &tickdown::PngStillEncoder,
    )?;
    write_output(&args.out, &out)
}

fn cmd_animate(args: AnimateArgs, fonts: Option<&Path>) -> anyhow::Result<()> {
    let now = chrono::Utc::now();
    let cfg = tickdown::resolve(
        &raw_params(&args.out.params),
        &tickdown::ProfileLimits::animated(),
        now,
    );
    let threading = tickdown::RenderThreading {
        parallel: args.parallel,
        threads: args.threads,
    };
    let out = tickdown::render_animated(
        &cfg,
        now,
        &make_rasterizer(fonts),
        &tickdown::GifSequenceEncoder,
        &threading,
    )?;
    write_output(&args.out.out, &out)
}

fn cmd_scene(args: SceneArgs) -> anyhow::Result<()> {
    let now = chrono::Utc::now();
    let limits = if args.animated {
        tickdown::ProfileLimits::animated()
    } else {
        tickdown::ProfileLimits::still()
    };
    let cfg = tickdown::resolve(&raw_params(&args.params), &limits, now);

    let scene = match tickdown::build_sequence(&cfg, now) {
        Some(seq) => {
            let last = seq.frames.len().saturating_sub(1);
            let idx = usize::try_from(args.tick).unwrap_or(usize::MAX).min(last);
            seq.frames
                .into_iter()
                .nth(idx)
                .map(|f| f.scene)
                .context("sequence has no frames")?
        }
        None => tickdown::still_scene(&cfg, now),
    };

    println!("{}", serde_json::to_string_pretty(&scene)?);
    Ok(())
}

fn write_output(path: &Path, out: &tickdown::RenderedImage) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(path, &out.bytes).with_context(|| format!("write '{}'", path.display()))?;

    for (name, value) in out.headers() {
        eprintln!("{name}: {value}");
    }
    eprintln!(
        "wrote {} ({} frame(s), {} bytes)",
        path.display(),
        out.frame_count,
        out.bytes.len()
    );
    Ok(())
}
