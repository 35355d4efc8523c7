use std::ops::ControlFlow;
use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};

use kinetype::{
    AnimationConfig, CpuSurface, EffectKind, ExportProgress, HorizontalAlign, PngDirSink,
    RasterSurface as _, Rgba8, Rng64, ZipSink,
};

#[derive(Parser, Debug)]
#[command(name = "kinetype", version, about = "Per-character kinetic typography renderer")]
struct Cli {
    /// Log debug output to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List available effects as `id<TAB>name`.
    Effects,
    /// Render a single frame as a PNG.
    Frame(FrameArgs),
    /// Export the full frame sequence as a zip of PNGs (or a directory).
    Export(ExportArgs),
}

#[derive(Args, Debug)]
struct AnimArgs {
    /// Animation config JSON; flags below override its fields.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Text to animate. A literal `\n` starts a new line.
    #[arg(long)]
    text: Option<String>,

    /// Effect id (see `kinetype effects`).
    #[arg(long)]
    effect: Option<String>,

    /// Animation length in seconds.
    #[arg(long)]
    duration: Option<f64>,

    #[arg(long)]
    fps: Option<u32>,

    #[arg(long)]
    font_size: Option<f64>,

    /// Text color as `#rgb`, `#rrggbb` or `#rrggbbaa`.
    #[arg(long)]
    text_color: Option<Rgba8>,

    /// Background color as `#rgb`, `#rrggbb` or `#rrggbbaa`.
    #[arg(long)]
    bg_color: Option<Rgba8>,

    /// Leave the background transparent.
    #[arg(long)]
    transparent: bool,

    /// Line alignment: left, center or right.
    #[arg(long)]
    align: Option<HorizontalAlign>,

    #[arg(long)]
    width: Option<u32>,

    #[arg(long)]
    height: Option<u32>,

    /// Font file to use instead of a system family.
    #[arg(long)]
    font: Option<PathBuf>,

    /// System font family.
    #[arg(long)]
    font_family: Option<String>,

    /// Seed for glitch/flicker randomness.
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Args, Debug)]
struct FrameArgs {
    #[command(flatten)]
    anim: AnimArgs,

    /// Global progress in [0, 1].
    #[arg(long, default_value_t = 1.0)]
    progress: f64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct ExportArgs {
    #[command(flatten)]
    anim: AnimArgs,

    /// Directory receiving `<name>.zip`.
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// Write `<out-dir>/<name>/frame_NNNN.png` instead of a zip archive.
    #[arg(long)]
    frames_dir: bool,

    /// Output base name, sanitized like text-derived names; derived from the text by default.
    #[arg(long)]
    name: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match cli.cmd {
        Command::Effects => cmd_effects(),
        Command::Frame(args) => cmd_frame(args),
        Command::Export(args) => cmd_export(args),
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .init();
}

fn cmd_effects() -> anyhow::Result<()> {
    for d in kinetype::catalog() {
        println!("{}\t{}", d.id, d.display_name);
    }
    Ok(())
}

fn load_config(args: AnimArgs) -> anyhow::Result<AnimationConfig> {
    let mut cfg = match &args.config {
        Some(path) => AnimationConfig::from_path(path)
            .with_context(|| format!("load config '{}'", path.display()))?,
        None => AnimationConfig::default(),
    };

    if let Some(text) = args.text {
        cfg.text = text.replace("\\n", "\n");
    }
    if let Some(effect) = args.effect {
        cfg.effect = effect;
    }
    if let Some(v) = args.duration {
        cfg.duration_secs = v;
    }
    if let Some(v) = args.fps {
        cfg.fps = v;
    }
    if let Some(v) = args.font_size {
        cfg.font_size_px = v;
    }
    if let Some(v) = args.text_color {
        cfg.text_color = v;
    }
    if let Some(v) = args.bg_color {
        cfg.background_color = v;
    }
    if args.transparent {
        cfg.transparent_background = true;
    }
    if let Some(v) = args.align {
        cfg.align = v;
    }
    if let Some(v) = args.width {
        cfg.width = v;
    }
    if let Some(v) = args.height {
        cfg.height = v;
    }
    if let Some(v) = args.font {
        cfg.font_path = Some(v);
    }
    if let Some(v) = args.font_family {
        cfg.font_family = v;
    }
    if args.seed.is_some() {
        cfg.seed = args.seed;
    }

    cfg.validate()?;
    if cfg.effect_kind().is_none() {
        tracing::warn!(
            effect = %cfg.effect,
            fallback = %EffectKind::DEFAULT,
            "unknown effect, using fallback"
        );
    }
    Ok(cfg)
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let cfg = load_config(args.anim)?;
    let mut surface = CpuSurface::from_source(cfg.canvas(), &cfg.font_source())?;
    let mut rng = match cfg.seed {
        Some(seed) => Rng64::new(seed),
        None => Rng64::from_entropy(),
    };

    kinetype::render_frame(
        &mut surface,
        args.progress,
        &cfg.text,
        &cfg.effect,
        &cfg.style(),
        &mut rng,
    );
    let frame = surface.snapshot();

    if let Some(parent) = args.out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    image::save_buffer_with_format(
        &args.out,
        &frame.to_straight_rgba8(),
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_export(args: ExportArgs) -> anyhow::Result<()> {
    let cfg = load_config(args.anim)?;
    let mut surface = CpuSurface::from_source(cfg.canvas(), &cfg.font_source())?;
    let mut job = cfg.export_job();
    job.base_name = args.name;

    let mut observer = |p: &ExportProgress| -> ControlFlow<()> {
        eprintln!(
            "exporting {:>3}% ({}/{})",
            p.percent(),
            p.frame + 1,
            p.total_frames + 1
        );
        ControlFlow::Continue(())
    };

    let (report, out) = if args.frames_dir {
        let mut sink = PngDirSink::new(&args.out_dir);
        let report = kinetype::export_sequence(&mut surface, &job, &mut sink, &mut observer)?;
        (report, output_path(sink.output_dir()))
    } else {
        let mut sink = ZipSink::new(&args.out_dir);
        let report = kinetype::export_sequence(&mut surface, &job, &mut sink, &mut observer)?;
        (report, output_path(sink.archive_path()))
    };

    eprintln!("wrote {} frame(s) to {out}", report.frames_written);
    Ok(())
}

fn output_path(path: Option<&std::path::Path>) -> String {
    path.map_or_else(|| "<unknown>".to_string(), |p| p.display().to_string())
}
