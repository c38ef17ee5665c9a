use std::{
    fs::File,
    io::BufWriter,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{ArgAction, Parser, Subcommand};
use tinsel::{Blender, EngineConfig, FrameSink as _, PixelLayout, RawWrgbWriter, WrgbEncoder};

#[derive(Parser, Debug)]
#[command(name = "tinsel", version)]
struct Cli {
    /// Raise log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the built-in patterns.
    Patterns,
    /// Run the engine against a simulated clock.
    Simulate(SimulateArgs),
    /// Render a PNG strip: one row per frame, one column per LED.
    Preview(PreviewArgs),
}

#[derive(Parser, Debug)]
struct EngineArgs {
    /// LED layout JSON. A synthetic cone is used when omitted.
    #[arg(long)]
    layout: Option<PathBuf>,

    /// Strands in the synthetic cone.
    #[arg(long, default_value_t = 4)]
    strands: usize,

    /// LEDs per strand in the synthetic cone.
    #[arg(long, default_value_t = 100)]
    per_strand: usize,

    /// Engine config JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// RNG seed (overrides the config).
    #[arg(long)]
    seed: Option<u64>,

    /// Opening pattern by name (overrides the config).
    #[arg(long)]
    start: Option<String>,

    /// Hold the opening pattern.
    #[arg(long)]
    pause: bool,
}

#[derive(Parser, Debug)]
struct SimulateArgs {
    #[command(flatten)]
    engine: EngineArgs,

    /// Simulated seconds to run.
    #[arg(long, default_value_t = 120.0)]
    secs: f64,

    /// Frames per second.
    #[arg(long, default_value_t = 30.0)]
    fps: f64,

    /// Append raw WRGB frames (strands back to back) to this file.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct PreviewArgs {
    #[command(flatten)]
    engine: EngineArgs,

    /// Simulated seconds to render.
    #[arg(long, default_value_t = 10.0)]
    secs: f64,

    /// Frames per second.
    #[arg(long, default_value_t = 20.0)]
    fps: f64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match cli.cmd {
        Command::Patterns => cmd_patterns(),
        Command::Simulate(args) => cmd_simulate(args),
        Command::Preview(args) => cmd_preview(args),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_patterns() -> anyhow::Result<()> {
    for pattern in tinsel::builtin_catalog()? {
        println!("{}", pattern.name());
    }
    Ok(())
}

fn read_layout(args: &EngineArgs) -> anyhow::Result<PixelLayout> {
    match &args.layout {
        Some(path) => PixelLayout::from_json_path(path)
            .with_context(|| format!("load layout '{}'", path.display())),
        None => Ok(PixelLayout::synthetic_cone(args.strands, args.per_strand)?),
    }
}

fn read_config(args: &EngineArgs) -> anyhow::Result<EngineConfig> {
    let mut config = match &args.config {
        Some(path) => EngineConfig::from_json_path(path)
            .with_context(|| format!("load config '{}'", path.display()))?,
        None => EngineConfig::default(),
    };
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    if args.start.is_some() {
        config.start_pattern = args.start.clone();
    }
    if args.pause {
        config.pause_change = true;
    }
    Ok(config)
}

fn make_engine(args: &EngineArgs) -> anyhow::Result<(Blender, PixelLayout)> {
    let layout = read_layout(args)?;
    let config = read_config(args)?;
    let blender = Blender::new(tinsel::builtin_catalog()?, &layout, config)?;
    Ok((blender, layout))
}

fn frame_count(secs: f64, fps: f64) -> anyhow::Result<u64> {
    if !(fps > 0.0) || !(secs >= 0.0) {
        anyhow::bail!("need fps > 0 and secs >= 0, got fps={fps} secs={secs}");
    }
    Ok((secs * fps).ceil() as u64)
}

fn create_parent(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    Ok(())
}

fn cmd_simulate(args: SimulateArgs) -> anyhow::Result<()> {
    let (mut blender, layout) = make_engine(&args.engine)?;
    let frames = frame_count(args.secs, args.fps)?;

    let mut sink = match &args.out {
        Some(path) => {
            create_parent(path)?;
            let file = File::create(path)
                .with_context(|| format!("create '{}'", path.display()))?;
            let encoder = WrgbEncoder::new(&layout, blender.config().color_style);
            Some(RawWrgbWriter::new(encoder, BufWriter::new(file)))
        }
        None => None,
    };

    let mut last_name = String::new();
    for i in 0..frames {
        let t = i as f64 / args.fps;
        let frame = blender.render(t);
        let name = blender.pattern_name();
        if name != last_name {
            eprintln!("{t:>8.2}s  {name}");
            last_name = name;
        }
        if let Some(sink) = sink.as_mut() {
            sink.write_frame(&frame)?;
        }
    }

    if let Some(sink) = sink {
        let written = sink.frames_written();
        let mut out = sink.into_inner();
        std::io::Write::flush(&mut out).context("flush frame output")?;
        if let Some(path) = &args.out {
            eprintln!("wrote {written} frames to {}", path.display());
        }
    }
    Ok(())
}

fn cmd_preview(args: PreviewArgs) -> anyhow::Result<()> {
    let (mut blender, layout) = make_engine(&args.engine)?;
    let frames = frame_count(args.secs, args.fps)?;
    let style = blender.config().color_style;

    let width = u32::try_from(layout.len()).context("layout too wide for a PNG")?;
    let height = u32::try_from(frames).context("too many frames for a PNG")?;
    if width == 0 || height == 0 {
        anyhow::bail!("preview would be empty ({width}x{height})");
    }

    let mut data = Vec::with_capacity(layout.len() * frames as usize * 3);
    for i in 0..frames {
        let frame = blender.render(i as f64 / args.fps);
        data.extend(frame.iter().flat_map(|c| c.to_rgb(style)));
    }

    create_parent(&args.out)?;
    image::save_buffer_with_format(
        &args.out,
        &data,
        width,
        height,
        image::ColorType::Rgb8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}
