use std::{
    path::{Path, PathBuf},
    sync::Arc,
    time::Duration,
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use rayon::prelude::*;

/// One animation frame at 60 Hz.
const TICK: Duration = Duration::from_millis(16);
/// Upper bound on ticks spent settling the spring before snapping.
const MAX_SETTLE_TICKS: usize = 600;

#[derive(Parser, Debug)]
#[command(name = "scrollframe", version)]
struct Cli {
    /// Raise log verbosity (`-v` info, `-vv` debug). Logs go to stderr.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the frame shown at one scroll position as a PNG.
    Frame(FrameArgs),
    /// Render evenly spaced scroll positions from 0 to 1 as numbered PNGs.
    Scrub(ScrubArgs),
    /// Print the frame and visible beats for a scroll position as JSON.
    Inspect(InspectArgs),
}

#[derive(clap::Args, Debug)]
struct SceneArgs {
    /// Input scene JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Fetch frames over HTTP relative to this base URL instead of from disk.
    #[arg(long)]
    base_url: Option<String>,
}

#[derive(clap::Args, Debug)]
struct ViewportArgs {
    /// Viewport width in CSS pixels.
    #[arg(long, default_value_t = 1280.0)]
    width: f64,

    /// Viewport height in CSS pixels.
    #[arg(long, default_value_t = 720.0)]
    height: f64,

    /// Device pixel ratio.
    #[arg(long, default_value_t = 1.0)]
    dpr: f64,
}

impl ViewportArgs {
    fn viewport(&self) -> anyhow::Result<scrollframe::Viewport> {
        Ok(scrollframe::Viewport::new(self.width, self.height, self.dpr)?)
    }
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    scene: SceneArgs,

    #[command(flatten)]
    viewport: ViewportArgs,

    /// Scroll progress in [0, 1].
    #[arg(long)]
    progress: f64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct ScrubArgs {
    #[command(flatten)]
    scene: SceneArgs,

    #[command(flatten)]
    viewport: ViewportArgs,

    /// Number of intervals; `steps + 1` frames are written.
    #[arg(long, default_value_t = 10)]
    steps: u32,

    /// Output directory for `frame_NNNN.png`.
    #[arg(long)]
    out_dir: PathBuf,
}

#[derive(Parser, Debug)]
struct InspectArgs {
    /// Input scene JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Scroll progress in [0, 1].
    #[arg(long)]
    progress: f64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args).await,
        Command::Scrub(args) => cmd_scrub(args).await,
        Command::Inspect(args) => cmd_inspect(args),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        _ => tracing::Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn load_scene(path: &Path) -> anyhow::Result<scrollframe::Scene> {
    let scene = scrollframe::Scene::from_path(path)?;
    scene
        .validate()
        .with_context(|| format!("validate scene '{}'", path.display()))?;
    Ok(scene)
}

/// A mounted player plus the signals that drive it.
struct Session {
    player: scrollframe::FrameSequencePlayer<scrollframe::CpuSurface, ()>,
    progress: scrollframe::ManualProgress,
}

impl Session {
    async fn open(scene_args: &SceneArgs, viewport: scrollframe::Viewport) -> anyhow::Result<Self> {
        let scene = load_scene(&scene_args.in_path)?;
        let config = scene.player_config()?;
        let progress = scrollframe::ManualProgress::new(0.0);
        let signal = scrollframe::ViewportSignal::new(viewport);
        let inputs = scrollframe::PlayerInputs {
            progress: scrollframe::ProgressSource::subscribe(&progress),
            viewport: signal.subscribe(),
        };
        let surface = scrollframe::CpuSurface::new(viewport.surface_size());

        let mut player = match &scene_args.base_url {
            Some(base) => scrollframe::FrameSequencePlayer::mount(
                config,
                surface,
                inputs,
                Arc::new(scrollframe::HttpFetcher::new(base.clone())),
                (),
            )?,
            None => {
                let root = scene_args
                    .in_path
                    .parent()
                    .unwrap_or_else(|| Path::new("."));
                scrollframe::FrameSequencePlayer::mount(
                    config,
                    surface,
                    inputs,
                    Arc::new(scrollframe::FsFetcher::new(root)),
                    (),
                )?
            }
        };

        player.wait_until_ready().await;
        let frames = player.frame_set();
        tracing::info!(
            page = %scene.page,
            loaded = frames.loaded_count(),
            total = frames.len(),
            "scene ready"
        );
        for index in frames.missing() {
            tracing::warn!(index = index.0, url = %scene.frame_url(index), "frame unavailable");
        }
        Ok(Self { player, progress })
    }

    /// Scroll to `progress`, let the smoothing settle, and return the surface pixels.
    fn render_at(&mut self, progress: f64) -> anyhow::Result<scrollframe::FrameRGBA> {
        self.progress.set(progress);
        let mut ticks = 0;
        while self.player.tick(TICK) && ticks < MAX_SETTLE_TICKS {
            ticks += 1;
        }
        if ticks == MAX_SETTLE_TICKS {
            tracing::debug!(progress, "spring did not settle, snapping");
            self.player.seek(progress);
        }
        let surface = self
            .player
            .surface()
            .with_context(|| format!("render progress {progress}: player has no surface"))?;
        Ok(surface.snapshot())
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.player.unmount();
    }
}

fn write_png(path: &Path, frame: &scrollframe::FrameRGBA) -> anyhow::Result<()> {
    let data = if frame.premultiplied {
        unpremultiply(&frame.data)
    } else {
        frame.data.clone()
    };
    image::save_buffer_with_format(
        path,
        &data,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))
}

fn unpremultiply(data: &[u8]) -> Vec<u8> {
    let mut out = data.to_vec();
    for px in out.chunks_exact_mut(4) {
        let a = u16::from(px[3]);
        if a == 0 || a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            *c = ((u16::from(*c) * 255 + a / 2) / a).min(255) as u8;
        }
    }
    out
}

fn ensure_dir(dir: &Path) -> anyhow::Result<()> {
    std::fs::create_dir_all(dir).with_context(|| format!("create output dir '{}'", dir.display()))
}

async fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let viewport = args.viewport.viewport()?;
    let mut session = Session::open(&args.scene, viewport).await?;
    let frame = session.render_at(args.progress)?;

    if let Some(parent) = args.out.parent() {
        ensure_dir(parent)?;
    }
    write_png(&args.out, &frame)?;

    eprintln!(
        "wrote {} (frame {})",
        args.out.display(),
        session.player.drawn_index().map_or(0, |i| i.0)
    );
    Ok(())
}

async fn cmd_scrub(args: ScrubArgs) -> anyhow::Result<()> {
    let viewport = args.viewport.viewport()?;
    let mut session = Session::open(&args.scene, viewport).await?;

    let steps = args.steps.max(1);
    let frames = (0..=args.steps)
        .map(|k| session.render_at(f64::from(k) / f64::from(steps)))
        .collect::<anyhow::Result<Vec<_>>>()?;

    ensure_dir(&args.out_dir)?;
    frames
        .par_iter()
        .enumerate()
        .try_for_each(|(k, frame)| {
            write_png(&args.out_dir.join(format!("frame_{k:04}.png")), frame)
        })?;

    eprintln!("wrote {} frames to {}", frames.len(), args.out_dir.display());
    Ok(())
}

fn cmd_inspect(args: InspectArgs) -> anyhow::Result<()> {
    let scene = load_scene(&args.in_path)?;
    let progress = scrollframe::clamp_progress(args.progress);
    let index = scrollframe::frame_index_for_progress(progress, scene.frame_count);

    let beats: Vec<_> = scene
        .visible_beats(progress)
        .into_iter()
        .map(|(beat, style)| {
            serde_json::json!({
                "id": beat.id,
                "title": beat.title,
                "subtitle": beat.subtitle,
                "alignment": beat.alignment,
                "style": style,
            })
        })
        .collect();

    let report = serde_json::json!({
        "page": scene.page,
        "progress": progress,
        "frame_index": index.0,
        "frame_url": scene.frame_url(index),
        "beats": beats,
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
