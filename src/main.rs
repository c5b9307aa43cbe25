//! Headless host for the constellation renderer
//!
//! Run with: cargo run --features cli --bin constellation-cli -- --width 1280 --height 720

#[cfg(not(target_arch = "wasm32"))]
mod cli {
    use std::path::PathBuf;

    use anyhow::{bail, Context};

    pub const CONFIG_ENV: &str = "CONSTELLATION_CONFIG";

    #[derive(Debug, PartialEq)]
    pub struct CliArgs {
        pub width: u32,
        pub height: u32,
        pub fps: f64,
        /// Stop after this many frames (run until Ctrl-C when absent)
        pub frames: Option<u64>,
        /// Swap width and height every N frames to exercise resize
        pub resize_every: Option<u64>,
        pub config: Option<PathBuf>,
    }

    impl Default for CliArgs {
        fn default() -> Self {
            Self {
                width: 1280,
                height: 720,
                fps: 60.0,
                frames: None,
                resize_every: None,
                config: None,
            }
        }
    }

    impl CliArgs {
        pub fn parse(args: impl IntoIterator<Item = String>) -> anyhow::Result<Self> {
            let mut parsed = Self::default();
            let mut args = args.into_iter();
            while let Some(flag) = args.next() {
                let mut value = || {
                    args.next()
                        .with_context(|| format!("{flag} expects a value"))
                };
                match flag.as_str() {
                    "--width" => parsed.width = value()?.parse().context("--width")?,
                    "--height" => parsed.height = value()?.parse().context("--height")?,
                    "--fps" => parsed.fps = value()?.parse().context("--fps")?,
                    "--frames" => parsed.frames = Some(value()?.parse().context("--frames")?),
                    "--resize-every" => {
                        parsed.resize_every = Some(value()?.parse().context("--resize-every")?)
                    }
                    "--config" => parsed.config = Some(PathBuf::from(value()?)),
                    other => bail!("unknown argument {other}"),
                }
            }
            if !(parsed.fps.is_finite() && parsed.fps > 0.0) {
                bail!("--fps must be positive, got {}", parsed.fps);
            }
            if parsed.resize_every == Some(0) {
                bail!("--resize-every must be at least 1");
            }
            if parsed.config.is_none() {
                parsed.config = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
            }
            Ok(parsed)
        }
    }

}

#[cfg(not(target_arch = "wasm32"))]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    use std::time::Duration;

    use constellation::core::{
        FieldConfig, FieldRenderer, FpsCounter, FrameReport, ManualScheduler, ParticleField,
        RecordingSurface,
    };
    use constellation::time::now_seconds;
    use serde::Serialize;
    use tracing::{info, trace};
    use tracing_subscriber::{fmt, EnvFilter};

    #[derive(Serialize)]
    struct RunSummary {
        frames: u64,
        resizes: u64,
        width: u32,
        height: u32,
        particles: usize,
        total_links: u64,
        max_links: usize,
        elapsed_secs: f64,
        fps: f64,
        last_frame: FrameReport,
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,constellation=debug"));
    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = cli::CliArgs::parse(std::env::args().skip(1))?;
    let config = match &args.config {
        Some(path) => FieldConfig::load(path)?,
        None => FieldConfig::default(),
    };
    info!(
        width = args.width,
        height = args.height,
        fps = args.fps,
        ?config,
        "Starting headless run"
    );

    let mut renderer = FieldRenderer::new(
        ParticleField::new(config, args.width, args.height),
        RecordingSurface::default(),
        ManualScheduler::default(),
    );

    let start = now_seconds();
    let mut fps = FpsCounter::new(60);
    let mut total_links = 0u64;
    let mut max_links = 0usize;
    let mut resizes = 0u64;
    let mut links_last_interval = 0u64;

    let mut frame_interval = tokio::time::interval(Duration::from_secs_f64(1.0 / args.fps));
    let mut stats_interval = tokio::time::interval(Duration::from_secs(5));
    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    // Kick off the loop the way the browser does: paint once, which requests the next frame
    let mut report = renderer.render_frame();

    loop {
        tokio::select! {
            _ = frame_interval.tick() => {
                if !renderer.scheduler().take_request() {
                    continue;
                }
                if args.frames.is_some_and(|limit| report.frame >= limit) {
                    break;
                }
                if let Some(every) = args.resize_every {
                    if report.frame % every == 0 {
                        let field = renderer.field();
                        let (width, height) = (field.height(), field.width());
                        renderer.resize(width, height);
                        resizes += 1;
                    }
                }

                report = renderer.tick();
                renderer.surface_mut().take_commands();
                fps.tick(now_seconds() * 1000.0);

                total_links += report.links as u64;
                links_last_interval += report.links as u64;
                max_links = max_links.max(report.links);
                trace!(frame = report.frame, links = report.links, "tick");
            }
            _ = stats_interval.tick() => {
                info!(
                    frame = report.frame,
                    particles = report.particles,
                    fps = format!("{:.1}", fps.fps()),
                    links_per_sec = format!("{:.1}", links_last_interval as f64 / 5.0),
                    "stats"
                );
                links_last_interval = 0;
            }
            _ = &mut shutdown => {
                info!("Interrupted");
                break;
            }
        }
    }

    let field = renderer.field();
    let summary = RunSummary {
        frames: report.frame,
        resizes,
        width: field.width(),
        height: field.height(),
        particles: field.particles().len(),
        total_links,
        max_links,
        elapsed_secs: now_seconds() - start,
        fps: fps.fps(),
        last_frame: report,
    };
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {}
