#![warn(clippy::pedantic)]
#![deny(missing_debug_implementations, nonstandard_style)]

use anyhow::Result;
use arc_hardware::{AsyncDevice, MemoryDevice};
use arc_input::Command;
use arc_progress::{
    render::{scheduler::Scheduler, script},
    settings::{self, DemoSettings},
    ArcProgressView,
};
use arc_simulator::TerminalDisplay;
#[cfg(feature = "window")]
use arc_simulator::WindowDisplay;
use clap::{ArgAction, Parser};
use embedded_graphics::geometry::Size;
use futures::Stream;
use log::{info, warn, LevelFilter};
use simplelog::{Config as LoggerConfig, SimpleLogger};
use std::path::PathBuf;
use tokio::sync::broadcast;

#[derive(Parser, Debug)]
#[clap(version, about = "An animated arc progress view")]
struct Opts {
    /// A level of verbosity, and can be used multiple times
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
    /// Settings file applied on top of the default locations
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Render into memory instead of onto a display
    #[arg(long)]
    headless: bool,
    /// Stop after rendering this many frames
    #[arg(long)]
    frames: Option<usize>,
    /// Open an SDL window instead of drawing into the terminal
    #[cfg(feature = "window")]
    #[arg(long)]
    window: bool,
}

impl Opts {
    fn uses_terminal(&self) -> bool {
        #[cfg(feature = "window")]
        if self.window {
            return false;
        }
        !self.headless
    }
}

async fn run<T: AsyncDevice>(
    mut device: T,
    size: Size,
    frames: Option<usize>,
    view: &mut ArcProgressView,
    rx: broadcast::Receiver<Command>,
    script: impl Stream<Item = Command>,
) -> Result<T> {
    device.clear().await?;

    let mut scheduler = Scheduler::new(device, size);
    if let Some(frames) = frames {
        scheduler = scheduler.with_frame_limit(frames);
    }
    scheduler.start(view, rx, script).await?;
    Ok(scheduler.into_device())
}

#[tokio::main]
pub async fn main() -> Result<()> {
    let opts: Opts = Opts::parse();

    // Log lines would tear through the picture in the terminal.
    let filter = match opts.verbose {
        0 if opts.uses_terminal() => LevelFilter::Warn,
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    SimpleLogger::init(filter, LoggerConfig::default())?;

    let settings = settings::load(opts.config.as_deref())?;
    let description = settings::view_description(&settings)?;
    let demo = DemoSettings::from_config(&settings)?;
    let size = settings::display_size(&settings);

    let mut view = ArcProgressView::from_description(&description)?;
    info!(
        "Showing a {}x{} progress view on a {}x{} display",
        view.frame().size.width,
        view.frame().size.height,
        size.width,
        size.height
    );

    // This channel is used to send commands to the scheduler
    let (tx, rx) = broadcast::channel::<Command>(100);
    let interrupt = tx.clone();
    ctrlc::set_handler(move || {
        info!("Ctrl + C received, shutting down!");
        if interrupt.send(Command::Shutdown).is_err() {
            warn!("Nothing is listening for the shutdown signal");
        }
    })?;

    let script = script::demo(&demo);

    if opts.headless {
        let device = run(MemoryDevice::new(), size, opts.frames, &mut view, rx, script).await?;
        info!(
            "Rendered {} frames, final progress {:.3}",
            device.frames(),
            view.presentation_progress()
        );
        return Ok(());
    }

    #[cfg(feature = "window")]
    if opts.window {
        let device = WindowDisplay::connect(size, tx.clone());
        run(device, size, opts.frames, &mut view, rx, script).await?;
        return Ok(());
    }

    let device = TerminalDisplay::connect(tx)?;
    run(device, size, opts.frames, &mut view, rx, script).await?;
    Ok(())
}
