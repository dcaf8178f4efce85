use crate::view::ArcProgressView;
use anyhow::Result;
use arc_hardware::{AsyncDevice, FrameBuffer};
use arc_input::Command;
use embedded_graphics::{geometry::Size, Drawable};
use futures::{pin_mut, Stream, StreamExt};
use log::{debug, info, warn};
use tokio::{
    sync::broadcast::{self, error::RecvError},
    time::{self, Duration, MissedTickBehavior},
};

pub const TICK_LENGTH: usize = 50;
pub const TICKS_PER_SECOND: usize = 1000 / TICK_LENGTH;

/// Renders a view onto a device at a fixed rate and feeds it commands.
#[derive(Debug)]
pub struct Scheduler<T: AsyncDevice> {
    device: T,
    size: Size,
    frame_limit: Option<usize>,
}

impl<T: AsyncDevice> Scheduler<T> {
    pub fn new(device: T, size: Size) -> Self {
        Self {
            device,
            size,
            frame_limit: None,
        }
    }

    /// Stops after `frames` rendered frames.
    pub fn with_frame_limit(mut self, frames: usize) -> Self {
        self.frame_limit = Some(frames);
        self
    }

    pub fn device(&self) -> &T {
        &self.device
    }

    pub fn into_device(self) -> T {
        self.device
    }

    pub async fn start(
        &mut self,
        view: &mut ArcProgressView,
        mut rx: broadcast::Receiver<Command>,
        script: impl Stream<Item = Command>,
    ) -> Result<()> {
        info!(
            "Rendering at {} frames per second on a {}x{} display",
            TICKS_PER_SECOND, self.size.width, self.size.height
        );

        let mut interval = time::interval(Duration::from_millis(TICK_LENGTH as u64));
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        pin_mut!(script);

        let mut rendered = 0;
        loop {
            tokio::select! {
                cmd = rx.recv() => {
                    match cmd {
                        Ok(Command::Shutdown) | Err(RecvError::Closed) => break,
                        Ok(command) => apply(view, command),
                        Err(RecvError::Lagged(skipped)) => {
                            warn!("Dropped {} commands, the renderer is falling behind", skipped);
                        }
                    }
                },
                Some(command) = script.next() => {
                    if command == Command::Shutdown {
                        break;
                    }
                    apply(view, command);
                },
                _ = interval.tick() => {
                    let mut buffer = FrameBuffer::new(self.size);
                    view.draw(&mut buffer)?;
                    self.device.draw(&buffer).await?;

                    rendered += 1;
                    if self.frame_limit.map_or(false, |limit| rendered >= limit) {
                        info!("Rendered {} frames, stopping", rendered);
                        break;
                    }
                }
            };
        }

        self.device.clear().await?;
        self.device.shutdown().await?;
        Ok(())
    }
}

/// Runs a single command against the view.
pub fn apply(view: &mut ArcProgressView, command: Command) {
    debug!("Applying {:?}", command);
    match command {
        Command::SetProgress { value, animated } => view.set_progress(value, animated),
        Command::Nudge(step) => {
            let target = (view.progress() + step).clamp(0.0, 1.0);
            view.set_progress(target, true);
        }
        Command::Rotate => view.set_orientation(view.orientation().next()),
        Command::ToggleDirection => view.set_clockwise(!view.clockwise()),
        Command::Shutdown => {}
    }
}
