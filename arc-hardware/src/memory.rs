use crate::device::{Device, FrameBuffer};
use anyhow::Result;

/// A device without a screen. It keeps the most recent frame around so it
/// can be inspected, which makes it useful for headless runs and tests.
#[derive(Debug, Default, Clone)]
pub struct MemoryDevice {
    last: Option<FrameBuffer>,
    frames: usize,
    shut_down: bool,
}

impl MemoryDevice {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_frame(&self) -> Option<&FrameBuffer> {
        self.last.as_ref()
    }

    /// Number of frames received through `Device::draw`.
    pub fn frames(&self) -> usize {
        self.frames
    }

    pub fn is_shut_down(&self) -> bool {
        self.shut_down
    }
}

impl Device for MemoryDevice {
    fn draw(&mut self, display: &FrameBuffer) -> Result<()> {
        self.last = Some(display.clone());
        self.frames += 1;
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.last = None;
        Ok(())
    }

    fn shutdown(&mut self) -> Result<()> {
        self.shut_down = true;
        Ok(())
    }
}
