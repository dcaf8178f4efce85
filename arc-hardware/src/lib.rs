mod device;
mod memory;

#[cfg(feature = "async")]
pub use device::AsyncDevice;
pub use device::{Device, FrameBuffer};
pub use memory::MemoryDevice;
