mod terminal;
#[cfg(feature = "window")]
mod window;

pub use terminal::TerminalDisplay;
#[cfg(feature = "window")]
pub use window::WindowDisplay;
