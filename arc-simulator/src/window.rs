use anyhow::Result;
use arc_hardware::{Device, FrameBuffer};
use arc_input::Command;
use embedded_graphics::{draw_target::DrawTarget, geometry::Size, pixelcolor::Rgb888, Drawable};
use embedded_graphics_simulator::{
    sdl2::Keycode, OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window,
};
use log::debug;
use std::{
    fmt,
    sync::mpsc::{self, Receiver, RecvTimeoutError},
    thread::{self, JoinHandle},
    time::Duration,
};
use tokio::sync::broadcast;

const SCALE: u32 = 4;
const REFRESH: Duration = Duration::from_millis(10);

enum Message {
    Frame(FrameBuffer),
    Clear,
}

impl fmt::Debug for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Message::Frame(_) => f.write_str("Frame"),
            Message::Clear => f.write_str("Clear"),
        }
    }
}

/// An SDL window showing the frames scaled up. Key releases are mapped with
/// `Command::from_key`, closing the window shuts the renderer down.
#[derive(Debug)]
pub struct WindowDisplay {
    _handle: JoinHandle<Result<()>>,
    sender: mpsc::Sender<Message>,
}

impl WindowDisplay {
    pub fn connect(size: Size, commands: broadcast::Sender<Command>) -> Self {
        let (sender, rx) = mpsc::channel();
        let handle = thread::spawn(move || show(size, &rx, &commands));

        Self {
            _handle: handle,
            sender,
        }
    }
}

fn key_char(keycode: Keycode) -> Option<char> {
    let name = keycode.name();
    let mut chars = name.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c.to_ascii_lowercase()),
        _ => None,
    }
}

/// Runs the window until it is closed or the display is dropped.
fn show(size: Size, rx: &Receiver<Message>, commands: &broadcast::Sender<Command>) -> Result<()> {
    let mut display = SimulatorDisplay::<Rgb888>::new(size);
    let output_settings = OutputSettingsBuilder::new().scale(SCALE).build();
    let title = format!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
    let mut window = Window::new(&title, &output_settings);

    loop {
        match rx.recv_timeout(REFRESH) {
            Ok(Message::Frame(frame)) => frame.draw(&mut display)?,
            Ok(Message::Clear) => display.clear(Rgb888::BLACK)?,
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => return Ok(()),
        }

        window.update(&display);
        if !forward_events(&mut window, commands)? {
            return Ok(());
        }
    }
}

/// Sends the commands for pending window events. Returns `false` once the
/// window was closed.
fn forward_events(window: &mut Window, commands: &broadcast::Sender<Command>) -> Result<bool> {
    for event in window.events() {
        let command = match event {
            SimulatorEvent::KeyUp { keycode, .. } => key_char(keycode).and_then(Command::from_key),
            SimulatorEvent::Quit => {
                commands.send(Command::Shutdown)?;
                return Ok(false);
            }
            _ => None,
        };

        if let Some(command) = command {
            debug!("Window key sends {:?}", command);
            commands.send(command)?;
        }
    }
    Ok(true)
}

impl Device for WindowDisplay {
    fn draw(&mut self, display: &FrameBuffer) -> Result<()> {
        self.sender.send(Message::Frame(display.clone()))?;
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.sender.send(Message::Clear)?;
        Ok(())
    }

    fn shutdown(&mut self) -> Result<()> {
        Ok(())
    }
}
