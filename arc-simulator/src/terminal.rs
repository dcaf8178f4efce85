use anyhow::Result;
use arc_hardware::{Device, FrameBuffer};
use arc_input::Command;
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{
        disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use embedded_graphics::pixelcolor::{Rgb888, RgbColor};
use log::{debug, warn};
use std::{
    io::{stdout, Write},
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    thread::{self, JoinHandle},
    time::Duration,
};
use tokio::sync::broadcast;

/// Upper half block: the foreground color paints the upper pixel, the
/// background color the lower one.
const HALF_BLOCK: char = '\u{2580}';
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Shows frames in the terminal, two pixels per character cell, and turns
/// key presses into commands.
#[derive(Debug)]
pub struct TerminalDisplay {
    running: Arc<AtomicBool>,
    input: Option<JoinHandle<()>>,
    active: bool,
}

impl TerminalDisplay {
    pub fn connect(sender: broadcast::Sender<Command>) -> Result<Self> {
        enable_raw_mode()?;
        let mut stdout = stdout();
        if let Err(e) = execute!(stdout, EnterAlternateScreen, Hide, Clear(ClearType::All)) {
            let _ = disable_raw_mode();
            return Err(e.into());
        }

        let running = Arc::new(AtomicBool::new(true));
        let flag = running.clone();
        let input = thread::spawn(move || read_keys(&flag, &sender));

        Ok(Self {
            running,
            input: Some(input),
            active: true,
        })
    }

    fn restore(&mut self) -> Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;

        self.running.store(false, Ordering::SeqCst);
        if let Some(handle) = self.input.take() {
            let _ = handle.join();
        }

        let mut stdout = stdout();
        execute!(stdout, ResetColor, Show, LeaveAlternateScreen)?;
        disable_raw_mode()?;
        Ok(())
    }
}

impl Device for TerminalDisplay {
    fn draw(&mut self, display: &FrameBuffer) -> Result<()> {
        let mut out = stdout().lock();
        write_frame(&mut out, display)?;
        out.flush()?;
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        let mut stdout = stdout();
        execute!(stdout, ResetColor, Clear(ClearType::All))?;
        Ok(())
    }

    fn shutdown(&mut self) -> Result<()> {
        self.restore()
    }
}

impl Drop for TerminalDisplay {
    fn drop(&mut self) {
        if let Err(e) = self.restore() {
            warn!("Failed to restore the terminal: {}", e);
        }
    }
}

fn to_color(color: Rgb888) -> Color {
    Color::Rgb {
        r: color.r(),
        g: color.g(),
        b: color.b(),
    }
}

/// Queues the escape sequences for `frame`, starting at the top left cell.
fn write_frame<W: Write>(out: &mut W, frame: &FrameBuffer) -> Result<()> {
    for (y, upper, lower) in frame.row_pairs() {
        queue!(out, MoveTo(0, (y / 2) as u16))?;

        let mut last = None;
        for (x, top) in upper.iter().enumerate() {
            let bottom = lower
                .and_then(|row| row.get(x))
                .copied()
                .unwrap_or(Rgb888::BLACK);
            if last != Some((*top, bottom)) {
                queue!(
                    out,
                    SetForegroundColor(to_color(*top)),
                    SetBackgroundColor(to_color(bottom))
                )?;
                last = Some((*top, bottom));
            }
            queue!(out, Print(HALF_BLOCK))?;
        }
    }
    queue!(out, ResetColor)?;
    Ok(())
}

fn read_keys(running: &AtomicBool, sender: &broadcast::Sender<Command>) {
    while running.load(Ordering::SeqCst) {
        match event::poll(POLL_INTERVAL) {
            Ok(true) => {}
            Ok(false) => continue,
            Err(e) => {
                warn!("Failed to poll terminal events: {}", e);
                break;
            }
        }

        let key = match event::read() {
            Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => key,
            Ok(_) => continue,
            Err(e) => {
                warn!("Failed to read terminal event: {}", e);
                break;
            }
        };

        // Raw mode swallows the signal, so Ctrl+C arrives as a key.
        let command = match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Command::Shutdown)
            }
            KeyCode::Esc => Some(Command::Shutdown),
            KeyCode::Up | KeyCode::Right => Some(Command::Nudge(Command::NUDGE_STEP)),
            KeyCode::Down | KeyCode::Left => Some(Command::Nudge(-Command::NUDGE_STEP)),
            KeyCode::Char(c) => Command::from_key(c),
            _ => None,
        };

        if let Some(command) = command {
            debug!("Key {:?} sends {:?}", key.code, command);
            if sender.send(command).is_err() {
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::{
        draw_target::DrawTarget,
        geometry::{Point, Size},
        Pixel,
    };

    #[test]
    fn two_pixel_rows_share_a_line() {
        let mut frame = FrameBuffer::new(Size::new(3, 3));
        frame
            .draw_iter([Pixel(Point::new(1, 0), Rgb888::RED)])
            .unwrap();

        let mut out = Vec::new();
        write_frame(&mut out, &frame).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(text.matches(HALF_BLOCK).count(), 6);
        assert!(text.contains("38;2;255;0;0"));
    }

    #[test]
    fn colors_are_passed_through() {
        assert_eq!(
            to_color(Rgb888::new(1, 2, 3)),
            Color::Rgb { r: 1, g: 2, b: 3 }
        );
    }
}
