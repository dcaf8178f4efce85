use anyhow::Result;
use embedded_graphics::{pixelcolor::Rgb888, prelude::*, primitives::Rectangle};
#[cfg(feature = "async")]
use std::future::Future;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameBuffer {
    size: Size,
    /// Row-major pixel storage, `size.width * size.height` entries.
    pixels: Vec<Rgb888>,
}

impl FrameBuffer {
    /// Initializes a new `FrameBuffer` with all pixels set to
    /// `Rgb888::BLACK`.
    pub fn new(size: Size) -> Self {
        let len = size.width as usize * size.height as usize;
        Self {
            size,
            pixels: vec![Rgb888::BLACK; len],
        }
    }

    fn index_of(&self, point: Point) -> Option<usize> {
        let (x, y) = (point.x, point.y);
        if x >= 0 && y >= 0 && (x as u32) < self.size.width && (y as u32) < self.size.height {
            Some(x as usize + y as usize * self.size.width as usize)
        } else {
            None
        }
    }

    /// Returns the color at `point` or `None` if it lies outside of the
    /// buffer.
    pub fn pixel(&self, point: Point) -> Option<Rgb888> {
        self.index_of(point).map(|i| self.pixels[i])
    }

    pub fn pixels(&self) -> &[Rgb888] {
        &self.pixels
    }

    /// Number of pixels that are not black.
    pub fn lit_pixels(&self) -> usize {
        self.pixels.iter().filter(|c| **c != Rgb888::BLACK).count()
    }

    /// Iterates over the buffer two rows at a time, which is how the
    /// terminal display packs pixels into half-block characters.
    pub fn row_pairs(&self) -> impl Iterator<Item = (u32, &[Rgb888], Option<&[Rgb888]>)> + '_ {
        let width = self.size.width as usize;
        self.pixels
            .chunks(width.max(1) * 2)
            .enumerate()
            .map(move |(i, chunk)| {
                let (upper, lower) = chunk.split_at(width.min(chunk.len()));
                let lower = if lower.is_empty() { None } else { Some(lower) };
                (i as u32 * 2, upper, lower)
            })
    }
}

/// This trait represents a device that can receive new images to be displayed.
pub trait Device {
    /// Sends a `FrameBuffer` to the device.
    fn draw(&mut self, display: &FrameBuffer) -> Result<()>;
    /// Convenience method for clearing the whole screen.
    /// Most implementations will send an empty `FrameBuffer` to `Device::draw`
    /// but there may be more efficient ways for some devices to implement here.
    fn clear(&mut self) -> Result<()>;

    fn shutdown(&mut self) -> Result<()>;
}

impl Drawable for FrameBuffer {
    type Color = Rgb888;
    type Output = ();

    fn draw<D>(&self, target: &mut D) -> Result<Self::Output, <D as DrawTarget>::Error>
    where
        D: DrawTarget<Color = Self::Color>,
    {
        let area = Rectangle::new(Point::zero(), self.size);
        target.fill_contiguous(&area, self.pixels.iter().copied())
    }
}

impl OriginDimensions for FrameBuffer {
    fn size(&self) -> Size {
        self.size
    }
}

impl DrawTarget for FrameBuffer {
    type Color = Rgb888;
    type Error = anyhow::Error;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(coord, color) in pixels {
            if let Some(index) = self.index_of(coord) {
                self.pixels[index] = color;
            }
        }

        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.pixels.fill(color);
        Ok(())
    }
}

#[cfg(feature = "async")]
pub trait AsyncDevice {
    fn draw<'this>(
        &'this mut self,
        display: &'this FrameBuffer,
    ) -> impl Future<Output = Result<()>> + 'this;
    fn clear(&mut self) -> impl Future<Output = Result<()>> + '_;
    fn shutdown(&mut self) -> impl Future<Output = Result<()>> + '_;
}

#[cfg(feature = "async")]
impl<T: Device> AsyncDevice for T {
    fn draw<'this>(
        &'this mut self,
        display: &'this FrameBuffer,
    ) -> impl Future<Output = Result<()>> + 'this {
        let x = <Self as Device>::draw(self, display);
        async { x }
    }

    fn clear(&mut self) -> impl Future<Output = Result<()>> + '_ {
        let x = <Self as Device>::clear(self);
        async { x }
    }

    fn shutdown(&mut self) -> impl Future<Output = Result<()>> + '_ {
        let x = <Self as Device>::shutdown(self);
        async { x }
    }
}
