/// Single-slot display buffer cache
///
/// Keeps at most one GPU-side buffer alive. The buffer is recreated only
/// when the active image's dimensions change; otherwise its contents are
/// overwritten in place on every present.

use super::placement::{self, Rect};
use crate::state::data::{ImageRecord, PixelBuffer, ReviewState};

/// Border thickness in output pixels
pub const BORDER_THICKNESS: i32 = 6;

/// Plain 8-bit RGBA colour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba(pub u8, pub u8, pub u8, pub u8);

pub const ACCEPTED_COLOR: Rgba = Rgba(0, 200, 0, 255);
pub const REJECTED_COLOR: Rgba = Rgba(220, 30, 30, 255);

/// Border colour for a review state; Neutral has none
pub fn border_color(state: ReviewState) -> Option<Rgba> {
    match state {
        ReviewState::Accepted => Some(ACCEPTED_COLOR),
        ReviewState::Rejected => Some(REJECTED_COLOR),
        ReviewState::Neutral => None,
    }
}

/// A rendering surface that can hold a pixel buffer and draw it
pub trait DisplaySink {
    type Buffer;

    /// Current output size in pixels
    fn output_size(&self) -> (u32, u32);

    /// Start a frame with just the background
    fn clear(&mut self);

    fn create_buffer(&mut self, width: u32, height: u32) -> Self::Buffer;
    fn destroy_buffer(&mut self, buffer: Self::Buffer);
    fn update_buffer(&mut self, buffer: &mut Self::Buffer, pixels: &PixelBuffer);

    fn draw(&mut self, buffer: &Self::Buffer, dest: Rect);
    fn draw_border(&mut self, rings: &[Rect], color: Rgba);
}

struct Slot<B> {
    buffer: B,
    width: u32,
    height: u32,
}

/// The one display buffer, tagged with the dimensions it was created for
pub struct DisplayCache<B> {
    slot: Option<Slot<B>>,
}

impl<B> Default for DisplayCache<B> {
    fn default() -> Self {
        Self { slot: None }
    }
}

impl<B> DisplayCache<B> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Dimensions of the live buffer, if any
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        self.slot.as_ref().map(|slot| (slot.width, slot.height))
    }

    /// Draw `record` into `sink`. Returns the destination rectangle if
    /// anything was drawn.
    pub fn present<S>(&mut self, record: &ImageRecord, sink: &mut S) -> Option<Rect>
    where
        S: DisplaySink<Buffer = B>,
    {
        sink.clear();

        let pixels = record.pixels()?;
        let (width, height) = pixels.dimensions();

        if self.dimensions() != Some((width, height)) {
            self.release(sink);
            self.slot = Some(Slot {
                buffer: sink.create_buffer(width, height),
                width,
                height,
            });
        }

        let slot = self.slot.as_mut()?;
        sink.update_buffer(&mut slot.buffer, pixels);

        let dest = placement::fit((width, height), sink.output_size());
        sink.draw(&slot.buffer, dest);

        if let Some(color) = border_color(record.review) {
            let rings = placement::border_rings(dest, BORDER_THICKNESS);
            sink.draw_border(&rings, color);
        }

        Some(dest)
    }

    /// Destroy the live buffer, if any
    pub fn release<S>(&mut self, sink: &mut S)
    where
        S: DisplaySink<Buffer = B>,
    {
        if let Some(slot) = self.slot.take() {
            sink.destroy_buffer(slot.buffer);
        }
    }
}
