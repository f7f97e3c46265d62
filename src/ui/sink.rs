use iced::widget::image::Handle;

use crate::gpu::{DisplaySink, Rect, Rgba};
use crate::state::data::PixelBuffer;

/// Texture slot backed by an iced image handle.
/// iced uploads the handle to the GPU the first time it is drawn.
#[derive(Debug)]
pub struct SurfaceTexture {
    width: u32,
    height: u32,
    handle: Option<Handle>,
}

/// What the next `view` should render
#[derive(Debug, Clone, Default)]
pub struct FramePlan {
    pub image: Option<(Handle, Rect)>,
    pub border: Option<(Vec<Rect>, Rgba)>,
}

/// `DisplaySink` for the iced window: records a frame plan for `view`
#[derive(Debug)]
pub struct IcedSink {
    output: (u32, u32),
    frame: FramePlan,
}

impl IcedSink {
    pub fn new(output: (u32, u32)) -> Self {
        Self {
            output,
            frame: FramePlan::default(),
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.output = (width, height);
    }

    pub fn frame(&self) -> &FramePlan {
        &self.frame
    }
}

impl DisplaySink for IcedSink {
    type Buffer = SurfaceTexture;

    fn output_size(&self) -> (u32, u32) {
        self.output
    }

    fn clear(&mut self) {
        self.frame = FramePlan::default();
    }

    fn create_buffer(&mut self, width: u32, height: u32) -> SurfaceTexture {
        tracing::debug!(width, height, "Creating display texture");
        SurfaceTexture {
            width,
            height,
            handle: None,
        }
    }

    fn destroy_buffer(&mut self, buffer: SurfaceTexture) {
        tracing::debug!(width = buffer.width, height = buffer.height, "Destroying display texture");
        drop(buffer);
    }

    fn update_buffer(&mut self, buffer: &mut SurfaceTexture, pixels: &PixelBuffer) {
        // Shares the decoded allocation; no per-frame copy
        buffer.handle = Some(Handle::from_rgba(
            buffer.width,
            buffer.height,
            pixels.data.clone(),
        ));
    }

    fn draw(&mut self, buffer: &SurfaceTexture, dest: Rect) {
        if let Some(handle) = &buffer.handle {
            self.frame.image = Some((handle.clone(), dest));
        }
    }

    fn draw_border(&mut self, rings: &[Rect], color: Rgba) {
        self.frame.border = Some((rings.to_vec(), color));
    }
}
