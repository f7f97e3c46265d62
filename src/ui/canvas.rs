use iced::widget::canvas::{self, Path, Program, Stroke};
use iced::mouse::Cursor;
use iced::{Color, Point, Rectangle, Renderer, Size, Theme};

use crate::gpu::{Rect, Rgba};
use crate::ui::viewer::Message;

/// Review-state border drawn over the image
#[derive(Debug, Clone)]
pub struct BorderOverlay {
    pub rings: Vec<Rect>,
    pub color: Rgba,
}

impl Program<Message> for BorderOverlay {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: Cursor,
    ) -> Vec<canvas::Geometry> {
        let mut frame = canvas::Frame::new(renderer, bounds.size());
        let Rgba(r, g, b, a) = self.color;
        let color = Color::from_rgba8(r, g, b, a as f32 / 255.0);

        for ring in &self.rings {
            // Half-pixel offset keeps 1px strokes on the pixel grid
            let path = Path::rectangle(
                Point::new(ring.x as f32 + 0.5, ring.y as f32 + 0.5),
                Size::new(ring.width as f32 - 1.0, ring.height as f32 - 1.0),
            );
            frame.stroke(&path, Stroke::default().with_color(color).with_width(1.0));
        }

        vec![frame.into_geometry()]
    }
}
