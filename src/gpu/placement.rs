/// Aspect-preserving placement of an image inside the output surface

/// Destination rectangle in output pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    /// Shrink by `amount` on every side. None once nothing is left.
    pub fn inset(&self, amount: i32) -> Option<Rect> {
        let width = self.width - 2 * amount;
        let height = self.height - 2 * amount;
        if width <= 0 || height <= 0 {
            return None;
        }
        Some(Rect::new(self.x + amount, self.y + amount, width, height))
    }
}

/// Fit an image of `image` size into `output`, centered on the axis with slack.
///
/// A wider output fits to height and centers horizontally; otherwise the
/// image fits to width and centers vertically.
pub fn fit(image: (u32, u32), output: (u32, u32)) -> Rect {
    let (img_w, img_h) = image;
    let (out_w, out_h) = output;
    if img_w == 0 || img_h == 0 || out_w == 0 || out_h == 0 {
        return Rect::default();
    }

    // Compare aspect ratios by cross-multiplying to stay exact
    let (img_w, img_h, out_w, out_h) = (img_w as u64, img_h as u64, out_w as u64, out_h as u64);

    if out_w * img_h > img_w * out_h {
        let width = (out_h * img_w / img_h) as i32;
        let out_w = out_w as i32;
        Rect::new((out_w - width) / 2, 0, width, out_h as i32)
    } else {
        let height = (out_w * img_h / img_w) as i32;
        let out_h = out_h as i32;
        Rect::new(0, (out_h - height) / 2, out_w as i32, height)
    }
}

/// Concentric rings, each inset one pixel further than the last
pub fn border_rings(rect: Rect, thickness: i32) -> Vec<Rect> {
    (0..thickness).map_while(|i| rect.inset(i)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wide_output_fits_height() {
        // 4:3 image in a 16:9 window
        let rect = fit((800, 600), (1280, 720));
        assert_eq!(rect, Rect::new(160, 0, 960, 720));
    }

    #[test]
    fn test_tall_output_fits_width() {
        let rect = fit((1000, 500), (400, 800));
        assert_eq!(rect, Rect::new(0, 300, 400, 200));
    }

    #[test]
    fn test_equal_aspect_fills_output() {
        assert_eq!(fit((640, 360), (1280, 720)), Rect::new(0, 0, 1280, 720));
    }

    #[test]
    fn test_degenerate_sizes() {
        assert_eq!(fit((0, 10), (100, 100)), Rect::default());
        assert_eq!(fit((10, 10), (100, 0)), Rect::default());
    }

    #[test]
    fn test_border_rings_are_concentric() {
        let rings = border_rings(Rect::new(10, 10, 100, 50), 3);
        assert_eq!(
            rings,
            vec![
                Rect::new(10, 10, 100, 50),
                Rect::new(11, 11, 98, 48),
                Rect::new(12, 12, 96, 46),
            ]
        );

        // Stops once the rect collapses
        assert_eq!(border_rings(Rect::new(0, 0, 3, 3), 6).len(), 2);
    }
}
