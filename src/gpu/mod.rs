/// Display buffer management
///
/// Architecture:
/// - `cache.rs` - the single GPU-side buffer and the `DisplaySink` seam
/// - `placement.rs` - aspect-fit destination and border rectangles
///
/// The window layer implements `DisplaySink`; everything here is
/// independent of the windowing toolkit.

pub mod cache;
pub mod placement;

pub use cache::{DisplayCache, DisplaySink, Rgba};
pub use placement::Rect;
