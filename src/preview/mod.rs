//! Raster PNG previews of laid-out cards.

mod paint;

pub use paint::{ImageSurface, PreviewOptions};
