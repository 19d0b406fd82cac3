//! Thumbnail sizing and downscaling for the frame picker.
//!
//! Each entry in a frame picker shows the frame scaled to fit a fixed
//! cell while keeping its aspect ratio, composited over an opaque
//! background (transparent frame pixels read as the canvas color).

use crate::color::Rgba;
use crate::frame::Frame;

/// Thumbnail cell configuration and fit calculations.
#[derive(Clone, Copy, Debug)]
pub struct ThumbnailSizing {
    /// Picker cell width in pixels
    pub cell_width: u32,
    /// Picker cell height in pixels
    pub cell_height: u32,
    /// Background composited behind transparent frame pixels
    pub background: Rgba,
}

impl Default for ThumbnailSizing {
    fn default() -> Self {
        Self {
            cell_width: 100,
            cell_height: 100,
            background: Rgba::WHITE,
        }
    }
}

impl ThumbnailSizing {
    /// Create a sizing for a square cell with a white background.
    pub fn new(cell_width: u32, cell_height: u32) -> Self {
        Self {
            cell_width,
            cell_height,
            background: Rgba::WHITE,
        }
    }

    /// Scaled dimensions that fit `(width, height)` inside the cell
    /// while preserving aspect ratio. At least 1x1.
    pub fn fit(&self, width: u32, height: u32) -> (u32, u32) {
        if width == 0 || height == 0 {
            return (1, 1);
        }
        let scale_w = self.cell_width as f64 / width as f64;
        let scale_h = self.cell_height as f64 / height as f64;
        let scale = scale_w.min(scale_h);
        let out_w = ((width as f64 * scale).round() as u32).max(1);
        let out_h = ((height as f64 * scale).round() as u32).max(1);
        (out_w, out_h)
    }
}

/// Scale a frame down to its picker thumbnail.
///
/// Nearest-neighbor sampling; output pixels are opaque (frame pixels
/// are blended over the configured background).
pub fn thumbnail(frame: &Frame, sizing: &ThumbnailSizing) -> Frame {
    let (out_w, out_h) = sizing.fit(frame.width(), frame.height());
    let mut data = Vec::with_capacity(out_w as usize * out_h as usize * 4);

    for y in 0..out_h {
        let src_y = (y as u64 * frame.height() as u64 / out_h as u64) as u32;
        for x in 0..out_w {
            let src_x = (x as u64 * frame.width() as u64 / out_w as u64) as u32;
            let pixel = frame
                .pixel(src_x, src_y)
                .unwrap_or(Rgba::TRANSPARENT)
                .over(sizing.background);
            data.extend_from_slice(&pixel.to_bytes());
        }
    }

    Frame::from_raw_unchecked(out_w, out_h, data)
}

/// Thumbnails for every frame of a sequence, in playback order.
pub fn thumbnails(frames: &[Frame], sizing: &ThumbnailSizing) -> Vec<Frame> {
    frames.iter().map(|f| thumbnail(f, sizing)).collect()
}
