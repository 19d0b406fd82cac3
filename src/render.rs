//! Presentation helpers for frames.
//!
//! The core functions turn a frame into buffers a host can display:
//! RGBA composited over an opaque background, or packed `0x00RRGGBB`
//! words for pixel-buffer windows. The optional `web` module presents
//! frames on an HTML canvas.

use crate::color::Rgba;
use crate::frame::Frame;

/// Composite a frame over an opaque background color.
///
/// Returns RGBA bytes where transparent frame pixels read as the
/// background (the drawing canvas sits on white).
pub fn composite_over(frame: &Frame, background: Rgba) -> Vec<u8> {
    let mut out = Vec::with_capacity(frame.data().len());
    for chunk in frame.data().chunks_exact(4) {
        let pixel = Rgba::from_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]).over(background);
        out.extend_from_slice(&pixel.to_bytes());
    }
    out
}

/// Pack a frame into `0x00RRGGBB` words over an opaque background.
///
/// This is the layout software pixel-buffer windows consume, one word
/// per pixel in row-major order.
pub fn packed_pixels(frame: &Frame, background: Rgba) -> Vec<u32> {
    frame
        .data()
        .chunks_exact(4)
        .map(|chunk| {
            Rgba::from_bytes([chunk[0], chunk[1], chunk[2], chunk[3]])
                .over(background)
                .to_packed_rgb()
        })
        .collect()
}

/// Web-specific presentation implementation.
#[cfg(feature = "web")]
pub mod web {
    use super::*;
    use wasm_bindgen::{Clamped, JsCast};
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, ImageData};

    /// In-memory cache of pre-rendered canvases, one slot per frame.
    ///
    /// Caching frames as offscreen canvases lets playback use a single
    /// `drawImage` call per tick instead of re-uploading pixel data.
    /// A slot must be invalidated whenever its frame is replaced
    /// (stroke commit or clear).
    #[derive(Clone, Debug, Default)]
    pub struct FrameCanvasCache {
        canvases: Vec<Option<HtmlCanvasElement>>,
    }

    impl FrameCanvasCache {
        /// Create an empty cache sized for `frame_count` entries.
        pub fn with_frame_count(frame_count: usize) -> Self {
            let mut cache = Self::default();
            cache.resize(frame_count);
            cache
        }

        /// Resize cache to match the number of frames.
        pub fn resize(&mut self, frame_count: usize) {
            if self.canvases.len() != frame_count {
                self.canvases.resize_with(frame_count, || None);
            }
        }

        /// Drop the cached canvas for one frame (its pixels changed).
        pub fn invalidate(&mut self, frame_index: usize) {
            if let Some(entry) = self.canvases.get_mut(frame_index) {
                *entry = None;
            }
        }

        /// Remove all cached canvases.
        pub fn clear(&mut self) {
            self.canvases.clear();
        }

        /// Cache a pre-rendered canvas for a frame.
        pub fn store(&mut self, frame_index: usize, canvas: HtmlCanvasElement) {
            if frame_index < self.canvases.len() {
                self.canvases[frame_index] = Some(canvas);
            }
        }

        /// Get a cached canvas for a frame.
        pub fn get(&self, frame_index: usize) -> Option<HtmlCanvasElement> {
            self.canvases.get(frame_index).and_then(|c| c.clone())
        }

        /// Returns `true` when a frame is already cached.
        pub fn has(&self, frame_index: usize) -> bool {
            self.canvases
                .get(frame_index)
                .map(|c| c.is_some())
                .unwrap_or(false)
        }
    }

    fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, String> {
        canvas
            .get_context("2d")
            .map_err(|_| "Failed to get 2d context")?
            .ok_or("No 2d context available")?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| "Failed to cast to CanvasRenderingContext2d".to_string())
    }

    /// Render a frame directly to an HTML canvas.
    ///
    /// Sizes the canvas to the frame, clears it, and puts the frame's
    /// pixels as `ImageData` (alpha preserved; the page background
    /// shows through transparent pixels).
    pub fn render_to_canvas(frame: &Frame, canvas: &HtmlCanvasElement) -> Result<(), String> {
        canvas.set_width(frame.width());
        canvas.set_height(frame.height());

        let ctx = context_2d(canvas)?;
        ctx.clear_rect(0.0, 0.0, frame.width() as f64, frame.height() as f64);

        let image_data = ImageData::new_with_u8_clamped_array_and_sh(
            Clamped(frame.data()),
            frame.width(),
            frame.height(),
        )
        .map_err(|_| "Failed to build ImageData")?;
        ctx.put_image_data(&image_data, 0.0, 0.0)
            .map_err(|_| "Failed to put ImageData")?;

        Ok(())
    }

    /// Render a frame to a newly created offscreen canvas.
    ///
    /// The resulting canvas can be cached and quickly drawn to the
    /// visible canvas using `draw_cached_canvas`.
    pub fn render_to_offscreen_canvas(frame: &Frame) -> Result<HtmlCanvasElement, String> {
        let window = web_sys::window().ok_or("No window available")?;
        let document = window.document().ok_or("No document available")?;
        let canvas = document
            .create_element("canvas")
            .map_err(|_| "Failed to create canvas element")?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| "Failed to cast element to HtmlCanvasElement")?;

        render_to_canvas(frame, &canvas)?;
        Ok(canvas)
    }

    /// Draw a pre-rendered offscreen canvas onto a visible canvas.
    pub fn draw_cached_canvas(
        target: &HtmlCanvasElement,
        cached: &HtmlCanvasElement,
    ) -> Result<(), String> {
        target.set_width(cached.width());
        target.set_height(cached.height());

        let ctx = context_2d(target)?;
        // Reset any existing transform state before drawing cached content.
        ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)
            .map_err(|_| "Failed to reset transform")?;
        ctx.draw_image_with_html_canvas_element(cached, 0.0, 0.0)
            .map_err(|_| "Failed to draw cached canvas")?;
        Ok(())
    }

    /// Draw a frame directly from cache when available.
    ///
    /// Returns `Ok(true)` when the frame was present in cache and drawn.
    pub fn draw_frame_from_cache(
        target: &HtmlCanvasElement,
        cache: &FrameCanvasCache,
        frame_index: usize,
    ) -> Result<bool, String> {
        if let Some(cached) = cache.get(frame_index) {
            draw_cached_canvas(target, &cached)?;
            Ok(true)
        } else {
            Ok(false)
        }
    }
}
