//! Draw surface: renders the active frame and turns pointer gestures
//! into committed frames.
//!
//! The surface owns a working pixel buffer and a tiny stroke state
//! machine (Idle / Stroking). A stroke is one continuous
//! pointer-down-to-pointer-up gesture; only when it ends is the full
//! surface captured as a new [`Frame`] and handed back to the caller.
//! Nothing is committed mid-stroke.

use crate::color::{parse_color, Rgba};
use crate::frame::Frame;

use log::debug;

/// Error type for draw surface operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceError {
    /// The backing pixel buffer has not been acquired yet (e.g. before
    /// the first render). The attempted operation did nothing.
    Unavailable,
    /// A frame handed to the surface does not match its dimensions.
    DimensionMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },
}

impl std::fmt::Display for SurfaceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SurfaceError::Unavailable => {
                write!(f, "Drawing surface unavailable: no backing buffer acquired")
            }
            SurfaceError::DimensionMismatch { expected, actual } => {
                write!(
                    f,
                    "Surface dimension mismatch: expected {}x{}, got {}x{}",
                    expected.0, expected.1, actual.0, actual.1
                )
            }
        }
    }
}

impl std::error::Error for SurfaceError {}

/// Visual style applied to every stroke segment.
///
/// The surface draws with one solid color and a fixed width, with
/// rounded caps and joins.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StrokeStyle {
    /// Solid stroke color
    pub color: Rgba,
    /// Stroke width in pixels
    pub width: u32,
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            color: Rgba::BLACK,
            width: 2,
        }
    }
}

impl StrokeStyle {
    /// Build a style from a color string (`"#000"`, `"black"`, ...)
    /// and width, the way host UIs specify stroke styles.
    ///
    /// Returns None when the color string cannot be parsed.
    pub fn from_color_str(color: &str, width: u32) -> Option<Self> {
        Some(Self {
            color: parse_color(color)?,
            width,
        })
    }
}

/// Stateful pointer-event handler that rasterizes freehand strokes onto
/// a working copy of the active frame.
///
/// ## Example
///
/// ```rust
/// use flipbook_core::{DrawSurface, Frame};
///
/// let mut surface = DrawSurface::new(600, 400);
/// surface.show_frame(&Frame::blank(600, 400)).unwrap();
///
/// surface.pointer_down(10.0, 10.0).unwrap();
/// surface.pointer_move(50.0, 40.0).unwrap();
/// let committed = surface.pointer_up().unwrap();
/// assert!(committed.is_some()); // exactly one new frame per stroke
/// ```
#[derive(Clone, Debug)]
pub struct DrawSurface {
    width: u32,
    height: u32,
    /// Working RGBA pixels; `None` until the surface is acquired.
    backing: Option<Vec<u8>>,
    style: StrokeStyle,
    /// Drawing mode toggle; when false all pointer events are no-ops.
    drawing_enabled: bool,
    /// Last pointer position while a stroke is in progress.
    /// `Some` means Stroking, `None` means Idle.
    last_pos: Option<(f32, f32)>,
}

impl DrawSurface {
    /// Create a surface with its backing buffer already acquired.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            backing: Some(vec![0; width as usize * height as usize * 4]),
            style: StrokeStyle::default(),
            drawing_enabled: true,
            last_pos: None,
        }
    }

    /// Create a surface whose backing buffer is not yet available.
    ///
    /// Operations on a detached surface return
    /// [`SurfaceError::Unavailable`] until [`attach`](Self::attach) is
    /// called. This models a drawing context that does not exist yet
    /// (before first render).
    pub fn detached(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            backing: None,
            style: StrokeStyle::default(),
            drawing_enabled: true,
            last_pos: None,
        }
    }

    /// Acquire the backing buffer (idempotent).
    pub fn attach(&mut self) {
        if self.backing.is_none() {
            self.backing = Some(vec![0; self.width as usize * self.height as usize * 4]);
        }
    }

    /// True when the backing buffer is available.
    #[inline]
    pub fn is_available(&self) -> bool {
        self.backing.is_some()
    }

    /// Surface dimensions as `(width, height)`.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Enable or disable drawing mode (drawing vs. view-only).
    pub fn set_drawing_enabled(&mut self, enabled: bool) {
        self.drawing_enabled = enabled;
    }

    /// Whether drawing mode is enabled.
    #[inline]
    pub fn drawing_enabled(&self) -> bool {
        self.drawing_enabled
    }

    /// Set the stroke style used for subsequent segments.
    pub fn set_style(&mut self, style: StrokeStyle) {
        self.style = style;
    }

    /// The current stroke style.
    #[inline]
    pub fn style(&self) -> StrokeStyle {
        self.style
    }

    /// True while a stroke is in progress.
    #[inline]
    pub fn is_stroking(&self) -> bool {
        self.last_pos.is_some()
    }

    /// Clear the surface and paint `frame` onto it.
    ///
    /// This is the only path by which stored pixels become visible.
    /// Call it whenever the active frame changes.
    pub fn show_frame(&mut self, frame: &Frame) -> Result<(), SurfaceError> {
        if frame.dimensions() != (self.width, self.height) {
            return Err(SurfaceError::DimensionMismatch {
                expected: (self.width, self.height),
                actual: frame.dimensions(),
            });
        }
        let backing = self.backing.as_mut().ok_or(SurfaceError::Unavailable)?;
        backing.copy_from_slice(frame.data());
        Ok(())
    }

    /// Capture the current surface contents as a frame.
    pub fn capture(&self) -> Result<Frame, SurfaceError> {
        let backing = self.backing.as_ref().ok_or(SurfaceError::Unavailable)?;
        Ok(Frame::from_raw_unchecked(
            self.width,
            self.height,
            backing.clone(),
        ))
    }

    /// Pointer-down: Idle -> Stroking.
    ///
    /// Records the down position as the last position. A no-op when
    /// drawing mode is disabled.
    pub fn pointer_down(&mut self, x: f32, y: f32) -> Result<(), SurfaceError> {
        if !self.drawing_enabled {
            return Ok(());
        }
        if self.backing.is_none() {
            return Err(SurfaceError::Unavailable);
        }
        self.last_pos = Some((x, y));
        Ok(())
    }

    /// Pointer-move: Stroking -> Stroking.
    ///
    /// Draws a straight segment from the last position to `(x, y)` and
    /// advances the last position. Visual fidelity depends on how
    /// densely move events are sampled; the segments are chained, not
    /// re-fit. No-op while Idle or with drawing mode disabled.
    pub fn pointer_move(&mut self, x: f32, y: f32) -> Result<(), SurfaceError> {
        if !self.drawing_enabled {
            return Ok(());
        }
        let Some((lx, ly)) = self.last_pos else {
            return Ok(());
        };
        let style = self.style;
        let (width, height) = (self.width, self.height);
        let backing = self.backing.as_mut().ok_or(SurfaceError::Unavailable)?;
        draw_segment(backing, width, height, (lx, ly), (x, y), style);
        self.last_pos = Some((x, y));
        Ok(())
    }

    /// Pointer-up: Stroking -> Idle.
    ///
    /// Captures the full surface contents as a new frame. This is the
    /// sole producer of non-blank frame content. Returns `None` when
    /// no stroke was in progress.
    pub fn pointer_up(&mut self) -> Result<Option<Frame>, SurfaceError> {
        if self.last_pos.is_none() {
            return Ok(None);
        }
        let frame = self.capture()?;
        self.last_pos = None;
        debug!("stroke committed ({}x{})", self.width, self.height);
        Ok(Some(frame))
    }

    /// The pointer left the surface; equivalent to pointer-up.
    pub fn pointer_leave(&mut self) -> Result<Option<Frame>, SurfaceError> {
        self.pointer_up()
    }
}

/// Put a stroke-colored pixel at (x,y) if it is inside bounds.
#[inline]
fn put_pixel(buf: &mut [u8], width: u32, height: u32, x: i32, y: i32, color: Rgba) {
    if x < 0 || y < 0 {
        return;
    }
    let (x, y) = (x as u32, y as u32);
    if x >= width || y >= height {
        return;
    }
    let idx = (y as usize * width as usize + x as usize) * 4;
    buf[idx..idx + 4].copy_from_slice(&color.to_bytes());
}

/// Stamp a filled disc centered at (cx,cy). Gives the stroke its
/// rounded caps and joins.
fn stamp_disc(buf: &mut [u8], width: u32, height: u32, cx: i32, cy: i32, radius: i32, color: Rgba) {
    if radius <= 0 {
        put_pixel(buf, width, height, cx, cy, color);
        return;
    }
    let r2 = radius * radius;
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            if dx * dx + dy * dy <= r2 {
                put_pixel(buf, width, height, cx + dx, cy + dy, color);
            }
        }
    }
}

/// Draw a straight segment between two points using Bresenham
/// traversal, stamping a disc at every step.
fn draw_segment(
    buf: &mut [u8],
    width: u32,
    height: u32,
    from: (f32, f32),
    to: (f32, f32),
    style: StrokeStyle,
) {
    let radius = (style.width / 2) as i32;
    let (mut x0, mut y0) = (from.0.round() as i32, from.1.round() as i32);
    let (x1, y1) = (to.0.round() as i32, to.1.round() as i32);

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    loop {
        stamp_disc(buf, width, height, x0, y0, radius, style.color);
        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stroked_pixels(frame: &Frame) -> Vec<(u32, u32)> {
        let mut hits = Vec::new();
        for y in 0..frame.height() {
            for x in 0..frame.width() {
                if frame.pixel(x, y) != Some(Rgba::TRANSPARENT) {
                    hits.push((x, y));
                }
            }
        }
        hits
    }

    #[test]
    fn full_gesture_commits_exactly_one_frame() {
        let mut surface = DrawSurface::new(60, 40);
        surface.show_frame(&Frame::blank(60, 40)).unwrap();

        surface.pointer_down(5.0, 5.0).unwrap();
        // Intermediate moves draw but never commit
        surface.pointer_move(20.0, 5.0).unwrap();
        surface.pointer_move(20.0, 30.0).unwrap();
        assert!(surface.is_stroking());

        let committed = surface.pointer_up().unwrap();
        let frame = committed.expect("stroke end must commit a frame");

        // Both chained segments are present: p0->p1 and p1->p2
        assert_eq!(frame.pixel(5, 5), Some(Rgba::BLACK));
        assert_eq!(frame.pixel(12, 5), Some(Rgba::BLACK));
        assert_eq!(frame.pixel(20, 5), Some(Rgba::BLACK));
        assert_eq!(frame.pixel(20, 18), Some(Rgba::BLACK));
        assert_eq!(frame.pixel(20, 30), Some(Rgba::BLACK));
        // Far corner untouched
        assert_eq!(frame.pixel(55, 35), Some(Rgba::TRANSPARENT));

        // Stroke state cleared; a second pointer-up commits nothing
        assert!(!surface.is_stroking());
        assert_eq!(surface.pointer_up().unwrap(), None);
    }

    #[test]
    fn disabled_drawing_mode_ignores_gestures() {
        let mut surface = DrawSurface::new(20, 20);
        surface.set_drawing_enabled(false);

        surface.pointer_down(2.0, 2.0).unwrap();
        surface.pointer_move(10.0, 10.0).unwrap();
        assert!(!surface.is_stroking());
        assert_eq!(surface.pointer_up().unwrap(), None);

        // Surface pixels untouched
        assert!(surface.capture().unwrap().is_blank());
    }

    #[test]
    fn show_frame_clears_previous_content() {
        let mut surface = DrawSurface::new(10, 10);
        surface.pointer_down(3.0, 3.0).unwrap();
        surface.pointer_move(7.0, 3.0).unwrap();
        surface.pointer_up().unwrap();
        assert!(!surface.capture().unwrap().is_blank());

        surface.show_frame(&Frame::blank(10, 10)).unwrap();
        assert!(surface.capture().unwrap().is_blank());
    }

    #[test]
    fn show_frame_paints_stored_pixels() {
        let mut painted = vec![0u8; 10 * 10 * 4];
        let idx = (4 * 10 + 6) * 4;
        painted[idx..idx + 4].copy_from_slice(&[255, 0, 0, 255]);
        let frame = Frame::from_raw(10, 10, painted).unwrap();

        let mut surface = DrawSurface::new(10, 10);
        surface.show_frame(&frame).unwrap();
        assert_eq!(surface.capture().unwrap().pixel(6, 4), Some(Rgba::opaque(255, 0, 0)));
    }

    #[test]
    fn show_frame_rejects_wrong_dimensions() {
        let mut surface = DrawSurface::new(10, 10);
        let err = surface.show_frame(&Frame::blank(9, 10)).unwrap_err();
        assert!(matches!(err, SurfaceError::DimensionMismatch { .. }));
    }

    #[test]
    fn detached_surface_reports_unavailable() {
        let mut surface = DrawSurface::detached(10, 10);
        assert!(!surface.is_available());

        assert_eq!(
            surface.show_frame(&Frame::blank(10, 10)),
            Err(SurfaceError::Unavailable)
        );
        assert_eq!(surface.pointer_down(1.0, 1.0), Err(SurfaceError::Unavailable));
        assert_eq!(surface.capture(), Err(SurfaceError::Unavailable));

        surface.attach();
        assert!(surface.is_available());
        assert!(surface.pointer_down(1.0, 1.0).is_ok());
    }

    #[test]
    fn move_without_down_is_idle_noop() {
        let mut surface = DrawSurface::new(10, 10);
        surface.pointer_move(5.0, 5.0).unwrap();
        assert!(surface.capture().unwrap().is_blank());
        assert_eq!(surface.pointer_up().unwrap(), None);
    }

    #[test]
    fn pointer_leave_commits_like_pointer_up() {
        let mut surface = DrawSurface::new(10, 10);
        surface.pointer_down(1.0, 1.0).unwrap();
        surface.pointer_move(8.0, 1.0).unwrap();
        let committed = surface.pointer_leave().unwrap();
        assert!(committed.is_some());
        assert!(!surface.is_stroking());
    }

    #[test]
    fn stroke_width_gives_rounded_coverage() {
        let mut surface = DrawSurface::new(20, 20);
        surface.pointer_down(3.0, 10.0).unwrap();
        surface.pointer_move(16.0, 10.0).unwrap();
        let frame = surface.pointer_up().unwrap().unwrap();

        // Width 2 stamps a radius-1 disc, so the row above and below
        // the segment center are covered too.
        assert_eq!(frame.pixel(10, 9), Some(Rgba::BLACK));
        assert_eq!(frame.pixel(10, 10), Some(Rgba::BLACK));
        assert_eq!(frame.pixel(10, 11), Some(Rgba::BLACK));
        assert_eq!(frame.pixel(10, 13), Some(Rgba::TRANSPARENT));
    }

    #[test]
    fn custom_stroke_style() {
        let mut surface = DrawSurface::new(10, 10);
        surface.set_style(StrokeStyle::from_color_str("blue", 2).unwrap());
        surface.pointer_down(2.0, 2.0).unwrap();
        surface.pointer_move(7.0, 2.0).unwrap();
        let frame = surface.pointer_up().unwrap().unwrap();
        assert_eq!(frame.pixel(4, 2), Some(Rgba::opaque(0, 0, 255)));
    }

    #[test]
    fn stroke_style_from_color_str() {
        // The hex form of the default style parses back to it
        assert_eq!(
            StrokeStyle::from_color_str("#000", 2),
            Some(StrokeStyle::default())
        );
        assert_eq!(StrokeStyle::from_color_str("notacolor", 2), None);
    }

    #[test]
    fn off_surface_segments_are_clipped() {
        let mut surface = DrawSurface::new(10, 10);
        surface.pointer_down(-5.0, 5.0).unwrap();
        surface.pointer_move(15.0, 5.0).unwrap();
        let frame = surface.pointer_up().unwrap().unwrap();
        let hits = stroked_pixels(&frame);
        assert!(!hits.is_empty());
        assert!(hits.iter().all(|&(x, y)| x < 10 && y < 10));
    }
}
