//! # flipbook-core
//!
//! Core frame storage, freehand drawing, and playback library for
//! flipbook-style animation sketchpads.
//!
//! This crate provides platform-agnostic data structures and logic for:
//! - Storing an ordered sequence of fixed-size RGBA frames
//! - Rasterizing freehand strokes onto the active frame
//! - Controlling animation playback (play/pause, rate, wrap-around)
//! - Exporting a frame as a PNG still image
//! - Rendering frames for display (with optional web support)
//!
//! ## Features
//!
//! - `serde` - Enable serialization/deserialization for the value types
//! - `web` - Enable web/WASM canvas rendering support
//!
//! ## Example
//!
//! ```rust
//! use flipbook_core::{DrawSurface, Studio};
//! use std::time::Instant;
//!
//! let now = Instant::now();
//! let mut studio = Studio::new();
//! let mut surface = DrawSurface::new(600, 400);
//!
//! // Render the active frame, draw a stroke, commit it back.
//! surface.show_frame(studio.active_frame()).unwrap();
//! surface.pointer_down(100.0, 100.0).unwrap();
//! surface.pointer_move(200.0, 150.0).unwrap();
//! if let Some(frame) = surface.pointer_up().unwrap() {
//!     studio.commit_frame(frame).unwrap();
//! }
//!
//! // Add a frame and start playback.
//! studio.add_frame(now);
//! studio.toggle_play(now);
//! ```

mod color;
mod export;
mod frame;
mod playback;
pub mod render;
mod studio;
mod surface;
mod thumbnail;
mod timer;

pub use color::{parse_color, Rgba};
pub use export::{
    encode_png, export_sequence, write_export, ExportError, ExportedImage, EXPORT_FILENAME,
};
pub use frame::{Frame, FrameSequence, SequenceError};
pub use playback::PlaybackController;
pub use render::{composite_over, packed_pixels};
pub use studio::{Studio, DEFAULT_FPS, DEFAULT_HEIGHT, DEFAULT_WIDTH};
pub use surface::{DrawSurface, StrokeStyle, SurfaceError};
pub use thumbnail::{thumbnail, thumbnails, ThumbnailSizing};
pub use timer::AutoplayTimer;

#[cfg(feature = "web")]
pub use render::web::{render_to_canvas, FrameCanvasCache};
