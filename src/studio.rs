//! The studio controller: owns the frame sequence and playback state
//! and mediates every operation that changes which frame is active or
//! how many frames exist.
//!
//! All pointer events, timer ticks, and user actions run as discrete
//! single-threaded callbacks, so no locking exists anywhere. The
//! studio has exclusive ownership of the sequence, playback state, and
//! timer. The draw surface only ever receives a read-only view of the
//! active frame and hands back a replacement via
//! [`commit_frame`](Studio::commit_frame).

use std::time::Instant;

use log::debug;

use crate::export::{export_sequence, write_export, ExportError, ExportedImage};
use crate::frame::{Frame, FrameSequence, SequenceError};
use crate::playback::PlaybackController;
use crate::timer::AutoplayTimer;

/// Default surface width in pixels.
pub const DEFAULT_WIDTH: u32 = 600;
/// Default surface height in pixels.
pub const DEFAULT_HEIGHT: u32 = 400;
/// Default playback rate in frames per second.
pub const DEFAULT_FPS: u32 = 12;

/// Top-level controller for one sketchpad session.
///
/// Starts with a single blank frame. Every mutation that touches the
/// playing flag, the frame rate, or the sequence length tears down and
/// re-arms the autoplay timer, so exactly the right timer (or none) is
/// live at all times.
///
/// ## Example
///
/// ```rust
/// use flipbook_core::Studio;
/// use std::time::{Duration, Instant};
///
/// let now = Instant::now();
/// let mut studio = Studio::new(); // one blank 600x400 frame, 12 fps
/// studio.add_frame(now);          // second frame, now active
/// studio.toggle_play(now);
///
/// // Host loop: poll the timer and the active index advances.
/// let ticks = studio.advance(now + Duration::from_millis(90));
/// assert_eq!(ticks, 1);
/// assert_eq!(studio.active_index(), 0); // wrapped past the end
/// ```
#[derive(Clone, Debug)]
pub struct Studio {
    frames: FrameSequence,
    playback: PlaybackController,
    timer: AutoplayTimer,
}

impl Default for Studio {
    fn default() -> Self {
        Self::new()
    }
}

impl Studio {
    /// Create a studio with the default 600x400 surface at 12 fps.
    pub fn new() -> Self {
        Self::with_dimensions(DEFAULT_WIDTH, DEFAULT_HEIGHT, DEFAULT_FPS)
    }

    /// Create a studio with explicit surface dimensions and rate.
    pub fn with_dimensions(width: u32, height: u32, fps: u32) -> Self {
        Self {
            frames: FrameSequence::new(width, height),
            playback: PlaybackController::new(fps),
            timer: AutoplayTimer::new(),
        }
    }

    /// The frame sequence, in playback order.
    #[inline]
    pub fn frames(&self) -> &FrameSequence {
        &self.frames
    }

    /// Playback state (read-only; mutate through studio operations).
    #[inline]
    pub fn playback(&self) -> &PlaybackController {
        &self.playback
    }

    /// The autoplay timer (read-only; for liveness inspection).
    #[inline]
    pub fn timer(&self) -> &AutoplayTimer {
        &self.timer
    }

    /// The index of the frame currently shown/edited.
    #[inline]
    pub fn active_index(&self) -> usize {
        self.playback.active_index()
    }

    /// The frame currently shown/edited.
    pub fn active_frame(&self) -> &Frame {
        // The active index is always valid: the sequence is non-empty
        // and the playback controller clamps on every length change.
        self.frames
            .get(self.playback.active_index())
            .unwrap_or_else(|| &self.frames.frames()[0])
    }

    /// Set the active frame directly (manual frame picking).
    pub fn select_frame(&mut self, index: usize) {
        self.playback.select(index);
    }

    /// Append one blank frame and make it active.
    pub fn add_frame(&mut self, now: Instant) {
        let index = self.frames.append_blank();
        self.playback.set_frame_count(self.frames.len());
        self.playback.select(index);
        debug!("frame added, sequence length {}", self.frames.len());
        self.sync_timer(now);
    }

    /// Replace the frame at the active index with a blank one.
    ///
    /// Never changes the sequence length and never touches other
    /// frames.
    pub fn clear_active_frame(&mut self) {
        self.frames.clear_at(self.playback.active_index());
    }

    /// Replace the active frame with a committed stroke result.
    pub fn commit_frame(&mut self, frame: Frame) -> Result<(), SequenceError> {
        self.frames.replace(self.playback.active_index(), frame)
    }

    /// Flip play/pause.
    pub fn toggle_play(&mut self, now: Instant) {
        self.playback.toggle();
        debug!(
            "playback {}",
            if self.playback.is_playing() { "started" } else { "paused" }
        );
        self.sync_timer(now);
    }

    /// Overwrite the target frame rate.
    pub fn set_frame_rate(&mut self, fps: u32, now: Instant) {
        self.playback.set_fps(fps);
        self.sync_timer(now);
    }

    /// Poll the autoplay timer and apply every due tick.
    ///
    /// Returns the number of frames the active index advanced.
    pub fn advance(&mut self, now: Instant) -> u32 {
        let due = self.timer.poll(now);
        let mut advanced = 0;
        for _ in 0..due {
            if self.playback.tick() {
                advanced += 1;
            }
        }
        advanced
    }

    /// Tear down on session end; no timer may outlive the studio's use.
    pub fn shutdown(&mut self) {
        self.timer.stop();
        self.playback.pause();
    }

    /// Export the sequence as a still image of its first frame.
    pub fn export(&self) -> Result<ExportedImage, ExportError> {
        export_sequence(&self.frames)
    }

    /// Export and write the image into `dir` under the fixed filename.
    pub fn export_to(&self, dir: &std::path::Path) -> Result<std::path::PathBuf, ExportError> {
        write_export(&self.frames, dir)
    }

    /// Tear down and re-arm the timer from the current state.
    ///
    /// Runs after every change to the playing flag, frame rate, or
    /// sequence length. With 0 or 1 frames (or no usable rate) no
    /// timer runs regardless of the playing flag.
    fn sync_timer(&mut self, now: Instant) {
        self.timer.stop();
        if self.playback.should_run_timer() {
            if let Some(interval) = self.playback.interval() {
                self.timer.start(interval, now);
            }
        }
    }
}
