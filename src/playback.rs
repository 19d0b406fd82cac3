//! Playback state: active frame index, play/pause, and frame rate.

use std::time::Duration;

/// Playback and selection state for a frame sequence.
///
/// This controller manages which frame is active and whether autoplay
/// is running, but does not handle timing directly. The caller is
/// responsible for calling `tick()` at the rate given by `interval()`
/// (see [`AutoplayTimer`](crate::AutoplayTimer) for the deterministic
/// timer that drives it).
///
/// The frame count is mirrored from the sequence via
/// `set_frame_count()`; the active index is always a valid index into
/// the sequence.
///
/// ## Example
///
/// ```rust
/// use flipbook_core::PlaybackController;
///
/// let mut playback = PlaybackController::new(12); // 12 FPS
/// playback.set_frame_count(3);
/// playback.toggle();
/// assert!(playback.is_playing());
///
/// // Advance frames (call this from your timer)
/// playback.tick();
/// assert_eq!(playback.active_index(), 1);
/// ```
#[derive(Clone, Debug)]
pub struct PlaybackController {
    /// Index of the frame currently shown/edited
    active_index: usize,
    /// Total number of frames, mirrored from the sequence
    frame_count: usize,
    /// Target frames per second
    fps: u32,
    /// Whether autoplay is running
    playing: bool,
}

impl PlaybackController {
    /// Create a controller with the given FPS, stopped at frame 0.
    pub fn new(fps: u32) -> Self {
        Self {
            active_index: 0,
            frame_count: 1,
            fps,
            playing: false,
        }
    }

    /// Mirror the total number of frames from the sequence.
    ///
    /// The active index is clamped back into range if needed.
    pub fn set_frame_count(&mut self, count: usize) {
        self.frame_count = count;
        if self.active_index >= count && count > 0 {
            self.active_index = count - 1;
        }
    }

    /// The total number of frames.
    #[inline]
    pub fn frame_count(&self) -> usize {
        self.frame_count
    }

    /// Overwrite the target frame rate.
    ///
    /// Stored as supplied; the 1-60 bounds shown by frame-rate inputs
    /// are advisory only. A rate of 0 simply yields no interval.
    pub fn set_fps(&mut self, fps: u32) {
        self.fps = fps;
    }

    /// The target frame rate.
    #[inline]
    pub fn fps(&self) -> u32 {
        self.fps
    }

    /// The interval between autoplay ticks, `1000/fps` milliseconds,
    /// floored at 1 ms so extreme rates cannot yield a zero interval.
    ///
    /// Returns `None` when the rate is 0, meaning no timer should run.
    pub fn interval(&self) -> Option<Duration> {
        if self.fps == 0 {
            None
        } else {
            Some(Duration::from_millis((1000 / self.fps as u64).max(1)))
        }
    }

    /// Start autoplay.
    pub fn play(&mut self) {
        self.playing = true;
    }

    /// Pause autoplay. The active index stays where it is.
    pub fn pause(&mut self) {
        self.playing = false;
    }

    /// Flip the playing flag.
    pub fn toggle(&mut self) {
        self.playing = !self.playing;
    }

    /// Whether autoplay is running.
    #[inline]
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// The index of the frame currently shown/edited.
    #[inline]
    pub fn active_index(&self) -> usize {
        self.active_index
    }

    /// Set the active index directly (manual frame picking).
    ///
    /// Clamped to the last valid index; callers normally supply only
    /// indices of existing frames.
    pub fn select(&mut self, index: usize) {
        if self.frame_count == 0 {
            self.active_index = 0;
        } else {
            self.active_index = index.min(self.frame_count - 1);
        }
    }

    /// True when a repeating timer should be armed: playing, more than
    /// one frame, and a usable rate.
    pub fn should_run_timer(&self) -> bool {
        self.playing && self.frame_count > 1 && self.fps > 0
    }

    /// Advance the active index by one, wrapping after the last frame.
    ///
    /// Only acts while playing with more than one frame; with 0 or 1
    /// frames autoplay never moves the index. Returns true if the
    /// index changed.
    pub fn tick(&mut self) -> bool {
        if !self.playing || self.frame_count <= 1 {
            return false;
        }
        self.active_index = (self.active_index + 1) % self.frame_count;
        true
    }
}
