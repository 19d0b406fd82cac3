//! Core frame data structures: single frames and the ordered sequence.

use crate::color::Rgba;

/// Error type for frame sequence operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SequenceError {
    /// A frame's dimensions do not match the sequence's fixed dimensions.
    DimensionMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },
    /// The pixel buffer length does not match `width * height * 4`.
    BadBufferLength { expected: usize, actual: usize },
}

impl std::fmt::Display for SequenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SequenceError::DimensionMismatch { expected, actual } => {
                write!(
                    f,
                    "Frame dimension mismatch: expected {}x{}, got {}x{}",
                    expected.0, expected.1, actual.0, actual.1
                )
            }
            SequenceError::BadBufferLength { expected, actual } => {
                write!(
                    f,
                    "Pixel buffer length mismatch: expected {} bytes, got {}",
                    expected, actual
                )
            }
        }
    }
}

impl std::error::Error for SequenceError {}

/// One still of the animation: a fixed-size RGBA8 raster.
///
/// Frames are value types and never mutated in place. The draw surface
/// produces a whole new `Frame` each time a stroke finishes, and the
/// controller swaps it into the sequence.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Frame {
    width: u32,
    height: u32,
    /// RGBA bytes as a flat array (width * height * 4)
    /// Layout: [r0, g0, b0, a0, r1, g1, b1, a1, ...]
    data: Vec<u8>,
}

impl Frame {
    /// Create a fully transparent frame of the given size.
    pub fn blank(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; width as usize * height as usize * 4],
        }
    }

    /// Create a frame from raw RGBA bytes.
    ///
    /// The buffer length must equal `width * height * 4`.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Result<Self, SequenceError> {
        let expected = width as usize * height as usize * 4;
        if data.len() != expected {
            return Err(SequenceError::BadBufferLength {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Build a frame from a buffer whose length is already known to match.
    pub(crate) fn from_raw_unchecked(width: u32, height: u32, data: Vec<u8>) -> Self {
        debug_assert_eq!(data.len(), width as usize * height as usize * 4);
        Self {
            width,
            height,
            data,
        }
    }

    /// Frame width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Frame height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Frame dimensions as `(width, height)`.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// The raw RGBA bytes.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Get the color at the given position.
    ///
    /// Returns None if position is out of bounds.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        if x < self.width && y < self.height {
            let idx = (y as usize * self.width as usize + x as usize) * 4;
            Some(Rgba::from_bytes([
                self.data[idx],
                self.data[idx + 1],
                self.data[idx + 2],
                self.data[idx + 3],
            ]))
        } else {
            None
        }
    }

    /// True when every pixel is at its default (fully transparent) value.
    pub fn is_blank(&self) -> bool {
        self.data.iter().all(|&b| b == 0)
    }
}

/// The ordered collection of frames in a session.
///
/// Insertion order is display/playback order. The sequence is non-empty
/// from construction on (it starts with one blank frame) and every frame
/// shares the same fixed dimensions. There is no delete, reorder, or
/// merge, only read, replace, and append.
#[derive(Clone, Debug)]
pub struct FrameSequence {
    width: u32,
    height: u32,
    frames: Vec<Frame>,
}

impl FrameSequence {
    /// Create a sequence with a single blank frame of the given size.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            frames: vec![Frame::blank(width, height)],
        }
    }

    /// Fixed frame width shared by every frame in the sequence.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Fixed frame height shared by every frame in the sequence.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of frames in the sequence. Always at least 1.
    #[inline]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// A sequence is never empty, but clippy expects the pair.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Get the frame at the given index.
    ///
    /// Returns None if index is out of bounds.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&Frame> {
        self.frames.get(index)
    }

    /// All frames in playback order.
    #[inline]
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Replace the frame at `index` with `frame`.
    ///
    /// The frame must match the sequence's fixed dimensions. Replacing an
    /// out-of-range index is a no-op (callers always index via playback
    /// state, which stays in bounds).
    pub fn replace(&mut self, index: usize, frame: Frame) -> Result<(), SequenceError> {
        self.check_dimensions(&frame)?;
        if let Some(slot) = self.frames.get_mut(index) {
            *slot = frame;
        }
        Ok(())
    }

    /// Append `frame` at the end of the sequence.
    pub fn append(&mut self, frame: Frame) -> Result<(), SequenceError> {
        self.check_dimensions(&frame)?;
        self.frames.push(frame);
        Ok(())
    }

    /// Append a blank frame and return its index.
    pub fn append_blank(&mut self) -> usize {
        self.frames.push(Frame::blank(self.width, self.height));
        self.frames.len() - 1
    }

    /// Replace the frame at `index` with a blank one.
    pub fn clear_at(&mut self, index: usize) {
        if let Some(slot) = self.frames.get_mut(index) {
            *slot = Frame::blank(self.width, self.height);
        }
    }

    fn check_dimensions(&self, frame: &Frame) -> Result<(), SequenceError> {
        if frame.dimensions() != (self.width, self.height) {
            return Err(SequenceError::DimensionMismatch {
                expected: (self.width, self.height),
                actual: frame.dimensions(),
            });
        }
        Ok(())
    }
}
