//! Still-image export.
//!
//! Every frame in the sequence is painted onto a reusable scratch
//! buffer and encoded as a lossless PNG, but only the first encoded
//! image is offered to the user, under a fixed filename. The rest are
//! computed and discarded.
//
// TODO: bundle all encoded frames into a real animated export
// (GIF/APNG) instead of discarding everything after frame 0.

use std::io::Write;
use std::path::{Path, PathBuf};

use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};
use log::debug;

use crate::frame::{Frame, FrameSequence};

/// Fixed name of the exported image file.
pub const EXPORT_FILENAME: &str = "animation-frame.png";

/// Error type for export operations.
#[derive(Debug)]
pub enum ExportError {
    /// PNG encoding failed
    Encode(image::ImageError),
    /// Writing the exported file failed
    Io(std::io::Error),
}

impl std::fmt::Display for ExportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportError::Encode(e) => write!(f, "PNG encode error: {e}"),
            ExportError::Io(e) => write!(f, "Export write error: {e}"),
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ExportError::Encode(e) => Some(e),
            ExportError::Io(e) => Some(e),
        }
    }
}

impl From<image::ImageError> for ExportError {
    fn from(e: image::ImageError) -> Self {
        ExportError::Encode(e)
    }
}

impl From<std::io::Error> for ExportError {
    fn from(e: std::io::Error) -> Self {
        ExportError::Io(e)
    }
}

/// The single image an export produces.
#[derive(Clone, Debug)]
pub struct ExportedImage {
    /// Encoded PNG bytes of the first frame
    pub png: Vec<u8>,
    /// Fixed download filename
    pub filename: &'static str,
    /// How many additional frames were encoded and then thrown away
    pub discarded: usize,
}

/// Encode a single frame as PNG bytes.
pub fn encode_png(frame: &Frame) -> Result<Vec<u8>, ExportError> {
    let mut out = Vec::new();
    let encoder = PngEncoder::new(&mut out);
    encoder.write_image(
        frame.data(),
        frame.width(),
        frame.height(),
        ExtendedColorType::Rgba8,
    )?;
    Ok(out)
}

/// Export the sequence as one still image of its first frame.
///
/// Renders every frame in order onto a scratch buffer and encodes each
/// one; only the first result is kept. `discarded` reports how many
/// encodes were thrown away.
pub fn export_sequence(sequence: &FrameSequence) -> Result<ExportedImage, ExportError> {
    let (width, height) = (sequence.width(), sequence.height());
    let mut scratch = vec![0u8; width as usize * height as usize * 4];

    let mut first: Option<Vec<u8>> = None;
    let mut discarded = 0;
    for frame in sequence.frames() {
        // Paint onto the scratch surface, then encode its contents.
        scratch.copy_from_slice(frame.data());
        let mut png = Vec::new();
        let encoder = PngEncoder::new(&mut png);
        encoder.write_image(&scratch, width, height, ExtendedColorType::Rgba8)?;

        if first.is_none() {
            first = Some(png);
        } else {
            discarded += 1;
        }
    }

    // The sequence is non-empty by construction, so `first` is set.
    let png = first.unwrap_or_default();
    debug!(
        "exported {} ({} bytes, {} frames encoded and discarded)",
        EXPORT_FILENAME,
        png.len(),
        discarded
    );
    Ok(ExportedImage {
        png,
        filename: EXPORT_FILENAME,
        discarded,
    })
}

/// Export the sequence and write the image into `dir` under the fixed
/// filename. Returns the full path of the written file.
pub fn write_export(sequence: &FrameSequence, dir: &Path) -> Result<PathBuf, ExportError> {
    let exported = export_sequence(sequence)?;
    let path = dir.join(exported.filename);
    let mut file = std::fs::File::create(&path)?;
    file.write_all(&exported.png)?;
    Ok(path)
}
