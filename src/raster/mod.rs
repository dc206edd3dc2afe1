//! Raster I/O: decoding the target image and encoding snapshots.
//!
//! Any format the `image` crate can decode is accepted as a target; it is
//! flattened to 8-bit RGB triples in row-major order. Snapshots are written
//! as 24-bit bitmaps named after the generation they were taken at:
//!
//! ```text
//! out1000.bmp
//! out2000.bmp
//! ...
//! outfinal.bmp
//! ```

use std::io;
use std::path::PathBuf;

mod snapshot;
mod target;

pub use snapshot::{BitmapSnapshotWriter, SnapshotSink, SnapshotTag, save_individual, save_rgb};
pub use target::TargetImage;

/// Image decode/encode errors.
#[derive(Debug, thiserror::Error)]
pub enum ImageError {
    #[error("Failed to decode {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        source: image::ImageError,
    },
    #[error("Failed to encode {}: {source}", .path.display())]
    Encode {
        path: PathBuf,
        source: image::ImageError,
    },
    #[error("Failed to prepare {}: {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },
    #[error("Image dimensions must be non-zero")]
    EmptyImage,
    #[error("{width}x{height} image needs {expected} values, got {actual}")]
    BufferSize {
        width: usize,
        height: usize,
        expected: usize,
        actual: usize,
    },
}
