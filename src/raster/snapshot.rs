//! Snapshot writing for the best individual of a generation.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use image::{ImageFormat, RgbImage};

use super::ImageError;
use crate::compute::evolution::Individual;
use crate::schema::SnapshotConfig;

/// Which point of the run a snapshot belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotTag {
    Generation(usize),
    Final,
}

impl fmt::Display for SnapshotTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapshotTag::Generation(generation) => write!(f, "{generation}"),
            SnapshotTag::Final => f.write_str("final"),
        }
    }
}

/// Receives individuals the engine wants written out.
pub trait SnapshotSink {
    /// Persist `individual` (a `width` x `height` image), returning where it went.
    fn write_snapshot(
        &mut self,
        tag: SnapshotTag,
        individual: &Individual,
        width: usize,
        height: usize,
    ) -> Result<PathBuf, ImageError>;
}

/// Encode interleaved RGB bytes as a bitmap.
pub fn save_rgb(bytes: &[u8], width: usize, height: usize, path: &Path) -> Result<(), ImageError> {
    let expected = width * height * 3;
    if bytes.len() != expected {
        return Err(ImageError::BufferSize {
            width,
            height,
            expected,
            actual: bytes.len(),
        });
    }

    let image = RgbImage::from_raw(width as u32, height as u32, bytes.to_vec()).ok_or(
        ImageError::BufferSize {
            width,
            height,
            expected,
            actual: bytes.len(),
        },
    )?;

    image
        .save_with_format(path, ImageFormat::Bmp)
        .map_err(|source| ImageError::Encode {
            path: path.to_path_buf(),
            source,
        })
}

/// Encode an individual as a bitmap.
pub fn save_individual(
    individual: &Individual,
    width: usize,
    height: usize,
    path: &Path,
) -> Result<(), ImageError> {
    save_rgb(&individual.to_rgb_bytes(), width, height, path)
}

/// Writes `{prefix}{tag}.bmp` files into a directory.
#[derive(Debug, Clone)]
pub struct BitmapSnapshotWriter {
    output_dir: PathBuf,
    prefix: String,
}

impl BitmapSnapshotWriter {
    pub fn new<P: Into<PathBuf>>(output_dir: P, prefix: impl Into<String>) -> Self {
        Self {
            output_dir: output_dir.into(),
            prefix: prefix.into(),
        }
    }

    pub fn from_config(config: &SnapshotConfig) -> Self {
        Self::new(config.output_dir.clone(), config.prefix.clone())
    }

    /// File a snapshot with this tag is written to.
    pub fn path_for(&self, tag: SnapshotTag) -> PathBuf {
        self.output_dir.join(format!("{}{}.bmp", self.prefix, tag))
    }
}

impl SnapshotSink for BitmapSnapshotWriter {
    fn write_snapshot(
        &mut self,
        tag: SnapshotTag,
        individual: &Individual,
        width: usize,
        height: usize,
    ) -> Result<PathBuf, ImageError> {
        fs::create_dir_all(&self.output_dir).map_err(|source| ImageError::Io {
            path: self.output_dir.clone(),
            source,
        })?;

        let path = self.path_for(tag);
        save_individual(individual, width, height, &path)?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::TargetImage;
    use tempfile::tempdir;

    #[test]
    fn test_snapshot_naming() {
        let writer = BitmapSnapshotWriter::new("runs", "out");
        assert_eq!(
            writer.path_for(SnapshotTag::Generation(3000)),
            Path::new("runs").join("out3000.bmp")
        );
        assert_eq!(
            writer.path_for(SnapshotTag::Final),
            Path::new("runs").join("outfinal.bmp")
        );
    }

    #[test]
    fn test_write_and_reload() {
        let dir = tempdir().unwrap();
        let mut writer = BitmapSnapshotWriter::new(dir.path().join("snaps"), "out");
        let individual =
            Individual::from_pixels(vec![[255, 0, 0], [0, 250, 0], [0, 0, 10], [300, -20, 40]]);

        let path = writer
            .write_snapshot(SnapshotTag::Generation(1000), &individual, 2, 2)
            .unwrap();
        assert!(path.ends_with("out1000.bmp"));

        let reloaded = TargetImage::load(&path).unwrap();
        assert_eq!(reloaded.width(), 2);
        assert_eq!(reloaded.height(), 2);
        assert_eq!(
            reloaded.pixels(),
            &[[255, 0, 0], [0, 250, 0], [0, 0, 10], [255, 0, 40]]
        );
    }

    #[test]
    fn test_wrong_dimensions_rejected() {
        let dir = tempdir().unwrap();
        let individual = Individual::filled(3, [0, 0, 0]);

        let result = save_individual(&individual, 2, 2, &dir.path().join("bad.bmp"));
        assert!(matches!(
            result,
            Err(ImageError::BufferSize {
                expected: 12,
                actual: 9,
                ..
            })
        ));
    }

    #[test]
    fn test_unwritable_directory() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, b"x").unwrap();

        let mut writer = BitmapSnapshotWriter::new(blocker.join("nested"), "out");
        let result = writer.write_snapshot(
            SnapshotTag::Final,
            &Individual::filled(1, [0, 0, 0]),
            1,
            1,
        );
        assert!(matches!(result, Err(ImageError::Io { .. })));
    }
}
