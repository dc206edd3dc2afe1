//! The target image every individual is compared against.

use std::path::Path;

use image::RgbImage;

use super::ImageError;

/// Immutable RGB pixel buffer in row-major order, origin top-left.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetImage {
    width: usize,
    height: usize,
    pixels: Vec<[u8; 3]>,
}

impl TargetImage {
    /// Build from raw RGB triples.
    pub fn from_pixels(
        width: usize,
        height: usize,
        pixels: Vec<[u8; 3]>,
    ) -> Result<Self, ImageError> {
        if width == 0 || height == 0 {
            return Err(ImageError::EmptyImage);
        }
        if pixels.len() != width * height {
            return Err(ImageError::BufferSize {
                width,
                height,
                expected: width * height,
                actual: pixels.len(),
            });
        }

        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Build from a decoded RGB image.
    pub fn from_rgb_image(image: &RgbImage) -> Result<Self, ImageError> {
        let (width, height) = image.dimensions();
        let pixels = image.pixels().map(|p| p.0).collect();
        Self::from_pixels(width as usize, height as usize, pixels)
    }

    /// Decode an image file, dropping any alpha channel.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ImageError> {
        let path = path.as_ref();
        let decoded = image::open(path).map_err(|source| ImageError::Decode {
            path: path.to_path_buf(),
            source,
        })?;

        let target = Self::from_rgb_image(&decoded.to_rgb8())?;
        log::info!(
            "Loaded target {} ({}x{})",
            path.display(),
            target.width,
            target.height
        );
        Ok(target)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Pixel count (`width * height`).
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    pub fn pixels(&self) -> &[[u8; 3]] {
        &self.pixels
    }

    /// Pixel at column `x`, row `y`, or `None` outside the image.
    pub fn get(&self, x: usize, y: usize) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[y * self.width + x])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_from_pixels_checks_size() {
        assert!(matches!(
            TargetImage::from_pixels(2, 2, vec![[0, 0, 0]; 3]),
            Err(ImageError::BufferSize {
                expected: 4,
                actual: 3,
                ..
            })
        ));
        assert!(matches!(
            TargetImage::from_pixels(0, 2, Vec::new()),
            Err(ImageError::EmptyImage)
        ));
    }

    #[test]
    fn test_row_major_lookup() {
        let pixels: Vec<[u8; 3]> = (0..6).map(|i| [i as u8, 0, 0]).collect();
        let target = TargetImage::from_pixels(3, 2, pixels).unwrap();

        assert_eq!(target.get(0, 0), Some([0, 0, 0]));
        assert_eq!(target.get(2, 0), Some([2, 0, 0]));
        assert_eq!(target.get(0, 1), Some([3, 0, 0]));
        assert_eq!(target.get(2, 1), Some([5, 0, 0]));
        assert_eq!(target.get(3, 0), None);
        assert_eq!(target.get(0, 2), None);
    }

    #[test]
    fn test_load_png() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("target.png");

        let mut image = RgbImage::new(2, 1);
        image.put_pixel(0, 0, image::Rgb([255, 0, 0]));
        image.put_pixel(1, 0, image::Rgb([0, 0, 255]));
        image.save(&path).unwrap();

        let target = TargetImage::load(&path).unwrap();
        assert_eq!(target.width(), 2);
        assert_eq!(target.height(), 1);
        assert_eq!(target.pixels(), &[[255, 0, 0], [0, 0, 255]]);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        let result = TargetImage::load(dir.path().join("missing.png"));
        assert!(matches!(result, Err(ImageError::Decode { .. })));
    }

    #[test]
    fn test_load_corrupt_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("corrupt.png");
        std::fs::write(&path, b"definitely not a png").unwrap();

        assert!(matches!(
            TargetImage::load(&path),
            Err(ImageError::Decode { .. })
        ));
    }
}
