use crate::error::{Result, SadMatchingError};
use std::path::Path;

/// Synthetic plane contents, useful for benchmarking and demos.
#[derive(Debug, Clone, Copy)]
pub enum TestPattern {
    /// Intensity rises left to right and top to bottom.
    Ramp,
    /// Alternating 0/255 cells.
    Checkerboard,
    /// Every pixel set to the given value.
    Constant(i32),
}

/// A row-major 2D plane of signed pixel intensities.
///
/// Dimensions travel with the storage; every accessor takes `(y, x)` and
/// indexes as `y * width + x`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plane {
    pub data: Vec<i32>,
    pub width: u32,
    pub height: u32,
}

impl Plane {
    /// Create a zero-filled plane.
    pub fn new(height: u32, width: u32) -> Self {
        Self {
            data: vec![0; height as usize * width as usize],
            width,
            height,
        }
    }

    /// Wrap an existing row-major pixel vector.
    pub fn from_pixels(height: u32, width: u32, data: Vec<i32>) -> Result<Self> {
        if data.len() != height as usize * width as usize {
            return Err(SadMatchingError::ShapeMismatch {
                expected_height: height,
                expected_width: width,
                height: (data.len() / width.max(1) as usize) as u32,
                width,
            });
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Load an image from file and convert to a grayscale intensity plane.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let img = image::open(path)?.to_luma8();
        let (width, height) = img.dimensions();
        let data = img.pixels().map(|pixel| pixel[0] as i32).collect();
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Create a synthetic test plane (useful for benchmarking).
    pub fn test_pattern(height: u32, width: u32, pattern: TestPattern) -> Self {
        let mut plane = Self::new(height, width);
        for y in 0..height {
            for x in 0..width {
                let value = match pattern {
                    TestPattern::Ramp => (y + x) as i32,
                    TestPattern::Checkerboard => {
                        if (y + x) % 2 == 0 {
                            0
                        } else {
                            255
                        }
                    }
                    TestPattern::Constant(v) => v,
                };
                plane.set(y, x, value);
            }
        }
        plane
    }

    #[inline]
    pub fn idx(&self, y: u32, x: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    #[inline]
    pub fn get(&self, y: u32, x: u32) -> i32 {
        self.data[self.idx(y, x)]
    }

    #[inline]
    pub fn set(&mut self, y: u32, x: u32, value: i32) {
        let idx = self.idx(y, x);
        self.data[idx] = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_pixels_rejects_wrong_length() {
        let result = Plane::from_pixels(2, 3, vec![0; 5]);
        assert!(matches!(
            result,
            Err(SadMatchingError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn row_major_indexing() {
        let plane = Plane::from_pixels(2, 3, vec![1, 2, 3, 4, 5, 6]).unwrap();
        assert_eq!(plane.get(0, 0), 1);
        assert_eq!(plane.get(0, 2), 3);
        assert_eq!(plane.get(1, 0), 4);
        assert_eq!(plane.get(1, 2), 6);
    }

    #[test]
    fn checkerboard_alternates() {
        let plane = Plane::test_pattern(2, 2, TestPattern::Checkerboard);
        assert_eq!(plane.data, vec![0, 255, 255, 0]);
    }
}
