use thiserror::Error;

#[derive(Error, Debug)]
pub enum SadMatchingError {
    #[error("window at ({y}, {x}) reaches outside the reference plane ({ref_height}x{ref_width})")]
    OutOfBounds {
        y: u32,
        x: u32,
        ref_height: u32,
        ref_width: u32,
    },

    #[error("result coordinate ({y}, {x}) is owned by more than one tile")]
    PartitionOverlap { y: u32, x: u32 },

    #[error("result coordinate ({y}, {x}) is owned by no tile")]
    PartitionGap { y: u32, x: u32 },

    #[error("SAD at ({y}, {x}) does not fit in an i32")]
    Overflow { y: u32, x: u32 },

    #[error("expected {expected_height}x{expected_width}, got {height}x{width}")]
    ShapeMismatch {
        expected_height: u32,
        expected_width: u32,
        height: u32,
        width: u32,
    },

    #[error("grid layout dimensions must be non-zero")]
    EmptyLayout,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Image error: {0}")]
    ImageError(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, SadMatchingError>;
