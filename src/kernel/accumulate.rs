//! SAD accumulation over one window placement.
//!
//! Each function is a pure reduction: no side effects, no retained state.
//! Sums accumulate in `i64`; callers converting to `i32` storage must check
//! the conversion. The sum is bounded by
//! `frame_height * frame_width * max |REF - FRAME|`, so `i64` cannot overflow
//! for any plane that fits in memory.

use crate::plane::Plane;

/// Sum of absolute differences between `frame` and the window of `reference`
/// whose top-left corner is `(y, x)`. Frame dimensions are runtime values.
///
/// The caller must guarantee the window lies inside `reference`.
pub fn sad_window(reference: &Plane, frame: &Plane, y: u32, x: u32) -> i64 {
    let mut sad: i64 = 0;
    for i in 0..frame.height {
        for j in 0..frame.width {
            let r = reference.get(y + i, x + j) as i64;
            let f = frame.get(i, j) as i64;
            sad += (r - f).abs();
        }
    }
    sad
}

/// Same reduction with frame dimensions fixed at compile time, giving the
/// compiler constant trip counts to unroll. Must be numerically identical to
/// [`sad_window`] for equal inputs; the shape is a performance transform only.
pub fn sad_window_fixed<const FRAME_HEIGHT: usize, const FRAME_WIDTH: usize>(
    reference: &Plane,
    frame: &Plane,
    y: u32,
    x: u32,
) -> i64 {
    let mut sad: i64 = 0;
    for i in 0..FRAME_HEIGHT {
        for j in 0..FRAME_WIDTH {
            let r = reference.get(y + i as u32, x + j as u32) as i64;
            let f = frame.data[i * FRAME_WIDTH + j] as i64;
            sad += (r - f).abs();
        }
    }
    sad
}

/// The 4x4 special case. The frame offset is spelled as an explicit
/// `row * 4 + col`; a shift-based form would parse as `row << (2 + col)` and
/// address the wrong element.
pub fn sad_window_4x4(reference: &Plane, frame: &Plane, y: u32, x: u32) -> i64 {
    let mut sad: i64 = 0;
    for i in 0..4usize {
        for j in 0..4usize {
            let r = reference.get(y + i as u32, x + j as u32) as i64;
            let f = frame.data[i * 4 + j] as i64;
            sad += (r - f).abs();
        }
    }
    sad
}
