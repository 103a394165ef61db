//! Per-worker kernels: the four work-distribution strategies.
//!
//! Every kernel composes the same three steps for one worker: resolve the
//! coordinates the worker owns, accumulate the SAD for each placement, and
//! store each scalar into the result plane. The strategies differ only in how
//! coordinates are resolved and whether frame dimensions are runtime values.
//! A kernel returns `Ok(())` once its own iteration range completes; it makes
//! no claim about the rest of the launch.
//!
//! Window placements are bounds-checked at the kernel boundary before any
//! plane access, so a misconfigured launch surfaces as `OutOfBounds` rather
//! than as silently wrong output.

use crate::error::{Result, SadMatchingError};
use crate::grid::identity::{BlockShape, GridIdentity};
use crate::grid::resolver::{global_coord, owned_coords};
use crate::kernel::accumulate::{sad_window, sad_window_4x4, sad_window_fixed};
use crate::plane::Plane;

fn check_placement(
    reference: &Plane,
    result: &Plane,
    frame_height: u32,
    frame_width: u32,
    y: u32,
    x: u32,
) -> Result<()> {
    if y >= result.height
        || x >= result.width
        || y + frame_height > reference.height
        || x + frame_width > reference.width
    {
        return Err(SadMatchingError::OutOfBounds {
            y,
            x,
            ref_height: reference.height,
            ref_width: reference.width,
        });
    }
    Ok(())
}

fn store(result: &mut Plane, y: u32, x: u32, sad: i64) -> Result<()> {
    let value = i32::try_from(sad).map_err(|_| SadMatchingError::Overflow { y, x })?;
    result.set(y, x, value);
    Ok(())
}

/// One output per tile.
///
/// The worker's global grid position is its output coordinate, so the launch
/// needs exactly one worker per result element. Degenerate case of the
/// block-cyclic strategy with the block shape equal to the tile grid.
pub fn sad_single_work_per_tile(
    reference: &Plane,
    frame: &Plane,
    result: &mut Plane,
    identity: &GridIdentity,
) -> Result<()> {
    let (y, x) = global_coord(identity);
    check_placement(reference, result, frame.height, frame.width, y, x)?;
    store(result, y, x, sad_window(reference, frame, y, x))
}

/// Block-cyclic distribution: multiple outputs per tile.
///
/// The worker's group owns a `block` rectangle of the output; the worker
/// visits its strided share of that rectangle. When the block shape is not a
/// multiple of the tile grid, trailing workers receive fewer iterations.
pub fn sad_multiple_work_per_tile(
    reference: &Plane,
    frame: &Plane,
    result: &mut Plane,
    block: BlockShape,
    identity: &GridIdentity,
) -> Result<()> {
    for (y, x) in owned_coords(identity, block) {
        check_placement(reference, result, frame.height, frame.width, y, x)?;
        store(result, y, x, sad_window(reference, frame, y, x))?;
    }
    Ok(())
}

/// Block-cyclic distribution with the frame hardcoded to 4x4.
///
/// Must stay numerically identical to [`sad_multiple_work_per_tile`] with a
/// 4x4 frame; the conformance tests assert that equivalence.
pub fn sad_fixed_frame_4x4(
    reference: &Plane,
    frame: &Plane,
    result: &mut Plane,
    block: BlockShape,
    identity: &GridIdentity,
) -> Result<()> {
    if frame.height != 4 || frame.width != 4 {
        return Err(SadMatchingError::ShapeMismatch {
            expected_height: 4,
            expected_width: 4,
            height: frame.height,
            width: frame.width,
        });
    }
    for (y, x) in owned_coords(identity, block) {
        check_placement(reference, result, 4, 4, y, x)?;
        store(result, y, x, sad_window_4x4(reference, frame, y, x))?;
    }
    Ok(())
}

/// Block-cyclic distribution with frame dimensions fixed at compile time.
///
/// Monomorphization lets the compiler unroll and constant-fold the inner
/// accumulation loops. Functionally identical to
/// [`sad_multiple_work_per_tile`] for equal inputs.
pub fn sad_fixed_frame<const FRAME_HEIGHT: usize, const FRAME_WIDTH: usize>(
    reference: &Plane,
    frame: &Plane,
    result: &mut Plane,
    block: BlockShape,
    identity: &GridIdentity,
) -> Result<()> {
    if frame.height as usize != FRAME_HEIGHT || frame.width as usize != FRAME_WIDTH {
        return Err(SadMatchingError::ShapeMismatch {
            expected_height: FRAME_HEIGHT as u32,
            expected_width: FRAME_WIDTH as u32,
            height: frame.height,
            width: frame.width,
        });
    }
    for (y, x) in owned_coords(identity, block) {
        check_placement(reference, result, frame.height, frame.width, y, x)?;
        store(
            result,
            y,
            x,
            sad_window_fixed::<FRAME_HEIGHT, FRAME_WIDTH>(reference, frame, y, x),
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::identity::{GroupShape, TileCoord};

    fn identity_at(gy: u32, gx: u32, ty: u32, tx: u32) -> GridIdentity {
        GridIdentity {
            group: TileCoord { y: gy, x: gx },
            tile: TileCoord { y: ty, x: tx },
            group_shape: GroupShape {
                tiles_y: 2,
                tiles_x: 2,
            },
        }
    }

    #[test]
    fn rejects_placement_outside_result() {
        let reference = Plane::test_pattern(4, 4, crate::plane::TestPattern::Ramp);
        let frame = Plane::test_pattern(2, 2, crate::plane::TestPattern::Constant(1));
        let mut result = Plane::new(3, 3);
        // Group (1, 1) starts at (3, 3), past the 3x3 result.
        let block = BlockShape {
            height: 3,
            width: 3,
        };
        let status = sad_multiple_work_per_tile(
            &reference,
            &frame,
            &mut result,
            block,
            &identity_at(1, 1, 0, 0),
        );
        assert!(matches!(
            status,
            Err(SadMatchingError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn surfaces_overflow_instead_of_wrapping() {
        let reference = Plane::from_pixels(2, 2, vec![1 << 30; 4]).unwrap();
        let frame = Plane::from_pixels(2, 2, vec![-(1 << 30); 4]).unwrap();
        let mut result = Plane::new(1, 1);
        let block = BlockShape {
            height: 1,
            width: 1,
        };
        let status = sad_multiple_work_per_tile(
            &reference,
            &frame,
            &mut result,
            block,
            &identity_at(0, 0, 0, 0),
        );
        assert!(matches!(
            status,
            Err(SadMatchingError::Overflow { y: 0, x: 0 })
        ));
    }

    #[test]
    fn fixed_4x4_rejects_other_frame_shapes() {
        let reference = Plane::new(8, 8);
        let frame = Plane::new(3, 3);
        let mut result = Plane::new(5, 5);
        let block = BlockShape {
            height: 5,
            width: 5,
        };
        let status = sad_fixed_frame_4x4(
            &reference,
            &frame,
            &mut result,
            block,
            &identity_at(0, 0, 0, 0),
        );
        assert!(matches!(
            status,
            Err(SadMatchingError::ShapeMismatch { .. })
        ));
    }
}
