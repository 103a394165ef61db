//! Coordinate resolution: turning a worker's grid identity into the set of
//! output coordinates it owns.
//!
//! The distribution is block-cyclic. Each tile group owns a contiguous
//! `block.height x block.width` rectangle of the output, positioned at
//! `(group.y * block.height, group.x * block.width)`. Within that rectangle a
//! tile starts at its own offset and strides by the group's tile-grid shape in
//! each axis, so the block's index range is split by residue class modulo
//! `tiles_per_group`. Residue classes are disjoint and exhaustive, which is
//! what guarantees each output coordinate is visited exactly once across the
//! launch. When the block is not a multiple of the tile grid, trailing tiles
//! simply run out of in-block coordinates one stride earlier.

use crate::error::{Result, SadMatchingError};
use crate::grid::identity::{BlockShape, GridIdentity, GridLayout};

/// Iterator over the output coordinates owned by one worker.
///
/// Yields `(y, x)` pairs in row-major order of the worker's strided visits.
#[derive(Debug, Clone)]
pub struct OwnedCoords {
    row: u32,
    col: u32,
    first_col: u32,
    end_y: u32,
    end_x: u32,
    stride_y: u32,
    stride_x: u32,
}

impl Iterator for OwnedCoords {
    type Item = (u32, u32);

    fn next(&mut self) -> Option<(u32, u32)> {
        if self.row >= self.end_y || self.first_col >= self.end_x {
            return None;
        }
        let coord = (self.row, self.col);
        self.col += self.stride_x;
        if self.col >= self.end_x {
            self.col = self.first_col;
            self.row += self.stride_y;
        }
        Some(coord)
    }
}

/// Resolve the block-cyclic coordinate set for one worker.
pub fn owned_coords(identity: &GridIdentity, block: BlockShape) -> OwnedCoords {
    let group_start_y = identity.group.y * block.height;
    let group_start_x = identity.group.x * block.width;
    let first_row = group_start_y + identity.tile.y;
    let first_col = group_start_x + identity.tile.x;
    OwnedCoords {
        row: first_row,
        col: first_col,
        first_col,
        end_y: group_start_y + block.height,
        end_x: group_start_x + block.width,
        stride_y: identity.group_shape.tiles_y,
        stride_x: identity.group_shape.tiles_x,
    }
}

/// Resolve the single coordinate for the one-output-per-tile distribution:
/// the worker's global position in the launch grid.
pub fn global_coord(identity: &GridIdentity) -> (u32, u32) {
    (
        identity.group.y * identity.group_shape.tiles_y + identity.tile.y,
        identity.group.x * identity.group_shape.tiles_x + identity.tile.x,
    )
}

/// Check that a stream of owned coordinates tiles `[0, res_height) x
/// [0, res_width)` exactly once.
///
/// Reports the first duplicated coordinate as `PartitionOverlap` and, failing
/// that, the first unvisited coordinate as `PartitionGap`. Coordinates outside
/// the result rectangle are reported as `OutOfBounds`.
pub fn check_disjoint_cover<I>(coords: I, res_height: u32, res_width: u32) -> Result<()>
where
    I: IntoIterator<Item = (u32, u32)>,
{
    let mut visits = vec![false; res_height as usize * res_width as usize];
    for (y, x) in coords {
        if y >= res_height || x >= res_width {
            return Err(SadMatchingError::OutOfBounds {
                y,
                x,
                ref_height: res_height,
                ref_width: res_width,
            });
        }
        let idx = y as usize * res_width as usize + x as usize;
        if visits[idx] {
            return Err(SadMatchingError::PartitionOverlap { y, x });
        }
        visits[idx] = true;
    }
    if let Some(idx) = visits.iter().position(|&seen| !seen) {
        return Err(SadMatchingError::PartitionGap {
            y: (idx / res_width as usize) as u32,
            x: (idx % res_width as usize) as u32,
        });
    }
    Ok(())
}

/// Validate that a layout's workers cover the given result dimensions exactly
/// once. Materializes the full visit map, so this is a debug/test-build check,
/// not something to run per dispatch in a release build.
pub fn validate_cover(layout: &GridLayout, res_height: u32, res_width: u32) -> Result<()> {
    if layout.output_height() != res_height || layout.output_width() != res_width {
        return Err(SadMatchingError::ShapeMismatch {
            expected_height: res_height,
            expected_width: res_width,
            height: layout.output_height(),
            width: layout.output_width(),
        });
    }
    let coords = layout
        .identities()
        .flat_map(|identity| owned_coords(&identity, layout.block));
    check_disjoint_cover(coords, res_height, res_width)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::identity::{GroupShape, TileCoord};

    fn identity(gy: u32, gx: u32, ty: u32, tx: u32, tiles_y: u32, tiles_x: u32) -> GridIdentity {
        GridIdentity {
            group: TileCoord { y: gy, x: gx },
            tile: TileCoord { y: ty, x: tx },
            group_shape: GroupShape { tiles_y, tiles_x },
        }
    }

    #[test]
    fn strided_visits_in_row_major_order() {
        // 4x4 block, 2x2 tile grid: tile (0, 0) of group (0, 0) owns the
        // even-row, even-column residue class.
        let block = BlockShape {
            height: 4,
            width: 4,
        };
        let coords: Vec<_> = owned_coords(&identity(0, 0, 0, 0, 2, 2), block).collect();
        assert_eq!(coords, vec![(0, 0), (0, 2), (2, 0), (2, 2)]);
    }

    #[test]
    fn trailing_tile_gets_fewer_iterations() {
        // 5-wide block over a 2-wide tile grid: residue 0 gets columns
        // {0, 2, 4}, residue 1 gets {1, 3}.
        let block = BlockShape {
            height: 1,
            width: 5,
        };
        let even: Vec<_> = owned_coords(&identity(0, 0, 0, 0, 1, 2), block).collect();
        let odd: Vec<_> = owned_coords(&identity(0, 0, 0, 1, 1, 2), block).collect();
        assert_eq!(even, vec![(0, 0), (0, 2), (0, 4)]);
        assert_eq!(odd, vec![(0, 1), (0, 3)]);
    }

    #[test]
    fn tile_offset_past_block_owns_nothing() {
        // 3x3 tile grid over a 2x2 block: the third row/column of tiles has
        // no in-block coordinate at all.
        let block = BlockShape {
            height: 2,
            width: 2,
        };
        assert_eq!(owned_coords(&identity(0, 0, 2, 0, 3, 3), block).count(), 0);
        assert_eq!(owned_coords(&identity(0, 0, 0, 2, 3, 3), block).count(), 0);
        assert_eq!(owned_coords(&identity(0, 0, 1, 1, 3, 3), block).count(), 1);
    }

    #[test]
    fn block_offset_by_group_position() {
        let block = BlockShape {
            height: 3,
            width: 3,
        };
        let coords: Vec<_> = owned_coords(&identity(1, 2, 0, 0, 3, 3), block).collect();
        assert_eq!(coords, vec![(3, 6)]);
    }

    #[test]
    fn global_coord_scales_group_by_tile_grid() {
        assert_eq!(global_coord(&identity(1, 2, 1, 0, 2, 3)), (3, 6));
    }

    #[test]
    fn detects_overlap_and_gap() {
        let overlap = check_disjoint_cover(vec![(0, 0), (0, 1), (0, 0), (1, 0)], 2, 2);
        assert!(matches!(
            overlap,
            Err(SadMatchingError::PartitionOverlap { y: 0, x: 0 })
        ));

        let gap = check_disjoint_cover(vec![(0, 0), (0, 1), (1, 1)], 2, 2);
        assert!(matches!(
            gap,
            Err(SadMatchingError::PartitionGap { y: 1, x: 0 })
        ));

        let exact = check_disjoint_cover(vec![(0, 0), (0, 1), (1, 0), (1, 1)], 2, 2);
        assert!(exact.is_ok());
    }
}
