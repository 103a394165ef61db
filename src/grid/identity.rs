use crate::error::{Result, SadMatchingError};

/// Zero-based (y, x) position, either of a tile group within the launch grid
/// or of a tile within its group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileCoord {
    pub y: u32,
    pub x: u32,
}

/// Tiles per group, in each axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupShape {
    pub tiles_y: u32,
    pub tiles_x: u32,
}

/// The rectangle of output coordinates owned by one tile group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockShape {
    pub height: u32,
    pub width: u32,
}

/// One worker's position in the launch: which group it belongs to, its slot
/// inside that group, and the group-local grid shape.
///
/// Carried explicitly through every kernel call so that coordinate resolution
/// is a pure function of its arguments, independent of any execution runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridIdentity {
    pub group: TileCoord,
    pub tile: TileCoord,
    pub group_shape: GroupShape,
}

/// Full launch geometry: a `groups_y x groups_x` grid of tile groups, each
/// holding `group_shape` tiles and owning a `block` of output coordinates.
///
/// Group `(gy, gx)` owns the output rectangle starting at
/// `(gy * block.height, gx * block.width)`, so the grid as a whole covers
/// `groups_y * block.height` rows by `groups_x * block.width` columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridLayout {
    pub groups_y: u32,
    pub groups_x: u32,
    pub group_shape: GroupShape,
    pub block: BlockShape,
}

impl GridLayout {
    pub fn new(
        groups_y: u32,
        groups_x: u32,
        group_shape: GroupShape,
        block: BlockShape,
    ) -> Result<Self> {
        if groups_y == 0
            || groups_x == 0
            || group_shape.tiles_y == 0
            || group_shape.tiles_x == 0
            || block.height == 0
            || block.width == 0
        {
            return Err(SadMatchingError::EmptyLayout);
        }
        Ok(Self {
            groups_y,
            groups_x,
            group_shape,
            block,
        })
    }

    /// A single tile group whose tiles stride across the entire output.
    pub fn single_group(group_shape: GroupShape, output_height: u32, output_width: u32) -> Result<Self> {
        Self::new(
            1,
            1,
            group_shape,
            BlockShape {
                height: output_height,
                width: output_width,
            },
        )
    }

    /// The one-output-per-tile geometry: each group's block matches its tile
    /// grid exactly, so every tile owns a single coordinate.
    pub fn one_output_per_tile(groups_y: u32, groups_x: u32, group_shape: GroupShape) -> Result<Self> {
        Self::new(
            groups_y,
            groups_x,
            group_shape,
            BlockShape {
                height: group_shape.tiles_y,
                width: group_shape.tiles_x,
            },
        )
    }

    /// Rows of output covered by the whole grid.
    pub fn output_height(&self) -> u32 {
        self.groups_y * self.block.height
    }

    /// Columns of output covered by the whole grid.
    pub fn output_width(&self) -> u32 {
        self.groups_x * self.block.width
    }

    /// Number of physical workers in the launch.
    pub fn worker_count(&self) -> usize {
        self.groups_y as usize
            * self.groups_x as usize
            * self.group_shape.tiles_y as usize
            * self.group_shape.tiles_x as usize
    }

    /// Enumerate the identity of every worker in the launch.
    pub fn identities(&self) -> impl Iterator<Item = GridIdentity> {
        let groups_y = self.groups_y;
        let groups_x = self.groups_x;
        let group_shape = self.group_shape;
        (0..groups_y).flat_map(move |gy| {
            (0..groups_x).flat_map(move |gx| {
                (0..group_shape.tiles_y).flat_map(move |ty| {
                    (0..group_shape.tiles_x).map(move |tx| GridIdentity {
                        group: TileCoord { y: gy, x: gx },
                        tile: TileCoord { y: ty, x: tx },
                        group_shape,
                    })
                })
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_dimensions() {
        let shape = GroupShape {
            tiles_y: 2,
            tiles_x: 0,
        };
        let block = BlockShape {
            height: 4,
            width: 4,
        };
        assert!(matches!(
            GridLayout::new(1, 1, shape, block),
            Err(SadMatchingError::EmptyLayout)
        ));
    }

    #[test]
    fn identity_enumeration_is_dense() {
        let layout = GridLayout::new(
            2,
            3,
            GroupShape {
                tiles_y: 2,
                tiles_x: 2,
            },
            BlockShape {
                height: 4,
                width: 4,
            },
        )
        .unwrap();
        let identities: Vec<_> = layout.identities().collect();
        assert_eq!(identities.len(), layout.worker_count());
        assert_eq!(identities.len(), 2 * 3 * 2 * 2);
        // First worker sits at the origin of the first group.
        assert_eq!(identities[0].group, TileCoord { y: 0, x: 0 });
        assert_eq!(identities[0].tile, TileCoord { y: 0, x: 0 });
    }

    #[test]
    fn covered_output_matches_group_blocks() {
        let layout = GridLayout::new(
            3,
            2,
            GroupShape {
                tiles_y: 2,
                tiles_x: 2,
            },
            BlockShape {
                height: 5,
                width: 7,
            },
        )
        .unwrap();
        assert_eq!(layout.output_height(), 15);
        assert_eq!(layout.output_width(), 14);
    }
}
