//! Grid SAD Matching Library
//!
//! Computes sliding-window Sum of Absolute Differences (SAD) maps — the core
//! primitive of block matching and motion estimation — distributed across a
//! 2D grid of independent workers organised into rectangular tile groups.
//!
//! The interesting part is not the arithmetic but the work partitioning: a
//! worker's identity (its group's position in the grid plus its own slot
//! within the group) and a declared per-group block shape determine, through
//! integer arithmetic alone, the disjoint set of output coordinates that
//! worker owns. The union of those sets tiles the output exactly once, so the
//! write path needs no synchronisation of any kind.
//!
//! ## Distribution strategies
//!
//! Four per-worker kernels share the resolve → accumulate → write shape and
//! differ only in coordinate resolution and frame-dimension binding:
//!
//! 1. **One output per tile** (`sad_single_work_per_tile`) — the worker's
//!    global grid position is its output coordinate; needs one worker per
//!    result element.
//! 2. **Block-cyclic** (`sad_multiple_work_per_tile`) — each group owns a
//!    rectangular block of the output and its tiles stride through it by the
//!    group's tile-grid shape, splitting the block by residue class. Load
//!    stays balanced even when the block exceeds the tile count.
//! 3. **Fixed 4x4 frame** (`sad_fixed_frame_4x4`) — block-cyclic with the
//!    window hardcoded to 4x4 and offsets spelled as explicit multiplication.
//! 4. **Const-generic frame** (`sad_fixed_frame`) — block-cyclic with frame
//!    dimensions monomorphised at compile time; numerically identical to the
//!    runtime-dimension kernel.
//!
//! ## Parallel execution
//!
//! [`GridSadMatcher`] runs the resolve/accumulate/write pipeline for every
//! worker of a [`GridLayout`] as independent rayon tasks: partition up front,
//! fork, join, no merging. Partition coverage is validated in debug builds.

pub mod error;
pub mod grid;
pub mod kernel;
pub mod matcher;
pub mod plane;

pub use error::{Result, SadMatchingError};
pub use grid::{
    check_disjoint_cover, global_coord, owned_coords, validate_cover, BlockShape, GridIdentity,
    GridLayout, GroupShape, OwnedCoords, TileCoord,
};
pub use kernel::{
    sad_fixed_frame, sad_fixed_frame_4x4, sad_multiple_work_per_tile, sad_single_work_per_tile,
    sad_window, sad_window_4x4, sad_window_fixed,
};
pub use matcher::{GridSadMatcher, TemplateMatch};
pub use plane::{Plane, TestPattern};
