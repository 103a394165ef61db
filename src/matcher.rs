//! Whole-map matcher: fork-join dispatch of the block-cyclic kernel across
//! every worker in a grid layout.
//!
//! The coordinate space is partitioned up front by the resolver, one task is
//! spawned per worker, and the join needs no merge step because no two
//! workers ever write the same result element. The only shared mutable state
//! is the result plane itself, and its writes are disjoint by construction.

use crate::error::{Result, SadMatchingError};
use crate::grid::identity::{GridIdentity, GridLayout, GroupShape};
use crate::grid::resolver::owned_coords;
use crate::kernel::accumulate::sad_window;
use crate::plane::Plane;
use log::{debug, info};
use rayon::prelude::*;
use std::marker::PhantomData;

/// Result of a single template match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemplateMatch {
    pub x: u32,
    pub y: u32,
    pub sad: i32,
}

/// Shared write handle over the result storage for workers whose coordinate
/// sets are disjoint.
struct DisjointWrites<'a> {
    ptr: *mut i32,
    len: usize,
    _owner: PhantomData<&'a mut [i32]>,
}

// Workers write through raw pointers into non-overlapping elements; the
// resolver's residue-class partition is the aliasing argument.
unsafe impl Send for DisjointWrites<'_> {}
unsafe impl Sync for DisjointWrites<'_> {}

impl<'a> DisjointWrites<'a> {
    fn new(storage: &'a mut [i32]) -> Self {
        Self {
            ptr: storage.as_mut_ptr(),
            len: storage.len(),
            _owner: PhantomData,
        }
    }

    /// Store one scalar.
    ///
    /// # Safety
    /// `idx` must be in bounds and must not be written by any other worker
    /// during the dispatch.
    unsafe fn store(&self, idx: usize, value: i32) {
        debug_assert!(idx < self.len);
        *self.ptr.add(idx) = value;
    }
}

/// SAD template matcher running one independent task per tile of a grid
/// layout.
pub struct GridSadMatcher {
    layout: GridLayout,
}

impl GridSadMatcher {
    pub fn new(layout: GridLayout) -> Self {
        Self { layout }
    }

    /// Build a matcher for the given output dimensions: a single tile group
    /// with one row-cyclic tile per available thread.
    pub fn for_output(res_height: u32, res_width: u32) -> Result<Self> {
        if res_height == 0 || res_width == 0 {
            return Err(SadMatchingError::EmptyLayout);
        }
        let tiles_y = (rayon::current_num_threads() as u32).clamp(1, res_height);
        let layout = GridLayout::single_group(
            GroupShape { tiles_y, tiles_x: 1 },
            res_height,
            res_width,
        )?;
        Ok(Self::new(layout))
    }

    pub fn layout(&self) -> &GridLayout {
        &self.layout
    }

    /// Compute the full SAD map of `frame` slid over `reference`.
    ///
    /// The output has `reference - frame + 1` valid placements in each axis
    /// and must match the layout's covered rectangle exactly.
    pub fn sad_map(&self, reference: &Plane, frame: &Plane) -> Result<Plane> {
        if frame.height > reference.height || frame.width > reference.width {
            return Err(SadMatchingError::ShapeMismatch {
                expected_height: reference.height,
                expected_width: reference.width,
                height: frame.height,
                width: frame.width,
            });
        }
        let res_height = reference.height - frame.height + 1;
        let res_width = reference.width - frame.width + 1;
        if self.layout.output_height() != res_height || self.layout.output_width() != res_width {
            return Err(SadMatchingError::ShapeMismatch {
                expected_height: res_height,
                expected_width: res_width,
                height: self.layout.output_height(),
                width: self.layout.output_width(),
            });
        }

        // Full-cover validation is O(result size); keep it out of release
        // dispatch.
        #[cfg(debug_assertions)]
        crate::grid::resolver::validate_cover(&self.layout, res_height, res_width)?;

        debug!(
            "Dispatching SAD map: reference {}x{}, frame {}x{}, result {}x{}, {} workers",
            reference.height,
            reference.width,
            frame.height,
            frame.width,
            res_height,
            res_width,
            self.layout.worker_count()
        );

        let mut result = Plane::new(res_height, res_width);
        let writer = DisjointWrites::new(&mut result.data);
        let block = self.layout.block;
        let identities: Vec<GridIdentity> = self.layout.identities().collect();

        identities.par_iter().try_for_each(|identity| {
            for (y, x) in owned_coords(identity, block) {
                if y + frame.height > reference.height || x + frame.width > reference.width {
                    return Err(SadMatchingError::OutOfBounds {
                        y,
                        x,
                        ref_height: reference.height,
                        ref_width: reference.width,
                    });
                }
                let sad = sad_window(reference, frame, y, x);
                let sad =
                    i32::try_from(sad).map_err(|_| SadMatchingError::Overflow { y, x })?;
                // Safety: the resolver assigns (y, x) to exactly one worker
                // and the placement check above keeps the index in bounds.
                unsafe { writer.store(y as usize * res_width as usize + x as usize, sad) };
            }
            Ok(())
        })?;

        Ok(result)
    }

    /// Slide `frame` over `reference` and return the best placements, lowest
    /// SAD first, truncated to `max_matches`.
    pub fn match_template(
        &self,
        reference: &Plane,
        frame: &Plane,
        max_matches: usize,
    ) -> Result<Vec<TemplateMatch>> {
        let map = self.sad_map(reference, frame)?;

        let mut matches: Vec<TemplateMatch> = map
            .data
            .iter()
            .enumerate()
            .map(|(idx, &sad)| TemplateMatch {
                x: (idx % map.width as usize) as u32,
                y: (idx / map.width as usize) as u32,
                sad,
            })
            .collect();
        matches.sort_by(|a, b| a.sad.cmp(&b.sad).then(a.y.cmp(&b.y)).then(a.x.cmp(&b.x)));
        matches.truncate(max_matches);

        info!(
            "Template matching complete: {} placements scored, returning {}",
            map.data.len(),
            matches.len()
        );
        Ok(matches)
    }
}
