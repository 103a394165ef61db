pub mod accumulate;
pub mod strategies;

pub use accumulate::{sad_window, sad_window_4x4, sad_window_fixed};
pub use strategies::{
    sad_fixed_frame, sad_fixed_frame_4x4, sad_multiple_work_per_tile, sad_single_work_per_tile,
};
