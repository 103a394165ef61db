//! Example demonstrating a grid-distributed SAD patch search.
//!
//! Loads a grayscale image when a path is given on the command line,
//! otherwise synthesizes a random scene. A patch is cut out of the scene and
//! searched for again; the best placement should land exactly on the cut.

use grid_sad_matching::{GridSadMatcher, Plane};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Instant;

const PATCH_SIZE: u32 = 24;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let reference = match std::env::args().nth(1) {
        Some(path) => Plane::from_file(path)?,
        None => {
            let mut rng = StdRng::seed_from_u64(2024);
            let data = (0..256usize * 256)
                .map(|_| rng.gen_range(0..256))
                .collect();
            Plane::from_pixels(256, 256, data)?
        }
    };

    let patch_y = reference.height / 3;
    let patch_x = reference.width / 2;
    if patch_y + PATCH_SIZE > reference.height || patch_x + PATCH_SIZE > reference.width {
        return Err(format!(
            "image is too small for a {PATCH_SIZE}x{PATCH_SIZE} patch search: {}x{}",
            reference.height, reference.width
        )
        .into());
    }
    let mut frame = Plane::new(PATCH_SIZE, PATCH_SIZE);
    for y in 0..PATCH_SIZE {
        for x in 0..PATCH_SIZE {
            frame.set(y, x, reference.get(patch_y + y, patch_x + x));
        }
    }

    let res_height = reference.height - frame.height + 1;
    let res_width = reference.width - frame.width + 1;
    let matcher = GridSadMatcher::for_output(res_height, res_width)?;

    let start_time = Instant::now();
    let matches = matcher.match_template(&reference, &frame, 5)?;
    let elapsed = start_time.elapsed();

    println!(
        "Searched {}x{} placements across {} workers in {:.2?}",
        res_height,
        res_width,
        matcher.layout().worker_count(),
        elapsed
    );
    println!("Patch was cut from ({patch_y}, {patch_x})");
    for (rank, m) in matches.iter().enumerate() {
        println!("  #{}: ({}, {}) sad = {}", rank + 1, m.y, m.x, m.sad);
    }

    let best = matches.first().ok_or("no placements scored")?;
    if (best.y, best.x) == (patch_y, patch_x) && best.sad == 0 {
        println!("Best placement recovered the patch origin exactly.");
    } else {
        println!("Best placement differs from the patch origin (duplicate content?).");
    }

    Ok(())
}
