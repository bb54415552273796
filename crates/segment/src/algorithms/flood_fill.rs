use std::collections::VecDeque;

use image::RgbaImage;

use crate::{
    traits::ColorMetric,
    types::{Bounds, Region, SeedPoint, fresh_region_id},
};

const NEIGHBORS: [(i64, i64); 4] = [(0, -1), (0, 1), (-1, 0), (1, 0)];

/// Tolerance-bounded breadth-first region grow from `seed`.
///
/// `visited` is shared across fills within one extraction pass and is
/// mutated in place; accepted pixels are never handed to a later fill.
/// A neighbor joins the region when it is in-bounds, unclaimed, and within
/// `tolerance` of the seed color under `metric`. The worklist is an explicit
/// queue, so arbitrarily large regions cannot overflow the stack.
///
/// The run stops when the queue drains or once `pixel_cap` pixels have been
/// claimed; the partial mask and bounds at that point are kept. Returns
/// `None` for an already-claimed or out-of-bounds seed and for runs that end
/// below `min_pixels`.
pub fn flood_fill<M: ColorMetric>(
    image: &RgbaImage,
    seed: SeedPoint,
    visited: &mut [bool],
    tolerance: u32,
    pixel_cap: usize,
    min_pixels: usize,
    metric: &M,
) -> Option<Region> {
    let (width, height) = image.dimensions();
    if seed.x >= width || seed.y >= height {
        return None;
    }
    debug_assert_eq!(visited.len(), width as usize * height as usize);

    let data = image.as_raw();
    let rgb_at = |x: u32, y: u32| -> [u8; 3] {
        let idx = (y as usize * width as usize + x as usize) * 4;
        [data[idx], data[idx + 1], data[idx + 2]]
    };

    let seed_idx = seed.y as usize * width as usize + seed.x as usize;
    if visited[seed_idx] {
        return None;
    }

    let target = rgb_at(seed.x, seed.y);
    let mut mask = vec![0u8; width as usize * height as usize];
    let mut queue = VecDeque::new();

    mask[seed_idx] = 255;
    visited[seed_idx] = true;
    let mut pixel_count = 1usize;
    let (mut min_x, mut min_y, mut max_x, mut max_y) = (seed.x, seed.y, seed.x, seed.y);
    queue.push_back((seed.x, seed.y));

    'grow: while let Some((x, y)) = queue.pop_front() {
        if pixel_count >= pixel_cap {
            break;
        }
        for (dx, dy) in NEIGHBORS {
            let nx = x as i64 + dx;
            let ny = y as i64 + dy;
            if nx < 0 || ny < 0 || nx >= width as i64 || ny >= height as i64 {
                continue;
            }
            let (nx, ny) = (nx as u32, ny as u32);
            let nidx = ny as usize * width as usize + nx as usize;
            if visited[nidx] || mask[nidx] != 0 {
                continue;
            }
            if metric.distance(rgb_at(nx, ny), target) > tolerance {
                continue;
            }

            mask[nidx] = 255;
            visited[nidx] = true;
            pixel_count += 1;
            min_x = min_x.min(nx);
            min_y = min_y.min(ny);
            max_x = max_x.max(nx);
            max_y = max_y.max(ny);
            queue.push_back((nx, ny));

            if pixel_count >= pixel_cap {
                break 'grow;
            }
        }
    }

    if pixel_count < min_pixels {
        return None;
    }

    Some(Region {
        id: fresh_region_id(),
        bounds: Bounds {
            x: min_x,
            y: min_y,
            width: max_x - min_x + 1,
            height: max_y - min_y + 1,
        },
        mask,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::metrics::ManhattanMetric;
    use image::Rgba;

    fn solid_image(width: u32, height: u32, color: [u8; 4]) -> RgbaImage {
        RgbaImage::from_pixel(width, height, Rgba(color))
    }

    fn fill(
        image: &RgbaImage,
        seed: SeedPoint,
        tolerance: u32,
        pixel_cap: usize,
        min_pixels: usize,
    ) -> Option<Region> {
        let mut visited = vec![false; (image.width() * image.height()) as usize];
        flood_fill(image, seed, &mut visited, tolerance, pixel_cap, min_pixels, &ManhattanMetric)
    }

    #[test]
    fn test_uniform_image_fills_completely_under_a_permissive_cap() {
        let image = solid_image(50, 50, [200, 10, 10, 255]);
        let region = fill(&image, SeedPoint { x: 25, y: 25 }, 30, 2500, 100)
            .expect("Should produce one region");

        assert_eq!(region.bounds, Bounds { x: 0, y: 0, width: 50, height: 50 });
        assert_eq!(region.pixel_count(), 2500);
        assert!(region.mask.iter().all(|&v| v == 255));
    }

    #[test]
    fn test_safety_cap_stops_a_runaway_fill() {
        // 50x50 uniform image with the cap at half the pixels: the run must
        // stop at the cap with a valid partial bounding box.
        let image = solid_image(50, 50, [128, 128, 128, 255]);
        let region = fill(&image, SeedPoint { x: 25, y: 25 }, 30, 1250, 100)
            .expect("Capped run still exceeds the minimum size");

        assert_eq!(region.pixel_count(), 1250);
        assert!(region.pixel_count() <= 1250);
        assert!(region.bounds.width >= 1 && region.bounds.width <= 50);
        assert!(region.bounds.height >= 1 && region.bounds.height <= 50);
    }

    #[test]
    fn test_same_seed_is_deterministic() {
        let mut image = solid_image(40, 40, [10, 10, 10, 255]);
        for y in 0..40 {
            for x in 0..40u32 {
                // mild gradient so the fill boundary is tolerance-driven
                let v = (x * 3) as u8;
                image.put_pixel(x, y, Rgba([v, 40, 40, 255]));
            }
        }

        let a = fill(&image, SeedPoint { x: 5, y: 20 }, 25, 1600, 1).expect("Should fill");
        let b = fill(&image, SeedPoint { x: 5, y: 20 }, 25, 1600, 1).expect("Should fill");

        assert_eq!(a.bounds, b.bounds);
        assert_eq!(a.mask, b.mask);
    }

    #[test]
    fn test_fill_respects_the_tolerance_boundary() {
        // Left half dark, right half bright; distance across the boundary is
        // far above the tolerance, so the fill must stay on its side.
        let mut image = solid_image(20, 10, [0, 0, 0, 255]);
        for y in 0..10 {
            for x in 10..20 {
                image.put_pixel(x, y, Rgba([250, 250, 250, 255]));
            }
        }

        let region = fill(&image, SeedPoint { x: 2, y: 5 }, 30, 200, 1).expect("Should fill");
        assert_eq!(region.bounds, Bounds { x: 0, y: 0, width: 10, height: 10 });
        assert_eq!(region.pixel_count(), 100);
    }

    #[test]
    fn test_small_fills_are_discarded() {
        let image = solid_image(8, 8, [0, 255, 0, 255]);
        assert!(fill(&image, SeedPoint { x: 4, y: 4 }, 10, 64, 100).is_none());
    }

    #[test]
    fn test_visited_seed_is_skipped() {
        let image = solid_image(16, 16, [7, 7, 7, 255]);
        let mut visited = vec![false; 256];
        visited[8 * 16 + 8] = true;

        let region = flood_fill(
            &image,
            SeedPoint { x: 8, y: 8 },
            &mut visited,
            10,
            256,
            1,
            &ManhattanMetric,
        );
        assert!(region.is_none());
    }

    #[test]
    fn test_out_of_bounds_seed_is_rejected() {
        let image = solid_image(16, 16, [7, 7, 7, 255]);
        let mut visited = vec![false; 256];
        let region = flood_fill(
            &image,
            SeedPoint { x: 16, y: 3 },
            &mut visited,
            10,
            256,
            1,
            &ManhattanMetric,
        );
        assert!(region.is_none());
    }

    #[test]
    fn test_shared_visited_set_blocks_a_second_fill() {
        let image = solid_image(32, 32, [90, 90, 90, 255]);
        let mut visited = vec![false; 32 * 32];

        let first = flood_fill(
            &image,
            SeedPoint { x: 16, y: 16 },
            &mut visited,
            10,
            32 * 32,
            1,
            &ManhattanMetric,
        )
        .expect("Should fill the whole image");
        assert_eq!(first.pixel_count(), 32 * 32);

        let second = flood_fill(
            &image,
            SeedPoint { x: 3, y: 3 },
            &mut visited,
            10,
            32 * 32,
            1,
            &ManhattanMetric,
        );
        assert!(second.is_none(), "every pixel is already claimed");
    }
}
