//! Image graying workload: convert independent RGB buffers to single
//! channel grayscale.
//!
//! Images are in-memory pixel buffers only; decoding and encoding image
//! files is out of scope. The conversion uses the ITU-R 601 luma weights
//! (0.299 R + 0.587 G + 0.114 B). Output is integral, so the equivalence
//! tolerance is 0.

use rand::Rng;

use crate::error::ItemError;

pub const DEFAULT_IMAGE_COUNT: usize = 8;
pub const DEFAULT_WIDTH: usize = 200;
pub const DEFAULT_HEIGHT: usize = 200;

/// Divergence below this counts as equivalent (exact match required).
pub const TOLERANCE: f64 = 0.0;

/// One RGB image to convert. `pixels` is interleaved RGB, row-major,
/// `width * height * 3` bytes.
#[derive(Debug, Clone)]
pub struct ImageTask {
    pub id: usize,
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<u8>,
}

/// Single-channel result, `width * height` bytes in the task's layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrayImage {
    pub id: usize,
    pub pixels: Vec<u8>,
}

impl GrayImage {
    /// Mean intensity over all pixels.
    pub fn mean_intensity(&self) -> f64 {
        if self.pixels.is_empty() {
            return 0.0;
        }
        let sum: u64 = self.pixels.iter().map(|&p| p as u64).sum();
        sum as f64 / self.pixels.len() as f64
    }
}

/// Builds `count` random RGB images of the given dimensions.
pub fn generate_images<G: Rng>(
    count: usize,
    width: usize,
    height: usize,
    rng: &mut G,
) -> Vec<ImageTask> {
    (0..count)
        .map(|id| ImageTask {
            id,
            width,
            height,
            pixels: (0..width * height * 3).map(|_| rng.gen()).collect(),
        })
        .collect()
}

/// Converts one image to grayscale with the ITU-R 601 weights.
///
/// Fails the item when the buffer length does not match the declared
/// dimensions.
pub fn to_grayscale(task: &ImageTask) -> Result<GrayImage, ItemError> {
    let expected = task.width * task.height * 3;
    if task.pixels.len() != expected {
        return Err(ItemError::compute(format!(
            "image {}: buffer holds {} bytes, {}x{} RGB needs {}",
            task.id,
            task.pixels.len(),
            task.width,
            task.height,
            expected
        )));
    }
    let pixels = task
        .pixels
        .chunks_exact(3)
        .map(|rgb| {
            let luma = 0.299 * rgb[0] as f32 + 0.587 * rgb[1] as f32 + 0.114 * rgb[2] as f32;
            luma.round() as u8
        })
        .collect();
    Ok(GrayImage {
        id: task.id,
        pixels,
    })
}

/// Largest absolute difference between per-image mean intensities.
pub fn intensity_divergence(pairs: &[(&GrayImage, &GrayImage)]) -> f64 {
    pairs
        .iter()
        .map(|(s, p)| (s.mean_intensity() - p.mean_intensity()).abs())
        .fold(0.0, f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn converts_known_pixels() {
        let task = ImageTask {
            id: 0,
            width: 2,
            height: 1,
            pixels: vec![255, 0, 0, 0, 255, 0],
        };
        let gray = to_grayscale(&task).unwrap();
        // 0.299 * 255 = 76.245, 0.587 * 255 = 149.685
        assert_eq!(gray.pixels, vec![76, 150]);
    }

    #[test]
    fn gray_of_gray_is_identity() {
        let task = ImageTask {
            id: 0,
            width: 1,
            height: 1,
            pixels: vec![200, 200, 200],
        };
        let gray = to_grayscale(&task).unwrap();
        assert_eq!(gray.pixels, vec![200]);
    }

    #[test]
    fn rejects_mismatched_buffer() {
        let task = ImageTask {
            id: 3,
            width: 10,
            height: 10,
            pixels: vec![0; 5],
        };
        let err = to_grayscale(&task).unwrap_err();
        assert!(err.to_string().contains("image 3"));
    }

    #[test]
    fn generator_matches_dimensions() {
        let mut rng = StdRng::seed_from_u64(11);
        let tasks = generate_images(2, 16, 8, &mut rng);
        assert_eq!(tasks.len(), 2);
        assert!(tasks.iter().all(|t| t.pixels.len() == 16 * 8 * 3));
    }

    #[test]
    fn mean_intensity_of_uniform_image() {
        let gray = GrayImage {
            id: 0,
            pixels: vec![10; 64],
        };
        assert_eq!(gray.mean_intensity(), 10.0);
    }

    #[test]
    fn identical_runs_have_zero_divergence() {
        let gray = GrayImage {
            id: 0,
            pixels: vec![1, 2, 3],
        };
        let pairs = vec![(&gray, &gray)];
        assert_eq!(intensity_divergence(&pairs), 0.0);
    }
}
