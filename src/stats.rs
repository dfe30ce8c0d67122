//! Image statistics extraction
//!
//! Computes three scalar summaries of a note photo. These are the only
//! signal the simulated analysis engine sees:
//!
//! - **brightness**: mean luminance (0-255). Well-lit captures sit near the
//!   middle of the range; over/under-exposed shots drift toward the edges.
//! - **contrast**: standard deviation of luminance. Near-uniform frames
//!   (a blank wall, a lens cap) score close to zero.
//! - **edge_density**: mean response of a 3x3 edge kernel. Printed notes are
//!   busy with fine detail, so crisp captures respond strongly; blurry or
//!   empty frames barely respond at all.
//!
//! Every image is converted to grayscale and resized to a fixed 300x300
//! before measurement, so the numbers are comparable across capture
//! resolutions and the cost per image is constant.
//!
//! Extraction is fully deterministic and never fails: undecodable input
//! degrades to zeroed statistics, which the engine treats as a neutral
//! no-signal capture.

use image::imageops::FilterType;
use image::{DynamicImage, GrayImage};
use serde::{Deserialize, Serialize};

/// Canonical measurement resolution. Fixed so stats are scale-independent.
const CANONICAL_SIZE: u32 = 300;

/// Scalar summaries of one note photo.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageStats {
    /// Mean luminance, 0-255.
    pub brightness: f64,
    /// Standard deviation of luminance.
    pub contrast: f64,
    /// Mean 3x3 edge-kernel response, 0-255.
    pub edge_density: f64,
}

/// Extract statistics from an encoded image buffer (JPEG, PNG, ...).
///
/// Decode failures degrade to `ImageStats::default()` (all zeros) rather
/// than propagating an error; the analysis engine treats that as a neutral
/// capture and still produces a verdict.
pub fn extract(data: &[u8]) -> ImageStats {
    match image::load_from_memory(data) {
        Ok(img) => from_image(&img),
        Err(_) => ImageStats::default(),
    }
}

/// Extract statistics from an already-decoded image.
pub fn from_image(img: &DynamicImage) -> ImageStats {
    let gray = img.to_luma8();
    if gray.width() == 0 || gray.height() == 0 {
        return ImageStats::default();
    }
    let gray = image::imageops::resize(&gray, CANONICAL_SIZE, CANONICAL_SIZE, FilterType::Triangle);

    let (brightness, contrast) = mean_stddev(&gray);
    let edge_density = edge_mean(&gray);

    ImageStats {
        brightness,
        contrast,
        edge_density,
    }
}

/// Mean and standard deviation of pixel intensity.
fn mean_stddev(img: &GrayImage) -> (f64, f64) {
    let mut sum = 0.0f64;
    let mut sum_sq = 0.0f64;
    let mut count = 0u64;

    for pixel in img.pixels() {
        let val = pixel.0[0] as f64;
        sum += val;
        sum_sq += val * val;
        count += 1;
    }

    if count == 0 {
        return (0.0, 0.0);
    }

    let mean = sum / count as f64;
    let variance = (sum_sq / count as f64) - (mean * mean);
    (mean, variance.max(0.0).sqrt())
}

/// Mean response of a 3x3 edge kernel over the interior pixels.
///
/// Kernel: `[-1,-1,-1; -1,8,-1; -1,-1,-1]`, responses clamped to 0..255.
/// A uniform image responds 0 everywhere; dense print detail responds high.
fn edge_mean(img: &GrayImage) -> f64 {
    let (w, h) = (img.width() as i64, img.height() as i64);
    if w < 3 || h < 3 {
        return 0.0;
    }

    let at = |x: i64, y: i64| -> f64 { img.get_pixel(x as u32, y as u32).0[0] as f64 };

    let mut sum = 0.0f64;
    let mut count = 0u64;

    for y in 1..h - 1 {
        for x in 1..w - 1 {
            let neighbors = at(x - 1, y - 1)
                + at(x, y - 1)
                + at(x + 1, y - 1)
                + at(x - 1, y)
                + at(x + 1, y)
                + at(x - 1, y + 1)
                + at(x, y + 1)
                + at(x + 1, y + 1);
            let response = (8.0 * at(x, y) - neighbors).clamp(0.0, 255.0);
            sum += response;
            count += 1;
        }
    }

    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}
