//! Accumulation buffer, tonemapping, and image output.
//!
//! The film keeps a running per-pixel mean of linear radiance across
//! sweeps. Output applies exposure, the ACES filmic curve and gamma 1/2.2,
//! then quantizes to 8 bits; sinks are plain-text PPM (the progressive
//! per-sweep format, human-inspectable) and PNG.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use lux_math::Vec3;

const GAMMA: f32 = 2.2;

/// Fold one new sample into a running mean that has already absorbed
/// `count - 1` samples: `mean * (count-1)/count + sample/count`.
#[inline]
pub fn accumulate(mean: Vec3, sample: Vec3, count: u32) -> Vec3 {
    let n = count as f32;
    (mean * (n - 1.0) + sample) / n
}

/// ACES filmic tonemap, clamped to [0, 1].
fn aces(x: f32) -> f32 {
    let mapped = (x * (2.51 * x + 0.03)) / (x * (2.43 * x + 0.59) + 0.14);
    mapped.clamp(0.0, 1.0)
}

fn gamma_correct(x: f32) -> f32 {
    x.powf(1.0 / GAMMA)
}

/// Map one linear radiance value to display RGB: exposure, ACES, gamma,
/// then floor to 8 bits.
pub fn color_to_rgb8(color: Vec3, exposure: f32) -> [u8; 3] {
    let exposed = color * exposure;

    let channel = |x: f32| {
        let tonemapped = gamma_correct(aces(x));
        (255.999 * tonemapped.clamp(0.0, 1.0)) as u8
    };

    [channel(exposed.x), channel(exposed.y), channel(exposed.z)]
}

/// Per-pixel accumulation buffer for a render, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct Film {
    width: u32,
    height: u32,
    pixels: Vec<Vec3>,
}

impl Film {
    /// Create a film cleared to black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Vec3::ZERO; (width * height) as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[Vec3] {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [Vec3] {
        &mut self.pixels
    }

    /// Get the linear radiance of pixel (x, y).
    pub fn get(&self, x: u32, y: u32) -> Vec3 {
        self.pixels[(y * self.width + x) as usize]
    }

    /// Fold a new sample into pixel `index` as the `count`-th sample.
    pub fn accumulate(&mut self, index: usize, sample: Vec3, count: u32) {
        self.pixels[index] = accumulate(self.pixels[index], sample, count);
    }

    /// Tonemap the whole buffer to 8-bit RGB triples.
    pub fn to_rgb8(&self, exposure: f32) -> Vec<[u8; 3]> {
        self.pixels
            .iter()
            .map(|&c| color_to_rgb8(c, exposure))
            .collect()
    }

    /// Serialize the tonemapped buffer as plain-text PPM (P3): format tag,
    /// "width height", max channel value, then one "R G B" line per pixel
    /// in row-major order.
    pub fn write_ppm<W: Write>(&self, writer: &mut W, exposure: f32) -> io::Result<()> {
        writeln!(writer, "P3")?;
        writeln!(writer, "{} {}", self.width, self.height)?;
        writeln!(writer, "255")?;

        for [r, g, b] in self.to_rgb8(exposure) {
            writeln!(writer, "{} {} {}", r, g, b)?;
        }

        Ok(())
    }

    /// Write the PPM to a file, replacing any previous contents.
    pub fn write_ppm_file(&self, path: &Path, exposure: f32) -> io::Result<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        self.write_ppm(&mut writer, exposure)?;
        writer.flush()
    }

    /// Save the tonemapped buffer as a PNG.
    pub fn save_png(&self, path: &Path, exposure: f32) -> Result<(), image::ImageError> {
        let mut img = image::RgbImage::new(self.width, self.height);
        for (pixel, rgb) in img.pixels_mut().zip(self.to_rgb8(exposure)) {
            *pixel = image::Rgb(rgb);
        }
        img.save(path)
    }
}
