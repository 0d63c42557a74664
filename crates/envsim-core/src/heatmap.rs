// RGBA climate heatmap buffers uploaded as overlay textures

use glam::Vec3;
use thiserror::Error;

/// Temperature at the cold end of the colour ramp, Celsius
pub const COLD_TEMP: f32 = -35.0;
/// Temperature at the hot end of the colour ramp, Celsius
pub const HOT_TEMP: f32 = 35.0;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HeatmapError {
    #[error("heatmap of {width}x{height} needs {expected} bytes, got {actual}")]
    Size {
        width: usize,
        height: usize,
        expected: usize,
        actual: usize,
    },
    #[error("heatmap dimensions must be non-zero")]
    Empty,
    #[error("heatmap of {width}x{height} does not fit in memory")]
    TooLarge { width: usize, height: usize },
    #[error("heatmap edge {size} exceeds the texture limit of {limit}")]
    ExceedsTexture { size: usize, limit: usize },
}

/// `width * height * channels`, or `TooLarge` when it overflows `usize`
fn checked_len(width: usize, height: usize, channels: usize) -> Result<usize, HeatmapError> {
    width
        .checked_mul(height)
        .and_then(|count| count.checked_mul(channels))
        .ok_or(HeatmapError::TooLarge { width, height })
}

/// Row-major RGBA8 pixels, `width * height * 4` bytes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeatmapBuffer {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
}

impl HeatmapBuffer {
    pub fn new(width: usize, height: usize, pixels: Vec<u8>) -> Result<Self, HeatmapError> {
        if width == 0 || height == 0 {
            return Err(HeatmapError::Empty);
        }
        let expected = checked_len(width, height, 4)?;
        if pixels.len() != expected {
            return Err(HeatmapError::Size {
                width,
                height,
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Red-channel interference pattern `(sin(i/10) * cos(j/10) + 1) / 2`,
    /// with `phase` shifting both waves. Alpha is opaque.
    ///
    /// # Arguments
    /// * `size` - Edge length in pixels (clamped to at least 1)
    /// * `phase` - Offset added to both wave arguments, in radians
    ///
    /// Fails with [`HeatmapError::TooLarge`] when the buffer length overflows.
    pub fn wave_pattern(size: usize, phase: f32) -> Result<Self, HeatmapError> {
        let size = size.max(1);
        let mut pixels = vec![0u8; checked_len(size, size, 4)?];
        for i in 0..size {
            for j in 0..size {
                let idx = (i * size + j) * 4;
                let value = ((i as f32 / 10.0 + phase).sin() * (j as f32 / 10.0 + phase).cos()
                    + 1.0)
                    / 2.0;
                pixels[idx] = (value * 255.0) as u8;
                pixels[idx + 3] = 255;
            }
        }
        Ok(Self {
            width: size,
            height: size,
            pixels,
        })
    }

    /// Colour a grid of temperatures (Celsius, row-major) with [`temperature_to_color`]
    pub fn from_temperatures(
        width: usize,
        height: usize,
        temperatures: &[f32],
    ) -> Result<Self, HeatmapError> {
        if width == 0 || height == 0 {
            return Err(HeatmapError::Empty);
        }
        let expected = checked_len(width, height, 1)?;
        if temperatures.len() != expected {
            return Err(HeatmapError::Size {
                width,
                height,
                expected,
                actual: temperatures.len(),
            });
        }
        let pixels = temperatures
            .iter()
            .flat_map(|&t| {
                let c = temperature_to_color(t);
                [
                    (c.x * 255.0) as u8,
                    (c.y * 255.0) as u8,
                    (c.z * 255.0) as u8,
                    255,
                ]
            })
            .collect();
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    /// RGBA of the pixel at column `x`, row `y`
    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y * self.width + x) * 4;
        Some([
            self.pixels[idx],
            self.pixels[idx + 1],
            self.pixels[idx + 2],
            self.pixels[idx + 3],
        ])
    }
}

/// Blue (cold) to red (hot) ramp over `[COLD_TEMP, HOT_TEMP]`
pub fn temperature_to_color(temp: f32) -> Vec3 {
    let t = ((temp - COLD_TEMP) / (HOT_TEMP - COLD_TEMP)).clamp(0.0, 1.0);

    let stops = [
        Vec3::new(0.5, 0.8, 1.0),
        Vec3::new(0.5, 1.0, 1.0),
        Vec3::new(0.2, 0.8, 0.5),
        Vec3::new(1.0, 1.0, 0.0),
        Vec3::new(1.0, 0.5, 0.0),
        Vec3::new(1.0, 0.0, 0.0),
    ];
    let scaled = t * (stops.len() - 1) as f32;
    let lower = (scaled.floor() as usize).min(stops.len() - 2);
    stops[lower].lerp(stops[lower + 1], scaled - lower as f32)
}
