use crate::geo::Coordinates;
use glam::Vec3;
use noise::{NoiseFn, Perlin};

/// Horizontal extent of a generated tile in world units
pub const TILE_SIZE: f32 = 200.0;
/// Peak-to-trough height scale in world units
pub const HEIGHT_SCALE: f32 = 18.0;

const BASE_FREQUENCY: f64 = 3.0;
const DETAIL_FREQUENCY: f64 = 11.0;
const DETAIL_AMPLITUDE: f64 = 0.25;

/// Square heightfield centred on a coordinate. Heights are row-major, `[z][x]`.
/// Only [`Terrain::generate`] builds one, so `grid_size >= 2` always holds.
#[derive(Debug, Clone, PartialEq)]
pub struct Terrain {
    coordinates: Coordinates,
    grid_size: usize,
    heights: Vec<f32>,
}

impl Terrain {
    /// Procedural heightfield seeded from `coordinates`
    ///
    /// # Arguments
    /// * `coordinates` - Tile centre, also the noise seed
    /// * `grid_size` - Samples per edge (clamped to at least 2)
    pub fn generate(coordinates: Coordinates, grid_size: usize) -> Self {
        let grid_size = grid_size.max(2);
        let perlin = Perlin::new(coordinates.seed() as u32);
        let step = 1.0 / (grid_size - 1) as f64;

        let mut heights = Vec::with_capacity(grid_size * grid_size);
        for z in 0..grid_size {
            for x in 0..grid_size {
                let u = x as f64 * step;
                let v = z as f64 * step;
                let base = perlin.get([u * BASE_FREQUENCY, v * BASE_FREQUENCY, 0.5]);
                let detail = perlin.get([u * DETAIL_FREQUENCY, v * DETAIL_FREQUENCY, 7.5])
                    * DETAIL_AMPLITUDE;
                heights.push(((base + detail) as f32) * HEIGHT_SCALE);
            }
        }

        Self {
            coordinates,
            grid_size,
            heights,
        }
    }

    pub fn coordinates(&self) -> Coordinates {
        self.coordinates
    }

    /// Samples per edge
    pub fn grid_size(&self) -> usize {
        self.grid_size
    }

    pub fn heights(&self) -> &[f32] {
        &self.heights
    }

    /// Cells per edge, one less than the sample count
    pub fn cells_per_edge(&self) -> usize {
        self.grid_size.saturating_sub(1)
    }

    pub fn height_at(&self, x: usize, z: usize) -> Option<f32> {
        if x >= self.grid_size || z >= self.grid_size {
            return None;
        }
        Some(self.heights[z * self.grid_size + x])
    }

    /// World-space position of grid sample `(x, z)`, tile centred on the origin
    pub fn position(&self, x: usize, z: usize) -> Vec3 {
        let spacing = TILE_SIZE / self.cells_per_edge().max(1) as f32;
        let half = TILE_SIZE / 2.0;
        let y = self.height_at(x, z).unwrap_or(0.0);
        Vec3::new(x as f32 * spacing - half, y, z as f32 * spacing - half)
    }

    /// Central-difference normal at grid sample `(x, z)`
    pub fn normal(&self, x: usize, z: usize) -> Vec3 {
        let last = self.cells_per_edge();
        let left = self.position(x.saturating_sub(1), z);
        let right = self.position((x + 1).min(last), z);
        let back = self.position(x, z.saturating_sub(1));
        let front = self.position(x, (z + 1).min(last));
        (front - back).cross(right - left).normalize_or(Vec3::Y)
    }

    /// Triangles needed to mesh the full grid
    pub fn triangle_count(&self) -> usize {
        let cells = self.cells_per_edge();
        2 * cells * cells
    }

    pub fn height_range(&self) -> (f32, f32) {
        self.heights
            .iter()
            .fold((f32::MAX, f32::MIN), |(lo, hi), &h| (lo.min(h), hi.max(h)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::REFERENCE_POINT;

    #[test]
    fn test_generate_is_deterministic() {
        let a = Terrain::generate(REFERENCE_POINT, 33);
        let b = Terrain::generate(REFERENCE_POINT, 33);
        assert_eq!(a, b);
    }

    #[test]
    fn test_grid_dimensions() {
        let terrain = Terrain::generate(REFERENCE_POINT, 17);
        assert_eq!(terrain.heights().len(), 17 * 17);
        assert_eq!(terrain.triangle_count(), 2 * 16 * 16);
        assert!(terrain.height_at(16, 16).is_some());
        assert!(terrain.height_at(17, 0).is_none());
    }

    #[test]
    fn test_grid_size_clamped() {
        let terrain = Terrain::generate(REFERENCE_POINT, 0);
        assert_eq!(terrain.grid_size(), 2);
        assert_eq!(terrain.heights().len(), 4);
    }

    #[test]
    fn test_smallest_grid_is_one_quad() {
        let terrain = Terrain::generate(REFERENCE_POINT, 1);
        assert_eq!(terrain.cells_per_edge(), 1);
        assert_eq!(terrain.triangle_count(), 2);

        let corner = terrain.position(1, 1);
        assert!((corner.x - TILE_SIZE / 2.0).abs() < 1e-4);
        assert!(terrain.normal(1, 1).is_finite());
        assert_eq!(terrain.coordinates(), REFERENCE_POINT);
    }

    #[test]
    fn test_heights_bounded_by_scale() {
        let terrain = Terrain::generate(Coordinates::new(-33.86, 151.21), 65);
        let (lo, hi) = terrain.height_range();
        let bound = HEIGHT_SCALE * (1.0 + DETAIL_AMPLITUDE as f32) * 1.5;
        assert!(lo >= -bound && hi <= bound, "range was {lo}..{hi}");
    }

    #[test]
    fn test_positions_span_tile() {
        let terrain = Terrain::generate(REFERENCE_POINT, 9);
        let first = terrain.position(0, 0);
        let last = terrain.position(8, 8);
        assert!((first.x + TILE_SIZE / 2.0).abs() < 1e-4);
        assert!((last.z - TILE_SIZE / 2.0).abs() < 1e-4);
    }

    #[test]
    fn test_normals_point_up() {
        let terrain = Terrain::generate(REFERENCE_POINT, 33);
        for z in 0..terrain.grid_size() {
            for x in 0..terrain.grid_size() {
                let n = terrain.normal(x, z);
                assert!(n.y > 0.0, "normal at ({x}, {z}) was {n}");
                assert!((n.length() - 1.0).abs() < 1e-4);
            }
        }
    }
}
