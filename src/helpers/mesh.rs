use bevy::asset::RenderAssetUsages;
use bevy::image::Image;
use bevy::mesh::{Indices, PrimitiveTopology};
use bevy::prelude::Mesh;
use bevy::render::render_resource::{Extent3d, TextureDimension, TextureFormat};
use envsim_core::heatmap::temperature_to_color;
use envsim_core::{HeatmapBuffer, Terrain};

/// Triangulated terrain grid with vertex colours by relative height
pub fn terrain_mesh(terrain: &Terrain) -> Mesh {
    let n = terrain.grid_size();
    let (low, high) = terrain.height_range();
    let span = (high - low).max(f32::EPSILON);

    let mut positions = Vec::with_capacity(n * n);
    let mut normals = Vec::with_capacity(n * n);
    let mut colors = Vec::with_capacity(n * n);
    let mut indices = Vec::with_capacity(terrain.triangle_count() * 3);

    for z in 0..n {
        for x in 0..n {
            let position = terrain.position(x, z);
            let normal = terrain.normal(x, z);
            // Low ground renders warm, peaks cold
            let t = (position.y - low) / span;
            let color = temperature_to_color(35.0 - 70.0 * t);

            positions.push(position.to_array());
            normals.push(normal.to_array());
            colors.push([color.x, color.y, color.z, 1.0]);
        }
    }

    let cells = terrain.cells_per_edge();
    for z in 0..cells {
        for x in 0..cells {
            let first = (z * n + x) as u32;
            let below = first + n as u32;

            indices.extend_from_slice(&[first, below, first + 1]);
            indices.extend_from_slice(&[first + 1, below, below + 1]);
        }
    }

    let mut mesh = Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::default(),
    );
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
    mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, normals);
    mesh.insert_attribute(Mesh::ATTRIBUTE_COLOR, colors);
    mesh.insert_indices(Indices::U32(indices));
    mesh
}

/// RGBA8 texture from a heatmap buffer
pub fn heatmap_image(heatmap: &HeatmapBuffer) -> Image {
    Image::new(
        Extent3d {
            width: heatmap.width() as u32,
            height: heatmap.height() as u32,
            depth_or_array_layers: 1,
        },
        TextureDimension::D2,
        heatmap.pixels().to_vec(),
        TextureFormat::Rgba8UnormSrgb,
        RenderAssetUsages::default(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::mesh::VertexAttributeValues;
    use envsim_core::geo::REFERENCE_POINT;

    #[test]
    fn test_terrain_mesh_counts() {
        let terrain = Terrain::generate(REFERENCE_POINT, 9);
        let mesh = terrain_mesh(&terrain);

        assert_eq!(mesh.count_vertices(), 81);
        let Some(Indices::U32(indices)) = mesh.indices() else {
            panic!("expected u32 indices");
        };
        assert_eq!(indices.len(), terrain.triangle_count() * 3);
        assert!(indices.iter().all(|&i| i < 81));
    }

    #[test]
    fn test_degenerate_grid_request_meshes_one_quad() {
        let terrain = Terrain::generate(REFERENCE_POINT, 0);
        let mesh = terrain_mesh(&terrain);

        assert_eq!(mesh.count_vertices(), 4);
        let Some(Indices::U32(indices)) = mesh.indices() else {
            panic!("expected u32 indices");
        };
        assert_eq!(indices.as_slice(), &[0, 2, 1, 1, 2, 3]);
    }

    #[test]
    fn test_terrain_mesh_has_colors() {
        let terrain = Terrain::generate(REFERENCE_POINT, 5);
        let mesh = terrain_mesh(&terrain);

        let Some(VertexAttributeValues::Float32x4(colors)) = mesh.attribute(Mesh::ATTRIBUTE_COLOR)
        else {
            panic!("expected vertex colors");
        };
        assert_eq!(colors.len(), 25);
        assert!(colors.iter().all(|c| c[3] == 1.0));
    }

    #[test]
    fn test_heatmap_image_size() {
        let heatmap = HeatmapBuffer::wave_pattern(12, 0.0).unwrap();
        let image = heatmap_image(&heatmap);

        assert_eq!(image.width(), 12);
        assert_eq!(image.height(), 12);
    }
}
