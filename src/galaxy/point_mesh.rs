use bevy::prelude::*;
use bevy::render::{
    mesh::{Indices, PrimitiveTopology},
    render_asset::RenderAssetUsages,
};
use galaxy_points::PointCloud;
use rayon::prelude::*;

/// Billboard corners, expanded around the point center in the vertex shader.
const CORNERS: [[f32; 2]; 4] = [[-1.0, -1.0], [1.0, -1.0], [1.0, 1.0], [-1.0, 1.0]];
const QUAD_INDICES: [u32; 6] = [0, 1, 2, 0, 2, 3];

/// Expands every point of the cloud into a camera-facing quad: four vertices sharing the
/// point's center and color, told apart by their corner in `UV_0`.
pub fn build_point_mesh(cloud: &PointCloud) -> Mesh {
    let vertex_count = cloud.len() * CORNERS.len();

    let mut positions = vec![[0.0f32; 3]; vertex_count];
    let mut colors = vec![[0.0f32; 4]; vertex_count];
    let mut corners = vec![[0.0f32; 2]; vertex_count];
    let mut indices = vec![0u32; cloud.len() * QUAD_INDICES.len()];

    positions
        .par_chunks_exact_mut(4)
        .zip(colors.par_chunks_exact_mut(4))
        .zip(cloud.positions.par_iter().zip(cloud.colors.par_iter()))
        .for_each(|((position_chunk, color_chunk), (position, color))| {
            position_chunk.fill(*position);
            color_chunk.fill([color[0], color[1], color[2], 1.0]);
        });

    corners
        .par_chunks_exact_mut(4)
        .for_each(|chunk| chunk.copy_from_slice(&CORNERS));

    indices
        .par_chunks_exact_mut(6)
        .enumerate()
        .for_each(|(i, chunk)| {
            let base = (i * CORNERS.len()) as u32;
            for (index, offset) in chunk.iter_mut().zip(QUAD_INDICES) {
                *index = base + offset;
            }
        });

    Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::RENDER_WORLD,
    )
    .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
    .with_inserted_attribute(Mesh::ATTRIBUTE_COLOR, colors)
    .with_inserted_attribute(Mesh::ATTRIBUTE_UV_0, corners)
    .with_inserted_indices(Indices::U32(indices))
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::render::mesh::VertexAttributeValues;

    fn cloud() -> PointCloud {
        PointCloud {
            positions: vec![[1.0, 2.0, 3.0], [-4.0, 0.5, 6.0]],
            colors: vec![[1.0, 0.0, 0.0], [0.0, 0.5, 1.0]],
        }
    }

    #[test]
    fn four_vertices_per_point() {
        let mesh = build_point_mesh(&cloud());

        assert_eq!(mesh.count_vertices(), 8);
        let Some(VertexAttributeValues::Float32x3(positions)) =
            mesh.attribute(Mesh::ATTRIBUTE_POSITION)
        else {
            panic!("positions missing");
        };
        assert!(positions[0..4].iter().all(|p| *p == [1.0, 2.0, 3.0]));
        assert!(positions[4..8].iter().all(|p| *p == [-4.0, 0.5, 6.0]));
    }

    #[test]
    fn colors_are_opaque_rgba() {
        let mesh = build_point_mesh(&cloud());

        let Some(VertexAttributeValues::Float32x4(colors)) = mesh.attribute(Mesh::ATTRIBUTE_COLOR)
        else {
            panic!("colors missing");
        };
        assert_eq!(colors[3], [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(colors[4], [0.0, 0.5, 1.0, 1.0]);
    }

    #[test]
    fn quads_index_their_own_vertices() {
        let mesh = build_point_mesh(&cloud());

        let Some(Indices::U32(indices)) = mesh.indices() else {
            panic!("indices missing");
        };
        assert_eq!(indices, &vec![0u32, 1, 2, 0, 2, 3, 4, 5, 6, 4, 6, 7]);

        let Some(VertexAttributeValues::Float32x2(corners)) = mesh.attribute(Mesh::ATTRIBUTE_UV_0)
        else {
            panic!("corners missing");
        };
        assert_eq!(&corners[4..8], &CORNERS);
    }
}
