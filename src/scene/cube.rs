//! Cube geometry and per-frame transforms

use glam::{Mat4, Vec3};

use crate::app::renderer::cube::CubeUniforms;
use crate::app::renderer::mesh::{MeshDesc, VertexAttribute, VertexBufferDesc};

/// Floats per cube vertex: position, uv, normal
const FLOATS_PER_VERTEX: usize = 8;

#[rustfmt::skip]
const CUBE_VERTICES: [f32; 24 * FLOATS_PER_VERTEX] = [
    // position            uv          normal
    // -X
    -1.0, -1.0, -1.0,      0.0, 0.0,   -1.0,  0.0,  0.0,
    -1.0, -1.0,  1.0,      1.0, 0.0,   -1.0,  0.0,  0.0,
    -1.0,  1.0,  1.0,      1.0, 1.0,   -1.0,  0.0,  0.0,
    -1.0,  1.0, -1.0,      0.0, 1.0,   -1.0,  0.0,  0.0,
    // +X
     1.0, -1.0, -1.0,      0.0, 0.0,    1.0,  0.0,  0.0,
     1.0, -1.0,  1.0,      1.0, 0.0,    1.0,  0.0,  0.0,
     1.0,  1.0,  1.0,      1.0, 1.0,    1.0,  0.0,  0.0,
     1.0,  1.0, -1.0,      0.0, 1.0,    1.0,  0.0,  0.0,
    // -Z
    -1.0, -1.0, -1.0,      0.0, 0.0,    0.0,  0.0, -1.0,
     1.0, -1.0, -1.0,      1.0, 0.0,    0.0,  0.0, -1.0,
     1.0,  1.0, -1.0,      1.0, 1.0,    0.0,  0.0, -1.0,
    -1.0,  1.0, -1.0,      0.0, 1.0,    0.0,  0.0, -1.0,
    // +Z
    -1.0, -1.0,  1.0,      0.0, 0.0,    0.0,  0.0,  1.0,
     1.0, -1.0,  1.0,      1.0, 0.0,    0.0,  0.0,  1.0,
     1.0,  1.0,  1.0,      1.0, 1.0,    0.0,  0.0,  1.0,
    -1.0,  1.0,  1.0,      0.0, 1.0,    0.0,  0.0,  1.0,
    // -Y
    -1.0, -1.0, -1.0,      0.0, 0.0,    0.0, -1.0,  0.0,
     1.0, -1.0, -1.0,      1.0, 0.0,    0.0, -1.0,  0.0,
     1.0, -1.0,  1.0,      1.0, 1.0,    0.0, -1.0,  0.0,
    -1.0, -1.0,  1.0,      0.0, 1.0,    0.0, -1.0,  0.0,
    // +Y
    -1.0,  1.0, -1.0,      0.0, 0.0,    0.0,  1.0,  0.0,
     1.0,  1.0, -1.0,      1.0, 0.0,    0.0,  1.0,  0.0,
     1.0,  1.0,  1.0,      1.0, 1.0,    0.0,  1.0,  0.0,
    -1.0,  1.0,  1.0,      0.0, 1.0,    0.0,  1.0,  0.0,
];

/// Two triangles per face, faces in vertex order
pub fn cube_indices() -> Vec<u32> {
    (0..6u32)
        .flat_map(|face| {
            let base = face * 4;
            [base, base + 1, base + 2, base, base + 2, base + 3]
        })
        .collect()
}

/// Unit cube spanning [-1, 1] on every axis, 24 vertices and 36 indices
pub fn cube_mesh_desc() -> MeshDesc {
    MeshDesc {
        vertex_buffers: vec![VertexBufferDesc {
            layout: vec![
                VertexAttribute::Position3D(0),
                VertexAttribute::UV(1),
                VertexAttribute::Normal3D(2),
            ],
            data: CUBE_VERTICES.to_vec(),
        }],
        index_buffer: cube_indices(),
    }
}

/// Inputs of one frame's cube transforms
#[derive(Debug, Clone, Copy)]
pub struct FrameTransforms {
    pub time_in_seconds: f32,
    pub aspect_ratio: f32,
    pub field_of_view_degrees: f32,
    pub near_plane: f32,
    pub view: Mat4,
}

impl FrameTransforms {
    /// Rotation of `time` radians about Z; the cube stays at the origin
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_rotation_z(self.time_in_seconds) * Mat4::from_translation(Vec3::ZERO)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_infinite_rh(
            self.field_of_view_degrees.to_radians(),
            self.aspect_ratio,
            self.near_plane,
        )
    }

    pub fn uniforms(&self, random_seeds: [f32; 4], frames_still: u32) -> CubeUniforms {
        let model = self.model_matrix();
        let model_view_projection = self.projection_matrix() * self.view * model;
        let normal_matrix = model.transpose().inverse();
        let light_direction = Vec3::X.normalize();

        CubeUniforms {
            model_view_projection: model_view_projection.to_cols_array_2d(),
            model_matrix: model.to_cols_array_2d(),
            normal_matrix: normal_matrix.to_cols_array_2d(),
            light_direction: light_direction.extend(0.0).to_array(),
            random_seeds,
            frame_info: [frames_still, 0, 0, 0],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;

    fn transforms(time: f32) -> FrameTransforms {
        FrameTransforms {
            time_in_seconds: time,
            aspect_ratio: 16.0 / 9.0,
            field_of_view_degrees: 45.0,
            near_plane: 0.001,
            view: Mat4::look_at_rh(Vec3::new(0.0, 0.0, 6.0), Vec3::ZERO, Vec3::Y),
        }
    }

    #[test]
    fn test_cube_mesh_is_valid() {
        let desc = cube_mesh_desc();
        assert_eq!(desc.validate(), Ok(24));
        assert_eq!(desc.index_buffer.len(), 36);
        assert_eq!(&desc.index_buffer[..6], &[0, 1, 2, 0, 2, 3]);
        assert_eq!(&desc.index_buffer[30..], &[20, 21, 22, 20, 22, 23]);
    }

    #[test]
    fn test_face_normals_point_outward() {
        for vertex in CUBE_VERTICES.chunks(FLOATS_PER_VERTEX) {
            let position = Vec3::from_slice(&vertex[0..3]);
            let normal = Vec3::from_slice(&vertex[5..8]);
            assert_eq!(normal.length(), 1.0);
            assert_eq!(position.dot(normal), 1.0);
        }
    }

    #[test]
    fn test_model_rotates_about_z() {
        let model = transforms(std::f32::consts::FRAC_PI_2).model_matrix();
        let rotated = model.transform_point3(Vec3::X);
        assert!((rotated - Vec3::Y).length() < 1e-5);
        assert_eq!(transforms(0.0).model_matrix(), Mat4::IDENTITY);
    }

    #[test]
    fn test_uniforms_pack_matrices_and_light() {
        let uniforms = transforms(0.3).uniforms([1.0, 2.0, 3.0, 4.0], 7);
        assert_eq!(uniforms.light_direction, [1.0, 0.0, 0.0, 0.0]);
        assert_eq!(uniforms.random_seeds, [1.0, 2.0, 3.0, 4.0]);
        assert_eq!(uniforms.frame_info[0], 7);

        // Rotation-only model: the normal matrix equals the model matrix
        let model = Mat4::from_cols_array_2d(&uniforms.model_matrix);
        let normal = Mat4::from_cols_array_2d(&uniforms.normal_matrix);
        assert!(model.abs_diff_eq(normal, 1e-5));
    }

    #[test]
    fn test_cube_center_projects_inside_clip_volume() {
        let uniforms = transforms(1.0).uniforms([0.0; 4], 0);
        let mvp = Mat4::from_cols_array_2d(&uniforms.model_view_projection);
        let clip = mvp * Vec4::new(0.0, 0.0, 0.0, 1.0);
        let ndc = clip.truncate() / clip.w;
        assert!(clip.w > 0.0);
        assert!(ndc.x.abs() < 1e-5 && ndc.y.abs() < 1e-5);
        assert!((0.0..=1.0).contains(&ndc.z));
    }
}
