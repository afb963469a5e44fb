//! Math utilities and types
//!
//! Provides the small set of math types the GUI renderer needs.

pub use nalgebra::{Matrix4, Vector2};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// Orthographic projection for GUI coordinates
///
/// Maps the logical display rectangle `(0, 0)..(width, height)` to clip space
/// with the Y axis inverted, so the GUI's top-left origin lands in the top-left
/// corner of the viewport. Depth range is `-1..1`.
pub fn gui_projection(display_size: Vec2) -> Mat4 {
    Mat4::new_orthographic(0.0, display_size.x, display_size.y, 0.0, -1.0, 1.0)
}

/// Column-major matrix elements, in the order OpenGL expects for uniforms
pub fn to_column_major(matrix: &Mat4) -> [f32; 16] {
    let mut out = [0.0; 16];
    out.copy_from_slice(matrix.as_slice());
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Vector4;

    #[test]
    fn test_projection_maps_corners() {
        let proj = gui_projection(Vec2::new(800.0, 600.0));

        let top_left = proj * Vector4::new(0.0, 0.0, 0.0, 1.0);
        assert_relative_eq!(top_left.x, -1.0);
        assert_relative_eq!(top_left.y, 1.0);

        let bottom_right = proj * Vector4::new(800.0, 600.0, 0.0, 1.0);
        assert_relative_eq!(bottom_right.x, 1.0);
        assert_relative_eq!(bottom_right.y, -1.0);

        let center = proj * Vector4::new(400.0, 300.0, 0.0, 1.0);
        assert_relative_eq!(center.x, 0.0);
        assert_relative_eq!(center.y, 0.0);
    }

    #[test]
    fn test_column_major_layout() {
        let m = to_column_major(&gui_projection(Vec2::new(2.0, 4.0)));

        assert_relative_eq!(m[0], 1.0); // 2 / width
        assert_relative_eq!(m[5], -0.5); // -2 / height
        assert_relative_eq!(m[10], -1.0);
        assert_relative_eq!(m[12], -1.0);
        assert_relative_eq!(m[13], 1.0);
        assert_relative_eq!(m[15], 1.0);
    }
}
