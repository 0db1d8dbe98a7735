//! Tangent-space quad builder
//!
//! Computes per-triangle tangent and bitangent vectors for a planar quad
//! from its UV layout, producing the 14-float vertex format consumed by the
//! normal/parallax-mapped surfaces (floor tiles and the reflective floor).
//!
//! The basis is flat per triangle, not vertex-averaged; for a single planar
//! quad the two are equivalent up to the shared diagonal.

use crate::foundation::math::{Vec2, Vec3};
use bytemuck::{Pod, Zeroable};
use thiserror::Error;

/// Geometry construction errors
#[derive(Debug, Error)]
pub enum GeometryError {
    /// The UV triangle is degenerate, so no tangent basis exists
    #[error("degenerate UV triangle: uv determinant {determinant} too close to zero")]
    DegenerateUv {
        /// The near-zero UV-space determinant
        determinant: f32,
    },
}

/// Vertex format for tangent-space mapped quads
///
/// 14 floats per vertex: position, normal, UV, tangent, bitangent.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct QuadVertex {
    /// Position in model space
    pub position: [f32; 3],
    /// Surface normal
    pub normal: [f32; 3],
    /// Texture coordinates
    pub uv: [f32; 2],
    /// Tangent vector (UV u direction in model space)
    pub tangent: [f32; 3],
    /// Bitangent vector (UV v direction in model space)
    pub bitangent: [f32; 3],
}

/// Compute the tangent basis of one triangle from positions and UVs
///
/// Given edges `e1 = p2 - p1`, `e2 = p3 - p1` and UV deltas
/// `d1 = uv2 - uv1`, `d2 = uv3 - uv1`:
///
/// ```text
/// f         = 1 / (d1.u * d2.v - d2.u * d1.v)
/// tangent   = f * ( d2.v * e1 - d1.v * e2)
/// bitangent = f * (-d2.u * e1 + d1.u * e2)
/// ```
///
/// Returns [`GeometryError::DegenerateUv`] when the UV determinant vanishes,
/// rather than letting NaN propagate into vertex data.
pub fn tangent_basis(
    p1: Vec3,
    p2: Vec3,
    p3: Vec3,
    uv1: Vec2,
    uv2: Vec2,
    uv3: Vec2,
) -> Result<(Vec3, Vec3), GeometryError> {
    let edge1 = p2 - p1;
    let edge2 = p3 - p1;
    let delta_uv1 = uv2 - uv1;
    let delta_uv2 = uv3 - uv1;

    let determinant = delta_uv1.x * delta_uv2.y - delta_uv2.x * delta_uv1.y;
    if determinant.abs() <= f32::EPSILON {
        return Err(GeometryError::DegenerateUv { determinant });
    }
    let f = 1.0 / determinant;

    let tangent = f * (delta_uv2.y * edge1 - delta_uv1.y * edge2);
    let bitangent = f * (-delta_uv2.x * edge1 + delta_uv1.x * edge2);
    Ok((tangent, bitangent))
}

/// Build a quad's six vertices with per-triangle tangent bases
///
/// The quad is split into triangles (1,2,3) and (1,3,4); each triangle's
/// basis feeds all three of its vertices.
pub fn build_quad(
    positions: [Vec3; 4],
    uvs: [Vec2; 4],
    normal: Vec3,
) -> Result<[QuadVertex; 6], GeometryError> {
    let [p1, p2, p3, p4] = positions;
    let [uv1, uv2, uv3, uv4] = uvs;

    let (tangent1, bitangent1) = tangent_basis(p1, p2, p3, uv1, uv2, uv3)?;
    let (tangent2, bitangent2) = tangent_basis(p1, p3, p4, uv1, uv3, uv4)?;

    let vertex = |p: Vec3, uv: Vec2, t: Vec3, b: Vec3| QuadVertex {
        position: p.into(),
        normal: normal.into(),
        uv: uv.into(),
        tangent: t.into(),
        bitangent: b.into(),
    };

    Ok([
        vertex(p1, uv1, tangent1, bitangent1),
        vertex(p2, uv2, tangent1, bitangent1),
        vertex(p3, uv3, tangent1, bitangent1),
        vertex(p1, uv1, tangent2, bitangent2),
        vertex(p3, uv3, tangent2, bitangent2),
        vertex(p4, uv4, tangent2, bitangent2),
    ])
}

/// The canonical unit quad used by the floor
///
/// Corners at (±1, ±1, 0) with a +Z normal and the standard UV layout. The
/// geometry never changes, so callers build it once at startup and reuse the
/// uploaded mesh for every tile.
pub fn unit_quad() -> Result<[QuadVertex; 6], GeometryError> {
    build_quad(
        [
            Vec3::new(-1.0, 1.0, 0.0),
            Vec3::new(-1.0, -1.0, 0.0),
            Vec3::new(1.0, -1.0, 0.0),
            Vec3::new(1.0, 1.0, 0.0),
        ],
        [
            Vec2::new(0.0, 1.0),
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(1.0, 1.0),
        ],
        Vec3::new(0.0, 0.0, 1.0),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn normalized(v: [f32; 3]) -> Vec3 {
        Vec3::new(v[0], v[1], v[2]).normalize()
    }

    #[test]
    fn unit_quad_basis_is_axis_aligned() {
        let quad = unit_quad().unwrap();

        // Both triangles: tangent parallel to +X, bitangent parallel to +Y
        // (up to sign).
        for v in &quad {
            let tangent = normalized(v.tangent);
            let bitangent = normalized(v.bitangent);
            assert_relative_eq!(tangent.x.abs(), 1.0, epsilon = 1e-6);
            assert_relative_eq!(tangent.y, 0.0, epsilon = 1e-6);
            assert_relative_eq!(tangent.z, 0.0, epsilon = 1e-6);
            assert_relative_eq!(bitangent.y.abs(), 1.0, epsilon = 1e-6);
            assert_relative_eq!(bitangent.x, 0.0, epsilon = 1e-6);
            assert_relative_eq!(bitangent.z, 0.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn triangles_share_positions_not_basis_storage() {
        let quad = unit_quad().unwrap();
        // Vertices 0 and 3 are the same corner fed by the two triangles.
        assert_eq!(quad[0].position, quad[3].position);
        assert_eq!(quad[2].position, quad[4].position);
    }

    #[test]
    fn degenerate_uvs_are_rejected() {
        // All three UVs collinear: determinant is exactly zero.
        let result = tangent_basis(
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
            Vec2::new(0.0, 0.0),
            Vec2::new(0.5, 0.5),
            Vec2::new(1.0, 1.0),
        );
        assert!(matches!(result, Err(GeometryError::DegenerateUv { .. })));
    }

    #[test]
    fn basis_values_never_contain_nan() {
        let quad = unit_quad().unwrap();
        for v in &quad {
            for c in v.tangent.iter().chain(v.bitangent.iter()) {
                assert!(c.is_finite());
            }
        }
    }
}
