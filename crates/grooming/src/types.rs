//! Core grooming types.
//!
//! Pure data records shared by the bundle, region, and binding modules.
//! Behavior lives on the owning containers ([`crate::bundle::Bundle`],
//! [`crate::region::Region`]).

use glam::{Mat3, Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Opaque handle to an external scalp surface.
///
/// The surface's lifetime is independent of the groom asset; the handle is
/// resolved on demand through a [`crate::surface::SurfaceProvider`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SurfaceHandle(pub u64);

/// A single attachment sample on the scalp surface.
///
/// Produced by binding a region to a named surface area: one sample per
/// covered surface element, plus one synthetic centroid sample appended last.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SurfaceSample {
    /// Position on the evaluated surface, world space
    pub position: Vec3,
    /// Surface normal at the sample, unit length
    pub normal: Vec3,
    /// Area weight of the covered surface element
    pub weight: f32,
}

/// Vertex in the closed shape curve of a bundle section.
///
/// Coordinates are local to the section plane; the section's frame maps them
/// into world space.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ShapeVertex {
    /// Location in the section plane
    pub position: Vec2,
    pub selected: bool,
}

impl ShapeVertex {
    pub fn new(position: Vec2) -> Self {
        Self {
            position,
            selected: false,
        }
    }
}

/// Cross-section of a bundle.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CrossSection {
    /// Center point, world space
    pub center: Vec3,
    /// Orthonormal local coordinate frame; `frame.z_axis` is the curve tangent
    pub frame: Mat3,
    pub selected: bool,
}

impl CrossSection {
    pub fn new(center: Vec3, frame: Mat3) -> Self {
        Self {
            center,
            frame,
            selected: false,
        }
    }

    /// Map a shape-vertex position from the section plane into world space.
    pub fn plane_to_world(&self, position: Vec2) -> Vec3 {
        self.center + self.frame * Vec3::new(position.x, position.y, 0.0)
    }
}

/// Root data for generating one hair guide curve.
///
/// Guide interpolation itself happens downstream; the bundle only carries the
/// root attachments and per-shape-vertex weights.
#[derive(Debug, Clone, Copy)]
pub struct HairGuide {
    /// Root point on the scalp surface
    pub root: SurfaceSample,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plane_to_world_identity_frame() {
        let section = CrossSection::new(Vec3::new(1.0, 2.0, 3.0), Mat3::IDENTITY);
        let world = section.plane_to_world(Vec2::new(0.5, -0.5));
        assert_eq!(world, Vec3::new(1.5, 1.5, 3.0));
    }

    #[test]
    fn test_plane_to_world_rotated_frame() {
        // Frame whose plane axes are world Y and Z, tangent along world X
        let frame = Mat3::from_cols(Vec3::Y, Vec3::Z, Vec3::X);
        let section = CrossSection::new(Vec3::ZERO, frame);
        let world = section.plane_to_world(Vec2::new(1.0, 2.0));
        assert_eq!(world, Vec3::new(0.0, 1.0, 2.0));
    }
}
