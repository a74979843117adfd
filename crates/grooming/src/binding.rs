//! Binding engine: resolving a named surface area to attachment samples and
//! deriving a region's local coordinate frame from them.
//!
//! All functions here are pure with respect to the surface: they read the
//! evaluated snapshot handed in by the caller and never trigger evaluation.

use glam::{Mat3, Vec3};
use thiserror::Error;
use tracing::debug;

use crate::region::Region;
use crate::surface::ScalpSurface;
use crate::types::SurfaceSample;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BindError {
    #[error("groom asset has no scalp surface")]
    NoScalp,
    #[error("scalp surface has no area named '{0}'")]
    AreaNotFound(String),
}

/// Result of a successful [`bind_region`] call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BindOutcome {
    /// Samples were (re)bound; the caller seeds bundle geometry from the
    /// returned region frame.
    Bound { origin: Vec3, frame: Mat3 },
    /// A binding already existed and `force` was false. Nothing changed.
    AlreadyBound,
}

/// Resolve a named area to attachment samples on the evaluated surface.
///
/// Returns one sample per covered surface element, with a synthetic centroid
/// sample appended last: the area-weighted mean position, the weighted mean
/// normal renormalized, and the summed weight.
pub fn resolve_surface_area(
    surface: &dyn ScalpSurface,
    area_name: &str,
) -> Result<Vec<SurfaceSample>, BindError> {
    let mut samples = surface
        .area_samples(area_name)
        .filter(|samples| !samples.is_empty())
        .ok_or_else(|| BindError::AreaNotFound(area_name.to_owned()))?;

    let total_weight: f32 = samples.iter().map(|s| s.weight).sum();
    let inv_weight = if total_weight > 0.0 {
        1.0 / total_weight
    } else {
        1.0 / samples.len() as f32
    };
    let mut center = Vec3::ZERO;
    let mut normal = Vec3::ZERO;
    for sample in &samples {
        let w = if total_weight > 0.0 { sample.weight } else { 1.0 };
        center += sample.position * w;
        normal += sample.normal * w;
    }
    samples.push(SurfaceSample {
        position: center * inv_weight,
        normal: normal.normalize_or(Vec3::Z),
        weight: total_weight,
    });
    Ok(samples)
}

/// Compute a region's local frame from its attachment samples.
///
/// The trailing centroid sample is authoritative: its position becomes the
/// origin and its normal the frame's third axis. The remaining axes are a
/// deterministic completion of the normal: world +Y projected onto the
/// normal plane, falling back to +X when the normal is nearly parallel to Y.
/// Determinism matters because extrude relies on frame continuity between
/// sections.
pub fn compute_region_frame(samples: &[SurfaceSample]) -> (Vec3, Mat3) {
    debug_assert!(!samples.is_empty());
    let center = samples[samples.len() - 1];
    let z = center.normal.normalize_or(Vec3::Z);

    let reference = if z.dot(Vec3::Y).abs() < 0.99 {
        Vec3::Y
    } else {
        Vec3::X
    };
    let x = (reference - z * reference.dot(z)).normalize();
    let y = z.cross(x);

    (center.position, Mat3::from_cols(x, y, z))
}

/// Bind a region's named area to the evaluated surface.
///
/// Replaces the region's attachment samples (and with them its ring size);
/// bundle geometry is the caller's concern, so a single bind can serve both
/// region creation and rebinding. With an existing binding and `force` off
/// this is a no-op reporting [`BindOutcome::AlreadyBound`].
pub fn bind_region(
    surface: &dyn ScalpSurface,
    region: &mut Region,
    force: bool,
) -> Result<BindOutcome, BindError> {
    if region.is_bound() && !force {
        return Ok(BindOutcome::AlreadyBound);
    }

    let samples = resolve_surface_area(surface, &region.surface_area_name)?;
    debug!(
        area = %region.surface_area_name,
        samples = samples.len(),
        "bound region to scalp area"
    );
    region.set_attachment(samples);

    let (origin, frame) = compute_region_frame(region.attachment_samples());
    Ok(BindOutcome::Bound { origin, frame })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_surface::MockSurface;

    #[test]
    fn test_resolve_appends_centroid_last() {
        let surface = MockSurface::new().with_disc_area("cap", 6, Vec3::ZERO);
        let samples = resolve_surface_area(&surface, "cap").unwrap();
        assert_eq!(samples.len(), 7);

        let centroid = samples[6];
        assert!((centroid.position - Vec3::Z).length() < 1e-5);
        assert_eq!(centroid.normal, Vec3::Z);
        assert_eq!(centroid.weight, 6.0);
    }

    #[test]
    fn test_area_names_enumerate_resolvable_areas() {
        let surface = MockSurface::new()
            .with_disc_area("cap", 6, Vec3::ZERO)
            .with_disc_area("crown", 4, Vec3::X);

        let mut names = surface.area_names();
        names.sort();
        assert_eq!(names, vec!["cap".to_owned(), "crown".to_owned()]);
        // Every enumerated name is usable as a binding selector
        for name in &names {
            assert!(resolve_surface_area(&surface, name).is_ok());
        }
    }

    #[test]
    fn test_resolve_unknown_area_fails() {
        let surface = MockSurface::new().with_disc_area("cap", 6, Vec3::ZERO);
        let err = resolve_surface_area(&surface, "crown").unwrap_err();
        assert_eq!(err, BindError::AreaNotFound("crown".to_owned()));
    }

    #[test]
    fn test_region_frame_is_orthonormal_and_deterministic() {
        let surface = MockSurface::new().with_disc_area("cap", 8, Vec3::ONE);
        let samples = resolve_surface_area(&surface, "cap").unwrap();
        let (origin, frame) = compute_region_frame(&samples);
        let (origin2, frame2) = compute_region_frame(&samples);

        assert_eq!(origin, origin2);
        assert_eq!(frame, frame2);
        assert_eq!(frame.z_axis, Vec3::Z);
        assert!(frame.x_axis.dot(frame.y_axis).abs() < 1e-6);
        assert!((frame.x_axis.cross(frame.y_axis) - frame.z_axis).length() < 1e-6);
        // Ring samples are symmetric, so the centroid sits on the area center
        assert!((origin - Vec3::new(1.0, 1.0, 2.0)).length() < 1e-5);
    }

    #[test]
    fn test_region_frame_normal_parallel_to_reference() {
        let samples = vec![SurfaceSample {
            position: Vec3::ZERO,
            normal: Vec3::Y,
            weight: 1.0,
        }];
        let (_, frame) = compute_region_frame(&samples);
        assert_eq!(frame.z_axis, Vec3::Y);
        assert!(frame.x_axis.is_normalized());
        assert!(frame.x_axis.dot(frame.z_axis).abs() < 1e-6);
    }

    #[test]
    fn test_bind_region_idempotent_without_force() {
        let surface = MockSurface::new().with_disc_area("cap", 6, Vec3::ZERO);
        let mut region = Region::new();
        region.surface_area_name = "cap".to_owned();

        let first = bind_region(&surface, &mut region, false).unwrap();
        assert!(matches!(first, BindOutcome::Bound { .. }));
        let samples_before: Vec<Vec3> = region
            .attachment_samples()
            .iter()
            .map(|s| s.position)
            .collect();

        let second = bind_region(&surface, &mut region, false).unwrap();
        assert_eq!(second, BindOutcome::AlreadyBound);
        let samples_after: Vec<Vec3> = region
            .attachment_samples()
            .iter()
            .map(|s| s.position)
            .collect();
        assert_eq!(samples_before, samples_after);
    }

    #[test]
    fn test_bind_region_force_rebinds() {
        let surface = MockSurface::new()
            .with_disc_area("cap", 6, Vec3::ZERO)
            .with_disc_area("crown", 4, Vec3::X);
        let mut region = Region::new();
        region.surface_area_name = "cap".to_owned();
        bind_region(&surface, &mut region, false).unwrap();
        assert_eq!(region.shape_vert_count(), 6);

        region.surface_area_name = "crown".to_owned();
        let outcome = bind_region(&surface, &mut region, true).unwrap();
        assert!(matches!(outcome, BindOutcome::Bound { .. }));
        assert_eq!(region.shape_vert_count(), 4);
    }

    #[test]
    fn test_bind_failure_leaves_region_unbound() {
        let surface = MockSurface::new().with_disc_area("cap", 6, Vec3::ZERO);
        let mut region = Region::new();
        region.surface_area_name = "missing".to_owned();

        assert!(bind_region(&surface, &mut region, true).is_err());
        assert!(!region.is_bound());
        assert_eq!(region.bundle.total_sections(), 0);
    }
}
