//! Curve-cache rebuild: interpolated points along the bundle sections.
//!
//! Structural edits (extrude, bind) leave the cache stale; the owning
//! application triggers this pass afterwards as part of its dependent-geometry
//! update. One Catmull-Rom curve is sampled per shape vertex, plus the center
//! curve, `curve_res` steps between consecutive sections.

use glam::Vec3;
use tracing::trace;

use crate::bundle::Bundle;

/// Centripetal-free (uniform) Catmull-Rom interpolation between `p1` and `p2`.
fn catmull_rom(p0: Vec3, p1: Vec3, p2: Vec3, p3: Vec3, t: f32) -> Vec3 {
    let t2 = t * t;
    let t3 = t2 * t;
    0.5 * ((2.0 * p1)
        + (p2 - p0) * t
        + (2.0 * p0 - 5.0 * p1 + 4.0 * p2 - p3) * t2
        + (3.0 * p1 - p0 - 3.0 * p2 + p3) * t3)
}

/// Sample a clamped Catmull-Rom spline through `points` into `out`,
/// `steps` subdivisions per segment plus the final control point.
fn sample_spline(points: &[Vec3], steps: u32, out: &mut Vec<Vec3>) {
    if points.len() == 1 {
        out.push(points[0]);
        return;
    }
    let last = points.len() - 1;
    for seg in 0..last {
        // Clamp phantom endpoints to the curve ends
        let p0 = points[seg.saturating_sub(1)];
        let p1 = points[seg];
        let p2 = points[seg + 1];
        let p3 = points[(seg + 2).min(last)];
        for step in 0..steps {
            let t = step as f32 / steps as f32;
            out.push(catmull_rom(p0, p1, p2, p3, t));
        }
    }
    out.push(points[last]);
}

impl Bundle {
    /// Rebuild the curve cache from the current sections and shape vertices.
    ///
    /// Layout on completion: `shape_vert_count + 1` blocks of
    /// [`Bundle::curve_size`] points each, one per shape-vertex curve in ring
    /// order, then the center curve last. An empty bundle clears the cache.
    pub fn rebuild_curve_cache(&mut self, shape_vert_count: usize, curve_res: u32) {
        debug_assert!(curve_res >= 1);
        debug_assert!(self.shape_is_consistent(shape_vert_count));

        self.curve_cache.clear();
        let total_sections = self.total_sections();
        if total_sections == 0 {
            return;
        }
        self.curve_cache
            .reserve(self.expected_cache_len(shape_vert_count, curve_res));

        let mut controls = Vec::with_capacity(total_sections);
        let mut cache = std::mem::take(&mut self.curve_cache);
        for vert in 0..shape_vert_count {
            controls.clear();
            for (i, section) in self.sections().iter().enumerate() {
                let position = self.section_ring(i, shape_vert_count)[vert].position;
                controls.push(section.plane_to_world(position));
            }
            sample_spline(&controls, curve_res, &mut cache);
        }

        // Center curve last
        controls.clear();
        controls.extend(self.sections().iter().map(|s| s.center));
        sample_spline(&controls, curve_res, &mut cache);
        self.curve_cache = cache;

        trace!(
            sections = total_sections,
            points = self.curve_cache.len(),
            "rebuilt curve cache"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Mat3;

    fn bound_bundle(shape_vert_count: usize, extra_sections: usize) -> Bundle {
        let mut bundle = Bundle::new();
        bundle.seed_curve(Vec3::ZERO, Mat3::IDENTITY, 1.0);
        bundle.reset_shape(shape_vert_count);
        for _ in 0..extra_sections {
            bundle.duplicate_last_section(shape_vert_count);
        }
        bundle
    }

    #[test]
    fn test_cache_len_matches_expected() {
        let mut bundle = bound_bundle(8, 3);
        bundle.rebuild_curve_cache(8, 12);
        assert_eq!(bundle.curve_cache.len(), bundle.expected_cache_len(8, 12));
        assert_eq!(bundle.curve_size(12), 4 * 12 + 1);
    }

    #[test]
    fn test_cache_cleared_for_empty_bundle() {
        let mut bundle = Bundle::new();
        bundle.curve_cache.push(Vec3::ONE);
        bundle.rebuild_curve_cache(8, 12);
        assert!(bundle.curve_cache.is_empty());
    }

    #[test]
    fn test_center_curve_passes_through_section_centers() {
        let curve_res = 6;
        let mut bundle = bound_bundle(4, 1);
        bundle.section_mut(2).unwrap().center = Vec3::new(0.3, 0.1, 2.0);
        bundle.rebuild_curve_cache(4, curve_res);

        let curve_size = bundle.curve_size(curve_res);
        let center_block = &bundle.curve_cache[4 * curve_size..];
        assert_eq!(center_block.len(), curve_size);
        for (i, section) in bundle.sections().iter().enumerate() {
            let at_section = center_block[i * curve_res as usize];
            assert!((at_section - section.center).length() < 1e-5);
        }
    }

    #[test]
    fn test_vertex_curves_pass_through_ring_points() {
        let curve_res = 4;
        let mut bundle = bound_bundle(4, 0);
        bundle.rebuild_curve_cache(4, curve_res);

        let curve_size = bundle.curve_size(curve_res);
        for vert in 0..4 {
            let block = &bundle.curve_cache[vert * curve_size..(vert + 1) * curve_size];
            for (i, section) in bundle.sections().iter().enumerate() {
                let expected = section.plane_to_world(bundle.section_ring(i, 4)[vert].position);
                assert!((block[i * curve_res as usize] - expected).length() < 1e-5);
            }
        }
    }
}
