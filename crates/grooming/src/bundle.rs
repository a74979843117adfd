//! Bundle container: the ordered cross-sections of one hair-generating curve.
//!
//! A bundle owns three parallel arrays that must stay mutually consistent:
//! the section list, the flattened shape-vertex list (`sections.len() *
//! shape_vert_count` entries), and the derived curve cache. All structural
//! growth goes through the mutators here; nothing outside this module resizes
//! one array without the paired others.

use glam::{Mat3, Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_GUIDES_COUNT, DEFAULT_RING_RADIUS};
use crate::types::{CrossSection, HairGuide, ShapeVertex};

/// Bundle of hair strands following the same curve path.
///
/// Owned exclusively by one [`crate::region::Region`]; the region's
/// `shape_vert_count` is passed into every mutator that touches the vertex
/// array.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bundle {
    /// Cross-sections along the curve
    sections: Vec<CrossSection>,
    /// Shape vertices of all sections, flattened `[section][vertex]`
    verts: Vec<ShapeVertex>,
    /// Number of guides to generate (`guides.len()` can be smaller)
    pub guides_count: u32,
    /// Cached interpolated curve points, `[shape_vert_count + 1]` blocks of
    /// `curve_size` points each; the last block is the center curve.
    /// Derived state, rebuilt on demand and skipped by persistence.
    #[serde(skip)]
    pub curve_cache: Vec<Vec3>,
    /// Root data for generated guide curves. Derived state.
    #[serde(skip)]
    pub guides: Vec<HairGuide>,
    /// Guide interpolation weights, `[guides.len()][shape_vert_count]`.
    /// Derived state.
    #[serde(skip)]
    pub guide_shape_weights: Vec<f32>,
}

impl Default for Bundle {
    fn default() -> Self {
        Self::new()
    }
}

impl Bundle {
    /// Create an empty bundle with no sections.
    pub fn new() -> Self {
        Self {
            sections: Vec::new(),
            verts: Vec::new(),
            guides_count: DEFAULT_GUIDES_COUNT,
            curve_cache: Vec::new(),
            guides: Vec::new(),
            guide_shape_weights: Vec::new(),
        }
    }

    /// Number of sections along the curve.
    pub fn total_sections(&self) -> usize {
        self.sections.len()
    }

    /// Number of shape vertices of all sections combined.
    pub fn total_verts(&self) -> usize {
        self.verts.len()
    }

    pub fn sections(&self) -> &[CrossSection] {
        &self.sections
    }

    pub fn verts(&self) -> &[ShapeVertex] {
        &self.verts
    }

    /// Shape-vertex ring of one section.
    pub fn section_ring(&self, section: usize, shape_vert_count: usize) -> &[ShapeVertex] {
        let start = section * shape_vert_count;
        &self.verts[start..start + shape_vert_count]
    }

    /// Center of a section, mutable. Used by interactive repositioning tools.
    pub fn section_mut(&mut self, section: usize) -> Option<&mut CrossSection> {
        self.sections.get_mut(section)
    }

    /// Number of points along the centerline for a given curve resolution:
    /// `(totsections - 1) * curve_res + 1`, or 0 for an empty bundle.
    pub fn curve_size(&self, curve_res: u32) -> usize {
        if self.sections.is_empty() {
            0
        } else {
            (self.sections.len() - 1) * curve_res as usize + 1
        }
    }

    /// Expected curve-cache length: one interpolated curve per shape vertex
    /// plus the center curve.
    pub fn expected_cache_len(&self, shape_vert_count: usize, curve_res: u32) -> usize {
        self.curve_size(curve_res) * (shape_vert_count + 1)
    }

    /// Check the section/vertex invariant for a given ring size.
    pub fn shape_is_consistent(&self, shape_vert_count: usize) -> bool {
        self.verts.len() == self.sections.len() * shape_vert_count
    }

    /// Replace all sections with the two-section seed curve produced by
    /// region-add: one section at `origin`, one at
    /// `origin + frame.z_axis * length`, sharing the same frame.
    ///
    /// Shape vertices are not touched; the caller follows up with
    /// [`Bundle::reset_shape`].
    pub fn seed_curve(&mut self, origin: Vec3, frame: Mat3, length: f32) {
        self.sections.clear();
        self.sections.push(CrossSection::new(origin, frame));
        self.sections
            .push(CrossSection::new(origin + frame.z_axis * length, frame));
        self.clear_derived();
    }

    /// Append one section with the given pose and no shape vertices yet.
    ///
    /// Only valid as part of a larger edit that restores the vertex invariant
    /// (a shape reset) before the mutation completes.
    pub(crate) fn append_section(&mut self, center: Vec3, frame: Mat3) {
        self.sections.push(CrossSection::new(center, frame));
    }

    /// Duplicate the last section: clone its center, frame, and shape-vertex
    /// ring (including per-vertex selection flags) onto a new trailing
    /// section.
    ///
    /// Requires at least one existing section and a consistent vertex array.
    pub(crate) fn duplicate_last_section(&mut self, shape_vert_count: usize) {
        debug_assert!(!self.sections.is_empty());
        debug_assert!(self.shape_is_consistent(shape_vert_count));

        let last = *self.sections.last().unwrap();
        self.sections.push(last);

        let ring_start = self.verts.len() - shape_vert_count;
        self.verts.extend_from_within(ring_start..);
    }

    /// Regenerate every section's shape-vertex ring to the canonical default:
    /// a uniform ring of `shape_vert_count` points at a nominal radius in the
    /// section plane. Discards any authored shape and vertex selection.
    pub fn reset_shape(&mut self, shape_vert_count: usize) {
        self.verts.clear();
        self.verts
            .reserve(self.sections.len() * shape_vert_count);
        for _ in 0..self.sections.len() {
            for i in 0..shape_vert_count {
                let angle = std::f32::consts::TAU * i as f32 / shape_vert_count as f32;
                let position = Vec2::new(angle.cos(), angle.sin()) * DEFAULT_RING_RADIUS;
                self.verts.push(ShapeVertex::new(position));
            }
        }
    }

    /// Make the last section the only selected one.
    pub(crate) fn select_only_last_section(&mut self) {
        let last = self.sections.len().wrapping_sub(1);
        for (i, section) in self.sections.iter_mut().enumerate() {
            section.selected = i == last;
        }
    }

    /// Force a shorter section list to set up mid-mutation states that the
    /// public mutators never leave behind.
    #[cfg(test)]
    pub(crate) fn truncate_sections(&mut self, len: usize) {
        self.sections.truncate(len);
    }

    /// Drop all derived state (curve cache, guides). Called when the source
    /// topology changes; the next geometry pass rebuilds it.
    pub fn clear_derived(&mut self) {
        self.curve_cache.clear();
        self.guides.clear();
        self.guide_shape_weights.clear();
    }
}
