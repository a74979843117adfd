//! Region: a bound area on the scalp surface that seeds one hair bundle.

use serde::{Deserialize, Serialize};

use crate::bundle::Bundle;
use crate::constants::{DEFAULT_TAPER_LENGTH, DEFAULT_TAPER_THICKNESS};
use crate::types::SurfaceSample;

/// Region on the scalp that generates hair guide curves.
///
/// A region owns exactly one [`Bundle`] and the attachment samples produced
/// by binding its named surface area. `shape_vert_count` is fixed while the
/// region is bound; rebinding is the only thing allowed to change it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Region {
    /// Named area on the scalp surface this region binds to; empty until a
    /// selector is chosen.
    pub surface_area_name: String,
    /// Number of shape vertices per bundle section.
    shape_vert_count: usize,
    /// Samples bound to the scalp area, `shape_vert_count + 1` entries; the
    /// last one is the region center. Empty until the first successful bind.
    attachment_samples: Vec<SurfaceSample>,
    /// Curve with sections for creating the hair bundle
    pub bundle: Bundle,
    /// Distance at which final strand thickness is reached
    pub taper_length: f32,
    /// Relative thickness of the strand
    pub taper_thickness: f32,
    pub selected: bool,
}

impl Default for Region {
    fn default() -> Self {
        Self::new()
    }
}

impl Region {
    /// Create an unbound region with an empty bundle.
    pub fn new() -> Self {
        Self {
            surface_area_name: String::new(),
            shape_vert_count: 0,
            attachment_samples: Vec::new(),
            bundle: Bundle::new(),
            taper_length: DEFAULT_TAPER_LENGTH,
            taper_thickness: DEFAULT_TAPER_THICKNESS,
            selected: false,
        }
    }

    /// Shape vertices per section (`numverts`). Zero while unbound.
    pub fn shape_vert_count(&self) -> usize {
        self.shape_vert_count
    }

    pub fn attachment_samples(&self) -> &[SurfaceSample] {
        &self.attachment_samples
    }

    /// Whether the region has been bound to its surface area.
    pub fn is_bound(&self) -> bool {
        !self.attachment_samples.is_empty()
    }

    /// Install a fresh set of attachment samples from a successful bind.
    ///
    /// The ring size becomes `samples.len() - 1` (the trailing sample is the
    /// region center, not part of the ring). Bundle geometry is left to the
    /// caller; a changed ring size requires a shape reset before the
    /// enclosing mutation completes.
    pub(crate) fn set_attachment(&mut self, samples: Vec<SurfaceSample>) {
        debug_assert!(samples.len() >= 2);
        self.shape_vert_count = samples.len() - 1;
        self.attachment_samples = samples;
    }

    /// Regenerate all bundle shape rings to the canonical default.
    pub fn reset_shape(&mut self) {
        self.bundle.reset_shape(self.shape_vert_count);
        self.bundle.clear_derived();
    }

    /// Check the section/vertex invariant for this region's ring size.
    pub fn shape_is_consistent(&self) -> bool {
        self.bundle.shape_is_consistent(self.shape_vert_count)
    }
}
