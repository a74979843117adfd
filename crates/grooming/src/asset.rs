//! Groom asset: the durable collection of regions plus the edit-mode overlay.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::constants::DEFAULT_CURVE_RESOLUTION;
use crate::region::Region;
use crate::types::SurfaceHandle;

/// Editable staging copy of the region list.
///
/// Created when the host enters edit mode; edit-mode operators act on this
/// list instead of the committed one until it is committed or discarded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditGroom {
    pub regions: Vec<Region>,
}

/// Groom curves for creating hair styles.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroomAsset {
    /// Committed regions
    regions: Vec<Region>,
    /// Index of the active region in the live list
    active_region: Option<usize>,
    /// Scalp surface for attaching hairs, resolved through a
    /// [`crate::surface::SurfaceProvider`]
    pub scalp: Option<SurfaceHandle>,
    /// Interpolation steps between consecutive bundle sections, >= 1
    curve_resolution: u32,
    /// Edit-mode staging copy; `Some` while editing
    edit: Option<EditGroom>,
}

impl Default for GroomAsset {
    fn default() -> Self {
        Self::new()
    }
}

impl GroomAsset {
    pub fn new() -> Self {
        Self {
            regions: Vec::new(),
            active_region: None,
            scalp: None,
            curve_resolution: DEFAULT_CURVE_RESOLUTION,
            edit: None,
        }
    }

    pub fn curve_resolution(&self) -> u32 {
        self.curve_resolution
    }

    pub fn set_curve_resolution(&mut self, curve_resolution: u32) {
        self.curve_resolution = curve_resolution.max(1);
    }

    pub fn is_editing(&self) -> bool {
        self.edit.is_some()
    }

    /// The region list structural mutations act on: the staging copy while
    /// editing, the committed list otherwise.
    pub fn live_regions(&self) -> &[Region] {
        match &self.edit {
            Some(edit) => &edit.regions,
            None => &self.regions,
        }
    }

    pub fn live_regions_mut(&mut self) -> &mut Vec<Region> {
        match &mut self.edit {
            Some(edit) => &mut edit.regions,
            None => &mut self.regions,
        }
    }

    /// Committed regions, regardless of edit mode.
    pub fn committed_regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn active_region(&self) -> Option<usize> {
        self.active_region
    }

    /// Set the active region. Out-of-range indices clear it.
    pub fn set_active_region(&mut self, index: Option<usize>) {
        self.active_region = index.filter(|&i| i < self.live_regions().len());
    }

    /// Resolve an operator target: an explicit index if given and valid,
    /// falling back to the active region.
    pub fn resolve_target(&self, target: Option<usize>) -> Option<usize> {
        target
            .or(self.active_region)
            .filter(|&i| i < self.live_regions().len())
    }

    /// Append a region to the live list and return its index.
    pub(crate) fn push_region(&mut self, region: Region) -> usize {
        let list = self.live_regions_mut();
        list.push(region);
        list.len() - 1
    }

    /// Remove a region from the live list.
    ///
    /// The active index becomes `None` if it pointed at the removed region
    /// (the caller handles re-selection) and shifts down when it pointed past
    /// it.
    pub(crate) fn remove_region(&mut self, index: usize) -> Region {
        let region = self.live_regions_mut().remove(index);
        self.active_region = match self.active_region {
            Some(active) if active == index => None,
            Some(active) if active > index => Some(active - 1),
            other => other,
        };
        region
    }

    /// Enter edit mode: deep-copy the committed regions into the staging
    /// list. No-op if already editing.
    pub fn begin_edit(&mut self) {
        if self.edit.is_none() {
            debug!(regions = self.regions.len(), "entering groom edit mode");
            self.edit = Some(EditGroom {
                regions: self.regions.clone(),
            });
        }
    }

    /// Leave edit mode, writing the staged regions back over the committed
    /// list. No-op if not editing.
    pub fn commit_edit(&mut self) {
        if let Some(edit) = self.edit.take() {
            debug!(regions = edit.regions.len(), "committing groom edit");
            self.regions = edit.regions;
            self.clamp_active();
        }
    }

    /// Leave edit mode, dropping all staged changes. No-op if not editing.
    pub fn discard_edit(&mut self) {
        if self.edit.take().is_some() {
            debug!("discarding groom edit");
            self.clamp_active();
        }
    }

    fn clamp_active(&mut self) {
        self.active_region = self.active_region.filter(|&i| i < self.regions.len());
    }
}
