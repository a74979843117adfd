//! Mutation operators: region-add, region-remove, region-bind, bundle-extrude.
//!
//! Each operator runs to completion on the calling thread, mutates the
//! asset's live region list, and reports exactly one [`AssetChange`] per
//! invocation that changed state (including partial batch success). Failures
//! are returned, never panicked, and leave the failing target unchanged.

use thiserror::Error;
use tracing::debug;

use crate::asset::GroomAsset;
use crate::binding::{bind_region, compute_region_frame, BindError, BindOutcome};
use crate::constants::INITIAL_CURVE_LENGTH;
use crate::region::Region;
use crate::surface::{AssetChange, ChangeNotifier, SurfaceProvider};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum OperatorError {
    #[error("groom asset has no scalp surface")]
    NoScalp,
    #[error("scalp surface has no area named '{0}'")]
    InvalidSelector(String),
    #[error("no active region to operate on")]
    NoActiveRegion,
    #[error("operator requires edit mode")]
    NotEditing,
    #[error("operator cannot run while editing")]
    Editing,
    #[error("cannot extrude a bundle with no sections")]
    EmptyBundle,
}

impl From<BindError> for OperatorError {
    fn from(err: BindError) -> Self {
        match err {
            BindError::NoScalp => Self::NoScalp,
            BindError::AreaNotFound(name) => Self::InvalidSelector(name),
        }
    }
}

/// Per-region outcome counts of a batch extrude.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtrudeReport {
    /// Regions that gained a section
    pub extruded: usize,
    /// Selected regions that could not be extruded
    pub failed: usize,
}

fn resolve_surface<'a>(
    asset: &GroomAsset,
    provider: &'a dyn SurfaceProvider,
) -> Result<&'a dyn crate::surface::ScalpSurface, BindError> {
    let handle = asset.scalp.ok_or(BindError::NoScalp)?;
    provider.resolve(handle).ok_or(BindError::NoScalp)
}

/// Add a new region to the asset's live list and return its index.
///
/// With an area name the region is immediately bound (`force`) and its bundle
/// seeded with the initial two-section curve along the binding frame's
/// tangent. A name that fails to resolve returns `InvalidSelector` but still
/// leaves the region created: unbound, with zero sections.
pub fn region_add(
    asset: &mut GroomAsset,
    provider: &dyn SurfaceProvider,
    notifier: &mut dyn ChangeNotifier,
    area_name: Option<&str>,
) -> Result<usize, OperatorError> {
    let surface = resolve_surface(asset, provider)?;

    let index = asset.push_region(Region::new());
    let Some(name) = area_name else {
        debug!(index, "added unbound groom region");
        notifier.asset_changed(AssetChange::RegionAdded);
        return Ok(index);
    };

    let region = &mut asset.live_regions_mut()[index];
    region.surface_area_name = name.to_owned();
    match bind_region(surface, region, true) {
        Ok(BindOutcome::Bound { origin, frame }) => {
            region
                .bundle
                .seed_curve(origin, frame, INITIAL_CURVE_LENGTH);
            region.reset_shape();
            debug!(index, area = name, "added and bound groom region");
            notifier.asset_changed(AssetChange::RegionAdded);
            Ok(index)
        }
        Ok(BindOutcome::AlreadyBound) => unreachable!("forced bind never reports AlreadyBound"),
        Err(err) => {
            // The region stays, unbound; the asset still changed visually.
            debug!(index, area = name, %err, "added groom region, binding failed");
            notifier.asset_changed(AssetChange::RegionAdded);
            Err(err.into())
        }
    }
}

/// Remove a region from the live list, releasing its bundle and caches.
///
/// `target` falls back to the active region. The active index is cleared if
/// it pointed at the removed region; the caller handles re-selection.
pub fn region_remove(
    asset: &mut GroomAsset,
    notifier: &mut dyn ChangeNotifier,
    target: Option<usize>,
) -> Result<(), OperatorError> {
    let index = asset
        .resolve_target(target)
        .ok_or(OperatorError::NoActiveRegion)?;
    let region = asset.remove_region(index);
    debug!(index, area = %region.surface_area_name, "removed groom region");
    notifier.asset_changed(AssetChange::RegionRemoved);
    Ok(())
}

/// Bind (or rebind, with `force`) a region to its named surface area.
///
/// Only valid outside edit mode, on the committed list. A region bound with
/// an empty bundle (created unbound, then given a valid selector) gets the
/// initial two-section curve seeded from the binding frame, the same as
/// region-add. A rebind of a region that already has sections keeps them but
/// resets its shape, since the ring size may have changed with the new
/// samples.
pub fn region_bind(
    asset: &mut GroomAsset,
    provider: &dyn SurfaceProvider,
    notifier: &mut dyn ChangeNotifier,
    target: Option<usize>,
    force: bool,
) -> Result<BindOutcome, OperatorError> {
    if asset.is_editing() {
        return Err(OperatorError::Editing);
    }
    let surface = resolve_surface(asset, provider)?;
    let index = asset
        .resolve_target(target)
        .ok_or(OperatorError::NoActiveRegion)?;

    let region = &mut asset.live_regions_mut()[index];
    let outcome = bind_region(surface, region, force)?;
    if let BindOutcome::Bound { origin, frame } = outcome {
        if region.bundle.total_sections() == 0 {
            region
                .bundle
                .seed_curve(origin, frame, INITIAL_CURVE_LENGTH);
        }
        region.reset_shape();
        debug!(index, area = %region.surface_area_name, "rebound groom region");
        notifier.asset_changed(AssetChange::RegionBound);
    }
    Ok(outcome)
}

/// Extrude one region's bundle by a single section. Three explicit branches
/// on the current section count:
///
/// - 0: invalid, the bundle has nothing to grow from,
/// - 1: the new section's pose comes from the binding frame and the whole
///   shape is reset; there is no prior ring to copy,
/// - 2+: the last section is duplicated (pose and ring) as a starting pose
///   for the caller's subsequent drag.
///
/// In every successful case the new section ends up the only selected one.
/// The curve cache is left stale for the downstream geometry pass.
fn extrude_one(region: &mut Region) -> Result<(), OperatorError> {
    match region.bundle.total_sections() {
        0 => Err(OperatorError::EmptyBundle),
        1 => {
            if !region.is_bound() {
                return Err(OperatorError::InvalidSelector(
                    region.surface_area_name.clone(),
                ));
            }
            let (origin, frame) = compute_region_frame(region.attachment_samples());
            region.bundle.append_section(origin, frame);
            region.reset_shape();
            region.bundle.select_only_last_section();
            Ok(())
        }
        _ => {
            region
                .bundle
                .duplicate_last_section(region.shape_vert_count());
            region.bundle.select_only_last_section();
            Ok(())
        }
    }
}

/// Extrude the bundles of all selected regions in the staging list.
///
/// Edit-mode only. Failures are per-region: one region failing does not stop
/// the others, and the operator succeeds (and notifies once) if at least one
/// region mutated. Unselected regions are skipped silently.
pub fn extrude_bundles(
    asset: &mut GroomAsset,
    notifier: &mut dyn ChangeNotifier,
) -> Result<ExtrudeReport, OperatorError> {
    if !asset.is_editing() {
        return Err(OperatorError::NotEditing);
    }

    let mut report = ExtrudeReport::default();
    let mut first_error = None;
    for (index, region) in asset.live_regions_mut().iter_mut().enumerate() {
        if !region.selected {
            continue;
        }
        match extrude_one(region) {
            Ok(()) => {
                debug_assert!(region.shape_is_consistent());
                report.extruded += 1;
            }
            Err(err) => {
                debug!(index, %err, "skipping region in extrude");
                report.failed += 1;
                first_error.get_or_insert(err);
            }
        }
    }

    if report.extruded > 0 {
        notifier.asset_changed(AssetChange::BundleExtruded);
        Ok(report)
    } else if let Some(err) = first_error {
        Err(err)
    } else {
        Ok(report)
    }
}
