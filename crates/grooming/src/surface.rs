//! Contracts for the external collaborators of the grooming core.
//!
//! The groom asset never owns the scalp surface or the host application's
//! update machinery; it talks to them through the traits here. The host
//! passes an *evaluated* surface snapshot into each binding call; this crate
//! never triggers surface evaluation itself.

use crate::types::{SurfaceHandle, SurfaceSample};

/// An evaluated scalp surface snapshot.
///
/// Must be immutable for the duration of a binding call.
pub trait ScalpSurface {
    /// Samples covering the named area, one per covered surface element.
    /// Returns `None` if the surface has no area of that name.
    fn area_samples(&self, area_name: &str) -> Option<Vec<SurfaceSample>>;

    /// Names of all areas on this surface. Used to populate selectors;
    /// not required for core correctness.
    fn area_names(&self) -> Vec<String>;
}

/// Resolves an opaque [`SurfaceHandle`] to an evaluated surface.
///
/// The surface's lifetime is independent of the groom asset, so the asset
/// stores only the handle and resolves it per operation.
pub trait SurfaceProvider {
    fn resolve(&self, handle: SurfaceHandle) -> Option<&dyn ScalpSurface>;
}

/// What changed about an asset, reported once per completed mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetChange {
    RegionAdded,
    RegionRemoved,
    RegionBound,
    BundleExtruded,
}

/// Receives one notification per successful mutation operator, signaling
/// "visual state changed, recompute dependent geometry".
pub trait ChangeNotifier {
    fn asset_changed(&mut self, change: AssetChange);
}

/// Notifier that drops all notifications. Useful for headless callers.
#[derive(Debug, Default)]
pub struct NullNotifier;

impl ChangeNotifier for NullNotifier {
    fn asset_changed(&mut self, _change: AssetChange) {}
}
