//! Hair-bundle grooming core: regions bound to a scalp surface and the
//! cross-section bundles that grow from them.
//!
//! This crate owns the region/bundle data model and its structural mutation
//! operators; it does not evaluate surfaces, interpolate guide strands, or
//! render. Those collaborators sit behind the traits in [`surface`].
//!
//! ## Key components
//!
//! - **Types**: cross-sections, shape vertices, attachment samples
//! - **Bundle**: parallel section/vertex/cache arrays behind
//!   invariant-preserving mutators
//! - **Region / Asset**: the durable entity model, with an edit-mode staging
//!   copy of the region list
//! - **Binding**: named-area resolution and deterministic region frames
//! - **Operators**: add / remove / bind / extrude, command-style and
//!   synchronous, one change notification per completed mutation

pub mod asset;
pub mod binding;
pub mod bundle;
pub mod constants;
pub mod curve_cache;
pub mod operators;
pub mod region;
pub mod surface;
pub mod types;

#[cfg(test)]
pub(crate) mod test_surface;

pub use asset::{EditGroom, GroomAsset};
pub use binding::{bind_region, compute_region_frame, resolve_surface_area, BindError, BindOutcome};
pub use bundle::Bundle;
pub use operators::{
    extrude_bundles, region_add, region_bind, region_remove, ExtrudeReport, OperatorError,
};
pub use region::Region;
pub use surface::{AssetChange, ChangeNotifier, NullNotifier, ScalpSurface, SurfaceProvider};
pub use types::{CrossSection, HairGuide, ShapeVertex, SurfaceHandle, SurfaceSample};
