//! In-memory scalp surface and notifier doubles shared by the module tests.

use std::collections::HashMap;

use glam::Vec3;

use crate::surface::{AssetChange, ChangeNotifier, ScalpSurface, SurfaceProvider};
use crate::types::{SurfaceHandle, SurfaceSample};

pub(crate) struct MockSurface {
    areas: HashMap<String, Vec<SurfaceSample>>,
}

impl MockSurface {
    pub(crate) fn new() -> Self {
        Self {
            areas: HashMap::new(),
        }
    }

    /// Add an area of `count` unit-weight ring samples with +Z normals,
    /// offset one unit above `center_xy`.
    pub(crate) fn with_disc_area(mut self, name: &str, count: usize, center_xy: Vec3) -> Self {
        let samples = (0..count)
            .map(|i| {
                let angle = std::f32::consts::TAU * i as f32 / count as f32;
                SurfaceSample {
                    position: center_xy + Vec3::new(angle.cos(), angle.sin(), 0.0) + Vec3::Z,
                    normal: Vec3::Z,
                    weight: 1.0,
                }
            })
            .collect();
        self.areas.insert(name.to_owned(), samples);
        self
    }
}

impl ScalpSurface for MockSurface {
    fn area_samples(&self, area_name: &str) -> Option<Vec<SurfaceSample>> {
        self.areas.get(area_name).cloned()
    }

    fn area_names(&self) -> Vec<String> {
        self.areas.keys().cloned().collect()
    }
}

/// Provider holding a single surface under handle 1.
pub(crate) struct MockProvider {
    surface: MockSurface,
}

impl MockProvider {
    pub(crate) const HANDLE: SurfaceHandle = SurfaceHandle(1);

    pub(crate) fn new(surface: MockSurface) -> Self {
        Self { surface }
    }
}

impl SurfaceProvider for MockProvider {
    fn resolve(&self, handle: SurfaceHandle) -> Option<&dyn ScalpSurface> {
        (handle == Self::HANDLE).then_some(&self.surface as &dyn ScalpSurface)
    }
}

/// Notifier that records every change it receives.
#[derive(Default)]
pub(crate) struct RecordingNotifier {
    pub(crate) changes: Vec<AssetChange>,
}

impl ChangeNotifier for RecordingNotifier {
    fn asset_changed(&mut self, change: AssetChange) {
        self.changes.push(change);
    }
}
