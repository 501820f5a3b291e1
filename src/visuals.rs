//! Renderer boundary.
//!
//! The core never draws anything. It asks a `VisualBackend` to instantiate
//! named assets, move them, play clips on them, and dispose them.
//! `HeadlessVisuals` records those calls so the simulation runs and tests
//! without a renderer.

use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;

use bevy_ecs::resource::Resource;

use crate::model::WorldPoint;

pub const MINION_ASSET: &str = "minion";
pub const CLIP_WALK: &str = "walk";
pub const CLIP_IDLE: &str = "idle";
pub const CLIP_WORK: &str = "work";

/// Opaque handle to something the renderer instantiated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VisualHandle(pub u64);

impl fmt::Display for VisualHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "visual#{}", self.0)
    }
}

pub trait VisualBackend: Send + Sync {
    fn instantiate_asset(&mut self, name: &str) -> VisualHandle;
    fn position_visual(&mut self, handle: VisualHandle, point: WorldPoint);
    fn dispose_visual(&mut self, handle: VisualHandle);
    fn play_animation(&mut self, handle: VisualHandle, clip: &str, looped: bool, speed: f64);
    fn set_material(&mut self, handle: VisualHandle, tag: &str);
    fn as_any(&self) -> &dyn Any;
}

/// What the headless backend knows about one live visual.
#[derive(Debug, Clone, PartialEq)]
pub struct VisualRecord {
    pub asset: String,
    pub position: Option<WorldPoint>,
    pub clip: Option<String>,
    /// Every material tag applied, oldest first.
    pub materials: Vec<String>,
}

impl VisualRecord {
    pub fn material(&self) -> Option<&str> {
        self.materials.last().map(String::as_str)
    }
}

#[derive(Debug, Default)]
pub struct HeadlessVisuals {
    next: u64,
    live: BTreeMap<VisualHandle, VisualRecord>,
    disposed: u64,
}

impl HeadlessVisuals {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, handle: VisualHandle) -> Option<&VisualRecord> {
        self.live.get(&handle)
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    /// Live visuals instantiated from `asset`.
    pub fn count_asset(&self, asset: &str) -> usize {
        self.live.values().filter(|r| r.asset == asset).count()
    }

    pub fn disposed_count(&self) -> u64 {
        self.disposed
    }
}

impl VisualBackend for HeadlessVisuals {
    fn instantiate_asset(&mut self, name: &str) -> VisualHandle {
        self.next += 1;
        let handle = VisualHandle(self.next);
        self.live.insert(
            handle,
            VisualRecord {
                asset: name.to_string(),
                position: None,
                clip: None,
                materials: Vec::new(),
            },
        );
        handle
    }

    fn position_visual(&mut self, handle: VisualHandle, point: WorldPoint) {
        if let Some(record) = self.live.get_mut(&handle) {
            record.position = Some(point);
        }
    }

    fn dispose_visual(&mut self, handle: VisualHandle) {
        if self.live.remove(&handle).is_some() {
            self.disposed += 1;
        } else {
            tracing::warn!(%handle, "dispose of unknown visual");
        }
    }

    fn play_animation(&mut self, handle: VisualHandle, clip: &str, _looped: bool, _speed: f64) {
        if let Some(record) = self.live.get_mut(&handle) {
            record.clip = Some(clip.to_string());
        }
    }

    fn set_material(&mut self, handle: VisualHandle, tag: &str) {
        if let Some(record) = self.live.get_mut(&handle) {
            record.materials.push(tag.to_string());
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// The active renderer backend.
#[derive(Resource)]
pub struct Visuals(pub Box<dyn VisualBackend>);

impl Visuals {
    pub fn headless() -> Self {
        Self(Box::new(HeadlessVisuals::new()))
    }

    pub fn backend_mut(&mut self) -> &mut dyn VisualBackend {
        self.0.as_mut()
    }

    /// The headless recorder, if that is the active backend.
    pub fn headless_ref(&self) -> Option<&HeadlessVisuals> {
        self.0.as_any().downcast_ref::<HeadlessVisuals>()
    }
}

impl Default for Visuals {
    fn default() -> Self {
        Self::headless()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headless_tracks_lifecycle() {
        let mut visuals = Visuals::headless();
        let backend = visuals.backend_mut();
        let a = backend.instantiate_asset(MINION_ASSET);
        let b = backend.instantiate_asset("wood_package");
        backend.position_visual(a, WorldPoint::new(1.0, 2.0));
        backend.play_animation(a, CLIP_WALK, true, 1.0);
        backend.set_material(a, "scaffold");
        backend.set_material(a, "solid");
        backend.dispose_visual(b);
        backend.dispose_visual(b);

        let headless = visuals.headless_ref().unwrap();
        assert_eq!(headless.live_count(), 1);
        assert_eq!(headless.disposed_count(), 1);
        let record = headless.get(a).unwrap();
        assert_eq!(record.position, Some(WorldPoint::new(1.0, 2.0)));
        assert_eq!(record.clip.as_deref(), Some(CLIP_WALK));
        assert_eq!(record.material(), Some("solid"));
        assert_eq!(record.materials.len(), 2);
        assert_eq!(headless.count_asset("wood_package"), 0);
    }
}
