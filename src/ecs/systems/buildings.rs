use std::collections::BTreeMap;

use bevy_app::App;
use bevy_ecs::resource::Resource;
use bevy_ecs::schedule::IntoScheduleConfigs;
use bevy_ecs::system::{Res, ResMut};

use crate::ecs::schedule::{FramePhase, FrameTick};
use crate::id::BuildingId;
use crate::model::{Base, Building, BuildingState};
use crate::visuals::{VisualBackend, VisualHandle, Visuals};

/// A building's model and the state its material currently shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildingModel {
    pub handle: VisualHandle,
    pub shown: BuildingState,
}

/// Renderer models for every building in the base.
#[derive(Resource, Debug, Default)]
pub struct BuildingVisuals {
    models: BTreeMap<BuildingId, BuildingModel>,
}

impl BuildingVisuals {
    pub fn get(&self, id: BuildingId) -> Option<BuildingModel> {
        self.models.get(&id).copied()
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    /// Instantiate the blueprint's asset at the anchor, tagged for `shown`.
    /// No-op if the building already has a model.
    pub fn acquire(
        &mut self,
        visuals: &mut dyn VisualBackend,
        building: &Building,
        hex_size: f64,
        shown: BuildingState,
    ) -> VisualHandle {
        if let Some(model) = self.models.get(&building.id) {
            return model.handle;
        }
        let handle = visuals.instantiate_asset(building.blueprint.asset_name());
        if let Some(anchor) = building.footprint.first() {
            visuals.position_visual(handle, anchor.to_world(hex_size));
        }
        visuals.set_material(handle, shown.material_tag());
        self.models.insert(building.id, BuildingModel { handle, shown });
        tracing::debug!(building = %building.id, %handle, material = shown.material_tag(), "building model acquired");
        handle
    }

    /// Retag the model if the building has moved on. Returns true on change.
    fn sync(&mut self, visuals: &mut dyn VisualBackend, building: &Building) -> bool {
        let Some(model) = self.models.get_mut(&building.id) else {
            return false;
        };
        let state = building.state();
        if model.shown == state {
            return false;
        }
        visuals.set_material(model.handle, state.material_tag());
        model.shown = state;
        true
    }
}

/// Give every building a model and keep its material in step with its state.
pub fn sync_building_visuals(base: Res<Base>, mut visuals: ResMut<Visuals>, mut models: ResMut<BuildingVisuals>) {
    let hex_size = base.map().hex_size();
    let backend = visuals.backend_mut();
    for building in base.buildings() {
        if models.get(building.id).is_none() {
            models.acquire(backend, building, hex_size, building.state());
        } else if models.sync(backend, building) {
            tracing::debug!(building = %building.id, material = building.state().material_tag(), "building retagged");
        }
    }
}

pub fn add_building_systems(app: &mut App) {
    app.add_systems(FrameTick, sync_building_visuals.in_set(FramePhase::Last));
}
