//! Actor id → entity index.

use bevy_ecs::prelude::*;
use rustc_hash::FxHashMap;

use crate::components::actor::ActorId;

/// Maps caller-visible actor ids to the entities that hold their state.
#[derive(Resource, Debug, Default)]
pub struct ActorRegistry {
    pub map: FxHashMap<ActorId, Entity>,
}

impl ActorRegistry {
    pub fn new() -> Self {
        ActorRegistry {
            map: FxHashMap::default(),
        }
    }

    pub fn get(&self, actor: ActorId) -> Option<Entity> {
        self.map.get(&actor).copied()
    }

    pub fn contains(&self, actor: ActorId) -> bool {
        self.map.contains_key(&actor)
    }

    pub fn insert(&mut self, actor: ActorId, entity: Entity) {
        self.map.insert(actor, entity);
    }

    pub fn remove(&mut self, actor: ActorId) -> Option<Entity> {
        self.map.remove(&actor)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn actors(&self) -> impl Iterator<Item = ActorId> + '_ {
        self.map.keys().copied()
    }
}
