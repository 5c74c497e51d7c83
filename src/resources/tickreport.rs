//! Per-tick error collection.
//!
//! Systems push per-actor failures here instead of aborting; the engine
//! drains the report at the end of each tick and hands it to the caller.

use bevy_ecs::prelude::Resource;

use crate::components::actor::ActorId;
use crate::error::{ConfigurationError, EntityError};

#[derive(Resource, Debug, Default)]
pub struct TickReport {
    pub errors: Vec<EntityError>,
}

impl TickReport {
    pub fn push(&mut self, actor: ActorId, error: ConfigurationError) {
        self.errors.push(EntityError { actor, error });
    }

    pub fn take(&mut self) -> Vec<EntityError> {
        std::mem::take(&mut self.errors)
    }
}
