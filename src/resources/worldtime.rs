use std::time::Duration;

use bevy_ecs::prelude::Resource;

/// Engine clock, advanced once per tick by
/// [`update_world_time`](crate::systems::time::update_world_time).
///
/// `now` is measured from the engine epoch and is what every animation clock
/// is compared against.
#[derive(Resource, Clone, Copy, Debug, Default, PartialEq)]
pub struct WorldTime {
    pub now: Duration,
}
