//! Time update system.
//!
//! Updates the shared [`WorldTime`](crate::resources::worldtime::WorldTime)
//! resource once per tick from the scheduler's clock.
use std::time::Duration;

use bevy_ecs::prelude::*;

use crate::resources::worldtime::WorldTime;

/// Set `now` on the `WorldTime` resource.
///
/// The clock may step backwards; animation clocks clamp such instants to
/// their first frame.
pub fn update_world_time(world: &mut World, now: Duration) {
    world.resource_mut::<WorldTime>().now = now;
}
