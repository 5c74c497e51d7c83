//! Animation restart events.
//!
//! When the [`action_state_system`](crate::systems::actionstate::action_state_system)
//! restarts an actor's animation, it triggers an [`AnimationRestarted`] event.
//! Observers can use it to play sounds, spawn effects, or log.
//!
//! # Example
//!
//! ```ignore
//! world.add_observer(|trigger: On<AnimationRestarted>| {
//!     if trigger.event().state == BehavioralState::Attacking {
//!         // play swing sound
//!     }
//! });
//! ```

use bevy_ecs::prelude::*;
use log::debug;

use crate::components::actor::ActorId;
use crate::components::behavior::BehavioralState;

/// Emitted once per restart, after the new clock has been committed.
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct AnimationRestarted {
    pub entity: Entity,
    pub actor: ActorId,
    /// State the actor entered.
    pub state: BehavioralState,
    /// Action index now playing.
    pub action_index: usize,
}

/// Observer that logs every restart at debug level.
pub fn log_animation_restart(trigger: On<AnimationRestarted>) {
    let event = trigger.event();
    debug!(
        "Actor {} entered {:?} (action {})",
        event.actor, event.state, event.action_index
    );
}
