//! Action state machine.
//!
//! Each tick, [`action_state_system`] compares every actor's desired
//! [`Behavior`] with the state whose action is currently playing and decides
//! whether the animation restarts.
//!
//! # Transition Policy
//!
//! A restart happens when:
//!
//! 1. the actor has never been resolved,
//! 2. the state changed to anything other than idle,
//! 3. the actor stays idle and the idle action has run past its end,
//! 4. the actor goes idle after walking and the walk cycle has reached its
//!    end (walking always completes its cycle),
//! 5. the actor goes idle from any other state (immediately).
//!
//! On restart the clock starts at `now`, the multiplier is taken from
//! [`AnimationConfig`] for the entered state, and the nominal end is
//! `now + total_duration` of the body action. The end is not scaled by the
//! multiplier: the multiplier only affects sampling.
//!
//! # Related
//!
//! - [`crate::systems::framesampler`] – turns the clock into a frame index
//! - [`crate::resources::actiontable::ActionTable`] – state → action index

use std::time::Duration;

use bevy_ecs::prelude::*;
use log::warn;

use crate::components::actor::ActorId;
use crate::components::animationstate::{AnimationClock, AnimationState};
use crate::components::attachment::{AttachmentKind, SpriteAttachments};
use crate::components::behavior::{Behavior, BehavioralState};
use crate::error::ConfigurationError;
use crate::events::animation::AnimationRestarted;
use crate::resources::actionstore::ActionDefinition;
use crate::resources::actiontable::ActionTable;
use crate::resources::animconfig::AnimationConfig;
use crate::resources::tickreport::TickReport;
use crate::resources::worldtime::WorldTime;

/// Whether an actor in `state` at `now` must restart its animation.
pub fn needs_restart(animation: &AnimationState, state: BehavioralState, now: Duration) -> bool {
    if !animation.is_resolved() {
        return true;
    }
    if state != BehavioralState::Idle {
        return state != animation.previous_state;
    }
    match animation.previous_state {
        BehavioralState::Idle => animation.clock.has_ended(now),
        // walking must finish its cycle
        BehavioralState::Walking => now >= animation.clock.ends_at,
        _ => true,
    }
}

/// Apply the transition policy to one actor.
///
/// Returns `Ok(true)` if the animation restarted. On error nothing is
/// mutated, so the actor keeps playing its last good action. Calling this
/// twice with the same `now` restarts at most once.
pub fn resolve_transition(
    animation: &mut AnimationState,
    state: BehavioralState,
    now: Duration,
    body: &ActionDefinition,
    table: &ActionTable,
    config: &AnimationConfig,
) -> Result<bool, ConfigurationError> {
    if !needs_restart(animation, state, now) {
        animation.current_state = state;
        return Ok(false);
    }

    let index = table.lookup(state)?;
    let action = body.action(AttachmentKind::Body, index)?;
    if action.frame_count() == 0 {
        return Err(ConfigurationError::EmptyAction {
            attachment: AttachmentKind::Body,
            index,
        });
    }

    animation.current_state = state;
    animation.previous_state = state;
    animation.clock = AnimationClock {
        started_at: now,
        ends_at: now.saturating_add(action.total_duration()),
        fps_multiplier: config.multiplier_for(state),
    };
    // TODO: give Attacking a forced duration once hit timing comes from gameplay
    animation.forced_duration = None;
    animation.resolved_action_index = Some(index);
    Ok(true)
}

/// Resolve transitions for every animated actor.
///
/// Configuration errors are collected into [`TickReport`] per actor; the
/// remaining actors are still processed.
pub fn action_state_system(
    mut query: Query<(
        Entity,
        &ActorId,
        &Behavior,
        &mut AnimationState,
        &SpriteAttachments,
    )>,
    table: Res<ActionTable>,
    config: Res<AnimationConfig>,
    time: Res<WorldTime>,
    mut report: ResMut<TickReport>,
    mut commands: Commands,
) {
    let now = time.now;
    for (entity, actor, behavior, mut animation, attachments) in query.iter_mut() {
        let Some(body) = attachments.body() else {
            warn!("Actor {} has no body attachment, skipping", actor);
            continue;
        };
        let state = behavior.state;
        match resolve_transition(&mut animation, state, now, body, &table, &config) {
            Ok(true) => {
                if let Some(action_index) = animation.resolved_action_index {
                    commands.trigger(AnimationRestarted {
                        entity,
                        actor: *actor,
                        state,
                        action_index,
                    });
                }
            }
            Ok(false) => {}
            Err(error) => {
                warn!("Actor {}: {}", actor, error);
                report.push(*actor, error);
            }
        }
    }
}
