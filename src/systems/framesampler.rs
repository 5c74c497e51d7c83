//! Frame sampling.
//!
//! Turns an actor's [`AnimationClock`] into the frame index visible at `now`:
//!
//! ```text
//! per_frame = max(delay / fps_multiplier, min_frame_duration)
//! frame     = floor((now - started_at) / per_frame) mod frame_count
//! ```
//!
//! The elapsed time is always measured from the `started_at` committed at the
//! last restart. Instants before it sample frame 0.

use std::time::Duration;

use arrayvec::ArrayVec;
use bevy_ecs::prelude::*;
use log::warn;

use crate::components::actor::ActorId;
use crate::components::animationstate::{AnimationClock, AnimationState, FrameCursor, VisibleFrames};
use crate::components::attachment::{AttachmentKind, SpriteAttachments};
use crate::error::ConfigurationError;
use crate::resources::actionstore::{Action, ActionDefinition};
use crate::resources::animconfig::AnimationConfig;
use crate::resources::tickreport::TickReport;
use crate::resources::worldtime::WorldTime;

/// Time each frame of `action` stays visible at `fps_multiplier`, never
/// shorter than `min`. Non-finite or negative scaled values fall back to `min`.
pub fn frame_duration(action: &Action, fps_multiplier: f32, min: Duration) -> Duration {
    let scaled = action.delay().as_nanos() as f64 / f64::from(fps_multiplier);
    if !scaled.is_finite() || scaled < 0.0 {
        return min;
    }
    Duration::from_nanos(scaled.round() as u64).max(min)
}

/// Frame of `action` visible at `now`, or `None` if the action has no frames.
pub fn sample_frame(
    action: &Action,
    clock: &AnimationClock,
    now: Duration,
    min_frame_duration: Duration,
) -> Option<usize> {
    let frame_count = action.frame_count();
    if frame_count == 0 {
        return None;
    }
    let per_frame = frame_duration(action, clock.fps_multiplier, min_frame_duration).as_nanos();
    if per_frame == 0 {
        return Some(0);
    }
    let steps = clock.elapsed(now).as_nanos() / per_frame;
    Some((steps % frame_count as u128) as usize)
}

/// Sample one attachment at the actor's resolved action index.
pub fn sample_attachment(
    definition: &ActionDefinition,
    attachment: AttachmentKind,
    action_index: usize,
    clock: &AnimationClock,
    now: Duration,
    min_frame_duration: Duration,
) -> Result<FrameCursor, ConfigurationError> {
    let action = definition.action(attachment, action_index)?;
    let frame_index = sample_frame(action, clock, now, min_frame_duration).ok_or(
        ConfigurationError::EmptyAction {
            attachment,
            index: action_index,
        },
    )?;
    Ok(FrameCursor {
        attachment,
        action_index,
        frame_index,
    })
}

/// Update [`VisibleFrames`] for every resolved actor.
///
/// An attachment that fails to sample keeps its previous cursor and the
/// error goes to [`TickReport`].
pub fn frame_sampler_system(
    mut query: Query<(
        &ActorId,
        &AnimationState,
        &SpriteAttachments,
        &mut VisibleFrames,
    )>,
    config: Res<AnimationConfig>,
    time: Res<WorldTime>,
    mut report: ResMut<TickReport>,
) {
    for (actor, animation, attachments, mut visible) in query.iter_mut() {
        let Some(action_index) = animation.resolved_action_index else {
            continue;
        };
        let mut cursors = ArrayVec::new();
        for (kind, definition) in attachments.iter() {
            match sample_attachment(
                definition,
                kind,
                action_index,
                &animation.clock,
                time.now,
                config.min_frame_duration,
            ) {
                Ok(cursor) => cursors.push(cursor),
                Err(error) => {
                    warn!("Actor {}: {}", actor, error);
                    report.push(*actor, error);
                    if let Some(previous) = visible.get(kind) {
                        cursors.push(*previous);
                    }
                }
            }
        }
        visible.cursors = cursors;
    }
}
