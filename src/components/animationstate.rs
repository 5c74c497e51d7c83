//! Per-actor playback state.
//!
//! - [`AnimationClock`] – when the current action started, when it nominally
//!   ends, and how fast it is sampled.
//! - [`AnimationState`] – the clock plus the state machine bookkeeping. Only
//!   the [`action_state_system`](crate::systems::actionstate::action_state_system)
//!   mutates it.
//! - [`VisibleFrames`] – frame index per attachment, written by the
//!   [`frame_sampler_system`](crate::systems::framesampler::frame_sampler_system).
//!
//! All instants are [`Duration`]s since the engine epoch.

use std::time::Duration;

use arrayvec::ArrayVec;
use bevy_ecs::prelude::Component;

use crate::components::attachment::{AttachmentKind, MAX_ATTACHMENTS};
use crate::components::behavior::BehavioralState;

/// Timing record of the action currently playing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationClock {
    pub started_at: Duration,
    /// `started_at` plus the action's unscaled total duration.
    pub ends_at: Duration,
    /// Sampling speed. Always > 0.
    pub fps_multiplier: f32,
}

impl AnimationClock {
    pub fn new(started_at: Duration) -> Self {
        Self {
            started_at,
            ends_at: started_at,
            fps_multiplier: 1.0,
        }
    }

    /// Time since the action started; zero if `now` precedes it.
    pub fn elapsed(&self, now: Duration) -> Duration {
        now.saturating_sub(self.started_at)
    }

    pub fn has_ended(&self, now: Duration) -> bool {
        now > self.ends_at
    }
}

#[derive(Component, Debug, Clone, PartialEq)]
pub struct AnimationState {
    /// Last state observed from [`Behavior`](crate::components::behavior::Behavior).
    pub current_state: BehavioralState,
    /// State whose action is playing, committed on every restart.
    pub previous_state: BehavioralState,
    pub clock: AnimationClock,
    /// Reserved for states that must play for a fixed time. Cleared on restart.
    pub forced_duration: Option<Duration>,
    /// `None` until the first restart.
    pub resolved_action_index: Option<usize>,
}

impl AnimationState {
    pub fn new(now: Duration) -> Self {
        Self {
            current_state: BehavioralState::Idle,
            previous_state: BehavioralState::Idle,
            clock: AnimationClock::new(now),
            forced_duration: None,
            resolved_action_index: None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.resolved_action_index.is_some()
    }
}

/// One sampled attachment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameCursor {
    pub attachment: AttachmentKind,
    pub action_index: usize,
    pub frame_index: usize,
}

/// Frames visible after the last tick, one per attachment.
#[derive(Component, Debug, Clone, Default, PartialEq)]
pub struct VisibleFrames {
    pub cursors: ArrayVec<FrameCursor, MAX_ATTACHMENTS>,
}

impl VisibleFrames {
    pub fn get(&self, attachment: AttachmentKind) -> Option<&FrameCursor> {
        self.cursors.iter().find(|c| c.attachment == attachment)
    }
}
