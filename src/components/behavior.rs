//! Behavioral state of an actor.
//!
//! Gameplay code owns the [`Behavior`] component and writes the state it wants
//! the actor to be in. The animation systems only read it; what is actually
//! playing lives in [`AnimationState`](crate::components::animationstate::AnimationState).

use bevy_ecs::prelude::Component;
use serde::{Deserialize, Serialize};

/// Gameplay-level state that drives action selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BehavioralState {
    #[default]
    Idle,
    Walking,
    Sitting,
    PickingUp,
    StandBy,
    Attacking,
    Hurt,
    Frozen,
    Dead,
    Casting,
}

impl BehavioralState {
    pub const ALL: [BehavioralState; 10] = [
        BehavioralState::Idle,
        BehavioralState::Walking,
        BehavioralState::Sitting,
        BehavioralState::PickingUp,
        BehavioralState::StandBy,
        BehavioralState::Attacking,
        BehavioralState::Hurt,
        BehavioralState::Frozen,
        BehavioralState::Dead,
        BehavioralState::Casting,
    ];

    /// Key used for this state in configuration files.
    pub fn config_name(self) -> &'static str {
        match self {
            BehavioralState::Idle => "idle",
            BehavioralState::Walking => "walking",
            BehavioralState::Sitting => "sitting",
            BehavioralState::PickingUp => "pickingup",
            BehavioralState::StandBy => "standby",
            BehavioralState::Attacking => "attacking",
            BehavioralState::Hurt => "hurt",
            BehavioralState::Frozen => "frozen",
            BehavioralState::Dead => "dead",
            BehavioralState::Casting => "casting",
        }
    }

    /// Parse a configuration key (case-insensitive).
    pub fn from_config_name(name: &str) -> Option<Self> {
        let name = name.trim().to_ascii_lowercase();
        Self::ALL.into_iter().find(|s| s.config_name() == name)
    }
}

/// Desired behavioral state, written by gameplay.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Behavior {
    pub state: BehavioralState,
}

impl Behavior {
    pub fn new(state: BehavioralState) -> Self {
        Self { state }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_names_round_trip_for_every_state() {
        for state in BehavioralState::ALL {
            assert_eq!(
                BehavioralState::from_config_name(state.config_name()),
                Some(state)
            );
        }
    }

    #[test]
    fn config_name_parsing_ignores_case_and_whitespace() {
        assert_eq!(
            BehavioralState::from_config_name("  Walking "),
            Some(BehavioralState::Walking)
        );
        assert_eq!(BehavioralState::from_config_name("running"), None);
    }
}
