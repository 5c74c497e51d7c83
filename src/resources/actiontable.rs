//! Behavioral state → action index lookup.
//!
//! Action sets are laid out with eight directional variants per action, so
//! consecutive actions sit eight slots apart. The table is identical for
//! every actor and never changes during a session.

use bevy_ecs::prelude::Resource;
use rustc_hash::FxHashMap;

use crate::components::behavior::BehavioralState;
use crate::error::ConfigurationError;
use crate::resources::animconfig::AnimationConfig;

#[derive(Resource, Debug, Clone, PartialEq)]
pub struct ActionTable {
    indices: FxHashMap<BehavioralState, usize>,
}

impl Default for ActionTable {
    fn default() -> Self {
        let indices = [
            (BehavioralState::Idle, 0),
            (BehavioralState::Walking, 8),
            (BehavioralState::Sitting, 16),
            (BehavioralState::PickingUp, 24),
            (BehavioralState::StandBy, 32),
            (BehavioralState::Attacking, 40),
            (BehavioralState::Hurt, 48),
            (BehavioralState::Frozen, 56),
            (BehavioralState::Dead, 64),
            (BehavioralState::Casting, 96),
        ]
        .into_iter()
        .collect();
        Self { indices }
    }
}

impl ActionTable {
    /// A table with no mappings.
    pub fn empty() -> Self {
        Self {
            indices: FxHashMap::default(),
        }
    }

    /// The default table with the config's `[actions]` overrides applied.
    pub fn from_config(config: &AnimationConfig) -> Self {
        let mut table = Self::default();
        for (state, index) in &config.action_overrides {
            match index {
                Some(i) => table.set(*state, *i),
                None => table.unset(*state),
            }
        }
        table
    }

    pub fn set(&mut self, state: BehavioralState, index: usize) {
        self.indices.insert(state, index);
    }

    pub fn unset(&mut self, state: BehavioralState) {
        self.indices.remove(&state);
    }

    pub fn lookup(&self, state: BehavioralState) -> Result<usize, ConfigurationError> {
        self.indices
            .get(&state)
            .copied()
            .ok_or(ConfigurationError::UnmappedState(state))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_spaces_actions_by_direction_count() {
        let table = ActionTable::default();
        assert_eq!(table.lookup(BehavioralState::Idle), Ok(0));
        assert_eq!(table.lookup(BehavioralState::Walking), Ok(8));
        assert_eq!(table.lookup(BehavioralState::Attacking), Ok(40));
        assert_eq!(table.lookup(BehavioralState::Dead), Ok(64));
    }

    #[test]
    fn every_state_is_mapped_by_default() {
        let table = ActionTable::default();
        for state in BehavioralState::ALL {
            assert!(table.lookup(state).is_ok(), "{state:?} unmapped");
        }
    }

    #[test]
    fn lookup_is_stable_across_calls() {
        let table = ActionTable::default();
        let first = table.lookup(BehavioralState::Sitting);
        assert_eq!(first, table.lookup(BehavioralState::Sitting));
    }

    #[test]
    fn missing_mapping_is_a_configuration_error() {
        let table = ActionTable::empty();
        assert_eq!(
            table.lookup(BehavioralState::Attacking),
            Err(ConfigurationError::UnmappedState(BehavioralState::Attacking))
        );
    }

    #[test]
    fn config_overrides_remap_and_unmap() {
        let mut config = AnimationConfig::new();
        config
            .action_overrides
            .insert(BehavioralState::Attacking, Some(80));
        config.action_overrides.insert(BehavioralState::Casting, None);

        let table = ActionTable::from_config(&config);
        assert_eq!(table.lookup(BehavioralState::Attacking), Ok(80));
        assert!(table.lookup(BehavioralState::Casting).is_err());
        assert_eq!(table.lookup(BehavioralState::Idle), Ok(0));
    }
}
