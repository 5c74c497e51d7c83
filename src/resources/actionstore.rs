//! Action data and the shared cache of loaded action sets.
//!
//! The data types mirror what a sprite codec hands over: an
//! [`ActionDefinition`] is an ordered list of [`Action`]s, each an ordered
//! list of [`Frame`]s, each an ordered (back-to-front) list of [`Layer`]s.
//! Definitions are immutable once loaded and shared between actors through
//! [`Arc`]. [`ActionStore`] caches them per [`AttachmentKey`] so registering
//! many actors with the same sprites decodes each set once.

use std::sync::Arc;
use std::time::Duration;

use bevy_ecs::prelude::Resource;
use log::debug;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::components::attachment::{AttachmentKey, AttachmentKind};
use crate::error::{ConfigurationError, LoadError};
use crate::loader::ActionSource;

/// One visual element of a frame.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Layer {
    /// Frame in the sprite sheet. Negative values mark an empty layer.
    pub sprite_frame: i32,
    /// Pixel offset from the actor's anchor.
    #[serde(default)]
    pub offset: [i32; 2],
    #[serde(default)]
    pub mirrored: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct Frame {
    pub layers: Vec<Layer>,
}

/// A pre-authored animation clip.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Action {
    pub frames: Vec<Frame>,
    /// Nominal time each frame stays visible, in milliseconds.
    pub delay_ms: u64,
    /// Explicit clip length. Defaults to `delay_ms * frames`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
}

impl Action {
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    pub fn total_duration(&self) -> Duration {
        match self.duration_ms {
            Some(ms) => Duration::from_millis(ms),
            None => self.delay().saturating_mul(self.frames.len() as u32),
        }
    }
}

/// Ordered actions of one attachment, plus the sprite sheet they index into.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ActionDefinition {
    pub sprite_sheet: Arc<str>,
    pub actions: Vec<Action>,
}

impl ActionDefinition {
    /// Action at `index`, reporting misses against `attachment`.
    pub fn action(
        &self,
        attachment: AttachmentKind,
        index: usize,
    ) -> Result<&Action, ConfigurationError> {
        self.actions
            .get(index)
            .ok_or(ConfigurationError::MissingAction {
                attachment,
                index,
                available: self.actions.len(),
            })
    }
}

/// Cache of loaded action sets keyed by what they were loaded for.
#[derive(Resource, Debug, Default)]
pub struct ActionStore {
    pub definitions: FxHashMap<AttachmentKey, Arc<ActionDefinition>>,
}

impl ActionStore {
    pub fn new() -> Self {
        ActionStore {
            definitions: FxHashMap::default(),
        }
    }

    /// Return the cached set for `key`, loading it from `source` on a miss.
    ///
    /// Failed loads are not cached.
    pub fn get_or_load(
        &mut self,
        key: &AttachmentKey,
        source: &dyn ActionSource,
    ) -> Result<Arc<ActionDefinition>, LoadError> {
        if let Some(definition) = self.definitions.get(key) {
            return Ok(Arc::clone(definition));
        }
        let definition = Arc::new(source.load(key)?);
        debug!(
            "Loaded {} actions for '{}'",
            definition.actions.len(),
            key.sprite_path()
        );
        self.definitions.insert(key.clone(), Arc::clone(&definition));
        Ok(definition)
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::components::actor::Gender;

    struct CountingSource {
        loads: Cell<usize>,
    }

    impl ActionSource for CountingSource {
        fn load(&self, key: &AttachmentKey) -> Result<ActionDefinition, LoadError> {
            self.loads.set(self.loads.get() + 1);
            match key {
                AttachmentKey::Monster { .. } => Err(LoadError::MissingAsset(key.sprite_path())),
                _ => Ok(ActionDefinition {
                    sprite_sheet: Arc::from(key.sprite_path()),
                    actions: vec![],
                }),
            }
        }
    }

    fn action(frames: usize, delay_ms: u64) -> Action {
        Action {
            frames: vec![Frame::default(); frames],
            delay_ms,
            duration_ms: None,
        }
    }

    #[test]
    fn total_duration_defaults_to_delay_times_frames() {
        assert_eq!(action(4, 150).total_duration(), Duration::from_millis(600));
        let explicit = Action {
            duration_ms: Some(500),
            ..action(4, 150)
        };
        assert_eq!(explicit.total_duration(), Duration::from_millis(500));
    }

    #[test]
    fn missing_action_reports_attachment_and_size() {
        let definition = ActionDefinition {
            sprite_sheet: Arc::from("sheet"),
            actions: vec![action(1, 100)],
        };
        assert!(definition.action(AttachmentKind::Body, 0).is_ok());
        assert_eq!(
            definition.action(AttachmentKind::Head, 3),
            Err(ConfigurationError::MissingAction {
                attachment: AttachmentKind::Head,
                index: 3,
                available: 1,
            })
        );
    }

    #[test]
    fn store_loads_each_key_once() {
        let source = CountingSource {
            loads: Cell::new(0),
        };
        let mut store = ActionStore::new();
        let key = AttachmentKey::Head {
            gender: Gender::Male,
            head: crate::components::actor::HeadVariant(3),
        };

        let a = store.get_or_load(&key, &source).unwrap();
        let b = store.get_or_load(&key, &source).unwrap();

        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(source.loads.get(), 1);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn store_does_not_cache_failures() {
        let source = CountingSource {
            loads: Cell::new(0),
        };
        let mut store = ActionStore::new();
        let key = AttachmentKey::Monster {
            sprite: "ghost".to_string(),
        };

        assert!(matches!(
            store.get_or_load(&key, &source),
            Err(LoadError::MissingAsset(path)) if path == "monster/ghost"
        ));
        assert!(store.is_empty());
        assert!(store.get_or_load(&key, &source).is_err());
        assert_eq!(source.loads.get(), 2);
    }
}
