//! Sources of decoded action data.
//!
//! The engine never touches archives or binary sprite formats itself; it asks
//! an [`ActionSource`] for the decoded [`ActionDefinition`] of an
//! [`AttachmentKey`]. [`JsonActionLibrary`] is a source backed by one JSON
//! document, used by the demo binary and the tests.
//!
//! # JSON Format
//!
//! ```json
//! {
//!   "definitions": {
//!     "body/male/0": {
//!       "sprite_sheet": "body/male/0",
//!       "actions": [
//!         { "delay_ms": 150, "frames": [ { "layers": [ { "sprite_frame": 0 } ] } ] }
//!       ]
//!     }
//!   }
//! }
//! ```

use std::fs;
use std::path::Path;

use log::info;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::components::attachment::AttachmentKey;
use crate::error::LoadError;
use crate::resources::actionstore::ActionDefinition;

/// Supplies decoded action sets for attachment keys.
pub trait ActionSource {
    fn load(&self, key: &AttachmentKey) -> Result<ActionDefinition, LoadError>;
}

/// Action sets keyed by sprite path, read from a JSON document.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct JsonActionLibrary {
    pub definitions: FxHashMap<String, ActionDefinition>,
}

impl JsonActionLibrary {
    pub fn from_json(path: &str, json: &str) -> Result<Self, LoadError> {
        serde_json::from_str(json).map_err(|e| LoadError::Decode {
            path: path.to_string(),
            reason: e.to_string(),
        })
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let display = path.display().to_string();
        let json = fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: display.clone(),
            source,
        })?;
        let library = Self::from_json(&display, &json)?;
        info!(
            "Loaded action library {} ({} definitions)",
            display,
            library.definitions.len()
        );
        Ok(library)
    }

    pub fn insert(&mut self, sprite_path: impl Into<String>, definition: ActionDefinition) {
        self.definitions.insert(sprite_path.into(), definition);
    }
}

impl ActionSource for JsonActionLibrary {
    fn load(&self, key: &AttachmentKey) -> Result<ActionDefinition, LoadError> {
        let path = key.sprite_path();
        self.definitions
            .get(&path)
            .cloned()
            .ok_or(LoadError::MissingAsset(path))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::components::actor::{Gender, JobSpriteKind};

    const LIBRARY: &str = r#"{
        "definitions": {
            "body/male/0": {
                "sprite_sheet": "body/male/0",
                "actions": [
                    { "delay_ms": 150, "frames": [
                        { "layers": [ { "sprite_frame": 0 }, { "sprite_frame": -1 } ] },
                        { "layers": [ { "sprite_frame": 1, "offset": [2, -3], "mirrored": true } ] }
                    ] }
                ]
            }
        }
    }"#;

    fn novice_body() -> AttachmentKey {
        AttachmentKey::Body {
            gender: Gender::Male,
            job: JobSpriteKind(0),
        }
    }

    #[test]
    fn parses_layers_with_defaults() {
        let library = JsonActionLibrary::from_json("inline", LIBRARY).unwrap();
        let definition = library.load(&novice_body()).unwrap();
        let action = &definition.actions[0];

        assert_eq!(&*definition.sprite_sheet, "body/male/0");
        assert_eq!(action.delay_ms, 150);
        assert_eq!(action.frames[0].layers[0].offset, [0, 0]);
        assert!(!action.frames[0].layers[0].mirrored);
        assert_eq!(action.frames[1].layers[0].offset, [2, -3]);
        assert!(action.frames[1].layers[0].mirrored);
    }

    #[test]
    fn unknown_path_is_missing_asset() {
        let library = JsonActionLibrary::from_json("inline", LIBRARY).unwrap();
        let key = AttachmentKey::Body {
            gender: Gender::Male,
            job: JobSpriteKind(9999),
        };
        match library.load(&key) {
            Err(LoadError::MissingAsset(path)) => assert_eq!(path, "body/male/9999"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn malformed_json_is_decode_error() {
        let err = JsonActionLibrary::from_json("broken.json", "{ not json").unwrap_err();
        assert!(matches!(err, LoadError::Decode { ref path, .. } if path == "broken.json"));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(LIBRARY.as_bytes()).unwrap();

        let library = JsonActionLibrary::load_from_file(file.path()).unwrap();
        assert_eq!(library.definitions.len(), 1);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = JsonActionLibrary::load_from_file("/nonexistent/actions.json").unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }
}
