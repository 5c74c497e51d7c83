//! Layer composition.
//!
//! Maps a sampled frame to the sprite-sheet regions the renderer draws, back
//! to front. [`SpriteReference`] is hashable and ordered so renderers can key
//! their texture caches on it across ticks.

use std::sync::Arc;

use smallvec::SmallVec;

use crate::components::attachment::AttachmentKind;
use crate::error::ConfigurationError;
use crate::resources::actionstore::ActionDefinition;

/// One drawable layer: a frame of a sprite sheet plus its placement.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SpriteReference {
    pub sheet: Arc<str>,
    pub frame: u32,
    pub offset: [i32; 2],
    pub mirrored: bool,
}

impl SpriteReference {
    /// Key identifying the texture region regardless of placement.
    pub fn texture_key(&self) -> (&str, u32) {
        (&*self.sheet, self.frame)
    }
}

pub type LayerList = SmallVec<[SpriteReference; 4]>;

/// Every drawable layer of frame `frame_index` of action `action_index`.
///
/// Empty placeholder layers (negative sprite frame) are skipped; the order of
/// the remaining layers is kept.
pub fn layers_for(
    definition: &ActionDefinition,
    attachment: AttachmentKind,
    action_index: usize,
    frame_index: usize,
) -> Result<LayerList, ConfigurationError> {
    let action = definition.action(attachment, action_index)?;
    let frame = action
        .frames
        .get(frame_index)
        .ok_or(ConfigurationError::FrameOutOfRange {
            index: action_index,
            frame: frame_index,
            frame_count: action.frame_count(),
        })?;

    Ok(frame
        .layers
        .iter()
        .filter_map(|layer| {
            let sprite_frame = u32::try_from(layer.sprite_frame).ok()?;
            Some(SpriteReference {
                sheet: Arc::clone(&definition.sprite_sheet),
                frame: sprite_frame,
                offset: layer.offset,
                mirrored: layer.mirrored,
            })
        })
        .collect())
}
