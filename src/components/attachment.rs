//! Separately animated visual parts of an actor.
//!
//! Every actor carries one [`ActionDefinition`] per attachment. All
//! attachments share the actor's clock and resolved action index; they differ
//! only in the frames and layers they draw.

use std::sync::Arc;

use arrayvec::ArrayVec;
use bevy_ecs::prelude::Component;
use serde::{Deserialize, Serialize};

use crate::components::actor::{Gender, HeadVariant, JobSpriteKind};
use crate::resources::actionstore::ActionDefinition;

/// Upper bound of attachments per actor.
pub const MAX_ATTACHMENTS: usize = 2;

/// Attachment slot. Declaration order is render (back-to-front) order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttachmentKind {
    Body,
    Head,
}

/// Identifies one loadable action set in the action source.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AttachmentKey {
    Body { gender: Gender, job: JobSpriteKind },
    Head { gender: Gender, head: HeadVariant },
    Monster { sprite: String },
}

impl AttachmentKey {
    /// Path of the action set inside the sprite container.
    pub fn sprite_path(&self) -> String {
        match self {
            AttachmentKey::Body { gender, job } => format!("body/{}/{}", gender.as_str(), job.0),
            AttachmentKey::Head { gender, head } => {
                format!("head/{}/{}", gender.as_str(), head.0)
            }
            AttachmentKey::Monster { sprite } => format!("monster/{sprite}"),
        }
    }
}

/// Loaded action sets of an actor, in render order.
#[derive(Component, Debug, Clone, Default)]
pub struct SpriteAttachments {
    pub slots: ArrayVec<(AttachmentKind, Arc<ActionDefinition>), MAX_ATTACHMENTS>,
}

impl SpriteAttachments {
    pub fn get(&self, kind: AttachmentKind) -> Option<&Arc<ActionDefinition>> {
        self.slots
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, definition)| definition)
    }

    /// The body set drives transition timing.
    pub fn body(&self) -> Option<&Arc<ActionDefinition>> {
        self.get(AttachmentKind::Body)
    }

    pub fn iter(&self) -> impl Iterator<Item = (AttachmentKind, &Arc<ActionDefinition>)> {
        self.slots.iter().map(|(k, d)| (*k, d))
    }
}
