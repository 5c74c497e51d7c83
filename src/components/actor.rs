//! Actor identity and the descriptor used to load its sprites.
//!
//! [`ActorId`] is the id the caller uses; the engine maps it to a bevy
//! [`Entity`](bevy_ecs::entity::Entity) through
//! [`ActorRegistry`](crate::resources::registry::ActorRegistry).
//! [`ActorDescriptor`] says which attachment sets an actor needs.

use std::fmt;

use arrayvec::ArrayVec;
use bevy_ecs::prelude::Component;
use serde::{Deserialize, Serialize};

use crate::components::attachment::{AttachmentKey, AttachmentKind, MAX_ATTACHMENTS};

/// Caller-visible identity of a tracked actor.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ActorId(pub u64);

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn as_str(self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }
}

/// Job (class) sprite id of a player character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JobSpriteKind(pub u16);

/// Hair style index of a player character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HeadVariant(pub u16);

/// What to load for an actor at registration.
#[derive(Component, Debug, Clone, PartialEq, Eq, Hash)]
pub enum ActorDescriptor {
    /// Player character: a body from the job sprite plus a head.
    Character {
        gender: Gender,
        job: JobSpriteKind,
        head: HeadVariant,
    },
    /// Monster: a single body sprite.
    Monster { sprite: String },
}

impl ActorDescriptor {
    pub fn character(gender: Gender, job: u16, head: u16) -> Self {
        ActorDescriptor::Character {
            gender,
            job: JobSpriteKind(job),
            head: HeadVariant(head),
        }
    }

    pub fn monster(sprite: impl Into<String>) -> Self {
        ActorDescriptor::Monster {
            sprite: sprite.into(),
        }
    }

    /// Attachment sets this actor needs, in render order.
    pub fn attachment_keys(&self) -> ArrayVec<(AttachmentKind, AttachmentKey), MAX_ATTACHMENTS> {
        let mut keys = ArrayVec::new();
        match self {
            ActorDescriptor::Character { gender, job, head } => {
                keys.push((
                    AttachmentKind::Body,
                    AttachmentKey::Body {
                        gender: *gender,
                        job: *job,
                    },
                ));
                keys.push((
                    AttachmentKind::Head,
                    AttachmentKey::Head {
                        gender: *gender,
                        head: *head,
                    },
                ));
            }
            ActorDescriptor::Monster { sprite } => {
                keys.push((
                    AttachmentKind::Body,
                    AttachmentKey::Monster {
                        sprite: sprite.clone(),
                    },
                ));
            }
        }
        keys
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn character_needs_body_then_head() {
        let keys = ActorDescriptor::character(Gender::Female, 4, 2).attachment_keys();
        let kinds: Vec<_> = keys.iter().map(|(k, _)| *k).collect();
        assert_eq!(kinds, vec![AttachmentKind::Body, AttachmentKind::Head]);
        assert_eq!(keys[0].1.sprite_path(), "body/female/4");
        assert_eq!(keys[1].1.sprite_path(), "head/female/2");
    }

    #[test]
    fn monster_needs_only_a_body() {
        let keys = ActorDescriptor::monster("poring").attachment_keys();
        assert_eq!(keys.len(), 1);
        assert_eq!(keys[0].0, AttachmentKind::Body);
        assert_eq!(keys[0].1.sprite_path(), "monster/poring");
    }

    #[test]
    fn actor_id_display() {
        assert_eq!(ActorId(42).to_string(), "#42");
    }
}
