//! Error types surfaced by the animation engine.
//!
//! - [`LoadError`] – an attachment set could not be loaded at registration.
//! - [`ConfigurationError`] – a state has no action, or an action is unusable.
//! - [`LookupError`] – a query named an actor the engine cannot answer for.
//! - [`EntityError`] – one entry of the per-entity batch returned by a tick.
//!
//! None of these abort the tick loop. The caller decides how to recover.

use std::io;

use thiserror::Error;

use crate::components::actor::ActorId;
use crate::components::attachment::AttachmentKind;
use crate::components::behavior::BehavioralState;

/// Failure while loading the action data of a new actor.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The sprite path is not present in the action source.
    #[error("missing action asset: {0}")]
    MissingAsset(String),

    /// The asset exists but could not be decoded.
    #[error("failed to decode '{path}': {reason}")]
    Decode { path: String, reason: String },

    /// The backing container could not be read.
    #[error("failed to read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    /// The actor id is already tracked.
    #[error("actor {0} is already registered")]
    AlreadyRegistered(ActorId),
}

/// Action data or action table cannot serve a request.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("no action mapped for state {0:?}")]
    UnmappedState(BehavioralState),

    #[error("{attachment:?} has no action {index} ({available} actions loaded)")]
    MissingAction {
        attachment: AttachmentKind,
        index: usize,
        available: usize,
    },

    #[error("{attachment:?} action {index} has no frames")]
    EmptyAction {
        attachment: AttachmentKind,
        index: usize,
    },

    #[error("frame {frame} out of range for action {index} ({frame_count} frames)")]
    FrameOutOfRange {
        index: usize,
        frame: usize,
        frame_count: usize,
    },
}

/// Failure answering a query about a specific actor.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("actor {0} is not registered")]
    UnknownActor(ActorId),

    /// Registered, but no tick has resolved an action for it yet.
    #[error("actor {0} has no resolved animation yet")]
    NotResolved(ActorId),

    #[error("actor {actor} has no {attachment:?} attachment")]
    MissingAttachment {
        actor: ActorId,
        attachment: AttachmentKind,
    },

    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
}

/// A configuration error tied to the actor it occurred on during a tick.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("actor {actor}: {error}")]
pub struct EntityError {
    pub actor: ActorId,
    #[source]
    pub error: ConfigurationError,
}
