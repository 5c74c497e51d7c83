//! Event types and observers used by the engine.
//!
//! Submodules:
//! - [`animation`] – notification emitted when an actor's animation restarts
pub mod animation;
