//! Character sprite animation engine.
//!
//! Decides which pre-authored action each actor is playing, which frame of it
//! is visible, and which sprite-sheet regions every layer of that frame
//! shows. This module exposes the engine's ECS components, resources,
//! systems, and events, plus the [`engine::AnimationEngine`] facade a game
//! loop drives once per tick.

pub mod components;
pub mod engine;
pub mod error;
pub mod events;
pub mod loader;
pub mod resources;
pub mod systems;
