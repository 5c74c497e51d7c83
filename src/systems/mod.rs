//! Engine systems.
//!
//! This module groups the ECS systems run once per tick and the pure
//! functions they are built on.
//!
//! Submodules overview
//! - [`actionstate`] – decide when an actor's animation restarts
//! - [`framesampler`] – compute the visible frame from the animation clock
//! - [`layers`] – map a frame to the sprite references the renderer draws
//! - [`time`] – update the engine clock

pub mod actionstate;
pub mod framesampler;
pub mod layers;
pub mod time;
