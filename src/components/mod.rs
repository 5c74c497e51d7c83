//! ECS components attached to every tracked actor.
//!
//! Submodules overview:
//! - [`actor`] – caller-visible id and the descriptor used to load sprites
//! - [`animationstate`] – playback clock, state machine bookkeeping, sampled frames
//! - [`attachment`] – body/head action sets of an actor
//! - [`behavior`] – gameplay-owned behavioral state

pub mod actor;
pub mod animationstate;
pub mod attachment;
pub mod behavior;
