//! Engine facade driven by an external scheduler.
//!
//! [`AnimationEngine`] owns the ECS world, the per-tick schedule, and the
//! [`ActionSource`] used to load sprites. Callers register actors, feed
//! behavioral states, call [`tick`](AnimationEngine::tick) once per frame,
//! and query the layers to draw.
//!
//! # Tick Flow
//!
//! 1. [`update_world_time`] stores `now`
//! 2. [`action_state_system`] restarts animations whose state changed
//! 3. [`frame_sampler_system`] samples the visible frame of every attachment
//! 4. Per-actor errors collected in [`TickReport`] are returned as a batch

use std::time::Duration;

use bevy_ecs::observer::Observer;
use bevy_ecs::prelude::*;
use log::{debug, info};

use crate::components::actor::{ActorDescriptor, ActorId};
use crate::components::animationstate::{AnimationState, VisibleFrames};
use crate::components::attachment::{AttachmentKind, SpriteAttachments};
use crate::components::behavior::{Behavior, BehavioralState};
use crate::error::{ConfigurationError, EntityError, LoadError, LookupError};
use crate::events::animation::log_animation_restart;
use crate::loader::ActionSource;
use crate::resources::actionstore::ActionStore;
use crate::resources::actiontable::ActionTable;
use crate::resources::animconfig::AnimationConfig;
use crate::resources::registry::ActorRegistry;
use crate::resources::tickreport::TickReport;
use crate::resources::worldtime::WorldTime;
use crate::systems::actionstate::action_state_system;
use crate::systems::framesampler::{frame_sampler_system, sample_attachment};
use crate::systems::layers::{LayerList, layers_for};
use crate::systems::time::update_world_time;

pub struct AnimationEngine {
    world: World,
    schedule: Schedule,
    source: Box<dyn ActionSource>,
}

impl AnimationEngine {
    /// Build an engine whose action table comes from `config`.
    pub fn new(config: AnimationConfig, source: impl ActionSource + 'static) -> Self {
        let table = ActionTable::from_config(&config);
        Self::with_table(config, table, source)
    }

    pub fn with_table(
        config: AnimationConfig,
        table: ActionTable,
        source: impl ActionSource + 'static,
    ) -> Self {
        let mut world = World::new();
        world.insert_resource(WorldTime::default());
        world.insert_resource(config);
        world.insert_resource(table);
        world.insert_resource(ActionStore::new());
        world.insert_resource(ActorRegistry::new());
        world.insert_resource(TickReport::default());
        world.spawn(Observer::new(log_animation_restart));
        world.flush();

        let mut schedule = Schedule::default();
        schedule.add_systems((action_state_system, frame_sampler_system).chain());

        Self {
            world,
            schedule,
            source: Box::new(source),
        }
    }

    /// Load the actor's attachment sets and start tracking it.
    ///
    /// Either every attachment loads and the actor is tracked, or nothing
    /// changes. The actor starts idle and is resolved on the next tick.
    pub fn register(&mut self, actor: ActorId, descriptor: ActorDescriptor) -> Result<(), LoadError> {
        if self.world.resource::<ActorRegistry>().contains(actor) {
            return Err(LoadError::AlreadyRegistered(actor));
        }

        let mut attachments = SpriteAttachments::default();
        {
            let mut store = self.world.resource_mut::<ActionStore>();
            for (kind, key) in descriptor.attachment_keys() {
                let definition = store.get_or_load(&key, self.source.as_ref())?;
                attachments.slots.push((kind, definition));
            }
        }

        let now = self.world.resource::<WorldTime>().now;
        info!("Registering actor {} as {:?}", actor, descriptor);
        let entity = self
            .world
            .spawn((
                actor,
                descriptor,
                Behavior::default(),
                AnimationState::new(now),
                attachments,
                VisibleFrames::default(),
            ))
            .id();
        self.world.resource_mut::<ActorRegistry>().insert(actor, entity);
        Ok(())
    }

    /// Stop tracking the actor. Returns `false` if it was not registered.
    pub fn deregister(&mut self, actor: ActorId) -> bool {
        let Some(entity) = self.world.resource_mut::<ActorRegistry>().remove(actor) else {
            return false;
        };
        self.world.despawn(entity);
        info!("Deregistered actor {}", actor);
        true
    }

    /// Run one pass over every tracked actor.
    ///
    /// A failing actor keeps its last good animation and never stops the
    /// others from being processed; all failures come back together.
    pub fn tick(&mut self, now: Duration) -> Result<(), Vec<EntityError>> {
        update_world_time(&mut self.world, now);
        self.schedule.run(&mut self.world);
        self.world.clear_trackers();

        let errors = self.world.resource_mut::<TickReport>().take();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Set the behavioral state gameplay wants for the actor.
    pub fn set_state(&mut self, actor: ActorId, state: BehavioralState) -> Result<(), LookupError> {
        let entity = self.entity(actor)?;
        let mut behavior = self
            .world
            .get_mut::<Behavior>(entity)
            .ok_or(LookupError::UnknownActor(actor))?;
        behavior.state = state;
        Ok(())
    }

    /// Layers of `attachment` visible after the last tick, back to front.
    pub fn current_layers(
        &self,
        actor: ActorId,
        attachment: AttachmentKind,
    ) -> Result<LayerList, LookupError> {
        let entity = self.entity(actor)?;
        let attachments = self
            .world
            .get::<SpriteAttachments>(entity)
            .ok_or(LookupError::UnknownActor(actor))?;
        let definition = attachments
            .get(attachment)
            .ok_or(LookupError::MissingAttachment { actor, attachment })?;
        let sampled = self
            .world
            .get::<VisibleFrames>(entity)
            .and_then(|visible| visible.get(attachment).copied());
        let cursor = match sampled {
            Some(cursor) => cursor,
            None => {
                let animation = self
                    .world
                    .get::<AnimationState>(entity)
                    .ok_or(LookupError::UnknownActor(actor))?;
                let action_index = animation
                    .resolved_action_index
                    .ok_or(LookupError::NotResolved(actor))?;
                // never sampled since resolving: surface the sampling error
                sample_attachment(
                    definition,
                    attachment,
                    action_index,
                    &animation.clock,
                    self.now(),
                    self.world.resource::<AnimationConfig>().min_frame_duration,
                )?
            }
        };

        Ok(layers_for(
            definition,
            attachment,
            cursor.action_index,
            cursor.frame_index,
        )?)
    }

    /// Layers of every attachment that can be drawn, in render order.
    ///
    /// Attachments whose action cannot be shown are left out so the rest of
    /// the actor still renders; [`current_layers`](Self::current_layers)
    /// reports why.
    pub fn current_sprites(
        &self,
        actor: ActorId,
    ) -> Result<Vec<(AttachmentKind, LayerList)>, LookupError> {
        let entity = self.entity(actor)?;
        let resolved = self
            .world
            .get::<AnimationState>(entity)
            .is_some_and(AnimationState::is_resolved);
        if !resolved {
            return Err(LookupError::NotResolved(actor));
        }
        let kinds: Vec<AttachmentKind> = self
            .world
            .get::<SpriteAttachments>(entity)
            .map(|attachments| attachments.iter().map(|(kind, _)| kind).collect())
            .unwrap_or_default();
        Ok(kinds
            .into_iter()
            .filter_map(|kind| match self.current_layers(actor, kind) {
                Ok(layers) => Some((kind, layers)),
                Err(error) => {
                    debug!("Actor {}: not drawing {:?}: {}", actor, kind, error);
                    None
                }
            })
            .collect())
    }

    pub fn animation_state(&self, actor: ActorId) -> Result<AnimationState, LookupError> {
        let entity = self.entity(actor)?;
        self.world
            .get::<AnimationState>(entity)
            .cloned()
            .ok_or(LookupError::UnknownActor(actor))
    }

    pub fn visible_frames(&self, actor: ActorId) -> Result<VisibleFrames, LookupError> {
        let entity = self.entity(actor)?;
        self.world
            .get::<VisibleFrames>(entity)
            .cloned()
            .ok_or(LookupError::UnknownActor(actor))
    }

    /// Action index for `state`, without touching any actor.
    pub fn action_index(&self, state: BehavioralState) -> Result<usize, ConfigurationError> {
        self.world.resource::<ActionTable>().lookup(state)
    }

    pub fn is_registered(&self, actor: ActorId) -> bool {
        self.world.resource::<ActorRegistry>().contains(actor)
    }

    pub fn len(&self) -> usize {
        self.world.resource::<ActorRegistry>().len()
    }

    pub fn is_empty(&self) -> bool {
        self.world.resource::<ActorRegistry>().is_empty()
    }

    pub fn actors(&self) -> Vec<ActorId> {
        let mut actors: Vec<ActorId> = self.world.resource::<ActorRegistry>().actors().collect();
        actors.sort();
        actors
    }

    pub fn now(&self) -> Duration {
        self.world.resource::<WorldTime>().now
    }

    fn entity(&self, actor: ActorId) -> Result<Entity, LookupError> {
        self.world
            .resource::<ActorRegistry>()
            .get(actor)
            .ok_or(LookupError::UnknownActor(actor))
    }
}
