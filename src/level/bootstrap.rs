//! Level bootstrap
//!
//! Turns a [`LevelDescriptor`] into a running [`Level`]:
//! - instantiates the structure template into an [`AnchorPool`]
//! - validates the pool against the descriptor, reporting every shortfall
//! - places spawners and processors on random anchors without replacement
//! - places exactly one altar
//!
//! The returned level then resolves its outcome from gameplay events.

use std::fmt;
use std::rc::Rc;

use rand::SeedableRng;
use rand_pcg::Pcg32;
use thiserror::Error;

use super::anchors::{Anchor, AnchorCategory, AnchorPool, AnchorShortfall};
use super::descriptor::LevelDescriptor;
use super::entities::{Altar, Processor, Spawner};
use crate::audio::SoundEffect;
use crate::services::Services;

/// Fatal level setup failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BootstrapError {
    #[error("No level data provided on level load")]
    MissingLevelConfiguration,
    #[error("{}", render_shortfalls(.0))]
    InsufficientAnchors(Vec<AnchorShortfall>),
}

fn render_shortfalls(shortfalls: &[AnchorShortfall]) -> String {
    shortfalls
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Notifications from the external request and reputation systems
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameplayEvent {
    /// Total requests completed so far (monotonic)
    CompletedRequests(u32),
    /// Current player reputation, may drop below zero
    Reputation(f32),
}

/// Resolution state of a running level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LevelOutcome {
    #[default]
    Pending,
    Won {
        score: u64,
    },
    Lost,
}

impl LevelOutcome {
    pub fn is_resolved(&self) -> bool {
        !matches!(self, LevelOutcome::Pending)
    }
}

/// Builds levels from descriptors using injected services
pub struct LevelBootstrapper {
    rng: Pcg32,
    services: Services,
}

impl LevelBootstrapper {
    pub fn new(rng: Pcg32, services: Services) -> Self {
        Self { rng, services }
    }

    /// Seeded for reproducible placement, or from the thread RNG when `seed` is `None`
    pub fn with_seed(seed: Option<u64>, services: Services) -> Self {
        let rng = match seed {
            Some(seed) => Pcg32::seed_from_u64(seed),
            None => Pcg32::from_rng(&mut rand::rng()),
        };
        Self::new(rng, services)
    }

    /// Build the level described by `descriptor`.
    ///
    /// Fails without placing anything when the descriptor is missing or the
    /// structure cannot host every configured entity.
    pub fn initialize(
        mut self,
        descriptor: Option<Rc<LevelDescriptor>>,
    ) -> Result<Level, BootstrapError> {
        let descriptor = descriptor.ok_or(BootstrapError::MissingLevelConfiguration)?;
        log::info!(
            "Loading level '{}' on structure '{}'",
            descriptor.id,
            descriptor.structure.name
        );

        let mut pool = descriptor.structure.instantiate();
        let shortfalls = pool.shortfalls(&descriptor);
        if !shortfalls.is_empty() {
            let err = BootstrapError::InsufficientAnchors(shortfalls);
            log::error!("Level '{}' rejected:\n{}", descriptor.id, err);
            return Err(err);
        }

        let mut spawners = Vec::with_capacity(descriptor.spawners.len());
        for config in &descriptor.spawners {
            let anchor = self.take(&mut pool, &descriptor, AnchorCategory::Spawn)?;
            log::debug!("Spawner '{}' placed at {}", config.name, anchor.position);
            spawners.push(Spawner {
                anchor,
                config: config.clone(),
            });
        }

        let mut processors = Vec::with_capacity(descriptor.processors.len());
        for config in &descriptor.processors {
            let anchor = self.take(&mut pool, &descriptor, AnchorCategory::Processor)?;
            log::debug!("Processor '{}' placed at {}", config.name, anchor.position);
            processors.push(Processor {
                anchor,
                config: config.clone(),
            });
        }

        let anchor = pool
            .pick_random(AnchorCategory::Altar, &mut self.rng)
            .ok_or_else(|| exhausted(&descriptor, AnchorCategory::Altar))?;
        log::debug!("Altar placed at {}", anchor.position);

        Ok(Level {
            descriptor,
            spawners,
            processors,
            altar: Altar { anchor },
            unused: pool,
            outcome: LevelOutcome::Pending,
            services: self.services,
            on_defeat: Box::new(|| {}),
            on_success: Box::new(|_| {}),
        })
    }

    fn take(
        &mut self,
        pool: &mut AnchorPool,
        descriptor: &LevelDescriptor,
        category: AnchorCategory,
    ) -> Result<Anchor, BootstrapError> {
        pool.take_random(category, &mut self.rng)
            .ok_or_else(|| exhausted(descriptor, category))
    }
}

// Only reachable if placement runs without validation
fn exhausted(descriptor: &LevelDescriptor, category: AnchorCategory) -> BootstrapError {
    BootstrapError::InsufficientAnchors(vec![AnchorShortfall {
        category,
        required: descriptor.required_anchors(category),
        provided: descriptor.structure.anchor_count(category),
    }])
}

/// A placed level waiting for its win or loss condition
pub struct Level {
    descriptor: Rc<LevelDescriptor>,
    spawners: Vec<Spawner>,
    processors: Vec<Processor>,
    altar: Altar,
    unused: AnchorPool,
    outcome: LevelOutcome,
    services: Services,
    on_defeat: Box<dyn FnMut()>,
    on_success: Box<dyn FnMut(u64)>,
}

impl fmt::Debug for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Level")
            .field("descriptor", &self.descriptor.id)
            .field("spawners", &self.spawners.len())
            .field("processors", &self.processors.len())
            .field("altar", &self.altar)
            .field("outcome", &self.outcome)
            .finish_non_exhaustive()
    }
}

impl Level {
    pub fn descriptor(&self) -> &LevelDescriptor {
        &self.descriptor
    }

    pub fn spawners(&self) -> &[Spawner] {
        &self.spawners
    }

    pub fn processors(&self) -> &[Processor] {
        &self.processors
    }

    pub fn altar(&self) -> &Altar {
        &self.altar
    }

    /// Anchors left over after placement
    pub fn unused_anchors(&self) -> &AnchorPool {
        &self.unused
    }

    pub fn outcome(&self) -> LevelOutcome {
        self.outcome
    }

    /// Hook fired once when reputation reaches zero
    pub fn set_on_defeat(&mut self, hook: impl FnMut() + 'static) {
        self.on_defeat = Box::new(hook);
    }

    /// Hook fired once with the final score when enough requests complete
    pub fn set_on_success(&mut self, hook: impl FnMut(u64) + 'static) {
        self.on_success = Box::new(hook);
    }

    /// Consume one frame's events and return the resulting outcome
    pub fn handle(&mut self, events: &[GameplayEvent]) -> LevelOutcome {
        for event in events {
            match *event {
                GameplayEvent::CompletedRequests(count) => self.completed_requests(count),
                GameplayEvent::Reputation(reputation) => self.reputation_changed(reputation),
            }
        }
        self.outcome
    }

    fn completed_requests(&mut self, count: u32) {
        log::debug!("Completed requests: {count}");
        if count < self.descriptor.request_count {
            return;
        }
        if self.outcome.is_resolved() {
            log::debug!("Ignoring request count {count}, level already {:?}", self.outcome);
            return;
        }

        let score = self.services.scores.current_score();
        self.outcome = LevelOutcome::Won { score };
        log::info!("Level '{}' won with score {score}", self.descriptor.id);

        (self.on_success)(score);
        self.services.sound.play(SoundEffect::Win);
        self.services
            .high_scores
            .save_high_score(&self.descriptor.id, score);
    }

    fn reputation_changed(&mut self, reputation: f32) {
        if reputation > 0.0 || reputation.is_nan() || self.outcome.is_resolved() {
            return;
        }

        self.outcome = LevelOutcome::Lost;
        log::info!("Level '{}' lost, reputation {reputation}", self.descriptor.id);
        (self.on_defeat)();
    }
}
