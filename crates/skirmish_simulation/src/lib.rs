//! Skirmish simulation core
//!
//! Headless, deterministic melee combat simulation on Bevy ECS:
//! continuous-sweep hit detection for swung weapons plus contextual audio
//! bank selection. The ECS is the strategic layer (game state, combat
//! rules, audio decisions); rendering, animation timing, and actual sound
//! output belong to a host tactical layer that consumes the event streams
//! (`PlaybackCommand`, `DamageDealt`) this crate produces.

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// Public modules
pub mod audio;
pub mod combat;
pub mod components;
pub mod logger;
pub mod physics;

// Re-export the main types for convenient importing
pub use audio::{
    AudioPlugin, ClipId, PlaybackCommand, RandomAudioPlayer, SoundBank, SurfaceAudioOverride,
};
pub use combat::{
    AttackBegin, AttackEnd, AttackPoint, CombatPlugin, DamageDealt, DamageMessage, Dead,
    EntityDied, HitEffectPool, MeleeWeapon, EFFECT_POOL_SIZE,
};
pub use components::*;
pub use logger::{
    init_logger, log, log_error, log_info, log_warning, set_log_level, set_logger,
    set_logger_if_needed, LogLevel, LogPrinter,
};
pub use physics::{sphere_cast, SphereCollider, SweepBuffer, SweepContact, SweepFilter};

/// Default RNG seed when the host does not provide one.
pub const DEFAULT_SEED: u64 = 42;

/// Fixed-step ordering: one-time initialization before combat resolution.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    Init,
    Combat,
}

/// Main simulation plugin (bundles all subsystems).
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        // Fixed timestep 60Hz for the simulation tick
        app.insert_resource(Time::<Fixed>::from_hz(60.0));

        // Deterministic RNG, unless the host already seeded one
        if !app.world().contains_resource::<DeterministicRng>() {
            app.insert_resource(DeterministicRng::new(DEFAULT_SEED));
        }

        app.add_plugins((AudioPlugin, CombatPlugin));
    }
}

/// Deterministic seeded RNG resource.
///
/// Every random draw in the simulation (clip index, pitch) goes through
/// this, so runs with equal seeds replay identically.
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Create a minimal Bevy App for headless simulation.
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(DeterministicRng::new(seed))
        .insert_resource(Time::<Fixed>::from_hz(60.0));

    app
}
