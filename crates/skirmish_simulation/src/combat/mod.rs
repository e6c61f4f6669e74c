//! Combat system module
//!
//! Responsibilities:
//! - Game state: MeleeWeapon attack state, Health, hit effect pools
//! - Combat rules: continuous sweep detection, self-harm exclusion,
//!   target-layer filtering
//! - Events: AttackBegin/AttackEnd (host in), DamageMessage/DamageDealt/
//!   EntityDied (out)
//!
//! The host layer owns animation timing and decides when a swing starts
//! and ends; everything between those two events is resolved here.

use bevy::prelude::*;

pub mod damage;
pub mod effects;
pub mod melee;

// Re-export the main types
pub use damage::{apply_damage, DamageDealt, DamageMessage, Dead, EntityDied};
pub use effects::{EffectSlot, HitEffectPool, EFFECT_DURATION, EFFECT_POOL_SIZE};
pub use melee::{AttackBegin, AttackEnd, AttackPoint, MeleeWeapon, ATTACK_EPSILON};

use crate::SimulationSet;

/// Combat plugin: registers combat events and the fixed-step pipeline.
///
/// Execution order (chained, one tick):
/// 1. begin_attacks — enter attacking, capture previous positions
/// 2. end_attacks — leave attacking; an end queued before this tick
///    suppresses the tick's sweep entirely
/// 3. sweep_attack_points — continuous sweep + contact resolution
/// 4. apply_damage — DamageMessage -> Health
/// 5. mark_dead — Dead marker on lethal hits
/// 6. tick_effects — advance pooled effect clocks
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<AttackBegin>()
            .add_event::<AttackEnd>()
            .add_event::<DamageMessage>()
            .add_event::<DamageDealt>()
            .add_event::<EntityDied>();

        app.configure_sets(FixedUpdate, SimulationSet::Init.before(SimulationSet::Combat));

        app.add_systems(
            FixedUpdate,
            (
                melee::begin_attacks,
                melee::end_attacks,
                melee::sweep_attack_points,
                damage::apply_damage,
                damage::mark_dead,
                effects::tick_effects,
            )
                .chain()
                .in_set(SimulationSet::Combat),
        );
    }
}
