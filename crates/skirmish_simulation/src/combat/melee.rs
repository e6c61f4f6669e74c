//! Melee sweep detector
//!
//! Continuous hit detection for swung weapons: every fixed step while an
//! attack is live, each attack point sweeps a sphere from its position on
//! the previous step to its position now, so fast swings cannot tunnel
//! through targets between ticks.
//!
//! # Attack flow
//!
//! ```text
//! AttackBegin event (host animation decides the timing)
//!   -> begin_attacks: play swing sound, capture previous positions
//! FixedUpdate while attacking
//!   -> sweep_attack_points: sphere_cast per attack point, resolve contacts
//!   -> apply_damage: DamageMessage -> Health
//! AttackEnd event
//!   -> end_attacks: previous-position tracking discarded
//! ```
//!
//! Contact resolution distinguishes three non-damaging outcomes: no
//! damageable capability (pass through), the owner's own body (ignored,
//! the swing does not bounce off ourselves), and an off-mask body (the
//! blow is absorbed). Only the last one is conceptually a block.

use bevy::prelude::*;

use crate::audio::{PlaybackCommand, RandomAudioPlayer};
use crate::combat::damage::DamageMessage;
use crate::combat::effects::HitEffectPool;
use crate::components::{surface_of, Health, LayerMask, Surface};
use crate::physics::{sphere_cast, SphereCollider, SweepBuffer, SweepContact, SweepFilter};
use crate::DeterministicRng;

/// Minimum per-step motion before the stationary substitute kicks in.
pub const ATTACK_EPSILON: f32 = 1.0e-3;

/// A zero-length sweep yields no contacts from the volume query even when
/// a body overlaps the sphere, so a microscopic forward vector is
/// substituted to guarantee stationary-overlap detection.
pub const STATIONARY_SWEEP: Vec3 = Vec3::new(0.0, 0.0, -1.0e-4);

/// A point of the weapon whose swept path is tested for hits.
///
/// `root` is the moving frame (blade tip bone, hammer head); the point
/// lives at `offset` in that frame's local space.
#[derive(Debug, Clone, Copy)]
pub struct AttackPoint {
    pub radius: f32,
    pub offset: Vec3,
    pub root: Entity,
}

/// Melee weapon state machine: Idle -> Attacking -> Idle, driven by
/// `AttackBegin` / `AttackEnd` events from the host animation layer.
#[derive(Component, Debug, Clone)]
pub struct MeleeWeapon {
    /// Damage per connecting contact
    pub damage: u32,
    /// Layers this weapon is allowed to damage
    pub target_layers: LayerMask,
    pub attack_points: Vec<AttackPoint>,
    /// Audio player entity for contextual hit sounds
    pub hit_audio: Option<Entity>,
    /// Audio player entity for the swing/attack-start sound
    pub attack_audio: Option<Entity>,
    /// Unset pool disables the effect path entirely
    pub hit_effects: Option<HitEffectPool>,

    owner: Option<Entity>,
    in_attack: bool,
    throwing: bool,
    /// Valid only between begin and end; same length as `attack_points`
    /// for the duration of one attack.
    previous_positions: Vec<Vec3>,
    /// Direction of the last sweep, normalized
    direction: Vec3,
    contacts: SweepBuffer,
}

impl MeleeWeapon {
    pub fn new(damage: u32) -> Self {
        Self {
            damage,
            target_layers: LayerMask::ALL,
            attack_points: Vec::new(),
            hit_audio: None,
            attack_audio: None,
            hit_effects: None,
            owner: None,
            in_attack: false,
            throwing: false,
            previous_positions: Vec::new(),
            direction: Vec3::ZERO,
            contacts: SweepBuffer::new(),
        }
    }

    pub fn with_target_layers(mut self, mask: LayerMask) -> Self {
        self.target_layers = mask;
        self
    }

    pub fn with_attack_point(mut self, point: AttackPoint) -> Self {
        self.attack_points.push(point);
        self
    }

    pub fn with_hit_audio(mut self, player: Entity) -> Self {
        self.hit_audio = Some(player);
        self
    }

    pub fn with_attack_audio(mut self, player: Entity) -> Self {
        self.attack_audio = Some(player);
        self
    }

    pub fn with_hit_effects(mut self, pool: HitEffectPool) -> Self {
        self.hit_effects = Some(pool);
        self
    }

    /// Whoever owns the weapon is responsible for calling this; it is what
    /// lets an attack skip the owner's own body instead of self-harming.
    pub fn set_owner(&mut self, owner: Entity) {
        self.owner = Some(owner);
    }

    pub fn owner(&self) -> Option<Entity> {
        self.owner
    }

    pub fn is_attacking(&self) -> bool {
        self.in_attack
    }

    pub fn is_throwing_attack(&self) -> bool {
        self.throwing
    }
}

/// Event: the host animation layer starts a swing.
#[derive(Event, Debug, Clone)]
pub struct AttackBegin {
    pub weapon: Entity,
    /// The weapon is being thrown rather than swung
    pub throwing: bool,
}

/// Event: the swing is over; sweeping stops until the next begin.
#[derive(Event, Debug, Clone)]
pub struct AttackEnd {
    pub weapon: Entity,
}

/// World position of an attack point given its root frame.
fn attack_point_position(root: &Transform, point: &AttackPoint) -> Vec3 {
    root.transform_point(point.offset)
}

/// Sweep vector for one step, with the stationary substitute applied.
fn effective_sweep(attack_vector: Vec3) -> Vec3 {
    if attack_vector.length() < ATTACK_EPSILON {
        STATIONARY_SWEEP
    } else {
        attack_vector
    }
}

/// System: enter the attacking state.
///
/// Plays the attack-start sound (if configured) and captures the current
/// world position of every attack point as the initial previous position.
pub fn begin_attacks(
    mut events: EventReader<AttackBegin>,
    mut weapons: Query<&mut MeleeWeapon>,
    players: Query<&RandomAudioPlayer>,
    transforms: Query<&Transform>,
    mut rng: ResMut<DeterministicRng>,
    mut playback: EventWriter<PlaybackCommand>,
) {
    for event in events.read() {
        let Ok(weapon) = weapons.get_mut(event.weapon) else {
            crate::log_warning(&format!(
                "AttackBegin for {:?} dropped: no MeleeWeapon",
                event.weapon
            ));
            continue;
        };
        let weapon = weapon.into_inner();

        if let Some(audio_entity) = weapon.attack_audio {
            if let Ok(player) = players.get(audio_entity) {
                player.play_any(&mut rng.rng, audio_entity, &mut playback);
            }
        }

        weapon.throwing = event.throwing;
        weapon.in_attack = true;

        weapon.previous_positions = weapon
            .attack_points
            .iter()
            .map(|point| match transforms.get(point.root) {
                Ok(root) => attack_point_position(root, point),
                Err(_) => Vec3::ZERO,
            })
            .collect();

        crate::log(&format!(
            "Attack begin (weapon: {:?}, throwing: {}, {} attack points)",
            event.weapon,
            event.throwing,
            weapon.attack_points.len()
        ));
    }
}

/// System: per-step continuous sweep for every attacking weapon.
///
/// Each attack point casts a sphere from its previous to its current
/// position; every contact is resolved independently, with no early exit
/// within a step.
pub fn sweep_attack_points(
    mut weapons: Query<(Entity, &mut MeleeWeapon)>,
    transforms: Query<&Transform>,
    bodies: Query<(Entity, &Transform, &SphereCollider)>,
    damageables: Query<&Health>,
    surfaces: Query<&Surface>,
    children: Query<&Children>,
    players: Query<&RandomAudioPlayer>,
    mut rng: ResMut<DeterministicRng>,
    mut playback: EventWriter<PlaybackCommand>,
    mut damage_events: EventWriter<DamageMessage>,
) {
    for (weapon_entity, weapon) in weapons.iter_mut() {
        let weapon = weapon.into_inner();
        if !weapon.in_attack {
            continue;
        }

        for i in 0..weapon.attack_points.len() {
            let point = weapon.attack_points[i];

            let Ok(root) = transforms.get(point.root) else {
                continue;
            };
            let world_pos = attack_point_position(root, &point);
            let previous = weapon.previous_positions[i];

            let sweep = effective_sweep(world_pos - previous);
            weapon.direction = sweep.normalize_or_zero();

            sphere_cast(
                previous,
                sweep,
                point.radius,
                sweep.length(),
                SweepFilter::default(),
                bodies.iter().map(|(e, t, c)| (e, t.translation, c)),
                &mut weapon.contacts,
            );

            let MeleeWeapon {
                damage,
                target_layers,
                hit_audio,
                hit_effects,
                owner,
                throwing,
                direction,
                contacts,
                ..
            } = weapon;

            for &SweepContact { entity: struck, .. } in contacts.as_slice() {
                // No damageable capability: not a hit, the sweep passes through.
                if damageables.get(struck).is_err() {
                    continue;
                }

                // Ignore self harm, but do not end the attack: we don't
                // "bounce" off ourselves.
                if Some(struck) == *owner {
                    continue;
                }

                // Off-mask body: the blow is absorbed, no damage.
                let Ok((_, _, collider)) = bodies.get(struck) else {
                    continue;
                };
                if !target_layers.contains(collider.layer) {
                    continue;
                }

                // Contextual hit sound from the struck surface, with a
                // no-surface fallback to the default bank.
                if let Some(audio_entity) = *hit_audio {
                    if let Ok(player) = players.get(audio_entity) {
                        let surface = surface_of(struck, &surfaces, &children);
                        player.play_random_clip(
                            surface,
                            0,
                            &mut rng.rng,
                            audio_entity,
                            &mut playback,
                        );
                    }
                }

                let source = owner
                    .and_then(|o| transforms.get(o).ok())
                    .map(|t| t.translation)
                    .unwrap_or(previous);

                damage_events.write(DamageMessage {
                    target: struck,
                    amount: *damage,
                    damager: weapon_entity,
                    direction: *direction,
                    source,
                    throwing: *throwing,
                    stop_camera: false,
                });

                if let Some(pool) = hit_effects.as_mut() {
                    pool.trigger(root.translation);
                }
            }

            weapon.previous_positions[i] = world_pos;
        }
    }
}

/// System: leave the attacking state; previous-position tracking is
/// discarded until the next begin.
pub fn end_attacks(mut events: EventReader<AttackEnd>, mut weapons: Query<&mut MeleeWeapon>) {
    for event in events.read() {
        let Ok(mut weapon) = weapons.get_mut(event.weapon) else {
            continue;
        };

        weapon.in_attack = false;
        weapon.previous_positions.clear();

        crate::log(&format!("Attack end (weapon: {:?})", event.weapon));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::Layer;

    #[test]
    fn test_effective_sweep_substitutes_below_epsilon() {
        let tiny = Vec3::new(0.0, 0.0005, 0.0);
        assert_eq!(effective_sweep(tiny), STATIONARY_SWEEP);
        assert_eq!(effective_sweep(Vec3::ZERO), STATIONARY_SWEEP);
    }

    #[test]
    fn test_effective_sweep_keeps_real_motion() {
        let motion = Vec3::new(0.5, 0.0, 0.0);
        assert_eq!(effective_sweep(motion), motion);
    }

    #[test]
    fn test_attack_point_follows_rotated_frame() {
        let point = AttackPoint {
            radius: 0.2,
            offset: Vec3::new(0.0, 0.0, 1.0),
            root: Entity::PLACEHOLDER,
        };

        // Root at (1,0,0), rotated 90 degrees around Y: local +Z -> world +X
        let root = Transform::from_xyz(1.0, 0.0, 0.0)
            .with_rotation(Quat::from_rotation_y(std::f32::consts::FRAC_PI_2));

        let world = attack_point_position(&root, &point);
        assert!((world - Vec3::new(2.0, 0.0, 0.0)).length() < 1e-5, "world = {}", world);
    }

    #[test]
    fn test_weapon_builder_defaults() {
        let weapon = MeleeWeapon::new(3).with_target_layers(LayerMask::single(Layer(2)));

        assert_eq!(weapon.damage, 3);
        assert!(!weapon.is_attacking());
        assert!(weapon.owner().is_none());
        assert!(weapon.hit_effects.is_none());
    }

    #[test]
    fn test_set_owner() {
        let mut weapon = MeleeWeapon::new(1);
        let owner = Entity::from_raw(9);

        weapon.set_owner(owner);
        assert_eq!(weapon.owner(), Some(owner));
    }
}
