//! Damage application
//!
//! `DamageMessage` is the value record handed over at the moment of
//! contact; it is consumed the same tick and never retained. Application
//! subtracts from `Health` and fans out `DamageDealt` / `EntityDied` for
//! downstream consumers (UI, sounds, AI reactions).

use bevy::prelude::*;

use crate::components::Health;

/// Value record delivered to a damageable target at the moment of contact.
#[derive(Event, Debug, Clone)]
pub struct DamageMessage {
    /// Struck entity
    pub target: Entity,
    /// Damage amount before any future modifiers
    pub amount: u32,
    /// Weapon entity that dealt the blow
    pub damager: Entity,
    /// Normalized direction of the sweep that connected
    pub direction: Vec3,
    /// World position of the damager's owner at the moment of contact
    pub source: Vec3,
    /// Contact came from a thrown weapon
    pub throwing: bool,
    /// Suppress camera shake on the receiving side
    pub stop_camera: bool,
}

/// Event: damage has been applied to a target's health.
#[derive(Event, Debug, Clone)]
pub struct DamageDealt {
    pub attacker: Entity,
    pub target: Entity,
    pub damage: u32,
    pub target_died: bool,
}

/// Event: entity health reached zero.
#[derive(Event, Debug, Clone)]
pub struct EntityDied {
    pub entity: Entity,
    pub killer: Option<Entity>,
}

/// Marker: entity is dead (health reached zero).
///
/// Corpses keep their components and stay in the world; despawning is a
/// host-layer decision.
#[derive(Component, Debug)]
pub struct Dead;

/// System: apply queued damage messages to target health.
///
/// A target without `Health` at this point was despawned mid-tick; the
/// message is dropped with a warning, never an error.
pub fn apply_damage(
    mut messages: EventReader<DamageMessage>,
    mut targets: Query<&mut Health>,
    mut dealt_events: EventWriter<DamageDealt>,
    mut died_events: EventWriter<EntityDied>,
) {
    for message in messages.read() {
        let Ok(mut health) = targets.get_mut(message.target) else {
            crate::log_warning(&format!(
                "DamageMessage for {:?} dropped: no Health component",
                message.target
            ));
            continue;
        };

        let was_alive = health.is_alive();
        health.take_damage(message.amount);
        let died = was_alive && !health.is_alive();

        dealt_events.write(DamageDealt {
            attacker: message.damager,
            target: message.target,
            damage: message.amount,
            target_died: died,
        });

        if died {
            died_events.write(EntityDied {
                entity: message.target,
                killer: Some(message.damager),
            });

            crate::log_info(&format!(
                "Entity {:?} killed by {:?}",
                message.target, message.damager
            ));
        }
    }
}

/// System: tag freshly dead entities with the `Dead` marker.
pub fn mark_dead(mut commands: Commands, mut deaths: EventReader<EntityDied>) {
    for event in deaths.read() {
        if let Ok(mut entity_commands) = commands.get_entity(event.entity) {
            entity_commands.insert(Dead);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_damage_message_is_a_plain_value_record() {
        let message = DamageMessage {
            target: Entity::PLACEHOLDER,
            amount: 7,
            damager: Entity::PLACEHOLDER,
            direction: Vec3::X,
            source: Vec3::ZERO,
            throwing: false,
            stop_camera: false,
        };

        assert_eq!(message.amount, 7);
        assert!(!message.throwing);
        assert!(!message.stop_camera);
    }

    #[test]
    fn test_damage_dealt_event() {
        let event = DamageDealt {
            attacker: Entity::PLACEHOLDER,
            target: Entity::PLACEHOLDER,
            damage: 15,
            target_died: false,
        };

        assert_eq!(event.damage, 15);
        assert!(!event.target_died);
    }

    #[test]
    fn test_entity_died_event() {
        let event = EntityDied {
            entity: Entity::PLACEHOLDER,
            killer: Some(Entity::PLACEHOLDER),
        };

        assert!(event.killer.is_some());
    }
}
