//! Swept-sphere queries against registered sphere bodies
//!
//! `sphere_cast` sweeps a sphere along a segment and collects every body it
//! passes through. Results land in a caller-owned fixed-capacity
//! `SweepBuffer`, so steady-state queries allocate nothing. Contacts are
//! reported in body-iteration order, not sorted by distance.

use bevy::prelude::*;

/// Upper bound on contacts reported by one cast. Overflow is silently
/// truncated; 32 simultaneous contacts on a single attack point is already
/// far past anything a sane scene produces.
pub const MAX_SWEEP_CONTACTS: usize = 32;

/// Solid sphere body registered with the spatial query.
///
/// `is_trigger` volumes are sensors (pickup zones, tripwires); sweeps run
/// in trigger-ignoring mode pass through them.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct SphereCollider {
    pub radius: f32,
    pub layer: crate::components::Layer,
    pub is_trigger: bool,
}

impl Default for SphereCollider {
    fn default() -> Self {
        Self {
            radius: 0.5,
            layer: crate::components::Layer(0),
            is_trigger: false,
        }
    }
}

impl SphereCollider {
    pub fn solid(radius: f32, layer: crate::components::Layer) -> Self {
        Self {
            radius,
            layer,
            is_trigger: false,
        }
    }

    pub fn trigger(radius: f32, layer: crate::components::Layer) -> Self {
        Self {
            radius,
            layer,
            is_trigger: true,
        }
    }
}

/// One body overlapped by a sweep.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepContact {
    pub entity: Entity,
    /// Distance along the sweep at closest approach, in `[0, max_dist]`.
    pub toi: f32,
}

/// Fixed-capacity reusable contact buffer, owned by the querying instance.
#[derive(Debug, Clone)]
pub struct SweepBuffer {
    contacts: [SweepContact; MAX_SWEEP_CONTACTS],
    len: usize,
}

impl Default for SweepBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl SweepBuffer {
    pub fn new() -> Self {
        Self {
            contacts: [SweepContact {
                entity: Entity::PLACEHOLDER,
                toi: 0.0,
            }; MAX_SWEEP_CONTACTS],
            len: 0,
        }
    }

    pub fn clear(&mut self) {
        self.len = 0;
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Record a contact. Past capacity the contact is dropped silently.
    pub fn push(&mut self, contact: SweepContact) {
        if self.len < MAX_SWEEP_CONTACTS {
            self.contacts[self.len] = contact;
            self.len += 1;
        }
    }

    pub fn as_slice(&self) -> &[SweepContact] {
        &self.contacts[..self.len]
    }
}

/// Query behavior flags.
#[derive(Debug, Clone, Copy)]
pub struct SweepFilter {
    pub ignore_triggers: bool,
}

impl Default for SweepFilter {
    fn default() -> Self {
        Self {
            ignore_triggers: true,
        }
    }
}

/// Sweep a sphere of `radius` from `origin` along `dir` for `max_dist`,
/// collecting every body whose surface the swept volume touches.
///
/// `dir` does not need to be normalized; only its direction is used. A
/// zero `dir` yields no contacts — callers that need stationary-overlap
/// detection must substitute a tiny nonzero vector themselves.
///
/// Returns the number of contacts written into `out` (after truncation).
pub fn sphere_cast<'a>(
    origin: Vec3,
    dir: Vec3,
    radius: f32,
    max_dist: f32,
    filter: SweepFilter,
    bodies: impl Iterator<Item = (Entity, Vec3, &'a SphereCollider)>,
    out: &mut SweepBuffer,
) -> usize {
    out.clear();

    let Some(dir) = dir.try_normalize() else {
        return 0;
    };
    if max_dist <= 0.0 {
        return 0;
    }

    for (entity, center, collider) in bodies {
        if filter.ignore_triggers && collider.is_trigger {
            continue;
        }

        // Closest approach of the swept segment to the body center,
        // clamped to the segment.
        let to_center = center - origin;
        let toi = to_center.dot(dir).clamp(0.0, max_dist);
        let closest = origin + dir * toi;

        let combined = radius + collider.radius;
        if closest.distance_squared(center) <= combined * combined {
            out.push(SweepContact { entity, toi });
        }
    }

    out.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::Layer;

    fn body(radius: f32) -> SphereCollider {
        SphereCollider::solid(radius, Layer(0))
    }

    #[test]
    fn test_sweep_hits_body_on_path() {
        let target = body(0.5);
        let bodies = [(Entity::from_raw(1), Vec3::new(2.0, 0.0, 0.0), &target)];
        let mut buffer = SweepBuffer::new();

        let n = sphere_cast(
            Vec3::ZERO,
            Vec3::X,
            0.2,
            4.0,
            SweepFilter::default(),
            bodies.iter().copied(),
            &mut buffer,
        );

        assert_eq!(n, 1);
        let contact = buffer.as_slice()[0];
        assert_eq!(contact.entity, Entity::from_raw(1));
        assert!((contact.toi - 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_sweep_misses_lateral_body() {
        // Body 2m off to the side of a 0.2 + 0.5 combined radius sweep
        let target = body(0.5);
        let bodies = [(Entity::from_raw(1), Vec3::new(2.0, 2.0, 0.0), &target)];
        let mut buffer = SweepBuffer::new();

        let n = sphere_cast(
            Vec3::ZERO,
            Vec3::X,
            0.2,
            4.0,
            SweepFilter::default(),
            bodies.iter().copied(),
            &mut buffer,
        );

        assert_eq!(n, 0);
    }

    #[test]
    fn test_sweep_stops_at_max_dist() {
        // Body past the end of the sweep, out of combined-radius reach
        let target = body(0.5);
        let bodies = [(Entity::from_raw(1), Vec3::new(5.0, 0.0, 0.0), &target)];
        let mut buffer = SweepBuffer::new();

        let n = sphere_cast(
            Vec3::ZERO,
            Vec3::X,
            0.2,
            1.0,
            SweepFilter::default(),
            bodies.iter().copied(),
            &mut buffer,
        );

        assert_eq!(n, 0);
    }

    #[test]
    fn test_zero_direction_yields_nothing() {
        // Even a body overlapping the origin sphere: zero dir = no results.
        // Callers substitute an epsilon forward vector for stationary checks.
        let target = body(1.0);
        let bodies = [(Entity::from_raw(1), Vec3::ZERO, &target)];
        let mut buffer = SweepBuffer::new();

        let n = sphere_cast(
            Vec3::ZERO,
            Vec3::ZERO,
            0.5,
            1.0,
            SweepFilter::default(),
            bodies.iter().copied(),
            &mut buffer,
        );

        assert_eq!(n, 0);
    }

    #[test]
    fn test_epsilon_sweep_detects_stationary_overlap() {
        let target = body(1.0);
        let bodies = [(Entity::from_raw(1), Vec3::new(0.3, 0.0, 0.0), &target)];
        let mut buffer = SweepBuffer::new();

        let dir = Vec3::NEG_Z * 1.0e-4;
        let n = sphere_cast(
            Vec3::ZERO,
            dir,
            0.5,
            dir.length(),
            SweepFilter::default(),
            bodies.iter().copied(),
            &mut buffer,
        );

        assert_eq!(n, 1);
    }

    #[test]
    fn test_triggers_are_ignored() {
        let sensor = SphereCollider::trigger(1.0, Layer(0));
        let solid = body(1.0);
        let bodies = [
            (Entity::from_raw(1), Vec3::new(1.0, 0.0, 0.0), &sensor),
            (Entity::from_raw(2), Vec3::new(2.0, 0.0, 0.0), &solid),
        ];
        let mut buffer = SweepBuffer::new();

        let n = sphere_cast(
            Vec3::ZERO,
            Vec3::X,
            0.2,
            4.0,
            SweepFilter::default(),
            bodies.iter().copied(),
            &mut buffer,
        );

        assert_eq!(n, 1);
        assert_eq!(buffer.as_slice()[0].entity, Entity::from_raw(2));
    }

    #[test]
    fn test_buffer_truncates_past_capacity() {
        let target = body(0.5);
        let bodies: Vec<_> = (0..MAX_SWEEP_CONTACTS as u32 + 8)
            .map(|i| (Entity::from_raw(i + 1), Vec3::new(1.0, 0.0, 0.0), &target))
            .collect();
        let mut buffer = SweepBuffer::new();

        let n = sphere_cast(
            Vec3::ZERO,
            Vec3::X,
            0.2,
            4.0,
            SweepFilter::default(),
            bodies.iter().copied(),
            &mut buffer,
        );

        assert_eq!(n, MAX_SWEEP_CONTACTS);
    }
}
