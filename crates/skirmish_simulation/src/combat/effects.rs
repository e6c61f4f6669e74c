//! Pooled hit effects
//!
//! Effect instances are pre-allocated and reused round-robin, so a flurry
//! of hits never allocates: the oldest instance is reset to time zero and
//! replayed. The host layer mirrors slot state into real particle systems.

use bevy::prelude::*;

use crate::combat::melee::MeleeWeapon;

/// Number of pre-instantiated effect slots per pool.
pub const EFFECT_POOL_SIZE: usize = 10;

/// Seconds a triggered effect stays in the playing state.
pub const EFFECT_DURATION: f32 = 1.0;

/// One pre-instantiated effect instance.
#[derive(Debug, Clone, Copy, Default)]
pub struct EffectSlot {
    pub position: Vec3,
    pub elapsed: f32,
    pub playing: bool,
}

/// Fixed-size round-robin pool of hit effect instances.
#[derive(Debug, Clone)]
pub struct HitEffectPool {
    slots: [EffectSlot; EFFECT_POOL_SIZE],
    cursor: usize,
}

impl Default for HitEffectPool {
    fn default() -> Self {
        Self::new()
    }
}

impl HitEffectPool {
    pub fn new() -> Self {
        Self {
            slots: [EffectSlot::default(); EFFECT_POOL_SIZE],
            cursor: 0,
        }
    }

    /// Claim the next slot: move it to `position`, reset to time zero,
    /// play. Rapid consecutive hits wrap around and reuse the oldest
    /// instance. Returns the claimed slot index.
    pub fn trigger(&mut self, position: Vec3) -> usize {
        let index = self.cursor;
        let slot = &mut self.slots[index];

        slot.position = position;
        slot.elapsed = 0.0;
        slot.playing = true;

        self.cursor = (self.cursor + 1) % EFFECT_POOL_SIZE;
        index
    }

    /// Advance playing slots; instances stop after `EFFECT_DURATION`.
    pub fn tick(&mut self, delta: f32) {
        for slot in self.slots.iter_mut().filter(|s| s.playing) {
            slot.elapsed += delta;
            if slot.elapsed >= EFFECT_DURATION {
                slot.playing = false;
            }
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn slots(&self) -> &[EffectSlot] {
        &self.slots
    }

    pub fn playing_count(&self) -> usize {
        self.slots.iter().filter(|s| s.playing).count()
    }
}

/// System: advance effect playback clocks on every weapon pool.
pub fn tick_effects(mut weapons: Query<&mut MeleeWeapon>, time: Res<Time<Fixed>>) {
    let delta = time.delta_secs();

    for mut weapon in weapons.iter_mut() {
        if let Some(pool) = weapon.hit_effects.as_mut() {
            pool.tick(delta);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_robin_cycles_modulo_pool_size() {
        let mut pool = HitEffectPool::new();

        for i in 0..EFFECT_POOL_SIZE {
            let index = pool.trigger(Vec3::ZERO);
            assert_eq!(index, i);
        }

        // Pool-size-plus-one hit wraps back to slot 0
        assert_eq!(pool.trigger(Vec3::ZERO), 0);
        assert_eq!(pool.cursor(), 1);
    }

    #[test]
    fn test_cursor_never_out_of_bounds() {
        let mut pool = HitEffectPool::new();

        for _ in 0..EFFECT_POOL_SIZE * 7 + 3 {
            let index = pool.trigger(Vec3::ZERO);
            assert!(index < EFFECT_POOL_SIZE);
        }
        assert!(pool.cursor() < EFFECT_POOL_SIZE);
    }

    #[test]
    fn test_trigger_resets_slot_to_time_zero() {
        let mut pool = HitEffectPool::new();

        pool.trigger(Vec3::X);
        pool.tick(0.5);
        assert!(pool.slots()[0].elapsed > 0.0);

        // Wrap all the way around and reuse slot 0
        for _ in 0..EFFECT_POOL_SIZE {
            pool.trigger(Vec3::Y);
        }

        let slot = pool.slots()[0];
        assert_eq!(slot.elapsed, 0.0);
        assert!(slot.playing);
        assert_eq!(slot.position, Vec3::Y);
    }

    #[test]
    fn test_effects_stop_after_duration() {
        let mut pool = HitEffectPool::new();
        pool.trigger(Vec3::ZERO);
        assert_eq!(pool.playing_count(), 1);

        pool.tick(EFFECT_DURATION + 0.01);
        assert_eq!(pool.playing_count(), 0);
    }
}
