//! Random audio player: per-surface bank selection + pitch randomization
//!
//! Mirrors the split between authored data and runtime lookup: overrides
//! are a flat list at author time, `initialize` folds them into a
//! surface→banks table once, and selection afterwards is O(1).

use std::collections::HashMap;

use bevy::prelude::*;
use rand::Rng;

use crate::audio::bank::{ClipId, SoundBank, SurfaceAudioOverride};
use crate::components::SurfaceKind;

/// Event: the simulation wants a clip played.
///
/// Fire-and-forget toward the host playback layer; no acknowledgment is
/// awaited. Tests observe audio behavior only through this stream.
#[derive(Event, Debug, Clone)]
pub struct PlaybackCommand {
    /// Entity the sound originates from (weapon, attacker)
    pub emitter: Entity,
    /// Selected clip
    pub clip: ClipId,
    /// Playback pitch (1.0 = unmodified)
    pub pitch: f32,
    /// Scheduling delay in seconds
    pub delay: f32,
}

/// Picks a random clip from a per-surface override table or the default
/// bank, rolls pitch, and schedules delayed playback.
#[derive(Component, Debug, Clone, Default)]
pub struct RandomAudioPlayer {
    pub randomize_pitch: bool,
    pub pitch_random_range: f32,
    pub play_delay: f32,
    pub default_bank: SoundBank,
    pub overrides: Vec<SurfaceAudioOverride>,

    /// Built once by `initialize`; last-writer-wins on duplicate surfaces.
    lookup: HashMap<SurfaceKind, Vec<SoundBank>>,
    initialized: bool,
}

impl RandomAudioPlayer {
    pub fn new(default_bank: SoundBank) -> Self {
        Self {
            randomize_pitch: true,
            pitch_random_range: 0.2,
            play_delay: 0.0,
            default_bank,
            overrides: Vec::new(),
            lookup: HashMap::new(),
            initialized: false,
        }
    }

    pub fn with_overrides(mut self, overrides: Vec<SurfaceAudioOverride>) -> Self {
        self.overrides = overrides;
        self
    }

    pub fn with_delay(mut self, delay: f32) -> Self {
        self.play_delay = delay;
        self
    }

    pub fn with_fixed_pitch(mut self) -> Self {
        self.randomize_pitch = false;
        self
    }

    /// Build the surface→banks table from the authored override list.
    /// Duplicate surfaces across overrides: last writer wins.
    pub fn initialize(&mut self) {
        self.lookup.clear();

        for audio_override in &self.overrides {
            for &surface in &audio_override.surfaces {
                self.lookup.insert(surface, audio_override.banks.clone());
            }
        }

        self.initialized = true;
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Resolve the bank for a surface and pick a uniformly random clip.
    ///
    /// Unknown surfaces, out-of-range bank indices, and `None` all resolve
    /// to the default bank. An empty resolved bank yields `None` — silence
    /// is a normal outcome here, not an error.
    pub fn select_clip(
        &self,
        surface: Option<SurfaceKind>,
        bank_index: usize,
        rng: &mut impl Rng,
    ) -> Option<ClipId> {
        let mut bank = &self.default_bank;

        if let Some(surface) = surface {
            if let Some(banks) = self.lookup.get(&surface) {
                if bank_index < banks.len() {
                    bank = &banks[bank_index];
                }
            }
        }

        if bank.clips.is_empty() {
            return None;
        }

        let index = rng.gen_range(0..bank.clips.len());
        Some(bank.clips[index])
    }

    /// Playback pitch for the next clip: uniform in
    /// `[1 - range, 1 + range]` when randomization is on, exactly 1.0
    /// otherwise.
    pub fn roll_pitch(&self, rng: &mut impl Rng) -> f32 {
        if self.randomize_pitch && self.pitch_random_range > 0.0 {
            rng.gen_range(1.0 - self.pitch_random_range..=1.0 + self.pitch_random_range)
        } else {
            1.0
        }
    }

    /// Select a clip for `surface` and schedule it through the playback
    /// stream. Returns the chosen clip, `None` if the resolved bank was
    /// empty.
    pub fn play_random_clip(
        &self,
        surface: Option<SurfaceKind>,
        bank_index: usize,
        rng: &mut impl Rng,
        emitter: Entity,
        playback: &mut EventWriter<PlaybackCommand>,
    ) -> Option<ClipId> {
        let clip = self.select_clip(surface, bank_index, rng)?;
        let pitch = self.roll_pitch(rng);

        playback.write(PlaybackCommand {
            emitter,
            clip,
            pitch,
            delay: self.play_delay,
        });

        Some(clip)
    }

    /// Convenience variant: resolve against the default bank only.
    pub fn play_any(
        &self,
        rng: &mut impl Rng,
        emitter: Entity,
        playback: &mut EventWriter<PlaybackCommand>,
    ) -> Option<ClipId> {
        self.play_random_clip(None, 0, rng, emitter, playback)
    }
}

/// System: build override lookup tables for freshly spawned players.
///
/// Explicit one-time init instead of an implicit engine lifecycle hook.
pub fn initialize_audio_players(mut players: Query<&mut RandomAudioPlayer, Added<RandomAudioPlayer>>) {
    for mut player in players.iter_mut() {
        player.initialize();

        crate::log(&format!(
            "Audio player initialized ({} overrides, default bank '{}' with {} clips)",
            player.overrides.len(),
            player.default_bank.name,
            player.default_bank.clips.len()
        ));
    }
}
