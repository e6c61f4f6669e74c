//! Contextual audio module
//!
//! The simulation decides *what* to play (clip, pitch, delay) and emits
//! `PlaybackCommand` events; actually producing sound is the host layer's
//! job. Bank data is authored externally and shipped as serde data.

use bevy::prelude::*;

pub mod bank;
pub mod player;

// Re-export the main types
pub use bank::{ClipId, SoundBank, SurfaceAudioOverride};
pub use player::{initialize_audio_players, PlaybackCommand, RandomAudioPlayer};

use crate::SimulationSet;

/// Audio plugin: registers the playback event stream and the one-time
/// player initialization (override table build).
pub struct AudioPlugin;

impl Plugin for AudioPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<PlaybackCommand>();

        app.configure_sets(FixedUpdate, SimulationSet::Init.before(SimulationSet::Combat));

        app.add_systems(
            FixedUpdate,
            initialize_audio_players.in_set(SimulationSet::Init),
        );
    }
}
