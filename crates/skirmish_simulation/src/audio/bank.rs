//! Sound bank data model (author-time data)

use serde::{Deserialize, Serialize};

use crate::components::SurfaceKind;

/// Handle to an audio clip owned by the host playback layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClipId(pub u32);

/// Named ordered sequence of clips.
///
/// An empty clip list is a normal "no sound configured" state: lookups
/// against it produce no clip, never an error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SoundBank {
    pub name: String,
    pub clips: Vec<ClipId>,
}

impl SoundBank {
    pub fn new(name: impl Into<String>, clips: Vec<ClipId>) -> Self {
        Self {
            name: name.into(),
            clips,
        }
    }
}

/// Author-time override entry: every surface kind in `surfaces` resolves
/// to the same `banks` array.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SurfaceAudioOverride {
    pub surfaces: Vec<SurfaceKind>,
    pub banks: Vec<SoundBank>,
}
