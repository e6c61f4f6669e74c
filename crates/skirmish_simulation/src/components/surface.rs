//! Visible surface material capability
//!
//! Optional component used to pick contextual hit sounds: a struck flesh
//! surface and a struck stone surface resolve to different sound banks.
//! The struck entity is searched first, then its descendants depth-first
//! (weapon hitboxes often sit on a child of the visual root).

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Identifier for a surface material class (flesh, stone, metal, ...).
///
/// The simulation never interprets the value; it is only a lookup key into
/// the audio override tables authored by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SurfaceKind(pub u32);

/// Capability: this entity has a visible surface of the given kind.
#[derive(Component, Debug, Clone, Copy)]
pub struct Surface(pub SurfaceKind);

/// Resolve the surface material of `entity`: the entity itself first, then
/// its descendants depth-first. First found wins; `None` if the hierarchy
/// has no renderable surface.
pub fn surface_of(
    entity: Entity,
    surfaces: &Query<&Surface>,
    children: &Query<&Children>,
) -> Option<SurfaceKind> {
    if let Ok(surface) = surfaces.get(entity) {
        return Some(surface.0);
    }

    let Ok(direct) = children.get(entity) else {
        return None;
    };

    let direct: &[Entity] = direct;
    for &child in direct {
        if let Some(kind) = surface_of(child, surfaces, children) {
            return Some(kind);
        }
    }

    None
}
