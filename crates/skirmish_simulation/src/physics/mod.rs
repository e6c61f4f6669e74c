//! Spatial query module
//!
//! The simulation owns a lightweight sphere-body world: entities register a
//! `SphereCollider` and the melee systems run swept-sphere queries against
//! them. Full rigid-body physics stays in the host tactical layer.

pub mod sweep;

// Re-export the query surface
pub use sweep::{
    sphere_cast, SphereCollider, SweepBuffer, SweepContact, SweepFilter, MAX_SWEEP_CONTACTS,
};
