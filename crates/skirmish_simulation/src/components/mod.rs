//! ECS components shared across subsystems
//!
//! Organized by domain:
//! - actor: living-entity state (Health)
//! - surface: visible surface material capability (contextual audio)
//! - layer: collision layer indices and target masks

pub mod actor;
pub mod layer;
pub mod surface;

// Re-exports for convenient importing
pub use actor::*;
pub use layer::*;
pub use surface::*;
