//! Collision layers and target masks
//!
//! Bodies carry a `Layer` (index 0..32); weapons carry a `LayerMask` of the
//! layers they are allowed to damage. A contact outside the mask is treated
//! as blocked/absorbed, not as a hit.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Collision layer index (0..32).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect, Serialize, Deserialize)]
pub struct Layer(pub u8);

impl Default for Layer {
    fn default() -> Self {
        Layer(0)
    }
}

/// Bitmask over collision layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect, Serialize, Deserialize)]
pub struct LayerMask(pub u32);

impl LayerMask {
    pub const ALL: LayerMask = LayerMask(u32::MAX);
    pub const NONE: LayerMask = LayerMask(0);

    pub fn single(layer: Layer) -> Self {
        LayerMask(1 << layer.0)
    }

    pub fn with(self, layer: Layer) -> Self {
        LayerMask(self.0 | (1 << layer.0))
    }

    pub fn contains(&self, layer: Layer) -> bool {
        self.0 & (1 << layer.0) != 0
    }
}

impl Default for LayerMask {
    fn default() -> Self {
        LayerMask::ALL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_exact_bit_edges() {
        let mask = LayerMask::single(Layer(3));

        assert!(mask.contains(Layer(3)));
        assert!(!mask.contains(Layer(2)));
        assert!(!mask.contains(Layer(4)));
        assert!(!mask.contains(Layer(0)));
        assert!(!mask.contains(Layer(31)));
    }

    #[test]
    fn test_mask_composition() {
        let mask = LayerMask::NONE.with(Layer(0)).with(Layer(31));

        assert!(mask.contains(Layer(0)));
        assert!(mask.contains(Layer(31)));
        assert!(!mask.contains(Layer(15)));
    }

    #[test]
    fn test_all_mask() {
        for i in 0..32 {
            assert!(LayerMask::ALL.contains(Layer(i)));
        }
    }
}
