//! jw-core: ring and amulet design for a roguelike
//!
//! Pure game logic with no I/O. A jewel's magical properties are bought
//! against a potential budget derived from dungeon depth; see
//! [`design::design_ring_or_amulet`].

pub mod design;
pub mod object;

mod consts;
mod rng;

pub use consts::*;
pub use design::{DesignConfig, DesignError, DesignSummary, design_ring_or_amulet, design_with};
pub use object::{Jewel, JewelKind};
pub use rng::GameRng;
