//! Object system
//!
//! The jewel being designed and the closed flag and effect sets it draws on.

mod activation;
mod flags;
mod jewel;

pub use activation::{ACTIVATIONS, Activation, ActivationDef, RAND_ACTIVATIONS};
pub use flags::{CurseFlags, ObjFlags};
pub use jewel::{Bonus, Brand, Jewel, JewelKind, Resist, Slay, Stat};
