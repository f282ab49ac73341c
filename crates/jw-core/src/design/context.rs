//! Generation context
//!
//! Everything one design run mutates or consults, threaded by `&mut`
//! through every purchase, selection and theme script.

use super::{DesignConfig, Ledger, ThemeDef};
use crate::rng::GameRng;

pub struct DesignContext<'a> {
    pub ledger: Ledger,
    pub rng: &'a mut GameRng,
    pub config: &'a DesignConfig,
    pub themes: &'a [ThemeDef],
}

impl<'a> DesignContext<'a> {
    pub fn new(
        ledger: Ledger,
        rng: &'a mut GameRng,
        config: &'a DesignConfig,
        themes: &'a [ThemeDef],
    ) -> Self {
        Self {
            ledger,
            rng,
            config,
            themes,
        }
    }

    pub fn potential(&self) -> i32 {
        self.ledger.potential()
    }

    pub fn initial_potential(&self) -> i32 {
        self.ledger.initial_potential()
    }

    /// A throwaway context sharing config and catalog, with its own ledger
    /// copy and the given RNG
    pub(crate) fn scratch<'b>(&'b self, rng: &'b mut GameRng) -> DesignContext<'b> {
        DesignContext {
            ledger: self.ledger,
            rng,
            config: self.config,
            themes: self.themes,
        }
    }
}
