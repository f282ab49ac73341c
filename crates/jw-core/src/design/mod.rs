//! Budgeted ring and amulet design
//!
//! A jewel is designed in one pass over a potential budget:
//!
//! 1. allocate potential from depth
//! 2. draw a theme and run its purchase script
//! 3. spend what is left in the enrichment pass
//! 4. occasionally corrupt the result
//! 5. resolve contradictory properties
//!
//! Every purchase in steps 2 and 3 goes through
//! [`DesignContext::get_quality`] or [`DesignContext::get_activation`].

mod config;
mod context;
mod corrupt;
mod enrich;
mod errors;
mod gateway;
mod ledger;
mod quality;
mod resolve;
mod scripts;
mod select;
mod theme;

pub use config::DesignConfig;
pub use context::DesignContext;
pub use errors::DesignError;
pub use ledger::{Ledger, base_potential};
pub use quality::{CURSE_PRICES, FLAG_PRICES, Pricing, Quality, TO_AC_PRICE};
pub use resolve::resolve_contradictions;
pub use select::{PriceEntry, SelectPolicy};
pub use theme::{THEME_CATALOG, Theme, ThemeDef, ThemeScript, allocate_theme};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::object::Jewel;
use crate::rng::GameRng;

/// What happened while designing one jewel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesignSummary {
    pub theme: Option<Theme>,
    pub initial_potential: i32,
    /// Potential left unspent
    pub final_potential: i32,
    pub corrupted: bool,
    /// Theme draws made, including the successful one
    pub theme_attempts: u32,
}

/// Design a jewel with the stock configuration and theme catalog
pub fn design_ring_or_amulet(
    item: &mut Jewel,
    level: i32,
    rng: &mut GameRng,
) -> Result<DesignSummary, DesignError> {
    design_with(item, level, rng, &DesignConfig::default(), THEME_CATALOG)
}

/// Design a jewel from scratch.
///
/// Everything but the jewel's kind and sval is overwritten. Fails only if
/// the catalog has no theme legal for the jewel's base type, or the config
/// does not validate.
pub fn design_with(
    item: &mut Jewel,
    level: i32,
    rng: &mut GameRng,
    config: &DesignConfig,
    catalog: &[ThemeDef],
) -> Result<DesignSummary, DesignError> {
    config.validate()?;

    item.wipe();
    item.level = level;

    let ledger = Ledger::allocate(level, base_potential(item.kind), config.potential_per_level, rng);
    let mut ctx = DesignContext::new(ledger, rng, config, catalog);
    debug!(
        kind = %item.kind,
        sval = item.sval,
        level,
        potential = ctx.potential(),
        "designing jewel"
    );

    let theme_attempts = ctx.choose_and_apply_theme(item)?;
    ctx.enrich(item);
    let corrupted = ctx.corrupt(item);
    resolve_contradictions(item);

    let summary = DesignSummary {
        theme: item.theme,
        initial_potential: ctx.initial_potential(),
        final_potential: ctx.potential(),
        corrupted,
        theme_attempts,
    };
    debug!(?summary, "jewel designed");
    Ok(summary)
}
