//! Theme catalog and chooser
//!
//! A theme is the archetype a jewel is built around ("Ring of Speed",
//! "Amulet of Clarity"). Each catalog entry names the base types it is
//! legal for, a draw weight, and the purchase script that builds it.

use core::fmt;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};
use tracing::{debug, trace, warn};

use super::scripts;
use super::{DesignContext, DesignError};
use crate::object::{Jewel, JewelKind};
use crate::rng::GameRng;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
pub enum Theme {
    #[strum(to_string = "Ring of Speed")]
    RingSpeed,
    #[strum(to_string = "Ring of Bodykeeping")]
    RingBodykeeping,
    #[strum(to_string = "Ring of Soulkeeping")]
    RingSoulkeeping,
    #[strum(to_string = "Ring of Escaping")]
    RingEscaping,
    #[strum(to_string = "Ring of the Mouse")]
    RingMouse,
    #[strum(to_string = "Ring of the Dog")]
    RingDog,
    #[strum(to_string = "Ring of Open Wounds")]
    RingOpenWounds,
    #[strum(to_string = "Ring of Protection")]
    RingProtection,
    #[strum(to_string = "Ring of Free Action")]
    RingFreeAction,
    #[strum(to_string = "Ring of See Invisible")]
    RingSeeInvisible,
    #[strum(to_string = "Ring of Digging")]
    RingDigging,
    #[strum(to_string = "Ring of Slaying")]
    RingSlaying,
    #[strum(to_string = "Ring of Teleportation")]
    RingTeleportation,
    #[strum(to_string = "Ring of Flames")]
    RingFlames,
    #[strum(to_string = "Ring of Ice")]
    RingIce,
    #[strum(to_string = "Ring of Acid")]
    RingAcid,
    #[strum(to_string = "Ring of Lightning")]
    RingLightning,
    #[strum(to_string = "Amulet of Clarity")]
    AmuletClarity,
    #[strum(to_string = "Amulet of Insight")]
    AmuletInsight,
    #[strum(to_string = "Amulet of Infravision")]
    AmuletInfravision,
    #[strum(to_string = "Amulet of Regeneration")]
    AmuletRegeneration,
    #[strum(to_string = "Amulet of ESP")]
    AmuletEsp,
    #[strum(to_string = "Amulet of Slow Digestion")]
    AmuletSlowDigestion,
    #[strum(to_string = "Amulet of Resistance")]
    AmuletResistance,
    #[strum(to_string = "Amulet of Doom")]
    AmuletDoom,
    #[strum(to_string = "Amulet of Teleportation")]
    AmuletTeleportation,
    #[strum(to_string = "Amulet of the Magi")]
    AmuletMagi,
    #[strum(to_string = "Amulet of Devotion")]
    AmuletDevotion,
    #[strum(to_string = "Amulet of Weaponmastery")]
    AmuletWeaponmastery,
    #[strum(to_string = "Amulet of Trickery")]
    AmuletTrickery,
    #[strum(to_string = "Amulet of Inertia")]
    AmuletInertia,
    #[strum(to_string = "Amulet of Sustenance")]
    AmuletSustenance,
    #[strum(to_string = "Amulet of Light")]
    AmuletLight,
}

/// A theme's purchase script; returns false if its potential gate failed
pub type ThemeScript = fn(&mut DesignContext<'_>, &mut Jewel) -> bool;

#[derive(Clone, Copy)]
pub struct ThemeDef {
    pub theme: Theme,
    pub kind: JewelKind,
    pub min_sval: u8,
    pub max_sval: u8,
    /// Relative draw weight; 0 disables the entry
    pub weight: u32,
    pub script: ThemeScript,
}

impl fmt::Debug for ThemeDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThemeDef")
            .field("theme", &self.theme)
            .field("kind", &self.kind)
            .field("min_sval", &self.min_sval)
            .field("max_sval", &self.max_sval)
            .field("weight", &self.weight)
            .finish()
    }
}

impl ThemeDef {
    /// True if this entry may be drawn for the jewel's base type
    pub fn is_legal_for(&self, item: &Jewel) -> bool {
        self.weight > 0
            && self.kind == item.kind
            && (self.min_sval..=self.max_sval).contains(&item.sval)
    }
}

const fn ring(theme: Theme, weight: u32, script: ThemeScript) -> ThemeDef {
    ThemeDef {
        theme,
        kind: JewelKind::Ring,
        min_sval: 0,
        max_sval: u8::MAX,
        weight,
        script,
    }
}

const fn amulet(theme: Theme, weight: u32, script: ThemeScript) -> ThemeDef {
    ThemeDef {
        theme,
        kind: JewelKind::Amulet,
        min_sval: 0,
        max_sval: u8::MAX,
        weight,
        script,
    }
}

pub const THEME_CATALOG: &[ThemeDef] = &[
    ring(Theme::RingSpeed, 2, scripts::ring_of_speed),
    ring(Theme::RingBodykeeping, 4, scripts::ring_of_bodykeeping),
    ring(Theme::RingSoulkeeping, 4, scripts::ring_of_soulkeeping),
    ring(Theme::RingEscaping, 4, scripts::ring_of_escaping),
    ring(Theme::RingMouse, 5, scripts::ring_of_the_mouse),
    ring(Theme::RingDog, 5, scripts::ring_of_the_dog),
    ring(Theme::RingOpenWounds, 3, scripts::ring_of_open_wounds),
    ring(Theme::RingProtection, 8, scripts::ring_of_protection),
    ring(Theme::RingFreeAction, 6, scripts::ring_of_free_action),
    ring(Theme::RingSeeInvisible, 6, scripts::ring_of_see_invisible),
    ring(Theme::RingDigging, 5, scripts::ring_of_digging),
    ring(Theme::RingSlaying, 4, scripts::ring_of_slaying),
    ring(Theme::RingTeleportation, 4, scripts::ring_of_teleportation),
    ring(Theme::RingFlames, 3, scripts::ring_of_flames),
    ring(Theme::RingIce, 3, scripts::ring_of_ice),
    ring(Theme::RingAcid, 3, scripts::ring_of_acid),
    ring(Theme::RingLightning, 3, scripts::ring_of_lightning),
    amulet(Theme::AmuletClarity, 6, scripts::amulet_of_clarity),
    amulet(Theme::AmuletInsight, 6, scripts::amulet_of_insight),
    amulet(Theme::AmuletInfravision, 6, scripts::amulet_of_infravision),
    amulet(Theme::AmuletRegeneration, 4, scripts::amulet_of_regeneration),
    amulet(Theme::AmuletEsp, 2, scripts::amulet_of_esp),
    amulet(Theme::AmuletSlowDigestion, 6, scripts::amulet_of_slow_digestion),
    amulet(Theme::AmuletResistance, 5, scripts::amulet_of_resistance),
    amulet(Theme::AmuletDoom, 3, scripts::amulet_of_doom),
    amulet(Theme::AmuletTeleportation, 4, scripts::amulet_of_teleportation),
    amulet(Theme::AmuletMagi, 1, scripts::amulet_of_the_magi),
    amulet(Theme::AmuletDevotion, 2, scripts::amulet_of_devotion),
    amulet(Theme::AmuletWeaponmastery, 2, scripts::amulet_of_weaponmastery),
    amulet(Theme::AmuletTrickery, 2, scripts::amulet_of_trickery),
    amulet(Theme::AmuletInertia, 4, scripts::amulet_of_inertia),
    amulet(Theme::AmuletSustenance, 4, scripts::amulet_of_sustenance),
    amulet(Theme::AmuletLight, 5, scripts::amulet_of_light),
];

/// Draw a theme legal for the jewel's base type, weighted by entry weight
pub fn allocate_theme<'c>(
    catalog: &'c [ThemeDef],
    item: &Jewel,
    rng: &mut GameRng,
) -> Result<&'c ThemeDef, DesignError> {
    let total: u32 = catalog
        .iter()
        .filter(|def| def.is_legal_for(item))
        .map(|def| def.weight)
        .sum();

    if total == 0 {
        return Err(DesignError::NoLegalTheme {
            kind: item.kind,
            sval: item.sval,
        });
    }

    let mut roll = rng.rn2(total);
    for def in catalog.iter().filter(|def| def.is_legal_for(item)) {
        if roll < def.weight {
            return Ok(def);
        }
        roll -= def.weight;
    }

    Err(DesignError::NoLegalTheme {
        kind: item.kind,
        sval: item.sval,
    })
}

impl DesignContext<'_> {
    /// Draw themes until one's script succeeds.
    ///
    /// A script whose potential gate fails is rolled back (jewel and
    /// ledger) and another theme is drawn. After `max_theme_attempts`
    /// failures the jewel is left untheme'd. Returns the number of draws
    /// made.
    pub fn choose_and_apply_theme(&mut self, item: &mut Jewel) -> Result<u32, DesignError> {
        let catalog = self.themes;
        let attempts = self.config.max_theme_attempts;

        for attempt in 1..=attempts {
            let def = allocate_theme(catalog, item, self.rng)?;
            let saved_item = item.clone();
            let saved_ledger = self.ledger;

            if (def.script)(self, item) {
                item.theme = Some(def.theme);
                debug!(
                    theme = %def.theme,
                    attempt,
                    potential = self.potential(),
                    "theme applied"
                );
                return Ok(attempt);
            }

            trace!(theme = %def.theme, attempt, "theme gate failed");
            *item = saved_item;
            self.ledger = saved_ledger;
        }

        warn!(
            kind = %item.kind,
            initial_potential = self.initial_potential(),
            attempts,
            "no theme script succeeded, leaving jewel untheme'd"
        );
        Ok(attempts)
    }

    /// Run one theme's script directly, bypassing the draw
    pub fn run_theme(&mut self, item: &mut Jewel, theme: Theme) -> bool {
        let themes = self.themes;
        let Some(def) = themes.iter().find(|def| def.theme == theme) else {
            return false;
        };
        if (def.script)(self, item) {
            item.theme = Some(theme);
            true
        } else {
            false
        }
    }
}
