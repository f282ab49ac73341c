//! Property catalog: every purchasable quality and its price
//!
//! Prices are configuration data. A quality maps to a pricing family and
//! that family's coefficients; the gateway does the arithmetic.

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

use crate::consts::MULTIPLE_BASE;
use crate::object::{Bonus, Brand, CurseFlags, ObjFlags, Resist, Slay, Stat};

/// A purchasable property
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Quality {
    Stat(Stat),
    Bonus(Bonus),
    Slay(Slay),
    Brand(Brand),
    /// A single object flag
    Flag(ObjFlags),
    Resist(Resist),
    Vuln(Resist),
    ToHit,
    ToDam,
    ToAc,
    /// A single curse flag
    Curse(CurseFlags),
}

/// How a quality is priced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pricing {
    /// `linear*(v-base) + square*(v-base)^2`, charged as f(new) - f(current)
    Polynomial { base: i32, linear: i32, square: i32 },
    /// Flat cost, nothing to pay if already present
    Fixed(i32),
    /// Per step of resistance removed; `random_cap` bounds a random step count
    Resist { step_cost: i32, random_cap: i32 },
    /// Per step of vulnerability added, paid back to the jewel
    Vuln { step_refund: i32, random_cap: i32 },
    /// Per point of combat bonus
    Linear(i32),
    /// Potential returned to the jewel
    Curse(i32),
}

impl Pricing {
    /// Polynomial price of holding value `v`
    pub fn poly_value(&self, v: i32) -> i32 {
        match *self {
            Pricing::Polynomial {
                base,
                linear,
                square,
            } => {
                let d = v - base;
                linear * d + square * d * d
            }
            _ => 0,
        }
    }
}

/// (linear, square) per stat, in stat order
const STAT_PRICES: [(i32, i32); 6] = [
    (150, 8), // Str
    (100, 6), // Int
    (100, 6), // Wis
    (150, 8), // Dex
    (150, 8), // Con
    (50, 3),  // Chr
];

/// (linear, square) per other bonus, in bonus order
const BONUS_PRICES: [(i32, i32); 8] = [
    (40, 4),   // MagicMastery
    (100, 10), // Stealth
    (30, 2),   // Search
    (30, 3),   // Infra
    (40, 4),   // Tunnel
    (400, 40), // Speed
    (300, 30), // Might
    (300, 30), // Shots
];

const SLAY_PRICES: [(i32, i32); 8] = [
    (100, 50),  // Animal
    (200, 100), // Evil
    (150, 60),  // Undead
    (150, 60),  // Demon
    (75, 25),   // Orc
    (75, 25),   // Troll
    (75, 25),   // Giant
    (150, 60),  // Dragon
];

const BRAND_PRICES: [(i32, i32); 5] = [
    (200, 80), // Acid
    (200, 80), // Elec
    (175, 70), // Fire
    (175, 70), // Cold
    (150, 60), // Poison
];

/// (cost per step removed, refund per vulnerability step), in resist order
const RESIST_PRICES: [(i32, i32); 14] = [
    (100, 60),  // Acid
    (100, 60),  // Elec
    (100, 60),  // Fire
    (100, 60),  // Cold
    (250, 100), // Poison
    (80, 40),   // Light
    (80, 40),   // Dark
    (150, 80),  // Confusion
    (100, 60),  // Sound
    (100, 60),  // Shards
    (100, 60),  // Nexus
    (150, 80),  // Nether
    (200, 100), // Chaos
    (200, 100), // Disenchant
];

/// Largest random step count for a resistance bought with value 0
pub const RES_RANDOM_STEPS: i32 = 4;

/// Largest random step count for a vulnerability bought with value 0
pub const VULN_RANDOM_STEPS: i32 = 3;

pub const FLAG_PRICES: &[(ObjFlags, i32)] = &[
    (ObjFlags::SUST_STR, 150),
    (ObjFlags::SUST_INT, 150),
    (ObjFlags::SUST_WIS, 150),
    (ObjFlags::SUST_DEX, 150),
    (ObjFlags::SUST_CON, 150),
    (ObjFlags::SUST_CHR, 50),
    (ObjFlags::SLOW_DIGEST, 100),
    (ObjFlags::FEATHER, 100),
    (ObjFlags::LIGHT, 150),
    (ObjFlags::REGEN, 500),
    (ObjFlags::TELEPATHY, 3000),
    (ObjFlags::SEE_INVIS, 500),
    (ObjFlags::FREE_ACT, 700),
    (ObjFlags::HOLD_LIFE, 800),
    (ObjFlags::FEARLESS, 400),
    (ObjFlags::SEEING, 600),
    (ObjFlags::PROT_CONF, 700),
    (ObjFlags::PROT_STUN, 800),
    (ObjFlags::DARKNESS, 300),
    (ObjFlags::IGNORE_ACID, 50),
    (ObjFlags::IGNORE_ELEC, 50),
    (ObjFlags::IGNORE_FIRE, 50),
    (ObjFlags::IGNORE_COLD, 50),
];

/// Curse prices are negative: the jewel is paid to carry them
pub const CURSE_PRICES: &[(CurseFlags, i32)] = &[
    (CurseFlags::TELEPORT, -300),
    (CurseFlags::NO_TELEPORT, -400),
    (CurseFlags::AGGRO_PERM, -800),
    (CurseFlags::AGGRO_RAND, -300),
    (CurseFlags::SLOW_REGEN, -300),
    (CurseFlags::AFRAID, -400),
    (CurseFlags::HUNGRY, -300),
    (CurseFlags::POIS_RAND, -200),
    (CurseFlags::SIREN, -400),
    (CurseFlags::HALLU_RAND, -300),
    (CurseFlags::PARALYZE, -600),
    (CurseFlags::DEMON_SUMMON, -500),
    (CurseFlags::UNDEAD_SUMMON, -500),
    (CurseFlags::IMPAIR_MANA, -300),
    (CurseFlags::IMPAIR_HP, -300),
    (CurseFlags::CUT_RAND, -200),
    (CurseFlags::STICKY_CARRY, -500),
    (CurseFlags::STICKY_WIELD, -700),
    (CurseFlags::DRAIN_EXP, -500),
];

const TO_HIT_PRICE: i32 = 25;
const TO_DAM_PRICE: i32 = 60;
pub const TO_AC_PRICE: i32 = 20;

const fn poly(base: i32, (linear, square): (i32, i32)) -> Pricing {
    Pricing::Polynomial {
        base,
        linear,
        square,
    }
}

impl Quality {
    /// Pricing family and coefficients for this quality.
    ///
    /// Returns `None` for a flag or curse value that is not exactly one
    /// catalogued flag (empty or composite sets are not purchasable).
    pub fn pricing(self) -> Option<Pricing> {
        let pricing = match self {
            Quality::Stat(s) => poly(0, STAT_PRICES[s.index()]),
            Quality::Bonus(b) => poly(0, BONUS_PRICES[b.index()]),
            Quality::Slay(s) => poly(MULTIPLE_BASE, SLAY_PRICES[s.index()]),
            Quality::Brand(b) => poly(MULTIPLE_BASE, BRAND_PRICES[b.index()]),
            Quality::Flag(flag) => {
                let (_, cost) = FLAG_PRICES.iter().find(|(f, _)| *f == flag)?;
                Pricing::Fixed(*cost)
            }
            Quality::Resist(r) => Pricing::Resist {
                step_cost: RESIST_PRICES[r.index()].0,
                random_cap: RES_RANDOM_STEPS,
            },
            Quality::Vuln(r) => Pricing::Vuln {
                step_refund: RESIST_PRICES[r.index()].1,
                random_cap: VULN_RANDOM_STEPS,
            },
            Quality::ToHit => Pricing::Linear(TO_HIT_PRICE),
            Quality::ToDam => Pricing::Linear(TO_DAM_PRICE),
            Quality::ToAc => Pricing::Linear(TO_AC_PRICE),
            Quality::Curse(curse) => {
                let (_, cost) = CURSE_PRICES.iter().find(|(c, _)| *c == curse)?;
                Pricing::Curse(*cost)
            }
        };
        Some(pricing)
    }

    /// Every catalogued quality, band by band
    pub fn all() -> Vec<Quality> {
        let mut all = Vec::new();
        all.extend(Stat::iter().map(Quality::Stat));
        all.extend(Bonus::iter().map(Quality::Bonus));
        all.extend(Slay::iter().map(Quality::Slay));
        all.extend(Brand::iter().map(Quality::Brand));
        all.extend(FLAG_PRICES.iter().map(|(f, _)| Quality::Flag(*f)));
        all.extend(Resist::iter().map(Quality::Resist));
        all.extend(Resist::iter().map(Quality::Vuln));
        all.extend([Quality::ToHit, Quality::ToDam, Quality::ToAc]);
        all.extend(CURSE_PRICES.iter().map(|(c, _)| Quality::Curse(*c)));
        all
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_size() {
        // 6 + 8 + 8 + 5 + 23 + 14 + 14 + 3 + 19
        assert_eq!(Quality::all().len(), 100);
        assert!(Quality::all().iter().all(|q| q.pricing().is_some()));
    }

    #[test]
    fn test_strength_polynomial() {
        let pricing = Quality::Stat(Stat::Str).pricing().unwrap();
        assert_eq!(pricing.poly_value(0), 0);
        assert_eq!(pricing.poly_value(2), 150 * 2 + 8 * 4);
        // Small negative values refund
        assert!(pricing.poly_value(-3) < 0);
    }

    #[test]
    fn test_slay_priced_from_base_multiple() {
        let pricing = Quality::Slay(Slay::Evil).pricing().unwrap();
        assert_eq!(pricing.poly_value(MULTIPLE_BASE), 0);
        assert_eq!(pricing.poly_value(MULTIPLE_BASE + 1), 300);
    }

    #[test]
    fn test_composite_flag_not_purchasable() {
        assert!(Quality::Flag(ObjFlags::ALL_SUSTAINS).pricing().is_none());
        assert!(Quality::Flag(ObjFlags::empty()).pricing().is_none());
    }

    #[test]
    fn test_curses_pay_the_jewel() {
        for (_, cost) in CURSE_PRICES {
            assert!(*cost < 0);
        }
    }

    #[test]
    fn test_flag_table_covers_every_single_flag() {
        for flag in ObjFlags::all().iter() {
            assert!(
                Quality::Flag(flag).pricing().is_some(),
                "{flag:?} has no price"
            );
        }
    }
}
