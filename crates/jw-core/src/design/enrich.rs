//! Generic enrichment pass
//!
//! Runs after the theme script on every jewel and spends the remaining
//! potential on untheme'd extras, ending with the resistance shopping
//! loop and a tidy-up of the numbers.

use strum::IntoEnumIterator;
use tracing::debug;

use super::quality::{Quality, CURSE_PRICES, TO_AC_PRICE};
use super::DesignContext;
use crate::consts::RES_LEVEL_BASE;
use crate::object::{Bonus, Jewel, ObjFlags, Resist, Stat, RAND_ACTIVATIONS};

/// Pval qualities eligible for the scaled bonus
const PVAL_BOOSTS: [Quality; 10] = [
    Quality::Stat(Stat::Str),
    Quality::Stat(Stat::Int),
    Quality::Stat(Stat::Wis),
    Quality::Stat(Stat::Dex),
    Quality::Stat(Stat::Con),
    Quality::Stat(Stat::Chr),
    Quality::Bonus(Bonus::Infra),
    Quality::Bonus(Bonus::Stealth),
    Quality::Bonus(Bonus::Search),
    Quality::Bonus(Bonus::Speed),
];

/// Pval qualities for the late extra bonus
const EXTRA_PVALS: [Quality; 12] = [
    Quality::Stat(Stat::Str),
    Quality::Stat(Stat::Int),
    Quality::Stat(Stat::Wis),
    Quality::Stat(Stat::Dex),
    Quality::Stat(Stat::Con),
    Quality::Stat(Stat::Chr),
    Quality::Bonus(Bonus::Stealth),
    Quality::Bonus(Bonus::Search),
    Quality::Bonus(Bonus::Tunnel),
    Quality::Bonus(Bonus::Speed),
    Quality::Bonus(Bonus::Might),
    Quality::Bonus(Bonus::Shots),
];

const HIGH_RESISTS: [Resist; 8] = [
    Resist::Poison,
    Resist::Confusion,
    Resist::Sound,
    Resist::Shards,
    Resist::Nexus,
    Resist::Nether,
    Resist::Chaos,
    Resist::Disenchant,
];

/// Weighted resistances for the shopping loop
const SHOPPING_RESISTS: [(Resist, u32); 11] = [
    (Resist::Acid, 10),
    (Resist::Elec, 10),
    (Resist::Fire, 10),
    (Resist::Cold, 10),
    (Resist::Poison, 4),
    (Resist::Light, 6),
    (Resist::Dark, 6),
    (Resist::Confusion, 4),
    (Resist::Sound, 4),
    (Resist::Shards, 4),
    (Resist::Nexus, 4),
];

const SHOPPING_FLAGS: [ObjFlags; 8] = [
    ObjFlags::SLOW_DIGEST,
    ObjFlags::FEATHER,
    ObjFlags::LIGHT,
    ObjFlags::REGEN,
    ObjFlags::SEE_INVIS,
    ObjFlags::FREE_ACT,
    ObjFlags::SEEING,
    ObjFlags::FEARLESS,
];

const COMBAT: [Quality; 3] = [Quality::ToHit, Quality::ToDam, Quality::ToAc];

/// Potential the shopping loop needs to keep going
const SHOPPING_FLOOR: i32 = 300;

/// Below this, past the halfway mark, the loop may cash out into armour.
/// Checked after each round's purchases, so it also catches a round that
/// took potential under the floor.
const SHOPPING_CASH_OUT: i32 = 500;

impl DesignContext<'_> {
    /// Spend leftover potential on generic extras
    pub fn enrich(&mut self, item: &mut Jewel) {
        self.boost_pvals(item);

        if self.rng.one_in(8) {
            self.add_vulnerabilities(item);
        }

        let potential = self.potential();
        if potential >= 1000 && self.rng.randint1(5000) < potential {
            for _ in 0..self.rng.randint1(potential / 1000) {
                if let Some(&(curse, _)) = self.rng.choose(CURSE_PRICES) {
                    self.get_quality(item, Quality::Curse(curse), 0, false);
                }
            }
        }

        if self.potential() > 1500 && self.rng.rn2(3) < 2 {
            self.buy_major_power(item);
        }

        if self.rng.one_in(3) {
            self.scale_combat(item);
        }

        if item.activation.is_none() && self.rng.one_in(3) {
            if let Some(&activation) = self.rng.choose(RAND_ACTIVATIONS) {
                self.get_activation(item, activation, false);
            }
        }

        if self.rng.one_in(3) {
            if let Some(&quality) = self.rng.choose(&EXTRA_PVALS) {
                self.add_quality(item, quality, 1, false);
            }
        }

        self.shop_for_resists(item);
        self.neaten(item);

        debug!(potential = self.potential(), "enrichment done");
    }

    fn boost_pvals(&mut self, item: &mut Jewel) {
        if self.rng.one_in(6) && self.potential() >= 3000 {
            for stat in Stat::iter() {
                self.add_quality(item, Quality::Stat(stat), 1, false);
            }
        } else if self.rng.percent(67) && self.potential() >= 750 {
            let scale = 1 + self.potential() / 1500;
            for _ in 0..self.rng.randint1(2) {
                if let Some(&quality) = self.rng.choose(&PVAL_BOOSTS) {
                    let delta = self.rng.randint1(scale);
                    self.add_quality(item, quality, delta, false);
                }
            }
        }
    }

    /// 1-2 vulnerabilities, only on elements the jewel leaves neutral
    fn add_vulnerabilities(&mut self, item: &mut Jewel) {
        for _ in 0..self.rng.randint1(2) {
            let neutral: Vec<Resist> = Resist::iter()
                .filter(|&r| item.resist(r) == RES_LEVEL_BASE)
                .collect();
            if let Some(&resist) = self.rng.choose(&neutral) {
                self.get_quality(item, Quality::Vuln(resist), 0, false);
            }
        }
    }

    /// Half again on every positive combat bonus
    fn scale_combat(&mut self, item: &mut Jewel) {
        for quality in COMBAT {
            let current = item.value_of(quality);
            if current > 0 {
                self.get_quality(item, quality, current * 3 / 2, false);
            }
        }
    }

    fn buy_major_power(&mut self, item: &mut Jewel) {
        match self.rng.rn2(5) {
            0 => {
                self.get_quality(item, Quality::Flag(ObjFlags::TELEPATHY), 0, false);
            }
            1 => {
                self.get_quality(item, Quality::Flag(ObjFlags::HOLD_LIFE), 0, false);
            }
            2 => {
                if self.get_quality(item, Quality::Flag(ObjFlags::PROT_CONF), 0, false) {
                    self.get_quality(item, Quality::Flag(ObjFlags::SEEING), 0, false);
                }
            }
            3 => {
                if let Some(&resist) = self.rng.choose(&HIGH_RESISTS) {
                    self.get_quality(item, Quality::Resist(resist), 0, false);
                }
            }
            _ => {
                if self.rng.one_in(2) {
                    self.add_quality(item, Quality::Bonus(Bonus::Speed), 1, false);
                } else {
                    for stat in Stat::iter() {
                        self.get_quality(item, Quality::Flag(ObjFlags::sustain(stat)), 0, false);
                    }
                }
            }
        }
    }

    fn shop_for_resists(&mut self, item: &mut Jewel) {
        let iterations = self.config.shopping_iterations;
        let mut round = 0;

        while self.potential() >= SHOPPING_FLOOR && round < iterations {
            round += 1;

            let unowned: Vec<(Resist, u32)> = SHOPPING_RESISTS
                .iter()
                .copied()
                .filter(|&(r, _)| item.resist(r) == RES_LEVEL_BASE)
                .collect();
            if let Some(&resist) = self.rng.choose_weighted(&unowned) {
                self.get_quality(item, Quality::Resist(resist), 0, false);
            }

            if self.rng.one_in(3) {
                let missing: Vec<ObjFlags> = SHOPPING_FLAGS
                    .iter()
                    .copied()
                    .filter(|&f| !item.has_flag(f))
                    .collect();
                if let Some(&flag) = self.rng.choose(&missing) {
                    self.get_quality(item, Quality::Flag(flag), 0, false);
                }
            }

            let potential = self.potential();
            if round > iterations / 2
                && (1..SHOPPING_CASH_OUT).contains(&potential)
                && self.rng.one_in(5)
            {
                let to_a = item.to_a + potential / TO_AC_PRICE;
                self.get_quality(item, Quality::ToAc, to_a, false);
                self.ledger.drain();
                debug!(to_a = item.to_a, "shopping cashed out into armour");
                break;
            }
        }
    }

    fn neaten(&mut self, item: &mut Jewel) {
        for stat in Stat::iter() {
            let sustain = ObjFlags::sustain(stat);
            if item.boosts_stat(stat) && !item.has_flag(sustain) && self.rng.one_in(2) {
                self.get_quality(item, Quality::Flag(sustain), 0, false);
            }
        }

        for quality in COMBAT {
            let current = item.value_of(quality);
            if current <= 0 || !self.rng.one_in(2) {
                continue;
            }
            match current % 5 {
                4 => {
                    self.get_quality(item, quality, current + 1, false);
                }
                1 if current > 1 => {
                    self.get_quality(item, quality, current - 1, false);
                }
                _ => {}
            }
        }
    }
}
