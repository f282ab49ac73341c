//! Corruption pass ("wheel of doom")
//!
//! A small fraction of finished jewels are spoiled: bonuses are flipped,
//! good powers stripped and curses laid on. None of this goes through the
//! ledger.

use tracing::debug;

use super::quality::CURSE_PRICES;
use super::DesignContext;
use crate::consts::{MULTIPLE_BASE, STAT_MAX};
use crate::object::{CurseFlags, Jewel, ObjFlags, Stat};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Spoke {
    Armour,
    Combat,
    Stats,
    Strip,
}

const STATS: [Stat; STAT_MAX] = [Stat::Str, Stat::Int, Stat::Wis, Stat::Dex, Stat::Con, Stat::Chr];

/// Stat groups a doomed jewel can drain together
const STAT_GROUPS: [&[Stat]; 4] = [
    &[Stat::Str, Stat::Dex, Stat::Con],
    &[Stat::Int, Stat::Wis],
    &[Stat::Wis, Stat::Chr],
    &STATS,
];

impl DesignContext<'_> {
    /// Roll for corruption and apply it. Returns true if the jewel was
    /// corrupted.
    pub fn corrupt(&mut self, item: &mut Jewel) -> bool {
        if !self.rng.percent(self.config.corruption_percent) {
            return false;
        }

        let potential = self.initial_potential();
        let mut curses = 1;
        if potential >= 3000 && self.rng.one_in(2) {
            curses += 1;
        }
        if potential >= 3500 && self.rng.one_in(2) {
            curses += 1;
        }

        if item.activation.is_some() && self.rng.rn2(3) < 2 {
            item.clear_activation();
        }

        let rounds = 2 + self.rng.rn2(2);
        for _ in 0..rounds {
            let wheel = [
                (Spoke::Armour, if item.to_a > 0 { 3 } else { 1 }),
                (Spoke::Combat, if item.to_h > 0 { 3 } else { 1 }),
                (Spoke::Stats, 1),
                (Spoke::Strip, 1),
            ];
            let Some(&spoke) = self.rng.choose_weighted(&wheel) else {
                continue;
            };
            self.spin(item, spoke);
        }

        for _ in 0..curses {
            if let Some(&(curse, _)) = self.rng.choose(CURSE_PRICES) {
                item.curses.insert(curse);
            }
        }

        debug!(curses, rounds, "jewel corrupted");
        true
    }

    fn spin(&mut self, item: &mut Jewel, spoke: Spoke) {
        match spoke {
            Spoke::Armour => {
                item.to_a = if self.rng.one_in(2) {
                    0
                } else {
                    -item.to_a.abs() - self.rng.randint1(5)
                };
            }
            Spoke::Combat => {
                for slot in [&mut item.to_h, &mut item.to_d] {
                    *slot = if self.rng.one_in(2) { 0 } else { -slot.abs() };
                }
            }
            Spoke::Stats => {
                if self.rng.one_in(4) {
                    self.doom_stats(item);
                } else if self.rng.one_in(2) {
                    item.bonus_stat = [0; STAT_MAX];
                } else {
                    for slot in &mut item.bonus_stat {
                        *slot = -slot.abs();
                    }
                }
            }
            Spoke::Strip => self.strip(item),
        }
    }

    /// Replace every stat bonus with a heavy penalty on one stat group and
    /// make the jewel impossible to take off
    fn doom_stats(&mut self, item: &mut Jewel) {
        let penalty = -(item.max_pval().max(2) + self.rng.randint1(3));
        let group = self.rng.choose(&STAT_GROUPS).copied().unwrap_or(&STATS);
        item.bonus_stat = [0; STAT_MAX];
        for &stat in group {
            item.bonus_stat[stat.index()] = penalty;
        }
        item.curses.insert(CurseFlags::STICKY_WIELD);
    }

    /// Each slay, brand, proofing and misc flag survives on 1 in 3
    fn strip(&mut self, item: &mut Jewel) {
        for slot in item
            .multiple_slay
            .iter_mut()
            .chain(item.multiple_brand.iter_mut())
        {
            if *slot > MULTIPLE_BASE && !self.rng.one_in(3) {
                *slot = MULTIPLE_BASE;
            }
        }

        let proofing = item.flags & ObjFlags::ALL_IGNORES;
        let misc = item.flags - ObjFlags::ALL_IGNORES;
        for flag in proofing.iter().chain(misc.iter()) {
            if !self.rng.one_in(3) {
                item.flags.remove(flag);
            }
        }
    }
}
