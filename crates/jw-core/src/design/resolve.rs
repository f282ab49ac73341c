//! Contradiction resolver
//!
//! Removes combinations that make no sense on one jewel (a curse next to
//! the power it cancels), caps pvals and marks resisted base elements as
//! proof against their damage. Bypasses the ledger.

use strum::IntoEnumIterator;

use crate::consts::BONUS_CAP;
use crate::object::{Bonus, CurseFlags, Jewel, ObjFlags, Resist, Stat};

/// Curse and the power it cancels
const CANCELLED_BY: [(CurseFlags, ObjFlags); 5] = [
    (CurseFlags::DRAIN_EXP, ObjFlags::HOLD_LIFE),
    (CurseFlags::SLOW_REGEN, ObjFlags::REGEN),
    (CurseFlags::AFRAID, ObjFlags::FEARLESS),
    (CurseFlags::HUNGRY, ObjFlags::SLOW_DIGEST),
    (CurseFlags::PARALYZE, ObjFlags::FREE_ACT),
];

pub fn resolve_contradictions(item: &mut Jewel) {
    if item.has_curse(CurseFlags::AGGRO_PERM) {
        item.bonus_other[Bonus::Stealth.index()] = 0;
    }

    for (curse, flag) in CANCELLED_BY {
        if item.has_curse(curse) {
            item.flags.remove(flag);
        }
    }

    for stat in Stat::iter() {
        let value = &mut item.bonus_stat[stat.index()];
        if *value < 0 {
            item.flags.remove(ObjFlags::sustain(stat));
        }
        *value = (*value).min(BONUS_CAP);
    }

    for bonus in Bonus::iter().filter(|&b| b != Bonus::Speed) {
        let value = &mut item.bonus_other[bonus.index()];
        *value = (*value).min(BONUS_CAP);
    }

    if item.has_curse(CurseFlags::NO_TELEPORT) && item.activation.is_some_and(|a| a.is_teleport()) {
        item.clear_activation();
    }

    for resist in Resist::iter() {
        if let Some(flag) = resist.ignore_flag() {
            if item.resists(resist) {
                item.flags.insert(flag);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::{Activation, JewelKind};

    #[test]
    fn test_aggravation_zeroes_stealth() {
        let mut ring = Jewel::new(JewelKind::Ring, 0);
        ring.bonus_other[Bonus::Stealth.index()] = 4;
        ring.curses.insert(CurseFlags::AGGRO_PERM);
        resolve_contradictions(&mut ring);
        assert_eq!(ring.bonus(Bonus::Stealth), 0);
    }

    #[test]
    fn test_curses_cancel_powers() {
        let mut amulet = Jewel::new(JewelKind::Amulet, 0);
        amulet.flags = ObjFlags::HOLD_LIFE | ObjFlags::REGEN | ObjFlags::FREE_ACT | ObjFlags::TELEPATHY;
        amulet.curses = CurseFlags::DRAIN_EXP | CurseFlags::PARALYZE;
        resolve_contradictions(&mut amulet);
        assert_eq!(amulet.flags, ObjFlags::REGEN | ObjFlags::TELEPATHY);
    }

    #[test]
    fn test_negative_stat_loses_sustain_and_caps() {
        let mut ring = Jewel::new(JewelKind::Ring, 0);
        ring.bonus_stat[Stat::Str.index()] = -2;
        ring.bonus_stat[Stat::Dex.index()] = 9;
        ring.bonus_other[Bonus::Speed.index()] = 12;
        ring.bonus_other[Bonus::Tunnel.index()] = 8;
        ring.flags = ObjFlags::SUST_STR | ObjFlags::SUST_DEX;
        resolve_contradictions(&mut ring);
        assert_eq!(ring.flags, ObjFlags::SUST_DEX);
        assert_eq!(ring.stat(Stat::Dex), BONUS_CAP);
        assert_eq!(ring.bonus(Bonus::Tunnel), BONUS_CAP);
        assert_eq!(ring.bonus(Bonus::Speed), 12);
    }

    #[test]
    fn test_no_teleport_blocks_teleport_activation() {
        let mut ring = Jewel::new(JewelKind::Ring, 0);
        ring.activation = Some(Activation::Blink);
        ring.time_base = 10;
        ring.curses.insert(CurseFlags::NO_TELEPORT);
        resolve_contradictions(&mut ring);
        assert_eq!(ring.activation, None);
        assert_eq!(ring.time_base, 0);

        ring.activation = Some(Activation::Heal);
        resolve_contradictions(&mut ring);
        assert_eq!(ring.activation, Some(Activation::Heal));
    }

    #[test]
    fn test_resisted_elements_ignore_damage() {
        let mut ring = Jewel::new(JewelKind::Ring, 0);
        ring.percent_res[Resist::Fire.index()] = 50;
        ring.percent_res[Resist::Chaos.index()] = 50;
        resolve_contradictions(&mut ring);
        assert_eq!(ring.flags, ObjFlags::IGNORE_FIRE);
    }

    #[test]
    fn test_idempotent() {
        let mut ring = Jewel::new(JewelKind::Ring, 0);
        ring.bonus_stat = [-1, 7, 0, 3, 9, -4];
        ring.flags = ObjFlags::ALL_SUSTAINS | ObjFlags::FEARLESS;
        ring.curses = CurseFlags::AFRAID | CurseFlags::AGGRO_PERM;
        ring.percent_res[Resist::Acid.index()] = 30;
        resolve_contradictions(&mut ring);
        let once = ring.clone();
        resolve_contradictions(&mut ring);
        assert_eq!(ring, once);
    }
}
