//! Purchase gateway
//!
//! The only path by which a quality or activation lands on a jewel during
//! design. The ledger is debited first; the jewel changes only if the
//! debit succeeds.

use tracing::trace;

use super::quality::{Pricing, Quality};
use super::DesignContext;
use crate::consts::{MULTIPLE_BASE, RES_CAP_ITEM, RES_LEVEL_BASE, RES_LEVEL_MAX, RES_STEP};
use crate::object::{Activation, Jewel};

impl Jewel {
    /// Current value of a quality: the pval, multiple, resistance percent
    /// or combat bonus, or 1/0 for flags and curses
    pub fn value_of(&self, quality: Quality) -> i32 {
        match quality {
            Quality::Stat(s) => self.bonus_stat[s.index()],
            Quality::Bonus(b) => self.bonus_other[b.index()],
            Quality::Slay(s) => self.multiple_slay[s.index()],
            Quality::Brand(b) => self.multiple_brand[b.index()],
            Quality::Flag(f) => i32::from(!f.is_empty() && self.flags.contains(f)),
            Quality::Resist(r) | Quality::Vuln(r) => self.percent_res[r.index()],
            Quality::ToHit => self.to_h,
            Quality::ToDam => self.to_d,
            Quality::ToAc => self.to_a,
            Quality::Curse(c) => i32::from(!c.is_empty() && self.curses.contains(c)),
        }
    }

    fn value_slot(&mut self, quality: Quality) -> Option<&mut i32> {
        match quality {
            Quality::Stat(s) => Some(&mut self.bonus_stat[s.index()]),
            Quality::Bonus(b) => Some(&mut self.bonus_other[b.index()]),
            Quality::Slay(s) => Some(&mut self.multiple_slay[s.index()]),
            Quality::Brand(b) => Some(&mut self.multiple_brand[b.index()]),
            Quality::Resist(r) | Quality::Vuln(r) => Some(&mut self.percent_res[r.index()]),
            Quality::ToHit => Some(&mut self.to_h),
            Quality::ToDam => Some(&mut self.to_d),
            Quality::ToAc => Some(&mut self.to_a),
            Quality::Flag(_) | Quality::Curse(_) => None,
        }
    }
}

impl DesignContext<'_> {
    /// Buy `quality` at `value` for the jewel.
    ///
    /// `value` is the requested absolute value for pvals, multiples and
    /// combat bonuses, and a step count for resistances and
    /// vulnerabilities (0 picks a random count). Flags and curses ignore it.
    /// Returns false, leaving the jewel untouched, if the quality cannot
    /// be bought.
    pub fn get_quality(
        &mut self,
        item: &mut Jewel,
        quality: Quality,
        value: i32,
        on_credit: bool,
    ) -> bool {
        let Some(pricing) = quality.pricing() else {
            return false;
        };

        let bought = match pricing {
            Pricing::Polynomial { .. } => {
                if matches!(quality, Quality::Slay(_) | Quality::Brand(_)) && value < MULTIPLE_BASE
                {
                    return false;
                }
                let current = item.value_of(quality);
                let cost = pricing.poly_value(value) - pricing.poly_value(current);
                self.pay_and_set(item, quality, cost, value, on_credit)
            }
            Pricing::Linear(per_point) => {
                let cost = per_point * (value - item.value_of(quality));
                self.pay_and_set(item, quality, cost, value, on_credit)
            }
            Pricing::Fixed(cost) => {
                let Quality::Flag(flag) = quality else {
                    return false;
                };
                if item.flags.contains(flag) {
                    return true;
                }
                if !self.ledger.debit(cost, on_credit) {
                    return false;
                }
                item.flags.insert(flag);
                Some(cost)
            }
            Pricing::Curse(cost) => {
                let Quality::Curse(curse) = quality else {
                    return false;
                };
                if item.curses.contains(curse) {
                    return true;
                }
                if !self.ledger.debit(cost, on_credit) {
                    return false;
                }
                item.curses.insert(curse);
                Some(cost)
            }
            Pricing::Resist {
                step_cost,
                random_cap,
            } => {
                let current = item.value_of(quality);
                let steps_left = (current - RES_CAP_ITEM) / RES_STEP;
                if steps_left <= 0 {
                    return false;
                }
                let steps = if value <= 0 {
                    self.rng.randint1(random_cap.min(steps_left))
                } else {
                    value.min(steps_left)
                };
                let cost = steps * step_cost;
                let resist = (current - steps * RES_STEP).clamp(RES_CAP_ITEM, RES_LEVEL_MAX);
                self.pay_and_set(item, quality, cost, resist, on_credit)
            }
            Pricing::Vuln {
                step_refund,
                random_cap,
            } => {
                let current = item.value_of(quality);
                if current > RES_LEVEL_BASE {
                    return false;
                }
                let max_steps = (RES_LEVEL_MAX - current) / RES_STEP;
                let steps = if value <= 0 {
                    self.rng.randint1(random_cap.min(max_steps))
                } else {
                    value.min(max_steps)
                };
                let cost = -steps * step_refund;
                let resist = (current + steps * RES_STEP).clamp(RES_CAP_ITEM, RES_LEVEL_MAX);
                self.pay_and_set(item, quality, cost, resist, on_credit)
            }
        };

        match bought {
            Some(cost) => {
                trace!(?quality, value, cost, potential = self.ledger.potential(), "bought quality");
                true
            }
            None => false,
        }
    }

    fn pay_and_set(
        &mut self,
        item: &mut Jewel,
        quality: Quality,
        cost: i32,
        new_value: i32,
        on_credit: bool,
    ) -> Option<i32> {
        let slot = item.value_slot(quality)?;
        if !self.ledger.debit(cost, on_credit) {
            return None;
        }
        *slot = new_value;
        Some(cost)
    }

    /// Give the jewel an activation, replacing any it had.
    ///
    /// Costs the effect's power times the configured multiplier; an
    /// activation the jewel already carries is free.
    pub fn get_activation(
        &mut self,
        item: &mut Jewel,
        activation: Activation,
        on_credit: bool,
    ) -> bool {
        if item.activation == Some(activation) {
            return true;
        }
        let def = activation.def();
        let cost = def.power * self.config.activation_cost_mult;
        if !self.ledger.debit(cost, on_credit) {
            return false;
        }
        item.activation = Some(activation);
        item.time_base = def.time_base;
        item.time_dice = def.time_dice;
        trace!(%activation, cost, potential = self.ledger.potential(), "bought activation");
        true
    }

    /// Raise (or lower) a pval, multiple or combat bonus by `delta`
    pub fn add_quality(
        &mut self,
        item: &mut Jewel,
        quality: Quality,
        delta: i32,
        on_credit: bool,
    ) -> bool {
        let value = item.value_of(quality) + delta;
        self.get_quality(item, quality, value, on_credit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::design::{DesignConfig, Ledger, THEME_CATALOG};
    use crate::object::{Bonus, CurseFlags, JewelKind, ObjFlags, Resist, Slay, Stat};
    use crate::rng::GameRng;

    fn with_ctx<R>(potential: i32, f: impl FnOnce(&mut DesignContext<'_>) -> R) -> R {
        let mut rng = GameRng::new(99);
        let config = DesignConfig::default();
        let mut ctx = DesignContext::new(
            Ledger::with_potential(potential),
            &mut rng,
            &config,
            THEME_CATALOG,
        );
        f(&mut ctx)
    }

    #[test]
    fn test_stat_purchase_charges_polynomial() {
        with_ctx(1000, |ctx| {
            let mut ring = Jewel::new(JewelKind::Ring, 0);
            assert!(ctx.get_quality(&mut ring, Quality::Stat(Stat::Str), 2, false));
            assert_eq!(ring.stat(Stat::Str), 2);
            assert_eq!(ctx.potential(), 1000 - (300 + 32));
        });
    }

    #[test]
    fn test_unaffordable_purchase_leaves_item() {
        with_ctx(100, |ctx| {
            let mut ring = Jewel::new(JewelKind::Ring, 0);
            let before = ring.clone();
            assert!(!ctx.get_quality(&mut ring, Quality::Bonus(Bonus::Speed), 5, false));
            assert_eq!(ring, before);
            assert_eq!(ctx.potential(), 100);
        });
    }

    #[test]
    fn test_credit_purchase_drains() {
        with_ctx(100, |ctx| {
            let mut ring = Jewel::new(JewelKind::Ring, 0);
            assert!(ctx.get_quality(&mut ring, Quality::Flag(ObjFlags::TELEPATHY), 0, true));
            assert!(ring.has_flag(ObjFlags::TELEPATHY));
            assert_eq!(ctx.potential(), 0);
        });
    }

    #[test]
    fn test_negative_stat_refunds() {
        with_ctx(0, |ctx| {
            let mut amulet = Jewel::new(JewelKind::Amulet, 0);
            assert!(ctx.get_quality(&mut amulet, Quality::Stat(Stat::Int), -3, false));
            assert_eq!(amulet.stat(Stat::Int), -3);
            assert_eq!(ctx.potential(), 300 - 54);
        });
    }

    #[test]
    fn test_owned_flag_and_curse_are_free() {
        with_ctx(1000, |ctx| {
            let mut ring = Jewel::new(JewelKind::Ring, 0);
            assert!(ctx.get_quality(&mut ring, Quality::Flag(ObjFlags::FREE_ACT), 0, false));
            let after_first = ctx.potential();
            assert!(ctx.get_quality(&mut ring, Quality::Flag(ObjFlags::FREE_ACT), 0, false));
            assert_eq!(ctx.potential(), after_first);

            assert!(ctx.get_quality(&mut ring, Quality::Curse(CurseFlags::SIREN), 0, false));
            let after_curse = ctx.potential();
            assert_eq!(after_curse, after_first + 400);
            assert!(ctx.get_quality(&mut ring, Quality::Curse(CurseFlags::SIREN), 0, false));
            assert_eq!(ctx.potential(), after_curse);
        });
    }

    #[test]
    fn test_resist_steps_and_clamp() {
        with_ctx(10_000, |ctx| {
            let mut ring = Jewel::new(JewelKind::Ring, 0);
            assert!(ctx.get_quality(&mut ring, Quality::Resist(Resist::Fire), 3, false));
            assert_eq!(ring.resist(Resist::Fire), 70);
            assert_eq!(ctx.potential(), 10_000 - 300);
            // Asking for more than remains stops at the cap
            assert!(ctx.get_quality(&mut ring, Quality::Resist(Resist::Fire), 50, false));
            assert_eq!(ring.resist(Resist::Fire), RES_CAP_ITEM);
            assert_eq!(ctx.potential(), 10_000 - 800);
        });
    }

    #[test]
    fn test_resist_at_cap_fails() {
        with_ctx(10, |ctx| {
            let mut ring = Jewel::new(JewelKind::Ring, 0);
            ring.percent_res[Resist::Fire.index()] = RES_CAP_ITEM;
            let before = ring.clone();
            assert!(!ctx.get_quality(&mut ring, Quality::Resist(Resist::Fire), 8, false));
            assert_eq!(ring, before);
            assert_eq!(ctx.potential(), 10);
        });
    }

    #[test]
    fn test_random_resist_steps() {
        with_ctx(10_000, |ctx| {
            let mut ring = Jewel::new(JewelKind::Ring, 0);
            assert!(ctx.get_quality(&mut ring, Quality::Resist(Resist::Chaos), 0, false));
            let r = ring.resist(Resist::Chaos);
            assert!(r < RES_LEVEL_BASE && r >= RES_LEVEL_BASE - 4 * RES_STEP);
        });
    }

    #[test]
    fn test_vulnerability_pays_and_is_exclusive() {
        with_ctx(0, |ctx| {
            let mut ring = Jewel::new(JewelKind::Ring, 0);
            assert!(ctx.get_quality(&mut ring, Quality::Vuln(Resist::Cold), 2, false));
            assert_eq!(ring.resist(Resist::Cold), 120);
            assert_eq!(ctx.potential(), 120);
            // Already vulnerable
            assert!(!ctx.get_quality(&mut ring, Quality::Vuln(Resist::Cold), 1, false));
            // Never past the band
            assert!(ctx.get_quality(&mut ring, Quality::Vuln(Resist::Acid), 99, false));
            assert_eq!(ring.resist(Resist::Acid), RES_LEVEL_MAX);
        });
    }

    #[test]
    fn test_vulnerability_moves_from_current_resistance() {
        with_ctx(1000, |ctx| {
            let mut ring = Jewel::new(JewelKind::Ring, 0);
            assert!(ctx.get_quality(&mut ring, Quality::Resist(Resist::Fire), 8, false));
            assert_eq!(ring.resist(Resist::Fire), RES_CAP_ITEM);
            let after_resist = ctx.potential();

            assert!(ctx.get_quality(&mut ring, Quality::Vuln(Resist::Fire), 1, false));
            assert_eq!(ring.resist(Resist::Fire), RES_CAP_ITEM + RES_STEP);
            assert_eq!(ctx.potential(), after_resist + 60);
            assert!(ring.resists(Resist::Fire));
        });
    }

    #[test]
    fn test_slay_below_base_rejected() {
        with_ctx(10_000, |ctx| {
            let mut ring = Jewel::new(JewelKind::Ring, 0);
            assert!(!ctx.get_quality(&mut ring, Quality::Slay(Slay::Orc), 0, false));
            assert!(ctx.get_quality(&mut ring, Quality::Slay(Slay::Orc), 3, false));
            assert_eq!(ring.multiple_slay[Slay::Orc.index()], 3);
        });
    }

    #[test]
    fn test_combat_bonus_linear() {
        with_ctx(1000, |ctx| {
            let mut ring = Jewel::new(JewelKind::Ring, 0);
            assert!(ctx.get_quality(&mut ring, Quality::ToAc, 10, false));
            assert_eq!(ring.to_a, 10);
            assert_eq!(ctx.potential(), 800);
            assert!(ctx.get_quality(&mut ring, Quality::ToDam, -5, false));
            assert_eq!(ctx.potential(), 1100);
        });
    }

    #[test]
    fn test_activation_overwrites() {
        with_ctx(10_000, |ctx| {
            let mut amulet = Jewel::new(JewelKind::Amulet, 0);
            assert!(ctx.get_activation(&mut amulet, Activation::Light, false));
            assert_eq!(ctx.potential(), 10_000 - 2 * 40);
            assert!(ctx.get_activation(&mut amulet, Activation::Heal, false));
            assert_eq!(amulet.activation, Some(Activation::Heal));
            assert_eq!(amulet.time_base, Activation::Heal.def().time_base);
        });
    }

    #[test]
    fn test_activation_too_dear() {
        with_ctx(10, |ctx| {
            let mut amulet = Jewel::new(JewelKind::Amulet, 0);
            assert!(!ctx.get_activation(&mut amulet, Activation::Heal, false));
            assert_eq!(amulet.activation, None);
            assert!(ctx.get_activation(&mut amulet, Activation::Heal, true));
            assert_eq!(ctx.potential(), 0);
        });
    }
}
