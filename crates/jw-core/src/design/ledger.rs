//! Potential ledger
//!
//! Tracks the spendable budget of the jewel being designed. Benefits cost
//! potential, curses and vulnerabilities pay it back.

use serde::{Deserialize, Serialize};

use crate::consts::MAX_POTENTIAL;
use crate::object::JewelKind;
use crate::rng::GameRng;

/// Starting potential before the per-level allowance
pub const fn base_potential(kind: JewelKind) -> i32 {
    match kind {
        JewelKind::Ring => 400,
        JewelKind::Amulet => 500,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ledger {
    potential: i32,
    initial_potential: i32,
}

impl Ledger {
    /// Seed the budget from depth, then jitter it by up to ±10%
    pub fn allocate(level: i32, base_factor: i32, per_level: i32, rng: &mut GameRng) -> Self {
        let mut potential = base_factor + per_level * level.max(0);
        potential += rng.randint0(potential / 5 + 1) - potential / 10;
        Self::with_potential(potential.clamp(0, MAX_POTENTIAL))
    }

    /// A ledger with a fixed budget
    pub fn with_potential(potential: i32) -> Self {
        let potential = potential.max(0);
        Self {
            potential,
            initial_potential: potential,
        }
    }

    pub fn potential(&self) -> i32 {
        self.potential
    }

    /// Budget as allocated, before any purchase
    pub fn initial_potential(&self) -> i32 {
        self.initial_potential
    }

    /// Pay `amount` out of the budget.
    ///
    /// On credit the purchase always goes through, emptying the budget if
    /// it cannot cover the cost. A negative amount is income and always
    /// succeeds.
    pub fn debit(&mut self, amount: i32, on_credit: bool) -> bool {
        if self.potential >= amount {
            self.potential = self.potential.saturating_sub(amount);
            true
        } else if on_credit {
            self.potential = 0;
            true
        } else {
            false
        }
    }

    /// Throw away whatever budget is left
    pub fn drain(&mut self) {
        self.potential = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debit_within_budget() {
        let mut ledger = Ledger::with_potential(1000);
        assert!(ledger.debit(400, false));
        assert_eq!(ledger.potential(), 600);
        assert_eq!(ledger.initial_potential(), 1000);
    }

    #[test]
    fn test_debit_over_budget_fails() {
        let mut ledger = Ledger::with_potential(100);
        assert!(!ledger.debit(400, false));
        assert_eq!(ledger.potential(), 100);
    }

    #[test]
    fn test_debit_on_credit_drains() {
        let mut ledger = Ledger::with_potential(100);
        assert!(ledger.debit(400, true));
        assert_eq!(ledger.potential(), 0);
    }

    #[test]
    fn test_negative_debit_is_income() {
        let mut ledger = Ledger::with_potential(0);
        assert!(ledger.debit(-700, false));
        assert_eq!(ledger.potential(), 700);
        assert_eq!(ledger.initial_potential(), 0);
    }

    #[test]
    fn test_allocate_jitter_bounds() {
        let mut rng = GameRng::new(11);
        for level in [1, 10, 50, 100] {
            let nominal = base_potential(JewelKind::Ring) + 55 * level;
            for _ in 0..50 {
                let ledger = Ledger::allocate(level, base_potential(JewelKind::Ring), 55, &mut rng);
                let p = ledger.potential();
                assert!(p >= nominal - nominal / 10 - 1, "{p} below jitter at {level}");
                assert!(p <= (nominal + nominal / 10 + 1).min(MAX_POTENTIAL));
                assert_eq!(p, ledger.initial_potential());
            }
        }
    }
}
