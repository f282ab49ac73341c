//! Property selector
//!
//! Prices every (candidate, magnitude) pair by simulating the purchase on
//! a scratch copy of the jewel, ledger and RNG, then picks one entry
//! according to a ranking policy. The real purchase is left to the caller.
//!
//! A resistance priced at magnitude 0 rolls its step count during the
//! simulation. The entry records the steps that were rolled so the real
//! purchase pays exactly the simulated price.

use serde::{Deserialize, Serialize};

use super::quality::Quality;
use super::DesignContext;
use crate::consts::{RES_STEP, TOO_EXPENSIVE};
use crate::object::Jewel;

/// How the selector ranks its price table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SelectPolicy {
    /// Lowest positive cost
    CheapestFirst,
    /// Highest positive affordable cost
    DearestFirst,
    /// A random affordable entry, giving up after a bounded number of draws
    RandomChoice,
    /// First affordable entry in table order
    FirstValid,
    /// Largest affordable magnitude
    FindMaxValue,
}

/// One simulated purchase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceEntry {
    pub quality: Quality,
    /// Requested magnitude
    pub value: i32,
    /// Value to pass to the real purchase to reproduce this entry
    pub commit: i32,
    /// Actual ledger change, or `TOO_EXPENSIVE` if the purchase failed
    pub cost: i32,
}

impl PriceEntry {
    /// Affordable and not a no-op
    pub fn is_purchasable(&self) -> bool {
        self.cost != 0 && self.cost != TOO_EXPENSIVE
    }
}

impl DesignContext<'_> {
    /// Simulated price of every candidate at every magnitude in
    /// `0..=max_value`, in candidate-major order
    pub fn price_table(&self, item: &Jewel, candidates: &[Quality], max_value: i32) -> Vec<PriceEntry> {
        let magnitudes = max_value.max(0);
        let mut table = Vec::with_capacity(candidates.len() * (magnitudes as usize + 1));

        for &quality in candidates {
            for value in 0..=magnitudes {
                let mut rng = self.rng.clone();
                let mut scratch = self.scratch(&mut rng);
                let mut copy = item.clone();
                let before = scratch.ledger.potential();
                let (cost, commit) = if scratch.get_quality(&mut copy, quality, value, false) {
                    let commit = committed_value(item, &copy, quality, value);
                    (before - scratch.ledger.potential(), commit)
                } else {
                    (TOO_EXPENSIVE, value)
                };
                table.push(PriceEntry {
                    quality,
                    value,
                    commit,
                    cost,
                });
            }
        }

        table
    }

    /// Pick an entry from a price table
    pub fn rank(&mut self, table: &[PriceEntry], policy: SelectPolicy) -> Option<PriceEntry> {
        let mut affordable = table.iter().filter(|e| e.is_purchasable());
        match policy {
            SelectPolicy::CheapestFirst => affordable
                .filter(|e| e.cost > 0)
                .fold(None, |best: Option<&PriceEntry>, e| match best {
                    Some(b) if b.cost <= e.cost => Some(b),
                    _ => Some(e),
                })
                .copied(),
            SelectPolicy::DearestFirst => affordable
                .filter(|e| e.cost > 0)
                .fold(None, |best: Option<&PriceEntry>, e| match best {
                    Some(b) if b.cost >= e.cost => Some(b),
                    _ => Some(e),
                })
                .copied(),
            SelectPolicy::FindMaxValue => affordable
                .fold(None, |best: Option<&PriceEntry>, e| match best {
                    Some(b) if b.value >= e.value => Some(b),
                    _ => Some(e),
                })
                .copied(),
            SelectPolicy::FirstValid => affordable.next().copied(),
            SelectPolicy::RandomChoice => {
                for _ in 0..self.config.random_select_tries {
                    let &entry = self.rng.choose(table)?;
                    if entry.is_purchasable() {
                        return Some(entry);
                    }
                }
                None
            }
        }
    }

    /// Choose one of `candidates` under `policy`.
    ///
    /// On success returns the chosen quality and writes the value to buy it
    /// at to `max_value`: the magnitude, or for a resistance the step count
    /// the simulation settled on. Nothing is bought.
    pub fn select_property(
        &mut self,
        item: &Jewel,
        candidates: &[Quality],
        max_value: &mut i32,
        policy: SelectPolicy,
    ) -> Option<Quality> {
        let table = self.price_table(item, candidates, *max_value);
        let pick = self.rank(&table, policy)?;
        *max_value = pick.commit;
        Some(pick.quality)
    }

    /// Select and then buy for real
    pub fn buy_selected(
        &mut self,
        item: &mut Jewel,
        candidates: &[Quality],
        max_value: i32,
        policy: SelectPolicy,
        on_credit: bool,
    ) -> Option<(Quality, i32)> {
        let mut value = max_value;
        let quality = self.select_property(item, candidates, &mut value, policy)?;
        self.get_quality(item, quality, value, on_credit)
            .then_some((quality, value))
    }

    /// Highest affordable value of a single quality, up to `cap`
    pub fn max_affordable(&mut self, item: &Jewel, quality: Quality, cap: i32) -> Option<i32> {
        let mut value = cap;
        self.select_property(item, &[quality], &mut value, SelectPolicy::FindMaxValue)
            .map(|_| value)
    }
}

/// Resistance step counts are read back off the simulated jewel; every
/// other quality is bought at the requested value
fn committed_value(before: &Jewel, after: &Jewel, quality: Quality, value: i32) -> i32 {
    match quality {
        Quality::Resist(_) | Quality::Vuln(_) => {
            (after.value_of(quality) - before.value_of(quality)).abs() / RES_STEP
        }
        _ => value,
    }
}
