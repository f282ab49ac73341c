//! Core design constants
//!
//! Array sizes, resistance bands and budget limits shared by every pass.

/// Number of primary stats
pub const STAT_MAX: usize = 6;

/// Number of "other" pval bonuses (magic mastery .. shots)
pub const BONUS_MAX: usize = 8;

/// Number of slays
pub const SLAY_MAX: usize = 8;

/// Number of brands
pub const BRAND_MAX: usize = 5;

/// Number of percentage resistances
pub const RESIST_MAX: usize = 14;

/// Neutral slay/brand multiple
pub const MULTIPLE_BASE: i32 = 1;

/// Neutral resistance; lower is better, higher is a vulnerability
pub const RES_LEVEL_BASE: i32 = 100;

/// Best resistance an item may grant
pub const RES_CAP_ITEM: i32 = 20;

/// Worst vulnerability an item may carry
pub const RES_LEVEL_MAX: i32 = 150;

/// Resistance moves in steps of this many percent
pub const RES_STEP: i32 = 10;

/// Highest stat or non-speed bonus a finished jewel may keep
pub const BONUS_CAP: i32 = 6;

/// Hard ceiling on allocated potential
pub const MAX_POTENTIAL: i32 = 8000;

/// Cost marker for a simulated purchase that failed
pub const TOO_EXPENSIVE: i32 = i32::MAX;

/// Random-choice selector gives up after this many draws
pub const RANDOM_SELECT_TRIES: u32 = 20;
