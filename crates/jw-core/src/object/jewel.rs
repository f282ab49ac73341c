//! Jewel instances: the ring or amulet being designed

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use super::{Activation, CurseFlags, ObjFlags};
use crate::consts::{
    BONUS_MAX, BRAND_MAX, MULTIPLE_BASE, RES_LEVEL_BASE, RESIST_MAX, SLAY_MAX, STAT_MAX,
};
use crate::design::Theme;

/// Base object kind
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
#[repr(u8)]
pub enum JewelKind {
    #[default]
    Ring = 0,
    Amulet = 1,
}

/// Primary stats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
#[repr(u8)]
pub enum Stat {
    Str = 0,
    Int = 1,
    Wis = 2,
    Dex = 3,
    Con = 4,
    Chr = 5,
}

/// Pval bonuses other than stats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
#[repr(u8)]
pub enum Bonus {
    MagicMastery = 0,
    Stealth = 1,
    Search = 2,
    Infra = 3,
    Tunnel = 4,
    Speed = 5,
    Might = 6,
    Shots = 7,
}

/// Monster races a jewel can slay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
#[repr(u8)]
pub enum Slay {
    Animal = 0,
    Evil = 1,
    Undead = 2,
    Demon = 3,
    Orc = 4,
    Troll = 5,
    Giant = 6,
    Dragon = 7,
}

/// Elemental brands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
#[repr(u8)]
pub enum Brand {
    Acid = 0,
    Elec = 1,
    Fire = 2,
    Cold = 3,
    Poison = 4,
}

/// Percentage resistances
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
#[repr(u8)]
pub enum Resist {
    Acid = 0,
    Elec = 1,
    Fire = 2,
    Cold = 3,
    Poison = 4,
    Light = 5,
    Dark = 6,
    Confusion = 7,
    Sound = 8,
    Shards = 9,
    Nexus = 10,
    Nether = 11,
    Chaos = 12,
    Disenchant = 13,
}

impl Stat {
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl Bonus {
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl Slay {
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl Brand {
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl Resist {
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Proofing flag earned by resisting this element, if any
    pub const fn ignore_flag(self) -> Option<ObjFlags> {
        match self {
            Resist::Acid => Some(ObjFlags::IGNORE_ACID),
            Resist::Elec => Some(ObjFlags::IGNORE_ELEC),
            Resist::Fire => Some(ObjFlags::IGNORE_FIRE),
            Resist::Cold => Some(ObjFlags::IGNORE_COLD),
            _ => None,
        }
    }
}

/// A ring or amulet under construction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Jewel {
    /// Ring or amulet
    pub kind: JewelKind,

    /// Sub-type within the kind; themes may restrict their sval range
    pub sval: u8,

    /// Chosen theme, once the theme script has run
    pub theme: Option<Theme>,

    /// Depth the jewel was designed for
    pub level: i32,

    pub bonus_stat: [i32; STAT_MAX],
    pub bonus_other: [i32; BONUS_MAX],
    pub multiple_slay: [i32; SLAY_MAX],
    pub multiple_brand: [i32; BRAND_MAX],

    /// Percent of damage taken; `RES_LEVEL_BASE` is neutral
    pub percent_res: [i32; RESIST_MAX],

    pub flags: ObjFlags,
    pub curses: CurseFlags,

    pub activation: Option<Activation>,
    /// Fixed part of the recharge time
    pub time_base: i32,
    /// Random part of the recharge time (1d`time_dice`)
    pub time_dice: i32,

    pub to_h: i32,
    pub to_d: i32,
    pub to_a: i32,
}

impl Jewel {
    /// A blank jewel of the given base type
    pub fn new(kind: JewelKind, sval: u8) -> Self {
        Self {
            kind,
            sval,
            theme: None,
            level: 0,
            bonus_stat: [0; STAT_MAX],
            bonus_other: [0; BONUS_MAX],
            multiple_slay: [MULTIPLE_BASE; SLAY_MAX],
            multiple_brand: [MULTIPLE_BASE; BRAND_MAX],
            percent_res: [RES_LEVEL_BASE; RESIST_MAX],
            flags: ObjFlags::empty(),
            curses: CurseFlags::empty(),
            activation: None,
            time_base: 0,
            time_dice: 0,
            to_h: 0,
            to_d: 0,
            to_a: 0,
        }
    }

    /// Clear every magical property, keeping only the base type
    pub fn wipe(&mut self) {
        *self = Self::new(self.kind, self.sval);
    }

    pub fn stat(&self, stat: Stat) -> i32 {
        self.bonus_stat[stat.index()]
    }

    pub fn bonus(&self, bonus: Bonus) -> i32 {
        self.bonus_other[bonus.index()]
    }

    pub fn resist(&self, resist: Resist) -> i32 {
        self.percent_res[resist.index()]
    }

    pub fn has_flag(&self, flag: ObjFlags) -> bool {
        self.flags.contains(flag)
    }

    pub fn has_curse(&self, curse: CurseFlags) -> bool {
        self.curses.contains(curse)
    }

    pub fn is_cursed(&self) -> bool {
        !self.curses.is_empty()
    }

    /// True if the stat bonus is positive
    pub fn boosts_stat(&self, stat: Stat) -> bool {
        self.stat(stat) > 0
    }

    /// True if the jewel reduces damage from this element
    pub fn resists(&self, resist: Resist) -> bool {
        self.resist(resist) < RES_LEVEL_BASE
    }

    /// True if the jewel increases damage from this element
    pub fn is_vulnerable(&self, resist: Resist) -> bool {
        self.resist(resist) > RES_LEVEL_BASE
    }

    /// Largest positive pval on the jewel, 0 if none
    pub fn max_pval(&self) -> i32 {
        self.bonus_stat
            .iter()
            .chain(self.bonus_other.iter())
            .copied()
            .max()
            .unwrap_or(0)
            .max(0)
    }

    pub fn clear_activation(&mut self) {
        self.activation = None;
        self.time_base = 0;
        self.time_dice = 0;
    }
}
