//! Object capability and curse flags

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use super::Stat;

bitflags! {
    /// Binary capabilities a jewel can grant
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct ObjFlags: u32 {
        // Sustains, one per stat in stat order
        const SUST_STR = 0x0000_0001;
        const SUST_INT = 0x0000_0002;
        const SUST_WIS = 0x0000_0004;
        const SUST_DEX = 0x0000_0008;
        const SUST_CON = 0x0000_0010;
        const SUST_CHR = 0x0000_0020;

        const SLOW_DIGEST = 0x0000_0040;
        const FEATHER = 0x0000_0080;
        const LIGHT = 0x0000_0100;
        const REGEN = 0x0000_0200;
        const TELEPATHY = 0x0000_0400;
        const SEE_INVIS = 0x0000_0800;
        const FREE_ACT = 0x0000_1000;
        const HOLD_LIFE = 0x0000_2000;
        const FEARLESS = 0x0000_4000;
        /// Protection from blindness
        const SEEING = 0x0000_8000;
        const PROT_CONF = 0x0001_0000;
        const PROT_STUN = 0x0002_0000;
        const DARKNESS = 0x0004_0000;

        // Elemental proofing
        const IGNORE_ACID = 0x0008_0000;
        const IGNORE_ELEC = 0x0010_0000;
        const IGNORE_FIRE = 0x0020_0000;
        const IGNORE_COLD = 0x0040_0000;

        const ALL_SUSTAINS = Self::SUST_STR.bits()
            | Self::SUST_INT.bits()
            | Self::SUST_WIS.bits()
            | Self::SUST_DEX.bits()
            | Self::SUST_CON.bits()
            | Self::SUST_CHR.bits();

        const ALL_IGNORES = Self::IGNORE_ACID.bits()
            | Self::IGNORE_ELEC.bits()
            | Self::IGNORE_FIRE.bits()
            | Self::IGNORE_COLD.bits();
    }
}

impl ObjFlags {
    /// Sustain flag protecting the given stat
    pub const fn sustain(stat: Stat) -> Self {
        match stat {
            Stat::Str => Self::SUST_STR,
            Stat::Int => Self::SUST_INT,
            Stat::Wis => Self::SUST_WIS,
            Stat::Dex => Self::SUST_DEX,
            Stat::Con => Self::SUST_CON,
            Stat::Chr => Self::SUST_CHR,
        }
    }
}

bitflags! {
    /// Curses; each one pays potential back to the jewel when bought
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct CurseFlags: u32 {
        /// Random teleportation
        const TELEPORT = 0x0000_0001;
        const NO_TELEPORT = 0x0000_0002;
        /// Permanent aggravation
        const AGGRO_PERM = 0x0000_0004;
        const AGGRO_RAND = 0x0000_0008;
        const SLOW_REGEN = 0x0000_0010;
        /// Permanent fear
        const AFRAID = 0x0000_0020;
        /// Fast digestion
        const HUNGRY = 0x0000_0040;
        const POIS_RAND = 0x0000_0080;
        const SIREN = 0x0000_0100;
        const HALLU_RAND = 0x0000_0200;
        /// Random paralysis
        const PARALYZE = 0x0000_0400;
        const DEMON_SUMMON = 0x0000_0800;
        const UNDEAD_SUMMON = 0x0000_1000;
        const IMPAIR_MANA = 0x0000_2000;
        const IMPAIR_HP = 0x0000_4000;
        const CUT_RAND = 0x0000_8000;
        const STICKY_CARRY = 0x0001_0000;
        /// Cannot be removed once worn
        const STICKY_WIELD = 0x0002_0000;
        /// Experience drain
        const DRAIN_EXP = 0x0004_0000;
    }
}
