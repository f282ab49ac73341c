//! Activation effects a jewel may carry
//!
//! Each effect has an intrinsic power rating used to price it, and a
//! recharge timing pair (fixed turns plus a random die).

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
pub enum Activation {
    Light,
    DetectMonsters,
    DetectAll,
    MagicMapping,
    StoneToMud,
    Blink,
    Teleport,
    Recall,
    CureLight,
    CureSerious,
    Heal,
    Restoration,
    SatisfyHunger,
    RemoveCurse,
    Identify,
    ResistHeatCold,
    ResistAcidElec,
    ResistAll,
    Haste,
    Berserk,
    ProtectFromEvil,
    AcidBolt,
    ElecBolt,
    FireBolt,
    FrostBolt,
    StinkingCloud,
    AcidBall,
    ElecBall,
    FireBall,
    FrostBall,
    DispelEvil,
}

/// Static data for one activation
#[derive(Debug, Clone, Copy)]
pub struct ActivationDef {
    pub activation: Activation,
    /// Intrinsic power; price is power times the activation cost multiplier
    pub power: i32,
    pub time_base: i32,
    pub time_dice: i32,
    /// Blocked by the no-teleport curse
    pub teleport: bool,
}

const fn def(
    activation: Activation,
    power: i32,
    time_base: i32,
    time_dice: i32,
    teleport: bool,
) -> ActivationDef {
    ActivationDef {
        activation,
        power,
        time_base,
        time_dice,
        teleport,
    }
}

/// Power table, in enum order
pub const ACTIVATIONS: &[ActivationDef] = &[
    def(Activation::Light, 2, 10, 10, false),
    def(Activation::DetectMonsters, 5, 50, 50, false),
    def(Activation::DetectAll, 15, 55, 55, false),
    def(Activation::MagicMapping, 12, 50, 50, false),
    def(Activation::StoneToMud, 6, 5, 5, false),
    def(Activation::Blink, 4, 10, 10, true),
    def(Activation::Teleport, 8, 45, 45, true),
    def(Activation::Recall, 15, 200, 0, true),
    def(Activation::CureLight, 5, 30, 30, false),
    def(Activation::CureSerious, 10, 60, 60, false),
    def(Activation::Heal, 25, 300, 0, false),
    def(Activation::Restoration, 20, 400, 0, false),
    def(Activation::SatisfyHunger, 5, 100, 0, false),
    def(Activation::RemoveCurse, 15, 500, 0, false),
    def(Activation::Identify, 10, 10, 0, false),
    def(Activation::ResistHeatCold, 10, 111, 111, false),
    def(Activation::ResistAcidElec, 10, 111, 111, false),
    def(Activation::ResistAll, 20, 200, 100, false),
    def(Activation::Haste, 25, 150, 150, false),
    def(Activation::Berserk, 8, 100, 100, false),
    def(Activation::ProtectFromEvil, 15, 225, 225, false),
    def(Activation::AcidBolt, 9, 10, 10, false),
    def(Activation::ElecBolt, 8, 10, 10, false),
    def(Activation::FireBolt, 8, 10, 10, false),
    def(Activation::FrostBolt, 8, 10, 10, false),
    def(Activation::StinkingCloud, 4, 12, 0, false),
    def(Activation::AcidBall, 15, 40, 40, false),
    def(Activation::ElecBall, 15, 40, 40, false),
    def(Activation::FireBall, 15, 40, 40, false),
    def(Activation::FrostBall, 15, 40, 40, false),
    def(Activation::DispelEvil, 25, 300, 300, false),
];

/// Activations handed out at random by the enrichment pass
pub const RAND_ACTIVATIONS: &[Activation] = &[
    Activation::Light,
    Activation::DetectMonsters,
    Activation::StoneToMud,
    Activation::Blink,
    Activation::CureLight,
    Activation::SatisfyHunger,
    Activation::ResistHeatCold,
    Activation::ResistAcidElec,
    Activation::Berserk,
    Activation::AcidBolt,
    Activation::ElecBolt,
    Activation::FireBolt,
    Activation::FrostBolt,
    Activation::StinkingCloud,
];

impl Activation {
    pub fn def(self) -> &'static ActivationDef {
        &ACTIVATIONS[self as usize]
    }

    pub fn power(self) -> i32 {
        self.def().power
    }

    /// True for effects the no-teleport curse forbids
    pub fn is_teleport(self) -> bool {
        self.def().teleport
    }
}
