use jw_core::design::{
    DesignConfig, DesignContext, DesignError, Ledger, Quality, THEME_CATALOG, Theme, ThemeDef,
    resolve_contradictions,
};
use jw_core::object::{Bonus, CurseFlags, Jewel, JewelKind, ObjFlags, Resist, Stat};
use jw_core::{GameRng, RES_CAP_ITEM, design_ring_or_amulet, design_with};

fn run_theme(theme: Theme, kind: JewelKind, potential: i32, seed: u64) -> (Jewel, bool, i32) {
    let mut rng = GameRng::new(seed);
    let config = DesignConfig::default();
    let mut ctx = DesignContext::new(Ledger::with_potential(potential), &mut rng, &config, THEME_CATALOG);
    let mut item = Jewel::new(kind, 0);
    let ok = ctx.run_theme(&mut item, theme);
    (item, ok, ctx.potential())
}

#[test]
fn test_speed_ring_takes_at_most_one_secondary() {
    let misc = [
        ObjFlags::FREE_ACT,
        ObjFlags::SEE_INVIS,
        ObjFlags::FEATHER,
        ObjFlags::REGEN,
        ObjFlags::SEEING,
    ];
    let base = [Resist::Acid, Resist::Elec, Resist::Fire, Resist::Cold];

    for seed in 0..64 {
        let (ring, ok, potential) = run_theme(Theme::RingSpeed, JewelKind::Ring, 4000, seed);
        assert!(ok);
        assert!(ring.bonus(Bonus::Speed) > 0);
        assert!(potential >= 0);

        let combat = usize::from(ring.to_h > 0 || ring.to_d > 0);
        let resists = base.iter().filter(|&&r| ring.resists(r)).count();
        let flags = misc.iter().filter(|&&f| ring.has_flag(f)).count();
        assert!(combat + resists + flags <= 1, "seed {seed}: {ring:?}");
    }
}

#[test]
fn test_doom_amulet_on_a_shoestring() {
    for seed in 0..32 {
        let (amulet, ok, potential) = run_theme(Theme::AmuletDoom, JewelKind::Amulet, 50, seed);
        assert!(ok);
        assert!(amulet.has_curse(CurseFlags::STICKY_WIELD));
        let penalty = amulet.stat(Stat::Str);
        assert!(penalty < 0);
        assert!(amulet.bonus_stat.iter().all(|&v| v == penalty));
        // Curses and penalties only pay in
        assert!(potential > 50);
    }
}

#[test]
fn test_fully_resisted_fire_cannot_be_bought() {
    let mut rng = GameRng::new(0);
    let config = DesignConfig::default();
    let mut ctx = DesignContext::new(Ledger::with_potential(5000), &mut rng, &config, THEME_CATALOG);
    let mut ring = Jewel::new(JewelKind::Ring, 0);
    ring.percent_res[Resist::Fire.index()] = RES_CAP_ITEM;
    let before = ring.clone();

    assert!(!ctx.get_quality(&mut ring, Quality::Resist(Resist::Fire), 0, false));
    assert!(!ctx.get_quality(&mut ring, Quality::Resist(Resist::Fire), 3, true));
    assert_eq!(ring, before);
    assert_eq!(ctx.potential(), 5000);
}

#[test]
fn test_aggravation_zeroes_stealth() {
    let mut ring = Jewel::new(JewelKind::Ring, 0);
    ring.bonus_other[Bonus::Stealth.index()] = 3;
    ring.curses.insert(CurseFlags::AGGRO_PERM);
    resolve_contradictions(&mut ring);
    assert_eq!(ring.bonus(Bonus::Stealth), 0);
}

#[test]
fn test_no_legal_theme_is_an_error() {
    let rings_only: Vec<ThemeDef> = THEME_CATALOG
        .iter()
        .copied()
        .filter(|d| d.kind == JewelKind::Ring)
        .collect();
    let mut amulet = Jewel::new(JewelKind::Amulet, 4);
    let result = design_with(
        &mut amulet,
        20,
        &mut GameRng::new(1),
        &DesignConfig::default(),
        &rings_only,
    );
    assert_eq!(
        result,
        Err(DesignError::NoLegalTheme {
            kind: JewelKind::Amulet,
            sval: 4
        })
    );
}

#[test]
fn test_unreachable_gate_falls_back_to_plain_jewel() {
    let esp_only: Vec<ThemeDef> = THEME_CATALOG
        .iter()
        .copied()
        .filter(|d| d.theme == Theme::AmuletEsp)
        .collect();
    let config = DesignConfig {
        max_theme_attempts: 5,
        ..DesignConfig::default()
    };
    let mut amulet = Jewel::new(JewelKind::Amulet, 0);
    let summary = design_with(&mut amulet, 1, &mut GameRng::new(9), &config, &esp_only).unwrap();
    assert_eq!(summary.theme, None);
    assert_eq!(summary.theme_attempts, 5);
    assert!(!amulet.has_flag(ObjFlags::TELEPATHY) || summary.initial_potential >= 3000);
}

#[test]
fn test_deep_jewels_get_themes() {
    let mut themed = 0;
    for seed in 0..40 {
        let mut ring = Jewel::new(JewelKind::Ring, 0);
        let summary = design_ring_or_amulet(&mut ring, 80, &mut GameRng::new(seed)).unwrap();
        assert!(summary.final_potential >= 0);
        if summary.theme.is_some() {
            themed += 1;
        }
    }
    // Several ring themes have no gate at all
    assert_eq!(themed, 40);
}

#[test]
fn test_summary_serializes() {
    let mut amulet = Jewel::new(JewelKind::Amulet, 0);
    let summary = design_ring_or_amulet(&mut amulet, 25, &mut GameRng::new(3)).unwrap();
    let json = serde_json::to_string(&summary).unwrap();
    assert!(json.contains("initial_potential"));
    let jewel_json = serde_json::to_string(&amulet).unwrap();
    let back: Jewel = serde_json::from_str(&jewel_json).unwrap();
    assert_eq!(back, amulet);
}
