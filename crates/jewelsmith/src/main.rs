//! jewelsmith: generate roguelike rings and amulets from the command line

use std::error::Error;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use serde_json::json;
use strum::IntoEnumIterator;
use tracing_subscriber::EnvFilter;

use jw_core::object::{Bonus, Brand, Resist, Slay, Stat};
use jw_core::{DesignConfig, DesignSummary, GameRng, Jewel, JewelKind, RES_LEVEL_BASE, design_with};
use jw_core::design::THEME_CATALOG;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Kind {
    Ring,
    Amulet,
}

impl From<Kind> for JewelKind {
    fn from(kind: Kind) -> Self {
        match kind {
            Kind::Ring => JewelKind::Ring,
            Kind::Amulet => JewelKind::Amulet,
        }
    }
}

/// Generate rings and amulets against a depth-derived power budget
#[derive(Parser, Debug)]
#[command(name = "jewelsmith")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// RNG seed (random if omitted)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Dungeon level the jewels are made for
    #[arg(short, long, default_value = "10")]
    depth: i32,

    /// Number of jewels to generate
    #[arg(short = 'n', long, default_value = "1")]
    count: usize,

    /// Base type
    #[arg(short, long, value_enum, default_value = "ring")]
    kind: Kind,

    /// Sub-type within the base type
    #[arg(long, default_value = "0")]
    sval: u8,

    /// JSON design config; missing fields take their defaults
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print JSON instead of a text report
    #[arg(long)]
    json: bool,

    /// Debug logging (RUST_LOG overrides)
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("jewelsmith: {err}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init();
}

fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    let config = match &args.config {
        Some(path) => DesignConfig::from_json(&fs::read_to_string(path)?)?,
        None => DesignConfig::default(),
    };
    let mut rng = args.seed.map_or_else(GameRng::from_entropy, GameRng::new);
    tracing::info!(seed = rng.seed(), depth = args.depth, "generating");

    let mut designed = Vec::with_capacity(args.count);
    for _ in 0..args.count {
        let mut jewel = Jewel::new(args.kind.into(), args.sval);
        let summary = design_with(&mut jewel, args.depth, &mut rng, &config, THEME_CATALOG)?;
        designed.push((jewel, summary));
    }

    if args.json {
        let out: Vec<_> = designed
            .iter()
            .map(|(jewel, summary)| json!({ "summary": summary, "jewel": jewel }))
            .collect();
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        for (jewel, summary) in &designed {
            print_report(jewel, summary);
        }
    }
    Ok(())
}

fn print_report(jewel: &Jewel, summary: &DesignSummary) {
    let name = match summary.theme {
        Some(theme) => theme.to_string(),
        None => format!("Plain {}", jewel.kind),
    };
    let tag = match (summary.corrupted, jewel.is_cursed()) {
        (true, _) => " [corrupted]",
        (false, true) => " [cursed]",
        (false, false) => "",
    };
    println!(
        "{name}{tag}  (level {}, potential {} -> {})",
        jewel.level,
        summary.initial_potential,
        summary.final_potential,
    );

    let mut lines = Vec::new();
    for stat in Stat::iter().filter(|&s| jewel.stat(s) != 0) {
        lines.push(format!("{stat} {:+}", jewel.stat(stat)));
    }
    for bonus in Bonus::iter().filter(|&b| jewel.bonus(b) != 0) {
        lines.push(format!("{bonus} {:+}", jewel.bonus(bonus)));
    }
    for slay in Slay::iter().filter(|&s| jewel.multiple_slay[s.index()] > 1) {
        lines.push(format!("slay {slay} x{}", jewel.multiple_slay[slay.index()]));
    }
    for brand in Brand::iter().filter(|&b| jewel.multiple_brand[b.index()] > 1) {
        lines.push(format!("brand {brand} x{}", jewel.multiple_brand[brand.index()]));
    }
    for resist in Resist::iter().filter(|&r| jewel.resist(r) != RES_LEVEL_BASE) {
        let label = if jewel.resists(resist) { "resist" } else { "vulnerable" };
        lines.push(format!("{label} {resist} {}%", jewel.resist(resist)));
    }
    if jewel.to_h != 0 || jewel.to_d != 0 {
        lines.push(format!("({:+},{:+})", jewel.to_h, jewel.to_d));
    }
    if jewel.to_a != 0 {
        lines.push(format!("[{:+}]", jewel.to_a));
    }
    lines.extend(jewel.flags.iter_names().map(|(name, _)| name.to_lowercase()));
    lines.extend(jewel.curses.iter_names().map(|(name, _)| format!("curse {}", name.to_lowercase())));
    if let Some(activation) = jewel.activation {
        lines.push(format!(
            "activates for {activation} every {}+d{} turns",
            jewel.time_base, jewel.time_dice
        ));
    }

    for line in lines {
        println!("    {line}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_parse() {
        let args = Args::parse_from([
            "jewelsmith", "--seed", "5", "--depth", "30", "-n", "3", "--kind", "amulet", "--json",
        ]);
        assert_eq!(args.seed, Some(5));
        assert_eq!(args.depth, 30);
        assert_eq!(args.count, 3);
        assert!(matches!(args.kind, Kind::Amulet));
        assert!(args.json);
    }

    #[test]
    fn test_run_with_seed() {
        let args = Args::parse_from(["jewelsmith", "--seed", "1", "-n", "4", "--json"]);
        assert!(run(&args).is_ok());
    }

    #[test]
    fn test_text_report() {
        let args = Args::parse_from(["jewelsmith", "--seed", "2", "-n", "3", "--depth", "60"]);
        assert!(run(&args).is_ok());
    }

    #[test]
    fn test_missing_config_is_error() {
        let args = Args::parse_from(["jewelsmith", "--config", "/nonexistent/jewel.json"]);
        assert!(run(&args).is_err());
    }
}
