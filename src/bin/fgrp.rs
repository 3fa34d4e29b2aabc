//! fgrp CLI - group and rename imaging frames by capture date
//!
//! Walks a capture tree, pairs every LIGHT folder with its FLAT sibling,
//! groups frames by calibration date, and prefixes each filename with its
//! zero-padded group number. Planning is separated from execution, so
//! `--dry-run` prints the full rename mapping without touching the disk.

// Exclude from coverage - CLI binary tested via integration tests
#![cfg_attr(tarpaulin, ignore)]

use anyhow::Context;
use clap::{Parser, ValueEnum};
use frame_grouper::core::{
    apply_plan, Config, DefaultScanner, GroupLogic, GroupingConfig, GroupingEngine, RunSummary,
};
use std::path::PathBuf;

/// Group and rename LIGHT/FLAT files by capture date.
#[derive(Parser, Debug)]
#[command(name = "fgrp")]
#[command(version = frame_grouper::VERSION)]
#[command(about = "Group and rename LIGHT/FLAT frames by capture date")]
#[command(after_help = "EXAMPLES:
  # Group a whole target tree, FLAT dates as boundaries
  fgrp WitchHead

  # Split sessions at the midpoint between FLAT dates
  fgrp WitchHead --logic midpoint

  # Continue numbering from an earlier run
  fgrp WitchHead --start-index 5

  # See the mapping without renaming anything
  fgrp WitchHead --dry-run

GROUPING LOGIC:
  direct    lights taken on or after a FLAT date and before the next FLAT
            date share that FLAT's group
  midpoint  boundaries sit halfway between consecutive FLAT dates; a light
            exactly on a boundary joins the later group
")]
struct Cli {
    /// Root directory where the LIGHT/FLAT folder structure begins
    #[arg(value_name = "ROOT")]
    root: PathBuf,

    /// Grouping logic [direct, midpoint]
    #[arg(long = "logic", value_enum, value_name = "LOGIC")]
    logic: Option<LogicArg>,

    /// Starting group index (default: 1)
    #[arg(long = "start-index", value_name = "N")]
    start_index: Option<usize>,

    /// Only consider files matching pattern (glob, repeatable)
    #[arg(long = "include", value_name = "PATTERN", num_args = 0..)]
    include: Vec<String>,

    /// Config file path (default: ROOT/.fgrp.json when present)
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print the rename mapping without touching the disk
    #[arg(long = "dry-run")]
    dry_run: bool,
}

/// CLI mirror of the boundary policy
#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogicArg {
    /// FLAT dates themselves are the group boundaries
    Direct,
    /// Boundaries at midpoints between consecutive FLAT dates
    Midpoint,
}

impl From<LogicArg> for GroupLogic {
    fn from(arg: LogicArg) -> Self {
        match arg {
            LogicArg::Direct => GroupLogic::Direct,
            LogicArg::Midpoint => GroupLogic::Midpoint,
        }
    }
}

fn build_config(cli: &Cli) -> anyhow::Result<GroupingConfig> {
    let mut config = GroupingConfig::default();
    if let Some(logic) = cli.logic {
        config.logic = logic.into();
    }
    if let Some(start) = cli.start_index {
        config.start_index = start;
    }
    config.include = cli.include.clone();

    // An explicit --config must exist; the per-root file is optional.
    let file_path = match &cli.config {
        Some(path) => Some(path.clone()),
        None => {
            let default = cli.root.join(".fgrp.json");
            default.is_file().then_some(default)
        }
    };
    if let Some(path) = file_path {
        let file = Config::load(&path)
            .with_context(|| format!("loading config file {}", path.display()))?;
        config = config
            .merged_with(&file, cli.logic.is_some(), cli.start_index.is_some())
            .with_context(|| format!("invalid config file {}", path.display()))?;
    }

    Ok(config)
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = build_config(&cli)?;
    let engine = GroupingEngine::new(config).context("invalid configuration")?;
    let scanner = DefaultScanner::new();

    let root_plan = engine
        .plan_root(&scanner, &cli.root)
        .with_context(|| format!("scanning {}", cli.root.display()))?;

    let mut summary = RunSummary {
        folders_skipped: root_plan.skipped,
        anomalies: root_plan.anomalies,
        ..Default::default()
    };

    for folder in &root_plan.folders {
        eprintln!("\nProcessing filter folder: {}", folder.light_dir.display());
        summary.folders_processed += 1;
        summary.anomalies.extend(folder.plan.anomalies.iter().cloned());

        if cli.dry_run {
            for entry in &folder.plan.entries {
                println!("{} -> {}", entry.original.display(), entry.new_name);
            }
        } else {
            let outcome = apply_plan(&folder.plan);
            summary.flats_renamed += outcome.flats_renamed;
            summary.lights_renamed += outcome.lights_renamed;
            summary.anomalies.extend(outcome.anomalies);
        }
    }

    summary.report();
    Ok(())
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
