//! `railguard`: assess train compositions from the terminal.
//!
//! Wires the configured wagon catalog, rule tables and history file to the
//! safety core.

mod report;

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::Utc;
use clap::{Parser, Subcommand};
use log::info;

use railguard_core::prelude::*;
use railguard_core::train::import_wagon_entries;
use railguard_core::wagon::{decode_wagon_number, parse_wagon_number};

/// Train composition safety check
#[derive(Parser, Debug)]
#[command(name = "railguard", version)]
#[command(about = "Checks dangerous-goods separation and brake performance of a train", long_about = None)]
struct Args {
    /// Config file; defaults to railguard.yaml in the user data directory
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a config pointing at the data files in DATA_DIR
    Init {
        data_dir: PathBuf,
    },
    /// Resolve a composition draft, validate it and compute its brake
    /// performance
    Assess {
        /// Draft file (yaml or json)
        draft: PathBuf,
        /// CSV wagon list appended behind the draft's wagons
        #[arg(short, long)]
        wagons: Option<PathBuf>,
        /// Save the assessed train to history
        #[arg(short, long, default_value_t = false)]
        save: bool,
    },
    /// Decode a wagon number and show its technical sheet
    Wagon {
        number: String,
    },
    /// Browse saved trains
    History {
        #[command(subcommand)]
        command: HistoryCommand,
    },
}

#[derive(Subcommand, Debug)]
enum HistoryCommand {
    /// List saved trains, newest first
    List,
    /// Show a saved train
    Show {
        id: u64,
        /// Also write it out as a draft to edit and assess again
        #[arg(short, long)]
        export: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let level = if args.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let config_path = match &args.config {
        Some(path) => path.clone(),
        None => RailguardConfig::default_path()?,
    };
    let stdout = io::stdout();
    let mut out = stdout.lock();
    run(args.command, &config_path, &mut out)
}

fn load_config(config_path: &Path) -> anyhow::Result<RailguardConfig> {
    let config = RailguardConfig::load(config_path)
        .with_context(|| format!("run `railguard init <data dir>` to create {config_path:?}"))?;
    info!("Using config {:?}", config_path);
    Ok(config)
}

fn run<W: Write>(command: Command, config_path: &Path, out: &mut W) -> anyhow::Result<()> {
    match command {
        Command::Init { data_dir } => {
            RailguardConfig::in_dir(data_dir).to_file(config_path)?;
            writeln!(out, "Wrote {}", config_path.display())?;
        }
        Command::Assess {
            draft,
            wagons,
            save,
        } => {
            let config = load_config(config_path)?;
            let mut draft = CompositionDraft::from_file(&draft, false)?;
            if let Some(wagons) = wagons {
                draft.wagons.extend(import_wagon_entries(wagons)?);
            }
            let catalog = config.load_catalog()?;
            let composition = draft.resolve(&catalog)?;
            let rule_book = config.load_rule_book()?;
            let validator = SafetyValidator::new(&rule_book)?;
            let calculator = BrakeCalculator::new(&rule_book);
            let assessment = assess(&validator, &calculator, &composition)?;
            report::write_assessment(out, &composition, &assessment)?;

            if save {
                match (&assessment.train, &assessment.result) {
                    (Some(train), Some(result)) => {
                        let mut store = config.history_store()?;
                        let item = HistoryItem::new(&composition, train, result, Utc::now());
                        let id = store.save(item)?;
                        writeln!(out, "Saved to history as #{id}")?;
                    }
                    _ => writeln!(out, "Not saved: composition failed validation")?,
                }
            }
        }
        Command::Wagon { number } => {
            let parsed = parse_wagon_number(&number)?;
            let catalog = load_config(config_path)?.load_catalog()?;
            let spec = catalog.get_by_number(parsed)?;
            report::write_wagon(out, &decode_wagon_number(&number), &spec)?;
        }
        Command::History { command } => {
            let store = load_config(config_path)?.history_store()?;
            match command {
                HistoryCommand::List => report::write_history_list(out, &store.all()?)?,
                HistoryCommand::Show { id, export } => {
                    let item = store.get(id)?;
                    report::write_history_item(out, &item)?;
                    if let Some(path) = export {
                        item.to_composition().to_file(&path)?;
                        writeln!(out, "Exported to {}", path.display())?;
                    }
                }
            }
        }
    }
    Ok(())
}
