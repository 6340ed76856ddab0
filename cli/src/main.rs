mod catalog;
mod chart;
mod input;
mod list;
mod logging;

use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use clap::Parser;
use log::{info, warn};
use symptomlog_core::{
    default_range, parse_human_day, time::today, Config, FileBlobStore, SymptomEntry, SymptomFilter,
    SymptomLogError, SymptomStore, TimeSeriesBuilder, SEVERITY_RANGE,
};

use crate::catalog::{resolve_symptom, SYMPTOM_CATALOG};
use crate::input::{expand_key, parse_args, parse_yes_no};

#[derive(Parser)]
#[command(name = "symptomlog")]
#[command(about = "Log symptoms by day and chart them over time", long_about = None)]
struct Cli {
    /// Directory holding the symptom log [default: $SYMPTOMLOG_DATA_DIR, then ~/.symptomlog]
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// trace|debug|info|warn|error|off
    #[arg(long, global = true, env = "SYMPTOMLOG_LOG", default_value = logging::DEFAULT_LOG_LEVEL)]
    log_level: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Show the numbered symptom catalog
    Catalog,
    /// Log a symptom (usage: add 6 sev:7 still:yes note:"after lunch" date:yesterday)
    Add {
        /// Catalog number or free text, plus key:value details
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// List logged symptoms, newest day first
    List,
    /// Delete an entry by day and its number in `list`
    Delete {
        /// Day of the entry (YYYY-MM-DD, today, yesterday, -3d)
        day: String,
        /// Entry number as shown by `list`
        index: usize,
    },
    /// Severity per day for a date range
    Chart {
        /// First day (default: one month ago)
        #[arg(long)]
        from: Option<String>,
        /// Last day, inclusive (default: today)
        #[arg(long)]
        to: Option<String>,
        /// Symptom to include; catalog number or text. Repeatable.
        #[arg(long = "symptom", short = 's')]
        symptoms: Vec<String>,
        /// Print points as JSON
        #[arg(long, conflicts_with = "tui")]
        json: bool,
        /// Open the interactive chart
        #[arg(long)]
        tui: bool,
    },
}

const ADD_KEYS: [&str; 4] = ["severity", "still", "note", "date"];

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::resolve(cli.data_dir)?;

    let full_screen = matches!(cli.command, Some(Commands::Chart { tui: true, .. }));
    let log_dir = config.data_dir.join("logs");
    let _logger = logging::init_logging(&cli.log_level, full_screen.then_some(log_dir.as_path()))?;
    info!("using data directory {}", config.data_dir.display());

    let backend = FileBlobStore::new(Some(config.data_dir.clone()))?;
    let mut store = SymptomStore::with_key(backend, config.blob_key.clone());
    store.load();

    let today = today();

    match cli.command {
        Some(Commands::Catalog) => {
            for (i, label) in SYMPTOM_CATALOG.iter().enumerate() {
                println!("{:>2}. {}", i + 1, label);
            }
        }
        Some(Commands::Add { args }) => {
            let entry_and_day = build_entry(&args, today)?;
            let Some((day, entry)) = entry_and_day else {
                return Ok(());
            };
            println!("Logged: {} (severity {}/10) on {}", entry.symptom, entry.severity, day);
            store.add(day, entry);
        }
        Some(Commands::List) => {
            list::show_log(&store);
        }
        Some(Commands::Delete { day, index }) => {
            let day = parse_human_day(&day, today)?;
            if index == 0 {
                return Err(anyhow!("Entry numbers start at 1"));
            }
            match store.try_delete(day, index - 1) {
                Ok(removed) => println!("Deleted: {} on {}", removed.symptom, day),
                Err(SymptomLogError::IndexOutOfRange { len, .. }) => {
                    println!("No entry {} on {} ({} recorded).", index, day, len);
                }
                Err(e) => warn!("entry removed but not saved: {}", e),
            }
        }
        Some(Commands::Chart { from, to, symptoms, json, tui }) => {
            let (default_start, default_end) = default_range(today);
            let start = parse_day_or(from.as_deref(), default_start, today)?;
            let end = parse_day_or(to.as_deref(), default_end, today)?;
            let filter: SymptomFilter = symptoms.iter().map(|s| resolve_symptom(s)).collect();

            if tui {
                let mut app = chart::ChartApp::new(store.log(), start, end, filter);
                chart::run(&mut app)?;
            } else {
                if start > end {
                    println!("Start date {} is after end date {}.", start, end);
                }
                let points = TimeSeriesBuilder::new(store.log()).build(start, end, &filter);
                if json {
                    chart::print_json(&points)?;
                } else {
                    chart::print_table(&points);
                }
            }
        }
        None => {
            list::show_log(&store);
        }
    }
    Ok(())
}

fn parse_day_or(input: Option<&str>, default: NaiveDate, today: NaiveDate) -> Result<NaiveDate> {
    match input {
        Some(s) => parse_human_day(s, today),
        None => Ok(default),
    }
}

/// Turns `add` arguments into an entry. `Ok(None)` means the input was
/// rejected and a message has already been printed.
fn build_entry(args: &[String], today: NaiveDate) -> Result<Option<(NaiveDate, SymptomEntry)>> {
    let parsed = parse_args(args);
    if parsed.name.trim().is_empty() {
        println!("Error: a symptom is required. See `symptomlog catalog`.");
        return Ok(None);
    }

    let mut details = HashMap::new();
    for (key, value) in parsed.metadata {
        match expand_key(&key, &ADD_KEYS) {
            Ok(full_key) => {
                details.insert(full_key, value);
            }
            Err(e) => println!("Warning: {}", e),
        }
    }

    let severity = match details.get("severity") {
        Some(s) => match s.trim().parse::<u8>() {
            Ok(v) if SEVERITY_RANGE.contains(&v) => v,
            _ => {
                println!("Error: severity must be between 1 and 10, got '{}'.", s);
                return Ok(None);
            }
        },
        None => *SEVERITY_RANGE.start(),
    };
    let still = match details.get("still") {
        Some(v) => parse_yes_no(v)?,
        None => false,
    };
    let day = match details.get("date") {
        Some(d) => parse_human_day(d, today)?,
        None => today,
    };
    let note = details.get("note").cloned().unwrap_or_default();

    let entry = SymptomEntry::new(resolve_symptom(&parsed.name), severity)
        .with_note(note)
        .with_still_experiencing(still);
    Ok(Some((day, entry)))
}
