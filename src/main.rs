use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use std::path::PathBuf;
use std::process;

use resistor_combo::config::{InventorySource, Mode, Settings, ValueSource};
use resistor_combo::report::{self, Format};
use resistor_combo::{Error, RSearch, RSeries};

/// Above this many combinations per topology a search is likely to feel slow.
const LARGE_SEARCH: u128 = 5_000_000;

#[derive(Parser)]
#[command(name = "resistor-combo")]
#[command(about = "Find series/parallel combinations of on-hand resistors close to a target value")]
#[command(version)]
struct Cli {
    /// YAML settings file; command line flags take precedence over it
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Comma separated resistor values, e.g. "330, 4K7, 1000"
    #[arg(short, long, conflicts_with = "series")]
    inventory: Option<String>,

    /// Use a standard series (E3, E6, E12, E24, E48, E96, E192) as the inventory
    #[arg(short, long)]
    series: Option<String>,

    /// Target resistance in ohms (accepts 4K7 notation)
    #[arg(short, long)]
    target: Option<String>,

    /// Tolerance in percent
    #[arg(long)]
    tolerance: Option<f64>,

    /// Maximum number of resistors per combination
    #[arg(short = 'n', long)]
    max_size: Option<usize>,

    /// Which connections to search
    #[arg(short, long, value_enum)]
    mode: Option<Mode>,

    /// Number of matches to show per connection type
    #[arg(long)]
    top: Option<usize>,

    /// Output format
    #[arg(short, long, value_enum)]
    format: Option<Format>,

    /// Print the available standard series and exit
    #[arg(long)]
    list_series: bool,

    /// More logging (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn settings(&self) -> Result<Settings, Error> {
        let mut s = match &self.config {
            Some(path) => Settings::load(path)?,
            None => Settings::default(),
        };
        if let Some(text) = &self.inventory {
            s.inventory = InventorySource::Text(text.clone());
            s.series = None;
        }
        if let Some(name) = &self.series {
            s.series = Some(name.clone());
        }
        if let Some(text) = &self.target {
            s.target = ValueSource::Text(text.clone());
        }
        if let Some(t) = self.tolerance {
            s.tolerance_percent = t;
        }
        if let Some(n) = self.max_size {
            s.max_size = n;
        }
        if let Some(m) = self.mode {
            s.mode = m;
        }
        if let Some(n) = self.top {
            s.top = n;
        }
        if let Some(f) = self.format {
            s.format = f;
        }
        s.validate()?;
        Ok(s)
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<String, Error> {
    let settings = cli.settings()?;
    let inventory = settings.inventory()?;
    let target = settings.target()?;
    info!(
        slots = inventory.len(),
        target_ohms = target,
        tolerance_percent = settings.tolerance_percent,
        max_size = settings.max_size,
        mode = ?settings.mode,
        "searching"
    );

    let search = RSearch::new(&inventory, settings.max_size);
    let count = search.combinations();
    if count > LARGE_SEARCH {
        warn!(
            combinations = %count,
            "large search; consider a smaller inventory or max size"
        );
    }

    let sets = settings
        .mode
        .topologies()
        .iter()
        .map(|t| search.run(target, settings.tolerance(), *t))
        .collect::<Result<Vec<_>, _>>()?;
    for res in &sets {
        info!(topology = %res.topology(), matches = res.len(), "search done");
    }

    report::render(&sets, settings.format, settings.top)
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if cli.list_series {
        for name in RSeries::names() {
            println!("{name}");
        }
        return;
    }

    match run(&cli) {
        Ok(out) => {
            print!("{out}");
            if !out.ends_with('\n') {
                println!();
            }
        }
        Err(e) => {
            eprintln!("Error: {}", error_message(&e));
            process::exit(1);
        }
    }
}

fn error_message(err: &Error) -> String {
    match err {
        Error::Parse(e) if e.is_inventory() => {
            format!("make sure all resistor values are valid numbers ({e})")
        }
        e => e.to_string(),
    }
}
