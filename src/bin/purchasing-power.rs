//! purchasing-power CLI - inflation and dollar comparisons from the command line
//!
//! ## Example Usage
//!
//! ```bash
//! # What were 1000 pesos of January 2023 worth in March 2023?
//! purchasing-power adjust --amount 1000 --from 2023-01 --to 2023-03
//!
//! # Compare 1000 pesos of 2023-01 with 1500 pesos of 2023-06
//! purchasing-power compare --amount1 1000 --from 2023-01 --amount2 1500 --to 2023-06
//!
//! # 10000 pesos in blue dollars, January vs June
//! purchasing-power convert --market blue --amount 10000 --from 2023-01 --to 2023-06
//!
//! # Available months for a dataset
//! purchasing-power range inflation
//! ```

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use purchasing_power::compound::CompoundMode;
use purchasing_power::query::{ComparisonQuery, ExchangeQuery, InflationQuery, Query};
use purchasing_power::series::Indicator;
use purchasing_power::session::Session;
use purchasing_power::types::YearMonth;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::process;

/// purchasing-power: inflation-adjusted values and dollar equivalents
#[derive(Parser)]
#[command(name = "purchasing-power")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Inflation-adjusted values and dollar equivalents over monthly data", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding the JSON datasets (overrides config)
    #[arg(short = 'd', long, global = true)]
    data_dir: Option<PathBuf>,

    /// Whether the end month's rate is applied (overrides config)
    #[arg(short = 'm', long, global = true, value_parser = parse_mode)]
    mode: Option<CompoundMode>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Adjust an amount for inflation between two months
    Adjust {
        /// Amount in local currency
        #[arg(short = 'a', long, allow_negative_numbers = true)]
        amount: f64,

        /// Start month (YYYY-MM), defaults to the first month of the dataset
        #[arg(short = 'f', long, value_parser = parse_year_month)]
        from: Option<YearMonth>,

        /// End month (YYYY-MM), defaults to the last month of the dataset
        #[arg(short = 't', long, value_parser = parse_year_month)]
        to: Option<YearMonth>,
    },

    /// Compare an earlier amount, adjusted for inflation, with a later one
    Compare {
        /// Earlier amount
        #[arg(long, allow_negative_numbers = true)]
        amount1: f64,

        /// Month of the earlier amount (YYYY-MM)
        #[arg(short = 'f', long, value_parser = parse_year_month)]
        from: YearMonth,

        /// Later amount
        #[arg(long, allow_negative_numbers = true)]
        amount2: f64,

        /// Month of the later amount (YYYY-MM)
        #[arg(short = 't', long, value_parser = parse_year_month)]
        to: YearMonth,
    },

    /// Convert an amount to dollars at two months
    Convert {
        /// Exchange rate series
        #[arg(long, value_enum, default_value = "blue")]
        market: Market,

        /// Amount in local currency
        #[arg(short = 'a', long, allow_negative_numbers = true)]
        amount: f64,

        /// First month (YYYY-MM), defaults to the first month of the dataset
        #[arg(short = 'f', long, value_parser = parse_year_month)]
        from: Option<YearMonth>,

        /// Second month (YYYY-MM), defaults to the last month of the dataset
        #[arg(short = 't', long, value_parser = parse_year_month)]
        to: Option<YearMonth>,
    },

    /// Show the months available in a dataset
    Range {
        /// Dataset (inflation, blue, official)
        #[arg(value_name = "INDICATOR", value_parser = parse_indicator, default_value = "inflation")]
        indicator: Indicator,
    },

    /// Show configuration and dataset status
    Info,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Market {
    Blue,
    Official,
}

impl Market {
    fn indicator(self) -> Indicator {
        match self {
            Market::Blue => Indicator::BlueDollar,
            Market::Official => Indicator::OfficialDollar,
        }
    }
}

fn parse_year_month(s: &str) -> Result<YearMonth, String> {
    s.parse::<YearMonth>().map_err(|e| e.to_string())
}

fn parse_indicator(s: &str) -> Result<Indicator, String> {
    Indicator::from_key(s).map_err(|e| e.to_string())
}

fn parse_mode(s: &str) -> Result<CompoundMode, String> {
    s.parse::<CompoundMode>().map_err(|e| e.to_string())
}

/// Configuration file structure
#[derive(Debug, Clone, Serialize, Deserialize)]
struct Config {
    #[serde(default = "default_data_dir")]
    data_dir: PathBuf,
    #[serde(default)]
    files: DatasetFiles,
    #[serde(default)]
    period_mode: CompoundMode,
}

/// Per-dataset file overrides, relative to `data_dir` unless absolute
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct DatasetFiles {
    inflation: Option<PathBuf>,
    blue: Option<PathBuf>,
    official: Option<PathBuf>,
}

fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".purchasing-power")
        .join("data")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            files: DatasetFiles::default(),
            period_mode: CompoundMode::default(),
        }
    }
}

impl Config {
    fn load(path: Option<&Path>) -> Self {
        let result = match path {
            Some(config_path) => Self::read(config_path),
            None => match dirs::home_dir() {
                Some(home) => {
                    let default_config = home.join(".purchasing-power").join("config.toml");
                    if !default_config.exists() {
                        return Config::default();
                    }
                    Self::read(&default_config)
                }
                None => return Config::default(),
            },
        };

        match result {
            Ok(config) => config,
            Err(message) => {
                eprintln!("{} {}", "Warning:".yellow(), message);
                Config::default()
            }
        }
    }

    /// Read and parse one config file
    fn read(path: &Path) -> Result<Self, String> {
        if !path.exists() {
            return Err(format!("Config file not found: {}", path.display()));
        }
        let contents = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config {}: {}", path.display(), e))?;
        toml::from_str(&contents)
            .map_err(|e| format!("Failed to parse config {}: {}", path.display(), e))
    }

    /// Dataset file for an indicator
    fn path_for(&self, indicator: Indicator) -> PathBuf {
        let file = match indicator {
            Indicator::Inflation => self.files.inflation.as_ref(),
            Indicator::BlueDollar => self.files.blue.as_ref(),
            Indicator::OfficialDollar => self.files.official.as_ref(),
        };
        match file {
            Some(file) => self.data_dir.join(file),
            None => self.data_dir.join(indicator.default_file_name()),
        }
    }
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref());
    if let Some(dir) = cli.data_dir.clone() {
        config.data_dir = dir;
    }
    if let Some(mode) = cli.mode {
        config.period_mode = mode;
    }

    if cli.verbose {
        println!(
            "{} v{}",
            "purchasing-power".cyan().bold(),
            env!("CARGO_PKG_VERSION")
        );
        println!(
            "Data dir: {}",
            config.data_dir.display().to_string().dimmed()
        );
        println!("Period mode: {}", config.period_mode.to_string().dimmed());
    }

    let result = match cli.command {
        Commands::Adjust { amount, from, to } => {
            run_adjust(&config, amount, from, to, cli.json)
        }
        Commands::Compare {
            amount1,
            from,
            amount2,
            to,
        } => run_compare(&config, amount1, from, amount2, to, cli.json),
        Commands::Convert {
            market,
            amount,
            from,
            to,
        } => run_convert(&config, market.indicator(), amount, from, to, cli.json),
        Commands::Range { indicator } => show_range(&config, indicator, cli.json),
        Commands::Info => show_info(&config),
    };

    if let Err(e) = result {
        eprintln!("{} {}", "Error:".red().bold(), e);
        process::exit(1);
    }
}

/// Session with the given indicators loaded from the configured files
fn open_session(
    config: &Config,
    indicators: &[Indicator],
) -> Result<Session, Box<dyn std::error::Error>> {
    let mut session = Session::new(config.period_mode);
    for &indicator in indicators {
        session.load_path(indicator, config.path_for(indicator))?;
    }
    Ok(session)
}

fn run_adjust(
    config: &Config,
    amount: f64,
    from: Option<YearMonth>,
    to: Option<YearMonth>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let session = open_session(config, &[Indicator::Inflation])?;
    let bounds = session.selector_bounds(Indicator::Inflation)?;

    let query = Query::Inflation(InflationQuery {
        amount,
        start: from.unwrap_or(bounds.default_start),
        end: to.unwrap_or(bounds.default_end),
    });
    print_report(&query, &session, "Inflation adjustment", json)
}

fn run_compare(
    config: &Config,
    amount1: f64,
    from: YearMonth,
    amount2: f64,
    to: YearMonth,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let session = open_session(config, &[Indicator::Inflation])?;
    let query = Query::Comparison(ComparisonQuery {
        amount1,
        date1: from,
        amount2,
        date2: to,
    });
    print_report(&query, &session, "Adjusted comparison", json)
}

fn run_convert(
    config: &Config,
    indicator: Indicator,
    amount: f64,
    from: Option<YearMonth>,
    to: Option<YearMonth>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let session = open_session(config, &[indicator])?;
    let (default_from, default_to) = {
        let series = session.series(indicator)?;
        let first = series.first().map(|s| s.period());
        let last = series.last().map(|s| s.period());
        (first, last)
    };

    let date_a = from.or(default_from).ok_or("dataset is empty")?;
    let date_b = to.or(default_to).ok_or("dataset is empty")?;

    let query = Query::Exchange(ExchangeQuery {
        indicator,
        amount,
        date_a,
        date_b,
    });
    print_report(&query, &session, indicator.label(), json)
}

fn print_report(
    query: &Query,
    session: &Session,
    title: &str,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let report = query.run(session)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{}", title.cyan().bold());
    println!();
    println!("{}", report);
    Ok(())
}

fn show_range(
    config: &Config,
    indicator: Indicator,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let session = open_session(config, &[indicator])?;
    let bounds = session.selector_bounds(indicator)?;
    let series = session.series(indicator)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&bounds)?);
        return Ok(());
    }

    println!("{}", indicator.label().cyan().bold());
    println!("  {} {}", "Samples:".bold(), series.len());
    println!(
        "  {} {}",
        "Years:".bold(),
        bounds
            .years
            .iter()
            .map(|y| y.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    );
    println!("  {} {}", "Default start:".bold(), bounds.default_start);
    println!("  {} {}", "Default end:".bold(), bounds.default_end);
    Ok(())
}

fn show_info(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    println!(
        "{} {}",
        "purchasing-power".cyan().bold(),
        format!("v{}", env!("CARGO_PKG_VERSION")).dimmed()
    );
    println!("{}", env!("CARGO_PKG_DESCRIPTION"));
    println!();

    println!("{}", "Configuration".bold());
    println!("{}", "=============".dimmed());
    println!("  {} {}", "Data directory:".bold(), config.data_dir.display());
    println!("  {} {}", "Period mode:".bold(), config.period_mode);
    println!(
        "  {} {}",
        "Current month:".bold(),
        YearMonth::from_date(&chrono::Local::now().date_naive())
    );
    println!();

    println!("{}", "Datasets".bold());
    println!("{}", "========".dimmed());
    let mut session = Session::new(config.period_mode);
    for indicator in Indicator::ALL {
        let path = config.path_for(indicator);
        let status = match session.load_path(indicator, &path) {
            Ok(()) => {
                let index = session.index(indicator)?;
                match (index.first_month(), index.last_month()) {
                    (Some(first), Some(last)) => {
                        format!("{} months, {} .. {}", index.len(), first, last).green()
                    }
                    _ => "empty".yellow(),
                }
            }
            Err(_) => "unavailable".red(),
        };
        println!(
            "  {} {} ({})",
            format!("{}:", indicator.label()).bold(),
            status,
            path.display().to_string().dimmed()
        );
    }
    println!();

    Ok(())
}
