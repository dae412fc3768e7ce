use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

mod generate;
mod info;
mod run;

mod config;
mod profile;

pub use config::{Config, Overrides};
pub use profile::Profile;

/// hapbench - load-time benchmarks for wide genotype tables
#[derive(Parser)]
#[command(name = "hapbench")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Benchmark size profile.
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum ProfileArg {
    /// 1,000 rows x 100 genotypes, 3 replicates
    Quick,
    /// 10,000 rows x 1,000 genotypes, 5 replicates
    #[default]
    Standard,
    /// 100,000 rows x 1,000 genotypes, 10 replicates
    Full,
}

impl From<ProfileArg> for Profile {
    fn from(arg: ProfileArg) -> Self {
        match arg {
            ProfileArg::Quick => Profile::Quick,
            ProfileArg::Standard => Profile::Standard,
            ProfileArg::Full => Profile::Full,
        }
    }
}

/// Flags shared by every command that builds a dataset.
#[derive(Args, Debug)]
pub struct DatasetArgs {
    /// Number of marker rows
    #[arg(short = 'n', long)]
    rows: Option<usize>,

    /// Number of genotype columns
    #[arg(short = 'g', long)]
    genotypes: Option<usize>,

    /// Random seed of the generator
    #[arg(short, long)]
    seed: Option<u64>,

    /// Size profile (quick, standard, full)
    #[arg(short = 'p', long, default_value = "standard", value_enum)]
    profile: ProfileArg,

    /// Load settings from a TOML config file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Parent directory of the fixture directory
    #[arg(short, long, value_name = "DIR")]
    output_dir: Option<PathBuf>,
}

impl DatasetArgs {
    fn overrides(&self) -> Overrides {
        Overrides {
            rows: self.rows,
            genotypes: self.genotypes,
            seed: self.seed,
            output_dir: self.output_dir.clone(),
            ..Default::default()
        }
    }

    fn load_config(&self) -> Result<Config> {
        match &self.config {
            Some(path) => Config::from_file(path),
            None => Ok(Config::default()),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Generate fixtures and time every loader strategy
    Run {
        #[command(flatten)]
        dataset: DatasetArgs,

        /// Timed invocations per (strategy, input) cell
        #[arg(short, long)]
        replicates: Option<usize>,

        /// Stop starting new invocations after this many seconds
        #[arg(long, value_name = "SECS")]
        time_limit: Option<f64>,

        /// Comma-separated strategy names (default: all)
        #[arg(long, value_delimiter = ',')]
        strategies: Vec<String>,

        /// Keep the fixture directory after the run
        #[arg(long)]
        keep: bool,

        /// Write every timed invocation to a CSV file
        #[arg(long, value_name = "FILE")]
        results_csv: Option<PathBuf>,

        /// Write the summary statistics to a JSON file
        #[arg(long, value_name = "FILE")]
        summary_json: Option<PathBuf>,
    },

    /// Write fixtures only and keep them
    Generate {
        #[command(flatten)]
        dataset: DatasetArgs,
    },

    /// Display information about a columnar container fixture
    Info {
        /// Input container path
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// List the built-in loader strategies
    Strategies,
}

impl Cli {
    pub fn verbosity(&self) -> u8 {
        self.verbose
    }
}

pub fn init_logging(verbosity: u8) {
    let log_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}

pub fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Run {
            dataset,
            replicates,
            time_limit,
            strategies,
            keep,
            results_csv,
            summary_json,
        } => {
            let overrides = Overrides {
                replicates,
                time_limit_secs: time_limit,
                strategies,
                keep,
                results_csv,
                summary_json,
                ..dataset.overrides()
            };
            run::run(&overrides, &dataset.load_config()?, Profile::from(dataset.profile))
        }
        Commands::Generate { dataset } => generate::run(
            &dataset.overrides(),
            &dataset.load_config()?,
            Profile::from(dataset.profile),
        ),
        Commands::Info { file } => info::run(file),
        Commands::Strategies => info::strategies(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_run() {
        let cli = Cli::try_parse_from([
            "hapbench",
            "-vv",
            "run",
            "--rows",
            "100",
            "--profile",
            "quick",
            "--strategies",
            "typed,raw_records",
            "--time-limit",
            "2.5",
        ])
        .unwrap();

        assert_eq!(cli.verbosity(), 2);
        match cli.command {
            Commands::Run {
                dataset,
                strategies,
                time_limit,
                keep,
                ..
            } => {
                assert_eq!(dataset.rows, Some(100));
                assert_eq!(Profile::from(dataset.profile), Profile::Quick);
                assert_eq!(strategies, vec!["typed", "raw_records"]);
                assert_eq!(time_limit, Some(2.5));
                assert!(!keep);
            }
            _ => panic!("expected run"),
        }
    }

    #[test]
    fn test_parse_generate_defaults() {
        let cli = Cli::try_parse_from(["hapbench", "generate", "-o", "/tmp/out"]).unwrap();
        match cli.command {
            Commands::Generate { dataset } => {
                assert_eq!(Profile::from(dataset.profile), Profile::Standard);
                assert_eq!(dataset.output_dir, Some(PathBuf::from("/tmp/out")));
                assert!(dataset.rows.is_none());
            }
            _ => panic!("expected generate"),
        }
    }

    #[test]
    fn test_unknown_profile_rejected() {
        assert!(Cli::try_parse_from(["hapbench", "run", "--profile", "huge"]).is_err());
    }
}
