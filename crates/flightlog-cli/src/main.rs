mod commands;
mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "flightlog",
    version,
    about = "Convert flight planning PDFs into flight log tables"
)]
struct Cli {
    /// Log extraction decisions (debug level); RUST_LOG overrides
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a main route PDF and a Takeoff PDF (in either order)
    Convert {
        /// First PDF file
        first: PathBuf,

        /// Second PDF file
        second: PathBuf,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,

        /// Write one CSV file per sheet into this directory
        #[arg(long, value_name = "DIR")]
        csv_dir: Option<PathBuf>,

        /// Custom JSON layout profile (default: built-in ofp-standard)
        #[arg(short, long, value_name = "FILE")]
        profile: Option<PathBuf>,
    },
    /// Report whether each PDF is a main route or a Takeoff document
    Classify {
        /// PDF file(s)
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Custom JSON layout profile
        #[arg(short, long, value_name = "FILE")]
        profile: Option<PathBuf>,
    },
    /// Extract only the route grid from a main route PDF
    Grid {
        /// Path to the main route PDF
        file: PathBuf,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,

        /// Custom JSON layout profile
        #[arg(short, long, value_name = "FILE")]
        profile: Option<PathBuf>,
    },
    /// Manage and inspect layout profiles
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },
}

#[derive(Subcommand)]
enum ProfileAction {
    /// List built-in layout profiles
    List,
    /// Print a built-in profile as JSON
    Show {
        /// Preset name (e.g., "ofp-standard")
        name: String,
    },
    /// Validate a custom layout profile
    Validate {
        /// Path to JSON profile
        file: PathBuf,
    },
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Convert {
            first,
            second,
            output,
            csv_dir,
            profile,
        } => commands::convert::run(&first, &second, &output, csv_dir, profile),
        Commands::Classify { files, profile } => commands::classify::run(&files, profile),
        Commands::Grid {
            file,
            output,
            profile,
        } => commands::grid::run(&file, &output, profile),
        Commands::Profile { action } => match action {
            ProfileAction::List => commands::profile::list(),
            ProfileAction::Show { name } => commands::profile::show(&name),
            ProfileAction::Validate { file } => commands::profile::validate(&file),
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
