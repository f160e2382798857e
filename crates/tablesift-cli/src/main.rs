mod commands;
mod output;

use clap::{Parser, Subcommand};
use log::LevelFilter;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "tablesift",
    version,
    about = "Extract tables from PDFs that carry no table markup"
)]
struct Cli {
    /// Log every strategy attempt and page
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract the tables of one PDF
    Extract {
        /// Path to the PDF file
        input_file: PathBuf,

        /// Directory for written files (default: the PDF's directory)
        #[arg(short = 'o', long = "out-dir", value_name = "DIR")]
        out_dir: Option<PathBuf>,

        /// Output format: table (preview), csv, json or zip. Without
        /// --out-dir, json is printed to stdout
        #[arg(short, long, default_value = "table", value_parser = ["table", "csv", "json", "zip"])]
        format: String,

        /// JSON config file with extraction settings
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Skip the fallback strategies when the standard ones find nothing
        #[arg(long)]
        no_aggressive: bool,
    },
    /// Extract the tables of every PDF in a directory
    Batch {
        /// Directory containing PDF files
        input_dir: PathBuf,

        /// Directory for written files (default: the input directory)
        #[arg(short = 'o', long = "out-dir", value_name = "DIR")]
        out_dir: Option<PathBuf>,

        /// Descend into subdirectories
        #[arg(short, long)]
        recursive: bool,

        /// Number of worker threads (default: available cores)
        #[arg(short, long)]
        jobs: Option<usize>,

        /// Output format: csv, json or zip
        #[arg(short, long, default_value = "csv", value_parser = ["csv", "json", "zip"])]
        format: String,

        /// JSON config file with extraction settings
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,
    },
    /// Inspect extraction settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the default settings as JSON
    Show,
    /// Validate a config file
    Validate {
        /// Path to JSON config file
        file: PathBuf,
    },
}

fn init_logger(debug: bool) {
    let mut builder = pretty_env_logger::formatted_builder();
    match std::env::var("RUST_LOG") {
        Ok(filters) if !debug => {
            builder.parse_filters(&filters);
        }
        _ => {
            builder.filter_level(if debug {
                LevelFilter::Debug
            } else {
                LevelFilter::Info
            });
        }
    }
    builder.init();
}

fn main() {
    let cli = Cli::parse();
    init_logger(cli.debug);

    let result = match cli.command {
        Commands::Extract {
            input_file,
            out_dir,
            format,
            config,
            no_aggressive,
        } => commands::extract::run(input_file, out_dir, &format, config, no_aggressive),
        Commands::Batch {
            input_dir,
            out_dir,
            recursive,
            jobs,
            format,
            config,
        } => commands::batch::run(input_dir, out_dir, recursive, jobs, &format, config),
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::show(),
            ConfigAction::Validate { file } => commands::config::validate(&file),
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
