use clap::{Parser, Subcommand};
use sheetjson::cli;
use sheetjson::config::ConfigOverrides;
use sheetjson::error::ConvertResult;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sheetjson")]
#[command(about = "Convert every sheet of an Excel workbook into a JSON document.")]
#[command(long_about = "sheetjson - Excel workbook → JSON documents

Each sheet becomes <sheet_name>.json: the first row names the fields, every
following row with all fields filled in becomes one object. A category index
(_categories.json) lists the documents that were produced.

COMMANDS:
  convert   - Write one JSON document per sheet, plus the index
  inspect   - Show sheets, target file names and row counts

EXAMPLES:
  sheetjson convert                              # Aakhar_list.xlsx → assets/data
  sheetjson convert words.xlsx -o static/data --no-index
  sheetjson convert --config sheetjson.yaml --dry-run
  sheetjson inspect words.xlsx

Set RUST_LOG (e.g. RUST_LOG=sheetjson=debug) for detailed logs on stderr.")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(long_about = "Convert an Excel workbook into JSON documents.

Sheet names are turned into file names by keeping letters, digits and
spaces, trimming, replacing spaces with underscores and lowercasing:
  \"Common Words\"  → common_words.json
  \"Verbs (Basic)\" → verbs_basic.json

Rows where any field is blank are left out. A sheet that fails (error
cells, clashing file name, write error) is reported and the remaining
sheets are still converted.

CONFIG FILE (YAML, all keys optional):
  input: Aakhar_list.xlsx
  output_dir: assets/data
  index_file_name: _categories.json
  emit_index: true

Command-line flags override the config file.")]
    /// Convert a workbook into one JSON document per sheet
    Convert {
        /// Path to the Excel workbook (.xlsx) [default: Aakhar_list.xlsx]
        #[arg(env = "SHEETJSON_INPUT")]
        input: Option<PathBuf>,

        /// Directory for the generated documents [default: assets/data]
        #[arg(short, long, env = "SHEETJSON_OUTPUT_DIR")]
        output_dir: Option<PathBuf>,

        /// YAML config file
        #[arg(short, long, env = "SHEETJSON_CONFIG")]
        config: Option<PathBuf>,

        /// File name of the category index [default: _categories.json]
        #[arg(long, env = "SHEETJSON_INDEX")]
        index_name: Option<String>,

        /// Do not write the category index
        #[arg(long)]
        no_index: bool,

        /// Preview without creating directories or writing files
        #[arg(short = 'n', long)]
        dry_run: bool,

        /// Show verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Show sheets, target file names and row counts without writing
    Inspect {
        /// Path to the Excel workbook (.xlsx) [default: Aakhar_list.xlsx]
        #[arg(env = "SHEETJSON_INPUT")]
        input: Option<PathBuf>,

        /// YAML config file
        #[arg(short, long, env = "SHEETJSON_CONFIG")]
        config: Option<PathBuf>,

        /// Show field names
        #[arg(short, long)]
        verbose: bool,
    },
}

fn init_logging(verbose: bool) {
    let default = if verbose {
        "sheetjson=debug"
    } else {
        "sheetjson=warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn run(command: Commands) -> ConvertResult<()> {
    match command {
        Commands::Convert {
            input,
            output_dir,
            config,
            index_name,
            no_index,
            dry_run,
            verbose,
        } => {
            let overrides = ConfigOverrides {
                input,
                output_dir,
                index_file_name: index_name,
                no_index,
                dry_run,
            };
            let config = cli::load_config(config, overrides)?;
            cli::convert(&config, verbose).map(|_| ())
        }

        Commands::Inspect {
            input,
            config,
            verbose,
        } => {
            let overrides = ConfigOverrides {
                input,
                ..Default::default()
            };
            let config = cli::load_config(config, overrides)?;
            cli::inspect(&config, verbose).map(|_| ())
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let verbose = match &cli.command {
        Commands::Convert { verbose, .. } | Commands::Inspect { verbose, .. } => *verbose,
    };
    init_logging(verbose);

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            cli::report_fatal(&e);
            ExitCode::FAILURE
        }
    }
}
