use anyhow::Result;
use clap::Parser;
use dcm2bids_combine_core::config::{DEFAULT_LOG_FILTER, LOG_ENV};
use dcm2bids_combine_core::{CombineOptions, Format, Output};
use owo_colors::OwoColorize;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "compile-dcm2bids-config",
    version,
    about = "Combine multiple dcm2bids config files into a single config file.",
    disable_version_flag = true
)]
struct Cli {
    /// The JSON or YAML config files to combine
    #[arg(value_name = "IN_FILE", required = true)]
    in_file: Vec<PathBuf>,

    /// The file to write the combined config file to. If not specified outputs are written to stdout.
    #[arg(short = 'o', long = "out-file", value_name = "OUT_FILE", default_value = "-")]
    out_file: String,

    /// Write the combined config as YAML instead of JSON
    #[arg(long)]
    yaml: bool,

    /// Print version
    #[arg(short = 'v', long = "version", action = clap::ArgAction::Version)]
    version: Option<bool>,
}

impl Cli {
    fn into_options(self) -> CombineOptions {
        let format = if self.yaml { Format::Yaml } else { Format::Json };
        CombineOptions::new(self.in_file)
            .with_output(Output::from_arg(&self.out_file))
            .with_format(format)
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let options = cli.into_options();
    dcm2bids_combine_core::cmd_combine(&options)?;
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {:#}", "error:".bright_red().bold(), e);
            ExitCode::FAILURE
        }
    }
}
