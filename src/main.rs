mod builder;
mod cli;
mod config;
mod data;
mod error;
mod report;
mod score;
mod types;

use crate::data::ReferenceData;
use crate::error::CompatError;
use crate::score::recommend::CandidateFilter;
use crate::score::ReportOptions;
use crate::types::config::CompatConfig;
use crate::types::score::ScoreMode;
use clap::Parser;
use std::io::{self, Write};
use std::path::Path;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const RUNTIME_FAILURE: i32 = 1;
}

fn init_tracing(verbose: u8, quiet: bool) {
    let default_level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, _) => "debug",
    };
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("tagcompat={default_level}").into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn load(path: &Path) -> Result<(CompatConfig, ReferenceData), CompatError> {
    if !path.exists() {
        return Err(CompatError::PathNotFound(path.display().to_string()));
    }
    let loaded = config::load_config(path)?;
    let reference = data::load(path, &loaded)?;
    Ok((loaded, reference))
}

fn candidate_filter(config: &CompatConfig, args: cli::FilterArgs) -> CandidateFilter {
    CandidateFilter {
        query: args.filter,
        unlocked_only: !args.all && (args.unlocked_only || config.unlocked_only()),
        extra_unlocked: args.unlock.into_iter().collect(),
    }
}

fn report_options(
    config: &CompatConfig,
    mode: Option<cli::Mode>,
    top: Option<u64>,
    filters: cli::FilterArgs,
) -> ReportOptions {
    let mut options = ReportOptions::from_config(config);
    if let Some(mode) = mode {
        options.mode = match mode {
            cli::Mode::Delta => ScoreMode::Delta,
            cli::Mode::Next => ScoreMode::Next,
        };
    }
    if let Some(top) = top {
        options.limit = usize::try_from(top).unwrap_or(usize::MAX);
    }
    options.filter = candidate_filter(config, filters);
    options
}

fn run() -> Result<i32, CompatError> {
    let cli = cli::Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    match cli.command {
        cli::Commands::Categories(cmd) => {
            let (_, reference) = load(&cmd.path)?;
            print!("{}", report::browser::categories_overview(&reference));
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Tags(cmd) => {
            let (loaded, reference) = load(&cmd.path)?;
            let filter = candidate_filter(&loaded, cmd.filters);
            print!(
                "{}",
                report::browser::tag_list(&reference, cmd.category.as_deref(), &filter)
            );
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Related(cmd) => {
            let (_, reference) = load(&cmd.path)?;
            print!("{}", report::browser::related_table(&reference, &cmd.tag)?);
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Score(cmd) => {
            let (loaded, reference) = load(&cmd.path)?;
            for tag in &cmd.tags {
                if reference.tag(tag).is_none() {
                    tracing::warn!(tag = %tag, "unknown tag has no compatibility data");
                }
            }
            let options = report_options(&loaded, cmd.mode, cmd.top, cmd.filters);
            let film = score::film_report(&reference, cmd.tags.as_slice(), &options);

            let output_format = match cmd.format {
                cli::ReportFormat::Json => report::OutputFormat::Json,
                cli::ReportFormat::Md => report::OutputFormat::Md,
            };
            let rendered = report::render(&film, output_format)?;
            println!("{rendered}");
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Session(cmd) => {
            let (loaded, reference) = load(&cmd.path)?;
            let options = report_options(&loaded, cmd.mode, cmd.top, cmd.filters);
            let mut film_builder = builder::FilmBuilder::new(&reference, options);
            let stdin = io::stdin();
            let mut stdout = io::stdout();
            builder::session::run(&mut film_builder, stdin.lock(), &mut stdout)?;
            stdout.flush()?;
            Ok(exit_code::SUCCESS)
        }
    }
}

fn main() {
    match run() {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
        }
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(exit_code::RUNTIME_FAILURE);
        }
    }
}
