use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "tagcompat",
    version,
    about = "Tag compatibility browser and film builder score simulator"
)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List categories with tag counts and samples
    Categories(CategoriesCommand),
    /// List tags, optionally narrowed by category and search text
    Tags(TagsCommand),
    /// Show the compatibility table for one tag
    Related(RelatedCommand),
    /// Score a tag selection and rank the next tags
    Score(ScoreCommand),
    /// Interactive film builder reading commands from stdin
    Session(SessionCommand),
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum Mode {
    Delta,
    Next,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ReportFormat {
    Json,
    Md,
}

/// Candidate filters shared by the views that list tags.
#[derive(Args, Clone, Default)]
pub struct FilterArgs {
    /// Only show tags whose id contains this text (case-insensitive)
    #[arg(long)]
    pub filter: Option<String>,
    /// Only show tags unlocked at game start, manually unlocked, or passed via --unlock
    #[arg(long)]
    pub unlocked_only: bool,
    /// Show locked tags too, overriding `display.unlocked_only` from config
    #[arg(long, conflicts_with = "unlocked_only")]
    pub all: bool,
    /// Treat a tag as unlocked (repeatable)
    #[arg(long = "unlock", value_name = "TAG")]
    pub unlock: Vec<String>,
}

#[derive(Args)]
pub struct CategoriesCommand {
    pub path: PathBuf,
}

#[derive(Args)]
pub struct TagsCommand {
    pub path: PathBuf,
    #[arg(short, long)]
    pub category: Option<String>,
    #[command(flatten)]
    pub filters: FilterArgs,
}

#[derive(Args)]
pub struct RelatedCommand {
    pub path: PathBuf,
    pub tag: String,
}

#[derive(Args)]
pub struct ScoreCommand {
    pub path: PathBuf,
    /// Selected tag ids, in selection order
    pub tags: Vec<String>,
    #[arg(long, value_enum)]
    pub mode: Option<Mode>,
    /// Number of next tags to list
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub top: Option<u64>,
    #[arg(short, long, value_enum, default_value = "md")]
    pub format: ReportFormat,
    #[command(flatten)]
    pub filters: FilterArgs,
}

#[derive(Args)]
pub struct SessionCommand {
    pub path: PathBuf,
    #[arg(long, value_enum)]
    pub mode: Option<Mode>,
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub top: Option<u64>,
    #[command(flatten)]
    pub filters: FilterArgs,
}
