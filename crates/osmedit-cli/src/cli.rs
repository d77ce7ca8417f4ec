//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use osmedit_core::Feature;
use osmedit_model::EntityId;

#[derive(Parser)]
#[command(
    name = "osmedit",
    version,
    about = "Split ways and check oneway topology in map graph files",
    long_about = "Split ways and check oneway topology in map graph files.\n\n\
                  Graph files are JSON documents with \"nodes\" and \"ways\" arrays."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Tag vocabulary TOML to use instead of the built-in one.
    #[arg(long = "vocabulary", value_name = "PATH", global = true)]
    pub vocabulary: Option<PathBuf>,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Report impossible oneway endpoints in a graph file.
    Validate(ValidateArgs),

    /// Split the ways through a vertex and write the resulting graph.
    Split(SplitArgs),

    /// Print the effective tag vocabulary as TOML.
    Vocabulary,
}

#[derive(Parser)]
pub struct ValidateArgs {
    /// Graph file to check.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Report format.
    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: ReportFormatArg,

    /// Exit with a failure status when any warning is reported.
    #[arg(long = "deny-warnings")]
    pub deny_warnings: bool,
}

#[derive(Parser)]
pub struct SplitArgs {
    /// Graph file to edit.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Vertex to split at, e.g. `n42`.
    #[arg(long = "vertex", value_name = "ID")]
    pub vertex: EntityId,

    /// Only split these ways (repeatable).
    #[arg(long = "way", value_name = "ID")]
    pub ways: Vec<EntityId>,

    /// Treat a feature class as hidden, e.g. `paths` (repeatable).
    #[arg(long = "hide", value_name = "FEATURE", value_parser = parse_feature)]
    pub hide: Vec<Feature>,

    /// Where to write the edited graph (default: stdout).
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,
}

fn parse_feature(value: &str) -> Result<Feature, String> {
    Feature::parse(value).ok_or_else(|| {
        let known: Vec<&str> = Feature::ALL.iter().map(Feature::as_str).collect();
        format!("unknown feature class '{value}' (expected one of {})", known.join(", "))
    })
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ReportFormatArg {
    Table,
    Json,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
