//! osmedit command-line tool.

use std::io::{self, IsTerminal};

use anyhow::{Context as _, Result};
use clap::{ColorChoice, Parser};
use osmedit_cli::commands::{
    graph_to_json, load_graph, load_vocabulary, run_split, run_validate, vocabulary_to_toml,
};
use osmedit_cli::logging::{LogConfig, LogFormat, init_logging};
use tracing::level_filters::LevelFilter;

mod cli;
mod summary;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg, ReportFormatArg, SplitArgs, ValidateArgs};
use crate::summary::{print_report, print_split};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let result = match &cli.command {
        Command::Validate(args) => validate(&cli, args),
        Command::Split(args) => split(&cli, args).map(|()| 0),
        Command::Vocabulary => vocabulary(&cli).map(|()| 0),
    };
    let exit_code = match result {
        Ok(code) => code,
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

fn validate(cli: &Cli, args: &ValidateArgs) -> Result<i32> {
    let vocabulary = load_vocabulary(cli.vocabulary.as_deref())?;
    let graph = load_graph(&args.file)?;
    let report = run_validate(graph, vocabulary)?;
    match args.format {
        ReportFormatArg::Table => print_report(&report),
        ReportFormatArg::Json => {
            let json = serde_json::to_string_pretty(&report).context("serialize report")?;
            println!("{json}");
        }
    }
    let failed = report.has_errors() || (args.deny_warnings && report.warning_count() > 0);
    Ok(i32::from(failed))
}

fn split(cli: &Cli, args: &SplitArgs) -> Result<()> {
    let vocabulary = load_vocabulary(cli.vocabulary.as_deref())?;
    let graph = load_graph(&args.file)?;
    let outcome = run_split(graph, vocabulary, args.vertex, &args.ways, &args.hide)?;
    let json = graph_to_json(&outcome.graph)?;
    match &args.output {
        Some(path) => {
            std::fs::write(path, json).with_context(|| format!("write {}", path.display()))?;
            print_split(&outcome);
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn vocabulary(cli: &Cli) -> Result<()> {
    let vocabulary = load_vocabulary(cli.vocabulary.as_deref())?;
    print!("{}", vocabulary_to_toml(&vocabulary)?);
    Ok(())
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
