//! `picklist` binary.

use std::io::{self, IsTerminal};

use clap::{ColorChoice, Parser};
use picklist_cli::logging::{LogConfig, LogFormat, init_logging};
use picklist_store::{RunError, StoreError};
use tracing::level_filters::LevelFilter;

mod cli;
mod commands;
mod summary;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use crate::commands::{run_prepare, run_process, run_route, run_rules};
use crate::summary::{print_prepare, print_route, print_rules, print_run_report};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let result = match &cli.command {
        Command::Process(args) => run_process(args).map(|outcome| {
            print_run_report(&outcome);
            if outcome.report.success { 0 } else { 1 }
        }),
        Command::Prepare(args) => run_prepare(args).map(|summary| {
            print_prepare(&summary);
            0
        }),
        Command::Route(args) => run_route(args).map(|route| {
            print_route(&route);
            0
        }),
        Command::Rules(args) => run_rules(args).map(|(catalog, fingerprint)| {
            print_rules(&catalog, &fingerprint);
            0
        }),
    };
    let exit_code = result.unwrap_or_else(|error| {
        eprintln!("error: {error:#}");
        if let Some(hint) = suggestion(&error) {
            eprintln!("hint: {hint}");
        }
        1
    });
    std::process::exit(exit_code);
}

fn suggestion(error: &anyhow::Error) -> Option<&'static str> {
    error.chain().find_map(|cause| {
        if let Some(RunError::Store(store)) = cause.downcast_ref::<RunError>() {
            store.suggestion()
        } else {
            cause
                .downcast_ref::<StoreError>()
                .and_then(StoreError::suggestion)
        }
    })
}

fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        use_env_filter: !(cli.verbosity.is_present() || cli.log_level.is_some()),
        log_file: cli.log_file.clone(),
        log_data: cli.log_data,
        ..LogConfig::default()
    };
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
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
