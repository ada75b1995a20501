// src/cli.rs
use anyhow::{Context, Result};
use clap::{Arg, ArgAction, Command};
use colored::*;
use std::{env, path::PathBuf, process::ExitCode};

use crate::{
    core::{config::load_config, execution::run_config},
    infra::{logging, t},
    reporting::ConsoleReporter,
};

/// Pre-parses the command line arguments to find the language setting.
/// This allows i18n to be initialized before the full CLI is built.
/// It looks for a `--lang <VALUE>` or `--lang=<VALUE>` argument.
fn pre_parse_language() -> Option<String> {
    let args: Vec<String> = env::args().collect();
    if let Some(pos) = args.iter().position(|arg| arg == "--lang") {
        return args.get(pos + 1).cloned();
    }
    args.iter()
        .find_map(|arg| arg.strip_prefix("--lang="))
        .map(str::to_string)
}

fn build_cli() -> Command {
    Command::new("script-harness")
        .version(env!("CARGO_PKG_VERSION"))
        .about(t!("cli_about").to_string())
        .arg(
            Arg::new("config")
                .help(t!("arg_config").to_string())
                .value_name("CONFIG")
                .required(true)
                .value_parser(clap::value_parser!(PathBuf))
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("lang")
                .long("lang")
                .help(t!("arg_lang").to_string())
                .value_name("LANGUAGE")
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("fail-on-failure")
                .long("fail-on-failure")
                .help(t!("arg_fail_on_failure").to_string())
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help(t!("arg_verbose").to_string())
                .action(ArgAction::SetTrue),
        )
}

/// Prints a fatal error, with its context chain, to stderr.
pub fn print_error(err: &anyhow::Error) {
    eprintln!("{} {:#}", t!("error_prefix").red().bold(), err);
}

/// Parses the command line, loads the configuration and runs every script.
///
/// Configuration errors are returned before any process is started. A
/// completed run exits successfully whatever the test results are, unless
/// `--fail-on-failure` was given.
pub async fn run() -> Result<ExitCode> {
    // Pre-parse language and initialize i18n first.
    crate::init_locale(pre_parse_language().as_deref());

    let matches = build_cli().get_matches();
    logging::init(matches.get_flag("verbose"));

    let config_path = matches
        .get_one::<PathBuf>("config")
        .cloned()
        .context("missing configuration path")?;
    let fail_on_failure = matches.get_flag("fail-on-failure");

    let config = load_config(&config_path).with_context(|| {
        t!("config_load_failed", path = config_path.display()).to_string()
    })?;
    tracing::debug!(
        scripts = config.scripts.len(),
        tests = config.tests.len(),
        "configuration loaded"
    );

    let mut reporter = ConsoleReporter::stdout();
    let summary = run_config(&config, &mut reporter).await?;

    if fail_on_failure && summary.has_failures() {
        println!(
            "\n{}",
            t!(
                "run_failed",
                passed = summary.passed(),
                total = summary.total()
            )
            .red()
            .bold()
        );
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}
