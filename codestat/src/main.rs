//! # codestat
//!
//! A CLI tool for counting code, comment, header and blank lines across many
//! programming languages.
//!
//! ## Usage
//!
//! ```bash
//! # Count lines under the current directory, one row per language
//! codestat
//!
//! # One row per file, as JSON
//! codestat src include --by-file --output json
//!
//! # Filter files with glob patterns
//! codestat . --include "src/**" --exclude "**/generated/**"
//!
//! # Show how each line of a file is classified
//! codestat --lines src/main.c
//!
//! # Treat every file as SQL, without header detection
//! codestat queries/ --language sql --no-header
//! ```
//!
//! A `codestat.toml` in the working directory (or `--config FILE`) can add
//! languages and set the header policy.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use codestatlib::{
    count_paths, source::discover_paths, CancelFlag, Config, CountOptions, CountResult,
    FileClassifier, FileError, FilterConfig, HeaderPolicy, HeaderStyle, LanguageProfile,
    LineResult, LocTable, ProfileRegistry,
};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

mod render;

/// Build the clap Command structure
fn build_command() -> Command {
    Command::new("codestat")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Count code, comment, header and blank lines in source files")
        .arg(
            Arg::new("paths")
                .help("Files or directories to analyze (defaults to current directory)")
                .action(ArgAction::Append)
                .value_parser(value_parser!(PathBuf))
                .default_value("."),
        )
        .arg(
            Arg::new("include")
                .short('i')
                .long("include")
                .action(ArgAction::Append)
                .help("Include files matching glob pattern"),
        )
        .arg(
            Arg::new("exclude")
                .short('e')
                .long("exclude")
                .action(ArgAction::Append)
                .help("Exclude files matching glob pattern"),
        )
        .arg(
            Arg::new("language")
                .short('l')
                .long("language")
                .help("Classify every file as this language id"),
        )
        .arg(
            Arg::new("by-file")
                .short('f')
                .long("by-file")
                .action(ArgAction::SetTrue)
                .help("Show breakdown by file"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_parser(["table", "json"])
                .default_value("table")
                .help("Output format"),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_parser(value_parser!(PathBuf))
                .help("Configuration file (default: ./codestat.toml if present)"),
        )
        .arg(
            Arg::new("no-header")
                .long("no-header")
                .action(ArgAction::SetTrue)
                .help("Count leading header comments as ordinary comments"),
        )
        .arg(
            Arg::new("header-style")
                .long("header-style")
                .value_parser(["block", "leading"])
                .help("Which leading comment counts as the file header"),
        )
        .arg(
            Arg::new("jobs")
                .short('j')
                .long("jobs")
                .value_parser(value_parser!(usize))
                .help("Number of worker threads"),
        )
        .arg(
            Arg::new("lines")
                .long("lines")
                .action(ArgAction::SetTrue)
                .help("Print the category of every line instead of totals"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::Count)
                .help("Increase log verbosity (-v, -vv, -vvv)"),
        )
}

fn init_tracing(verbosity: u8) {
    let default = match verbosity {
        0 => "error",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Load `--config`, or `codestat.toml` from the working directory.
fn load_config(matches: &ArgMatches) -> anyhow::Result<Config> {
    if let Some(path) = matches.get_one::<PathBuf>("config") {
        return Ok(Config::load(path)?);
    }
    match Config::find_in(".") {
        Some(path) => Ok(Config::load(path)?),
        None => Ok(Config::default()),
    }
}

/// Build filter config from the config file and the command line
fn build_filter(matches: &ArgMatches, config: &Config) -> anyhow::Result<FilterConfig> {
    let mut filter = config.filter()?;

    if let Some(includes) = matches.get_many::<String>("include") {
        for pattern in includes {
            filter = filter.include(pattern)?;
        }
    }

    if let Some(excludes) = matches.get_many::<String>("exclude") {
        for pattern in excludes {
            filter = filter.exclude(pattern)?;
        }
    }

    Ok(filter)
}

fn header_policy(matches: &ArgMatches, config: &Config) -> HeaderPolicy {
    let mut policy = config.header;
    if matches.get_flag("no-header") {
        policy.enabled = false;
    }
    match matches.get_one::<String>("header-style").map(String::as_str) {
        Some("block") => policy.style = HeaderStyle::Block,
        Some("leading") => policy.style = HeaderStyle::Leading,
        _ => {}
    }
    policy
}

fn report_errors(errors: &[FileError]) {
    if errors.is_empty() {
        return;
    }
    for error in errors {
        eprintln!("Error with {}: {}", error.path.display(), error.message);
    }
    eprintln!("{} error(s) encountered", errors.len());
}

fn count_handler(
    matches: &ArgMatches,
    paths: &[PathBuf],
    registry: &ProfileRegistry,
    options: CountOptions,
) -> anyhow::Result<()> {
    let by_file = matches.get_flag("by-file");
    let json = matches.get_one::<String>("output").map(String::as_str) == Some("json");

    let mut result = count_paths(paths, registry, &options, &CancelFlag::new())?;

    for path in &result.skipped {
        tracing::info!(path = %path.display(), "skipped, unknown language");
    }

    if json {
        if !by_file {
            result.files.clear();
        }
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print!("{}", render::render_table(&build_table(&result, by_file)));
    }

    report_errors(&result.errors);
    Ok(())
}

fn build_table(result: &CountResult, by_file: bool) -> LocTable {
    if !by_file {
        return LocTable::by_language(result);
    }

    let mut table = LocTable::by_file(result);
    if let Ok(base) = std::env::current_dir() {
        for row in &mut table.rows {
            row.label = render::make_relative(Path::new(&row.label), &base);
        }
    }
    table
}

#[derive(Debug, Serialize)]
struct FileLines {
    path: PathBuf,
    language: String,
    lines: Vec<LineResult>,
}

/// Classify one file line by line.
fn classify_lines_of(
    path: &Path,
    profile: &LanguageProfile,
    policy: &HeaderPolicy,
) -> anyhow::Result<(String, Vec<LineResult>)> {
    let bytes = std::fs::read(path).with_context(|| format!("failed to read file '{}'", path.display()))?;
    let content = String::from_utf8_lossy(&bytes).into_owned();

    let mut classifier = FileClassifier::new(profile, policy);
    let mut lines: Vec<LineResult> = content.lines().map(|l| classifier.push_line(l)).collect();
    let result = classifier.finish();

    // End-of-file warnings are attached to the line they refer to.
    for warning in result.warnings {
        if let Some(line) = lines.get_mut(warning.line().saturating_sub(1)) {
            if line.warning.is_none() {
                line.warning = Some(warning);
            }
        }
    }

    Ok((content, lines))
}

fn lines_handler(
    matches: &ArgMatches,
    paths: &[PathBuf],
    registry: &ProfileRegistry,
    options: &CountOptions,
) -> anyhow::Result<()> {
    let json = matches.get_one::<String>("output").map(String::as_str) == Some("json");
    let forced = options
        .language
        .as_deref()
        .map(|id| registry.resolve(id))
        .transpose()?;

    let mut errors = Vec::new();
    let mut listings = Vec::new();

    for path in discover_paths(paths, &options.file_filter)? {
        let profile = match forced {
            Some(profile) => profile,
            None => match registry.resolve_path(&path) {
                Ok(profile) => profile,
                Err(_) => {
                    tracing::info!(path = %path.display(), "skipped, unknown language");
                    continue;
                }
            },
        };

        match classify_lines_of(&path, profile, &options.header) {
            Ok((content, lines)) => {
                if json {
                    listings.push(FileLines {
                        path,
                        language: profile.id().to_string(),
                        lines,
                    });
                } else {
                    print!("{}", render::render_lines(&path, &content, &lines));
                    println!();
                }
            }
            Err(err) => errors.push(FileError {
                path,
                message: format!("{err:#}"),
            }),
        }
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&listings)?);
    }

    report_errors(&errors);
    Ok(())
}

fn run(matches: &ArgMatches) -> anyhow::Result<()> {
    let config = load_config(matches)?;
    let registry = config.build_registry()?;

    let paths: Vec<PathBuf> = matches
        .get_many::<PathBuf>("paths")
        .map(|v| v.cloned().collect())
        .unwrap_or_default();

    let mut options = CountOptions::new()
        .filter(build_filter(matches, &config)?)
        .header(header_policy(matches, &config));
    if let Some(language) = matches.get_one::<String>("language") {
        options = options.language(language.clone());
    }
    if let Some(&jobs) = matches.get_one::<usize>("jobs") {
        options = options.jobs(jobs);
    }

    if matches.get_flag("lines") {
        lines_handler(matches, &paths, &registry, &options)
    } else {
        count_handler(matches, &paths, &registry, options)
    }
}

fn main() -> ExitCode {
    let matches = build_command().get_matches();
    init_tracing(matches.get_count("verbose"));

    match run(&matches) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
