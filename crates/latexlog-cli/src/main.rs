use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use latexlog::ParseOptions;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

mod render;

#[derive(Parser)]
#[command(name = "latexlog")]
#[command(about = "Extract diagnostics from LaTeX log files", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a TeX log file and print the diagnostics
    Parse(ParseArgs),
}

#[derive(clap::Args, Debug, Default)]
struct ParseArgs {
    /// Path to the .log file
    #[arg(value_name = "FILE")]
    path: PathBuf,

    /// JSON file with parse options (camelCase keys)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Report each distinct diagnostic only once
    #[arg(long)]
    ignore_duplicates: bool,

    /// Line length at which the engine wrapped the log
    #[arg(long, value_name = "N")]
    wrap_width: Option<usize>,

    /// File base name pattern passed through to the report consumer
    #[arg(long = "file-base-name", value_name = "PATTERN")]
    file_base_names: Vec<String>,

    #[arg(long, value_enum, default_value_t = Format::Json)]
    format: Format,

    /// Exit with status 1 when the log contains errors
    #[arg(long)]
    fail_on_error: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
enum Format {
    #[default]
    Json,
    Text,
}

/// Merges the config file (if any) with command-line overrides.
fn build_options(args: &ParseArgs) -> anyhow::Result<ParseOptions> {
    let mut options = match &args.config {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("failed to read config {}", path.display()))?;
            ParseOptions::from_json_str(&json)
                .with_context(|| format!("invalid config {}", path.display()))?
        }
        None => ParseOptions::default(),
    };

    if args.ignore_duplicates {
        options.ignore_duplicates = true;
    }
    if let Some(width) = args.wrap_width {
        options.wrap_width = width;
    }
    if !args.file_base_names.is_empty() {
        options.file_base_names = args.file_base_names.clone();
    }

    options.validate()?;
    let patterns = options.file_base_name_patterns()?;
    log::debug!("{} file base name patterns accepted", patterns.len());
    Ok(options)
}

fn main() -> anyhow::Result<ExitCode> {
    env_logger::init();
    let cli = Cli::parse();

    match &cli.command {
        Commands::Parse(args) => {
            let options = build_options(args)?;
            let content = fs::read_to_string(&args.path)
                .with_context(|| format!("failed to read {}", args.path.display()))?;
            let report = latexlog::parse(&content, &options);
            log::info!(
                "{}: {} errors, {} warnings, {} typesetting",
                args.path.display(),
                report.errors.len(),
                report.warnings.len(),
                report.typesetting.len()
            );

            match args.format {
                Format::Json => println!("{}", serde_json::to_string_pretty(&report)?),
                Format::Text => print!("{}", render::render_text(&report)),
            }

            if args.fail_on_error && report.has_errors() {
                return Ok(ExitCode::FAILURE);
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_flags() {
        let cli = Cli::try_parse_from([
            "latexlog",
            "parse",
            "main.log",
            "--ignore-duplicates",
            "--wrap-width",
            "100",
            "--file-base-name",
            "build",
            "--format",
            "text",
        ])
        .unwrap();
        let Commands::Parse(args) = cli.command;
        assert_eq!(args.path, PathBuf::from("main.log"));
        assert_eq!(args.format, Format::Text);

        let options = build_options(&args).unwrap();
        assert!(options.ignore_duplicates);
        assert_eq!(options.wrap_width, 100);
        assert_eq!(options.file_base_names, vec!["build"]);
    }

    #[test]
    fn test_defaults_without_flags() {
        let args = ParseArgs {
            path: PathBuf::from("main.log"),
            ..ParseArgs::default()
        };
        assert_eq!(build_options(&args).unwrap(), ParseOptions::default());
    }

    #[test]
    fn test_zero_wrap_width_rejected() {
        let args = ParseArgs {
            wrap_width: Some(0),
            ..ParseArgs::default()
        };
        assert!(build_options(&args).is_err());
    }

    #[test]
    fn test_bad_pattern_rejected() {
        let args = ParseArgs {
            file_base_names: vec!["[".to_string()],
            ..ParseArgs::default()
        };
        let err = build_options(&args).unwrap_err();
        assert!(err.to_string().contains("invalid file base name pattern"));
    }

    #[test]
    fn test_missing_config_reports_path() {
        let args = ParseArgs {
            config: Some(PathBuf::from("/nonexistent/latexlog.json")),
            ..ParseArgs::default()
        };
        let err = build_options(&args).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/latexlog.json"));
    }
}
