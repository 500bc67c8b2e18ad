use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use colored::*;
use std::io::{self, IsTerminal, Read};
use std::path::{Path, PathBuf};

use mdguard_lib::config::{self as mdguard_config, Config, normalize_key};
use mdguard_lib::exit_codes::exit;
use mdguard_lib::metadata::StaticMetadata;
use mdguard_lib::output::{FileReport, OutputFormat, Summary, TextFormatter, format_json};
use mdguard_lib::rules::{all_rules, known_rule_names};
use mdguard_lib::validator::{ValidationRequest, ValidationResponse, Validator};

mod file_processor;

const DEFAULT_CONFIG_FILE: &str = ".mdguard.toml";

#[derive(Parser)]
#[command(author, version, about, long_about = None, arg_required_else_help = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Control colored output: auto, always, never
    #[arg(long, global = true, default_value = "auto", value_parser = ["auto", "always", "never"])]
    color: String,

    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    /// Ignore all configuration files and use built-in defaults
    #[arg(long, global = true)]
    isolated: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Lint Markdown files and print diagnostics
    Check(CheckArgs),
    /// Read a JSON validation request from stdin and write a JSON response
    Validate,
    /// List all checks and the diagnostics they emit
    Rules,
    /// Create a default configuration file
    Init {
        /// Where to write the configuration
        #[arg(default_value = DEFAULT_CONFIG_FILE)]
        path: String,
    },
}

#[derive(Args, Debug)]
struct CheckArgs {
    /// Files or directories to lint
    paths: Vec<String>,

    /// Also run stylistic checks (line length, trailing whitespace, tabs, first heading)
    #[arg(short, long)]
    strict: bool,

    /// Output format: text or json
    #[arg(long, short = 'o', default_value = "text")]
    format: OutputFormat,

    /// Read the document from stdin instead of files
    #[arg(long)]
    stdin: bool,

    /// Filename to report when reading from stdin
    #[arg(long, default_value = "<stdin>")]
    stdin_filename: String,

    /// Use pre-extracted metadata (JSON) instead of parsing the document.
    /// Needs exactly one input: a single file or --stdin.
    #[arg(long)]
    metadata: Option<PathBuf>,

    /// Enable only these checks or diagnostic ids (comma-separated)
    #[arg(short, long)]
    enable: Option<String>,

    /// Disable these checks or diagnostic ids (comma-separated)
    #[arg(short, long)]
    disable: Option<String>,

    /// Exclude files or directories (comma-separated glob patterns)
    #[arg(long)]
    exclude: Option<String>,

    /// Lint files even if they are ignored by .gitignore
    #[arg(long)]
    no_respect_gitignore: bool,

    /// Print per-file statistics
    #[arg(long)]
    stats: bool,

    /// Print diagnostics, but nothing else
    #[arg(short, long)]
    quiet: bool,
}

fn split_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(normalize_key)
        .collect()
}

/// Load config the way every subcommand expects; problems are fatal
fn load_config(cli: &Cli, discovery_dir: &Path) -> Config {
    match Config::load_with_discovery(cli.config.as_deref(), discovery_dir, cli.isolated) {
        Ok((config, source)) => {
            if let Some(path) = source {
                log::debug!("Using configuration from {}", path.display());
            }
            let known = known_rule_names(&all_rules(&config));
            for warning in config.unknown_entries(&known) {
                eprintln!("{} {warning}", "[config warning]".yellow());
            }
            config
        }
        Err(e) => {
            eprintln!("{}: {e}", "Error".red().bold());
            exit::tool_error();
        }
    }
}

fn discovery_dir(paths: &[String]) -> PathBuf {
    let cwd = || std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let Some(first) = paths.first() else {
        return cwd();
    };
    let first = Path::new(first);
    if first.is_dir() {
        first.to_path_buf()
    } else {
        first
            .parent()
            .filter(|parent| parent.is_dir())
            .map(Path::to_path_buf)
            .unwrap_or_else(cwd)
    }
}

fn read_stdin() -> Result<String> {
    let mut buffer = String::new();
    io::stdin()
        .read_to_string(&mut buffer)
        .context("Failed to read from stdin")?;
    Ok(buffer)
}

fn run_check(cli: &Cli, args: &CheckArgs) -> Result<bool> {
    let mut config = load_config(cli, &discovery_dir(&args.paths));
    config.global.strict |= args.strict;
    if let Some(enable) = &args.enable {
        config.global.enable = split_list(enable);
    }
    if let Some(disable) = &args.disable {
        config.global.disable = split_list(disable);
    }
    if let Some(exclude) = &args.exclude {
        config.global.exclude = exclude.split(',').map(|s| s.trim().to_string()).collect();
    }
    if args.no_respect_gitignore {
        config.global.respect_gitignore = false;
    }

    let mut validator = Validator::new(&config).with_inline_directives(true);
    if let Some(path) = &args.metadata {
        let single_file = args.paths.len() == 1 && Path::new(&args.paths[0]).is_file();
        if !(args.stdin || single_file) {
            bail!("--metadata needs exactly one input: a single file or --stdin");
        }
        let json = std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
        validator = validator.with_extractor(Box::new(StaticMetadata::from_json(&json)?));
    }
    let strict = config.global.strict;

    let mut reports: Vec<FileReport> = Vec::new();
    let mut had_failure = false;

    if args.stdin {
        let content = read_stdin()?;
        reports.push(file_processor::process_content(
            &args.stdin_filename,
            &content,
            &validator,
            strict,
        )?);
    } else {
        let files =
            file_processor::find_markdown_files(&args.paths, &config.global.exclude, config.global.respect_gitignore)?;
        if files.is_empty() {
            if !args.quiet {
                println!("No Markdown files found");
            }
            return Ok(false);
        }
        log::debug!("Checking {} file(s)", files.len());

        for outcome in file_processor::process_files(&files, &validator, strict) {
            match outcome {
                Ok(report) => reports.push(report),
                Err(e) => {
                    had_failure = true;
                    eprintln!("{}: {e:#}", "Error".red().bold());
                }
            }
        }
    }

    let summary = Summary::from_reports(&reports);
    match args.format {
        OutputFormat::Json => println!("{}", format_json(&reports)?),
        OutputFormat::Text => {
            let formatter = TextFormatter::new(colored::control::SHOULD_COLORIZE.should_colorize());
            for report in &reports {
                for line in formatter.format_report(report) {
                    println!("{line}");
                }
                if args.stats && !args.quiet {
                    println!("{}", formatter.format_stats(report));
                }
            }
            if !args.quiet {
                println!("{}", formatter.format_summary(&summary));
            }
        }
    }

    if had_failure {
        exit::tool_error();
    }
    Ok(summary.invalid_files > 0)
}

/// Returns the process exit code
fn run_validate(cli: &Cli) -> Result<i32> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let config = load_config(cli, &cwd);
    let input = read_stdin()?;

    let response = match serde_json::from_str::<ValidationRequest>(&input) {
        Ok(request) => Validator::new(&config).respond(&request),
        Err(e) => {
            log::debug!("Invalid request body: {e}");
            ValidationResponse::failure("Invalid JSON request")
        }
    };

    println!("{}", serde_json::to_string_pretty(&response)?);

    let code = match &response {
        ValidationResponse::Success { result, .. } if result.valid => mdguard_lib::exit_codes::SUCCESS,
        ValidationResponse::Success { .. } => mdguard_lib::exit_codes::VIOLATIONS_FOUND,
        ValidationResponse::Failure { .. } => mdguard_lib::exit_codes::TOOL_ERROR,
    };
    Ok(code)
}

fn print_rules() {
    for rule in all_rules(&Config::default()) {
        println!(
            "{} {} {}",
            rule.name().cyan().bold(),
            format!("[{}]", rule.category()).dimmed(),
            rule.description()
        );
        for id in rule.rule_ids() {
            println!("    {id}");
        }
    }
}

fn main() {
    let cli = Cli::parse();

    match cli.color.as_str() {
        "always" => colored::control::set_override(true),
        "never" => colored::control::set_override(false),
        _ => {
            if !io::stdout().is_terminal() {
                colored::control::set_override(false);
            }
        }
    }

    let level = if cli.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    let mut builder = env_logger::Builder::new();
    builder.filter_level(level);
    if !cli.verbose {
        builder.parse_default_env();
    }
    builder.init();

    let outcome = match &cli.command {
        Commands::Check(args) => run_check(&cli, args).map(|invalid| {
            if invalid {
                mdguard_lib::exit_codes::VIOLATIONS_FOUND
            } else {
                mdguard_lib::exit_codes::SUCCESS
            }
        }),
        Commands::Validate => run_validate(&cli),
        Commands::Rules => {
            print_rules();
            Ok(mdguard_lib::exit_codes::SUCCESS)
        }
        Commands::Init { path } => match mdguard_config::create_default_config(path) {
            Ok(()) => {
                println!("Created default configuration file: {path}");
                Ok(mdguard_lib::exit_codes::SUCCESS)
            }
            Err(e) => Err(e.into()),
        },
    };

    match outcome {
        Ok(mdguard_lib::exit_codes::SUCCESS) => exit::success(),
        Ok(mdguard_lib::exit_codes::VIOLATIONS_FOUND) => exit::violations_found(),
        Ok(_) => exit::tool_error(),
        Err(e) => {
            eprintln!("{}: {e:#}", "Error".red().bold());
            exit::tool_error();
        }
    }
}
