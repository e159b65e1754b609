//! Course registration CLI - Command-line interface for registration validation
//!
//! CDD Principle: Application Layer - CLI coordinates user interactions with domain services
//! - Translates user commands to domain operations
//! - Handles external concerns like file I/O, process exit codes, and terminal output
//! - Provides clean separation between user interface and business logic

use clap::{Parser, Subcommand, ValueEnum};
use course_registration::{
    rules, sample, OutputFormat, RegistrationConfig, RegistrationDocument, RegistrationResult,
    RegistrationService, ReportFormatter, ReportOptions, RuleConfig,
};
use std::path::PathBuf;
use std::process;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Course registration validator
#[derive(Parser)]
#[command(name = "course-registration")]
#[command(version)]
#[command(about = "Validate student course registrations against credit, prerequisite and schedule rules")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Rule configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log output format
    #[arg(long, value_enum, global = true, default_value = "text")]
    log_format: LogFormatArg,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a registration document (YAML or JSON)
    Check {
        /// Registration document to validate
        file: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "human")]
        format: OutputFormatArg,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,

        /// List every rule outcome, not only failures
        #[arg(long)]
        details: bool,
    },

    /// Run the built-in sample registration
    Demo {
        /// Output format
        #[arg(short, long, value_enum, default_value = "human")]
        format: OutputFormatArg,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },

    /// Validate a rule configuration file
    ValidateConfig {
        /// Configuration file to validate
        config_file: Option<PathBuf>,
    },

    /// List configured rules in evaluation order
    Rules,

    /// Explain what a specific rule does
    Explain {
        /// Rule ID to explain
        rule_id: String,
    },
}

#[derive(Copy, Clone, ValueEnum, PartialEq)]
enum OutputFormatArg {
    Human,
    Json,
    Github,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Human => OutputFormat::Human,
            OutputFormatArg::Json => OutputFormat::Json,
            OutputFormatArg::Github => OutputFormat::GitHub,
        }
    }
}

#[derive(Copy, Clone, ValueEnum, PartialEq)]
enum LogFormatArg {
    Text,
    Json,
}

fn main() {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.log_format);

    match run_command(cli) {
        Ok(exit_code) => process::exit(exit_code),
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(2);
        }
    }
}

fn run_command(cli: Cli) -> RegistrationResult<i32> {
    match cli.command {
        Commands::Check { file, format, no_color, details } => {
            run_check(cli.config, file, format, !no_color, details)
        }
        Commands::Demo { format, no_color } => run_demo(cli.config, format, !no_color),
        Commands::ValidateConfig { config_file } => run_validate_config(config_file.or(cli.config)),
        Commands::Rules => run_list_rules(cli.config),
        Commands::Explain { rule_id } => run_explain(&rule_id),
    }
}

fn load_config(config_path: Option<PathBuf>) -> RegistrationResult<RegistrationConfig> {
    match config_path {
        Some(path) => RegistrationConfig::load_from_file(path),
        None => RegistrationConfig::discover(),
    }
}

fn run_check(
    config_path: Option<PathBuf>,
    file: PathBuf,
    format: OutputFormatArg,
    use_colors: bool,
    show_rule_details: bool,
) -> RegistrationResult<i32> {
    let config = load_config(config_path)?;
    let service = RegistrationService::from_config(&config)?;

    let registration = RegistrationDocument::load_from_file(&file)?.into_registration()?;
    let result = service.run_registration(&registration);

    let formatter = ReportFormatter::new(ReportOptions { use_colors, show_rule_details });
    println!("{}", formatter.format_result(&result, format.into())?);

    Ok(if result.passed { 0 } else { 1 })
}

fn run_demo(
    config_path: Option<PathBuf>,
    format: OutputFormatArg,
    use_colors: bool,
) -> RegistrationResult<i32> {
    let config = load_config(config_path)?;
    let service = RegistrationService::from_config(&config)?;
    let registration = sample::sample_registration()?;

    let result = service.run_registration(&registration);

    let formatter = ReportFormatter::new(ReportOptions { use_colors, show_rule_details: true });
    println!("{}", formatter.format_result(&result, format.into())?);

    Ok(if result.passed { 0 } else { 1 })
}

fn run_validate_config(config_path: Option<PathBuf>) -> RegistrationResult<i32> {
    let config_path = config_path.unwrap_or_else(|| PathBuf::from("registration.yaml"));

    println!("Validating configuration: {}", config_path.display());

    match RegistrationConfig::load_from_file(&config_path) {
        Ok(config) => {
            println!("Configuration is valid");
            println!("  Rules: {}", config.rules.len());
            println!("  Fingerprint: {}", config.fingerprint());
            Ok(0)
        }
        Err(e) => {
            eprintln!("Configuration validation failed: {e}");
            Ok(1)
        }
    }
}

fn run_list_rules(config_path: Option<PathBuf>) -> RegistrationResult<i32> {
    let config = load_config(config_path)?;

    if config.rules.is_empty() {
        println!("No rules configured; every registration is accepted");
        return Ok(0);
    }

    println!("Configured rules (evaluation order):\n");
    for (index, rule) in config.rules.iter().enumerate() {
        match rule {
            RuleConfig::CreditLimit { max_credits } => {
                println!("  {}. {} (max_credits: {})", index + 1, rule.rule_id(), max_credits)
            }
            _ => println!("  {}. {}", index + 1, rule.rule_id()),
        }
    }

    Ok(0)
}

fn run_explain(rule_id: &str) -> RegistrationResult<i32> {
    if let Some(info) = rules::builtin_rule(rule_id) {
        println!("Rule: {}", info.id);
        println!("{}", info.summary);
        if !info.options.is_empty() {
            println!("Options: {}", info.options.join(", "));
        }
        return Ok(0);
    }

    eprintln!("Rule '{rule_id}' not found");
    println!();
    println!("Available rules:");
    for info in rules::BUILTIN_RULES {
        println!("  - {}", info.id);
    }

    Ok(1)
}

fn init_logging(verbose: bool, format: LogFormatArg) {
    let default_directive = if verbose { "course_registration=debug,info" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormatArg::Text => registry
            .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(std::io::stderr))
            .init(),
        LogFormatArg::Json => registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init(),
    }
}
