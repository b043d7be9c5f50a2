//! KANG CLI
//!
//! Command-line interface for the KANG language.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use colored::{ColoredString, Colorize};
use kang_core::config::CONFIG_FILE;
use kang_core::diagnostics::{DiagnosticSeverity, DiagnosticsOutput};
use kang_core::examples::{self, LanguageFeature, EXAMPLES, FEATURES};
use kang_core::{Config, ExecutionContext, OutputFormat, TokenKind};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "kang")]
#[command(author, version, about = "A minimal, line-oriented scripting language", long_about = None)]
struct Cli {
    /// Verbose mode - log each executed statement to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to the config file (defaults to ./kang.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Human,
    Json,
}

#[derive(Clone, Copy, ValueEnum)]
enum HighlightFormat {
    Html,
    Ansi,
}

#[derive(Subcommand)]
enum Commands {
    /// Execute a KANG script
    Run {
        /// Path to the .kang file
        file: String,

        /// Output format (overrides the config file)
        #[arg(short, long, value_enum)]
        format: Option<Format>,
    },

    /// Check statement syntax without executing
    Check {
        /// Path to the .kang file
        file: String,

        /// Output format (overrides the config file)
        #[arg(short, long, value_enum)]
        format: Option<Format>,
    },

    /// Print the token stream as JSON (for debugging)
    Tokens {
        /// Path to the .kang file
        file: String,
    },

    /// Print the script with syntax highlighting
    Highlight {
        /// Path to the .kang file
        file: String,

        #[arg(short, long, value_enum, default_value = "ansi")]
        format: HighlightFormat,
    },

    /// Show the language guide, or one feature by id
    Guide {
        /// Feature id (e.g. "loops")
        id: Option<String>,
    },

    /// List the bundled examples, or run one by name
    Examples {
        /// Example title or slug (e.g. "hello-world")
        name: Option<String>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config_path = cli.config.clone().unwrap_or_else(|| PathBuf::from(CONFIG_FILE));
    let config = match Config::load(&config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{} {}", "error:".red().bold(), e);
            return ExitCode::from(2);
        }
    };
    if !config.output.color {
        colored::control::set_override(false);
    }

    match cli.command {
        Commands::Run { file, format } => cmd_run(&file, resolve_format(format, &config), &config),
        Commands::Check { file, format } => cmd_check(&file, resolve_format(format, &config)),
        Commands::Tokens { file } => cmd_tokens(&file),
        Commands::Highlight { file, format } => cmd_highlight(&file, format, &config),
        Commands::Guide { id } => cmd_guide(id.as_deref()),
        Commands::Examples { name } => cmd_examples(name.as_deref(), &config),
    }
}

/// Log to stderr, filtered by `RUST_LOG`, or at debug level with `--verbose`.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("kang_core=debug,kang=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
        .with(filter)
        .init();
}

fn resolve_format(flag: Option<Format>, config: &Config) -> OutputFormat {
    match flag {
        Some(Format::Human) => OutputFormat::Human,
        Some(Format::Json) => OutputFormat::Json,
        None => config.output.format,
    }
}

fn read_source(file: &str) -> Result<String, ExitCode> {
    fs::read_to_string(file).map_err(|e| {
        eprintln!("{} Failed to read file '{}': {}", "error:".red().bold(), file, e);
        ExitCode::from(2)
    })
}

fn to_json<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e))
}

fn cmd_run(file: &str, format: OutputFormat, config: &Config) -> ExitCode {
    let source = match read_source(file) {
        Ok(s) => s,
        Err(code) => return code,
    };

    tracing::debug!(file, "running script");
    let ctx = kang_core::execute(&source);

    match format {
        OutputFormat::Json => println!("{}", to_json(&ctx.report())),
        OutputFormat::Human => print_run(file, &source, &ctx, config),
    }

    if ctx.is_ok() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    }
}

fn print_run(file: &str, source: &str, ctx: &ExecutionContext, config: &Config) {
    for line in ctx.output() {
        println!("{}", line);
    }

    let variables = ctx.variables();
    if !variables.is_empty() {
        println!();
        println!("{}", "Variables".bold());
        for var in variables {
            println!(
                "  {} {} {}",
                var.name.cyan(),
                format!("({})", var.value.type_name()).dimmed(),
                var.value.display_literal()
            );
        }
    }

    if let Some(err) = ctx.error() {
        eprintln!();
        let report = miette::Report::new(err.clone())
            .with_source_code(miette::NamedSource::new(file, source.to_string()));
        if config.output.color {
            eprintln!("{:?}", report);
        } else {
            eprintln!("{} {}", "error:".red().bold(), err);
        }
    }
}

fn cmd_check(file: &str, format: OutputFormat) -> ExitCode {
    let source = match read_source(file) {
        Ok(s) => s,
        Err(code) => return code,
    };

    let diagnostics = kang_core::validate(&source, file);

    match format {
        OutputFormat::Json => {
            let output = DiagnosticsOutput::from_diagnostics(&diagnostics);
            println!("{}", to_json(&output));
        }
        OutputFormat::Human => {
            for diag in diagnostics.iter() {
                let severity_str = match diag.severity {
                    DiagnosticSeverity::Error => "error".red().bold(),
                    DiagnosticSeverity::Warning => "warning".yellow().bold(),
                };

                println!(
                    "{}{}{} {}",
                    severity_str,
                    format!("[{}]", diag.code).dimmed(),
                    ":".bold(),
                    diag.message
                );
                println!(
                    "  {} {}:{}:{}",
                    "-->".blue().bold(),
                    diag.file,
                    diag.span.start.line,
                    diag.span.start.column
                );

                if let Some(ref context) = diag.context {
                    println!("   {}", "|".blue().bold());
                    println!(
                        "{:>3} {} {}",
                        diag.line().to_string().blue().bold(),
                        "|".blue().bold(),
                        context
                    );
                    println!("   {}", "|".blue().bold());
                }

                if let Some(ref help) = diag.help {
                    println!("   {} {}: {}", "=".blue().bold(), "help".bold(), help);
                }

                println!();
            }

            let error_count = diagnostics.errors().count();
            let warning_count = diagnostics.warnings().count();
            if error_count > 0 {
                eprintln!(
                    "{}: could not validate `{}` due to {} error{}",
                    "error".red().bold(),
                    file,
                    error_count,
                    plural(error_count)
                );
            } else if warning_count > 0 {
                println!(
                    "{} `{}` validated with {} warning{}",
                    "Finished".green().bold(),
                    file,
                    warning_count,
                    plural(warning_count)
                );
            } else {
                println!("{} `{}` validated successfully", "Finished".green().bold(), file);
            }
        }
    }

    if diagnostics.has_errors() {
        ExitCode::from(1)
    } else {
        ExitCode::SUCCESS
    }
}

fn plural(n: usize) -> &'static str {
    if n == 1 {
        ""
    } else {
        "s"
    }
}

fn cmd_tokens(file: &str) -> ExitCode {
    let source = match read_source(file) {
        Ok(s) => s,
        Err(code) => return code,
    };

    println!("{}", to_json(&kang_core::tokenize(&source)));
    ExitCode::SUCCESS
}

fn cmd_highlight(file: &str, format: HighlightFormat, config: &Config) -> ExitCode {
    let source = match read_source(file) {
        Ok(s) => s,
        Err(code) => return code,
    };

    match format {
        HighlightFormat::Html => println!("{}", kang_core::highlight_with(&source, &config.highlight)),
        HighlightFormat::Ansi => println!("{}", highlight_ansi(&source)),
    }
    ExitCode::SUCCESS
}

fn highlight_ansi(source: &str) -> String {
    kang_core::tokenize(source)
        .iter()
        .map(|token| ansi_token(token.kind, &token.text).to_string())
        .collect()
}

fn ansi_token(kind: TokenKind, text: &str) -> ColoredString {
    match kind {
        TokenKind::Keyword => text.magenta().bold(),
        TokenKind::Identifier => text.cyan(),
        TokenKind::Number => text.blue(),
        TokenKind::String => text.green(),
        TokenKind::Operator | TokenKind::Unknown => text.yellow(),
        TokenKind::Comment => text.dimmed().italic(),
        TokenKind::Whitespace | TokenKind::Newline => text.normal(),
    }
}

fn cmd_guide(id: Option<&str>) -> ExitCode {
    let Some(id) = id else {
        println!("{}", "Language Guide".bold());
        for feature in FEATURES {
            println!(
                "  {:<14} {} {}",
                feature.id.cyan(),
                feature.title,
                format!("- {}", feature.description).dimmed()
            );
        }

        println!();
        println!("{}", "Examples".bold());
        for category in examples::categories() {
            println!("  {}", category.yellow().bold());
            for example in examples::in_category(category) {
                println!(
                    "    {:<24} {}",
                    example.slug().cyan(),
                    example.description.dimmed()
                );
            }
        }
        return ExitCode::SUCCESS;
    };

    let Some(feature) = examples::feature(id) else {
        eprintln!("{} No guide entry named '{}'", "error:".red().bold(), id);
        return ExitCode::from(2);
    };
    print_feature(feature);
    ExitCode::SUCCESS
}

fn print_feature(feature: &LanguageFeature) {
    println!("{}", feature.title.green().bold());
    println!("{}", feature.description);
    println!();
    println!("{}", "Syntax".bold());
    println!("  {}", highlight_ansi(feature.syntax));
    println!();
    println!("{}", "Examples".bold());
    for snippet in feature.examples {
        println!("  {}", highlight_ansi(snippet));
    }
}

fn cmd_examples(name: Option<&str>, config: &Config) -> ExitCode {
    let Some(name) = name else {
        for example in EXAMPLES {
            println!(
                "  {:<24} {} {}",
                example.slug().cyan(),
                example.description,
                format!("[{}]", example.category).dimmed()
            );
        }
        return ExitCode::SUCCESS;
    };

    let Some(example) = examples::find(name) else {
        eprintln!("{} No example named '{}'", "error:".red().bold(), name);
        return ExitCode::from(2);
    };

    println!("{} {}", "Example".green().bold(), example.title);
    println!();
    println!("{}", highlight_ansi(example.code));
    println!();

    let ctx = kang_core::execute(example.code);
    print_run(&example.slug(), example.code, &ctx, config);

    if ctx.is_ok() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    }
}
