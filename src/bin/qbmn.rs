//! qbmn: the Query-By-Method-Name CLI
//!
//! Inspect how data-access method names are understood.
//!
//! # Usage
//!
//! ```bash
//! # Show the parsed structure
//! qbmn explain findFirst3DistinctByLastNameOrderByFirstNameDesc
//!
//! # Validate every method name in a file
//! qbmn check --file repository_methods.txt
//! ```

use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use colored::*;
use qbmn::prelude::*;
use serde_json::json;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "qbmn")]
#[command(author = "qbmn Contributors")]
#[command(version)]
#[command(about = "Derive queries from data-access method names", long_about = None)]
#[command(after_help = "EXAMPLES:
    qbmn explain findByLastNameAndAgeGreaterThan
    qbmn tokens countDistinctByStatus --format json
    qbmn check findByName deleteByIdOrderByName
    cat methods.txt | qbmn check --file -")]
struct Cli {
    /// Configuration file (defaults to <config dir>/qbmn/config.toml)
    #[arg(long, global = true, env = "QBMN_CONFIG")]
    config: Option<PathBuf>,

    /// Verbose output (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value = "table")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the parsed structure of a method name
    Explain {
        /// The method name to explain
        name: String,
    },
    /// Show the token stream of a method name
    Tokens {
        /// The method name to scan
        name: String,
    },
    /// Parse many method names and report failures
    Check {
        /// Method names to check
        names: Vec<String>,

        /// Read method names from a file, one per line ('-' for stdin)
        #[arg(long)]
        file: Option<String>,
    },
    /// Print the canonical form of a method name
    Render {
        /// The method name to render
        name: String,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            std::process::exit(1);
        }
    }
}

/// `QBMN_LOG` wins over `-v`. Logs go to stderr so stdout stays parseable.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "qbmn=debug",
        _ => "qbmn=trace",
    };
    let filter = EnvFilter::try_from_env("QBMN_LOG").unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(cli: &Cli) -> Result<Config> {
    let config = match &cli.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => Config::discover().context("Failed to load user config")?,
    };
    debug!(?config, "using configuration");
    Ok(config)
}

/// Returns `false` when any method name was rejected.
fn run(cli: &Cli) -> Result<bool> {
    let config = load_config(cli)?;
    let parser = MethodNameParser::with_config(config.parser);

    match &cli.command {
        Commands::Explain { name } => Ok(explain(&parser, name, cli.format)),
        Commands::Tokens { name } => Ok(show_tokens(&parser, name, cli.format)),
        Commands::Check { names, file } => {
            let mut names = names.clone();
            if let Some(file) = file {
                names.extend(read_names(file)?);
            }
            if names.is_empty() {
                anyhow::bail!("No method names given. Pass names or --file.");
            }
            Ok(check(&parser, &names, cli.format))
        }
        Commands::Render { name } => Ok(render(&parser, name, cli.format)),
    }
}

fn read_names(file: &str) -> Result<Vec<String>> {
    let content = if file == "-" {
        let mut content = String::new();
        std::io::stdin()
            .read_to_string(&mut content)
            .context("Failed to read stdin")?;
        content
    } else {
        std::fs::read_to_string(file).with_context(|| format!("Failed to read {}", file))?
    };
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(String::from)
        .collect())
}

fn explain(parser: &MethodNameParser, name: &str, format: OutputFormat) -> bool {
    let query = match parser.parse(name) {
        Ok(query) => query,
        Err(e) => {
            report_error(name, &e, format);
            return false;
        }
    };

    if format == OutputFormat::Json {
        print_json(&query);
        return true;
    }

    println!("{} {}", "Method:".dimmed(), name.yellow());
    println!();
    println!("{}", "Parsed Structure:".green().bold());
    println!("  {} {}", "Action:".dimmed(), query.action().to_string().cyan());

    match query.projection() {
        Some(projection) => println!(
            "  {} {}",
            "Projection:".dimmed(),
            describe_projection(projection).cyan()
        ),
        None => println!("  {} {}", "Projection:".dimmed(), "(none)".dimmed()),
    }

    if !query.criteria().is_empty() {
        println!("  {}", "Criteria:".dimmed());
        for item in query.criteria() {
            let connective = item
                .connective
                .map(|c| c.to_string())
                .unwrap_or_default();
            println!(
                "    {:4} {}",
                connective.yellow(),
                describe_condition(&item.condition)
            );
        }
    }

    if !query.ordering().is_empty() {
        println!("  {}", "Ordering:".dimmed());
        for item in query.ordering() {
            println!(
                "    • {} {}",
                item.property.to_string().white(),
                item.direction.to_string().cyan()
            );
        }
    }

    println!();
    println!(
        "  {} {}",
        "Parameters:".dimmed(),
        query.parameter_count().to_string().cyan()
    );
    println!("  {} {}", "Canonical:".dimmed(), query.to_string().white());
    true
}

fn describe_projection(projection: &Projection) -> String {
    if projection.kind.is_aggregate() {
        if let Some(property) = &projection.property {
            return format!("{}({})", projection.kind, property);
        }
    }
    let mut text = projection.kind.to_string();
    if let Some(count) = projection.count {
        text.push_str(&format!("({})", count));
    }
    if projection.distinct && projection.kind != ProjectionKind::Distinct {
        text.push_str(" DISTINCT");
    }
    if let Some(property) = &projection.property {
        text.push_str(&format!(" {}", property));
    }
    text
}

fn describe_condition(condition: &Condition) -> String {
    let mut text = format!("{}", condition.property.to_string().white());
    if condition.negated {
        text.push_str(&format!(" {}", "NOT".red()));
    }
    text.push_str(&format!(" {}", condition.operator.to_string().cyan()));
    if condition.ignore_case {
        text.push_str(&format!(" {}", "(ignore case)".dimmed()));
    }
    text
}

fn show_tokens(parser: &MethodNameParser, name: &str, format: OutputFormat) -> bool {
    let tokens = match parser.tokenize(name) {
        Ok(tokens) => tokens,
        Err(e) => {
            report_error(name, &e, format);
            return false;
        }
    };

    if format == OutputFormat::Json {
        print_json(&tokens);
        return true;
    }

    println!(
        "{:>5}  {:28} {}",
        "Pos".white().bold(),
        "Kind".white().bold(),
        "Text".white().bold()
    );
    println!("{}", "─".repeat(50).dimmed());
    for token in &tokens {
        println!(
            "{:>5}  {:28} {}",
            token.position,
            format!("{:?}", token.kind).cyan(),
            token.text.yellow()
        );
    }
    true
}

fn check(parser: &MethodNameParser, names: &[String], format: OutputFormat) -> bool {
    let results: Vec<(&String, Result<QueryDescriptor, ParseError>)> = names
        .iter()
        .map(|name| (name, parser.parse(name)))
        .collect();
    let failed = results.iter().filter(|(_, result)| result.is_err()).count();

    if format == OutputFormat::Json {
        let report: Vec<serde_json::Value> = results
            .iter()
            .map(|(name, result)| match result {
                Ok(query) => json!({ "name": name, "ok": true, "query": query }),
                Err(e) => json!({ "name": name, "ok": false, "error": error_json(e) }),
            })
            .collect();
        print_json(&report);
        return failed == 0;
    }

    for (name, result) in &results {
        match result {
            Ok(_) => println!("{} {}", "✓".green(), name),
            Err(e) => println!("{} {}: {}", "✗".red(), name, e.to_string().red()),
        }
    }
    println!();
    if failed == 0 {
        println!("{} {} method name(s) OK", "✓".green(), results.len());
    } else {
        println!(
            "{} {} of {} method name(s) failed",
            "✗".red(),
            failed.to_string().red(),
            results.len()
        );
    }
    failed == 0
}

fn render(parser: &MethodNameParser, name: &str, format: OutputFormat) -> bool {
    match parser.parse(name) {
        Ok(query) => {
            let canonical = query.to_string();
            if format == OutputFormat::Json {
                print_json(&json!({ "name": name, "canonical": canonical }));
            } else {
                println!("{}", canonical);
            }
            true
        }
        Err(e) => {
            report_error(name, &e, format);
            false
        }
    }
}

fn error_json(err: &ParseError) -> serde_json::Value {
    json!({
        "kind": format!("{:?}", err.kind()),
        "position": err.position(),
        "message": err.to_string(),
        "expected": err.expected().iter().map(|c| c.to_string()).collect::<Vec<_>>(),
    })
}

fn report_error(name: &str, err: &ParseError, format: OutputFormat) {
    if format == OutputFormat::Json {
        print_json(&json!({ "name": name, "error": error_json(err) }));
        return;
    }
    eprintln!("{} {}", "Parse Error:".red().bold(), err);
    eprintln!("  {}", name.yellow());
    eprintln!("  {}{}", " ".repeat(err.position()), "^".red().bold());
    let expected: Vec<String> = err.expected().iter().map(|c| c.to_string()).collect();
    if !expected.is_empty() {
        eprintln!("  {} {}", "expected:".dimmed(), expected.join(", "));
    }
}

fn print_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("{} {}", "Error:".red().bold(), e),
    }
}
