//! drone-config
//!
//! Applies AR.Drone configuration dumps to typed slots and reports which
//! values changed.

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use drone_config::cli::{ApplyArgs, Cli, Command};
use drone_config::config::{SectionConfig, UnknownKeyBehavior, load_settings};
use drone_config::drone::standard_section;
use drone_config::format::{
    OutputFormat, format_report_markdown, format_section_json, format_section_markdown,
};
use std::fs::OpenOptions;
use std::io::Read;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

fn read_dump(args: &ApplyArgs) -> Result<String> {
    if args.dump.as_os_str() == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read dump from stdin")?;
        return Ok(text);
    }
    std::fs::read_to_string(&args.dump)
        .with_context(|| format!("Failed to read dump {}", args.dump.display()))
}

fn run_apply(args: &ApplyArgs, settings: SectionConfig, format: OutputFormat) -> Result<()> {
    let text = read_dump(args)?;
    let mut section = standard_section(settings)?;
    let report = section.apply_dump(&text)?;
    info!(
        changed = report.changed.len(),
        failures = report.failures.len(),
        "Dump applied"
    );

    match format {
        OutputFormat::Json => {
            let mut out = serde_json::json!({ "report": report });
            if args.show {
                out["section"] = format_section_json(&section);
            }
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        OutputFormat::Markdown => {
            print!("{}", format_report_markdown(&report));
            if args.show {
                println!();
                print!("{}", format_section_markdown(&section));
            }
        }
    }
    Ok(())
}

fn run_kinds(settings: SectionConfig, format: OutputFormat) -> Result<()> {
    let section = standard_section(settings)?;
    match format {
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(&format_section_json(&section))?
        ),
        OutputFormat::Markdown => print!("{}", format_section_markdown(&section)),
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on --log option
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    match cli.log.as_str() {
        "0" | "off" => {
            // No logging
        }
        "1" | "stdout" => {
            let subscriber = FmtSubscriber::builder()
                .with_max_level(level)
                .with_writer(std::io::stdout)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
        "2" | "stderr" => {
            let subscriber = FmtSubscriber::builder()
                .with_max_level(level)
                .with_writer(std::io::stderr)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
        filename => {
            // Log to file (append mode)
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(filename)?;
            let subscriber = FmtSubscriber::builder()
                .with_max_level(level)
                .with_writer(file)
                .with_ansi(false)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
    }

    let format = OutputFormat::from_str(&cli.format)
        .ok_or_else(|| anyhow!("Unknown output format '{}'", cli.format))?;
    let mut settings = load_settings(cli.settings.as_deref())?;
    if let Some(ref raw) = cli.unknown_key {
        settings.unknown_key = UnknownKeyBehavior::from_str(raw)
            .ok_or_else(|| anyhow!("Unknown --unknown-key value '{}'", raw))?;
    }

    match &cli.command {
        Command::Apply(args) => run_apply(args, settings, format),
        Command::Kinds => run_kinds(settings, format),
    }
}
