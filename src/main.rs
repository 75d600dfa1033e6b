//! # SMTP Reach CLI
//!
//! Command-line interface for the SMTP Reach library (`smtp_reach_core`).
//! This binary parses arguments, sets up configuration, runs the port-25
//! connectivity check (or a single-host probe), and renders the report.

use smtp_reach_core::{
    check_connectivity_with, classify, probe_host, Config, ConfigBuilder, ConnectivityReport,
    Severity,
};

// Dependencies specific to the CLI binary
use anyhow::{Context, Result};
use clap::Parser;
use std::fs::File;
use std::io::BufWriter;
use std::time::Duration;
use tracing_subscriber::{fmt::format::FmtSpan, EnvFilter, FmtSubscriber};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Checks whether outbound SMTP (TCP port 25) is reachable from this machine.",
    long_about = "smtp-reach connects to a short list of well-known mail exchangers on TCP port 25, waits for the SMTP 220 greeting, and explains every failure: ISP or firewall blocking, DNS trouble, or something unexpected."
)]
struct AppArgs {
    /// Probe a single mail server instead of the built-in target list.
    #[arg(long, env = "SMTP_REACH_HOST")]
    host: Option<String>,

    /// Port to probe in single-host mode (defaults to 25). Requires --host.
    #[arg(long, env = "SMTP_REACH_PORT", requires = "host")]
    port: Option<u16>,

    /// Per-host probe timeout in milliseconds.
    #[arg(long, env = "SMTP_REACH_TIMEOUT_MS")]
    timeout_ms: Option<u64>,

    /// Path to a configuration file (TOML format) to load settings from. CLI args override file settings.
    #[arg(long, env = "SMTP_REACH_CONFIG")]
    config_file: Option<String>,

    /// Print the full report as JSON to standard output instead of the summary.
    #[arg(long, default_value = "false", env = "SMTP_REACH_JSON")]
    json: bool,

    /// Path to a file where the JSON report will be saved.
    #[arg(short, long, env = "SMTP_REACH_OUTPUT")]
    output: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_thread_names(true)
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("Setting up tracing subscriber failed")?;

    tracing::info!("smtp-reach v{} starting...", env!("CARGO_PKG_VERSION"));

    let args = AppArgs::parse();
    tracing::debug!("Parsed CLI arguments: {:?}", args);

    let mut config_builder = ConfigBuilder::new();

    if let Some(ref path) = args.config_file {
        config_builder = config_builder.config_file(path);
    }
    if let Some(ms) = args.timeout_ms {
        config_builder = config_builder.probe_timeout(Duration::from_millis(ms));
    }

    let config = match config_builder.build() {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!("Configuration error: {}", e);
            std::process::exit(2);
        }
    };
    tracing::debug!("Effective configuration loaded: {:?}", config);

    if let Some(ref host) = args.host {
        return probe_single_host(&config, host, args.port.unwrap_or(25)).await;
    }

    let report = check_connectivity_with(&config).await;

    if let Some(ref path) = args.output {
        tracing::info!("Saving report to '{}'...", path);
        save_report(&report, path)?;
        tracing::info!("Report saved successfully to '{}'.", path);
    }

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&report).context("Serializing report to JSON failed")?
        );
    } else {
        print_report(&report);
    }

    if !report.port25_open {
        std::process::exit(1);
    }
    Ok(())
}

/// Probes one user-chosen server and renders the outcome (single-host mode).
async fn probe_single_host(config: &Config, host: &str, port: u16) -> Result<()> {
    const GREEN: &str = "\x1b[32m";
    const RED: &str = "\x1b[31m";
    const RESET: &str = "\x1b[0m";

    tracing::info!("Probing {}:{} directly...", host, port);

    match probe_host(config, host, port).await {
        Ok(success) => {
            println!(
                "{GREEN}Connected:{RESET} {}:{} answered in {}ms",
                host,
                port,
                success.response_time.as_millis()
            );
            println!("Banner:    {}", success.banner);
            Ok(())
        }
        Err(error) => {
            let classified = classify(&error);
            println!("{RED}Probe failed:{RESET} {}", error);
            println!(
                "Diagnosis: {} [{}; severity {}; blocked: {}]",
                classified.reason,
                classified.error_code,
                classified.severity.as_str(),
                classified.blocked.as_str()
            );
            std::process::exit(1);
        }
    }
}

/// Prints the connectivity report to standard output.
fn print_report(report: &ConnectivityReport) {
    const BLUE: &str = "\x1b[34m";
    const GREEN: &str = "\x1b[32m";
    const YELLOW: &str = "\x1b[33m";
    const RED: &str = "\x1b[31m";
    const RESET: &str = "\x1b[0m";

    println!("\n{BLUE}===== SMTP Reachability ====={RESET}");
    if report.port25_open {
        println!("Port 25:  {GREEN}OPEN{RESET}");
        if let (Some(host), Some(provider)) = (&report.tested_host, &report.provider) {
            println!("Reached:  {} ({})", host, provider);
        }
        if let Some(ms) = report.response_time_ms {
            println!("Connect:  {}ms", ms);
        }
        if let Some(ref banner) = report.smtp_banner {
            println!("Banner:   {}", banner);
        }
    } else {
        println!("Port 25:  {RED}NOT REACHABLE{RESET}");
        if let Some(ref summary) = report.error_summary {
            println!("Summary:  {}", summary);
        }
    }
    println!("Tried:    {}", report.attempted_hosts.join(", "));

    if !report.per_host_errors.is_empty() {
        println!("\n{BLUE}Per-host failures:{RESET}");
        for failure in &report.per_host_errors {
            let color = match failure.severity {
                Severity::High => RED,
                Severity::Medium => YELLOW,
                Severity::Low => RESET,
            };
            println!(
                "- {} ({}): {color}{}{RESET} [{}; severity {}; blocked: {}]",
                failure.host,
                failure.provider,
                failure.reason,
                failure.error_code,
                failure.severity.as_str(),
                failure.blocked.as_str()
            );
        }
    }

    if let Some(ref recommendation) = report.recommendation {
        println!("\n{YELLOW}Recommendation:{RESET} {}", recommendation);
    }

    println!(
        "\nChecked at {} in {}ms",
        report.timestamp_iso8601, report.total_time_ms
    );
    println!("{BLUE}============================={RESET}\n");
}

/// Saves the report to the specified JSON file.
/// Uses `serde_json` with pretty printing for human readability.
fn save_report(report: &ConnectivityReport, file_path: &str) -> Result<()> {
    tracing::debug!("Creating output file: {}", file_path);
    let file = File::create(file_path)
        .with_context(|| format!("Failed to create/truncate output file '{}'", file_path))?;
    let writer = BufWriter::new(file);

    serde_json::to_writer_pretty(writer, report)
        .with_context(|| format!("Failed to serialize report to JSON for '{}'", file_path))?;

    Ok(())
}
