//! covidash CLI
//!
//! Command-line client for a running covidash server:
//! - List regions
//! - Show the chart series and latest record for a region
//! - Check status
//! - Generate a default config file

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "covidash-cli")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Query a running covidash server")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// API server URL
    #[arg(long, default_value = "http://localhost:8050", global = true)]
    pub api_url: String,

    /// Output format (table, json)
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List region keys
    Regions,

    /// Show series and latest record for a region
    Show {
        /// Region key (e.g. SP)
        region: String,
        /// Only print the latest record table
        #[arg(long)]
        latest_only: bool,
    },

    /// Show server status
    Status,

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    match cli.command {
        Commands::Regions => {
            let response = client
                .get(format!("{}/api/v1/regions", cli.api_url))
                .send()
                .await?;

            if !response.status().is_success() {
                eprintln!("Failed to fetch regions: {}", response.status());
                std::process::exit(1);
            }

            let data: serde_json::Value = response.json().await?;

            if cli.format == "json" {
                println!("{}", serde_json::to_string_pretty(&data)?);
                return Ok(());
            }

            let regions = data["regions"].as_array().cloned().unwrap_or_default();
            if regions.is_empty() {
                println!("No regions loaded.");
            } else {
                let default = data["default"].as_str().unwrap_or("");
                for region in regions {
                    let key = region.as_str().unwrap_or("-");
                    let marker = if key == default { " (default)" } else { "" };
                    println!("{}{}", key, marker);
                }
            }
        }

        Commands::Show {
            region,
            latest_only,
        } => {
            let response = client
                .get(format!(
                    "{}/api/v1/regions/{}",
                    cli.api_url,
                    urlencoding::encode(&region)
                ))
                .send()
                .await?;

            if !response.status().is_success() {
                let status = response.status();
                let text = response.text().await.unwrap_or_default();
                eprintln!("Request failed ({}): {}", status, text);
                std::process::exit(1);
            }

            let view: serde_json::Value = response.json().await?;

            if cli.format == "json" {
                println!("{}", serde_json::to_string_pretty(&view)?);
                return Ok(());
            }

            println!("{}", view["title"].as_str().unwrap_or(&region));
            println!();

            let series = view["series"].as_array().cloned().unwrap_or_default();
            if series.is_empty() {
                println!("No records for region {}.", region);
                return Ok(());
            }

            if !latest_only {
                print_series(&series);
                println!();
            }
            print_snapshot(&view["snapshot"]);
        }

        Commands::Status => {
            let response = client.get(format!("{}/health", cli.api_url)).send().await;

            match response {
                Ok(resp) if resp.status().is_success() => {
                    let health: serde_json::Value = resp.json().await?;

                    println!("covidash v{}", env!("CARGO_PKG_VERSION"));
                    println!();
                    println!(
                        "API Status: {}",
                        health["status"].as_str().unwrap_or("unknown")
                    );
                    println!();
                    println!("Dataset:");
                    println!(
                        "  Records: {}",
                        health["dataset"]["records"].as_u64().unwrap_or(0)
                    );
                    println!(
                        "  Regions: {}",
                        health["dataset"]["regions"].as_u64().unwrap_or(0)
                    );
                    println!(
                        "  Latest records: {}",
                        health["dataset"]["latest_records"].as_u64().unwrap_or(0)
                    );

                    if let Some(uptime) = health["uptime_seconds"].as_u64() {
                        println!();
                        println!("Uptime: {}", format_duration(uptime));
                    }
                }
                Ok(resp) => {
                    eprintln!("API returned error: {}", resp.status());
                    std::process::exit(1);
                }
                Err(e) => {
                    eprintln!("Cannot connect to covidash at {}", cli.api_url);
                    eprintln!("Error: {}", e);
                    eprintln!();
                    eprintln!("Make sure the server is running:");
                    eprintln!("  cargo run --bin covidash");
                    std::process::exit(1);
                }
            }
        }

        Commands::Config { output } => {
            let content = covidash::config::generate_default_config();

            match output {
                Some(path) => {
                    std::fs::write(&path, content)?;
                    println!("Config written to {:?}", path);
                }
                None => print!("{}", content),
            }
        }
    }

    Ok(())
}

fn print_series(series: &[serde_json::Value]) {
    println!("{:<12} {:>12} {:>10}", "Date", "Confirmed", "Deaths");
    println!("{}", "-".repeat(36));

    for point in series {
        println!(
            "{:<12} {:>12} {:>10}",
            display_value(&point["date"]),
            display_value(&point["confirmed"]),
            display_value(&point["deaths"])
        );
    }
}

fn print_snapshot(snapshot: &serde_json::Value) {
    let rows = snapshot.as_array().cloned().unwrap_or_default();

    if rows.is_empty() {
        println!("No latest record.");
        return;
    }
    if rows.len() > 1 {
        println!("Warning: {} records are flagged as latest", rows.len());
        println!();
    }

    for row in rows {
        println!("{:<32} {}", "Info", "Value");
        println!("{}", "-".repeat(48));
        for entry in row.as_array().cloned().unwrap_or_default() {
            println!(
                "{:<32} {}",
                entry["label"].as_str().unwrap_or("-"),
                display_value(&entry["value"])
            );
        }
        println!();
    }
}

fn display_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::Null => "n/a".to_string(),
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn format_duration(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;

    if hours > 0 {
        format!("{}h {}m {}s", hours, minutes, secs)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, secs)
    } else {
        format!("{}s", secs)
    }
}
