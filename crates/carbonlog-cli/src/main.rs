//! `carbonlog` — terminal client for the carbonlog footprint tracker.
//!
//! # Usage
//!
//! ```text
//! carbonlog estimate transport car_gasoline 42
//! carbonlog --user 6f1c... log food beef 0.5 -d "Sunday roast"
//! carbonlog --config ~/.config/carbonlog/config.toml stats --as-of 2024-05-31
//! ```

mod client;
mod render;

use anyhow::{Context, Result};
use carbonlog_core::{
  activity::ActivityInput,
  calculator::{estimate, parse_amount},
  factors::catalogue,
};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use client::{ApiClient, ApiConfig};
use serde::Deserialize;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

const DEFAULT_URL: &str = "http://localhost:5000";

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "carbonlog", about = "Track and review your carbon footprint")]
struct Args {
  /// Path to a TOML config file (url, user).
  #[arg(short, long, value_name = "FILE", global = true)]
  config: Option<std::path::PathBuf>,

  /// Base URL of the carbonlog server (default: http://localhost:5000).
  #[arg(long, env = "CARBONLOG_URL", global = true)]
  url: Option<String>,

  /// Your user id, forwarded as `x-user-id`.
  #[arg(long, env = "CARBONLOG_USER", global = true)]
  user: Option<Uuid>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// List every category, subcategory and emission factor.
  Factors,

  /// Preview the footprint of an activity without logging it.
  Estimate {
    category:    String,
    subcategory: String,
    /// Anything that is not a number counts as 0.
    amount:      String,
  },

  /// Log an activity.
  Log {
    category:    String,
    subcategory: String,
    amount:      f64,
    /// Defaults to the subcategory.
    #[arg(short, long)]
    description: Option<String>,
    /// `YYYY-MM-DD`; defaults to today.
    #[arg(long)]
    date:        Option<NaiveDate>,
  },

  /// List logged activities, newest first.
  Activities {
    #[arg(long)]
    category: Option<String>,
    #[arg(long)]
    limit:    Option<usize>,
  },

  /// Delete a logged activity.
  Delete { id: Uuid },

  /// Show the dashboard.
  Stats {
    /// Reference date; defaults to today on the server.
    #[arg(long)]
    as_of: Option<NaiveDate>,
  },

  /// Show reduction suggestions, largest saving first.
  Suggestions {
    #[arg(long)]
    category: Option<String>,
    #[arg(long)]
    limit:    Option<usize>,
  },
}

// ─── Config file ──────────────────────────────────────────────────────────────

/// Shape of the optional TOML config file.
#[derive(Deserialize, Default)]
struct ConfigFile {
  #[serde(default)]
  url:  String,
  user: Option<Uuid>,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy(),
    )
    .with_writer(std::io::stderr)
    .init();

  let args = Args::parse();

  let file_cfg: ConfigFile = if let Some(path) = &args.config {
    let raw = std::fs::read_to_string(path)
      .with_context(|| format!("reading config file {}", path.display()))?;
    toml::from_str(&raw).context("parsing config file")?
  } else {
    ConfigFile::default()
  };

  // CLI flags override config file, which overrides defaults.
  let api_config = ApiConfig {
    base_url: args
      .url
      .or_else(|| (!file_cfg.url.is_empty()).then(|| file_cfg.url.clone()))
      .unwrap_or_else(|| DEFAULT_URL.to_string()),
    user:     args.user.or(file_cfg.user),
  };
  tracing::debug!(base_url = %api_config.base_url, "resolved API config");

  run(args.command, api_config).await
}

async fn run(command: Command, api_config: ApiConfig) -> Result<()> {
  match command {
    Command::Factors => print!("{}", render::catalogue(&catalogue())),

    Command::Estimate { category, subcategory, amount } => {
      let amount = parse_amount(&amount);
      let est = estimate(&category, &subcategory, amount);
      println!("{}", render::estimate(&category, &subcategory, amount, &est));
    }

    Command::Log { category, subcategory, amount, description, date } => {
      let client = ApiClient::new(api_config)?;
      let input = ActivityInput {
        description: description.unwrap_or_else(|| subcategory.clone()),
        category,
        subcategory,
        amount,
        date: date.unwrap_or_else(|| Local::now().date_naive()),
      };
      let activity = client.log_activity(&input).await?;
      println!(
        "logged {} ({:.2} kg CO₂e)",
        activity.activity_id, activity.carbon_footprint
      );
    }

    Command::Activities { category, limit } => {
      let client = ApiClient::new(api_config)?;
      let items = client.list_activities(category.as_deref(), limit).await?;
      print!("{}", render::activities(&items));
    }

    Command::Delete { id } => {
      let client = ApiClient::new(api_config)?;
      client.delete_activity(id).await?;
      println!("deleted {id}");
    }

    Command::Stats { as_of } => {
      let client = ApiClient::new(api_config)?;
      let dashboard = client.dashboard(as_of).await?;
      print!("{}", render::dashboard(&dashboard));
    }

    Command::Suggestions { category, limit } => {
      let client = ApiClient::new(api_config)?;
      let items = client.suggestions(category.as_deref(), limit).await?;
      print!("{}", render::suggestions(&items));
    }
  }
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parses_estimate_with_non_numeric_amount() {
    let args = Args::try_parse_from(["carbonlog", "estimate", "food", "beef", "lots"]).unwrap();
    match args.command {
      Command::Estimate { amount, .. } => assert_eq!(parse_amount(&amount), 0.0),
      other => panic!("unexpected command {other:?}"),
    }
  }

  #[test]
  fn parses_log_with_date() {
    let args = Args::try_parse_from([
      "carbonlog", "log", "transport", "bus", "12.5", "--date", "2024-05-01",
    ])
    .unwrap();
    match args.command {
      Command::Log { amount, date, description, .. } => {
        assert_eq!(amount, 12.5);
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 5, 1));
        assert!(description.is_none());
      }
      other => panic!("unexpected command {other:?}"),
    }
  }

  #[test]
  fn config_file_user_is_optional() {
    let cfg: ConfigFile = toml::from_str("url = \"http://example.com\"").unwrap();
    assert_eq!(cfg.url, "http://example.com");
    assert!(cfg.user.is_none());
  }
}
