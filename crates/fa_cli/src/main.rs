use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing::{error, info};

use fa_core::{storage, CompletionModel, Result};
use fa_crew::{Crew, CrewConfig};
use fa_fetcher::NewsApiClient;
use fa_web::AppState;

#[derive(Debug, Clone)]
struct HumanDuration(Duration);

impl FromStr for HumanDuration {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let mut total_seconds = 0u64;
        let mut digits = String::new();

        for c in s.trim().chars() {
            if c.is_ascii_digit() {
                digits.push(c);
                continue;
            }
            let value: u64 = digits
                .parse()
                .map_err(|_| format!("invalid duration: {s}"))?;
            digits.clear();
            total_seconds += match c {
                's' => value,
                'm' => value * 60,
                'h' => value * 3600,
                'd' => value * 86400,
                _ => return Err(format!("invalid duration unit: {c}")),
            };
        }

        // A bare number means seconds
        if !digits.is_empty() {
            total_seconds += digits
                .parse::<u64>()
                .map_err(|_| format!("invalid duration: {s}"))?;
        }

        if total_seconds == 0 {
            return Err("duration must be positive".to_string());
        }
        Ok(HumanDuration(Duration::from_secs(total_seconds)))
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Financial news pipeline", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Fetch news from the search API and stage a raw batch in object storage
    Fetch {
        /// Bucket that receives the raw batches
        #[arg(long)]
        s3_bucket: String,
        /// Override the news API endpoint
        #[arg(long)]
        base_url: Option<String>,
        /// Run periodically with the given interval (e.g. 1h, 30m, 1h15m)
        #[arg(long)]
        interval: Option<HumanDuration>,
    },
    /// Transform raw JSON batches into date-partitioned parquet
    Etl {
        /// Storage URL of the raw batches
        #[arg(long)]
        input_path: String,
        /// Storage URL that receives the partitioned output
        #[arg(long)]
        output_path: String,
    },
    /// Serve the ticker analysis API
    Serve {
        #[arg(long, default_value = "0.0.0.0:8000")]
        addr: String,
        /// Model backend: "dummy" or an OpenAI-compatible model id
        #[arg(long, default_value = "gpt-4o-mini")]
        model: String,
        /// Directory with agents.yaml and tasks.yaml overrides
        #[arg(long)]
        config_dir: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Fetch {
            s3_bucket,
            base_url,
            interval,
        } => {
            let Ok(api_key) = std::env::var("NEWS_API_KEY") else {
                error!("NEWS_API_KEY environment variable not set");
                std::process::exit(1);
            };
            let client = match base_url {
                Some(base_url) => NewsApiClient::with_base_url(api_key, base_url),
                None => NewsApiClient::new(api_key),
            };
            let location = storage::bucket_location(&s3_bucket)?;

            if let Some(interval) = interval {
                info!(
                    "Running in periodic mode every {}s",
                    interval.0.as_secs()
                );
                loop {
                    if let Err(e) = fa_fetcher::run(&client, &location).await {
                        error!("Fetch cycle failed: {e}");
                    }
                    info!("Waiting {}s before the next fetch", interval.0.as_secs());
                    tokio::time::sleep(interval.0).await;
                }
            } else {
                fa_fetcher::run(&client, &location).await?;
            }
        }
        Commands::Etl {
            input_path,
            output_path,
        } => {
            let input = storage::resolve_url(&input_path)?;
            let output = storage::resolve_url(&output_path)?;
            let summary = fa_etl::run_job(&input, &output).await?;
            info!(
                "✅ Wrote {} records across {} partitions ({} raw, {} filtered, {} duplicates, {} bad timestamps)",
                summary.records_written,
                summary.partitions_written,
                summary.raw_records,
                summary.dropped_quality,
                summary.dropped_duplicates,
                summary.unparseable_timestamps
            );
        }
        Commands::Serve {
            addr,
            model,
            config_dir,
        } => {
            let api_key = std::env::var("OPENAI_API_KEY").ok();
            let model = fa_crew::create_model(&model, api_key)?;
            info!("🧠 Model backend initialized (using {})", model.name());

            let config = match config_dir {
                Some(dir) => CrewConfig::load_dir(&dir)?,
                None => CrewConfig::load_default()?,
            };
            let crew = Crew::from_config(&config, model)?;
            fa_web::serve(AppState::new(crew), &addr).await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_human_durations() {
        assert_eq!(
            "1h".parse::<HumanDuration>().unwrap().0,
            Duration::from_secs(3600)
        );
        assert_eq!(
            "1h15m30s".parse::<HumanDuration>().unwrap().0,
            Duration::from_secs(3600 + 900 + 30)
        );
        assert_eq!(
            "90".parse::<HumanDuration>().unwrap().0,
            Duration::from_secs(90)
        );
    }

    #[test]
    fn rejects_bad_durations() {
        assert!("".parse::<HumanDuration>().is_err());
        assert!("h".parse::<HumanDuration>().is_err());
        assert!("5x".parse::<HumanDuration>().is_err());
        assert!("0s".parse::<HumanDuration>().is_err());
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
