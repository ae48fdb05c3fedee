use anyhow::{Context, Result};
use chrono::FixedOffset;
use clap::{Parser, Subcommand};

use s3ls::config::DEFAULT_PAGE_SIZE;
use s3ls::format::{bytes_to_human, format_entry};
use s3ls::logging::{init_logging, LogLevel};
use s3ls::usage::DEFAULT_MAX_CONCURRENCY;
use s3ls::{list, total_size, Config, ListOptions, S3ListingClient, UsageOptions};

/// List objects and disk usage in S3 as a directory tree.
#[derive(Parser)]
#[command(name = "s3ls", version, about)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Delimiter splitting keys into directories
    #[arg(long, global = true, default_value = "/")]
    delimiter: String,

    /// Keys requested per listing page (1-1000)
    #[arg(long, global = true, default_value_t = DEFAULT_PAGE_SIZE)]
    page_size: i32,

    /// AWS region
    #[arg(long, global = true, env = "AWS_REGION")]
    region: Option<String>,

    /// Custom S3-compatible endpoint URL
    #[arg(long, global = true, env = "S3LS_ENDPOINT")]
    endpoint: Option<String>,

    /// AWS profile name
    #[arg(long, global = true, env = "AWS_PROFILE")]
    profile: Option<String>,

    #[arg(long, global = true, env = "AWS_ACCESS_KEY_ID", hide_env_values = true)]
    access_key: Option<String>,

    #[arg(long, global = true, env = "AWS_SECRET_ACCESS_KEY", hide_env_values = true)]
    secret_key: Option<String>,

    /// Display timestamps at this offset, e.g. +02:00 (default UTC)
    #[arg(long, global = true)]
    utc_offset: Option<FixedOffset>,

    #[arg(long, global = true, value_enum, default_value = "warn")]
    log_level: LogLevel,
}

#[derive(Subcommand)]
enum Command {
    /// List files under a path; `*` in the path matches any characters
    Ls {
        path: String,

        /// Recursively walk through directories
        #[arg(short, long)]
        recursive: bool,

        /// Show sizes in human readable format
        #[arg(short = 'H', long)]
        human: bool,
    },

    /// Total size of the files under a path
    Du {
        path: String,

        /// Include every subdirectory
        #[arg(short, long)]
        recursive: bool,

        /// Show the size in human readable format
        #[arg(short = 'H', long)]
        human: bool,

        /// Subdirectories summed concurrently
        #[arg(long, default_value_t = DEFAULT_MAX_CONCURRENCY)]
        concurrency: usize,
    },
}

impl Args {
    fn config(&self) -> Config {
        let mut config = Config::new().with_page_size(self.page_size);

        if let Some(region) = &self.region {
            config = config.with_region(region);
        }
        if let Some(endpoint) = &self.endpoint {
            config = config.with_endpoint(endpoint);
        }
        if let Some(profile) = &self.profile {
            config = config.with_profile(profile);
        }
        if let (Some(access_key), Some(secret_key)) = (&self.access_key, &self.secret_key) {
            config = config.with_credentials(access_key, secret_key);
        }
        if let Some(offset) = self.utc_offset {
            config = config.with_utc_offset(offset);
        }

        config
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log_level)?;

    let config = args.config();
    let client = S3ListingClient::from_config(&config).await;

    match args.command {
        Command::Ls {
            path,
            recursive,
            human,
        } => {
            let options = ListOptions::new()
                .with_delimiter(&args.delimiter)
                .with_recursive(recursive);

            let entries = list(&client, &path, &options)
                .await
                .with_context(|| format!("failed to list {path}"))?;

            for entry in &entries {
                println!("{}", format_entry(entry, human, config.utc_offset));
            }
        }

        Command::Du {
            path,
            recursive,
            human,
            concurrency,
        } => {
            let options = UsageOptions::new()
                .with_delimiter(&args.delimiter)
                .with_recursive(recursive)
                .with_max_concurrency(concurrency);

            let total = total_size(&client, &path, &options)
                .await
                .with_context(|| format!("failed to compute disk usage of {path}"))?;

            if human {
                println!("{}", bytes_to_human(total));
            } else {
                println!("{total}");
            }
        }
    }

    Ok(())
}
