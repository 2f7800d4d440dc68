// src/main.rs

use std::io::{self, Read, Write};
use std::path::PathBuf;

use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use magazine::config::Config;
use magazine::error::AppError;
use magazine::utils::calendar::first_of_month;
use magazine::{is_embargoed, is_published, sanitize, subtract_months};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "magazine", version, about = "Embargo dates and rich-text cleaning for the magazine")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Sanitize HTML read from a file or stdin and print it.
    Clean {
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
    /// Print the embargo boundary: issues dated after it are still embargoed.
    Embargo {
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Defaults to MAGAZINE_EMBARGO_TIME_IN_MONTHS.
        #[arg(long, allow_negative_numbers = true)]
        months: Option<i32>,
    },
    /// Print the visibility of an issue as JSON.
    Status {
        #[arg(long)]
        issue_date: NaiveDate,

        #[arg(long, default_value_t = false)]
        unpublished: bool,

        #[arg(long)]
        today: Option<NaiveDate>,

        #[arg(long, allow_negative_numbers = true)]
        months: Option<i32>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;

    let file_appender = tracing_appender::rolling::daily(&config.log_dir, "magazine.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let env_filter = EnvFilter::new(&config.rust_log);
    // stdout carries command output, so console logs go to stderr
    let stderr_layer = fmt::layer().with_writer(io::stderr).with_target(false);
    let file_layer = fmt::layer().with_writer(non_blocking).with_ansi(false);

    // Initialize Tracing (Logging)
    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    tracing::info!(embargo_months = config.embargo_months, "configuration loaded");

    let cli = Cli::parse();
    let output = run(cli.command, &config, Local::now().date_naive())?;
    writeln!(io::stdout(), "{}", output)?;

    Ok(())
}

/// Executes one subcommand and returns what should be printed.
fn run(command: Commands, config: &Config, today: NaiveDate) -> Result<String, AppError> {
    let default_months = i32::try_from(config.embargo_months)
        .map_err(|_| AppError::Config(format!("embargo of {} months is too large", config.embargo_months)))?;

    match command {
        Commands::Clean { input } => {
            let raw = match input {
                Some(path) => std::fs::read_to_string(&path)?,
                None => {
                    let mut buf = String::new();
                    io::stdin().read_to_string(&mut buf)?;
                    buf
                }
            };

            let cleaned = sanitize(&raw);
            tracing::info!(input_len = raw.len(), output_len = cleaned.len(), "cleaned document");
            Ok(cleaned)
        }
        Commands::Embargo { date, months } => {
            let months = months.unwrap_or(default_months);
            let boundary = subtract_months(date.unwrap_or(today), months)?;
            Ok(boundary.to_string())
        }
        Commands::Status {
            issue_date,
            unpublished,
            today: on,
            months,
        } => {
            let issue_date = first_of_month(issue_date);
            let on = on.unwrap_or(today);
            let published = !unpublished;
            let months = months.unwrap_or(default_months);

            let status = serde_json::json!({
                "issue_date": issue_date,
                "today": on,
                "is_published": is_published(published, issue_date, on),
                "is_embargoed": is_embargoed(published, issue_date, on, months)?,
            });
            Ok(status.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
    }

    fn run_args(args: &[&str]) -> Result<String, AppError> {
        let cli = Cli::try_parse_from(std::iter::once("magazine").chain(args.iter().copied()))
            .expect("arguments parse");
        run(cli.command, &Config::default(), date(2010, 6, 10))
    }

    #[test]
    fn embargo_prints_boundary() {
        assert_eq!(run_args(&["embargo", "--date", "2010-03-31", "--months", "1"]).unwrap(), "2010-02-28");
        // configured two months before today
        assert_eq!(run_args(&["embargo"]).unwrap(), "2010-04-10");
    }

    #[test]
    fn negative_months_is_invalid_argument() {
        let result = run_args(&["embargo", "--months", "-1"]);
        assert!(matches!(result, Err(AppError::InvalidArgument(_))));

        let result = run_args(&["status", "--issue-date", "2010-05-01", "--months", "-1"]);
        assert!(matches!(result, Err(AppError::InvalidArgument(_))));
    }

    #[test]
    fn status_reports_visibility_as_json() {
        // Arrange & Act
        let output = run_args(&["status", "--issue-date", "2010-05-15"]).unwrap();
        let status: serde_json::Value = serde_json::from_str(&output).unwrap();

        // Assert: the date is normalised and May is still embargoed on June 10th
        assert_eq!(status["issue_date"], "2010-05-01");
        assert_eq!(status["today"], "2010-06-10");
        assert_eq!(status["is_published"], true);
        assert_eq!(status["is_embargoed"], true);
    }

    #[test]
    fn status_of_unpublished_issue() {
        let output = run_args(&["status", "--issue-date", "2009-01-01", "--unpublished", "--today", "2012-01-01"]).unwrap();
        let status: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(status["is_published"], false);
        assert_eq!(status["is_embargoed"], true);
    }

    #[test]
    fn clean_reads_input_file() {
        // Arrange
        let path = std::env::temp_dir().join(format!("magazine-clean-{}.html", std::process::id()));
        std::fs::write(&path, "<style>p{}</style><p onclick=\"x()\">hi</p>").unwrap();

        // Act
        let output = run_args(&["clean", "--input", path.to_str().unwrap()]);
        std::fs::remove_file(&path).ok();

        // Assert
        assert_eq!(output.unwrap(), "<p>hi</p>");
    }

    #[test]
    fn clean_missing_file_is_io_error() {
        let result = run_args(&["clean", "--input", "/nonexistent/magazine/input.html"]);
        assert!(matches!(result, Err(AppError::Io(_))));
    }
}
