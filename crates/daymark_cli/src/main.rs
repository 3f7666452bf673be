//! Command-line driver for the annotation engine.
//!
//! # Responsibility
//! - Verify `daymark_core` linkage (`ping`).
//! - Annotate one month of a notes folder the way a calendar view would.

use chrono::{Datelike, Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use daymark_core::{
    default_log_level, init_logging, CalendarSource, DailyNoteSource, DayMetadata,
    DocumentRepository, FsDailyNoteRepository, Settings, SharedActiveDocument,
    DEFAULT_DATE_FORMAT,
};
use log::{info, warn};
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

const QUIET_LOG_LEVEL: &str = "warn";

#[derive(Debug, Parser)]
#[command(name = "daymark", version, about = "Annotate calendar days from daily notes")]
struct Cli {
    /// Log level (trace|debug|info|warn|error).
    #[arg(long, global = true, env = "DAYMARK_LOG_LEVEL")]
    log_level: Option<String>,

    /// Absolute directory for rotating log files; stderr when omitted.
    #[arg(long, global = true, env = "DAYMARK_LOG_DIR")]
    log_dir: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the core version.
    Ping,
    /// Annotate every day of one month.
    Month(MonthArgs),
}

#[derive(Debug, Args)]
struct MonthArgs {
    /// Folder holding the daily notes.
    #[arg(long)]
    notes_dir: PathBuf,

    /// Month to annotate as YYYY-MM. Defaults to the current month.
    #[arg(long)]
    month: Option<String>,

    /// JSON settings document (`{"wordsPerDot": 250}`).
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Overrides `wordsPerDot` from the settings document.
    #[arg(long, allow_negative_numbers = true)]
    words_per_dot: Option<f64>,

    /// chrono format of note file names.
    #[arg(long, default_value = DEFAULT_DATE_FORMAT)]
    date_format: String,

    /// Day whose note is treated as the focused document.
    #[arg(long)]
    active: Option<NaiveDate>,

    /// Emit a JSON object keyed by date instead of text lines.
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = cli.log_level.as_deref().unwrap_or(match cli.log_dir {
        Some(_) => default_log_level(),
        None => QUIET_LOG_LEVEL,
    });
    if let Err(err) = init_logging(level, cli.log_dir.as_deref()) {
        eprintln!("daymark: {err}");
        return ExitCode::FAILURE;
    }

    let outcome = match cli.command {
        Command::Ping => {
            println!("daymark_core version={}", daymark_core::core_version());
            Ok(0)
        }
        Command::Month(args) => annotate_month(args).await,
    };

    match outcome {
        Ok(0) => ExitCode::SUCCESS,
        Ok(failed_days) => {
            eprintln!("daymark: {failed_days} day(s) shown without markers after read failures");
            ExitCode::FAILURE
        }
        Err(err) => {
            eprintln!("daymark: {err}");
            ExitCode::FAILURE
        }
    }
}

/// Annotated days of one month, in calendar order.
struct MonthReport {
    rows: Vec<(NaiveDate, Arc<DayMetadata>)>,
    failed_days: usize,
}

/// Annotates every day of the month starting at `first_day`.
///
/// A day whose note cannot be read is rendered without markers and the
/// failure is reported on stderr; the remaining days are still annotated.
async fn collect_month(source: &dyn CalendarSource, first_day: NaiveDate) -> MonthReport {
    let mut report = MonthReport {
        rows: Vec::new(),
        failed_days: 0,
    };
    for day in days_of_month(first_day) {
        let metadata = match source.get_metadata(day).await {
            Ok(metadata) => metadata,
            Err(err) => {
                warn!("event=annotate_day module=cli status=error date={day} error={err}");
                eprintln!("daymark: notice: {err}");
                report.failed_days += 1;
                Arc::new(DayMetadata::empty())
            }
        };
        report.rows.push((day, metadata));
    }
    report
}

/// Prints the month and returns the number of days that failed to read.
async fn annotate_month(args: MonthArgs) -> Result<usize, Box<dyn Error>> {
    let mut settings = match &args.settings {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    if let Some(words_per_dot) = args.words_per_dot {
        settings.words_per_dot = words_per_dot;
    }

    let first_day = first_day_of_month(args.month.as_deref())?;
    let repo = Arc::new(FsDailyNoteRepository::open_with_format(
        &args.notes_dir,
        args.date_format.as_str(),
    )?);
    let active = SharedActiveDocument::new();
    if let Some(day) = args.active {
        active.set(repo.resolve_document_for_date(day).as_ref());
    }
    info!(
        "event=annotate_month module=cli status=start month={} notes={}",
        first_day.format("%Y-%m"),
        repo.len()
    );

    let source = DailyNoteSource::new(repo, active, settings);
    let report = collect_month(&source, first_day).await;

    if args.json {
        let mut object = serde_json::Map::new();
        for (day, metadata) in &report.rows {
            object.insert(day.to_string(), serde_json::to_value(metadata.as_ref())?);
        }
        println!("{}", serde_json::to_string_pretty(&object)?);
    } else {
        for (day, metadata) in &report.rows {
            println!("{}", render_line(*day, metadata));
        }
    }
    Ok(report.failed_days)
}

fn first_day_of_month(month: Option<&str>) -> Result<NaiveDate, Box<dyn Error>> {
    match month {
        Some(value) => NaiveDate::parse_from_str(&format!("{}-01", value.trim()), "%Y-%m-%d")
            .map_err(|err| format!("invalid month `{value}`, expected YYYY-MM: {err}").into()),
        None => {
            let today = Local::now().date_naive();
            today
                .with_day(1)
                .ok_or_else(|| "failed to compute first day of current month".into())
        }
    }
}

fn days_of_month(first_day: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    first_day
        .iter_days()
        .take_while(move |day| day.month() == first_day.month())
}

fn render_line(day: NaiveDate, metadata: &DayMetadata) -> String {
    let mut line = day.to_string();
    if !metadata.classes.is_empty() {
        let classes: Vec<&str> = metadata.classes.iter().map(String::as_str).collect();
        line.push_str(&format!(" [{}]", classes.join(" ")));
    }
    for tag in &metadata.data_attributes {
        line.push_str(&format!(" #{tag}"));
    }
    if !metadata.dots.is_empty() {
        line.push(' ');
        line.extend(
            metadata
                .dots
                .iter()
                .map(|dot| if dot.is_filled { '●' } else { '○' }),
        );
    }
    line
}
