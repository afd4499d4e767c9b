mod tracing_setup;

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use reading_core::model::QuizContent;
use services::{AppServices, QuizService, QuizView, load_content_file};
use storage::DEFAULT_SLOT_KEY;
use ui::{App, UiApp, build_app_context};

use tracing_setup::{Verbosity, init_subscriber};

const WINDOW_TITLE: &str = "IELTS Reading Practice";
const DEFAULT_DB_FILE: &str = "reading.sqlite3";

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidDbUrl { raw: String },
    InvalidKey { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::InvalidKey { raw } => write!(f, "invalid --key value: {raw:?}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

struct DesktopApp {
    quiz: Arc<QuizService>,
}

impl UiApp for DesktopApp {
    fn quiz(&self) -> Arc<QuizService> {
        Arc::clone(&self.quiz)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Args {
    db_url: String,
    content: Option<PathBuf>,
    slot_key: String,
    verbose: bool,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- ui     [--db <sqlite_url>] [--content <file.json>] [--key <slot>] [-v]");
    eprintln!("  cargo run -p app -- status [--db <sqlite_url>] [--content <file.json>] [--key <slot>]");
    eprintln!("  cargo run -p app -- reset  [--db <sqlite_url>] [--content <file.json>] [--key <slot>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --db sqlite://<cwd>/{DEFAULT_DB_FILE}");
    eprintln!("  --content built-in Cambridge IELTS 20 demo");
    eprintln!("  --key {DEFAULT_SLOT_KEY}");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  READING_DB_URL, READING_CONTENT, READING_STORAGE_KEY, READING_LOG (or RUST_LOG)");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Ui,
    Status,
    Reset,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "ui" => Some(Self::Ui),
            "status" => Some(Self::Status),
            "reset" => Some(Self::Reset),
            _ => None,
        }
    }
}

impl Args {
    /// Defaults overridden by `READING_*` environment variables.
    fn from_env() -> Self {
        Self {
            db_url: std::env::var("READING_DB_URL")
                .ok()
                .filter(|value| !value.trim().is_empty())
                .map_or_else(|| normalize_sqlite_url(DEFAULT_DB_FILE.into()), normalize_sqlite_url),
            content: std::env::var_os("READING_CONTENT").map(PathBuf::from),
            slot_key: std::env::var("READING_STORAGE_KEY")
                .ok()
                .filter(|value| !value.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_SLOT_KEY.to_string()),
            verbose: false,
        }
    }

    /// Apply command-line flags on top of `defaults`.
    fn parse(args: &mut impl Iterator<Item = String>, defaults: Self) -> Result<Self, ArgsError> {
        let mut parsed = defaults;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    parsed.db_url = normalize_sqlite_url(value);
                }
                "--content" => {
                    parsed.content = Some(PathBuf::from(require_value(args, "--content")?));
                }
                "--key" => {
                    let value = require_value(args, "--key")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidKey { raw: value });
                    }
                    parsed.slot_key = value;
                }
                "-v" | "--verbose" => parsed.verbose = true,
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(parsed)
    }
}

fn normalize_sqlite_url(raw: String) -> String {
    if raw == "sqlite::memory:" || raw.starts_with("sqlite://") {
        return raw;
    }

    let trimmed = raw.trim().to_string();
    let path_str = trimmed
        .strip_prefix("sqlite:")
        .unwrap_or(trimmed.as_str())
        .to_string();
    let path = std::path::Path::new(&path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        }
        .into());
    }

    let path = std::path::Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }

    Ok(())
}

fn status_lines(view: &QuizView) -> Vec<String> {
    let mut lines = vec![
        format!("stage: {}", view.stage.as_str()),
        format!(
            "time left: {}{}",
            view.time_label,
            if view.paused { " (paused)" } else { "" }
        ),
        format!(
            "answered: {} / {} ({}%)",
            view.progress.attempted, view.progress.total, view.progress.percent
        ),
    ];
    if let Some(review) = &view.review {
        lines.push(format!(
            "score: {} / {}, band {}",
            review.correct, review.total, review.band
        ));
    }
    lines
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv: Vec<String> = std::env::args().skip(1).collect();

    // Default behavior: launching UI when no subcommand is provided.
    let cmd = match argv.first().map(String::as_str) {
        None => Command::Ui,
        Some("--help" | "-h") => {
            print_usage();
            return Ok(());
        }
        Some(first) if first.starts_with('-') => Command::Ui,
        Some(first) => Command::from_arg(first).ok_or_else(|| {
            eprintln!("unknown subcommand: {first}");
            print_usage();
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "unknown subcommand")
        })?,
    };

    if !argv.is_empty() && !argv[0].starts_with('-') {
        argv.remove(0);
    }

    let mut iter = argv.into_iter();
    let parsed = Args::parse(&mut iter, Args::from_env()).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    init_subscriber(Verbosity::from_flag(parsed.verbose));

    let content = match &parsed.content {
        Some(path) => load_content_file(path)?,
        None => QuizContent::cambridge_demo(),
    };

    // Open + migrate SQLite at startup. Keep this in the binary glue so core/services stay pure.
    prepare_sqlite_file(&parsed.db_url)?;
    let services = AppServices::new_sqlite(&parsed.db_url, content, &parsed.slot_key).await?;
    tracing::debug!(db = %parsed.db_url, key = %parsed.slot_key, "storage ready");

    match cmd {
        Command::Ui => {
            let app: Arc<dyn UiApp> = Arc::new(DesktopApp {
                quiz: services.quiz(),
            });
            let context = build_app_context(&app);

            let desktop_cfg = DesktopConfig::new().with_window(
                WindowBuilder::new()
                    .with_title(WINDOW_TITLE)
                    .with_always_on_top(false),
            );

            LaunchBuilder::desktop()
                .with_cfg(desktop_cfg)
                .with_context(context)
                .launch(App);
            Ok(())
        }
        Command::Status => {
            let view = services.quiz().view().await;
            for line in status_lines(&view) {
                println!("{line}");
            }
            Ok(())
        }
        Command::Reset => {
            services.quiz().reset().await?;
            println!("session cleared (key={})", parsed.slot_key);
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
