mod logging;
mod render;
mod settings;

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use querygate_core::{
    Error as CoreError, StatementCategory, check_select, classify, redact_connection_string,
    sanitize,
};
use querygate_engine::{CancellationToken, Pipeline};
use querygate_llm::{GeminiClient, GeminiOptions, GenerationError};
use querygate_store::{SeedMode, SqliteStore, Store, StoreOptions, seed_demo};
use thiserror::Error;

use logging::init_logging;
use settings::{Settings, load_or_create_settings};

const API_KEY_ENV: &str = "GEMINI_API_KEY";

#[derive(Debug, Error)]
enum CliError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("core error: {0}")]
    Core(#[from] CoreError),
    #[error("generation backend error: {0}")]
    Generation(#[from] GenerationError),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("toml decode error: {0}")]
    TomlDecode(#[from] toml::de::Error),
    #[error("toml encode error: {0}")]
    TomlEncode(#[from] toml::ser::Error),
    #[error("logging error: {0}")]
    Logging(String),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

type CliResult<T> = std::result::Result<T, CliError>;

#[derive(Parser, Debug)]
#[command(name = "querygate", version, about = "Natural-language requests to safety-checked SQL")]
struct Cli {
    /// Settings file; created with defaults when missing.
    #[arg(long, global = true, default_value = "querygate.toml")]
    config: PathBuf,
    /// Database connection string, overriding the settings file.
    #[arg(long, global = true, value_name = "CONNECTION_STRING")]
    db: Option<String>,
    /// Append JSON logs to this file instead of logging to stderr.
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the current table/column listing.
    Schema(SchemaArgs),
    /// Turn a request into SQL with the generator, check it, and run it.
    Ask(AskArgs),
    /// Sanitize, classify and gate a statement without running it.
    Check(CheckArgs),
    /// Create the demo tables.
    Seed(SeedArgs),
}

#[derive(Args, Debug)]
struct SchemaArgs {
    /// Print JSON instead of the compact form.
    #[arg(long, default_value_t = false)]
    json: bool,
}

#[derive(Args, Debug)]
struct AskArgs {
    /// The natural-language request.
    #[arg(required = true, num_args = 1..)]
    request: Vec<String>,
    /// Gemini API key; defaults to $GEMINI_API_KEY.
    #[arg(long)]
    api_key: Option<String>,
    /// Model name, overriding the settings file.
    #[arg(long)]
    model: Option<String>,
    /// Print the full report as JSON.
    #[arg(long, default_value_t = false)]
    json: bool,
}

#[derive(Args, Debug)]
struct CheckArgs {
    /// Raw text as a generator might return it.
    text: String,
}

#[derive(Args, Debug)]
struct SeedArgs {
    /// Also replace customers/orders with the sample rows.
    #[arg(long, default_value_t = false)]
    sample_data: bool,
}

#[tokio::main]
async fn main() -> Result<ExitCode, CliError> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_deref())?;

    match &cli.command {
        Command::Check(args) => Ok(run_check(args)),
        Command::Schema(args) => {
            let store = open_store(&cli).await?;
            run_schema(&store, args).await
        }
        Command::Seed(args) => {
            let store = open_store(&cli).await?;
            run_seed(&store, args).await
        }
        Command::Ask(args) => run_ask(&cli, args).await,
    }
}

fn load_settings(cli: &Cli) -> CliResult<Settings> {
    let mut settings = load_or_create_settings(&cli.config)?;
    if let Some(db) = &cli.db {
        settings.database = db.clone();
    }
    Ok(settings)
}

async fn open_store(cli: &Cli) -> CliResult<SqliteStore> {
    let settings = load_settings(cli)?;
    connect(&settings).await
}

async fn connect(settings: &Settings) -> CliResult<SqliteStore> {
    let connection = redact_connection_string(&settings.database);
    tracing::info!(event = "store_connecting", connection = %connection.redacted);
    Ok(SqliteStore::connect(&StoreOptions::new(&settings.database)).await?)
}

async fn run_schema(store: &SqliteStore, args: &SchemaArgs) -> CliResult<ExitCode> {
    let schema = store.introspect().await?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&schema)?);
    } else {
        print!("{}", render::render_schema(&schema));
    }
    Ok(ExitCode::SUCCESS)
}

async fn run_seed(store: &SqliteStore, args: &SeedArgs) -> CliResult<ExitCode> {
    let mode = if args.sample_data {
        SeedMode::WithSampleData
    } else {
        SeedMode::SchemaOnly
    };
    let statements = seed_demo(store, mode).await?;
    println!("Seeded demo tables ({statements} statements).");
    print!("{}", render::render_schema(&store.introspect().await?));
    Ok(ExitCode::SUCCESS)
}

fn run_check(args: &CheckArgs) -> ExitCode {
    let statement = sanitize(&args.text);
    if statement.is_empty() {
        println!("Nothing to execute: no statement was produced.");
        return ExitCode::FAILURE;
    }

    let category = classify(&statement);
    println!("Statement: {statement}");
    println!("Type:      {category}");

    let verdict = match category {
        StatementCategory::Unknown => Err("needs manual review".to_string()),
        StatementCategory::Select => check_select(&statement)
            .map(|()| "passes the read gate".to_string())
            .map_err(|reason| format!("blocked: {reason}")),
        _ => Ok("write statement, executed without the read gate".to_string()),
    };

    match verdict {
        Ok(message) => {
            println!("Verdict:   {message}");
            ExitCode::SUCCESS
        }
        Err(message) => {
            println!("Verdict:   {message}");
            ExitCode::FAILURE
        }
    }
}

async fn run_ask(cli: &Cli, args: &AskArgs) -> CliResult<ExitCode> {
    let mut settings = load_settings(cli)?;
    if let Some(model) = &args.model {
        settings.model = model.clone();
    }

    let api_key = match args.api_key.clone() {
        Some(key) => key,
        None => std::env::var(API_KEY_ENV).map_err(|_| {
            CliError::InvalidConfig(format!("set {API_KEY_ENV} or pass --api-key"))
        })?,
    };

    let mut options = GeminiOptions::new(api_key);
    options.base_url = settings.base_url.clone();
    options.model = settings.model.clone();
    options.timeout = settings.pipeline.generation_timeout() + Duration::from_secs(1);
    let generator = GeminiClient::new(options)?;

    let store = connect(&settings).await?;
    let pipeline = Pipeline::new(generator, store, settings.pipeline.clone());

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            on_interrupt.cancel();
        }
    });

    let request = args.request.join(" ");
    let report = pipeline.run_with_cancel(&request, &cancel).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render::render_report(&report));
    }

    Ok(if report.outcome.is_failure() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}
