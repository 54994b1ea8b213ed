use anyhow::Result;
use dotenvy::dotenv;
use std::sync::Arc;
use teloxide::prelude::*;

use dietolog::analysis::{build_pipeline, LocalFileSource, PhotoEvent};
use dietolog::cli::{Cli, Commands};
use dietolog::core::{init_console_logger, init_logger, AnalysisConfig, AppError, Config};
use dietolog::telegram::{create_bot, schema, setup_bot_commands, HandlerDeps, TelegramPhotoSource};

/// Main entry point for the Telegram bot
///
/// Parses CLI arguments and dispatches to appropriate subcommand.
///
/// # Errors
/// Returns an error if initialization fails (configuration, logging, HTTP clients).
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse_args();

    // Log panics from handler tasks instead of losing them on stderr
    std::panic::set_hook(Box::new(|panic_info| {
        log::error!("Panic caught: {:?}", panic_info);
        if let Some(location) = panic_info.location() {
            log::error!("Panic at {}:{}:{}", location.file(), location.line(), location.column());
        }
    }));

    // Load environment variables from .env if present
    let _ = dotenv();

    match cli.command {
        Some(Commands::Run) | None => run_bot().await,
        Some(Commands::Analyze { file, caption }) => run_cli_analyze(file, caption).await,
    }
}

/// Starts long polling and serves updates until Ctrl+C
async fn run_bot() -> Result<()> {
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            let _ = init_console_logger();
            log::error!("Invalid configuration: {}", e);
            return Err(AppError::from(e).into());
        }
    };

    init_logger(&config.log_file_path)?;
    log::info!("Starting bot...");

    let bot = create_bot(&config)?;
    let source = Arc::new(TelegramPhotoSource::new(bot.clone()));
    let pipeline = build_pipeline(&config.analysis(), source)?;
    let deps = HandlerDeps::new(Arc::new(pipeline));

    if let Err(e) = setup_bot_commands(&bot).await {
        log::warn!("Failed to register bot commands: {}", e);
    }

    log::info!("Bot is running...");

    Dispatcher::builder(bot, schema(deps))
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    log::info!("Dispatcher shutdown gracefully");
    Ok(())
}

/// Runs the pipeline once on a local file and prints the reply
async fn run_cli_analyze(file: std::path::PathBuf, caption: Option<String>) -> Result<()> {
    init_console_logger()?;

    let config = AnalysisConfig::from_env().map_err(AppError::from)?;
    let pipeline = build_pipeline(&config, Arc::new(LocalFileSource))?;
    let event = PhotoEvent::new(0, file.to_string_lossy(), caption);

    match pipeline.run(&event).await {
        Ok(verdict) => {
            println!("{}", verdict);
            Ok(())
        }
        Err(e) => {
            println!("{}", e.user_message());
            Err(AppError::from(e).into())
        }
    }
}
