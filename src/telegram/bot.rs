//! Bot initialization
//!
//! This module contains:
//! - Command enum definition
//! - Bot instance creation
//! - Command list registration

use reqwest::ClientBuilder;
use secrecy::ExposeSecret;
use teloxide::prelude::*;
use teloxide::types::BotCommand;
use teloxide::utils::command::BotCommands;

use crate::core::config::Config;
use crate::core::error::AppResult;

/// Reply to `/start`
pub const START_TEXT: &str = "Send me an image (JPG or WebP), and I'll analyze it for you.";

/// Bot commands enum with descriptions
#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "Я умею:")]
pub enum Command {
    #[command(description = "как пользоваться ботом")]
    Start,
}

/// Creates a Bot instance with custom or default API URL
///
/// # Returns
/// * `Ok(Bot)` - Successfully created bot instance
/// * `Err(AppError::Http)` - Failed to build the HTTP client
pub fn create_bot(config: &Config) -> AppResult<Bot> {
    // Long polling keeps the request open for a while, so the timeout must exceed it.
    let client = ClientBuilder::new().timeout(config.http_timeout).build()?;
    let bot = Bot::with_client(config.telegram_token.expose_secret(), client);

    let bot = match &config.bot_api_url {
        Some(url) => {
            log::info!("Using custom Bot API URL: {}", url);
            bot.set_api_url(url.clone())
        }
        None => bot,
    };

    Ok(bot)
}

/// Sets up bot commands in Telegram UI
///
/// # Returns
/// * `Ok(())` - Commands set successfully
/// * `Err(AppError::Telegram)` - Failed to set commands
pub async fn setup_bot_commands(bot: &Bot) -> AppResult<()> {
    bot.set_my_commands(vec![BotCommand::new("start", "как пользоваться ботом")])
        .await?;

    Ok(())
}
