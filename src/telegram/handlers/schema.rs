//! Dispatcher schema and handler chain builders

use teloxide::dispatching::{HandlerExt, UpdateFilterExt, UpdateHandler};
use teloxide::prelude::*;
use teloxide::types::Message;

use super::commands::handle_command;
use super::photo::handle_photo;
use super::types::{HandlerDeps, HandlerError};
use crate::telegram::bot::Command;

/// Creates the main dispatcher schema for the Telegram bot.
///
/// The same schema is used in production and in integration tests.
///
/// # Arguments
/// * `deps` - Handler dependencies (the photo pipeline)
///
/// # Returns
/// The complete handler tree for the bot
pub fn schema(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    let deps_messages = deps.clone();
    let deps_channel = deps;

    dptree::entry()
        // Command handler
        .branch(command_handler())
        // Photos in private chats, groups and supergroups
        .branch(photo_message_handler(deps_messages))
        // Photos posted to channels
        .branch(channel_photo_handler(deps_channel))
}

fn command_handler() -> UpdateHandler<HandlerError> {
    Update::filter_message()
        .filter_command::<Command>()
        .endpoint(handle_command)
}

fn photo_message_handler(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    Update::filter_message()
        .filter(|msg: Message| msg.photo().is_some())
        .endpoint(move |bot: Bot, msg: Message| {
            let deps = deps.clone();
            async move { handle_photo(bot, msg, deps).await }
        })
}

fn channel_photo_handler(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    Update::filter_channel_post()
        .filter(|msg: Message| msg.photo().is_some())
        .endpoint(move |bot: Bot, msg: Message| {
            let deps = deps.clone();
            async move { handle_photo(bot, msg, deps).await }
        })
}
