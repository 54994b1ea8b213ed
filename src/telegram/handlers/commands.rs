//! Command handlers

use teloxide::prelude::*;
use teloxide::types::{Message, ReplyParameters};

use super::types::HandlerError;
use crate::telegram::bot::{Command, START_TEXT};

/// Handles parsed bot commands. Only `/start` exists; it never touches the pipeline.
pub(super) async fn handle_command(bot: Bot, msg: Message, cmd: Command) -> Result<(), HandlerError> {
    match cmd {
        Command::Start => {
            log::info!("/start from chat {}", msg.chat.id);
            bot.send_message(msg.chat.id, START_TEXT)
                .reply_parameters(ReplyParameters::new(msg.id))
                .await?;
        }
    }
    Ok(())
}
