//! Photo intake: Telegram download plus the reply to the originating message

use async_trait::async_trait;
use teloxide::net::Download;
use teloxide::prelude::*;
use teloxide::types::{FileId, Message, ReplyParameters};

use super::types::{HandlerDeps, HandlerError};
use crate::analysis::{PhotoEvent, PhotoSource};

/// Largest file the public Bot API lets a bot download
pub const MAX_DOWNLOAD_BYTES: usize = 20 * 1024 * 1024;

/// Buffer size for a download, from the size Telegram reports
fn download_capacity(reported_size: u32) -> usize {
    (reported_size as usize).min(MAX_DOWNLOAD_BYTES)
}

/// Downloads photos through the Bot API (`getFile` + file endpoint).
pub struct TelegramPhotoSource {
    bot: Bot,
}

impl TelegramPhotoSource {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl PhotoSource for TelegramPhotoSource {
    async fn fetch(&self, file_id: &str) -> anyhow::Result<Vec<u8>> {
        let file = self.bot.get_file(FileId(file_id.to_string())).await?;

        let mut data = Vec::with_capacity(download_capacity(file.size));
        self.bot.download_file(&file.path, &mut data).await?;
        Ok(data)
    }
}

/// Builds a [`PhotoEvent`] from the largest size of a photo message.
///
/// Returns `None` when the message carries no photo.
pub fn photo_event_from_message(msg: &Message) -> Option<PhotoEvent> {
    let largest = msg.photo()?.last()?;

    Some(PhotoEvent::new(
        msg.chat.id.0,
        largest.file.id.0.clone(),
        msg.caption().map(str::to_string),
    ))
}

/// Short chat kind label for logs
pub fn chat_kind_label(msg: &Message) -> &'static str {
    let chat = &msg.chat;
    if chat.is_private() {
        "private"
    } else if chat.is_channel() {
        "channel"
    } else if chat.is_supergroup() {
        "supergroup"
    } else {
        "group"
    }
}

/// Runs the pipeline for one photo and replies with its outcome.
pub async fn handle_photo(bot: Bot, msg: Message, deps: HandlerDeps) -> Result<(), HandlerError> {
    let Some(event) = photo_event_from_message(&msg) else {
        return Ok(());
    };

    log::info!("Received photo in chat: {} - {}", chat_kind_label(&msg), msg.chat.id);

    let reply = deps.pipeline.handle(&event).await;

    if let Err(e) = bot
        .send_message(msg.chat.id, reply)
        .reply_parameters(ReplyParameters::new(msg.id))
        .await
    {
        log::error!("Failed to send reply to chat {}: {}", msg.chat.id, e);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn message(value: serde_json::Value) -> Message {
        serde_json::from_value(value).unwrap()
    }

    fn photo_sizes() -> serde_json::Value {
        json!([
            {"file_id": "small-id", "file_unique_id": "s", "file_size": 1200, "width": 90, "height": 67},
            {"file_id": "medium-id", "file_unique_id": "m", "file_size": 15000, "width": 320, "height": 240},
            {"file_id": "large-id", "file_unique_id": "l", "file_size": 90000, "width": 1280, "height": 960}
        ])
    }

    #[test]
    fn test_download_capacity_is_capped() {
        assert_eq!(download_capacity(90_000), 90_000);
        assert_eq!(download_capacity(u32::MAX), MAX_DOWNLOAD_BYTES);
    }

    #[test]
    fn test_private_photo_with_caption() {
        let msg = message(json!({
            "message_id": 7,
            "date": 1735992000,
            "chat": {"id": 123456789, "type": "private", "first_name": "Test"},
            "from": {"id": 123456789, "is_bot": false, "first_name": "Test"},
            "photo": photo_sizes(),
            "caption": "ужин в 20:00"
        }));

        let event = photo_event_from_message(&msg).unwrap();
        assert_eq!(event.chat_id, 123456789);
        assert_eq!(event.file_id, "large-id");
        assert_eq!(event.caption.as_deref(), Some("ужин в 20:00"));
        assert_eq!(chat_kind_label(&msg), "private");
    }

    #[test]
    fn test_channel_post_without_caption() {
        let msg = message(json!({
            "message_id": 3,
            "date": 1735992000,
            "chat": {"id": -1001234567890i64, "type": "channel", "title": "Meals"},
            "photo": photo_sizes()
        }));

        let event = photo_event_from_message(&msg).unwrap();
        assert_eq!(event.chat_id, -1001234567890);
        assert_eq!(event.file_id, "large-id");
        assert_eq!(event.caption, None);
        assert_eq!(chat_kind_label(&msg), "channel");
    }

    #[test]
    fn test_text_message_has_no_photo() {
        let msg = message(json!({
            "message_id": 8,
            "date": 1735992000,
            "chat": {"id": -100555, "type": "supergroup", "title": "Diet club"},
            "from": {"id": 1, "is_bot": false, "first_name": "Test"},
            "text": "привет"
        }));

        assert!(photo_event_from_message(&msg).is_none());
        assert_eq!(chat_kind_label(&msg), "supergroup");
    }
}
