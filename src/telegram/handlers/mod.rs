//! Telegram update handlers

mod commands;
pub mod photo;
pub mod schema;
pub mod types;

pub use photo::{handle_photo, photo_event_from_message, TelegramPhotoSource};
pub use schema::schema;
pub use types::{HandlerDeps, HandlerError};
