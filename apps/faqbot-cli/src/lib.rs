//! Interactive surface for the FAQ bot.

pub mod chat;
