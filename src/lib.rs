//! DotaCounterBot: Telegram transport a CLI nad prediction enginem.

pub mod commands;
pub mod config;
pub mod format;
pub mod handlers;
pub mod telegram;
