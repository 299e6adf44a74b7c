//! Core domain + application logic for the signboard bot.
//!
//! This crate is intentionally framework-agnostic. Telegram lives behind the
//! `MessagingPort` trait implemented in the adapter crate.

pub mod caption;
pub mod config;
pub mod domain;
pub mod errors;
pub mod events;
pub mod logging;
pub mod messaging;
pub mod render;
pub mod tracker;

pub use errors::{Error, Result};
