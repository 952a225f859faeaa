//! Core domain + application logic for the session remote-control bot.
//!
//! This crate is intentionally transport-agnostic. Telegram lives behind the
//! messaging port implemented in the adapter crate; the worker is reached
//! only through its shared [`session::SessionHandle`].

pub mod command;
pub mod config;
pub mod domain;
pub mod errors;
pub mod logging;
pub mod messaging;
pub mod recipient;
pub mod report;
pub mod security;
pub mod session;

pub use errors::{Error, Result};
