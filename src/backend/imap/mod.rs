//! IMAP backend module.
//!
//! This module contains the definition of the IMAP backend and its
//! configuration.

pub mod backend;
pub mod config;

pub use self::backend::{ImapBackend, ImapSession};
pub use self::config::ImapConfig;
