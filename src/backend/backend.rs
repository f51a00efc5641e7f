//! Backend module.
//!
//! This module exposes the backend trait, the contract consumed by
//! presentation collaborators to read a mailbox.

use std::result;
use thiserror::Error;

use crate::{backend, email, Emails};

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    EmailError(#[from] email::Error),
    #[error(transparent)]
    ImapBackendError(#[from] backend::imap::backend::Error),
    #[error(transparent)]
    ImapConfigError(#[from] backend::imap::config::Error),
}

pub type Result<T> = result::Result<T, Error>;

pub trait Backend {
    /// Fetches and decodes the `count` most recent emails of the
    /// mailbox, ordered from the oldest to the most recent.
    fn fetch_last(&self, count: usize) -> Result<Emails>;

    /// Closes the underlying mailbox session.
    fn close(&self) -> Result<()>;
}
