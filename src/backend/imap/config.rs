//! IMAP backend config module.
//!
//! This module contains the representation of the IMAP connection
//! parameters supplied by the user.

use std::result;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot get imap login: login is empty")]
    GetLoginEmptyError,
    #[error("cannot get imap password: password is empty")]
    GetPasswdEmptyError,
}

pub type Result<T> = result::Result<T, Error>;

/// Default mailbox selected right after login.
pub const DEFAULT_MAILBOX: &str = "INBOX";

/// Represents the IMAP backend configuration.
#[derive(Debug, Default, Clone, Eq, PartialEq)]
pub struct ImapConfig {
    /// Represents the IMAP server host.
    pub host: String,
    /// Represents the IMAP server port. The port must expose implicit
    /// TLS: the connection is encrypted from the first byte, no
    /// StartTLS upgrade is attempted.
    pub port: u16,
    /// Trusts any certificate.
    pub insecure: Option<bool>,
    /// Represents the IMAP server login.
    pub login: String,
    /// Represents the IMAP server password.
    pub passwd: String,
    /// Represents the mailbox to select after login. Defaults to
    /// INBOX.
    pub mailbox: Option<String>,
}

impl ImapConfig {
    /// Gets the IMAP login. Fails when empty, which is only detected
    /// at connection time.
    pub fn login(&self) -> Result<&str> {
        if self.login.is_empty() {
            return Err(Error::GetLoginEmptyError);
        }
        Ok(&self.login)
    }

    /// Gets the IMAP password. Fails when empty, which is only
    /// detected at connection time.
    pub fn passwd(&self) -> Result<&str> {
        if self.passwd.is_empty() {
            return Err(Error::GetPasswdEmptyError);
        }
        Ok(&self.passwd)
    }

    /// Gets the insecure IMAP option.
    pub fn insecure(&self) -> bool {
        self.insecure.unwrap_or_default()
    }

    /// Gets the name of the mailbox to select.
    pub fn mailbox(&self) -> String {
        self.mailbox
            .as_ref()
            .unwrap_or(&String::from(DEFAULT_MAILBOX))
            .to_owned()
    }
}
