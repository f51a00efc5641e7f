//! IMAP backend module.
//!
//! This module contains the definition of the IMAP backend: one
//! authenticated TLS session with one selected mailbox, from which the
//! most recent emails can be fetched and decoded.

use log::{debug, log_enabled, trace, warn, Level};
use native_tls::{TlsConnector, TlsStream};
use std::{
    net::TcpStream,
    result,
    sync::{Mutex, MutexGuard},
};
use thiserror::Error;
use utf7_imap::encode_utf7_imap as encode_utf7;

use crate::{backend, Backend, Emails, ImapConfig};

use super::config;

#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot create tls connector")]
    CreateTlsConnectorError(#[source] native_tls::Error),
    #[error("cannot connect to imap server")]
    ConnectImapServerError(#[source] imap::Error),
    #[error("cannot login to imap server")]
    LoginImapServerError(#[source] imap::Error),
    #[error("cannot select mailbox {1}")]
    SelectMailboxError(#[source] imap::Error, String),
    #[error("cannot lock imap session: {0}")]
    LockSessionError(String),
    #[error("cannot close imap session")]
    CloseImapSessionError(#[source] imap::Error),

    #[error(transparent)]
    ConfigError(#[from] config::Error),
}

pub type Result<T> = result::Result<T, Error>;

pub type ImapSession = imap::Session<TlsStream<TcpStream>>;

/// Represents the IMAP backend. Holds exactly one session, guarded by
/// a mutex: operations are serialized, one at a time per connection.
/// The backend is `Send + Sync`, so a caller can move a long fetch to
/// a worker thread and keep its own event loop responsive.
pub struct ImapBackend {
    session: Mutex<ImapSession>,
}

impl ImapBackend {
    /// Connects to the IMAP server over implicit TLS, logs in and
    /// selects the configured mailbox. All three steps must succeed,
    /// otherwise no backend is returned.
    pub fn connect(config: &ImapConfig) -> Result<Self> {
        let login = config.login()?;
        let passwd = config.passwd()?;

        let builder = TlsConnector::builder()
            .danger_accept_invalid_certs(config.insecure())
            .danger_accept_invalid_hostnames(config.insecure())
            .build()
            .map_err(Error::CreateTlsConnectorError)?;

        let mut client_builder = imap::ClientBuilder::new(&config.host, config.port);
        let client = client_builder
            .connect(|domain, tcp| {
                let connector = TlsConnector::connect(&builder, domain, tcp)?;
                Ok(connector)
            })
            .map_err(Error::ConnectImapServerError)?;
        debug!("connected to {}:{}", config.host, config.port);

        let mut session = client
            .login(login, passwd)
            .map_err(|res| Error::LoginImapServerError(res.0))?;
        session.debug = log_enabled!(Level::Trace);

        let mailbox = config.mailbox();
        let mailbox_utf7 = encode_utf7(mailbox.clone());
        session
            .select(&mailbox_utf7)
            .map_err(|err| Error::SelectMailboxError(err, mailbox.clone()))?;
        debug!("selected mailbox: {}", mailbox);

        Ok(Self {
            session: Mutex::new(session),
        })
    }

    fn session(&self) -> Result<MutexGuard<ImapSession>> {
        self.session
            .lock()
            .map_err(|err| Error::LockSessionError(err.to_string()))
    }
}

impl Backend for ImapBackend {
    /// Fetches and decodes the `count` most recent emails of the
    /// selected mailbox.
    ///
    /// Emails are enumerated with a uid search, sorted by ascending
    /// uid (servers are not required to return search results in
    /// order), then the trailing `count` uids are fetched one by one.
    /// The returned list goes from the oldest to the most recent email
    /// of that window. A failed enumeration yields an empty list, a
    /// failed fetch skips the email; both only leave a diagnostic in
    /// the logs.
    fn fetch_last(&self, count: usize) -> backend::Result<Emails> {
        debug!("fetching the {} most recent emails", count);

        if count == 0 {
            return Ok(Emails::default());
        }

        let mut session = self.session()?;

        let mut uids: Vec<u32> = match session.uid_search("ALL") {
            Ok(uids) => uids.into_iter().collect(),
            Err(err) => {
                warn!("cannot search email uids, skipping fetch");
                warn!("{}", err);
                return Ok(Emails::default());
            }
        };
        uids.sort_unstable();
        let uids = last_uids(uids, count);
        trace!("selected uids: {:?}", uids);

        let mut fetched = Vec::with_capacity(uids.len());
        for uid in uids {
            match session.uid_fetch(uid.to_string(), "BODY[]") {
                Ok(fetches) => fetched.push((uid, fetches)),
                Err(err) => {
                    warn!("cannot fetch email {}, skipping it", uid);
                    warn!("{}", err);
                }
            }
        }

        let emails = Emails::from_raws(
            fetched
                .iter()
                .map(|(uid, fetches)| (*uid, fetches.get(0).and_then(|fetch| fetch.body()))),
        );
        debug!("fetched {} emails", emails.len());

        Ok(emails)
    }

    fn close(&self) -> backend::Result<()> {
        debug!("closing imap session");
        let mut session = self.session()?;
        session.close().map_err(Error::CloseImapSessionError)?;
        Ok(())
    }
}

/// Keeps the `count` greatest uids, the most recently arrived emails.
/// Expects `uids` to be sorted in ascending order.
fn last_uids(mut uids: Vec<u32>, count: usize) -> Vec<u32> {
    let skip = uids.len().saturating_sub(count);
    uids.split_off(skip)
}
