use mailparse::ParsedMail;
use std::result;
use thiserror::Error;

use super::{headers, parts};

#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot parse email from raw data")]
    ParseRawEmailError(#[source] mailparse::MailParseError),
}

pub type Result<T> = result::Result<T, Error>;

/// Subject of an email whose Subject header is missing or empty.
pub const DEFAULT_SUBJECT: &str = "<No subject>";

/// Body of an email without any plain text part.
pub const DEFAULT_BODY: &str = "No content available in this email.";

/// Representation of a decoded email. Every field holds fully decoded
/// text: no encoded word nor raw byte payload ever reaches a caller.
/// The record is a plain value, built once and never mutated.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Email {
    /// Represents the uid of the email within its mailbox.
    pub id: u32,
    /// Represents the decoded Subject header.
    pub subject: String,
    /// Represents the first sender, formatted `name <addr>`. The name
    /// segment is empty when the sender has no display name.
    pub sender: String,
    /// Represents the content of the first plain text part.
    pub body: String,
}

impl Email {
    /// Decodes an email from its raw RFC 5322 representation. Parsing
    /// the raw bytes is the only way this can fail: header and body
    /// decoding always degrade to placeholders or lossy text instead
    /// of erroring out.
    pub fn from_raw(id: u32, raw: &[u8]) -> Result<Self> {
        let parsed = mailparse::parse_mail(raw).map_err(Error::ParseRawEmailError)?;
        Ok(Self::from_parsed_mail(id, &parsed))
    }

    pub fn from_parsed_mail(id: u32, parsed: &ParsedMail) -> Self {
        Self {
            id,
            subject: headers::decode_subject(parsed),
            sender: headers::decode_sender(parsed),
            body: parts::first_text_plain_body(parsed)
                .unwrap_or_else(|| DEFAULT_BODY.to_owned()),
        }
    }
}
