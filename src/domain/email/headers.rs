//! Header decoding module.
//!
//! This module turns the Subject and From headers of a parsed email
//! into displayable text. Decoding never fails: a header that cannot
//! be decoded degrades to lossy text or to a placeholder.

use log::warn;
use mailparse::{MailHeaderMap, ParsedMail};

use super::email::DEFAULT_SUBJECT;

/// Decodes the Subject header of a parsed email. Encoded words are
/// decoded with their declared charset, one by one, then concatenated.
/// A word that cannot be decoded falls back to lossy utf-8. A missing
/// or empty subject falls back to [`DEFAULT_SUBJECT`].
pub(super) fn decode_subject(parsed: &ParsedMail) -> String {
    let headers = parsed.get_headers();
    let header = match headers.get_first_header("Subject") {
        Some(header) => header,
        None => return DEFAULT_SUBJECT.to_owned(),
    };

    let raw = header.get_value_raw();
    let subject = rfc2047_decoder::Decoder::new()
        .skip_encoded_word_length(true)
        .decode(raw)
        .unwrap_or_else(|err| {
            warn!("cannot decode subject, keeping it raw");
            warn!("{}", err);
            String::from_utf8_lossy(raw).to_string()
        });

    // collapses the folding whitespace of multiline headers
    let subject = subject.split_whitespace().collect::<Vec<_>>().join(" ");

    if subject.is_empty() {
        DEFAULT_SUBJECT.to_owned()
    } else {
        subject
    }
}

/// Decodes the From header of a parsed email into a `name <addr>`
/// pair. The name segment stays empty when the sender has no display
/// name. A From header that cannot be parsed as an address is kept as
/// is in the addr segment.
pub(super) fn decode_sender(parsed: &ParsedMail) -> String {
    let from = parsed
        .get_headers()
        .get_first_value("From")
        .unwrap_or_default();

    let sender = mailparse::addrparse(&from)
        .map_err(|err| {
            warn!("cannot parse sender {:?}, using it as is", from);
            warn!("{}", err);
        })
        .ok()
        .and_then(|addrs| addrs.extract_single_info());

    match sender {
        Some(sender) => format!(
            "{} <{}>",
            sender.display_name.unwrap_or_default(),
            sender.addr
        ),
        None => format!(" <{}>", from.trim()),
    }
}
