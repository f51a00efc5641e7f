use log::warn;
use std::ops;

use crate::Email;

/// Represents a list of decoded emails, ordered from the oldest to
/// the most recent.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Emails {
    pub emails: Vec<Email>,
}

impl Emails {
    /// Decodes a batch of raw emails, preserving the input order. An
    /// email without raw bytes or whose raw bytes cannot be parsed is
    /// skipped with a diagnostic: one bad email never loses the whole
    /// batch.
    pub fn from_raws<'a, I>(raws: I) -> Self
    where
        I: IntoIterator<Item = (u32, Option<&'a [u8]>)>,
    {
        let emails = raws
            .into_iter()
            .filter_map(|(id, raw)| {
                let raw = match raw {
                    Some(raw) => raw,
                    None => {
                        warn!("cannot get body of email {}, skipping it", id);
                        return None;
                    }
                };
                match Email::from_raw(id, raw) {
                    Ok(email) => Some(email),
                    Err(err) => {
                        warn!("cannot decode email {}, skipping it", id);
                        warn!("{}", err);
                        None
                    }
                }
            })
            .collect();

        Self { emails }
    }
}

impl ops::Deref for Emails {
    type Target = Vec<Email>;

    fn deref(&self) -> &Self::Target {
        &self.emails
    }
}

impl ops::DerefMut for Emails {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.emails
    }
}

impl FromIterator<Email> for Emails {
    fn from_iter<I: IntoIterator<Item = Email>>(iter: I) -> Self {
        Self {
            emails: iter.into_iter().collect(),
        }
    }
}
