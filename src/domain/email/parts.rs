use log::warn;
use mailparse::ParsedMail;

/// Iterates over all the parts of a parsed email, depth first, the
/// root part included.
#[derive(Debug)]
pub struct PartsIterator<'a> {
    stack: Vec<&'a ParsedMail<'a>>,
}

impl<'a> PartsIterator<'a> {
    pub fn new(part: &'a ParsedMail<'a>) -> Self {
        Self { stack: vec![part] }
    }
}

impl<'a> Iterator for PartsIterator<'a> {
    type Item = &'a ParsedMail<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let part = self.stack.pop()?;
        for subpart in part.subparts.iter().rev() {
            self.stack.push(subpart)
        }
        Some(part)
    }
}

/// Finds the first leaf part with a plain text content type and
/// decodes its payload with the declared charset. A payload that
/// cannot be decoded with its charset falls back to lossy utf-8.
/// Returns `None` when the email contains no plain text part at all.
pub fn first_text_plain_body(parsed: &ParsedMail) -> Option<String> {
    let part = PartsIterator::new(parsed)
        .find(|part| part.subparts.is_empty() && part.ctype.mimetype == "text/plain")?;

    match part.get_body() {
        Ok(body) => Some(body),
        Err(err) => {
            warn!(
                "cannot decode body with charset {}, falling back to lossy utf-8",
                part.ctype.charset,
            );
            warn!("{}", err);
            part.get_body_raw()
                .ok()
                .map(|raw| String::from_utf8_lossy(&raw).to_string())
        }
    }
}

#[cfg(test)]
mod test_parts_iterator {
    use super::PartsIterator;

    #[test]
    fn test_no_subpart() {
        let email = concat!(
            "MIME-Version: 1.0\r\n",
            "From: from@localhost\r\n",
            "Subject: subject\r\n",
            "\r\n",
            "Hello!",
        )
        .as_bytes();
        let parsed = mailparse::parse_mail(email).unwrap();

        let parts = PartsIterator::new(&parsed).collect::<Vec<_>>();

        assert_eq!(1, parts.len());
        assert_eq!("text/plain", parts[0].ctype.mimetype);
    }

    #[test]
    fn test_nested_subparts_depth_first() {
        let email = concat!(
            "MIME-Version: 1.0\r\n",
            "From: from@localhost\r\n",
            "Subject: subject\r\n",
            "Content-Type: multipart/mixed; boundary=outer\r\n",
            "\r\n",
            "--outer\r\n",
            "Content-Type: multipart/alternative; boundary=inner\r\n",
            "\r\n",
            "--inner\r\n",
            "Content-Type: text/html\r\n",
            "\r\n",
            "<h1>Hello!</h1>\r\n",
            "--inner\r\n",
            "Content-Type: text/plain\r\n",
            "\r\n",
            "Hello!\r\n",
            "--inner--\r\n",
            "--outer\r\n",
            "Content-Type: application/octet-stream\r\n",
            "\r\n",
            "binary\r\n",
            "--outer--\r\n",
        )
        .as_bytes();
        let parsed = mailparse::parse_mail(email).unwrap();

        let mimetypes = PartsIterator::new(&parsed)
            .map(|part| part.ctype.mimetype.as_str())
            .collect::<Vec<_>>();

        // the nested alternative is fully visited before the sibling
        // attachment
        assert_eq!(
            vec![
                "multipart/mixed",
                "multipart/alternative",
                "text/html",
                "text/plain",
                "application/octet-stream",
            ],
            mimetypes,
        );
    }
}

#[cfg(test)]
mod test_first_text_plain_body {
    use super::first_text_plain_body;

    #[test]
    fn test_no_plain_part() {
        let email = concat!(
            "MIME-Version: 1.0\r\n",
            "From: from@localhost\r\n",
            "Content-Type: multipart/alternative; boundary=boundary\r\n",
            "\r\n",
            "--boundary\r\n",
            "Content-Type: text/html\r\n",
            "\r\n",
            "<h1>Hello!</h1>\r\n",
            "--boundary--\r\n",
        )
        .as_bytes();
        let parsed = mailparse::parse_mail(email).unwrap();

        assert_eq!(None, first_text_plain_body(&parsed));
    }

    #[test]
    fn test_nested_plain_part() {
        let email = concat!(
            "MIME-Version: 1.0\r\n",
            "From: from@localhost\r\n",
            "Content-Type: multipart/mixed; boundary=outer\r\n",
            "\r\n",
            "--outer\r\n",
            "Content-Type: multipart/alternative; boundary=inner\r\n",
            "\r\n",
            "--inner\r\n",
            "Content-Type: text/plain\r\n",
            "\r\n",
            "Hello!\r\n",
            "--inner--\r\n",
            "--outer--\r\n",
        )
        .as_bytes();
        let parsed = mailparse::parse_mail(email).unwrap();

        assert_eq!(
            "Hello!",
            first_text_plain_body(&parsed).unwrap().trim_end()
        );
    }

    #[test]
    fn test_quoted_printable_payload() {
        let email = concat!(
            "MIME-Version: 1.0\r\n",
            "From: from@localhost\r\n",
            "Content-Type: text/plain; charset=utf-8\r\n",
            "Content-Transfer-Encoding: quoted-printable\r\n",
            "\r\n",
            "Caf=C3=A9",
        )
        .as_bytes();
        let parsed = mailparse::parse_mail(email).unwrap();

        assert_eq!("Café", first_text_plain_body(&parsed).unwrap());
    }
}
