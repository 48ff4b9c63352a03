use mailparse::{MailAddr, SingleInfo};

use crate::domain::email::MessageInfo;
use crate::domain::headers::HeaderMap;
use crate::mail::decoders::decode_mime_words;

fn display_name(info: &SingleInfo) -> Option<String> {
    info.display_name
        .as_deref()
        .map(decode_mime_words)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn singles(raw: &str) -> Vec<SingleInfo> {
    match mailparse::addrparse(raw) {
        Ok(list) => list
            .iter()
            .flat_map(|a| match a {
                MailAddr::Single(s) => vec![s.clone()],
                MailAddr::Group(g) => g.addrs.clone(),
            })
            .collect(),
        Err(_) => vec![],
    }
}

/// "Name <addr>" for the first sender, or the raw header when it won't parse.
fn format_from(raw: &str) -> String {
    match singles(raw).first() {
        Some(s) => match display_name(s) {
            Some(name) => format!("{} <{}>", name, s.addr),
            None => s.addr.clone(),
        },
        None => decode_mime_words(raw),
    }
}

/// Recipient display names (addresses when unnamed), comma separated.
fn format_to(raw: &str) -> String {
    let list = singles(raw);
    if list.is_empty() {
        return decode_mime_words(raw);
    }
    list.iter()
        .map(|s| display_name(s).unwrap_or_else(|| s.addr.clone()))
        .collect::<Vec<_>>()
        .join(", ")
}

impl MessageInfo {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let date = headers.get("date").unwrap_or_default().to_string();
        let date_epoch = if date.is_empty() {
            None
        } else {
            mailparse::dateparse(&date).ok()
        };

        Self {
            from: headers.get("from").map(format_from).unwrap_or_default(),
            to: headers.get("to").map(format_to).unwrap_or_default(),
            subject: headers
                .get("subject")
                .map(decode_mime_words)
                .unwrap_or_else(|| "(no subject)".to_string()),
            date,
            date_epoch,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mail::header_parser::parse_headers;

    #[test]
    fn summarizes_sender_recipients_subject_and_date() {
        let headers = parse_headers(
            "From: Alice Martin <alice@example.com>\r\n\
             To: Bob <bob@example.com>, carol@example.com\r\n\
             Subject: =?UTF-8?Q?Re=3A_caf=C3=A9?=\r\n\
             Date: Mon, 1 Jan 2024 00:00:00 +0000\r\n",
        );
        let info = MessageInfo::from_headers(&headers);
        assert_eq!(info.from, "Alice Martin <alice@example.com>");
        assert_eq!(info.to, "Bob, carol@example.com");
        assert_eq!(info.subject, "Re: café");
        assert_eq!(info.date, "Mon, 1 Jan 2024 00:00:00 +0000");
        assert_eq!(info.date_epoch, Some(1_704_067_200));
    }

    #[test]
    fn missing_fields_fall_back() {
        let info = MessageInfo::from_headers(&HeaderMap::new());
        assert_eq!(info.from, "");
        assert_eq!(info.subject, "(no subject)");
        assert_eq!(info.date_epoch, None);
    }
}
