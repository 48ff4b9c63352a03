use log::debug;

use crate::domain::headers::HeaderMap;
use crate::domain::verdict::{VerdictResult, VerdictStatus};

pub const SIGNATURE_HEADER: &str = "x-stega-signature";
pub const TIMESTAMP_HEADER: &str = "x-stega-timestamp";
pub const DATE_HEADER: &str = "x-stega-date";
pub const VERDICT_HEADER: &str = "x-stega-verdict";

pub const NO_HEADERS_MESSAGE: &str = "No headers returned by Outlook.";
pub const NO_SIGNATURE_MESSAGE: &str = "No STEGA signature present in the headers.";
pub const SIGNATURE_FOUND_MESSAGE: &str = "STEGA signature found.";

/// Substrings that mark a verdict as bad wherever they appear.
const INVALID_MARKERS: [&str; 4] = ["invalid", "fail", "tamper", "revoked"];

/// Verdicts accepted as good only on an exact match.
const VALID_TOKENS: [&str; 3] = ["valid", "verified", "pass"];

fn lookup<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).filter(|v| !v.is_empty())
}

/// Map a raw verdict token to a status and message.
///
/// The invalid-marker substring test runs before the exact good-token test,
/// so a token such as `"invalidate-safe"` is an error.
fn grade(verdict: Option<&str>) -> (VerdictStatus, String) {
    let Some(original) = verdict else {
        return (VerdictStatus::Success, SIGNATURE_FOUND_MESSAGE.to_string());
    };
    let normalized = original.trim().to_lowercase();

    if normalized.is_empty() {
        (VerdictStatus::Success, SIGNATURE_FOUND_MESSAGE.to_string())
    } else if INVALID_MARKERS.iter().any(|m| normalized.contains(m)) {
        (
            VerdictStatus::Error,
            format!("STEGA signature flagged as invalid ({original})."),
        )
    } else if VALID_TOKENS.contains(&normalized.as_str()) {
        (VerdictStatus::Success, SIGNATURE_FOUND_MESSAGE.to_string())
    } else {
        (
            VerdictStatus::Warning,
            format!("STEGA signature found with verdict: {original}."),
        )
    }
}

/// Classify the STEGA signature headers of a message.
///
/// `None` and an empty map both mean the caller got no headers at all.
pub fn classify_signature(headers: Option<&HeaderMap>) -> VerdictResult {
    let Some(headers) = headers.filter(|h| !h.is_empty()) else {
        return VerdictResult::unsigned(VerdictStatus::Warning, NO_HEADERS_MESSAGE);
    };

    let Some(signature) = lookup(headers, SIGNATURE_HEADER) else {
        debug!("no {SIGNATURE_HEADER} among {} headers", headers.len());
        return VerdictResult::unsigned(VerdictStatus::Warning, NO_SIGNATURE_MESSAGE);
    };

    let timestamp = lookup(headers, TIMESTAMP_HEADER).or_else(|| lookup(headers, DATE_HEADER));
    let verdict = lookup(headers, VERDICT_HEADER);
    let (status, message) = grade(verdict);
    debug!("signature verdict {verdict:?} classified as {status}");

    VerdictResult {
        status,
        message,
        signature: Some(signature.to_string()),
        timestamp: timestamp.map(str::to_string),
        verdict: verdict.map(str::to_string),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mail::header_parser::parse_headers;

    fn signed(verdict: Option<&str>) -> HeaderMap {
        let mut raw = String::from("Subject: hi\r\nX-Stega-Signature: abc123\r\n");
        if let Some(v) = verdict {
            raw.push_str(&format!("X-Stega-Verdict: {v}\r\n"));
        }
        parse_headers(&raw)
    }

    #[test]
    fn missing_headers_is_a_warning() {
        for r in [
            classify_signature(None),
            classify_signature(Some(&HeaderMap::new())),
        ] {
            assert_eq!(r.status, VerdictStatus::Warning);
            assert_eq!(r.message, NO_HEADERS_MESSAGE);
            assert_eq!(r.signature, None);
        }
    }

    #[test]
    fn no_marker_is_a_warning_without_fields() {
        let headers = parse_headers("Subject: hi\r\nX-Stega-Verdict: Verified\r\n");
        let r = classify_signature(Some(&headers));
        assert_eq!(r.status, VerdictStatus::Warning);
        assert_eq!(r.message, NO_SIGNATURE_MESSAGE);
        assert_eq!((r.signature, r.timestamp, r.verdict), (None, None, None));
    }

    #[test]
    fn marker_without_verdict_is_success() {
        let r = classify_signature(Some(&signed(None)));
        assert_eq!(r.status, VerdictStatus::Success);
        assert_eq!(r.message, SIGNATURE_FOUND_MESSAGE);
        assert_eq!(r.signature.as_deref(), Some("abc123"));
        assert_eq!(r.verdict, None);
    }

    #[test]
    fn good_tokens_are_success() {
        for v in ["Verified", "valid", "PASS", "  pass  "] {
            let r = classify_signature(Some(&signed(Some(v))));
            assert_eq!(r.status, VerdictStatus::Success, "{v}");
            assert_eq!(r.message, SIGNATURE_FOUND_MESSAGE);
        }
        let r = classify_signature(Some(&signed(Some("Verified"))));
        assert_eq!(r.signature.as_deref(), Some("abc123"));
        assert_eq!(r.verdict.as_deref(), Some("Verified"));
    }

    #[test]
    fn bad_markers_are_errors_quoting_original_text() {
        let r = classify_signature(Some(&signed(Some("Tampered"))));
        assert_eq!(r.status, VerdictStatus::Error);
        assert_eq!(r.message, "STEGA signature flagged as invalid (Tampered).");

        for v in ["INVALID", "check-failed", "Revoked by issuer"] {
            let r = classify_signature(Some(&signed(Some(v))));
            assert_eq!(r.status, VerdictStatus::Error, "{v}");
            assert!(r.message.contains(v));
        }
    }

    #[test]
    fn substring_test_wins_over_exact_test() {
        let r = classify_signature(Some(&signed(Some("invalidate-safe"))));
        assert_eq!(r.status, VerdictStatus::Error);
    }

    #[test]
    fn unknown_token_is_a_warning() {
        let r = classify_signature(Some(&signed(Some("maybe"))));
        assert_eq!(r.status, VerdictStatus::Warning);
        assert_eq!(r.message, "STEGA signature found with verdict: maybe.");

        // close to a good token but not equal
        let r = classify_signature(Some(&signed(Some("verified-ish"))));
        assert_eq!(r.status, VerdictStatus::Warning);
    }

    #[test]
    fn timestamp_falls_back_to_date_header() {
        let headers = parse_headers("X-Stega-Signature: s\nX-Stega-Date: 2024-01-01\n");
        let r = classify_signature(Some(&headers));
        assert_eq!(r.timestamp.as_deref(), Some("2024-01-01"));

        let headers = parse_headers(
            "X-Stega-Signature: s\nX-Stega-Date: 2024-01-01\nX-Stega-Timestamp: 1704067200\n",
        );
        let r = classify_signature(Some(&headers));
        assert_eq!(r.timestamp.as_deref(), Some("1704067200"));
    }

    #[test]
    fn empty_marker_counts_as_missing() {
        let headers = parse_headers("X-Stega-Signature:\nX-Stega-Verdict: pass\n");
        let r = classify_signature(Some(&headers));
        assert_eq!(r.message, NO_SIGNATURE_MESSAGE);
        assert_eq!(r.verdict, None);
    }
}
