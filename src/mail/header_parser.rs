use log::debug;

use crate::domain::headers::HeaderMap;

fn is_folded(line: &str) -> bool {
    line.starts_with([' ', '\t'])
}

/// Parse a raw header block into a [`HeaderMap`].
///
/// Accepts `\n` and `\r\n` line endings. An indented line continues the open
/// header and is joined onto it with one space; with no open header it is read
/// like any other line. Blank lines (including whitespace-only ones) close the
/// open header. Lines without a `:` are dropped. Never fails.
pub fn parse_headers(raw: &str) -> HeaderMap {
    let mut map = HeaderMap::new();
    let mut current: Option<usize> = None;

    for (n, line) in raw.lines().enumerate() {
        if line.trim().is_empty() {
            current = None;
            continue;
        }

        if let Some(slot) = current.filter(|_| is_folded(line)) {
            map.append_folded(slot, line);
            continue;
        }

        match line.split_once(':') {
            Some((name, value)) => {
                current = Some(map.insert(name, value));
            }
            None => {
                debug!("line {}: dropping line without a header separator", n + 1);
                current = None;
            }
        }
    }

    map
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(map: &HeaderMap) -> Vec<(&str, &str)> {
        map.iter().collect()
    }

    #[test]
    fn unfolds_continuation_lines() {
        let map = parse_headers("Subject: Hello\n world\nX-Test: 1");
        assert_eq!(pairs(&map), vec![("subject", "Hello world"), ("x-test", "1")]);
    }

    #[test]
    fn folding_collapses_leading_whitespace_to_one_space() {
        let map = parse_headers("Received: from a\r\n\t\t   by b\r\n    with c\r\n");
        assert_eq!(map.get("received"), Some("from a by b with c"));
    }

    #[test]
    fn drops_line_without_colon() {
        let map = parse_headers("NoColonHere\nX-A: 1");
        assert_eq!(pairs(&map), vec![("x-a", "1")]);
    }

    #[test]
    fn line_without_colon_closes_open_header() {
        let map = parse_headers("X-A: 1\ngarbage\n continued");
        assert_eq!(map.get("x-a"), Some("1"));
    }

    #[test]
    fn drops_orphan_continuation() {
        let map = parse_headers(" orphan continuation\nX-A: 1");
        assert_eq!(pairs(&map), vec![("x-a", "1")]);
    }

    #[test]
    fn indented_header_with_no_open_header_is_kept() {
        let map = parse_headers("Subject: a\n\n X-Stega-Signature: s\n X-Stega-Verdict: Tampered\n");
        assert_eq!(map.get("subject"), Some("a"));
        // the second indented line continues the first once it is open
        assert_eq!(
            map.get("x-stega-signature"),
            Some("s X-Stega-Verdict: Tampered")
        );
        assert!(!map.contains_key("x-stega-verdict"));

        let map = parse_headers("\tX-Stega-Signature: s\nX-Stega-Verdict: Tampered\n");
        assert_eq!(map.get("x-stega-signature"), Some("s"));
        assert_eq!(map.get("x-stega-verdict"), Some("Tampered"));
    }

    #[test]
    fn whitespace_only_line_is_a_block_boundary() {
        // deliberate: a blank-looking line closes the header, so " 2" is orphaned
        let map = parse_headers("X-A: 1\n \n 2");
        assert_eq!(map.get("x-a"), Some("1"));
        let map = parse_headers("X-A: 1\n\t\r\n X-B: 2");
        assert_eq!(map.get("x-a"), Some("1"));
        assert_eq!(map.get("x-b"), Some("2"));
    }

    #[test]
    fn empty_line_closes_open_header() {
        let map = parse_headers("X-A: 1\n\n more");
        assert_eq!(map.get("x-a"), Some("1"));
    }

    #[test]
    fn later_duplicate_wins() {
        let map = parse_headers("X-A: 1\nX-A: 2");
        assert_eq!(pairs(&map), vec![("x-a", "2")]);
    }

    #[test]
    fn keys_are_lowercased_and_values_trimmed() {
        let map = parse_headers("  X-Stega-Verdict :   Verified  \r\n");
        assert_eq!(pairs(&map), vec![("x-stega-verdict", "Verified")]);
    }

    #[test]
    fn splits_on_first_colon_only() {
        let map = parse_headers("Date: Mon, 1 Jan 2024 10:20:30 +0000");
        assert_eq!(map.get("date"), Some("Mon, 1 Jan 2024 10:20:30 +0000"));
    }

    #[test]
    fn empty_input_gives_empty_map() {
        assert!(parse_headers("").is_empty());
        assert!(parse_headers("\r\n\r\n").is_empty());
    }

    #[test]
    fn same_input_same_map() {
        let raw = "From: a@b.c\r\nSubject: x\r\n y\r\nX-Stega-Signature: s1\r\n";
        assert_eq!(parse_headers(raw), parse_headers(raw));
    }

    #[test]
    fn values_never_contain_line_breaks() {
        let map = parse_headers("A: 1\r\n 2\r\n\t3\nB: x\r\n");
        for (_, v) in map.iter() {
            assert!(!v.contains('\n') && !v.contains('\r'));
        }
        assert_eq!(map.get("a"), Some("1 2 3"));
    }
}
